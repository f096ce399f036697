//! # アイテムハンドラ
//!
//! ## エンドポイント
//!
//! - `POST /items` - アイテム作成（201）
//! - `GET /items` - アイテム一覧
//! - `GET /items/{id}` - アイテム取得
//! - `PUT /items/{id}` - アイテム更新（3 フィールドすべて上書き）
//! - `DELETE /items/{id}` - アイテム削除（204）
//!
//! ボディを取るハンドラは JSON の束縛に失敗した時点でエラーを返し、
//! ストアには触れない。

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use itembase_domain::item::{Item, ItemRecord};
use serde::{Deserialize, Serialize};

use crate::{error::ApiError, usecase::ItemUseCaseImpl};

/// アイテム API の共有状態
pub struct ItemState {
    pub usecase: ItemUseCaseImpl,
}

// --- リクエスト/レスポンス型 ---

/// アイテム作成・更新リクエスト
///
/// 省略されたフィールドはゼロ値（`""` / `0.0`）になる。
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ItemRequest {
    pub title:       String,
    pub description: String,
    pub price:       f64,
}

impl From<ItemRequest> for Item {
    fn from(req: ItemRequest) -> Self {
        Item {
            title:       req.title,
            description: req.description,
            price:       req.price,
        }
    }
}

/// アイテムレコードのレスポンス
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRecordDto {
    pub id:              String,
    pub collection_id:   String,
    pub collection_name: String,
    pub created:         DateTime<Utc>,
    pub updated:         DateTime<Utc>,
    pub title:           String,
    pub description:     String,
    pub price:           f64,
}

impl From<&ItemRecord> for ItemRecordDto {
    fn from(record: &ItemRecord) -> Self {
        Self {
            id:              record.id().to_string(),
            collection_id:   record.collection_id().to_string(),
            collection_name: record.collection_name().to_string(),
            created:         record.created(),
            updated:         record.updated(),
            title:           record.title().to_string(),
            description:     record.description().to_string(),
            price:           record.price(),
        }
    }
}

// --- ハンドラ ---

/// POST /items
#[tracing::instrument(skip_all)]
pub async fn create_item(
    State(state): State<Arc<ItemState>>,
    payload: Result<Json<ItemRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload?;

    let record = state.usecase.create_item(req.into()).await?;

    Ok((StatusCode::CREATED, Json(ItemRecordDto::from(&record))))
}

/// GET /items/{id}
#[tracing::instrument(skip_all, fields(%id))]
pub async fn get_item(
    State(state): State<Arc<ItemState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let record = state.usecase.get_item(&id).await?;

    Ok(Json(ItemRecordDto::from(&record)))
}

/// GET /items
#[tracing::instrument(skip_all)]
pub async fn list_items(
    State(state): State<Arc<ItemState>>,
) -> Result<impl IntoResponse, ApiError> {
    let records = state.usecase.list_items().await?;

    let items: Vec<ItemRecordDto> = records.iter().map(ItemRecordDto::from).collect();
    Ok(Json(items))
}

/// PUT /items/{id}
#[tracing::instrument(skip_all, fields(%id))]
pub async fn update_item(
    State(state): State<Arc<ItemState>>,
    Path(id): Path<String>,
    payload: Result<Json<ItemRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload?;

    let record = state.usecase.update_item(&id, req.into()).await?;

    Ok(Json(ItemRecordDto::from(&record)))
}

/// DELETE /items/{id}
#[tracing::instrument(skip_all, fields(%id))]
pub async fn delete_item(
    State(state): State<Arc<ItemState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    state.usecase.delete_item(&id).await?;

    Ok(StatusCode::NO_CONTENT)
}
