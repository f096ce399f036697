//! # PostgresRecordStore
//!
//! PostgreSQL にレコードを保持するストア。
//!
//! コレクションは `_collections`、レコードは `items` テーブルに格納する。
//! 一覧は `created` の昇順で返すが、呼び出し側はこの順序に依存しない。

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use itembase_domain::{
    collection::{Collection, CollectionId},
    item::{Item, ItemRecord, RecordId},
};
use sqlx::PgPool;

use super::{RecordFilter, RecordStore};
use crate::{db, error::InfraError};

#[derive(sqlx::FromRow)]
struct CollectionRow {
    id:   String,
    name: String,
}

impl From<CollectionRow> for Collection {
    fn from(row: CollectionRow) -> Self {
        Collection::new(CollectionId::from_string(row.id), row.name)
    }
}

#[derive(sqlx::FromRow)]
struct ItemRow {
    id:          String,
    title:       String,
    description: String,
    price:       f64,
    created:     DateTime<Utc>,
    updated:     DateTime<Utc>,
}

impl ItemRow {
    fn into_record(self, collection: &Collection) -> ItemRecord {
        ItemRecord::from_db(
            RecordId::from_string(self.id),
            collection,
            Item {
                title:       self.title,
                description: self.description,
                price:       self.price,
            },
            self.created,
            self.updated,
        )
    }
}

/// PostgreSQL 実装の RecordStore
#[derive(Debug, Clone)]
pub struct PostgresRecordStore {
    pool: PgPool,
}

impl PostgresRecordStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 接続プールを作成し、マイグレーションを適用したストアを返す
    ///
    /// `items` コレクションの登録もマイグレーションに含まれる。
    #[tracing::instrument(skip_all)]
    pub async fn bootstrap(database_url: &str) -> Result<Self, InfraError> {
        let pool = db::create_pool(database_url).await?;
        tracing::info!("データベースに接続しました");

        db::run_migrations(&pool).await?;
        tracing::info!("マイグレーションを適用しました");

        Ok(Self::new(pool))
    }
}

#[async_trait]
impl RecordStore for PostgresRecordStore {
    #[tracing::instrument(skip_all, level = "debug", fields(%name_or_id))]
    async fn find_collection_by_name_or_id(
        &self,
        name_or_id: &str,
    ) -> Result<Collection, InfraError> {
        let row: Option<CollectionRow> = sqlx::query_as(
            r#"
            SELECT id, name
            FROM _collections
            WHERE name = $1 OR id = $1
            ORDER BY (name = $1) DESC
            LIMIT 1
            "#,
        )
        .bind(name_or_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Collection::from)
            .ok_or_else(|| InfraError::not_found("Collection", name_or_id))
    }

    #[tracing::instrument(skip_all, level = "debug", fields(collection = %collection_name_or_id, %id))]
    async fn find_record_by_id(
        &self,
        collection_name_or_id: &str,
        id: &str,
    ) -> Result<ItemRecord, InfraError> {
        let collection = self
            .find_collection_by_name_or_id(collection_name_or_id)
            .await?;

        let row: Option<ItemRow> = sqlx::query_as(
            r#"
            SELECT id, title, description, price, created, updated
            FROM items
            WHERE id = $1 AND collection_id = $2
            "#,
        )
        .bind(id)
        .bind(collection.id().as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_record(&collection))
            .ok_or_else(|| InfraError::not_found("Record", id))
    }

    #[tracing::instrument(skip_all, level = "debug", fields(collection = %collection_name_or_id))]
    async fn find_records_by_filter(
        &self,
        collection_name_or_id: &str,
        filter: Option<&RecordFilter>,
    ) -> Result<Vec<ItemRecord>, InfraError> {
        let collection = self
            .find_collection_by_name_or_id(collection_name_or_id)
            .await?;
        let filter = filter.cloned().unwrap_or_default();

        let rows: Vec<ItemRow> = sqlx::query_as(
            r#"
            SELECT id, title, description, price, created, updated
            FROM items
            WHERE collection_id = $1
              AND ($2::TEXT IS NULL OR title = $2)
              AND ($3::TEXT IS NULL OR description = $3)
              AND ($4::DOUBLE PRECISION IS NULL OR price = $4)
            ORDER BY created ASC, id ASC
            "#,
        )
        .bind(collection.id().as_str())
        .bind(filter.title_eq())
        .bind(filter.description_eq())
        .bind(filter.price_eq())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| r.into_record(&collection))
            .collect())
    }

    #[tracing::instrument(skip_all, level = "debug", fields(id = %record.id(), is_new = record.is_new()))]
    async fn save_record(&self, record: &ItemRecord) -> Result<ItemRecord, InfraError> {
        let collection = self
            .find_collection_by_name_or_id(record.collection_id().as_str())
            .await?;

        let row: Option<ItemRow> = if record.is_new() {
            sqlx::query_as(
                r#"
                INSERT INTO items (id, collection_id, title, description, price, created, updated)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                RETURNING id, title, description, price, created, updated
                "#,
            )
            .bind(record.id().as_str())
            .bind(collection.id().as_str())
            .bind(record.title())
            .bind(record.description())
            .bind(record.price())
            .bind(record.created())
            .bind(record.updated())
            .fetch_optional(&self.pool)
            .await?
        } else {
            sqlx::query_as(
                r#"
                UPDATE items
                SET title = $3, description = $4, price = $5, updated = $6
                WHERE id = $1 AND collection_id = $2
                RETURNING id, title, description, price, created, updated
                "#,
            )
            .bind(record.id().as_str())
            .bind(collection.id().as_str())
            .bind(record.title())
            .bind(record.description())
            .bind(record.price())
            .bind(record.updated())
            .fetch_optional(&self.pool)
            .await?
        };

        row.map(|r| r.into_record(&collection))
            .ok_or_else(|| InfraError::not_found("Record", record.id().as_str()))
    }

    #[tracing::instrument(skip_all, level = "debug", fields(id = %record.id()))]
    async fn delete_record(&self, record: &ItemRecord) -> Result<(), InfraError> {
        let result = sqlx::query("DELETE FROM items WHERE id = $1 AND collection_id = $2")
            .bind(record.id().as_str())
            .bind(record.collection_id().as_str())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(InfraError::not_found("Record", record.id().as_str()));
        }
        Ok(())
    }

    async fn ping(&self) -> Result<(), InfraError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
