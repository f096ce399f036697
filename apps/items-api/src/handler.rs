//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! - 各ハンドラはサブモジュールに配置し、ここで re-export する
//! - ハンドラは薄く保ち、ストアへの呼び出しはユースケースに委譲

pub mod health;
pub mod item;

pub use health::{ReadinessState, health_check, readiness_check};
pub use item::{
    ItemRecordDto,
    ItemRequest,
    ItemState,
    create_item,
    delete_item,
    get_item,
    list_items,
    update_item,
};
