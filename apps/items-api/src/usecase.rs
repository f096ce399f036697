//! # ユースケース層
//!
//! ハンドラから呼ばれ、レコードストアへの呼び出しを操作ごとに組み立てる。
//!
//! - **依存性注入**: ストアと時刻を `Arc<dyn Trait>` で外部から注入
//! - **エラー種別の変換**: ストアのエラー種別を [`ApiError`](crate::error::ApiError) に写す

pub mod item;

pub use item::ItemUseCaseImpl;
