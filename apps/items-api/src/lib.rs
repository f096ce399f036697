//! # Items API ライブラリ
//!
//! アイテム CRUD API のハンドラ、ユースケース、ルーター構築を公開する。
//! バイナリ（`main.rs`）と統合テストの両方から使う。

pub mod app_builder;
pub mod config;
pub mod error;
pub mod handler;
pub mod usecase;
