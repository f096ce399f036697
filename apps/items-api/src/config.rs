//! # Items API 設定
//!
//! 環境変数からサーバーとレコードストアの設定を読み込む。
//!
//! | 変数 | 既定値 | 内容 |
//! |------|--------|------|
//! | `ITEMS_HOST` | `0.0.0.0` | バインドアドレス |
//! | `ITEMS_PORT` | `8080` | ポート番号 |
//! | `STORE_BACKEND` | `postgres` | `postgres` または `memory` |
//! | `DATABASE_URL` | なし | `postgres` の場合は必須 |

use std::env;

use thiserror::Error;

/// 設定読み込みエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} が設定されていません")]
    Missing { name: &'static str },

    #[error("{name} の値が不正です: {value}")]
    Invalid { name: &'static str, value: String },
}

/// レコードストアの種類
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    /// PostgreSQL（接続 URL を持つ）
    Postgres { database_url: String },
    /// プロセス内メモリ（再起動で消える）
    Memory,
}

/// Items API サーバーの設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemsConfig {
    /// バインドアドレス
    pub host:    String,
    /// ポート番号
    pub port:    u16,
    pub backend: StoreBackend,
}

impl ItemsConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// 任意の参照関数から設定を読み込む
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = lookup("ITEMS_HOST").unwrap_or_else(|| "0.0.0.0".to_string());

        let port = match lookup("ITEMS_PORT") {
            Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
                name: "ITEMS_PORT",
                value,
            })?,
            None => 8080,
        };

        let backend = match lookup("STORE_BACKEND").as_deref() {
            None | Some("postgres") => StoreBackend::Postgres {
                database_url: lookup("DATABASE_URL").ok_or(ConfigError::Missing {
                    name: "DATABASE_URL",
                })?,
            },
            Some("memory") => StoreBackend::Memory,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    name:  "STORE_BACKEND",
                    value: other.to_string(),
                });
            }
        };

        Ok(Self {
            host,
            port,
            backend,
        })
    }
}
