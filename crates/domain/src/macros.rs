/// レコードストア形式の ID 型を定義する宣言型マクロ
///
/// 以下のボイラープレートを一括生成する:
/// - Newtype 構造体（`String` をラップ）
/// - `derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display)`
/// - `new()`: [`ID_LENGTH`](crate::item::ID_LENGTH) 文字の英小文字・数字をランダム生成
/// - `from_string()`: 既存の文字列から復元（形式は検証しない）
/// - `as_str()`: 内部文字列への参照
/// - `Default` impl（`new()` に委譲）
///
/// パスパラメータなど外部から受け取った値は形式を問わずそのまま ID として扱う。
/// 存在しない ID の検索はストア側で「見つからない」として扱われる。
macro_rules! define_record_id {
    (
        $(#[$meta:meta])*
        $vis:vis struct $Name:ident;
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, PartialEq, Eq, Hash,
            serde::Serialize, serde::Deserialize,
            derive_more::Display,
        )]
        #[serde(transparent)]
        #[display("{_0}")]
        $vis struct $Name(String);

        impl $Name {
            /// 新しい ID を生成する
            pub fn new() -> Self {
                Self($crate::item::generate_id())
            }

            /// 既存の文字列から ID を作成する
            pub fn from_string(s: impl Into<String>) -> Self {
                Self(s.into())
            }

            /// 内部の文字列参照を取得する
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Default for $Name {
            fn default() -> Self {
                Self::new()
            }
        }
    };
}
