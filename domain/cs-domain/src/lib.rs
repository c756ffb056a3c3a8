//! camspoof ドメイン層
//!
//! カメラ名の判定・レジストリ書き換え・バックアップのビジネスロジック中核。
//! 外部依存ゼロでRust標準ライブラリのみ使用。
//! ヘキサゴナルアーキテクチャの最内層。

pub mod error;   // ドメインエラー定義
pub mod model;   // ドメインモデル（値オブジェクト、エンティティ）
pub mod port;    // ポート（driving/driven）
pub mod service; // ドメインサービス（分類器、文字列照合）

pub use error::DomainError; // エラー型を再エクスポート
