//! 駆動ポート（外部から呼び出されるユースケースの入口）
//!
//! フロントエンド（CLI/GUI）が呼び出すユースケースを定義する。
//! アプリケーション層のサービスが実装する。

mod spoof_use_case;

pub use spoof_use_case::*;
