//! 駆動ポート（出力インターフェース）。
//!
//! ドメインが外部に求める機能を定義する。
//! インフラ層のアダプタが実装する。

mod backup_store;
mod capture_device_source;
mod clock;
mod config_repository;
mod log_writer;
mod privilege;
mod registry_hive;

pub use backup_store::*;
pub use capture_device_source::*;
pub use clock::*;
pub use config_repository::*;
pub use log_writer::*;
pub use privilege::*;
pub use registry_hive::*;
