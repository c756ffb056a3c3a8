//! cs-composition: 実行ファイル向けのランタイムを組み立てるコンポジションルート。
//! ドメイン／アプリケーション／各種アダプタをここで配線し、apps/* はこのクレートだけに依存する。

pub mod cli;
pub mod elevation;
pub mod error;

// apps/* が内側レイヤーの型に触れる必要がある場合は、ここから辿れるようにする。
pub use cs_app as app;
pub use cs_domain as domain;
pub use cs_engine as engine;

pub use cli::CliRuntime;
pub use cs_app::{ScanResult, SpoofService};
pub use cs_domain::model::{CameraRecord, Classification, SpooferConfig};
pub use cs_domain::port::driving::{OperationOutcome, SpoofUseCase};
pub use cs_log_utils::write_lifecycle_line;
pub use elevation::{Elevation, ensure_elevated};
