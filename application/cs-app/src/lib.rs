//! cs-app: アプリケーション層のファサード。
//! Engine 層とドメインポートを組み合わせて、列挙/改名/復元のユースケースを実装し、
//! 結果を表示用の `OperationOutcome` に変換する。

pub mod scan;
pub mod spoof;

#[cfg(test)]
mod fakes;

pub use scan::{ScanResult, spawn_scan};
pub use spoof::{SpoofDeps, SpoofService, messages};
