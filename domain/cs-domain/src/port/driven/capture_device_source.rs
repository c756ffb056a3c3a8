//! キャプチャデバイス列挙ポート

use crate::error::DomainError;

/// OSのマルチメディアデバイスグラフからビデオ入力の表示名を得る
pub trait CaptureDeviceSource {
    /// 表示名を列挙順に返す
    fn capture_device_names(&self) -> Result<Vec<String>, DomainError>;
}
