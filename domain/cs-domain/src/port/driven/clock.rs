//! 時刻ポート

/// 時刻ポート
pub trait Clock {
    /// ISO 8601形式のタイムスタンプを取得
    fn now_iso8601(&self) -> String;
}
