//! ログライターポート

use crate::error::DomainError;

/// 操作ログレコード
#[derive(Debug, Clone)]
pub struct OperationLogRecord {
    /// ISO8601タイムスタンプ
    pub timestamp: String,
    /// 操作種別（rename/restore等）
    pub operation: String,
    /// 成功有無
    pub success: bool,
    /// 詳細またはエラーメッセージ
    pub details: String,
    /// 対象カメラ名
    pub targets: Vec<String>,
}

/// ログライターポート
pub trait LogWriter {
    /// 操作ログを書込（上限を超えたらローテーション）
    fn write_operation_log(&self, record: &OperationLogRecord) -> Result<(), DomainError>;
}
