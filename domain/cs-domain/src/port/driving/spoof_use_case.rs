//! カメラ名偽装ユースケースポート

use crate::model::{CameraRecord, Classification};

/// 操作結果（成功フラグ + 表示用メッセージ）
///
/// 部分成功は件数付きで報告する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationOutcome {
    pub ok: bool,
    pub message: String,
    /// 見つかった/記録されていた件数
    pub matched: usize,
    /// 書き込みに成功した件数
    pub modified: usize,
    /// 書き込みに失敗した件数
    pub failed: usize,
}

impl OperationOutcome {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            ..Self::failure(message)
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
            matched: 0,
            modified: 0,
            failed: 0,
        }
    }

    pub fn counts(mut self, matched: usize, modified: usize, failed: usize) -> Self {
        self.matched = matched;
        self.modified = modified;
        self.failed = failed;
        self
    }
}

/// フロントエンドから呼ばれるユースケース
pub trait SpoofUseCase {
    /// 接続中のカメラを列挙（失敗時は空）
    fn list_cameras(&self) -> Vec<CameraRecord>;

    /// 名前を判定
    fn classify(&self, name: &str) -> Classification;

    /// レジストリ上のカメラ名を置換（事前にバックアップ）
    fn rename(&self, old_name: &str, new_name: &str) -> OperationOutcome;

    /// バックアップから元の名前を復元
    fn restore(&self, original_name: &str) -> OperationOutcome;

    /// バックアップ済みの元の名前
    fn backed_up_names(&self) -> Vec<String>;
}
