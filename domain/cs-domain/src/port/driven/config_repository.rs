//! 設定リポジトリポート

use crate::error::DomainError;
use crate::model::SpooferConfig;

/// 設定ストレージポート
pub trait ConfigRepository {
    /// 設定を読込
    fn load(&self) -> Result<SpooferConfig, DomainError>;

    /// 設定を保存
    fn save(&self, config: &SpooferConfig) -> Result<(), DomainError>;

    /// 設定ファイルの存在確認
    fn exists(&self) -> bool;

    /// ファイルがなければ既定値を返す
    fn load_or_default(&self) -> Result<SpooferConfig, DomainError> {
        if self.exists() {
            self.load()
        } else {
            Ok(SpooferConfig::default())
        }
    }
}
