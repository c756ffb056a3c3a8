//! レジストリアクセスポート
//!
//! HKEY_LOCAL_MACHINE 相対パスで、文字列値の列挙と読み書きだけを行う。

use crate::DomainError;
use crate::model::{RegistryStringValue, RegistryValueKind};

pub type Result<T> = std::result::Result<T, DomainError>;

/// 階層型キー/値ストアの最小ポート
///
/// キーがない場合は `DomainError::NotFound`、
/// 権限不足は `DomainError::RegistryAccessDenied` を返す。
pub trait RegistryHive {
    /// 直下のサブキー名を列挙
    fn subkeys(&self, path: &str) -> Result<Vec<String>>;

    /// 直下の文字列値（REG_SZ / REG_EXPAND_SZ）を列挙。他の型は含めない。
    fn string_values(&self, path: &str) -> Result<Vec<RegistryStringValue>>;

    /// 文字列値を1件読む（値がなければ None）
    fn read_string(&self, path: &str, value_name: &str) -> Result<Option<String>>;

    /// 既存キーを書き込み用に開き、文字列値を設定する
    fn write_string(
        &self,
        path: &str,
        value_name: &str,
        data: &str,
        kind: RegistryValueKind,
    ) -> Result<()>;
}
