//! 権限ポート
//!
//! 保護されたレジストリルートへの書き込みには管理者権限が必要。

use crate::error::DomainError;

/// 権限の確認と昇格要求
pub trait PrivilegeProvider {
    /// 現在のプロセスが昇格済みか
    fn is_elevated(&self) -> bool;

    /// 自身を管理者として再起動する。
    /// 昇格済みなら何もせず true、起動要求が受理されたら true。
    fn relaunch_elevated(&self, args: &[String]) -> Result<bool, DomainError>;
}
