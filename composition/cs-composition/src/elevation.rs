//! 「管理者でなければ昇格して再起動、だめなら終了」のフロー。

use cs_domain::port::driven::PrivilegeProvider;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Elevation {
    /// このプロセスのまま続行
    AlreadyElevated,
    /// 昇格したプロセスを起動した。呼び出し側は成功で終了する
    Relaunched,
    /// 起動できなかった。呼び出し側は失敗で終了する
    Failed(String),
}

impl Elevation {
    pub fn exit_code(&self) -> Option<u8> {
        match self {
            Self::AlreadyElevated => None,
            Self::Relaunched => Some(0),
            Self::Failed(_) => Some(1),
        }
    }
}

pub fn ensure_elevated(privilege: &dyn PrivilegeProvider, args: &[String]) -> Elevation {
    if privilege.is_elevated() {
        return Elevation::AlreadyElevated;
    }
    match privilege.relaunch_elevated(args) {
        Ok(true) => {
            cs_log_utils::write_lifecycle_line("elevation", "relaunched with runas");
            Elevation::Relaunched
        }
        Ok(false) => Elevation::Failed("elevation was not granted".into()),
        Err(e) => {
            cs_log_utils::write_lifecycle_line("elevation", &format!("relaunch failed: {e}"));
            Elevation::Failed(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cs_domain::DomainError;
    use std::cell::RefCell;

    struct FakePrivilege {
        elevated: bool,
        result: Result<bool, DomainError>,
        seen_args: RefCell<Vec<String>>,
    }

    impl PrivilegeProvider for FakePrivilege {
        fn is_elevated(&self) -> bool {
            self.elevated
        }

        fn relaunch_elevated(&self, args: &[String]) -> Result<bool, DomainError> {
            self.seen_args.borrow_mut().extend(args.iter().cloned());
            self.result.clone()
        }
    }

    fn fake(elevated: bool, result: Result<bool, DomainError>) -> FakePrivilege {
        FakePrivilege {
            elevated,
            result,
            seen_args: RefCell::new(Vec::new()),
        }
    }

    #[test]
    fn elevated_process_continues() {
        let p = fake(true, Ok(true));
        let step = ensure_elevated(&p, &["list".into()]);
        assert_eq!(step, Elevation::AlreadyElevated);
        assert_eq!(step.exit_code(), None);
        assert!(p.seen_args.borrow().is_empty());
    }

    #[test]
    fn relaunch_forwards_args_and_exits_zero() {
        let p = fake(false, Ok(true));
        let step = ensure_elevated(&p, &["restore".into(), "OBS Virtual Camera".into()]);
        assert_eq!(step, Elevation::Relaunched);
        assert_eq!(step.exit_code(), Some(0));
        assert_eq!(
            *p.seen_args.borrow(),
            vec!["restore".to_string(), "OBS Virtual Camera".to_string()]
        );
    }

    #[test]
    fn failed_relaunch_exits_one() {
        let p = fake(
            false,
            Err(DomainError::ProcessLaunchFailed("ShellExecuteW failed: 5".into())),
        );
        let step = ensure_elevated(&p, &[]);
        assert!(matches!(step, Elevation::Failed(ref m) if m.contains("ShellExecuteW")));
        assert_eq!(step.exit_code(), Some(1));

        assert!(matches!(
            ensure_elevated(&fake(false, Ok(false)), &[]),
            Elevation::Failed(_)
        ));
    }
}
