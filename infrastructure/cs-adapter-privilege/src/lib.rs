//! 権限アダプター
//!
//! トークンの昇格状態の確認と、"runas" による自身の再起動。

use cs_domain::DomainError;
use cs_domain::port::driven::PrivilegeProvider;

#[derive(Debug, Default, Clone, Copy)]
pub struct PrivilegeAdapter;

impl PrivilegeAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl PrivilegeProvider for PrivilegeAdapter {
    fn is_elevated(&self) -> bool {
        is_admin()
    }

    fn relaunch_elevated(&self, args: &[String]) -> Result<bool, DomainError> {
        if is_admin() {
            return Ok(true);
        }
        relaunch_as_admin(&join_command_line(args))
    }
}

/// 現在のプロセスが管理者権限を持つか確認
pub fn is_admin() -> bool {
    #[cfg(target_os = "windows")]
    {
        windows_admin::check_admin()
    }
    #[cfg(not(target_os = "windows"))]
    {
        false
    }
}

/// CommandLineToArgvW で元に戻せる形に引数を連結する
pub fn join_command_line(args: &[String]) -> String {
    args.iter()
        .map(|a| quote_arg(a))
        .collect::<Vec<_>>()
        .join(" ")
}

fn quote_arg(arg: &str) -> String {
    if !arg.is_empty() && !arg.contains([' ', '\t', '"']) {
        return arg.to_string();
    }
    let mut out = String::with_capacity(arg.len() + 2);
    out.push('"');
    let mut backslashes = 0usize;
    for ch in arg.chars() {
        match ch {
            '\\' => backslashes += 1,
            '"' => {
                // 引用符の直前のバックスラッシュは倍にしてから引用符をエスケープ
                out.extend(std::iter::repeat('\\').take(backslashes * 2 + 1));
                out.push('"');
                backslashes = 0;
            }
            _ => {
                out.extend(std::iter::repeat('\\').take(backslashes));
                out.push(ch);
                backslashes = 0;
            }
        }
    }
    out.extend(std::iter::repeat('\\').take(backslashes * 2));
    out.push('"');
    out
}

#[cfg(windows)]
fn relaunch_as_admin(params: &str) -> Result<bool, DomainError> {
    use std::ffi::OsStr;
    use std::os::windows::ffi::OsStrExt;
    use windows::Win32::UI::Shell::ShellExecuteW;
    use windows::Win32::UI::WindowsAndMessaging::SW_SHOWNORMAL;
    use windows::core::PCWSTR;

    fn to_wide(s: &OsStr) -> Vec<u16> {
        s.encode_wide().chain(std::iter::once(0)).collect()
    }

    let exe_path = std::env::current_exe()
        .map_err(|e| DomainError::ProcessLaunchFailed(format!("current_exe: {e}")))?;
    let op = to_wide(OsStr::new("runas"));
    let file = to_wide(exe_path.as_os_str());
    let params_w = to_wide(OsStr::new(params));
    let dir = to_wide(
        exe_path
            .parent()
            .unwrap_or_else(|| std::path::Path::new(""))
            .as_os_str(),
    );

    let result = unsafe {
        ShellExecuteW(
            None,
            PCWSTR(op.as_ptr()),
            PCWSTR(file.as_ptr()),
            PCWSTR(params_w.as_ptr()),
            PCWSTR(dir.as_ptr()),
            SW_SHOWNORMAL,
        )
    };
    // 32以下はエラー（UACで拒否された場合も含む）
    Ok(result.0 as isize > 32)
}

#[cfg(not(windows))]
fn relaunch_as_admin(_params: &str) -> Result<bool, DomainError> {
    Err(DomainError::ProcessLaunchFailed(
        "elevation is not supported on this platform".into(),
    ))
}

// ============================================================================
// Windows固有実装

#[cfg(target_os = "windows")]
mod windows_admin {
    use windows::Win32::Foundation::CloseHandle;
    use windows::Win32::Security::{
        GetTokenInformation, TOKEN_ELEVATION, TOKEN_QUERY, TokenElevation,
    };
    use windows::Win32::System::Threading::{GetCurrentProcess, OpenProcessToken};

    pub fn check_admin() -> bool {
        unsafe {
            let mut token = windows::Win32::Foundation::HANDLE::default();
            if OpenProcessToken(GetCurrentProcess(), TOKEN_QUERY, &mut token).is_err() {
                return false;
            }

            let mut elevation = TOKEN_ELEVATION::default();
            let mut return_length = 0u32;
            let result = GetTokenInformation(
                token,
                TokenElevation,
                Some(&mut elevation as *mut _ as *mut _),
                std::mem::size_of::<TOKEN_ELEVATION>() as u32,
                &mut return_length,
            );

            let _ = CloseHandle(token);
            result.is_ok() && elevation.TokenIsElevated != 0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn plain_args_are_not_quoted() {
        assert_eq!(join_command_line(&args(&["restore", "--json"])), "restore --json");
    }

    #[test]
    fn spaces_and_quotes_are_escaped() {
        assert_eq!(
            join_command_line(&args(&["rename", "--from", "OBS Virtual Camera"])),
            r#"rename --from "OBS Virtual Camera""#
        );
        assert_eq!(quote_arg(r#"say "hi""#), r#""say \"hi\"""#);
        assert_eq!(quote_arg(""), r#""""#);
        // 末尾のバックスラッシュは閉じ引用符の前で倍になる
        assert_eq!(quote_arg(r"C:\My Dir\"), r#""C:\My Dir\\""#);
        assert_eq!(quote_arg(r"a\b"), r"a\b");
    }

    #[cfg(not(windows))]
    #[test]
    fn non_windows_is_never_elevated() {
        let adapter = PrivilegeAdapter::new();
        assert!(!adapter.is_elevated());
        assert!(adapter.relaunch_elevated(&args(&["list"])).is_err());
    }
}
