//! Windowsレジストリアダプター
//!
//! HKEY_LOCAL_MACHINE 相対のパスで、サブキーの列挙と文字列値
//! （REG_SZ / REG_EXPAND_SZ）の列挙・読み書きを行う。
//! REG_EXPAND_SZ は展開せず生の文字列として扱う。

use cs_domain::DomainError;
use cs_domain::model::{RegistryStringValue, RegistryValueKind};
use cs_domain::port::driven::RegistryHive;

/// プラットフォーム中立のハンドル
#[cfg(windows)]
pub type RegistryAdapter = WindowsRegistryAdapter;
#[cfg(not(windows))]
pub type RegistryAdapter = NonWindowsRegistryAdapter;

#[cfg(windows)]
#[derive(Debug, Default, Clone, Copy)]
pub struct WindowsRegistryAdapter;

#[cfg(windows)]
impl WindowsRegistryAdapter {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(not(windows))]
#[derive(Debug, Default, Clone, Copy)]
pub struct NonWindowsRegistryAdapter;

#[cfg(not(windows))]
impl NonWindowsRegistryAdapter {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(not(windows))]
fn unsupported() -> DomainError {
    DomainError::BackendUnavailable("registry is not supported on this platform".into())
}

#[cfg(not(windows))]
impl RegistryHive for NonWindowsRegistryAdapter {
    fn subkeys(&self, _path: &str) -> Result<Vec<String>, DomainError> {
        Err(unsupported())
    }

    fn string_values(&self, _path: &str) -> Result<Vec<RegistryStringValue>, DomainError> {
        Err(unsupported())
    }

    fn read_string(&self, _path: &str, _value_name: &str) -> Result<Option<String>, DomainError> {
        Err(unsupported())
    }

    fn write_string(
        &self,
        _path: &str,
        _value_name: &str,
        _data: &str,
        _kind: RegistryValueKind,
    ) -> Result<(), DomainError> {
        Err(unsupported())
    }
}

/// UTF-16LE のバイト列を文字列へ（末尾のNULは除去）
pub fn decode_utf16(bytes: &[u8]) -> String {
    let mut wide: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect();
    while matches!(wide.last(), Some(0)) {
        wide.pop();
    }
    String::from_utf16_lossy(&wide)
}

/// NUL終端付きUTF-16
pub fn to_wide(s: &str) -> Vec<u16> {
    let mut wide: Vec<u16> = s.encode_utf16().collect();
    wide.push(0);
    wide
}

/// REG_SZ 書き込み用のバイト列（NUL終端込み）
pub fn encode_reg_string(s: &str) -> Vec<u8> {
    to_wide(s).iter().flat_map(|w| w.to_le_bytes()).collect()
}

#[cfg(windows)]
mod windows_impl {
    use super::*;
    use windows::Win32::Foundation::{
        ERROR_ACCESS_DENIED, ERROR_FILE_NOT_FOUND, ERROR_MORE_DATA, ERROR_NO_MORE_ITEMS,
        ERROR_PATH_NOT_FOUND, ERROR_SUCCESS, WIN32_ERROR,
    };
    use windows::Win32::System::Registry::{
        HKEY, HKEY_LOCAL_MACHINE, KEY_ENUMERATE_SUB_KEYS, KEY_QUERY_VALUE, KEY_SET_VALUE,
        KEY_WOW64_64KEY, REG_EXPAND_SZ, REG_SAM_FLAGS, REG_SZ, REG_VALUE_TYPE, RRF_NOEXPAND,
        RRF_RT_REG_EXPAND_SZ, RRF_RT_REG_SZ, RegCloseKey, RegEnumKeyExW, RegEnumValueW,
        RegGetValueW, RegOpenKeyExW, RegSetValueExW,
    };
    use windows::core::{PCWSTR, PWSTR};

    // キー名は最大255文字、値名は最大16383文字
    const MAX_KEY_NAME: usize = 256;
    const MAX_VALUE_NAME: usize = 16384;

    struct RegKeyGuard(HKEY);

    impl Drop for RegKeyGuard {
        fn drop(&mut self) {
            unsafe {
                let _ = RegCloseKey(self.0);
            }
        }
    }

    impl RegistryHive for WindowsRegistryAdapter {
        fn subkeys(&self, path: &str) -> Result<Vec<String>, DomainError> {
            let key = open_key(path, KEY_ENUMERATE_SUB_KEYS)?;
            let mut names = Vec::new();
            let mut index: u32 = 0;
            let mut name_buf = [0u16; MAX_KEY_NAME];

            loop {
                let mut name_len = name_buf.len() as u32;
                let status = unsafe {
                    RegEnumKeyExW(
                        key.0,
                        index,
                        Some(PWSTR(name_buf.as_mut_ptr())),
                        &mut name_len,
                        None,
                        None, // クラス
                        None,
                        None, // 最終書き込み時刻
                    )
                };
                if status == ERROR_NO_MORE_ITEMS {
                    break;
                }
                if status != ERROR_SUCCESS {
                    return Err(map_win32_error(status, path));
                }
                names.push(String::from_utf16_lossy(&name_buf[..name_len as usize]));
                index += 1;
            }
            Ok(names)
        }

        fn string_values(&self, path: &str) -> Result<Vec<RegistryStringValue>, DomainError> {
            let key = open_key(path, KEY_QUERY_VALUE)?;
            let mut values = Vec::new();
            let mut index: u32 = 0;
            let mut name_buf = vec![0u16; MAX_VALUE_NAME];
            let mut data: Vec<u8> = vec![0u8; 1024];

            loop {
                let mut name_len = name_buf.len() as u32;
                let mut value_type: u32 = 0;
                let mut data_len = data.len() as u32;
                let status = unsafe {
                    RegEnumValueW(
                        key.0,
                        index,
                        Some(PWSTR(name_buf.as_mut_ptr())),
                        &mut name_len,
                        None,
                        Some(&mut value_type),
                        Some(data.as_mut_ptr()),
                        Some(&mut data_len),
                    )
                };
                if status == ERROR_MORE_DATA {
                    // 同じインデックスを大きいバッファで読み直す
                    data.resize(data_len as usize + 2, 0);
                    continue;
                }
                if status == ERROR_NO_MORE_ITEMS {
                    break;
                }
                if status != ERROR_SUCCESS {
                    return Err(map_win32_error(status, path));
                }
                index += 1;

                let kind = match REG_VALUE_TYPE(value_type) {
                    REG_SZ => RegistryValueKind::String,
                    REG_EXPAND_SZ => RegistryValueKind::ExpandString,
                    _ => continue,
                };
                let name = String::from_utf16_lossy(&name_buf[..name_len as usize]);
                let text = decode_utf16(&data[..data_len as usize]);
                values.push(RegistryStringValue::new(name, text, kind));
            }
            Ok(values)
        }

        fn read_string(&self, path: &str, value_name: &str) -> Result<Option<String>, DomainError> {
            let key = open_key(path, KEY_QUERY_VALUE)?;
            let name = to_wide(value_name);
            let flags = RRF_RT_REG_SZ | RRF_RT_REG_EXPAND_SZ | RRF_NOEXPAND;
            let mut size_bytes: u32 = 0;
            let status = unsafe {
                RegGetValueW(
                    key.0,
                    PCWSTR::null(),
                    PCWSTR(name.as_ptr()),
                    flags,
                    None,
                    None,
                    Some(&mut size_bytes),
                )
            };
            if status == ERROR_FILE_NOT_FOUND {
                return Ok(None);
            }
            if status != ERROR_SUCCESS {
                return Err(map_win32_error(status, path));
            }

            let mut data = vec![0u8; size_bytes as usize];
            if size_bytes > 0 {
                let status = unsafe {
                    RegGetValueW(
                        key.0,
                        PCWSTR::null(),
                        PCWSTR(name.as_ptr()),
                        flags,
                        None,
                        Some(data.as_mut_ptr() as *mut _),
                        Some(&mut size_bytes),
                    )
                };
                if status != ERROR_SUCCESS {
                    return Err(map_win32_error(status, path));
                }
                data.truncate(size_bytes as usize);
            }
            Ok(Some(decode_utf16(&data)))
        }

        fn write_string(
            &self,
            path: &str,
            value_name: &str,
            data: &str,
            kind: RegistryValueKind,
        ) -> Result<(), DomainError> {
            let key = open_key(path, KEY_SET_VALUE)?;
            let name = to_wide(value_name); // API呼び出し中にVecを生存させる
            let bytes = encode_reg_string(data);
            let value_type = match kind {
                RegistryValueKind::String => REG_SZ,
                RegistryValueKind::ExpandString => REG_EXPAND_SZ,
            };
            let status = unsafe {
                RegSetValueExW(
                    key.0,
                    PCWSTR(name.as_ptr()),
                    Some(0),
                    value_type,
                    Some(bytes.as_slice()),
                )
            };
            if status != ERROR_SUCCESS {
                return Err(map_win32_error(status, path));
            }
            Ok(())
        }
    }

    fn open_key(path: &str, access: REG_SAM_FLAGS) -> Result<RegKeyGuard, DomainError> {
        let wide_path = to_wide(path); // API呼び出し中にVecを生存させる
        let mut key = HKEY::default();
        // 32bitビルドでもネイティブビューを見る
        let status = unsafe {
            RegOpenKeyExW(
                HKEY_LOCAL_MACHINE,
                PCWSTR(wide_path.as_ptr()),
                Some(0),
                access | KEY_WOW64_64KEY,
                &mut key,
            )
        };
        if status != ERROR_SUCCESS {
            return Err(map_win32_error(status, path));
        }
        Ok(RegKeyGuard(key))
    }

    fn map_win32_error(status: WIN32_ERROR, path: &str) -> DomainError {
        if status == ERROR_ACCESS_DENIED {
            return DomainError::RegistryAccessDenied(format!("HKLM\\{}", path));
        }
        if status == ERROR_FILE_NOT_FOUND || status == ERROR_PATH_NOT_FOUND {
            return DomainError::NotFound(format!("HKLM\\{}", path));
        }
        DomainError::Unknown(format!(
            "Registry error for HKLM\\{}: status={}",
            path, status.0
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf16_codec_strips_terminators() {
        let bytes = encode_reg_string("OBS Virtual Camera");
        assert_eq!(bytes.len(), ("OBS Virtual Camera".len() + 1) * 2);
        assert_eq!(&bytes[bytes.len() - 2..], &[0, 0]);
        assert_eq!(decode_utf16(&bytes), "OBS Virtual Camera");

        // 末尾に余分なNULや奇数長のゴミがあっても落ちない
        let mut padded = encode_reg_string("Cam");
        padded.extend_from_slice(&[0, 0, 0]);
        assert_eq!(decode_utf16(&padded), "Cam");
    }

    #[test]
    fn utf16_codec_handles_non_ascii() {
        let bytes = encode_reg_string("カメラ 📷");
        assert_eq!(decode_utf16(&bytes), "カメラ 📷");
        assert_eq!(decode_utf16(&[]), "");
    }

    #[cfg(not(windows))]
    #[test]
    fn non_windows_adapter_reports_unavailable() {
        let hive = RegistryAdapter::new();
        let err = hive.subkeys(r"SYSTEM\CurrentControlSet\Enum").unwrap_err();
        assert!(matches!(err, DomainError::BackendUnavailable(_)));
        assert!(
            hive.write_string("SOFTWARE", "x", "y", RegistryValueKind::String)
                .is_err()
        );
    }
}
