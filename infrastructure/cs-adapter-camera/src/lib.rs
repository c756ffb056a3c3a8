//! カメラ列挙アダプター
//!
//! DirectShow の CLSID_VideoInputDeviceCategory を列挙し、
//! 各デバイスのプロパティバッグから FriendlyName を読み出す。
//! COM は呼び出しごとに呼び出し元スレッドで初期化し、終了時に解除する。

use cs_domain::DomainError;
use cs_domain::port::driven::CaptureDeviceSource;

#[derive(Debug, Default, Clone, Copy)]
pub struct DirectShowSource;

impl DirectShowSource {
    pub fn new() -> Self {
        Self
    }
}

impl CaptureDeviceSource for DirectShowSource {
    fn capture_device_names(&self) -> Result<Vec<String>, DomainError> {
        #[cfg(windows)]
        {
            directshow::video_input_names()
        }
        #[cfg(not(windows))]
        {
            Err(DomainError::BackendUnavailable(
                "DirectShow is not available on this platform".into(),
            ))
        }
    }
}

/// プロパティバッグの値を表示名に整える（空は捨てる）
pub fn clean_friendly_name(raw: &str) -> Option<String> {
    let trimmed = raw.trim_end_matches('\0').trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(windows)]
mod directshow {
    use super::clean_friendly_name;
    use cs_domain::DomainError;
    use windows::Win32::Foundation::{RPC_E_CHANGED_MODE, S_FALSE, S_OK};
    use windows::Win32::Media::DirectShow::{
        CLSID_SystemDeviceEnum, CLSID_VideoInputDeviceCategory, ICreateDevEnum,
    };
    use windows::Win32::System::Com::StructuredStorage::IPropertyBag;
    use windows::Win32::System::Com::{
        CLSCTX_INPROC_SERVER, COINIT_APARTMENTTHREADED, CoCreateInstance, CoInitializeEx,
        CoUninitialize, IEnumMoniker, IMoniker,
    };
    use windows::Win32::System::Variant::{VARIANT, VT_BSTR, VariantClear};
    use windows::core::w;

    struct CoUninit(bool);

    impl Drop for CoUninit {
        fn drop(&mut self) {
            if self.0 {
                unsafe { CoUninitialize() }
            }
        }
    }

    struct VariantGuard(VARIANT);

    impl Drop for VariantGuard {
        fn drop(&mut self) {
            unsafe {
                let _ = VariantClear(&mut self.0);
            }
        }
    }

    fn com_error(context: &str, err: windows::core::Error) -> DomainError {
        DomainError::BackendUnavailable(format!("{context}: {}", err.message()))
    }

    pub(super) fn video_input_names() -> Result<Vec<String>, DomainError> {
        unsafe {
            let hr = CoInitializeEx(None, COINIT_APARTMENTTHREADED);
            let did_init = if hr == S_OK || hr == S_FALSE {
                true
            } else if hr == RPC_E_CHANGED_MODE {
                // 呼び出し元が別モデルで初期化済み。解除はしない。
                false
            } else {
                return Err(DomainError::BackendUnavailable(format!(
                    "COM init failed: 0x{:08x}",
                    hr.0 as u32
                )));
            };
            let _guard = CoUninit(did_init);

            let dev_enum: ICreateDevEnum =
                CoCreateInstance(&CLSID_SystemDeviceEnum, None, CLSCTX_INPROC_SERVER)
                    .map_err(|e| com_error("CoCreateInstance(SystemDeviceEnum) failed", e))?;

            let mut monikers: Option<IEnumMoniker> = None;
            dev_enum
                .CreateClassEnumerator(&CLSID_VideoInputDeviceCategory, &mut monikers, 0)
                .map_err(|e| com_error("CreateClassEnumerator failed", e))?;
            // S_FALSE のときは列挙子が返らない（カテゴリが空）
            let Some(monikers) = monikers else {
                return Ok(Vec::new());
            };

            let mut names = Vec::new();
            loop {
                let mut slot: [Option<IMoniker>; 1] = [None];
                let mut fetched: u32 = 0;
                let hr = monikers.Next(&mut slot, Some(&mut fetched));
                if hr != S_OK || fetched == 0 {
                    break;
                }
                let Some(moniker) = slot[0].take() else {
                    break;
                };
                // 1台の読み取り失敗で全体を止めない
                if let Some(name) = friendly_name(&moniker) {
                    names.push(name);
                }
            }
            Ok(names)
        }
    }

    unsafe fn friendly_name(moniker: &IMoniker) -> Option<String> {
        unsafe {
            let bag: IPropertyBag = moniker.BindToStorage(None, None).ok()?;
            let mut value = VariantGuard(VARIANT::default());
            bag.Read(w!("FriendlyName"), &mut value.0, None).ok()?;
            let inner = &*value.0.Anonymous.Anonymous;
            if inner.vt != VT_BSTR {
                return None;
            }
            clean_friendly_name(&inner.Anonymous.bstrVal.to_string())
        }
    }
}
