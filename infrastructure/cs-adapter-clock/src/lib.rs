//! 時刻アダプター
use cs_domain::port::driven::Clock;

#[derive(Debug, Default, Clone, Copy)]
pub struct ClockAdapter;

impl ClockAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl Clock for ClockAdapter {
    fn now_iso8601(&self) -> String {
        utc_rfc3339_now()
    }
}

fn utc_rfc3339_now() -> String {
    #[cfg(windows)]
    {
        use windows::Win32::System::SystemInformation::GetSystemTime;
        let st = unsafe { GetSystemTime() };
        format!(
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}.{:03}Z",
            st.wYear,
            st.wMonth,
            st.wDay,
            st.wHour,
            st.wMinute,
            st.wSecond,
            st.wMilliseconds
        )
    }
    #[cfg(not(windows))]
    {
        cs_log_utils::utc_rfc3339_millis()
    }
}
