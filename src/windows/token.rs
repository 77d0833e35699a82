use core::ffi::c_void;
use windows::Win32::Foundation::HANDLE;
use windows::Win32::Security::{
    GetTokenInformation, TokenStatistics, TOKEN_STATISTICS,
};

use crate::error::{Result, WinApiError};
use crate::luid::Luid;

const CURRENT_PROCESS_TOKEN: isize = -4;

/// Logon session the current process token belongs to.
pub fn current_logon_session() -> Result<Luid> {
    let token_handle = HANDLE(CURRENT_PROCESS_TOKEN as *mut c_void);

    let mut statistics = TOKEN_STATISTICS::default();
    let mut out_size: u32 = 0;

    let result = unsafe {
        GetTokenInformation(
            token_handle,
            TokenStatistics,
            Some(&raw mut statistics as *mut c_void),
            size_of::<TOKEN_STATISTICS>() as u32,
            &raw mut out_size,
        )
    };

    if let Err(e) = result {
        return Err(WinApiError::new(
            e.code().0 as u32 & 0xffff,
            "GetTokenInformation:TokenStatistics",
        )
        .into());
    }

    return Ok(Luid::from(statistics.AuthenticationId));
}
