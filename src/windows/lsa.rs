use core::ffi::c_void;
use std::mem::{offset_of, size_of};
use std::ptr;
use windows::Win32::Foundation::{LUID, NTSTATUS};
use windows::Win32::Security::Authentication::Identity::{
    LsaEnumerateLogonSessions, LsaFreeReturnBuffer, LsaGetLogonSessionData,
    LsaNtStatusToWinError, LSA_UNICODE_STRING, SECURITY_LOGON_SESSION_DATA,
};
use windows::Win32::Security::{GetLengthSid, IsValidSid};

use crate::error::{Error, Result, WinApiError};
use crate::logon_type::LogonType;
use crate::luid::Luid;
use crate::session::LogonSessionData;
use crate::sid::Sid;
use crate::time::filetime_to_datetime;
use crate::unicode::lsa_unicode_string_to_string;

fn check_status(status: NTSTATUS, source: &str) -> std::result::Result<(), WinApiError> {
    if status.0 != 0 {
        let error = unsafe { LsaNtStatusToWinError(status) };
        return Err(WinApiError::new(error, source));
    }
    return Ok(());
}

/// Memory allocated by LSA on our behalf. `free` reports the
/// `LsaFreeReturnBuffer` status, drop frees silently on early returns.
struct LsaBuffer<T> {
    ptr: *mut T,
}

impl<T> LsaBuffer<T> {
    fn new(ptr: *mut T) -> Self {
        return Self { ptr };
    }

    fn is_null(&self) -> bool {
        self.ptr.is_null()
    }

    fn as_ptr(&self) -> *const T {
        self.ptr
    }

    fn free(mut self) -> std::result::Result<(), WinApiError> {
        let ptr = std::mem::replace(&mut self.ptr, std::ptr::null_mut());
        if ptr.is_null() {
            return Ok(());
        }

        let status = unsafe { LsaFreeReturnBuffer(ptr as *const c_void) };
        return check_status(status, "LsaFreeReturnBuffer");
    }
}

impl<T> Drop for LsaBuffer<T> {
    fn drop(&mut self) {
        if self.ptr.is_null() {
            return;
        }

        let status = unsafe { LsaFreeReturnBuffer(self.ptr as *const c_void) };
        if let Err(e) = check_status(status, "LsaFreeReturnBuffer") {
            log::debug!("Error releasing LSA buffer: {}", e);
        }
    }
}

pub fn get_logon_sessions() -> Result<Vec<Luid>> {
    let mut sessions_count: u32 = 0;
    let mut sessions: *mut LUID = std::ptr::null_mut();

    let status = unsafe {
        LsaEnumerateLogonSessions(&raw mut sessions_count, &raw mut sessions)
    };
    check_status(status, "LsaEnumerateLogonSessions")?;

    let buffer = LsaBuffer::new(sessions);

    let luids = if buffer.is_null() || sessions_count == 0 {
        Vec::new()
    } else {
        let list = unsafe {
            std::slice::from_raw_parts(buffer.as_ptr(), sessions_count as usize)
        };
        list.iter().map(|luid| Luid::from(*luid)).collect()
    };

    buffer.free()?;

    log::debug!("LSA returned {} logon sessions", luids.len());
    return Ok(luids);
}

pub fn get_logon_session_data(luid: &Luid) -> Result<LogonSessionData> {
    let native_luid = LUID::from(*luid);
    let mut session_data_ptr: *mut SECURITY_LOGON_SESSION_DATA =
        std::ptr::null_mut();

    let status = unsafe {
        LsaGetLogonSessionData(&raw const native_luid, &raw mut session_data_ptr)
    };
    check_status(status, &format!("LsaGetLogonSessionData:LUID({})", luid))?;

    let buffer = LsaBuffer::new(session_data_ptr);
    if buffer.is_null() {
        return Err(Error::String(format!(
            "LsaGetLogonSessionData returned no data for LUID {}",
            luid
        )));
    }

    let record = unsafe { copy_session_record(buffer.as_ptr()) };
    let session_data = unsafe { convert_session_data(&record)? };

    buffer.free()?;

    return Ok(session_data);
}

/// Copy at most `Size` bytes of the LSA record into a zeroed one, so fields
/// an older system did not return read as empty.
///
/// # Safety
/// `ptr` must point to a record whose first `Size` bytes are readable.
unsafe fn copy_session_record(
    ptr: *const SECURITY_LOGON_SESSION_DATA,
) -> SECURITY_LOGON_SESSION_DATA {
    let size = ptr::read_unaligned(ptr::addr_of!((*ptr).Size)) as usize;
    let len = size.min(size_of::<SECURITY_LOGON_SESSION_DATA>());

    let mut record = SECURITY_LOGON_SESSION_DATA::default();
    ptr::copy_nonoverlapping(
        ptr as *const u8,
        &raw mut record as *mut u8,
        len,
    );
    record.Size = len as u32;

    return record;
}

fn record_has(sd: &SECURITY_LOGON_SESSION_DATA, offset: usize, len: usize) -> bool {
    offset + len <= sd.Size as usize
}

/// # Safety
/// Every string descriptor and the SID pointer inside `Size` must be valid.
unsafe fn convert_session_data(
    sd: &SECURITY_LOGON_SESSION_DATA,
) -> Result<LogonSessionData> {
    if !record_has(
        sd,
        offset_of!(SECURITY_LOGON_SESSION_DATA, LogonTime),
        size_of::<i64>(),
    ) {
        return Err(Error::String(format!(
            "LSA logon session record too short ({} bytes)",
            sd.Size
        )));
    }

    let mut data = LogonSessionData {
        luid: Luid::from(sd.LogonId),
        user_name: lsa_unicode_string_to_string(&sd.UserName),
        logon_domain: lsa_unicode_string_to_string(&sd.LogonDomain),
        authentication_package: lsa_unicode_string_to_string(
            &sd.AuthenticationPackage,
        ),
        logon_type: LogonType::from(sd.LogonType),
        session: sd.Session,
        sid: copy_sid(sd)?,
        logon_time: filetime_to_datetime(sd.LogonTime),
        ..Default::default()
    };

    if record_has(
        sd,
        offset_of!(SECURITY_LOGON_SESSION_DATA, Upn),
        size_of::<LSA_UNICODE_STRING>(),
    ) {
        data.logon_server = lsa_unicode_string_to_string(&sd.LogonServer);
        data.dns_domain_name = lsa_unicode_string_to_string(&sd.DnsDomainName);
        data.upn = lsa_unicode_string_to_string(&sd.Upn);
    }

    if record_has(
        sd,
        offset_of!(SECURITY_LOGON_SESSION_DATA, PasswordMustChange),
        size_of::<i64>(),
    ) {
        let last_logon = &sd.LastLogonInfo;
        data.user_flags = sd.UserFlags;
        data.last_successful_logon =
            filetime_to_datetime(last_logon.LastSuccessfulLogon);
        data.last_failed_logon = filetime_to_datetime(last_logon.LastFailedLogon);
        data.failed_attempt_count_since_last_successful_logon =
            last_logon.FailedAttemptCountSinceLastSuccessfulLogon;
        data.logon_script = lsa_unicode_string_to_string(&sd.LogonScript);
        data.profile_path = lsa_unicode_string_to_string(&sd.ProfilePath);
        data.home_directory = lsa_unicode_string_to_string(&sd.HomeDirectory);
        data.home_directory_drive =
            lsa_unicode_string_to_string(&sd.HomeDirectoryDrive);
        data.logoff_time = filetime_to_datetime(sd.LogoffTime);
        data.kick_off_time = filetime_to_datetime(sd.KickOffTime);
        data.password_last_set = filetime_to_datetime(sd.PasswordLastSet);
        data.password_can_change = filetime_to_datetime(sd.PasswordCanChange);
        data.password_must_change = filetime_to_datetime(sd.PasswordMustChange);
    }

    return Ok(data);
}

unsafe fn copy_sid(sd: &SECURITY_LOGON_SESSION_DATA) -> Result<Option<Sid>> {
    if sd.Sid.0.is_null() {
        return Ok(None);
    }

    if !IsValidSid(sd.Sid).as_bool() {
        return Err(Error::InvalidSid(format!(
            "LSA returned a malformed SID for LUID {}",
            Luid::from(sd.LogonId)
        )));
    }

    let len = GetLengthSid(sd.Sid) as usize;
    let bytes = std::slice::from_raw_parts(sd.Sid.0 as *const u8, len);
    return Ok(Some(Sid::from_bytes(bytes)?));
}

#[cfg(test)]
mod tests {
    use super::*;
    use windows::core::PWSTR;

    // S-1-5-18
    const LOCAL_SYSTEM: [u8; 12] = [
        0x01, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x05, 0x12, 0x00, 0x00, 0x00,
    ];

    const LOGON_TIME: i64 = 133_537_698_451_234_567;

    fn lsa_string(holder: &mut Vec<Vec<u16>>, s: &str) -> LSA_UNICODE_STRING {
        let mut units: Vec<u16> = s.encode_utf16().collect();
        let len = (units.len() * 2) as u16;
        let buffer = PWSTR(units.as_mut_ptr());
        holder.push(units);
        LSA_UNICODE_STRING {
            Length: len,
            MaximumLength: len,
            Buffer: buffer,
        }
    }

    fn full_record(
        holder: &mut Vec<Vec<u16>>,
        sid: &mut [u8],
    ) -> SECURITY_LOGON_SESSION_DATA {
        let mut sd = SECURITY_LOGON_SESSION_DATA::default();
        sd.Size = size_of::<SECURITY_LOGON_SESSION_DATA>() as u32;
        sd.LogonId = LUID {
            LowPart: 0x5a1f0,
            HighPart: 0,
        };
        sd.UserName = lsa_string(holder, "alice");
        sd.LogonDomain = lsa_string(holder, "CORP");
        sd.AuthenticationPackage = lsa_string(holder, "Kerberos");
        sd.LogonType = 10;
        sd.Session = 2;
        sd.Sid.0 = sid.as_mut_ptr() as *mut c_void;
        sd.LogonTime = LOGON_TIME;
        sd.LogonServer = lsa_string(holder, "DC01");
        sd.DnsDomainName = lsa_string(holder, "CORP.LOCAL");
        sd.Upn = lsa_string(holder, "alice@corp.local");
        sd.UserFlags = 0x20;
        sd.LastLogonInfo.LastSuccessfulLogon = LOGON_TIME;
        sd.LastLogonInfo.FailedAttemptCountSinceLastSuccessfulLogon = 3;
        sd.ProfilePath = lsa_string(holder, "\\\\fs01\\profiles\\alice");
        sd.HomeDirectoryDrive = lsa_string(holder, "H:");
        sd.KickOffTime = i64::MAX;
        sd.PasswordLastSet = LOGON_TIME;
        sd
    }

    fn convert_with_size(sd: &SECURITY_LOGON_SESSION_DATA, size: usize) -> Result<LogonSessionData> {
        let mut sd = *sd;
        sd.Size = size as u32;
        let record = unsafe { copy_session_record(&raw const sd) };
        return unsafe { convert_session_data(&record) };
    }

    #[test]
    fn test_full_record() {
        let mut holder = Vec::new();
        let mut sid = LOCAL_SYSTEM;
        let sd = full_record(&mut holder, &mut sid);

        let data = convert_with_size(&sd, sd.Size as usize).unwrap();
        assert_eq!(data.luid, Luid::from_u64(0x5a1f0));
        assert_eq!(data.qualified_user_name(), "CORP\\alice");
        assert_eq!(data.authentication_package, "Kerberos");
        assert_eq!(data.logon_type, LogonType::RemoteInteractive);
        assert_eq!(data.session, 2);
        assert_eq!(data.sid.unwrap().to_string(), "S-1-5-18");
        assert_eq!(data.logon_time, filetime_to_datetime(LOGON_TIME));
        assert_eq!(data.logon_server, "DC01");
        assert_eq!(data.upn, "alice@corp.local");
        assert_eq!(data.user_flags, 0x20);
        assert_eq!(data.failed_attempt_count_since_last_successful_logon, 3);
        assert_eq!(data.profile_path, "\\\\fs01\\profiles\\alice");
        assert_eq!(data.home_directory_drive, "H:");
        assert_eq!(data.home_directory, "");
        assert!(data.last_successful_logon.is_some());
        assert!(data.password_last_set.is_some());
        assert_eq!(data.kick_off_time, None);
    }

    #[test]
    fn test_record_ending_after_logon_time() {
        let mut holder = Vec::new();
        let mut sid = LOCAL_SYSTEM;
        let sd = full_record(&mut holder, &mut sid);

        let size = offset_of!(SECURITY_LOGON_SESSION_DATA, LogonServer);
        let data = convert_with_size(&sd, size).unwrap();
        assert_eq!(data.user_name, "alice");
        assert!(data.logon_time.is_some());
        assert_eq!(data.logon_server, "");
        assert_eq!(data.dns_domain_name, "");
        assert_eq!(data.upn, "");
        assert_eq!(data.user_flags, 0);
        assert_eq!(data.failed_attempt_count_since_last_successful_logon, 0);
        assert_eq!(data.profile_path, "");
        assert_eq!(data.last_successful_logon, None);
        assert_eq!(data.password_last_set, None);
    }

    #[test]
    fn test_record_ending_after_upn() {
        let mut holder = Vec::new();
        let mut sid = LOCAL_SYSTEM;
        let sd = full_record(&mut holder, &mut sid);

        let size = offset_of!(SECURITY_LOGON_SESSION_DATA, Upn)
            + size_of::<LSA_UNICODE_STRING>();
        let data = convert_with_size(&sd, size).unwrap();
        assert_eq!(data.logon_server, "DC01");
        assert_eq!(data.dns_domain_name, "CORP.LOCAL");
        assert_eq!(data.upn, "alice@corp.local");
        assert_eq!(data.user_flags, 0);
        assert_eq!(data.profile_path, "");
        assert_eq!(data.home_directory_drive, "");
        assert_eq!(data.password_last_set, None);
    }

    #[test]
    fn test_copy_leaves_tail_zeroed() {
        let mut holder = Vec::new();
        let mut sid = LOCAL_SYSTEM;
        let mut sd = full_record(&mut holder, &mut sid);
        sd.Size = offset_of!(SECURITY_LOGON_SESSION_DATA, LogonServer) as u32;

        let record = unsafe { copy_session_record(&raw const sd) };
        assert_eq!(record.Size, sd.Size);
        assert_eq!(record.UserName.Length, sd.UserName.Length);
        assert_eq!(record.Upn.Length, 0);
        assert!(record.Upn.Buffer.0.is_null());
        assert_eq!(record.PasswordLastSet, 0);
    }

    #[test]
    fn test_oversized_size_is_clamped() {
        let mut holder = Vec::new();
        let mut sid = LOCAL_SYSTEM;
        let mut sd = full_record(&mut holder, &mut sid);
        sd.Size += 64;

        let record = unsafe { copy_session_record(&raw const sd) };
        assert_eq!(
            record.Size as usize,
            size_of::<SECURITY_LOGON_SESSION_DATA>()
        );
        assert_eq!(record.PasswordLastSet, LOGON_TIME);
    }

    #[test]
    fn test_record_without_logon_time_is_rejected() {
        let mut holder = Vec::new();
        let mut sid = LOCAL_SYSTEM;
        let sd = full_record(&mut holder, &mut sid);

        let size = offset_of!(SECURITY_LOGON_SESSION_DATA, LogonTime);
        assert!(convert_with_size(&sd, size).is_err());
    }

    #[test]
    fn test_null_sid() {
        let mut holder = Vec::new();
        let mut sid = LOCAL_SYSTEM;
        let mut sd = full_record(&mut holder, &mut sid);
        sd.Sid.0 = std::ptr::null_mut();

        let data = convert_with_size(&sd, sd.Size as usize).unwrap();
        assert_eq!(data.sid, None);
        assert_eq!(data.user_name, "alice");
    }

    #[test]
    fn test_null_buffer_free() {
        let buffer = LsaBuffer::<LUID>::new(std::ptr::null_mut());
        assert!(buffer.is_null());
        assert!(buffer.free().is_ok());
    }

    #[test]
    fn test_current_session_is_enumerated() {
        let current = crate::windows::token::current_logon_session().unwrap();
        let sessions = get_logon_sessions().unwrap();
        assert!(sessions.contains(&current));

        let data = get_logon_session_data(&current).unwrap();
        assert_eq!(data.luid, current);
    }
}
