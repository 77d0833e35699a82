use crate::error::Result;
use crate::luid::Luid;
use crate::session::LogonSessionData;

/// Where logon sessions come from.
pub trait SessionSource {
    fn logon_sessions(&self) -> Result<Vec<Luid>>;

    fn logon_session_data(&self, luid: &Luid) -> Result<LogonSessionData>;

    /// Session of the calling process.
    fn current_session(&self) -> Result<Luid>;
}

/// The local Local Security Authority.
#[cfg(windows)]
#[derive(Debug, Default, Clone, Copy)]
pub struct LsaSource;

#[cfg(windows)]
impl SessionSource for LsaSource {
    fn logon_sessions(&self) -> Result<Vec<Luid>> {
        crate::windows::lsa::get_logon_sessions()
    }

    fn logon_session_data(&self, luid: &Luid) -> Result<LogonSessionData> {
        crate::windows::lsa::get_logon_session_data(luid)
    }

    fn current_session(&self) -> Result<Luid> {
        crate::windows::token::current_logon_session()
    }
}
