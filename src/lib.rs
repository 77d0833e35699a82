//! Enumerate Windows logon sessions and copy their LSA session data into
//! owned Rust values.
//!
//! The OS-facing part lives in [`windows`] and is only built on Windows.
//! Everything it produces (LUIDs, SIDs, logon types, timestamps) is plain
//! data that can be inspected on any host.

pub mod args;
pub mod collect;
pub mod commands;
pub mod error;
pub mod logon_type;
pub mod luid;
pub mod output;
pub mod session;
pub mod sid;
pub mod source;
pub mod time;
pub mod unicode;

#[cfg(windows)]
pub mod windows;

pub use error::{Error, Result, WinApiError};
pub use logon_type::LogonType;
pub use luid::Luid;
pub use session::{LogonSessionData, SessionFilter};
pub use sid::Sid;
pub use source::SessionSource;

#[cfg(windows)]
pub use crate::source::LsaSource;
#[cfg(windows)]
pub use crate::windows::lsa::{get_logon_session_data, get_logon_sessions};
#[cfg(windows)]
pub use crate::windows::token::current_logon_session;
