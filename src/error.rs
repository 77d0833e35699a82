use std::fmt;

pub const WINERROR_ACCESS_DENIED: u32 = 5;
pub const WINERROR_NO_SUCH_LOGON_SESSION: u32 = 1312;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    String(String),
    WinApi(WinApiError),
    InvalidSid(String),
    InvalidLuid(String),
    Csv(csv::Error),
    Io(std::io::Error),
    Unsupported(&'static str),
}

impl Error {
    /// The session was logged off between enumeration and query.
    pub fn is_no_such_logon_session(&self) -> bool {
        match self {
            Self::WinApi(e) => e.error == WINERROR_NO_SUCH_LOGON_SESSION,
            _ => false,
        }
    }

    pub fn is_access_denied(&self) -> bool {
        match self {
            Self::WinApi(e) => e.error == WINERROR_ACCESS_DENIED,
            _ => false,
        }
    }
}

impl From<WinApiError> for Error {
    fn from(e: WinApiError) -> Self {
        return Self::WinApi(e);
    }
}

impl From<String> for Error {
    fn from(e: String) -> Self {
        return Self::String(e);
    }
}

impl From<&str> for Error {
    fn from(e: &str) -> Self {
        return Self::String(e.to_string());
    }
}

impl From<csv::Error> for Error {
    fn from(e: csv::Error) -> Self {
        return Self::Csv(e);
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        return Self::Io(e);
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::String(s) => s.fmt(f),
            Self::WinApi(wae) => wae.fmt(f),
            Self::InvalidSid(s) => write!(f, "Invalid SID: {}", s),
            Self::InvalidLuid(s) => write!(f, "Invalid LUID: {}", s),
            Self::Csv(e) => write!(f, "CSV error: {}", e),
            Self::Io(e) => write!(f, "I/O error: {}", e),
            Self::Unsupported(s) => write!(f, "Unsupported: {}", s),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::WinApi(e) => Some(e),
            Self::Csv(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

/// A Win32 error code (NTSTATUS already translated) and the call that
/// produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WinApiError {
    pub error: u32,
    pub source: String,
}

impl WinApiError {
    pub fn new(error: u32, source: impl Into<String>) -> Self {
        return Self {
            error,
            source: source.into(),
        };
    }
}

impl fmt::Display for WinApiError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Windows error in {} : {} (0x{:x})",
            self.source, self.error, self.error
        )
    }
}

impl std::error::Error for WinApiError {}
