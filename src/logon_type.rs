use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/*
typedef enum _SECURITY_LOGON_TYPE {
  UndefinedLogonType = 0,
  Interactive = 2,
  Network,
  Batch,
  Service,
  Proxy,
  Unlock,
  NetworkCleartext,
  NewCredentials,
  RemoteInteractive,
  CachedInteractive,
  CachedRemoteInteractive,
  CachedUnlock
} SECURITY_LOGON_TYPE, *PSECURITY_LOGON_TYPE;
*/

/// How the session was established. `System` (0) is only used by the
/// SYSTEM account, 1 is never assigned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum LogonType {
    #[default]
    System,
    Interactive,
    Network,
    Batch,
    Service,
    Proxy,
    Unlock,
    NetworkCleartext,
    NewCredentials,
    RemoteInteractive,
    CachedInteractive,
    CachedRemoteInteractive,
    CachedUnlock,
    Undefined(u32),
}

const NAMED: &[LogonType] = &[
    LogonType::System,
    LogonType::Interactive,
    LogonType::Network,
    LogonType::Batch,
    LogonType::Service,
    LogonType::Proxy,
    LogonType::Unlock,
    LogonType::NetworkCleartext,
    LogonType::NewCredentials,
    LogonType::RemoteInteractive,
    LogonType::CachedInteractive,
    LogonType::CachedRemoteInteractive,
    LogonType::CachedUnlock,
];

impl LogonType {
    pub fn as_u32(&self) -> u32 {
        match self {
            Self::System => 0,
            Self::Interactive => 2,
            Self::Network => 3,
            Self::Batch => 4,
            Self::Service => 5,
            Self::Proxy => 6,
            Self::Unlock => 7,
            Self::NetworkCleartext => 8,
            Self::NewCredentials => 9,
            Self::RemoteInteractive => 10,
            Self::CachedInteractive => 11,
            Self::CachedRemoteInteractive => 12,
            Self::CachedUnlock => 13,
            Self::Undefined(n) => *n,
        }
    }

    fn name(&self) -> Option<&'static str> {
        let name = match self {
            Self::System => "System",
            Self::Interactive => "Interactive",
            Self::Network => "Network",
            Self::Batch => "Batch",
            Self::Service => "Service",
            Self::Proxy => "Proxy",
            Self::Unlock => "Unlock",
            Self::NetworkCleartext => "NetworkCleartext",
            Self::NewCredentials => "NewCredentials",
            Self::RemoteInteractive => "RemoteInteractive",
            Self::CachedInteractive => "CachedInteractive",
            Self::CachedRemoteInteractive => "CachedRemoteInteractive",
            Self::CachedUnlock => "CachedUnlock",
            Self::Undefined(_) => return None,
        };
        return Some(name);
    }
}

impl From<u32> for LogonType {
    fn from(value: u32) -> Self {
        match value {
            0 => Self::System,
            2 => Self::Interactive,
            3 => Self::Network,
            4 => Self::Batch,
            5 => Self::Service,
            6 => Self::Proxy,
            7 => Self::Unlock,
            8 => Self::NetworkCleartext,
            9 => Self::NewCredentials,
            10 => Self::RemoteInteractive,
            11 => Self::CachedInteractive,
            12 => Self::CachedRemoteInteractive,
            13 => Self::CachedUnlock,
            n => Self::Undefined(n),
        }
    }
}

impl fmt::Display for LogonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "Undefined LogonType({})", self.as_u32()),
        }
    }
}

impl FromStr for LogonType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Ok(n) = s.parse::<u32>() {
            return Ok(Self::from(n));
        }

        for lt in NAMED {
            if let Some(name) = lt.name() {
                if name.eq_ignore_ascii_case(s) {
                    return Ok(*lt);
                }
            }
        }

        return Err(Error::String(format!("Unknown logon type '{}'", s)));
    }
}
