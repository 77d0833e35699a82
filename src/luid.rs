use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Locally unique identifier. Unique on the host that generated it until
/// the next restart; LSA uses it as the logon session identifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Luid {
    pub high_part: i32,
    pub low_part: u32,
}

impl Luid {
    pub const SYSTEM: Luid = Luid::from_u64(0x3e7);
    pub const ANONYMOUS: Luid = Luid::from_u64(0x3e6);
    pub const LOCAL_SERVICE: Luid = Luid::from_u64(0x3e5);
    pub const NETWORK_SERVICE: Luid = Luid::from_u64(0x3e4);

    pub const fn new(low_part: u32, high_part: i32) -> Self {
        return Self {
            high_part,
            low_part,
        };
    }

    pub const fn from_u64(value: u64) -> Self {
        return Self {
            high_part: (value >> 32) as u32 as i32,
            low_part: value as u32,
        };
    }

    pub const fn as_u64(&self) -> u64 {
        return ((self.high_part as u32 as u64) << 32) | self.low_part as u64;
    }
}

impl fmt::Display for Luid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:x}", self.as_u64())
    }
}

impl FromStr for Luid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        return parse_hex_or_decimal(s)
            .map(Luid::from_u64)
            .ok_or_else(|| Error::InvalidLuid(format!("'{}'", s)));
    }
}

/// `0x`-prefixed hex or plain decimal, digits only (no sign).
pub(crate) fn parse_hex_or_decimal(s: &str) -> Option<u64> {
    match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => {
            if hex.is_empty() || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
                return None;
            }
            u64::from_str_radix(hex, 16).ok()
        }
        None => {
            if !is_decimal(s) {
                return None;
            }
            s.parse::<u64>().ok()
        }
    }
}

pub(crate) fn is_decimal(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(windows)]
impl From<windows::Win32::Foundation::LUID> for Luid {
    fn from(luid: windows::Win32::Foundation::LUID) -> Self {
        return Self::new(luid.LowPart, luid.HighPart);
    }
}

#[cfg(windows)]
impl From<Luid> for windows::Win32::Foundation::LUID {
    fn from(luid: Luid) -> Self {
        return Self {
            LowPart: luid.low_part,
            HighPart: luid.high_part,
        };
    }
}
