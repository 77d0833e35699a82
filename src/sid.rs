use crate::error::{Error, Result};
use crate::luid::{is_decimal, parse_hex_or_decimal};
use byteorder::{BigEndian, ByteOrder, LittleEndian, WriteBytesExt};
use std::fmt;
use std::str::FromStr;

pub const SID_REVISION: u8 = 1;
pub const SID_MAX_SUB_AUTHORITIES: usize = 15;

const SID_HEADER_LEN: usize = 8;
const SID_AUTHORITY_BYTES: usize = 6;
const SID_AUTHORITY_MAX: u64 = (1 << 48) - 1;

/// Owned copy of a binary security identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sid {
    bytes: Vec<u8>,
}

impl Sid {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < SID_HEADER_LEN {
            return Err(Error::InvalidSid(format!(
                "{} bytes is shorter than the SID header",
                bytes.len()
            )));
        }

        if bytes[0] != SID_REVISION {
            return Err(Error::InvalidSid(format!(
                "unknown revision {}",
                bytes[0]
            )));
        }

        let sub_auth_count = bytes[1] as usize;
        if sub_auth_count > SID_MAX_SUB_AUTHORITIES {
            return Err(Error::InvalidSid(format!(
                "{} sub-authorities (max {})",
                sub_auth_count, SID_MAX_SUB_AUTHORITIES
            )));
        }

        let expected = SID_HEADER_LEN + 4 * sub_auth_count;
        if bytes.len() != expected {
            return Err(Error::InvalidSid(format!(
                "length {} does not match {} sub-authorities",
                bytes.len(),
                sub_auth_count
            )));
        }

        return Ok(Self {
            bytes: bytes.to_vec(),
        });
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn revision(&self) -> u8 {
        self.bytes[0]
    }

    pub fn identifier_authority(&self) -> u64 {
        BigEndian::read_u48(&self.bytes[2..2 + SID_AUTHORITY_BYTES])
    }

    pub fn sub_authorities(&self) -> Vec<u32> {
        self.bytes[SID_HEADER_LEN..]
            .chunks_exact(4)
            .map(LittleEndian::read_u32)
            .collect()
    }

    /// Relative identifier, the last sub-authority.
    pub fn rid(&self) -> Option<u32> {
        self.sub_authorities().last().copied()
    }
}

impl fmt::Display for Sid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let authority = self.identifier_authority();
        write!(f, "S-{}-", self.revision())?;

        if authority > u32::MAX as u64 {
            write!(f, "0x{:012x}", authority)?;
        } else {
            write!(f, "{}", authority)?;
        }

        for sub_auth in self.sub_authorities() {
            write!(f, "-{}", sub_auth)?;
        }

        Ok(())
    }
}

impl FromStr for Sid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidSid(format!("'{}'", s));

        let parts: Vec<&str> = s.trim().split('-').collect();
        if parts.len() < 3 || !parts[0].eq_ignore_ascii_case("S") {
            return Err(invalid());
        }

        if !is_decimal(parts[1]) {
            return Err(invalid());
        }
        let revision = parts[1].parse::<u8>().map_err(|_| invalid())?;

        let authority = parse_hex_or_decimal(parts[2]).ok_or_else(invalid)?;

        if authority > SID_AUTHORITY_MAX {
            return Err(invalid());
        }

        let sub_auths = &parts[3..];
        if sub_auths.len() > SID_MAX_SUB_AUTHORITIES {
            return Err(invalid());
        }

        let mut bytes = Vec::with_capacity(SID_HEADER_LEN + 4 * sub_auths.len());
        bytes.push(revision);
        bytes.push(sub_auths.len() as u8);
        bytes.write_u48::<BigEndian>(authority)?;

        for sub_auth_str in sub_auths {
            if !is_decimal(sub_auth_str) {
                return Err(invalid());
            }
            let sub_auth = sub_auth_str.parse::<u32>().map_err(|_| invalid())?;
            bytes.write_u32::<LittleEndian>(sub_auth)?;
        }

        return Sid::from_bytes(&bytes);
    }
}
