use crate::logon_type::LogonType;
use crate::luid::Luid;
use crate::sid::Sid;

pub fn to_luid(v: &str) -> Result<Luid, String> {
    return v.parse::<Luid>().map_err(|_| {
        format!("Invalid LUID '{}', must be decimal or 0x-prefixed hex", v)
    });
}

pub fn to_logon_type(v: &str) -> Result<LogonType, String> {
    return v.parse::<LogonType>().map_err(|_| {
        format!(
            "Invalid logon type '{}', use a name such as Interactive or a number",
            v
        )
    });
}

pub fn to_sid(v: &str) -> Result<Sid, String> {
    return v
        .parse::<Sid>()
        .map_err(|_| format!("Invalid SID '{}', expected S-1-...", v));
}
