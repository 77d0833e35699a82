use crate::error::Result;
use crate::session::LogonSessionData;
use crate::time::format_utc_datetime;
use chrono::{DateTime, SecondsFormat, Utc};
use std::io::Write;

const CSV_HEADER: &[&str] = &[
    "logon_id",
    "user_name",
    "logon_domain",
    "authentication_package",
    "logon_type",
    "logon_type_code",
    "session",
    "sid",
    "logon_time",
    "logon_server",
    "dns_domain_name",
    "upn",
    "user_flags",
    "last_successful_logon",
    "last_failed_logon",
    "failed_attempt_count",
    "logon_script",
    "profile_path",
    "home_directory",
    "home_directory_drive",
    "logoff_time",
    "kick_off_time",
    "password_last_set",
    "password_can_change",
    "password_must_change",
];

fn text_time(dt: &Option<DateTime<Utc>>) -> String {
    match dt {
        Some(dt) => format_utc_datetime(dt),
        None => "-".to_string(),
    }
}

fn csv_time(dt: &Option<DateTime<Utc>>) -> String {
    match dt {
        Some(dt) => dt.to_rfc3339_opts(SecondsFormat::AutoSi, true),
        None => String::new(),
    }
}

pub fn write_text<W: Write>(
    out: &mut W,
    sessions: &[LogonSessionData],
    long: bool,
) -> Result<()> {
    for sd in sessions.iter() {
        writeln!(out, "Logon ID: {}", sd.luid)?;
        writeln!(
            out,
            "Logon type: {} ({})",
            sd.logon_type,
            sd.logon_type.as_u32()
        )?;
        writeln!(out, "Username: {}", sd.user_name)?;
        writeln!(out, "Domain: {}", sd.logon_domain)?;
        writeln!(out, "Session: {}", sd.session)?;

        match &sd.sid {
            Some(sid) => writeln!(out, "SID: {}", sid)?,
            None => writeln!(out, "SID: -")?,
        }

        writeln!(out, "Authentication package: {}", sd.authentication_package)?;
        writeln!(out, "Logon server: {}", sd.logon_server)?;
        writeln!(out, "DNS domain: {}", sd.dns_domain_name)?;
        writeln!(out, "UPN: {}", sd.upn)?;
        writeln!(out, "Logon time: {}", text_time(&sd.logon_time))?;

        if long {
            writeln!(out, "User flags: 0x{:x}", sd.user_flags)?;
            writeln!(out, "Logon script: {}", sd.logon_script)?;
            writeln!(out, "Profile path: {}", sd.profile_path)?;
            writeln!(out, "Home directory: {}", sd.home_directory)?;
            writeln!(out, "Home drive: {}", sd.home_directory_drive)?;
            writeln!(
                out,
                "Last successful logon: {}",
                text_time(&sd.last_successful_logon)
            )?;
            writeln!(out, "Last failed logon: {}", text_time(&sd.last_failed_logon))?;
            writeln!(
                out,
                "Failed attempts since last success: {}",
                sd.failed_attempt_count_since_last_successful_logon
            )?;
            writeln!(out, "Logoff time: {}", text_time(&sd.logoff_time))?;
            writeln!(out, "Kick off time: {}", text_time(&sd.kick_off_time))?;
            writeln!(out, "Password last set: {}", text_time(&sd.password_last_set))?;
            writeln!(
                out,
                "Password can change: {}",
                text_time(&sd.password_can_change)
            )?;
            writeln!(
                out,
                "Password must change: {}",
                text_time(&sd.password_must_change)
            )?;
        }

        writeln!(out)?;
    }

    return Ok(());
}

pub fn write_csv<W: Write>(out: W, sessions: &[LogonSessionData]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(CSV_HEADER)?;

    for sd in sessions.iter() {
        writer.write_record(&[
            sd.luid.to_string(),
            sd.user_name.clone(),
            sd.logon_domain.clone(),
            sd.authentication_package.clone(),
            sd.logon_type.to_string(),
            sd.logon_type.as_u32().to_string(),
            sd.session.to_string(),
            sd.sid.as_ref().map(|s| s.to_string()).unwrap_or_default(),
            csv_time(&sd.logon_time),
            sd.logon_server.clone(),
            sd.dns_domain_name.clone(),
            sd.upn.clone(),
            format!("0x{:x}", sd.user_flags),
            csv_time(&sd.last_successful_logon),
            csv_time(&sd.last_failed_logon),
            sd.failed_attempt_count_since_last_successful_logon.to_string(),
            sd.logon_script.clone(),
            sd.profile_path.clone(),
            sd.home_directory.clone(),
            sd.home_directory_drive.clone(),
            csv_time(&sd.logoff_time),
            csv_time(&sd.kick_off_time),
            csv_time(&sd.password_last_set),
            csv_time(&sd.password_can_change),
            csv_time(&sd.password_must_change),
        ])?;
    }

    writer.flush()?;
    return Ok(());
}
