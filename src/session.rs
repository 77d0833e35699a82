use crate::logon_type::LogonType;
use crate::luid::Luid;
use crate::sid::Sid;
use chrono::{DateTime, Utc};

/// Host copy of `SECURITY_LOGON_SESSION_DATA`. Empty strings and `None`
/// stand for values LSA did not fill.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogonSessionData {
    pub luid: Luid,
    pub user_name: String,
    pub logon_domain: String,
    pub authentication_package: String,
    pub logon_type: LogonType,
    /// Terminal Services session.
    pub session: u32,
    pub sid: Option<Sid>,
    pub logon_time: Option<DateTime<Utc>>,
    pub logon_server: String,
    pub dns_domain_name: String,
    pub upn: String,
    pub user_flags: u32,
    pub last_successful_logon: Option<DateTime<Utc>>,
    pub last_failed_logon: Option<DateTime<Utc>>,
    pub failed_attempt_count_since_last_successful_logon: u32,
    pub logon_script: String,
    pub profile_path: String,
    pub home_directory: String,
    pub home_directory_drive: String,
    pub logoff_time: Option<DateTime<Utc>>,
    pub kick_off_time: Option<DateTime<Utc>>,
    pub password_last_set: Option<DateTime<Utc>>,
    pub password_can_change: Option<DateTime<Utc>>,
    pub password_must_change: Option<DateTime<Utc>>,
}

impl LogonSessionData {
    pub fn qualified_user_name(&self) -> String {
        if self.logon_domain.is_empty() {
            return self.user_name.clone();
        }
        return format!("{}\\{}", self.logon_domain, self.user_name);
    }
}

#[derive(Debug, Clone, Default)]
pub struct SessionFilter {
    pub logon_type: Option<LogonType>,
    /// Matches `user` or `DOMAIN\user`, ignoring case.
    pub user: Option<String>,
    pub sid: Option<Sid>,
}

impl SessionFilter {
    pub fn is_empty(&self) -> bool {
        self.logon_type.is_none() && self.user.is_none() && self.sid.is_none()
    }

    pub fn matches(&self, session: &LogonSessionData) -> bool {
        if let Some(logon_type) = &self.logon_type {
            if session.logon_type != *logon_type {
                return false;
            }
        }

        if let Some(user) = &self.user {
            let user = user.to_lowercase();
            if session.user_name.to_lowercase() != user
                && session.qualified_user_name().to_lowercase() != user
            {
                return false;
            }
        }

        if let Some(sid) = &self.sid {
            if session.sid.as_ref() != Some(sid) {
                return false;
            }
        }

        return true;
    }
}
