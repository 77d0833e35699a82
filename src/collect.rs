use crate::error::Result;
use crate::luid::Luid;
use crate::session::{LogonSessionData, SessionFilter};
use crate::source::SessionSource;

#[derive(Debug, Clone, Default)]
pub struct CollectOptions {
    /// Query only these sessions instead of enumerating.
    pub luids: Vec<Luid>,
    pub current: bool,
    pub filter: SessionFilter,
    /// Log and skip sessions that cannot be read instead of failing.
    pub keep_going: bool,
}

pub fn collect_sessions<S: SessionSource + ?Sized>(
    source: &S,
    options: &CollectOptions,
) -> Result<Vec<LogonSessionData>> {
    let luids = target_luids(source, options)?;
    log::info!("Querying {} logon session(s)", luids.len());

    let mut sessions = Vec::with_capacity(luids.len());
    for luid in luids {
        let session = match source.logon_session_data(&luid) {
            Ok(s) => s,
            Err(e) if e.is_no_such_logon_session() => {
                log::warn!("Logon session {} no longer exists, skipping", luid);
                continue;
            }
            Err(e) if options.keep_going => {
                log::warn!("Unable to read logon session {}: {}", luid, e);
                continue;
            }
            Err(e) => return Err(e),
        };

        if options.filter.matches(&session) {
            sessions.push(session);
        } else {
            log::trace!("Logon session {} filtered out", luid);
        }
    }

    return Ok(sessions);
}

fn target_luids<S: SessionSource + ?Sized>(
    source: &S,
    options: &CollectOptions,
) -> Result<Vec<Luid>> {
    let mut luids = options.luids.clone();

    if options.current {
        let current = source.current_session()?;
        log::debug!("Current logon session is {}", current);
        if !luids.contains(&current) {
            luids.push(current);
        }
    }

    if !luids.is_empty() {
        return Ok(luids);
    }

    return source.logon_sessions();
}
