use crate::args::{Arguments, OutputFormat};
use crate::collect::collect_sessions;
use crate::error::Result;
use crate::output::{write_csv, write_text};
use crate::source::SessionSource;
use std::io::Write;

pub fn list_sessions<S: SessionSource + ?Sized, W: Write>(
    source: &S,
    args: &Arguments,
    out: &mut W,
) -> Result<()> {
    let sessions = collect_sessions(source, &args.collect_options())?;
    log::info!("{} logon session(s) matched", sessions.len());

    match args.format {
        OutputFormat::Text => write_text(out, &sessions, args.long)?,
        OutputFormat::Csv => write_csv(out, &sessions)?,
    }

    return Ok(());
}
