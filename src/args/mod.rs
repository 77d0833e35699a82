mod validators;

use crate::collect::CollectOptions;
use crate::logon_type::LogonType;
use crate::luid::Luid;
use crate::session::SessionFilter;
use crate::sid::Sid;
use clap::{Arg, ArgAction, ArgMatches, Command};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Csv,
}

pub fn args() -> Command {
    Command::new(env!("CARGO_PKG_NAME"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("luid")
                .long("luid")
                .short('l')
                .value_name("LUID")
                .action(ArgAction::Append)
                .value_parser(validators::to_luid)
                .help("Query only this logon session (repeatable)"),
        )
        .arg(
            Arg::new("current")
                .long("current")
                .short('c')
                .action(ArgAction::SetTrue)
                .help("Query the logon session of this process"),
        )
        .arg(
            Arg::new("logon-type")
                .long("logon-type")
                .short('t')
                .value_name("TYPE")
                .value_parser(validators::to_logon_type)
                .help("Only sessions of this logon type (name or number)"),
        )
        .arg(
            Arg::new("user")
                .long("user")
                .short('u')
                .value_name("USER")
                .help("Only sessions of this user, as user or DOMAIN\\user"),
        )
        .arg(
            Arg::new("sid")
                .long("sid")
                .value_name("SID")
                .value_parser(validators::to_sid)
                .help("Only sessions of this SID"),
        )
        .arg(
            Arg::new("long")
                .long("long")
                .action(ArgAction::SetTrue)
                .conflicts_with("csv")
                .help("Print every field, including profile paths and password times"),
        )
        .arg(
            Arg::new("csv")
                .long("csv")
                .action(ArgAction::SetTrue)
                .help("Print the sessions as CSV"),
        )
        .arg(
            Arg::new("keep-going")
                .long("keep-going")
                .short('k')
                .action(ArgAction::SetTrue)
                .help("Skip sessions that cannot be read instead of failing"),
        )
        .arg(
            Arg::new("verbosity")
                .short('v')
                .action(ArgAction::Count)
                .help("Increase message verbosity"),
        )
}

#[derive(Debug)]
pub struct Arguments {
    pub luids: Vec<Luid>,
    pub current: bool,
    pub logon_type: Option<LogonType>,
    pub user: Option<String>,
    pub sid: Option<Sid>,
    pub long: bool,
    pub format: OutputFormat,
    pub keep_going: bool,
    pub verbosity: usize,
}

impl Arguments {
    pub fn collect_options(&self) -> CollectOptions {
        return CollectOptions {
            luids: self.luids.clone(),
            current: self.current,
            filter: SessionFilter {
                logon_type: self.logon_type,
                user: self.user.clone(),
                sid: self.sid.clone(),
            },
            keep_going: self.keep_going,
        };
    }
}

pub struct ArgumentsParser<'a> {
    matches: &'a ArgMatches,
}

impl<'a> ArgumentsParser<'a> {
    pub fn parse(matches: &'a ArgMatches) -> Arguments {
        let parser = Self { matches };
        return parser._parse();
    }

    fn _parse(&self) -> Arguments {
        return Arguments {
            luids: self.parse_luids(),
            current: self.matches.get_flag("current"),
            logon_type: self.matches.get_one::<LogonType>("logon-type").copied(),
            user: self.matches.get_one::<String>("user").cloned(),
            sid: self.matches.get_one::<Sid>("sid").cloned(),
            long: self.matches.get_flag("long"),
            format: self.parse_format(),
            keep_going: self.matches.get_flag("keep-going"),
            verbosity: self.matches.get_count("verbosity") as usize,
        };
    }

    fn parse_luids(&self) -> Vec<Luid> {
        return self
            .matches
            .get_many::<Luid>("luid")
            .map(|v| v.copied().collect())
            .unwrap_or_default();
    }

    fn parse_format(&self) -> OutputFormat {
        if self.matches.get_flag("csv") {
            return OutputFormat::Csv;
        }
        return OutputFormat::Text;
    }
}
