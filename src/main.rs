use winlsa::args::{args, Arguments, ArgumentsParser};
use winlsa::Result;

fn init_log(verbosity: usize) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let env = env_logger::Env::default().default_filter_or(log_level);
    let _ = env_logger::Builder::from_env(env).try_init();
}

#[cfg(windows)]
fn run(args: &Arguments) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    return winlsa::commands::list_sessions(&winlsa::LsaSource, args, &mut out);
}

#[cfg(not(windows))]
fn run(_args: &Arguments) -> Result<()> {
    return Err(winlsa::Error::Unsupported(
        "logon sessions can only be read from the Windows LSA",
    ));
}

fn main() {
    let matches = args().get_matches();
    let args = ArgumentsParser::parse(&matches);

    init_log(args.verbosity);
    log::debug!("{:?}", args);

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
