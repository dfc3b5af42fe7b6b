use clap::{Arg, Command, builder::ValueParser};

pub const ARG_VERBOSITY: &str = "verbosity";

/// Level names, indexed by the verbosity count they stand for.
const LEVEL_NAMES: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Accept either a verbosity count (`0`..=`5`) or a level name.
fn parse_level(level: &str) -> Result<u8, String> {
    if let Ok(count) = level.parse::<u8>() {
        return if usize::from(count) <= LEVEL_NAMES.len() {
            Ok(count)
        } else {
            Err(format!("log level count must be at most {}", LEVEL_NAMES.len()))
        };
    }

    LEVEL_NAMES
        .iter()
        .position(|name| name.eq_ignore_ascii_case(level.trim()))
        .and_then(|index| u8::try_from(index).ok())
        .ok_or_else(|| format!("invalid log level '{level}', expected one of: {}", LEVEL_NAMES.join(", ")))
}

#[must_use]
pub fn validator_log_level() -> ValueParser {
    ValueParser::from(parse_level)
}

/// Register the global `-v` flag, also settable via `ACCOUNTS_LOG_LEVEL`.
#[must_use]
pub fn with_args(command: Command) -> Command {
    command.arg(
        Arg::new(ARG_VERBOSITY)
            .short('v')
            .long("verbose")
            .help("Verbosity level: ERROR, WARN, INFO, DEBUG, TRACE (default: ERROR)")
            .env("ACCOUNTS_LOG_LEVEL")
            .global(true)
            .action(clap::ArgAction::Count)
            .value_parser(validator_log_level()),
    )
}
