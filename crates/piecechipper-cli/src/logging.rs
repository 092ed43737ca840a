//! `stderrlog` setup shared by the subcommands.

use stderrlog::{LogLevelNum, Timestamp};

/// Logging arg group.
#[derive(clap::Args, Debug, Default)]
pub struct LogArgs {
    /// Silence log messages.
    #[clap(short, long)]
    pub quiet: bool,

    /// Raise verbosity above the command's default (-v, -vv, ...).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Prefix log lines with a timestamp.
    #[clap(long)]
    pub ts: bool,
}

/// Map a numeric level to a [`LogLevelNum`]; `0` is off.
fn level_num(level: u8) -> LogLevelNum {
    match level {
        0 => LogLevelNum::Off,
        1 => LogLevelNum::Error,
        2 => LogLevelNum::Warn,
        3 => LogLevelNum::Info,
        4 => LogLevelNum::Debug,
        _ => LogLevelNum::Trace,
    }
}

impl LogArgs {
    /// The effective level: `default` raised by one per `-v`.
    pub fn level(
        &self,
        default: u8,
    ) -> LogLevelNum {
        level_num(default.saturating_add(self.verbose))
    }

    /// Install the logger.
    pub fn setup_logging(
        &self,
        default: u8,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let timestamp = if self.ts {
            Timestamp::Second
        } else {
            Timestamp::Off
        };

        stderrlog::new()
            .quiet(self.quiet)
            .verbosity(self.level(default))
            .timestamp(timestamp)
            .init()?;

        Ok(())
    }
}
