use stderrlog::Timestamp;

/// Logging setup arg group.
#[derive(clap::Args, Debug)]
pub struct LogArgs {
    /// Silence log messages.
    #[clap(short, long)]
    pub quiet: bool,

    /// Turn debugging information on (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Enable timestamped logging.
    #[clap(long)]
    pub ts: bool,
}

impl LogArgs {
    /// The stderr log level: `-v` flags when given, else `default`.
    fn log_level(
        &self,
        default: u8,
    ) -> stderrlog::LogLevelNum {
        let level = if self.verbose > 0 {
            self.verbose
        } else {
            default
        };

        match level {
            0 => stderrlog::LogLevelNum::Off,
            1 => stderrlog::LogLevelNum::Error,
            2 => stderrlog::LogLevelNum::Warn,
            3 => stderrlog::LogLevelNum::Info,
            4 => stderrlog::LogLevelNum::Debug,
            _ => stderrlog::LogLevelNum::Trace,
        }
    }

    /// Install the stderr logger.
    pub fn setup_logging(
        &self,
        default: u8,
    ) -> Result<(), Box<dyn std::error::Error>> {
        stderrlog::new()
            .quiet(self.quiet)
            .verbosity(self.log_level(default))
            .timestamp(if self.ts {
                Timestamp::Second
            } else {
                Timestamp::Off
            })
            .init()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log_args(verbose: u8) -> LogArgs {
        LogArgs {
            quiet: false,
            verbose,
            ts: false,
        }
    }

    #[test]
    fn test_log_level() {
        assert!(matches!(
            log_args(0).log_level(3),
            stderrlog::LogLevelNum::Info
        ));
        assert!(matches!(
            log_args(0).log_level(2),
            stderrlog::LogLevelNum::Warn
        ));
        assert!(matches!(
            log_args(2).log_level(3),
            stderrlog::LogLevelNum::Warn
        ));
        assert!(matches!(
            log_args(9).log_level(0),
            stderrlog::LogLevelNum::Trace
        ));
    }
}
