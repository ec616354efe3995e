use clap::Parser;
use std::path::PathBuf;

use crate::error::AppError;

/// Minimal video player window
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the video file to play
    #[arg(value_name = "PATH")]
    pub media_path: Option<PathBuf>,

    /// Increase logging verbosity (default: warn, -v: info, -vv: debug, -vvv+: trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbosity: u8,

    /// Custom configuration directory (overrides default platform paths)
    #[arg(short = 'c', long = "config-dir", value_name = "DIR")]
    pub config_dir: Option<PathBuf>,
}

impl Args {
    /// Parse process arguments. `--help` and `--version` print and exit here;
    /// anything else clap rejects becomes a usage error.
    pub fn from_env() -> Result<Self, AppError> {
        Self::parse_from_iter(std::env::args_os())
    }

    pub fn parse_from_iter<I, T>(iter: I) -> Result<Self, AppError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        match Self::try_parse_from(iter) {
            Ok(args) => Ok(args),
            Err(e)
                if matches!(
                    e.kind(),
                    clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion
                ) =>
            {
                e.exit()
            }
            Err(e) => Err(AppError::Usage(e.to_string())),
        }
    }

    /// The one required positional path.
    pub fn media_path(&self) -> Result<PathBuf, AppError> {
        self.media_path
            .clone()
            .ok_or_else(|| AppError::Usage(format!("Usage: {} <video-path>", env!("CARGO_PKG_NAME"))))
    }

    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbosity {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_path_is_a_usage_error() {
        let args = Args::parse_from_iter(["reelview"]).unwrap();
        let err = args.media_path().unwrap_err();
        assert!(matches!(err, AppError::Usage(_)));
        assert_eq!(err.exit_code(), 1);
        assert_eq!(err.to_string(), "Usage: reelview <video-path>");
    }

    #[test]
    fn unknown_flag_is_a_usage_error() {
        let err = Args::parse_from_iter(["reelview", "--bogus", "a.mp4"]).unwrap_err();
        assert!(matches!(err, AppError::Usage(_)));
    }

    #[test]
    fn path_and_verbosity_are_parsed() {
        let args = Args::parse_from_iter(["reelview", "-vv", "clip.mp4"]).unwrap();
        assert_eq!(args.media_path().unwrap(), PathBuf::from("clip.mp4"));
        assert_eq!(args.log_level(), log::LevelFilter::Debug);
    }

    #[test]
    fn extra_positional_is_rejected() {
        let err = Args::parse_from_iter(["reelview", "a.mp4", "b.mp4"]).unwrap_err();
        assert!(matches!(err, AppError::Usage(_)));
    }
}
