use std::path::PathBuf;
use std::time::Duration;

/// Organization half of the settings store key.
pub const ORGANIZATION: &str = "Reelview";
/// Application half of the settings store key.
pub const APPLICATION: &str = "VideoPlayer";

pub const WINDOW_TITLE: &str = "Video Player";
pub const DEFAULT_WINDOW_SIZE: [f32; 2] = [800.0, 600.0];

/// Height reserved at the bottom of the window for the controls.
pub const CONTROL_STRIP_HEIGHT: f32 = 100.0;

/// Interval between playback polls.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

pub const ICON_PATH: &str = "icon.png";

const CONFIG_DIR_ENV: &str = "REELVIEW_CONFIG_DIR";

/// Where the settings store lives.
#[derive(Debug, Clone, Default)]
pub struct PathConfig {
    /// Custom config directory (from CLI or ENV)
    pub config_dir: Option<PathBuf>,
}

impl PathConfig {
    /// Priority: CLI arg → `REELVIEW_CONFIG_DIR` → platform default.
    pub fn from_env_and_cli(cli_dir: Option<PathBuf>) -> Self {
        Self::resolve(cli_dir, std::env::var_os(CONFIG_DIR_ENV).map(PathBuf::from))
    }

    fn resolve(cli_dir: Option<PathBuf>, env_dir: Option<PathBuf>) -> Self {
        Self {
            config_dir: cli_dir.or(env_dir),
        }
    }

    /// Base directory for settings files.
    ///
    /// Platform paths when no override is set:
    /// - Linux: ~/.config
    /// - macOS: ~/Library/Application Support
    /// - Windows: %APPDATA%
    pub fn base_dir(&self) -> PathBuf {
        self.config_dir
            .clone()
            .or_else(dirs_next::config_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Settings file for an (organization, application) pair.
    pub fn settings_file(&self, organization: &str, application: &str) -> PathBuf {
        self.base_dir()
            .join(organization)
            .join(format!("{application}.ron"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_dir_wins_over_env() {
        let config = PathConfig::resolve(Some("/cli".into()), Some("/env".into()));
        assert_eq!(config.config_dir, Some(PathBuf::from("/cli")));

        let config = PathConfig::resolve(None, Some("/env".into()));
        assert_eq!(config.config_dir, Some(PathBuf::from("/env")));
    }

    #[test]
    fn settings_file_is_keyed_by_org_and_app() {
        let config = PathConfig::resolve(Some("/tmp/cfg".into()), None);
        assert_eq!(
            config.settings_file("Acme", "Player"),
            PathBuf::from("/tmp/cfg/Acme/Player.ron")
        );
    }
}
