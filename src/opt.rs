use argh::FromArgs;
use ramlabel::constants::DEFAULT_FADE_MS;
use ramlabel::geometry::{DeviceGeometry, NavigationMode};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Overlay label showing available/total memory.
#[derive(FromArgs)]
pub struct Cli {
    /// logging verbosity (-v debug -v -v trace)
    #[argh(switch, short = 'v')]
    pub verbose: u8,

    /// config file, created with defaults if missing
    #[argh(option)]
    pub config: Option<PathBuf>,

    /// log to this file instead of stderr
    #[argh(option)]
    pub log_file: Option<PathBuf>,

    /// override the configured navigation mode (gesture, two_buttons, three_buttons)
    #[argh(option)]
    pub navigation_mode: Option<NavigationMode>,

    /// seconds to stay up before fading out (0 = until killed)
    #[argh(option, default = "0")]
    pub duration_secs: u64,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    /// Layout constants of the device we're drawn on.
    pub geometry: DeviceGeometry,
    pub navigation_mode: NavigationMode,
    pub fade_ms: u64,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            geometry: Default::default(),
            navigation_mode: Default::default(),
            fade_ms: DEFAULT_FADE_MS,
        }
    }
}

/// Reads the config at `path`, writing the defaults there first if it doesn't exist.
/// Anything unreadable is logged and replaced by the defaults.
pub fn load_config_file(path: &Path) -> ConfigFile {
    match fs::read_to_string(path) {
        Ok(json) => match serde_json::from_str(&json) {
            Ok(config) => {
                log::info!("Loaded config from `{}`", path.display());
                config
            }
            Err(e) => {
                log::error!("Ignoring unparseable config `{}`: {e}", path.display());
                ConfigFile::default()
            }
        },
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            let config = ConfigFile::default();
            // Serialized up front, so a failure never leaves an empty file behind.
            let written = serde_json::to_string_pretty(&config)
                .map_err(io::Error::other)
                .and_then(|json| fs::write(path, json));
            match written {
                Ok(()) => log::info!("Wrote default config to `{}`", path.display()),
                Err(e) => log::warn!("Failed to write default config `{}`: {e}", path.display()),
            }
            config
        }
        Err(e) => {
            log::error!("Failed to read config `{}`: {e}", path.display());
            ConfigFile::default()
        }
    }
}
