// Configuration file loading and creation

use super::types::Config;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

/// Get the path to the configuration file
pub fn get_config_path() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("pong");
    path.push("config.toml");
    path
}

/// Load configuration from the default location.
///
/// A missing file is not an error: the built-in defaults are used and
/// nothing is written to disk.
pub fn load_config() -> Result<Config, io::Error> {
    load_config_from(&get_config_path())
}

pub fn load_config_from(path: &Path) -> Result<Config, io::Error> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let contents = fs::read_to_string(path)?;
    Ok(parse_config(&contents, path))
}

fn parse_config(contents: &str, path: &Path) -> Config {
    match toml::from_str(contents) {
        Ok(config) => {
            info!(path = %path.display(), "loaded config file");
            config
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to parse config file, using defaults");
            Config::default()
        }
    }
}

/// Write a default configuration file with helpful comments
pub fn create_default_config(path: &Path) -> Result<(), io::Error> {
    let config = Config::default();
    let toml_string =
        toml::to_string_pretty(&config).map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

    let commented_toml = format!(
        "# Pong Configuration File\n\
         # Restart the game after editing for changes to take effect\n\
         #\n\
         # Colors: RGB values from 0-255\n\
         # center_line: \"even\" or \"odd\" dashes\n\n\
         {}",
        toml_string
    );

    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    fs::write(path, commented_toml)?;
    Ok(())
}
