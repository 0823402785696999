//! Configuration management module.
//!
//! This module handles loading and saving the application configuration
//! file and locates the session file that lives next to it.

mod error;

pub use error::ConfigError;

use crate::error::AppError;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    io::{ErrorKind, Write},
    path::PathBuf,
};

const FILE_NAME: &str = "config.yml";
const SESSION_FILE_NAME: &str = "session.yml";
const DEFAULT_DIRECTORY_PATH: &str = ".config/items-tui";

/// Oversees management of configuration file.
///
#[derive(Clone, Debug)]
pub struct Config {
    pub api_url: String,
    pub log_level: String,
    file_path: Option<PathBuf>,
}

/// On-disk layout of `config.yml`.
///
#[derive(Serialize, Deserialize)]
struct FileSpec {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_api_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config::new()
    }
}

impl Config {
    /// Return a new instance with default values and no file.
    ///
    pub fn new() -> Config {
        Config {
            api_url: default_api_url(),
            log_level: default_log_level(),
            file_path: None,
        }
    }

    /// Load `config.yml` from the given directory, or the default one. A
    /// missing file is created holding the defaults.
    ///
    pub fn load(&mut self, custom_path: Option<&str>) -> Result<(), AppError> {
        let dir_path = custom_path
            .map(PathBuf::from)
            .map_or_else(Config::default_path, Ok)?;
        fs::create_dir_all(&dir_path).map_err(|e| ConfigError::CreateDir {
            path: dir_path.clone(),
            source: e,
        })?;

        let file_path = dir_path.join(FILE_NAME);
        self.file_path = Some(file_path.clone());
        let contents = match fs::read_to_string(&file_path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return self.save(),
            Err(e) => {
                return Err(ConfigError::Read {
                    path: file_path,
                    source: e,
                }
                .into())
            }
        };

        let data: FileSpec = serde_yaml::from_str(&contents).map_err(|e| ConfigError::Parse {
            path: file_path.clone(),
            message: e.to_string(),
        })?;
        self.set_api_url(&data.api_url)?;
        self.log_level = data.log_level;
        Ok(())
    }

    /// Save the current configuration to disk.
    ///
    pub fn save(&self) -> Result<(), AppError> {
        let file_path = self.file_path.as_ref().ok_or(ConfigError::NotLoaded)?;
        let data = FileSpec {
            api_url: self.api_url.clone(),
            log_level: self.log_level.clone(),
        };
        let content = serde_yaml::to_string(&data)
            .map_err(|e| ConfigError::Encode(e.to_string()))?;
        let mut file = fs::File::create(file_path).map_err(|e| ConfigError::Write {
            path: file_path.clone(),
            source: e,
        })?;
        write!(file, "{}", content).map_err(|e| ConfigError::Write {
            path: file_path.clone(),
            source: e,
        })?;
        file.flush().map_err(|e| ConfigError::Write {
            path: file_path.clone(),
            source: e,
        })?;
        Ok(())
    }

    /// Replace the API base URL after checking it is an http(s) URL.
    ///
    pub fn set_api_url(&mut self, api_url: &str) -> Result<(), ConfigError> {
        let api_url = api_url.trim();
        if !(api_url.starts_with("http://") || api_url.starts_with("https://")) {
            return Err(ConfigError::InvalidApiUrl(api_url.to_owned()));
        }
        self.api_url = api_url.to_owned();
        Ok(())
    }

    /// Returns the path of the session file, next to the configuration file.
    ///
    pub fn session_path(&self) -> Result<PathBuf, AppError> {
        let file_path = self.file_path.as_ref().ok_or(ConfigError::NotLoaded)?;
        Ok(file_path.with_file_name(SESSION_FILE_NAME))
    }

    /// Returns the configured log level, falling back to info for anything
    /// unrecognized.
    ///
    pub fn level_filter(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Info)
    }

    /// Returns `~/.config/items-tui`, or an error without a home directory.
    ///
    fn default_path() -> Result<PathBuf, AppError> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDirectory)?;
        Ok(home.join(DEFAULT_DIRECTORY_PATH))
    }
}
