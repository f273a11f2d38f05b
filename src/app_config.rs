use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::screenplay::{ScreenplayParser, DEFAULT_SPEAKERS};

/// Application configuration module
/// This module handles loading, validating and saving the configuration
/// settings for script parsing and output.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Parser settings
    #[serde(default)]
    pub parser: ParserConfig,

    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Screenplay parser configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ParserConfig {
    /// Names recognized in `Name: "..."` dialogue lines
    #[serde(default = "default_speakers")]
    pub speakers: Vec<String>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            speakers: default_speakers(),
        }
    }
}

impl ParserConfig {
    // @returns: Parser for the configured speaker set
    pub fn build_parser(&self) -> Result<ScreenplayParser> {
        ScreenplayParser::with_speakers(self.speakers.as_slice())
            .context("Failed to build screenplay parser from configuration")
    }
}

/// Output file configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct OutputConfig {
    /// Pretty-print the scenes JSON
    #[serde(default = "default_true")]
    pub pretty_json: bool,

    /// Write the dialogue and visual stream files next to the JSON
    #[serde(default = "default_true")]
    pub write_streams: bool,

    /// Extension of script files picked up from a directory
    #[serde(default = "default_script_extension")]
    pub script_extension: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty_json: true,
            write_streams: true,
            script_extension: default_script_extension(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    // @returns: Matching log filter
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_speakers() -> Vec<String> {
    DEFAULT_SPEAKERS.iter().map(|s| s.to_string()).collect()
}

fn default_script_extension() -> String {
    "txt".to_string()
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load the configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;

        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Save the configuration as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;

        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write config to file: {}", path.display()))
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if let Some(blank) = self.parser.speakers.iter().find(|s| s.trim().is_empty()) {
            return Err(anyhow!("Speaker names must not be blank (got {:?})", blank));
        }

        let extension = self.output.script_extension.trim_start_matches('.');
        if extension.is_empty() {
            return Err(anyhow!("Script extension must not be empty"));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            parser: ParserConfig::default(),
            output: OutputConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
