use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Parser settings
    #[serde(default)]
    pub parser: ParserConfig,

    /// Extraction settings
    #[serde(default)]
    pub extraction: ExtractionConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Dialogue extraction output mode
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionMode {
    // @mode: Every dialogue line on its own, in document order
    #[default]
    Raw,
    // @mode: Consecutive same-speaker lines merged into blocks
    Merged,
}

impl ExtractionMode {
    // @returns: Capitalized mode name
    #[allow(dead_code)]
    pub fn display_name(&self) -> &str {
        match self {
            Self::Raw => "Raw",
            Self::Merged => "Merged",
        }
    }

    // @returns: Lowercase mode identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::Raw => "raw".to_string(),
            Self::Merged => "merged".to_string(),
        }
    }
}

// Implement Display trait for ExtractionMode
impl std::fmt::Display for ExtractionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

// Implement FromStr trait for ExtractionMode
impl std::str::FromStr for ExtractionMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "raw" => Ok(Self::Raw),
            "merged" => Ok(Self::Merged),
            _ => Err(anyhow!("Invalid extraction mode: {}", s)),
        }
    }
}

/// Configuration for the script parser
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ParserConfig {
    /// Extension used for the interchange output file
    #[serde(default = "default_output_extension")]
    pub output_extension: String,

    /// Extension expected on play script files when walking directories
    #[serde(default = "default_script_extension")]
    pub script_extension: String,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            output_extension: default_output_extension(),
            script_extension: default_script_extension(),
        }
    }
}

/// Configuration for dialogue extraction
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ExtractionConfig {
    /// Output mode
    #[serde(default)]
    pub mode: ExtractionMode,

    /// Act to extract dialogue from, 1-based
    #[serde(default = "default_act")]
    pub act: u32,

    /// Whether raw lines are printed wrapped in quote-and-comma punctuation
    #[serde(default = "default_true")]
    pub quoted: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            mode: ExtractionMode::default(),
            act: default_act(),
            quoted: true,
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

fn default_output_extension() -> String {
    "json".to_string()
}

fn default_script_extension() -> String {
    "txt".to_string()
}

fn default_act() -> u32 {
    // The reference workflow always read act 1
    1
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.parser.output_extension.is_empty() {
            return Err(anyhow!("Output extension must not be empty"));
        }

        if self.parser.script_extension.is_empty() {
            return Err(anyhow!("Script extension must not be empty"));
        }

        if self.extraction.act == 0 {
            return Err(anyhow!("Act numbers are 1-based; act 0 is not valid"));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            parser: ParserConfig::default(),
            extraction: ExtractionConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
