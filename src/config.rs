use crate::defaults;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub stt: SttConfig,
    pub summary: SummaryConfig,
    pub pdf: PdfConfig,
}

/// Speech-to-text configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SttConfig {
    pub model: String,
    pub language: String,
    pub threads: Option<usize>,
}

/// Summarization / study-aid configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SummaryConfig {
    /// Gemini model identifier (e.g., "gemini-2.5-flash")
    pub model: String,
    /// Chunk size in characters for long transcripts
    pub chunk_chars: usize,
    /// Whether to also generate study questions by default
    pub questions: bool,
}

/// PDF rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PdfConfig {
    /// Column width for wrapped body text
    pub wrap_columns: usize,
    /// Title rendered at the top of the document
    pub title: String,
}

impl Default for SttConfig {
    fn default() -> Self {
        Self {
            model: defaults::DEFAULT_MODEL.to_string(),
            language: defaults::DEFAULT_LANGUAGE.to_string(),
            threads: None,
        }
    }
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            model: defaults::SUMMARY_MODEL.to_string(),
            chunk_chars: defaults::CHUNK_CHARS,
            questions: false,
        }
    }
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            wrap_columns: defaults::WRAP_COLUMNS,
            title: defaults::DOCUMENT_TITLE.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Returns an error if the file contains invalid TOML.
    /// Missing fields will use default values.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from a file or return defaults if file doesn't exist
    ///
    /// Only returns defaults if the file is missing.
    /// Returns errors for invalid TOML.
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        match Self::load(path) {
            Ok(config) => Ok(config),
            Err(e) => {
                if e.downcast_ref::<std::io::Error>()
                    .map(|io_err| io_err.kind() == std::io::ErrorKind::NotFound)
                    .unwrap_or(false)
                {
                    Ok(Self::default())
                } else {
                    Err(e)
                }
            }
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supported environment variables:
    /// - LECTERN_MODEL → stt.model
    /// - LECTERN_LANGUAGE → stt.language
    /// - LECTERN_SUMMARY_MODEL → summary.model
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(model) = std::env::var("LECTERN_MODEL")
            && !model.is_empty()
        {
            self.stt.model = model;
        }

        if let Ok(language) = std::env::var("LECTERN_LANGUAGE")
            && !language.is_empty()
        {
            self.stt.language = language;
        }

        if let Ok(model) = std::env::var("LECTERN_SUMMARY_MODEL")
            && !model.is_empty()
        {
            self.summary.model = model;
        }

        self
    }

    /// Get the default configuration file path
    ///
    /// Returns ~/.config/lectern/config.toml on Linux
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join("lectern")
            .join("config.toml")
    }

    /// Look up a value by dotted key path (e.g., "stt.model").
    pub fn get_value_by_path(&self, key: &str) -> crate::error::Result<String> {
        let value = match key {
            "stt.model" => self.stt.model.clone(),
            "stt.language" => self.stt.language.clone(),
            "stt.threads" => self
                .stt
                .threads
                .map(|t| t.to_string())
                .unwrap_or_else(|| "auto".to_string()),
            "summary.model" => self.summary.model.clone(),
            "summary.chunk_chars" => self.summary.chunk_chars.to_string(),
            "summary.questions" => self.summary.questions.to_string(),
            "pdf.wrap_columns" => self.pdf.wrap_columns.to_string(),
            "pdf.title" => self.pdf.title.clone(),
            _ => {
                return Err(crate::error::LecternError::ConfigInvalidValue {
                    key: key.to_string(),
                    message: "unknown configuration key".to_string(),
                });
            }
        };
        Ok(value)
    }

    /// Set a value by dotted key path and persist the file.
    pub fn set_value_by_path(path: &Path, key: &str, value: &str) -> anyhow::Result<()> {
        let mut config = Self::load_or_default(path)?;
        config.apply_value(key, value)?;
        config.save(path)
    }

    /// Persist a new default STT model.
    pub fn update_model(path: &Path, model: &str) -> anyhow::Result<()> {
        Self::set_value_by_path(path, "stt.model", model)
    }

    /// Render the full configuration as TOML for display.
    pub fn to_display_toml(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    fn apply_value(&mut self, key: &str, value: &str) -> crate::error::Result<()> {
        use crate::error::LecternError;

        let invalid = |message: &str| LecternError::ConfigInvalidValue {
            key: key.to_string(),
            message: message.to_string(),
        };

        match key {
            "stt.model" => self.stt.model = value.to_string(),
            "stt.language" => self.stt.language = value.to_string(),
            "stt.threads" => {
                self.stt.threads = if value == "auto" {
                    None
                } else {
                    Some(
                        value
                            .parse()
                            .map_err(|_| invalid("expected a thread count or 'auto'"))?,
                    )
                };
            }
            "summary.model" => self.summary.model = value.to_string(),
            "summary.chunk_chars" => {
                let parsed: usize = value
                    .parse()
                    .map_err(|_| invalid("expected a positive integer"))?;
                if parsed == 0 {
                    return Err(invalid("chunk size must be at least 1"));
                }
                self.summary.chunk_chars = parsed;
            }
            "summary.questions" => {
                self.summary.questions = value
                    .parse()
                    .map_err(|_| invalid("expected 'true' or 'false'"))?;
            }
            "pdf.wrap_columns" => {
                let parsed: usize = value
                    .parse()
                    .map_err(|_| invalid("expected a positive integer"))?;
                if parsed == 0 {
                    return Err(invalid("wrap width must be at least 1"));
                }
                self.pdf.wrap_columns = parsed;
            }
            "pdf.title" => self.pdf.title = value.to_string(),
            _ => return Err(invalid("unknown configuration key")),
        }
        Ok(())
    }

    fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }
}
