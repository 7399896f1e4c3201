//! Error types for lectern.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LecternError {
    // Configuration errors
    #[error("Configuration file not found at {path}")]
    ConfigFileNotFound { path: String },

    #[error("Invalid configuration value for {key}: {message}")]
    ConfigInvalidValue { key: String, message: String },

    #[error("Missing API key: set {variable} in the environment")]
    ApiKeyMissing { variable: String },

    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    // Upload intake errors
    #[error("Unsupported audio format '.{extension}' (expected one of: mp3, wav, m4a)")]
    UnsupportedFormat { extension: String },

    #[error("Failed to stage uploaded audio: {message}")]
    UploadStaging { message: String },

    // Audio decode errors
    #[error("Failed to decode audio: {message}")]
    AudioDecode { message: String },

    // Transcription errors
    #[error("Transcription model not found at {path}")]
    TranscriptionModelNotFound { path: String },

    #[error("Transcription inference failed: {message}")]
    TranscriptionInferenceFailed { message: String },

    #[error("Transcription error: {message}")]
    Transcription { message: String },

    // Summarization / study-aid errors
    #[error("Language model request failed: {message}")]
    ApiRequest { message: String },

    #[error("Language model returned status {status}: {message}")]
    ApiStatus { status: u16, message: String },

    #[error("Language model response unusable: {message}")]
    ApiResponse { message: String },

    #[error("Prompt blocked by the language model: {reason}")]
    PromptBlocked { reason: String },

    // Pipeline ordering errors
    #[error("Pipeline stage '{stage}' ran before its input was produced")]
    StageOutOfOrder { stage: &'static str },

    // PDF rendering errors
    #[error("PDF rendering failed: {message}")]
    Render { message: String },

    // General I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Generic error for cases not covered above
    #[error("{0}")]
    Other(String),
}

// Type alias for convenience
pub type Result<T> = std::result::Result<T, LecternError>;
