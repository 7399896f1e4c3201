//! Default configuration constants for lectern.
//!
//! This module provides shared constants used across different configuration types
//! to ensure consistency and eliminate duplication.

/// Audio sample rate expected by Whisper, in Hz.
///
/// 16kHz is the standard for speech recognition; every supported input format
/// is downmixed and resampled to this rate before inference.
pub const SAMPLE_RATE: u32 = 16000;

/// Default Whisper model name.
///
/// "tiny" keeps transcription fast enough for lecture-length audio on CPU.
/// Larger models (base, small, medium) improve accuracy at the cost of speed.
pub const DEFAULT_MODEL: &str = "tiny";

/// Default language code for transcription.
///
/// "auto" lets Whisper detect the spoken language automatically.
/// Set to a specific code (e.g., "en", "de") to force a language.
pub const DEFAULT_LANGUAGE: &str = "auto";

/// Language value that triggers automatic language detection.
pub const AUTO_LANGUAGE: &str = "auto";

/// Audio file extensions accepted by the upload intake.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["mp3", "wav", "m4a"];

/// Default Gemini model identifier used for summarization and study questions.
pub const SUMMARY_MODEL: &str = "gemini-2.5-flash";

/// Base URL of the hosted generative-language API.
pub const API_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Maximum prompt chunk size in characters.
///
/// Transcripts longer than this are split into fixed-size chunks so a single
/// request stays well inside the model's prompt-size limit.
pub const CHUNK_CHARS: usize = 1500;

/// Column width for wrapping body text in the rendered PDF.
pub const WRAP_COLUMNS: usize = 90;

/// Default output file name for the rendered notes.
pub const OUTPUT_FILE_NAME: &str = "LectureNotes.pdf";

/// Default document title rendered at the top of the PDF.
pub const DOCUMENT_TITLE: &str = "Lecture Notes";

/// Report the GPU backend compiled into this build.
///
/// Returns a human-readable name based on the compile-time feature flags.
/// Only one GPU backend can be active at a time; if none is enabled, returns "CPU".
pub fn gpu_backend() -> &'static str {
    if cfg!(feature = "cuda") {
        "CUDA"
    } else if cfg!(feature = "vulkan") {
        "Vulkan"
    } else {
        "CPU"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gpu_backend_matches_compiled_feature() {
        let expected = if cfg!(feature = "cuda") {
            "CUDA"
        } else if cfg!(feature = "vulkan") {
            "Vulkan"
        } else {
            "CPU"
        };
        assert_eq!(gpu_backend(), expected);
    }

    #[test]
    fn supported_extensions_cover_common_lecture_formats() {
        assert_eq!(SUPPORTED_EXTENSIONS, &["mp3", "wav", "m4a"]);
    }
}
