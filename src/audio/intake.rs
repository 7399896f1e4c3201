//! Upload intake: accept a lecture audio file and stage it for transcription.
//!
//! The intake enforces the extension allow-list before any pipeline stage
//! runs, and copies the bytes to a uniquely named temporary file so the
//! decoder reads by path. The temp file is a scoped resource: it is deleted
//! when the [`UploadedAudio`] value drops, on every exit path.

use crate::error::{LecternError, Result};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Audio container formats accepted by the upload intake.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioFormat {
    Mp3,
    Wav,
    M4a,
}

impl AudioFormat {
    /// Match a file extension (case-insensitive) against the allow-list.
    pub fn from_extension(extension: &str) -> Result<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "mp3" => Ok(Self::Mp3),
            "wav" => Ok(Self::Wav),
            "m4a" => Ok(Self::M4a),
            other => Err(LecternError::UnsupportedFormat {
                extension: other.to_string(),
            }),
        }
    }

    /// Determine the format from a file path's extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| LecternError::UnsupportedFormat {
                extension: String::new(),
            })?;
        Self::from_extension(extension)
    }

    /// Canonical lowercase extension for this format.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::Wav => "wav",
            Self::M4a => "m4a",
        }
    }
}

/// One uploaded audio file, staged to a temp path for the request's lifetime.
#[derive(Debug)]
pub struct UploadedAudio {
    temp: NamedTempFile,
    format: AudioFormat,
}

impl UploadedAudio {
    /// Stage raw upload bytes under their declared filename.
    ///
    /// Rejects unsupported extensions before writing anything to disk.
    pub fn stage(bytes: &[u8], filename: &str) -> Result<Self> {
        let format = AudioFormat::from_path(Path::new(filename))?;

        let mut temp = tempfile::Builder::new()
            .prefix("lectern-upload-")
            .suffix(&format!(".{}", format.extension()))
            .tempfile()
            .map_err(|e| LecternError::UploadStaging {
                message: format!("could not create temp file: {e}"),
            })?;

        temp.write_all(bytes)
            .and_then(|()| temp.flush())
            .map_err(|e| LecternError::UploadStaging {
                message: format!("could not write audio bytes: {e}"),
            })?;

        Ok(Self { temp, format })
    }

    /// Stage an audio file already on disk (CLI input path).
    pub fn from_file(path: &Path) -> Result<Self> {
        // Validate the extension before reading the file
        let format = AudioFormat::from_path(path)?;
        let bytes = std::fs::read(path).map_err(|e| LecternError::UploadStaging {
            message: format!("could not read {}: {e}", path.display()),
        })?;
        let filename = format!("upload.{}", format.extension());
        Self::stage(&bytes, &filename)
    }

    /// Filesystem path the transcription stage reads from.
    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    /// Declared container format.
    pub fn format(&self) -> AudioFormat {
        self.format
    }
}
