//! Lecture notes application entry point.
//!
//! Orchestrates the complete flow for one audio file:
//! stage upload → decode → transcribe → summarize → (questions) → render PDF

use crate::audio::decode::decode_to_samples;
use crate::audio::intake::UploadedAudio;
use crate::config::Config;
use crate::defaults;
use crate::error::{LecternError, Result};
use crate::models::download::{download_model, is_model_installed, model_path};
use crate::notes::NotesContext;
use crate::pdf::{RenderOptions, render_notes};
use crate::secret::ApiKey;
use crate::stt::transcriber::Transcriber;
use crate::stt::whisper::{WhisperConfig, WhisperTranscriber};
use crate::summarize::gemini::GeminiClient;
use crate::summarize::summarizer::Summarizer;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// CLI overrides and switches for one notes run.
#[derive(Debug, Default)]
pub struct NotesOptions {
    /// Whisper model override
    pub model: Option<String>,
    /// Transcription language override
    pub language: Option<String>,
    /// Output PDF path (default: LectureNotes.pdf)
    pub output: Option<PathBuf>,
    /// Also generate study questions
    pub questions: bool,
    /// Suppress status messages
    pub quiet: bool,
    /// Verbosity level
    pub verbosity: u8,
    /// Prevent automatic model download
    pub no_download: bool,
}

/// Run the notes command: audio file in, styled PDF out.
pub async fn run_notes_command(
    mut config: Config,
    audio: &Path,
    options: NotesOptions,
) -> Result<()> {
    // Apply CLI overrides
    if let Some(m) = options.model {
        config.stt.model = m;
    }
    if let Some(l) = options.language {
        config.stt.language = l;
    }
    let want_questions = options.questions || config.summary.questions;

    // Fail fast on a missing key, before any heavy work
    let api_key = ApiKey::from_env()?;

    // Stage the upload; the temp copy lives for the rest of this function
    let upload = UploadedAudio::from_file(audio)?;
    if options.verbosity >= 1 {
        eprintln!(
            "Staged {} as {}",
            audio.display(),
            upload.path().display()
        );
    }

    let samples = decode_to_samples(upload.path(), upload.format())?;
    if !options.quiet {
        eprintln!(
            "Decoded {:.1}s of audio.",
            samples.len() as f64 / defaults::SAMPLE_RATE as f64
        );
    }

    if !options.quiet {
        eprintln!("Loading model '{}'...", config.stt.model);
    }
    let transcriber = create_transcriber(&config, options.quiet, options.no_download).await?;

    let model = GeminiClient::new(api_key, config.summary.model.clone());
    let summarizer =
        Summarizer::new(Arc::new(model)).with_chunk_chars(config.summary.chunk_chars);

    let notes = generate_notes(
        transcriber,
        &summarizer,
        samples,
        want_questions,
        options.quiet,
    )
    .await?;

    let render_options = RenderOptions {
        title: config.pdf.title.clone(),
        wrap_columns: config.pdf.wrap_columns,
    };
    let bytes = render_notes(&notes, &render_options)?;

    let output = options
        .output
        .unwrap_or_else(|| PathBuf::from(defaults::OUTPUT_FILE_NAME));
    std::fs::write(&output, &bytes)?;

    if !options.quiet {
        eprintln!("Wrote {}", output.display());
    }

    Ok(())
}

/// Drive the pipeline stages against the given transcriber and summarizer.
///
/// Split out from [`run_notes_command`] so the stage ordering is testable
/// without a model file or network access.
pub async fn generate_notes(
    transcriber: Arc<dyn Transcriber>,
    summarizer: &Summarizer,
    samples: Vec<i16>,
    want_questions: bool,
    quiet: bool,
) -> Result<NotesContext> {
    if !quiet {
        eprintln!("Transcribing with '{}'...", transcriber.model_name());
    }

    // Whisper inference is CPU-bound; keep it off the async runtime
    let worker = Arc::clone(&transcriber);
    let transcript = tokio::task::spawn_blocking(move || worker.transcribe(&samples))
        .await
        .map_err(|e| LecternError::Transcription {
            message: format!("transcription task failed: {e}"),
        })??;

    if transcript.is_empty() {
        return Err(LecternError::Transcription {
            message: "no speech recognized in the audio".to_string(),
        });
    }

    let mut notes = NotesContext::new();
    notes.set_transcript(transcript)?;

    if !quiet {
        eprintln!("Summarizing...");
    }
    let summary = summarizer.summarize(notes.transcript()?).await?;
    notes.set_summary(summary)?;

    if want_questions {
        if !quiet {
            eprintln!("Generating study questions...");
        }
        let questions = summarizer.study_questions(notes.transcript()?).await?;
        notes.set_questions(questions)?;
    }

    Ok(notes)
}

/// Create the transcriber, downloading the model if needed.
async fn create_transcriber(
    config: &Config,
    quiet: bool,
    no_download: bool,
) -> Result<Arc<dyn Transcriber>> {
    let model_path = ensure_model(&config.stt.model, quiet, no_download).await?;

    let whisper_config = WhisperConfig {
        model_path,
        language: config.stt.language.clone(),
        threads: config.stt.threads,
    };

    Ok(Arc::new(WhisperTranscriber::new(whisper_config)?))
}

/// Resolve the model name to an on-disk file, downloading if needed.
async fn ensure_model(model: &str, quiet: bool, no_download: bool) -> Result<PathBuf> {
    // Direct file paths bypass the catalog
    let as_path = PathBuf::from(model);
    if as_path.is_absolute() || as_path.exists() || model.contains('/') {
        return Ok(as_path);
    }

    if is_model_installed(model) {
        return Ok(model_path(model));
    }

    if no_download {
        return Err(LecternError::Transcription {
            message: format!(
                "Model '{}' not installed and --no-download specified.\n\
                 Run: lectern models install {}",
                model, model
            ),
        });
    }

    if !quiet {
        eprintln!("Model '{}' not installed, downloading...", model);
    }
    download_model(model, !quiet).await
}
