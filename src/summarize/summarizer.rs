//! Prompt construction for summaries and study questions.
//!
//! Transcripts longer than the configured chunk size are split and summarized
//! chunk by chunk. The instruction template is re-sent with every chunk so no
//! request loses its instruction, and the per-chunk outputs are joined in
//! input order.

use crate::defaults;
use crate::error::Result;
use crate::summarize::chunker::chunk_text;
use crate::summarize::gemini::LanguageModel;
use std::sync::Arc;

/// Instruction template for lecture summaries.
pub const SUMMARY_INSTRUCTION: &str =
    "Summarize the following lecture in clear, structured bullet points:";

/// Instruction template for study questions.
pub const QUESTIONS_INSTRUCTION: &str =
    "Write a bulleted list of practice questions and study tips for the following lecture:";

/// Drives summary and study-question prompts against a language model.
pub struct Summarizer {
    model: Arc<dyn LanguageModel>,
    chunk_chars: usize,
}

impl Summarizer {
    pub fn new(model: Arc<dyn LanguageModel>) -> Self {
        Self {
            model,
            chunk_chars: defaults::CHUNK_CHARS,
        }
    }

    /// Override the chunk size (characters per request).
    pub fn with_chunk_chars(mut self, chunk_chars: usize) -> Self {
        self.chunk_chars = chunk_chars.max(1);
        self
    }

    /// Summarize a transcript as structured bullet points.
    pub async fn summarize(&self, transcript: &str) -> Result<String> {
        self.run_chunked(SUMMARY_INSTRUCTION, transcript).await
    }

    /// Generate practice questions and study tips for a transcript.
    pub async fn study_questions(&self, transcript: &str) -> Result<String> {
        self.run_chunked(QUESTIONS_INSTRUCTION, transcript).await
    }

    /// One model call per chunk, instruction repeated every time, outputs
    /// joined in chunk order.
    async fn run_chunked(&self, instruction: &str, text: &str) -> Result<String> {
        let chunks = chunk_text(text, self.chunk_chars);
        if chunks.len() <= 1 {
            let body = chunks.first().copied().unwrap_or("");
            let prompt = format!("{instruction}\n\n{body}");
            return self.model.generate(&prompt).await;
        }

        let mut outputs = Vec::with_capacity(chunks.len());
        for chunk in chunks {
            let prompt = format!("{instruction}\n\n{chunk}");
            outputs.push(self.model.generate(&prompt).await?);
        }
        Ok(outputs.join("\n\n"))
    }
}
