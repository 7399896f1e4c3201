//! Transcript summarization and study-question generation via a hosted
//! generative-language model.

pub mod chunker;
pub mod gemini;
pub mod summarizer;

pub use chunker::chunk_text;
pub use gemini::{GeminiClient, LanguageModel, MockLanguageModel};
pub use summarizer::Summarizer;
