//! Per-request pipeline context.
//!
//! Each upload gets one [`NotesContext`]. Stage outputs are write-once fields
//! filled in pipeline order (transcript → summary → questions); accessors for
//! downstream stages check presence, so rendering cannot start before both
//! the transcript and the summary exist.

use crate::error::{LecternError, Result};

/// Write-once outputs of a single notes request.
#[derive(Debug, Default, Clone)]
pub struct NotesContext {
    transcript: Option<String>,
    summary: Option<String>,
    questions: Option<String>,
}

impl NotesContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the transcription output. First stage; always allowed once.
    pub fn set_transcript(&mut self, transcript: String) -> Result<()> {
        if self.transcript.is_some() {
            return Err(LecternError::Other(
                "transcript already recorded for this request".to_string(),
            ));
        }
        self.transcript = Some(transcript);
        Ok(())
    }

    /// Record the summary. Requires the transcript to exist.
    pub fn set_summary(&mut self, summary: String) -> Result<()> {
        if self.transcript.is_none() {
            return Err(LecternError::StageOutOfOrder { stage: "summarize" });
        }
        if self.summary.is_some() {
            return Err(LecternError::Other(
                "summary already recorded for this request".to_string(),
            ));
        }
        self.summary = Some(summary);
        Ok(())
    }

    /// Record the study questions. Requires the summary to exist.
    pub fn set_questions(&mut self, questions: String) -> Result<()> {
        if self.summary.is_none() {
            return Err(LecternError::StageOutOfOrder { stage: "questions" });
        }
        self.questions = Some(questions);
        Ok(())
    }

    /// The transcript, or an ordering error if transcription has not run.
    pub fn transcript(&self) -> Result<&str> {
        self.transcript
            .as_deref()
            .ok_or(LecternError::StageOutOfOrder { stage: "summarize" })
    }

    /// The summary, or an ordering error if summarization has not run.
    pub fn summary(&self) -> Result<&str> {
        self.summary
            .as_deref()
            .ok_or(LecternError::StageOutOfOrder { stage: "render" })
    }

    /// Study questions, if that stage ran.
    pub fn questions(&self) -> Option<&str> {
        self.questions.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stages_fill_in_order() {
        let mut ctx = NotesContext::new();
        ctx.set_transcript("words".to_string()).unwrap();
        ctx.set_summary("short words".to_string()).unwrap();
        ctx.set_questions("- q1".to_string()).unwrap();

        assert_eq!(ctx.transcript().unwrap(), "words");
        assert_eq!(ctx.summary().unwrap(), "short words");
        assert_eq!(ctx.questions(), Some("- q1"));
    }

    #[test]
    fn summary_before_transcript_is_rejected() {
        let mut ctx = NotesContext::new();
        match ctx.set_summary("early".to_string()) {
            Err(LecternError::StageOutOfOrder { stage }) => assert_eq!(stage, "summarize"),
            other => panic!("Expected StageOutOfOrder, got {:?}", other),
        }
    }

    #[test]
    fn questions_before_summary_is_rejected() {
        let mut ctx = NotesContext::new();
        ctx.set_transcript("words".to_string()).unwrap();
        assert!(ctx.set_questions("early".to_string()).is_err());
    }

    #[test]
    fn transcript_is_write_once() {
        let mut ctx = NotesContext::new();
        ctx.set_transcript("first".to_string()).unwrap();
        assert!(ctx.set_transcript("second".to_string()).is_err());
        assert_eq!(ctx.transcript().unwrap(), "first");
    }

    #[test]
    fn render_inputs_missing_reports_render_stage() {
        let mut ctx = NotesContext::new();
        ctx.set_transcript("words".to_string()).unwrap();
        match ctx.summary() {
            Err(LecternError::StageOutOfOrder { stage }) => assert_eq!(stage, "render"),
            other => panic!("Expected StageOutOfOrder, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn questions_are_optional() {
        let mut ctx = NotesContext::new();
        ctx.set_transcript("words".to_string()).unwrap();
        ctx.set_summary("short".to_string()).unwrap();
        assert_eq!(ctx.questions(), None);
    }
}
