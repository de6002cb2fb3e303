use anyhow::{Result, anyhow};
use std::time::Duration;
use tokio::time::Instant;

/// How long the copy button shows its result glyph.
pub const FEEDBACK_DURATION: Duration = Duration::from_millis(2000);

pub fn copy_text(text: &str) -> Result<()> {
    #[cfg(feature = "clipboard")]
    {
        use clipboard::{ClipboardContext, ClipboardProvider};
        let mut ctx: ClipboardContext =
            ClipboardProvider::new().map_err(|e| anyhow!("clipboard unavailable: {}", e))?;
        ctx.set_contents(text.to_owned())
            .map_err(|e| anyhow!("could not write clipboard: {}", e))?;
        Ok(())
    }

    #[cfg(not(feature = "clipboard"))]
    {
        let _ = text;
        Err(anyhow!("built without clipboard support"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied,
    Failed,
}

/// Transient result glyph for the copy button.
#[derive(Debug, Clone, Copy)]
pub struct CopyFeedback {
    pub outcome: CopyOutcome,
    shown_at: Instant,
}

impl CopyFeedback {
    pub fn new(outcome: CopyOutcome) -> Self {
        Self {
            outcome,
            shown_at: Instant::now(),
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self.outcome {
            CopyOutcome::Copied => "✔",
            CopyOutcome::Failed => "✖",
        }
    }

    pub fn expired(&self) -> bool {
        self.shown_at.elapsed() >= FEEDBACK_DURATION
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn feedback_expires() {
        let feedback = CopyFeedback::new(CopyOutcome::Copied);
        assert!(!feedback.expired());
        assert_eq!(feedback.glyph(), "✔");

        tokio::time::advance(FEEDBACK_DURATION).await;
        assert!(feedback.expired());
    }

    #[test]
    fn failure_glyph() {
        assert_eq!(CopyFeedback::new(CopyOutcome::Failed).glyph(), "✖");
    }
}
