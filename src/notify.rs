//! Fire-and-forget cue for a new high score.

use anyhow::{Context, Result};
use std::io::Write;

pub trait Notifier {
    fn high_score_beep(&mut self) -> Result<()>;
}

/// Rings the terminal bell
#[derive(Debug, Default)]
pub struct TerminalBell;

impl Notifier for TerminalBell {
    fn high_score_beep(&mut self) -> Result<()> {
        let mut stderr = std::io::stderr();
        stderr
            .write_all(b"\x07")
            .and_then(|_| stderr.flush())
            .context("Failed to ring terminal bell")
    }
}

#[derive(Debug, Default)]
pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn high_score_beep(&mut self) -> Result<()> {
        Ok(())
    }
}
