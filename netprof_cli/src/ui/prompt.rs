use async_trait::async_trait;
use log::warn;
use netprof_core::{Confirm, ConfirmPrompt};
use std::io::{stdout, Write};
use tokio::io::{self, AsyncBufReadExt, BufReader};

/// Asks on the terminal and waits for a `y`/`yes` line. Anything else,
/// including end of input, counts as "no".
pub struct TerminalConfirm;

#[async_trait]
impl Confirm for TerminalConfirm {
    async fn confirm(&self, prompt: &ConfirmPrompt) -> bool {
        print!("{}\n{} [y/N] ", prompt.title, prompt.message);
        let _ = stdout().flush();

        let mut line = String::new();
        match BufReader::new(io::stdin()).read_line(&mut line).await {
            Ok(_) => is_yes(&line),
            Err(e) => {
                warn!("could not read confirmation: {e}");
                false
            }
        }
    }
}

/// `--yes`: every prompt is answered for the user.
pub struct AssumeYes;

#[async_trait]
impl Confirm for AssumeYes {
    async fn confirm(&self, _prompt: &ConfirmPrompt) -> bool {
        true
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
