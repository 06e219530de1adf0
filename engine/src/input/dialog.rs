// Graphical prompt through the `zenity` entry dialog.
use std::process::Command;

use super::InputProvider;
use crate::error::InputError;

pub const DIALOG_HELPER: &str = "zenity";

pub struct DialogInput {
    program: String,
    title: String,
}

impl DialogInput {
    pub fn new() -> Self {
        Self::with_program(DIALOG_HELPER)
    }

    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            title: "Input".to_string(),
        }
    }
}

impl Default for DialogInput {
    fn default() -> Self {
        Self::new()
    }
}

impl InputProvider for DialogInput {
    fn ask(&mut self, prompt: &str) -> Result<Option<String>, InputError> {
        let output = Command::new(&self.program)
            .args(["--entry", "--title", self.title.as_str(), "--text", prompt])
            .output()
            .map_err(|e| InputError::ReadError(format!("Failed to launch {}: {}", self.program, e)))?;

        // zenity exits with 1 on Cancel or when the window is closed.
        if !output.status.success() {
            tracing::debug!(status = ?output.status.code(), "Dialog dismissed");
            return Ok(None);
        }
        let answer = String::from_utf8_lossy(&output.stdout);
        Ok(Some(answer.trim_end_matches(&['\r', '\n'][..]).to_string()))
    }
}

/// Whether the dialog helper can be found on `PATH`.
pub fn helper_on_path() -> bool {
    std::env::var_os("PATH")
        .map(|paths| std::env::split_paths(&paths).any(|dir| dir.join(DIALOG_HELPER).is_file()))
        .unwrap_or(false)
}
