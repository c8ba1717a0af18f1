//! Linux platform implementation.
//!
//! - gtk-launch for desktop entries
//! - xdg-open for URLs, files and folders
//! - sh -c for command lines
//! - xclip for the clipboard

use std::io::Write;
use std::process::{Command, Stdio};

use super::Platform;
use crate::error::{LumenError, LumenResult};

/// Linux platform implementation.
#[derive(Debug, Default)]
pub struct LinuxPlatform;

impl LinuxPlatform {
    pub fn new() -> Self {
        Self
    }

    fn spawn(program: &str, args: &[&str]) -> LumenResult<()> {
        Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .spawn()
            .map_err(|e| LumenError::Launch(format!("Failed to start {}: {}", program, e)))?;
        Ok(())
    }
}

impl Platform for LinuxPlatform {
    fn launch_desktop_entry(&self, desktop_id: &str) -> LumenResult<()> {
        tracing::info!(desktop_id, "Launching application");
        Self::spawn("gtk-launch", &[desktop_id])
    }

    fn open(&self, target: &str) -> LumenResult<()> {
        Self::spawn("xdg-open", &[target])
    }

    fn run_shell_command(&self, command: &str) -> LumenResult<()> {
        tracing::info!(command, "Running shell command");
        Self::spawn("sh", &["-c", command])
    }

    fn clipboard_write(&self, content: &str) -> LumenResult<()> {
        let mut child = Command::new("xclip")
            .args(["-selection", "clipboard"])
            .stdin(Stdio::piped())
            .spawn()
            .map_err(|e| LumenError::Launch(format!("Failed to start xclip: {}", e)))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(content.as_bytes())?;
        }

        let status = child.wait()?;
        if !status.success() {
            return Err(LumenError::Launch(format!("xclip exited with {}", status)));
        }
        Ok(())
    }
}
