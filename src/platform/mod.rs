//! Platform abstraction for the OS operations the executor needs.
//!
//! The executor only ever talks to a [`Platform`]; tests swap in a recorder.

mod linux;

pub use linux::LinuxPlatform;

use crate::error::LumenResult;

/// OS-specific operations used to carry out a result's action.
pub trait Platform: Send + Sync {
    /// Launch an application by its desktop file id (e.g. "firefox").
    fn launch_desktop_entry(&self, desktop_id: &str) -> LumenResult<()>;

    /// Open a URL, file or directory with the default handler.
    fn open(&self, target: &str) -> LumenResult<()>;

    /// Run a command line through the shell without waiting for it.
    fn run_shell_command(&self, command: &str) -> LumenResult<()>;

    /// Write text to the clipboard.
    fn clipboard_write(&self, content: &str) -> LumenResult<()>;
}

/// The platform implementation for the desktop Lumen runs on.
pub fn current() -> Box<dyn Platform> {
    Box::new(LinuxPlatform::new())
}
