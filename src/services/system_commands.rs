//! Fixed OS actions reachable by a bilingual keyword.

/// System commands that can be executed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemCommand {
    Lock,
    Sleep,
    Shutdown,
    Restart,
}

impl SystemCommand {
    /// Match a whole query (case-insensitive) against the keyword set
    pub fn from_token(token: &str) -> Option<Self> {
        match token.to_lowercase().as_str() {
            "lock" | "zár" => Some(SystemCommand::Lock),
            "sleep" | "alvás" => Some(SystemCommand::Sleep),
            "shutdown" | "leállítás" | "kikapcs" => Some(SystemCommand::Shutdown),
            "restart" | "újraindítás" => Some(SystemCommand::Restart),
            _ => None,
        }
    }

    /// Shell command line performing the action
    pub fn command_line(&self) -> &'static str {
        match self {
            SystemCommand::Lock => "xdg-screensaver lock",
            SystemCommand::Sleep => "systemctl suspend",
            SystemCommand::Shutdown => "systemctl poweroff",
            SystemCommand::Restart => "systemctl reboot",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            SystemCommand::Lock => "Lock Screen",
            SystemCommand::Sleep => "Sleep",
            SystemCommand::Shutdown => "Shut Down",
            SystemCommand::Restart => "Restart",
        }
    }
}
