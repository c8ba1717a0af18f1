//! Result execution module - determines what action to take for each ResultItem

use std::path::{Path, PathBuf};

use crate::core::{ResultItem, ResultPayload};
use crate::error::LumenResult;
use crate::platform::Platform;
use crate::services::aliases::AliasCommand;
use crate::services::format::format_number;

/// The action to perform when a result is chosen
#[derive(Debug, Clone, PartialEq)]
pub enum ExecutionAction {
    /// Launch an application through its desktop file id
    LaunchApp { desktop_id: String },

    /// Open a file or directory with xdg-open
    OpenPath { path: PathBuf },

    /// Open a URL in the default browser
    OpenUrl { url: String },

    /// Run a shell command
    RunShellCommand { command: String },

    /// Copy text to clipboard
    CopyToClipboard { content: String },

    /// Dispatch every step of an alias in order
    RunAlias { commands: Vec<AliasCommand> },

    /// Nothing to do (weather)
    None,
}

impl From<&ResultItem> for ExecutionAction {
    fn from(item: &ResultItem) -> Self {
        match &item.payload {
            ResultPayload::App { exec, .. } => app_action(exec),
            ResultPayload::File { path } => ExecutionAction::OpenPath { path: path.clone() },
            ResultPayload::Bookmark { url } | ResultPayload::Web { url } => {
                ExecutionAction::OpenUrl { url: url.clone() }
            }
            ResultPayload::Command { command_line }
            | ResultPayload::SystemCommand { command_line } => ExecutionAction::RunShellCommand {
                command: command_line.clone(),
            },
            ResultPayload::Calculator { value } => ExecutionAction::CopyToClipboard {
                content: format_number(*value),
            },
            ResultPayload::Clipboard { value } => ExecutionAction::CopyToClipboard {
                content: value.clone(),
            },
            ResultPayload::Alias { commands } => ExecutionAction::RunAlias {
                commands: commands.iter().map(|c| AliasCommand::classify(c)).collect(),
            },
            ResultPayload::Weather { .. } => ExecutionAction::None,
        }
    }
}

/// Desktop entries go through gtk-launch; anything else is opened
fn app_action(exec: &str) -> ExecutionAction {
    let path = Path::new(exec);
    if path.extension().is_some_and(|ext| ext == "desktop") {
        if let Some(stem) = path.file_stem() {
            return ExecutionAction::LaunchApp {
                desktop_id: stem.to_string_lossy().to_string(),
            };
        }
    }
    ExecutionAction::OpenPath {
        path: path.to_path_buf(),
    }
}

/// Carry out an action. Alias steps all run even if one fails; the first
/// failure is returned.
pub fn execute(action: &ExecutionAction, platform: &dyn Platform) -> LumenResult<()> {
    match action {
        ExecutionAction::LaunchApp { desktop_id } => platform.launch_desktop_entry(desktop_id),
        ExecutionAction::OpenPath { path } => platform.open(&path.to_string_lossy()),
        ExecutionAction::OpenUrl { url } => platform.open(url),
        ExecutionAction::RunShellCommand { command } => platform.run_shell_command(command),
        ExecutionAction::CopyToClipboard { content } => platform.clipboard_write(content),
        ExecutionAction::RunAlias { commands } => {
            let mut first_error = None;
            for command in commands {
                let result = match command {
                    AliasCommand::Open(url) => platform.open(url),
                    AliasCommand::Execute(line) => platform.run_shell_command(line),
                };
                if let Err(e) = result {
                    tracing::warn!(?command, "Alias step failed: {}", e);
                    first_error.get_or_insert(e);
                }
            }
            first_error.map_or(Ok(()), Err)
        }
        ExecutionAction::None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LumenError;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        calls: Mutex<Vec<String>>,
    }

    impl Recorder {
        fn record(&self, call: String) -> LumenResult<()> {
            let failing = call.contains("fail");
            self.calls.lock().unwrap().push(call);
            if failing {
                Err(LumenError::Launch("boom".to_string()))
            } else {
                Ok(())
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl Platform for Recorder {
        fn launch_desktop_entry(&self, desktop_id: &str) -> LumenResult<()> {
            self.record(format!("launch {}", desktop_id))
        }

        fn open(&self, target: &str) -> LumenResult<()> {
            self.record(format!("open {}", target))
        }

        fn run_shell_command(&self, command: &str) -> LumenResult<()> {
            self.record(format!("sh {}", command))
        }

        fn clipboard_write(&self, content: &str) -> LumenResult<()> {
            self.record(format!("copy {}", content))
        }
    }

    fn item(payload: ResultPayload) -> ResultItem {
        ResultItem::new("title", "description", payload)
    }

    #[test]
    fn test_app_actions() {
        let action = ExecutionAction::from(&item(ResultPayload::App {
            exec: "/usr/share/applications/org.gnome.Nautilus.desktop".to_string(),
            icon: "nautilus".to_string(),
        }));
        assert_eq!(
            action,
            ExecutionAction::LaunchApp {
                desktop_id: "org.gnome.Nautilus".to_string()
            }
        );

        let action = ExecutionAction::from(&item(ResultPayload::App {
            exec: "/opt/tool/tool.AppImage".to_string(),
            icon: "application".to_string(),
        }));
        assert!(matches!(action, ExecutionAction::OpenPath { .. }));
    }

    #[test]
    fn test_value_actions() {
        assert_eq!(
            ExecutionAction::from(&item(ResultPayload::Calculator { value: 6.25 })),
            ExecutionAction::CopyToClipboard {
                content: "6.25".to_string()
            }
        );
        assert_eq!(
            ExecutionAction::from(&item(ResultPayload::SystemCommand {
                command_line: "systemctl suspend".to_string()
            })),
            ExecutionAction::RunShellCommand {
                command: "systemctl suspend".to_string()
            }
        );
        assert_eq!(
            ExecutionAction::from(&item(ResultPayload::Weather {
                temperature: "12°C".to_string(),
                feels_like: "10°C".to_string(),
                humidity: "80%".to_string(),
                condition: "Sunny".to_string(),
            })),
            ExecutionAction::None
        );
    }

    #[test]
    fn test_alias_dispatch_continues_after_failure() {
        let action = ExecutionAction::from(&item(ResultPayload::Alias {
            commands: vec![
                "https://mail.example.com".to_string(),
                "fail-command".to_string(),
                "code ~/src".to_string(),
            ],
        }));

        let recorder = Recorder::default();
        let result = execute(&action, &recorder);

        assert!(matches!(result, Err(LumenError::Launch(_))));
        assert_eq!(
            recorder.calls(),
            vec![
                "open https://mail.example.com",
                "sh fail-command",
                "sh code ~/src",
            ]
        );
    }

    #[test]
    fn test_execute_routes_to_platform() {
        let recorder = Recorder::default();
        execute(
            &ExecutionAction::LaunchApp {
                desktop_id: "firefox".to_string(),
            },
            &recorder,
        )
        .unwrap();
        execute(
            &ExecutionAction::OpenPath {
                path: PathBuf::from("/home/user/Documents"),
            },
            &recorder,
        )
        .unwrap();
        execute(&ExecutionAction::None, &recorder).unwrap();

        assert_eq!(
            recorder.calls(),
            vec!["launch firefox", "open /home/user/Documents"]
        );
    }
}
