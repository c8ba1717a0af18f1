//! User-defined aliases: one keyword expanding to several URLs/commands.

use std::collections::BTreeMap;

/// One step of an alias, dispatched by the executor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AliasCommand {
    /// Open a URL in the default browser
    Open(String),
    /// Run a shell command line
    Execute(String),
}

impl AliasCommand {
    /// `http://` / `https://` entries are opened, everything else is executed
    pub fn classify(command: &str) -> Self {
        if command.starts_with("http://") || command.starts_with("https://") {
            AliasCommand::Open(command.to_string())
        } else {
            AliasCommand::Execute(command.to_string())
        }
    }
}

/// Alias table keyed by lowercase keyword
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    aliases: BTreeMap<String, Vec<String>>,
}

impl AliasTable {
    pub fn new(aliases: &BTreeMap<String, Vec<String>>) -> Self {
        Self {
            aliases: aliases
                .iter()
                .map(|(key, commands)| (key.to_lowercase(), commands.clone()))
                .collect(),
        }
    }

    /// Exact, case-insensitive match of the whole query against a keyword
    pub fn lookup(&self, query: &str) -> Option<(&str, &[String])> {
        if query.is_empty() {
            return None;
        }
        self.aliases
            .get_key_value(&query.to_lowercase())
            .map(|(key, commands)| (key.as_str(), commands.as_slice()))
    }
}
