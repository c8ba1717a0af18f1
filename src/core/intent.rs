//! Intent classification.
//!
//! Rules run top to bottom and the first match wins. The weather check and
//! the alias lookup sit outside this table: weather can fall through on a
//! failed lookup, and aliases never stop classification.

use crate::config::{Config, SearchConfig};
use crate::services::calculator;
use crate::services::system_commands::SystemCommand;
use crate::services::weather;

/// What the resolver should do with a query after the alias check
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    /// `>cmd`; an empty command produces no result
    ShellCommand { command: String },
    /// `g term` / `? term`; an empty term produces no result
    WebSearch { term: String },
    SystemCommand(SystemCommand),
    Calculator { expression: String },
    ClipboardHistory,
    /// Converter first, then the source fan-out
    Default,
}

type Rule = fn(&str, &SearchConfig) -> Option<Intent>;

/// Mutually exclusive rules in precedence order
const RULES: &[(&str, Rule)] = &[
    ("shell", shell_command as Rule),
    ("web", web_search as Rule),
    ("system", system_command as Rule),
    ("calculator", calculator_expression as Rule),
    ("clipboard", clipboard_history as Rule),
];

fn shell_command(query: &str, config: &SearchConfig) -> Option<Intent> {
    if !config.enable_shell_commands {
        return None;
    }
    let rest = query.strip_prefix('>')?;
    Some(Intent::ShellCommand {
        command: rest.trim().to_string(),
    })
}

fn web_search(query: &str, config: &SearchConfig) -> Option<Intent> {
    if !config.enable_web_search {
        return None;
    }
    config
        .web_search_prefixes
        .iter()
        .filter(|prefix| !prefix.is_empty())
        .find_map(|prefix| query.strip_prefix(prefix.as_str()))
        .map(|rest| Intent::WebSearch {
            term: rest.trim().to_string(),
        })
}

fn system_command(query: &str, config: &SearchConfig) -> Option<Intent> {
    if !config.enable_sys_commands {
        return None;
    }
    SystemCommand::from_token(query).map(Intent::SystemCommand)
}

fn calculator_expression(query: &str, config: &SearchConfig) -> Option<Intent> {
    if !config.enable_calculator || !calculator::is_arithmetic(query) {
        return None;
    }
    Some(Intent::Calculator {
        expression: query.to_string(),
    })
}

fn clipboard_history(query: &str, config: &SearchConfig) -> Option<Intent> {
    if !config.enable_clipboard || !query.eq_ignore_ascii_case(&config.clipboard_keyword) {
        return None;
    }
    Some(Intent::ClipboardHistory)
}

/// City for a `<weather-keyword> <city>` query, if weather is enabled
pub fn weather_city<'a>(query: &'a str, config: &Config) -> Option<&'a str> {
    if !config.search.enable_weather {
        return None;
    }
    weather::parse_query(query, &config.search.weather_keywords)
}

/// Pick the branch for a query. Disabled features never match.
pub fn classify(query: &str, config: &Config) -> Intent {
    for (name, rule) in RULES {
        if let Some(intent) = rule(query, &config.search) {
            tracing::debug!(rule = name, "Query classified");
            return intent;
        }
    }
    Intent::Default
}
