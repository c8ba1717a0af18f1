//! Result items returned by the query engine.

use serde::Serialize;
use std::path::PathBuf;

/// Discriminant of a [`ResultItem`], used by hosts to pick icons and actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultKind {
    App,
    File,
    Bookmark,
    Web,
    Command,
    SystemCommand,
    Calculator,
    Clipboard,
    Alias,
    Weather,
}

/// Kind-specific data carried by a result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResultPayload {
    /// An installed application; `exec` is the path of its desktop entry
    App { exec: String, icon: String },

    /// A file or directory in one of the searched folders
    File { path: PathBuf },

    /// A browser bookmark
    Bookmark { url: String },

    /// A web search URL
    Web { url: String },

    /// A shell command typed after `>`
    Command { command_line: String },

    /// A fixed OS action (lock, sleep, ...)
    SystemCommand { command_line: String },

    /// Arithmetic or conversion result
    Calculator { value: f64 },

    /// A clipboard history entry
    Clipboard { value: String },

    /// A user alias expanding to several commands
    Alias { commands: Vec<String> },

    /// Current weather for a city
    Weather {
        temperature: String,
        feels_like: String,
        humidity: String,
        condition: String,
    },
}

/// A single entry in the resolved result list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultItem {
    pub title: String,
    pub description: String,
    #[serde(flatten)]
    pub payload: ResultPayload,
}

impl ResultItem {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        payload: ResultPayload,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            payload,
        }
    }

    pub fn kind(&self) -> ResultKind {
        match &self.payload {
            ResultPayload::App { .. } => ResultKind::App,
            ResultPayload::File { .. } => ResultKind::File,
            ResultPayload::Bookmark { .. } => ResultKind::Bookmark,
            ResultPayload::Web { .. } => ResultKind::Web,
            ResultPayload::Command { .. } => ResultKind::Command,
            ResultPayload::SystemCommand { .. } => ResultKind::SystemCommand,
            ResultPayload::Calculator { .. } => ResultKind::Calculator,
            ResultPayload::Clipboard { .. } => ResultKind::Clipboard,
            ResultPayload::Alias { .. } => ResultKind::Alias,
            ResultPayload::Weather { .. } => ResultKind::Weather,
        }
    }

    /// Numeric value for calculator/converter results.
    pub fn value(&self) -> Option<f64> {
        match self.payload {
            ResultPayload::Calculator { value } => Some(value),
            _ => None,
        }
    }
}
