//! Query resolution engine.
//!
//! Turns one line of input into an ordered result list: weather short-circuit,
//! alias lookup, then exactly one classified branch. The default branch tries
//! the converter and otherwise fans out to the apps, bookmarks and files
//! sources, merging them in that order with per-source caps.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use super::intent::{self, Intent};
use super::result::{ResultItem, ResultPayload};
use crate::config::Config;
use crate::error::LumenResult;
use crate::search::Source;
use crate::services::aliases::AliasTable;
use crate::services::app_index::AppSource;
use crate::services::bookmarks::BookmarkSource;
use crate::services::clipboard::{self, ClipboardHistory, SharedClipboard};
use crate::services::converter::Converter;
use crate::services::currency::RateCache;
use crate::services::file_search::FileSource;
use crate::services::weather::{WeatherClient, WeatherReport};
use crate::services::{calculator, icons};

/// Clipboard titles show this many characters
const CLIPBOARD_PREVIEW_CHARS: usize = 50;

pub struct QueryEngine {
    config: Config,
    aliases: AliasTable,
    converter: Converter,
    weather: WeatherClient,
    clipboard: SharedClipboard,
    /// Fallback sources in merge priority order
    sources: Vec<Arc<dyn Source>>,
    icon_dirs: Vec<PathBuf>,
}

impl QueryEngine {
    /// Build an engine from a validated config
    pub fn new(config: Config) -> LumenResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("lumen/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let rates = RateCache::new(
            client.clone(),
            config.network.exchange_rate_url.clone(),
            Duration::from_secs(config.network.rate_max_age_secs),
        )
        .with_timeout(Duration::from_millis(config.network.rate_timeout_ms));
        let weather = WeatherClient::new(
            client,
            config.network.weather_url.clone(),
            Duration::from_millis(config.network.weather_timeout_ms),
        );

        let search = &config.search;
        let sources: Vec<Arc<dyn Source>> = vec![
            Arc::new(AppSource::new(config.sources.app_dirs(), search.enable_apps)),
            Arc::new(BookmarkSource::new(
                config.sources.bookmark_files(),
                search.enable_bookmarks,
                search.bookmark_min_query_len,
            )),
            Arc::new(FileSource::new(
                config.sources.file_dirs(),
                search.enable_files,
                search.file_min_query_len,
            )),
        ];

        Ok(Self {
            aliases: AliasTable::new(&config.aliases),
            converter: Converter::new(Arc::new(rates)),
            weather,
            clipboard: ClipboardHistory::shared(),
            sources,
            icon_dirs: config.sources.icon_dirs(),
            config,
        })
    }

    /// Share an existing rate cache (e.g. between several engines)
    pub fn with_rate_cache(mut self, rates: Arc<RateCache>) -> Self {
        self.converter = Converter::new(rates);
        self
    }

    /// Read clipboard history from a history the host keeps filled
    pub fn with_clipboard(mut self, clipboard: SharedClipboard) -> Self {
        self.clipboard = clipboard;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn clipboard(&self) -> &SharedClipboard {
        &self.clipboard
    }

    pub fn rate_cache(&self) -> &Arc<RateCache> {
        self.converter.rate_cache()
    }

    /// Resolve a query into an ordered result list. Never fails; a branch
    /// that errors just contributes nothing.
    pub async fn resolve(&self, query: &str) -> Vec<ResultItem> {
        if let Some(city) = intent::weather_city(query, &self.config) {
            match self.weather.lookup(city).await {
                // Bypasses aliases, every other rule and the result cap
                Ok(report) => return vec![weather_item(report)],
                Err(e) => tracing::warn!(city, "Weather lookup failed: {}", e),
            }
        }

        let mut results = Vec::new();

        if let Some((key, commands)) = self.aliases.lookup(query) {
            results.push(ResultItem::new(
                format!("Alias: {}", key),
                format!("Runs {} actions", commands.len()),
                ResultPayload::Alias {
                    commands: commands.to_vec(),
                },
            ));
        }

        let intent = intent::classify(query, &self.config);
        results.extend(self.run_branch(intent, query).await);

        results.truncate(self.config.search.max_results as usize);
        results
    }

    async fn run_branch(&self, intent: Intent, query: &str) -> Vec<ResultItem> {
        match intent {
            Intent::ShellCommand { command } => {
                if command.is_empty() {
                    return Vec::new();
                }
                vec![ResultItem::new(
                    format!("Run: {}", command),
                    "Terminal command",
                    ResultPayload::Command {
                        command_line: command,
                    },
                )]
            }
            Intent::WebSearch { term } => {
                if term.is_empty() {
                    return Vec::new();
                }
                let url = self.config.search.web_search_url_for(&term);
                vec![ResultItem::new(
                    format!("Search the web: {}", term),
                    "Web search (Google)",
                    ResultPayload::Web { url },
                )]
            }
            Intent::SystemCommand(command) => vec![ResultItem::new(
                command.title(),
                format!("System command ({})", query.to_lowercase()),
                ResultPayload::SystemCommand {
                    command_line: command.command_line().to_string(),
                },
            )],
            Intent::Calculator { expression } => calculator::evaluate(&expression)
                .map(|value| {
                    ResultItem::new(
                        format!("= {}", calculator::format_result(value)),
                        "Calculation result",
                        ResultPayload::Calculator { value },
                    )
                })
                .into_iter()
                .collect(),
            Intent::ClipboardHistory => clipboard::snapshot(&self.clipboard)
                .into_iter()
                .map(|entry| {
                    let title = entry.preview(CLIPBOARD_PREVIEW_CHARS).to_string();
                    ResultItem::new(
                        title,
                        format!("Clipboard • {}", entry.time_ago()),
                        ResultPayload::Clipboard {
                            value: entry.content,
                        },
                    )
                })
                .collect(),
            Intent::Default => {
                if self.config.search.enable_converter {
                    if let Some(conversion) = self.converter.convert(query).await {
                        return vec![ResultItem::new(
                            conversion.display(),
                            conversion.description(),
                            ResultPayload::Calculator {
                                value: conversion.to_value,
                            },
                        )];
                    }
                }
                if query.is_empty() {
                    return Vec::new();
                }
                self.fan_out(query).await
            }
        }
    }

    /// Run every eligible source on a blocking worker, wait for all of them,
    /// then merge in registration order.
    async fn fan_out(&self, query: &str) -> Vec<ResultItem> {
        let pending: Vec<_> = self
            .sources
            .iter()
            .filter(|source| source.should_search(query))
            .map(|source| {
                let name = source.name();
                let limit = source.limit();
                let source = Arc::clone(source);
                let query = query.to_string();
                let handle = tokio::task::spawn_blocking(move || source.search(&query));
                (name, limit, handle)
            })
            .collect();

        let mut merged = Vec::new();
        for (name, limit, handle) in pending {
            match handle.await {
                Ok(items) => {
                    tracing::debug!(source = name, count = items.len(), "Source finished");
                    merged.extend(items.into_iter().take(limit));
                }
                Err(e) => tracing::warn!(source = name, "Source failed: {}", e),
            }
        }
        merged
    }

    /// Resolve an icon name to a file in the configured icon directories
    pub fn icon_path(&self, name: &str) -> Option<PathBuf> {
        icons::icon_path(name, &self.icon_dirs)
    }

    /// Refresh exchange rates in the background. Requires a tokio runtime.
    pub fn prefetch_rates(&self) -> tokio::task::JoinHandle<()> {
        let rates = Arc::clone(self.rate_cache());
        tokio::spawn(async move {
            if let Err(e) = rates.refresh().await {
                tracing::warn!("Exchange rate prefetch failed: {}", e);
            }
        })
    }
}

fn weather_item(report: WeatherReport) -> ResultItem {
    ResultItem::new(
        report.title(),
        report.description(),
        ResultPayload::Weather {
            temperature: format!("{}°C", report.temperature_c),
            feels_like: format!("{}°C", report.feels_like_c),
            humidity: format!("{}%", report.humidity),
            condition: report.condition,
        },
    )
}
