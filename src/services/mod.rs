//! Search providers and the evaluators behind each intent.

pub mod aliases;
pub mod app_index;
pub mod bookmarks;
pub mod calculator;
pub mod clipboard;
pub mod converter;
pub mod currency;
pub mod file_search;
pub mod format;
pub mod icons;
pub mod matcher;
pub mod system_commands;
pub mod units;
pub mod weather;
