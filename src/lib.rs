//! Lumen - query resolution for a keyboard-driven launcher.
//!
//! Lumen turns one line of free-form input into a ranked list of actionable
//! results drawn from installed applications, browser bookmarks, the user's
//! top-level folders, clipboard history, a calculator, a unit and currency
//! converter, system actions, user aliases and a weather lookup.
//!
//! # Architecture
//!
//! - [`config`] - Configuration loading and management
//! - [`core`] - Result types, intent classifier and the [`QueryEngine`]
//! - [`services`] - Sources and evaluators (apps, bookmarks, files, ...)
//! - [`executor`] - Mapping results to actions and running them
//! - [`platform`] - OS operations behind the executor (Linux)
//!
//! # Example
//!
//! ```no_run
//! # async fn run() -> lumen::LumenResult<()> {
//! let engine = lumen::QueryEngine::new(lumen::Config::load())?;
//! for item in engine.resolve("10 km to mi").await {
//!     println!("{} - {}", item.title, item.description);
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod core;
pub mod executor;
pub mod platform;
pub mod search;
pub mod services;

mod error;

pub use config::Config;
pub use self::core::{QueryEngine, ResultItem, ResultKind, ResultPayload};
pub use error::{LumenError, LumenResult};
pub use executor::ExecutionAction;
