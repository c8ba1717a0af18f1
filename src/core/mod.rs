//! Core engine module - platform-agnostic query resolution.
//!
//! - Result types returned to hosts
//! - Intent classification (fixed rule precedence)
//! - The query engine: weather, aliases, branches and the source fan-out

pub mod intent;
pub mod result;
pub mod search;

pub use intent::{classify, Intent};
pub use result::{ResultItem, ResultKind, ResultPayload};
pub use search::QueryEngine;
