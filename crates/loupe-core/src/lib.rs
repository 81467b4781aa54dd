//! # loupe-core
//!
//! Reflection-driven debug renderer: turns an arbitrary in-memory object graph
//! of unknown, possibly self-referential shape into JSON-like text for logs.
//!
//! The output is deliberately *not* strict JSON. Text is quoted but never
//! escaped, mapping keys render by their own type, and three sentinels mark
//! places where rendering stopped:
//!
//! - `"omit"`: a composite nested deeper than the depth limit
//! - `"circular"`: a composite that is already one of its own ancestors
//! - `error`: replaces the *whole* output when any value could not be read
//!
//! ## Quick start
//!
//! ```rust
//! use std::collections::BTreeMap;
//! use loupe_core::{render, Reflect};
//!
//! #[derive(Reflect)]
//! struct Order {
//!     id: u32,
//!     tags: Vec<&'static str>,
//!     qty: BTreeMap<u8, bool>,
//! }
//!
//! let order = Order { id: 7, tags: vec!["rush"], qty: BTreeMap::from([(1, true)]) };
//! assert_eq!(render(&order), r#"{"id":7, "tags":["rush"], "qty":{1:true}}"#);
//! ```
//!
//! ## Modules
//!
//! - [`renderer`]: the traversal, `render` / `render_with_depth`, `Renderer`
//! - [`reflect`]: capability traits: `Reflect`, `Sequence`, `Mapping`, `FieldEnumerable`
//! - [`types`]: `Kind` classification and `Identity` tokens
//! - [`options`]: `RenderOptions` (serde-loadable)
//! - [`sink`]: failure reporting (`TracingSink`, `NullSink`)
//! - [`error`]: read failures

pub mod error;
mod external;
mod impls;
pub mod options;
pub mod reflect;
pub mod renderer;
pub mod sink;
pub mod types;

pub use error::{RenderError, Result};
pub use options::{RenderOptions, DEFAULT_MAX_DEPTH};
pub use reflect::{FieldEnumerable, Mapping, Reflect, Sequence};
pub use renderer::{render, render_with_depth, Renderer, KEYWORD_ERROR};
pub use sink::{FailureSink, NullSink, TracingSink};
pub use types::{Identity, Kind};

#[cfg(feature = "derive")]
pub use loupe_derive::Reflect;
