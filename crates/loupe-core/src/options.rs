//! Renderer configuration.

use serde::{Deserialize, Serialize};

/// Composite nesting depth rendered when no limit is given.
pub const DEFAULT_MAX_DEPTH: usize = 3;

/// Options controlling a [`Renderer`](crate::Renderer).
///
/// Deserializable so it can sit inside a host application's own config;
/// missing fields take their defaults.
///
/// ```
/// use loupe_core::RenderOptions;
///
/// let opts: RenderOptions = serde_json::from_str(r#"{"max_depth": 5}"#).unwrap();
/// assert_eq!(opts.max_depth, 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Composites deeper than this render as `"omit"`. The root is depth 0.
    /// Sequences and mappings are never cut off.
    pub max_depth: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl RenderOptions {
    /// Options with an explicit depth limit.
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth }
    }
}
