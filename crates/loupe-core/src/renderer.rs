//! Renderer: walks an object graph and produces JSON-like debug text.
//!
//! Output is meant for logs, not for parsers:
//!
//! - **No escaping**: text is emitted between quotes exactly as stored
//! - **Sequences** as `[e1, e2]`, **mappings** as `{k:v, k:v}` with keys
//!   rendered by their own category, **composites** as `{"field":v}`
//! - **Sentinels**: `"omit"` for composites past the depth limit,
//!   `"circular"` for composites already on the current path, and a bare
//!   `error` for the whole call when any value could not be read
//!
//! Depth limiting and cycle detection apply to composites only. Sequences and
//! mappings are always walked in full, however deep they nest.
//!
//! # Example
//! ```
//! use loupe_core::{render, Reflect};
//!
//! #[derive(Reflect)]
//! struct Product {
//!     no: u64,
//!     name: String,
//! }
//!
//! let p = Product { no: 1, name: "product1".into() };
//! assert_eq!(render(&p), r#"{"no":1, "name":"product1"}"#);
//! ```

use crate::error::Result;
use crate::options::RenderOptions;
use crate::reflect::{FieldEnumerable, Mapping, Reflect, Sequence};
use crate::sink::{FailureSink, TracingSink};
use crate::types::{Identity, Kind};

const KEY_VALUE_DELIMITER: &str = ":";
const MEMBER_DELIMITER: &str = ", ";
const QUOTE: char = '"';
const SEQUENCE_START: char = '[';
const SEQUENCE_END: char = ']';
const MAPPING_START: char = '{';
const MAPPING_END: char = '}';
const COMPOSITE_START: char = '{';
const COMPOSITE_END: char = '}';

/// Returned in place of the whole output when any value fails to read.
pub const KEYWORD_ERROR: &str = "error";
const KEYWORD_NULL: &str = "null";
const KEYWORD_OMIT: &str = "omit";
const KEYWORD_CIRCULAR: &str = "circular";

/// Render `value` with the default depth limit, logging failures through
/// `tracing`.
pub fn render<T: Reflect + ?Sized>(value: &T) -> String {
    Renderer::new().render(value)
}

/// Render `value` with an explicit composite depth limit.
pub fn render_with_depth<T: Reflect + ?Sized>(value: &T, max_depth: usize) -> String {
    Renderer::new().max_depth(max_depth).render(value)
}

/// Configured renderer. Holds no per-call state; one instance can serve any
/// number of calls.
#[derive(Debug, Clone, Default)]
pub struct Renderer<S = TracingSink> {
    options: RenderOptions,
    sink: S,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: RenderOptions) -> Self {
        Self {
            options,
            sink: TracingSink,
        }
    }
}

impl<S: FailureSink> Renderer<S> {
    /// Replace the failure sink.
    pub fn with_sink<T: FailureSink>(self, sink: T) -> Renderer<T> {
        Renderer {
            options: self.options,
            sink,
        }
    }

    /// Set the composite depth limit.
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.options.max_depth = max_depth;
        self
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render `value`. Never fails: if any value in the graph cannot be read,
    /// the failure is reported to the sink and the result is `error`.
    pub fn render<T: Reflect + ?Sized>(&self, value: &T) -> String {
        match self.try_render(value) {
            Ok(text) => text,
            Err(err) => {
                self.sink.report_failure(&format!("render error. {}", err));
                KEYWORD_ERROR.to_string()
            }
        }
    }

    /// Render `value`, returning the read failure instead of the `error`
    /// sentinel. Nothing is reported to the sink.
    pub fn try_render<T: Reflect + ?Sized>(&self, value: &T) -> Result<String> {
        let mut ancestors = Vec::new();
        let mut out = String::new();
        render_inner(value, &mut ancestors, self.options.max_depth, 0, &mut out)?;
        Ok(out)
    }
}

/// Classify `value` and append its rendering to `out`.
///
/// `ancestors` holds the identities of the containers on the current path.
/// Every push is matched by a pop once the child returns, so the stack is
/// balanced again when this returns `Ok`.
fn render_inner<T: Reflect + ?Sized>(
    value: &T,
    ancestors: &mut Vec<Identity>,
    max_depth: usize,
    depth: usize,
    out: &mut String,
) -> Result<()> {
    match value.reflect()? {
        Kind::Null => out.push_str(KEYWORD_NULL),
        Kind::Text(text) => push_quoted(&text, out),
        Kind::Number(number) => out.push_str(&number),
        Kind::Boolean(b) => out.push_str(if b { "true" } else { "false" }),
        Kind::Label(label) => push_quoted(&label, out),
        Kind::Sequence(seq) => {
            let identity = seq.identity();
            out.push(SEQUENCE_START);
            let mut first = true;
            seq.visit_elements(&mut |element| {
                if !first {
                    out.push_str(MEMBER_DELIMITER);
                }
                first = false;
                descend(element, identity, ancestors, max_depth, depth, out)
            })?;
            out.push(SEQUENCE_END);
        }
        Kind::Mapping(map) => {
            let identity = map.identity();
            out.push(MAPPING_START);
            let mut first = true;
            map.visit_entries(&mut |key, value| {
                if !first {
                    out.push_str(MEMBER_DELIMITER);
                }
                first = false;
                descend(key, identity, ancestors, max_depth, depth, out)?;
                out.push_str(KEY_VALUE_DELIMITER);
                descend(value, identity, ancestors, max_depth, depth, out)
            })?;
            out.push(MAPPING_END);
        }
        Kind::Composite(_) if depth > max_depth => push_quoted(KEYWORD_OMIT, out),
        Kind::Composite(obj) if ancestors.contains(&obj.identity()) => {
            push_quoted(KEYWORD_CIRCULAR, out)
        }
        Kind::Composite(obj) => {
            let identity = obj.identity();
            out.push(COMPOSITE_START);
            let mut first = true;
            obj.visit_fields(&mut |name, value| {
                if !first {
                    out.push_str(MEMBER_DELIMITER);
                }
                first = false;
                push_quoted(name, out);
                out.push_str(KEY_VALUE_DELIMITER);
                descend(value, identity, ancestors, max_depth, depth, out)
            })?;
            out.push(COMPOSITE_END);
        }
    }
    Ok(())
}

/// Render one member one level down with its container pushed as ancestor.
fn descend(
    child: &dyn Reflect,
    container: Identity,
    ancestors: &mut Vec<Identity>,
    max_depth: usize,
    depth: usize,
    out: &mut String,
) -> Result<()> {
    ancestors.push(container);
    let result = render_inner(child, ancestors, max_depth, depth + 1, out);
    ancestors.pop();
    result
}

/// Wrap text in double quotes. Embedded quotes and control characters are
/// left as they are.
fn push_quoted(text: &str, out: &mut String) {
    out.push(QUOTE);
    out.push_str(text);
    out.push(QUOTE);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RenderError;
    use crate::reflect::FieldVisitor;
    use std::cell::RefCell;

    struct Pair {
        left: u8,
        right: &'static str,
    }

    impl Reflect for Pair {
        fn reflect(&self) -> Result<Kind<'_>> {
            Ok(Kind::Composite(self))
        }
    }

    impl FieldEnumerable for Pair {
        fn visit_fields(&self, visit: &mut FieldVisitor<'_>) -> Result<()> {
            visit("left", &self.left)?;
            visit("right", &self.right)
        }
    }

    struct Sealed;

    impl Reflect for Sealed {
        fn reflect(&self) -> Result<Kind<'_>> {
            Ok(Kind::Composite(self))
        }
    }

    impl FieldEnumerable for Sealed {
        fn visit_fields(&self, _visit: &mut FieldVisitor<'_>) -> Result<()> {
            Err(RenderError::field_access("secret", "access denied"))
        }
    }

    #[derive(Default)]
    struct Recorder(RefCell<Vec<String>>);

    impl FailureSink for Recorder {
        fn report_failure(&self, message: &str) {
            self.0.borrow_mut().push(message.to_string());
        }
    }

    #[test]
    fn hand_written_composite() {
        let p = Pair { left: 1, right: "r" };
        assert_eq!(render(&p), r#"{"left":1, "right":"r"}"#);
    }

    #[test]
    fn failure_reports_and_returns_error() {
        let recorder = Recorder::default();
        let renderer = Renderer::new().with_sink(&recorder);
        assert_eq!(renderer.render(&vec![Sealed]), "error");
        let messages = recorder.0.borrow();
        assert_eq!(messages.len(), 1);
        assert_eq!(
            messages[0],
            "render error. cannot read field `secret`: access denied"
        );
    }

    #[test]
    fn try_render_surfaces_error() {
        let err = Renderer::new().try_render(&Sealed).unwrap_err();
        assert!(matches!(err, RenderError::FieldAccess { .. }));
    }

    #[test]
    fn omitted_composite_is_not_read() {
        // Sealed fails when read; past the limit it must not be touched.
        let renderer = Renderer::new().max_depth(0);
        assert_eq!(renderer.render(&vec![Sealed]), r#"["omit"]"#);
    }

    #[test]
    fn ancestors_balanced_after_render() {
        let mut ancestors = Vec::new();
        let mut out = String::new();
        let value = vec![vec![Pair { left: 2, right: "x" }]];
        render_inner(&value, &mut ancestors, 3, 0, &mut out).unwrap();
        assert!(ancestors.is_empty());
        assert_eq!(out, r#"[[{"left":2, "right":"x"}]]"#);
    }

    #[test]
    fn options_default_depth() {
        assert_eq!(Renderer::new().options().max_depth, 3);
        assert_eq!(Renderer::new().max_depth(9).options().max_depth, 9);
    }
}
