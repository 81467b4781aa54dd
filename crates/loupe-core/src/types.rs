//! Value categories and identity tokens.
//!
//! Every value handed to the renderer is classified exactly once into a
//! [`Kind`]. The category set is closed: scalars carry their text, containers
//! carry a handle to the capability trait that walks their members.

use std::borrow::Cow;
use std::fmt;

use crate::reflect::{FieldEnumerable, Mapping, Sequence};

/// The category of a reflected value.
///
/// Variants are listed in classification priority. A type that could fit more
/// than one category (a string that is also iterable, say) picks the first one
/// in this order when implementing [`Reflect`](crate::Reflect).
pub enum Kind<'a> {
    /// Absence of a value. Rendered as bare `null`.
    Null,
    /// Text, rendered between double quotes without escaping.
    Text(Cow<'a, str>),
    /// A number in its canonical textual form, rendered unquoted.
    Number(String),
    /// Rendered as bare `true` / `false`.
    Boolean(bool),
    /// Enum-like or temporal value, rendered quoted through its textual form.
    Label(Cow<'a, str>),
    /// Ordered collection.
    Sequence(&'a dyn Sequence),
    /// Key/value collection.
    Mapping(&'a dyn Mapping),
    /// Record with named fields. The only category subject to the depth limit
    /// and cycle detection.
    Composite(&'a dyn FieldEnumerable),
}

impl<'a> Kind<'a> {
    /// Borrowed text.
    pub fn text(text: &'a str) -> Self {
        Kind::Text(Cow::Borrowed(text))
    }

    /// Number via its `Display` form.
    pub fn number(number: impl fmt::Display) -> Self {
        Kind::Number(number.to_string())
    }

    /// Label via its `Display` form.
    pub fn label(label: impl fmt::Display) -> Self {
        Kind::Label(Cow::Owned(label.to_string()))
    }

    /// Short category name, used in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Kind::Null => "null",
            Kind::Text(_) => "text",
            Kind::Number(_) => "number",
            Kind::Boolean(_) => "boolean",
            Kind::Label(_) => "label",
            Kind::Sequence(_) => "sequence",
            Kind::Mapping(_) => "mapping",
            Kind::Composite(_) => "composite",
        }
    }

    /// Identity of a container kind; `None` for scalars.
    pub(crate) fn container_identity(&self) -> Option<Identity> {
        match self {
            Kind::Sequence(seq) => Some(seq.identity()),
            Kind::Mapping(map) => Some(map.identity()),
            Kind::Composite(obj) => Some(obj.identity()),
            _ => None,
        }
    }

    /// Re-home a kind that was classified through a guard (a `RefCell` borrow,
    /// a read lock) onto the guarded cell itself.
    ///
    /// Scalars are copied out of the guard. Containers point at `cell`, which
    /// re-acquires the guard whenever its members are walked and reports the
    /// identity of the guarded value, not of the cell.
    pub(crate) fn detach<'b, C>(self, cell: &'b C) -> Kind<'b>
    where
        C: Sequence + Mapping + FieldEnumerable,
    {
        match self {
            Kind::Null => Kind::Null,
            Kind::Text(text) => Kind::Text(Cow::Owned(text.into_owned())),
            Kind::Number(number) => Kind::Number(number),
            Kind::Boolean(b) => Kind::Boolean(b),
            Kind::Label(label) => Kind::Label(Cow::Owned(label.into_owned())),
            Kind::Sequence(_) => Kind::Sequence(cell),
            Kind::Mapping(_) => Kind::Mapping(cell),
            Kind::Composite(_) => Kind::Composite(cell),
        }
    }
}

impl fmt::Debug for Kind<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Null => f.write_str("Null"),
            Kind::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Kind::Number(number) => f.debug_tuple("Number").field(number).finish(),
            Kind::Boolean(b) => f.debug_tuple("Boolean").field(b).finish(),
            Kind::Label(label) => f.debug_tuple("Label").field(label).finish(),
            Kind::Sequence(seq) => f.debug_tuple("Sequence").field(&seq.identity()).finish(),
            Kind::Mapping(map) => f.debug_tuple("Mapping").field(&map.identity()).finish(),
            Kind::Composite(obj) => f.debug_tuple("Composite").field(&obj.identity()).finish(),
        }
    }
}

/// Reference identity of a container value.
///
/// Two identities are equal only when they denote the same place in memory
/// *and* the same type. The type half keeps a struct apart from a field stored
/// at offset zero inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Identity {
    addr: usize,
    type_name: &'static str,
}

impl Identity {
    /// Identity of the value behind `value`.
    pub fn of<T: ?Sized>(value: &T) -> Self {
        Self {
            addr: (value as *const T).cast::<()>() as usize,
            type_name: std::any::type_name::<T>(),
        }
    }

    /// Address part of the identity.
    pub fn addr(&self) -> usize {
        self.addr
    }

    /// Type part of the identity.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}
