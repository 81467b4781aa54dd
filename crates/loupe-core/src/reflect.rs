//! Reflection capabilities.
//!
//! [`Reflect`] classifies a value into a [`Kind`]. Container kinds hand the
//! renderer a capability object that walks their members in a stable order:
//!
//! - [`Sequence`]: elements in iteration order
//! - [`Mapping`]: key/value entries in the collection's own enumeration order
//! - [`FieldEnumerable`]: named fields in declaration order
//!
//! Walking is visitor-based rather than iterator-based so that values living
//! behind a guard (`RefCell`, `RwLock`) can be read while the guard is held.
//!
//! Pointer types (`&T`, `Box<T>`, `Rc<T>`, `Arc<T>`) are transparent: they
//! classify as their pointee, so every handle to one allocation shares one
//! [`Identity`].

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::{Arc, RwLock};

use crate::error::{RenderError, Result};
use crate::types::{Identity, Kind};

/// Visitor over sequence elements.
pub type ElementVisitor<'v> = dyn FnMut(&dyn Reflect) -> Result<()> + 'v;

/// Visitor over mapping entries (key, value).
pub type EntryVisitor<'v> = dyn FnMut(&dyn Reflect, &dyn Reflect) -> Result<()> + 'v;

/// Visitor over composite fields (name, value).
pub type FieldVisitor<'v> = dyn FnMut(&str, &dyn Reflect) -> Result<()> + 'v;

/// A value the renderer can classify.
///
/// Usually derived with `#[derive(Reflect)]`; implemented by hand for types
/// that need custom classification or fallible field access.
pub trait Reflect {
    /// Classify this value. Fails only when the value cannot be read at all.
    fn reflect(&self) -> Result<Kind<'_>>;
}

/// An ordered collection of values.
pub trait Sequence {
    /// Call `visit` once per element, in order. Stops at the first error.
    fn visit_elements(&self, visit: &mut ElementVisitor<'_>) -> Result<()>;

    /// Identity pushed onto the ancestor stack while elements render.
    fn identity(&self) -> Identity {
        Identity::of(self)
    }
}

/// A key/value collection.
pub trait Mapping {
    /// Call `visit` once per entry. Stops at the first error.
    fn visit_entries(&self, visit: &mut EntryVisitor<'_>) -> Result<()>;

    /// Identity pushed onto the ancestor stack while entries render.
    fn identity(&self) -> Identity {
        Identity::of(self)
    }
}

/// A record with a fixed set of named instance fields.
pub trait FieldEnumerable {
    /// Call `visit` once per field in declaration order. A field that cannot
    /// be read returns [`RenderError::FieldAccess`].
    fn visit_fields(&self, visit: &mut FieldVisitor<'_>) -> Result<()>;

    /// Identity used for cycle detection.
    fn identity(&self) -> Identity {
        Identity::of(self)
    }
}

// ---------------------------------------------------------------------------
// Transparent pointers
// ---------------------------------------------------------------------------

macro_rules! transparent_pointer {
    ($($ptr:ty),* $(,)?) => {
        $(
            impl<T: Reflect + ?Sized> Reflect for $ptr {
                fn reflect(&self) -> Result<Kind<'_>> {
                    (**self).reflect()
                }
            }
        )*
    };
}

transparent_pointer!(&T, &mut T, Box<T>, Rc<T>, Arc<T>);

// ---------------------------------------------------------------------------
// Guarded cells
// ---------------------------------------------------------------------------

/// Identity of the container held inside a guarded cell.
///
/// A composite reached through its cell and the same composite reached
/// directly (a root borrowed out of an `Rc<RefCell<_>>`, say) must compare
/// equal on the ancestor stack. The guarded value does not move while the
/// cell is alive, so its address is stable across borrows.
trait GuardedIdentity {
    fn guarded_identity(&self) -> Result<Option<Identity>>;

    fn inner_identity(&self) -> Identity {
        match self.guarded_identity() {
            Ok(Some(identity)) => identity,
            // Unreadable now; the walk that follows reports the failure.
            _ => Identity::of(self),
        }
    }
}

// Each access re-acquires the guard. The guard is held while members are
// visited, so a nested render may re-enter the same cell for reading.
macro_rules! guarded_cell {
    ($cell:ident, |$this:ident| $acquire:expr) => {
        impl<T: Reflect> GuardedIdentity for $cell<T> {
            fn guarded_identity(&self) -> Result<Option<Identity>> {
                let $this = self;
                let guard = $acquire;
                let kind = guard.reflect()?;
                let identity = kind.container_identity();
                Ok(identity)
            }
        }

        impl<T: Reflect> Reflect for $cell<T> {
            fn reflect(&self) -> Result<Kind<'_>> {
                let $this = self;
                let guard = $acquire;
                let kind = guard.reflect()?.detach(self);
                Ok(kind)
            }
        }

        impl<T: Reflect> Sequence for $cell<T> {
            fn visit_elements(&self, visit: &mut ElementVisitor<'_>) -> Result<()> {
                let $this = self;
                let guard = $acquire;
                let kind = guard.reflect()?;
                match kind {
                    Kind::Sequence(seq) => seq.visit_elements(visit),
                    other => Err(inconsistent("sequence", &other)),
                }
            }

            fn identity(&self) -> Identity {
                self.inner_identity()
            }
        }

        impl<T: Reflect> Mapping for $cell<T> {
            fn visit_entries(&self, visit: &mut EntryVisitor<'_>) -> Result<()> {
                let $this = self;
                let guard = $acquire;
                let kind = guard.reflect()?;
                match kind {
                    Kind::Mapping(map) => map.visit_entries(visit),
                    other => Err(inconsistent("mapping", &other)),
                }
            }

            fn identity(&self) -> Identity {
                self.inner_identity()
            }
        }

        impl<T: Reflect> FieldEnumerable for $cell<T> {
            fn visit_fields(&self, visit: &mut FieldVisitor<'_>) -> Result<()> {
                let $this = self;
                let guard = $acquire;
                let kind = guard.reflect()?;
                match kind {
                    Kind::Composite(obj) => obj.visit_fields(visit),
                    other => Err(inconsistent("composite", &other)),
                }
            }

            fn identity(&self) -> Identity {
                self.inner_identity()
            }
        }
    };
}

guarded_cell!(RefCell, |cell| cell.try_borrow()?);
guarded_cell!(RwLock, |lock| lock
    .try_read()
    .map_err(|e| RenderError::Lock(e.to_string()))?);

fn inconsistent(expected: &'static str, found: &Kind<'_>) -> RenderError {
    RenderError::Inconsistent {
        expected,
        found: found.name(),
    }
}
