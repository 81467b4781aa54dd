//! `Reflect` for standard library types.

use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, LinkedList, VecDeque};
use std::num::{
    NonZeroI128, NonZeroI16, NonZeroI32, NonZeroI64, NonZeroI8, NonZeroIsize, NonZeroU128,
    NonZeroU16, NonZeroU32, NonZeroU64, NonZeroU8, NonZeroUsize,
};

use crate::error::Result;
use crate::reflect::{ElementVisitor, EntryVisitor, Mapping, Reflect, Sequence};
use crate::types::{Identity, Kind};

// ---------------------------------------------------------------------------
// Scalars
// ---------------------------------------------------------------------------

impl Reflect for str {
    fn reflect(&self) -> Result<Kind<'_>> {
        Ok(Kind::text(self))
    }
}

impl Reflect for String {
    fn reflect(&self) -> Result<Kind<'_>> {
        Ok(Kind::text(self))
    }
}

impl Reflect for Cow<'_, str> {
    fn reflect(&self) -> Result<Kind<'_>> {
        Ok(Kind::text(self))
    }
}

impl Reflect for char {
    fn reflect(&self) -> Result<Kind<'_>> {
        Ok(Kind::Text(Cow::Owned(self.to_string())))
    }
}

impl Reflect for bool {
    fn reflect(&self) -> Result<Kind<'_>> {
        Ok(Kind::Boolean(*self))
    }
}

macro_rules! number {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Reflect for $ty {
                fn reflect(&self) -> Result<Kind<'_>> {
                    Ok(Kind::number(self))
                }
            }
        )*
    };
}

number!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);
number!(
    NonZeroI8,
    NonZeroI16,
    NonZeroI32,
    NonZeroI64,
    NonZeroI128,
    NonZeroIsize,
    NonZeroU8,
    NonZeroU16,
    NonZeroU32,
    NonZeroU64,
    NonZeroU128,
    NonZeroUsize,
);

impl Reflect for () {
    fn reflect(&self) -> Result<Kind<'_>> {
        Ok(Kind::Null)
    }
}

impl<T: Reflect> Reflect for Option<T> {
    fn reflect(&self) -> Result<Kind<'_>> {
        match self {
            Some(value) => value.reflect(),
            None => Ok(Kind::Null),
        }
    }
}

// ---------------------------------------------------------------------------
// Sequences
// ---------------------------------------------------------------------------

macro_rules! sequence {
    ($($ty:ty $(, $extra:ident)*;)*) => {
        $(
            impl<T: Reflect $(, $extra)*> Reflect for $ty {
                fn reflect(&self) -> Result<Kind<'_>> {
                    Ok(Kind::Sequence(self))
                }
            }

            impl<T: Reflect $(, $extra)*> Sequence for $ty {
                fn visit_elements(&self, visit: &mut ElementVisitor<'_>) -> Result<()> {
                    for element in self.iter() {
                        visit(element)?;
                    }
                    Ok(())
                }
            }
        )*
    };
}

sequence! {
    Vec<T>;
    VecDeque<T>;
    LinkedList<T>;
    HashSet<T, S>, S;
    BTreeSet<T>;
}

impl<T: Reflect> Sequence for [T] {
    fn visit_elements(&self, visit: &mut ElementVisitor<'_>) -> Result<()> {
        for element in self {
            visit(element)?;
        }
        Ok(())
    }
}

// Unsized slices cannot become trait objects, so a borrowed slice reflects
// through the reference. Its identity is still the slice data.
impl<T: Reflect> Reflect for &[T] {
    fn reflect(&self) -> Result<Kind<'_>> {
        Ok(Kind::Sequence(self))
    }
}

impl<T: Reflect> Sequence for &[T] {
    fn visit_elements(&self, visit: &mut ElementVisitor<'_>) -> Result<()> {
        (**self).visit_elements(visit)
    }

    fn identity(&self) -> Identity {
        Identity::of(*self)
    }
}

impl<T: Reflect, const N: usize> Reflect for [T; N] {
    fn reflect(&self) -> Result<Kind<'_>> {
        Ok(Kind::Sequence(self))
    }
}

impl<T: Reflect, const N: usize> Sequence for [T; N] {
    fn visit_elements(&self, visit: &mut ElementVisitor<'_>) -> Result<()> {
        self.as_slice().visit_elements(visit)
    }
}

// ---------------------------------------------------------------------------
// Mappings
// ---------------------------------------------------------------------------

impl<K: Reflect, V: Reflect, S> Reflect for HashMap<K, V, S> {
    fn reflect(&self) -> Result<Kind<'_>> {
        Ok(Kind::Mapping(self))
    }
}

impl<K: Reflect, V: Reflect, S> Mapping for HashMap<K, V, S> {
    fn visit_entries(&self, visit: &mut EntryVisitor<'_>) -> Result<()> {
        for (key, value) in self {
            visit(key, value)?;
        }
        Ok(())
    }
}

impl<K: Reflect, V: Reflect> Reflect for BTreeMap<K, V> {
    fn reflect(&self) -> Result<Kind<'_>> {
        Ok(Kind::Mapping(self))
    }
}

impl<K: Reflect, V: Reflect> Mapping for BTreeMap<K, V> {
    fn visit_entries(&self, visit: &mut EntryVisitor<'_>) -> Result<()> {
        for (key, value) in self {
            visit(key, value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_of(value: &dyn Reflect) -> String {
        match value.reflect().unwrap() {
            Kind::Text(t) => t.into_owned(),
            Kind::Number(n) => n,
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn char_is_text() {
        assert_eq!(text_of(&'x'), "x");
    }

    #[test]
    fn float_uses_display_form() {
        assert_eq!(text_of(&1.5f64), "1.5");
        assert_eq!(text_of(&-3i32), "-3");
    }

    #[test]
    fn nonzero_is_number() {
        let n = NonZeroU32::new(9).unwrap();
        assert_eq!(text_of(&n), "9");
    }

    #[test]
    fn option_none_is_null() {
        let none: Option<u8> = None;
        assert!(matches!(none.reflect().unwrap(), Kind::Null));
    }

    #[test]
    fn array_visits_in_order() {
        let arr = [3u8, 1, 2];
        let mut seen = Vec::new();
        arr.visit_elements(&mut |e| {
            seen.push(text_of(e));
            Ok(())
        })
        .unwrap();
        assert_eq!(seen, vec!["3", "1", "2"]);
    }

    #[test]
    fn borrowed_slice_identity_is_the_data() {
        let data = vec![1u8, 2];
        let slice: &[u8] = &data;
        let Kind::Sequence(seq) = slice.reflect().unwrap() else {
            panic!("expected sequence");
        };
        assert_eq!(seq.identity().addr(), data.as_ptr() as usize);
    }
}
