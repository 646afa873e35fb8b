// Copyright 2026 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Anchor references and their resolution.
//!
//! An [`AnchorRef`] is decided once, where the host receives it: a concrete
//! element, an element id, a virtual element, or the element slotted into the
//! host's `anchor` slot. [`resolve`] turns it into a [`ResolvedAnchor`]
//! against an [`AnchorScope`], which abstracts the host's root node and slot.
//!
//! `E` is the backend's element handle and `V` its virtual element type.

use alloc::string::String;

/// How the host refers to its anchor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AnchorRef<E, V> {
    /// A concrete element.
    Element(E),
    /// An element id, looked up in the host's root node.
    Id(String),
    /// A virtual element such as a cursor position.
    Virtual(V),
    /// Whatever is assigned to the host's `anchor` slot.
    Slotted,
}

impl<E, V> Default for AnchorRef<E, V> {
    fn default() -> Self {
        Self::Slotted
    }
}

impl<E, V> AnchorRef<E, V> {
    /// Returns which kind of reference this is.
    #[must_use]
    pub fn kind(&self) -> AnchorKind {
        match self {
            Self::Element(_) => AnchorKind::Element,
            Self::Id(_) => AnchorKind::Id,
            Self::Virtual(_) => AnchorKind::Virtual,
            Self::Slotted => AnchorKind::Slotted,
        }
    }
}

/// The discriminant of an [`AnchorRef`], for diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnchorKind {
    /// [`AnchorRef::Element`]
    Element,
    /// [`AnchorRef::Id`]
    Id,
    /// [`AnchorRef::Virtual`]
    Virtual,
    /// [`AnchorRef::Slotted`]
    Slotted,
}

/// A concrete positioning source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResolvedAnchor<E, V> {
    /// A live element.
    Element(E),
    /// A virtual element.
    Virtual(V),
}

/// The first element assigned to the host's anchor slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SlotContent<E> {
    /// An ordinary element.
    Element(E),
    /// A `<slot>` forwarded from an outer tree, with its own first assigned
    /// element.
    Slot(Option<E>),
}

/// Lookup services the host's root node provides to [`resolve`].
pub trait AnchorScope {
    /// Element handle.
    type Element: Clone;
    /// Virtual element handle.
    type Virtual: Clone;

    /// Finds an element by id in the host's root node (document or shadow
    /// root).
    fn element_by_id(&self, id: &str) -> Option<Self::Element>;

    /// Returns the first element assigned to the host's `anchor` slot.
    fn slotted_anchor(&self) -> Option<SlotContent<Self::Element>>;
}

/// Resolves `anchor` against `scope`.
///
/// A missing id, an empty slot or an empty nested slot resolve to `None`;
/// none of them is an error.
pub fn resolve<S: AnchorScope>(
    anchor: &AnchorRef<S::Element, S::Virtual>,
    scope: &S,
) -> Option<ResolvedAnchor<S::Element, S::Virtual>> {
    match anchor {
        AnchorRef::Element(e) => Some(ResolvedAnchor::Element(e.clone())),
        AnchorRef::Virtual(v) => Some(ResolvedAnchor::Virtual(v.clone())),
        AnchorRef::Id(id) => scope.element_by_id(id).map(ResolvedAnchor::Element),
        AnchorRef::Slotted => match scope.slotted_anchor()? {
            SlotContent::Element(e) => Some(ResolvedAnchor::Element(e)),
            SlotContent::Slot(inner) => inner.map(ResolvedAnchor::Element),
        },
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;

    struct Scope {
        ids: Vec<(&'static str, u32)>,
        slot: Option<SlotContent<u32>>,
    }

    impl AnchorScope for Scope {
        type Element = u32;
        type Virtual = (f64, f64);

        fn element_by_id(&self, id: &str) -> Option<u32> {
            self.ids.iter().find(|(k, _)| *k == id).map(|(_, v)| *v)
        }

        fn slotted_anchor(&self) -> Option<SlotContent<u32>> {
            self.slot.clone()
        }
    }

    fn scope(slot: Option<SlotContent<u32>>) -> Scope {
        Scope {
            ids: alloc::vec![("trigger", 7)],
            slot,
        }
    }

    #[test]
    fn id_lookup() {
        let s = scope(None);
        assert_eq!(
            resolve(&AnchorRef::Id("trigger".into()), &s),
            Some(ResolvedAnchor::Element(7))
        );
        assert_eq!(resolve(&AnchorRef::Id("missing".into()), &s), None);
    }

    #[test]
    fn direct_references_pass_through() {
        let s = scope(None);
        assert_eq!(
            resolve(&AnchorRef::Element(3), &s),
            Some(ResolvedAnchor::Element(3))
        );
        assert_eq!(
            resolve(&AnchorRef::Virtual((1.0, 2.0)), &s),
            Some(ResolvedAnchor::Virtual((1.0, 2.0)))
        );
    }

    #[test]
    fn slotted_anchor_and_nested_slots() {
        let plain = scope(Some(SlotContent::Element(11)));
        assert_eq!(
            resolve(&AnchorRef::Slotted, &plain),
            Some(ResolvedAnchor::Element(11))
        );

        let nested = scope(Some(SlotContent::Slot(Some(12))));
        assert_eq!(
            resolve(&AnchorRef::Slotted, &nested),
            Some(ResolvedAnchor::Element(12))
        );

        let empty_nested = scope(Some(SlotContent::Slot(None)));
        assert_eq!(resolve(&AnchorRef::Slotted, &empty_nested), None);
        assert_eq!(resolve(&AnchorRef::Slotted, &scope(None)), None);
    }

    #[test]
    fn default_is_slotted() {
        let anchor: AnchorRef<u32, ()> = AnchorRef::default();
        assert_eq!(anchor.kind(), AnchorKind::Slotted);
    }
}
