/// A position within the full content sequence, counting comments,
/// directives, processing instructions and text as well as elements.
///
/// Obtain one from [`Element::child_index`](crate::Element::child_index),
/// [`Content::elements_with_true_index`](crate::Content::elements_with_true_index)
/// or [`Content::true_index_of`](crate::Content::true_index_of). Index-taking
/// mutations only accept this type.
///
/// No index stays valid across a structural mutation of the same content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrueIndex(usize);

impl TrueIndex {
    #[inline]
    pub const fn new(index: usize) -> Self {
        TrueIndex(index)
    }

    #[inline]
    pub const fn get(self) -> usize {
        self.0
    }
}

/// A position within the element-only view of a content sequence, as
/// produced by [`Content::elements`](crate::Content::elements).
///
/// It can be turned into a [`TrueIndex`] with
/// [`Content::true_index_of`](crate::Content::true_index_of).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FilteredIndex(usize);

impl FilteredIndex {
    #[inline]
    pub const fn new(index: usize) -> Self {
        FilteredIndex(index)
    }

    #[inline]
    pub const fn get(self) -> usize {
        self.0
    }
}
