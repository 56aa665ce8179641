//! The wish entity and the value sets used to create and edit it.
//!
//! - [`Wish`] is the stored record.
//! - [`WishDraft`] is the full set of mutable values, as a form produces them.
//! - [`WishPatch`] is a partial update; `None` fields are left alone.

use serde::{Deserialize, Serialize};

use crate::id::WishId;

/// A single wishlist entry.
///
/// `name` and `comment` default to empty strings when absent from input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wish {
    pub id: WishId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub comment: String,
}

impl Wish {
    /// Builds a wish from a pre-assigned id and a set of values.
    pub fn new(id: WishId, draft: WishDraft) -> Self {
        Wish {
            id,
            name: draft.name,
            comment: draft.comment,
        }
    }

    /// The mutable values of this wish, e.g. to seed an edit form.
    pub fn draft(&self) -> WishDraft {
        WishDraft {
            name: self.name.clone(),
            comment: self.comment.clone(),
        }
    }

    /// Replaces the fields present in `patch`. The id never changes.
    pub fn apply(&mut self, patch: WishPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(comment) = patch.comment {
            self.comment = comment;
        }
    }
}

/// Full set of mutable wish values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WishDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub comment: String,
}

impl WishDraft {
    pub fn new(name: impl Into<String>, comment: impl Into<String>) -> Self {
        WishDraft {
            name: name.into(),
            comment: comment.into(),
        }
    }
}

/// Partial update of a wish.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WishPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl WishPatch {
    pub fn name(name: impl Into<String>) -> Self {
        WishPatch {
            name: Some(name.into()),
            comment: None,
        }
    }

    pub fn comment(comment: impl Into<String>) -> Self {
        WishPatch {
            name: None,
            comment: Some(comment.into()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.comment.is_none()
    }
}

// A draft replaces every field.
impl From<WishDraft> for WishPatch {
    fn from(draft: WishDraft) -> Self {
        WishPatch {
            name: Some(draft.name),
            comment: Some(draft.comment),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sample() -> Wish {
        Wish::new(WishId::new(), WishDraft::new("PS5", "Not used yet"))
    }

    #[test]
    fn draft_reflects_fields() {
        let wish = sample();
        assert_eq!(wish.draft(), WishDraft::new("PS5", "Not used yet"));
    }

    #[test]
    fn partial_patch_leaves_other_field() {
        let mut wish = sample();
        let id = wish.id;
        wish.apply(WishPatch::comment("boxed"));
        assert_eq!(wish.id, id);
        assert_eq!(wish.name, "PS5");
        assert_eq!(wish.comment, "boxed");
    }

    #[test]
    fn draft_patch_replaces_both_fields() {
        let mut wish = sample();
        wish.apply(WishDraft::new("Mac-mini", "").into());
        assert_eq!(wish.name, "Mac-mini");
        assert_eq!(wish.comment, "");
    }

    #[test]
    fn empty_patch_is_noop() {
        let mut wish = sample();
        let before = wish.clone();
        let patch = WishPatch::default();
        assert!(patch.is_empty());
        wish.apply(patch);
        assert_eq!(wish, before);
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let id = WishId::new();
        let json = serde_json::json!({ "id": id.to_string() });
        let wish: Wish = serde_json::from_value(json).unwrap();
        assert_eq!(wish.id, id);
        assert_eq!(wish.name, "");
        assert_eq!(wish.comment, "");
    }

    proptest! {
        #[test]
        fn apply_never_changes_identity(
            name in proptest::option::of(".{0,16}"),
            comment in proptest::option::of(".{0,16}"),
        ) {
            let mut wish = sample();
            let id = wish.id;
            let before = wish.clone();
            wish.apply(WishPatch { name: name.clone(), comment: comment.clone() });
            prop_assert_eq!(wish.id, id);
            prop_assert_eq!(wish.name, name.unwrap_or(before.name));
            prop_assert_eq!(wish.comment, comment.unwrap_or(before.comment));
        }
    }
}
