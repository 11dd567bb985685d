//! # Variant Identity
//!
//! Decides whether two cart lines are the same purchasable thing.
//!
//! ## Identity Rule
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Same slot  ⇔  id equal                                                 │
//! │             ∧  norm(effective size)  equal                              │
//! │             ∧  norm(effective color) equal                              │
//! │                                                                         │
//! │  effective size  = selectedSize ?? size                                 │
//! │  effective color = selectedColor ?? color                               │
//! │  norm(x)         = x ?? ""                                              │
//! │                                                                         │
//! │  (p1, None, None)     ≡ (p1, Some(""), None)    absent == empty         │
//! │  (p1, Some("M"), _)   ≢ (p1, None, _)           sized != unsized        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::LineItem;

/// Collapses an absent discriminator to the empty string.
#[inline]
pub fn norm(value: Option<&str>) -> &str {
    value.unwrap_or("")
}

/// A variant as callers name it: product id plus already-resolved size and
/// color.
///
/// This is the payload of `REMOVE_ITEM` and the identity half of
/// `UPDATE_QUANTITY`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct VariantRef {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub size: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub color: Option<String>,
}

impl VariantRef {
    /// Creates a reference to the unsized, colorless variant of a product.
    pub fn new(id: impl Into<String>) -> Self {
        VariantRef {
            id: id.into(),
            size: None,
            color: None,
        }
    }

    /// Sets the size.
    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }

    /// Sets the color.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Returns true if both references name the same slot.
    pub fn same_as(&self, other: &VariantRef) -> bool {
        self.id == other.id
            && norm(self.size.as_deref()) == norm(other.size.as_deref())
            && norm(self.color.as_deref()) == norm(other.color.as_deref())
    }

    /// Key used to identify a rendered cart row.
    ///
    /// ## Example
    /// ```rust
    /// use atelier_core::variant::VariantRef;
    ///
    /// assert_eq!(VariantRef::new("p1").with_size("M").row_key(), "p1-M-nocolor");
    /// ```
    pub fn row_key(&self) -> String {
        let size = norm(self.size.as_deref());
        let color = norm(self.color.as_deref());
        format!(
            "{}-{}-{}",
            self.id,
            if size.is_empty() { "nosize" } else { size },
            if color.is_empty() { "nocolor" } else { color }
        )
    }
}

/// Returns true if `item` occupies the slot `candidate` names.
///
/// `candidate` must already carry effective values; `item`'s own effective
/// values are resolved here.
pub fn is_same_variant(item: &LineItem, candidate: &VariantRef) -> bool {
    item.id == candidate.id
        && norm(item.effective_size()) == norm(candidate.size.as_deref())
        && norm(item.effective_color()) == norm(candidate.color.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item() -> LineItem {
        LineItem::new("p1", "Shirt", 20.0, 1)
    }

    #[test]
    fn test_absent_and_empty_are_equal() {
        let candidate = VariantRef::new("p1").with_size("");
        assert!(is_same_variant(&item(), &candidate));
        assert!(VariantRef::new("p1").same_as(&candidate));
    }

    #[test]
    fn test_sized_and_unsized_differ() {
        assert!(!is_same_variant(&item(), &VariantRef::new("p1").with_size("M")));
        assert!(!is_same_variant(
            &item().with_selected_size("M"),
            &VariantRef::new("p1")
        ));
    }

    #[test]
    fn test_selected_fields_win_over_legacy_fields() {
        let mut line = item().with_selected_size("L").with_selected_color("Red");
        line.size = Some("M".to_string());
        line.color = Some("Blue".to_string());

        let selected = VariantRef::new("p1").with_size("L").with_color("Red");
        let legacy = VariantRef::new("p1").with_size("M").with_color("Blue");
        assert!(is_same_variant(&line, &selected));
        assert!(!is_same_variant(&line, &legacy));
    }

    #[test]
    fn test_legacy_fields_used_when_selected_absent() {
        let mut line = item();
        line.size = Some("S".to_string());
        assert!(is_same_variant(&line, &VariantRef::new("p1").with_size("S")));
    }

    #[test]
    fn test_different_ids_never_match() {
        assert!(!is_same_variant(&item(), &VariantRef::new("p2")));
    }

    #[test]
    fn test_row_key_placeholders() {
        assert_eq!(VariantRef::new("p9").row_key(), "p9-nosize-nocolor");
        assert_eq!(
            VariantRef::new("p9").with_size("").with_color("Black").row_key(),
            "p9-nosize-Black"
        );
    }
}
