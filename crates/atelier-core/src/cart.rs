//! # Cart State Machine
//!
//! Line items, the cart state, the actions that change it and the pure
//! reducer that applies them.
//!
//! ## Transitions
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    reduce(state, action) → new state                    │
//! │                                                                         │
//! │  Action              items                          isOpen             │
//! │  ──────              ─────                          ──────             │
//! │  ADD_ITEM(item)      slot exists? qty += item.qty   unchanged          │
//! │                      otherwise push(item)                              │
//! │                                                                         │
//! │  REMOVE_ITEM(v)      retain(slot != v)              unchanged          │
//! │                                                                         │
//! │  UPDATE_QUANTITY     slot == v? qty = n             unchanged          │
//! │  (v, n)              then retain(qty > 0)                              │
//! │                                                                         │
//! │  CLEAR_CART          []                             unchanged          │
//! │  TOGGLE_CART         unchanged                      !isOpen            │
//! │  SET_CART_OPEN(b)    unchanged                      b                  │
//! │                                                                         │
//! │  unknown (raw JSON)  unchanged                      unchanged          │
//! │                                                                         │
//! │  Every transition returns a NEW CartState; the input is never mutated. │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - `items` never holds two lines with the same variant identity
//! - insertion order is display order (oldest first)
//! - the reducer is total: no action, however odd, produces an error

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::price::{Price, UsdRate};
use crate::variant::{is_same_variant, VariantRef};

// =============================================================================
// Line Item
// =============================================================================

/// A purchasable unit currently in the cart.
///
/// ## Design Notes
/// - `name`, `price` and `image` are captured when the item is added and are
///   never re-synced with the catalog
/// - `selected_size`/`selected_color` take precedence over the legacy
///   `size`/`color` fields when resolving the variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LineItem {
    /// Product identifier.
    pub id: String,

    /// Display name at time of adding.
    pub name: String,

    /// Price at time of adding.
    pub price: Price,

    #[ts(type = "number")]
    pub quantity: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub size: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub color: Option<String>,

    /// Display URL, cosmetic only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub image: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub selected_size: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub selected_color: Option<String>,
}

impl LineItem {
    /// Creates an unsized, colorless line item.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        price: impl Into<Price>,
        quantity: i64,
    ) -> Self {
        LineItem {
            id: id.into(),
            name: name.into(),
            price: price.into(),
            quantity,
            size: None,
            color: None,
            image: None,
            selected_size: None,
            selected_color: None,
        }
    }

    /// Returns a copy with a different quantity.
    pub fn with_quantity(mut self, quantity: i64) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn with_selected_size(mut self, size: impl Into<String>) -> Self {
        self.selected_size = Some(size.into());
        self
    }

    pub fn with_selected_color(mut self, color: impl Into<String>) -> Self {
        self.selected_color = Some(color.into());
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// `selectedSize ?? size`
    #[inline]
    pub fn effective_size(&self) -> Option<&str> {
        self.selected_size.as_deref().or(self.size.as_deref())
    }

    /// `selectedColor ?? color`
    #[inline]
    pub fn effective_color(&self) -> Option<&str> {
        self.selected_color.as_deref().or(self.color.as_deref())
    }

    /// Resolves this item's variant identity.
    pub fn variant(&self) -> VariantRef {
        VariantRef {
            id: self.id.clone(),
            size: self.effective_size().map(str::to_string),
            color: self.effective_color().map(str::to_string),
        }
    }

    /// Unit price in USD × quantity.
    pub fn line_total_usd(&self) -> f64 {
        self.price.usd() * self.quantity as f64
    }
}

// =============================================================================
// Actions
// =============================================================================

/// Payload of `UPDATE_QUANTITY`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct QuantityUpdate {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub size: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub color: Option<String>,

    #[ts(type = "number")]
    pub quantity: i64,
}

impl QuantityUpdate {
    /// Targets `variant` with a new quantity.
    pub fn new(variant: VariantRef, quantity: i64) -> Self {
        QuantityUpdate {
            id: variant.id,
            size: variant.size,
            color: variant.color,
            quantity,
        }
    }

    /// The slot this update targets.
    pub fn variant(&self) -> VariantRef {
        VariantRef {
            id: self.id.clone(),
            size: self.size.clone(),
            color: self.color.clone(),
        }
    }
}

/// Everything that can happen to a cart.
///
/// ## Wire Format
/// ```json
/// { "type": "ADD_ITEM", "payload": { "id": "p1", "name": "Shirt", "price": 20, "quantity": 1 } }
/// { "type": "REMOVE_ITEM", "payload": { "id": "p1", "size": "M" } }
/// { "type": "UPDATE_QUANTITY", "payload": { "id": "p1", "quantity": 3 } }
/// { "type": "CLEAR_CART" }
/// { "type": "TOGGLE_CART" }
/// { "type": "SET_CART_OPEN", "payload": true }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(
    tag = "type",
    content = "payload",
    rename_all = "SCREAMING_SNAKE_CASE"
)]
#[ts(export)]
pub enum CartAction {
    AddItem(LineItem),
    RemoveItem(VariantRef),
    UpdateQuantity(QuantityUpdate),
    ClearCart,
    ToggleCart,
    SetCartOpen(bool),
}

impl CartAction {
    /// Short name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            CartAction::AddItem(_) => "ADD_ITEM",
            CartAction::RemoveItem(_) => "REMOVE_ITEM",
            CartAction::UpdateQuantity(_) => "UPDATE_QUANTITY",
            CartAction::ClearCart => "CLEAR_CART",
            CartAction::ToggleCart => "TOGGLE_CART",
            CartAction::SetCartOpen(_) => "SET_CART_OPEN",
        }
    }
}

// =============================================================================
// Cart State
// =============================================================================

/// The cart: ordered line items plus the sidebar visibility flag.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartState {
    pub items: Vec<LineItem>,

    /// Transient; never persisted as `true`.
    pub is_open: bool,
}

impl CartState {
    /// Builds a closed cart from previously stored items.
    ///
    /// Items are folded through `ADD_ITEM`, so stored duplicates collapse
    /// into one slot instead of breaking the uniqueness invariant.
    pub fn from_items(items: Vec<LineItem>) -> Self {
        items
            .into_iter()
            .fold(CartState::default(), |state, item| {
                reduce(&state, &CartAction::AddItem(item))
            })
    }

    /// Applies an action. See [`reduce`].
    pub fn reduce(&self, action: &CartAction) -> CartState {
        reduce(self, action)
    }

    /// Returns the slot `variant` names, if present.
    pub fn find(&self, variant: &VariantRef) -> Option<&LineItem> {
        self.items.iter().find(|item| is_same_variant(item, variant))
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of quantities across all slots, saturating like the ADD merge.
    pub fn total_quantity(&self) -> i64 {
        self.items
            .iter()
            .fold(0i64, |total, item| total.saturating_add(item.quantity))
    }

    /// Σ usd(price) × quantity.
    pub fn total_usd(&self) -> f64 {
        self.items.iter().map(LineItem::line_total_usd).sum()
    }
}

// =============================================================================
// Reducer
// =============================================================================

/// Applies `action` to `state`, returning the next state.
///
/// Pure and total: never fails, never mutates `state`.
pub fn reduce(state: &CartState, action: &CartAction) -> CartState {
    match action {
        CartAction::AddItem(payload) => {
            let variant = payload.variant();
            let mut items = state.items.clone();
            let mut merged = false;

            // Existing slot keeps its own name/price/image; only quantity moves.
            for item in items.iter_mut().filter(|i| is_same_variant(i, &variant)) {
                item.quantity = item.quantity.saturating_add(payload.quantity);
                merged = true;
            }

            if !merged {
                items.push(payload.clone());
            }

            CartState {
                items,
                is_open: state.is_open,
            }
        }

        CartAction::RemoveItem(variant) => CartState {
            items: state
                .items
                .iter()
                .filter(|i| !is_same_variant(i, variant))
                .cloned()
                .collect(),
            is_open: state.is_open,
        },

        CartAction::UpdateQuantity(update) => {
            let variant = update.variant();
            CartState {
                items: state
                    .items
                    .iter()
                    .map(|item| {
                        if is_same_variant(item, &variant) {
                            item.clone().with_quantity(update.quantity)
                        } else {
                            item.clone()
                        }
                    })
                    .filter(|item| item.quantity > 0)
                    .collect(),
                is_open: state.is_open,
            }
        }

        CartAction::ClearCart => CartState {
            items: Vec::new(),
            is_open: state.is_open,
        },

        CartAction::ToggleCart => CartState {
            items: state.items.clone(),
            is_open: !state.is_open,
        },

        CartAction::SetCartOpen(open) => CartState {
            items: state.items.clone(),
            is_open: *open,
        },
    }
}

/// Applies an action given as raw JSON.
///
/// Anything that does not decode into a known [`CartAction`] leaves the
/// state unchanged.
pub fn reduce_raw(state: &CartState, raw: &serde_json::Value) -> CartState {
    match CartAction::deserialize(raw) {
        Ok(action) => reduce(state, &action),
        Err(_) => state.clone(),
    }
}

// =============================================================================
// Totals
// =============================================================================

/// Derived cart figures for display.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartTotals {
    /// Number of distinct slots.
    pub item_count: usize,

    #[ts(type = "number")]
    pub total_quantity: i64,

    pub total_usd: f64,

    /// `total_usd` converted at `rate`.
    pub total_bs: f64,

    pub rate: f64,
}

impl CartTotals {
    /// Computes totals for `state` at the given exchange rate.
    pub fn new(state: &CartState, rate: UsdRate) -> Self {
        let total_usd = state.total_usd();
        CartTotals {
            item_count: state.items.len(),
            total_quantity: state.total_quantity(),
            total_usd,
            total_bs: rate.convert(total_usd),
            rate: rate.value(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn shirt(quantity: i64) -> LineItem {
        LineItem::new("p1", "Shirt", 20.0, quantity)
    }

    fn add(state: &CartState, item: LineItem) -> CartState {
        reduce(state, &CartAction::AddItem(item))
    }

    #[test]
    fn test_add_same_variant_merges_quantity() {
        let state = add(&CartState::default(), shirt(1).with_selected_size("M"));
        let state = add(&state, shirt(2).with_selected_size("M"));

        assert_eq!(state.items.len(), 1);
        assert_eq!(state.items[0].quantity, 3);
    }

    #[test]
    fn test_add_different_size_creates_new_slot() {
        let state = add(&CartState::default(), shirt(1).with_selected_size("M"));
        let state = add(&state, shirt(2).with_selected_size("L"));

        assert_eq!(state.items.len(), 2);
        assert_eq!(state.items[0].quantity, 1);
        assert_eq!(state.items[1].quantity, 2);
        assert_eq!(state.items[1].selected_size.as_deref(), Some("L"));
    }

    #[test]
    fn test_add_keeps_existing_fields() {
        let state = add(&CartState::default(), shirt(1).with_image("a.png"));
        let mut renamed = LineItem::new("p1", "Renamed", 99.0, 4);
        renamed.image = Some("b.png".to_string());
        let state = add(&state, renamed);

        let item = &state.items[0];
        assert_eq!(item.quantity, 5);
        assert_eq!(item.name, "Shirt");
        assert_eq!(item.price, Price::Scalar(20.0));
        assert_eq!(item.image.as_deref(), Some("a.png"));
    }

    #[test]
    fn test_add_appends_in_insertion_order() {
        let state = add(&CartState::default(), LineItem::new("b", "B", 1.0, 1));
        let state = add(&state, LineItem::new("a", "A", 1.0, 1));
        let state = add(&state, LineItem::new("b", "B", 1.0, 1));

        let ids: Vec<_> = state.items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["b", "a"]);
    }

    #[test]
    fn test_add_sums_per_variant_and_stays_unique() {
        let adds = [
            ("p1", Some("M"), 1),
            ("p1", Some("L"), 2),
            ("p2", None, 5),
            ("p1", Some("M"), 3),
            ("p2", Some(""), 1),
            ("p1", Some("L"), 4),
        ];

        let mut state = CartState::default();
        for (id, size, qty) in adds {
            let mut item = LineItem::new(id, id, 10.0, qty);
            item.selected_size = size.map(str::to_string);
            state = add(&state, item);
        }

        assert_eq!(state.items.len(), 3);
        let qty = |v: VariantRef| state.find(&v).map(|i| i.quantity);
        assert_eq!(qty(VariantRef::new("p1").with_size("M")), Some(4));
        assert_eq!(qty(VariantRef::new("p1").with_size("L")), Some(6));
        assert_eq!(qty(VariantRef::new("p2")), Some(6));

        for (i, a) in state.items.iter().enumerate() {
            for b in &state.items[i + 1..] {
                assert!(!a.variant().same_as(&b.variant()));
            }
        }
    }

    #[test]
    fn test_remove_item_is_idempotent() {
        let state = add(&CartState::default(), shirt(1).with_selected_size("M"));
        let state = add(&state, shirt(1).with_selected_size("L"));
        let remove = CartAction::RemoveItem(VariantRef::new("p1").with_size("M"));

        let once = reduce(&state, &remove);
        let twice = reduce(&once, &remove);

        assert_eq!(once, twice);
        assert_eq!(once.items.len(), 1);
    }

    #[test]
    fn test_remove_missing_variant_is_noop() {
        let state = add(&CartState::default(), shirt(1));
        let next = reduce(&state, &CartAction::RemoveItem(VariantRef::new("nope")));
        assert_eq!(next, state);
    }

    #[test]
    fn test_update_quantity_to_zero_equals_remove() {
        let state = add(&CartState::default(), shirt(2).with_selected_color("Red"));
        let state = add(&state, LineItem::new("p2", "Cap", 5.0, 1));
        let variant = VariantRef::new("p1").with_color("Red");

        let updated = reduce(
            &state,
            &CartAction::UpdateQuantity(QuantityUpdate::new(variant.clone(), 0)),
        );
        let removed = reduce(&state, &CartAction::RemoveItem(variant));

        assert_eq!(updated, removed);
        assert_eq!(updated.items.len(), 1);
    }

    #[test]
    fn test_update_quantity_negative_removes() {
        let state = add(&CartState::default(), shirt(2));
        let next = reduce(
            &state,
            &CartAction::UpdateQuantity(QuantityUpdate::new(VariantRef::new("p1"), -1)),
        );
        assert!(next.is_empty());
    }

    #[test]
    fn test_update_quantity_replaces_value() {
        let state = add(&CartState::default(), shirt(2));
        let next = reduce(
            &state,
            &CartAction::UpdateQuantity(QuantityUpdate::new(VariantRef::new("p1"), 7)),
        );
        assert_eq!(next.items[0].quantity, 7);
    }

    #[test]
    fn test_clear_cart_keeps_open_flag() {
        let state = add(&CartState::default(), shirt(2));
        let state = reduce(&state, &CartAction::SetCartOpen(true));
        let cleared = reduce(&state, &CartAction::ClearCart);

        assert!(cleared.items.is_empty());
        assert!(cleared.is_open);
        assert!(reduce(&CartState::default(), &CartAction::ClearCart).items.is_empty());
    }

    #[test]
    fn test_toggle_and_set_open() {
        let state = CartState::default();
        let toggled = reduce(&state, &CartAction::ToggleCart);
        assert!(toggled.is_open);
        assert!(!reduce(&toggled, &CartAction::ToggleCart).is_open);
        assert!(!reduce(&toggled, &CartAction::SetCartOpen(false)).is_open);
    }

    #[test]
    fn test_reduce_does_not_mutate_input() {
        let state = add(&CartState::default(), shirt(1));
        let snapshot = state.clone();
        let _ = reduce(&state, &CartAction::AddItem(shirt(5)));
        let _ = reduce(&state, &CartAction::ClearCart);
        assert_eq!(state, snapshot);
    }

    #[test]
    fn test_structured_price_total_is_numeric() {
        let item = LineItem::new("p2", "Jacket", Price::UsdBs { usd: 50.0, bs: 7500.0 }, 1);
        let state = add(&CartState::default(), item);

        assert_eq!(state.total_usd(), 50.0);
        let totals = CartTotals::new(&state, UsdRate::new(40.0).unwrap());
        assert_eq!(totals.total_usd, 50.0);
        assert_eq!(totals.total_bs, 2000.0);
        assert_eq!(totals.item_count, 1);
    }

    #[test]
    fn test_action_wire_format() {
        let action: CartAction = serde_json::from_value(json!({
            "type": "ADD_ITEM",
            "payload": {"id": "p1", "name": "Shirt", "price": 20, "quantity": 1, "selectedSize": "M"}
        }))
        .unwrap();
        assert_eq!(action, CartAction::AddItem(shirt(1).with_selected_size("M")));

        let clear: CartAction = serde_json::from_value(json!({"type": "CLEAR_CART"})).unwrap();
        assert_eq!(clear, CartAction::ClearCart);

        let open = serde_json::to_value(CartAction::SetCartOpen(true)).unwrap();
        assert_eq!(open, json!({"type": "SET_CART_OPEN", "payload": true}));
    }

    #[test]
    fn test_reduce_raw_ignores_unknown_actions() {
        let state = add(&CartState::default(), shirt(1));

        assert_eq!(reduce_raw(&state, &json!({"type": "APPLY_COUPON", "payload": "X"})), state);
        assert_eq!(reduce_raw(&state, &json!("garbage")), state);

        let toggled = reduce_raw(&state, &json!({"type": "TOGGLE_CART"}));
        assert!(toggled.is_open);
    }

    #[test]
    fn test_from_items_collapses_duplicates() {
        let state = CartState::from_items(vec![shirt(1), shirt(2), LineItem::new("p2", "Cap", 5.0, 1)]);
        assert_eq!(state.items.len(), 2);
        assert_eq!(state.items[0].quantity, 3);
        assert!(!state.is_open);
    }

    #[test]
    fn test_totals_saturate_on_huge_quantities() {
        let state = reduce_raw(
            &CartState::default(),
            &json!({"type": "ADD_ITEM", "payload": {"id": "a", "name": "A", "price": 1, "quantity": i64::MAX}}),
        );
        let state = reduce_raw(
            &state,
            &json!({"type": "ADD_ITEM", "payload": {"id": "b", "name": "B", "price": 1, "quantity": i64::MAX}}),
        );

        assert_eq!(state.items.len(), 2);
        assert_eq!(state.total_quantity(), i64::MAX);

        let totals = CartTotals::new(&state, UsdRate::new(40.0).unwrap());
        assert_eq!(totals.total_quantity, i64::MAX);
        assert_eq!(totals.item_count, 2);
    }

    #[test]
    fn test_line_item_json_omits_absent_fields() {
        let json = serde_json::to_value(shirt(1).with_selected_size("M")).unwrap();
        assert_eq!(
            json,
            json!({"id": "p1", "name": "Shirt", "price": 20.0, "quantity": 1, "selectedSize": "M"})
        );
    }

    // -------------------------------------------------------------------------
    // Properties over generated action sequences
    // -------------------------------------------------------------------------

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn variant_strategy() -> impl Strategy<Value = VariantRef> {
            (
                prop::sample::select(vec!["p1", "p2", "p3"]),
                prop::option::of(prop::sample::select(vec!["", "S", "M"])),
                prop::option::of(prop::sample::select(vec!["", "Red", "Blue"])),
            )
                .prop_map(|(id, size, color)| VariantRef {
                    id: id.to_string(),
                    size: size.map(str::to_string),
                    color: color.map(str::to_string),
                })
        }

        fn item_strategy() -> impl Strategy<Value = LineItem> {
            (variant_strategy(), 1i64..20, 1u32..500, any::<bool>()).prop_map(
                |(variant, quantity, usd, structured)| {
                    let price = if structured {
                        Price::UsdBs {
                            usd: f64::from(usd),
                            bs: f64::from(usd) * 150.0,
                        }
                    } else {
                        Price::Scalar(f64::from(usd))
                    };
                    let mut item = LineItem::new(variant.id.clone(), variant.id, price, quantity);
                    item.selected_size = variant.size;
                    item.selected_color = variant.color;
                    item
                },
            )
        }

        fn action_strategy() -> impl Strategy<Value = CartAction> {
            prop_oneof![
                3 => item_strategy().prop_map(CartAction::AddItem),
                1 => variant_strategy().prop_map(CartAction::RemoveItem),
                1 => (variant_strategy(), -2i64..10).prop_map(|(variant, quantity)| {
                    CartAction::UpdateQuantity(QuantityUpdate::new(variant, quantity))
                }),
                1 => Just(CartAction::ClearCart),
                1 => Just(CartAction::ToggleCart),
                1 => any::<bool>().prop_map(CartAction::SetCartOpen),
            ]
        }

        fn state_strategy() -> impl Strategy<Value = CartState> {
            prop::collection::vec(action_strategy(), 0..24).prop_map(|actions| {
                actions
                    .iter()
                    .fold(CartState::default(), |state, action| reduce(&state, action))
            })
        }

        fn assert_unique(state: &CartState) -> Result<(), TestCaseError> {
            for (i, a) in state.items.iter().enumerate() {
                for b in &state.items[i + 1..] {
                    prop_assert!(!a.variant().same_as(&b.variant()));
                }
            }
            Ok(())
        }

        proptest! {
            #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]

            #[test]
            fn adds_sum_per_variant(items in prop::collection::vec(item_strategy(), 0..24)) {
                let state = items
                    .iter()
                    .fold(CartState::default(), |state, item| add(&state, item.clone()));

                assert_unique(&state)?;
                for item in &items {
                    let variant = item.variant();
                    let expected: i64 = items
                        .iter()
                        .filter(|other| other.variant().same_as(&variant))
                        .map(|other| other.quantity)
                        .sum();
                    prop_assert_eq!(state.find(&variant).map(|i| i.quantity), Some(expected));
                }
            }

            #[test]
            fn any_sequence_keeps_slots_unique(state in state_strategy()) {
                assert_unique(&state)?;
            }

            #[test]
            fn remove_is_idempotent(state in state_strategy(), variant in variant_strategy()) {
                let remove = CartAction::RemoveItem(variant.clone());
                let once = reduce(&state, &remove);

                prop_assert!(once.find(&variant).is_none());
                prop_assert_eq!(reduce(&once, &remove), once);
            }

            #[test]
            fn update_to_zero_equals_remove(state in state_strategy(), variant in variant_strategy()) {
                let updated = reduce(
                    &state,
                    &CartAction::UpdateQuantity(QuantityUpdate::new(variant.clone(), 0)),
                );
                prop_assert_eq!(updated, reduce(&state, &CartAction::RemoveItem(variant)));
            }

            #[test]
            fn visibility_actions_leave_items_alone(state in state_strategy(), open in any::<bool>()) {
                prop_assert_eq!(&reduce(&state, &CartAction::ToggleCart).items, &state.items);
                prop_assert_eq!(&reduce(&state, &CartAction::SetCartOpen(open)).items, &state.items);
            }
        }
    }
}
