//! Cart invariants over arbitrary operation sequences.

use std::collections::HashSet;

use proptest::prelude::*;
use quickbite_core::{Cart, Category, ItemId, MenuItem, Price, QuantityChange};

#[derive(Debug, Clone)]
enum Op {
    Add(i32),
    Update(i32, i32),
    Remove(i32),
    Clear,
}

fn item(id: i32) -> MenuItem {
    MenuItem {
        id: ItemId::new(id),
        name: format!("Dish {id}"),
        category: Category::Indian,
        price: Price::from_rupees(i64::from(id) * 50),
        image: String::new(),
        description: String::new(),
    }
}

fn op_strategy() -> impl Strategy<Value = Op> {
    let id = 1..=6i32;
    prop_oneof![
        4 => id.clone().prop_map(Op::Add),
        3 => (id.clone(), -4..=4i32).prop_map(|(id, delta)| Op::Update(id, delta)),
        2 => id.prop_map(Op::Remove),
        1 => Just(Op::Clear),
    ]
}

fn apply(cart: &mut Cart, op: &Op) {
    match *op {
        Op::Add(id) => {
            cart.add(&item(id));
        }
        Op::Update(id, delta) => {
            cart.update_quantity(ItemId::new(id), delta);
        }
        Op::Remove(id) => {
            cart.remove(ItemId::new(id));
        }
        Op::Clear => cart.clear(),
    }
}

fn check_invariants(cart: &Cart) -> Result<(), TestCaseError> {
    let mut seen = HashSet::new();
    for entry in cart.entries() {
        prop_assert!(seen.insert(entry.item.id), "duplicate id {}", entry.item.id);
        prop_assert!(entry.quantity >= 1, "zero quantity for {}", entry.item.id);
    }
    Ok(())
}

proptest! {
    #[test]
    fn prop_operations_keep_invariants(ops in prop::collection::vec(op_strategy(), 0..64)) {
        let mut cart = Cart::new();
        for op in &ops {
            apply(&mut cart, op);
            check_invariants(&cart)?;
        }
    }

    #[test]
    fn prop_count_is_sum_of_quantities(ops in prop::collection::vec(op_strategy(), 0..64)) {
        let mut cart = Cart::new();
        for op in &ops {
            apply(&mut cart, op);
        }
        let sum: u32 = cart.entries().iter().map(|entry| entry.quantity).sum();
        prop_assert_eq!(cart.count(), sum);
    }

    #[test]
    fn prop_draining_quantity_matches_remove(
        ops in prop::collection::vec(op_strategy(), 0..32),
        id in 1..=6i32,
        extra in 0..=3i32,
    ) {
        let mut cart = Cart::new();
        for op in &ops {
            apply(&mut cart, op);
        }
        cart.add(&item(id));

        let quantity = cart
            .entries()
            .iter()
            .find(|entry| entry.item.id == ItemId::new(id))
            .map_or(0, |entry| i32::try_from(entry.quantity).unwrap_or(i32::MAX));

        let mut drained = cart.clone();
        let mut removed = cart;
        prop_assert_eq!(
            drained.update_quantity(ItemId::new(id), -quantity - extra),
            QuantityChange::Removed
        );
        prop_assert!(removed.remove(ItemId::new(id)).is_some());
        prop_assert_eq!(drained, removed);
    }
}
