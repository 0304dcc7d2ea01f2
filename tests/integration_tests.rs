use statmod::*;
use std::sync::Arc;

fn speed_property() -> StatProperty<f64> {
    StatProperty::new(100.0, Arc::new(NumericPipeline))
}

/// Walk a property through the full buff/debuff lifecycle.
#[test]
fn test_complete_lifecycle() {
    let mut speed = speed_property();
    let gear = OwnerId::new();
    let curse = OwnerId::new();

    // Flat bonus.
    speed.add_modifier(Modifier::base_add(10.0), gear);
    assert_eq!(*speed.value(), 110.0);

    // Percent bonus on top.
    speed.add_modifier(Modifier::percent_add(0.5), gear);
    assert_eq!(*speed.value(), 165.0);

    // A stun zeroes the result regardless of the stacked bonuses.
    let (stun, changed) = speed.add_modifier(
        Modifier::final_multiply(0.0)
            .with_priority(999)
            .effect_tag("stun"),
        curse,
    );
    assert!(changed);
    assert_eq!(*speed.value(), 0.0);

    // Removing the stun by handle restores the previous value.
    assert!(speed.remove_modifier(stun));
    assert_eq!(*speed.value(), 165.0);

    // Clearing the gear's bonuses returns to the base exactly.
    assert!(speed.remove_all_from(gear));
    assert_eq!(*speed.value(), 100.0);
    assert!(speed.is_unmodified());
}

/// Equal-priority modifiers resolve in insertion order no matter what
/// unrelated insertions and removals happen in between.
#[test]
fn test_determinism_under_interleaved_churn() {
    let mut a = speed_property();
    let mut b = speed_property();
    let owner = OwnerId::new();

    // Property `a`: the two overrides inserted back to back.
    a.add_modifier(Modifier::override_with(50.0).with_priority(5), owner);
    a.add_modifier(Modifier::override_with(70.0).with_priority(5), owner);

    // Property `b`: same two overrides with unrelated churn interleaved.
    b.add_modifier(Modifier::base_add(1.0), owner);
    b.add_modifier(Modifier::override_with(50.0).with_priority(5), owner);
    let (noise, _) = b.add_modifier(Modifier::percent_add(0.1), owner);
    b.add_modifier(Modifier::override_with(70.0).with_priority(5), owner);
    b.remove_modifier(noise);

    // The first-inserted override wins the tie in both properties.
    let a_breakdown = a.breakdown();
    let b_breakdown = b.breakdown();
    assert_eq!(a_breakdown.applied[0], "override(50.0) @5");
    assert_eq!(b_breakdown.applied[0], "override(50.0) @5");
}

/// +10% then +20% equals +20% then +10% equals +30% flat.
#[test]
fn test_percent_commutativity() {
    let mut forward = speed_property();
    let mut reverse = speed_property();
    let owner = OwnerId::new();

    forward.add_modifier(Modifier::percent_add(0.10), owner);
    forward.add_modifier(Modifier::percent_add(0.20), owner);

    reverse.add_modifier(Modifier::percent_add(0.20), owner);
    reverse.add_modifier(Modifier::percent_add(0.10), owner);

    assert!((*forward.value() - 130.0).abs() < 1e-9);
    assert!((*reverse.value() - 130.0).abs() < 1e-9);
}

/// Final multipliers evaluate in priority order; zero is absorbing either
/// way, and commuting factors still evaluate highest-priority first.
#[test]
fn test_final_multiply_priority_ordering() {
    let owner = OwnerId::new();

    let mut p = speed_property();
    p.add_modifier(Modifier::final_multiply(2.0).with_priority(10), owner);
    p.add_modifier(Modifier::final_multiply(0.0).with_priority(5), owner);
    assert_eq!(*p.value(), 0.0);

    let mut p = speed_property();
    p.add_modifier(Modifier::final_multiply(2.0).with_priority(5), owner);
    p.add_modifier(Modifier::final_multiply(0.0).with_priority(10), owner);
    assert_eq!(*p.value(), 0.0);

    let mut p = speed_property();
    p.add_modifier(Modifier::final_multiply(2.0).with_priority(10), owner);
    p.add_modifier(Modifier::final_multiply(0.5).with_priority(5), owner);
    assert_eq!(*p.value(), 100.0);

    // Priority still selects evaluation order even when the arithmetic
    // happens to commute: the higher-priority multiplier is listed first.
    let breakdown = p.breakdown();
    assert_eq!(breakdown.applied[0], "×2.00 @10");
    assert_eq!(breakdown.applied[1], "×0.50 @5");
}

/// Cancellation excludes the tagged modifier in either insertion order and
/// releases it as soon as the canceller goes away.
#[test]
fn test_cancellation_both_orders() {
    let owner = OwnerId::new();

    // Frozen first, canceller second.
    let mut p = speed_property();
    p.add_modifier(Modifier::percent_add(-0.5).effect_tag("frozen"), owner);
    let (thaw, _) = p.add_modifier(Modifier::base_add(0.0).cancels_tag("frozen"), owner);
    assert_eq!(*p.value(), 100.0);
    p.remove_modifier(thaw);
    assert_eq!(*p.value(), 50.0);

    // Canceller first, frozen second.
    let mut p = speed_property();
    let (thaw, _) = p.add_modifier(Modifier::base_add(0.0).cancels_tag("frozen"), owner);
    p.add_modifier(Modifier::percent_add(-0.5).effect_tag("frozen"), owner);
    assert_eq!(*p.value(), 100.0);
    p.remove_modifier(thaw);
    assert_eq!(*p.value(), 50.0);
}

/// A context-gated modifier applies only while some surviving modifier
/// contributes the required tag.
#[test]
fn test_context_gating_lifecycle() {
    let mut p = speed_property();
    let owner = OwnerId::new();

    // Gated modifier alone: inert.
    p.add_modifier(
        Modifier::percent_add(0.5).requires_context("on-fire"),
        owner,
    );
    assert_eq!(*p.value(), 100.0);

    // A contributor activates it.
    let (torch, _) = p.add_modifier(Modifier::base_add(0.0).grants_context("on-fire"), owner);
    assert_eq!(*p.value(), 150.0);

    // A cancelled contributor grants nothing.
    p.remove_modifier(torch);
    p.add_modifier(
        Modifier::base_add(0.0)
            .effect_tag("burning")
            .grants_context("on-fire"),
        owner,
    );
    let (douse, _) = p.add_modifier(Modifier::base_add(0.0).cancels_tag("burning"), owner);
    assert_eq!(*p.value(), 100.0);

    // Removing the canceller reactivates the chain on the next read.
    p.remove_modifier(douse);
    assert_eq!(*p.value(), 150.0);
}

/// Adding then removing a net-zero modifier fires zero notifications.
#[test]
fn test_no_change_suppression() {
    let mut p = speed_property();
    let owner = OwnerId::new();

    for _ in 0..10 {
        let (handle, changed) = p.add_modifier(Modifier::base_add(0.0), owner);
        assert!(!changed);
        assert!(!p.remove_modifier(handle));
    }
    assert_eq!(*p.value(), 100.0);
}

/// Two structurally identical applications are tracked independently.
#[test]
fn test_handle_precision() {
    let mut p = speed_property();
    let owner = OwnerId::new();

    let make = || {
        Modifier::base_add(10.0)
            .with_priority(3)
            .effect_tag("enchant")
    };
    let (first, _) = p.add_modifier(make(), owner);
    let (second, _) = p.add_modifier(make(), owner);
    assert_eq!(*p.value(), 120.0);

    p.remove_modifier(first);
    assert_eq!(*p.value(), 110.0);

    p.remove_modifier(second);
    assert_eq!(*p.value(), 100.0);
}

/// A bounded stat stays inside its interval however hard the modifiers
/// push, and the percent cap limits stacked percentage buffs.
#[test]
fn test_bounded_stat() {
    let strategy = BoundedPipeline::clamped(0.0, 200.0)
        .unwrap()
        .with_percent_cap(0.75)
        .unwrap();
    let mut armor = StatProperty::new(100.0, Arc::new(strategy));
    let owner = OwnerId::new();

    // +60% and +40% sum to +100%, capped at +75%.
    armor.add_modifier(Modifier::percent_add(0.6), owner);
    armor.add_modifier(Modifier::percent_add(0.4), owner);
    assert_eq!(*armor.value(), 175.0);

    // A burst multiplier cannot escape the upper bound.
    armor.add_modifier(Modifier::final_multiply(10.0), owner);
    assert_eq!(*armor.value(), 200.0);

    // Nor can a drain escape the lower bound.
    armor.add_modifier(Modifier::final_multiply(-5.0).with_priority(-1), owner);
    assert_eq!(*armor.value(), 0.0);
}

/// Discrete stats via the override strategy: highest priority wins, the
/// base passes through once every override is gone.
#[test]
fn test_discrete_override_stat() {
    #[derive(Debug, Clone, PartialEq)]
    enum Surface {
        Ground,
        Water,
        Ice,
    }
    impl StatValue for Surface {}

    let mut surface = StatProperty::new(Surface::Ground, Arc::new(OverrideStrategy));
    let weather = OwnerId::new();
    let spell = OwnerId::new();

    surface.add_modifier(
        Modifier::override_with(Surface::Water).with_priority(1),
        weather,
    );
    assert_eq!(*surface.value(), Surface::Water);

    let (freeze, _) = surface.add_modifier(
        Modifier::override_with(Surface::Ice)
            .with_priority(10)
            .effect_tag("frozen"),
        spell,
    );
    assert_eq!(*surface.value(), Surface::Ice);

    surface.remove_modifier(freeze);
    assert_eq!(*surface.value(), Surface::Water);

    surface.remove_all_from(weather);
    assert_eq!(*surface.value(), Surface::Ground);
}

/// Integer stats round once after the percent stage, half away from zero.
#[test]
fn test_integer_stat_rounding() {
    let mut strength = StatProperty::new(10i32, Arc::new(NumericPipeline));
    let owner = OwnerId::new();

    strength.add_modifier(Modifier::percent_add(0.25), owner);
    assert_eq!(*strength.value(), 13); // 12.5 rounds away from zero

    strength.set_base_value(-10);
    assert_eq!(*strength.value(), -13);
}

/// Base-value writes invalidate the cache and report change correctly.
#[test]
fn test_base_value_changes() {
    let mut p = speed_property();
    let owner = OwnerId::new();
    p.add_modifier(Modifier::percent_add(1.0), owner);
    assert_eq!(*p.value(), 200.0);

    assert!(p.set_base_value(50.0));
    assert_eq!(*p.value(), 100.0);
    assert!(!p.set_base_value(50.0));
}
