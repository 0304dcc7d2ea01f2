//! RPG Buff/Debuff Example
//!
//! This example demonstrates a character sheet built on statmod:
//! - Numeric stats with flat, percent, and final-multiply modifiers
//! - Equipment as an owner, unequipped in one call
//! - Tag cancellation (a fire cloak suppressing "frozen" debuffs)
//! - Context gating (an oil coating that only matters while on fire)
//! - Bounded stats (crit chance capped at 0.75)
//!
//! This example shows how to think with statmod: gameplay systems never
//! compute stat math themselves, they apply and remove tagged modifiers
//! and read the authoritative value back.

use statmod::*;
use std::sync::Arc;

/// A character with a handful of modifiable stats.
///
/// The pipeline strategies are stateless; sharing one `Arc` per strategy
/// across every stat is the intended pattern.
struct Character {
    speed: StatProperty<f64>,
    attack: StatProperty<f64>,
    crit_chance: StatProperty<f64>,
}

impl Character {
    fn new() -> Self {
        let pipeline = Arc::new(NumericPipeline);
        let capped = Arc::new(
            BoundedPipeline::new(Bounds::new(0.0, 0.75).expect("static bounds")),
        );
        Self {
            speed: StatProperty::new(100.0, pipeline.clone()),
            attack: StatProperty::new(50.0, pipeline),
            crit_chance: StatProperty::new(0.05, capped),
        }
    }
}

fn print_stats(label: &str, character: &mut Character) {
    println!("--- {label} ---");
    println!("  speed:       {:.1}", character.speed.value());
    println!("  attack:      {:.1}", character.attack.value());
    println!("  crit chance: {:.2}", character.crit_chance.value());
}

fn main() {
    let mut hero = Character::new();
    print_stats("naked", &mut hero);

    // Equip gear: everything the gear applies shares one owner.
    let gear = OwnerId::new();
    hero.speed
        .add_modifier(Modifier::base_add(20.0), gear);
    hero.attack
        .add_modifier(Modifier::percent_add(0.25), gear);
    hero.crit_chance
        .add_modifier(Modifier::base_add(0.95), gear); // capped at 0.75
    print_stats("equipped", &mut hero);

    // A frost trap slows the hero and marks the slow "frozen".
    let trap = OwnerId::new();
    let (frost, _) = hero.speed.add_modifier(
        Modifier::percent_add(-0.6).effect_tag("frozen"),
        trap,
    );
    print_stats("frost-trapped", &mut hero);

    // The fire cloak cancels anything tagged "frozen" and keeps the hero
    // burning, which an oil coating converts into extra damage.
    let cloak = OwnerId::new();
    hero.speed.add_modifier(
        Modifier::base_add(0.0).cancels_tag("frozen"),
        cloak,
    );
    hero.attack.add_modifier(
        Modifier::base_add(0.0).grants_context("on-fire"),
        cloak,
    );
    hero.attack.add_modifier(
        Modifier::percent_add(0.5).requires_context("on-fire"),
        trap,
    );
    print_stats("fire cloak on", &mut hero);

    println!("\nattack breakdown:");
    let breakdown = hero.attack.breakdown();
    for line in &breakdown.applied {
        println!("  applied:  {line}");
    }
    for line in &breakdown.inactive {
        println!("  inactive: {line}");
    }

    // A stun beats everything, then wears off.
    let stun_source = OwnerId::new();
    let (stun, _) = hero.speed.add_modifier(
        Modifier::final_multiply(0.0)
            .with_priority(999)
            .effect_tag("stun"),
        stun_source,
    );
    print_stats("stunned", &mut hero);
    hero.speed.remove_modifier(stun);
    hero.speed.remove_modifier(frost);
    print_stats("recovered", &mut hero);

    // Unequip: one call removes everything the gear applied.
    hero.speed.remove_all_from(gear);
    hero.attack.remove_all_from(gear);
    hero.crit_chance.remove_all_from(gear);
    print_stats("unequipped", &mut hero);
}
