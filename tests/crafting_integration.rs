//! Integration tests for crafting resolution
//!
//! These tests drive the full begin/complete flow through `Workshop`:
//! - Level-gap scenarios (critical failure, even match, saturated chance)
//! - Batch creation for stackable and non-stackable outputs
//! - Pass-through vs terminal property handling
//! - Experience awards

use crafting_engine::core::types::{ActorId, BlueprintId};
use crafting_engine::crafting::{
    BonusType, Blueprint, BlueprintCatalog, ComponentItem, ComponentTier, CraftOutcome,
    CraftingSession, EquipmentBonuses, ItemClass, ItemProperty, ItemRegistry, ItemTemplate,
    PropertyKind, SequenceRng, SkillDiscipline, Workshop, WorkshopData,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const VIBROBLADE: u32 = 1;
const POWER_CELL: u32 = 2;
const BLADE_MOLD: u32 = 3;
const GREATSWORD: u32 = 4;

fn workshop() -> Workshop {
    let catalog: BlueprintCatalog = [
        Blueprint::new(VIBROBLADE, "Vibroblade", "vibroblade", SkillDiscipline::Weaponsmith, 10)
            .with_quantity(3),
        Blueprint::new(POWER_CELL, "Power Cell", "power_cell", SkillDiscipline::Engineering, 10)
            .with_quantity(20),
        Blueprint::new(BLADE_MOLD, "Blade Mold", "blade_mold", SkillDiscipline::Weaponsmith, 10),
        Blueprint::new(GREATSWORD, "Greatsword", "greatsword", SkillDiscipline::Weaponsmith, 10),
    ]
    .into_iter()
    .collect();

    let mut items = ItemRegistry::new();
    items.add_template(ItemTemplate::new("vibroblade", "Vibroblade", 1));
    items.add_template(ItemTemplate::new("power_cell", "Power Cell", 50));
    items.add_template(ItemTemplate::new("blade_mold", "Blade Mold", 1).with_class(ItemClass::PassThrough));
    items.add_template(ItemTemplate::new("greatsword", "Greatsword", 1));

    Workshop::new(catalog, items)
}

fn crafter(ws: &mut Workshop, discipline: SkillDiscipline, rank: u32) -> ActorId {
    let actor = ActorId::new();
    ws.skills.set_rank(actor, discipline, rank);
    actor
}

fn ingot(bonus: BonusType, amount: i32) -> ComponentItem {
    ComponentItem::new("ingot", "Ingot").with_property(ItemProperty::component_bonus(bonus, amount))
}

// ============================================================================
// Level-gap scenarios
// ============================================================================

/// Effective level 10 vs item level 10: chance 50, roll 40 succeeds, the
/// lowered chance makes a later 48 fail.
#[test]
fn test_even_match_decays_chance() {
    let mut ws = workshop();
    let actor = crafter(&mut ws, SkillDiscipline::Weaponsmith, 10);
    let session = CraftingSession::new(BlueprintId(GREATSWORD), 10)
        .with_component(ComponentTier::Main, ingot(BonusType::Damage, 2))
        .with_component(ComponentTier::Secondary, ingot(BonusType::Damage, 2));

    ws.begin_crafting(actor, session).unwrap();
    let mut rng = SequenceRng::new().with_rolls([40.0, 48.0]).with_ints([3, 10]);
    let outcome = ws.complete_crafting(actor, &mut rng).unwrap();

    let report = outcome.report().expect("craft should succeed");
    assert_eq!(report.base_chance, 50.0);
    assert!(report.rolls[0].success);
    assert_eq!(report.rolls[1].chance, 47.0);
    assert!(!report.rolls[1].success, "48 fails against the decayed chance");
    assert_eq!(report.success_count, 1);
    assert_eq!(report.xp_awarded, 260);
}

/// Effective level 4 vs item level 10: critical failure, nothing created.
#[test]
fn test_far_too_low_is_critical_failure() {
    let mut ws = workshop();
    let actor = crafter(&mut ws, SkillDiscipline::Weaponsmith, 4);
    let session = CraftingSession::new(BlueprintId(VIBROBLADE), 10)
        .with_component(ComponentTier::Main, ingot(BonusType::Damage, 1))
        .with_component(ComponentTier::Enhancement, ingot(BonusType::Luck, 1));

    ws.begin_crafting(actor, session).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let outcome = ws.complete_crafting(actor, &mut rng).unwrap();

    assert!(matches!(
        outcome,
        CraftOutcome::CriticalFailure { components_lost: 2, .. }
    ));
    assert!(ws.items.created().is_empty());
    assert!(ws.session(actor).is_none());
    assert!(!ws.is_busy(actor));
    assert_eq!(ws.skills.record(actor, SkillDiscipline::Weaponsmith).unwrap().xp, 0);
}

/// Effective level 14 vs item level 10: chance saturates at 90.
#[test]
fn test_saturated_chance_succeeds_below_ninety() {
    let mut ws = workshop();
    let actor = crafter(&mut ws, SkillDiscipline::Weaponsmith, 14);
    let session = CraftingSession::new(BlueprintId(GREATSWORD), 10)
        .with_component(ComponentTier::Main, ingot(BonusType::Damage, 1))
        .with_component(ComponentTier::Main, ingot(BonusType::Luck, 1))
        .with_component(ComponentTier::Tertiary, ingot(BonusType::Rest, 1));

    ws.begin_crafting(actor, session).unwrap();
    let mut rng = SequenceRng::new()
        .with_rolls([10.0, 50.0, 70.0])
        .with_ints([1, 1, 1, 1]);
    let outcome = ws.complete_crafting(actor, &mut rng).unwrap();

    let report = outcome.report().unwrap();
    assert_eq!(report.base_chance, 90.0);
    assert_eq!(report.success_count, 3);
    assert_eq!(report.final_chance, 87.0);
}

/// Equipment offsets the roll but not the decay.
#[test]
fn test_equipment_bonus_only_affects_roll() {
    let mut ws = workshop();
    let actor = crafter(&mut ws, SkillDiscipline::Weaponsmith, 10);
    ws.set_equipment(actor, EquipmentBonuses::new().with(SkillDiscipline::Weaponsmith, 6));
    let session = CraftingSession::new(BlueprintId(GREATSWORD), 10)
        .with_component(ComponentTier::Main, ingot(BonusType::Damage, 1))
        .with_component(ComponentTier::Main, ingot(BonusType::Damage, 1));

    ws.begin_crafting(actor, session).unwrap();
    // 45 + 3 <= 50 succeeds; decay 2 -> 48; 46 + 3 > 48 fails
    let mut rng = SequenceRng::new().with_rolls([45.0, 46.0]).with_ints([2, 1]);
    let report = ws.complete_crafting(actor, &mut rng).unwrap();
    let report = report.report().unwrap();

    assert_eq!(report.success_count, 1);
    assert_eq!(report.final_chance, 48.0);
}

// ============================================================================
// Batch creation
// ============================================================================

#[test]
fn test_non_stackable_batch_shares_properties() {
    let mut ws = workshop();
    let actor = crafter(&mut ws, SkillDiscipline::Weaponsmith, 14);
    let session = CraftingSession::new(BlueprintId(VIBROBLADE), 10)
        .with_component(ComponentTier::Main, ingot(BonusType::Damage, 2))
        .with_component(ComponentTier::Secondary, ingot(BonusType::Hitpoints, 5));

    ws.begin_crafting(actor, session).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let outcome = ws.complete_crafting(actor, &mut rng).unwrap();

    let items = &outcome.report().unwrap().items;
    assert_eq!(items.len(), 3);
    for item in items {
        assert_eq!(item.quantity, 1);
        assert_eq!(item.properties, items[0].properties);
        assert_eq!(item.crafter, Some(actor));
        assert_eq!(item.recommended_level, 10);
    }
    assert_eq!(ws.items.owned_by(actor).count(), 3);
}

#[test]
fn test_stackable_output_is_single_instance() {
    let mut ws = workshop();
    let actor = crafter(&mut ws, SkillDiscipline::Engineering, 12);
    ws.begin_crafting(actor, CraftingSession::new(BlueprintId(POWER_CELL), 10))
        .unwrap();

    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let outcome = ws.complete_crafting(actor, &mut rng).unwrap();

    let items = &outcome.report().unwrap().items;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].quantity, 20);
}

// ============================================================================
// Pass-through vs terminal
// ============================================================================

/// A crafted mold aggregates bonuses, then feeds a terminal craft where each
/// success lands as its own slot.
#[test]
fn test_pass_through_mold_feeds_terminal_craft() {
    let mut ws = workshop();
    let actor = crafter(&mut ws, SkillDiscipline::Weaponsmith, 20);

    let mold_session = CraftingSession::new(BlueprintId(BLADE_MOLD), 10)
        .with_component(ComponentTier::Main, ingot(BonusType::Damage, 1))
        .with_component(ComponentTier::Secondary, ingot(BonusType::Damage, 2));
    ws.begin_crafting(actor, mold_session).unwrap();
    let mut rng = SequenceRng::new().with_rolls([0.0, 0.0]).with_ints([1, 1, 1]);
    let outcome = ws.complete_crafting(actor, &mut rng).unwrap();

    let mold = &outcome.report().unwrap().items[0];
    assert_eq!(mold.properties, vec![ItemProperty::component_bonus(BonusType::Damage, 3)]);

    let sword_session = CraftingSession::new(BlueprintId(GREATSWORD), 10)
        .with_component(ComponentTier::Main, ComponentItem::from(mold))
        .with_component(ComponentTier::Secondary, ingot(BonusType::Damage, 3));
    ws.begin_crafting(actor, sword_session).unwrap();
    let mut rng = SequenceRng::new().with_rolls([0.0, 0.0]).with_ints([1, 1, 1]);
    let outcome = ws.complete_crafting(actor, &mut rng).unwrap();

    let sword = &outcome.report().unwrap().items[0];
    assert_eq!(sword.properties.len(), 2, "duplicates coexist as separate slots");
    assert!(sword.properties.iter().all(|p| p.kind == PropertyKind::Direct));
    assert_eq!(sword.total_bonus(BonusType::Damage), 6);
}

// ============================================================================
// Determinism and data loading
// ============================================================================

#[test]
fn test_same_seed_same_outcome() {
    let run = |seed: u64| {
        let mut ws = workshop();
        let actor = crafter(&mut ws, SkillDiscipline::Weaponsmith, 11);
        let mut session = CraftingSession::new(BlueprintId(GREATSWORD), 10);
        for bonus in [BonusType::Damage, BonusType::Luck, BonusType::Enmity, BonusType::Rest] {
            session.add_component(ComponentTier::Main, ingot(bonus, 1));
        }
        ws.begin_crafting(actor, session).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let outcome = ws.complete_crafting(actor, &mut rng).unwrap();
        let report = outcome.report().unwrap().clone();
        (report.success_count, report.xp_awarded, report.final_chance)
    };

    assert_eq!(run(99), run(99));
}

#[test]
fn test_bundled_data_file_loads() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("data/workshop.toml");
    let data = WorkshopData::load(&path).unwrap();

    assert!(data.catalog().len() >= 5);
    let registry = data.registry();
    for blueprint in &data.blueprints {
        assert!(
            registry.template(&blueprint.item_resref).is_some(),
            "missing template for {}",
            blueprint.item_resref
        );
    }
    assert!(data.component_library().take("steel_ingot").is_some());
}
