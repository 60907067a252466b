//! Content domain: tests for RON parsing and loadout validation.

use super::loader::{ContentLoadError, parse_data_file, parse_loadouts, parse_single};
use super::{ContentRegistry, validate_content};
use crate::actions::{ActionKind, ActionTuning, CompositionError, Loadout, SubActionKind};

const LOADOUTS: &str = r#"(
    schema_version: 1,
    items: [
        (
            id: "mini",
            primary: [Victory, Die, Hurt, Jump, Roll],
            sub_actions: [DropDash],
        ),
        (
            id: "walker",
            primary: [Jump, Skid, Push],
        ),
    ],
)"#;

// -----------------------------------------------------------------------------
// Parsing tests
// -----------------------------------------------------------------------------

#[test]
fn test_parse_loadouts_keeps_declared_order() {
    let registry = parse_loadouts("loadouts.ron", LOADOUTS).unwrap();
    assert_eq!(registry.total_count(), 2);

    let mini = registry.loadout("mini").unwrap();
    assert_eq!(
        mini.primary,
        vec![
            ActionKind::Victory,
            ActionKind::Die,
            ActionKind::Hurt,
            ActionKind::Jump,
            ActionKind::Roll
        ]
    );
    assert_eq!(mini.sub_actions, vec![SubActionKind::DropDash]);

    // sub_actions defaults to empty
    assert!(registry.loadout("walker").unwrap().sub_actions.is_empty());
}

#[test]
fn test_parse_rejects_wrong_schema_version() {
    let contents = r#"(schema_version: 7, items: [])"#;
    let err = parse_data_file::<Loadout>("loadouts.ron", contents).unwrap_err();
    assert!(matches!(err, ContentLoadError::Schema { found: 7, .. }));
}

#[test]
fn test_parse_rejects_duplicate_ids() {
    let contents = r#"(
        schema_version: 1,
        items: [
            (id: "a", primary: [Jump]),
            (id: "a", primary: [Roll]),
        ],
    )"#;
    let err = parse_loadouts("loadouts.ron", contents).unwrap_err();
    assert!(matches!(err, ContentLoadError::DuplicateId { ref id, .. } if id == "a"));
}

#[test]
fn test_parse_unknown_action_is_parse_error() {
    let contents = r#"(schema_version: 1, items: [(id: "x", primary: [Teleport])])"#;
    let err = parse_loadouts("loadouts.ron", contents).unwrap_err();
    assert!(matches!(err, ContentLoadError::Parse { .. }));
    assert!(err.to_string().contains("loadouts.ron"));
}

#[test]
fn test_partial_tuning_falls_back_per_field() {
    let tuning: ActionTuning =
        parse_single("action_tuning.ron", "(jump_speed: 400.0, peel_out_charge_steps: 20)")
            .unwrap();
    let defaults = ActionTuning::default();

    assert_eq!(tuning.jump_speed, 400.0);
    assert_eq!(tuning.peel_out_charge_steps, 20);
    assert_eq!(tuning.roll_friction, defaults.roll_friction);
}

// -----------------------------------------------------------------------------
// Registry and validation tests
// -----------------------------------------------------------------------------

#[test]
fn test_presets_pass_validation() {
    let registry = ContentRegistry::with_presets();
    assert!(validate_content(&registry).is_empty());
    assert!(registry.loadout("sonic").is_some());
}

#[test]
fn test_validation_flags_bad_loadout() {
    let registry = parse_loadouts("loadouts.ron", LOADOUTS).unwrap();
    let errors = validate_content(&registry);

    // Loadouts without the damage actions are allowed
    assert!(errors.is_empty(), "{errors:?}");

    let mut registry = registry;
    registry.loadouts.insert(
        "broken".to_string(),
        Loadout::new(
            "broken",
            [ActionKind::Push, ActionKind::Jump],
            Vec::<SubActionKind>::new(),
        ),
    );
    let errors = validate_content(&registry);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].loadout_id, "broken");
}

#[test]
fn test_compose_by_id() {
    let registry = ContentRegistry::with_presets();

    let slot = registry.compose("knuckles").unwrap();
    assert_eq!(slot.loadout(), "knuckles");
    assert_eq!(slot.priorities(), Loadout::knuckles().primary);

    assert_eq!(
        registry.compose("metal").err(),
        Some(CompositionError::UnknownLoadout("metal".to_string()))
    );
}

#[test]
fn test_next_id_wraps() {
    let registry = ContentRegistry::with_presets();
    let ids = registry.ids();
    let last = ids[ids.len() - 1];

    assert_eq!(registry.next_id(last), Some(ids[0]));
    assert_eq!(registry.next_id(ids[0]), Some(ids[1]));
    assert_eq!(registry.next_id("nobody"), Some(ids[0]));
}

// -----------------------------------------------------------------------------
// Shipped asset tests
// -----------------------------------------------------------------------------

#[test]
fn test_shipped_loadouts_match_presets() {
    let registry = parse_loadouts(
        "loadouts.ron",
        include_str!("../../assets/data/loadouts.ron"),
    )
    .unwrap();
    assert!(validate_content(&registry).is_empty());

    for preset in Loadout::presets() {
        assert_eq!(registry.loadout(&preset.id), Some(&preset), "{}", preset.id);
    }
}

#[test]
fn test_shipped_tuning_parses() {
    let tuning: ActionTuning = parse_single(
        "action_tuning.ron",
        include_str!("../../assets/data/action_tuning.ron"),
    )
    .unwrap();
    assert_eq!(tuning, ActionTuning::default());
}
