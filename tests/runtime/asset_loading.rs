use crate::helpers::*;
use bevy_layer_ratio::asset::versioning::current_format_version;
use bevy_layer_ratio::asset::*;

#[test]
fn load_terrain_fixture() {
    let mut app = create_minimal_app();
    let asset = load_asset(&mut app, "terrain.ratio.ron");

    assert_eq!(asset.name, "Terrain");
    assert!(asset.layer_ratio.randomize_color);
    assert_eq!(
        asset.layer_ratio.keys(),
        &[
            Key::new([0.1, 0.3, 0.9, 1.0], 0.3),
            Key::new([0.9, 0.8, 0.5, 1.0], 0.4),
            Key::new([0.2, 0.6, 0.1, 1.0], 0.85),
            Key::new(WHITE, 1.0),
        ]
    );
}

#[test]
fn load_terrain_fixture_evaluates() {
    let mut app = create_minimal_app();
    let mut asset = load_asset(&mut app, "terrain.ratio.ron");

    assert_eq!(asset.layer_ratio.evaluate(0.0), [0.1, 0.3, 0.9, 1.0]);
    assert_eq!(asset.layer_ratio.evaluate(0.35), [0.9, 0.8, 0.5, 1.0]);
    assert_eq!(asset.layer_ratio.evaluate(0.9), WHITE);
}

#[test]
fn load_legacy_fixture_upgrades() {
    let mut app = create_minimal_app();
    let asset = load_asset(&mut app, "legacy.ratio.ron");

    assert_eq!(asset.layer_ratio_version(), current_format_version());
    assert!(asset.name.is_empty());
    assert!(!asset.layer_ratio.randomize_color);
    assert_eq!(
        asset.layer_ratio.keys(),
        &[Key::new(RED, 0.0), Key::new(BLUE, 1.0)]
    );
}

#[test]
fn load_empty_keys_fixture_uses_default() {
    let mut app = create_minimal_app();
    let asset = load_asset(&mut app, "empty_keys.ratio.ron");

    assert_eq!(asset.name, "Empty");
    assert_eq!(asset.layer_ratio, LayerRatio::default());
}

#[test]
fn load_future_version_fails() {
    let mut app = create_minimal_app();
    let err = try_load_asset(&mut app, "future_version.ratio.ron").unwrap_err();
    assert!(
        err.contains("Unknown layer_ratio_version"),
        "unexpected error: {err}"
    );
}

#[test]
fn load_invalid_syntax_fails() {
    let mut app = create_minimal_app();
    let err = try_load_asset(&mut app, "invalid_syntax.ratio.ron").unwrap_err();
    assert!(err.contains("Could not parse RON"), "unexpected error: {err}");
}

#[test]
fn loaded_asset_can_be_saved_and_parsed() {
    let mut app = create_minimal_app();
    let asset = load_asset(&mut app, "terrain.ratio.ron");

    let saved = asset.to_ron().unwrap();
    let parsed: LayerRatioAsset = ron::from_str(&saved).unwrap();

    assert_eq!(parsed, asset);
}
