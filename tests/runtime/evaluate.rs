use crate::helpers::*;
use bevy_layer_ratio::asset::*;

fn three_bands() -> LayerRatio {
    LayerRatio::from_keys([
        Key::new(RED, 0.25),
        Key::new(GREEN, 0.75),
        Key::new(BLUE, 1.0),
    ])
}

#[test]
fn evaluate_returns_first_key_to_the_right() {
    let mut layer_ratio = white_to_black();
    assert_eq!(
        layer_ratio.evaluate(0.3),
        BLACK,
        "no blending: the key to the right wins"
    );
}

#[test]
fn evaluate_is_a_step_function() {
    let mut layer_ratio = three_bands();
    assert_eq!(layer_ratio.evaluate(0.0), RED);
    assert_eq!(layer_ratio.evaluate(0.1), RED);
    assert_eq!(layer_ratio.evaluate(0.26), GREEN);
    assert_eq!(layer_ratio.evaluate(0.74), GREEN);
    assert_eq!(layer_ratio.evaluate(0.76), BLUE);
}

#[test]
fn evaluate_skips_key_on_exact_ratio() {
    let mut layer_ratio = three_bands();
    assert_eq!(layer_ratio.evaluate(0.25), GREEN);
    assert_eq!(layer_ratio.evaluate(0.75), BLUE);
}

#[test]
fn evaluate_past_last_key_returns_last_color() {
    let mut layer_ratio = three_bands();
    assert_eq!(layer_ratio.evaluate(1.0), BLUE);
    assert_eq!(layer_ratio.evaluate(5.0), BLUE);
}

#[test]
fn evaluate_below_zero_returns_first_color() {
    let mut layer_ratio = three_bands();
    assert_eq!(layer_ratio.evaluate(-1.0), RED);
}

#[test]
fn evaluate_default_keys() {
    let mut layer_ratio = LayerRatio::default();
    assert_eq!(layer_ratio.evaluate(0.0), WHITE);
    assert_eq!(layer_ratio.evaluate(0.49), WHITE);
    assert_eq!(layer_ratio.evaluate(0.5), BLACK);
    assert_eq!(layer_ratio.evaluate(1.0), BLACK);
}

#[test]
fn evaluate_nan_returns_last_color() {
    let mut layer_ratio = three_bands();
    assert_eq!(layer_ratio.evaluate(f32::NAN), BLUE);
}

#[test]
fn evaluate_empty_resets_first() {
    let mut layer_ratio = LayerRatio::empty();

    let color = layer_ratio.evaluate(0.2);

    assert_eq!(color, WHITE);
    assert_eq!(layer_ratio, LayerRatio::default());
}

#[test]
fn sample_matches_evaluate() {
    let mut layer_ratio = three_bands();
    for i in 0..=20 {
        let ratio = i as f32 / 20.0;
        assert_eq!(layer_ratio.sample(ratio), layer_ratio.evaluate(ratio));
    }
}

#[test]
fn sample_empty_does_not_modify() {
    let layer_ratio = LayerRatio::empty();
    assert_eq!(layer_ratio.sample(0.2), WHITE);
    assert_eq!(layer_ratio.sample(0.8), BLACK);
    assert!(layer_ratio.is_empty());
}

#[test]
fn sample_single_key() {
    let layer_ratio = LayerRatio::from_keys([Key::new(RED, 0.5)]);
    assert_eq!(layer_ratio.sample(0.0), RED);
    assert_eq!(layer_ratio.sample(0.9), RED);
}

#[test]
fn sample_strip_three_pixels() {
    let mut layer_ratio = white_to_black();

    let strip = layer_ratio.sample_strip(3);

    let expected = vec![
        layer_ratio.evaluate(0.0),
        layer_ratio.evaluate(0.5),
        layer_ratio.evaluate(1.0),
    ];
    assert_eq!(strip, expected);
    assert_eq!(strip, vec![BLACK, BLACK, BLACK]);
}

#[test]
fn sample_strip_spans_zero_to_one() {
    let mut layer_ratio = three_bands();
    assert_eq!(
        layer_ratio.sample_strip(5),
        vec![RED, GREEN, GREEN, BLUE, BLUE]
    );
}

#[test]
fn sample_strip_single_pixel_takes_last_key() {
    let mut layer_ratio = three_bands();
    let strip = layer_ratio.sample_strip(1);
    assert_eq!(strip, vec![BLUE]);
    assert_eq!(strip[0], layer_ratio.evaluate(f32::NAN));
}

#[test]
fn sample_strip_zero_width_is_empty() {
    let mut layer_ratio = three_bands();
    assert!(layer_ratio.sample_strip(0).is_empty());
}

#[test]
fn sample_strip_empty_resets_first() {
    let mut layer_ratio = LayerRatio::empty();
    let strip = layer_ratio.sample_strip(2);
    assert_eq!(strip, vec![WHITE, BLACK]);
    assert_eq!(layer_ratio.len(), 2);
}
