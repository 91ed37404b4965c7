// Host-side tests for the gesture math of the control widgets.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod core {
    pub mod constants {
        include!("../src/core/constants.rs");
    }
    pub mod error {
        include!("../src/core/error.rs");
    }
    pub mod params {
        include!("../src/core/params.rs");
    }
    pub mod queue {
        include!("../src/core/queue.rs");
    }
    pub mod widgets {
        include!("../src/core/widgets.rs");
    }
}

use crate::core::queue::{ParamBridge, ParamWriter};
use crate::core::widgets::*;
use glam::Vec2;
use std::f32::consts::{FRAC_PI_2, PI};

#[derive(Default)]
struct SpyWriter {
    calls: Vec<(String, f32)>,
}

impl ParamWriter for SpyWriter {
    fn enqueue_or_write(&mut self, id: &str, value: f32) {
        self.calls.push((id.to_string(), value));
    }
}

fn at_angle(center: Vec2, radians: f32) -> Vec2 {
    center + Vec2::new(radians.cos(), radians.sin()) * 40.0
}

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

#[test]
fn rotary_half_turn_from_zero_is_half() {
    let center = Vec2::new(100.0, 100.0);
    let mut knob = RotaryKnob::new("speed", RotaryMode::Angular);
    let mut spy = SpyWriter::default();
    let theta0 = 0.3;

    knob.pointer_down(at_angle(center, theta0), center);
    let v = knob.pointer_move(at_angle(center, theta0 + PI), center, &mut spy);

    assert!(approx(v.unwrap(), 0.5), "got {:?}", v);
    assert_eq!(spy.calls.len(), 1);
    assert_eq!(spy.calls[0].0, "speed");
    assert!(approx(knob.rotation_deg(), 135.0));
}

#[test]
fn rotary_adds_delta_to_initial_rotation() {
    let center = Vec2::ZERO;
    let mut knob = RotaryKnob::new("twist", RotaryMode::Angular);
    knob.apply_external_value(0.25);
    assert!(approx(knob.rotation(), FRAC_PI_2));

    let mut spy = SpyWriter::default();
    knob.pointer_down(at_angle(center, -1.0), center);
    let v = knob
        .pointer_move(at_angle(center, -1.0 + FRAC_PI_2), center, &mut spy)
        .unwrap();
    assert!(approx(v, 0.5), "got {}", v);
}

#[test]
fn rotary_wraps_past_a_full_turn() {
    let center = Vec2::ZERO;
    let mut knob = RotaryKnob::new("hue", RotaryMode::Angular);
    knob.apply_external_value(0.75);

    let mut spy = SpyWriter::default();
    knob.pointer_down(at_angle(center, 0.0), center);
    let v = knob
        .pointer_move(at_angle(center, FRAC_PI_2 + 0.2), center, &mut spy)
        .unwrap();
    // 1.5π + π/2 + 0.2 wraps to 0.2 rad
    assert!(approx(v, 0.2 / (2.0 * PI)), "got {}", v);
    assert!((0.0..1.0).contains(&v));
}

#[test]
fn wrap_angle_stays_in_range() {
    assert!(approx(wrap_angle(-FRAC_PI_2), 1.5 * PI));
    assert!(approx(wrap_angle(5.0 * PI), PI));
    assert_eq!(wrap_angle(0.0), 0.0);
    let w = wrap_angle(-1e-9);
    assert!((0.0..2.0 * PI).contains(&w));
}

#[test]
fn rotary_ignores_moves_without_a_gesture() {
    let mut knob = RotaryKnob::new("speed", RotaryMode::Angular);
    let mut spy = SpyWriter::default();
    assert!(knob
        .pointer_move(Vec2::new(10.0, 0.0), Vec2::ZERO, &mut spy)
        .is_none());
    assert!(spy.calls.is_empty());
}

#[test]
fn rotary_cancel_ends_the_gesture() {
    let mut knob = RotaryKnob::new("speed", RotaryMode::Angular);
    let mut spy = SpyWriter::default();
    knob.pointer_down(Vec2::new(10.0, 0.0), Vec2::ZERO);
    assert!(knob.is_dragging());
    knob.pointer_cancel();
    assert!(!knob.is_dragging());
    assert!(knob
        .pointer_move(Vec2::new(0.0, 10.0), Vec2::ZERO, &mut spy)
        .is_none());

    knob.pointer_down(Vec2::new(10.0, 0.0), Vec2::ZERO);
    knob.pointer_up();
    assert!(!knob.is_dragging());
}

#[test]
fn rotary_every_move_is_written() {
    let center = Vec2::ZERO;
    let mut knob = RotaryKnob::new("density", RotaryMode::Angular);
    let mut spy = SpyWriter::default();
    knob.pointer_down(at_angle(center, 0.0), center);
    for i in 1..=5 {
        knob.pointer_move(at_angle(center, 0.1 * i as f32), center, &mut spy);
    }
    assert_eq!(spy.calls.len(), 5);
    assert!(approx(spy.calls[4].1, 0.5 / (2.0 * PI)));
}

#[test]
fn combined_axis_uses_horizontal_minus_vertical() {
    let mut knob = RotaryKnob::new("speed", RotaryMode::CombinedAxis { sensitivity: 0.005 });
    let mut spy = SpyWriter::default();
    knob.pointer_down(Vec2::new(0.0, 0.0), Vec2::ZERO);
    let v = knob
        .pointer_move(Vec2::new(40.0, -20.0), Vec2::ZERO, &mut spy)
        .unwrap();
    assert!(approx(v, 0.3), "got {}", v);

    let v = knob
        .pointer_move(Vec2::new(1000.0, 0.0), Vec2::ZERO, &mut spy)
        .unwrap();
    assert_eq!(v, 1.0);
    let v = knob
        .pointer_move(Vec2::new(-1000.0, 0.0), Vec2::ZERO, &mut spy)
        .unwrap();
    assert_eq!(v, 0.0);
}

#[test]
fn slider_drag_to_half_travel() {
    let mut slider = VolumeSlider::new("volume", 180.0, 40.0);
    let mut spy = SpyWriter::default();
    assert_eq!(slider.max_travel(), 140.0);

    slider.pointer_down(100.0);
    let v = slider.pointer_move(170.0, &mut spy).unwrap();
    assert!(approx(slider.offset(), 70.0));
    assert!(approx(v, 0.5));
    assert_eq!(spy.calls, vec![("volume".to_string(), 0.5)]);
}

#[test]
fn slider_clamps_to_track() {
    let mut slider = VolumeSlider::new("volume", 180.0, 40.0);
    let mut spy = SpyWriter::default();
    slider.pointer_down(0.0);
    assert_eq!(slider.pointer_move(500.0, &mut spy), Some(1.0));
    assert_eq!(slider.offset(), 140.0);
    assert_eq!(slider.pointer_move(-500.0, &mut spy), Some(0.0));
    assert_eq!(slider.offset(), 0.0);
}

#[test]
fn slider_default_goes_through_the_queue_before_ready() {
    let mut bridge = ParamBridge::new();
    let mut slider = VolumeSlider::new("volume", 180.0, 40.0);
    slider.apply_default(0.8, &mut bridge);
    assert!(approx(slider.value(), 0.8));
    assert!(approx(bridge.pending().get("volume").unwrap(), 0.8));
}

#[test]
fn slider_default_survives_an_unmeasured_track() {
    let mut bridge = ParamBridge::new();
    let mut slider = VolumeSlider::new("volume", 0.0, 0.0);
    slider.apply_default(0.8, &mut bridge);
    assert_eq!(bridge.pending().get("volume"), Some(0.8));
    assert_eq!(slider.offset(), 0.0);

    slider.set_geometry(180.0, 40.0);
    assert!(approx(slider.value(), 0.8));
    assert!(approx(slider.offset(), 112.0));
}

#[test]
fn slider_drag_without_travel_keeps_value() {
    let mut slider = VolumeSlider::new("volume", 30.0, 40.0);
    let mut spy = SpyWriter::default();
    slider.apply_external_value(0.7);
    slider.pointer_down(0.0);
    assert_eq!(slider.pointer_move(50.0, &mut spy), Some(0.7));
    assert_eq!(slider.offset(), 0.0);
}

#[test]
fn slider_geometry_change_keeps_value() {
    let mut slider = VolumeSlider::new("volume", 180.0, 40.0);
    slider.apply_external_value(0.5);
    slider.set_geometry(240.0, 40.0);
    assert!(approx(slider.offset(), 100.0));
    assert!(approx(slider.value(), 0.5));
}

#[test]
fn toggle_clicks_write_once_each() {
    let mut button = ToggleButton::new("b1", ToggleValues { off: 0.0, on: 1.0 });
    let mut spy = SpyWriter::default();
    assert!(!button.is_active());

    assert_eq!(button.click(&mut spy), 1.0);
    assert_eq!(spy.calls, vec![("b1".to_string(), 1.0)]);
    assert_eq!(button.click(&mut spy), 0.0);
    assert_eq!(spy.calls.len(), 2);
    assert_eq!(spy.calls[1], ("b1".to_string(), 0.0));
    assert!(!button.is_active());
}

#[test]
fn toggle_with_one_two_states() {
    let mut button = ToggleButton::new("b2", ToggleValues { off: 1.0, on: 2.0 });
    assert_eq!(button.value(), 1.0);
    button.apply_external_value(2.0);
    assert!(button.is_active());
    button.apply_external_value(1.0);
    assert!(!button.is_active());
}

#[test]
fn external_values_never_reach_the_writer() {
    let mut spy = SpyWriter::default();
    let center = Vec2::ZERO;

    let mut knob = RotaryKnob::new("speed", RotaryMode::Angular);
    let mut slider = VolumeSlider::new("volume", 180.0, 40.0);
    let mut button = ToggleButton::new("b1", ToggleValues::default());

    // a gesture in progress must not turn an inbound value into a write
    knob.pointer_down(at_angle(center, 0.0), center);
    knob.apply_external_value(0.7);
    slider.apply_external_value(0.7);
    button.apply_external_value(0.7);

    assert!(approx(knob.value(), 0.7));
    assert!(approx(knob.rotation_deg(), 0.7 * 270.0));
    assert!(approx(slider.offset(), 98.0));
    assert!(button.is_active());

    // only the user's own click is written
    button.click(&mut spy);
    assert_eq!(spy.calls, vec![("b1".to_string(), 0.0)]);
}
