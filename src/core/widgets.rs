use super::constants::ROTARY_SWEEP_DEG;
use super::queue::ParamWriter;
use glam::Vec2;
use std::f32::consts::TAU;

/// Shared surface of every control: identity, current value and the inbound
/// (store -> widget) path. Inbound updates only change visual state; there is
/// no writer in reach, so they cannot echo back into the store.
pub trait Control {
    fn id(&self) -> &str;
    fn value(&self) -> f32;
    fn apply_external_value(&mut self, value: f32);
}

#[inline]
pub fn wrap_angle(radians: f32) -> f32 {
    let r = radians.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if r >= TAU {
        0.0
    } else {
        r
    }
}

#[inline]
pub fn pointer_angle(pointer: Vec2, center: Vec2) -> f32 {
    let d = pointer - center;
    d.y.atan2(d.x)
}

// ---------------- Rotary ----------------

/// How a rotary turns pointer motion into a value. Fixed per instance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RotaryMode {
    /// Track the pointer's angle around the knob centre.
    Angular,
    /// `(dx - dy) * sensitivity`, clamped to `[0, 1]`.
    CombinedAxis { sensitivity: f32 },
}

#[derive(Clone, Copy, Debug)]
struct RotaryAnchor {
    pointer: Vec2,
    start_angle: f32,
    start_value: f32,
}

#[derive(Clone, Debug)]
pub struct RotaryKnob {
    id: String,
    mode: RotaryMode,
    value: f32,
    drag: Option<RotaryAnchor>,
}

impl RotaryKnob {
    pub fn new(id: impl Into<String>, mode: RotaryMode) -> Self {
        Self {
            id: id.into(),
            mode,
            value: 0.0,
            drag: None,
        }
    }

    pub fn mode(&self) -> RotaryMode {
        self.mode
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Current rotation in radians, `[0, 2π)` for the angular mode.
    pub fn rotation(&self) -> f32 {
        self.value * TAU
    }

    /// Rotation applied to the element.
    pub fn rotation_deg(&self) -> f32 {
        self.value * ROTARY_SWEEP_DEG
    }

    pub fn pointer_down(&mut self, pointer: Vec2, center: Vec2) {
        self.drag = Some(RotaryAnchor {
            pointer,
            start_angle: pointer_angle(pointer, center),
            start_value: self.value,
        });
    }

    /// Returns the new value when a drag is in progress; every move is
    /// pushed through `writer`.
    pub fn pointer_move(
        &mut self,
        pointer: Vec2,
        center: Vec2,
        writer: &mut dyn ParamWriter,
    ) -> Option<f32> {
        let anchor = self.drag?;
        self.value = match self.mode {
            RotaryMode::Angular => {
                let delta = pointer_angle(pointer, center) - anchor.start_angle;
                wrap_angle(anchor.start_value * TAU + delta) / TAU
            }
            RotaryMode::CombinedAxis { sensitivity } => {
                let d = pointer - anchor.pointer;
                (anchor.start_value + (d.x - d.y) * sensitivity).clamp(0.0, 1.0)
            }
        };
        writer.enqueue_or_write(&self.id, self.value);
        Some(self.value)
    }

    pub fn pointer_up(&mut self) {
        self.drag = None;
    }

    pub fn pointer_cancel(&mut self) {
        self.drag = None;
    }
}

impl Control for RotaryKnob {
    fn id(&self) -> &str {
        &self.id
    }

    fn value(&self) -> f32 {
        self.value
    }

    fn apply_external_value(&mut self, value: f32) {
        self.value = value.clamp(0.0, 1.0);
    }
}

// ---------------- Linear slider ----------------

#[derive(Clone, Copy, Debug)]
struct SliderAnchor {
    pointer_x: f32,
    offset: f32,
}

/// Horizontal thumb confined to a track, both measured in CSS pixels.
///
/// The normalized value is the state; the thumb offset is derived from the
/// current geometry, so a track that has not been laid out yet never loses
/// the value.
#[derive(Clone, Debug)]
pub struct VolumeSlider {
    id: String,
    track_width: f32,
    thumb_width: f32,
    value: f32,
    drag: Option<SliderAnchor>,
}

impl VolumeSlider {
    pub fn new(id: impl Into<String>, track_width: f32, thumb_width: f32) -> Self {
        Self {
            id: id.into(),
            track_width,
            thumb_width,
            value: 0.0,
            drag: None,
        }
    }

    #[inline]
    pub fn max_travel(&self) -> f32 {
        (self.track_width - self.thumb_width).max(0.0)
    }

    pub fn offset(&self) -> f32 {
        self.value * self.max_travel()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Re-measure after layout changes, keeping the current value.
    pub fn set_geometry(&mut self, track_width: f32, thumb_width: f32) {
        self.track_width = track_width;
        self.thumb_width = thumb_width;
    }

    /// Applies the initial value before any gesture and pushes it out, so a
    /// store that is not ready yet receives it on flush.
    pub fn apply_default(&mut self, value: f32, writer: &mut dyn ParamWriter) {
        self.apply_external_value(value);
        writer.enqueue_or_write(&self.id, self.value);
    }

    pub fn pointer_down(&mut self, pointer_x: f32) {
        self.drag = Some(SliderAnchor {
            pointer_x,
            offset: self.offset(),
        });
    }

    pub fn pointer_move(&mut self, pointer_x: f32, writer: &mut dyn ParamWriter) -> Option<f32> {
        let anchor = self.drag?;
        let max = self.max_travel();
        // without travel the thumb cannot move; the value stays put
        if max > 0.0 {
            let offset = (anchor.offset + (pointer_x - anchor.pointer_x)).clamp(0.0, max);
            self.value = offset / max;
        }
        writer.enqueue_or_write(&self.id, self.value);
        Some(self.value)
    }

    pub fn pointer_up(&mut self) {
        self.drag = None;
    }

    pub fn pointer_cancel(&mut self) {
        self.drag = None;
    }
}

impl Control for VolumeSlider {
    fn id(&self) -> &str {
        &self.id
    }

    fn value(&self) -> f32 {
        self.value
    }

    fn apply_external_value(&mut self, value: f32) {
        self.value = value.clamp(0.0, 1.0);
    }
}

// ---------------- Toggle ----------------

/// The two discrete values a toggle writes, e.g. `{0, 1}` or `{1, 2}`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ToggleValues {
    pub off: f32,
    pub on: f32,
}

impl Default for ToggleValues {
    fn default() -> Self {
        Self { off: 0.0, on: 1.0 }
    }
}

#[derive(Clone, Debug)]
pub struct ToggleButton {
    id: String,
    values: ToggleValues,
    active: bool,
}

impl ToggleButton {
    pub fn new(id: impl Into<String>, values: ToggleValues) -> Self {
        Self {
            id: id.into(),
            values,
            active: false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn values(&self) -> ToggleValues {
        self.values
    }

    pub fn click(&mut self, writer: &mut dyn ParamWriter) -> f32 {
        self.active = !self.active;
        let value = self.value();
        writer.enqueue_or_write(&self.id, value);
        value
    }
}

impl Control for ToggleButton {
    fn id(&self) -> &str {
        &self.id
    }

    fn value(&self) -> f32 {
        if self.active {
            self.values.on
        } else {
            self.values.off
        }
    }

    fn apply_external_value(&mut self, value: f32) {
        // snap to whichever state is closer
        self.active = (value - self.values.on).abs() < (value - self.values.off).abs();
    }
}
