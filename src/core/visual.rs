use super::analysis::BandLevels;
use super::constants::{
    BAND_SMOOTHING_TAU_SEC, FLASH_DECAY_PER_SEC, SHAKE_PER_BASS, TIME_STEP_PER_SEC,
};
use fnv::FnvHashMap;
use rand::Rng;

/// Audio-reactive parameters of the tunnel pass.
///
/// Band levels are smoothed towards the analyser readings, control values are
/// mirrored from the widgets, and the two trigger effects (flash, post toggle)
/// are owned here: the flash decays on its own once fired.
#[derive(Debug, Default, Clone)]
pub struct VisualState {
    pub time: f32,
    pub bands: BandLevels,
    pub flash: f32,
    pub post_enabled: bool,
    params: FnvHashMap<String, f32>,
}

impl VisualState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_param(&mut self, id: &str, value: f32) {
        if let Some(v) = self.params.get_mut(id) {
            *v = value;
        } else {
            self.params.insert(id.to_string(), value);
        }
    }

    /// Mirrored control value, `default` until the control reports one.
    pub fn param(&self, id: &str, default: f32) -> f32 {
        self.params.get(id).copied().unwrap_or(default)
    }

    pub fn trigger_flash(&mut self, amount: Option<f32>) {
        let a = amount.unwrap_or(1.0).clamp(0.0, 1.0);
        self.flash = self.flash.max(a);
    }

    /// Explicit payload sets the state (non-zero = on); no payload flips it.
    pub fn toggle_post(&mut self, payload: Option<f32>) {
        self.post_enabled = match payload {
            Some(v) => v != 0.0,
            None => !self.post_enabled,
        };
        log::info!("[visual] post-processing {}", if self.post_enabled { "on" } else { "off" });
    }

    pub fn update(&mut self, dt_sec: f32, target: BandLevels) {
        let dt = dt_sec.max(0.0);
        let speed = 0.5 + 1.5 * self.param("speed", 0.33);
        self.time += TIME_STEP_PER_SEC * speed * dt;

        let alpha = 1.0 - (-dt / BAND_SMOOTHING_TAU_SEC).exp();
        self.bands.bass += (target.bass - self.bands.bass) * alpha;
        self.bands.mid += (target.mid - self.bands.mid) * alpha;
        self.bands.treble += (target.treble - self.bands.treble) * alpha;

        self.flash *= (-dt * FLASH_DECAY_PER_SEC).exp();
        if self.flash < 1e-3 {
            self.flash = 0.0;
        }
    }

    #[inline]
    pub fn shake_amplitude(&self) -> f32 {
        self.bands.bass * SHAKE_PER_BASS
    }

    /// Random camera offset within `±amplitude / 2` on each axis.
    pub fn shake_offset<R: Rng>(&self, rng: &mut R) -> [f32; 2] {
        let amp = self.shake_amplitude();
        [
            amp * (rng.gen::<f32>() - 0.5),
            amp * (rng.gen::<f32>() - 0.5),
        ]
    }
}
