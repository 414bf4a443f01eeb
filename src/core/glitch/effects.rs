//=========================================================================
// Glitch Effect State
//=========================================================================
//
// Per-effect timers and flags driven by GlitchRenderer::update().
// Each effect owns its clock; the renderer owns the random source and
// passes it in, so every roll is reproducible under a seeded RNG.
//
//=========================================================================

//=== External Dependencies ===============================================

use rand::Rng;

//=== Internal Dependencies ===============================================

use crate::core::render::Vec2;

//=== Constants ===========================================================

/// Per-tick decay applied to the analog ghost offset between triggers.
pub(super) const ANALOG_DECAY: f32 = 0.8;

/// Largest horizontal analog offset at intensity 1.0 (vertical is half).
pub(super) const ANALOG_MAX_OFFSET: f32 = 6.0;

/// Length of one flicker-square cycle.
pub(super) const SQUARE_CYCLE: f32 = 1.2;

const SQUARE_WINDOW_MIN: f32 = 0.05;
const SQUARE_WINDOW_MAX: f32 = 0.2;

//=== JitterEffect ========================================================

/// A binary effect re-rolled every `period` seconds.
#[derive(Debug, Clone)]
pub(super) struct JitterEffect {
    pub(super) enabled: bool,
    pub(super) active: bool,
    pub(super) intensity: f32,
    period: f32,
    timer: f32,
}

impl JitterEffect {
    pub(super) fn new(period: f32) -> Self {
        Self {
            enabled: true,
            active: false,
            intensity: 1.0,
            period,
            timer: 0.0,
        }
    }

    /// Enabling arms the effect immediately; disabling clears it.
    pub(super) fn configure(&mut self, enabled: bool, intensity: f32) {
        self.enabled = enabled;
        self.active = enabled;
        self.intensity = intensity.max(0.0);
    }

    /// Advances the timer and re-rolls `active` on crossing the period.
    pub(super) fn update<R: Rng>(&mut self, dt: f32, rng: &mut R) {
        if !self.enabled {
            return;
        }
        self.timer += dt;
        if self.timer > self.period {
            self.active = rng.random_bool(0.5);
            self.timer = 0.0;
        }
    }
}

//=== AnalogGhost =========================================================

/// Chromatic ghost offset: a decaying random walk.
#[derive(Debug, Clone)]
pub(super) struct AnalogGhost {
    pub(super) enabled: bool,
    pub(super) intensity: f32,
    pub(super) offset: Vec2,
    period: f32,
    timer: f32,
}

impl AnalogGhost {
    pub(super) fn new(period: f32) -> Self {
        Self {
            enabled: false,
            intensity: 1.0,
            offset: Vec2::ZERO,
            period,
            timer: 0.0,
        }
    }

    pub(super) fn configure(&mut self, enabled: bool, intensity: f32) {
        self.enabled = enabled;
        self.intensity = intensity.max(0.0);
        if !enabled {
            self.offset = Vec2::ZERO;
            self.timer = 0.0;
        }
    }

    /// Re-triggers with 50% chance each period, otherwise decays.
    pub(super) fn update<R: Rng>(&mut self, dt: f32, rng: &mut R) {
        if !self.enabled {
            return;
        }

        self.timer += dt;
        if self.timer > self.period {
            self.timer = 0.0;
            if rng.random_bool(0.5) {
                let reach = ANALOG_MAX_OFFSET * self.intensity;
                self.offset = Vec2::new(
                    rng.random_range(-reach..=reach),
                    rng.random_range(-reach / 2.0..=reach / 2.0),
                );
                return;
            }
        }

        self.offset = self.offset * ANALOG_DECAY;
    }
}

//=== SquareBurst =========================================================

/// Timing for the flicker squares: visible only inside a short random
/// window of each cycle.
#[derive(Debug, Clone)]
pub(super) struct SquareBurst {
    pub(super) enabled: bool,
    timer: f32,
    window_start: f32,
    window_len: f32,
}

impl SquareBurst {
    pub(super) fn new() -> Self {
        Self {
            enabled: false,
            timer: 0.0,
            window_start: 0.0,
            window_len: SQUARE_WINDOW_MAX,
        }
    }

    pub(super) fn update<R: Rng>(&mut self, dt: f32, rng: &mut R) {
        if !self.enabled {
            return;
        }

        self.timer += dt;
        if self.timer >= SQUARE_CYCLE {
            self.timer = 0.0;
            self.window_start = rng.random_range(0.0..SQUARE_CYCLE - SQUARE_WINDOW_MAX);
            self.window_len = rng.random_range(SQUARE_WINDOW_MIN..=SQUARE_WINDOW_MAX);
        }
    }

    pub(super) fn visible(&self) -> bool {
        self.enabled
            && self.timer >= self.window_start
            && self.timer < self.window_start + self.window_len
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(7)
    }

    #[test]
    fn jitter_does_not_roll_before_period() {
        let mut effect = JitterEffect::new(0.8);
        let mut rng = rng();

        effect.update(0.5, &mut rng);
        effect.update(0.3, &mut rng);
        assert!(!effect.active, "0.8s exactly must not cross the threshold");
    }

    #[test]
    fn jitter_rolls_both_outcomes_over_time() {
        let mut effect = JitterEffect::new(0.8);
        let mut rng = rng();
        let mut seen = [false, false];

        for _ in 0..200 {
            effect.update(0.9, &mut rng);
            seen[effect.active as usize] = true;
        }
        assert!(seen[0] && seen[1], "Both states should occur over 200 rolls");
    }

    #[test]
    fn disabled_jitter_never_activates() {
        let mut effect = JitterEffect::new(0.8);
        effect.configure(false, 1.0);
        let mut rng = rng();

        for _ in 0..50 {
            effect.update(1.0, &mut rng);
        }
        assert!(!effect.active);
    }

    #[test]
    fn analog_offset_stays_within_reach() {
        let mut ghost = AnalogGhost::new(0.05);
        ghost.configure(true, 1.0);
        let mut rng = rng();

        for _ in 0..500 {
            ghost.update(0.06, &mut rng);
            assert!(ghost.offset.x.abs() <= ANALOG_MAX_OFFSET);
            assert!(ghost.offset.y.abs() <= ANALOG_MAX_OFFSET / 2.0);
        }
    }

    #[test]
    fn analog_offset_decays_between_triggers() {
        let mut ghost = AnalogGhost::new(0.05);
        ghost.configure(true, 1.0);
        ghost.offset = Vec2::new(5.0, -2.5);
        let mut rng = rng();

        ghost.update(0.01, &mut rng);
        assert_eq!(ghost.offset, Vec2::new(4.0, -2.0));
    }

    #[test]
    fn disabling_analog_clears_offset() {
        let mut ghost = AnalogGhost::new(0.05);
        ghost.configure(true, 1.0);
        ghost.offset = Vec2::new(3.0, 1.0);
        ghost.configure(false, 1.0);
        assert_eq!(ghost.offset, Vec2::ZERO);
    }

    #[test]
    fn squares_flicker_within_cycle() {
        let mut burst = SquareBurst::new();
        burst.enabled = true;
        let mut rng = rng();
        let mut visible = 0;
        let mut hidden = 0;

        for _ in 0..600 {
            burst.update(0.01, &mut rng);
            if burst.visible() { visible += 1 } else { hidden += 1 }
        }
        assert!(visible > 0, "Squares should show at some point");
        assert!(hidden > visible, "Squares are visible only briefly each cycle");
    }
}
