//! Fire simulation over a one-dimensional heat map.

use fastrand::Rng;

use super::{finish, millis};
use crate::{
    Result,
    animation::{AnimationId, Effect, EffectContext, effect_options},
    channel::Channel,
    color::heat_to_color,
    timing::{self, FrameControl},
};

/// Sparks ignite with this chance out of 256 per frame.
const SPARK_CHANCE: u8 = 160;

/// Sparks land on one of the lowest cells.
const SPARK_ZONE: usize = 7;

/// Per-cell heat, bottom of the flame at index 0.
struct HeatMap {
    cells: Vec<u8>,
}

impl HeatMap {
    fn new(len: usize) -> Self {
        Self {
            cells: vec![0; len],
        }
    }

    /// Cool every cell by a random amount scaled to the flame height
    #[allow(clippy::cast_possible_truncation)]
    fn cool(&mut self, rng: &mut Rng, cooling: u32) {
        let len = self.cells.len().max(1) as u32;
        let max_cooldown = cooling.saturating_mul(10) / len + 2;
        for cell in &mut self.cells {
            let cooldown = rng.u32(0..=max_cooldown).min(255) as u8;
            *cell = cell.saturating_sub(cooldown);
        }
    }

    /// Heat drifts up: each cell takes a weighted mix of the two below it
    #[allow(clippy::cast_possible_truncation)]
    fn drift(&mut self) {
        for i in (2..self.cells.len()).rev() {
            let below = u16::from(self.cells[i - 1]);
            let further = u16::from(self.cells[i - 2]);
            self.cells[i] = ((below + further * 2) / 3) as u8;
        }
    }

    /// Maybe ignite a new spark near the bottom
    fn ignite(&mut self, rng: &mut Rng) {
        if self.cells.is_empty() || rng.u8(..) >= SPARK_CHANCE {
            return;
        }
        let cell = rng.usize(0..=SPARK_ZONE.min(self.cells.len() - 1));
        self.cells[cell] = self.cells[cell].saturating_add(rng.u8(160..=255));
    }
}

effect_options! {
    pub struct FireFlickerOptions {
        /// Overall brightness of the flame
        intensity: f32 = 0.8,
        speed_ms: u64 = 30,
        /// How fast the flame cools; higher gives shorter flames
        cooling: u32 = 55,
    }
}

/// Flickering fire rising from pixel 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct FireFlickerEffect;

impl Effect for FireFlickerEffect {
    const ID: AnimationId = AnimationId::FireFlicker;
    type Options = FireFlickerOptions;

    fn run_with(
        &self,
        ctx: &mut EffectContext,
        channel: &mut dyn Channel,
        duration_ms: u64,
        options: &FireFlickerOptions,
    ) -> Result<()> {
        let mut heat = HeatMap::new(channel.pixel_count());
        let cancel = ctx.cancel_token();
        let rng = ctx.rng();

        timing::run_for_duration(duration_ms, millis(options.speed_ms), &cancel, |_, _| {
            heat.cool(rng, options.cooling);
            heat.drift();
            heat.ignite(rng);
            for (pixel, &cell) in heat.cells.iter().enumerate() {
                channel.set_pixel_rgb(pixel, heat_to_color(cell, options.intensity))?;
            }
            channel.show()?;
            Ok(FrameControl::Continue)
        })?;
        finish(channel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drift_moves_heat_upwards() {
        let mut heat = HeatMap {
            cells: vec![90, 30, 0, 0],
        };
        heat.drift();
        assert_eq!(heat.cells, [90, 30, 70, 20]);
    }

    #[test]
    fn test_ignite_stays_in_spark_zone() {
        let mut rng = Rng::with_seed(7);
        let mut heat = HeatMap::new(20);
        for _ in 0..200 {
            heat.ignite(&mut rng);
        }
        assert!(heat.cells[..=SPARK_ZONE].iter().any(|&cell| cell > 0));
        assert!(heat.cells[SPARK_ZONE + 1..].iter().all(|&cell| cell == 0));
    }
}
