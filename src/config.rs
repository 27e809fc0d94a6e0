use std::time::Duration;

use glam::{UVec2, Vec2};

/// Tunables for the pet. `Default` gives the classic oneko behaviour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PetConfig {
    /// Where the pet (its center) starts, in screen pixels.
    pub start_position: Vec2,
    /// Pixels moved per tick while chasing.
    pub speed: f32,
    /// Cursor must be strictly farther than this to trigger a chase.
    pub chase_distance: f32,
    /// Size of one sprite sheet cell. The window is exactly one cell.
    pub cell_size: UVec2,
    /// Simulation ticks per second.
    pub ticks_per_second: u32,
    /// Idle ticks before a resting animation may be picked.
    pub rest_delay_ticks: u64,
    /// One-in-N chance per idle tick (past the delay) to start resting.
    pub rest_chance: u32,
    /// Throttled animations advance one frame every N ticks.
    pub throttle_divisor: u64,
    /// Sheet color rendered fully transparent (LimeGreen).
    pub key_color: [u8; 3],
}

impl Default for PetConfig {
    fn default() -> Self {
        Self {
            start_position: Vec2::new(100.0, 100.0),
            speed: 10.0,
            chase_distance: 48.0,
            cell_size: UVec2::new(32, 32),
            ticks_per_second: 12,
            rest_delay_ticks: 100,
            rest_chance: 200,
            throttle_divisor: 4,
            key_color: [0x32, 0xCD, 0x32],
        }
    }
}

impl PetConfig {
    /// Time between ticks. Integer milliseconds, so 12 Hz is 83 ms.
    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(1000 / self.ticks_per_second.max(1) as u64)
    }

    /// Half the window size, used to center the window on the pet.
    pub fn half_cell(&self) -> glam::IVec2 {
        (self.cell_size / 2).as_ivec2()
    }
}
