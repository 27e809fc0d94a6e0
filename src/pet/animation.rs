/// Animation selector: a compass direction while chasing, or a behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteKey {
    Idle,
    Alert,
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
    Tired,
    Sleeping,
    ScratchSelf,
}

/// A grid cell as stored in the oneko sheet layout. Offsets are signed;
/// the absolute value is the column/row.
pub type Cell = (i32, i32);

impl SpriteKey {
    pub const ALL: [SpriteKey; 13] = [
        Self::Idle,
        Self::Alert,
        Self::North,
        Self::NorthEast,
        Self::East,
        Self::SouthEast,
        Self::South,
        Self::SouthWest,
        Self::West,
        Self::NorthWest,
        Self::Tired,
        Self::Sleeping,
        Self::ScratchSelf,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Alert => "alert",
            Self::North => "N",
            Self::NorthEast => "NE",
            Self::East => "E",
            Self::SouthEast => "SE",
            Self::South => "S",
            Self::SouthWest => "SW",
            Self::West => "W",
            Self::NorthWest => "NW",
            Self::Tired => "tired",
            Self::Sleeping => "sleeping",
            Self::ScratchSelf => "scratchSelf",
        }
    }

    /// Frame sequence for this key. Never empty.
    pub fn frames(self) -> &'static [Cell] {
        match self {
            Self::Idle => &[(-3, -3)],
            Self::Alert => &[(-7, -3)],
            Self::North => &[(-1, -2), (-1, -3)],
            Self::NorthEast => &[(0, -2), (0, -3)],
            Self::East => &[(-3, 0), (-3, -1)],
            Self::SouthEast => &[(-5, -1), (-5, -2)],
            Self::South => &[(-6, -3), (-7, -2)],
            Self::SouthWest => &[(-5, -3), (-6, -1)],
            Self::West => &[(-4, -2), (-4, -3)],
            Self::NorthWest => &[(-1, 0), (-1, -1)],
            Self::Tired => &[(-3, -2)],
            Self::Sleeping => &[(-2, 0), (-2, -1)],
            Self::ScratchSelf => &[(-5, 0), (-6, 0), (-7, 0)],
        }
    }

    /// Slow animations play from the animation tick instead of the frame counter.
    pub fn is_throttled(self) -> bool {
        matches!(
            self,
            Self::Idle | Self::Sleeping | Self::ScratchSelf | Self::Tired
        )
    }
}

/// Frame index before wrapping into the key's sequence.
pub fn effective_frame(key: SpriteKey, frame: u64, animation_tick: u64, divisor: u64) -> u64 {
    if key.is_throttled() {
        animation_tick / divisor.max(1)
    } else {
        frame
    }
}

/// Resolve the sheet column/row to draw for the given counters.
pub fn select_cell(key: SpriteKey, frame: u64, animation_tick: u64, divisor: u64) -> (u32, u32) {
    let frames = key.frames();
    let index = effective_frame(key, frame, animation_tick, divisor) % frames.len() as u64;
    let (col, row) = frames[index as usize];
    (col.unsigned_abs(), row.unsigned_abs())
}

/// Grid extent (columns, rows) the sprite map needs from a sheet.
pub fn required_grid() -> (u32, u32) {
    SpriteKey::ALL
        .iter()
        .flat_map(|k| k.frames().iter())
        .fold((0, 0), |(cols, rows), &(c, r)| {
            (cols.max(c.unsigned_abs() + 1), rows.max(r.unsigned_abs() + 1))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_key_has_frames_inside_the_grid() {
        let (cols, rows) = required_grid();
        assert_eq!((cols, rows), (8, 4));
        for key in SpriteKey::ALL {
            assert!(!key.frames().is_empty(), "{} has no frames", key.name());
        }
    }

    #[test]
    fn names_are_unique() {
        let mut names: Vec<_> = SpriteKey::ALL.iter().map(|k| k.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), SpriteKey::ALL.len());
    }

    #[test]
    fn frame_index_wraps_for_large_counters() {
        let key = SpriteKey::ScratchSelf;
        for frame in [0, 1, 2, 3, 1_000_003, u64::MAX] {
            let cell = select_cell(key, frame, frame, 4);
            assert!(cell.0 < 8 && cell.1 < 4);
        }
        // Throttled: tick 12 / 4 = 3, 3 % 3 = 0 -> first scratch frame.
        assert_eq!(select_cell(key, 99, 12, 4), (5, 0));
    }

    #[test]
    fn throttled_keys_change_at_most_every_fourth_tick() {
        for key in [
            SpriteKey::Idle,
            SpriteKey::Sleeping,
            SpriteKey::ScratchSelf,
            SpriteKey::Tired,
        ] {
            for tick in 0..40u64 {
                let a = effective_frame(key, tick, tick, 4);
                let b = effective_frame(key, tick + 1, tick + 1, 4);
                if (tick + 1) % 4 != 0 {
                    assert_eq!(a, b, "{} changed mid-step at {tick}", key.name());
                }
            }
        }
    }

    #[test]
    fn direction_keys_advance_every_tick() {
        assert_eq!(select_cell(SpriteKey::South, 0, 0, 4), (6, 3));
        assert_eq!(select_cell(SpriteKey::South, 1, 0, 4), (7, 2));
        assert_eq!(select_cell(SpriteKey::South, 2, 0, 4), (6, 3));
        assert!(!SpriteKey::Alert.is_throttled());
    }
}
