use glam::Vec2;

use super::animation::SpriteKey;

/// Diagonal threshold on each normalized axis.
const DIAGONAL: f32 = 0.5;

/// 8-way sector for a normalized heading (screen coords, +y is down).
///
/// The vertical bands use +-0.5 on both axes, but the horizontal band
/// splits on the sign of x alone, so a heading of exactly (0, 0) reads as east.
pub fn sector(heading: Vec2) -> SpriteKey {
    let Vec2 { x: nx, y: ny } = heading;

    if ny < -DIAGONAL {
        if nx < -DIAGONAL {
            SpriteKey::NorthWest
        } else if nx > DIAGONAL {
            SpriteKey::NorthEast
        } else {
            SpriteKey::North
        }
    } else if ny > DIAGONAL {
        if nx < -DIAGONAL {
            SpriteKey::SouthWest
        } else if nx > DIAGONAL {
            SpriteKey::SouthEast
        } else {
            SpriteKey::South
        }
    } else if nx < 0.0 {
        SpriteKey::West
    } else {
        SpriteKey::East
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(deg: f32) -> Vec2 {
        let r = deg.to_radians();
        Vec2::new(r.cos(), r.sin())
    }

    #[test]
    fn cardinal_headings() {
        assert_eq!(sector(Vec2::new(0.0, -1.0)), SpriteKey::North);
        assert_eq!(sector(Vec2::new(0.0, 1.0)), SpriteKey::South);
        assert_eq!(sector(Vec2::new(1.0, 0.0)), SpriteKey::East);
        assert_eq!(sector(Vec2::new(-1.0, 0.0)), SpriteKey::West);
    }

    #[test]
    fn diagonal_headings() {
        assert_eq!(sector(at(-135.0)), SpriteKey::NorthWest);
        assert_eq!(sector(at(-45.0)), SpriteKey::NorthEast);
        assert_eq!(sector(at(135.0)), SpriteKey::SouthWest);
        assert_eq!(sector(at(45.0)), SpriteKey::SouthEast);
    }

    #[test]
    fn zero_x_in_the_horizontal_band_is_east() {
        assert_eq!(sector(Vec2::new(0.0, 0.0)), SpriteKey::East);
        assert_eq!(sector(Vec2::new(0.0, 0.5)), SpriteKey::East);
        assert_eq!(sector(Vec2::new(-0.0001, 0.5)), SpriteKey::West);
    }

    #[test]
    fn thresholds_are_strict() {
        // Exactly -0.5 / 0.5 stays out of the diagonal and vertical bands.
        assert_eq!(sector(Vec2::new(-0.5, -0.6)), SpriteKey::North);
        assert_eq!(sector(Vec2::new(0.5, 0.6)), SpriteKey::South);
        assert_eq!(sector(Vec2::new(0.8, -0.5)), SpriteKey::East);
        assert_eq!(sector(Vec2::new(-0.8, 0.5)), SpriteKey::West);
    }

    #[test]
    fn every_heading_maps_to_a_direction() {
        for step in 0..360 {
            let key = sector(at(step as f32));
            assert!(!key.is_throttled(), "{step} deg gave {}", key.name());
        }
    }
}
