pub mod animation;
pub mod direction;
pub mod rng;

use glam::{IVec2, Vec2};

use crate::config::PetConfig;
use self::animation::SpriteKey;
use self::rng::RandomSource;

/// Animations the pet may fall into after idling for a while.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resting {
    Sleeping,
    ScratchSelf,
}

impl Resting {
    const CHOICES: [Resting; 2] = [Resting::Sleeping, Resting::ScratchSelf];

    pub fn key(self) -> SpriteKey {
        match self {
            Resting::Sleeping => SpriteKey::Sleeping,
            Resting::ScratchSelf => SpriteKey::ScratchSelf,
        }
    }
}

/// What the window needs to do after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The pet moved; place the window's top-left here.
    Moved { window_origin: IVec2 },
    /// The pet stayed put.
    Stayed,
}

/// The pet's whole mutable state. One instance, owned by the app.
#[derive(Debug, Clone)]
pub struct Pet {
    config: PetConfig,
    position: Vec2,
    key: SpriteKey,
    /// Ticks since the last resting pick; drives direction animations.
    frame: u64,
    /// Consecutive ticks spent within chase distance.
    idle_ticks: u64,
    resting: Option<Resting>,
    /// Drives the throttled animations.
    animation_tick: u64,
}

impl Pet {
    pub fn new(config: PetConfig) -> Self {
        Self {
            config,
            position: config.start_position,
            key: SpriteKey::Idle,
            frame: 0,
            idle_ticks: 0,
            resting: None,
            animation_tick: 0,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn key(&self) -> SpriteKey {
        self.key
    }

    /// Top-left of a cell-sized window centered on the pet.
    pub fn window_origin(&self) -> IVec2 {
        // Truncate toward zero before centering, like an int cast.
        IVec2::new(self.position.x as i32, self.position.y as i32) - self.config.half_cell()
    }

    /// Advance one tick toward `cursor`.
    pub fn tick(&mut self, cursor: Vec2, rng: &mut impl RandomSource) -> TickOutcome {
        let delta = cursor - self.position;
        let distance = delta.length();
        let prev_key = self.key;

        let outcome = if distance > self.config.chase_distance {
            self.idle_ticks = 0;
            self.resting = None;

            let heading = delta / distance;
            self.position += heading * self.config.speed;
            self.key = direction::sector(heading);

            TickOutcome::Moved {
                window_origin: self.window_origin(),
            }
        } else {
            self.idle_ticks += 1;

            if self.resting.is_none()
                && self.idle_ticks > self.config.rest_delay_ticks
                && rng.below(self.config.rest_chance.max(1)) == 0
            {
                let pick = Resting::CHOICES[rng.below(Resting::CHOICES.len() as u32) as usize];
                log::info!("Neko starts {} after {} idle ticks", pick.key().name(), self.idle_ticks);
                self.resting = Some(pick);
                self.frame = 0;
                self.animation_tick = 0;
            }

            self.key = self.resting.map_or(SpriteKey::Idle, Resting::key);
            TickOutcome::Stayed
        };

        self.animation_tick += 1;
        self.frame += 1;

        if self.key != prev_key {
            log::debug!("Neko {} -> {}", prev_key.name(), self.key.name());
        }

        outcome
    }

    /// Sheet column/row for the frame that should be on screen now.
    pub fn current_cell(&self) -> (u32, u32) {
        animation::select_cell(
            self.key,
            self.frame,
            self.animation_tick,
            self.config.throttle_divisor,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::rng::Scripted;
    use super::*;

    fn pet_at(x: f32, y: f32) -> Pet {
        Pet::new(PetConfig {
            start_position: Vec2::new(x, y),
            ..Default::default()
        })
    }

    /// Random source that never triggers a rest.
    fn never() -> Scripted {
        Scripted::new([])
    }

    #[test]
    fn starts_idle_at_the_configured_position() {
        let pet = Pet::new(PetConfig::default());
        assert_eq!(pet.position(), Vec2::new(100.0, 100.0));
        assert_eq!(pet.key(), SpriteKey::Idle);
        assert_eq!(pet.window_origin(), IVec2::new(84, 84));
    }

    #[test]
    fn cursor_exactly_at_threshold_stays_idle() {
        let mut pet = pet_at(100.0, 100.0);
        let outcome = pet.tick(Vec2::new(100.0, 148.0), &mut never());
        assert_eq!(outcome, TickOutcome::Stayed);
        assert_eq!(pet.position(), Vec2::new(100.0, 100.0));
        assert_eq!(pet.key(), SpriteKey::Idle);
        assert_eq!(pet.idle_ticks, 1);
    }

    #[test]
    fn chases_straight_down() {
        let mut pet = pet_at(100.0, 100.0);
        let outcome = pet.tick(Vec2::new(100.0, 200.0), &mut never());
        assert_eq!(pet.key(), SpriteKey::South);
        assert!((pet.position() - Vec2::new(100.0, 110.0)).length() < 1e-4);
        assert_eq!(
            outcome,
            TickOutcome::Moved {
                window_origin: IVec2::new(84, 94)
            }
        );
    }

    #[test]
    fn chase_step_is_speed_long_in_any_direction() {
        for (cx, cy) in [(400.0, 100.0), (-300.0, -250.0), (160.0, 37.0), (101.0, 900.0)] {
            let mut pet = pet_at(100.0, 100.0);
            let before = pet.position();
            let cursor = Vec2::new(cx, cy);
            pet.tick(cursor, &mut never());
            let step = pet.position() - before;
            assert!((step.length() - 10.0).abs() < 1e-3);
            let expected = (cursor - before).normalize() * 10.0;
            assert!((step - expected).length() < 1e-3);
        }
    }

    #[test]
    fn idle_ticks_never_move_the_pet() {
        let mut pet = pet_at(50.0, 50.0);
        for i in 0..300 {
            let wobble = Vec2::new((i % 7) as f32, (i % 5) as f32 * 3.0);
            assert_eq!(pet.tick(Vec2::new(50.0, 50.0) + wobble, &mut never()), TickOutcome::Stayed);
            assert_eq!(pet.position(), Vec2::new(50.0, 50.0));
        }
    }

    #[test]
    fn chase_resets_idle_counter_and_rest() {
        let mut pet = pet_at(0.0, 0.0);
        // 101 idle ticks, the first draw past the delay triggers sleeping.
        let mut rng = Scripted::new([0, 0]);
        for _ in 0..101 {
            pet.tick(Vec2::ZERO, &mut rng);
        }
        assert_eq!(pet.resting, Some(Resting::Sleeping));
        assert_eq!(pet.key(), SpriteKey::Sleeping);

        pet.tick(Vec2::new(500.0, 0.0), &mut rng);
        assert_eq!(pet.idle_ticks, 0);
        assert_eq!(pet.resting, None);
        assert_eq!(pet.key(), SpriteKey::East);
    }

    #[test]
    fn rest_is_only_rolled_after_the_delay() {
        let mut pet = pet_at(0.0, 0.0);
        let mut rng = Scripted::new([]);
        for _ in 0..100 {
            pet.tick(Vec2::ZERO, &mut rng);
        }
        assert_eq!(rng.calls, 0);
        pet.tick(Vec2::ZERO, &mut rng);
        assert_eq!(rng.calls, 1);
        assert_eq!(pet.resting, None);
        assert_eq!(pet.key(), SpriteKey::Idle);
    }

    #[test]
    fn rest_triggers_on_the_first_zero_draw() {
        let mut pet = pet_at(0.0, 0.0);
        for _ in 0..100 {
            pet.tick(Vec2::ZERO, &mut never());
        }
        // Ticks 101 and 102 miss, tick 103 hits and picks scratching.
        let mut rng = Scripted::new([7, 199, 0, 1]);
        pet.tick(Vec2::ZERO, &mut rng);
        pet.tick(Vec2::ZERO, &mut rng);
        assert_eq!(pet.resting, None);
        pet.tick(Vec2::ZERO, &mut rng);
        assert_eq!(pet.resting, Some(Resting::ScratchSelf));
        assert_eq!(pet.key(), SpriteKey::ScratchSelf);
        // Counters were reset, then bumped once by the same tick.
        assert_eq!(pet.frame, 1);
        assert_eq!(pet.animation_tick, 1);

        // Once chosen, no further draws.
        let calls = rng.calls;
        for _ in 0..50 {
            pet.tick(Vec2::ZERO, &mut rng);
        }
        assert_eq!(rng.calls, calls);
        assert_eq!(pet.key(), SpriteKey::ScratchSelf);
    }

    #[test]
    fn counters_advance_on_both_branches() {
        let mut pet = pet_at(0.0, 0.0);
        pet.tick(Vec2::ZERO, &mut never());
        pet.tick(Vec2::new(1000.0, 0.0), &mut never());
        assert_eq!(pet.frame, 2);
        assert_eq!(pet.animation_tick, 2);
    }

    #[test]
    fn running_animation_alternates_every_tick() {
        let mut pet = pet_at(0.0, 0.0);
        let far = Vec2::new(0.0, 10_000.0);
        pet.tick(far, &mut never());
        let a = pet.current_cell();
        pet.tick(far, &mut never());
        let b = pet.current_cell();
        pet.tick(far, &mut never());
        let c = pet.current_cell();
        assert_ne!(a, b);
        assert_eq!(a, c);
    }

    #[test]
    fn scratching_changes_frame_every_four_ticks() {
        let mut pet = pet_at(0.0, 0.0);
        for _ in 0..100 {
            pet.tick(Vec2::ZERO, &mut never());
        }
        let mut rng = Scripted::new([0, 1]);
        let mut cells = Vec::new();
        for _ in 0..12 {
            pet.tick(Vec2::ZERO, &mut rng);
            cells.push(pet.current_cell());
        }
        // animation_tick runs 1..=12, so frames 0,0,0,1,1,1,1,2,2,2,2,0.
        assert_eq!(cells[0], (5, 0));
        assert_eq!(cells[2], (5, 0));
        assert_eq!(cells[3], (6, 0));
        assert_eq!(cells[6], (6, 0));
        assert_eq!(cells[7], (7, 0));
        assert_eq!(cells[11], (5, 0));
    }
}
