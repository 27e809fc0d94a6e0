/// Uniform integer source for the resting-animation dice.
pub trait RandomSource {
    /// A uniform draw from `0..bound`. `bound` is never zero.
    fn below(&mut self, bound: u32) -> u32;
}

impl RandomSource for fastrand::Rng {
    fn below(&mut self, bound: u32) -> u32 {
        self.u32(..bound)
    }
}

/// Replays a fixed list of draws, then keeps answering `bound - 1`.
#[cfg(test)]
pub struct Scripted {
    draws: std::collections::VecDeque<u32>,
    pub calls: usize,
}

#[cfg(test)]
impl Scripted {
    pub fn new(draws: impl IntoIterator<Item = u32>) -> Self {
        Self {
            draws: draws.into_iter().collect(),
            calls: 0,
        }
    }
}

#[cfg(test)]
impl RandomSource for Scripted {
    fn below(&mut self, bound: u32) -> u32 {
        self.calls += 1;
        match self.draws.pop_front() {
            Some(v) => v.min(bound - 1),
            None => bound - 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fastrand_stays_in_range() {
        let mut rng = fastrand::Rng::with_seed(7);
        for _ in 0..1000 {
            assert!(rng.below(200) < 200);
            assert!(rng.below(2) < 2);
        }
    }

    #[test]
    fn scripted_replays_then_saturates() {
        let mut rng = Scripted::new([0, 5]);
        assert_eq!(rng.below(200), 0);
        assert_eq!(rng.below(2), 1);
        assert_eq!(rng.below(200), 199);
        assert_eq!(rng.calls, 3);
    }
}
