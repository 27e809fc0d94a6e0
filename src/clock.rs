use std::time::Duration;

use instant::Instant;

/// How often to log tick stats (seconds).
const STATS_LOG_INTERVAL: f64 = 30.0;

/// Fixed-period tick deadline for `ControlFlow::WaitUntil`.
///
/// Deadlines advance by whole periods. If the loop falls behind by more than
/// a period the missed ticks are dropped instead of replayed back to back.
pub struct TickClock {
    period: Duration,
    next: Instant,
}

impl TickClock {
    pub fn new(period: Duration, now: Instant) -> Self {
        Self {
            period,
            next: now + period,
        }
    }

    /// When the next tick is due.
    pub fn deadline(&self) -> Instant {
        self.next
    }

    /// Returns true (and schedules the following tick) if a tick is due at `now`.
    pub fn poll(&mut self, now: Instant) -> bool {
        if now < self.next {
            return false;
        }
        self.next += self.period;
        if self.next <= now {
            self.next = now + self.period;
        }
        true
    }
}

/// Tick rate and cost, logged periodically.
pub struct TickStats {
    tick_count: u64,
    last_log_time: Instant,
    ticks_since_log: u32,
    cost_sum: Duration,
    cost_max: Duration,
}

impl TickStats {
    pub fn new(now: Instant) -> Self {
        Self {
            tick_count: 0,
            last_log_time: now,
            ticks_since_log: 0,
            cost_sum: Duration::ZERO,
            cost_max: Duration::ZERO,
        }
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn record_tick(&mut self, cost: Duration, now: Instant) {
        self.tick_count += 1;
        self.ticks_since_log += 1;
        self.cost_sum += cost;
        self.cost_max = self.cost_max.max(cost);

        let elapsed = now.duration_since(self.last_log_time).as_secs_f64();
        if elapsed >= STATS_LOG_INTERVAL {
            let avg_us = self.cost_sum.as_secs_f64() * 1_000_000.0 / self.ticks_since_log as f64;
            log::info!(
                "Ticks: {:.1} Hz | avg: {:.0}us | max: {:.0}us | total ticks: {}",
                self.ticks_since_log as f64 / elapsed,
                avg_us,
                self.cost_max.as_secs_f64() * 1_000_000.0,
                self.tick_count,
            );
            self.last_log_time = now;
            self.ticks_since_log = 0;
            self.cost_sum = Duration::ZERO;
            self.cost_max = Duration::ZERO;
        }
    }
}
