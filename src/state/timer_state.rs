//! Countdown state for the session timer

use serde::Serialize;

/// Result of a single one-second tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Still counting, with the seconds left
    Running(u64),
    /// The count just went from 1 to 0
    Expired,
    /// Inactive or already at zero; nothing happened
    Idle,
}

/// Remaining-seconds counter driven by the timer task
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Countdown {
    pub active: bool,
    pub remaining_seconds: u64,
}

impl Countdown {
    /// Create a countdown with an initial duration
    pub fn new(seconds: u64, active: bool) -> Self {
        Self {
            active,
            remaining_seconds: seconds,
        }
    }

    /// Create an inactive countdown at zero
    pub fn inactive() -> Self {
        Self::new(0, false)
    }

    /// Advance by one second. `Expired` is returned exactly once.
    pub fn tick(&mut self) -> Tick {
        if !self.active || self.remaining_seconds == 0 {
            return Tick::Idle;
        }

        self.remaining_seconds -= 1;
        if self.remaining_seconds == 0 {
            self.active = false;
            Tick::Expired
        } else {
            Tick::Running(self.remaining_seconds)
        }
    }

    /// Stop counting, keeping the remaining value for display
    pub fn deactivate(&mut self) {
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.remaining_seconds
    }
}

impl Default for Countdown {
    fn default() -> Self {
        Self::inactive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expires_exactly_once_after_five_ticks() {
        let mut countdown = Countdown::new(5, true);
        let mut expirations = 0;

        for _ in 0..5 {
            if countdown.tick() == Tick::Expired {
                expirations += 1;
            }
        }
        assert_eq!(expirations, 1);
        assert_eq!(countdown.remaining_seconds(), 0);

        assert_eq!(countdown.tick(), Tick::Idle);
        assert_eq!(countdown.remaining_seconds(), 0);
    }

    #[test]
    fn reports_remaining_while_running() {
        let mut countdown = Countdown::new(3, true);
        assert_eq!(countdown.tick(), Tick::Running(2));
        assert_eq!(countdown.tick(), Tick::Running(1));
        assert_eq!(countdown.tick(), Tick::Expired);
    }

    #[test]
    fn inactive_countdown_does_not_move() {
        let mut countdown = Countdown::new(5, false);
        assert_eq!(countdown.tick(), Tick::Idle);
        assert_eq!(countdown.remaining_seconds(), 5);

        let mut countdown = Countdown::new(5, true);
        countdown.tick();
        countdown.deactivate();
        assert_eq!(countdown.tick(), Tick::Idle);
        assert_eq!(countdown.remaining_seconds(), 4);
    }
}
