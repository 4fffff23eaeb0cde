//! Startup progress loader
//!
//! Progress climbs in uneven steps until it reaches 100%, at which point the
//! loader latches as finished and further ticks do nothing.

use rand::Rng;

/// Smallest and largest step per tick, in percent
const STEP_RANGE: std::ops::Range<f64> = 1.0..5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    /// Progress rounded down to a whole percent
    pub percent: u8,
    pub finished: bool,
}

#[derive(Debug, Clone, Default)]
pub struct Loader {
    progress: f64,
    finished: bool,
}

impl Loader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn percent(&self) -> u8 {
        self.progress.floor().clamp(0.0, 100.0) as u8
    }

    /// Advance by a random step
    pub fn tick(&mut self) -> Tick {
        let step = rand::rng().random_range(STEP_RANGE);
        self.advance(step)
    }

    /// Advance by `step` percent
    pub fn advance(&mut self, step: f64) -> Tick {
        if !self.finished {
            self.progress = (self.progress + step.max(0.0)).min(100.0);
            if self.progress >= 100.0 {
                self.finished = true;
                log::debug!("Loader finished");
            }
        }

        Tick {
            percent: self.percent(),
            finished: self.finished,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_floors_percent() {
        let mut loader = Loader::new();
        let tick = loader.advance(2.7);
        assert_eq!(tick.percent, 2);
        assert!(!tick.finished);
    }

    #[test]
    fn test_clamps_at_hundred_and_latches() {
        let mut loader = Loader::new();
        loader.advance(98.0);
        let tick = loader.advance(4.5);
        assert_eq!(tick, Tick { percent: 100, finished: true });

        let again = loader.advance(10.0);
        assert_eq!(again, Tick { percent: 100, finished: true });
    }

    #[test]
    fn test_random_ticks_finish() {
        let mut loader = Loader::new();
        let mut ticks = 0;
        let mut last = 0;
        while !loader.tick().finished {
            assert!(loader.percent() >= last);
            last = loader.percent();
            ticks += 1;
            assert!(ticks <= 100, "loader never finished");
        }
        assert_eq!(loader.percent(), 100);
        assert!(ticks >= 20);
    }
}
