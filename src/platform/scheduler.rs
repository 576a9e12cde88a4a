//! Fixed timestep accumulator

/// Slack for float error when comparing the accumulator to whole steps
const STEP_EPSILON: f64 = 1e-9;

/// Turns elapsed clock time into a bounded number of fixed ticks
#[derive(Debug, Clone)]
pub struct FixedStep {
    step: f64,
    max_substeps: u32,
    accumulator: f64,
    last: Option<f64>,
}

impl FixedStep {
    /// `step` in seconds, at least one substep per frame
    pub fn new(step: f64, max_substeps: u32) -> Self {
        Self {
            step: step.max(1e-3),
            max_substeps: max_substeps.max(1),
            accumulator: 0.0,
            last: None,
        }
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    /// Feed the current clock reading. Returns how many ticks to run now.
    ///
    /// The first reading only sets the baseline. A long stall is clipped to
    /// `max_substeps` worth of time so the loop never tries to catch up.
    pub fn advance(&mut self, now: f64) -> u32 {
        let elapsed = self.last.map_or(0.0, |last| (now - last).max(0.0));
        self.last = Some(now);

        let max_frame = self.step * f64::from(self.max_substeps);
        self.accumulator += elapsed.min(max_frame);

        let available = (self.accumulator / self.step + STEP_EPSILON).floor() as u32;
        let steps = available.min(self.max_substeps);
        self.accumulator = (self.accumulator - f64::from(steps) * self.step).max(0.0);
        steps
    }

    /// Fraction of a step left in the accumulator (render interpolation)
    pub fn alpha(&self) -> f64 {
        (self.accumulator / self.step).clamp(0.0, 1.0)
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_first_reading_is_baseline() {
        let mut fixed = FixedStep::new(0.016, 8);
        assert_eq!(fixed.advance(100.0), 0);
        assert_eq!(fixed.advance(100.016), 1);
    }

    #[test]
    fn test_remainder_carries_over() {
        let mut fixed = FixedStep::new(0.016, 8);
        fixed.advance(0.0);
        assert_eq!(fixed.advance(0.040), 2);
        assert!((fixed.alpha() - 0.5).abs() < 1e-6);
        assert_eq!(fixed.advance(0.048), 1);
        assert!(fixed.alpha() < 1e-6);
    }

    #[test]
    fn test_stall_is_capped() {
        let mut fixed = FixedStep::new(0.016, 8);
        fixed.advance(0.0);
        assert_eq!(fixed.advance(10.0), 8);
        assert_eq!(fixed.advance(10.0), 0);
    }

    #[test]
    fn test_clock_going_backwards() {
        let mut fixed = FixedStep::new(0.016, 8);
        fixed.advance(5.0);
        assert_eq!(fixed.advance(1.0), 0);
        fixed.reset();
        assert_eq!(fixed.advance(3.0), 0);
    }

    proptest! {
        #[test]
        fn prop_never_exceeds_cap(gaps in proptest::collection::vec(0.0f64..2.0, 1..50), cap in 1u32..12) {
            let mut fixed = FixedStep::new(0.016, cap);
            let mut now = 0.0;
            fixed.advance(now);
            for gap in gaps {
                now += gap;
                prop_assert!(fixed.advance(now) <= cap);
            }
        }
    }
}
