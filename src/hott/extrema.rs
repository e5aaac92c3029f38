//! Session-lifetime minimum and maximum trackers for reply fields.

/// Running maximum; only ever moves up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunningMax<T> {
    max: Option<T>,
}

impl<T: Copy + Ord> RunningMax<T> {
    /// Tracker that has not seen a sample yet
    pub const fn new() -> Self {
        Self { max: None }
    }

    /// Fold `sample` in and return the maximum so far
    pub fn update(&mut self, sample: T) -> T {
        let max = match self.max {
            Some(max) if max >= sample => max,
            _ => sample,
        };
        self.max = Some(max);
        max
    }

    /// Maximum so far, `None` before the first sample
    pub fn get(&self) -> Option<T> {
        self.max
    }

    pub fn reset(&mut self) {
        self.max = None;
    }
}

impl<T: Copy + Ord> Default for RunningMax<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Running minimum; only ever moves down
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunningMin<T> {
    min: Option<T>,
}

impl<T: Copy + Ord> RunningMin<T> {
    /// Tracker that has not seen a sample yet
    pub const fn new() -> Self {
        Self { min: None }
    }

    /// Fold `sample` in and return the minimum so far
    pub fn update(&mut self, sample: T) -> T {
        let min = match self.min {
            Some(min) if min <= sample => min,
            _ => sample,
        };
        self.min = Some(min);
        min
    }

    /// Minimum so far, `None` before the first sample
    pub fn get(&self) -> Option<T> {
        self.min
    }

    pub fn reset(&mut self) {
        self.min = None;
    }
}

impl<T: Copy + Ord> Default for RunningMin<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_trackers_are_empty() {
        assert_eq!(RunningMax::<u16>::new().get(), None);
        assert_eq!(RunningMin::<u16>::new().get(), None);
    }

    #[test]
    fn test_first_sample_seeds_both() {
        let mut max = RunningMax::new();
        let mut min = RunningMin::new();
        assert_eq!(max.update(500u16), 500);
        assert_eq!(min.update(500u16), 500);
    }

    #[test]
    fn test_max_never_decreases() {
        let mut max = RunningMax::new();
        let samples = [500u16, 520, 480, 610, 0, 609, u16::MAX, 3];
        let mut previous = 0;

        for sample in samples {
            let current = max.update(sample);
            assert!(current >= previous);
            assert!(current >= sample);
            previous = current;
        }
        assert_eq!(max.get(), Some(u16::MAX));
    }

    #[test]
    fn test_min_never_increases() {
        let mut min = RunningMin::new();
        let samples = [500u16, 520, 480, 610, 10, 609, u16::MAX, 11];
        let mut previous = u16::MAX;

        for sample in samples {
            let current = min.update(sample);
            assert!(current <= previous);
            assert!(current <= sample);
            previous = current;
        }
        assert_eq!(min.get(), Some(10));
    }

    #[test]
    fn test_reset_forgets_history() {
        let mut max = RunningMax::new();
        max.update(200u8);
        max.reset();
        assert_eq!(max.get(), None);
        assert_eq!(max.update(20), 20);

        let mut min = RunningMin::new();
        min.update(2u8);
        min.reset();
        assert_eq!(min.update(20), 20);
    }
}
