//! Lap counting
//!
//! Tracks the current lap and the race distance. The distance is fixed at the
//! start of a trial and only grows when an overtime finish is triggered.

/// Lap counter for one trial
///
/// Laps are 1-indexed: before the first call to [`LapCounter::next_lap`] the
/// counter sits at lap 0 (the grid).
///
/// # Example
/// ```
/// use race_sim_core::LapCounter;
///
/// let mut laps = LapCounter::new(3);
/// assert_eq!(laps.next_lap(), Some(1));
/// assert_eq!(laps.next_lap(), Some(2));
/// assert_eq!(laps.next_lap(), Some(3));
/// assert_eq!(laps.next_lap(), None);
/// ```
#[derive(Debug, Clone)]
pub struct LapCounter {
    /// Last lap started (0 before the green flag)
    current_lap: usize,

    /// Total race distance in laps, including any overtime extension
    total_laps: usize,

    /// Laps added by overtime
    extra_laps: usize,
}

impl LapCounter {
    /// Create a counter for a race of `total_laps`
    ///
    /// # Panics
    /// Panics if `total_laps` is zero
    pub fn new(total_laps: usize) -> Self {
        assert!(total_laps > 0, "total_laps must be positive");
        Self {
            current_lap: 0,
            total_laps,
            extra_laps: 0,
        }
    }

    /// Start the next lap, or return `None` once the distance is complete
    pub fn next_lap(&mut self) -> Option<usize> {
        if self.current_lap >= self.total_laps {
            return None;
        }
        self.current_lap += 1;
        Some(self.current_lap)
    }

    /// Add laps to the race distance
    ///
    /// # Example
    /// ```
    /// use race_sim_core::LapCounter;
    ///
    /// let mut laps = LapCounter::new(2);
    /// laps.next_lap();
    /// laps.extend(2);
    /// assert_eq!(laps.total_laps(), 4);
    /// assert_eq!(laps.scheduled_laps(), 2);
    /// ```
    pub fn extend(&mut self, laps: usize) {
        self.total_laps += laps;
        self.extra_laps += laps;
    }

    /// Last lap started
    pub fn current_lap(&self) -> usize {
        self.current_lap
    }

    /// Race distance including overtime
    pub fn total_laps(&self) -> usize {
        self.total_laps
    }

    /// Race distance as scheduled, before overtime
    pub fn scheduled_laps(&self) -> usize {
        self.total_laps - self.extra_laps
    }

    /// True while on the last lap of the (possibly extended) distance
    pub fn is_final_lap(&self) -> bool {
        self.current_lap == self.total_laps
    }
}
