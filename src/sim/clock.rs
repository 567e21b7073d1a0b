//! Hour clock over the representative month.

/// Days in the representative month every billing period is mapped onto.
pub const DAYS_PER_MONTH: usize = 30;
/// Hours per simulated day.
pub const HOURS_PER_DAY: usize = 24;
/// Hours in the representative month.
pub const HOURS_PER_MONTH: usize = DAYS_PER_MONTH * HOURS_PER_DAY;

/// One tick of the clock: position within the month and within the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    /// Hour index within the month (0-based).
    pub index: usize,
    /// Hour of day, `index % 24`.
    pub hour_of_day: usize,
}

/// A clock that walks a fixed number of hours in chronological order.
///
/// # Examples
///
/// ```
/// use battery_payback::sim::clock::Clock;
///
/// let hours: Vec<usize> = Clock::new(26).map(|tick| tick.hour_of_day).collect();
/// assert_eq!(hours[23], 23);
/// assert_eq!(hours[24], 0);
/// ```
pub struct Clock {
    current: usize,
    total: usize,
}

impl Clock {
    /// Creates a clock that ticks `total` hours.
    pub fn new(total: usize) -> Self {
        Self { current: 0, total }
    }

    /// Creates a clock over one representative month.
    pub fn month() -> Self {
        Self::new(HOURS_PER_MONTH)
    }

    /// Advances by one hour.
    ///
    /// # Returns
    ///
    /// * `Some(tick)` - The hour before advancing
    /// * `None` - If every hour has been consumed
    pub fn tick(&mut self) -> Option<Tick> {
        if self.current < self.total {
            let index = self.current;
            self.current += 1;
            Some(Tick {
                index,
                hour_of_day: index % HOURS_PER_DAY,
            })
        } else {
            None
        }
    }
}

impl Iterator for Clock {
    type Item = Tick;

    fn next(&mut self) -> Option<Tick> {
        self.tick()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_clock_has_720_hours() {
        assert_eq!(Clock::month().count(), 720);
    }

    #[test]
    fn tick_wraps_hour_of_day() {
        let mut clock = Clock::new(25);
        let ticks: Vec<Tick> = std::iter::from_fn(|| clock.tick()).collect();
        assert_eq!(ticks[0], Tick { index: 0, hour_of_day: 0 });
        assert_eq!(ticks[23].hour_of_day, 23);
        assert_eq!(ticks[24], Tick { index: 24, hour_of_day: 0 });
    }

    #[test]
    fn empty_clock_yields_nothing() {
        let mut clock = Clock::new(0);
        assert_eq!(clock.tick(), None);
        assert_eq!(clock.count(), 0);
    }
}
