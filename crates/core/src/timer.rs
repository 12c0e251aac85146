/// Study clock that counts whole seconds while running.
///
/// The timer is driven externally: whoever owns it calls [`StudyTimer::tick`]
/// once per second. The quiz session never reads it directly; the elapsed value
/// is passed into each submission instead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StudyTimer {
    elapsed_seconds: u64,
    running: bool,
}

impl StudyTimer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    /// Flip between running and paused, returning the new running state.
    pub fn toggle(&mut self) -> bool {
        self.running = !self.running;
        self.running
    }

    /// Count one second if running. Returns the elapsed total.
    pub fn tick(&mut self) -> u64 {
        if self.running {
            self.elapsed_seconds = self.elapsed_seconds.saturating_add(1);
        }
        self.elapsed_seconds
    }

    /// Stop and zero the timer.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    #[must_use]
    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }
}

/// Render seconds as `m:ss`, or `h:mm:ss` once an hour has passed.
#[must_use]
pub fn format_elapsed(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes}:{seconds:02}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_only_while_running() {
        let mut timer = StudyTimer::new();
        assert_eq!(timer.tick(), 0);

        timer.start();
        timer.tick();
        timer.tick();
        assert_eq!(timer.elapsed_seconds(), 2);

        assert!(!timer.toggle());
        assert_eq!(timer.tick(), 2);
    }

    #[test]
    fn reset_stops_and_zeroes() {
        let mut timer = StudyTimer::new();
        timer.start();
        timer.tick();
        timer.reset();
        assert_eq!(timer.elapsed_seconds(), 0);
        assert!(!timer.is_running());
    }

    #[test]
    fn formats_elapsed_time() {
        assert_eq!(format_elapsed(0), "0:00");
        assert_eq!(format_elapsed(75), "1:15");
        assert_eq!(format_elapsed(3600), "1:00:00");
        assert_eq!(format_elapsed(3725), "1:02:05");
    }
}
