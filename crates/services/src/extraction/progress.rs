/// Progress of a running extraction, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExtractionProgress {
    /// 0..=100
    pub percent: u8,
    /// Questions found so far.
    pub extracted: usize,
}

impl ExtractionProgress {
    /// Progress after `done` of `total` steps.
    #[must_use]
    pub fn of(done: usize, total: usize, extracted: usize) -> Self {
        let percent = if total == 0 {
            100
        } else {
            u8::try_from(done.min(total) * 100 / total).unwrap_or(100)
        };
        Self { percent, extracted }
    }

    #[must_use]
    pub fn is_done(&self) -> bool {
        self.percent >= 100
    }
}
