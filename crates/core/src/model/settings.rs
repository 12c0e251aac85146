use thiserror::Error;

const DEFAULT_STRENGTH_THRESHOLD: u8 = 70;
const DEFAULT_FOCUS_LIMIT: usize = 3;
const DEFAULT_RECENT_WINDOW: usize = 10;
const DEFAULT_LABEL_MAX_CHARS: usize = 20;

/// Tuning knobs for performance analytics.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnalyticsSettings {
    strength_threshold: u8,
    focus_limit: usize,
    recent_window: usize,
    label_max_chars: usize,
}

#[derive(Clone, Debug, Default)]
pub struct AnalyticsSettingsDraft {
    pub strength_threshold: Option<u8>,
    pub focus_limit: Option<usize>,
    pub recent_window: Option<usize>,
    pub label_max_chars: Option<usize>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AnalyticsSettingsError {
    #[error("strength threshold must be at most 100, got {0}")]
    ThresholdOutOfRange(u8),
    #[error("recent window must be at least 1")]
    EmptyRecentWindow,
    #[error("label width must be at least 1")]
    EmptyLabel,
}

impl AnalyticsSettingsDraft {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the draft, filling unset fields with defaults.
    ///
    /// # Errors
    ///
    /// Returns `AnalyticsSettingsError` for an out-of-range threshold or
    /// zero-sized window/label.
    pub fn validate(self) -> Result<AnalyticsSettings, AnalyticsSettingsError> {
        let strength_threshold = self
            .strength_threshold
            .unwrap_or(DEFAULT_STRENGTH_THRESHOLD);
        if strength_threshold > 100 {
            return Err(AnalyticsSettingsError::ThresholdOutOfRange(
                strength_threshold,
            ));
        }

        let recent_window = self.recent_window.unwrap_or(DEFAULT_RECENT_WINDOW);
        if recent_window == 0 {
            return Err(AnalyticsSettingsError::EmptyRecentWindow);
        }

        let label_max_chars = self.label_max_chars.unwrap_or(DEFAULT_LABEL_MAX_CHARS);
        if label_max_chars == 0 {
            return Err(AnalyticsSettingsError::EmptyLabel);
        }

        Ok(AnalyticsSettings {
            strength_threshold,
            focus_limit: self.focus_limit.unwrap_or(DEFAULT_FOCUS_LIMIT),
            recent_window,
            label_max_chars,
        })
    }
}

impl AnalyticsSettings {
    /// Score at or above which a subject counts as a strength.
    #[must_use]
    pub fn strength_threshold(&self) -> u8 {
        self.strength_threshold
    }

    /// Maximum entries in the strengths and weaknesses lists.
    #[must_use]
    pub fn focus_limit(&self) -> usize {
        self.focus_limit
    }

    #[must_use]
    pub fn recent_window(&self) -> usize {
        self.recent_window
    }

    #[must_use]
    pub fn label_max_chars(&self) -> usize {
        self.label_max_chars
    }
}

impl Default for AnalyticsSettings {
    fn default() -> Self {
        Self {
            strength_threshold: DEFAULT_STRENGTH_THRESHOLD,
            focus_limit: DEFAULT_FOCUS_LIMIT,
            recent_window: DEFAULT_RECENT_WINDOW,
            label_max_chars: DEFAULT_LABEL_MAX_CHARS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_draft_yields_defaults() {
        let settings = AnalyticsSettingsDraft::new().validate().unwrap();
        assert_eq!(settings, AnalyticsSettings::default());
        assert_eq!(settings.strength_threshold(), 70);
        assert_eq!(settings.focus_limit(), 3);
        assert_eq!(settings.recent_window(), 10);
        assert_eq!(settings.label_max_chars(), 20);
    }

    #[test]
    fn rejects_invalid_values() {
        let err = AnalyticsSettingsDraft {
            strength_threshold: Some(101),
            ..AnalyticsSettingsDraft::default()
        }
        .validate()
        .unwrap_err();
        assert_eq!(err, AnalyticsSettingsError::ThresholdOutOfRange(101));

        let err = AnalyticsSettingsDraft {
            recent_window: Some(0),
            ..AnalyticsSettingsDraft::default()
        }
        .validate()
        .unwrap_err();
        assert_eq!(err, AnalyticsSettingsError::EmptyRecentWindow);

        let err = AnalyticsSettingsDraft {
            label_max_chars: Some(0),
            ..AnalyticsSettingsDraft::default()
        }
        .validate()
        .unwrap_err();
        assert_eq!(err, AnalyticsSettingsError::EmptyLabel);
    }
}
