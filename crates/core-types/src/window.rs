use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A trailing-window length in calendar months.
///
/// Windows are caller configuration, never derived from data. The conventional
/// peer-analysis set is [`DEFAULT_WINDOWS`], but any positive length is valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Window(u32);

/// The standard evaluation windows: 1, 2, 3 and 5 years of monthly history.
pub const DEFAULT_WINDOWS: [Window; 4] = [Window(12), Window(24), Window(36), Window(60)];

impl Window {
    pub fn new(months: u32) -> Result<Self, CoreError> {
        if months == 0 {
            return Err(CoreError::InvalidWindow(months));
        }
        Ok(Self(months))
    }

    pub fn months(self) -> u32 {
        self.0
    }
}

/// Formats as the label downstream consumers key tables by, e.g. `"36M"`.
impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}M", self.0)
    }
}

impl TryFrom<u32> for Window {
    type Error = CoreError;

    fn try_from(months: u32) -> Result<Self, Self::Error> {
        Self::new(months)
    }
}

impl From<Window> for u32 {
    fn from(window: Window) -> Self {
        window.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_months() {
        assert!(Window::new(0).is_err());
        assert!(Window::new(1).is_ok());
    }

    #[test]
    fn labels_match_downstream_keys() {
        assert_eq!(Window::new(36).unwrap().to_string(), "36M");
        assert_eq!(DEFAULT_WINDOWS.map(|w| w.months()), [12, 24, 36, 60]);
    }
}
