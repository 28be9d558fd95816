//! Modal configuration.

use std::time::Duration;

use ucdom::{Easing, Length};

/// Per-definition configuration of `uc-modal`.
///
/// Every instance created from one definition shares it. The default
/// reproduces the stock look: a payment confirmation that slides from 10% to
/// 15% of the viewport height over 300 ms.
#[derive(Debug, Clone, PartialEq)]
pub struct ModalConfig {
    /// Header text shown while nothing is slotted into `title`.
    pub title: String,

    pub cancel_label: String,

    pub confirm_label: String,

    /// Duration of the panel's slide and fade.
    pub duration: Duration,

    pub easing: Easing,

    /// Panel offset from the top of the viewport while closed.
    pub closed_top: Length,

    /// Panel offset from the top of the viewport while open.
    pub open_top: Length,

    /// Opacity of the black backdrop behind an open panel.
    pub backdrop_alpha: f32,
}

impl Default for ModalConfig {
    fn default() -> Self {
        Self {
            title: "Please Confirm Payment".to_string(),
            cancel_label: "Cancel".to_string(),
            confirm_label: "Okay".to_string(),
            duration: Duration::from_millis(300),
            easing: Easing::EaseOut,
            closed_top: Length::Percent(0.10),
            open_top: Length::Percent(0.15),
            backdrop_alpha: 0.75,
        }
    }
}

impl ModalConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the fallback header text.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set both button labels.
    pub fn labels(mut self, cancel: impl Into<String>, confirm: impl Into<String>) -> Self {
        self.cancel_label = cancel.into();
        self.confirm_label = confirm.into();
        self
    }

    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Set the panel offsets for the closed and open states.
    pub fn offsets(mut self, closed: Length, open: Length) -> Self {
        self.closed_top = closed;
        self.open_top = open;
        self
    }

    pub fn backdrop_alpha(mut self, alpha: f32) -> Self {
        self.backdrop_alpha = alpha.clamp(0.0, 1.0);
        self
    }
}
