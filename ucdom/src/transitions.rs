use std::time::Duration;

/// Configuration for a single property transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionConfig {
    pub duration: Duration,
    pub easing: Easing,
}

impl TransitionConfig {
    pub fn new(duration: Duration, easing: Easing) -> Self {
        Self { duration, easing }
    }
}

/// Easing function for transitions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Easing {
    #[default]
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
}

impl Easing {
    /// Apply easing to progress (0.0 to 1.0).
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
        }
    }
}

/// Which properties of a box animate when their computed value changes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transitions {
    pub top: Option<TransitionConfig>,
    pub left: Option<TransitionConfig>,
    pub opacity: Option<TransitionConfig>,
    pub background: Option<TransitionConfig>,
    pub foreground: Option<TransitionConfig>,
}

impl Transitions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn top(mut self, duration: Duration, easing: Easing) -> Self {
        self.top = Some(TransitionConfig::new(duration, easing));
        self
    }

    pub fn left(mut self, duration: Duration, easing: Easing) -> Self {
        self.left = Some(TransitionConfig::new(duration, easing));
        self
    }

    pub fn opacity(mut self, duration: Duration, easing: Easing) -> Self {
        self.opacity = Some(TransitionConfig::new(duration, easing));
        self
    }

    pub fn background(mut self, duration: Duration, easing: Easing) -> Self {
        self.background = Some(TransitionConfig::new(duration, easing));
        self
    }

    pub fn foreground(mut self, duration: Duration, easing: Easing) -> Self {
        self.foreground = Some(TransitionConfig::new(duration, easing));
        self
    }

    /// Transition both position offsets.
    pub fn position(self, duration: Duration, easing: Easing) -> Self {
        self.top(duration, easing).left(duration, easing)
    }

    /// Transition both colors.
    pub fn colors(self, duration: Duration, easing: Easing) -> Self {
        self.background(duration, easing)
            .foreground(duration, easing)
    }

    /// Transition every animatable property.
    pub fn all(self, duration: Duration, easing: Easing) -> Self {
        self.position(duration, easing)
            .opacity(duration, easing)
            .colors(duration, easing)
    }

    /// Returns true if any transition is configured.
    pub fn has_any(&self) -> bool {
        self.top.is_some()
            || self.left.is_some()
            || self.opacity.is_some()
            || self.background.is_some()
            || self.foreground.is_some()
    }
}
