use std::collections::{HashMap, HashSet};
use std::time::{Duration, Instant};

use crate::dom::NodeId;
use crate::layout::Rect;
use crate::style::FlatTree;
use crate::transitions::{Easing, TransitionConfig};
use crate::types::{Color, Position};

/// Which property is being transitioned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransitionProperty {
    Top,
    Left,
    Opacity,
    Background,
    Foreground,
}

/// A property value that can be interpolated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PropertyValue {
    I16(i16),
    F32(f32),
    Color(Color),
}

/// Snapshot of a node's transitionable properties.
#[derive(Debug, Clone, Default)]
struct NodeSnapshot {
    /// Resolved against the viewport, fixed boxes only.
    top: Option<i16>,
    left: Option<i16>,
    opacity: f32,
    background: Option<Color>,
    foreground: Option<Color>,
}

impl NodeSnapshot {
    fn value(&self, property: TransitionProperty) -> Option<PropertyValue> {
        match property {
            TransitionProperty::Top => self.top.map(PropertyValue::I16),
            TransitionProperty::Left => self.left.map(PropertyValue::I16),
            TransitionProperty::Opacity => Some(PropertyValue::F32(self.opacity)),
            TransitionProperty::Background => self.background.map(PropertyValue::Color),
            TransitionProperty::Foreground => self.foreground.map(PropertyValue::Color),
        }
    }
}

/// A single active transition.
#[derive(Debug, Clone)]
struct ActiveTransition {
    from: PropertyValue,
    to: PropertyValue,
    start: Instant,
    duration: Duration,
    easing: Easing,
}

impl ActiveTransition {
    fn sample(&self, now: Instant) -> PropertyValue {
        let elapsed = now.saturating_duration_since(self.start);
        let progress = if self.duration.is_zero() {
            1.0
        } else {
            (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
        };
        interpolate(&self.from, &self.to, self.easing.apply(progress))
    }

    fn finished(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.start) >= self.duration
    }
}

/// Manages animation state across frames.
#[derive(Debug, Default)]
pub struct AnimationState {
    /// Previous frame's property values per node.
    snapshots: HashMap<NodeId, NodeSnapshot>,
    /// Currently active transitions: (node, property) -> transition.
    active: HashMap<(NodeId, TransitionProperty), ActiveTransition>,
    /// Reduced motion flag - when true, transitions complete instantly.
    reduced_motion: bool,
}

impl AnimationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable reduced motion (accessibility).
    pub fn set_reduced_motion(&mut self, enabled: bool) {
        self.reduced_motion = enabled;
        if enabled {
            self.active.clear();
        }
    }

    /// Returns true if any transition is currently active.
    pub fn has_active_transitions(&self) -> bool {
        !self.active.is_empty()
    }

    pub fn update(&mut self, tree: &FlatTree, viewport: Rect) {
        self.update_at(tree, viewport, Instant::now());
    }

    /// Compare the tree against the previous frame, start transitions for
    /// changed properties, and drop finished transitions and stale nodes.
    pub fn update_at(&mut self, tree: &FlatTree, viewport: Rect, now: Instant) {
        self.active.retain(|_, transition| !transition.finished(now));

        let mut seen = HashSet::new();
        for node in tree.nodes() {
            let Some(style) = tree.style(*node) else {
                continue;
            };
            seen.insert(*node);

            let fixed = style.position == Position::Fixed;
            let current = NodeSnapshot {
                top: style
                    .top
                    .filter(|_| fixed)
                    .map(|top| top.resolve(viewport.height)),
                left: style
                    .left
                    .filter(|_| fixed)
                    .map(|left| left.resolve(viewport.width)),
                opacity: style.opacity,
                background: style.background,
                foreground: style.foreground,
            };

            if let Some(previous) = self.snapshots.get(node).cloned() {
                let transitions = &style.transitions;
                for (property, config) in [
                    (TransitionProperty::Top, transitions.top),
                    (TransitionProperty::Left, transitions.left),
                    (TransitionProperty::Opacity, transitions.opacity),
                    (TransitionProperty::Background, transitions.background),
                    (TransitionProperty::Foreground, transitions.foreground),
                ] {
                    self.start_if_changed(
                        *node,
                        property,
                        previous.value(property),
                        current.value(property),
                        config,
                        now,
                    );
                }
            }

            self.snapshots.insert(*node, current);
        }

        self.snapshots.retain(|id, _| seen.contains(id));
        self.active.retain(|(id, _), _| seen.contains(id));
    }

    fn start_if_changed(
        &mut self,
        node: NodeId,
        property: TransitionProperty,
        previous: Option<PropertyValue>,
        current: Option<PropertyValue>,
        config: Option<TransitionConfig>,
        now: Instant,
    ) {
        let Some(config) = config else { return };
        let Some(previous) = previous else { return };
        let Some(current) = current else { return };

        if previous == current || self.reduced_motion {
            return;
        }

        let key = (node, property);

        // Retarget a running transition from wherever it currently is.
        let from = match self.active.get(&key) {
            Some(existing) => existing.sample(now),
            None => previous,
        };

        log::debug!("transition {property:?} on {node}: {from:?} -> {current:?}");
        self.active.insert(
            key,
            ActiveTransition {
                from,
                to: current,
                start: now,
                duration: config.duration,
                easing: config.easing,
            },
        );
    }

    /// Get interpolated value for a property.
    /// Returns None if no active transition for this property.
    pub fn get_interpolated(
        &self,
        node: NodeId,
        property: TransitionProperty,
    ) -> Option<PropertyValue> {
        self.get_interpolated_at(node, property, Instant::now())
    }

    pub fn get_interpolated_at(
        &self,
        node: NodeId,
        property: TransitionProperty,
        now: Instant,
    ) -> Option<PropertyValue> {
        self.active.get(&(node, property)).map(|t| t.sample(now))
    }

    /// Animated offset in cells, if `property` is a running offset transition.
    pub fn offset(&self, node: NodeId, property: TransitionProperty) -> Option<i16> {
        match self.get_interpolated(node, property)? {
            PropertyValue::I16(v) => Some(v),
            _ => None,
        }
    }

    pub fn opacity(&self, node: NodeId) -> Option<f32> {
        match self.get_interpolated(node, TransitionProperty::Opacity)? {
            PropertyValue::F32(v) => Some(v),
            _ => None,
        }
    }

    pub fn color(&self, node: NodeId, property: TransitionProperty) -> Option<Color> {
        match self.get_interpolated(node, property)? {
            PropertyValue::Color(c) => Some(c),
            _ => None,
        }
    }
}

fn interpolate(from: &PropertyValue, to: &PropertyValue, t: f32) -> PropertyValue {
    match (from, to) {
        (PropertyValue::I16(a), PropertyValue::I16(b)) => PropertyValue::I16(lerp_i16(*a, *b, t)),
        (PropertyValue::F32(a), PropertyValue::F32(b)) => PropertyValue::F32(a + (b - a) * t),
        (PropertyValue::Color(a), PropertyValue::Color(b)) => {
            PropertyValue::Color(lerp_color(a, b, t))
        }
        _ => *to, // Mismatched types, just use target
    }
}

fn lerp_i16(from: i16, to: i16, t: f32) -> i16 {
    let from = from as f32;
    let to = to as f32;
    (from + (to - from) * t).round() as i16
}

/// Interpolate colors in OKLCH space.
fn lerp_color(from: &Color, to: &Color, t: f32) -> Color {
    let (from_l, from_c, from_h, from_a) = from.to_oklch();
    let (to_l, to_c, to_h, to_a) = to.to_oklch();

    let l = from_l + (to_l - from_l) * t;
    let c = from_c + (to_c - from_c) * t;
    let a = from_a + (to_a - from_a) * t;

    // Hue interpolation (shortest path around the circle)
    let mut dh = to_h - from_h;
    if dh > 180.0 {
        dh -= 360.0;
    } else if dh < -180.0 {
        dh += 360.0;
    }
    let h = (from_h + dh * t).rem_euclid(360.0);

    Color::oklcha(l, c, h, a)
}
