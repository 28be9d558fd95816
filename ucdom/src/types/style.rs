use super::{
    Align, Border, Color, Direction, Edges, Justify, Length, PointerEvents, Position, Sides, Size,
    TextStyle,
};
use crate::transitions::Transitions;

/// Fully resolved style of one node, produced by the cascade.
#[derive(Debug, Clone)]
pub struct Style {
    // Box
    pub position: Position,
    pub top: Option<Length>,
    pub left: Option<Length>,
    pub z_index: i16,
    pub width: Size,
    pub height: Size,
    pub padding: Edges,
    pub margin: Edges,

    // Flex container
    pub direction: Direction,
    pub justify: Justify,
    pub align: Align,
    pub gap: u16,

    // Visual
    pub background: Option<Color>,
    pub foreground: Option<Color>,
    pub text_style: TextStyle,
    pub border: Border,
    pub border_sides: Sides,
    pub opacity: f32,
    pub transitions: Transitions,

    // Interaction
    pub pointer_events: PointerEvents,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            position: Position::Static,
            top: None,
            left: None,
            z_index: 0,
            width: Size::Auto,
            height: Size::Auto,
            padding: Edges::default(),
            margin: Edges::default(),
            direction: Direction::Column,
            justify: Justify::Start,
            align: Align::Stretch,
            gap: 0,
            background: None,
            foreground: None,
            text_style: TextStyle::new(),
            border: Border::None,
            border_sides: Sides::NONE,
            opacity: 1.0,
            transitions: Transitions::default(),
            pointer_events: PointerEvents::Auto,
        }
    }
}

impl Style {
    /// Initial style of a child: inherited properties come from `parent`,
    /// everything else starts from its default.
    pub fn inherit_from(parent: &Style) -> Self {
        Self {
            foreground: parent.foreground,
            text_style: parent.text_style,
            pointer_events: parent.pointer_events,
            ..Default::default()
        }
    }

    /// Border thickness per side, zero when no border is drawn.
    pub fn border_widths(&self) -> (u16, u16, u16, u16) {
        if self.border == Border::None {
            (0, 0, 0, 0)
        } else {
            self.border_sides.widths()
        }
    }
}

/// Declaration block of a style rule. Unset properties leave the cascaded
/// value untouched.
#[derive(Debug, Clone, Default)]
pub struct Declarations {
    pub position: Option<Position>,
    pub top: Option<Length>,
    pub left: Option<Length>,
    pub z_index: Option<i16>,
    pub width: Option<Size>,
    pub height: Option<Size>,
    pub padding: Option<Edges>,
    pub margin: Option<Edges>,
    pub direction: Option<Direction>,
    pub justify: Option<Justify>,
    pub align: Option<Align>,
    pub gap: Option<u16>,
    pub background: Option<Color>,
    pub foreground: Option<Color>,
    // Text flags cascade one by one, so setting one keeps the inherited rest.
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub underline: Option<bool>,
    pub dim: Option<bool>,
    pub border: Option<(Border, Sides)>,
    pub opacity: Option<f32>,
    pub transitions: Option<Transitions>,
    pub pointer_events: Option<PointerEvents>,
}

impl Declarations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    pub fn top(mut self, top: Length) -> Self {
        self.top = Some(top);
        self
    }

    pub fn left(mut self, left: Length) -> Self {
        self.left = Some(left);
        self
    }

    pub fn z_index(mut self, z_index: i16) -> Self {
        self.z_index = Some(z_index);
        self
    }

    pub fn width(mut self, width: Size) -> Self {
        self.width = Some(width);
        self
    }

    pub fn height(mut self, height: Size) -> Self {
        self.height = Some(height);
        self
    }

    pub fn padding(mut self, padding: Edges) -> Self {
        self.padding = Some(padding);
        self
    }

    pub fn margin(mut self, margin: Edges) -> Self {
        self.margin = Some(margin);
        self
    }

    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = Some(direction);
        self
    }

    pub fn justify(mut self, justify: Justify) -> Self {
        self.justify = Some(justify);
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = Some(align);
        self
    }

    pub fn gap(mut self, gap: u16) -> Self {
        self.gap = Some(gap);
        self
    }

    pub fn background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    pub fn foreground(mut self, color: Color) -> Self {
        self.foreground = Some(color);
        self
    }

    /// Set every text flag at once, clearing the ones `text_style` leaves off.
    pub fn text_style(mut self, text_style: TextStyle) -> Self {
        self.bold = Some(text_style.bold);
        self.italic = Some(text_style.italic);
        self.underline = Some(text_style.underline);
        self.dim = Some(text_style.dim);
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = Some(true);
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = Some(true);
        self
    }

    pub fn underline(mut self) -> Self {
        self.underline = Some(true);
        self
    }

    pub fn dim(mut self) -> Self {
        self.dim = Some(true);
        self
    }

    /// Border on all four sides.
    pub fn border(mut self, border: Border) -> Self {
        self.border = Some((border, Sides::ALL));
        self
    }

    /// Border on the given sides only.
    pub fn border_sides(mut self, border: Border, sides: Sides) -> Self {
        self.border = Some((border, sides));
        self
    }

    pub fn opacity(mut self, opacity: f32) -> Self {
        self.opacity = Some(opacity.clamp(0.0, 1.0));
        self
    }

    pub fn transitions(mut self, transitions: Transitions) -> Self {
        self.transitions = Some(transitions);
        self
    }

    pub fn pointer_events(mut self, pointer_events: PointerEvents) -> Self {
        self.pointer_events = Some(pointer_events);
        self
    }

    /// Combine two blocks; declarations set in `other` win.
    pub fn merge(self, other: Declarations) -> Self {
        Self {
            position: other.position.or(self.position),
            top: other.top.or(self.top),
            left: other.left.or(self.left),
            z_index: other.z_index.or(self.z_index),
            width: other.width.or(self.width),
            height: other.height.or(self.height),
            padding: other.padding.or(self.padding),
            margin: other.margin.or(self.margin),
            direction: other.direction.or(self.direction),
            justify: other.justify.or(self.justify),
            align: other.align.or(self.align),
            gap: other.gap.or(self.gap),
            background: other.background.or(self.background),
            foreground: other.foreground.or(self.foreground),
            bold: other.bold.or(self.bold),
            italic: other.italic.or(self.italic),
            underline: other.underline.or(self.underline),
            dim: other.dim.or(self.dim),
            border: other.border.or(self.border),
            opacity: other.opacity.or(self.opacity),
            transitions: other.transitions.or(self.transitions),
            pointer_events: other.pointer_events.or(self.pointer_events),
        }
    }

    /// Apply every set declaration onto `style`.
    pub fn apply(&self, style: &mut Style) {
        if let Some(v) = self.position {
            style.position = v;
        }
        if let Some(v) = self.top {
            style.top = Some(v);
        }
        if let Some(v) = self.left {
            style.left = Some(v);
        }
        if let Some(v) = self.z_index {
            style.z_index = v;
        }
        if let Some(v) = self.width {
            style.width = v;
        }
        if let Some(v) = self.height {
            style.height = v;
        }
        if let Some(v) = self.padding {
            style.padding = v;
        }
        if let Some(v) = self.margin {
            style.margin = v;
        }
        if let Some(v) = self.direction {
            style.direction = v;
        }
        if let Some(v) = self.justify {
            style.justify = v;
        }
        if let Some(v) = self.align {
            style.align = v;
        }
        if let Some(v) = self.gap {
            style.gap = v;
        }
        if let Some(v) = self.background {
            style.background = Some(v);
        }
        if let Some(v) = self.foreground {
            style.foreground = Some(v);
        }
        if let Some(v) = self.bold {
            style.text_style.bold = v;
        }
        if let Some(v) = self.italic {
            style.text_style.italic = v;
        }
        if let Some(v) = self.underline {
            style.text_style.underline = v;
        }
        if let Some(v) = self.dim {
            style.text_style.dim = v;
        }
        if let Some((border, sides)) = self.border {
            style.border = border;
            style.border_sides = sides;
        }
        if let Some(v) = self.opacity {
            style.opacity = v;
        }
        if let Some(v) = &self.transitions {
            style.transitions = v.clone();
        }
        if let Some(v) = self.pointer_events {
            style.pointer_events = v;
        }
    }
}
