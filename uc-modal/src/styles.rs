//! Stylesheet of the modal's shadow tree.

use ucdom::{
    Border, Color, Compound, Declarations, Direction, Edges, Justify, Length, PointerEvents,
    Position, Selector, Sides, Size, Stylesheet, Transitions,
};

use crate::config::ModalConfig;
use crate::modal::{BACKDROP_ID, MODAL_ID, OPENED};

/// Rules scoped to one modal instance. They reach the host only through
/// `:host` and the projected title only through `::slotted`.
pub fn stylesheet(config: &ModalConfig) -> Stylesheet {
    let shown = Declarations::new()
        .opacity(1.0)
        .pointer_events(PointerEvents::Auto);

    Stylesheet::new()
        .rule(
            Selector::id(BACKDROP_ID),
            Declarations::new()
                .position(Position::Fixed)
                .top(Length::Cells(0))
                .left(Length::Cells(0))
                .width(Size::Percent(1.0))
                .height(Size::Percent(1.0))
                .background(Color::rgba(0, 0, 0, config.backdrop_alpha))
                .z_index(10)
                .opacity(0.0)
                .pointer_events(PointerEvents::None),
        )
        .rule(
            Selector::host_with(OPENED).descendant(Compound::id(BACKDROP_ID)),
            shown.clone(),
        )
        .rule(
            Selector::host_with(OPENED).descendant(Compound::id(MODAL_ID)),
            shown.top(config.open_top),
        )
        .rule(
            Selector::id(MODAL_ID),
            Declarations::new()
                .position(Position::Fixed)
                .top(config.closed_top)
                .left(Length::Percent(0.25))
                .width(Size::Percent(0.5))
                .z_index(100)
                .background(Color::white())
                .foreground(Color::black())
                .border(Border::Rounded)
                .direction(Direction::Column)
                .justify(Justify::SpaceBetween)
                .opacity(0.0)
                .pointer_events(PointerEvents::None)
                .transitions(Transitions::new().all(config.duration, config.easing)),
        )
        .rule(
            Selector::tag("header"),
            Declarations::new()
                .padding(Edges::horizontal(1))
                .border_sides(Border::Single, Sides::bottom()),
        )
        .rule(
            Selector::slotted(Compound::tag("h1")),
            Declarations::new().margin(Edges::all(0)).bold(),
        )
        .rule(Selector::id("main"), Declarations::new().padding(Edges::all(1)))
        .rule(
            Selector::id("actions"),
            Declarations::new()
                .border_sides(Border::Single, Sides::top())
                .padding(Edges::horizontal(1))
                .direction(Direction::Row)
                .justify(Justify::End),
        )
        .rule(
            Selector::id("actions").descendant(Compound::tag("button")),
            Declarations::new().margin(Edges::horizontal(1)),
        )
}
