use crate::animation::{AnimationState, TransitionProperty};
use crate::buffer::{Buffer, Cell};
use crate::dom::{Document, NodeId};
use crate::layout::{layout, LayoutResult, Rect};
use crate::style::FlatTree;
use crate::text::{char_width, truncate_to_width};
use crate::types::{Border, Color, PointerEvents, Rgb, Style};

/// A node in paint order with everything painting and hit testing need.
pub(crate) struct PaintItem {
    pub node: NodeId,
    pub rect: Rect,
    pub z_index: i16,
    pub tree_order: usize,
    /// Opacity multiplied down from every ancestor.
    pub opacity: f32,
    pub pointer_events: PointerEvents,
    pub is_text: bool,
}

/// Rendered nodes, back to front.
///
/// A child never paints below its parent: its layer is the larger of its own
/// `z_index` and its parent's. Equal layers keep tree order.
pub(crate) fn paint_order(
    tree: &FlatTree,
    layout: &LayoutResult,
    animation: &AnimationState,
) -> Vec<PaintItem> {
    let mut items = Vec::new();
    let mut order = 0;
    collect(tree, tree.root(), layout, animation, 0, 1.0, &mut order, &mut items);
    items.sort_by_key(|item| (item.z_index, item.tree_order));
    items
}

#[allow(clippy::too_many_arguments)]
fn collect(
    tree: &FlatTree,
    node: NodeId,
    layout: &LayoutResult,
    animation: &AnimationState,
    parent_z: i16,
    parent_opacity: f32,
    order: &mut usize,
    items: &mut Vec<PaintItem>,
) {
    let Some(style) = tree.style(node) else {
        return;
    };
    let Some(rect) = layout.get(&node) else {
        return;
    };

    let z_index = style.z_index.max(parent_z);
    let own_opacity = animation.opacity(node).unwrap_or(style.opacity);
    let opacity = (parent_opacity * own_opacity).clamp(0.0, 1.0);

    items.push(PaintItem {
        node,
        rect: *rect,
        z_index,
        tree_order: *order,
        opacity,
        pointer_events: style.pointer_events,
        is_text: tree.document().node(node).is_some_and(|n| n.is_text()),
    });
    *order += 1;

    for child in tree.children(node) {
        collect(tree, *child, layout, animation, z_index, opacity, order, items);
    }
}

/// Paint a laid out tree into `buf`.
pub fn render_to_buffer(
    tree: &FlatTree,
    layout: &LayoutResult,
    buf: &mut Buffer,
    animation: &AnimationState,
) {
    let items = paint_order(tree, layout, animation);
    let mut painted = 0;
    for item in &items {
        // Fully transparent subtrees are skipped, not drawn invisibly.
        if item.opacity <= 0.0 {
            continue;
        }
        let Some(style) = tree.style(item.node) else {
            continue;
        };
        if item.is_text {
            if let Some(text) = tree.document().text(item.node) {
                let fg = foreground(tree, item.node, style, animation);
                render_text(text, style, fg, item.rect, item.opacity, buf);
            }
        } else {
            render_background(item.node, style, item.rect, item.opacity, animation, buf);
            render_border(item.node, style, item.rect, item.opacity, animation, buf);
        }
        painted += 1;
    }
    log::trace!("painted {painted} of {} nodes", items.len());
}

/// Text color of `node`. Text nodes follow their parent's animated color.
fn foreground(tree: &FlatTree, node: NodeId, style: &Style, animation: &AnimationState) -> Rgb {
    let owner = if tree.document().node(node).is_some_and(|n| n.is_text()) {
        tree.parent(node).unwrap_or(node)
    } else {
        node
    };
    animation
        .color(owner, TransitionProperty::Foreground)
        .or(style.foreground)
        .map(|c| c.to_rgb())
        .unwrap_or(Rgb::BLACK)
}

fn render_background(
    node: NodeId,
    style: &Style,
    rect: Rect,
    opacity: f32,
    animation: &AnimationState,
    buf: &mut Buffer,
) {
    let Some(background) = animation
        .color(node, TransitionProperty::Background)
        .or(style.background)
    else {
        return;
    };
    fill_rect(buf, rect, background, opacity);
}

/// Fill `rect` with `color`. Opaque fills cover what is underneath;
/// translucent ones tint it and let the text show through.
fn fill_rect(buf: &mut Buffer, rect: Rect, color: Color, opacity: f32) {
    let rgb = color.to_rgb();
    let alpha = color.alpha() * opacity;
    if alpha <= 0.0 {
        return;
    }
    for y in rect.y..rect.bottom().min(buf.height()) {
        for x in rect.x..rect.right().min(buf.width()) {
            let Some(cell) = buf.get_mut(x, y) else {
                continue;
            };
            if alpha >= 1.0 {
                *cell = Cell::new(' ').with_bg(rgb).with_fg(cell.fg);
            } else {
                cell.overlay(rgb, alpha);
            }
        }
    }
}

fn render_text(text: &str, style: &Style, fg: Rgb, rect: Rect, opacity: f32, buf: &mut Buffer) {
    for (row, line) in text.lines().enumerate() {
        let y = rect.y.saturating_add(row as u16);
        if y >= rect.bottom() {
            break;
        }
        let line = truncate_to_width(line, rect.width as usize);
        let mut x = rect.x;
        for ch in line.chars() {
            let width = char_width(ch) as u16;
            if width == 0 {
                continue;
            }
            if x + width > rect.right() {
                break;
            }
            if let Some(cell) = buf.get_mut(x, y) {
                cell.char = ch;
                cell.fg = cell.bg.blend(fg, opacity);
                cell.style = style.text_style;
                cell.wide_continuation = false;
            }
            if width == 2 {
                if let Some(cell) = buf.get_mut(x + 1, y) {
                    cell.char = ' ';
                    cell.wide_continuation = true;
                }
            }
            x += width;
        }
    }
}

fn render_border(
    node: NodeId,
    style: &Style,
    rect: Rect,
    opacity: f32,
    animation: &AnimationState,
    buf: &mut Buffer,
) {
    let (tl, tr, bl, br, h, v) = match style.border {
        Border::None => return,
        Border::Single => ('┌', '┐', '└', '┘', '─', '│'),
        Border::Double => ('╔', '╗', '╚', '╝', '═', '║'),
        Border::Rounded => ('╭', '╮', '╰', '╯', '─', '│'),
        Border::Thick => ('┏', '┓', '┗', '┛', '━', '┃'),
    };
    if rect.is_empty() {
        return;
    }

    let fg = animation
        .color(node, TransitionProperty::Foreground)
        .or(style.foreground)
        .map(|c| c.to_rgb())
        .unwrap_or(Rgb::BLACK);
    let sides = style.border_sides;
    let (right, bottom) = (rect.right() - 1, rect.bottom() - 1);

    for x in rect.x..rect.right() {
        if sides.top {
            set_char(buf, x, rect.y, h, fg, opacity);
        }
        if sides.bottom {
            set_char(buf, x, bottom, h, fg, opacity);
        }
    }
    for y in rect.y..rect.bottom() {
        if sides.left {
            set_char(buf, rect.x, y, v, fg, opacity);
        }
        if sides.right {
            set_char(buf, right, y, v, fg, opacity);
        }
    }

    for (draw, x, y, ch) in [
        (sides.top && sides.left, rect.x, rect.y, tl),
        (sides.top && sides.right, right, rect.y, tr),
        (sides.bottom && sides.left, rect.x, bottom, bl),
        (sides.bottom && sides.right, right, bottom, br),
    ] {
        if draw {
            set_char(buf, x, y, ch, fg, opacity);
        }
    }
}

fn set_char(buf: &mut Buffer, x: u16, y: u16, ch: char, fg: Rgb, opacity: f32) {
    if let Some(cell) = buf.get_mut(x, y) {
        cell.char = ch;
        cell.fg = cell.bg.blend(fg, opacity);
        cell.wide_continuation = false;
    }
}

impl Document {
    /// Run one frame: advance transitions, lay out, and paint into `buf`.
    pub fn render(
        &self,
        viewport: Rect,
        animation: &mut AnimationState,
        buf: &mut Buffer,
    ) -> LayoutResult {
        let tree = FlatTree::build(self);
        animation.update(&tree, viewport);
        let result = layout(&tree, viewport, animation);
        render_to_buffer(&tree, &result, buf, animation);
        result
    }
}
