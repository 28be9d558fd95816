use std::collections::HashMap;

use super::Rect;
use crate::animation::{AnimationState, TransitionProperty};
use crate::dom::NodeId;
use crate::style::FlatTree;
use crate::text::text_size;
use crate::types::{Align, Direction, Justify, Position, Size, Style};

pub type LayoutResult = HashMap<NodeId, Rect>;

/// Lay out the flat tree inside `viewport`.
///
/// Static boxes flow along their parent's direction; fixed boxes are placed
/// against the viewport and never take space in their parent.
pub fn layout(tree: &FlatTree, viewport: Rect, animation: &AnimationState) -> LayoutResult {
    let mut result = LayoutResult::new();
    let cx = LayoutContext {
        tree,
        viewport,
        animation,
    };
    result.insert(tree.root(), viewport);
    cx.layout_children(tree.root(), viewport, &mut result);
    result
}

struct LayoutContext<'t, 'a> {
    tree: &'t FlatTree<'a>,
    viewport: Rect,
    animation: &'t AnimationState,
}

impl LayoutContext<'_, '_> {
    fn style(&self, node: NodeId) -> Style {
        self.tree.style(node).cloned().unwrap_or_default()
    }

    fn layout_fixed(&self, node: NodeId, result: &mut LayoutResult) {
        let style = self.style(node);
        let viewport = self.viewport;

        let left = self
            .animation
            .offset(node, TransitionProperty::Left)
            .or_else(|| style.left.map(|l| l.resolve(viewport.width)))
            .unwrap_or(0);
        let top = self
            .animation
            .offset(node, TransitionProperty::Top)
            .or_else(|| style.top.map(|t| t.resolve(viewport.height)))
            .unwrap_or(0);

        let x = viewport.x.saturating_add(left.max(0) as u16);
        let y = viewport.y.saturating_add(top.max(0) as u16);
        let width = self.resolve_size(node, &style, style.width, viewport.width, true);
        let height = self.resolve_size(node, &style, style.height, viewport.height, false);

        let rect = Rect::new(x, y, width, height).intersection(viewport);
        result.insert(node, rect);
        self.layout_children(node, rect, result);
    }

    fn layout_children(&self, node: NodeId, rect: Rect, result: &mut LayoutResult) {
        let children = self.tree.children(node);
        if children.is_empty() {
            return;
        }

        let style = self.style(node);
        let (flow, fixed): (Vec<NodeId>, Vec<NodeId>) = children
            .iter()
            .copied()
            .partition(|c| self.style(*c).position != Position::Fixed);

        let (bt, br, bb, bl) = style.border_widths();
        let inner = rect.shrink(
            style.padding.top + bt,
            style.padding.right + br,
            style.padding.bottom + bb,
            style.padding.left + bl,
        );

        let is_row = style.direction == Direction::Row;
        let main_size = if is_row { inner.width } else { inner.height };
        let cross_size = if is_row { inner.height } else { inner.width };

        // First pass: fixed and estimated sizes, and the fill count
        let gap_total = style.gap * flow.len().saturating_sub(1) as u16;
        let mut fixed_total = 0u16;
        let mut fill_count = 0u16;
        for child in &flow {
            let child_style = self.style(*child);
            let margin = main_margins(&child_style, is_row);
            let size = if is_row { child_style.width } else { child_style.height };
            match size {
                Size::Fill => fill_count += 1,
                _ => {
                    fixed_total += self.main_extent(*child, &child_style, size, main_size, is_row)
                        + margin.0
                        + margin.1
                }
            }
        }

        let remaining = main_size.saturating_sub(fixed_total + gap_total);
        let fill_size = if fill_count > 0 {
            remaining / fill_count
        } else {
            0
        };

        let mut sizes = Vec::with_capacity(flow.len());
        let mut total = 0u16;
        for child in &flow {
            let child_style = self.style(*child);
            let margin = main_margins(&child_style, is_row);
            let size = if is_row { child_style.width } else { child_style.height };
            let main = match size {
                Size::Fill => fill_size,
                _ => self.main_extent(*child, &child_style, size, main_size, is_row),
            };
            sizes.push((main, margin.0, margin.1));
            total += main + margin.0 + margin.1;
        }

        let extra = main_size.saturating_sub(total + gap_total);
        let (mut offset, between) = match style.justify {
            Justify::Start => (0, style.gap),
            Justify::End => (extra, style.gap),
            Justify::Center => (extra / 2, style.gap),
            Justify::SpaceBetween if flow.len() > 1 => {
                (0, extra / (flow.len() - 1) as u16 + style.gap)
            }
            Justify::SpaceBetween => (0, style.gap),
        };

        // Second pass: assign rects
        for (child, (main, before, after)) in flow.iter().zip(sizes) {
            let child_style = self.style(*child);
            let (cross_before, cross_after) = if is_row {
                (child_style.margin.top, child_style.margin.bottom)
            } else {
                (child_style.margin.left, child_style.margin.right)
            };
            let available_cross = cross_size.saturating_sub(cross_before + cross_after);
            let cross_spec = if is_row {
                child_style.height
            } else {
                child_style.width
            };

            let cross = match cross_spec {
                Size::Fixed(n) => n,
                Size::Fill => available_cross,
                Size::Percent(p) => (cross_size as f32 * p) as u16,
                Size::Auto if style.align == Align::Stretch => available_cross,
                Size::Auto => self.estimate(*child, &child_style, !is_row),
            }
            .min(available_cross);

            let cross_offset = cross_before
                + match style.align {
                    Align::Start | Align::Stretch => 0,
                    Align::Center => available_cross.saturating_sub(cross) / 2,
                    Align::End => available_cross.saturating_sub(cross),
                };

            let clamped_main = main.min(main_size.saturating_sub(offset + before));
            let child_rect = if is_row {
                Rect::new(
                    inner.x + offset + before,
                    inner.y + cross_offset,
                    clamped_main,
                    cross,
                )
            } else {
                Rect::new(
                    inner.x + cross_offset,
                    inner.y + offset + before,
                    cross,
                    clamped_main,
                )
            };

            result.insert(*child, child_rect);
            self.layout_children(*child, child_rect, result);

            offset += before + main + after + between;
        }

        for child in fixed {
            self.layout_fixed(child, result);
        }
    }

    fn main_extent(
        &self,
        node: NodeId,
        style: &Style,
        size: Size,
        available: u16,
        is_row: bool,
    ) -> u16 {
        match size {
            Size::Fixed(n) => n,
            Size::Percent(p) => (available as f32 * p) as u16,
            Size::Auto | Size::Fill => self.estimate(node, style, is_row),
        }
    }

    fn resolve_size(
        &self,
        node: NodeId,
        style: &Style,
        size: Size,
        available: u16,
        is_width: bool,
    ) -> u16 {
        match size {
            Size::Fixed(n) => n.min(available),
            Size::Fill => available,
            Size::Auto => self.estimate(node, style, is_width).min(available),
            Size::Percent(p) => ((available as f32 * p) as u16).min(available),
        }
    }

    /// Intrinsic size along one axis, including padding and border.
    fn estimate(&self, node: NodeId, style: &Style, is_width: bool) -> u16 {
        let doc = self.tree.document();
        if let Some(text) = doc.text(node) {
            let (width, height) = text_size(text);
            return if is_width { width } else { height };
        }

        let (bt, br, bb, bl) = style.border_widths();
        let chrome = if is_width {
            style.padding.horizontal_total() + bl + br
        } else {
            style.padding.vertical_total() + bt + bb
        };

        let flow: Vec<(NodeId, Style)> = self
            .tree
            .children(node)
            .iter()
            .map(|c| (*c, self.style(*c)))
            .filter(|(_, s)| s.position != Position::Fixed)
            .collect();
        if flow.is_empty() {
            return chrome;
        }

        let along_main = (style.direction == Direction::Row) == is_width;
        let extents = flow.iter().map(|(child, child_style)| {
            let margins = if is_width {
                child_style.margin.horizontal_total()
            } else {
                child_style.margin.vertical_total()
            };
            let size = if is_width {
                child_style.width
            } else {
                child_style.height
            };
            let own = match size {
                Size::Fixed(n) => n,
                _ => self.estimate(*child, child_style, is_width),
            };
            own + margins
        });

        let content = if along_main {
            extents.sum::<u16>() + style.gap * (flow.len() - 1) as u16
        } else {
            extents.max().unwrap_or(0)
        };
        content + chrome
    }
}

fn main_margins(style: &Style, is_row: bool) -> (u16, u16) {
    if is_row {
        (style.margin.left, style.margin.right)
    } else {
        (style.margin.top, style.margin.bottom)
    }
}
