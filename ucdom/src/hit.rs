use crate::animation::AnimationState;
use crate::dom::{Document, NodeId};
use crate::layout::LayoutResult;
use crate::render::paint_order;
use crate::style::FlatTree;
use crate::types::PointerEvents;

/// Find the topmost element at the given coordinates.
///
/// Elements with `pointer-events: none` are transparent to the pointer and
/// whatever is painted below them gets the hit. Text hits its element.
pub fn hit_test(
    tree: &FlatTree,
    layout: &LayoutResult,
    animation: &AnimationState,
    x: u16,
    y: u16,
) -> Option<NodeId> {
    let doc = tree.document();
    paint_order(tree, layout, animation)
        .iter()
        .rev()
        .filter(|item| !item.is_text && item.pointer_events == PointerEvents::Auto)
        .filter(|item| doc.node(item.node).is_some_and(|n| n.is_element()))
        .find(|item| item.rect.contains(x, y))
        .map(|item| item.node)
}

impl Document {
    /// Hit test against a layout produced by [`Document::render`].
    pub fn hit_test(
        &self,
        layout: &LayoutResult,
        animation: &AnimationState,
        x: u16,
        y: u16,
    ) -> Option<NodeId> {
        let tree = FlatTree::build(self);
        hit_test(&tree, layout, animation, x, y)
    }
}
