//! A small element document for terminal UIs.
//!
//! Nodes live in one [`Document`] arena. Elements carry attributes and may
//! host a shadow tree whose `slot` elements project the host's children.
//! Events propagate through shadow boundaries the way composed DOM events
//! do, custom elements are upgraded from a [`CustomElementRegistry`], and
//! rendering goes flat tree, cascade, transitions, layout, then paint.

pub mod animation;
pub mod buffer;
pub mod dom;
pub mod error;
pub mod event;
pub mod hit;
pub mod layout;
pub mod registry;
pub mod render;
pub mod style;
pub mod terminal;
pub mod text;
pub mod transitions;
pub mod types;

pub use animation::{AnimationState, PropertyValue, TransitionProperty};
pub use buffer::{Buffer, Cell};
pub use dom::{
    Document, DomEvent, ElementData, EventInit, EventPhase, Listener, ListenerId, Node, NodeId,
    NodeKind, CLICK, SLOTCHANGE, SLOT_TAG,
};
pub use error::DomError;
pub use event::{Event, Key, Modifiers, MouseButton};
pub use hit::hit_test;
pub use layout::{layout, LayoutResult, Rect};
pub use registry::{
    registered_elements, CustomElement, CustomElementRegistry, ElementRegistration,
};
pub use render::render_to_buffer;
pub use style::{Compound, FlatTree, Rule, Selector, Specificity, Stylesheet};
pub use terminal::Terminal;
pub use transitions::{Easing, TransitionConfig, Transitions};
pub use types::*;
