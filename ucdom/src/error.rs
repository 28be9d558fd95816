//! Document error types.

use thiserror::Error;

use crate::dom::NodeId;

/// Errors returned by fallible document and registry operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomError {
    /// A custom element with this name is already defined.
    #[error("custom element '{0}' is already defined")]
    AlreadyDefined(String),

    /// The name is not a valid custom element name.
    #[error("'{0}' is not a valid custom element name")]
    InvalidName(String),

    /// No custom element with this name is defined.
    #[error("custom element '{0}' is not defined")]
    Undefined(String),

    /// The node id does not belong to this document.
    #[error("node {0} does not exist")]
    NotFound(NodeId),

    /// The operation needs an element but the node is text, a shadow root or the document.
    #[error("node {0} is not an element")]
    NotAnElement(NodeId),

    /// The element already hosts a shadow root.
    #[error("node {0} already has a shadow root")]
    ShadowRootExists(NodeId),

    /// The insertion would produce an invalid tree.
    #[error("hierarchy request error: {0}")]
    HierarchyRequest(String),
}
