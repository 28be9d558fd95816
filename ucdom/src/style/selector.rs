use crate::dom::{Document, NodeId};

/// `(ids, attributes and pseudo-classes, tags)`, compared lexicographically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Specificity(pub u16, pub u16, pub u16);

impl std::ops::Add for Specificity {
    type Output = Specificity;

    fn add(self, rhs: Self) -> Self::Output {
        Specificity(self.0 + rhs.0, self.1 + rhs.1, self.2 + rhs.2)
    }
}

/// A compound selector: optional tag, optional id, and attribute-presence tests.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Compound {
    pub tag: Option<String>,
    pub id: Option<String>,
    pub attributes: Vec<String>,
}

impl Compound {
    /// Matches every element.
    pub fn any() -> Self {
        Self::default()
    }

    pub fn tag(tag: impl Into<String>) -> Self {
        Self {
            tag: Some(tag.into()),
            ..Default::default()
        }
    }

    pub fn id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Default::default()
        }
    }

    /// Add an `[attr]` presence test.
    pub fn attr(mut self, name: impl Into<String>) -> Self {
        self.attributes.push(name.into());
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn matches(&self, doc: &Document, node: NodeId) -> bool {
        let Some(element) = doc.node(node).and_then(|n| n.as_element()) else {
            return false;
        };
        if let Some(tag) = &self.tag {
            if element.tag != *tag {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if element.attribute("id") != Some(id.as_str()) {
                return false;
            }
        }
        self.attributes
            .iter()
            .all(|name| element.attribute(name).is_some())
    }

    pub fn specificity(&self) -> Specificity {
        Specificity(
            self.id.is_some() as u16,
            self.attributes.len() as u16,
            self.tag.is_some() as u16,
        )
    }
}

/// A scoped selector.
///
/// - `chain` is a list of compounds joined by descendant combinators, subject last;
/// - `host` restricts the rule to shadow trees whose host matches (`:host(...)`);
///   with an empty chain the host itself is the subject;
/// - `slotted` makes light children projected into the tree the subject (`::slotted(...)`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selector {
    pub host: Option<Compound>,
    pub chain: Vec<Compound>,
    pub slotted: Option<Compound>,
}

impl Selector {
    pub fn compound(compound: Compound) -> Self {
        Self {
            chain: vec![compound],
            ..Default::default()
        }
    }

    pub fn tag(tag: impl Into<String>) -> Self {
        Self::compound(Compound::tag(tag))
    }

    pub fn id(id: impl Into<String>) -> Self {
        Self::compound(Compound::id(id))
    }

    /// `:host`
    pub fn host() -> Self {
        Self {
            host: Some(Compound::any()),
            ..Default::default()
        }
    }

    /// `:host([attr])`
    pub fn host_with(attr: impl Into<String>) -> Self {
        Self {
            host: Some(Compound::any().attr(attr)),
            ..Default::default()
        }
    }

    /// `::slotted(compound)`
    pub fn slotted(compound: Compound) -> Self {
        Self {
            slotted: Some(compound),
            ..Default::default()
        }
    }

    /// Append a descendant compound; it becomes the new subject.
    pub fn descendant(mut self, compound: Compound) -> Self {
        self.chain.push(compound);
        self
    }

    pub fn specificity(&self) -> Specificity {
        let mut total = self
            .chain
            .iter()
            .fold(Specificity::default(), |acc, c| acc + c.specificity());
        if let Some(host) = &self.host {
            total = total + Specificity(0, 1, 0) + host.specificity();
        }
        if let Some(slotted) = &self.slotted {
            total = total + Specificity(0, 0, 1) + slotted.specificity();
        }
        total
    }

    /// Selects the shadow host itself.
    pub fn is_host_rule(&self) -> bool {
        self.host.is_some() && self.chain.is_empty() && self.slotted.is_none()
    }

    pub fn is_slotted_rule(&self) -> bool {
        self.slotted.is_some()
    }

    fn host_matches(&self, doc: &Document, scope: NodeId) -> bool {
        match &self.host {
            None => true,
            Some(compound) => doc
                .host_of(scope)
                .is_some_and(|host| compound.matches(doc, host)),
        }
    }

    /// Match a plain rule against `node`, whose tree scope root is `scope`.
    pub fn matches_in_scope(&self, doc: &Document, scope: NodeId, node: NodeId) -> bool {
        if self.is_host_rule() || self.is_slotted_rule() || !self.host_matches(doc, scope) {
            return false;
        }
        let Some((subject, ancestors)) = self.chain.split_last() else {
            return false;
        };
        if !subject.matches(doc, node) {
            return false;
        }

        // Descendant combinators only, so greedy right-to-left matching is exact.
        let mut current = doc.parent(node);
        for compound in ancestors.iter().rev() {
            loop {
                match current {
                    Some(id) if id != scope => {
                        current = doc.parent(id);
                        if compound.matches(doc, id) {
                            break;
                        }
                    }
                    _ => return false,
                }
            }
        }
        true
    }

    /// Match a `:host` rule from the stylesheet of `host`'s shadow root.
    pub fn matches_host(&self, doc: &Document, host: NodeId) -> bool {
        self.is_host_rule()
            && self
                .host
                .as_ref()
                .is_some_and(|compound| compound.matches(doc, host))
    }

    /// Match a `::slotted` rule from `scope` against a projected light child.
    pub fn matches_slotted(&self, doc: &Document, scope: NodeId, node: NodeId) -> bool {
        self.slotted
            .as_ref()
            .is_some_and(|compound| compound.matches(doc, node))
            && self.chain.is_empty()
            && self.host_matches(doc, scope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn specificity_ordering() {
        let id = Selector::id("modal").specificity();
        let host_id = Selector::host_with("opened")
            .descendant(Compound::id("modal"))
            .specificity();
        let tag = Selector::tag("header").specificity();
        let slotted = Selector::slotted(Compound::tag("h1")).specificity();

        assert_eq!(id, Specificity(1, 0, 0));
        assert_eq!(host_id, Specificity(1, 2, 0));
        assert_eq!(slotted, Specificity(0, 0, 2));
        assert!(host_id > id);
        assert!(id > tag);
    }
}
