use super::selector::Selector;
use crate::types::{Color, Declarations, Edges};

#[derive(Debug, Clone)]
pub struct Rule {
    pub selector: Selector,
    pub declarations: Declarations,
}

/// Ordered list of rules belonging to one tree scope.
#[derive(Debug, Clone, Default)]
pub struct Stylesheet {
    rules: Vec<Rule>,
}

impl Stylesheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rule(mut self, selector: Selector, declarations: Declarations) -> Self {
        self.rules.push(Rule {
            selector,
            declarations,
        });
        self
    }

    pub fn push(&mut self, selector: Selector, declarations: Declarations) {
        self.rules.push(Rule {
            selector,
            declarations,
        });
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }
}

/// Defaults applied in every tree scope, below author rules.
pub fn user_agent() -> Stylesheet {
    Stylesheet::new()
        .rule(
            Selector::tag("button"),
            Declarations::new()
                .padding(Edges::horizontal(1))
                .background(Color::rgb(221, 221, 221))
                .foreground(Color::black()),
        )
        .rule(Selector::tag("h1"), Declarations::new().bold())
}
