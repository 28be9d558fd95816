mod cascade;
mod selector;
mod sheet;

pub use cascade::FlatTree;
pub use selector::{Compound, Selector, Specificity};
pub use sheet::{user_agent, Rule, Stylesheet};
