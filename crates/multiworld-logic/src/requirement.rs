//! Task gating requirements and inventory matching.
//!
//! A requirement names either a specific item or an item tag, plus the
//! number of matching items that must be present. Matching is defined over
//! plain `(name, tags)` views so it can be evaluated against any inventory
//! representation, live or hypothetical.

use serde::{Deserialize, Serialize};

fn default_amount() -> u32 {
    1
}

/// A condition gating a task's reachability.
///
/// Serialized in the caller-facing JSON shape: `{"item": "Key", "amount": 3}`
/// or `{"itemTag": "Songs", "amount": 2}`. `amount` defaults to 1 and is
/// floored at 1 during evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Requirement {
    /// Requires `amount` items with this exact name.
    Item {
        item: String,
        #[serde(default = "default_amount")]
        amount: u32,
    },
    /// Requires `amount` items carrying this tag.
    Tag {
        #[serde(rename = "itemTag")]
        item_tag: String,
        #[serde(default = "default_amount")]
        amount: u32,
    },
}

impl Requirement {
    /// Convenience constructor for a by-name requirement.
    pub fn item(name: impl Into<String>, amount: u32) -> Self {
        Requirement::Item {
            item: name.into(),
            amount,
        }
    }

    /// Convenience constructor for a by-tag requirement.
    pub fn tag(tag: impl Into<String>, amount: u32) -> Self {
        Requirement::Tag {
            item_tag: tag.into(),
            amount,
        }
    }

    /// The required number of matching items, floored at 1.
    pub fn amount(&self) -> u32 {
        match self {
            Requirement::Item { amount, .. } | Requirement::Tag { amount, .. } => (*amount).max(1),
        }
    }

    /// Whether a single item, described by its name and tags, counts toward
    /// this requirement.
    pub fn matches(&self, name: &str, tags: &[String]) -> bool {
        match self {
            Requirement::Item { item, .. } => name == item,
            Requirement::Tag { item_tag, .. } => tags.iter().any(|t| t == item_tag),
        }
    }

    /// Whether an inventory of `(name, tags)` views satisfies this
    /// requirement. Stops counting as soon as the required amount is reached.
    pub fn is_satisfied<'a, I>(&self, inventory: I) -> bool
    where
        I: IntoIterator<Item = (&'a str, &'a [String])>,
    {
        let needed = self.amount() as usize;
        inventory
            .into_iter()
            .filter(|(name, tags)| self.matches(name, tags))
            .take(needed)
            .count()
            == needed
    }
}

impl std::fmt::Display for Requirement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Requirement::Item { item, .. } => write!(f, "{}x item \"{}\"", self.amount(), item),
            Requirement::Tag { item_tag, .. } => write!(f, "{}x tag \"{}\"", self.amount(), item_tag),
        }
    }
}
