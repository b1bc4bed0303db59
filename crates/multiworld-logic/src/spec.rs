//! Declarative multiworld specification types.
//!
//! These are the caller-facing input to generation: each player declares a
//! world of items (with optional tags and counts), tasks gated by
//! requirements, and starting-item selectors. The types deserialize from the
//! camelCase JSON shape used by front ends.
//!
//! Named collections use `BTreeMap` so that iteration order, and with it
//! entity construction order under a fixed seed, is deterministic.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::requirement::Requirement;

fn default_count() -> u32 {
    1
}

/// The union of all players' worlds being generated together.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultiWorldSpec {
    pub name: String,
    pub players: BTreeMap<String, PlayerSpec>,
}

/// One player's slot in the multiworld.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerSpec {
    pub world: WorldSpec,
}

/// One player's declared set of items, tasks, and starting conditions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorldSpec {
    pub name: String,
    #[serde(default)]
    pub starting_items: Vec<ItemSelector>,
    #[serde(default)]
    pub items: BTreeMap<String, ItemSpec>,
    #[serde(default)]
    pub tasks: BTreeMap<String, TaskSpec>,
}

/// Declaration of an item kind. `count` produces that many independent item
/// instances sharing the name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemSpec {
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default = "default_count")]
    pub count: u32,
}

impl ItemSpec {
    /// Number of item instances this declaration expands to, floored at 1.
    pub fn instances(&self) -> u32 {
        self.count.max(1)
    }
}

/// Declaration of a task (a.k.a. location): a gated slot that can hold
/// items. `victory: true` marks a terminal goal rather than a placement
/// target.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskSpec {
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub needs: Option<Requirement>,
    #[serde(default)]
    pub victory: bool,
}

/// A starting-item selector: which of the player's own items are
/// pre-collected before placement begins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemSelector {
    /// Select `count` items with this exact name.
    Name {
        item: String,
        #[serde(default = "default_count")]
        count: u32,
    },
    /// Select `count` items carrying this tag.
    Tag {
        tag: String,
        #[serde(default = "default_count")]
        count: u32,
    },
}

impl ItemSelector {
    /// Number of items this selector draws, floored at 1.
    pub fn count(&self) -> u32 {
        match self {
            ItemSelector::Name { count, .. } | ItemSelector::Tag { count, .. } => (*count).max(1),
        }
    }

    /// Whether an item, described by its name and tags, is a candidate for
    /// this selector.
    pub fn matches(&self, name: &str, tags: &[String]) -> bool {
        match self {
            ItemSelector::Name { item, .. } => name == item,
            ItemSelector::Tag { tag, .. } => tags.iter().any(|t| t == tag),
        }
    }
}

impl std::fmt::Display for ItemSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemSelector::Name { item, .. } => write!(f, "{}x item \"{}\"", self.count(), item),
            ItemSelector::Tag { tag, .. } => write!(f, "{}x tag \"{}\"", self.count(), tag),
        }
    }
}

impl WorldSpec {
    /// Total number of item instances this world declares.
    pub fn total_items(&self) -> u32 {
        self.items.values().map(ItemSpec::instances).sum()
    }

    /// Total number of item instances matching a requirement's selector.
    pub fn matching_supply(&self, requirement: &Requirement) -> u32 {
        self.items
            .iter()
            .filter(|(name, spec)| requirement.matches(name, &spec.tags))
            .map(|(_, spec)| spec.instances())
            .sum()
    }

    /// Total number of item instances matching a starting-item selector.
    pub fn selector_supply(&self, selector: &ItemSelector) -> u32 {
        self.items
            .iter()
            .filter(|(name, spec)| selector.matches(name, &spec.tags))
            .map(|(_, spec)| spec.instances())
            .sum()
    }
}
