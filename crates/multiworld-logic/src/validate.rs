//! Static spec diagnostics.
//!
//! Catches structural problems before a generation run is attempted:
//! requirements that can never be met from the declared supply, starting
//! selectors that outstrip their candidates, degenerate worlds. These
//! checks are advisory; the generation run independently surfaces its own
//! fatal errors. They exist to pinpoint the offending declaration instead
//! of a mid-run failure.

use crate::spec::MultiWorldSpec;

/// A problem found in a declared specification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecIssue {
    /// The multiworld declares no players.
    NoPlayers,
    /// A player's world declares no items.
    NoItems { player: String },
    /// A player's world declares no tasks.
    NoTasks { player: String },
    /// A task requirement names an item/tag with zero declared supply.
    UnmatchableRequirement { player: String, task: String },
    /// A task requires more matching items than the world declares in total.
    InsufficientSupply {
        player: String,
        task: String,
        required: u32,
        available: u32,
    },
    /// A starting-item selector requests more items than match.
    SelectorOverdraw {
        player: String,
        selector: String,
        requested: u32,
        available: u32,
    },
    /// A victory task with no requirement is trivially complete.
    VictoryWithoutRequirement { player: String, task: String },
}

impl std::fmt::Display for SpecIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpecIssue::NoPlayers => write!(f, "multiworld declares no players"),
            SpecIssue::NoItems { player } => write!(f, "player \"{}\" declares no items", player),
            SpecIssue::NoTasks { player } => write!(f, "player \"{}\" declares no tasks", player),
            SpecIssue::UnmatchableRequirement { player, task } => write!(
                f,
                "task \"{}\" of player \"{}\" requires something no declared item matches",
                task, player
            ),
            SpecIssue::InsufficientSupply {
                player,
                task,
                required,
                available,
            } => write!(
                f,
                "task \"{}\" of player \"{}\" requires {} matching items but only {} exist",
                task, player, required, available
            ),
            SpecIssue::SelectorOverdraw {
                player,
                selector,
                requested,
                available,
            } => write!(
                f,
                "starting selector {} of player \"{}\" requests {} but only {} match",
                selector, player, requested, available
            ),
            SpecIssue::VictoryWithoutRequirement { player, task } => write!(
                f,
                "victory task \"{}\" of player \"{}\" has no requirement",
                task, player
            ),
        }
    }
}

/// Validate a multiworld specification, returning all issues found.
pub fn validate_spec(spec: &MultiWorldSpec) -> Vec<SpecIssue> {
    let mut issues = Vec::new();

    if spec.players.is_empty() {
        issues.push(SpecIssue::NoPlayers);
    }

    for (player_name, player) in &spec.players {
        let world = &player.world;

        if world.items.is_empty() {
            issues.push(SpecIssue::NoItems {
                player: player_name.clone(),
            });
        }
        if world.tasks.is_empty() {
            issues.push(SpecIssue::NoTasks {
                player: player_name.clone(),
            });
        }

        for (task_name, task) in &world.tasks {
            match &task.needs {
                Some(req) => {
                    let available = world.matching_supply(req);
                    if available == 0 {
                        issues.push(SpecIssue::UnmatchableRequirement {
                            player: player_name.clone(),
                            task: task_name.clone(),
                        });
                    } else if available < req.amount() {
                        issues.push(SpecIssue::InsufficientSupply {
                            player: player_name.clone(),
                            task: task_name.clone(),
                            required: req.amount(),
                            available,
                        });
                    }
                }
                None if task.victory => {
                    issues.push(SpecIssue::VictoryWithoutRequirement {
                        player: player_name.clone(),
                        task: task_name.clone(),
                    });
                }
                None => {}
            }
        }

        for selector in &world.starting_items {
            let available = world.selector_supply(selector);
            if available < selector.count() {
                issues.push(SpecIssue::SelectorOverdraw {
                    player: player_name.clone(),
                    selector: selector.to_string(),
                    requested: selector.count(),
                    available,
                });
            }
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::requirement::Requirement;
    use crate::spec::{ItemSelector, ItemSpec, PlayerSpec, TaskSpec, WorldSpec};
    use std::collections::BTreeMap;

    fn world_with(
        items: Vec<(&str, ItemSpec)>,
        tasks: Vec<(&str, TaskSpec)>,
        starting: Vec<ItemSelector>,
    ) -> MultiWorldSpec {
        let world = WorldSpec {
            name: "w".to_string(),
            starting_items: starting,
            items: items
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
            tasks: tasks
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        };
        let mut players = BTreeMap::new();
        players.insert("P1".to_string(), PlayerSpec { world });
        MultiWorldSpec {
            name: "m".to_string(),
            players,
        }
    }

    fn item(count: u32, tags: &[&str]) -> ItemSpec {
        ItemSpec {
            tags: tags.iter().map(|t| t.to_string()).collect(),
            count,
        }
    }

    fn task(needs: Option<Requirement>, victory: bool) -> TaskSpec {
        TaskSpec {
            tags: Vec::new(),
            needs,
            victory,
        }
    }

    #[test]
    fn clean_spec_has_no_issues() {
        let spec = world_with(
            vec![("Key", item(3, &[]))],
            vec![("Door", task(Some(Requirement::item("Key", 3)), false))],
            vec![],
        );
        assert!(validate_spec(&spec).is_empty());
    }

    #[test]
    fn empty_multiworld() {
        let spec = MultiWorldSpec {
            name: "m".to_string(),
            players: BTreeMap::new(),
        };
        assert_eq!(validate_spec(&spec), vec![SpecIssue::NoPlayers]);
    }

    #[test]
    fn requirement_over_supply() {
        let spec = world_with(
            vec![("Key", item(3, &[]))],
            vec![("Door", task(Some(Requirement::item("Key", 5)), false))],
            vec![],
        );
        let issues = validate_spec(&spec);
        assert!(issues.contains(&SpecIssue::InsufficientSupply {
            player: "P1".to_string(),
            task: "Door".to_string(),
            required: 5,
            available: 3,
        }));
    }

    #[test]
    fn requirement_with_no_candidates() {
        let spec = world_with(
            vec![("Key", item(1, &[]))],
            vec![("Door", task(Some(Requirement::tag("Songs", 1)), false))],
            vec![],
        );
        let issues = validate_spec(&spec);
        assert!(issues.iter().any(|i| matches!(
            i,
            SpecIssue::UnmatchableRequirement { task, .. } if task == "Door"
        )));
    }

    #[test]
    fn selector_overdraw() {
        let spec = world_with(
            vec![("Song A", item(1, &["Songs"]))],
            vec![("T", task(None, false))],
            vec![ItemSelector::Tag {
                tag: "Songs".to_string(),
                count: 2,
            }],
        );
        let issues = validate_spec(&spec);
        assert!(issues.iter().any(|i| matches!(
            i,
            SpecIssue::SelectorOverdraw { requested: 2, available: 1, .. }
        )));
    }

    #[test]
    fn victory_without_requirement() {
        let spec = world_with(
            vec![("Key", item(1, &[]))],
            vec![("Win", task(None, true))],
            vec![],
        );
        let issues = validate_spec(&spec);
        assert!(issues.iter().any(|i| matches!(
            i,
            SpecIssue::VictoryWithoutRequirement { task, .. } if task == "Win"
        )));
    }
}
