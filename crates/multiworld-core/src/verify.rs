//! Assignment verification by replay.
//!
//! Simulates an actual playthrough of a finished assignment: repeatedly
//! complete every task that is reachable from its player's *collected*
//! items (placed-but-uncollected credit is a placement-time device and gets
//! no credit here), handing each contained item to its owner, until a
//! fixpoint. A correct assignment collects every item; anything left over
//! means the solvability invariant was violated.
//!
//! Read-only over the entity graph; used by integration tests and the
//! headless harness, not by the generation hot path.

use std::collections::HashSet;

use hecs::Entity;
use serde::{Deserialize, Serialize};

use crate::access::{AccessRule, RequirementRule};
use crate::entities::{Item, MultiWorld, Task};

/// The discovered collection order: which tasks were completed, in
/// sequence, and what they yielded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionOrder {
    pub steps: Vec<CollectionStep>,
}

/// One completed task during replay.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionStep {
    /// Player who completed the task (the task's owner).
    pub player: String,
    pub task: String,
    /// Items yielded, with their owning players.
    pub items: Vec<String>,
}

/// Replay failure: the assignment is not completable.
#[derive(Debug)]
pub enum VerifyError {
    /// Replay reached a fixpoint with items still uncollected.
    Stuck {
        /// Player-qualified names of the stranded items.
        uncollected: Vec<String>,
    },
    /// An item was neither seeded nor assigned to any task.
    Unassigned { item: String },
}

impl std::fmt::Display for VerifyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VerifyError::Stuck { uncollected } => write!(
                f,
                "assignment is not completable: {} items unreachable ({})",
                uncollected.len(),
                uncollected.join(", ")
            ),
            VerifyError::Unassigned { item } => {
                write!(f, "item \"{}\" was never seeded or placed", item)
            }
        }
    }
}

impl std::error::Error for VerifyError {}

/// Replay a finished assignment and confirm it is completable.
pub fn verify_assignment(multi: &MultiWorld) -> Result<CollectionOrder, VerifyError> {
    let rule = RequirementRule;

    // Completeness first: every item must be either seeded or placed.
    for &item in multi.items() {
        if let Ok(it) = multi.world.get::<&Item>(item) {
            if !it.collected && it.assigned_task.is_none() {
                return Err(VerifyError::Unassigned {
                    item: format!("{}:{}", multi.player_name(it.owner), it.name),
                });
            }
        }
    }

    // Replay inventories start from the seeded items only.
    let mut collected: HashSet<Entity> = multi
        .players()
        .iter()
        .flat_map(|&p| multi.inventory_of(p))
        .collect();

    let mut remaining_tasks: Vec<Entity> = multi
        .tasks()
        .iter()
        .copied()
        .filter(|&t| !multi.items_in(t).is_empty())
        .collect();

    let mut steps = Vec::new();

    loop {
        let mut completed_this_pass = Vec::new();

        for &task in &remaining_tasks {
            let Ok(t) = multi.world.get::<&Task>(task) else {
                continue;
            };
            let snapshot: Vec<Entity> = multi
                .items_of(t.owner)
                .into_iter()
                .filter(|e| collected.contains(e))
                .collect();
            if !rule.is_accessible(&multi.world, task, &snapshot) {
                continue;
            }

            let yielded = multi.items_in(task);
            let item_names: Vec<String> = yielded
                .iter()
                .filter_map(|&e| {
                    multi
                        .world
                        .get::<&Item>(e)
                        .ok()
                        .map(|it| format!("{} ({})", it.name, multi.player_name(it.owner)))
                })
                .collect();
            collected.extend(yielded);

            steps.push(CollectionStep {
                player: multi.player_name(t.owner),
                task: t.name.clone(),
                items: item_names,
            });
            completed_this_pass.push(task);
        }

        if completed_this_pass.is_empty() {
            break;
        }
        remaining_tasks.retain(|t| !completed_this_pass.contains(t));
    }

    let uncollected: Vec<String> = multi
        .items()
        .iter()
        .filter(|e| !collected.contains(e))
        .filter_map(|&e| {
            multi
                .world
                .get::<&Item>(e)
                .ok()
                .map(|it| format!("{}:{}", multi.player_name(it.owner), it.name))
        })
        .collect();

    if uncollected.is_empty() {
        Ok(CollectionOrder { steps })
    } else {
        Err(VerifyError::Stuck { uncollected })
    }
}
