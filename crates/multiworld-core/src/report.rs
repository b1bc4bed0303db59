//! Generation reporting - a read-only, serializable view of the result.
//!
//! Safe to build at any point, including mid-failure for diagnostics.
//! Downstream layers (transport, storage, rendering) consume these types
//! and cannot mutate the assignment through them.

use serde::{Deserialize, Serialize};

use crate::access::is_accessible;
use crate::entities::{Item, MultiWorld, Player, Task};

/// The full result of a generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationReport {
    pub multiworld: String,
    pub players: Vec<PlayerReport>,
}

/// One player's share of the result.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerReport {
    pub player: String,
    pub world: String,
    /// Names of items collected at start (seeded).
    pub starting_inventory: Vec<String>,
    pub tasks: Vec<TaskReport>,
    /// Whether every victory task's requirement is satisfiable from the
    /// player's full final inventory. `None` when the player declares no
    /// victory task.
    pub victory_reachable: Option<bool>,
}

/// One task and the items placed into it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskReport {
    pub task: String,
    pub victory: bool,
    pub items: Vec<PlacedItem>,
}

/// An item placed into a task. `owner` matters because items may be placed
/// across players.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacedItem {
    pub item: String,
    pub owner: String,
}

/// Build a report from the current state of the entity graph.
pub fn build_report(multi: &MultiWorld) -> GenerationReport {
    let players = multi
        .players()
        .iter()
        .map(|&player| {
            let (name, world_name) = multi
                .world
                .get::<&Player>(player)
                .map(|p| (p.name.clone(), p.spec.name.clone()))
                .unwrap_or_default();

            let starting_inventory = multi
                .inventory_of(player)
                .into_iter()
                .filter_map(|e| multi.world.get::<&Item>(e).ok().map(|it| it.name.clone()))
                .collect();

            let tasks = multi
                .tasks_of(player)
                .into_iter()
                .filter_map(|task| {
                    let t = multi.world.get::<&Task>(task).ok()?;
                    let items = multi
                        .items_in(task)
                        .into_iter()
                        .filter_map(|e| {
                            let it = multi.world.get::<&Item>(e).ok()?;
                            Some(PlacedItem {
                                item: it.name.clone(),
                                owner: multi.player_name(it.owner),
                            })
                        })
                        .collect();
                    Some(TaskReport {
                        task: t.name.clone(),
                        victory: t.victory,
                        items,
                    })
                })
                .collect();

            // Everything the player owns is eventually collectible in a
            // successful run, so victory is checked against the full set.
            let victory_tasks = multi.victory_tasks_of(player);
            let victory_reachable = if victory_tasks.is_empty() {
                None
            } else {
                let everything = multi.items_of(player);
                Some(
                    victory_tasks
                        .iter()
                        .all(|&t| is_accessible(&multi.world, t, &everything)),
                )
            };

            PlayerReport {
                player: name,
                world: world_name,
                starting_inventory,
                tasks,
                victory_reachable,
            }
        })
        .collect();

    GenerationReport {
        multiworld: multi.name().to_string(),
        players,
    }
}

impl GenerationReport {
    /// Plain-text rendering for CLI/harness output.
    pub fn render_text(&self) -> String {
        use std::fmt::Write;

        let mut out = String::new();
        let _ = writeln!(out, "=== {} ===", self.multiworld);
        for player in &self.players {
            let _ = writeln!(out, "\n== {} ({}) ==", player.player, player.world);
            let _ = writeln!(out, "Starting inventory:");
            for item in &player.starting_inventory {
                let _ = writeln!(out, "- {}", item);
            }
            let _ = writeln!(out, "Tasks:");
            for task in &player.tasks {
                let contents: Vec<String> = task
                    .items
                    .iter()
                    .map(|p| format!("{} ({})", p.item, p.owner))
                    .collect();
                let marker = if task.victory { " [victory]" } else { "" };
                let _ = writeln!(out, "- {}{} [{}]", task.task, marker, contents.join(", "));
            }
            if let Some(reachable) = player.victory_reachable {
                let _ = writeln!(
                    out,
                    "Victory: {}",
                    if reachable { "reachable" } else { "unreachable" }
                );
            }
        }
        out
    }
}
