//! Layered forward-simulation placement.
//!
//! Items are placed as if a playthrough were collecting them: a task is
//! only ever chosen as a target once it is already reachable from its
//! player's collected-or-placed items, so the finished assignment is
//! consistent with some legal play order by construction.
//!
//! On top of that correctness-critical check sits a soft fairness policy:
//! tasks are consumed in shuffled "layers" spanning every player, and a
//! lookahead defers placements that would starve the rest of the current
//! layer. Fairness is abandoned (never correctness) when no deferral can
//! satisfy it.

use std::collections::VecDeque;

use hecs::Entity;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::access::AccessRule;
use crate::entities::{Item, MultiWorld, Task};
use crate::generate::GenerationError;

/// Per-player inventory snapshots, rebuilt incrementally as items are
/// placed. Only a player's own placements change their snapshot.
struct Snapshots {
    players: Vec<Entity>,
    inventories: Vec<Vec<Entity>>,
}

impl Snapshots {
    fn capture(multi: &MultiWorld) -> Self {
        let players = multi.players().to_vec();
        let inventories = players
            .iter()
            .map(|&p| multi.logical_inventory_of(p))
            .collect();
        Self {
            players,
            inventories,
        }
    }

    fn of(&self, player: Entity) -> &[Entity] {
        self.players
            .iter()
            .position(|&p| p == player)
            .map(|i| self.inventories[i].as_slice())
            .unwrap_or(&[])
    }

    fn record_placement(&mut self, owner: Entity, item: Entity) {
        if let Some(i) = self.players.iter().position(|&p| p == owner) {
            self.inventories[i].push(item);
        }
    }
}

/// Assign every uncollected item to a non-victory task. Returns the number
/// of items placed.
pub fn place_items<R: AccessRule>(
    multi: &mut MultiWorld,
    rng: &mut impl Rng,
    rule: &R,
) -> Result<usize, GenerationError> {
    // (item, owner) pairs; the pool order decides which item is "being
    // placed now", deferred items go to the back.
    let mut pool: VecDeque<(Entity, Entity)> = {
        let mut items: Vec<(Entity, Entity)> = multi
            .uncollected_items()
            .into_iter()
            .filter_map(|e| multi.world.get::<&Item>(e).ok().map(|it| (e, it.owner)))
            .collect();
        items.shuffle(rng);
        items.into()
    };
    if pool.is_empty() {
        return Ok(0);
    }

    // (task, owner) pairs for every valid placement target.
    let fillable: Vec<(Entity, Entity)> = multi
        .fillable_tasks()
        .into_iter()
        .filter_map(|e| multi.world.get::<&Task>(e).ok().map(|t| (e, t.owner)))
        .collect();
    if fillable.is_empty() {
        return Err(GenerationError::UnsolvableWorld {
            remaining_items: pool.len(),
            layer_size: 0,
        });
    }

    let mut layer = fresh_layer(&fillable, rng);
    let mut snapshots = Snapshots::capture(multi);
    let mut skips = 0usize;
    let mut placed = 0usize;

    while let Some((item, item_owner)) = pool.pop_front() {
        // Skip counter reached the pool size: every remaining item has been
        // deferred once for this layer, so fairness is unsatisfiable.
        let force_place = skips > pool.len();

        let Some(layer_idx) = layer
            .iter()
            .position(|&(task, owner)| rule.is_accessible(&multi.world, task, snapshots.of(owner)))
        else {
            return Err(GenerationError::UnsolvableWorld {
                remaining_items: pool.len() + 1,
                layer_size: layer.len(),
            });
        };
        let (task, _) = layer[layer_idx];

        if layer.len() > 1
            && !force_place
            && !leaves_layer_open(multi, rule, &snapshots, &layer, task, item, item_owner)
        {
            log::debug!(
                "deferring item {:?}: placement would starve the current layer",
                item
            );
            pool.push_back((item, item_owner));
            skips += 1;
            continue;
        }

        if let Ok(mut it) = multi.world.get::<&mut Item>(item) {
            it.assigned_task = Some(task);
            log::debug!("placed \"{}\" into task {:?}", it.name, task);
        }
        snapshots.record_placement(item_owner, item);
        placed += 1;
        layer.remove(layer_idx);
        let deferrals = skips;
        skips = 0;

        if force_place || layer.is_empty() {
            if force_place {
                log::info!("layer fairness abandoned after {} deferrals", deferrals);
            }
            layer = fresh_layer(&fillable, rng);
        }
    }

    Ok(placed)
}

fn fresh_layer(fillable: &[(Entity, Entity)], rng: &mut impl Rng) -> Vec<(Entity, Entity)> {
    let mut layer = fillable.to_vec();
    layer.shuffle(rng);
    log::debug!("task layer refilled ({} tasks)", layer.len());
    layer
}

/// Would placing `item` into `chosen` still leave some other task in the
/// layer reachable? Evaluated against the hypothetical post-placement
/// snapshot: the item joins its owner's placed set.
fn leaves_layer_open<R: AccessRule>(
    multi: &MultiWorld,
    rule: &R,
    snapshots: &Snapshots,
    layer: &[(Entity, Entity)],
    chosen: Entity,
    item: Entity,
    item_owner: Entity,
) -> bool {
    let mut hypothetical = snapshots.of(item_owner).to_vec();
    hypothetical.push(item);

    layer.iter().any(|&(task, owner)| {
        if task == chosen {
            return false;
        }
        let snapshot = if owner == item_owner {
            &hypothetical[..]
        } else {
            snapshots.of(owner)
        };
        rule.is_accessible(&multi.world, task, snapshot)
    })
}
