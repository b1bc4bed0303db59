//! Accessibility evaluation - "is this task reachable given that inventory?"
//!
//! Pure functions over the entity graph: no side effects, cheap enough to be
//! called combinatorially by the placement engine. The inventory snapshot is
//! always passed in explicitly so callers can test hypothetical future
//! states, not just the live inventory.

use hecs::{Entity, World};

use crate::entities::{Item, Task};

/// Pluggable per-task reachability check.
///
/// The default rule evaluates the task's declared requirement against the
/// snapshot; alternative rules can layer in cross-world conditions without
/// touching the placement engine.
pub trait AccessRule {
    fn is_accessible(&self, world: &World, task: Entity, snapshot: &[Entity]) -> bool;
}

/// The standard rule: a task with no requirement is always accessible;
/// otherwise the snapshot must contain the required count of matching items.
pub struct RequirementRule;

impl AccessRule for RequirementRule {
    fn is_accessible(&self, world: &World, task: Entity, snapshot: &[Entity]) -> bool {
        let Ok(task) = world.get::<&Task>(task) else {
            return false;
        };
        let Some(requirement) = &task.requirement else {
            return true;
        };

        let needed = requirement.amount() as usize;
        snapshot
            .iter()
            .filter(|&&e| {
                world
                    .get::<&Item>(e)
                    .map(|it| requirement.matches(&it.name, &it.tags))
                    .unwrap_or(false)
            })
            .take(needed)
            .count()
            == needed
    }
}

/// Evaluate a task against an inventory snapshot with the standard rule.
pub fn is_accessible(world: &World, task: Entity, snapshot: &[Entity]) -> bool {
    RequirementRule.is_accessible(world, task, snapshot)
}

/// The subset of `tasks` accessible under `snapshot`.
pub fn accessible_tasks(
    world: &World,
    tasks: &[Entity],
    snapshot: &[Entity],
    rule: &impl AccessRule,
) -> Vec<Entity> {
    tasks
        .iter()
        .copied()
        .filter(|&t| rule.is_accessible(world, t, snapshot))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::MultiWorld;
    use multiworld_logic::MultiWorldSpec;

    fn graph() -> MultiWorld {
        let spec: MultiWorldSpec = serde_json::from_str(
            r#"{
                "name": "m",
                "players": {
                    "P": {"world": {
                        "name": "W",
                        "items": {"Key": {"count": 3}, "Song": {"tags": ["Songs"]}},
                        "tasks": {
                            "Free": {},
                            "Door": {"needs": {"item": "Key", "amount": 3}},
                            "Stage": {"needs": {"itemTag": "Songs"}}
                        }
                    }}
                }
            }"#,
        )
        .unwrap();
        MultiWorld::from_spec(&spec)
    }

    fn task_named(multi: &MultiWorld, name: &str) -> Entity {
        multi
            .tasks()
            .iter()
            .copied()
            .find(|&t| multi.world.get::<&Task>(t).unwrap().name == name)
            .unwrap()
    }

    fn items_named(multi: &MultiWorld, name: &str) -> Vec<Entity> {
        multi
            .items()
            .iter()
            .copied()
            .filter(|&e| multi.world.get::<&Item>(e).unwrap().name == name)
            .collect()
    }

    #[test]
    fn no_requirement_is_always_accessible() {
        let multi = graph();
        let free = task_named(&multi, "Free");
        assert!(is_accessible(&multi.world, free, &[]));
    }

    #[test]
    fn count_threshold() {
        let multi = graph();
        let door = task_named(&multi, "Door");
        let keys = items_named(&multi, "Key");
        assert!(!is_accessible(&multi.world, door, &[]));
        assert!(!is_accessible(&multi.world, door, &keys[..2]));
        assert!(is_accessible(&multi.world, door, &keys));
    }

    #[test]
    fn tag_requirement() {
        let multi = graph();
        let stage = task_named(&multi, "Stage");
        let keys = items_named(&multi, "Key");
        let songs = items_named(&multi, "Song");
        assert!(!is_accessible(&multi.world, stage, &keys));
        assert!(is_accessible(&multi.world, stage, &songs));
    }

    #[test]
    fn evaluation_is_idempotent() {
        let multi = graph();
        let door = task_named(&multi, "Door");
        let keys = items_named(&multi, "Key");
        let first = is_accessible(&multi.world, door, &keys);
        let second = is_accessible(&multi.world, door, &keys);
        assert_eq!(first, second);
        // And the snapshot itself is untouched.
        assert_eq!(keys.len(), 3);
    }

    #[test]
    fn accessible_subset() {
        let multi = graph();
        let songs = items_named(&multi, "Song");
        let open = accessible_tasks(&multi.world, multi.tasks(), &songs, &RequirementRule);
        let names: Vec<_> = open
            .iter()
            .map(|&t| multi.world.get::<&Task>(t).unwrap().name.clone())
            .collect();
        assert!(names.contains(&"Free".to_string()));
        assert!(names.contains(&"Stage".to_string()));
        assert!(!names.contains(&"Door".to_string()));
    }
}
