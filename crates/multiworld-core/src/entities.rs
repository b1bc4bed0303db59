//! Entity graph - players, items, and tasks in a `hecs` arena.
//!
//! The `Entity` id is the stable identifier; relationships are single
//! forward pointers (`Item::owner`, `Item::assigned_task`, `Task::owner`)
//! and the reverse direction is always derived by lookup, so there is no
//! dual-maintained containment state.

use hecs::{Entity, World};

use multiworld_logic::{MultiWorldSpec, Requirement, WorldSpec};

/// Player component - owns a partitioned subset of items and tasks, and
/// holds the originating world specification (needed for starting-item
/// selectors during seeding).
#[derive(Debug, Clone)]
pub struct Player {
    pub name: String,
    pub spec: WorldSpec,
}

/// Item component. One entity per declared count; duplicate-named items are
/// distinct entities.
///
/// Mutated at most once during generation: `collected` is set during
/// seeding, or `assigned_task` is set during placement.
#[derive(Debug, Clone)]
pub struct Item {
    pub name: String,
    pub tags: Vec<String>,
    /// Back-reference to the owning player.
    pub owner: Entity,
    /// True once in the owner's starting/active inventory.
    pub collected: bool,
    /// The task this item was placed into, unset until placement.
    pub assigned_task: Option<Entity>,
}

/// Task component. Never mutated after construction; contained items are
/// derived by reverse lookup over `Item::assigned_task`.
#[derive(Debug, Clone)]
pub struct Task {
    pub name: String,
    pub tags: Vec<String>,
    /// No requirement = always accessible.
    pub requirement: Option<Requirement>,
    /// Victory tasks are terminal goals, never placement targets.
    pub victory: bool,
    /// Back-reference to the owning player.
    pub owner: Entity,
}

/// The aggregate root: owns the entity arena and the ordered entity lists
/// captured at construction.
///
/// Entity lists follow spec declaration order (players, then each player's
/// tasks and items in `BTreeMap` order), so a fixed RNG seed reproduces a
/// generation run exactly.
pub struct MultiWorld {
    pub world: World,
    name: String,
    players: Vec<Entity>,
    items: Vec<Entity>,
    tasks: Vec<Entity>,
}

impl MultiWorld {
    /// Normalize a declarative spec into concrete entities.
    pub fn from_spec(spec: &MultiWorldSpec) -> Self {
        let mut world = World::new();
        let mut players = Vec::new();
        let mut items = Vec::new();
        let mut tasks = Vec::new();

        for (player_name, player_spec) in &spec.players {
            let player = world.spawn((Player {
                name: player_name.clone(),
                spec: player_spec.world.clone(),
            },));
            players.push(player);

            for (task_name, task_spec) in &player_spec.world.tasks {
                let task = world.spawn((Task {
                    name: task_name.clone(),
                    tags: task_spec.tags.clone(),
                    requirement: task_spec.needs.clone(),
                    victory: task_spec.victory,
                    owner: player,
                },));
                tasks.push(task);
            }

            for (item_name, item_spec) in &player_spec.world.items {
                for _ in 0..item_spec.instances() {
                    let item = world.spawn((Item {
                        name: item_name.clone(),
                        tags: item_spec.tags.clone(),
                        owner: player,
                        collected: false,
                        assigned_task: None,
                    },));
                    items.push(item);
                }
            }
        }

        Self {
            world,
            name: spec.name.clone(),
            players,
            items,
            tasks,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// All player entities, in declaration order.
    pub fn players(&self) -> &[Entity] {
        &self.players
    }

    /// All item entities across all players, in declaration order.
    pub fn items(&self) -> &[Entity] {
        &self.items
    }

    /// All task entities across all players, in declaration order.
    pub fn tasks(&self) -> &[Entity] {
        &self.tasks
    }

    pub fn player_name(&self, player: Entity) -> String {
        self.world
            .get::<&Player>(player)
            .map(|p| p.name.clone())
            .unwrap_or_default()
    }

    /// Items owned by a player.
    pub fn items_of(&self, player: Entity) -> Vec<Entity> {
        self.filter_items(|it| it.owner == player)
    }

    /// Tasks owned by a player.
    pub fn tasks_of(&self, player: Entity) -> Vec<Entity> {
        self.filter_tasks(|t| t.owner == player)
    }

    /// A player's collected items.
    pub fn inventory_of(&self, player: Entity) -> Vec<Entity> {
        self.filter_items(|it| it.owner == player && it.collected)
    }

    /// A player's items that are placed in some task but not yet collected.
    pub fn placed_items_of(&self, player: Entity) -> Vec<Entity> {
        self.filter_items(|it| it.owner == player && !it.collected && it.assigned_task.is_some())
    }

    /// The inventory snapshot the placement engine reasons over: everything
    /// a player has collected or already had placed somewhere.
    pub fn logical_inventory_of(&self, player: Entity) -> Vec<Entity> {
        self.filter_items(|it| it.owner == player && (it.collected || it.assigned_task.is_some()))
    }

    /// The global placement pool: items neither collected nor assigned.
    pub fn uncollected_items(&self) -> Vec<Entity> {
        self.filter_items(|it| !it.collected && it.assigned_task.is_none())
    }

    /// All non-victory tasks - the only valid placement targets.
    pub fn fillable_tasks(&self) -> Vec<Entity> {
        self.filter_tasks(|t| !t.victory)
    }

    /// A player's victory tasks.
    pub fn victory_tasks_of(&self, player: Entity) -> Vec<Entity> {
        self.filter_tasks(|t| t.victory && t.owner == player)
    }

    /// Items currently assigned to a task (reverse lookup).
    pub fn items_in(&self, task: Entity) -> Vec<Entity> {
        self.filter_items(|it| it.assigned_task == Some(task))
    }

    fn filter_items(&self, pred: impl Fn(&Item) -> bool) -> Vec<Entity> {
        self.items
            .iter()
            .copied()
            .filter(|&e| {
                self.world
                    .get::<&Item>(e)
                    .map(|it| pred(&it))
                    .unwrap_or(false)
            })
            .collect()
    }

    fn filter_tasks(&self, pred: impl Fn(&Task) -> bool) -> Vec<Entity> {
        self.tasks
            .iter()
            .copied()
            .filter(|&e| {
                self.world
                    .get::<&Task>(e)
                    .map(|t| pred(&t))
                    .unwrap_or(false)
            })
            .collect()
    }
}
