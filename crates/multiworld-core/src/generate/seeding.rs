//! Starting-item seeding.
//!
//! For each player, each starting-item selector draws distinct uncollected
//! items from that player's own pool, in shuffled order to avoid bias
//! toward declaration order. An unsatisfiable selector is a specification
//! error, not a condition to recover from.

use hecs::Entity;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::entities::{Item, MultiWorld, Player};
use crate::generate::GenerationError;

use multiworld_logic::ItemSelector;

/// Mark each player's starting items as collected.
pub fn seed_starting_items(
    multi: &mut MultiWorld,
    rng: &mut impl Rng,
) -> Result<(), GenerationError> {
    let players: Vec<Entity> = multi.players().to_vec();

    for player in players {
        let selectors: Vec<ItemSelector> = multi
            .world
            .get::<&Player>(player)
            .map(|p| p.spec.starting_items.clone())
            .unwrap_or_default();
        if selectors.is_empty() {
            continue;
        }

        let mut pool = multi.items_of(player);
        pool.shuffle(rng);

        for selector in &selectors {
            let matching: Vec<Entity> = pool
                .iter()
                .copied()
                .filter(|&e| {
                    multi
                        .world
                        .get::<&Item>(e)
                        .map(|it| !it.collected && selector.matches(&it.name, &it.tags))
                        .unwrap_or(false)
                })
                .collect();

            if (matching.len() as u32) < selector.count() {
                return Err(GenerationError::Specification {
                    player: multi.player_name(player),
                    selector: selector.to_string(),
                    requested: selector.count(),
                    available: matching.len() as u32,
                });
            }

            for &item in matching.iter().take(selector.count() as usize) {
                if let Ok(mut it) = multi.world.get::<&mut Item>(item) {
                    it.collected = true;
                    log::debug!(
                        "seeded \"{}\" for player \"{}\"",
                        it.name,
                        multi.player_name(player)
                    );
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use multiworld_logic::MultiWorldSpec;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn graph(json: &str) -> MultiWorld {
        let spec: MultiWorldSpec = serde_json::from_str(json).unwrap();
        MultiWorld::from_spec(&spec)
    }

    #[test]
    fn seeds_by_tag() {
        let mut multi = graph(
            r#"{
                "name": "m",
                "players": {"P": {"world": {
                    "name": "W",
                    "startingItems": [{"tag": "Songs", "count": 2}],
                    "items": {
                        "A": {"tags": ["Songs"]},
                        "B": {"tags": ["Songs"]},
                        "C": {"tags": ["Songs"]},
                        "Key": {}
                    },
                    "tasks": {"T": {}}
                }}}
            }"#,
        );
        let mut rng = StdRng::seed_from_u64(7);
        seed_starting_items(&mut multi, &mut rng).unwrap();

        let player = multi.players()[0];
        let inventory = multi.inventory_of(player);
        assert_eq!(inventory.len(), 2);
        for item in inventory {
            let it = multi.world.get::<&Item>(item).unwrap();
            assert!(it.tags.contains(&"Songs".to_string()));
        }
    }

    #[test]
    fn seeds_by_name_across_duplicates() {
        let mut multi = graph(
            r#"{
                "name": "m",
                "players": {"P": {"world": {
                    "name": "W",
                    "startingItems": [{"item": "Key", "count": 2}],
                    "items": {"Key": {"count": 3}},
                    "tasks": {"T": {}}
                }}}
            }"#,
        );
        let mut rng = StdRng::seed_from_u64(7);
        seed_starting_items(&mut multi, &mut rng).unwrap();
        assert_eq!(multi.inventory_of(multi.players()[0]).len(), 2);
        assert_eq!(multi.uncollected_items().len(), 1);
    }

    #[test]
    fn selector_exhaustion_is_fatal() {
        // Requesting two "Songs" when only one exists must fail before
        // placement begins.
        let mut multi = graph(
            r#"{
                "name": "m",
                "players": {"P": {"world": {
                    "name": "W",
                    "startingItems": [{"tag": "Songs", "count": 2}],
                    "items": {"A": {"tags": ["Songs"]}, "Key": {}},
                    "tasks": {"T": {}}
                }}}
            }"#,
        );
        let mut rng = StdRng::seed_from_u64(7);
        let err = seed_starting_items(&mut multi, &mut rng).unwrap_err();
        match err {
            GenerationError::Specification {
                player,
                requested,
                available,
                ..
            } => {
                assert_eq!(player, "P");
                assert_eq!(requested, 2);
                assert_eq!(available, 1);
            }
            other => panic!("expected Specification error, got {:?}", other),
        }
    }

    #[test]
    fn selectors_draw_distinct_items() {
        // Two selectors for the same tag must not double-collect.
        let mut multi = graph(
            r#"{
                "name": "m",
                "players": {"P": {"world": {
                    "name": "W",
                    "startingItems": [
                        {"tag": "Songs", "count": 1},
                        {"tag": "Songs", "count": 1}
                    ],
                    "items": {"A": {"tags": ["Songs"]}, "B": {"tags": ["Songs"]}},
                    "tasks": {"T": {}}
                }}}
            }"#,
        );
        let mut rng = StdRng::seed_from_u64(7);
        seed_starting_items(&mut multi, &mut rng).unwrap();
        assert_eq!(multi.inventory_of(multi.players()[0]).len(), 2);
    }
}
