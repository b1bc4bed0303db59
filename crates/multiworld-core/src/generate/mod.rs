//! Generation - seeding and layered item placement.
//!
//! A run is an atomic unit of work: it either produces a complete
//! assignment, solvable by construction, or a fatal [`GenerationError`].
//! Partial assignments are never exposed.

mod placement;
mod seeding;

pub use placement::place_items;
pub use seeding::seed_starting_items;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::access::RequirementRule;
use crate::entities::MultiWorld;
use crate::report::{build_report, GenerationReport};

/// Configuration for a generation run.
#[derive(Debug, Clone, Default)]
pub struct GenerationConfig {
    /// Random seed; a fixed seed reproduces a run exactly. `None` draws
    /// entropy.
    pub seed: Option<u64>,
}

/// Fatal generation failure. Both variants are terminal for the run;
/// lookahead deferrals and layer resets are internal control flow and never
/// surface here.
#[derive(Debug)]
pub enum GenerationError {
    /// The declared specification cannot even be seeded: a starting-item
    /// selector has too few matching candidates.
    Specification {
        player: String,
        selector: String,
        requested: u32,
        available: u32,
    },
    /// During placement, no task in the current layer is reachable - the
    /// world's logic is unsatisfiable.
    UnsolvableWorld {
        remaining_items: usize,
        layer_size: usize,
    },
}

impl std::fmt::Display for GenerationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerationError::Specification {
                player,
                selector,
                requested,
                available,
            } => write!(
                f,
                "invalid starting items for player \"{}\": selector {} requested {} but only {} match",
                player, selector, requested, available
            ),
            GenerationError::UnsolvableWorld {
                remaining_items,
                layer_size,
            } => write!(
                f,
                "no reachable task for any of the {} remaining items ({} tasks in current layer) - the world specification is unsolvable",
                remaining_items, layer_size
            ),
        }
    }
}

impl std::error::Error for GenerationError {}

/// Run a full generation: seed starting items, place the entire pool,
/// build the report.
pub fn generate(
    multi: &mut MultiWorld,
    config: &GenerationConfig,
) -> Result<GenerationReport, GenerationError> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    generate_with_rng(multi, &mut rng)
}

/// Like [`generate`], but with a caller-supplied RNG. All randomness in the
/// run flows through it, so regression tests can replay exact runs.
pub fn generate_with_rng(
    multi: &mut MultiWorld,
    rng: &mut impl Rng,
) -> Result<GenerationReport, GenerationError> {
    seed_starting_items(multi, rng)?;
    let placed = place_items(multi, rng, &RequirementRule)?;
    log::info!(
        "generation complete: {} items placed across {} players",
        placed,
        multi.players().len()
    );
    Ok(build_report(multi))
}
