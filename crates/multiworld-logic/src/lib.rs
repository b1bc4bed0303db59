//! Pure specification logic for multiworld generation.
//!
//! This crate contains everything that is independent of the entity graph,
//! the RNG, and the placement engine: the declarative world/player
//! specification as it arrives from callers (JSON-compatible), requirement
//! matching, and static spec diagnostics. Functions take plain data and
//! return results, making them unit-testable and portable across the
//! generation engine, CLI tools, and any future serving layer.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`spec`] | Declarative multiworld/world/item/task specification types |
//! | [`requirement`] | Task gating conditions and inventory matching |
//! | [`validate`] | Static spec diagnostics (advisory, pre-generation) |

pub mod requirement;
pub mod spec;
pub mod validate;

pub use requirement::Requirement;
pub use spec::{ItemSelector, ItemSpec, MultiWorldSpec, PlayerSpec, TaskSpec, WorldSpec};
pub use validate::{validate_spec, SpecIssue};
