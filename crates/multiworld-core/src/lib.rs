//! Multiworld Core - Randomized Item-Placement Engine
//!
//! Given one or more players, each with a declarative world (items, gated
//! tasks, starting conditions), assign every item to a task such that the
//! result is completable: no item ever gates its own prerequisite chain.
//!
//! # Architecture
//!
//! The generation graph lives in a `hecs` entity arena:
//! - **Entities**: Players, items, tasks
//! - **Components**: Pure data ([`Player`], [`Item`], [`Task`]); the
//!   item→task assignment is a forward pointer on the item, and task
//!   contents are derived by reverse lookup
//! - **Engine**: Layered forward simulation that only ever places an item
//!   into a task already provably reachable
//!
//! # Example
//!
//! ```rust
//! use multiworld_core::prelude::*;
//!
//! let spec: multiworld_logic::MultiWorldSpec = serde_json::from_str(r#"{
//!     "name": "demo",
//!     "players": {"P1": {"world": {
//!         "name": "Demo World",
//!         "items": {"Key": {}, "Coin": {"count": 2}},
//!         "tasks": {
//!             "Open Field": {},
//!             "Locked Door": {"needs": {"item": "Key"}}
//!         }
//!     }}}
//! }"#).unwrap();
//!
//! let mut multi = MultiWorld::from_spec(&spec);
//! let report = generate(&mut multi, &GenerationConfig { seed: Some(42) }).unwrap();
//! println!("{}", report.render_text());
//! ```

pub mod access;
pub mod entities;
pub mod generate;
pub mod report;
pub mod verify;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::entities::{Item, MultiWorld, Player, Task};
    pub use crate::generate::{generate, GenerationConfig, GenerationError};
    pub use crate::report::GenerationReport;
    pub use crate::verify::verify_assignment;
}
