//! Roster data layer.
//!
//! Provides:
//! - Team member and game schema
//! - JSON codec for stored collections
//! - Save-through repositories
//! - Upcoming schedule and summary views

pub mod codec;
pub mod repository;
pub mod roster;
pub mod schema;
pub mod views;

pub use codec::CodecError;
pub use repository::{Entity, Repository, Upserted};
pub use roster::Roster;
pub use schema::{Game, RESULT_CHOICES, TeamMember};
pub use views::Summary;
