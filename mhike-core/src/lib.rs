//! Core library for M-Hike — a local-first hiking log.
//!
//! The primary entry point is [`HikeDatabase`], an owned handle to one SQLite
//! database holding users, their hikes, and the observations recorded on each
//! hike. All reads and writes go through `HikeDatabase` methods.
//!
//! Types are re-exported from their respective sub-modules for convenience;
//! consumers should import from the crate root rather than the `core` module.

pub mod core;

// Re-export commonly used types.
#[doc(inline)]
pub use crate::core::{
    database::HikeDatabase,
    error::{HikeLogError, Result},
    hike::{parse_length, Difficulty, Hike, HikeUpdate, NewHike},
    observation::{NewObservation, Observation, ObservationKind},
    search::HikeFilter,
    storage::StorageTarget,
    user::{NewUser, User},
};
