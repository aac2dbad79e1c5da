//! Internal domain modules for the M-Hike core library.
//!
//! All public types from these modules are re-exported at the crate root
//! with `#[doc(inline)]`; import from there in preference to this module.

pub mod database;
pub mod error;
pub mod hike;
pub mod observation;
pub mod search;
pub mod storage;
pub mod user;

#[doc(inline)]
pub use database::HikeDatabase;
#[doc(inline)]
pub use error::{HikeLogError, Result};
#[doc(inline)]
pub use hike::{parse_length, Difficulty, Hike, HikeUpdate, NewHike};
#[doc(inline)]
pub use observation::{NewObservation, Observation, ObservationKind};
#[doc(inline)]
pub use search::HikeFilter;
#[doc(inline)]
pub use storage::StorageTarget;
#[doc(inline)]
pub use user::{NewUser, User};
