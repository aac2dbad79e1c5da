//! M-Hike application layer.
//!
//! Everything a UI shell needs besides drawing: account registration and
//! login, hike and observation actions mapped to view models, settings
//! persistence, and logging setup. Storage itself lives in `mhike-core`.

pub mod error;
pub mod logging;
pub mod service;
pub mod settings;
pub mod view;

// Re-export core library
pub use mhike_core::*;

pub use error::{AppError, Result};
pub use logging::init_logging;
pub use service::HikeLog;
pub use settings::{load_settings, save_settings, AppSettings};
pub use view::{AccountUser, DistanceUnit, HikeDraft, HikeStatus, HikeView, ObservationView};

/// Loads settings, installs logging, and opens the hike log they point at.
///
/// # Errors
///
/// Returns the error from [`HikeLog::open`].
pub fn start() -> Result<HikeLog> {
    let settings = load_settings();
    init_logging(settings.log_level_filter());
    log::info!("Starting M-Hike with database {}", settings.database_path);
    HikeLog::open(&settings)
}
