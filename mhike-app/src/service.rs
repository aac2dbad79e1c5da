//! Account and hike-log actions the UI shell invokes.

use crate::view::{AccountUser, HikeDraft, HikeStatus, HikeView, ObservationView};
use crate::{AppError, AppSettings, Result};
use chrono::{DateTime, Utc};
use mhike_core::{
    HikeDatabase, HikeFilter, HikeUpdate, NewObservation, NewUser, ObservationKind,
};
use std::collections::HashSet;
use std::fs;

/// The application's handle on one user's hiking log.
///
/// Owns the [`HikeDatabase`] it was given; every action is a thin
/// composition of persistence calls plus mapping into view types.
pub struct HikeLog {
    db: HikeDatabase,
}

impl HikeLog {
    pub fn new(db: HikeDatabase) -> Self {
        Self { db }
    }

    /// Opens the database named by `settings`, creating its directory first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Io`] if the directory cannot be created, or the
    /// core initialization error if the database cannot be opened.
    pub fn open(settings: &AppSettings) -> Result<Self> {
        let target = settings.storage_target();
        if let mhike_core::StorageTarget::File(path) = &target {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
        }
        let mut db = HikeDatabase::new(target);
        db.initialize()?;
        Ok(Self::new(db))
    }

    pub fn database(&self) -> &HikeDatabase {
        &self.db
    }

    pub fn into_database(self) -> HikeDatabase {
        self.db
    }

    // ── Accounts ─────────────────────────────────────────────────

    /// Creates an account after checking the email is free.
    pub fn register(&mut self, name: &str, email: &str, password: &str) -> Result<AccountUser> {
        if self.db.get_user_by_email(email)?.is_some() {
            return Err(AppError::EmailTaken(email.to_string()));
        }
        let id = self.db.create_user(&NewUser::new(email, password, name))?;
        log::info!("Registered user {id}");
        Ok(AccountUser {
            id,
            name: name.to_string(),
            email: email.to_string(),
        })
    }

    /// Checks `password` against the stored one.
    ///
    /// The comparison is plain-text equality, matching how passwords are stored.
    pub fn login(&self, email: &str, password: &str) -> Result<AccountUser> {
        match self.db.get_user_by_email(email)? {
            Some(user) if user.password == password => {
                log::info!("User {} logged in", user.id);
                Ok(user.into())
            }
            _ => {
                log::warn!("Failed login attempt");
                Err(AppError::InvalidCredentials)
            }
        }
    }

    /// Looks up the account a saved session id points to.
    pub fn restore_session(&self, user_id: i64) -> Result<Option<AccountUser>> {
        Ok(self.db.get_user_by_id(user_id)?.map(AccountUser::from))
    }

    // ── Hikes ────────────────────────────────────────────────────

    /// Loads every hike of `user_id` together with its observations,
    /// most recent date first.
    pub fn load_hikes(&self, user_id: i64) -> Result<Vec<HikeView>> {
        let hikes = self.db.get_hikes_by_user_id(user_id)?;
        self.with_observations(hikes)
    }

    /// Runs `filter` against the user's stored hikes, then keeps those whose
    /// completion matches `status`.
    ///
    /// `completed` is not stored, so it is carried over from `current`, the
    /// hikes the caller already holds; hikes absent from it count as planned.
    pub fn search(
        &self,
        user_id: i64,
        filter: &HikeFilter,
        status: HikeStatus,
        current: &[HikeView],
    ) -> Result<Vec<HikeView>> {
        let completed: HashSet<&str> = current
            .iter()
            .filter(|h| h.completed)
            .map(|h| h.id.as_str())
            .collect();

        let hikes = self.db.filter_hikes(user_id, filter)?;
        let mut views = self.with_observations(hikes)?;
        for view in &mut views {
            view.completed = completed.contains(view.id.as_str());
        }
        views.retain(|view| status.matches(view));
        Ok(views)
    }

    fn with_observations(&self, hikes: Vec<mhike_core::Hike>) -> Result<Vec<HikeView>> {
        hikes
            .into_iter()
            .map(|hike| -> Result<HikeView> {
                let observations = self.db.get_observations_by_hike_id(hike.id)?;
                Ok(HikeView::new(hike, observations))
            })
            .collect()
    }

    pub fn add_hike(&mut self, user_id: i64, draft: HikeDraft) -> Result<HikeView> {
        let id = self.db.create_hike(&draft.into_new_hike(user_id))?;
        let hike = self
            .db
            .get_hike_by_id(id)?
            .ok_or(mhike_core::HikeLogError::HikeNotFound(id))?;
        Ok(HikeView::new(hike, Vec::new()))
    }

    pub fn update_hike(&mut self, hike_id: i64, update: &HikeUpdate) -> Result<()> {
        self.db.update_hike(hike_id, update)?;
        Ok(())
    }

    pub fn delete_hike(&mut self, hike_id: i64) -> Result<()> {
        self.db.delete_hike(hike_id)?;
        Ok(())
    }

    /// Removes all of the user's hikes and their observations.
    pub fn delete_all_hikes(&mut self, user_id: i64) -> Result<usize> {
        let removed = self.db.delete_hikes_by_user_id(user_id)?;
        log::info!("Deleted all {removed} hikes of user {user_id}");
        Ok(removed)
    }

    // ── Observations ─────────────────────────────────────────────

    pub fn add_observation(
        &mut self,
        hike_id: i64,
        kind: ObservationKind,
        timestamp: DateTime<Utc>,
        note: &str,
    ) -> Result<ObservationView> {
        let id = self
            .db
            .create_observation(&NewObservation::new(hike_id, kind, timestamp, note))?;
        Ok(ObservationView {
            id: id.to_string(),
            timestamp,
            note: note.to_string(),
            kind,
        })
    }

    pub fn delete_observation(&mut self, observation_id: i64) -> Result<()> {
        self.db.delete_observation(observation_id)?;
        Ok(())
    }
}
