//! The hike database handle: lifecycle plus every create/read/update/delete
//! operation over users, hikes and observations.

use crate::core::observation::{format_time, parse_time};
use crate::core::storage::{Storage, StorageTarget};
use crate::{
    Hike, HikeFilter, HikeLogError, HikeUpdate, NewHike, NewObservation, NewUser, Observation,
    Result, User,
};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};

const USER_COLUMNS: &str = "id, email, password, name, created_at";
const HIKE_COLUMNS: &str = "id, user_id, name, location, date, length, difficulty, \
                            parking_available, description, duration, created_at";
const OBSERVATION_COLUMNS: &str = "id, hike_id, type, name, time, comment, created_at";

/// An owned handle to one hike database.
///
/// The handle starts uninitialized. [`initialize`](Self::initialize) opens the
/// connection and provisions the schema; every other operation fails with
/// [`HikeLogError::NotInitialized`] until it has succeeded.
/// [`close`](Self::close) returns the handle to the uninitialized state.
///
/// Each operation issues a single statement, so each is its own implicit
/// transaction. The operations below are the whole interface; the underlying
/// connection is not exposed.
///
/// ```compile_fail
/// let db = mhike_core::HikeDatabase::open_in_memory().unwrap();
/// let _ = db.connection();
/// ```
pub struct HikeDatabase {
    target: StorageTarget,
    storage: Option<Storage>,
}

impl HikeDatabase {
    /// Creates an uninitialized handle for `target`.
    pub fn new(target: StorageTarget) -> Self {
        Self {
            target,
            storage: None,
        }
    }

    /// Creates and initializes a handle backed by a private in-memory database.
    ///
    /// # Errors
    ///
    /// Returns [`HikeLogError::Initialization`] if the schema cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        let mut db = Self::new(StorageTarget::InMemory);
        db.initialize()?;
        Ok(db)
    }

    /// Opens the connection and creates any missing tables and indexes.
    ///
    /// Calling this on an initialized handle does nothing.
    ///
    /// # Errors
    ///
    /// Returns [`HikeLogError::Initialization`] if the database cannot be
    /// opened or provisioned. There is no retry.
    pub fn initialize(&mut self) -> Result<()> {
        if self.storage.is_some() {
            return Ok(());
        }

        let storage = Storage::open(&self.target).map_err(|e| {
            log::error!("Error initializing database: {e}");
            HikeLogError::Initialization(e.to_string())
        })?;
        self.storage = Some(storage);

        log::info!("Database initialized successfully ({:?})", self.target);
        Ok(())
    }

    /// Releases the connection. A no-op when nothing is open.
    ///
    /// The handle is uninitialized afterwards even if SQLite reports an error
    /// while closing.
    pub fn close(&mut self) -> Result<()> {
        match self.storage.take() {
            Some(storage) => {
                storage.close()?;
                log::info!("Database closed");
                Ok(())
            }
            None => Ok(()),
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.storage.is_some()
    }

    pub fn target(&self) -> &StorageTarget {
        &self.target
    }

    /// Returns the open connection.
    ///
    /// # Errors
    ///
    /// Returns [`HikeLogError::NotInitialized`] before initialization.
    pub(crate) fn connection(&self) -> Result<&Connection> {
        self.storage
            .as_ref()
            .map(Storage::connection)
            .ok_or(HikeLogError::NotInitialized)
    }

    /// Runs an INSERT and returns the new row's id.
    fn insert(&self, what: &str, sql: &str, params: impl rusqlite::Params) -> Result<i64> {
        let conn = self.connection()?;
        let changed = conn.execute(sql, params)?;
        if changed == 0 {
            return Err(HikeLogError::CreateFailed(what.to_string()));
        }
        let id = conn.last_insert_rowid();
        log::debug!("Created {what} {id}");
        Ok(id)
    }

    // ── Users ─────────────────────────────────────────────────────

    /// Registers a new account and returns its id.
    ///
    /// # Errors
    ///
    /// Returns [`HikeLogError::Database`] carrying SQLite's constraint error if
    /// `email` is already registered; no row is written in that case.
    pub fn create_user(&mut self, user: &NewUser) -> Result<i64> {
        self.insert(
            "user",
            "INSERT INTO users (email, password, name) VALUES (?, ?, ?)",
            params![user.email, user.password, user.name],
        )
    }

    /// Looks up an account by exact, case-sensitive email.
    pub fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = self
            .connection()?
            .query_row(
                &format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?"),
                [email],
                map_user_row,
            )
            .optional()?;
        Ok(user)
    }

    pub fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        let user = self
            .connection()?
            .query_row(
                &format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?"),
                [id],
                map_user_row,
            )
            .optional()?;
        Ok(user)
    }

    // ── Hikes ─────────────────────────────────────────────────────

    /// Stores a hike for `hike.user_id` and returns its id.
    ///
    /// A missing description is stored as the empty string.
    ///
    /// # Errors
    ///
    /// Returns [`HikeLogError::Database`] if `user_id` does not reference an
    /// existing user.
    pub fn create_hike(&mut self, hike: &NewHike) -> Result<i64> {
        self.insert(
            "hike",
            "INSERT INTO hikes (user_id, name, location, date, length, difficulty, parking_available, description, duration)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
            params![
                hike.user_id,
                hike.name,
                hike.location,
                hike.date,
                hike.length,
                hike.difficulty,
                hike.parking_available,
                hike.description.as_deref().unwrap_or(""),
                hike.duration,
            ],
        )
    }

    /// Returns every hike owned by `user_id`, most recent date first.
    pub fn get_hikes_by_user_id(&self, user_id: i64) -> Result<Vec<Hike>> {
        self.filter_hikes(user_id, &HikeFilter::default())
    }

    pub fn get_hike_by_id(&self, id: i64) -> Result<Option<Hike>> {
        let hike = self
            .connection()?
            .query_row(
                &format!("SELECT {HIKE_COLUMNS} FROM hikes WHERE id = ?"),
                [id],
                map_hike_row,
            )
            .optional()?;
        Ok(hike)
    }

    /// Writes only the fields present in `update`.
    ///
    /// An empty update returns immediately without touching the database.
    ///
    /// # Errors
    ///
    /// Returns [`HikeLogError::HikeNotFound`] if a non-empty update matched no row.
    pub fn update_hike(&mut self, id: i64, update: &HikeUpdate) -> Result<()> {
        let assignments = update.assignments();
        if assignments.is_empty() {
            return Ok(());
        }

        let set_clause = assignments
            .iter()
            .map(|(column, _)| format!("{column} = ?"))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!("UPDATE hikes SET {set_clause} WHERE id = ?");

        let mut values: Vec<&dyn rusqlite::ToSql> =
            assignments.iter().map(|(_, value)| *value).collect();
        values.push(&id);

        let changed = self.connection()?.execute(&sql, values.as_slice())?;
        if changed == 0 {
            return Err(HikeLogError::HikeNotFound(id));
        }
        log::debug!("Updated hike {id} ({set_clause})");
        Ok(())
    }

    /// Deletes a hike; its observations go with it. Missing ids are ignored.
    pub fn delete_hike(&mut self, id: i64) -> Result<()> {
        self.connection()?
            .execute("DELETE FROM hikes WHERE id = ?", [id])?;
        log::debug!("Deleted hike {id}");
        Ok(())
    }

    /// Deletes every hike owned by `user_id` and returns how many were removed.
    pub fn delete_hikes_by_user_id(&mut self, user_id: i64) -> Result<usize> {
        let removed = self
            .connection()?
            .execute("DELETE FROM hikes WHERE user_id = ?", [user_id])?;
        log::debug!("Deleted {removed} hikes of user {user_id}");
        Ok(removed)
    }

    /// Returns the user's hikes whose name, location or description contains
    /// `term`, most recent date first.
    ///
    /// Case folding follows SQLite's `LIKE`, which ignores ASCII case only.
    pub fn search_hikes(&self, user_id: i64, term: &str) -> Result<Vec<Hike>> {
        self.filter_hikes(user_id, &HikeFilter::with_term(term))
    }

    /// Returns the user's hikes matching every criterion in `filter`, most
    /// recent date first.
    ///
    /// Rows whose date, difficulty or timestamp cannot be decoded are logged
    /// and left out rather than failing the whole list.
    pub fn filter_hikes(&self, user_id: i64, filter: &HikeFilter) -> Result<Vec<Hike>> {
        let (conditions, mut values) = filter.to_sql();
        values.insert(0, Value::Integer(user_id));

        let sql = format!(
            "SELECT {HIKE_COLUMNS} FROM hikes WHERE user_id = ?{conditions} ORDER BY date DESC"
        );
        let mut stmt = self.connection()?.prepare(&sql)?;
        let hikes = skip_undecodable("hike", stmt.query_map(params_from_iter(values), map_hike_row)?)?;
        Ok(hikes
            .into_iter()
            .filter(|hike| filter.matches_length(hike))
            .collect())
    }

    // ── Observations ──────────────────────────────────────────────

    /// Records an observation against `observation.hike_id` and returns its id.
    ///
    /// A missing comment is stored as the empty string.
    pub fn create_observation(&mut self, observation: &NewObservation) -> Result<i64> {
        self.insert(
            "observation",
            "INSERT INTO observations (hike_id, type, name, time, comment) VALUES (?, ?, ?, ?, ?)",
            params![
                observation.hike_id,
                observation.kind,
                observation.name,
                format_time(&observation.time),
                observation.comment.as_deref().unwrap_or(""),
            ],
        )
    }

    /// Returns a hike's observations in the order they were made.
    ///
    /// Rows with an unreadable type or time are logged and left out.
    pub fn get_observations_by_hike_id(&self, hike_id: i64) -> Result<Vec<Observation>> {
        let mut stmt = self.connection()?.prepare(&format!(
            "SELECT {OBSERVATION_COLUMNS} FROM observations WHERE hike_id = ? ORDER BY time ASC"
        ))?;
        let observations =
            skip_undecodable("observation", stmt.query_map([hike_id], map_observation_row)?)?;
        Ok(observations)
    }

    pub fn delete_observation(&mut self, id: i64) -> Result<()> {
        self.connection()?
            .execute("DELETE FROM observations WHERE id = ?", [id])?;
        log::debug!("Deleted observation {id}");
        Ok(())
    }
}

/// Collects mapped rows, dropping those that fail to decode. Any other
/// SQLite error still fails the whole read.
fn skip_undecodable<T>(
    what: &str,
    rows: impl Iterator<Item = rusqlite::Result<T>>,
) -> Result<Vec<T>> {
    let mut out = Vec::new();
    for row in rows {
        match row {
            Ok(value) => out.push(value),
            Err(rusqlite::Error::FromSqlConversionFailure(column, _, e)) => {
                log::warn!("Skipping {what} row: column {column} could not be decoded: {e}");
            }
            Err(e) => return Err(e.into()),
        }
    }
    Ok(out)
}

fn map_user_row(row: &Row) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        email: row.get(1)?,
        password: row.get(2)?,
        name: row.get(3)?,
        created_at: row.get(4)?,
    })
}

fn map_hike_row(row: &Row) -> rusqlite::Result<Hike> {
    Ok(Hike {
        id: row.get(0)?,
        user_id: row.get(1)?,
        name: row.get(2)?,
        location: row.get(3)?,
        date: row.get(4)?,
        length: row.get(5)?,
        difficulty: row.get(6)?,
        parking_available: row.get::<_, i64>(7).map(|v| v == 1)?,
        description: row.get::<_, Option<String>>(8)?.unwrap_or_default(),
        duration: row.get(9)?,
        created_at: row.get(10)?,
    })
}

fn map_observation_row(row: &Row) -> rusqlite::Result<Observation> {
    let raw_time: String = row.get(4)?;
    let time = parse_time(&raw_time).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(4, rusqlite::types::Type::Text, Box::new(e))
    })?;
    Ok(Observation {
        id: row.get(0)?,
        hike_id: row.get(1)?,
        kind: row.get(2)?,
        name: row.get(3)?,
        time,
        comment: row.get::<_, Option<String>>(5)?.unwrap_or_default(),
        created_at: row.get(6)?,
    })
}
