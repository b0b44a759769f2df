//! Session validity checking and persisted session state
//!
//! A session is a token/expiry pair kept in a [`Store`] under [`AUTH_TOKEN_KEY`]
//! and [`TOKEN_EXPIRY_KEY`]. Every failure mode (missing values, malformed
//! expiry, unreadable store) reads as "not authenticated" rather than an error.

use std::str::FromStr;

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};
use common::error::StoreResult;
use common::store::Store;
use thiserror::Error;
use tracing::{info, warn};

/// Store key holding the bearer token
pub const AUTH_TOKEN_KEY: &str = "authToken";

/// Store key holding the expiry marker
pub const TOKEN_EXPIRY_KEY: &str = "tokenExpiry";

/// Expiry marker meaning "one hour from now"
pub const ONE_HOUR_SENTINEL: &str = "1hr";

/// The expiry marker could not be read as a timestamp
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Malformed expiry: {0:?}")]
pub struct MalformedExpiry(pub String);

/// Parsed expiry marker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expiry {
    /// `"1hr"`, resolved against the time of each check rather than the time
    /// the session was created, so it never lapses on its own.
    OneHourFromCheck,
    /// A fixed instant
    At(DateTime<Utc>),
}

impl Expiry {
    /// Instant the session lapses when observed at `now`
    pub fn expires_at(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            Expiry::OneHourFromCheck => now.checked_add_signed(Duration::hours(1)),
            Expiry::At(instant) => Some(*instant),
        }
    }

    /// Whether the expiry lies strictly after `now`
    pub fn is_after(&self, now: DateTime<Utc>) -> bool {
        match self {
            Expiry::OneHourFromCheck => true,
            Expiry::At(instant) => *instant > now,
        }
    }
}

impl FromStr for Expiry {
    type Err = MalformedExpiry;

    /// Accepts `"1hr"`, RFC 3339, and offset-less `YYYY-MM-DD[ HH:MM:SS]`
    /// forms, the latter read as UTC.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value == ONE_HOUR_SENTINEL {
            return Ok(Expiry::OneHourFromCheck);
        }

        if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
            return Ok(Expiry::At(instant.with_timezone(&Utc)));
        }

        for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
            if let Ok(naive) = NaiveDateTime::parse_from_str(value, pattern) {
                return Ok(Expiry::At(naive.and_utc()));
            }
        }

        NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| Expiry::At(naive.and_utc()))
            .ok_or_else(|| MalformedExpiry(value.to_string()))
    }
}

/// Decide whether a token/expiry snapshot describes a live session at `now`
pub fn is_valid(token: Option<&str>, expiry: Option<&str>, now: DateTime<Utc>) -> bool {
    let (Some(token), Some(expiry)) = (token, expiry) else {
        return false;
    };

    if token.is_empty() || expiry.is_empty() {
        return false;
    }

    match expiry.parse::<Expiry>() {
        Ok(expiry) => expiry.is_after(now),
        Err(e) => {
            warn!("Treating session as invalid: {}", e);
            false
        }
    }
}

/// Snapshot of the persisted session values
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionRecord {
    pub token: Option<String>,
    pub expiry: Option<String>,
}

impl SessionRecord {
    /// Check this snapshot against `now`
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        is_valid(self.token.as_deref(), self.expiry.as_deref(), now)
    }
}

/// Reads and writes the session record in a key-value store
#[derive(Debug, Clone)]
pub struct SessionManager<S> {
    store: S,
}

impl<S: Store> SessionManager<S> {
    /// Create a session manager over `store`
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Persist a freshly issued session, replacing any previous one
    ///
    /// The old expiry is cleared before the new token lands, so a failure part
    /// way through never pairs the new token with the previous expiry.
    pub fn begin(&self, token: &str, expiry: &str) -> StoreResult<()> {
        info!("Storing session (expiry marker: {})", expiry);
        self.store.remove(TOKEN_EXPIRY_KEY)?;
        self.store.set(AUTH_TOKEN_KEY, token)?;

        if let Err(e) = self.store.set(TOKEN_EXPIRY_KEY, expiry) {
            if let Err(cleanup) = self.store.remove(AUTH_TOKEN_KEY) {
                warn!("Failed to clear half-written session: {}", cleanup);
            }
            return Err(e);
        }

        Ok(())
    }

    /// Forget the current session
    pub fn end(&self) -> StoreResult<()> {
        info!("Clearing session");
        self.store.remove(AUTH_TOKEN_KEY)?;
        self.store.remove(TOKEN_EXPIRY_KEY)?;
        Ok(())
    }

    /// Read the persisted session values
    pub fn record(&self) -> StoreResult<SessionRecord> {
        Ok(SessionRecord {
            token: self.store.get(AUTH_TOKEN_KEY)?,
            expiry: self.store.get(TOKEN_EXPIRY_KEY)?,
        })
    }

    /// Whether the persisted session is live at `now`
    pub fn is_authenticated_at(&self, now: DateTime<Utc>) -> bool {
        match self.record() {
            Ok(record) => record.is_valid_at(now),
            Err(e) => {
                warn!("Failed to read session from store: {}", e);
                false
            }
        }
    }

    /// Whether the persisted session is live right now
    pub fn is_authenticated(&self) -> bool {
        self.is_authenticated_at(Utc::now())
    }

    /// Token to send as `Authorization: Bearer ...`, only while the session is live
    pub fn bearer_token(&self) -> Option<String> {
        let now = Utc::now();
        match self.record() {
            Ok(record) if record.is_valid_at(now) => record.token,
            Ok(_) => None,
            Err(e) => {
                warn!("Failed to read session from store: {}", e);
                None
            }
        }
    }

    /// Instant the live session lapses when observed at `now`
    pub fn expires_at(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let record = self.record().ok()?;
        if !record.is_valid_at(now) {
            return None;
        }

        record.expiry?.parse::<Expiry>().ok()?.expires_at(now)
    }
}
