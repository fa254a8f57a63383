//! # Temporal Types
//!
//! Issue creation dates are assigned by the server, in UTC, and form part
//! of the issue's storage key. Postgres `TIMESTAMPTZ` keeps microseconds,
//! so dates are truncated to microseconds at assignment: a key read back
//! from the database must equal the key handed to the client.

use chrono::{DateTime, SubsecRound, Utc};

/// Current UTC time truncated to microsecond precision.
pub fn assign_timestamp() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}
