//! # nameday-engine
//!
//! Pure computation for a client-relationship notification backend:
//! national identity code validation and decoding, name-to-nameday
//! resolution with exact and prefix-fallback matching, and deterministic
//! celebration-window arithmetic.
//!
//! Every function takes explicit inputs (no system clock, no I/O) — the
//! caller supplies the nameday table, the person records, and the "today"
//! anchor. Persistence, transport, and import glue live upstream.
//!
//! ## Modules
//!
//! - [`identity`] — 10-digit identity code: checksum validation, birth date, gender, age
//! - [`nameday`] — nameday table resolver with exact-first, prefix-fallback matching
//! - [`occurrence`] — projection of annual month/day pairs onto concrete upcoming dates
//! - [`roster`] — person records with derived fields and celebration-window filters
//! - [`error`] — error types

pub mod error;
pub mod identity;
pub mod nameday;
pub mod occurrence;
pub mod roster;

pub use error::NamedayError;
pub use identity::{age_on, decode, extract_birth_date, is_valid, DecodedIdentity, Gender};
pub use nameday::{NamedayEntry, NamedayResolver};
pub use occurrence::MonthDay;
pub use roster::{birthdays_on, namedays_on, upcoming_celebrations, Person};
