//! Nameday table lookup with exact-first, prefix-fallback matching.
//!
//! A resolver is built once from an ordered table of (name, month, day)
//! entries and is immutable afterwards — a changed table means a new
//! resolver, which keeps concurrent resolution free of shared mutable
//! state. Lookups are case-insensitive using Unicode lowercasing, since
//! production tables carry Cyrillic names.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::NamedayError;
use crate::occurrence::MonthDay;

/// Year used to validate month/day pairs when entries are created. A leap
/// year, so Feb 29 entries are accepted; validity is not re-checked at
/// lookup time.
const REFERENCE_YEAR: i32 = 2000;

/// One calendar nameday: a name celebrated on a fixed month/day each year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedayEntry {
    pub name: String,
    /// Calendar month, 1–12.
    pub month: u32,
    /// Day of month, 1–31; must exist in the reference year.
    pub day: u32,
}

impl NamedayEntry {
    /// Create a validated entry.
    ///
    /// # Errors
    ///
    /// Returns [`NamedayError::InvalidEntry`] for a blank name or a
    /// month/day pair that is not a real calendar day.
    pub fn new(name: impl Into<String>, month: u32, day: u32) -> Result<Self, NamedayError> {
        let entry = Self {
            name: name.into(),
            month,
            day,
        };
        entry.validate()?;
        Ok(entry)
    }

    /// Re-check the construction invariants. Exposed for loaders that
    /// deserialize entries from external files and bypass [`new`].
    ///
    /// [`new`]: NamedayEntry::new
    pub fn validate(&self) -> Result<(), NamedayError> {
        if self.name.trim().is_empty() {
            return Err(NamedayError::InvalidEntry("blank name".to_string()));
        }
        if NaiveDate::from_ymd_opt(REFERENCE_YEAR, self.month, self.day).is_none() {
            return Err(NamedayError::InvalidEntry(format!(
                "'{}': no such calendar day {:02}-{:02}",
                self.name, self.month, self.day
            )));
        }
        Ok(())
    }

    /// The annual (month, day) pair of this entry.
    pub fn month_day(&self) -> MonthDay {
        MonthDay::new(self.month, self.day)
    }

    /// This nameday projected onto a concrete year. `None` for a Feb 29
    /// entry in a non-leap year.
    pub fn for_year(&self, year: i32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(year, self.month, self.day)
    }
}

/// Resolves namedays for given names against a fixed table.
///
/// Table order is significant: within each matching pass the first match
/// wins, so duplicate or overlapping names tie-break by declaration order.
#[derive(Debug, Clone)]
pub struct NamedayResolver {
    entries: Vec<NamedayEntry>,
    // Lowercased names, index-aligned with entries, folded once at
    // construction.
    folded: Vec<String>,
}

impl NamedayResolver {
    /// Build a resolver over an ordered table. Entries are assumed to have
    /// been validated by their loader ([`NamedayEntry::new`] or
    /// [`NamedayEntry::validate`]).
    pub fn new(entries: Vec<NamedayEntry>) -> Self {
        let folded = entries.iter().map(|e| e.name.to_lowercase()).collect();
        Self { entries, folded }
    }

    /// Resolve the nameday entry for a person's given name.
    ///
    /// Two passes, both case-insensitive and in table order:
    ///
    /// 1. **Exact** — the entry name equals `first_name`. Always attempted
    ///    first so an exact match is never shadowed by a looser prefix
    ///    match that happens to sort earlier.
    /// 2. **Prefix fallback** — `first_name` is a prefix of the entry name
    ///    or vice versa, which lets diminutive or extended forms match a
    ///    canonical calendar name (e.g. "Ivanka" against "Ivan").
    ///
    /// Blank input and no-match both yield `None`; absence is not an error.
    ///
    /// # Examples
    ///
    /// ```
    /// use nameday_engine::nameday::{NamedayEntry, NamedayResolver};
    ///
    /// let resolver = NamedayResolver::new(vec![
    ///     NamedayEntry::new("Ivan", 1, 7).unwrap(),
    /// ]);
    /// assert_eq!(resolver.resolve("ivan").unwrap().day, 7);
    /// assert_eq!(resolver.resolve("Ivanka").unwrap().day, 7);
    /// assert!(resolver.resolve("Maria").is_none());
    /// ```
    pub fn resolve(&self, first_name: &str) -> Option<&NamedayEntry> {
        let name = first_name.trim();
        if name.is_empty() {
            return None;
        }
        let needle = name.to_lowercase();

        if let Some(i) = self.folded.iter().position(|f| *f == needle) {
            return Some(&self.entries[i]);
        }

        self.folded
            .iter()
            .position(|f| needle.starts_with(f.as_str()) || f.starts_with(&needle))
            .map(|i| &self.entries[i])
    }

    /// Resolve and project onto a concrete year.
    pub fn resolve_for_year(&self, first_name: &str, year: i32) -> Option<NaiveDate> {
        self.resolve(first_name).and_then(|e| e.for_year(year))
    }

    /// All entries celebrated on the given month/day, in table order.
    pub fn entries_on(&self, month: u32, day: u32) -> Vec<&NamedayEntry> {
        self.entries
            .iter()
            .filter(|e| e.month == month && e.day == day)
            .collect()
    }

    /// The backing table, in original order.
    pub fn entries(&self) -> &[NamedayEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
