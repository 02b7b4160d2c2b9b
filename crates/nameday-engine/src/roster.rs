//! Person records with derived celebration dates, and the pure filters the
//! notification layer runs over them.
//!
//! Persistence and batching belong to the caller: these functions take
//! explicit slices and an explicit "today" and compute nothing else. A
//! person's identity fields are never mutated here — [`Person::register`]
//! derives the birth date and nameday once, and the caller owns the record
//! from then on.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::NamedayError;
use crate::identity;
use crate::nameday::NamedayResolver;
use crate::occurrence::MonthDay;

/// A client record as the notification pipeline sees it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    pub first_name: String,
    #[serde(default)]
    pub last_name: Option<String>,
    pub identity_code: String,
    /// Derived from the identity code at registration.
    pub birth_date: NaiveDate,
    /// Resolved from the nameday table at registration; absent when no
    /// entry matched.
    #[serde(default)]
    pub nameday: Option<MonthDay>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default = "default_enabled")]
    pub notifications_enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl Person {
    /// Build a person from raw registration input, deriving the birth date
    /// from the identity code and resolving the nameday from the table.
    ///
    /// # Errors
    ///
    /// Returns [`NamedayError::InvalidPerson`] for a blank first name, or
    /// the specific identity-code error when the code does not validate.
    pub fn register(
        first_name: impl Into<String>,
        last_name: Option<String>,
        identity_code: impl Into<String>,
        email: Option<String>,
        resolver: &NamedayResolver,
    ) -> Result<Self, NamedayError> {
        let first_name = first_name.into();
        if first_name.trim().is_empty() {
            return Err(NamedayError::InvalidPerson(
                "first name is required".to_string(),
            ));
        }
        let identity_code = identity_code.into();
        identity::validate(&identity_code)?;
        let birth_date = identity::extract_birth_date(&identity_code)?;
        let nameday = resolver.resolve(&first_name).map(|e| e.month_day());

        Ok(Self {
            first_name,
            last_name,
            identity_code,
            birth_date,
            nameday,
            email: email.filter(|e| !e.trim().is_empty()),
            notifications_enabled: true,
        })
    }

    pub fn full_name(&self) -> String {
        match &self.last_name {
            Some(last) if !last.trim().is_empty() => {
                format!("{} {}", self.first_name, last)
            }
            _ => self.first_name.clone(),
        }
    }

    /// The annual (month, day) of this person's birthday.
    pub fn birthday(&self) -> MonthDay {
        MonthDay::from_date(self.birth_date)
    }

    /// The earlier of the next birthday and the next nameday, relative to
    /// `today`.
    pub fn next_celebration(&self, today: NaiveDate) -> Option<NaiveDate> {
        let birthday = self.birthday().next_from(today);
        let nameday = self.nameday.and_then(|md| md.next_from(today));
        match (birthday, nameday) {
            (Some(b), Some(n)) => Some(b.min(n)),
            (b, n) => b.or(n),
        }
    }
}

/// People whose birthday falls on `date`, notifications enabled only.
pub fn birthdays_on<'a>(people: &'a [Person], date: NaiveDate) -> Vec<&'a Person> {
    people
        .iter()
        .filter(|p| p.notifications_enabled && p.birthday().on_date(date))
        .collect()
}

/// People whose resolved nameday falls on `date`, notifications enabled
/// only. People without a resolved nameday never appear.
pub fn namedays_on<'a>(people: &'a [Person], date: NaiveDate) -> Vec<&'a Person> {
    people
        .iter()
        .filter(|p| {
            p.notifications_enabled && p.nameday.is_some_and(|md| md.on_date(date))
        })
        .collect()
}

/// People with a birthday or nameday within `window_days` of `today`
/// (inclusive), notifications enabled only, ordered by their next
/// celebration date.
pub fn upcoming_celebrations<'a>(
    people: &'a [Person],
    today: NaiveDate,
    window_days: i64,
) -> Vec<&'a Person> {
    let mut upcoming: Vec<&Person> = people
        .iter()
        .filter(|p| {
            p.notifications_enabled
                && (p.birthday().within_days(today, window_days)
                    || p.nameday.is_some_and(|md| md.within_days(today, window_days)))
        })
        .collect();
    upcoming.sort_by_key(|p| p.next_celebration(today).unwrap_or(NaiveDate::MAX));
    upcoming
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nameday::NamedayEntry;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn resolver() -> NamedayResolver {
        NamedayResolver::new(vec![
            NamedayEntry::new("Ivan", 1, 7).unwrap(),
            NamedayEntry::new("Georgi", 5, 6).unwrap(),
        ])
    }

    fn person(first: &str, birth: NaiveDate, nameday: Option<MonthDay>) -> Person {
        Person {
            first_name: first.to_string(),
            last_name: None,
            identity_code: "8001014507".to_string(),
            birth_date: birth,
            nameday,
            email: None,
            notifications_enabled: true,
        }
    }

    // ── register ────────────────────────────────────────────────────────

    #[test]
    fn test_register_derives_birth_date_and_nameday() {
        let p = Person::register(
            "Ivan",
            Some("Petrov".to_string()),
            "8001014507",
            Some("ivan@example.com".to_string()),
            &resolver(),
        )
        .unwrap();
        assert_eq!(p.birth_date, date(1980, 1, 1));
        assert_eq!(p.nameday, Some(MonthDay::new(1, 7)));
        assert_eq!(p.full_name(), "Ivan Petrov");
        assert!(p.notifications_enabled);
    }

    #[test]
    fn test_register_diminutive_gets_prefix_nameday() {
        let p = Person::register("Ivanka", None, "8508154535", None, &resolver()).unwrap();
        assert_eq!(p.nameday, Some(MonthDay::new(1, 7)));
    }

    #[test]
    fn test_register_unmatched_name_has_no_nameday() {
        let p = Person::register("Maria", None, "8508154535", None, &resolver()).unwrap();
        assert_eq!(p.nameday, None);
    }

    #[test]
    fn test_register_rejects_invalid_code() {
        let err = Person::register("Ivan", None, "8001014508", None, &resolver()).unwrap_err();
        assert!(matches!(err, NamedayError::ChecksumMismatch(_)));
    }

    #[test]
    fn test_register_rejects_blank_first_name() {
        let err = Person::register("  ", None, "8001014507", None, &resolver()).unwrap_err();
        assert!(matches!(err, NamedayError::InvalidPerson(_)));
    }

    // ── full_name ───────────────────────────────────────────────────────

    #[test]
    fn test_full_name_without_last_name() {
        let p = person("Ivan", date(1980, 1, 1), None);
        assert_eq!(p.full_name(), "Ivan");
    }

    // ── filters ─────────────────────────────────────────────────────────

    #[test]
    fn test_birthdays_on_matches_month_day_only() {
        let people = vec![
            person("Ivan", date(1980, 6, 15), None),
            person("Maria", date(1990, 6, 16), None),
        ];
        let hits = birthdays_on(&people, date(2025, 6, 15));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].first_name, "Ivan");
    }

    #[test]
    fn test_filters_skip_disabled_people() {
        let mut p = person("Ivan", date(1980, 6, 15), Some(MonthDay::new(6, 15)));
        p.notifications_enabled = false;
        let people = vec![p];
        assert!(birthdays_on(&people, date(2025, 6, 15)).is_empty());
        assert!(namedays_on(&people, date(2025, 6, 15)).is_empty());
        assert!(upcoming_celebrations(&people, date(2025, 6, 10), 30).is_empty());
    }

    #[test]
    fn test_namedays_on_requires_resolved_nameday() {
        let people = vec![
            person("Ivan", date(1980, 3, 3), Some(MonthDay::new(1, 7))),
            person("Maria", date(1990, 3, 3), None),
        ];
        let hits = namedays_on(&people, date(2025, 1, 7));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].first_name, "Ivan");
    }

    // ── upcoming_celebrations ───────────────────────────────────────────

    #[test]
    fn test_upcoming_filters_by_window() {
        let people = vec![
            person("Soon", date(1980, 6, 20), None),
            person("Later", date(1980, 8, 1), None),
        ];
        let hits = upcoming_celebrations(&people, date(2025, 6, 15), 7);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].first_name, "Soon");
    }

    #[test]
    fn test_upcoming_sorted_by_next_celebration() {
        let people = vec![
            person("Third", date(1980, 6, 25), None),
            person("First", date(1980, 6, 16), None),
            person("Second", date(1980, 7, 10), Some(MonthDay::new(6, 18))),
        ];
        let hits = upcoming_celebrations(&people, date(2025, 6, 15), 10);
        let names: Vec<&str> = hits.iter().map(|p| p.first_name.as_str()).collect();
        // "Second" qualifies and sorts by the nameday, which lands before
        // the birthday of "Third".
        assert_eq!(names, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn test_upcoming_includes_nameday_only_window_hit() {
        // Birthday outside the window, nameday inside it.
        let people = vec![person("Ivan", date(1980, 12, 1), Some(MonthDay::new(6, 18)))];
        let hits = upcoming_celebrations(&people, date(2025, 6, 15), 7);
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn test_upcoming_wraps_across_year_end() {
        let people = vec![person("Ivan", date(1980, 1, 2), None)];
        let hits = upcoming_celebrations(&people, date(2025, 12, 30), 7);
        assert_eq!(hits.len(), 1);
        assert_eq!(
            hits[0].next_celebration(date(2025, 12, 30)),
            Some(date(2026, 1, 2))
        );
    }
}
