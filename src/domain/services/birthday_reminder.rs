//! Upcoming birthday reminders.
//!
//! Pure date arithmetic over caller-supplied data: given `today`, a list of
//! contact birthdays and a lookahead window, find the contacts whose next
//! birthday falls inside the window and the weekday on which to congratulate
//! them.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::Serialize;
use thiserror::Error;

/// Lookahead used when the caller does not supply one.
pub const DEFAULT_WINDOW_DAYS: i64 = 7;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BirthdayError {
    #[error("Invalid date: {month:02}-{day:02} does not exist in {year}")]
    InvalidDate { year: i32, month: u32, day: u32 },
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Birthday record supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactBirthday<I> {
    pub id: I,
    pub first_name: String,
    pub last_name: String,
    pub birthday: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reminder<I> {
    pub contact_id: I,
    pub first_name: String,
    pub last_name: String,
    #[serde(serialize_with = "serialize_congratulation_date")]
    pub congratulation_date: NaiveDate,
}

impl<I> Reminder<I> {
    /// Congratulation date as `DD.MM.YYYY`.
    pub fn formatted_date(&self) -> String {
        format_date(self.congratulation_date)
    }
}

/// A contact that could not be evaluated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderFailure<I> {
    pub contact_id: I,
    pub error: BirthdayError,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpcomingBirthdays<I> {
    pub reminders: Vec<Reminder<I>>,
    pub failures: Vec<ReminderFailure<I>>,
}

/// Compute reminders for every contact whose next birthday is at most
/// `window_days` days after `today`.
///
/// Output keeps the input order. A contact whose birthday cannot be placed in
/// the target year is reported in `failures` and does not stop the batch.
pub fn upcoming_birthdays<I: Clone>(
    today: NaiveDate,
    contacts: &[ContactBirthday<I>],
    window_days: i64,
) -> Result<UpcomingBirthdays<I>, BirthdayError> {
    if window_days < 0 {
        return Err(BirthdayError::InvalidArgument(format!(
            "window_days must be non-negative, got {}",
            window_days
        )));
    }

    let mut result = UpcomingBirthdays {
        reminders: Vec::new(),
        failures: Vec::new(),
    };

    for contact in contacts {
        match reminder_for(today, contact, window_days) {
            Ok(Some(reminder)) => result.reminders.push(reminder),
            Ok(None) => {}
            Err(error) => result.failures.push(ReminderFailure {
                contact_id: contact.id.clone(),
                error,
            }),
        }
    }

    Ok(result)
}

fn reminder_for<I: Clone>(
    today: NaiveDate,
    contact: &ContactBirthday<I>,
    window_days: i64,
) -> Result<Option<Reminder<I>>, BirthdayError> {
    let occurrence = next_occurrence(contact.birthday, today)?;

    // next_occurrence never returns a date before today, so this is the only bound.
    let days_until = (occurrence - today).num_days();
    if days_until > window_days {
        return Ok(None);
    }

    Ok(Some(Reminder {
        contact_id: contact.id.clone(),
        first_name: contact.first_name.clone(),
        last_name: contact.last_name.clone(),
        congratulation_date: adjust_for_weekend(occurrence),
    }))
}

/// First date on or after `today` with the birthday's month and day.
pub fn next_occurrence(birthday: NaiveDate, today: NaiveDate) -> Result<NaiveDate, BirthdayError> {
    let this_year = with_year(birthday, today.year())?;
    if today > this_year {
        return with_year(birthday, today.year() + 1);
    }
    Ok(this_year)
}

fn with_year(date: NaiveDate, year: i32) -> Result<NaiveDate, BirthdayError> {
    date.with_year(year).ok_or(BirthdayError::InvalidDate {
        year,
        month: date.month(),
        day: date.day(),
    })
}

/// Saturdays and Sundays move to the following Monday.
pub fn adjust_for_weekend(date: NaiveDate) -> NaiveDate {
    match date.weekday() {
        Weekday::Sat | Weekday::Sun => next_weekday(date, Weekday::Mon),
        _ => date,
    }
}

/// Next date strictly after `start` that falls on `weekday`.
pub fn next_weekday(start: NaiveDate, weekday: Weekday) -> NaiveDate {
    let target = weekday.num_days_from_monday() as i64;
    let current = start.weekday().num_days_from_monday() as i64;
    let mut days_ahead = target - current;
    if days_ahead <= 0 {
        days_ahead += 7;
    }
    start + Duration::days(days_ahead)
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}

fn serialize_congratulation_date<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&format_date(*date))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn contact(id: u32, birthday: NaiveDate) -> ContactBirthday<u32> {
        ContactBirthday {
            id,
            first_name: format!("First{}", id),
            last_name: format!("Last{}", id),
            birthday,
        }
    }

    #[test]
    fn test_window_upper_bound_is_inclusive() {
        let today = date(2024, 1, 1);
        let contacts = vec![contact(1, date(1990, 1, 8)), contact(2, date(1990, 1, 9))];

        let result = upcoming_birthdays(today, &contacts, 7).unwrap();

        assert_eq!(result.reminders.len(), 1);
        assert_eq!(result.reminders[0].contact_id, 1);
        assert!(result.failures.is_empty());
    }

    #[test]
    fn test_birthday_today_with_zero_window() {
        let today = date(2024, 6, 15);
        let contacts = vec![contact(1, date(1985, 6, 15))];

        let result = upcoming_birthdays(today, &contacts, 0).unwrap();

        assert_eq!(result.reminders.len(), 1);
        // 2024-06-15 is a Saturday
        assert_eq!(result.reminders[0].formatted_date(), "17.06.2024");
    }

    #[test]
    fn test_rollover_into_next_year() {
        let today = date(2024, 12, 30);
        let contacts = vec![contact(1, date(2000, 1, 2))];

        let included = upcoming_birthdays(today, &contacts, 3).unwrap();
        assert_eq!(included.reminders.len(), 1);
        assert_eq!(included.reminders[0].congratulation_date, date(2025, 1, 2));

        let excluded = upcoming_birthdays(today, &contacts, 2).unwrap();
        assert!(excluded.reminders.is_empty());
    }

    #[test]
    fn test_passed_birthday_is_not_included() {
        let today = date(2024, 5, 10);
        let contacts = vec![contact(1, date(1970, 5, 9))];

        let result = upcoming_birthdays(today, &contacts, 7).unwrap();

        assert!(result.reminders.is_empty());
    }

    #[test]
    fn test_saturday_birthday_moves_to_monday() {
        let today = date(2024, 3, 1);
        let contacts = vec![contact(1, date(1990, 3, 2))];

        let result = upcoming_birthdays(today, &contacts, 7).unwrap();

        assert_eq!(result.reminders.len(), 1);
        assert_eq!(result.reminders[0].formatted_date(), "04.03.2024");
    }

    #[test]
    fn test_adjust_for_weekend() {
        // Saturday and Sunday
        assert_eq!(adjust_for_weekend(date(2024, 3, 2)), date(2024, 3, 4));
        assert_eq!(adjust_for_weekend(date(2024, 3, 3)), date(2024, 3, 4));

        // Monday through Friday
        for day in 4..=8 {
            assert_eq!(adjust_for_weekend(date(2024, 3, day)), date(2024, 3, day));
        }
    }

    #[test]
    fn test_next_weekday_never_returns_start() {
        let monday = date(2024, 3, 4);
        assert_eq!(next_weekday(monday, Weekday::Mon), date(2024, 3, 11));
        assert_eq!(next_weekday(monday, Weekday::Tue), date(2024, 3, 5));
        assert_eq!(next_weekday(date(2024, 3, 2), Weekday::Mon), date(2024, 3, 4));
    }

    #[test]
    fn test_order_is_preserved() {
        let today = date(2024, 1, 1);
        let contacts = vec![
            contact(1, date(1990, 1, 5)),
            contact(2, date(1990, 2, 1)),
            contact(3, date(1990, 1, 3)),
        ];

        let result = upcoming_birthdays(today, &contacts, 7).unwrap();
        let ids: Vec<u32> = result.reminders.iter().map(|r| r.contact_id).collect();

        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_same_input_gives_same_output() {
        let today = date(2024, 1, 1);
        let contacts = vec![contact(1, date(1990, 1, 6)), contact(2, date(1991, 1, 2))];

        let first = upcoming_birthdays(today, &contacts, 7).unwrap();
        let second = upcoming_birthdays(today, &contacts, 7).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_leap_day_in_non_leap_year_is_reported() {
        let today = date(2023, 2, 25);
        let contacts = vec![contact(1, date(2000, 2, 29)), contact(2, date(1999, 2, 27))];

        let result = upcoming_birthdays(today, &contacts, 7).unwrap();

        assert_eq!(result.reminders.len(), 1);
        assert_eq!(result.reminders[0].contact_id, 2);
        assert_eq!(
            result.failures,
            vec![ReminderFailure {
                contact_id: 1,
                error: BirthdayError::InvalidDate {
                    year: 2023,
                    month: 2,
                    day: 29
                },
            }]
        );
    }

    #[test]
    fn test_leap_day_in_leap_year() {
        let today = date(2024, 2, 26);
        let contacts = vec![contact(1, date(2000, 2, 29))];

        let result = upcoming_birthdays(today, &contacts, 7).unwrap();

        // 2024-02-29 is a Thursday
        assert_eq!(result.reminders[0].formatted_date(), "29.02.2024");
    }

    #[test]
    fn test_negative_window_is_rejected() {
        let result = upcoming_birthdays::<u32>(date(2024, 1, 1), &[], -1);
        assert!(matches!(result, Err(BirthdayError::InvalidArgument(_))));
    }

    #[test]
    fn test_empty_contacts() {
        let result = upcoming_birthdays::<u32>(date(2024, 1, 1), &[], DEFAULT_WINDOW_DAYS).unwrap();
        assert!(result.reminders.is_empty());
        assert!(result.failures.is_empty());
    }

    #[test]
    fn test_reminder_serializes_date_as_day_month_year() {
        let reminder = Reminder {
            contact_id: "abc".to_string(),
            first_name: "Ann".to_string(),
            last_name: "Lee".to_string(),
            congratulation_date: date(2024, 3, 5),
        };

        let json = serde_json::to_value(&reminder).unwrap();

        assert_eq!(json["congratulation_date"], "05.03.2024");
        assert_eq!(json["contact_id"], "abc");
    }
}
