//! Temporal and relational integrity rules shared by every entity.
//!
//! Each entity exposes a single `check` that creates and saves both go
//! through, so the rules below are the only place the invariants live.

use chrono::{DateTime, NaiveDate, Utc};
use thiserror::Error;

pub const MESSAGE_FUTURE_TIMESTAMP: &str = "Date and time is bigger than current!";
pub const MESSAGE_CREATED_MODIFIED_INCORRECT_ORDER: &str = "The time and date of the modified field must not be later than the time and date of the created field";
pub const MESSAGE_COMPETITION_DATES_INCORRECT_ORDER: &str =
    "End date must not be set before the start date";
pub const MESSAGE_STAGE_BEFORE_START: &str = "Stage's date is before start date of competition!";
pub const MESSAGE_STAGE_AFTER_END: &str = "Stage's date is after end date of competition!";
pub const MESSAGE_STAGE_WITHOUT_COMPETITION: &str =
    "Stage's competition_sport has no competition associated.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{}", MESSAGE_FUTURE_TIMESTAMP)]
    FutureTimestamp {
        field: &'static str,
        value: DateTime<Utc>,
    },

    #[error("{0}")]
    DatesOrder(&'static str),

    #[error("{}", MESSAGE_STAGE_WITHOUT_COMPETITION)]
    MissingCompetition,
}

pub type RuleResult = std::result::Result<(), ValidationError>;

fn check_not_future(field: &'static str, value: DateTime<Utc>) -> RuleResult {
    if value > Utc::now() {
        return Err(ValidationError::FutureTimestamp { field, value });
    }
    Ok(())
}

pub fn check_created(value: DateTime<Utc>) -> RuleResult {
    check_not_future("created", value)
}

pub fn check_modified(value: DateTime<Utc>) -> RuleResult {
    check_not_future("modified", value)
}

/// Fails with `message` when both values are set and `second` precedes `first`.
pub fn check_dates_order<T: PartialOrd>(
    first: Option<T>,
    second: Option<T>,
    message: &'static str,
) -> RuleResult {
    match (first, second) {
        (Some(first), Some(second)) if second < first => Err(ValidationError::DatesOrder(message)),
        _ => Ok(()),
    }
}

/// Entities carrying a creation and (optionally) a modification timestamp.
pub trait Timestamps {
    fn created(&self) -> DateTime<Utc>;

    fn modified(&self) -> Option<DateTime<Utc>> {
        None
    }
}

/// Runs the timestamp checks common to every entity.
pub fn check_timestamps<T: Timestamps + ?Sized>(entity: &T) -> RuleResult {
    let created = entity.created();
    check_created(created)?;

    if let Some(modified) = entity.modified() {
        check_modified(modified)?;
        check_dates_order(
            Some(created),
            Some(modified),
            MESSAGE_CREATED_MODIFIED_INCORRECT_ORDER,
        )?;
    }

    Ok(())
}

/// Date range of the competition a stage belongs to.
///
/// Either side may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompetitionBounds {
    pub date_of_start: Option<NaiveDate>,
    pub date_of_end: Option<NaiveDate>,
}

impl CompetitionBounds {
    pub fn new(date_of_start: Option<NaiveDate>, date_of_end: Option<NaiveDate>) -> Self {
        Self {
            date_of_start,
            date_of_end,
        }
    }
}

/// Checks a stage date against the containing competition.
///
/// `bounds` is `None` when the stage's competition_sport resolves to no
/// competition. The start bound is checked before the end bound.
pub fn check_stage_date(date: Option<NaiveDate>, bounds: Option<CompetitionBounds>) -> RuleResult {
    let Some(date) = date else {
        return Ok(());
    };
    let bounds = bounds.ok_or(ValidationError::MissingCompetition)?;

    check_dates_order(bounds.date_of_start, Some(date), MESSAGE_STAGE_BEFORE_START)?;
    check_dates_order(Some(date), bounds.date_of_end, MESSAGE_STAGE_AFTER_END)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    struct Stamped {
        created: DateTime<Utc>,
        modified: Option<DateTime<Utc>>,
    }

    impl Timestamps for Stamped {
        fn created(&self) -> DateTime<Utc> {
            self.created
        }

        fn modified(&self) -> Option<DateTime<Utc>> {
            self.modified
        }
    }

    #[test]
    fn future_created_is_rejected() {
        let tomorrow = Utc::now() + Duration::days(1);
        let err = check_created(tomorrow).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::FutureTimestamp { field: "created", .. }
        ));
        assert_eq!(err.to_string(), MESSAGE_FUTURE_TIMESTAMP);
    }

    #[test]
    fn past_timestamps_pass() {
        let yesterday = Utc::now() - Duration::days(1);
        assert!(check_created(yesterday).is_ok());
        assert!(check_modified(yesterday).is_ok());
    }

    #[test]
    fn future_modified_is_rejected() {
        let err = check_modified(Utc::now() + Duration::hours(1)).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::FutureTimestamp { field: "modified", .. }
        ));
    }

    #[test]
    fn dates_order_carries_message() {
        let err = check_dates_order(Some(day(2024, 1, 2)), Some(day(2024, 1, 1)), "boom")
            .unwrap_err();
        assert_eq!(err, ValidationError::DatesOrder("boom"));
        assert_eq!(err.to_string(), "boom");
    }

    #[test]
    fn dates_order_accepts_equal_and_missing_values() {
        assert!(check_dates_order(Some(day(2024, 1, 1)), Some(day(2024, 1, 1)), "x").is_ok());
        assert!(check_dates_order(None, Some(day(2024, 1, 1)), "x").is_ok());
        assert!(check_dates_order(Some(day(2024, 1, 1)), None, "x").is_ok());
        assert!(check_dates_order::<NaiveDate>(None, None, "x").is_ok());
    }

    #[test]
    fn modified_before_created_is_rejected() {
        let now = Utc::now();
        let entity = Stamped {
            created: now - Duration::hours(1),
            modified: Some(now - Duration::days(1)),
        };
        assert_eq!(
            check_timestamps(&entity),
            Err(ValidationError::DatesOrder(
                MESSAGE_CREATED_MODIFIED_INCORRECT_ORDER
            ))
        );
    }

    #[test]
    fn created_only_entities_skip_ordering() {
        let entity = Stamped {
            created: Utc::now() - Duration::minutes(5),
            modified: None,
        };
        assert!(check_timestamps(&entity).is_ok());
    }

    #[test]
    fn stage_date_inside_bounds_passes() {
        let bounds = CompetitionBounds::new(Some(day(2024, 5, 1)), Some(day(2024, 5, 10)));
        assert!(check_stage_date(Some(day(2024, 5, 1)), Some(bounds)).is_ok());
        assert!(check_stage_date(Some(day(2024, 5, 10)), Some(bounds)).is_ok());
    }

    #[test]
    fn stage_date_outside_bounds_names_the_side() {
        let bounds = CompetitionBounds::new(Some(day(2024, 5, 1)), Some(day(2024, 5, 10)));
        assert_eq!(
            check_stage_date(Some(day(2024, 4, 30)), Some(bounds)),
            Err(ValidationError::DatesOrder(MESSAGE_STAGE_BEFORE_START))
        );
        assert_eq!(
            check_stage_date(Some(day(2024, 5, 11)), Some(bounds)),
            Err(ValidationError::DatesOrder(MESSAGE_STAGE_AFTER_END))
        );
    }

    #[test]
    fn open_bounds_skip_their_side() {
        let no_end = CompetitionBounds::new(Some(day(2024, 5, 1)), None);
        assert!(check_stage_date(Some(day(2030, 1, 1)), Some(no_end)).is_ok());

        let no_start = CompetitionBounds::new(None, Some(day(2024, 5, 10)));
        assert!(check_stage_date(Some(day(1990, 1, 1)), Some(no_start)).is_ok());
    }

    #[test]
    fn inverted_bounds_report_start_first() {
        let bounds = CompetitionBounds::new(Some(day(2024, 5, 10)), Some(day(2024, 5, 1)));
        assert_eq!(
            check_stage_date(Some(day(2024, 5, 5)), Some(bounds)),
            Err(ValidationError::DatesOrder(MESSAGE_STAGE_BEFORE_START))
        );
    }

    #[test]
    fn stage_without_competition_is_rejected() {
        assert_eq!(
            check_stage_date(Some(day(2024, 5, 5)), None),
            Err(ValidationError::MissingCompetition)
        );
        assert!(check_stage_date(None, None).is_ok());
    }
}
