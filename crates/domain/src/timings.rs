// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Statutory periods and the clock they are measured against.

use chrono::{Days, Months, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Europe::London;

use crate::error::DomainError;

/// Source of the current date and time, in UK local time.
pub trait Clock: Send + Sync {
    /// The current local date and time.
    fn now(&self) -> NaiveDateTime;

    /// The current local date.
    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// The system clock in Europe/London.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Utc::now().with_timezone(&London).naive_local()
    }
}

/// A clock stuck at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Periods used to calculate due dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaseTimings {
    /// Days from issue until a conditional order may be applied for.
    pub holding_period_days: u64,
    /// Days from issue until the acknowledgement of service is due.
    pub aos_due_offset_days: u64,
    /// Days from a disputed acknowledgement until the answer is due.
    pub disputed_due_offset_days: u64,
    /// Days applicant 2 has to respond to a joint invitation.
    pub applicant2_response_offset_days: u64,
    /// Days from conditional order pronouncement until a final order may
    /// be applied for.
    pub final_order_offset_days: u64,
    /// Months after applicant eligibility before the respondent may apply.
    pub respondent_final_order_offset_months: u32,
    /// Months from pronouncement after which a final order is overdue.
    pub final_order_overdue_months: u32,
}

impl Default for CaseTimings {
    fn default() -> Self {
        Self {
            holding_period_days: 141,
            aos_due_offset_days: 16,
            disputed_due_offset_days: 37,
            applicant2_response_offset_days: 14,
            final_order_offset_days: 43,
            respondent_final_order_offset_months: 3,
            final_order_overdue_months: 12,
        }
    }
}

fn add_days(date: NaiveDate, days: u64, operation: &str) -> Result<NaiveDate, DomainError> {
    date.checked_add_days(Days::new(days))
        .ok_or_else(|| DomainError::DateArithmeticOverflow {
            operation: operation.to_string(),
        })
}

fn add_months(date: NaiveDate, months: u32, operation: &str) -> Result<NaiveDate, DomainError> {
    date.checked_add_months(Months::new(months))
        .ok_or_else(|| DomainError::DateArithmeticOverflow {
            operation: operation.to_string(),
        })
}

impl CaseTimings {
    /// Reads the periods from the environment, falling back to the defaults.
    ///
    /// Variables: `HOLDING_PERIOD_DAYS`, `AOS_DUE_OFFSET_DAYS`,
    /// `DISPUTED_DUE_OFFSET_DAYS`, `APPLICANT2_RESPONSE_OFFSET_DAYS`,
    /// `FINAL_ORDER_OFFSET_DAYS`, `RESPONDENT_FINAL_ORDER_OFFSET_MONTHS`
    /// and `FINAL_ORDER_OVERDUE_MONTHS`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidOption` if a variable is set but is not
    /// a whole number.
    pub fn from_env() -> Result<Self, DomainError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads the periods through `lookup`, falling back to the defaults.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidOption` if a value is not a whole number.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, DomainError>
    where
        F: Fn(&str) -> Option<String>,
    {
        fn read<T: std::str::FromStr>(
            lookup: &dyn Fn(&str) -> Option<String>,
            name: &'static str,
            default: T,
        ) -> Result<T, DomainError> {
            lookup(name).map_or(Ok(default), |raw| {
                raw.trim()
                    .parse()
                    .map_err(|_| DomainError::InvalidOption { field: name, value: raw })
            })
        }

        let defaults: Self = Self::default();
        Ok(Self {
            holding_period_days: read(&lookup, "HOLDING_PERIOD_DAYS", defaults.holding_period_days)?,
            aos_due_offset_days: read(&lookup, "AOS_DUE_OFFSET_DAYS", defaults.aos_due_offset_days)?,
            disputed_due_offset_days: read(
                &lookup,
                "DISPUTED_DUE_OFFSET_DAYS",
                defaults.disputed_due_offset_days,
            )?,
            applicant2_response_offset_days: read(
                &lookup,
                "APPLICANT2_RESPONSE_OFFSET_DAYS",
                defaults.applicant2_response_offset_days,
            )?,
            final_order_offset_days: read(
                &lookup,
                "FINAL_ORDER_OFFSET_DAYS",
                defaults.final_order_offset_days,
            )?,
            respondent_final_order_offset_months: read(
                &lookup,
                "RESPONDENT_FINAL_ORDER_OFFSET_MONTHS",
                defaults.respondent_final_order_offset_months,
            )?,
            final_order_overdue_months: read(
                &lookup,
                "FINAL_ORDER_OVERDUE_MONTHS",
                defaults.final_order_overdue_months,
            )?,
        })
    }

    /// When the holding period after issue ends.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::DateArithmeticOverflow` on overflow.
    pub fn holding_due_date(&self, issue_date: NaiveDate) -> Result<NaiveDate, DomainError> {
        add_days(issue_date, self.holding_period_days, "calculating holding due date")
    }

    /// When the acknowledgement of service is due.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::DateArithmeticOverflow` on overflow.
    pub fn aos_due_date(&self, issue_date: NaiveDate) -> Result<NaiveDate, DomainError> {
        add_days(issue_date, self.aos_due_offset_days, "calculating AoS due date")
    }

    /// When the respondent's answer to a disputed application is due.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::DateArithmeticOverflow` on overflow.
    pub fn disputed_due_date(&self, aos_submitted: NaiveDate) -> Result<NaiveDate, DomainError> {
        add_days(
            aos_submitted,
            self.disputed_due_offset_days,
            "calculating disputed due date",
        )
    }

    /// When applicant 2 must respond to a joint invitation sent `today`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::DateArithmeticOverflow` on overflow.
    pub fn applicant2_due_date(&self, today: NaiveDate) -> Result<NaiveDate, DomainError> {
        add_days(
            today,
            self.applicant2_response_offset_days,
            "calculating applicant 2 due date",
        )
    }

    /// When the applicant may apply for the final order.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::DateArithmeticOverflow` on overflow.
    pub fn final_order_eligible_from(
        &self,
        co_granted: NaiveDate,
    ) -> Result<NaiveDate, DomainError> {
        add_days(
            co_granted,
            self.final_order_offset_days,
            "calculating final order eligibility",
        )
    }

    /// When the respondent may apply for the final order.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::DateArithmeticOverflow` on overflow.
    pub fn final_order_eligible_to_respondent(
        &self,
        eligible_from: NaiveDate,
    ) -> Result<NaiveDate, DomainError> {
        add_months(
            eligible_from,
            self.respondent_final_order_offset_months,
            "calculating respondent final order eligibility",
        )
    }

    /// When a final order application becomes overdue.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::DateArithmeticOverflow` on overflow.
    pub fn final_order_overdue_from(&self, co_granted: NaiveDate) -> Result<NaiveDate, DomainError> {
        add_months(
            co_granted,
            self.final_order_overdue_months,
            "calculating final order overdue date",
        )
    }
}
