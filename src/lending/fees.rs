//! Late-fee arithmetic. Pure functions of a due date and an "as of" instant.

use crate::config::LendingPolicy;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FeeStatus {
    OnTime,
    Late,
}

impl Display for FeeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeeStatus::OnTime => f.write_str("on-time"),
            FeeStatus::Late => f.write_str("late"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeeAssessment {
    pub fee_amount: f64,
    pub days_overdue: u32,
    pub status: FeeStatus,
}

impl FeeAssessment {
    /// Nothing owed.
    pub const NONE: FeeAssessment = FeeAssessment {
        fee_amount: 0.0,
        days_overdue: 0,
        status: FeeStatus::OnTime,
    };
}

/// Per-day rate with a per-book cap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeeSchedule {
    pub daily_rate: f64,
    pub cap: f64,
}

impl FeeSchedule {
    /// 0.50 per day, at most 15.00 per book.
    pub const STANDARD: FeeSchedule = FeeSchedule {
        daily_rate: 0.50,
        cap: 15.00,
    };

    pub fn from_policy(policy: &LendingPolicy) -> Self {
        Self {
            daily_rate: policy.daily_late_fee,
            cap: policy.max_late_fee,
        }
    }

    /// Whole calendar days from `due` to `as_of`, never negative.
    pub fn days_overdue(due: DateTime<Utc>, as_of: DateTime<Utc>) -> u32 {
        let days = (as_of.date_naive() - due.date_naive()).num_days().max(0);
        u32::try_from(days).unwrap_or(u32::MAX)
    }

    pub fn fee_for(&self, due: DateTime<Utc>, as_of: DateTime<Utc>) -> FeeAssessment {
        let days_overdue = Self::days_overdue(due, as_of);
        if days_overdue == 0 {
            return FeeAssessment::NONE;
        }
        FeeAssessment {
            fee_amount: (self.daily_rate * f64::from(days_overdue)).min(self.cap),
            days_overdue,
            status: FeeStatus::Late,
        }
    }

    /// Like [`FeeSchedule::fee_for`], treating a missing due date (no active
    /// loan) as nothing owed.
    pub fn assess(&self, due: Option<DateTime<Utc>>, as_of: DateTime<Utc>) -> FeeAssessment {
        due.map_or(FeeAssessment::NONE, |due| self.fee_for(due, as_of))
    }
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Fee under the standard schedule.
pub fn fee_for(due: DateTime<Utc>, as_of: DateTime<Utc>) -> FeeAssessment {
    FeeSchedule::STANDARD.fee_for(due, as_of)
}
