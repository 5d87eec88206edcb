use std::fmt::Display;

use anyhow::Result;
use serde::Serialize;

pub const PREMIUM_PLANS_TABLE: &str = "premium_plans";
pub const DEFAULT_PLAN_TYPE_CONSTRAINT: &str = "premium_plans_plan_type_check";
pub const DEFAULT_PLAN_TYPE_COLUMN: &str = "plan_type";

/// Unique `name` of the default plan every account falls back to.
pub const FREE_TIER_PLAN_NAME: &str = "free_tier";

/// Stored in `duration_months` to mean "never expires". This is the
/// convention of the application that owns the table (Java `Integer.MAX_VALUE`),
/// not a real number of months.
pub const UNLIMITED_DURATION_SENTINEL: i32 = i32::MAX;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanDuration {
    Months(i32),
    Unlimited,
    Unspecified,
}

impl PlanDuration {
    pub fn from_column(value: Option<i32>) -> Self {
        match value {
            None => PlanDuration::Unspecified,
            Some(UNLIMITED_DURATION_SENTINEL) => PlanDuration::Unlimited,
            Some(months) => PlanDuration::Months(months),
        }
    }

    pub fn to_column(self) -> Option<i32> {
        match self {
            PlanDuration::Months(months) => Some(months),
            PlanDuration::Unlimited => Some(UNLIMITED_DURATION_SENTINEL),
            PlanDuration::Unspecified => None,
        }
    }
}

impl Display for PlanDuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlanDuration::Months(months) => write!(f, "{}", months),
            PlanDuration::Unlimited => f.write_str("unlimited"),
            PlanDuration::Unspecified => f.write_str("-"),
        }
    }
}

/// Price kept in the textual form of the `NUMERIC` column. Only the zero
/// price is ever written, so it is non-negative by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanPrice(String);

impl PlanPrice {
    pub fn zero() -> Self {
        Self("0".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for PlanPrice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Percent in `0..=100`; seeded rows carry no discount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StudentDiscount(i32);

impl StudentDiscount {
    pub fn none() -> Self {
        Self(0)
    }

    pub fn percent(&self) -> i32 {
        self.0
    }
}

/// Ordered entitlements. Stored as a JSON array in a text column.
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct PlanFeatures(pub Vec<String>);

impl PlanFeatures {
    pub fn to_column(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
