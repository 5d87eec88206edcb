use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Bool, Integer, Nullable, Text};

use crate::domain::value_objects::{
    enums::plan_types::PlanType,
    premium_plans::{
        FREE_TIER_PLAN_NAME, PlanDuration, PlanFeatures, PlanPrice, StudentDiscount,
    },
};

/// The columns shown by the verification report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PremiumPlanSummary {
    pub id: i64,
    pub name: String,
    pub plan_type: String,
    pub price: String,
    pub duration: PlanDuration,
    pub is_active: bool,
}

impl PremiumPlanSummary {
    /// `None` when the stored value is outside the known set.
    pub fn known_plan_type(&self) -> Option<PlanType> {
        PlanType::from_str(&self.plan_type)
    }
}

/// Raw row for the report query. `price` is cast to text in SQL so the
/// `NUMERIC` value survives unchanged.
#[derive(Debug, Clone, QueryableByName)]
pub struct PremiumPlanSummaryRow {
    #[diesel(sql_type = BigInt)]
    pub id: i64,
    #[diesel(sql_type = Text)]
    pub name: String,
    #[diesel(sql_type = Text)]
    pub plan_type: String,
    #[diesel(sql_type = Text)]
    pub price: String,
    #[diesel(sql_type = Nullable<Integer>)]
    pub duration_months: Option<i32>,
    #[diesel(sql_type = Bool)]
    pub is_active: bool,
}

impl From<PremiumPlanSummaryRow> for PremiumPlanSummary {
    fn from(value: PremiumPlanSummaryRow) -> Self {
        Self {
            id: value.id,
            name: value.name,
            plan_type: value.plan_type,
            price: value.price,
            duration: PlanDuration::from_column(value.duration_months),
            is_active: value.is_active,
        }
    }
}

#[derive(Debug, Clone, QueryableByName)]
pub struct InsertedPlanId {
    #[diesel(sql_type = BigInt)]
    pub id: i64,
}

/// A complete row ready to be written to `premium_plans`.
///
/// `plan_type` is kept as a raw string so probe rows can carry values the
/// live constraint is expected to reject.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPremiumPlan {
    pub name: String,
    pub display_name: String,
    pub description: String,
    pub duration: PlanDuration,
    pub price: PlanPrice,
    pub currency: String,
    pub plan_type: String,
    pub student_discount: StudentDiscount,
    pub features: PlanFeatures,
    pub is_active: bool,
    pub max_subscribers: Option<i32>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl NewPremiumPlan {
    pub fn free_tier(now: NaiveDateTime) -> Self {
        Self {
            name: FREE_TIER_PLAN_NAME.to_string(),
            display_name: "Free Tier".to_string(),
            description: "Default free plan with basic access".to_string(),
            duration: PlanDuration::Unlimited,
            price: PlanPrice::zero(),
            currency: "VND".to_string(),
            plan_type: PlanType::FreeTier.as_str().to_string(),
            student_discount: StudentDiscount::none(),
            features: PlanFeatures(vec![
                "Basic access".to_string(),
                "Community participation".to_string(),
            ]),
            is_active: true,
            max_subscribers: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn probe(plan_type: &str, now: NaiveDateTime) -> Self {
        let name = format!(
            "probe_{}_{}",
            plan_type.to_ascii_lowercase(),
            now.and_utc().timestamp_millis()
        );

        Self {
            name,
            display_name: format!("Probe {plan_type}"),
            description: "Transient row written by probe-constraint".to_string(),
            duration: PlanDuration::Months(999),
            price: PlanPrice::zero(),
            currency: "VND".to_string(),
            plan_type: plan_type.to_string(),
            student_discount: StudentDiscount::none(),
            features: PlanFeatures(vec!["probe".to_string()]),
            is_active: true,
            max_subscribers: None,
            created_at: now,
            updated_at: now,
        }
    }
}
