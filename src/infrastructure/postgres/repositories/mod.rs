pub mod check_constraints;
pub mod premium_plans;
