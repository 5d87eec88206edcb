pub mod check_constraints;
pub mod enums;
pub mod premium_plans;
