pub mod constraint_probe;
pub mod constraint_repair;
pub mod seed_insert;
pub mod state_report;
