//! Command line definitions using the clap derive API

use clap::{Args, Parser, Subcommand};

use crate::domain::value_objects::{
    enums::plan_types::PlanType,
    premium_plans::{DEFAULT_PLAN_TYPE_COLUMN, DEFAULT_PLAN_TYPE_CONSTRAINT},
};

/// Maintenance commands for the `premium_plans` table
#[derive(Parser, Debug)]
#[command(name = "plans-maintenance")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Check constraint guarding `premium_plans.plan_type`
    #[arg(
        long,
        global = true,
        env = "PLAN_TYPE_CONSTRAINT",
        default_value = DEFAULT_PLAN_TYPE_CONSTRAINT
    )]
    pub constraint: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Drop and recreate the plan type check constraint
    FixConstraint(FixConstraintArgs),

    /// Insert the free tier plan unless it already exists
    SeedFreeTier,

    /// Insert and delete a throwaway row to check the constraint accepts a value
    ProbeConstraint(ProbeConstraintArgs),

    /// Print every plan and the live constraint definition
    Verify,
}

impl Commands {
    /// Component name attached to log lines.
    pub fn component(&self) -> &'static str {
        match self {
            Commands::FixConstraint(_) => "fix-constraint",
            Commands::SeedFreeTier => "seed-free-tier",
            Commands::ProbeConstraint(_) => "probe-constraint",
            Commands::Verify => "verify",
        }
    }
}

#[derive(Args, Debug)]
pub struct FixConstraintArgs {
    /// Allowed values, comma-separated (default: every known plan type)
    #[arg(long, value_delimiter = ',')]
    pub allowed: Vec<String>,

    /// Column the constraint applies to
    #[arg(long, default_value = DEFAULT_PLAN_TYPE_COLUMN)]
    pub column: String,

    /// Print the statements instead of running them
    #[arg(long)]
    pub dry_run: bool,
}

impl FixConstraintArgs {
    pub fn allowed_values(&self) -> Vec<String> {
        if self.allowed.is_empty() {
            PlanType::ALL.iter().map(|t| t.as_str().to_string()).collect()
        } else {
            self.allowed.iter().map(|v| v.trim().to_string()).collect()
        }
    }
}

#[derive(Args, Debug)]
pub struct ProbeConstraintArgs {
    /// Value written to `plan_type` for the probe row
    #[arg(long, default_value = "FREE_TIER")]
    pub plan_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fix_constraint_defaults_to_every_plan_type() {
        let cli = Cli::try_parse_from(["plans-maintenance", "fix-constraint"]).unwrap();
        let Commands::FixConstraint(args) = cli.command else {
            panic!("expected fix-constraint");
        };
        assert_eq!(
            args.allowed_values(),
            ["FREE_TIER", "PREMIUM_BASIC", "PREMIUM_PLUS", "STUDENT_PACK"]
        );
        assert_eq!(args.column, "plan_type");
        assert!(!args.dry_run);
    }

    #[test]
    fn allowed_values_are_split_on_commas() {
        let cli = Cli::try_parse_from([
            "plans-maintenance",
            "fix-constraint",
            "--allowed",
            "FREE_TIER, PREMIUM_BASIC",
            "--dry-run",
        ])
        .unwrap();
        let Commands::FixConstraint(args) = cli.command else {
            panic!("expected fix-constraint");
        };
        assert_eq!(args.allowed_values(), ["FREE_TIER", "PREMIUM_BASIC"]);
        assert!(args.dry_run);
    }

    #[test]
    fn constraint_flag_is_global() {
        let cli = Cli::try_parse_from(["plans-maintenance", "verify", "--constraint", "custom_check"])
            .unwrap();
        assert_eq!(cli.global.constraint, "custom_check");
        assert_eq!(cli.command.component(), "verify");
    }

    #[test]
    fn probe_defaults_to_free_tier() {
        let cli = Cli::try_parse_from(["plans-maintenance", "probe-constraint"]).unwrap();
        let Commands::ProbeConstraint(args) = cli.command else {
            panic!("expected probe-constraint");
        };
        assert_eq!(args.plan_type, "FREE_TIER");
    }

    #[test]
    fn unknown_subcommands_are_rejected() {
        assert!(Cli::try_parse_from(["plans-maintenance", "migrate"]).is_err());
    }
}
