use anyhow::Result;
use chrono::Local;
use std::sync::Arc;
use tracing::info;

use crate::{
    application::usecases::{
        constraint_probe::ConstraintProbe, constraint_repair::ConstraintRepair,
        seed_insert::{SeedInsert, SeedOutcome}, state_report::StateReporter,
    },
    cli::{Cli, Commands, FixConstraintArgs, GlobalArgs, ProbeConstraintArgs},
    config::config_loader,
    domain::{
        entities::premium_plans::NewPremiumPlan,
        value_objects::{check_constraints::EnumCheckConstraint, premium_plans::PREMIUM_PLANS_TABLE},
    },
    infrastructure::postgres::{
        postgres_connection::{self, MaintenancePool},
        repositories::{check_constraints::CheckConstraintPostgres, premium_plans::PremiumPlanPostgres},
    },
};

pub async fn execute(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::FixConstraint(args) => fix_constraint(args, &cli.global).await,
        Commands::SeedFreeTier => seed_free_tier().await,
        Commands::ProbeConstraint(args) => probe_constraint(args).await,
        Commands::Verify => verify(&cli.global).await,
    }
}

/// Loads the environment and opens the command's single connection. The
/// connection closes when the returned pool is dropped.
fn connect() -> Result<Arc<MaintenancePool>> {
    let dotenvy_env = config_loader::load()?;
    info!("ENV has been loaded");

    println!("🔌 Connecting to database...");
    let postgres_pool = postgres_connection::open_maintenance_pool(&dotenvy_env.database.url)?;
    info!("Postgres connection has been established");

    Ok(Arc::new(postgres_pool))
}

async fn fix_constraint(args: &FixConstraintArgs, global: &GlobalArgs) -> Result<()> {
    let constraint = EnumCheckConstraint::new(
        PREMIUM_PLANS_TABLE,
        &global.constraint,
        &args.column,
        args.allowed_values(),
    )?;

    if args.dry_run {
        println!("{};", constraint.drop_sql());
        println!("{};", constraint.add_sql());
        return Ok(());
    }

    let postgres_pool = connect()?;
    let constraint_repair = ConstraintRepair::new(Arc::new(CheckConstraintPostgres::new(postgres_pool)));

    println!("🔧 Executing SQL fix...");
    let outcome = constraint_repair.repair(&constraint).await?;
    println!("✅ Constraint fixed successfully!");

    match outcome.check_clause {
        Some(clause) => {
            println!("✅ Verified constraint: {}", outcome.constraint_name);
            println!("   Check clause: {clause}");
        }
        None => println!("⚠️ Could not verify constraint"),
    }

    println!("\n🎉 Done! You can now restart your application.");
    Ok(())
}

async fn seed_free_tier() -> Result<()> {
    let postgres_pool = connect()?;
    let seed_insert = SeedInsert::new(Arc::new(PremiumPlanPostgres::new(postgres_pool)));

    let plan = NewPremiumPlan::free_tier(Local::now().naive_local());
    let summary = plan.clone();

    match seed_insert.seed(plan).await? {
        SeedOutcome::Existing(id) => {
            println!("✅ FREE_TIER plan already exists with ID: {id}");
        }
        SeedOutcome::Created(id) => {
            println!("✅ Successfully created FREE_TIER plan with ID: {id}");
            println!("   - Name: {}", summary.name);
            println!("   - Display Name: {}", summary.display_name);
            println!("   - Type: {}", summary.plan_type);
            println!("   - Price: {} {}", summary.price, summary.currency);
            println!("   - Duration: Permanent ({})", summary.duration);
            println!("\n🎉 Done! FREE_TIER plan is now available.");
        }
    }

    Ok(())
}

async fn probe_constraint(args: &ProbeConstraintArgs) -> Result<()> {
    let postgres_pool = connect()?;
    let constraint_probe = ConstraintProbe::new(Arc::new(PremiumPlanPostgres::new(postgres_pool)));

    let outcome = constraint_probe
        .probe(&args.plan_type, Local::now().naive_local())
        .await?;

    println!(
        "✅ Successfully inserted {} plan with ID: {}",
        outcome.plan_type, outcome.probe_id
    );
    println!("🧹 Cleaned up test data");

    if !outcome.left_no_residue() {
        println!(
            "⚠️  Row count changed from {} to {} while probing; another writer is active",
            outcome.rows_before, outcome.rows_after
        );
    }

    println!(
        "\n🎉 Test passed! {} constraint is working correctly.",
        outcome.plan_type
    );
    Ok(())
}

async fn verify(global: &GlobalArgs) -> Result<()> {
    let postgres_pool = connect()?;
    let state_reporter = StateReporter::new(
        Arc::new(PremiumPlanPostgres::new(Arc::clone(&postgres_pool))),
        Arc::new(CheckConstraintPostgres::new(postgres_pool)),
    );

    let report = state_reporter.build(&global.constraint).await?;
    print!("{report}");

    println!("\n🎉 Verification complete!");
    Ok(())
}
