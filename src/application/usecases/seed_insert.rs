use anyhow::{Result, bail};
use std::sync::Arc;
use tracing::{debug, info};

use crate::domain::{
    entities::premium_plans::NewPremiumPlan,
    repositories::premium_plans::PremiumPlanRepository,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    Created(i64),
    Existing(i64),
}

impl SeedOutcome {
    pub fn plan_id(&self) -> i64 {
        match self {
            SeedOutcome::Created(id) | SeedOutcome::Existing(id) => *id,
        }
    }
}

/// Ensures exactly one row exists for a plan's unique name.
pub struct SeedInsert<P>
where
    P: PremiumPlanRepository + Send + Sync + 'static,
{
    plan_repo: Arc<P>,
}

impl<P> SeedInsert<P>
where
    P: PremiumPlanRepository + Send + Sync + 'static,
{
    pub fn new(plan_repo: Arc<P>) -> Self {
        Self { plan_repo }
    }

    pub async fn seed(&self, plan: NewPremiumPlan) -> Result<SeedOutcome> {
        let name = plan.name.clone();

        if let Some(id) = self.plan_repo.find_id_by_name(&name).await? {
            debug!(%name, id, "seed_insert: plan already present");
            return Ok(SeedOutcome::Existing(id));
        }

        if let Some(id) = self.plan_repo.insert_unless_name_taken(plan).await? {
            info!(%name, id, "seed_insert: plan created");
            return Ok(SeedOutcome::Created(id));
        }

        // Another session inserted the same name between our lookup and insert.
        match self.plan_repo.find_id_by_name(&name).await? {
            Some(id) => {
                info!(%name, id, "seed_insert: plan created concurrently by another session");
                Ok(SeedOutcome::Existing(id))
            }
            None => bail!("Plan {name} conflicted on insert but cannot be found"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::premium_plans::MockPremiumPlanRepository;
    use chrono::NaiveDate;
    use mockall::Sequence;
    use mockall::predicate::eq;
    use std::sync::Mutex;

    fn free_tier() -> NewPremiumPlan {
        let now = NaiveDate::from_ymd_opt(2025, 3, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        NewPremiumPlan::free_tier(now)
    }

    #[tokio::test]
    async fn existing_plan_is_left_alone() {
        let mut repo = MockPremiumPlanRepository::new();

        repo.expect_find_id_by_name()
            .with(eq("free_tier"))
            .returning(|_| Box::pin(async { Ok(Some(5)) }));
        repo.expect_insert_unless_name_taken().never();

        let outcome = SeedInsert::new(Arc::new(repo)).seed(free_tier()).await.unwrap();

        assert_eq!(outcome, SeedOutcome::Existing(5));
    }

    #[tokio::test]
    async fn absent_plan_is_inserted() {
        let mut repo = MockPremiumPlanRepository::new();

        repo.expect_find_id_by_name()
            .returning(|_| Box::pin(async { Ok(None) }));
        repo.expect_insert_unless_name_taken()
            .withf(|plan| plan.name == "free_tier" && plan.plan_type == "FREE_TIER")
            .times(1)
            .returning(|_| Box::pin(async { Ok(Some(12)) }));

        let outcome = SeedInsert::new(Arc::new(repo)).seed(free_tier()).await.unwrap();

        assert_eq!(outcome, SeedOutcome::Created(12));
    }

    #[tokio::test]
    async fn running_twice_returns_the_same_id() {
        let stored: Arc<Mutex<Option<i64>>> = Arc::new(Mutex::new(None));
        let mut repo = MockPremiumPlanRepository::new();

        let lookup = Arc::clone(&stored);
        repo.expect_find_id_by_name().returning(move |_| {
            let id = *lookup.lock().unwrap();
            Box::pin(async move { Ok(id) })
        });

        let insert = Arc::clone(&stored);
        repo.expect_insert_unless_name_taken()
            .times(1)
            .returning(move |_| {
                *insert.lock().unwrap() = Some(41);
                Box::pin(async { Ok(Some(41)) })
            });

        let seeder = SeedInsert::new(Arc::new(repo));
        let first = seeder.seed(free_tier()).await.unwrap();
        let second = seeder.seed(free_tier()).await.unwrap();

        assert_eq!(first, SeedOutcome::Created(41));
        assert_eq!(second, SeedOutcome::Existing(41));
        assert_eq!(first.plan_id(), second.plan_id());
    }

    #[tokio::test]
    async fn unique_conflict_is_treated_as_existing() {
        let mut seq = Sequence::new();
        let mut repo = MockPremiumPlanRepository::new();

        repo.expect_find_id_by_name()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Box::pin(async { Ok(None) }));
        repo.expect_insert_unless_name_taken()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Box::pin(async { Ok(None) }));
        repo.expect_find_id_by_name()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Box::pin(async { Ok(Some(8)) }));

        let outcome = SeedInsert::new(Arc::new(repo)).seed(free_tier()).await.unwrap();

        assert_eq!(outcome, SeedOutcome::Existing(8));
    }

    #[tokio::test]
    async fn conflict_without_a_row_is_an_error() {
        let mut repo = MockPremiumPlanRepository::new();

        repo.expect_find_id_by_name()
            .times(2)
            .returning(|_| Box::pin(async { Ok(None) }));
        repo.expect_insert_unless_name_taken()
            .returning(|_| Box::pin(async { Ok(None) }));

        let err = SeedInsert::new(Arc::new(repo))
            .seed(free_tier())
            .await
            .unwrap_err();

        assert!(err.to_string().contains("cannot be found"));
    }
}
