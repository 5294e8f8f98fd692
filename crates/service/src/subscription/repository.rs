use async_trait::async_trait;
use sea_orm::{DatabaseConnection, NotSet, Set};

use super::domain::{NewSubscription, Subscription};
use crate::errors::ServiceError;

/// Persistence contract for subscription rows.
#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    /// Single-statement insert; returns the assigned `subscription_id`.
    async fn insert(&self, new: &NewSubscription) -> Result<i32, ServiceError>;
    /// Every row, ordered by `subscription_id`.
    async fn list_all(&self) -> Result<Vec<Subscription>, ServiceError>;
    async fn get_by_id(&self, id: i32) -> Result<Option<Subscription>, ServiceError>;
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmSubscriptionRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmSubscriptionRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

fn to_active_model(new: &NewSubscription) -> models::subscription::ActiveModel {
    models::subscription::ActiveModel {
        subscription_id: NotSet,
        customer_id: Set(new.customer_id),
        vehicle_id: Set(new.vehicle_id),
        term: Set(new.term),
        price_per_month: Set(new.price_per_month.to_string()),
        start_month: Set(new.start_month.clone()),
        end_month: Set(new.end_month.clone()),
        restance: Set(new.restance),
        contract_information: Set(new.contract_information.clone()),
    }
}

#[async_trait]
impl SubscriptionRepository for SeaOrmSubscriptionRepository {
    async fn insert(&self, new: &NewSubscription) -> Result<i32, ServiceError> {
        let id = models::subscription::insert(&self.db, to_active_model(new)).await?;
        Ok(id)
    }

    async fn list_all(&self) -> Result<Vec<Subscription>, ServiceError> {
        models::subscription::find_all(&self.db)
            .await?
            .into_iter()
            .map(Subscription::try_from)
            .collect()
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<Subscription>, ServiceError> {
        models::subscription::find(&self.db, id)
            .await?
            .map(Subscription::try_from)
            .transpose()
    }
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockSubscriptionRepository {
        rows: Mutex<Vec<Subscription>>,
        fail_writes: AtomicBool,
    }

    impl MockSubscriptionRepository {
        /// Make every subsequent insert fail as if the store were unavailable.
        pub fn fail_writes(&self, fail: bool) {
            self.fail_writes.store(fail, Ordering::SeqCst);
        }

        pub fn len(&self) -> usize {
            self.rows.lock().unwrap_or_else(|e| e.into_inner()).len()
        }

        pub fn is_empty(&self) -> bool { self.len() == 0 }
    }

    #[async_trait]
    impl SubscriptionRepository for MockSubscriptionRepository {
        async fn insert(&self, new: &NewSubscription) -> Result<i32, ServiceError> {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(ServiceError::Db("store unavailable".into()));
            }
            let mut rows = self.rows.lock().unwrap_or_else(|e| e.into_inner());
            let id = rows.last().map(|r| r.subscription_id + 1).unwrap_or(1);
            rows.push(Subscription::from_new(id, new.clone()));
            Ok(id)
        }

        async fn list_all(&self) -> Result<Vec<Subscription>, ServiceError> {
            Ok(self.rows.lock().unwrap_or_else(|e| e.into_inner()).clone())
        }

        async fn get_by_id(&self, id: i32) -> Result<Option<Subscription>, ServiceError> {
            let rows = self.rows.lock().unwrap_or_else(|e| e.into_inner());
            Ok(rows.iter().find(|r| r.subscription_id == id).cloned())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{memory_repo, sample};
    use rust_decimal::Decimal;
    use std::str::FromStr;

    #[tokio::test]
    async fn seaorm_round_trip_keeps_exact_price() -> Result<(), anyhow::Error> {
        let repo = memory_repo().await?;
        let mut new = sample();
        new.price_per_month = Decimal::from_str("299.99")?;

        let id = repo.insert(&new).await?;
        let found = repo.get_by_id(id).await?.expect("stored row");
        assert_eq!(found, Subscription::from_new(id, new));
        assert_eq!(found.price_per_month.to_string(), "299.99");
        Ok(())
    }

    #[tokio::test]
    async fn seaorm_list_is_empty_then_ordered() -> Result<(), anyhow::Error> {
        let repo = memory_repo().await?;
        assert!(repo.list_all().await?.is_empty());

        let a = repo.insert(&sample()).await?;
        let b = repo.insert(&sample()).await?;
        assert!(b > a);
        let ids: Vec<i32> = repo.list_all().await?.iter().map(|s| s.subscription_id).collect();
        assert_eq!(ids, vec![a, b]);
        Ok(())
    }

    #[tokio::test]
    async fn seaorm_unknown_id_is_none() -> Result<(), anyhow::Error> {
        let repo = memory_repo().await?;
        assert!(repo.get_by_id(1).await?.is_none());
        Ok(())
    }
}
