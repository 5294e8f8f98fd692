use std::sync::Arc;

use serde_json::Value;
use tracing::{info, instrument, warn};

use super::domain::{Created, NewSubscription, Subscription};
use super::repository::SubscriptionRepository;
use super::validator::ReferenceValidator;
use crate::errors::{Reference, ServiceError};

/// Application service for subscription records.
///
/// Creation checks both external references before the single insert. The
/// checks and the insert are not one transaction: a reference can disappear
/// from its registry after it was checked.
pub struct SubscriptionService {
    repo: Arc<dyn SubscriptionRepository>,
    customers: Arc<dyn ReferenceValidator>,
    vehicles: Arc<dyn ReferenceValidator>,
}

impl SubscriptionService {
    pub fn new(
        repo: Arc<dyn SubscriptionRepository>,
        customers: Arc<dyn ReferenceValidator>,
        vehicles: Arc<dyn ReferenceValidator>,
    ) -> Self {
        Self { repo, customers, vehicles }
    }

    /// Validate, check references, insert.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::errors::Reference;
    /// use service::subscription::{repository::mock::MockSubscriptionRepository, validator::mock::StaticValidator, SubscriptionService};
    /// let svc = SubscriptionService::new(
    ///     Arc::new(MockSubscriptionRepository::default()),
    ///     Arc::new(StaticValidator::new(Reference::Customer, [1])),
    ///     Arc::new(StaticValidator::new(Reference::Vehicle, [2])),
    /// );
    /// let payload = serde_json::json!({
    ///     "customer_id": 1, "vehicle_id": 2, "term": 12, "price_per_month": 99.5,
    ///     "start_month": "2024-01", "end_month": "2024-12", "restance": false,
    ///     "contract_information": "basic"
    /// });
    /// let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
    /// let created = rt.block_on(svc.create(&payload)).unwrap();
    /// assert_eq!(created.subscription_id, 1);
    /// ```
    #[instrument(skip(self, payload))]
    pub async fn create(&self, payload: &Value) -> Result<Created, ServiceError> {
        let new = NewSubscription::from_payload(payload)?;

        if !self.customers.exists(new.customer_id).await {
            warn!(customer_id = new.customer_id, "customer reference not found");
            return Err(ServiceError::ReferenceNotFound(Reference::Customer));
        }
        if !self.vehicles.exists(new.vehicle_id).await {
            warn!(vehicle_id = new.vehicle_id, "vehicle reference not found");
            return Err(ServiceError::ReferenceNotFound(Reference::Vehicle));
        }

        let id = self.repo.insert(&new).await?;
        info!(subscription_id = id, customer_id = new.customer_id, vehicle_id = new.vehicle_id, "subscription_created");
        Ok(Created::new(id))
    }

    #[instrument(skip(self))]
    pub async fn list_all(&self) -> Result<Vec<Subscription>, ServiceError> {
        self.repo.list_all().await
    }

    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: i32) -> Result<Subscription, ServiceError> {
        self.repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("subscription"))
    }
}
