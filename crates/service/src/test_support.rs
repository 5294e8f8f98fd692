#![cfg(test)]
use serde_json::{json, Value};

use crate::subscription::{NewSubscription, SeaOrmSubscriptionRepository};

/// Repository over a fresh in-memory SQLite store with the table in place.
pub async fn memory_repo() -> Result<SeaOrmSubscriptionRepository, anyhow::Error> {
    let db = models::db::connect_in_memory().await?;
    Ok(SeaOrmSubscriptionRepository::new(db))
}

pub fn payload() -> Value {
    json!({
        "customer_id": 42,
        "vehicle_id": 7,
        "term": 12,
        "price_per_month": 299.99,
        "start_month": "2024-01",
        "end_month": "2024-12",
        "restance": false,
        "contract_information": "Full service incl. tyres"
    })
}

pub fn sample() -> NewSubscription {
    NewSubscription::from_payload(&payload()).expect("sample payload is valid")
}
