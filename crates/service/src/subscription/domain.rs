use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::ServiceError;

/// Fields every creation payload must carry, in the order they are checked.
pub const REQUIRED_FIELDS: [&str; 8] = [
    "customer_id",
    "vehicle_id",
    "term",
    "price_per_month",
    "start_month",
    "end_month",
    "restance",
    "contract_information",
];

/// Older clients send the Danish names for the two references.
const FIELD_ALIASES: [(&str, &str); 2] = [("customer_id", "kunde_id"), ("vehicle_id", "car_id")];

/// Validated creation input (everything but the identity).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSubscription {
    pub customer_id: i64,
    pub vehicle_id: i64,
    pub term: i32,
    #[serde(with = "rust_decimal::serde::float")]
    pub price_per_month: Decimal,
    pub start_month: String,
    pub end_month: String,
    pub restance: bool,
    pub contract_information: String,
}

/// A stored subscription.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    pub subscription_id: i32,
    pub customer_id: i64,
    pub vehicle_id: i64,
    pub term: i32,
    #[serde(with = "rust_decimal::serde::float")]
    pub price_per_month: Decimal,
    pub start_month: String,
    pub end_month: String,
    pub restance: bool,
    pub contract_information: String,
}

/// Result of a successful create.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Created {
    pub message: String,
    pub subscription_id: i32,
}

impl Created {
    pub fn new(subscription_id: i32) -> Self {
        Self { message: "subscription created".into(), subscription_id }
    }
}

impl Subscription {
    pub fn from_new(subscription_id: i32, new: NewSubscription) -> Self {
        Self {
            subscription_id,
            customer_id: new.customer_id,
            vehicle_id: new.vehicle_id,
            term: new.term,
            price_per_month: new.price_per_month,
            start_month: new.start_month,
            end_month: new.end_month,
            restance: new.restance,
            contract_information: new.contract_information,
        }
    }
}

fn lookup<'a>(obj: &'a Map<String, Value>, field: &str) -> Option<&'a Value> {
    obj.get(field).or_else(|| {
        FIELD_ALIASES
            .iter()
            .find(|(canonical, _)| *canonical == field)
            .and_then(|(_, alias)| obj.get(*alias))
    })
}

fn typed<T: DeserializeOwned>(obj: &Map<String, Value>, field: &'static str) -> Result<T, ServiceError> {
    let v = lookup(obj, field).ok_or(ServiceError::MissingField(field))?;
    serde_json::from_value(v.clone())
        .map_err(|e| ServiceError::Validation(format!("field '{field}': {e}")))
}

/// Arrears flag: booleans, or the integers 0 and 1.
fn flag(obj: &Map<String, Value>, field: &'static str) -> Result<bool, ServiceError> {
    match lookup(obj, field) {
        None => Err(ServiceError::MissingField(field)),
        Some(Value::Bool(b)) => Ok(*b),
        Some(Value::Number(n)) if n.as_i64() == Some(0) => Ok(false),
        Some(Value::Number(n)) if n.as_i64() == Some(1) => Ok(true),
        Some(other) => Err(ServiceError::Validation(format!(
            "field '{field}': expected a boolean or 0/1, got {other}"
        ))),
    }
}

impl NewSubscription {
    /// Presence is checked for every field before any type is, so the first
    /// missing field is always the one reported.
    pub fn from_payload(payload: &Value) -> Result<Self, ServiceError> {
        let obj = payload
            .as_object()
            .ok_or_else(|| ServiceError::Validation("request body must be a JSON object".into()))?;

        if let Some(missing) = REQUIRED_FIELDS.iter().copied().find(|f| lookup(obj, f).is_none()) {
            return Err(ServiceError::MissingField(missing));
        }

        Ok(Self {
            customer_id: typed(obj, "customer_id")?,
            vehicle_id: typed(obj, "vehicle_id")?,
            term: typed(obj, "term")?,
            price_per_month: typed(obj, "price_per_month")?,
            start_month: typed(obj, "start_month")?,
            end_month: typed(obj, "end_month")?,
            restance: flag(obj, "restance")?,
            contract_information: typed(obj, "contract_information")?,
        })
    }
}

impl TryFrom<models::subscription::Model> for Subscription {
    type Error = ServiceError;

    fn try_from(m: models::subscription::Model) -> Result<Self, Self::Error> {
        let price_per_month = m.price_per_month.parse::<Decimal>().map_err(|e| {
            ServiceError::Db(format!(
                "stored price_per_month '{}' of subscription {} is not a decimal: {e}",
                m.price_per_month, m.subscription_id
            ))
        })?;
        Ok(Self {
            subscription_id: m.subscription_id,
            customer_id: m.customer_id,
            vehicle_id: m.vehicle_id,
            term: m.term,
            price_per_month,
            start_month: m.start_month,
            end_month: m.end_month,
            restance: m.restance,
            contract_information: m.contract_information,
        })
    }
}
