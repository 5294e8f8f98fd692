//! Subscription records: domain types, storage, reference validation and the
//! service that orchestrates them.

pub mod domain;
pub mod repository;
pub mod validator;
pub mod service;

pub use domain::{Created, NewSubscription, Subscription, REQUIRED_FIELDS};
pub use repository::{SeaOrmSubscriptionRepository, SubscriptionRepository};
pub use service::SubscriptionService;
pub use validator::{HttpReferenceValidator, ReferenceValidator};
