//! Service layer for the subscription (abonnement) records.
//! - Validates creation payloads and external references before persisting.
//! - Keeps storage and registry lookups behind traits so handlers stay thin.

pub mod errors;
pub mod auth;
pub mod subscription;
#[cfg(test)]
pub mod test_support;
