use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::errors::Reference;

/// Existence check against an external registry.
#[async_trait]
pub trait ReferenceValidator: Send + Sync {
    /// Which reference this validator gates.
    fn reference(&self) -> Reference;

    /// `true` only when the registry confirms the id. Unknown ids, error
    /// statuses and unreachable registries all answer `false`.
    async fn exists(&self, id: i64) -> bool;
}

/// Build the HTTP client shared by both registry validators.
pub fn build_client(timeout: Option<Duration>) -> reqwest::Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder();
    if let Some(t) = timeout {
        builder = builder.timeout(t);
    }
    builder.build()
}

/// Looks up `GET {base_url}/{resource}/{id}`; any 2xx means found.
#[derive(Clone)]
pub struct HttpReferenceValidator {
    client: reqwest::Client,
    base_url: String,
    resource: &'static str,
    reference: Reference,
}

impl HttpReferenceValidator {
    pub fn new(client: reqwest::Client, base_url: &str, resource: &'static str, reference: Reference) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            resource,
            reference,
        }
    }

    /// Customer registry (`/customers/{id}`).
    pub fn customers(client: reqwest::Client, base_url: &str) -> Self {
        Self::new(client, base_url, "customers", Reference::Customer)
    }

    /// Vehicle registry (`/cars/{id}`).
    pub fn vehicles(client: reqwest::Client, base_url: &str) -> Self {
        Self::new(client, base_url, "cars", Reference::Vehicle)
    }

    pub fn url_for(&self, id: i64) -> String {
        format!("{}/{}/{}", self.base_url, self.resource, id)
    }
}

#[async_trait]
impl ReferenceValidator for HttpReferenceValidator {
    fn reference(&self) -> Reference { self.reference }

    async fn exists(&self, id: i64) -> bool {
        let url = self.url_for(id);
        match self.client.get(&url).send().await {
            Ok(resp) => {
                let status = resp.status();
                debug!(reference = %self.reference, id, %status, "registry lookup");
                status.is_success()
            }
            Err(e) => {
                warn!(reference = %self.reference, id, %url, err = %e, "registry unreachable; treating reference as not found");
                false
            }
        }
    }
}

/// In-process validators for tests and local runs.
pub mod mock {
    use super::*;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Knows a fixed set of ids and counts how often it was asked.
    pub struct StaticValidator {
        reference: Reference,
        known: HashSet<i64>,
        calls: AtomicUsize,
    }

    impl StaticValidator {
        pub fn new(reference: Reference, known: impl IntoIterator<Item = i64>) -> Self {
            Self { reference, known: known.into_iter().collect(), calls: AtomicUsize::new(0) }
        }

        pub fn calls(&self) -> usize { self.calls.load(Ordering::SeqCst) }
    }

    #[async_trait]
    impl ReferenceValidator for StaticValidator {
        fn reference(&self) -> Reference { self.reference }

        async fn exists(&self, id: i64) -> bool {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.known.contains(&id)
        }
    }
}
