use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Static body served on `GET /`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ServiceDescriptor {
    pub service: String,
    pub version: String,
    pub description: String,
}

impl ServiceDescriptor {
    pub fn abonnement() -> Self {
        Self {
            service: "Abonnement".into(),
            version: "1.0.0".into(),
            description: "A RESTful API for managing abonnement".into(),
        }
    }
}
