use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, ToSchema};

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct ServiceDescriptorDoc { pub service: String, pub version: String, pub description: String }

/// `kunde_id` and `car_id` are accepted in place of `customer_id` and `vehicle_id`.
#[derive(ToSchema)]
pub struct CreateSubscriptionDoc {
    pub customer_id: i64,
    pub vehicle_id: i64,
    pub term: i32,
    #[schema(example = 299.99)]
    pub price_per_month: f64,
    pub start_month: String,
    pub end_month: String,
    pub restance: bool,
    pub contract_information: String,
}

#[derive(ToSchema)]
pub struct SubscriptionDoc {
    pub subscription_id: i32,
    pub customer_id: i64,
    pub vehicle_id: i64,
    pub term: i32,
    pub price_per_month: f64,
    pub start_month: String,
    pub end_month: String,
    pub restance: bool,
    pub contract_information: String,
}

#[derive(ToSchema)]
pub struct CreatedDoc { pub message: String, pub subscription_id: i32 }

#[derive(ToSchema)]
pub struct ErrorDoc { pub error: String, pub message: String }

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).bearer_format("JWT").build()),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::index,
        crate::routes::health,
        crate::routes::subscriptions::create_subscription,
        crate::routes::subscriptions::list_subscriptions,
        crate::routes::subscriptions::get_subscription,
    ),
    components(
        schemas(
            HealthResponse,
            ServiceDescriptorDoc,
            CreateSubscriptionDoc,
            SubscriptionDoc,
            CreatedDoc,
            ErrorDoc,
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "health"),
        (name = "abonnement")
    )
)]
pub struct ApiDoc;
