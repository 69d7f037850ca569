//! OpenAPI documentation configuration.
//!
//! The generated spec is served by utoipa-scalar at `/docs`.

use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};

use crate::api;

/// Security scheme for the authenticated surface (Bearer token).
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.security_schemes.insert(
                "BearerAuth".to_string(),
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some(
                            "Bearer token authentication. Obtain a token from \
                             `/authentication/login` and include it in the `Authorization` header:\n\n\
                             ```\nAuthorization: Bearer YOUR_TOKEN\n```",
                        ))
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        api::handlers::auth::register,
        api::handlers::auth::login,
        api::handlers::courts::list_courts,
        api::handlers::courts::list_all_courts,
        api::handlers::courts::create_court,
        api::handlers::courts::toggle_court,
        api::handlers::equipment::list_equipment,
        api::handlers::equipment::update_equipment,
        api::handlers::coaches::list_coaches,
        api::handlers::coaches::list_all_coaches,
        api::handlers::coaches::create_coach,
        api::handlers::coaches::update_coach,
        api::handlers::coaches::toggle_coach,
        api::handlers::coaches::add_availability,
        api::handlers::coaches::list_availability,
        api::handlers::coaches::list_all_availability,
        api::handlers::pricing_rules::list_pricing_rules,
        api::handlers::pricing_rules::create_pricing_rule,
        api::handlers::pricing_rules::update_pricing_rule,
        api::handlers::bookings::create_booking,
        api::handlers::bookings::list_own_bookings,
        api::handlers::bookings::list_all_bookings,
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "authentication", description = "Registration and login"),
        (name = "courts", description = "Court catalog"),
        (name = "equipment", description = "Equipment catalog"),
        (name = "coaches", description = "Coaches and availability windows"),
        (name = "pricing-rules", description = "Live pricing configuration"),
        (name = "bookings", description = "Atomic booking creation and history"),
    ),
    info(
        title = "courtctl",
        description = "Court booking control layer: atomic reservations and rule-based pricing.",
    )
)]
pub struct ApiDoc;
