use utoipa::OpenApi;

use crate::features::{activities, health, personal_records, sessions, transitions};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        sessions::handlers::list_sessions,
        sessions::handlers::get_session,
        sessions::handlers::create_session,
        sessions::handlers::update_session,
        sessions::handlers::delete_session,
        activities::handlers::list_session_activities,
        activities::handlers::create_activity,
        activities::handlers::get_activity,
        activities::handlers::update_activity,
        activities::handlers::delete_activity,
        transitions::handlers::create_transition,
        transitions::handlers::update_transition,
        transitions::handlers::delete_transition,
        personal_records::handlers::list_personal_records,
        personal_records::handlers::recompute_personal_records,
    ),
    components(
        schemas(
            storage::dto::session::CreateSessionRequest,
            storage::dto::session::UpdateSessionRequest,
            storage::dto::session::SessionResponse,
            storage::dto::session::SessionDetailResponse,
            storage::dto::activity::CreateActivityRequest,
            storage::dto::activity::UpdateActivityRequest,
            storage::dto::activity::ActivityResponse,
            storage::dto::transition::CreateTransitionRequest,
            storage::dto::transition::UpdateTransitionRequest,
            storage::dto::transition::TransitionResponse,
            storage::dto::personal_record::SportRecords,
            storage::dto::personal_record::DistanceRecords,
            storage::dto::personal_record::RankedPersonalRecord,
            storage::dto::common::PaginationMeta,
            storage::models::Sport,
        )
    ),
    tags(
        (name = "health", description = "Liveness probe"),
        (name = "sessions", description = "Training sessions"),
        (name = "activities", description = "Swim, bike and run segments"),
        (name = "transitions", description = "T1 and T2 changeovers"),
        (name = "personal-records", description = "Best times per race distance"),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
