use utoipa::OpenApi;

pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod features;
pub mod middleware;
pub mod routes;
pub mod state;

use features::{accounts, competition_sport, competitions, sports, stages};

#[derive(OpenApi)]
#[openapi(
    paths(
        competitions::handlers::list_competitions,
        competitions::handlers::get_competition,
        competitions::handlers::create_competition,
        competitions::handlers::update_competition,
        competitions::handlers::delete_competition,
        sports::handlers::list_sports,
        sports::handlers::get_sport,
        sports::handlers::create_sport,
        sports::handlers::update_sport,
        sports::handlers::delete_sport,
        stages::handlers::list_stages,
        stages::handlers::get_stage,
        stages::handlers::create_stage,
        stages::handlers::update_stage,
        stages::handlers::delete_stage,
        competition_sport::handlers::list_links,
        competition_sport::handlers::get_link,
        competition_sport::handlers::create_link,
        competition_sport::handlers::update_link,
        competition_sport::handlers::delete_link,
        accounts::handlers::obtain_token,
    ),
    components(
        schemas(
            storage::dto::competition::CompetitionRequest,
            storage::dto::competition::CompetitionResponse,
            storage::dto::sport::SportRequest,
            storage::dto::sport::SportResponse,
            storage::dto::stage::StageRequest,
            storage::dto::stage::StageResponse,
            storage::dto::competition_sport::CompetitionSportRequest,
            storage::dto::account::TokenRequest,
            storage::dto::account::TokenResponse,
            storage::dto::common::PaginationMeta,
            storage::models::Competition,
            storage::models::Sport,
            storage::models::CompetitionSport,
            storage::models::Stage,
        )
    ),
    tags(
        (name = "competitions", description = "Competition endpoints"),
        (name = "sports", description = "Sport endpoints"),
        (name = "stages", description = "Stage endpoints"),
        (name = "competition_sport", description = "Competition/sport link endpoints"),
        (name = "auth", description = "API token exchange"),
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
