use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Links an existing competition and sport
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CompetitionSportRequest {
    pub competition: Uuid,
    pub sport: Uuid,
}
