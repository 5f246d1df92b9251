//! HTTP Request/Response Types

use fruits_core::domain::{FruitId, FruitUpdate, NewFruit};
use serde::{Deserialize, Serialize};

/// POST /api/fruits/add
#[derive(Debug, Deserialize)]
pub struct AddFruitRequest {
    #[serde(default)]
    pub id: Option<FruitId>,
    pub name: String,
    pub season: String,
    #[serde(default)]
    pub emoji: Option<String>,
}

impl From<AddFruitRequest> for NewFruit {
    fn from(req: AddFruitRequest) -> Self {
        NewFruit {
            id: req.id,
            name: req.name,
            emoji: req.emoji,
            season: req.season,
        }
    }
}

/// PUT /api/fruits/{id}
#[derive(Debug, Deserialize)]
pub struct UpdateFruitRequest {
    pub name: String,
    pub season: String,
    #[serde(default)]
    pub emoji: Option<String>,
}

impl From<UpdateFruitRequest> for FruitUpdate {
    fn from(req: UpdateFruitRequest) -> Self {
        FruitUpdate {
            name: req.name,
            emoji: req.emoji,
            season: req.season,
        }
    }
}

/// GET /api/fruits?season=..
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub season: Option<String>,
}

/// GET /health
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub fruits: i64,
}
