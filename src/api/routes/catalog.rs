use axum::Json;
use serde::Serialize;

use crate::models::catalog::{Adversary, Scenario, ADVERSARIES, SCENARIOS};

#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub adversaries: &'static [Adversary],
    pub scenarios: &'static [Scenario],
}

pub async fn get_catalog() -> Json<CatalogResponse> {
    Json(CatalogResponse {
        adversaries: ADVERSARIES,
        scenarios: SCENARIOS,
    })
}
