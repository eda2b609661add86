use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::calculate::profile_summary as summarize;
use crate::models::{Profile, ProfileSummary};

#[derive(Debug, Deserialize)]
pub struct CreateProfileRequest {
    pub name: String,
}

pub async fn list_profiles(State(state): State<AppState>) -> Result<Json<Vec<Profile>>, ApiError> {
    let store = state.store.read().await;
    Ok(Json(store.list_profiles()?))
}

pub async fn create_profile(
    State(state): State<AppState>,
    Json(req): Json<CreateProfileRequest>,
) -> Result<(StatusCode, Json<Profile>), ApiError> {
    let store = state.store.write().await;
    let profile = store.create_profile(&req.name)?;
    Ok((StatusCode::CREATED, Json(profile)))
}

pub async fn get_profile(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Profile>, ApiError> {
    let store = state.store.read().await;
    Ok(Json(store.get_profile(&id.into())?))
}

pub async fn touch_profile(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Profile>, ApiError> {
    let store = state.store.write().await;
    Ok(Json(store.touch_profile(&id.into())?))
}

pub async fn delete_profile(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let store = state.store.write().await;
    store.delete_profile(&id.into())?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn profile_summary(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProfileSummary>, ApiError> {
    let store = state.store.read().await;
    let profile = store.get_profile(&id.into())?;
    let games = store.list_games(Some(&profile.id))?;
    Ok(Json(summarize(&games)))
}
