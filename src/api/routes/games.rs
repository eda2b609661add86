use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::models::{Game, GameDraft, GameReport, ProfileId};

#[derive(Debug, Deserialize)]
pub struct ListGamesParams {
    pub profile_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateGameRequest {
    pub profile_id: String,
    #[serde(flatten)]
    pub draft: GameDraft,
}

#[derive(Debug, Default, Deserialize)]
pub struct StatsParams {
    #[serde(default)]
    pub all_profiles: bool,
}

#[derive(Debug, Serialize)]
pub struct GameStatsResponse {
    pub game: Game,
    pub report: GameReport,
}

pub async fn list_games(
    State(state): State<AppState>,
    Query(params): Query<ListGamesParams>,
) -> Result<Json<Vec<Game>>, ApiError> {
    let profile_id = params.profile_id.map(ProfileId::from);
    let store = state.store.read().await;
    Ok(Json(store.list_games(profile_id.as_ref())?))
}

pub async fn create_game(
    State(state): State<AppState>,
    Json(req): Json<CreateGameRequest>,
) -> Result<(StatusCode, Json<Game>), ApiError> {
    let store = state.store.write().await;
    let game = store.create_game(&req.profile_id.into(), req.draft)?;
    Ok((StatusCode::CREATED, Json(game)))
}

pub async fn get_game(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Game>, ApiError> {
    let store = state.store.read().await;
    Ok(Json(store.get_game(&id.into())?))
}

pub async fn update_game(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(draft): Json<GameDraft>,
) -> Result<Json<Game>, ApiError> {
    let store = state.store.write().await;
    Ok(Json(store.update_game(&id.into(), draft)?))
}

pub async fn delete_game(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let store = state.store.write().await;
    store.delete_game(&id.into())?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn game_stats(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<StatsParams>,
) -> Result<Json<GameStatsResponse>, ApiError> {
    let store = state.store.read().await;
    let (game, report) = store.game_report(&id.into(), params.all_profiles, &state.options)?;
    Ok(Json(GameStatsResponse { game, report }))
}

#[cfg(test)]
mod tests {
    use crate::api::build_router;
    use crate::api::routes::test_support::{get_json, post_json, send, setup_test_state};
    use axum::http::StatusCode;
    use serde_json::Value;

    async fn create_profile(app: axum::Router, name: &str) -> String {
        let (_, json) = post_json(app, "/api/profiles", &format!(r#"{{"name":"{name}"}}"#)).await;
        json["id"].as_str().unwrap().to_string()
    }

    fn game_body(profile_id: &str, date: &str, win: bool, blight: u32) -> String {
        format!(
            r#"{{"profile_id":"{profile_id}","date":"{date}","players":["Ana","Ben"],"spirits":["Ocean","Fangs"],"win":{win},"adversary":"England","adversary_difficulty":4,"invader_cards":3,"dahan":7,"blight":{blight}}}"#
        )
    }

    async fn create_game(app: axum::Router, body: &str) -> Value {
        let (status, json) = post_json(app, "/api/games", body).await;
        assert_eq!(status, StatusCode::CREATED, "{json}");
        json
    }

    #[tokio::test]
    async fn test_create_game_computes_score() {
        let tmp = tempfile::tempdir().unwrap();
        let app = build_router(setup_test_state(tmp.path()));
        let profile = create_profile(app.clone(), "Ana").await;

        let game = create_game(app.clone(), &game_body(&profile, "2025-06-01", true, 10)).await;
        assert_eq!(game["score"], 34);

        let id = game["id"].as_str().unwrap();
        let (status, fetched) = get_json(app, &format!("/api/games/{id}")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["score"], 34);
    }

    #[tokio::test]
    async fn test_create_game_validation_error() {
        let tmp = tempfile::tempdir().unwrap();
        let app = build_router(setup_test_state(tmp.path()));
        let profile = create_profile(app.clone(), "Ana").await;

        let body = format!(
            r#"{{"profile_id":"{profile}","date":"2025-06-01","players":["Ana","Ben"],"spirits":["Ocean"],"win":true}}"#
        );
        let (status, json) = post_json(app, "/api/games", &body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"]["message"]
            .as_str()
            .unwrap()
            .contains("exactly one spirit"));
    }

    #[tokio::test]
    async fn test_update_rejects_picture_outside_media_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let app = build_router(setup_test_state(tmp.path()));
        let profile = create_profile(app.clone(), "Ana").await;
        let game = create_game(app.clone(), &game_body(&profile, "2025-06-01", true, 0)).await;
        let id = game["id"].as_str().unwrap();

        let escape = tmp.path().join("media").join("..").join("records").join("games.jsonl");
        let edit = serde_json::json!({
            "date": "2025-06-01",
            "players": ["Ana", "Ben"],
            "spirits": ["Ocean", "Fangs"],
            "win": true,
            "pictures": [escape.to_string_lossy()],
        })
        .to_string();
        let (status, json) = send(app.clone(), "PUT", &format!("/api/games/{id}"), Some(&edit)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "BAD_REQUEST");

        let (status, _) = send(app, "DELETE", &format!("/api/games/{id}"), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(tmp.path().join("records").join("games.jsonl").exists());
    }

    #[tokio::test]
    async fn test_update_and_delete_game() {
        let tmp = tempfile::tempdir().unwrap();
        let app = build_router(setup_test_state(tmp.path()));
        let profile = create_profile(app.clone(), "Ana").await;
        let game = create_game(app.clone(), &game_body(&profile, "2025-06-01", true, 10)).await;
        let id = game["id"].as_str().unwrap();

        let edit = r#"{"date":"2025-06-01","players":["Ana","Ben"],"spirits":["Ocean","Fangs"],"win":false,"adversary":"England","adversary_difficulty":4,"invader_cards":3,"dahan":7,"blight":10}"#;
        let (status, updated) = send(app.clone(), "PUT", &format!("/api/games/{id}"), Some(edit)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["score"], 9);
        assert_eq!(updated["created_at"], game["created_at"]);

        let (status, _) = send(app.clone(), "DELETE", &format!("/api/games/{id}"), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = get_json(app, &format!("/api/games/{id}")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_list_games_by_profile() {
        let tmp = tempfile::tempdir().unwrap();
        let app = build_router(setup_test_state(tmp.path()));
        let ana = create_profile(app.clone(), "Ana").await;
        let ben = create_profile(app.clone(), "Ben").await;
        create_game(app.clone(), &game_body(&ana, "2025-06-01", true, 0)).await;
        create_game(app.clone(), &game_body(&ana, "2025-06-03", false, 0)).await;
        create_game(app.clone(), &game_body(&ben, "2025-06-02", true, 0)).await;

        let (_, json) = get_json(app.clone(), &format!("/api/games?profile_id={ana}")).await;
        let games = json.as_array().unwrap();
        assert_eq!(games.len(), 2);
        assert_eq!(games[0]["date"], "2025-06-03");

        let (_, json) = get_json(app, "/api/games").await;
        assert_eq!(json.as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_stats_first_game() {
        let tmp = tempfile::tempdir().unwrap();
        let app = build_router(setup_test_state(tmp.path()));
        let profile = create_profile(app.clone(), "Ana").await;
        let game = create_game(app.clone(), &game_body(&profile, "2025-06-01", true, 10)).await;
        let id = game["id"].as_str().unwrap();

        let (status, json) = get_json(app, &format!("/api/games/{id}/stats")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["report"]["kind"], "first_game");
        assert_eq!(json["report"]["score"], 34);
    }

    #[tokio::test]
    async fn test_stats_compared() {
        let tmp = tempfile::tempdir().unwrap();
        let app = build_router(setup_test_state(tmp.path()));
        let ana = create_profile(app.clone(), "Ana").await;
        let ben = create_profile(app.clone(), "Ben").await;

        create_game(app.clone(), &game_body(&ana, "2025-06-01", false, 0)).await;
        let current = create_game(app.clone(), &game_body(&ana, "2025-06-02", true, 10)).await;
        create_game(app.clone(), &game_body(&ben, "2025-06-03", true, 0)).await;
        let id = current["id"].as_str().unwrap();

        let (status, json) = get_json(app.clone(), &format!("/api/games/{id}/stats")).await;
        assert_eq!(status, StatusCode::OK);
        let report = &json["report"];
        assert_eq!(report["kind"], "compared");
        assert_eq!(report["overall_rank"]["rank"], 1);
        assert_eq!(report["overall_rank"]["total"], 2);
        assert_eq!(report["same_spirits_record"]["wins"], 1);
        assert_eq!(report["same_spirits_record"]["losses"], 1);
        assert_eq!(report["blight_stats"]["percentage"], 100.0);

        let (_, json) = get_json(app, &format!("/api/games/{id}/stats?all_profiles=true")).await;
        let report = &json["report"];
        assert_eq!(report["overall_rank"]["total"], 3);
        assert_eq!(report["overall_rank"]["rank"], 2);
        assert_eq!(report["same_adversary_record"]["wins"], 2);
    }
}
