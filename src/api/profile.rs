//! Read-only user and leaderboard endpoints.

use axum::{extract::State, Json};

use super::ApiResult;
use crate::models::{LeaderboardEntry, UserProfile};
use crate::AppState;

/// GET /api/user - Get the user profile.
pub async fn get_user(State(state): State<AppState>) -> ApiResult<UserProfile> {
    let document = state.store.load().await?;
    Ok(Json(document.user))
}

/// GET /api/leaderboard - Get the leaderboard, highest points first.
pub async fn get_leaderboard(State(state): State<AppState>) -> ApiResult<Vec<LeaderboardEntry>> {
    let document = state.store.load().await?;
    Ok(Json(document.leaderboard))
}
