/*
 * Responsibility
 * - GET /api/v1/me: the restored identity of the caller (UserLoggedIn guard)
 */
use axum::Json;

use crate::api::v1::dto::session::UserInfoResponse;
use crate::api::v1::extractors::CurrentIdentity;

pub async fn me(CurrentIdentity(identity): CurrentIdentity) -> Json<UserInfoResponse> {
    Json(UserInfoResponse::from(&identity))
}
