//! Bridge contact handlers: list, create, update, delete.
//!
//! Each handler forwards to the configured [`ContactAdapter`] with the
//! provider configuration taken from the request headers.
//!
//! [`ContactAdapter`]: sipbridge_core::ContactAdapter

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use sipbridge_core::{Contact, ContactTemplate, ContactUpdate};

use crate::middleware::{ProviderHeaders, RequestId};

use super::{ApiError, AppState};

/// GET /contacts
pub(super) async fn list_contacts(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    ProviderHeaders(config): ProviderHeaders,
) -> Result<Json<Vec<Contact>>, ApiError> {
    state
        .adapter
        .get_contacts(&config)
        .await
        .map(Json)
        .map_err(|e| ApiError::from_service(req_id.0, &e))
}

/// POST /contacts
pub(super) async fn create_contact(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    ProviderHeaders(config): ProviderHeaders,
    Json(body): Json<ContactTemplate>,
) -> Result<Json<Contact>, ApiError> {
    state
        .adapter
        .create_contact(&config, body)
        .await
        .map(Json)
        .map_err(|e| ApiError::from_service(req_id.0, &e))
}

/// PUT /contacts/{id}
pub(super) async fn update_contact(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Extension(req_id): Extension<RequestId>,
    ProviderHeaders(config): ProviderHeaders,
    Json(body): Json<ContactUpdate>,
) -> Result<Json<Contact>, ApiError> {
    state
        .adapter
        .update_contact(&config, &id, body)
        .await
        .map(Json)
        .map_err(|e| ApiError::from_service(req_id.0, &e))
}

/// DELETE /contacts/{id}
pub(super) async fn delete_contact(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Extension(req_id): Extension<RequestId>,
    ProviderHeaders(config): ProviderHeaders,
) -> Result<StatusCode, ApiError> {
    state
        .adapter
        .delete_contact(&config, &id)
        .await
        .map(|()| StatusCode::OK)
        .map_err(|e| ApiError::from_service(req_id.0, &e))
}
