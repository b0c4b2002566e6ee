//! Handlers for `/contacts` endpoints.
//!
//! | Method        | Path             | Notes |
//! |---------------|------------------|-------|
//! | `GET`         | `/contacts`      | The caller's own contacts, creation order |
//! | `POST`        | `/contacts`      | Body: [`ContactPayload`]; returns 201 + contact |
//! | `GET`         | `/contacts/{id}` | 403 if not the owner, 404 if missing |
//! | `PATCH`/`PUT` | `/contacts/{id}` | Full replace; returns 200 + contact |
//! | `DELETE`      | `/contacts/{id}` | 204, empty body |
//!
//! Every request runs authentication, then authorization, then (for writes)
//! body decoding and validation, and only then touches the store.

use axum::{
  Json,
  body::Bytes,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use chrono::Utc;
use imenik_core::{
  contact::{Contact, ContactPayload},
  policy::{Action, authorize},
  principal::Principal,
  store::PrincipalStore,
  validate::validate,
};
use uuid::Uuid;

use crate::{
  AppState,
  auth::CurrentPrincipal,
  error::ApiError,
  resource::{ContactCollection, ContactResource},
};

/// Decode a create/update body. Called only once the request is authorized.
/// An empty body decodes as an empty payload.
fn decode_payload(body: &[u8]) -> Result<ContactPayload, ApiError> {
  if body.iter().all(u8::is_ascii_whitespace) {
    return Ok(ContactPayload::default());
  }
  Ok(serde_json::from_slice(body)?)
}

/// Resolve `raw_id` to a contact the principal may perform `action` on.
///
/// A missing contact is reported before ownership is considered; ids that
/// are not UUIDs cannot name a contact and are reported the same way.
async fn load_authorized<S>(
  state: &AppState<S>,
  principal: &Principal,
  raw_id: &str,
  action: Action,
) -> Result<Contact, ApiError>
where
  S: PrincipalStore + Clone + 'static,
{
  let not_found = || ApiError::NotFound(format!("contact {raw_id} not found"));

  let id = Uuid::parse_str(raw_id).map_err(|_| not_found())?;
  let contact = state
    .store
    .find(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(not_found)?;

  if !authorize(principal, action, Some(&contact)).is_allowed() {
    tracing::debug!(
      principal_id = %principal.principal_id,
      contact_id = %id,
      ?action,
      "denied"
    );
    return Err(ApiError::Forbidden);
  }
  Ok(contact)
}

fn ensure_allowed(principal: &Principal, action: Action) -> Result<(), ApiError> {
  if authorize(principal, action, None).is_allowed() {
    Ok(())
  } else {
    Err(ApiError::Forbidden)
  }
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /contacts`
pub async fn list<S>(
  State(state): State<AppState<S>>,
  CurrentPrincipal(principal): CurrentPrincipal,
) -> Result<Json<ContactCollection>, ApiError>
where
  S: PrincipalStore + Clone + 'static,
{
  ensure_allowed(&principal, Action::ViewAny)?;
  let contacts = state
    .store
    .list_by_owner(principal.principal_id)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(ContactCollection::new(&contacts, Utc::now())))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /contacts`: returns 201 + the stored contact.
pub async fn create<S>(
  State(state): State<AppState<S>>,
  CurrentPrincipal(principal): CurrentPrincipal,
  body: Bytes,
) -> Result<impl IntoResponse, ApiError>
where
  S: PrincipalStore + Clone + 'static,
{
  ensure_allowed(&principal, Action::Create)?;
  let payload = decode_payload(&body)?;
  let fields = validate(&payload, &state.messages)?;

  let contact = state
    .store
    .create(principal.principal_id, fields)
    .await
    .map_err(ApiError::store)?;
  tracing::info!(
    contact_id = %contact.contact_id,
    owner_id = %contact.owner_id,
    "contact created"
  );

  Ok((
    StatusCode::CREATED,
    Json(ContactResource::new(&contact, Utc::now())),
  ))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /contacts/{id}`
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  CurrentPrincipal(principal): CurrentPrincipal,
  Path(id): Path<String>,
) -> Result<Json<ContactResource>, ApiError>
where
  S: PrincipalStore + Clone + 'static,
{
  let contact = load_authorized(&state, &principal, &id, Action::View).await?;
  Ok(Json(ContactResource::new(&contact, Utc::now())))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PATCH /contacts/{id}` and `PUT /contacts/{id}`; replaces all four
/// fields.
pub async fn update<S>(
  State(state): State<AppState<S>>,
  CurrentPrincipal(principal): CurrentPrincipal,
  Path(id): Path<String>,
  body: Bytes,
) -> Result<Json<ContactResource>, ApiError>
where
  S: PrincipalStore + Clone + 'static,
{
  let existing =
    load_authorized(&state, &principal, &id, Action::Update).await?;
  let payload = decode_payload(&body)?;
  let fields = validate(&payload, &state.messages)?;

  let contact = state
    .store
    .update(existing.contact_id, fields)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("contact {id} not found")))?;
  tracing::info!(contact_id = %contact.contact_id, "contact updated");

  Ok(Json(ContactResource::new(&contact, Utc::now())))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /contacts/{id}`: 204 with an empty body.
pub async fn delete<S>(
  State(state): State<AppState<S>>,
  CurrentPrincipal(principal): CurrentPrincipal,
  Path(id): Path<String>,
) -> Result<StatusCode, ApiError>
where
  S: PrincipalStore + Clone + 'static,
{
  let existing =
    load_authorized(&state, &principal, &id, Action::Delete).await?;

  let deleted = state
    .store
    .delete(existing.contact_id)
    .await
    .map_err(ApiError::store)?;
  if !deleted {
    return Err(ApiError::NotFound(format!("contact {id} not found")));
  }
  tracing::info!(contact_id = %existing.contact_id, "contact deleted");

  Ok(StatusCode::NO_CONTENT)
}
