//! Bearer-token authentication.
//!
//! A principal presents an opaque API token, either as
//! `Authorization: Bearer <token>` or as the `api_token` query parameter. The
//! store only ever sees the token's SHA-256 digest.

use axum::{
  extract::{FromRequestParts, Query},
  http::{header, request::Parts},
};
use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD as B64;
use imenik_core::{principal::Principal, store::PrincipalStore};
use rand_core::{OsRng, RngCore as _};
use serde::Deserialize;
use sha2::{Digest, Sha256};

use crate::{AppState, error::ApiError};

pub const TOKEN_QUERY_PARAM: &str = "api_token";

const TOKEN_BYTES: usize = 32;

/// A freshly minted token. `token` is shown to its holder once; only `hash`
/// is persisted.
#[derive(Debug, Clone)]
pub struct IssuedToken {
  pub token: String,
  pub hash:  String,
}

/// Mint a random API token.
pub fn issue_token() -> IssuedToken {
  let mut bytes = [0u8; TOKEN_BYTES];
  OsRng.fill_bytes(&mut bytes);
  let token = B64.encode(bytes);
  let hash = hash_token(&token);
  IssuedToken { token, hash }
}

/// Hex SHA-256 digest of a plaintext token.
pub fn hash_token(token: &str) -> String {
  hex::encode(Sha256::digest(token.as_bytes()))
}

#[derive(Deserialize)]
struct TokenQuery {
  api_token: Option<String>,
}

/// Pull the presented token out of the request. The header wins over the
/// query string; empty values count as absent.
pub fn presented_token(parts: &Parts) -> Option<String> {
  let from_header = parts
    .headers
    .get(header::AUTHORIZATION)
    .and_then(|v| v.to_str().ok())
    .and_then(|v| v.strip_prefix("Bearer "))
    .map(str::trim)
    .filter(|t| !t.is_empty())
    .map(str::to_owned);

  from_header.or_else(|| {
    Query::<TokenQuery>::try_from_uri(&parts.uri)
      .ok()
      .and_then(|Query(q)| q.api_token)
      .filter(|t| !t.is_empty())
  })
}

/// Extractor yielding the authenticated principal; rejects with
/// [`ApiError::Unauthenticated`].
#[derive(Debug, Clone)]
pub struct CurrentPrincipal(pub Principal);

impl<S> FromRequestParts<AppState<S>> for CurrentPrincipal
where
  S: PrincipalStore + Clone + 'static,
{
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S>,
  ) -> Result<Self, Self::Rejection> {
    let token = presented_token(parts).ok_or(ApiError::Unauthenticated)?;
    let principal = state
      .store
      .principal_by_token_hash(hash_token(&token))
      .await
      .map_err(ApiError::store)?
      .ok_or(ApiError::Unauthenticated)?;
    Ok(CurrentPrincipal(principal))
  }
}
