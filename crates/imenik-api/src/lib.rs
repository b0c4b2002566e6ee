//! JSON REST API for imenik.
//!
//! Exposes an axum [`Router`] backed by any
//! [`PrincipalStore`](imenik_core::store::PrincipalStore). TLS and transport
//! concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = imenik_api::api_router(AppState { store, messages });
//! axum::serve(listener, app).await?;
//! ```

pub mod auth;
pub mod contacts;
pub mod error;
pub mod resource;

use std::sync::Arc;

use axum::{Router, routing::get};
use imenik_core::{store::PrincipalStore, validate::Messages};

pub use error::ApiError;

/// Shared state threaded through all handlers.
#[derive(Clone)]
pub struct AppState<S> {
  pub store:    Arc<S>,
  /// Validation message table.
  pub messages: Arc<Messages>,
}

/// Build a fully-materialised API router for `state`.
pub fn api_router<S>(state: AppState<S>) -> Router<()>
where
  S: PrincipalStore + Clone + 'static,
{
  Router::new()
    .route(
      "/contacts",
      get(contacts::list::<S>).post(contacts::create::<S>),
    )
    .route(
      "/contacts/{id}",
      get(contacts::get_one::<S>)
        .patch(contacts::update::<S>)
        .put(contacts::update::<S>)
        .delete(contacts::delete::<S>),
    )
    .with_state(state)
}
