//! Repository traits implemented by storage backends.
//!
//! Higher layers (`imenik-api`) depend on these abstractions, not on any
//! concrete backend. All methods return `Send` futures so the traits can be
//! used from a multi-threaded runtime (e.g. tokio with `axum`).

use std::future::Future;

use uuid::Uuid;

use crate::{
  contact::{Contact, ContactFields},
  principal::Principal,
};

/// Persistence for contacts. One call is one atomic single-row operation.
pub trait ContactStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Persist a new contact owned by `owner_id`. The store assigns the id and
  /// both timestamps.
  fn create(
    &self,
    owner_id: Uuid,
    fields: ContactFields,
  ) -> impl Future<Output = Result<Contact, Self::Error>> + Send + '_;

  /// Retrieve a contact by id. Returns `None` if not found.
  fn find(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Contact>, Self::Error>> + Send + '_;

  /// Replace the four business fields of a contact and bump `updated_at`.
  /// The owner is never changed. Returns `None` if not found.
  fn update(
    &self,
    id: Uuid,
    fields: ContactFields,
  ) -> impl Future<Output = Result<Option<Contact>, Self::Error>> + Send + '_;

  /// Hard-delete a contact. Returns `false` if there was nothing to delete.
  fn delete(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// All contacts owned by `owner_id`, in creation order.
  fn list_by_owner(
    &self,
    owner_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Contact>, Self::Error>> + Send + '_;

  /// Total number of persisted contacts across all owners.
  fn count(&self) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;
}

/// Persistence for principals and their API tokens.
///
/// Only token digests are ever handed to a store; plaintext tokens stay with
/// the caller.
pub trait PrincipalStore: ContactStore {
  /// Persist a new principal whose token hashes to `token_hash`.
  fn add_principal(
    &self,
    name: String,
    token_hash: String,
  ) -> impl Future<Output = Result<Principal, Self::Error>> + Send + '_;

  /// Resolve a principal from a token digest. Returns `None` if unknown.
  fn principal_by_token_hash(
    &self,
    token_hash: String,
  ) -> impl Future<Output = Result<Option<Principal>, Self::Error>> + Send + '_;
}
