//! The contact record and the shapes it passes through on the way in.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

// ─── Contact ─────────────────────────────────────────────────────────────────

/// A single address-book entry. Exactly one principal owns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
  pub contact_id: Uuid,
  /// The creating principal; never reassigned.
  pub owner_id:   Uuid,
  pub name:       String,
  pub email:      String,
  pub birthday:   NaiveDate,
  pub company:    String,
  pub created_at: DateTime<Utc>,
  /// Bumped on every successful update; never moves backwards.
  pub updated_at: DateTime<Utc>,
}

impl Contact {
  /// Canonical path of this contact, used as its self-link.
  pub fn path(&self) -> String { format!("/contacts/{}", self.contact_id) }
}

// ─── Inputs ──────────────────────────────────────────────────────────────────

/// Raw create/update body, before validation.
///
/// Fields hold any JSON value so that an absent or non-string field is
/// reported as a field error instead of a decode failure. Keys other than
/// these four (`owner_id` included) are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactPayload {
  pub name:     Option<Value>,
  pub email:    Option<Value>,
  pub birthday: Option<Value>,
  pub company:  Option<Value>,
}

/// The four business fields once they have passed
/// [`validate`](crate::validate::validate). Only this type reaches a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactFields {
  pub name:     String,
  pub email:    String,
  pub birthday: NaiveDate,
  pub company:  String,
}
