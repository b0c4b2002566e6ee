//! Principal: the authenticated actor that owns contacts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An authenticated actor. Owns zero or more contacts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
  pub principal_id: Uuid,
  pub name:         String,
  pub created_at:   DateTime<Utc>,
}
