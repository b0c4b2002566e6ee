//! Ownership policy for contact actions.
//!
//! [`authorize`] is a pure decision over explicit arguments; it never reads
//! request state and never touches a store.

use crate::{contact::Contact, principal::Principal};

/// Something a principal may attempt against the contact resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
  /// List the principal's own contacts.
  ViewAny,
  Create,
  View,
  Update,
  Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
  Allow,
  Deny,
}

impl Decision {
  pub fn is_allowed(self) -> bool { matches!(self, Self::Allow) }
}

/// Decide whether `principal` may perform `action`.
///
/// `ViewAny` and `Create` are open to every authenticated principal. The
/// per-contact actions are allowed only for the contact's owner; without a
/// target they are denied.
pub fn authorize(
  principal: &Principal,
  action: Action,
  target: Option<&Contact>,
) -> Decision {
  match action {
    Action::ViewAny | Action::Create => Decision::Allow,
    Action::View | Action::Update | Action::Delete => match target {
      Some(contact) if contact.owner_id == principal.principal_id => {
        Decision::Allow
      }
      _ => Decision::Deny,
    },
  }
}

#[cfg(test)]
mod tests {
  use chrono::{NaiveDate, Utc};
  use uuid::Uuid;

  use super::*;

  fn principal() -> Principal {
    Principal {
      principal_id: Uuid::new_v4(),
      name:         "owner".into(),
      created_at:   Utc::now(),
    }
  }

  fn contact_of(owner: &Principal) -> Contact {
    let now = Utc::now();
    Contact {
      contact_id: Uuid::new_v4(),
      owner_id:   owner.principal_id,
      name:       "Test Name".into(),
      email:      "test@email.com".into(),
      birthday:   NaiveDate::from_ymd_opt(1988, 5, 14).unwrap(),
      company:    "Test Company".into(),
      created_at: now,
      updated_at: now,
    }
  }

  const PER_CONTACT: [Action; 3] = [Action::View, Action::Update, Action::Delete];

  #[test]
  fn collection_actions_are_always_allowed() {
    let p = principal();
    let someone_elses = contact_of(&principal());
    for action in [Action::ViewAny, Action::Create] {
      assert_eq!(authorize(&p, action, None), Decision::Allow);
      assert_eq!(authorize(&p, action, Some(&someone_elses)), Decision::Allow);
    }
  }

  #[test]
  fn owner_may_act_on_own_contact() {
    let p = principal();
    let c = contact_of(&p);
    for action in PER_CONTACT {
      assert!(authorize(&p, action, Some(&c)).is_allowed(), "{action:?}");
    }
  }

  #[test]
  fn other_principal_is_denied() {
    let owner = principal();
    let other = principal();
    let c = contact_of(&owner);
    for action in PER_CONTACT {
      assert_eq!(authorize(&other, action, Some(&c)), Decision::Deny);
    }
  }

  #[test]
  fn per_contact_action_without_target_is_denied() {
    let p = principal();
    for action in PER_CONTACT {
      assert_eq!(authorize(&p, action, None), Decision::Deny);
    }
  }
}
