//! Wire representations of contacts.
//!
//! A contact renders as `{"data": {...}, "links": {"self": "/contacts/<id>"}}`;
//! a collection is `{"data": [<contact>, ...]}`. `last_updated` is computed at
//! render time against the supplied `now` and is never stored.

use chrono::{DateTime, Utc};
use imenik_core::contact::Contact;
use serde::Serialize;
use uuid::Uuid;

/// Output format for `birthday`.
pub const BIRTHDAY_FORMAT: &str = "%d/%m/%Y";

// ─── Single contact ───────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ContactData {
  pub contact_id:   Uuid,
  pub name:         String,
  pub email:        String,
  pub birthday:     String,
  pub company:      String,
  pub last_updated: String,
}

#[derive(Debug, Serialize)]
pub struct Links {
  #[serde(rename = "self")]
  pub self_link: String,
}

#[derive(Debug, Serialize)]
pub struct ContactResource {
  pub data:  ContactData,
  pub links: Links,
}

impl ContactResource {
  pub fn new(contact: &Contact, now: DateTime<Utc>) -> Self {
    Self {
      data:  ContactData {
        contact_id:   contact.contact_id,
        name:         contact.name.clone(),
        email:        contact.email.clone(),
        birthday:     contact.birthday.format(BIRTHDAY_FORMAT).to_string(),
        company:      contact.company.clone(),
        last_updated: diff_for_humans(contact.updated_at, now),
      },
      links: Links { self_link: contact.path() },
    }
  }
}

// ─── Collection ───────────────────────────────────────────────────────────────

/// A sequence of contacts, in the order the store returned them.
#[derive(Debug, Serialize)]
pub struct ContactCollection {
  pub data: Vec<ContactResource>,
}

impl ContactCollection {
  pub fn new(contacts: &[Contact], now: DateTime<Utc>) -> Self {
    Self {
      data: contacts
        .iter()
        .map(|c| ContactResource::new(c, now))
        .collect(),
    }
  }
}

// ─── Relative time ────────────────────────────────────────────────────────────

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
const WEEK: i64 = 7 * DAY;
const MONTH: i64 = 30 * DAY;
const YEAR: i64 = 365 * DAY;

/// Human-relative phrase for `then` as seen from `now`, e.g. "3 minutes ago"
/// or "2 days from now". The smallest phrase is "1 second".
pub fn diff_for_humans(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
  let delta = (now - then).num_seconds();
  let secs = delta.abs();

  let (count, unit) = match secs {
    s if s < MINUTE => (s.max(1), "second"),
    s if s < HOUR => (s / MINUTE, "minute"),
    s if s < DAY => (s / HOUR, "hour"),
    s if s < WEEK => (s / DAY, "day"),
    s if s < MONTH => (s / WEEK, "week"),
    s if s < YEAR => (s / MONTH, "month"),
    s => (s / YEAR, "year"),
  };

  let plural = if count == 1 { "" } else { "s" };
  let direction = if delta < 0 { "from now" } else { "ago" };
  format!("{count} {unit}{plural} {direction}")
}

#[cfg(test)]
mod tests {
  use chrono::{Duration, NaiveDate, TimeZone};
  use serde_json::json;

  use super::*;

  fn at() -> DateTime<Utc> { Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap() }

  fn contact(updated_at: DateTime<Utc>) -> Contact {
    Contact {
      contact_id: Uuid::nil(),
      owner_id: Uuid::nil(),
      name: "Test Name".into(),
      email: "test@email.com".into(),
      birthday: NaiveDate::from_ymd_opt(1988, 5, 14).unwrap(),
      company: "Test Company".into(),
      created_at: updated_at,
      updated_at,
    }
  }

  #[test]
  fn single_contact_shape() {
    let now = at();
    let c = contact(now - Duration::minutes(3));
    let value = serde_json::to_value(ContactResource::new(&c, now)).unwrap();
    assert_eq!(
      value,
      json!({
        "data": {
          "contact_id":   Uuid::nil(),
          "name":         "Test Name",
          "email":        "test@email.com",
          "birthday":     "14/05/1988",
          "company":      "Test Company",
          "last_updated": "3 minutes ago",
        },
        "links": { "self": format!("/contacts/{}", Uuid::nil()) },
      })
    );
  }

  #[test]
  fn collection_nests_full_representations() {
    let now = at();
    let contacts = vec![contact(now), contact(now)];
    let value =
      serde_json::to_value(ContactCollection::new(&contacts, now)).unwrap();
    let items = value["data"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["data"]["contact_id"], json!(Uuid::nil()));
    assert!(items[0]["links"]["self"].is_string());
  }

  #[test]
  fn relative_phrases() {
    let now = at();
    let cases = [
      (Duration::zero(), "1 second ago"),
      (Duration::seconds(1), "1 second ago"),
      (Duration::seconds(59), "59 seconds ago"),
      (Duration::minutes(1), "1 minute ago"),
      (Duration::minutes(3), "3 minutes ago"),
      (Duration::hours(1), "1 hour ago"),
      (Duration::hours(23), "23 hours ago"),
      (Duration::days(1), "1 day ago"),
      (Duration::days(6), "6 days ago"),
      (Duration::days(7), "1 week ago"),
      (Duration::days(29), "4 weeks ago"),
      (Duration::days(30), "1 month ago"),
      (Duration::days(200), "6 months ago"),
      (Duration::days(365), "1 year ago"),
      (Duration::days(800), "2 years ago"),
    ];
    for (ago, expected) in cases {
      assert_eq!(diff_for_humans(now - ago, now), expected, "{ago:?}");
    }
  }

  #[test]
  fn future_timestamps_read_from_now() {
    let now = at();
    assert_eq!(diff_for_humans(now + Duration::hours(2), now), "2 hours from now");
  }
}
