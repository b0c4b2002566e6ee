//! [`SqliteStore`], the SQLite implementation of [`ContactStore`] and
//! [`PrincipalStore`].

use std::path::Path;

use chrono::{DateTime, Duration, SubsecRound as _, Utc};
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use imenik_core::{
  contact::{Contact, ContactFields},
  principal::Principal,
  store::{ContactStore, PrincipalStore},
};

use crate::{
  encode::{
    RawContact, RawPrincipal, decode_dt, encode_date, encode_dt, encode_uuid,
  },
  schema::SCHEMA,
  Result,
};

/// Current time at the precision the timestamp columns keep, so a value
/// handed back from a write equals the value read back later.
fn now() -> DateTime<Utc> { Utc::now().trunc_subsecs(6) }

/// The `updated_at` to stamp on an update: the current time, but always at
/// least one microsecond past `previous`, even if the clock stepped back.
fn next_updated_at(previous: DateTime<Utc>, now: DateTime<Utc>) -> DateTime<Utc> {
  now.max(previous + Duration::microseconds(1))
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// An imenik store backed by a single SQLite file.
///
/// Cloning shares the inner connection.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── ContactStore impl ───────────────────────────────────────────────────────

impl ContactStore for SqliteStore {
  type Error = crate::Error;

  async fn create(&self, owner_id: Uuid, fields: ContactFields) -> Result<Contact> {
    let at = now();
    let contact = Contact {
      contact_id: Uuid::new_v4(),
      owner_id,
      name:       fields.name,
      email:      fields.email,
      birthday:   fields.birthday,
      company:    fields.company,
      created_at: at,
      updated_at: at,
    };

    let id_str       = encode_uuid(contact.contact_id);
    let owner_str    = encode_uuid(owner_id);
    let name         = contact.name.clone();
    let email        = contact.email.clone();
    let birthday_str = encode_date(contact.birthday);
    let company      = contact.company.clone();
    let at_str       = encode_dt(at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO contacts (
             contact_id, owner_id, name, email, birthday, company,
             created_at, updated_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)",
          rusqlite::params![
            id_str,
            owner_str,
            name,
            email,
            birthday_str,
            company,
            at_str,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(contact)
  }

  async fn find(&self, id: Uuid) -> Result<Option<Contact>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawContact> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!(
              "SELECT {} FROM contacts WHERE contact_id = ?1",
              RawContact::COLUMNS
            ),
            rusqlite::params![id_str],
            RawContact::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawContact::into_contact).transpose()
  }

  async fn update(&self, id: Uuid, fields: ContactFields) -> Result<Option<Contact>> {
    let id_str       = encode_uuid(id);
    let name         = fields.name.clone();
    let email        = fields.email.clone();
    let birthday_str = encode_date(fields.birthday);
    let company      = fields.company.clone();

    // Read and write under one transaction.
    let outcome: Option<(RawContact, DateTime<Utc>)> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let Some(raw) = tx
          .query_row(
            &format!(
              "SELECT {} FROM contacts WHERE contact_id = ?1",
              RawContact::COLUMNS
            ),
            rusqlite::params![id_str],
            RawContact::from_row,
          )
          .optional()?
        else {
          return Ok(None);
        };

        let previous = decode_dt(&raw.updated_at)
          .map_err(|e| tokio_rusqlite::Error::Other(Box::new(e)))?;
        let updated_at = next_updated_at(previous, now());

        tx.execute(
          "UPDATE contacts
              SET name = ?2, email = ?3, birthday = ?4, company = ?5,
                  updated_at = ?6
            WHERE contact_id = ?1",
          rusqlite::params![
            id_str,
            name,
            email,
            birthday_str,
            company,
            encode_dt(updated_at),
          ],
        )?;
        tx.commit()?;
        Ok(Some((raw, updated_at)))
      })
      .await?;

    let Some((raw, updated_at)) = outcome else {
      return Ok(None);
    };
    let existing = raw.into_contact()?;

    Ok(Some(Contact {
      name: fields.name,
      email: fields.email,
      birthday: fields.birthday,
      company: fields.company,
      updated_at,
      ..existing
    }))
  }

  async fn delete(&self, id: Uuid) -> Result<bool> {
    let id_str = encode_uuid(id);

    let deleted = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM contacts WHERE contact_id = ?1",
          rusqlite::params![id_str],
        )?)
      })
      .await?;

    Ok(deleted > 0)
  }

  async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<Contact>> {
    let owner_str = encode_uuid(owner_id);

    let raws: Vec<RawContact> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {} FROM contacts WHERE owner_id = ?1
           ORDER BY created_at, rowid",
          RawContact::COLUMNS
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![owner_str], RawContact::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawContact::into_contact).collect()
  }

  async fn count(&self) -> Result<u64> {
    let n: i64 = self
      .conn
      .call(|conn| {
        Ok(conn.query_row("SELECT COUNT(*) FROM contacts", [], |r| r.get(0))?)
      })
      .await?;
    Ok(n.max(0) as u64)
  }
}

// ─── PrincipalStore impl ─────────────────────────────────────────────────────

impl PrincipalStore for SqliteStore {
  async fn add_principal(&self, name: String, token_hash: String) -> Result<Principal> {
    let principal = Principal {
      principal_id: Uuid::new_v4(),
      name,
      created_at: now(),
    };

    let id_str = encode_uuid(principal.principal_id);
    let name   = principal.name.clone();
    let at_str = encode_dt(principal.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO principals (principal_id, name, token_hash, created_at)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![id_str, name, token_hash, at_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(principal)
  }

  async fn principal_by_token_hash(&self, token_hash: String) -> Result<Option<Principal>> {
    let raw: Option<RawPrincipal> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT principal_id, name, created_at
               FROM principals WHERE token_hash = ?1",
            rusqlite::params![token_hash],
            |row| {
              Ok(RawPrincipal {
                principal_id: row.get(0)?,
                name:         row.get(1)?,
                created_at:   row.get(2)?,
              })
            },
          )
          .optional()?)
      })
      .await?;

    raw.map(RawPrincipal::into_principal).transpose()
  }
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;

  use super::*;

  #[test]
  fn next_updated_at_is_strictly_later() {
    let t = now();
    assert_eq!(next_updated_at(t, t), t + Duration::microseconds(1));
    let earlier = t - Duration::hours(1);
    assert_eq!(next_updated_at(earlier, t), t);
    let later = t + Duration::hours(1);
    assert_eq!(next_updated_at(later, t), later + Duration::microseconds(1));
  }

  #[tokio::test]
  async fn update_advances_past_a_future_timestamp() {
    let s = SqliteStore::open_in_memory().await.unwrap();
    let owner = s.add_principal("ana".into(), "hash".into()).await.unwrap();
    let fields = ContactFields {
      name:     "Test Name".into(),
      email:    "test@email.com".into(),
      birthday: NaiveDate::from_ymd_opt(1988, 5, 14).unwrap(),
      company:  "Test Company".into(),
    };
    let c = s.create(owner.principal_id, fields.clone()).await.unwrap();

    // Simulate a clock that has since stepped backwards.
    let future = now() + Duration::hours(1);
    let id_str = encode_uuid(c.contact_id);
    let at_str = encode_dt(future);
    s.conn
      .call(move |conn| {
        conn.execute(
          "UPDATE contacts SET updated_at = ?2 WHERE contact_id = ?1",
          rusqlite::params![id_str, at_str],
        )?;
        Ok(())
      })
      .await
      .unwrap();

    let u = s.update(c.contact_id, fields).await.unwrap().unwrap();
    assert!(u.updated_at > future);
    let stored = s.find(c.contact_id).await.unwrap().unwrap();
    assert_eq!(stored.updated_at, u.updated_at);
  }
}
