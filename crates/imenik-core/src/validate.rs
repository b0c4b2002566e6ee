//! Field validation for contact create/update payloads.
//!
//! [`validate`] is a pure function: it either returns the normalised
//! [`ContactFields`] or the complete set of rule violations. Every rule is
//! evaluated; nothing short-circuits on the first failure.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::{
  birthday::parse_birthday,
  contact::{ContactFields, ContactPayload},
};

/// Minimum length of `name`, in characters, after trimming.
pub const NAME_MIN_CHARS: usize = 3;

// ─── Fields and rules ────────────────────────────────────────────────────────

/// A validated payload field.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Field {
  Name,
  Email,
  Birthday,
  Company,
}

impl Field {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Name => "name",
      Self::Email => "email",
      Self::Birthday => "birthday",
      Self::Company => "company",
    }
  }
}

/// The rule a field violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Rule {
  /// Absent, or empty after trimming.
  Required,
  /// Shorter than [`NAME_MIN_CHARS`].
  Min,
  /// Not a syntactically valid email address.
  Email,
  /// Not in any accepted date grammar.
  Date,
}

impl Rule {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Required => "required",
      Self::Min => "min",
      Self::Email => "email",
      Self::Date => "date",
    }
  }
}

// ─── Messages ────────────────────────────────────────────────────────────────

/// User-facing message table, keyed by field then rule.
///
/// Lookups fall back to built-in defaults. In configuration files this is a
/// table of tables:
///
/// ```toml
/// [messages.name]
/// required = "Name is required"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct Messages {
  overrides: HashMap<String, HashMap<String, String>>,
}

impl Messages {
  /// Replace the message used for `field` failing `rule`.
  pub fn with_override(
    mut self,
    field: Field,
    rule: Rule,
    message: impl Into<String>,
  ) -> Self {
    self
      .overrides
      .entry(field.as_str().to_owned())
      .or_default()
      .insert(rule.as_str().to_owned(), message.into());
    self
  }

  pub fn message(&self, field: Field, rule: Rule) -> String {
    self
      .overrides
      .get(field.as_str())
      .and_then(|rules| rules.get(rule.as_str()))
      .cloned()
      .unwrap_or_else(|| default_message(field, rule))
  }
}

fn default_message(field: Field, rule: Rule) -> String {
  match (field, rule) {
    (Field::Name, Rule::Required) => "Ime je potrebno".to_owned(),
    (Field::Name, Rule::Min) => {
      format!("Ime mora imati minimum od {NAME_MIN_CHARS} slova!")
    }
    (f, Rule::Required) => format!("The {} field is required.", f.as_str()),
    (f, Rule::Min) => format!(
      "The {} must be at least {NAME_MIN_CHARS} characters.",
      f.as_str()
    ),
    (f, Rule::Email) => {
      format!("The {} must be a valid email address.", f.as_str())
    }
    (f, Rule::Date) => format!("The {} is not a valid date.", f.as_str()),
  }
}

// ─── Errors ──────────────────────────────────────────────────────────────────

/// One violated rule on one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
  pub field:   Field,
  pub rule:    Rule,
  pub message: String,
}

/// Every rule violation found in a payload. Never empty when returned from
/// [`validate`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("{} field rule(s) violated", .0.len())]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
  fn reject(&mut self, field: Field, rule: Rule, messages: &Messages) {
    self.0.push(FieldError {
      field,
      rule,
      message: messages.message(field, rule),
    });
  }

  pub fn is_empty(&self) -> bool { self.0.is_empty() }

  pub fn len(&self) -> usize { self.0.len() }

  pub fn iter(&self) -> impl Iterator<Item = &FieldError> { self.0.iter() }

  /// Whether `field` failed any rule.
  pub fn has(&self, field: Field) -> bool {
    self.0.iter().any(|e| e.field == field)
  }

  /// The rule `field` failed, if any.
  pub fn rule_for(&self, field: Field) -> Option<Rule> {
    self.0.iter().find(|e| e.field == field).map(|e| e.rule)
  }

  /// Field name → messages, in field order. This is the wire shape of the
  /// field-error set.
  pub fn to_map(&self) -> BTreeMap<&'static str, Vec<String>> {
    let mut map: BTreeMap<&'static str, Vec<String>> = BTreeMap::new();
    for e in &self.0 {
      map.entry(e.field.as_str()).or_default().push(e.message.clone());
    }
    map
  }
}

// ─── Validation ──────────────────────────────────────────────────────────────

/// Validate a raw payload.
///
/// Strings are trimmed before any rule runs. An absent, blank or non-string
/// field fails only `required`; shape rules run on present values.
pub fn validate(
  payload: &ContactPayload,
  messages: &Messages,
) -> Result<ContactFields, FieldErrors> {
  let mut errors = FieldErrors::default();

  let name = present(payload.name.as_ref());
  match name {
    None => errors.reject(Field::Name, Rule::Required, messages),
    Some(n) if n.chars().count() < NAME_MIN_CHARS => {
      errors.reject(Field::Name, Rule::Min, messages)
    }
    Some(_) => {}
  }

  let email = present(payload.email.as_ref());
  match email {
    None => errors.reject(Field::Email, Rule::Required, messages),
    Some(e) if !is_valid_email(e) => {
      errors.reject(Field::Email, Rule::Email, messages)
    }
    Some(_) => {}
  }

  let birthday = match present(payload.birthday.as_ref()) {
    None => {
      errors.reject(Field::Birthday, Rule::Required, messages);
      None
    }
    Some(raw) => match parse_birthday(raw) {
      Ok(date) => Some(date),
      Err(_) => {
        errors.reject(Field::Birthday, Rule::Date, messages);
        None
      }
    },
  };

  let company = present(payload.company.as_ref());
  if company.is_none() {
    errors.reject(Field::Company, Rule::Required, messages);
  }

  match (name, email, birthday, company) {
    (Some(name), Some(email), Some(birthday), Some(company))
      if errors.is_empty() =>
    {
      Ok(ContactFields {
        name: name.to_owned(),
        email: email.to_owned(),
        birthday,
        company: company.to_owned(),
      })
    }
    _ => Err(errors),
  }
}

/// The trimmed string value of a field, if it holds a non-blank string.
fn present(value: Option<&Value>) -> Option<&str> {
  value
    .and_then(Value::as_str)
    .map(str::trim)
    .filter(|v| !v.is_empty())
}

// ─── Email grammar ───────────────────────────────────────────────────────────

const LOCAL_PART_SPECIALS: &str = "!#$%&'*+-/=?^_`{|}~.";

/// `local@domain`, where the domain has at least two dot-separated labels.
/// Whitespace and quoted local parts are not accepted.
pub fn is_valid_email(address: &str) -> bool {
  match address.rsplit_once('@') {
    Some((local, domain)) => valid_local_part(local) && valid_domain(domain),
    None => false,
  }
}

fn valid_local_part(local: &str) -> bool {
  !local.is_empty()
    && local.len() <= 64
    && !local.starts_with('.')
    && !local.ends_with('.')
    && !local.contains("..")
    && local
      .chars()
      .all(|c| c.is_alphanumeric() || LOCAL_PART_SPECIALS.contains(c))
}

fn valid_domain(domain: &str) -> bool {
  let labels: Vec<&str> = domain.split('.').collect();
  labels.len() >= 2
    && labels.iter().all(|label| {
      (1..=63).contains(&label.chars().count())
        && !label.starts_with('-')
        && !label.ends_with('-')
        && label.chars().all(|c| c.is_alphanumeric() || c == '-')
    })
}
