//! SQL schema for the imenik SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS principals (
    principal_id TEXT PRIMARY KEY,
    name         TEXT NOT NULL,
    token_hash   TEXT NOT NULL UNIQUE,  -- hex SHA-256 of the API token
    created_at   TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS contacts (
    contact_id TEXT PRIMARY KEY,
    owner_id   TEXT NOT NULL REFERENCES principals(principal_id) ON DELETE CASCADE,
    name       TEXT NOT NULL CHECK (name    != ''),
    email      TEXT NOT NULL CHECK (email   != ''),
    birthday   TEXT NOT NULL,                      -- YYYY-MM-DD
    company    TEXT NOT NULL CHECK (company != ''),
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS contacts_owner_idx ON contacts(owner_id);

PRAGMA user_version = 1;
";
