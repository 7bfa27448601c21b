//! SQL schema for the Docket SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS correspondents (
    correspondent_id TEXT PRIMARY KEY,
    name             TEXT NOT NULL
);

-- Artifact paths are derived from document_id and mime_type; never stored.
CREATE TABLE IF NOT EXISTS documents (
    document_id      TEXT PRIMARY KEY,
    correspondent_id TEXT REFERENCES correspondents(correspondent_id)
                          ON DELETE SET NULL,
    title            TEXT NOT NULL,
    content          TEXT NOT NULL DEFAULT '',
    checksum         TEXT NOT NULL,
    mime_type        TEXT NOT NULL,
    created          TEXT NOT NULL,   -- ISO 8601 UTC
    storage_type     TEXT NOT NULL DEFAULT 'unencrypted'
);

CREATE INDEX IF NOT EXISTS documents_correspondent_idx
    ON documents(correspondent_id);

PRAGMA user_version = 1;
";
