// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use log::debug;
use once_cell::sync::Lazy;
use rusqlite::Connection;
use std::fs;
use std::path::PathBuf;

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Phoneledger", "phoneledger"));

pub const DB_ENV: &str = "PHONELEDGER_DB";

/// Resolves the database file: explicit path, then `PHONELEDGER_DB`, then the platform data dir.
pub fn db_path(explicit: Option<&str>) -> Result<PathBuf> {
    let from_env = std::env::var(DB_ENV).ok().filter(|s| !s.trim().is_empty());
    if let Some(p) = explicit.map(str::to_string).or(from_env) {
        let path = PathBuf::from(p.trim());
        if let Some(parent) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        return Ok(path);
    }
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("phoneledger.sqlite"))
}

pub fn open_or_init(explicit: Option<&str>) -> Result<Connection> {
    let path = db_path(explicit)?;
    debug!("opening database at {}", path.display());
    let conn =
        Connection::open(&path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&conn)?;
    Ok(conn)
}

/// Creates the tables if needed and seeds the single budget row at zero.
pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    CREATE TABLE IF NOT EXISTS budget(
        id INTEGER PRIMARY KEY CHECK (id = 1),
        total_money TEXT NOT NULL,
        created_at TEXT NOT NULL DEFAULT (datetime('now')),
        updated_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    INSERT OR IGNORE INTO budget(id, total_money) VALUES (1, '0');

    CREATE TABLE IF NOT EXISTS phones(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        model TEXT NOT NULL,
        brand TEXT NOT NULL,
        buy_price TEXT NOT NULL,
        sell_price TEXT,
        state TEXT NOT NULL DEFAULT 'bought' CHECK(state IN ('bought','sold','scammed')),
        notes TEXT,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_phones_state ON phones(state);
    "#,
    )?;
    Ok(())
}
