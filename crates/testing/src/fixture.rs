// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! SQLite files used as external databases in tests.

use std::{io, path::Path};

use rusqlite::Connection;

/// Creates (or extends) the SQLite file at `path` by running `script`.
pub fn sqlite_file(path: &Path, script: &str) -> io::Result<()> {
	let conn = Connection::open(path).map_err(io::Error::other)?;
	conn.execute_batch(script).map_err(io::Error::other)
}

/// Creates table `name` with a single `n INTEGER` column holding `0..rows`.
pub fn numbers_table(path: &Path, name: &str, rows: i64) -> io::Result<()> {
	let mut conn = Connection::open(path).map_err(io::Error::other)?;
	let tx = conn.transaction().map_err(io::Error::other)?;

	tx.execute_batch(&format!("CREATE TABLE \"{}\" (n INTEGER)", name.replace('"', "\"\"")))
		.map_err(io::Error::other)?;
	{
		let mut stmt = tx
			.prepare(&format!("INSERT INTO \"{}\" (n) VALUES (?1)", name.replace('"', "\"\"")))
			.map_err(io::Error::other)?;
		for n in 0..rows {
			stmt.execute([n]).map_err(io::Error::other)?;
		}
	}

	tx.commit().map_err(io::Error::other)
}
