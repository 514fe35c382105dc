// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	path::{Path, PathBuf},
	sync::Arc,
};

use attach_core::{
	interface::{Connection, Database, Driver, QueryResult},
	value::column::ColumnDef,
};
use attach_type::{
	Error, Result, Type, error,
	error::{ExternalError, diagnostic::internal::internal},
	return_error,
};
use parking_lot::Mutex;
use rusqlite::{OptionalExtension, params};
use tracing::{debug, instrument};

use crate::{
	OpenFlags, SqliteConfig,
	connection::{connect, engine_error},
	scan::SqliteScan,
	sql::quote_identifier,
};

/// Names SQLite resolves to the rowid unless a column shadows them.
const ROWID_ALIASES: [&str; 3] = ["rowid", "_rowid_", "oid"];

/// Opens SQLite files as external databases.
#[derive(Debug, Clone, Default)]
pub struct SqliteDriver {
	config: SqliteConfig,
}

impl SqliteDriver {
	pub fn new(config: SqliteConfig) -> Self {
		Self {
			config,
		}
	}

	pub fn config(&self) -> &SqliteConfig {
		&self.config
	}
}

impl Driver for SqliteDriver {
	fn open(&self, path: &str) -> Result<Box<dyn Database>> {
		Ok(Box::new(SqliteDatabase::open(path, self.config.clone())?))
	}

	fn library_version(&self) -> String {
		rusqlite::version().to_string()
	}
}

#[derive(Debug, Clone)]
pub struct SqliteDatabase {
	path: String,
	file: PathBuf,
	config: SqliteConfig,
}

impl SqliteDatabase {
	/// Opens the file at `path`, failing when it is missing or not a database.
	#[instrument(level = "debug", skip(config), name = "sqlite::database::open")]
	pub fn open(path: &str, config: SqliteConfig) -> Result<Self> {
		let file = PathBuf::from(path);
		connect(&file, config.flags)?;
		debug!(path, "opened external database");

		Ok(Self {
			path: path.to_string(),
			file,
			config,
		})
	}

	pub fn file(&self) -> &Path {
		&self.file
	}
}

impl Database for SqliteDatabase {
	fn path(&self) -> &str {
		&self.path
	}

	fn connect(&self) -> Result<Box<dyn Connection>> {
		let conn = connect(&self.file, self.config.flags)?;
		Ok(Box::new(SqliteConnection {
			path: self.path.clone(),
			file: self.file.clone(),
			flags: self.config.flags,
			conn: Arc::new(Mutex::new(conn)),
			batch_size: self.config.batch_size,
		}))
	}
}

pub struct SqliteConnection {
	path: String,
	file: PathBuf,
	flags: OpenFlags,
	conn: Arc<Mutex<rusqlite::Connection>>,
	batch_size: usize,
}

impl SqliteConnection {
	fn not_found(&self, target: &str) -> Error {
		error!(ExternalError::TargetNotFound {
			path: self.path.clone(),
			target: target.to_string(),
		})
	}

	/// Catalog name and type of the table or view `name` resolves to.
	fn resolve(&self, name: &str) -> Result<Option<(String, String)>> {
		let conn = self.conn.lock();
		conn.query_row(
			"SELECT name, type FROM sqlite_master WHERE type IN ('table', 'view') AND name = ?1 COLLATE NOCASE",
			params![name],
			|row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)),
		)
		.optional()
		.map_err(|e| engine_error("Failed to read catalog", e))
	}

	fn table_headers(&self, name: &str) -> Result<Vec<ColumnDef>> {
		let conn = self.conn.lock();
		let mut stmt = conn
			.prepare("SELECT name, type FROM pragma_table_info(?1) ORDER BY cid")
			.map_err(|e| engine_error("Failed to prepare table info", e))?;

		let headers = stmt
			.query_map(params![name], |row| {
				let column: String = row.get(0)?;
				let declared: String = row.get(1)?;
				Ok(ColumnDef::new(column, Type::from_declared(&declared)))
			})
			.map_err(|e| engine_error("Failed to read table info", e))?
			.collect::<rusqlite::Result<Vec<_>>>()
			.map_err(|e| engine_error("Failed to read table info", e))?;

		Ok(headers)
	}

	/// First rowid alias the table answers to, `None` for tables without a rowid.
	fn rowid_alias(&self, source: &str, headers: &[ColumnDef]) -> Option<&'static str> {
		let conn = self.conn.lock();
		ROWID_ALIASES.into_iter().find(|alias| {
			let shadowed = headers.iter().any(|h| h.name.eq_ignore_ascii_case(alias));
			!shadowed && conn.prepare(&format!("SELECT {alias} FROM {source} LIMIT 0")).is_ok()
		})
	}
}

/// SQLite reports unknown tables and views alike as `no such table: <name>`.
fn is_missing_table(err: &rusqlite::Error) -> bool {
	err.sqlite_error_code() == Some(rusqlite::ErrorCode::Unknown) && err.to_string().starts_with("no such table")
}

impl Connection for SqliteConnection {
	#[instrument(level = "trace", skip(self), name = "sqlite::connection::table")]
	fn table(&mut self, name: &str) -> Result<Box<dyn QueryResult>> {
		let Some((name, kind)) = self.resolve(name)? else {
			return Err(self.not_found(name));
		};

		let headers = self.table_headers(&name)?;
		if headers.is_empty() {
			return Err(self.not_found(&name));
		}

		let source = quote_identifier(&name);
		let columns = headers.iter().map(|h| quote_identifier(&h.name)).collect::<Vec<_>>().join(", ");

		let rowid = if kind == "table" {
			self.rowid_alias(&source, &headers)
		} else {
			None
		};

		let scan = match rowid {
			Some(rowid) => {
				SqliteScan::rowid(self.conn.clone(), headers, &source, rowid, &columns, self.batch_size)
			}
			None => {
				debug!(table = %name, "no rowid, streaming");
				let sql = format!("SELECT {columns} FROM {source}");
				SqliteScan::stream(&self.file, self.flags, headers, sql, self.batch_size)?
			}
		};

		Ok(Box::new(scan))
	}

	#[instrument(level = "trace", skip(self), name = "sqlite::connection::query")]
	fn query(&mut self, sql: &str) -> Result<Box<dyn QueryResult>> {
		let sql = sql.trim().trim_end_matches(';').trim_end();

		let headers = {
			let conn = self.conn.lock();
			let stmt = match conn.prepare(sql) {
				Ok(stmt) => stmt,
				Err(err) if is_missing_table(&err) => {
					debug!(error = %err, "query does not resolve");
					return Err(self.not_found(sql));
				}
				Err(err) => return Err(engine_error("Failed to prepare query", err)),
			};

			if !stmt.readonly() || stmt.column_count() == 0 {
				return_error!(internal(format!("query does not return rows: {}", sql)));
			}

			stmt.column_names().into_iter().map(|name| ColumnDef::new(name, Type::Any)).collect::<Vec<_>>()
		};

		Ok(Box::new(SqliteScan::stream(&self.file, self.flags, headers, sql.to_string(), self.batch_size)?))
	}

	fn tables(&mut self) -> Result<Vec<String>> {
		let conn = self.conn.lock();
		let mut stmt = conn
			.prepare(
				"SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY rowid",
			)
			.map_err(|e| engine_error("Failed to prepare catalog query", e))?;

		let tables = stmt
			.query_map([], |row| row.get::<_, String>(0))
			.map_err(|e| engine_error("Failed to read catalog", e))?
			.collect::<rusqlite::Result<Vec<_>>>()
			.map_err(|e| engine_error("Failed to read catalog", e))?;

		Ok(tables)
	}
}
