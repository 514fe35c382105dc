// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use attach_core::{
	interface::{Session, ValueSet, ViewDef},
	value::column::ColumnDef,
};
use attach_type::{
	Result, Type,
	error::{ExternalError, diagnostic::external::CatalogObjectKind},
	return_error,
};
use rusqlite::{Connection, OptionalExtension, params};
use tracing::{debug, instrument};

use crate::{
	SessionConfig,
	connection::{connect_session, engine_error},
	convert::row_values,
	sql::{create_view, quote_identifier},
};

fn schema(temporary: bool) -> &'static str {
	if temporary { "temp" } else { "main" }
}

/// A session backed by a SQLite connection. Persistent views land in the
/// `main` schema, temporary views in `temp` and vanish with the session.
///
/// SQLite stores no declared types for view columns, so views read back
/// through [`Session::view`] carry [`Type::Any`] headers and booleans come
/// back as integers.
pub struct SqliteSession {
	conn: Connection,
}

impl SqliteSession {
	pub fn open(config: SessionConfig) -> Result<Self> {
		let conn = connect_session(&config.path, config.flags)?;
		Ok(Self {
			conn,
		})
	}

	pub fn in_memory() -> Result<Self> {
		Self::open(SessionConfig::memory())
	}

	pub fn execute_batch(&self, sql: &str) -> Result<()> {
		self.conn.execute_batch(sql).map_err(|e| engine_error("Failed to execute", e))
	}

	/// Runs `sql` and collects every row it returns.
	pub fn query(&self, sql: &str) -> Result<ValueSet> {
		let mut stmt = self.conn.prepare(sql).map_err(|e| engine_error("Failed to prepare", e))?;
		let headers: Vec<ColumnDef> =
			stmt.column_names().into_iter().map(|name| ColumnDef::new(name, Type::Any)).collect();
		let width = headers.len();

		let rows = stmt
			.query_map([], |row| row_values(row, 0, width))
			.map_err(|e| engine_error("Failed to query", e))?
			.collect::<rusqlite::Result<Vec<_>>>()
			.map_err(|e| engine_error("Failed to read", e))?;

		Ok(ValueSet {
			headers,
			rows,
		})
	}

	/// Kind of the catalog object called `name` in the given scope.
	fn object_kind(&self, name: &str, temporary: bool) -> Result<Option<CatalogObjectKind>> {
		let sql = format!(
			"SELECT type FROM {}.sqlite_master WHERE type IN ('table', 'view') AND name = ?1 COLLATE NOCASE",
			schema(temporary)
		);

		let kind = self
			.conn
			.query_row(&sql, params![name], |row| row.get::<_, String>(0))
			.optional()
			.map_err(|e| engine_error("Failed to read catalog", e))?;

		Ok(kind.map(|kind| match kind.as_str() {
			"view" => CatalogObjectKind::View,
			_ => CatalogObjectKind::Table,
		}))
	}
}

impl Session for SqliteSession {
	#[instrument(level = "trace", skip_all, name = "sqlite::session::create_view", fields(view = %def.name))]
	fn create_view(&mut self, def: ViewDef, values: ValueSet) -> Result<()> {
		let existing = self.object_kind(&def.name, def.temporary)?;

		match existing {
			Some(CatalogObjectKind::Table) => {
				return_error!(ExternalError::NamingConflict {
					name: def.name,
					kind: CatalogObjectKind::Table,
					temporary: def.temporary,
				});
			}
			Some(CatalogObjectKind::View) if !def.overwrite => {
				return_error!(ExternalError::NamingConflict {
					name: def.name,
					kind: CatalogObjectKind::View,
					temporary: def.temporary,
				});
			}
			_ => {}
		}

		let tx = self.conn.transaction().map_err(|e| engine_error("Failed to begin", e))?;
		if existing.is_some() {
			let drop = format!("DROP VIEW {}.{}", schema(def.temporary), quote_identifier(&def.name));
			tx.execute_batch(&drop).map_err(|e| engine_error("Failed to drop view", e))?;
		}
		tx.execute_batch(&create_view(&def, &values)).map_err(|e| engine_error("Failed to create view", e))?;
		tx.commit().map_err(|e| engine_error("Failed to commit", e))?;

		debug!(temporary = def.temporary, rows = values.len(), replaced = existing.is_some(), "create view");
		Ok(())
	}

	fn view(&self, name: &str) -> Result<Option<ValueSet>> {
		for temporary in [true, false] {
			if self.object_kind(name, temporary)? == Some(CatalogObjectKind::View) {
				let sql = format!("SELECT * FROM {}.{}", schema(temporary), quote_identifier(name));
				return self.query(&sql).map(Some);
			}
		}
		Ok(None)
	}

	fn drop_view(&mut self, name: &str, temporary: bool) -> Result<bool> {
		if self.object_kind(name, temporary)? != Some(CatalogObjectKind::View) {
			return Ok(false);
		}

		let sql = format!("DROP VIEW {}.{}", schema(temporary), quote_identifier(name));
		self.conn.execute_batch(&sql).map_err(|e| engine_error("Failed to drop view", e))?;
		Ok(true)
	}
}
