// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::path::Path;

use attach_type::{
	Error, Result, error,
	error::{ExternalError, diagnostic::internal::internal},
};
use rusqlite::Connection;

use crate::config::{DbPath, OpenFlags};

/// Opens `path` and makes sure it really is a database, so an unusable
/// file fails here rather than on the first read.
pub(crate) fn connect(path: &Path, flags: OpenFlags) -> Result<Connection> {
	let unreachable = |reason: String| -> Error {
		error!(ExternalError::SourceUnreachable {
			path: path.display().to_string(),
			reason,
		})
	};

	let conn = Connection::open_with_flags(path, flags.to_rusqlite()).map_err(|e| unreachable(e.to_string()))?;

	conn.query_row("PRAGMA schema_version", [], |row| row.get::<_, i64>(0))
		.map_err(|e| unreachable(e.to_string()))?;

	Ok(conn)
}

pub(crate) fn connect_session(path: &DbPath, flags: OpenFlags) -> Result<Connection> {
	match path {
		DbPath::File(path) => connect(path, flags),
		DbPath::Memory => Connection::open_in_memory()
			.map_err(|e| error!(internal(format!("Failed to open in-memory database: {}", e)))),
	}
}

pub(crate) fn engine_error(context: &str, err: rusqlite::Error) -> Error {
	error!(internal(format!("{}: {}", context, err)))
}
