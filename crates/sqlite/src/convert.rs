// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use attach_type::Value;
use rusqlite::types::ValueRef;

/// Converts a stored value. TEXT that is not valid UTF-8 is kept as a blob
/// so its bytes survive unchanged.
pub(crate) fn from_sqlite(value: ValueRef<'_>) -> Value {
	match value {
		ValueRef::Null => Value::Undefined,
		ValueRef::Integer(v) => Value::Int8(v),
		ValueRef::Real(v) => Value::float8(v),
		ValueRef::Text(v) => match std::str::from_utf8(v) {
			Ok(text) => Value::Utf8(text.to_string()),
			Err(_) => Value::blob(v.to_vec()),
		},
		ValueRef::Blob(v) => Value::blob(v.to_vec()),
	}
}

/// Reads every column of `row`, skipping the first `offset` columns.
pub(crate) fn row_values(row: &rusqlite::Row<'_>, offset: usize, width: usize) -> rusqlite::Result<Vec<Value>> {
	let mut values = Vec::with_capacity(width);
	for idx in 0..width {
		values.push(from_sqlite(row.get_ref(offset + idx)?));
	}
	Ok(values)
}
