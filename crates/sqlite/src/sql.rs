// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::Write;

use attach_core::interface::{ValueSet, ViewDef};
use attach_type::Value;

pub(crate) fn quote_identifier(name: &str) -> String {
	format!("\"{}\"", name.replace('"', "\"\""))
}

pub(crate) fn literal(value: &Value) -> String {
	match value {
		Value::Undefined => "NULL".to_string(),
		Value::Boolean(true) => "TRUE".to_string(),
		Value::Boolean(false) => "FALSE".to_string(),
		// the positive half of i64::MIN does not fit an integer literal
		Value::Int8(i64::MIN) => format!("({} - 1)", i64::MIN + 1),
		Value::Int8(v) => v.to_string(),
		Value::Float8(v) => {
			let v = v.value();
			if v.is_infinite() {
				if v > 0.0 { "9e999".to_string() } else { "-9e999".to_string() }
			} else {
				// Debug keeps the shortest representation that parses back exactly
				format!("{:?}", v)
			}
		}
		Value::Utf8(v) => format!("'{}'", v.replace('\'', "''")),
		Value::Blob(v) => format!("X'{}'", v.to_hex()),
	}
}

/// `CREATE VIEW` statement that embeds all values of `values`.
pub(crate) fn create_view(def: &ViewDef, values: &ValueSet) -> String {
	let mut sql = String::new();

	if def.temporary {
		let _ = write!(sql, "CREATE TEMP VIEW {}", quote_identifier(&def.name));
	} else {
		let _ = write!(sql, "CREATE VIEW main.{}", quote_identifier(&def.name));
	}

	let columns: Vec<String> = values.headers.iter().map(|h| quote_identifier(&h.name)).collect();
	let _ = write!(sql, " ({}) AS ", columns.join(", "));

	if values.rows.is_empty() {
		let nulls = vec!["NULL"; columns.len()];
		let _ = write!(sql, "SELECT {} WHERE 0", nulls.join(", "));
		return sql;
	}

	sql.push_str("VALUES ");
	for (idx, row) in values.rows.iter().enumerate() {
		if idx > 0 {
			sql.push_str(", ");
		}
		let row: Vec<String> = row.iter().map(literal).collect();
		let _ = write!(sql, "({})", row.join(", "));
	}
	sql
}

#[cfg(test)]
mod tests {
	use attach_core::value::column::ColumnDef;
	use attach_type::Type;

	use super::*;

	#[test]
	fn test_quote_identifier() {
		assert_eq!(quote_identifier("users"), "\"users\"");
		assert_eq!(quote_identifier("we\"ird"), "\"we\"\"ird\"");
	}

	#[test]
	fn test_literal() {
		assert_eq!(literal(&Value::Undefined), "NULL");
		assert_eq!(literal(&Value::bool(true)), "TRUE");
		assert_eq!(literal(&Value::int8(-7)), "-7");
		assert_eq!(literal(&Value::int8(i64::MIN)), "(-9223372036854775807 - 1)");
		assert_eq!(literal(&Value::float8(1.0)), "1.0");
		assert_eq!(literal(&Value::float8(0.1)), "0.1");
		assert_eq!(literal(&Value::float8(f64::NEG_INFINITY)), "-9e999");
		assert_eq!(literal(&Value::utf8("it's")), "'it''s'");
		assert_eq!(literal(&Value::blob(vec![0xca, 0xfe])), "X'cafe'");
	}

	#[test]
	fn test_create_view_with_rows() {
		let def = ViewDef {
			name: "t".to_string(),
			overwrite: false,
			temporary: false,
		};
		let values = ValueSet {
			headers: vec![ColumnDef::new("a", Type::Int8), ColumnDef::new("b", Type::Utf8)],
			rows: vec![vec![Value::int8(1), Value::utf8("x")], vec![Value::int8(2), Value::Undefined]],
		};
		assert_eq!(
			create_view(&def, &values),
			"CREATE VIEW main.\"t\" (\"a\", \"b\") AS VALUES (1, 'x'), (2, NULL)"
		);
	}

	#[test]
	fn test_create_temporary_empty_view() {
		let def = ViewDef {
			name: "t".to_string(),
			overwrite: false,
			temporary: true,
		};
		let values = ValueSet::new(vec![ColumnDef::new("a", Type::Int8), ColumnDef::new("b", Type::Utf8)]);
		assert_eq!(create_view(&def, &values), "CREATE TEMP VIEW \"t\" (\"a\", \"b\") AS SELECT NULL, NULL WHERE 0");
	}
}
