// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Column types that can cross from a source database into a session.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Type {
	/// A boolean: true or false.
	Boolean,
	/// An 8-byte signed integer
	Int8,
	/// An 8-byte floating point
	Float8,
	/// A UTF-8 encoded text.
	Utf8,
	/// A binary large object (BLOB)
	Blob,
	/// Dynamically typed, every row may carry a different value type
	Any,
	/// Value is not defined (think null in common programming languages)
	Undefined,
}

impl Type {
	/// Maps a declared SQL column type onto a [`Type`] following the
	/// column affinity rules of SQLite.
	pub fn from_declared(declared: &str) -> Self {
		let declared = declared.to_ascii_uppercase();

		if declared.contains("INT") {
			return Type::Int8;
		}
		if declared.contains("CHAR") || declared.contains("CLOB") || declared.contains("TEXT") {
			return Type::Utf8;
		}
		if declared.contains("BLOB") {
			return Type::Blob;
		}
		if declared.contains("REAL") || declared.contains("FLOA") || declared.contains("DOUB") {
			return Type::Float8;
		}
		if declared.contains("BOOL") {
			return Type::Boolean;
		}
		Type::Any
	}

	/// Whether a value of type `other` may be stored in a column of this type.
	pub fn accepts(&self, other: Type) -> bool {
		*self == Type::Any || other == Type::Undefined || *self == other
	}
}

impl Display for Type {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Type::Boolean => f.write_str("BOOLEAN"),
			Type::Int8 => f.write_str("INT8"),
			Type::Float8 => f.write_str("FLOAT8"),
			Type::Utf8 => f.write_str("UTF8"),
			Type::Blob => f.write_str("BLOB"),
			Type::Any => f.write_str("ANY"),
			Type::Undefined => f.write_str("UNDEFINED"),
		}
	}
}
