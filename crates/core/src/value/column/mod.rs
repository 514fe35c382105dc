// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use attach_type::{Type, Value};

pub mod columns;

pub use columns::Columns;

/// Name and type of one column of a result or view.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnDef {
	pub name: String,
	pub ty: Type,
}

impl ColumnDef {
	pub fn new(name: impl Into<String>, ty: Type) -> Self {
		Self {
			name: name.into(),
			ty,
		}
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
	pub(crate) def: ColumnDef,
	pub(crate) data: Vec<Value>,
}

impl Column {
	pub fn name(&self) -> &str {
		&self.def.name
	}

	pub fn get_type(&self) -> Type {
		self.def.ty
	}

	pub fn def(&self) -> &ColumnDef {
		&self.def
	}
}
