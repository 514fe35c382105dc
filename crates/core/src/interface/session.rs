// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use attach_type::Value;

use crate::{
	Result,
	value::column::{ColumnDef, Columns},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewDef {
	pub name: String,
	/// Replace a view of the same name in the same scope.
	pub overwrite: bool,
	/// Scope the view to the session instead of persisting it.
	pub temporary: bool,
}

/// Fully materialized, row-major set of values.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValueSet {
	pub headers: Vec<ColumnDef>,
	pub rows: Vec<Vec<Value>>,
}

impl ValueSet {
	pub fn new(headers: Vec<ColumnDef>) -> Self {
		Self {
			headers,
			rows: Vec::new(),
		}
	}

	/// Appends every valid row of `batch`, keeping row order.
	pub fn append(&mut self, batch: &Columns) {
		self.rows.reserve(batch.size());
		for row in 0..batch.size() {
			let mut values = Vec::with_capacity(self.headers.len());
			for col in 0..self.headers.len() {
				values.push(batch.get(row, col).clone());
			}
			self.rows.push(values);
		}
	}

	pub fn len(&self) -> usize {
		self.rows.len()
	}

	pub fn is_empty(&self) -> bool {
		self.rows.is_empty()
	}

	pub fn column_names(&self) -> Vec<&str> {
		self.headers.iter().map(|h| h.name.as_str()).collect()
	}
}

/// The execution context views are published into.
pub trait Session {
	fn create_view(&mut self, def: ViewDef, values: ValueSet) -> Result<()>;

	/// Reads a view back, a temporary view shadows a persistent one.
	fn view(&self, name: &str) -> Result<Option<ValueSet>>;

	fn drop_view(&mut self, name: &str, temporary: bool) -> Result<bool>;
}
