// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::ops::Deref;

use attach_type::Value;

use crate::value::column::{Column, ColumnDef};

/// A fixed-capacity, columnar batch of rows.
///
/// Every column holds `capacity` slots, of which the first `size` are
/// valid. A batch fetched from a result is full (`size == capacity`),
/// an output buffer handed to a producer starts empty and is filled
/// through [`Columns::set_value`] and [`Columns::set_cardinality`].
#[derive(Debug, Clone, PartialEq)]
pub struct Columns {
	columns: Vec<Column>,
	capacity: usize,
	size: usize,
}

impl Deref for Columns {
	type Target = [Column];

	fn deref(&self) -> &Self::Target {
		&self.columns
	}
}

impl Columns {
	pub fn with_capacity(defs: &[ColumnDef], capacity: usize) -> Self {
		let columns = defs
			.iter()
			.map(|def| Column {
				def: def.clone(),
				data: vec![Value::Undefined; capacity],
			})
			.collect();

		Self {
			columns,
			capacity,
			size: 0,
		}
	}

	pub fn empty(defs: &[ColumnDef]) -> Self {
		Self::with_capacity(defs, 0)
	}

	/// Builds a full batch from row-major values.
	pub fn from_rows(defs: &[ColumnDef], rows: Vec<Vec<Value>>) -> Self {
		let size = rows.len();
		let mut columns: Vec<Column> = defs
			.iter()
			.map(|def| Column {
				def: def.clone(),
				data: Vec::with_capacity(size),
			})
			.collect();

		for row in rows {
			assert_eq!(row.len(), defs.len(), "row length does not match column count");
			for (idx, value) in row.into_iter().enumerate() {
				columns[idx].data.push(value);
			}
		}

		Self {
			columns,
			capacity: size,
			size,
		}
	}

	pub fn headers(&self) -> Vec<ColumnDef> {
		self.columns.iter().map(|c| c.def.clone()).collect()
	}

	pub fn size(&self) -> usize {
		self.size
	}

	pub fn capacity(&self) -> usize {
		self.capacity
	}

	pub fn width(&self) -> usize {
		self.columns.len()
	}

	pub fn is_empty(&self) -> bool {
		self.size == 0
	}

	pub fn is_full(&self) -> bool {
		self.size == self.capacity
	}

	pub fn get(&self, row: usize, col: usize) -> &Value {
		assert!(row < self.size, "row {} out of bounds for batch of size {}", row, self.size);
		&self.columns[col].data[row]
	}

	pub fn set_value(&mut self, col: usize, row: usize, value: Value) {
		assert!(row < self.capacity, "row {} out of bounds for batch of capacity {}", row, self.capacity);
		self.columns[col].data[row] = value;
	}

	pub fn set_cardinality(&mut self, size: usize) {
		assert!(size <= self.capacity, "cardinality {} exceeds capacity {}", size, self.capacity);
		self.size = size;
	}

	/// Marks the batch empty and releases the values of the previous fill.
	pub fn reset(&mut self) {
		for column in &mut self.columns {
			for slot in column.data.iter_mut().take(self.size) {
				*slot = Value::Undefined;
			}
		}
		self.size = 0;
	}

	pub fn row(&self, row: usize) -> Vec<Value> {
		(0..self.width()).map(|col| self.get(row, col).clone()).collect()
	}

	pub fn rows(&self) -> impl Iterator<Item = Vec<Value>> + '_ {
		(0..self.size).map(|row| self.row(row))
	}

	pub fn column(&self, name: &str) -> Option<&Column> {
		self.columns.iter().find(|c| c.name() == name)
	}

	/// The valid values of one column.
	pub fn values(&self, col: usize) -> &[Value] {
		&self.columns[col].data[..self.size]
	}

	pub fn into_rows(self) -> Vec<Vec<Value>> {
		let size = self.size;
		let width = self.columns.len();
		let mut rows: Vec<Vec<Value>> = (0..size).map(|_| Vec::with_capacity(width)).collect();

		for column in self.columns {
			for (row, value) in column.data.into_iter().take(size).enumerate() {
				rows[row].push(value);
			}
		}
		rows
	}
}
