// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Forward-only row iteration over a pull-based query result.

use attach_type::Value;
use tracing::trace;

use crate::{Result, interface::QueryResult, value::column::Columns};

/// Walks the rows of a [`QueryResult`] one at a time, fetching the next
/// batch whenever the current one is used up.
///
/// The iterator is live while it still owns its result. Once a fetch
/// returns nothing (or an empty batch) the result and batch are dropped
/// and the iterator never becomes live again.
pub struct QueryResultIterator<R: QueryResult> {
	result: Option<R>,
	chunk: Option<Columns>,
	row: usize,
	base_row: usize,
}

/// A row of the iterator's current batch, valid until the next advance.
#[derive(Debug, Clone, Copy)]
pub struct QueryResultRow<'a> {
	chunk: &'a Columns,
	row: usize,
}

impl<'a> QueryResultRow<'a> {
	pub fn get_value(&self, col: usize) -> &'a Value {
		self.chunk.get(self.row, col)
	}

	pub fn width(&self) -> usize {
		self.chunk.width()
	}

	pub fn to_vec(&self) -> Vec<Value> {
		self.chunk.row(self.row)
	}
}

impl<R: QueryResult> QueryResultIterator<R> {
	/// Positions the iterator on the first row of `result`. A missing or
	/// immediately exhausted result yields an iterator that is not live.
	pub fn new(result: Option<R>) -> Result<Self> {
		let mut iterator = Self {
			result,
			chunk: None,
			row: 0,
			base_row: 0,
		};
		iterator.load_next()?;
		Ok(iterator)
	}

	pub fn is_live(&self) -> bool {
		self.result.is_some()
	}

	pub fn current_row(&self) -> Option<QueryResultRow<'_>> {
		self.chunk.as_ref().map(|chunk| QueryResultRow {
			chunk,
			row: self.row,
		})
	}

	pub fn advance(&mut self) -> Result<()> {
		let Some(chunk) = &self.chunk else {
			return Ok(());
		};

		self.row += 1;
		if self.row >= chunk.size() {
			self.base_row += chunk.size();
			self.row = 0;
			self.load_next()?;
		}
		Ok(())
	}

	fn load_next(&mut self) -> Result<()> {
		let Some(result) = self.result.as_mut() else {
			self.chunk = None;
			return Ok(());
		};

		match result.fetch() {
			Ok(Some(chunk)) if chunk.size() > 0 => {
				self.chunk = Some(chunk);
				Ok(())
			}
			Ok(_) => {
				trace!(rows = self.base_row, "query result exhausted");
				self.exhaust();
				Ok(())
			}
			Err(err) => {
				self.exhaust();
				Err(err)
			}
		}
	}

	fn exhaust(&mut self) {
		self.base_row = 0;
		self.row = 0;
		self.result = None;
		self.chunk = None;
	}
}

#[cfg(test)]
mod tests {
	use attach_type::{Type, Value, error, error::diagnostic::internal::internal};

	use super::*;
	use crate::{memory::MemoryResult, value::column::ColumnDef};

	fn headers() -> Vec<ColumnDef> {
		vec![ColumnDef::new("n", Type::Int8)]
	}

	fn batch(values: &[i64]) -> Columns {
		Columns::from_rows(&headers(), values.iter().map(|v| vec![Value::int8(*v)]).collect())
	}

	fn drain<R: QueryResult>(iterator: &mut QueryResultIterator<R>) -> Vec<Value> {
		let mut values = Vec::new();
		while iterator.is_live() {
			values.push(iterator.current_row().unwrap().get_value(0).clone());
			iterator.advance().unwrap();
		}
		values
	}

	#[test]
	fn test_no_result_is_not_live() {
		let iterator = QueryResultIterator::<MemoryResult>::new(None).unwrap();
		assert!(!iterator.is_live());
		assert!(iterator.current_row().is_none());
	}

	#[test]
	fn test_immediately_exhausted_is_not_live() {
		let result = MemoryResult::from_batches(headers(), vec![]);
		let iterator = QueryResultIterator::new(Some(result)).unwrap();
		assert!(!iterator.is_live());
	}

	#[test]
	fn test_empty_first_batch_is_not_live() {
		let result = MemoryResult::from_batches(headers(), vec![batch(&[]), batch(&[1])]);
		let iterator = QueryResultIterator::new(Some(result)).unwrap();
		assert!(!iterator.is_live());
	}

	#[test]
	fn test_crosses_batch_boundaries() {
		let result = MemoryResult::from_batches(headers(), vec![batch(&[1, 2]), batch(&[3]), batch(&[4, 5])]);
		let mut iterator = QueryResultIterator::new(Some(result)).unwrap();
		assert_eq!(
			drain(&mut iterator),
			vec![Value::int8(1), Value::int8(2), Value::int8(3), Value::int8(4), Value::int8(5)]
		);
	}

	#[test]
	fn test_empty_batch_ends_iteration() {
		let result = MemoryResult::from_batches(headers(), vec![batch(&[1]), batch(&[]), batch(&[2])]);
		let mut iterator = QueryResultIterator::new(Some(result)).unwrap();
		assert_eq!(drain(&mut iterator), vec![Value::int8(1)]);
	}

	#[test]
	fn test_exhaustion_is_terminal() {
		let result = MemoryResult::from_batches(headers(), vec![batch(&[1])]);
		let mut iterator = QueryResultIterator::new(Some(result)).unwrap();
		iterator.advance().unwrap();
		assert!(!iterator.is_live());

		for _ in 0..3 {
			iterator.advance().unwrap();
			assert!(!iterator.is_live());
			assert!(iterator.current_row().is_none());
		}
	}

	#[test]
	fn test_row_to_vec() {
		let headers = vec![ColumnDef::new("a", Type::Int8), ColumnDef::new("b", Type::Utf8)];
		let chunk = Columns::from_rows(&headers, vec![vec![Value::int8(1), Value::utf8("x")]]);
		let result = MemoryResult::from_batches(headers, vec![chunk]);
		let iterator = QueryResultIterator::new(Some(result)).unwrap();
		let row = iterator.current_row().unwrap();
		assert_eq!(row.width(), 2);
		assert_eq!(row.to_vec(), vec![Value::int8(1), Value::utf8("x")]);
	}

	struct FailingResult {
		headers: Vec<ColumnDef>,
		calls: usize,
	}

	impl QueryResult for FailingResult {
		fn headers(&self) -> &[ColumnDef] {
			&self.headers
		}

		fn fetch(&mut self) -> Result<Option<Columns>> {
			self.calls += 1;
			if self.calls == 1 {
				Ok(Some(Columns::from_rows(&self.headers, vec![vec![Value::int8(1)]])))
			} else {
				Err(error!(internal("disk went away")))
			}
		}
	}

	#[test]
	fn test_fetch_error_is_terminal() {
		let result = FailingResult {
			headers: headers(),
			calls: 0,
		};
		let mut iterator = QueryResultIterator::new(Some(result)).unwrap();
		assert!(iterator.is_live());

		let err = iterator.advance().unwrap_err();
		assert_eq!(err.code(), "INTERNAL_ERROR");
		assert!(!iterator.is_live());
		iterator.advance().unwrap();
	}
}
