// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{collections::VecDeque, sync::Arc};

use attach_type::{
	Value,
	error::{ExternalError, diagnostic::internal::internal},
	return_error,
};
use indexmap::IndexMap;
use parking_lot::RwLock;

use crate::{
	Result, STANDARD_VECTOR_SIZE,
	interface::{Connection, Database, Driver, QueryResult},
	value::column::{ColumnDef, Columns},
};

/// A result that hands out prepared batches in order.
pub struct MemoryResult {
	headers: Vec<ColumnDef>,
	batches: VecDeque<Columns>,
}

impl MemoryResult {
	pub fn new(headers: Vec<ColumnDef>, rows: Vec<Vec<Value>>, batch_size: usize) -> Self {
		let batch_size = batch_size.max(1);
		let mut batches = VecDeque::new();
		let mut rows = rows.into_iter().peekable();

		while rows.peek().is_some() {
			let chunk: Vec<Vec<Value>> = rows.by_ref().take(batch_size).collect();
			batches.push_back(Columns::from_rows(&headers, chunk));
		}

		Self {
			headers,
			batches,
		}
	}

	pub fn from_batches(headers: Vec<ColumnDef>, batches: Vec<Columns>) -> Self {
		Self {
			headers,
			batches: batches.into(),
		}
	}
}

impl QueryResult for MemoryResult {
	fn headers(&self) -> &[ColumnDef] {
		&self.headers
	}

	fn fetch(&mut self) -> Result<Option<Columns>> {
		Ok(self.batches.pop_front())
	}
}

#[derive(Debug, Clone, Default)]
struct MemoryTable {
	headers: Vec<ColumnDef>,
	rows: Vec<Vec<Value>>,
}

/// A database living in process memory, shared between its clones.
#[derive(Clone)]
pub struct MemoryDatabase {
	path: String,
	batch_size: usize,
	tables: Arc<RwLock<IndexMap<String, MemoryTable>>>,
}

impl MemoryDatabase {
	pub fn new(path: impl Into<String>) -> Self {
		Self {
			path: path.into(),
			batch_size: STANDARD_VECTOR_SIZE,
			tables: Arc::new(RwLock::new(IndexMap::new())),
		}
	}

	/// Rows handed out per fetch.
	pub fn with_batch_size(mut self, batch_size: usize) -> Self {
		self.batch_size = batch_size.max(1);
		self
	}

	pub fn create_table(&self, name: impl Into<String>, headers: Vec<ColumnDef>, rows: Vec<Vec<Value>>) {
		self.tables.write().insert(
			name.into(),
			MemoryTable {
				headers,
				rows,
			},
		);
	}
}

impl Database for MemoryDatabase {
	fn path(&self) -> &str {
		&self.path
	}

	fn connect(&self) -> Result<Box<dyn Connection>> {
		Ok(Box::new(MemoryConnection {
			database: self.clone(),
		}))
	}
}

pub struct MemoryConnection {
	database: MemoryDatabase,
}

impl Connection for MemoryConnection {
	fn table(&mut self, name: &str) -> Result<Box<dyn QueryResult>> {
		let tables = self.database.tables.read();
		let Some(table) = tables.get(name) else {
			return_error!(ExternalError::TargetNotFound {
				path: self.database.path.clone(),
				target: name.to_string(),
			});
		};

		Ok(Box::new(MemoryResult::new(table.headers.clone(), table.rows.clone(), self.database.batch_size)))
	}

	fn query(&mut self, _sql: &str) -> Result<Box<dyn QueryResult>> {
		return_error!(internal("memory databases do not execute queries"))
	}

	fn tables(&mut self) -> Result<Vec<String>> {
		Ok(self.database.tables.read().keys().cloned().collect())
	}
}

/// Resolves paths against databases registered up front.
#[derive(Clone, Default)]
pub struct MemoryDriver {
	databases: Arc<RwLock<IndexMap<String, MemoryDatabase>>>,
}

impl MemoryDriver {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn register(&self, database: MemoryDatabase) {
		self.databases.write().insert(database.path.clone(), database);
	}
}

impl Driver for MemoryDriver {
	fn open(&self, path: &str) -> Result<Box<dyn Database>> {
		match self.databases.read().get(path) {
			Some(database) => Ok(Box::new(database.clone())),
			None => Err(ExternalError::SourceUnreachable {
				path: path.to_string(),
				reason: "no such database".to_string(),
			}
			.into()),
		}
	}

	fn library_version(&self) -> String {
		"memory".to_string()
	}
}

#[cfg(test)]
mod tests {
	use attach_type::Type;

	use super::*;

	fn rows(n: i64) -> Vec<Vec<Value>> {
		(0..n).map(|i| vec![Value::int8(i)]).collect()
	}

	#[test]
	fn test_result_chunks_rows() {
		let headers = vec![ColumnDef::new("n", Type::Int8)];
		let mut result = MemoryResult::new(headers, rows(5), 2);

		let sizes: Vec<usize> = std::iter::from_fn(|| result.fetch().unwrap()).map(|c| c.size()).collect();
		assert_eq!(sizes, vec![2, 2, 1]);
		assert!(result.fetch().unwrap().is_none());
	}

	#[test]
	fn test_result_without_rows() {
		let headers = vec![ColumnDef::new("n", Type::Int8)];
		let mut result = MemoryResult::new(headers, vec![], 2);
		assert!(result.fetch().unwrap().is_none());
	}

	#[test]
	fn test_driver_unknown_path() {
		let driver = MemoryDriver::new();
		let err = driver.open("nowhere").err().unwrap();
		assert_eq!(err.code(), "EXTERNAL_001");
	}

	#[test]
	fn test_connection_lists_tables_in_creation_order() {
		let database = MemoryDatabase::new("db");
		database.create_table("zeta", vec![], vec![]);
		database.create_table("alpha", vec![], vec![]);

		let driver = MemoryDriver::new();
		driver.register(database);

		let mut conn = driver.open("db").unwrap().connect().unwrap();
		assert_eq!(conn.tables().unwrap(), vec!["zeta".to_string(), "alpha".to_string()]);
	}

	#[test]
	fn test_connection_unknown_table() {
		let mut conn = MemoryDatabase::new("db").connect().unwrap();
		let err = conn.table("missing").err().unwrap();
		assert_eq!(err.code(), "EXTERNAL_002");
	}
}
