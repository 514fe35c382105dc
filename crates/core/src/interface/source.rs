// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use crate::{
	Result,
	value::column::{ColumnDef, Columns},
};

/// Pull-based result of a read against an external database.
///
/// Each call to [`QueryResult::fetch`] hands out the next batch. `None` or
/// a batch of size zero means the result is exhausted for good; a result
/// is never restarted.
pub trait QueryResult: Send {
	fn headers(&self) -> &[ColumnDef];

	fn fetch(&mut self) -> Result<Option<Columns>>;
}

impl<R: QueryResult + ?Sized> QueryResult for Box<R> {
	fn headers(&self) -> &[ColumnDef] {
		(**self).headers()
	}

	fn fetch(&mut self) -> Result<Option<Columns>> {
		(**self).fetch()
	}
}

pub trait Connection: Send {
	/// Full read of a table or view.
	fn table(&mut self, name: &str) -> Result<Box<dyn QueryResult>>;

	/// Read of an arbitrary query.
	fn query(&mut self, sql: &str) -> Result<Box<dyn QueryResult>>;

	/// Base tables in catalog order, views are not listed.
	fn tables(&mut self) -> Result<Vec<String>>;
}

/// An opened, independent database file.
pub trait Database: Send {
	fn path(&self) -> &str;

	fn connect(&self) -> Result<Box<dyn Connection>>;
}

/// Opens external databases by path.
pub trait Driver: Send + Sync {
	fn open(&self, path: &str) -> Result<Box<dyn Database>>;

	/// Version of the engine that reads the external files.
	fn library_version(&self) -> String;
}
