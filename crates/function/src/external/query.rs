// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::mem;

use attach_core::{
	interface::{Connection, Database, QueryResult},
	result::QueryResultIterator,
	value::column::{ColumnDef, Columns},
};
use attach_type::{Result, Type};
use tracing::{debug, instrument};

use crate::{BindInput, FunctionContext, Signature, TableFunction, TableFunctionState};

/// `query_external(path, table_or_query)`: streams a table or query result
/// of an external database, one host batch per call.
pub struct QueryExternal {
	signature: Signature,
}

impl QueryExternal {
	pub const NAME: &'static str = "query_external";

	pub fn new() -> Self {
		Self {
			signature: Signature::new(Self::NAME)
				.positional("path", Type::Utf8)
				.positional("table_or_query", Type::Utf8),
		}
	}
}

impl Default for QueryExternal {
	fn default() -> Self {
		Self::new()
	}
}

/// Whether `target` reads as a query rather than a table name.
fn is_query(target: &str) -> bool {
	let keyword = target.trim_start().split(|c: char| c.is_whitespace() || c == '(').next().unwrap_or("");
	["SELECT", "WITH", "VALUES"].iter().any(|k| keyword.eq_ignore_ascii_case(k))
}

impl TableFunction for QueryExternal {
	fn name(&self) -> &str {
		Self::NAME
	}

	fn signature(&self) -> &Signature {
		&self.signature
	}

	#[instrument(level = "trace", skip_all, name = "function::query_external::bind")]
	fn bind(&self, ctx: &mut FunctionContext<'_>, input: BindInput) -> Result<Box<dyn TableFunctionState>> {
		let path = self.signature.text(&input, 0)?;
		let target = self.signature.text(&input, 1)?;

		let database = ctx.driver.open(path)?;
		let mut connection = database.connect()?;

		let result = if is_query(target) {
			connection.query(target)?
		} else {
			connection.table(target)?
		};

		let headers = result.headers().to_vec();
		debug!(path, target, columns = headers.len(), "bound external scan");

		Ok(Box::new(QueryExternalState {
			headers,
			stage: Stage::Pending(result),
			_connection: connection,
			_database: database,
		}))
	}
}

enum Stage {
	/// Bound, nothing produced yet.
	Pending(Box<dyn QueryResult>),
	Streaming(QueryResultIterator<Box<dyn QueryResult>>),
	Finished,
}

struct QueryExternalState {
	headers: Vec<ColumnDef>,
	stage: Stage,
	// the result reads through these, they are released with the state
	_connection: Box<dyn Connection>,
	_database: Box<dyn Database>,
}

impl TableFunctionState for QueryExternalState {
	fn headers(&self) -> &[ColumnDef] {
		&self.headers
	}

	#[instrument(level = "trace", skip_all, name = "function::query_external::produce")]
	fn produce(&mut self, _ctx: &mut FunctionContext<'_>, output: &mut Columns) -> Result<()> {
		// an error leaves the state finished
		let mut iterator = match mem::replace(&mut self.stage, Stage::Finished) {
			Stage::Pending(result) => QueryResultIterator::new(Some(result))?,
			Stage::Streaming(iterator) => iterator,
			Stage::Finished => {
				output.set_cardinality(0);
				return Ok(());
			}
		};

		let width = self.headers.len();
		let mut count = 0;

		while count < output.capacity() {
			let Some(row) = iterator.current_row() else {
				break;
			};
			for col in 0..width {
				output.set_value(col, count, row.get_value(col).clone());
			}
			iterator.advance()?;
			count += 1;
		}

		output.set_cardinality(count);

		if iterator.is_live() {
			self.stage = Stage::Streaming(iterator);
		} else {
			debug!("external scan finished");
		}
		Ok(())
	}
}
