// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use attach_core::{
	interface::ValueSet,
	value::column::{ColumnDef, Columns},
};
use attach_type::Result;
use tracing::{instrument, trace};

use crate::{FunctionContext, TableFunctionState};

/// Host side of a bound table function: hands out one output batch per
/// call until the function produces an empty one.
pub struct TableFunctionScan<'a> {
	ctx: FunctionContext<'a>,
	state: Box<dyn TableFunctionState>,
	headers: Vec<ColumnDef>,
	exhausted: bool,
}

impl<'a> TableFunctionScan<'a> {
	pub fn new(ctx: FunctionContext<'a>, state: Box<dyn TableFunctionState>) -> Self {
		let headers = state.headers().to_vec();
		Self {
			ctx,
			state,
			headers,
			exhausted: false,
		}
	}

	pub fn headers(&self) -> &[ColumnDef] {
		&self.headers
	}

	#[instrument(level = "trace", skip_all, name = "function::scan::next")]
	pub fn next(&mut self) -> Result<Option<Columns>> {
		if self.exhausted {
			return Ok(None);
		}

		let mut output = Columns::with_capacity(&self.headers, self.ctx.vector_size);
		if let Err(err) = self.state.produce(&mut self.ctx, &mut output) {
			self.exhausted = true;
			return Err(err);
		}

		if output.size() == 0 {
			trace!("table function finished");
			self.exhausted = true;
			return Ok(None);
		}

		Ok(Some(output))
	}

	/// Drains the function into a single value set.
	pub fn collect(mut self) -> Result<ValueSet> {
		let mut values = ValueSet::new(self.headers.clone());
		while let Some(batch) = self.next()? {
			values.append(&batch);
		}
		Ok(values)
	}
}
