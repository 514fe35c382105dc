// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::mem;

use attach_core::{
	interface::{ValueSet, ViewDef},
	value::column::{ColumnDef, Columns},
};
use attach_type::{Result, Type, Value};
use tracing::{debug, info, instrument};

use crate::{BindInput, FunctionContext, Signature, TableFunction, TableFunctionState};

/// `attach_external(path, overwrite := false, temporary := false)`: copies
/// every base table of an external database into a view of the same name.
///
/// Each table is read completely into memory before its view is created,
/// so a table has to fit in memory. Source views are not copied. A failure
/// part way leaves the views created so far in place.
pub struct AttachExternal {
	signature: Signature,
}

impl AttachExternal {
	pub const NAME: &'static str = "attach_external";

	pub fn new() -> Self {
		Self {
			signature: Signature::new(Self::NAME)
				.positional("path", Type::Utf8)
				.named("overwrite", Type::Boolean)
				.named("temporary", Type::Boolean),
		}
	}
}

impl Default for AttachExternal {
	fn default() -> Self {
		Self::new()
	}
}

impl TableFunction for AttachExternal {
	fn name(&self) -> &str {
		Self::NAME
	}

	fn signature(&self) -> &Signature {
		&self.signature
	}

	#[instrument(level = "trace", skip_all, name = "function::attach_external::bind")]
	fn bind(&self, _ctx: &mut FunctionContext<'_>, input: BindInput) -> Result<Box<dyn TableFunctionState>> {
		let path = self.signature.text(&input, 0)?.to_string();
		let overwrite = self.signature.flag(&input, "overwrite")?;
		let temporary = self.signature.flag(&input, "temporary")?;

		Ok(Box::new(AttachExternalState {
			headers: vec![ColumnDef::new("Success", Type::Boolean)],
			stage: Stage::Pending {
				path,
				overwrite,
				temporary,
			},
		}))
	}
}

enum Stage {
	Pending {
		path: String,
		overwrite: bool,
		temporary: bool,
	},
	Done,
}

struct AttachExternalState {
	headers: Vec<ColumnDef>,
	stage: Stage,
}

impl TableFunctionState for AttachExternalState {
	fn headers(&self) -> &[ColumnDef] {
		&self.headers
	}

	#[instrument(level = "trace", skip_all, name = "function::attach_external::produce")]
	fn produce(&mut self, ctx: &mut FunctionContext<'_>, output: &mut Columns) -> Result<()> {
		let Stage::Pending {
			path,
			overwrite,
			temporary,
		} = mem::replace(&mut self.stage, Stage::Done)
		else {
			output.set_cardinality(0);
			return Ok(());
		};

		let database = ctx.driver.open(&path)?;
		let mut connection = database.connect()?;
		let tables = connection.tables()?;
		debug!(path = %path, tables = tables.len(), "attaching external database");

		for table in tables {
			let mut result = connection.table(&table)?;
			let mut values = ValueSet::new(result.headers().to_vec());

			while let Some(batch) = result.fetch()? {
				if batch.size() == 0 {
					break;
				}
				values.append(&batch);
			}

			let rows = values.len();
			ctx.session.create_view(
				ViewDef {
					name: table.clone(),
					overwrite,
					temporary,
				},
				values,
			)?;
			info!(table = %table, rows, temporary, "attached external table");
		}

		output.set_value(0, 0, Value::bool(true));
		output.set_cardinality(1);
		Ok(())
	}
}
