// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use attach_type::{Result, error::diagnostic::function::unknown_function, return_error};
use indexmap::IndexMap;
use tracing::debug;

use crate::{AttachExternal, BindInput, FunctionContext, QueryExternal, TableFunction, TableFunctionScan};

type TableFunctionFactory = Box<dyn Fn() -> Box<dyn TableFunction> + Send + Sync>;

/// Table functions by name. Names are matched case-insensitively.
#[derive(Default)]
pub struct Functions {
	tables: IndexMap<String, TableFunctionFactory>,
}

impl Functions {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn register_table<F, T>(&mut self, name: &str, init: F)
	where
		F: Fn() -> T + Send + Sync + 'static,
		T: TableFunction + 'static,
	{
		self.tables.insert(name.to_ascii_lowercase(), Box::new(move || Box::new(init()) as Box<dyn TableFunction>));
	}

	pub fn get_table(&self, name: &str) -> Option<Box<dyn TableFunction>> {
		self.tables.get(&name.to_ascii_lowercase()).map(|init| init())
	}

	pub fn names(&self) -> Vec<&str> {
		self.tables.keys().map(String::as_str).collect()
	}

	/// Validates `input`, binds the function and returns a scan ready to
	/// produce its rows.
	pub fn scan<'a>(&self, name: &str, mut ctx: FunctionContext<'a>, input: BindInput) -> Result<TableFunctionScan<'a>> {
		let Some(function) = self.get_table(name) else {
			return_error!(unknown_function(name));
		};

		function.signature().validate(&input)?;
		let state = function.bind(&mut ctx, input)?;
		debug!(function = function.name(), columns = state.headers().len(), "bound table function");

		Ok(TableFunctionScan::new(ctx, state))
	}
}

/// Registers `attach_external` and `query_external`.
pub fn register_attach_functions(functions: &mut Functions) {
	functions.register_table(AttachExternal::NAME, AttachExternal::new);
	functions.register_table(QueryExternal::NAME, QueryExternal::new);
}
