// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use attach_core::{
	STANDARD_VECTOR_SIZE,
	interface::{Driver, Session},
	value::column::{ColumnDef, Columns},
};
use attach_type::{Result, Value};
use indexmap::IndexMap;

pub mod external;
mod registry;
mod scan;
mod signature;

pub use external::{AttachExternal, QueryExternal};
pub use registry::{Functions, register_attach_functions};
pub use scan::TableFunctionScan;
pub use signature::Signature;

/// What a table function sees of its host while binding and producing.
pub struct FunctionContext<'a> {
	pub driver: &'a dyn Driver,
	pub session: &'a mut dyn Session,
	/// Capacity of every output batch handed to [`TableFunctionState::produce`].
	pub vector_size: usize,
}

impl<'a> FunctionContext<'a> {
	pub fn new(driver: &'a dyn Driver, session: &'a mut dyn Session) -> Self {
		Self {
			driver,
			session,
			vector_size: STANDARD_VECTOR_SIZE,
		}
	}

	pub fn with_vector_size(mut self, vector_size: usize) -> Self {
		self.vector_size = vector_size.max(1);
		self
	}
}

/// Arguments of one table function call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BindInput {
	pub inputs: Vec<Value>,
	pub named: IndexMap<String, Value>,
}

impl BindInput {
	pub fn new(inputs: Vec<Value>) -> Self {
		Self {
			inputs,
			named: IndexMap::new(),
		}
	}

	pub fn named(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
		self.named.insert(name.into(), value.into());
		self
	}
}

pub trait TableFunction: Send + Sync {
	fn name(&self) -> &str;

	fn signature(&self) -> &Signature;

	/// Resolves the call once, before any rows are produced. The returned
	/// state is owned by a single scan and is never shared.
	fn bind(&self, ctx: &mut FunctionContext<'_>, input: BindInput) -> Result<Box<dyn TableFunctionState>>;
}

pub trait TableFunctionState: Send {
	fn headers(&self) -> &[ColumnDef];

	/// Fills `output` with at most `output.capacity()` rows and sets its
	/// cardinality. A cardinality of zero means the function is finished.
	fn produce(&mut self, ctx: &mut FunctionContext<'_>, output: &mut Columns) -> Result<()>;
}
