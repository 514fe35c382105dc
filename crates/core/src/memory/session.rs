// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use attach_type::{
	error::{ExternalError, diagnostic::external::CatalogObjectKind},
	return_error,
};
use indexmap::IndexMap;
use tracing::debug;

use crate::{
	Result,
	interface::{Session, ValueSet, ViewDef},
};

/// A session that keeps its tables and views in process memory.
#[derive(Debug, Default)]
pub struct MemorySession {
	tables: IndexMap<String, ValueSet>,
	views: IndexMap<String, ValueSet>,
	temporary: IndexMap<String, ValueSet>,
}

impl MemorySession {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn create_table(&mut self, name: impl Into<String>, values: ValueSet) {
		self.tables.insert(name.into(), values);
	}

	/// Names of persistent views, in creation order.
	pub fn views(&self) -> Vec<&str> {
		self.views.keys().map(String::as_str).collect()
	}

	/// Names of temporary views, in creation order.
	pub fn temporary_views(&self) -> Vec<&str> {
		self.temporary.keys().map(String::as_str).collect()
	}
}

impl Session for MemorySession {
	fn create_view(&mut self, def: ViewDef, values: ValueSet) -> Result<()> {
		if !def.temporary && self.tables.contains_key(&def.name) {
			return_error!(ExternalError::NamingConflict {
				name: def.name,
				kind: CatalogObjectKind::Table,
				temporary: false,
			});
		}

		let scope = if def.temporary {
			&mut self.temporary
		} else {
			&mut self.views
		};

		if scope.contains_key(&def.name) && !def.overwrite {
			return_error!(ExternalError::NamingConflict {
				name: def.name,
				kind: CatalogObjectKind::View,
				temporary: def.temporary,
			});
		}

		debug!(view = %def.name, temporary = def.temporary, rows = values.len(), "create view");
		// replacing keeps the original position in creation order
		scope.insert(def.name, values);
		Ok(())
	}

	fn view(&self, name: &str) -> Result<Option<ValueSet>> {
		Ok(self.temporary.get(name).or_else(|| self.views.get(name)).cloned())
	}

	fn drop_view(&mut self, name: &str, temporary: bool) -> Result<bool> {
		let scope = if temporary {
			&mut self.temporary
		} else {
			&mut self.views
		};
		Ok(scope.shift_remove(name).is_some())
	}
}
