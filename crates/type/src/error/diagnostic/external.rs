// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use crate::error::{Diagnostic, IntoDiagnostic};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogObjectKind {
	Table,
	View,
}

impl Display for CatalogObjectKind {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			CatalogObjectKind::Table => f.write_str("table"),
			CatalogObjectKind::View => f.write_str("view"),
		}
	}
}

/// Failures while reading from an external database or publishing its
/// contents into the current session.
#[derive(Debug, thiserror::Error)]
pub enum ExternalError {
	#[error("cannot open external database `{path}`")]
	SourceUnreachable {
		path: String,
		reason: String,
	},

	#[error("`{target}` does not exist in external database `{path}`")]
	TargetNotFound {
		path: String,
		target: String,
	},

	#[error("{kind} `{name}` already exists")]
	NamingConflict {
		name: String,
		kind: CatalogObjectKind,
		temporary: bool,
	},
}

impl IntoDiagnostic for ExternalError {
	fn into_diagnostic(self) -> Diagnostic {
		let message = self.to_string();
		match self {
			ExternalError::SourceUnreachable {
				path,
				reason,
			} => Diagnostic {
				code: "EXTERNAL_001".to_string(),
				message,
				label: Some(reason),
				help: Some("check that the path points to an existing database file".to_string()),
				notes: vec![format!("path: {}", path)],
				cause: None,
			},

			ExternalError::TargetNotFound {
				path,
				target,
			} => Diagnostic {
				code: "EXTERNAL_002".to_string(),
				message,
				label: Some("unknown table".to_string()),
				help: Some(format!("list the tables of `{}` to find the correct name", path)),
				notes: vec![format!("target: {}", target)],
				cause: None,
			},

			ExternalError::NamingConflict {
				name,
				kind,
				temporary,
			} => {
				let help = match kind {
					CatalogObjectKind::View => {
						"pass `overwrite = true` to replace the existing view".to_string()
					}
					CatalogObjectKind::Table => {
						format!("`{}` is a table and can not be replaced by a view", name)
					}
				};
				Diagnostic {
					code: "EXTERNAL_003".to_string(),
					message,
					label: Some(if temporary {
						"conflicts with a temporary object".to_string()
					} else {
						"conflicts with a persistent object".to_string()
					}),
					help: Some(help),
					notes: vec![
						"views created before the conflict are kept, attach is not atomic".to_string(),
					],
					cause: None,
				}
			}
		}
	}
}
