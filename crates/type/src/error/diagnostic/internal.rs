// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use crate::error::Diagnostic;

/// A failure of the underlying engine that has no dedicated diagnostic.
pub fn internal(reason: impl Into<String>) -> Diagnostic {
	Diagnostic {
		code: "INTERNAL_ERROR".to_string(),
		message: format!("Internal error: {}", reason.into()),
		label: None,
		help: Some("This error was raised by the underlying database engine".to_string()),
		notes: vec![],
		cause: None,
	}
}
