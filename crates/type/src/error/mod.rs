// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter, Write};

use serde::{Deserialize, Serialize};

pub mod diagnostic;

pub use diagnostic::external::ExternalError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
	pub code: String,
	pub message: String,
	pub label: Option<String>,
	pub help: Option<String>,
	pub notes: Vec<String>,
	pub cause: Option<Box<Diagnostic>>,
}

pub trait IntoDiagnostic {
	fn into_diagnostic(self) -> Diagnostic;
}

impl IntoDiagnostic for Diagnostic {
	fn into_diagnostic(self) -> Diagnostic {
		self
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct Error(pub Diagnostic);

impl Error {
	pub fn code(&self) -> &str {
		&self.0.code
	}

	pub fn diagnostic(self) -> Diagnostic {
		self.0
	}
}

impl Display for Error {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(&render(&self.0))
	}
}

impl std::error::Error for Error {}

impl<T: IntoDiagnostic> From<T> for Error {
	fn from(value: T) -> Self {
		Error(value.into_diagnostic())
	}
}

fn render(d: &Diagnostic) -> String {
	let mut output = String::new();

	let _ = writeln!(&mut output, "error[{}]: {}", d.code, d.message);

	if let Some(label) = &d.label {
		let _ = writeln!(&mut output, "  = {}", label);
	}

	if let Some(help) = &d.help {
		let _ = writeln!(&mut output, "\nhelp: {}", help);
	}

	for note in &d.notes {
		let _ = writeln!(&mut output, "\nnote: {}", note);
	}

	if let Some(cause) = &d.cause {
		let _ = write!(&mut output, "\ncaused by: {}", render(cause));
	}

	output
}

/// Turns anything convertible into a [`Diagnostic`] into an [`Error`].
#[macro_export]
macro_rules! error {
	($diagnostic:expr) => {
		$crate::Error($crate::IntoDiagnostic::into_diagnostic($diagnostic))
	};
}

#[macro_export]
macro_rules! return_error {
	($diagnostic:expr) => {
		return Err($crate::error!($diagnostic))
	};
}

#[cfg(test)]
mod tests {
	use super::{diagnostic::internal::internal, *};

	#[test]
	fn test_render_contains_code_and_message() {
		let err = error!(internal("boom"));
		let rendered = err.to_string();
		assert!(rendered.starts_with("error[INTERNAL_ERROR]"));
		assert!(rendered.contains("boom"));
	}

	#[test]
	fn test_return_error() {
		fn fails() -> crate::Result<()> {
			return_error!(internal("nope"));
		}

		let err = fails().unwrap_err();
		assert_eq!(err.code(), "INTERNAL_ERROR");
	}

	#[test]
	fn test_render_cause() {
		let mut diagnostic = internal("outer");
		diagnostic.cause = Some(Box::new(internal("inner")));
		let rendered = Error(diagnostic).to_string();
		assert!(rendered.contains("caused by: error[INTERNAL_ERROR]: inner"));
	}
}
