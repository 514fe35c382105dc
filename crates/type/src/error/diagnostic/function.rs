// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use crate::{error::Diagnostic, value::Type};

/// Function is not recognized or does not exist
pub fn unknown_function(name: &str) -> Diagnostic {
	Diagnostic {
		code: "FUNCTION_001".to_string(),
		message: format!("Unknown function: {}", name),
		label: Some("unknown function".to_string()),
		help: Some("Check the function name and available functions".to_string()),
		notes: vec![],
		cause: None,
	}
}

/// Function called with wrong number of arguments
pub fn arity_mismatch(name: &str, expected: usize, actual: usize) -> Diagnostic {
	Diagnostic {
		code: "FUNCTION_002".to_string(),
		message: format!("Function {} expects {} arguments, got {}", name, expected, actual),
		label: Some("wrong number of arguments".to_string()),
		help: Some(format!("Provide exactly {} arguments to function {}", expected, name)),
		notes: vec![],
		cause: None,
	}
}

/// Argument has invalid type for function
pub fn invalid_argument_type(name: &str, argument: &str, expected: Type, actual: Type) -> Diagnostic {
	Diagnostic {
		code: "FUNCTION_003".to_string(),
		message: format!(
			"Function {} argument {} has invalid type: expected {}, got {}",
			name, argument, expected, actual
		),
		label: Some("invalid argument type".to_string()),
		help: Some(format!("Provide an argument of type {}", expected)),
		notes: vec![],
		cause: None,
	}
}

/// Named parameter is not declared by the function
pub fn unknown_named_parameter(name: &str, parameter: &str, known: &[&str]) -> Diagnostic {
	let notes = if known.is_empty() {
		vec![format!("function {} takes no named parameters", name)]
	} else {
		vec![format!("known parameters: {}", known.join(", "))]
	};

	Diagnostic {
		code: "FUNCTION_004".to_string(),
		message: format!("Function {} has no named parameter `{}`", name, parameter),
		label: Some("unknown named parameter".to_string()),
		help: None,
		notes,
		cause: None,
	}
}
