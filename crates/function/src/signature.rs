// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use attach_type::{
	Result, Type, Value,
	error::diagnostic::function::{arity_mismatch, invalid_argument_type, unknown_named_parameter},
	return_error,
};
use indexmap::IndexMap;

use crate::BindInput;

/// Parameters a table function accepts.
#[derive(Debug, Clone, PartialEq)]
pub struct Signature {
	function: String,
	positional: Vec<(String, Type)>,
	named: IndexMap<String, Type>,
}

impl Signature {
	pub fn new(function: impl Into<String>) -> Self {
		Self {
			function: function.into(),
			positional: Vec::new(),
			named: IndexMap::new(),
		}
	}

	pub fn positional(mut self, name: impl Into<String>, ty: Type) -> Self {
		self.positional.push((name.into(), ty));
		self
	}

	pub fn named(mut self, name: impl Into<String>, ty: Type) -> Self {
		self.named.insert(name.into(), ty);
		self
	}

	pub fn arity(&self) -> usize {
		self.positional.len()
	}

	/// Checks `input` against the declared parameters. Positional arguments
	/// must be present and non-NULL; named ones may be NULL, which leaves
	/// them at their default.
	pub fn validate(&self, input: &BindInput) -> Result<()> {
		if input.inputs.len() != self.positional.len() {
			return_error!(arity_mismatch(&self.function, self.positional.len(), input.inputs.len()));
		}

		for ((name, ty), value) in self.positional.iter().zip(&input.inputs) {
			let actual = value.get_type();
			if value.is_undefined() || !ty.accepts(actual) {
				return_error!(invalid_argument_type(&self.function, name, *ty, actual));
			}
		}

		for (name, value) in &input.named {
			let Some(ty) = self.named.get(name) else {
				let known: Vec<&str> = self.named.keys().map(String::as_str).collect();
				return_error!(unknown_named_parameter(&self.function, name, &known));
			};
			if !ty.accepts(value.get_type()) {
				return_error!(invalid_argument_type(&self.function, name, *ty, value.get_type()));
			}
		}

		Ok(())
	}

	/// Text of the positional argument at `idx`.
	pub fn text<'a>(&self, input: &'a BindInput, idx: usize) -> Result<&'a str> {
		if let Some(text) = input.inputs.get(idx).and_then(Value::as_str) {
			return Ok(text);
		}

		let name = self.positional.get(idx).map(|(name, _)| name.as_str()).unwrap_or("?");
		let actual = input.inputs.get(idx).map(Value::get_type).unwrap_or(Type::Undefined);
		return_error!(invalid_argument_type(&self.function, name, Type::Utf8, actual))
	}

	/// Value of the boolean named parameter `name`, false when absent or NULL.
	pub fn flag(&self, input: &BindInput, name: &str) -> Result<bool> {
		match input.named.get(name) {
			None | Some(Value::Undefined) => Ok(false),
			Some(Value::Boolean(v)) => Ok(*v),
			Some(other) => {
				return_error!(invalid_argument_type(&self.function, name, Type::Boolean, other.get_type()))
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn signature() -> Signature {
		Signature::new("attach_external")
			.positional("path", Type::Utf8)
			.named("overwrite", Type::Boolean)
			.named("temporary", Type::Boolean)
	}

	#[test]
	fn test_accepts_valid_input() {
		let input = BindInput::new(vec![Value::utf8("a.db")]).named("overwrite", true);
		signature().validate(&input).unwrap();
	}

	#[test]
	fn test_arity_mismatch() {
		let err = signature().validate(&BindInput::new(vec![])).unwrap_err();
		assert_eq!(err.code(), "FUNCTION_002");

		let input = BindInput::new(vec![Value::utf8("a.db"), Value::utf8("t")]);
		let err = signature().validate(&input).unwrap_err();
		assert_eq!(err.code(), "FUNCTION_002");
	}

	#[test]
	fn test_positional_type_mismatch() {
		let err = signature().validate(&BindInput::new(vec![Value::int8(1)])).unwrap_err();
		assert_eq!(err.code(), "FUNCTION_003");

		let err = signature().validate(&BindInput::new(vec![Value::Undefined])).unwrap_err();
		assert_eq!(err.code(), "FUNCTION_003");
	}

	#[test]
	fn test_named_parameters() {
		let input = BindInput::new(vec![Value::utf8("a.db")]).named("replace", true);
		let err = signature().validate(&input).unwrap_err();
		assert_eq!(err.code(), "FUNCTION_004");

		let input = BindInput::new(vec![Value::utf8("a.db")]).named("temporary", "yes");
		let err = signature().validate(&input).unwrap_err();
		assert_eq!(err.code(), "FUNCTION_003");

		let input = BindInput::new(vec![Value::utf8("a.db")]).named("temporary", Value::Undefined);
		signature().validate(&input).unwrap();
	}

	#[test]
	fn test_flag_defaults_to_false() {
		let signature = signature();
		let input = BindInput::new(vec![Value::utf8("a.db")]).named("temporary", true);
		assert!(!signature.flag(&input, "overwrite").unwrap());
		assert!(signature.flag(&input, "temporary").unwrap());
		assert_eq!(signature.text(&input, 0).unwrap(), "a.db");
	}
}
