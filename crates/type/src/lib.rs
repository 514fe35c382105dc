// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

pub mod error;
pub mod value;

pub use error::{Diagnostic, Error, IntoDiagnostic};
pub use value::{Blob, OrderedF64, Type, Value};

pub type Result<T> = std::result::Result<T, Error>;
