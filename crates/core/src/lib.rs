// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

pub mod interface;
pub mod memory;
pub mod result;
pub mod value;

pub use attach_type::{Error, Result};

/// Default number of rows a host hands to a producer per call.
pub const STANDARD_VECTOR_SIZE: usize = 2048;
