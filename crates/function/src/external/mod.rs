// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Table functions that read from a second, independently opened database.

mod attach;
mod query;

pub use attach::AttachExternal;
pub use query::QueryExternal;
