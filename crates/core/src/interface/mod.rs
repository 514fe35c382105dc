// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

mod session;
mod source;

pub use session::{Session, ValueSet, ViewDef};
pub use source::{Connection, Database, Driver, QueryResult};
