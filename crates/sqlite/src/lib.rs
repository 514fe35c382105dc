// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

mod config;
mod connection;
mod convert;
mod database;
mod scan;
mod session;
mod sql;

pub use config::{DbPath, OpenFlags, SessionConfig, SqliteConfig};
pub use database::{SqliteConnection, SqliteDatabase, SqliteDriver};
pub use scan::SqliteScan;
pub use session::SqliteSession;
