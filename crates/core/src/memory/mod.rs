// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! In-process sources and sessions.

mod session;
mod source;

pub use session::MemorySession;
pub use source::{MemoryConnection, MemoryDatabase, MemoryDriver, MemoryResult};
