// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::path::{Path, PathBuf};

use attach_core::STANDARD_VECTOR_SIZE;

/// How external database files are opened and read.
#[derive(Debug, Clone)]
pub struct SqliteConfig {
	pub flags: OpenFlags,
	/// Rows fetched from the file per batch.
	pub batch_size: usize,
}

impl SqliteConfig {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn batch_size(mut self, batch_size: usize) -> Self {
		self.batch_size = batch_size.max(1);
		self
	}

	pub fn flags(mut self, flags: OpenFlags) -> Self {
		self.flags = flags;
		self
	}
}

impl Default for SqliteConfig {
	fn default() -> Self {
		Self {
			flags: OpenFlags::read_only(),
			batch_size: STANDARD_VECTOR_SIZE,
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenFlags {
	pub read_write: bool,
	pub create: bool,
	pub full_mutex: bool,
	pub no_mutex: bool,
	pub shared_cache: bool,
	pub private_cache: bool,
	pub uri: bool,
}

impl OpenFlags {
	/// Opens existing files only, never creates one.
	pub fn read_only() -> Self {
		Self {
			read_write: false,
			create: false,
			full_mutex: false,
			no_mutex: true,
			shared_cache: false,
			private_cache: false,
			uri: false,
		}
	}

	pub fn read_write_create() -> Self {
		Self {
			read_write: true,
			create: true,
			..Self::read_only()
		}
	}

	pub(crate) fn to_rusqlite(self) -> rusqlite::OpenFlags {
		let mut flags = rusqlite::OpenFlags::empty();

		if self.read_write {
			flags |= rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE;
		} else {
			flags |= rusqlite::OpenFlags::SQLITE_OPEN_READ_ONLY;
		}
		if self.create {
			flags |= rusqlite::OpenFlags::SQLITE_OPEN_CREATE;
		}
		if self.full_mutex {
			flags |= rusqlite::OpenFlags::SQLITE_OPEN_FULL_MUTEX;
		}
		if self.no_mutex {
			flags |= rusqlite::OpenFlags::SQLITE_OPEN_NO_MUTEX;
		}
		if self.shared_cache {
			flags |= rusqlite::OpenFlags::SQLITE_OPEN_SHARED_CACHE;
		}
		if self.private_cache {
			flags |= rusqlite::OpenFlags::SQLITE_OPEN_PRIVATE_CACHE;
		}
		if self.uri {
			flags |= rusqlite::OpenFlags::SQLITE_OPEN_URI;
		}

		flags
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbPath {
	File(PathBuf),
	Memory,
}

/// Where a [`crate::SqliteSession`] keeps its persistent views.
#[derive(Debug, Clone)]
pub struct SessionConfig {
	pub path: DbPath,
	pub flags: OpenFlags,
}

impl SessionConfig {
	pub fn file(path: impl AsRef<Path>) -> Self {
		Self {
			path: DbPath::File(path.as_ref().to_path_buf()),
			flags: OpenFlags::read_write_create(),
		}
	}

	pub fn memory() -> Self {
		Self {
			path: DbPath::Memory,
			flags: OpenFlags::read_write_create(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_read_only_flags() {
		let flags = OpenFlags::read_only().to_rusqlite();
		assert!(flags.contains(rusqlite::OpenFlags::SQLITE_OPEN_READ_ONLY));
		assert!(!flags.contains(rusqlite::OpenFlags::SQLITE_OPEN_CREATE));
	}

	#[test]
	fn test_read_write_create_flags() {
		let flags = OpenFlags::read_write_create().to_rusqlite();
		assert!(flags.contains(rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE));
		assert!(flags.contains(rusqlite::OpenFlags::SQLITE_OPEN_CREATE));
		assert!(flags.contains(rusqlite::OpenFlags::SQLITE_OPEN_NO_MUTEX));
	}

	#[test]
	fn test_batch_size_is_at_least_one() {
		assert_eq!(SqliteConfig::new().batch_size(0).batch_size, 1);
		assert_eq!(SqliteConfig::default().batch_size, STANDARD_VECTOR_SIZE);
	}
}
