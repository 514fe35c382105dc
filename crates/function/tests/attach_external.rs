// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::path::Path;

use attach_core::{
	interface::{Session, ValueSet},
	memory::MemorySession,
};
use attach_function::{BindInput, FunctionContext, Functions, register_attach_functions};
use attach_sqlite::{SqliteConfig, SqliteDriver, SqliteSession};
use attach_testing::{
	fixture::{numbers_table, sqlite_file},
	tempdir::temp_dir,
	tracing::init_tracing,
};
use attach_type::{Result, Value};

fn attach(session: &mut dyn Session, path: &Path, overwrite: bool, temporary: bool) -> Result<ValueSet> {
	let mut functions = Functions::new();
	register_attach_functions(&mut functions);

	let driver = SqliteDriver::new(SqliteConfig::new().batch_size(4));
	let ctx = FunctionContext::new(&driver, session);
	let input = BindInput::new(vec![Value::utf8(path.to_str().unwrap())])
		.named("overwrite", overwrite)
		.named("temporary", temporary);

	functions.scan("attach_external", ctx, input)?.collect()
}

fn rows(session: &dyn Session, name: &str) -> Vec<Vec<Value>> {
	session.view(name).unwrap().unwrap().rows
}

fn numbers(range: std::ops::Range<i64>) -> Vec<Vec<Value>> {
	range.map(|n| vec![Value::int8(n)]).collect()
}

const SOURCE: &str = "
	CREATE TABLE users (id INTEGER PRIMARY KEY, name TEXT);
	INSERT INTO users VALUES (2, 'bob'), (1, 'alice'), (3, NULL);
	CREATE TABLE empty (a INTEGER, b TEXT);
	CREATE TABLE kv (k TEXT PRIMARY KEY, v BLOB) WITHOUT ROWID;
	INSERT INTO kv VALUES ('x', x'ff');
	CREATE VIEW named AS SELECT name FROM users;
";

#[test]
fn test_single_success_row_and_one_view_per_table() {
	init_tracing();
	temp_dir(|dir| {
		let path = dir.join("source.db");
		sqlite_file(&path, SOURCE)?;

		let mut session = SqliteSession::in_memory().unwrap();
		let result = attach(&mut session, &path, false, false).unwrap();
		assert_eq!(result.column_names(), vec!["Success"]);
		assert_eq!(result.rows, vec![vec![Value::bool(true)]]);

		assert_eq!(
			rows(&session, "users"),
			vec![
				vec![Value::int8(1), Value::utf8("alice")],
				vec![Value::int8(2), Value::utf8("bob")],
				vec![Value::int8(3), Value::Undefined],
			]
		);
		assert_eq!(rows(&session, "kv"), vec![vec![Value::utf8("x"), Value::blob(vec![0xff])]]);

		let empty = session.view("empty").unwrap().unwrap();
		assert_eq!(empty.column_names(), vec!["a", "b"]);
		assert!(empty.is_empty());

		// source views are not copied
		assert!(session.view("named").unwrap().is_none());
		Ok(())
	})
	.unwrap();
}

#[test]
fn test_views_in_catalog_order() {
	temp_dir(|dir| {
		let path = dir.join("source.db");
		sqlite_file(&path, SOURCE)?;

		let mut session = MemorySession::new();
		attach(&mut session, &path, false, false).unwrap();
		assert_eq!(session.views(), vec!["users", "empty", "kv"]);
		Ok(())
	})
	.unwrap();
}

#[test]
fn test_large_table_keeps_scan_order() {
	temp_dir(|dir| {
		let path = dir.join("source.db");
		numbers_table(&path, "numbers", 5000)?;

		let mut session = SqliteSession::in_memory().unwrap();
		attach(&mut session, &path, false, false).unwrap();
		assert_eq!(rows(&session, "numbers"), numbers(0..5000));
		Ok(())
	})
	.unwrap();
}

#[test]
fn test_existing_view_without_overwrite() {
	temp_dir(|dir| {
		let path = dir.join("source.db");
		numbers_table(&path, "t", 3)?;

		let mut session = SqliteSession::in_memory().unwrap();
		session.execute_batch("CREATE VIEW t AS SELECT 'old' AS n").unwrap();

		let err = attach(&mut session, &path, false, false).unwrap_err();
		assert_eq!(err.code(), "EXTERNAL_003");
		assert_eq!(rows(&session, "t"), vec![vec![Value::utf8("old")]]);

		attach(&mut session, &path, true, false).unwrap();
		assert_eq!(rows(&session, "t"), numbers(0..3));
		Ok(())
	})
	.unwrap();
}

#[test]
fn test_rerun_with_overwrite_is_idempotent() {
	temp_dir(|dir| {
		let path = dir.join("source.db");
		sqlite_file(&path, SOURCE)?;

		let mut session = SqliteSession::in_memory().unwrap();
		attach(&mut session, &path, true, false).unwrap();
		let first: Vec<_> = ["users", "empty", "kv"].iter().map(|t| rows(&session, t)).collect();

		attach(&mut session, &path, true, false).unwrap();
		let second: Vec<_> = ["users", "empty", "kv"].iter().map(|t| rows(&session, t)).collect();
		assert_eq!(first, second);

		// without overwrite the second run conflicts on the first table
		let err = attach(&mut session, &path, false, false).unwrap_err();
		assert_eq!(err.code(), "EXTERNAL_003");
		Ok(())
	})
	.unwrap();
}

#[test]
fn test_overwrite_picks_up_source_changes() {
	temp_dir(|dir| {
		let path = dir.join("source.db");
		numbers_table(&path, "numbers", 2)?;

		let mut session = MemorySession::new();
		attach(&mut session, &path, false, false).unwrap();
		assert_eq!(rows(&session, "numbers"), numbers(0..2));

		sqlite_file(&path, "INSERT INTO numbers VALUES (2);")?;
		attach(&mut session, &path, true, false).unwrap();
		assert_eq!(rows(&session, "numbers"), numbers(0..3));
		Ok(())
	})
	.unwrap();
}

#[test]
fn test_temporary_views() {
	temp_dir(|dir| {
		let path = dir.join("source.db");
		numbers_table(&path, "numbers", 3)?;

		let session_path = dir.join("session.db");
		{
			let mut session = SqliteSession::open(attach_sqlite::SessionConfig::file(&session_path)).unwrap();
			attach(&mut session, &path, false, true).unwrap();
			assert_eq!(rows(&session, "numbers"), numbers(0..3));

			// a temporary view shadows nothing persistent
			assert!(!session.drop_view("numbers", false).unwrap());
		}

		let session = SqliteSession::open(attach_sqlite::SessionConfig::file(&session_path)).unwrap();
		assert!(session.view("numbers").unwrap().is_none());
		Ok(())
	})
	.unwrap();
}

#[test]
fn test_base_table_in_session_conflicts() {
	temp_dir(|dir| {
		let path = dir.join("source.db");
		numbers_table(&path, "numbers", 3)?;

		let mut session = SqliteSession::in_memory().unwrap();
		session.execute_batch("CREATE TABLE numbers (n INTEGER)").unwrap();

		let err = attach(&mut session, &path, true, false).unwrap_err();
		assert_eq!(err.code(), "EXTERNAL_003");
		Ok(())
	})
	.unwrap();
}

#[test]
fn test_unreachable_source() {
	temp_dir(|dir| {
		let mut session = MemorySession::new();
		let err = attach(&mut session, &dir.join("missing.db"), false, false).unwrap_err();
		assert_eq!(err.code(), "EXTERNAL_001");
		assert!(session.views().is_empty());
		Ok(())
	})
	.unwrap();
}
