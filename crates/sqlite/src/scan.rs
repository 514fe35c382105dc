// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Batched reads of tables and queries.

use std::{
	mem,
	path::{Path, PathBuf},
	sync::Arc,
	thread::{self, JoinHandle},
};

use attach_core::{
	interface::QueryResult,
	value::column::{ColumnDef, Columns},
};
use attach_type::{Result, Value, error, error::diagnostic::internal::internal};
use crossbeam_channel::{Receiver, Sender, bounded};
use parking_lot::Mutex;
use rusqlite::{Connection, params};
use tracing::{debug, instrument, trace};

use crate::{
	OpenFlags,
	connection::{connect, engine_error},
	convert::row_values,
};

type Batch = Result<Vec<Vec<Value>>>;

enum Paging {
	/// Resumes strictly after the last rowid handed out.
	Rowid {
		conn: Arc<Mutex<Connection>>,
		select: String,
		rowid: String,
		last: Option<i64>,
	},
	/// A single execution of the statement, stepped by a reader thread.
	Stream(Stream),
}

/// A table or query read one batch at a time.
pub struct SqliteScan {
	headers: Vec<ColumnDef>,
	paging: Paging,
	batch_size: usize,
	exhausted: bool,
}

impl SqliteScan {
	pub(crate) fn rowid(
		conn: Arc<Mutex<Connection>>,
		headers: Vec<ColumnDef>,
		source: &str,
		rowid: &str,
		columns: &str,
		batch_size: usize,
	) -> Self {
		let select = format!("SELECT {rowid}, {columns} FROM {source}");
		Self {
			headers,
			paging: Paging::Rowid {
				conn,
				select,
				rowid: rowid.to_string(),
				last: None,
			},
			batch_size,
			exhausted: false,
		}
	}

	/// Runs `sql` once on its own connection to `file` and hands its rows
	/// over in order, for sources without a key to resume from.
	pub(crate) fn stream(
		file: &Path,
		flags: OpenFlags,
		headers: Vec<ColumnDef>,
		sql: String,
		batch_size: usize,
	) -> Result<Self> {
		let stream = Stream::spawn(file.to_path_buf(), flags, sql, headers.len(), batch_size)?;
		Ok(Self {
			headers,
			paging: Paging::Stream(stream),
			batch_size,
			exhausted: false,
		})
	}

	fn load_batch(&mut self) -> Batch {
		let width = self.headers.len();
		let limit = self.batch_size as i64;

		match &mut self.paging {
			Paging::Rowid {
				conn,
				select,
				rowid,
				last,
			} => {
				let conn = conn.lock();
				let (batch, last_rowid) = match *last {
					Some(after) => {
						let sql = format!("{select} WHERE {rowid} > ?1 ORDER BY {rowid} LIMIT ?2");
						read_batch(&conn, &sql, params![after, limit], width)?
					}
					None => {
						let sql = format!("{select} ORDER BY {rowid} LIMIT ?1");
						read_batch(&conn, &sql, params![limit], width)?
					}
				};
				if last_rowid.is_some() {
					*last = last_rowid;
				}
				Ok(batch)
			}
			Paging::Stream(stream) => stream.next_batch(),
		}
	}
}

/// Runs one page query. The first column is the rowid, which is returned
/// for the last row instead of being part of the values.
fn read_batch(
	conn: &Connection,
	sql: &str,
	params: impl rusqlite::Params,
	width: usize,
) -> Result<(Vec<Vec<Value>>, Option<i64>)> {
	let mut stmt = conn.prepare(sql).map_err(|e| engine_error("Failed to prepare", e))?;
	let mut rows = stmt.query(params).map_err(|e| engine_error("Failed to query", e))?;

	let mut batch = Vec::new();
	let mut last = None;

	while let Some(row) = rows.next().map_err(|e| engine_error("Failed to step", e))? {
		last = Some(row.get::<_, i64>(0).map_err(|e| engine_error("Failed to read rowid", e))?);
		batch.push(row_values(row, 1, width).map_err(|e| engine_error("Failed to read", e))?);
	}

	Ok((batch, last))
}

/// Receiving end of a reader thread. The channel holds at most one batch
/// ahead of the consumer, and closes once the statement is done.
struct Stream {
	batches: Option<Receiver<Batch>>,
	reader: Option<JoinHandle<()>>,
}

impl Stream {
	fn spawn(file: PathBuf, flags: OpenFlags, sql: String, width: usize, batch_size: usize) -> Result<Self> {
		let (sender, receiver) = bounded(1);

		let reader = thread::Builder::new()
			.name("sqlite-reader".to_string())
			.spawn(move || {
				if let Err(err) = read_all(&file, flags, &sql, width, batch_size, &sender) {
					// the scan may already be gone, nobody is left to tell then
					let _ = sender.send(Err(err));
				}
			})
			.map_err(|e| error!(internal(format!("Failed to spawn reader thread: {}", e))))?;

		Ok(Self {
			batches: Some(receiver),
			reader: Some(reader),
		})
	}

	/// Next batch, empty once the statement has no more rows.
	fn next_batch(&mut self) -> Batch {
		let Some(batches) = &self.batches else {
			return Ok(Vec::new());
		};

		match batches.recv() {
			Ok(batch) => batch,
			Err(_) => {
				self.batches = None;
				match self.reader.take().map(JoinHandle::join) {
					Some(Err(_)) => Err(error!(internal("sqlite reader thread panicked"))),
					_ => Ok(Vec::new()),
				}
			}
		}
	}
}

impl Drop for Stream {
	fn drop(&mut self) {
		// a reader blocked on a full channel wakes up once the receiver is gone
		self.batches = None;
		if let Some(reader) = self.reader.take() {
			let _ = reader.join();
		}
	}
}

fn read_all(
	file: &Path,
	flags: OpenFlags,
	sql: &str,
	width: usize,
	batch_size: usize,
	sender: &Sender<Batch>,
) -> Result<()> {
	let conn = connect(file, flags)?;
	let mut stmt = conn.prepare(sql).map_err(|e| engine_error("Failed to prepare", e))?;
	let mut rows = stmt.query([]).map_err(|e| engine_error("Failed to query", e))?;

	let batch_size = batch_size.max(1);
	let mut batch = Vec::with_capacity(batch_size);

	while let Some(row) = rows.next().map_err(|e| engine_error("Failed to step", e))? {
		batch.push(row_values(row, 0, width).map_err(|e| engine_error("Failed to read", e))?);

		if batch.len() == batch_size {
			let full = mem::replace(&mut batch, Vec::with_capacity(batch_size));
			if sender.send(Ok(full)).is_err() {
				debug!("scan dropped before the statement finished");
				return Ok(());
			}
		}
	}

	if !batch.is_empty() {
		let _ = sender.send(Ok(batch));
	}
	Ok(())
}

impl QueryResult for SqliteScan {
	fn headers(&self) -> &[ColumnDef] {
		&self.headers
	}

	#[instrument(level = "trace", skip_all, name = "sqlite::scan::fetch")]
	fn fetch(&mut self) -> Result<Option<Columns>> {
		if self.exhausted {
			return Ok(None);
		}

		let rows = match self.load_batch() {
			Ok(rows) => rows,
			Err(err) => {
				self.exhausted = true;
				return Err(err);
			}
		};

		// Only a batch without rows ends the scan, a short batch may still be followed by more
		if rows.is_empty() {
			trace!("scan exhausted");
			self.exhausted = true;
			return Ok(None);
		}

		Ok(Some(Columns::from_rows(&self.headers, rows)))
	}
}
