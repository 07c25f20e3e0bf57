// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Readers that misbehave on purpose.

use std::io::{self, Read};

/// Yields `data` and then fails with an error of `kind` instead of reporting
/// the end of the stream.
pub struct FailingReader {
	data: Vec<u8>,
	pos: usize,
	kind: io::ErrorKind,
}

impl FailingReader {
	pub fn new(data: impl Into<Vec<u8>>, kind: io::ErrorKind) -> Self {
		Self {
			data: data.into(),
			pos: 0,
			kind,
		}
	}

	/// Fails on the first read.
	pub fn immediately(kind: io::ErrorKind) -> Self {
		Self::new(Vec::new(), kind)
	}
}

impl Read for FailingReader {
	fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
		if self.pos >= self.data.len() {
			return Err(io::Error::new(self.kind, "injected read failure"));
		}
		let n = buf.len().min(self.data.len() - self.pos);
		buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
		self.pos += n;
		Ok(n)
	}
}

/// Hands out at most one byte per read, interleaved with
/// `ErrorKind::Interrupted`, which well-behaved readers must retry.
pub struct TrickleReader {
	data: Vec<u8>,
	pos: usize,
	interrupt: bool,
}

impl TrickleReader {
	pub fn new(data: impl Into<Vec<u8>>) -> Self {
		Self {
			data: data.into(),
			pos: 0,
			interrupt: true,
		}
	}
}

impl Read for TrickleReader {
	fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
		if buf.is_empty() || self.pos >= self.data.len() {
			return Ok(0);
		}
		self.interrupt = !self.interrupt;
		if !self.interrupt {
			return Err(io::Error::from(io::ErrorKind::Interrupted));
		}
		buf[0] = self.data[self.pos];
		self.pos += 1;
		Ok(1)
	}
}
