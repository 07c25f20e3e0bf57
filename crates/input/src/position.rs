// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::rune::sequence_len;

/// A 1-based line and column. Columns count runes the way
/// [`Input::peek_rune`](crate::Input::peek_rune) splits them, so every
/// `advance_rune` moves the column by one. Only `\n` starts a new line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
	pub line: usize,
	pub column: usize,
}

impl Position {
	pub const START: Position = Position {
		line: 1,
		column: 1,
	};

	pub fn new(line: usize, column: usize) -> Self {
		Self {
			line,
			column,
		}
	}
}

impl Default for Position {
	fn default() -> Self {
		Position::START
	}
}

impl Display for Position {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		write!(f, "{}:{}", self.line, self.column)
	}
}

/// Incrementally maintained position of the read head.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Tracker {
	line: usize,
	column: usize,
	last_newline: Option<usize>,
	// bytes past the head that still belong to the rune the head is inside
	pending: usize,
}

impl Tracker {
	pub(crate) fn new() -> Self {
		Self {
			line: 1,
			column: 1,
			last_newline: None,
			pending: 0,
		}
	}

	pub(crate) fn position(&self) -> Position {
		Position::new(self.line, self.column)
	}

	/// Accounts for the bytes `buf[from..to]` the head just moved over.
	pub(crate) fn advance(&mut self, buf: &[u8], from: usize, to: usize) {
		let moved = &buf[from..to];
		match moved.iter().rposition(|&b| b == b'\n') {
			Some(last) => {
				let last = from + last;
				self.line += count_newlines(moved);
				self.last_newline = Some(last);
				self.column = 1;
				self.pending = 0;
				self.count(&buf[last + 1..to]);
			}
			None => self.count(moved),
		}
	}

	/// Re-derives the state for a head moving from `from` to an arbitrary
	/// `to`, scanning as little of `buf` as possible.
	pub(crate) fn seek(&mut self, buf: &[u8], from: usize, to: usize) {
		if to >= from {
			self.advance(buf, from, to);
			return;
		}

		// otherwise the head stays on the same line
		if self.last_newline.is_some_and(|nl| nl >= to) {
			self.line = count_newlines(&buf[..to]) + 1;
			self.last_newline = last_newline(&buf[..to]);
		}
		self.column = 1;
		self.pending = 0;
		self.count(&buf[self.last_newline.map_or(0, |nl| nl + 1)..to]);
	}

	// `bytes` must not contain a newline
	fn count(&mut self, bytes: &[u8]) {
		let (runes, pending) = count_runes(bytes, self.pending);
		self.column += runes;
		self.pending = pending;
	}
}

/// Computes the position of `offset` within `bytes` from scratch. Offsets past
/// the end are clamped.
pub(crate) fn position_at(bytes: &[u8], offset: usize) -> Position {
	let scanned = &bytes[..offset.min(bytes.len())];
	let line_start = last_newline(scanned).map_or(0, |nl| nl + 1);
	let (runes, _) = count_runes(&scanned[line_start..], 0);
	Position::new(count_newlines(scanned) + 1, runes + 1)
}

fn last_newline(bytes: &[u8]) -> Option<usize> {
	bytes.iter().rposition(|&b| b == b'\n')
}

fn count_newlines(bytes: &[u8]) -> usize {
	bytes.iter().filter(|&&b| b == b'\n').count()
}

/// Counts the runes starting in `bytes` when its first `pending` bytes still
/// belong to a rune that started earlier. Returns the count and how many bytes
/// past the end of `bytes` the last rune still claims, so counting a span in
/// pieces gives the same total as counting it at once.
///
/// A leading byte claims the bytes its high bits announce whatever they are,
/// matching the decoder. A stray continuation byte is a rune of its own.
fn count_runes(bytes: &[u8], mut pending: usize) -> (usize, usize) {
	let mut runes = 0;
	for &b in bytes {
		if pending > 0 {
			pending -= 1;
		} else {
			runes += 1;
			pending = sequence_len(b) - 1;
		}
	}
	(runes, pending)
}
