// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::io::Read;

use crate::{
	buffer::Buffer,
	builder::InputBuilder,
	error::InputError,
	position::{Position, Tracker, position_at},
	rune::{Rune, decode},
};

/// A cursor over an in-memory byte sequence for hand-written tokenizers.
///
/// The input keeps two indices: `start`, where the pending selection begins,
/// and `pos`, the read head. A tokenizer peeks ahead of the head, advances
/// over what it accepts and then takes the selection with [`Input::shift`] or
/// drops it with [`Input::skip`]. The line and column of the head are kept up
/// to date while advancing.
///
/// The content is always followed by a `0` sentinel, so `peek` at the end of
/// the input returns `0` and a tokenizer only needs to consult
/// [`Input::err`] when it actually sees a `0` byte.
#[derive(Debug)]
pub struct Input<'a> {
	buf: Buffer<'a>,
	start: usize,
	pos: usize,
	err: Option<InputError>,
	tracker: Tracker,
}

impl Input<'static> {
	/// Takes ownership of `bytes`. The sentinel is written into spare
	/// capacity when there is any, otherwise the vector grows by one byte.
	pub fn from_vec(bytes: Vec<u8>) -> Self {
		Self::with_buffer(Buffer::from_vec(bytes))
	}

	/// Copies `bytes` into a new buffer.
	pub fn from_bytes(bytes: &[u8]) -> Self {
		Self::with_buffer(Buffer::from_slice(bytes))
	}

	/// Reads `reader` to the end. A read error leaves an empty input that
	/// reports the error from [`Input::err`] forever after.
	pub fn from_reader<R: Read>(reader: R) -> Self {
		InputBuilder::default().load(reader)
	}

	pub fn builder() -> InputBuilder {
		InputBuilder::new()
	}

	pub(crate) fn failed(err: InputError) -> Self {
		let mut input = Self::with_buffer(Buffer::empty());
		input.err = Some(err);
		input
	}
}

impl<'a> Input<'a> {
	/// Uses `data[..len]` as the input without copying it, by temporarily
	/// overwriting `data[len]` with the sentinel. The overwritten byte is put
	/// back by [`Input::restore`] or when the input is dropped. When `data`
	/// has no byte past `len` the content is copied instead.
	///
	/// # Panics
	/// Panics if `len > data.len()`.
	pub fn lease(data: &'a mut [u8], len: usize) -> Self {
		Self::with_buffer(Buffer::lease(data, len))
	}

	fn with_buffer(buf: Buffer<'a>) -> Self {
		Self {
			buf,
			start: 0,
			pos: 0,
			err: None,
			tracker: Tracker::new(),
		}
	}

	/// Gives a leased byte back to the caller's storage. Once a byte was
	/// given back the input behaves as if it were empty. Calling this again,
	/// or on an input that never leased anything, does nothing.
	pub fn restore(&mut self) {
		if self.buf.restore() {
			self.reset();
		}
	}

	/// The error at the head, see [`Input::peek_err`].
	pub fn err(&self) -> Option<InputError> {
		self.peek_err(0)
	}

	/// The load error if loading failed, [`InputError::Eof`] if
	/// `pos + offset` is at or past the end, `None` otherwise.
	pub fn peek_err(&self, offset: usize) -> Option<InputError> {
		if let Some(err) = &self.err {
			return Some(err.clone());
		}
		if self.pos + offset >= self.buf.len() {
			return Some(InputError::Eof);
		}
		None
	}

	pub fn is_eof(&self) -> bool {
		self.pos >= self.buf.len()
	}

	/// The byte `offset` bytes past the head, `0` at the end of the input.
	///
	/// `pos + offset` must not exceed [`Input::len`]; check
	/// [`Input::peek_err`] before looking further ahead.
	#[inline]
	pub fn peek(&self, offset: usize) -> u8 {
		debug_assert!(self.pos + offset <= self.buf.len(), "peek past the sentinel");
		self.buf.terminated()[self.pos + offset]
	}

	/// Decodes the rune starting `offset` bytes past the head. Same
	/// precondition as [`Input::peek`].
	#[inline]
	pub fn peek_rune(&self, offset: usize) -> Rune {
		debug_assert!(self.pos + offset <= self.buf.len(), "peek past the sentinel");
		decode(self.buf.terminated(), self.pos + offset)
	}

	/// Moves the head `n` bytes forward, stopping at the end of the input.
	pub fn advance(&mut self, n: usize) {
		if n == 0 {
			return;
		}
		let end = self.pos.saturating_add(n).min(self.buf.len());
		self.tracker.advance(self.buf.content(), self.pos, end);
		self.pos = end;
	}

	/// Moves the head over the rune under it.
	pub fn advance_rune(&mut self) {
		let rune = self.peek_rune(0);
		self.advance(rune.len);
	}

	/// A mark for [`Input::rewind`], relative to the start of the selection.
	pub fn pos(&self) -> usize {
		self.pos - self.start
	}

	/// Moves the head back (or forward) to a mark taken with [`Input::pos`]
	/// since the last [`Input::skip`] or [`Input::shift`], and re-derives the
	/// line and column for it.
	pub fn rewind(&mut self, mark: usize) {
		let target = self.start + mark;
		debug_assert!(target <= self.buf.len(), "rewind past the end of the input");
		let target = target.min(self.buf.len());
		self.tracker.seek(self.buf.content(), self.pos, target);
		self.pos = target;
	}

	/// The current selection, without consuming it.
	pub fn lexeme(&self) -> &[u8] {
		&self.buf.content()[self.start..self.pos]
	}

	/// Drops the current selection.
	pub fn skip(&mut self) {
		self.start = self.pos;
	}

	/// Takes the current selection and starts a new one at the head.
	pub fn shift(&mut self) -> &[u8] {
		let start = self.start;
		self.start = self.pos;
		&self.buf.content()[start..self.pos]
	}

	/// Byte offset of the head.
	pub fn offset(&self) -> usize {
		self.pos
	}

	/// The whole content, excluding the sentinel.
	pub fn bytes(&self) -> &[u8] {
		self.buf.content()
	}

	pub fn len(&self) -> usize {
		self.buf.len()
	}

	pub fn is_empty(&self) -> bool {
		self.buf.len() == 0
	}

	/// Moves the head and the selection back to the beginning.
	pub fn reset(&mut self) {
		self.start = 0;
		self.pos = 0;
		self.tracker = Tracker::new();
	}

	/// Line and column of the head.
	pub fn position(&self) -> Position {
		self.tracker.position()
	}

	/// Line and column of an arbitrary byte offset, computed by scanning from
	/// the beginning. Offsets past the end are clamped.
	pub fn position_at(&self, offset: usize) -> Position {
		position_at(self.buf.content(), offset)
	}

	/// Consumes the input and returns its content. An input built from a
	/// vector hands back that vector's allocation.
	pub fn into_inner(self) -> Vec<u8> {
		self.buf.into_vec()
	}
}

impl From<Vec<u8>> for Input<'static> {
	fn from(bytes: Vec<u8>) -> Self {
		Input::from_vec(bytes)
	}
}

impl From<String> for Input<'static> {
	fn from(text: String) -> Self {
		Input::from_vec(text.into_bytes())
	}
}

impl From<&[u8]> for Input<'static> {
	fn from(bytes: &[u8]) -> Self {
		Input::from_bytes(bytes)
	}
}

impl From<&str> for Input<'static> {
	fn from(text: &str) -> Self {
		Input::from_bytes(text.as_bytes())
	}
}

#[cfg(test)]
pub mod tests {
	use std::io;

	use super::*;

	#[test]
	fn test_peek_and_advance() {
		let mut input = Input::from("abc");
		assert_eq!(input.peek(0), b'a');
		assert_eq!(input.peek(2), b'c');
		assert_eq!(input.peek(3), 0);

		input.advance(1);
		assert_eq!(input.peek(0), b'b');
		assert_eq!(input.offset(), 1);

		input.advance(0);
		assert_eq!(input.offset(), 1);
	}

	#[test]
	fn test_sentinel_at_every_position() {
		let mut input = Input::from("héllo\n");
		for _ in 0..=input.len() {
			let rest = input.len() - input.offset();
			assert_eq!(input.peek(rest), 0);
			input.advance(1);
		}
		assert_eq!(input.offset(), input.len());
	}

	#[test]
	fn test_peek_err() {
		let mut input = Input::from("ab");
		assert!(input.err().is_none());
		assert!(input.peek_err(1).is_none());
		assert!(input.peek_err(2).is_some_and(|err| err.is_eof()));

		input.advance(2);
		assert!(input.is_eof());
		assert!(input.err().is_some_and(|err| err.is_eof()));
		assert_eq!(input.peek(0), 0);
	}

	#[test]
	fn test_empty_input() {
		let input = Input::from("");
		assert!(input.is_empty());
		assert_eq!(input.len(), 0);
		assert_eq!(input.peek(0), 0);
		assert!(input.err().is_some_and(|err| err.is_eof()));
		assert!(input.bytes().is_empty());
		assert_eq!(input.peek_rune(0).len, 1);
	}

	#[test]
	fn test_advance_clamps() {
		let mut input = Input::from("a\nbc");
		input.advance(100);
		assert_eq!(input.offset(), 4);
		assert_eq!(input.position(), Position::new(2, 3));

		input.advance(usize::MAX);
		assert_eq!(input.offset(), 4);
	}

	#[test]
	fn test_advance_rune() {
		let mut input = Input::from("aæ\u{10000}");
		input.advance_rune();
		assert_eq!(input.offset(), 1);
		input.advance_rune();
		assert_eq!(input.offset(), 3);
		input.advance_rune();
		assert_eq!(input.offset(), 7);
		assert_eq!(input.position(), Position::new(1, 4));

		// at the end the sentinel counts as a single byte, which clamps
		input.advance_rune();
		assert_eq!(input.offset(), 7);
	}

	#[test]
	fn test_peek_rune() {
		let input = Input::from("€a");
		let rune = input.peek_rune(0);
		assert_eq!(rune.to_char(), Some('€'));
		assert_eq!(rune.len, 3);
		assert_eq!(input.peek_rune(3).to_char(), Some('a'));
		assert_eq!(input.peek_rune(4).code_point, 0);
	}

	#[test]
	fn test_shift_and_lexeme() {
		let mut input = Input::from("let x");
		input.advance(3);
		assert_eq!(input.lexeme(), b"let");
		assert_eq!(input.lexeme(), b"let");
		assert_eq!(input.shift(), b"let");
		assert_eq!(input.lexeme(), b"");

		input.advance(1);
		input.skip();
		input.advance(1);
		assert_eq!(input.shift(), b"x");
		assert_eq!(input.pos(), 0);
	}

	#[test]
	fn test_skip_then_shift_is_empty() {
		let mut input = Input::from("abc");
		input.advance(2);
		input.skip();
		assert_eq!(input.shift(), b"");
		assert_eq!(input.offset(), 2);
	}

	#[test]
	fn test_pos_is_relative_to_selection() {
		let mut input = Input::from("abcdef");
		input.advance(2);
		input.skip();
		input.advance(3);
		assert_eq!(input.pos(), 3);
		assert_eq!(input.offset(), 5);
	}

	#[test]
	fn test_rewind() {
		let mut input = Input::from("abc\ndef");
		input.advance(1);
		input.skip();
		let mark = input.pos();
		input.advance(5);
		assert_eq!(input.position(), Position::new(2, 3));

		input.rewind(mark);
		assert_eq!(input.offset(), 1);
		assert_eq!(input.position(), Position::new(1, 2));
		assert_eq!(input.lexeme(), b"");

		input.rewind(4);
		assert_eq!(input.offset(), 5);
		assert_eq!(input.position(), Position::new(2, 2));
		assert_eq!(input.lexeme(), b"bc\nd");
	}

	#[test]
	fn test_reset() {
		let mut input = Input::from("ab\ncd");
		input.advance(4);
		input.skip();
		input.reset();
		assert_eq!(input.offset(), 0);
		assert_eq!(input.pos(), 0);
		assert_eq!(input.position(), Position::START);

		input.reset();
		assert_eq!(input.position(), Position::START);
	}

	#[test]
	fn test_position_at_matches_advance() {
		let text = "fn main() {\n\tlet π = 3.14;\r\n}\n\u{1F600}";
		let mut input = Input::from(text);
		for offset in 0..=input.len() {
			input.reset();
			input.advance(offset);
			assert_eq!(input.position(), input.position_at(offset), "offset {offset}");
		}
		assert_eq!(input.position_at(input.len() + 10), input.position_at(input.len()));
	}

	#[test]
	fn test_lease_and_restore() {
		let mut storage = *b"key=value;";
		{
			let mut input = Input::lease(&mut storage, 9);
			assert_eq!(input.bytes(), b"key=value");
			input.advance(9);
			assert_eq!(input.peek(0), 0);

			input.restore();
			assert!(input.is_empty());
			assert_eq!(input.offset(), 0);
			assert_eq!(input.position(), Position::START);

			input.restore();
		}
		assert_eq!(&storage, b"key=value;");
	}

	#[test]
	fn test_lease_restored_on_drop() {
		let mut storage = *b"abc\n";
		let input = Input::lease(&mut storage, 3);
		assert_eq!(input.len(), 3);
		drop(input);
		assert_eq!(&storage, b"abc\n");
	}

	#[test]
	fn test_restore_without_lease_keeps_state() {
		let mut input = Input::from("abc");
		input.advance(2);
		input.restore();
		assert_eq!(input.offset(), 2);
		assert_eq!(input.bytes(), b"abc");
	}

	#[test]
	fn test_from_reader() {
		let mut input = Input::from_reader(io::Cursor::new("x\ny"));
		assert_eq!(input.bytes(), b"x\ny");
		input.advance(3);
		assert_eq!(input.position(), Position::new(2, 2));
	}

	#[test]
	fn test_failed_input_is_permanent() {
		let mut input = Input::failed(InputError::from(io::Error::other("disk on fire")));
		assert!(input.is_empty());
		assert_eq!(input.peek(0), 0);

		for _ in 0..3 {
			assert!(matches!(input.err(), Some(InputError::Io(_))));
			input.advance(1);
			input.reset();
		}
		assert!(matches!(input.peek_err(0), Some(InputError::Io(_))));
	}

	#[test]
	fn test_into_inner() {
		let input = Input::from(String::from("owned"));
		assert_eq!(input.into_inner(), b"owned");

		let input = Input::from(&b"copied"[..]);
		assert_eq!(input.into_inner(), b"copied");
	}
}
