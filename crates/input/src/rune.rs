// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

/// A decoded code point together with the number of bytes it occupies.
///
/// Decoding is best effort: the length is inferred from the leading byte and
/// from how many bytes remain before the end of the input, continuation bytes
/// are masked rather than validated. Malformed input therefore still yields a
/// deterministic rune of 1 to 4 bytes, which keeps a tokenizer loop moving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rune {
	pub code_point: u32,
	pub len: usize,
}

impl Rune {
	/// The rune as a `char`, or `None` for surrogates and values above
	/// `U+10FFFF` that malformed input can produce.
	pub fn to_char(&self) -> Option<char> {
		char::from_u32(self.code_point)
	}

	pub fn is_ascii(&self) -> bool {
		self.len == 1 && self.code_point < 0x80
	}
}

/// Decodes the rune starting at `at` in `buf`, where the last byte of `buf`
/// is the sentinel.
///
/// `at` must not be past the sentinel. At the sentinel this yields the rune
/// `0` of length 1.
pub(crate) fn decode(buf: &[u8], at: usize) -> Rune {
	let c = buf[at];
	// bytes left in the logical input, counting `c`
	let rest = buf.len() - 1 - at;

	match sequence_len(c).min(rest) {
		0 | 1 => Rune {
			code_point: c as u32,
			len: 1,
		},
		2 => Rune {
			code_point: (c as u32 & 0x1F) << 6 | cont(buf[at + 1]),
			len: 2,
		},
		3 => Rune {
			code_point: (c as u32 & 0x0F) << 12 | cont(buf[at + 1]) << 6 | cont(buf[at + 2]),
			len: 3,
		},
		_ => Rune {
			code_point: (c as u32 & 0x07) << 18
				| cont(buf[at + 1]) << 12
				| cont(buf[at + 2]) << 6
				| cont(buf[at + 3]),
			len: 4,
		},
	}
}

/// Length of the sequence `lead` starts, judged from its high bits alone.
/// Continuation bytes and plain bytes both count as a sequence of one.
pub(crate) fn sequence_len(lead: u8) -> usize {
	match lead {
		0x00..=0xBF => 1,
		0xC0..=0xDF => 2,
		0xE0..=0xEF => 3,
		0xF0..=0xFF => 4,
	}
}

#[inline]
fn cont(b: u8) -> u32 {
	(b & 0x3F) as u32
}
