// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

/// Line and column (both 1-based) of byte `offset` in `text`, found by walking
/// its `char`s one at a time. `offset` is clamped to the length of `text` and
/// must fall on a char boundary.
pub fn reference_position(text: &str, offset: usize) -> (usize, usize) {
	let mut line = 1;
	let mut column = 1;
	for ch in text[..offset.min(text.len())].chars() {
		if ch == '\n' {
			line += 1;
			column = 1;
		} else {
			column += 1;
		}
	}
	(line, column)
}

/// Byte offsets of every char boundary in `text`, including `text.len()`.
pub fn char_boundaries(text: &str) -> Vec<usize> {
	text.char_indices().map(|(i, _)| i).chain(std::iter::once(text.len())).collect()
}
