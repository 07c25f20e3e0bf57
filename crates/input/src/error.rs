// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{io, sync::Arc};

/// Errors reported by [`crate::Input::err`] and [`crate::Input::peek_err`].
///
/// `Eof` is the regular end-of-loop signal of a tokenizer. The remaining
/// variants are load errors: once recorded they are reported for the whole
/// lifetime of the input.
#[derive(Debug, Clone, thiserror::Error)]
pub enum InputError {
	#[error("end of input")]
	Eof,

	#[error("failed to read input: {0}")]
	Io(#[source] Arc<io::Error>),

	#[error("input exceeds the limit of {limit} bytes")]
	TooLarge {
		limit: u64,
	},
}

impl InputError {
	pub fn is_eof(&self) -> bool {
		matches!(self, InputError::Eof)
	}
}

impl From<io::Error> for InputError {
	fn from(err: io::Error) -> Self {
		InputError::Io(Arc::new(err))
	}
}
