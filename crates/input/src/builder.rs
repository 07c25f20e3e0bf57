// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::io::Read;

use tracing::{debug, instrument, warn};

use crate::{Result, error::InputError, input::Input};

/// Configures how an [`Input`] is loaded from a reader.
///
/// ```
/// use lexbuf_input::Input;
///
/// let input = Input::builder().capacity(64).limit(1 << 20).load(&b"a + b"[..]);
/// assert_eq!(input.bytes(), b"a + b");
/// ```
#[derive(Debug, Clone, Default)]
pub struct InputBuilder {
	capacity: Option<usize>,
	limit: Option<u64>,
}

impl InputBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	/// Expected input size in bytes. The read buffer is allocated with room
	/// for this many bytes plus the sentinel.
	pub fn capacity(mut self, capacity: usize) -> Self {
		self.capacity = Some(capacity);
		self
	}

	/// Maximum number of bytes to accept. A reader producing more fails with
	/// [`InputError::TooLarge`].
	pub fn limit(mut self, limit: u64) -> Self {
		self.limit = Some(limit);
		self
	}

	/// Reads `reader` to the end. On failure the returned input is empty and
	/// reports the load error from [`Input::err`].
	pub fn load<R: Read>(self, reader: R) -> Input<'static> {
		match self.try_load(reader) {
			Ok(input) => input,
			Err(err) => {
				warn!(error = %err, "failed to load input, continuing with an empty buffer");
				Input::failed(err)
			}
		}
	}

	/// Reads `reader` to the end, returning the load error instead of an
	/// empty input.
	#[instrument(name = "input::load", level = "debug", skip(self, reader), fields(capacity = ?self.capacity, limit = ?self.limit))]
	pub fn try_load<R: Read>(self, reader: R) -> Result<Input<'static>> {
		let mut bytes = Vec::with_capacity(self.capacity.map_or(0, |capacity| capacity.saturating_add(1)));

		match self.limit {
			Some(limit) => {
				// one byte over the limit is enough to tell it was exceeded
				reader.take(limit.saturating_add(1)).read_to_end(&mut bytes)?;
				if bytes.len() as u64 > limit {
					return Err(InputError::TooLarge {
						limit,
					});
				}
			}
			None => {
				let mut reader = reader;
				reader.read_to_end(&mut bytes)?;
			}
		}

		debug!(len = bytes.len(), "loaded input");
		Ok(Input::from_vec(bytes))
	}
}
