// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Byte storage terminated by a sentinel.
//!
//! Every buffer is one byte longer than its logical content and the extra
//! byte is always `0`. Peeking exactly one byte past the content therefore
//! reads the sentinel instead of running off the end.

use std::{
	fmt::{self, Debug, Formatter},
	mem,
};

use tracing::trace;

static SENTINEL_ONLY: [u8; 1] = [0];

enum Storage<'a> {
	/// Shared sentinel for empty input and failed loads.
	Empty,
	/// Owned bytes with the sentinel pushed onto the end.
	Owned(Vec<u8>),
	/// Caller-owned bytes whose first spare byte was overwritten by the
	/// sentinel. `saved` holds the overwritten byte until it is restored.
	Leased {
		data: &'a mut [u8],
		saved: Option<u8>,
	},
}

pub(crate) struct Buffer<'a> {
	storage: Storage<'a>,
}

impl Buffer<'static> {
	pub(crate) fn empty() -> Self {
		Self {
			storage: Storage::Empty,
		}
	}

	/// Takes ownership of `bytes` and appends the sentinel. No copy happens
	/// when the vector has spare capacity.
	pub(crate) fn from_vec(mut bytes: Vec<u8>) -> Self {
		if bytes.is_empty() {
			return Self::empty();
		}
		trace!(len = bytes.len(), reused = bytes.capacity() > bytes.len(), "terminating owned buffer");
		bytes.push(0);
		Self {
			storage: Storage::Owned(bytes),
		}
	}

	pub(crate) fn from_slice(bytes: &[u8]) -> Self {
		if bytes.is_empty() {
			return Self::empty();
		}
		let mut owned = Vec::with_capacity(bytes.len() + 1);
		owned.extend_from_slice(bytes);
		Self::from_vec(owned)
	}
}

impl<'a> Buffer<'a> {
	/// Uses `data[..len]` as the content and `data[len]` as the sentinel,
	/// remembering the byte it overwrites. Falls back to a copy when `data`
	/// has no byte to spare.
	///
	/// # Panics
	/// Panics if `len > data.len()`.
	pub(crate) fn lease(data: &'a mut [u8], len: usize) -> Self {
		assert!(len <= data.len(), "lease of {len} bytes from a slice of {} bytes", data.len());
		if len == 0 {
			return Buffer::empty();
		}
		if len == data.len() {
			return Buffer::from_slice(data);
		}

		let data = &mut data[..=len];
		let saved = mem::replace(&mut data[len], 0);
		trace!(len, saved, "leased trailing byte for sentinel");
		Self {
			storage: Storage::Leased {
				data,
				saved: Some(saved),
			},
		}
	}

	/// The content followed by the sentinel.
	#[inline]
	pub(crate) fn terminated(&self) -> &[u8] {
		match &self.storage {
			Storage::Empty => &SENTINEL_ONLY[..],
			Storage::Owned(bytes) => bytes.as_slice(),
			Storage::Leased {
				data,
				..
			} => &data[..],
		}
	}

	/// The content without the sentinel.
	#[inline]
	pub(crate) fn content(&self) -> &[u8] {
		let terminated = self.terminated();
		&terminated[..terminated.len() - 1]
	}

	#[inline]
	pub(crate) fn len(&self) -> usize {
		self.terminated().len() - 1
	}

	/// Writes a leased byte back to the caller's storage and releases the
	/// lease, leaving an empty buffer. Returns whether a byte was written
	/// back; a buffer that holds no lease is left untouched.
	pub(crate) fn restore(&mut self) -> bool {
		let Storage::Leased {
			data,
			saved,
		} = &mut self.storage
		else {
			return false;
		};
		let Some(byte) = saved.take() else {
			return false;
		};

		let last = data.len() - 1;
		data[last] = byte;
		trace!(offset = last, byte, "restored leased byte");

		self.storage = Storage::Empty;
		true
	}

	/// The content as an owned vector. Owned storage hands back its own
	/// allocation.
	pub(crate) fn into_vec(mut self) -> Vec<u8> {
		match mem::replace(&mut self.storage, Storage::Empty) {
			Storage::Owned(mut bytes) => {
				bytes.pop();
				bytes
			}
			storage => {
				self.storage = storage;
				self.content().to_vec()
			}
		}
	}
}

impl Debug for Buffer<'_> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		let kind = match self.storage {
			Storage::Empty => "empty",
			Storage::Owned(_) => "owned",
			Storage::Leased {
				..
			} => "leased",
		};
		f.debug_struct("Buffer").field("kind", &kind).field("len", &self.len()).finish()
	}
}

impl Drop for Buffer<'_> {
	fn drop(&mut self) {
		self.restore();
	}
}
