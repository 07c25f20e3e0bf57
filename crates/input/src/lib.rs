// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! A sentinel-terminated byte cursor for hand-written tokenizers.
//!
//! [`Input`] owns (or leases) the whole input up front and offers the
//! operations a lexer needs on every character: peeking ahead without
//! consuming, selecting and extracting lexemes, rewinding to a mark and
//! reporting line and column for diagnostics.
//!
//! ```
//! use lexbuf_input::{Input, Position};
//!
//! let mut input = Input::from("let x = 1;");
//! while input.peek(0).is_ascii_alphabetic() {
//! 	input.advance(1);
//! }
//! assert_eq!(input.shift(), b"let");
//! assert_eq!(input.position(), Position::new(1, 4));
//! ```

mod buffer;
pub mod builder;
pub mod error;
pub mod input;
pub mod position;
pub mod rune;

pub use builder::InputBuilder;
pub use error::InputError;
pub use input::Input;
pub use position::Position;
pub use rune::Rune;

pub type Result<T> = std::result::Result<T, InputError>;
