// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

#![cfg_attr(not(debug_assertions), deny(warnings))]
#![cfg_attr(not(debug_assertions), deny(clippy::unwrap_used))]
#![cfg_attr(not(debug_assertions), deny(clippy::expect_used))]

pub mod error;
pub mod hash;
pub mod value;

pub use error::{Error, IntoDiagnostic, diagnostic::Diagnostic};
pub use value::{
	Value,
	sequence::Sequence,
	r#type::{Occurrence, SequenceType, Type},
};

pub type Result<T> = std::result::Result<T, Error>;
