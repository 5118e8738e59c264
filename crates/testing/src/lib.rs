// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Helpers for driving clause pipelines in tests: small stand-in expressions
//! and a tracing subscriber that honours `RUST_LOG`.

pub mod expression;
pub mod subscriber;

pub use expression::{
	Counting, FailAfter, Failing, Func, Literal, Scored, counting, fail_after, failing, func, impure, int, ints,
	literal, range, scored, strs, unary, var,
};
pub use subscriber::init_tracing;
