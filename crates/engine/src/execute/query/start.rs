// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use crate::{
	error::Advance,
	execute::{ExecutionContext, TupleNode},
};

/// Produces exactly one empty tuple.
pub(crate) struct StartNode {
	done: bool,
}

impl StartNode {
	pub(crate) fn new() -> Self {
		Self {
			done: false,
		}
	}
}

impl TupleNode for StartNode {
	fn advance(&mut self, ctx: &mut ExecutionContext) -> Advance {
		ctx.check()?;
		if self.done {
			return Ok(false);
		}
		self.done = true;
		Ok(true)
	}
}
