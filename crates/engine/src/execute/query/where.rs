// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use tracing::instrument;

use crate::{
	clause::WhereClause,
	error::Advance,
	execute::{Evaluator, ExecutionContext, TupleNode},
};

pub(crate) struct WhereNode {
	input: Box<Evaluator>,
	clause: WhereClause,
}

impl WhereNode {
	pub(crate) fn new(input: Box<Evaluator>, clause: WhereClause) -> Self {
		Self {
			input,
			clause,
		}
	}
}

impl TupleNode for WhereNode {
	#[instrument(name = "flwor::where::advance", level = "trace", skip_all)]
	fn advance(&mut self, ctx: &mut ExecutionContext) -> Advance {
		loop {
			ctx.check()?;
			if !self.input.advance(ctx)? {
				return Ok(false);
			}
			if self.clause.predicate.ebv(&ctx.bindings).map_err(|e| e.with_clause(&self.clause))? {
				return Ok(true);
			}
		}
	}
}
