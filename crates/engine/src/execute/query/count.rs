// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use flwor_type::{Sequence, Value};
use tracing::instrument;

use crate::{
	clause::CountClause,
	error::Advance,
	execute::{Evaluator, ExecutionContext, TupleNode},
};

pub(crate) struct CountNode {
	input: Box<Evaluator>,
	clause: CountClause,
	count: i64,
}

impl CountNode {
	pub(crate) fn new(input: Box<Evaluator>, clause: CountClause) -> Self {
		Self {
			input,
			clause,
			count: 0,
		}
	}
}

impl TupleNode for CountNode {
	#[instrument(name = "flwor::count::advance", level = "trace", skip_all)]
	fn advance(&mut self, ctx: &mut ExecutionContext) -> Advance {
		ctx.check()?;
		if !self.input.advance(ctx)? {
			return Ok(false);
		}
		self.count += 1;
		ctx.bindings
			.set(&self.clause.var, Sequence::singleton(Value::Int8(self.count)))
			.map_err(|e| e.with_clause(&self.clause))?;
		Ok(true)
	}
}
