// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::iter::Peekable;

use flwor_core::ScoredSequence;
use flwor_type::{Sequence, Value};
use tracing::instrument;

use crate::{
	clause::ForClause,
	error::Advance,
	execute::{Evaluator, ExecutionContext, TupleNode},
};

pub(crate) struct ForNode {
	input: Box<Evaluator>,
	clause: ForClause,
	items: Option<Peekable<ScoredSequence>>,
	position: i64,
}

impl ForNode {
	pub(crate) fn new(input: Box<Evaluator>, clause: ForClause) -> Self {
		Self {
			input,
			clause,
			items: None,
			position: 0,
		}
	}

	fn bind(&self, ctx: &mut ExecutionContext, item: Sequence, position: i64, score: f64) -> flwor_type::Result<()> {
		ctx.bindings.set(&self.clause.var, item)?;
		if let Some(var) = &self.clause.position {
			ctx.bindings.set(var, Sequence::singleton(Value::Int8(position)))?;
		}
		if let Some(var) = &self.clause.score {
			ctx.bindings.set(var, Sequence::singleton(Value::Float8(score)))?;
		}
		Ok(())
	}
}

impl TupleNode for ForNode {
	#[instrument(name = "flwor::for::advance", level = "trace", skip_all)]
	fn advance(&mut self, ctx: &mut ExecutionContext) -> Advance {
		loop {
			ctx.check()?;

			if let Some(items) = self.items.as_mut() {
				match items.next() {
					Some(item) => {
						let (item, score) = item.map_err(|e| e.with_clause(&self.clause))?;
						self.position += 1;
						self.bind(ctx, Sequence::singleton(item), self.position, score)
							.map_err(|e| e.with_clause(&self.clause))?;
						return Ok(true);
					}
					None => self.items = None,
				}
			}

			if !self.input.advance(ctx)? {
				return Ok(false);
			}

			let mut items = self
				.clause
				.expr
				.iter_scored(&ctx.bindings)
				.map_err(|e| e.with_clause(&self.clause))?
				.peekable();
			self.position = 0;

			if self.clause.allowing_empty && items.peek().is_none() {
				self.bind(ctx, Sequence::empty(), 0, 0.0).map_err(|e| e.with_clause(&self.clause))?;
				return Ok(true);
			}
			self.items = Some(items);
		}
	}
}
