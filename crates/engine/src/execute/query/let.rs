// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use flwor_core::BindingContext;
use flwor_type::{Result, Sequence, Value};
use tracing::instrument;

use crate::{
	clause::LetClause,
	error::Advance,
	execute::{Evaluator, ExecutionContext, TupleNode},
};

pub(crate) struct LetNode {
	input: Box<Evaluator>,
	clause: LetClause,
}

impl LetNode {
	pub(crate) fn new(input: Box<Evaluator>, clause: LetClause) -> Self {
		Self {
			input,
			clause,
		}
	}

	fn evaluate(&self, ctx: &BindingContext) -> Result<Sequence> {
		if !self.clause.score {
			return self.clause.expr.evaluate(ctx);
		}

		let mut total = 0.0;
		let mut count = 0usize;
		for item in self.clause.expr.iter_scored(ctx)? {
			let (_, score) = item?;
			total += score;
			count += 1;
		}
		let average = if count == 0 {
			0.0
		} else {
			total / count as f64
		};
		Ok(Sequence::singleton(Value::Float8(average)))
	}
}

impl TupleNode for LetNode {
	#[instrument(name = "flwor::let::advance", level = "trace", skip_all)]
	fn advance(&mut self, ctx: &mut ExecutionContext) -> Advance {
		ctx.check()?;
		if !self.input.advance(ctx)? {
			return Ok(false);
		}
		let value = self.evaluate(&ctx.bindings).map_err(|e| e.with_clause(&self.clause))?;
		ctx.bindings.set(&self.clause.var, value).map_err(|e| e.with_clause(&self.clause))?;
		Ok(true)
	}
}

#[cfg(test)]
mod tests {
	use std::sync::atomic::Ordering;

	use flwor_core::{Expr, Interrupt, Scope, Variable};
	use flwor_testing::{counting, int};

	use super::*;
	use crate::{error::Halt, execute::query::start::StartNode};

	fn node(var: &Variable, expr: Expr) -> LetNode {
		LetNode::new(Box::new(Evaluator::Start(StartNode::new())), LetClause::new(var, expr))
	}

	#[test]
	fn test_binds_once_per_input_tuple() {
		let mut scope = Scope::new();
		let x = scope.declare("x");
		let (expr, evaluations) = counting(int(1));
		let mut node = node(&x, expr);

		let mut ctx = ExecutionContext::new(Interrupt::new(), 1);
		assert!(node.advance(&mut ctx).unwrap());
		assert_eq!(ctx.bindings.get(&x).unwrap(), &Sequence::singleton(Value::int8(1)));
		assert!(!node.advance(&mut ctx).unwrap());
		assert_eq!(evaluations.load(Ordering::Relaxed), 1);
	}

	#[test]
	fn test_stopped_before_evaluating() {
		let mut scope = Scope::new();
		let x = scope.declare("x");
		let (expr, evaluations) = counting(int(1));
		let mut node = node(&x, expr);

		let interrupt = Interrupt::new();
		interrupt.stop();
		let mut ctx = ExecutionContext::new(interrupt, 1);
		assert!(matches!(node.advance(&mut ctx), Err(Halt::Stopped)));
		assert_eq!(evaluations.load(Ordering::Relaxed), 0);
		assert!(!ctx.bindings.is_bound(x.id));
	}
}
