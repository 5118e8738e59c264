// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use flwor_core::{BindingContext, Interrupt};

use crate::{
	error::{Advance, Halt},
	execute::query::{
		count::CountNode,
		r#for::ForNode,
		group::GroupByNode,
		r#let::LetNode,
		order::OrderByNode,
		start::StartNode,
		r#where::WhereNode,
		window::{sliding::SlidingWindowNode, tumbling::TumblingWindowNode},
	},
};

pub(crate) mod query;

/// State shared by every evaluator of one execution.
pub(crate) struct ExecutionContext {
	pub bindings: BindingContext,
	pub interrupt: Interrupt,
}

impl ExecutionContext {
	pub(crate) fn new(interrupt: Interrupt, slots: usize) -> Self {
		Self {
			bindings: BindingContext::with_capacity(slots),
			interrupt,
		}
	}

	/// Fails fast once the interrupt has been raised.
	#[inline]
	pub(crate) fn check(&self) -> Result<(), Halt> {
		if self.interrupt.is_stopped() {
			return Err(Halt::Stopped);
		}
		Ok(())
	}
}

/// Pull protocol shared by all clause evaluators.
pub(crate) trait TupleNode {
	/// Produces the next tuple by updating `ctx.bindings`. Returns `Ok(false)`
	/// once exhausted; calling again afterwards is not supported.
	fn advance(&mut self, ctx: &mut ExecutionContext) -> Advance;
}

pub(crate) enum Evaluator {
	Start(StartNode),
	For(ForNode),
	Let(LetNode),
	Where(WhereNode),
	Count(CountNode),
	OrderBy(OrderByNode),
	GroupBy(GroupByNode),
	TumblingWindow(TumblingWindowNode),
	SlidingWindow(SlidingWindowNode),
}

impl TupleNode for Evaluator {
	fn advance(&mut self, ctx: &mut ExecutionContext) -> Advance {
		match self {
			Evaluator::Start(node) => node.advance(ctx),
			Evaluator::For(node) => node.advance(ctx),
			Evaluator::Let(node) => node.advance(ctx),
			Evaluator::Where(node) => node.advance(ctx),
			Evaluator::Count(node) => node.advance(ctx),
			Evaluator::OrderBy(node) => node.advance(ctx),
			Evaluator::GroupBy(node) => node.advance(ctx),
			Evaluator::TumblingWindow(node) => node.advance(ctx),
			Evaluator::SlidingWindow(node) => node.advance(ctx),
		}
	}
}

impl TupleNode for Box<Evaluator> {
	fn advance(&mut self, ctx: &mut ExecutionContext) -> Advance {
		(**self).advance(ctx)
	}
}
