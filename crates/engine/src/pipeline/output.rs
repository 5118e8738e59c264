// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use flwor_core::{Interrupt, LazySequence};
use flwor_type::{Sequence, Value};
use tracing::{debug, instrument};

use crate::{
	error::Halt,
	execute::{Evaluator, ExecutionContext, TupleNode, query::compile::compile},
	plan::Plan,
};

/// One execution of a pipeline, pulled item by item.
///
/// The evaluator chain is only built on the first pull. After exhaustion,
/// an error or a stop, the chain and every buffer it holds are dropped and
/// the output keeps returning `None`.
pub struct Output {
	plan: Arc<Plan>,
	ctx: ExecutionContext,
	chain: Option<Evaluator>,
	current: Option<LazySequence>,
	started: bool,
	done: bool,
}

impl Output {
	pub(crate) fn new(plan: Arc<Plan>, interrupt: Interrupt) -> Self {
		let slots = plan.slots;
		Self {
			plan,
			ctx: ExecutionContext::new(interrupt, slots),
			chain: None,
			current: None,
			started: false,
			done: false,
		}
	}

	pub fn next_item(&mut self) -> Result<Option<Value>, Halt> {
		match self.pull() {
			Ok(Some(item)) => Ok(Some(item)),
			Ok(None) => {
				self.finish();
				Ok(None)
			}
			Err(halt) => {
				debug!(stopped = halt.is_stopped(), "pipeline halted");
				self.finish();
				Err(halt)
			}
		}
	}

	/// Drains every remaining item.
	pub fn collect_sequence(mut self) -> Result<Sequence, Halt> {
		let mut result = Sequence::empty();
		while let Some(item) = self.next_item()? {
			result.push(item);
		}
		Ok(result)
	}

	pub fn is_done(&self) -> bool {
		self.done
	}

	#[instrument(name = "flwor::output::start", level = "trace", skip_all)]
	fn start(&mut self) -> Result<(), Halt> {
		self.started = true;
		self.ctx.bindings.clear();
		for (var, value) in &self.plan.presets {
			self.ctx
				.bindings
				.set(var, value.clone())
				.map_err(|e| e.with_clause(format_args!("let {} := {}", var, value)))?;
		}
		self.chain = Some(compile(&self.plan.clauses));
		Ok(())
	}

	fn pull(&mut self) -> Result<Option<Value>, Halt> {
		if self.done {
			return Ok(None);
		}
		if !self.started {
			self.start()?;
		}

		loop {
			self.ctx.check()?;

			if let Some(current) = self.current.as_mut() {
				match current.next() {
					Some(Ok(item)) => return Ok(Some(item)),
					Some(Err(err)) => return Err(err.with_clause(self.return_clause()).into()),
					None => self.current = None,
				}
			}

			let Some(chain) = self.chain.as_mut() else {
				return Ok(None);
			};
			if !chain.advance(&mut self.ctx)? {
				return Ok(None);
			}

			let items = self.plan.ret.iter(&self.ctx.bindings).map_err(|e| e.with_clause(self.return_clause()))?;
			self.current = Some(items);
		}
	}

	fn return_clause(&self) -> String {
		format!("return {}", self.plan.ret.explain())
	}

	fn finish(&mut self) {
		self.done = true;
		self.current = None;
		self.chain = None;
		self.ctx.bindings.clear();
	}
}

impl Iterator for Output {
	type Item = Result<Value, Halt>;

	fn next(&mut self) -> Option<Self::Item> {
		self.next_item().transpose()
	}
}

impl std::iter::FusedIterator for Output {}
