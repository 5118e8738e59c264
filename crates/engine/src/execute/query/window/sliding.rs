// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::collections::VecDeque;

use flwor_core::LazySequence;
use flwor_type::{Result, Sequence, Value};
use tracing::{instrument, trace};

use crate::{
	clause::window::WindowClause,
	error::{Advance, Halt},
	execute::{Evaluator, ExecutionContext, TupleNode, query::window::Probe},
};

/// Items from the current start candidate onwards that have been pulled but
/// not yet released, with one item of look-behind.
struct Queue {
	items: LazySequence,
	queued: VecDeque<Value>,
	/// Item released just before `queued[0]`.
	previous: Option<Value>,
	/// Position of `queued[0]`.
	position: i64,
	exhausted: bool,
}

impl Queue {
	fn new(items: LazySequence) -> Self {
		Self {
			items,
			queued: VecDeque::new(),
			previous: None,
			position: 1,
			exhausted: false,
		}
	}

	/// Makes sure `queued[index]` exists if the source has it.
	fn fill(&mut self, index: usize) -> Result<bool> {
		while self.queued.len() <= index {
			if self.exhausted {
				return Ok(false);
			}
			match self.items.next().transpose()? {
				Some(item) => self.queued.push_back(item),
				None => self.exhausted = true,
			}
		}
		Ok(true)
	}

	/// Probe of `queued[index]`; the look-ahead item is pulled only when
	/// `with_next` is set.
	fn probe(&mut self, index: usize, with_next: bool) -> Result<Option<Probe>> {
		if !self.fill(index)? {
			return Ok(None);
		}
		if with_next {
			self.fill(index + 1)?;
		}
		let previous = match index {
			0 => self.previous.clone(),
			i => self.queued.get(i - 1).cloned(),
		};
		Ok(self.queued.get(index).cloned().map(|item| Probe {
			item,
			position: self.position + index as i64,
			previous,
			next: if with_next {
				self.queued.get(index + 1).cloned()
			} else {
				None
			},
		}))
	}

	/// Releases the front item; the next start candidate follows it.
	fn release(&mut self) {
		if let Some(item) = self.queued.pop_front() {
			self.previous = Some(item);
			self.position += 1;
		}
	}
}

/// Possibly overlapping windows. Each start match opens a window closed by
/// the first end match at or after it; the next start scan resumes right
/// after the matched start item. Under `only`, the first window without an
/// end match ends production for the source.
pub(crate) struct SlidingWindowNode {
	input: Box<Evaluator>,
	clause: WindowClause,
	queue: Option<Queue>,
}

impl SlidingWindowNode {
	pub(crate) fn new(input: Box<Evaluator>, clause: WindowClause) -> Self {
		Self {
			input,
			clause,
			queue: None,
		}
	}

	/// Tests the end condition from the start item onwards. Returns the
	/// number of items in the window and whether the end matched.
	fn scan_end(&mut self, ctx: &mut ExecutionContext) -> std::result::Result<(usize, bool), Halt> {
		let (Some(queue), Some(end)) = (self.queue.as_mut(), self.clause.end.as_ref()) else {
			return Ok((0, false));
		};

		let mut index = 0;
		loop {
			ctx.check()?;
			let Some(probe) = queue.probe(index, end.condition.needs_next())? else {
				return Ok((index, false));
			};
			if probe.matches(&end.condition, &mut ctx.bindings)? {
				return Ok((index + 1, true));
			}
			index += 1;
		}
	}

	fn step(&mut self, ctx: &mut ExecutionContext) -> Advance {
		loop {
			ctx.check()?;

			if self.queue.is_none() {
				if !self.input.advance(ctx)? {
					return Ok(false);
				}
				let items = self.clause.expr.iter(&ctx.bindings)?;
				self.queue = Some(Queue::new(items));
			}
			let Some(queue) = self.queue.as_mut() else {
				continue;
			};

			let Some(start) = queue.probe(0, self.clause.start.needs_next())? else {
				self.queue = None;
				continue;
			};
			if !start.matches(&self.clause.start, &mut ctx.bindings)? {
				queue.release();
				continue;
			}

			let (len, found) = self.scan_end(ctx)?;
			let Some(queue) = self.queue.as_mut() else {
				return Ok(false);
			};
			let window: Vec<Value> = queue.queued.iter().take(len).cloned().collect();
			queue.release();

			// an unmatched end closes window production for this source
			if !found && self.clause.end.as_ref().is_some_and(|end| end.only) {
				trace!(position = start.position, items = window.len(), "dangling window discarded");
				self.queue = None;
				continue;
			}

			trace!(position = start.position, items = window.len(), "sliding window");
			ctx.bindings.set(&self.clause.var, Sequence::new(window))?;
			return Ok(true);
		}
	}
}

impl TupleNode for SlidingWindowNode {
	#[instrument(name = "flwor::window::sliding::advance", level = "trace", skip_all)]
	fn advance(&mut self, ctx: &mut ExecutionContext) -> Advance {
		match self.step(ctx) {
			Err(Halt::Failed(err)) => Err(Halt::Failed(err.with_clause(&self.clause))),
			result => result,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn queue(values: &[i64]) -> Queue {
		let items: Vec<Value> = values.iter().map(|v| Value::int8(*v)).collect();
		Queue::new(Box::new(items.into_iter().map(Ok)))
	}

	#[test]
	fn test_probe_reuses_queued_items() {
		let mut queue = queue(&[10, 20, 30]);
		let probe = queue.probe(1, true).unwrap().unwrap();
		assert_eq!(probe.item, Value::int8(20));
		assert_eq!(probe.position, 2);
		assert_eq!(probe.previous, Some(Value::int8(10)));
		assert_eq!(probe.next, Some(Value::int8(30)));
		assert_eq!(queue.queued.len(), 3);

		queue.release();
		let probe = queue.probe(0, false).unwrap().unwrap();
		assert_eq!(probe.item, Value::int8(20));
		assert_eq!(probe.position, 2);
		assert_eq!(probe.previous, Some(Value::int8(10)));
		assert!(probe.next.is_none());
	}

	#[test]
	fn test_probe_past_end() {
		let mut queue = queue(&[1]);
		assert!(queue.probe(1, false).unwrap().is_none());
		assert!(queue.probe(0, true).unwrap().unwrap().next.is_none());
	}
}
