// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use flwor_type::{Result, Sequence, Value};
use tracing::{instrument, trace};

use crate::{
	clause::window::WindowClause,
	error::{Advance, Halt},
	execute::{
		Evaluator, ExecutionContext, TupleNode,
		query::window::{Probe, cursor::Cursor},
	},
};

/// Disjoint windows. Without an end condition a window runs up to the next
/// start match; with one it runs up to the first end match.
pub(crate) struct TumblingWindowNode {
	input: Box<Evaluator>,
	clause: WindowClause,
	cursor: Option<Cursor>,
	/// Start match found while closing the previous window (no end
	/// condition only).
	pending: Option<Probe>,
}

enum Scan {
	Window(Vec<Value>, Probe),
	Exhausted,
}

impl TumblingWindowNode {
	pub(crate) fn new(input: Box<Evaluator>, clause: WindowClause) -> Self {
		Self {
			input,
			clause,
			cursor: None,
			pending: None,
		}
	}

	/// Moves forward to the next item matching the start condition.
	fn find_start(
		clause: &WindowClause,
		cursor: &mut Cursor,
		ctx: &mut ExecutionContext,
	) -> std::result::Result<Option<Probe>, Halt> {
		while cursor.advance()? {
			ctx.check()?;
			if let Some(probe) = cursor.probe(clause.start.needs_next())? {
				if probe.matches(&clause.start, &mut ctx.bindings)? {
					return Ok(Some(probe));
				}
			}
		}
		Ok(None)
	}

	/// Collects items after `start` until the next start match, which is kept
	/// as the start of the following window.
	fn until_next_start(
		&mut self,
		start: Probe,
		ctx: &mut ExecutionContext,
	) -> std::result::Result<Scan, Halt> {
		let Some(cursor) = self.cursor.as_mut() else {
			return Ok(Scan::Exhausted);
		};

		let mut window = vec![start.item.clone()];
		while cursor.advance()? {
			ctx.check()?;
			if let Some(probe) = cursor.probe(self.clause.start.needs_next())? {
				if probe.matches(&self.clause.start, &mut ctx.bindings)? {
					self.pending = Some(probe);
					break;
				}
				window.push(probe.item);
			}
		}
		Ok(Scan::Window(window, start))
	}

	/// Collects items from `start` on, testing each against the end
	/// condition. A window without an end match is dropped under `only`.
	fn until_end(&mut self, start: Probe, ctx: &mut ExecutionContext) -> std::result::Result<Scan, Halt> {
		let (Some(cursor), Some(end)) = (self.cursor.as_mut(), self.clause.end.as_ref()) else {
			return Ok(Scan::Exhausted);
		};

		// the cursor still sits on the start item
		let Some(mut probe) = cursor.probe(end.condition.needs_next())? else {
			return Ok(Scan::Exhausted);
		};
		let mut window = Vec::new();
		loop {
			ctx.check()?;
			window.push(probe.item.clone());
			if probe.matches(&end.condition, &mut ctx.bindings)? {
				return Ok(Scan::Window(window, start));
			}
			if !cursor.advance()? {
				break;
			}
			match cursor.probe(end.condition.needs_next())? {
				Some(next) => probe = next,
				None => break,
			}
		}

		if end.only {
			trace!(items = window.len(), "dangling window discarded");
			return Ok(Scan::Exhausted);
		}
		Ok(Scan::Window(window, start))
	}

	fn emit(&self, window: Vec<Value>, start: &Probe, ctx: &mut ExecutionContext) -> Result<()> {
		trace!(position = start.position, items = window.len(), "tumbling window");
		start.bind(&self.clause.start, &mut ctx.bindings)?;
		ctx.bindings.set(&self.clause.var, Sequence::new(window))
	}

	fn step(&mut self, ctx: &mut ExecutionContext) -> Advance {
		loop {
			ctx.check()?;

			if self.cursor.is_none() {
				if !self.input.advance(ctx)? {
					return Ok(false);
				}
				let items = self.clause.expr.iter(&ctx.bindings)?;
				self.cursor = Some(Cursor::new(items));
				self.pending = None;
			}

			let start = match self.pending.take() {
				Some(start) => Some(start),
				None => match self.cursor.as_mut() {
					Some(cursor) => Self::find_start(&self.clause, cursor, ctx)?,
					None => None,
				},
			};

			let Some(start) = start else {
				self.cursor = None;
				continue;
			};

			let scan = if self.clause.end.is_some() {
				self.until_end(start, ctx)?
			} else {
				self.until_next_start(start, ctx)?
			};

			if let Scan::Window(window, start) = scan {
				self.emit(window, &start, ctx)?;
				return Ok(true);
			}
		}
	}
}

impl TupleNode for TumblingWindowNode {
	#[instrument(name = "flwor::window::tumbling::advance", level = "trace", skip_all)]
	fn advance(&mut self, ctx: &mut ExecutionContext) -> Advance {
		match self.step(ctx) {
			Err(Halt::Failed(err)) => Err(Halt::Failed(err.with_clause(&self.clause))),
			result => result,
		}
	}
}
