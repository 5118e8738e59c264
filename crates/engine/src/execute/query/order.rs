// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::cmp::Ordering;

use flwor_type::{Result, Sequence, Value, error::diagnostic::order, internal_error, return_error};
use tracing::{debug, instrument};

use crate::{
	clause::order::{OrderByClause, OrderKey},
	error::Advance,
	execute::{Evaluator, ExecutionContext, TupleNode, query::sort::sort_permutation},
};

pub(crate) struct OrderByNode {
	input: Box<Evaluator>,
	clause: OrderByClause,
	replay: Option<Replay>,
}

/// Buffered tuples in sorted order. Each slot is released as it is replayed.
struct Replay {
	tuples: Vec<Option<Vec<Sequence>>>,
	order: std::vec::IntoIter<usize>,
}

impl OrderByNode {
	pub(crate) fn new(input: Box<Evaluator>, clause: OrderByClause) -> Self {
		Self {
			input,
			clause,
			replay: None,
		}
	}

	#[instrument(name = "flwor::order::buffer", level = "trace", skip_all)]
	fn buffer(&mut self, ctx: &mut ExecutionContext) -> std::result::Result<Replay, crate::Halt> {
		let mut keys: Vec<Vec<Option<Value>>> = Vec::new();
		let mut tuples: Vec<Option<Vec<Sequence>>> = Vec::new();

		while self.input.advance(ctx)? {
			ctx.check()?;
			let key = self
				.clause
				.keys
				.iter()
				.map(|key| sort_key(key, ctx))
				.collect::<Result<Vec<_>>>()
				.map_err(|e| e.with_clause(&self.clause))?;
			let tuple = self
				.clause
				.carried
				.iter()
				.map(|var| ctx.bindings.get(var).cloned())
				.collect::<Result<Vec<_>>>()
				.map_err(|e| e.with_clause(&self.clause))?;
			keys.push(key);
			tuples.push(Some(tuple));
		}

		debug!(tuples = tuples.len(), "order by buffered");

		let specs = &self.clause.keys;
		let stable = self.clause.stable;
		let order = sort_permutation(keys.len(), |a, b| {
			let ord = compare_keys(&keys[a], &keys[b], specs)?;
			Ok(if stable {
				ord.then(a.cmp(&b))
			} else {
				ord
			})
		})
		.map_err(|e| e.with_clause(&self.clause))?;

		Ok(Replay {
			tuples,
			order: order.into_iter(),
		})
	}
}

impl TupleNode for OrderByNode {
	#[instrument(name = "flwor::order::advance", level = "trace", skip_all)]
	fn advance(&mut self, ctx: &mut ExecutionContext) -> Advance {
		ctx.check()?;

		if self.replay.is_none() {
			self.replay = Some(self.buffer(ctx)?);
		}

		let Some(replay) = self.replay.as_mut() else {
			return Ok(false);
		};

		let Some(index) = replay.order.next() else {
			replay.tuples = Vec::new();
			return Ok(false);
		};

		let tuple = replay.tuples[index]
			.take()
			.ok_or_else(|| internal_error!("order by replayed tuple {} twice", index))?;
		for (var, value) in self.clause.carried.iter().zip(tuple) {
			ctx.bindings.rebind(var.id, value);
		}
		Ok(true)
	}
}

fn sort_key(key: &OrderKey, ctx: &ExecutionContext) -> Result<Option<Value>> {
	let value = key.expr.evaluate(&ctx.bindings)?;
	match value.len() {
		0 | 1 => Ok(value.into_iter().next()),
		n => return_error!(order::key_not_single(n)),
	}
}

/// Compares two key arrays key by key.
pub(crate) fn compare_keys(a: &[Option<Value>], b: &[Option<Value>], specs: &[OrderKey]) -> Result<Ordering> {
	for ((a, b), spec) in a.iter().zip(b).zip(specs) {
		let ord = compare_key(a.as_ref(), b.as_ref(), spec.empty_greatest)?;
		let ord = if spec.descending {
			ord.reverse()
		} else {
			ord
		};
		if ord != Ordering::Equal {
			return Ok(ord);
		}
	}
	Ok(Ordering::Equal)
}

/// With "empty least": empty < NaN < values; with "empty greatest":
/// values < NaN < empty.
fn compare_key(a: Option<&Value>, b: Option<&Value>, empty_greatest: bool) -> Result<Ordering> {
	let (ra, rb) = (rank(a, empty_greatest), rank(b, empty_greatest));
	if ra != rb {
		return Ok(ra.cmp(&rb));
	}
	match (a, b) {
		(Some(a), Some(b)) if !a.is_nan() => a.compare(b),
		_ => Ok(Ordering::Equal),
	}
}

fn rank(value: Option<&Value>, empty_greatest: bool) -> u8 {
	match (value, empty_greatest) {
		(None, false) => 0,
		(None, true) => 2,
		(Some(v), _) if v.is_nan() => 1,
		(Some(_), false) => 2,
		(Some(_), true) => 0,
	}
}
