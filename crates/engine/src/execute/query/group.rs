// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::collections::HashMap;

use flwor_type::{
	Result, Sequence, Value,
	error::diagnostic::group,
	hash::{Hash64, key_hash},
	return_error,
};
use smallvec::SmallVec;
use tracing::{debug, instrument};

use crate::{
	clause::group::GroupByClause,
	error::{Advance, Halt},
	execute::{Evaluator, ExecutionContext, TupleNode},
};

type GroupKey = SmallVec<[Option<Value>; 4]>;

struct Group {
	key: GroupKey,
	/// One accumulator per carried variable.
	values: Vec<Sequence>,
}

pub(crate) struct GroupByNode {
	input: Box<Evaluator>,
	clause: GroupByClause,
	replay: Option<std::vec::IntoIter<Group>>,
}

impl GroupByNode {
	pub(crate) fn new(input: Box<Evaluator>, clause: GroupByClause) -> Self {
		Self {
			input,
			clause,
			replay: None,
		}
	}

	/// Groups in first-seen order.
	#[instrument(name = "flwor::group::buffer", level = "trace", skip_all)]
	fn buffer(&mut self, ctx: &mut ExecutionContext) -> std::result::Result<Vec<Group>, Halt> {
		let mut groups: Vec<Group> = Vec::new();
		let mut buckets: HashMap<Hash64, SmallVec<[usize; 1]>> = HashMap::new();
		let mut tuples = 0usize;

		while self.input.advance(ctx)? {
			ctx.check()?;
			tuples += 1;

			let key = self.key(ctx).map_err(|e| e.with_clause(&self.clause))?;
			let hash = key_hash(key.iter().map(Option::as_ref));
			let bucket = buckets.entry(hash).or_default();

			let found = bucket.iter().copied().find(|&g| keys_equivalent(&groups[g].key, &key));
			match found {
				Some(g) => {
					for (acc, var) in groups[g].values.iter_mut().zip(&self.clause.carried) {
						let value = ctx.bindings.get(var).map_err(|e| e.with_clause(&self.clause))?;
						acc.append(value);
					}
				}
				None => {
					let values = self
						.clause
						.carried
						.iter()
						.map(|var| ctx.bindings.get(var).cloned())
						.collect::<Result<Vec<_>>>()
						.map_err(|e| e.with_clause(&self.clause))?;
					bucket.push(groups.len());
					groups.push(Group {
						key,
						values,
					});
				}
			}
		}

		debug!(tuples, groups = groups.len(), "group by buffered");
		Ok(groups)
	}

	/// Evaluates every grouping spec, binding its variable as it goes so later
	/// specs can read earlier ones. Occluded specs are left out of the key.
	fn key(&self, ctx: &mut ExecutionContext) -> Result<GroupKey> {
		let mut key = GroupKey::new();
		for spec in &self.clause.specs {
			let value = spec.expr.evaluate(&ctx.bindings)?;
			if value.len() > 1 {
				return_error!(group::key_not_single(&spec.var.name, value.len()));
			}
			let item = value.first().cloned();
			ctx.bindings.set(&spec.var, value)?;
			if !spec.occluded {
				key.push(item);
			}
		}
		Ok(key)
	}
}

fn keys_equivalent(a: &[Option<Value>], b: &[Option<Value>]) -> bool {
	a.len() == b.len()
		&& a.iter().zip(b).all(|(a, b)| match (a, b) {
			(None, None) => true,
			(Some(a), Some(b)) => a.equivalent(b),
			_ => false,
		})
}

impl TupleNode for GroupByNode {
	#[instrument(name = "flwor::group::advance", level = "trace", skip_all)]
	fn advance(&mut self, ctx: &mut ExecutionContext) -> Advance {
		ctx.check()?;

		if self.replay.is_none() {
			self.replay = Some(self.buffer(ctx)?.into_iter());
		}

		let Some(group) = self.replay.as_mut().and_then(Iterator::next) else {
			return Ok(false);
		};

		let specs = self.clause.specs.iter().filter(|spec| !spec.occluded);
		for (spec, item) in specs.zip(group.key) {
			ctx.bindings.rebind(spec.var.id, Sequence::from_option(item));
		}
		for (var, value) in self.clause.carried.iter().zip(group.values) {
			ctx.bindings.rebind(var.id, value);
		}
		Ok(true)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_keys_equivalent() {
		let a = [Some(Value::int8(1)), None];
		let b = [Some(Value::float8(1.0)), None];
		let c = [Some(Value::int8(1)), Some(Value::utf8(""))];
		assert!(keys_equivalent(&a, &b));
		assert!(!keys_equivalent(&a, &c));
	}
}
