// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use crate::{
	clause::Clause,
	plan::{
		Plan,
		optimize::{Rewrite, RewriteLog},
	},
};

/// Drops carried variables of order by and group by that nothing after the
/// barrier reads. Later barriers are pruned first so that a slot kept alive
/// only by a later, prunable slot goes too.
pub(super) fn apply(plan: &mut Plan, log: &mut RewriteLog) -> bool {
	let mut changed = false;
	for i in (0..plan.clauses.len()).rev() {
		let unused: Vec<_> = match &plan.clauses[i] {
			Clause::OrderBy(clause) => clause.carried.iter(),
			Clause::GroupBy(clause) => clause.carried.iter(),
			_ => continue,
		}
		.filter(|var| {
			let later = &plan.clauses[i + 1..];
			!plan.ret.uses(var.id) && !later.iter().any(|c| c.uses(var.id) || c.carries(var.id))
		})
		.cloned()
		.collect();

		if unused.is_empty() {
			continue;
		}

		for var in &unused {
			plan.clauses[i].uncarry(var.id);
		}
		log.record(Rewrite::SlotsPruned {
			clause: plan.clauses[i].to_string(),
			vars: unused.into_iter().map(|var| format!("${}", var.name)).collect(),
		});
		changed = true;
	}
	changed
}
