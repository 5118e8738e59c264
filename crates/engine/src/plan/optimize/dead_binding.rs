// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use flwor_type::{Sequence, Value};

use crate::{
	clause::Clause,
	plan::{
		Plan,
		optimize::{Rewrite, RewriteLog, passes_type_check, uncarry_after, used_after},
	},
};

/// Removes `let` and `count` clauses whose variable nothing downstream reads.
/// A `let` is only removed when its expression is deterministic and its
/// binding cannot fail the declared type check.
pub(super) fn apply(plan: &mut Plan, log: &mut RewriteLog) -> bool {
	let mut changed = false;
	let mut i = 0;
	while i < plan.clauses.len() {
		let var = match &plan.clauses[i] {
			Clause::Let(clause) if clause.expr.is_deterministic() && passes_type_check(clause) => Some(&clause.var),
			Clause::Count(clause) if clause.var.check(&Sequence::singleton(Value::Int8(1))).is_ok() => {
				Some(&clause.var)
			}
			_ => None,
		};

		match var.filter(|var| !used_after(plan, i, var.id)).cloned() {
			Some(var) => {
				plan.clauses.remove(i);
				uncarry_after(&mut plan.clauses, i, var.id);
				log.record(Rewrite::BindingRemoved {
					var: var.name,
				});
				changed = true;
			}
			None => i += 1,
		}
	}
	changed
}
