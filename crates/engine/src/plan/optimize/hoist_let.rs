// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use crate::{
	clause::{Clause, LetClause},
	plan::{
		Plan,
		optimize::{Rewrite, RewriteLog, passes_type_check},
	},
};

/// Moves a deterministic `let` directly above the highest preceding `for` or
/// window clause it does not depend on, so it is evaluated once per outer
/// tuple instead of once per item. Never crosses an order by or group by.
/// Typed lets stay put unless their value is a constant known to match.
pub(super) fn apply(plan: &mut Plan, log: &mut RewriteLog) -> bool {
	let mut changed = false;
	for i in 0..plan.clauses.len() {
		let target = match &plan.clauses[i] {
			Clause::Let(clause) if clause.expr.is_deterministic() && passes_type_check(clause) => {
				target(&plan.clauses[..i], clause)
			}
			_ => None,
		};

		if let Some(to) = target {
			let clause = plan.clauses.remove(i);
			let var = clause.declares().first().map(|var| var.name.clone()).unwrap_or_default();
			plan.clauses.insert(to, clause);
			log.record(Rewrite::LetHoisted {
				var,
				from: i,
				to,
			});
			changed = true;
		}
	}
	changed
}

fn target(before: &[Clause], clause: &LetClause) -> Option<usize> {
	let mut target = None;
	for (j, candidate) in before.iter().enumerate().rev() {
		if candidate.is_barrier() || candidate.declares().iter().any(|var| clause.expr.uses(var.id)) {
			break;
		}
		if matches!(candidate, Clause::For(_) | Clause::Window(_)) {
			target = Some(j);
		}
	}
	target
}
