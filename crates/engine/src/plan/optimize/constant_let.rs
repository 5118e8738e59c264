// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use crate::{
	clause::Clause,
	plan::{
		Plan,
		optimize::{Rewrite, RewriteLog, uncarry_after},
	},
};

/// Turns a `let` bound to a literal into a preset binding established once
/// per execution.
///
/// Not applied when a group by follows: grouping rebinds the carried
/// variable to one copy of its value per grouped tuple.
pub(super) fn apply(plan: &mut Plan, log: &mut RewriteLog) -> bool {
	let mut changed = false;
	let mut i = 0;
	while i < plan.clauses.len() {
		let value = match &plan.clauses[i] {
			Clause::Let(clause) if !clause.score => clause
				.expr
				.constant()
				.filter(|value| clause.var.check(value).is_ok())
				.filter(|_| !plan.clauses[i + 1..].iter().any(|c| matches!(c, Clause::GroupBy(_)))),
			_ => None,
		};

		let Some(value) = value else {
			i += 1;
			continue;
		};

		if let Clause::Let(clause) = plan.clauses.remove(i) {
			uncarry_after(&mut plan.clauses, i, clause.var.id);
			log.record(Rewrite::LetInlined {
				var: clause.var.name.clone(),
				value: value.to_string(),
			});
			plan.presets.push((clause.var, value));
			changed = true;
		}
	}
	changed
}
