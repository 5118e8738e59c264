// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use crate::{
	clause::Clause,
	plan::{
		Plan,
		optimize::{Rewrite, RewriteLog},
	},
};

/// Drops `where` clauses whose predicate is a constant with a true effective
/// boolean value.
pub(super) fn apply(plan: &mut Plan, log: &mut RewriteLog) -> bool {
	let mut changed = false;
	let mut i = 0;
	while i < plan.clauses.len() {
		let always_true = match &plan.clauses[i] {
			Clause::Where(clause) => {
				clause.predicate.constant().is_some_and(|value| matches!(value.ebv(), Ok(true)))
			}
			_ => false,
		};

		if always_true {
			let removed = plan.clauses.remove(i);
			log.record(Rewrite::WhereFolded {
				clause: removed.to_string(),
			});
			changed = true;
		} else {
			i += 1;
		}
	}
	changed
}
