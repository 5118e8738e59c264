// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Semantics-preserving rewrites applied once per pipeline, before the first
//! execution. Every pass works on the closed [`Clause`] enum and reports what
//! it changed as a [`Rewrite`].

use std::fmt::{self, Display, Formatter};

use flwor_core::VarId;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::{
	clause::{Clause, LetClause},
	config::OptimizerConfig,
	plan::Plan,
};

mod constant_let;
mod dead_binding;
mod fold_where;
mod hoist_let;
mod prune_slots;

pub type RewriteHook = Box<dyn FnMut(&Rewrite)>;

/// One applied rewrite, for tooling and debugging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Rewrite {
	WhereFolded {
		clause: String,
	},
	LetInlined {
		var: String,
		value: String,
	},
	BindingRemoved {
		var: String,
	},
	LetHoisted {
		var: String,
		from: usize,
		to: usize,
	},
	SlotsPruned {
		clause: String,
		vars: Vec<String>,
	},
}

impl Display for Rewrite {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			Rewrite::WhereFolded {
				clause,
			} => write!(f, "removed constant-true '{}'", clause),
			Rewrite::LetInlined {
				var,
				value,
			} => write!(f, "bound ${} := {} before execution", var, value),
			Rewrite::BindingRemoved {
				var,
			} => write!(f, "removed unused binding ${}", var),
			Rewrite::LetHoisted {
				var,
				from,
				to,
			} => write!(f, "hoisted let ${} from clause {} to {}", var, from, to),
			Rewrite::SlotsPruned {
				clause,
				vars,
			} => write!(f, "pruned carried {} from '{}'", vars.join(", "), clause),
		}
	}
}

pub(crate) struct RewriteLog<'a> {
	rewrites: Vec<Rewrite>,
	hook: Option<&'a mut RewriteHook>,
}

impl RewriteLog<'_> {
	pub(crate) fn record(&mut self, rewrite: Rewrite) {
		debug!(%rewrite, "rewrite applied");
		if let Some(hook) = self.hook.as_mut() {
			hook(&rewrite);
		}
		self.rewrites.push(rewrite);
	}
}

#[instrument(name = "plan::optimize", level = "trace", skip_all)]
pub(crate) fn optimize(plan: &mut Plan, config: &OptimizerConfig, hook: Option<&mut RewriteHook>) {
	let mut log = RewriteLog {
		rewrites: vec![],
		hook,
	};

	for round in 0..config.max_rounds {
		let mut changed = false;
		if config.fold_where {
			changed |= fold_where::apply(plan, &mut log);
		}
		if config.constant_let {
			changed |= constant_let::apply(plan, &mut log);
		}
		if config.dead_binding {
			changed |= dead_binding::apply(plan, &mut log);
		}
		if config.hoist_let {
			changed |= hoist_let::apply(plan, &mut log);
		}
		if config.prune_slots {
			changed |= prune_slots::apply(plan, &mut log);
		}
		if !changed {
			debug!(round, "optimizer reached fixed point");
			break;
		}
	}

	plan.rewrites = log.rewrites;
}

/// Whether anything after clause `index`, including the return expression,
/// reads `var`.
fn used_after(plan: &Plan, index: usize, var: VarId) -> bool {
	plan.clauses[index + 1..].iter().any(|clause| clause.uses(var)) || plan.ret.uses(var)
}

/// Removes `var` from the carried slots of every clause after `index`.
fn uncarry_after(clauses: &mut [Clause], index: usize, var: VarId) {
	for clause in &mut clauses[index..] {
		clause.uncarry(var);
	}
}

/// Whether binding the `let` can never fail its declared type check, so
/// moving or dropping it cannot add or hide a RUNTIME_004.
fn passes_type_check(clause: &LetClause) -> bool {
	if clause.var.ty.is_none() {
		return true;
	}
	!clause.score && clause.expr.constant().is_some_and(|value| clause.var.check(&value).is_ok())
}
