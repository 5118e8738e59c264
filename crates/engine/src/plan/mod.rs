// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{self, Display, Formatter};

use flwor_core::{Expr, Variable};
use flwor_type::{Result, Sequence};
use tracing::{debug, instrument};

use crate::{
	clause::Clause,
	config::PipelineConfig,
	plan::optimize::{Rewrite, RewriteHook},
};

pub mod optimize;
mod validate;

/// A validated, optimized clause chain ready to be executed any number of
/// times.
#[derive(Debug)]
pub struct Plan {
	pub clauses: Vec<Clause>,
	pub ret: Expr,
	/// Constant bindings established once before the first advance.
	pub presets: Vec<(Variable, Sequence)>,
	pub rewrites: Vec<Rewrite>,
	/// Binding slots an execution needs, one past the highest declared id.
	pub slots: usize,
}

#[instrument(name = "plan::compile", level = "debug", skip_all, fields(clauses = clauses.len()))]
pub(crate) fn compile(
	mut clauses: Vec<Clause>,
	ret: Expr,
	config: &PipelineConfig,
	hook: Option<&mut RewriteHook>,
) -> Result<Plan> {
	validate::validate(&mut clauses)?;

	let slots = clauses
		.iter()
		.flat_map(Clause::declares)
		.map(|var| var.id.index() + 1)
		.max()
		.unwrap_or(0);

	let mut plan = Plan {
		clauses,
		ret,
		presets: vec![],
		rewrites: vec![],
		slots,
	};

	optimize::optimize(&mut plan, &config.optimizer, hook);
	debug!(clauses = plan.clauses.len(), rewrites = plan.rewrites.len(), "plan compiled");

	Ok(plan)
}

impl Display for Plan {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		for (var, value) in &self.presets {
			writeln!(f, "let {} := {}", var, value)?;
		}
		for clause in &self.clauses {
			writeln!(f, "{}", clause)?;
		}
		write!(f, "return {}", self.ret.explain())
	}
}
