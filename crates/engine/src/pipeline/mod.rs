// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Entry point: build a clause chain, compile it once, then pull results
//! from as many independent executions as needed.

use std::sync::Arc;

use flwor_core::Interrupt;

use crate::{clause::Clause, plan::Plan, plan::optimize::Rewrite};

mod builder;
mod output;

pub use builder::FlworBuilder;
pub use output::Output;

pub struct Flwor;

impl Flwor {
	pub fn builder() -> FlworBuilder {
		FlworBuilder::new()
	}
}

/// A compiled pipeline. Each [`Pipeline::execute`] starts a fresh evaluator
/// chain with its own binding context, so executions never share state.
#[derive(Debug, Clone)]
pub struct Pipeline {
	plan: Arc<Plan>,
}

impl Pipeline {
	pub(crate) fn new(plan: Plan) -> Self {
		Self {
			plan: Arc::new(plan),
		}
	}

	pub fn execute(&self) -> Output {
		self.execute_with(Interrupt::new())
	}

	/// Executes with a caller-owned stop handle.
	pub fn execute_with(&self, interrupt: Interrupt) -> Output {
		Output::new(self.plan.clone(), interrupt)
	}

	/// The clause chain after optimization.
	pub fn clauses(&self) -> &[Clause] {
		&self.plan.clauses
	}

	pub fn rewrites(&self) -> &[Rewrite] {
		&self.plan.rewrites
	}

	pub fn explain(&self) -> String {
		self.plan.to_string()
	}
}
