// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use flwor_core::{Expr, Variable};
use flwor_type::Result;

use crate::{
	clause::{
		Clause, CountClause, ForClause, LetClause, WhereClause,
		group::{GroupByClause, GroupSpec},
		order::{OrderByClause, OrderKey},
		window::{Condition, WindowClause},
	},
	config::PipelineConfig,
	pipeline::Pipeline,
	plan::{self, optimize::Rewrite, optimize::RewriteHook},
};

/// Collects clauses in source order.
pub struct FlworBuilder {
	clauses: Vec<Clause>,
	config: PipelineConfig,
	hook: Option<RewriteHook>,
}

impl Default for FlworBuilder {
	fn default() -> Self {
		Self::new()
	}
}

impl FlworBuilder {
	pub fn new() -> Self {
		Self {
			clauses: vec![],
			config: PipelineConfig::default(),
			hook: None,
		}
	}

	/// `for $var in expr`
	pub fn for_each(self, var: &Variable, expr: Expr) -> Self {
		self.clause(Clause::For(ForClause::new(var, expr)))
	}

	/// `for $var at $position in expr`
	pub fn for_each_at(self, var: &Variable, position: &Variable, expr: Expr) -> Self {
		self.clause(Clause::For(ForClause::new(var, expr).at(position)))
	}

	/// `for $var allowing empty in expr`
	pub fn for_allowing_empty(self, var: &Variable, expr: Expr) -> Self {
		self.clause(Clause::For(ForClause::new(var, expr).allowing_empty()))
	}

	pub fn for_clause(self, clause: ForClause) -> Self {
		self.clause(Clause::For(clause))
	}

	pub fn let_(self, var: &Variable, expr: Expr) -> Self {
		self.clause(Clause::Let(LetClause::new(var, expr)))
	}

	pub fn let_score(self, var: &Variable, expr: Expr) -> Self {
		self.clause(Clause::Let(LetClause::score(var, expr)))
	}

	pub fn where_(self, predicate: Expr) -> Self {
		self.clause(Clause::Where(WhereClause::new(predicate)))
	}

	pub fn count(self, var: &Variable) -> Self {
		self.clause(Clause::Count(CountClause::new(var)))
	}

	pub fn order_by(self, keys: Vec<OrderKey>) -> Self {
		self.clause(Clause::OrderBy(OrderByClause::new(keys)))
	}

	pub fn stable_order_by(self, keys: Vec<OrderKey>) -> Self {
		self.clause(Clause::OrderBy(OrderByClause::stable(keys)))
	}

	pub fn group_by(self, specs: Vec<GroupSpec>) -> Self {
		self.clause(Clause::GroupBy(GroupByClause::new(specs)))
	}

	/// A tumbling window without an end condition: every start match opens
	/// a new window. Use [`FlworBuilder::window`] to add an end.
	pub fn tumbling_window(self, var: &Variable, expr: Expr, start: Condition) -> Self {
		self.window(WindowClause::tumbling(var, expr, start))
	}

	pub fn sliding_window(self, var: &Variable, expr: Expr, start: Condition, end: Condition) -> Self {
		self.window(WindowClause::sliding(var, expr, start, end))
	}

	pub fn window(self, clause: WindowClause) -> Self {
		self.clause(Clause::Window(clause))
	}

	pub fn clause(mut self, clause: Clause) -> Self {
		self.clauses.push(clause);
		self
	}

	pub fn config(mut self, config: PipelineConfig) -> Self {
		self.config = config;
		self
	}

	/// Called once for every rewrite the optimizer applies while building.
	pub fn on_rewrite(mut self, hook: impl FnMut(&Rewrite) + 'static) -> Self {
		self.hook = Some(Box::new(hook));
		self
	}

	/// Validates and optimizes the chain. Structural problems are reported
	/// here, before anything is evaluated.
	pub fn build(mut self, ret: Expr) -> Result<Pipeline> {
		let plan = plan::compile(self.clauses, ret, &self.config, self.hook.as_mut())?;
		Ok(Pipeline::new(plan))
	}
}
