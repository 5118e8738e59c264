// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{self, Display, Formatter};

use flwor_core::{Expr, VarId, Variable};

pub mod group;
pub mod order;
pub mod window;

use group::GroupByClause;
use order::OrderByClause;
use window::WindowClause;

/// One stage of the binding pipeline.
#[derive(Debug, Clone)]
pub enum Clause {
	For(ForClause),
	Let(LetClause),
	Where(WhereClause),
	Count(CountClause),
	OrderBy(OrderByClause),
	GroupBy(GroupByClause),
	Window(WindowClause),
}

impl Clause {
	/// Variables this clause introduces.
	pub fn declares(&self) -> Vec<&Variable> {
		match self {
			Clause::For(clause) => {
				let mut vars = vec![&clause.var];
				vars.extend(clause.position.iter());
				vars.extend(clause.score.iter());
				vars
			}
			Clause::Let(clause) => vec![&clause.var],
			Clause::Where(_) => vec![],
			Clause::Count(clause) => vec![&clause.var],
			Clause::OrderBy(_) => vec![],
			Clause::GroupBy(clause) => clause.specs.iter().map(|spec| &spec.var).collect(),
			Clause::Window(clause) => clause.declares(),
		}
	}

	/// Whether any expression of this clause reads `var`.
	pub fn uses(&self, var: VarId) -> bool {
		match self {
			Clause::For(clause) => clause.expr.uses(var),
			Clause::Let(clause) => clause.expr.uses(var),
			Clause::Where(clause) => clause.predicate.uses(var),
			Clause::Count(_) => false,
			Clause::OrderBy(clause) => clause.keys.iter().any(|key| key.expr.uses(var)),
			Clause::GroupBy(clause) => clause.specs.iter().any(|spec| spec.expr.uses(var)),
			Clause::Window(clause) => clause.uses(var),
		}
	}

	/// Whether `var` is stored across this clause's buffering boundary.
	pub fn carries(&self, var: VarId) -> bool {
		match self {
			Clause::OrderBy(clause) => clause.carried.iter().any(|v| v.id == var),
			Clause::GroupBy(clause) => clause.carried.iter().any(|v| v.id == var),
			_ => false,
		}
	}

	/// Order by and group by consume their whole input before producing.
	pub fn is_barrier(&self) -> bool {
		matches!(self, Clause::OrderBy(_) | Clause::GroupBy(_))
	}

	/// Drops `var` from the carried slots, returning whether it was there.
	pub(crate) fn uncarry(&mut self, var: VarId) -> bool {
		let carried = match self {
			Clause::OrderBy(clause) => &mut clause.carried,
			Clause::GroupBy(clause) => &mut clause.carried,
			_ => return false,
		};
		let before = carried.len();
		carried.retain(|v| v.id != var);
		carried.len() != before
	}
}

impl Display for Clause {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			Clause::For(clause) => Display::fmt(clause, f),
			Clause::Let(clause) => Display::fmt(clause, f),
			Clause::Where(clause) => Display::fmt(clause, f),
			Clause::Count(clause) => Display::fmt(clause, f),
			Clause::OrderBy(clause) => Display::fmt(clause, f),
			Clause::GroupBy(clause) => Display::fmt(clause, f),
			Clause::Window(clause) => Display::fmt(clause, f),
		}
	}
}

/// `for $var at $position score $score allowing empty in expr`
#[derive(Debug, Clone)]
pub struct ForClause {
	pub var: Variable,
	pub position: Option<Variable>,
	pub score: Option<Variable>,
	pub expr: Expr,
	pub allowing_empty: bool,
}

impl ForClause {
	pub fn new(var: &Variable, expr: Expr) -> Self {
		Self {
			var: var.clone(),
			position: None,
			score: None,
			expr,
			allowing_empty: false,
		}
	}

	pub fn at(mut self, position: &Variable) -> Self {
		self.position = Some(position.clone());
		self
	}

	pub fn score(mut self, score: &Variable) -> Self {
		self.score = Some(score.clone());
		self
	}

	pub fn allowing_empty(mut self) -> Self {
		self.allowing_empty = true;
		self
	}
}

impl Display for ForClause {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		write!(f, "for {}", self.var)?;
		if self.allowing_empty {
			f.write_str(" allowing empty")?;
		}
		if let Some(position) = &self.position {
			write!(f, " at {}", position)?;
		}
		if let Some(score) = &self.score {
			write!(f, " score {}", score)?;
		}
		write!(f, " in {}", self.expr.explain())
	}
}

/// `let $var := expr`, or `let score $var := expr`
#[derive(Debug, Clone)]
pub struct LetClause {
	pub var: Variable,
	pub expr: Expr,
	pub score: bool,
}

impl LetClause {
	pub fn new(var: &Variable, expr: Expr) -> Self {
		Self {
			var: var.clone(),
			expr,
			score: false,
		}
	}

	pub fn score(var: &Variable, expr: Expr) -> Self {
		Self {
			var: var.clone(),
			expr,
			score: true,
		}
	}
}

impl Display for LetClause {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		if self.score {
			write!(f, "let score {} := {}", self.var, self.expr.explain())
		} else {
			write!(f, "let {} := {}", self.var, self.expr.explain())
		}
	}
}

#[derive(Debug, Clone)]
pub struct WhereClause {
	pub predicate: Expr,
}

impl WhereClause {
	pub fn new(predicate: Expr) -> Self {
		Self {
			predicate,
		}
	}
}

impl Display for WhereClause {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		write!(f, "where {}", self.predicate.explain())
	}
}

#[derive(Debug, Clone)]
pub struct CountClause {
	pub var: Variable,
}

impl CountClause {
	pub fn new(var: &Variable) -> Self {
		Self {
			var: var.clone(),
		}
	}
}

impl Display for CountClause {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		write!(f, "count {}", self.var)
	}
}

/// Renders `items` separated by `, `.
pub(crate) fn join<T: Display>(f: &mut Formatter<'_>, items: impl IntoIterator<Item = T>) -> fmt::Result {
	for (i, item) in items.into_iter().enumerate() {
		if i > 0 {
			f.write_str(", ")?;
		}
		Display::fmt(&item, f)?;
	}
	Ok(())
}
