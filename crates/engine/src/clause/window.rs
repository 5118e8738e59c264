// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{self, Display, Formatter};

use flwor_core::{Expr, VarId, Variable};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowKind {
	Tumbling,
	Sliding,
}

/// A window boundary: `$item at $position previous $previous next $next when
/// predicate`. Each variable is optional.
#[derive(Debug, Clone)]
pub struct Condition {
	pub item: Option<Variable>,
	pub position: Option<Variable>,
	pub previous: Option<Variable>,
	pub next: Option<Variable>,
	pub predicate: Expr,
}

impl Condition {
	pub fn when(predicate: Expr) -> Self {
		Self {
			item: None,
			position: None,
			previous: None,
			next: None,
			predicate,
		}
	}

	pub fn item(mut self, var: &Variable) -> Self {
		self.item = Some(var.clone());
		self
	}

	pub fn at(mut self, var: &Variable) -> Self {
		self.position = Some(var.clone());
		self
	}

	pub fn previous(mut self, var: &Variable) -> Self {
		self.previous = Some(var.clone());
		self
	}

	pub fn next(mut self, var: &Variable) -> Self {
		self.next = Some(var.clone());
		self
	}

	pub fn vars(&self) -> impl Iterator<Item = &Variable> {
		self.item.iter().chain(self.position.iter()).chain(self.previous.iter()).chain(self.next.iter())
	}

	/// The look-ahead item only has to be fetched when `next` is bound.
	pub fn needs_next(&self) -> bool {
		self.next.is_some()
	}
}

impl Display for Condition {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		if let Some(item) = &self.item {
			write!(f, " {}", item)?;
		}
		if let Some(position) = &self.position {
			write!(f, " at {}", position)?;
		}
		if let Some(previous) = &self.previous {
			write!(f, " previous {}", previous)?;
		}
		if let Some(next) = &self.next {
			write!(f, " next {}", next)?;
		}
		write!(f, " when {}", self.predicate.explain())
	}
}

#[derive(Debug, Clone)]
pub struct WindowEnd {
	pub condition: Condition,
	/// Discard a trailing window whose end never matched.
	pub only: bool,
}

#[derive(Debug, Clone)]
pub struct WindowClause {
	pub kind: WindowKind,
	pub var: Variable,
	pub expr: Expr,
	pub start: Condition,
	pub end: Option<WindowEnd>,
}

impl WindowClause {
	pub fn tumbling(var: &Variable, expr: Expr, start: Condition) -> Self {
		Self {
			kind: WindowKind::Tumbling,
			var: var.clone(),
			expr,
			start,
			end: None,
		}
	}

	pub fn sliding(var: &Variable, expr: Expr, start: Condition, end: Condition) -> Self {
		Self {
			kind: WindowKind::Sliding,
			var: var.clone(),
			expr,
			start,
			end: Some(WindowEnd {
				condition: end,
				only: false,
			}),
		}
	}

	pub fn end(mut self, condition: Condition) -> Self {
		self.end = Some(WindowEnd {
			condition,
			only: false,
		});
		self
	}

	pub fn only_end(mut self, condition: Condition) -> Self {
		self.end = Some(WindowEnd {
			condition,
			only: true,
		});
		self
	}

	pub fn declares(&self) -> Vec<&Variable> {
		let mut vars = vec![&self.var];
		vars.extend(self.start.vars());
		if let Some(end) = &self.end {
			vars.extend(end.condition.vars());
		}
		vars
	}

	pub fn uses(&self, var: VarId) -> bool {
		self.expr.uses(var)
			|| self.start.predicate.uses(var)
			|| self.end.as_ref().is_some_and(|end| end.condition.predicate.uses(var))
	}
}

impl Display for WindowClause {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		let kind = match self.kind {
			WindowKind::Tumbling => "tumbling",
			WindowKind::Sliding => "sliding",
		};
		write!(f, "for {} window {} in {} start{}", kind, self.var, self.expr.explain(), self.start)?;
		if let Some(end) = &self.end {
			if end.only {
				f.write_str(" only")?;
			}
			write!(f, " end{}", end.condition)?;
		}
		Ok(())
	}
}
