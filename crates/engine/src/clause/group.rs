// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	fmt::{self, Display, Formatter},
	sync::Arc,
};

use flwor_core::{Expr, VarId, Variable, VariableRef};

use crate::clause::join;

/// `$var := expr` inside a group by.
#[derive(Debug, Clone)]
pub struct GroupSpec {
	pub var: Variable,
	pub expr: Expr,
	/// For the `group by $x` shorthand: the variable whose value is the key.
	pub source: Option<VarId>,
	/// A later spec of the same clause declares the same name. Still
	/// evaluated and bound while buffering, but not part of the key.
	pub occluded: bool,
}

impl GroupSpec {
	pub fn new(var: &Variable, expr: Expr) -> Self {
		Self {
			var: var.clone(),
			expr,
			source: None,
			occluded: false,
		}
	}

	/// `group by $x`: groups on the current value of `source`, bound to the
	/// fresh variable `var` (normally of the same name).
	pub fn existing(var: &Variable, source: &Variable) -> Self {
		Self {
			var: var.clone(),
			expr: Arc::new(VariableRef(source.clone())),
			source: Some(source.id),
			occluded: false,
		}
	}
}

impl Display for GroupSpec {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self.source {
			Some(_) => write!(f, "{}", self.var),
			None => write!(f, "{} := {}", self.var, self.expr.explain()),
		}
	}
}

#[derive(Debug, Clone)]
pub struct GroupByClause {
	pub specs: Vec<GroupSpec>,
	/// Non-grouping variables, rebound to the per-group sequence of their
	/// values. Filled in when the pipeline is built.
	pub carried: Vec<Variable>,
}

impl GroupByClause {
	pub fn new(specs: Vec<GroupSpec>) -> Self {
		Self {
			specs,
			carried: vec![],
		}
	}
}

impl Display for GroupByClause {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.write_str("group by ")?;
		join(f, &self.specs)
	}
}
