// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{self, Display, Formatter};

use flwor_core::{Expr, Variable};

use crate::clause::join;

#[derive(Debug, Clone)]
pub struct OrderKey {
	pub expr: Expr,
	pub descending: bool,
	/// Place the empty sequence (and NaN) after all other values.
	pub empty_greatest: bool,
}

impl OrderKey {
	pub fn ascending(expr: Expr) -> Self {
		Self {
			expr,
			descending: false,
			empty_greatest: false,
		}
	}

	pub fn descending(expr: Expr) -> Self {
		Self {
			expr,
			descending: true,
			empty_greatest: false,
		}
	}

	pub fn empty_greatest(mut self) -> Self {
		self.empty_greatest = true;
		self
	}

	pub fn empty_least(mut self) -> Self {
		self.empty_greatest = false;
		self
	}
}

impl Display for OrderKey {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.write_str(&self.expr.explain())?;
		if self.descending {
			f.write_str(" descending")?;
		}
		if self.empty_greatest {
			f.write_str(" empty greatest")?;
		}
		Ok(())
	}
}

#[derive(Debug, Clone)]
pub struct OrderByClause {
	pub keys: Vec<OrderKey>,
	pub stable: bool,
	/// Variables snapshotted per tuple and rebound on replay. Filled in when
	/// the pipeline is built.
	pub carried: Vec<Variable>,
}

impl OrderByClause {
	pub fn new(keys: Vec<OrderKey>) -> Self {
		Self {
			keys,
			stable: false,
			carried: vec![],
		}
	}

	pub fn stable(keys: Vec<OrderKey>) -> Self {
		Self {
			keys,
			stable: true,
			carried: vec![],
		}
	}
}

impl Display for OrderByClause {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		if self.stable {
			f.write_str("stable ")?;
		}
		f.write_str("order by ")?;
		join(f, &self.keys)
	}
}
