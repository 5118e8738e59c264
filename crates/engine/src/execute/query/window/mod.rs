// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Tumbling and sliding windows.
//!
//! Both re-segment the sequence produced by the window expression once per
//! outer tuple. Boundary predicates see the probed item, its 1-based
//! position, and the items before and after it; the look-ahead item is only
//! pulled when the condition binds `next`.

use flwor_core::BindingContext;
use flwor_type::{Result, Sequence, Value};

use crate::clause::window::Condition;

pub(crate) mod cursor;
pub(crate) mod sliding;
pub(crate) mod tumbling;

/// The item a boundary condition is tested against, with its neighbours.
#[derive(Debug, Clone)]
pub(crate) struct Probe {
	pub item: Value,
	pub position: i64,
	pub previous: Option<Value>,
	pub next: Option<Value>,
}

impl Probe {
	/// Binds the condition's variables to this probe.
	pub(crate) fn bind(&self, condition: &Condition, ctx: &mut BindingContext) -> Result<()> {
		if let Some(var) = &condition.item {
			ctx.set(var, Sequence::singleton(self.item.clone()))?;
		}
		if let Some(var) = &condition.position {
			ctx.set(var, Sequence::singleton(Value::Int8(self.position)))?;
		}
		if let Some(var) = &condition.previous {
			ctx.set(var, Sequence::from_option(self.previous.clone()))?;
		}
		if let Some(var) = &condition.next {
			ctx.set(var, Sequence::from_option(self.next.clone()))?;
		}
		Ok(())
	}

	/// Binds and evaluates the condition.
	pub(crate) fn matches(&self, condition: &Condition, ctx: &mut BindingContext) -> Result<bool> {
		self.bind(condition, ctx)?;
		condition.predicate.ebv(ctx)
	}
}
