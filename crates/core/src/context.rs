// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use flwor_type::{Result, Sequence, error::diagnostic::runtime, return_error};
use tracing::trace;

use crate::{VarId, Variable};

/// Current value of every variable for one pipeline execution.
///
/// Slots are indexed by [`VarId`] and grow on demand. Clauses overwrite their
/// slots in place on each advance, so anything that must survive a later
/// advance has to be cloned out.
#[derive(Debug, Default, Clone)]
pub struct BindingContext {
	slots: Vec<Option<Sequence>>,
}

impl BindingContext {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_capacity(slots: usize) -> Self {
		Self {
			slots: Vec::with_capacity(slots),
		}
	}

	/// Binds `value` to `var`, checking its declared type.
	pub fn set(&mut self, var: &Variable, value: Sequence) -> Result<()> {
		var.check(&value)?;
		self.rebind(var.id, value);
		Ok(())
	}

	/// Binds without a type check.
	pub fn rebind(&mut self, id: VarId, value: Sequence) {
		let index = id.index();
		if index >= self.slots.len() {
			self.slots.resize(index + 1, None);
		}
		trace!(var = %id, len = value.len(), "bind");
		self.slots[index] = Some(value);
	}

	pub fn get(&self, var: &Variable) -> Result<&Sequence> {
		match self.lookup(var.id) {
			Some(value) => Ok(value),
			None => return_error!(runtime::variable_unbound(&var.name)),
		}
	}

	pub fn lookup(&self, id: VarId) -> Option<&Sequence> {
		self.slots.get(id.index()).and_then(Option::as_ref)
	}

	pub fn is_bound(&self, id: VarId) -> bool {
		self.lookup(id).is_some()
	}

	pub fn clear(&mut self) {
		self.slots.clear();
	}
}
