// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use flwor_type::{Result, Sequence};

use crate::{BindingContext, Expression, VarId, Variable};

/// Reads the current value of a variable.
#[derive(Debug, Clone)]
pub struct VariableRef(pub Variable);

impl Expression for VariableRef {
	fn evaluate(&self, ctx: &BindingContext) -> Result<Sequence> {
		ctx.get(&self.0).cloned()
	}

	fn uses(&self, var: VarId) -> bool {
		self.0.id == var
	}

	fn is_deterministic(&self) -> bool {
		true
	}

	fn explain(&self) -> String {
		self.0.to_string()
	}
}
