// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{fmt::Debug, sync::Arc};

use flwor_type::{Result, Sequence, Value, error::diagnostic::runtime, return_error};

use crate::{BindingContext, VarId};

pub mod reference;

/// Lazily produced items. Owns its state: the binding context keeps being
/// mutated while the sequence is drained.
pub type LazySequence = Box<dyn Iterator<Item = Result<Value>>>;

/// Items paired with a relevance score.
pub type ScoredSequence = Box<dyn Iterator<Item = Result<(Value, f64)>>>;

pub type Expr = Arc<dyn Expression>;

/// An evaluable unit supplied by the expression layer.
///
/// The clause engine never looks inside an expression. It evaluates it against
/// the current bindings and, when compiling, asks the conservative questions
/// below. The defaults assume the worst: the expression reads every variable
/// and must not be moved or dropped.
pub trait Expression: Debug {
	fn evaluate(&self, ctx: &BindingContext) -> Result<Sequence>;

	fn iter(&self, ctx: &BindingContext) -> Result<LazySequence> {
		let items = self.evaluate(ctx)?;
		Ok(Box::new(items.into_iter().map(Ok)))
	}

	fn iter_scored(&self, ctx: &BindingContext) -> Result<ScoredSequence> {
		let items = self.iter(ctx)?;
		Ok(Box::new(items.map(|item| item.map(|item| (item, 0.0)))))
	}

	/// The single item, `None` for the empty sequence.
	fn evaluate_item(&self, ctx: &BindingContext) -> Result<Option<Value>> {
		let items = self.evaluate(ctx)?;
		match items.len() {
			0 | 1 => Ok(items.into_iter().next()),
			n => return_error!(runtime::not_single_item(n)),
		}
	}

	/// Effective boolean value.
	fn ebv(&self, ctx: &BindingContext) -> Result<bool> {
		self.evaluate(ctx)?.ebv()
	}

	/// The value, when it does not depend on any binding.
	fn constant(&self) -> Option<Sequence> {
		None
	}

	fn uses(&self, _var: VarId) -> bool {
		true
	}

	/// Pure and infallible once its inputs are bound: evaluating it more or
	/// fewer times is unobservable.
	fn is_deterministic(&self) -> bool {
		false
	}

	/// Short source-like rendering used in explain output.
	fn explain(&self) -> String {
		"<expr>".to_string()
	}
}
