// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use flwor_type::{Result, Sequence, SequenceType, error::diagnostic::runtime, return_error};
use serde::{Deserialize, Serialize};

/// Slot index of a variable in the binding context.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VarId(pub u32);

impl VarId {
	pub fn index(self) -> usize {
		self.0 as usize
	}
}

impl Display for VarId {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "#{}", self.0)
	}
}

/// A declared variable. It has no value of its own; identity is the id alone,
/// two variables with the same name but different ids are distinct.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Variable {
	pub id: VarId,
	pub name: String,
	pub ty: Option<SequenceType>,
}

impl Variable {
	/// Checks `value` against the declared type, if any.
	pub fn check(&self, value: &Sequence) -> Result<()> {
		match self.ty {
			Some(ty) if !ty.matches(value) => {
				return_error!(runtime::type_mismatch(&self.name, ty, value.to_string()))
			}
			_ => Ok(()),
		}
	}
}

impl PartialEq for Variable {
	fn eq(&self, other: &Self) -> bool {
		self.id == other.id
	}
}

impl Eq for Variable {}

impl Display for Variable {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "${}", self.name)
	}
}

/// Hands out variable ids. One scope per pipeline; ids are dense so the
/// binding context can index a plain vector.
#[derive(Debug, Default)]
pub struct Scope {
	next: u32,
}

impl Scope {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn declare(&mut self, name: impl Into<String>) -> Variable {
		self.declare_with(name, None)
	}

	pub fn declare_typed(&mut self, name: impl Into<String>, ty: SequenceType) -> Variable {
		self.declare_with(name, Some(ty))
	}

	fn declare_with(&mut self, name: impl Into<String>, ty: Option<SequenceType>) -> Variable {
		let id = VarId(self.next);
		self.next += 1;
		Variable {
			id,
			name: name.into(),
			ty,
		}
	}

	pub fn len(&self) -> usize {
		self.next as usize
	}

	pub fn is_empty(&self) -> bool {
		self.next == 0
	}
}

#[cfg(test)]
mod tests {
	use flwor_type::{Type, Value};

	use super::*;

	#[test]
	fn test_scope_assigns_dense_ids() {
		let mut scope = Scope::new();
		let x = scope.declare("x");
		let y = scope.declare("x");
		assert_eq!(x.id, VarId(0));
		assert_eq!(y.id, VarId(1));
		assert_ne!(x, y);
		assert_eq!(scope.len(), 2);
	}

	#[test]
	fn test_check_declared_type() {
		let mut scope = Scope::new();
		let x = scope.declare_typed("x", SequenceType::one(Type::Int8));
		assert!(x.check(&Sequence::singleton(Value::int8(1))).is_ok());

		let err = x.check(&Sequence::empty()).unwrap_err();
		assert_eq!(err.code, "RUNTIME_004");
	}

	#[test]
	fn test_untyped_accepts_anything() {
		let mut scope = Scope::new();
		let x = scope.declare("x");
		assert!(x.check(&Sequence::new(vec![Value::int8(1), Value::utf8("a")])).is_ok());
	}
}
