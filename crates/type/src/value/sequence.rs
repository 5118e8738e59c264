// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::{Result, Value, error::diagnostic::runtime, return_error};

/// An ordered, materialized run of items. A single item is the singleton
/// sequence; the empty sequence is an explicit binding of its own.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sequence(Vec<Value>);

impl Sequence {
	pub fn new(items: Vec<Value>) -> Self {
		Self(items)
	}

	pub fn empty() -> Self {
		Self(Vec::new())
	}

	pub fn singleton(item: impl Into<Value>) -> Self {
		Self(vec![item.into()])
	}

	pub fn from_option(item: Option<Value>) -> Self {
		match item {
			Some(item) => Self(vec![item]),
			None => Self::empty(),
		}
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn items(&self) -> &[Value] {
		&self.0
	}

	pub fn iter(&self) -> std::slice::Iter<'_, Value> {
		self.0.iter()
	}

	pub fn first(&self) -> Option<&Value> {
		self.0.first()
	}

	/// The single item of a singleton sequence.
	pub fn as_item(&self) -> Option<&Value> {
		match self.0.as_slice() {
			[item] => Some(item),
			_ => None,
		}
	}

	pub fn push(&mut self, item: Value) {
		self.0.push(item)
	}

	pub fn append(&mut self, other: &Sequence) {
		self.0.extend_from_slice(&other.0)
	}

	pub fn into_vec(self) -> Vec<Value> {
		self.0
	}

	/// Effective boolean value.
	pub fn ebv(&self) -> Result<bool> {
		match self.0.as_slice() {
			[] => Ok(false),
			[Value::Boolean(b)] => Ok(*b),
			[Value::Utf8(s)] => Ok(!s.is_empty()),
			[Value::Int8(i)] => Ok(*i != 0),
			[Value::Float8(f)] => Ok(*f != 0.0 && !f.is_nan()),
			items => return_error!(runtime::ebv_undefined(items.len())),
		}
	}
}

impl From<Value> for Sequence {
	fn from(item: Value) -> Self {
		Self(vec![item])
	}
}

impl From<bool> for Sequence {
	fn from(b: bool) -> Self {
		Self(vec![Value::bool(b)])
	}
}

impl From<Vec<Value>> for Sequence {
	fn from(items: Vec<Value>) -> Self {
		Self(items)
	}
}

impl FromIterator<Value> for Sequence {
	fn from_iter<T: IntoIterator<Item = Value>>(iter: T) -> Self {
		Self(iter.into_iter().collect())
	}
}

impl IntoIterator for Sequence {
	type Item = Value;
	type IntoIter = std::vec::IntoIter<Value>;

	fn into_iter(self) -> Self::IntoIter {
		self.0.into_iter()
	}
}

impl<'a> IntoIterator for &'a Sequence {
	type Item = &'a Value;
	type IntoIter = std::slice::Iter<'a, Value>;

	fn into_iter(self) -> Self::IntoIter {
		self.0.iter()
	}
}

impl Display for Sequence {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		if let Some(item) = self.as_item() {
			return Display::fmt(item, f);
		}
		f.write_str("(")?;
		for (i, item) in self.0.iter().enumerate() {
			if i > 0 {
				f.write_str(", ")?;
			}
			Display::fmt(item, f)?;
		}
		f.write_str(")")
	}
}
