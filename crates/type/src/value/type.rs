// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::Sequence;

/// The type of an item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Type {
	Boolean,
	Int8,
	Float8,
	Utf8,
}

impl Display for Type {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Type::Boolean => f.write_str("BOOLEAN"),
			Type::Int8 => f.write_str("INT8"),
			Type::Float8 => f.write_str("FLOAT8"),
			Type::Utf8 => f.write_str("UTF8"),
		}
	}
}

/// Cardinality constraint of a sequence type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Occurrence {
	ExactlyOne,
	ZeroOrOne,
	ZeroOrMore,
	OneOrMore,
}

impl Occurrence {
	pub fn accepts(&self, len: usize) -> bool {
		match self {
			Occurrence::ExactlyOne => len == 1,
			Occurrence::ZeroOrOne => len <= 1,
			Occurrence::ZeroOrMore => true,
			Occurrence::OneOrMore => len >= 1,
		}
	}

	fn suffix(&self) -> &'static str {
		match self {
			Occurrence::ExactlyOne => "",
			Occurrence::ZeroOrOne => "?",
			Occurrence::ZeroOrMore => "*",
			Occurrence::OneOrMore => "+",
		}
	}
}

/// Declared type of a variable: an optional item type plus a cardinality.
/// `item: None` accepts any item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SequenceType {
	pub item: Option<Type>,
	pub occurrence: Occurrence,
}

impl SequenceType {
	pub fn one(ty: Type) -> Self {
		Self {
			item: Some(ty),
			occurrence: Occurrence::ExactlyOne,
		}
	}

	pub fn optional(ty: Type) -> Self {
		Self {
			item: Some(ty),
			occurrence: Occurrence::ZeroOrOne,
		}
	}

	pub fn many(ty: Type) -> Self {
		Self {
			item: Some(ty),
			occurrence: Occurrence::ZeroOrMore,
		}
	}

	pub fn any() -> Self {
		Self {
			item: None,
			occurrence: Occurrence::ZeroOrMore,
		}
	}

	pub fn matches(&self, seq: &Sequence) -> bool {
		if !self.occurrence.accepts(seq.len()) {
			return false;
		}
		match self.item {
			Some(ty) => seq.iter().all(|item| item.get_type() == ty),
			None => true,
		}
	}
}

impl Display for SequenceType {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self.item {
			Some(ty) => write!(f, "{}{}", ty, self.occurrence.suffix()),
			None => write!(f, "ANY{}", self.occurrence.suffix()),
		}
	}
}
