// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::{
	cmp::Ordering,
	fmt::{Display, Formatter},
};

use serde::{Deserialize, Serialize};

use crate::{Result, error::diagnostic::order, return_error};

pub mod sequence;
pub mod r#type;

use r#type::Type;

/// A single item, represented as a native Rust type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Value {
	/// A boolean: true or false.
	Boolean(bool),
	/// An 8-byte signed integer
	Int8(i64),
	/// An 8-byte floating point
	Float8(f64),
	/// A UTF-8 encoded text.
	Utf8(String),
}

impl Value {
	pub fn bool(v: impl Into<bool>) -> Self {
		Value::Boolean(v.into())
	}

	pub fn int8(v: impl Into<i64>) -> Self {
		Value::Int8(v.into())
	}

	pub fn float8(v: impl Into<f64>) -> Self {
		Value::Float8(v.into())
	}

	pub fn utf8(v: impl Into<String>) -> Self {
		Value::Utf8(v.into())
	}

	pub fn get_type(&self) -> Type {
		match self {
			Value::Boolean(_) => Type::Boolean,
			Value::Int8(_) => Type::Int8,
			Value::Float8(_) => Type::Float8,
			Value::Utf8(_) => Type::Utf8,
		}
	}

	pub fn is_nan(&self) -> bool {
		matches!(self, Value::Float8(f) if f.is_nan())
	}

	/// Natural ordering used by order-by keys.
	///
	/// Numbers compare numerically across `Int8` and `Float8`, text by code
	/// point and booleans with `false < true`. Any other pairing cannot be
	/// ordered and yields `ORDER_002`. NaN compares equal to everything here;
	/// callers that care place it before calling.
	pub fn compare(&self, other: &Value) -> Result<Ordering> {
		match (self, other) {
			(Value::Int8(l), Value::Int8(r)) => Ok(l.cmp(r)),
			(Value::Utf8(l), Value::Utf8(r)) => Ok(l.cmp(r)),
			(Value::Boolean(l), Value::Boolean(r)) => Ok(l.cmp(r)),
			(Value::Float8(l), Value::Float8(r)) => Ok(l.partial_cmp(r).unwrap_or(Ordering::Equal)),
			(Value::Int8(i), Value::Float8(f)) => Ok(compare_int_float(*i, *f)),
			(Value::Float8(f), Value::Int8(i)) => Ok(compare_int_float(*i, *f).reverse()),
			(l, r) => return_error!(order::incomparable_values(l.get_type(), r.get_type())),
		}
	}

	/// Equivalence used by group-by keys.
	///
	/// Unlike [`PartialEq`], `Int8(2)` is equivalent to `Float8(2.0)` and NaN
	/// is equivalent to NaN. Values of different families are never
	/// equivalent.
	pub fn equivalent(&self, other: &Value) -> bool {
		match (self, other) {
			(Value::Boolean(l), Value::Boolean(r)) => l == r,
			(Value::Utf8(l), Value::Utf8(r)) => l == r,
			(Value::Int8(l), Value::Int8(r)) => l == r,
			(Value::Float8(l), Value::Float8(r)) => l == r || (l.is_nan() && r.is_nan()),
			(Value::Int8(i), Value::Float8(f)) | (Value::Float8(f), Value::Int8(i)) => {
				integral(*f) == Some(*i)
			}
			_ => false,
		}
	}

	/// Appends a canonical byte encoding to `buf`; equivalent values encode
	/// identically.
	pub fn hash_into(&self, buf: &mut Vec<u8>) {
		match self {
			Value::Boolean(b) => {
				buf.push(1);
				buf.push(*b as u8);
			}
			Value::Int8(i) => {
				buf.push(2);
				buf.extend_from_slice(&i.to_le_bytes());
			}
			Value::Float8(f) => match integral(*f) {
				Some(i) => {
					buf.push(2);
					buf.extend_from_slice(&i.to_le_bytes());
				}
				None if f.is_nan() => buf.push(3),
				None => {
					buf.push(4);
					buf.extend_from_slice(&f.to_bits().to_le_bytes());
				}
			},
			Value::Utf8(s) => {
				buf.push(5);
				buf.extend_from_slice(&(s.len() as u64).to_le_bytes());
				buf.extend_from_slice(s.as_bytes());
			}
		}
	}
}

// 2^63 is exactly representable, i64::MAX is not.
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

/// Exact ordering of an integer against a float, without rounding the
/// integer through `f64`. NaN compares equal.
fn compare_int_float(i: i64, f: f64) -> Ordering {
	if f.is_nan() {
		return Ordering::Equal;
	}
	if f >= I64_BOUND {
		return Ordering::Less;
	}
	if f < -I64_BOUND {
		return Ordering::Greater;
	}
	match i.cmp(&(f.trunc() as i64)) {
		Ordering::Equal => 0f64.partial_cmp(&f.fract()).unwrap_or(Ordering::Equal),
		ord => ord,
	}
}

fn integral(f: f64) -> Option<i64> {
	if f.fract() == 0.0 && f >= -I64_BOUND && f < I64_BOUND {
		Some(f as i64)
	} else {
		None
	}
}

impl Display for Value {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Value::Boolean(true) => f.write_str("true"),
			Value::Boolean(false) => f.write_str("false"),
			Value::Int8(value) => Display::fmt(value, f),
			Value::Float8(value) => Display::fmt(value, f),
			Value::Utf8(value) => write!(f, "\"{}\"", value),
		}
	}
}

impl From<bool> for Value {
	fn from(v: bool) -> Self {
		Value::Boolean(v)
	}
}

impl From<i64> for Value {
	fn from(v: i64) -> Self {
		Value::Int8(v)
	}
}

impl From<i32> for Value {
	fn from(v: i32) -> Self {
		Value::Int8(v as i64)
	}
}

impl From<f64> for Value {
	fn from(v: f64) -> Self {
		Value::Float8(v)
	}
}

impl From<&str> for Value {
	fn from(v: &str) -> Self {
		Value::Utf8(v.to_string())
	}
}

impl From<String> for Value {
	fn from(v: String) -> Self {
		Value::Utf8(v)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	mod compare {
		use super::*;

		#[test]
		fn test_numbers_across_types() {
			assert_eq!(Value::int8(1).compare(&Value::float8(1.5)).unwrap(), Ordering::Less);
			assert_eq!(Value::float8(2.0).compare(&Value::int8(2)).unwrap(), Ordering::Equal);
			assert_eq!(Value::int8(3).compare(&Value::int8(-3)).unwrap(), Ordering::Greater);
		}

		#[test]
		fn test_large_integers_are_exact() {
			let big = 9_007_199_254_740_993i64; // 2^53 + 1
			let float = Value::float8(9_007_199_254_740_992.0);
			assert_eq!(Value::int8(big).compare(&float).unwrap(), Ordering::Greater);
			assert_eq!(float.compare(&Value::int8(big)).unwrap(), Ordering::Less);
			assert!(!Value::int8(big).equivalent(&float));
			assert_eq!(Value::int8(big - 1).compare(&float).unwrap(), Ordering::Equal);
		}

		#[test]
		fn test_fractions_and_bounds() {
			assert_eq!(Value::int8(-2).compare(&Value::float8(-2.5)).unwrap(), Ordering::Greater);
			assert_eq!(Value::int8(i64::MAX).compare(&Value::float8(f64::INFINITY)).unwrap(), Ordering::Less);
			assert_eq!(Value::int8(i64::MIN).compare(&Value::float8(-1e300)).unwrap(), Ordering::Greater);
		}

		#[test]
		fn test_text_and_boolean() {
			assert_eq!(Value::utf8("a").compare(&Value::utf8("b")).unwrap(), Ordering::Less);
			assert_eq!(Value::bool(true).compare(&Value::bool(false)).unwrap(), Ordering::Greater);
		}

		#[test]
		fn test_incomparable() {
			let err = Value::int8(1).compare(&Value::utf8("1")).unwrap_err();
			assert_eq!(err.code, "ORDER_002");
		}
	}

	mod equivalent {
		use super::*;

		#[test]
		fn test_integer_and_float() {
			assert!(Value::int8(2).equivalent(&Value::float8(2.0)));
			assert!(!Value::int8(2).equivalent(&Value::float8(2.5)));
		}

		#[test]
		fn test_nan() {
			assert!(Value::float8(f64::NAN).equivalent(&Value::float8(f64::NAN)));
			assert!(!Value::float8(f64::NAN).equivalent(&Value::float8(1.0)));
		}

		#[test]
		fn test_different_families() {
			assert!(!Value::int8(1).equivalent(&Value::utf8("1")));
			assert!(!Value::bool(true).equivalent(&Value::int8(1)));
		}
	}

	mod hash_into {
		use super::*;

		fn bytes(v: &Value) -> Vec<u8> {
			let mut buf = Vec::new();
			v.hash_into(&mut buf);
			buf
		}

		#[test]
		fn test_equivalent_values_encode_equally() {
			assert_eq!(bytes(&Value::int8(7)), bytes(&Value::float8(7.0)));
			assert_eq!(bytes(&Value::float8(0.0)), bytes(&Value::float8(-0.0)));
			assert_eq!(bytes(&Value::float8(f64::NAN)), bytes(&Value::float8(-f64::NAN)));
		}

		#[test]
		fn test_distinct_values_encode_differently() {
			assert_ne!(bytes(&Value::int8(1)), bytes(&Value::bool(true)));
			assert_ne!(bytes(&Value::float8(1.5)), bytes(&Value::int8(1)));
			assert_ne!(bytes(&Value::utf8("ab")), bytes(&Value::utf8("a")));
		}
	}
}
