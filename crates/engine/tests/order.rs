// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

mod common;

use common::{int_of, ints_of, run, run_err, strings};
use flwor_core::{Expr, Scope, Variable};
use flwor_engine::{Flwor, OrderKey};
use flwor_testing::{func, ints, var};
use flwor_type::{Sequence, Value};

/// `$x` mapped through `f`, an empty result standing for the empty sequence.
fn key(x: &Variable, f: fn(i64) -> Option<Value>) -> Expr {
	func("key", &[x], move |args| Ok(Sequence::from_option(f(int_of(&args[0])))))
}

#[test]
fn test_ascending() {
	let mut scope = Scope::new();
	let x = scope.declare("x");
	let pipeline = Flwor::builder()
		.for_each(&x, ints(&[3, 1, 2]))
		.order_by(vec![OrderKey::ascending(var(&x))])
		.build(var(&x))
		.unwrap();
	assert_eq!(run(&pipeline), ints_of(&[1, 2, 3]));
}

#[test]
fn test_descending() {
	let mut scope = Scope::new();
	let x = scope.declare("x");
	let pipeline = Flwor::builder()
		.for_each(&x, ints(&[3, 1, 4, 1, 5]))
		.order_by(vec![OrderKey::descending(var(&x))])
		.build(var(&x))
		.unwrap();
	assert_eq!(run(&pipeline), ints_of(&[5, 4, 3, 1, 1]));
}

#[test]
fn test_stable_keeps_input_order_of_ties() {
	let mut scope = Scope::new();
	let i = scope.declare("i");
	let k = scope.declare("k");
	let v = scope.declare("v");

	let pipeline = Flwor::builder()
		.for_each(&i, ints(&[1, 2]))
		.let_(&k, func("one", &[&i], |_| Ok(Sequence::singleton(Value::int8(1)))))
		.let_(&v, func("label", &[&i], |args| {
			Ok(Sequence::singleton(if int_of(&args[0]) == 1 { "b" } else { "a" }))
		}))
		.stable_order_by(vec![OrderKey::ascending(var(&k))])
		.build(var(&v))
		.unwrap();

	assert_eq!(strings(run(&pipeline)), vec!["b", "a"]);
}

#[test]
fn test_second_key_breaks_ties() {
	let mut scope = Scope::new();
	let i = scope.declare("i");
	let k = scope.declare("k");
	let v = scope.declare("v");

	let pipeline = Flwor::builder()
		.for_each(&i, ints(&[1, 2, 3]))
		.let_(&k, func("parity", &[&i], |args| Ok(Sequence::singleton(Value::int8(int_of(&args[0]) % 2)))))
		.let_(&v, var(&i))
		.order_by(vec![OrderKey::ascending(var(&k)), OrderKey::descending(var(&v))])
		.build(var(&v))
		.unwrap();

	assert_eq!(run(&pipeline), ints_of(&[2, 3, 1]));
}

#[test]
fn test_large_input_is_fully_ordered() {
	let mut scope = Scope::new();
	let x = scope.declare("x");
	let source: Vec<i64> = (0..200).map(|i| (i * 37) % 101).collect();

	let pipeline = Flwor::builder()
		.for_each(&x, ints(&source))
		.stable_order_by(vec![OrderKey::ascending(var(&x))])
		.build(var(&x))
		.unwrap();

	let mut expected = source.clone();
	expected.sort();
	assert_eq!(run(&pipeline), ints_of(&expected));
}

fn none_for_zero(v: i64) -> Option<Value> {
	(v != 0).then(|| Value::int8(v))
}

#[test]
fn test_empty_least_by_default() {
	let mut scope = Scope::new();
	let x = scope.declare("x");
	let order = |k: OrderKey| {
		let pipeline =
			Flwor::builder().for_each(&x, ints(&[2, 0, 1])).order_by(vec![k]).build(var(&x)).unwrap();
		run(&pipeline)
	};

	assert_eq!(order(OrderKey::ascending(key(&x, none_for_zero))), ints_of(&[0, 1, 2]));
	assert_eq!(order(OrderKey::ascending(key(&x, none_for_zero)).empty_greatest()), ints_of(&[1, 2, 0]));
}

#[test]
fn test_descending_negates_empty_placement() {
	let mut scope = Scope::new();
	let x = scope.declare("x");
	let order = |k: OrderKey| {
		let pipeline =
			Flwor::builder().for_each(&x, ints(&[2, 0, 1])).order_by(vec![k]).build(var(&x)).unwrap();
		run(&pipeline)
	};

	assert_eq!(order(OrderKey::descending(key(&x, none_for_zero))), ints_of(&[2, 1, 0]));
	assert_eq!(order(OrderKey::descending(key(&x, none_for_zero)).empty_greatest()), ints_of(&[0, 2, 1]));
}

fn float_key(v: i64) -> Option<Value> {
	match v {
		1 => Some(Value::float8(1.0)),
		2 => Some(Value::float8(f64::NAN)),
		3 => None,
		_ => Some(Value::float8(0.5)),
	}
}

#[test]
fn test_nan_sorts_between_empty_and_values() {
	let mut scope = Scope::new();
	let x = scope.declare("x");
	let order = |k: OrderKey| {
		let pipeline =
			Flwor::builder().for_each(&x, ints(&[1, 2, 3, 4])).order_by(vec![k]).build(var(&x)).unwrap();
		run(&pipeline)
	};

	assert_eq!(order(OrderKey::ascending(key(&x, float_key))), ints_of(&[3, 2, 4, 1]));
	assert_eq!(order(OrderKey::ascending(key(&x, float_key)).empty_greatest()), ints_of(&[4, 1, 2, 3]));
}

#[test]
fn test_mixed_numeric_keys() {
	let mut scope = Scope::new();
	let x = scope.declare("x");
	let mixed = func("mixed", &[&x], |args| {
		let v = int_of(&args[0]);
		Ok(Sequence::singleton(if v % 2 == 0 { Value::float8(v as f64 + 0.5) } else { Value::int8(v) }))
	});

	let pipeline = Flwor::builder()
		.for_each(&x, ints(&[4, 3, 2, 1]))
		.order_by(vec![OrderKey::ascending(mixed)])
		.build(var(&x))
		.unwrap();
	assert_eq!(run(&pipeline), ints_of(&[1, 2, 3, 4]));
}

#[test]
fn test_carried_variables_follow_their_tuple() {
	let mut scope = Scope::new();
	let x = scope.declare("x");
	let y = scope.declare("y");
	let times_ten = func("times_ten", &[&x], |args| Ok(Sequence::singleton(Value::int8(int_of(&args[0]) * 10))));

	let pipeline = Flwor::builder()
		.for_each(&x, ints(&[3, 1, 2]))
		.let_(&y, times_ten)
		.order_by(vec![OrderKey::ascending(var(&x))])
		.build(var(&y))
		.unwrap();
	assert_eq!(run(&pipeline), ints_of(&[10, 20, 30]));
}

#[test]
fn test_key_with_many_items_fails() {
	let mut scope = Scope::new();
	let x = scope.declare("x");
	let pair = func("pair", &[&x], |args| Ok(Sequence::new(vec![args[0].items()[0].clone(); 2])));

	let pipeline =
		Flwor::builder().for_each(&x, ints(&[1, 2])).order_by(vec![OrderKey::ascending(pair)]).build(var(&x)).unwrap();
	let err = run_err(&pipeline);
	assert_eq!(err.code, "ORDER_001");
	assert_eq!(err.clause.as_deref(), Some("order by pair($x)"));
}

#[test]
fn test_incomparable_keys_fail() {
	let mut scope = Scope::new();
	let x = scope.declare("x");
	let mixed = func("mixed", &[&x], |args| {
		Ok(Sequence::singleton(if int_of(&args[0]) == 1 { Value::int8(1) } else { Value::utf8("one") }))
	});

	let pipeline =
		Flwor::builder().for_each(&x, ints(&[1, 2])).order_by(vec![OrderKey::ascending(mixed)]).build(var(&x)).unwrap();
	let err = run_err(&pipeline);
	assert_eq!(err.code, "ORDER_002");
	assert!(err.clause.as_deref().is_some_and(|clause| clause.starts_with("order by")));
}

#[test]
fn test_order_by_without_keys_is_rejected_at_build() {
	let mut scope = Scope::new();
	let x = scope.declare("x");
	let err = Flwor::builder().for_each(&x, ints(&[1])).order_by(vec![]).build(var(&x)).unwrap_err();
	assert_eq!(err.code, "ORDER_003");
}

#[test]
fn test_order_of_empty_input() {
	let mut scope = Scope::new();
	let x = scope.declare("x");
	let pipeline =
		Flwor::builder().for_each(&x, ints(&[])).order_by(vec![OrderKey::ascending(var(&x))]).build(var(&x)).unwrap();
	assert!(run(&pipeline).is_empty());
}
