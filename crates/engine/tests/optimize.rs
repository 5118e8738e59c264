// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

mod common;

use std::{
	cell::RefCell,
	rc::Rc,
	sync::atomic::{AtomicUsize, Ordering},
};

use common::{int_of, ints_of, render, run, run_err, strings};
use flwor_core::{Expr, Scope, Variable};
use flwor_engine::{Flwor, GroupSpec, OptimizerConfig, OrderKey, PipelineConfig, Rewrite};
use flwor_testing::{counting, func, impure, int, ints, literal, range, var};
use flwor_type::{Sequence, SequenceType, Type, Value};

fn add(a: &Variable, b: &Variable) -> Expr {
	func("add", &[a, b], |args| Ok(Sequence::singleton(Value::int8(int_of(&args[0]) + int_of(&args[1])))))
}

fn evaluations(counter: &AtomicUsize) -> usize {
	counter.load(Ordering::Relaxed)
}

fn unoptimized() -> PipelineConfig {
	PipelineConfig::new().with_optimizer(OptimizerConfig::disabled())
}

#[test]
fn test_constant_true_where_is_removed() {
	let mut scope = Scope::new();
	let x = scope.declare("x");

	let pipeline = Flwor::builder().for_each(&x, ints(&[1, 2])).where_(literal(true)).build(var(&x)).unwrap();

	assert_eq!(
		pipeline.rewrites(),
		&[Rewrite::WhereFolded {
			clause: "where true".to_string()
		}]
	);
	assert_eq!(pipeline.clauses().len(), 1);
	assert_eq!(run(&pipeline), ints_of(&[1, 2]));
}

#[test]
fn test_constant_false_where_is_kept() {
	let mut scope = Scope::new();
	let x = scope.declare("x");

	let pipeline = Flwor::builder().for_each(&x, ints(&[1, 2])).where_(literal(false)).build(var(&x)).unwrap();

	assert!(pipeline.rewrites().is_empty());
	assert!(run(&pipeline).is_empty());
}

#[test]
fn test_constant_let_is_bound_once_before_execution() {
	let mut scope = Scope::new();
	let k = scope.declare("k");
	let x = scope.declare("x");
	let (ten, counter) = counting(int(10));

	let pipeline = Flwor::builder().let_(&k, ten).for_each(&x, ints(&[1, 2])).build(add(&k, &x)).unwrap();

	assert_eq!(
		pipeline.rewrites(),
		&[Rewrite::LetInlined {
			var: "k".to_string(),
			value: "10".to_string()
		}]
	);
	assert_eq!(pipeline.explain(), "let $k := 10\nfor $x in (1, 2)\nreturn add($k, $x)");
	assert_eq!(run(&pipeline), ints_of(&[11, 12]));
	assert_eq!(run(&pipeline), ints_of(&[11, 12]));
	assert_eq!(evaluations(&counter), 0);
}

#[test]
fn test_constant_let_before_group_by_stays_a_clause() {
	let mut scope = Scope::new();
	let x = scope.declare("x");
	let k = scope.declare("k");
	let g = scope.declare("g");

	let pipeline = Flwor::builder()
		.for_each(&x, range(1, 2))
		.let_(&k, int(10))
		.group_by(vec![GroupSpec::new(&g, var(&x))])
		.build(render(&[&g, &k]))
		.unwrap();

	assert!(!pipeline.rewrites().iter().any(|r| matches!(r, Rewrite::LetInlined { .. })));
	assert!(pipeline.rewrites().contains(&Rewrite::LetHoisted {
		var: "k".to_string(),
		from: 1,
		to: 0,
	}));
	assert!(pipeline.rewrites().contains(&Rewrite::SlotsPruned {
		clause: "group by $g := $x".to_string(),
		vars: vec!["$x".to_string()],
	}));
	assert_eq!(strings(run(&pipeline)), vec!["1:10", "2:10"]);
}

#[test]
fn test_unused_bindings_are_removed() {
	let mut scope = Scope::new();
	let x = scope.declare("x");
	let y = scope.declare("y");
	let c = scope.declare("c");
	let (double, counter) = counting(func("double", &[&x], |args| Ok(args[0].clone())));

	let pipeline = Flwor::builder().for_each(&x, range(1, 3)).let_(&y, double).count(&c).build(var(&x)).unwrap();

	assert_eq!(
		pipeline.rewrites(),
		&[
			Rewrite::BindingRemoved {
				var: "y".to_string()
			},
			Rewrite::BindingRemoved {
				var: "c".to_string()
			},
		]
	);
	assert_eq!(run(&pipeline), ints_of(&[1, 2, 3]));
	assert_eq!(evaluations(&counter), 0);
}

#[test]
fn test_non_deterministic_let_is_never_removed() {
	let mut scope = Scope::new();
	let x = scope.declare("x");
	let y = scope.declare("y");
	let (effect, counter) = counting(impure("effect", &[&x], |args| Ok(args[0].clone())));

	let pipeline = Flwor::builder().for_each(&x, range(1, 3)).let_(&y, effect).build(var(&x)).unwrap();

	assert!(pipeline.rewrites().is_empty());
	assert_eq!(run(&pipeline), ints_of(&[1, 2, 3]));
	assert_eq!(evaluations(&counter), 3);
}

#[test]
fn test_let_is_hoisted_out_of_independent_for() {
	let mut scope = Scope::new();
	let x = scope.declare("x");
	let y = scope.declare("y");
	let z = scope.declare("z");
	let (square, counter) = counting(func("square", &[&x], |args| {
		let v = int_of(&args[0]);
		Ok(Sequence::singleton(Value::int8(v * v)))
	}));

	let build = |config: PipelineConfig| {
		Flwor::builder()
			.for_each(&x, range(1, 3))
			.for_each(&y, range(1, 4))
			.let_(&z, square.clone())
			.config(config)
			.build(add(&z, &y))
			.unwrap()
	};

	let optimized = build(PipelineConfig::default());
	assert_eq!(
		optimized.rewrites(),
		&[Rewrite::LetHoisted {
			var: "z".to_string(),
			from: 2,
			to: 1,
		}]
	);
	let hoisted = run(&optimized);
	assert_eq!(evaluations(&counter), 3);

	counter.store(0, Ordering::Relaxed);
	let plain = run(&build(unoptimized()));
	assert_eq!(evaluations(&counter), 12);
	assert_eq!(hoisted, plain);
}

#[test]
fn test_let_is_not_hoisted_across_barrier() {
	let mut scope = Scope::new();
	let x = scope.declare("x");
	let y = scope.declare("y");
	let z = scope.declare("z");

	let pipeline = Flwor::builder()
		.for_each(&x, range(1, 2))
		.order_by(vec![OrderKey::ascending(var(&x))])
		.for_each(&y, range(1, 2))
		.let_(&z, int(5))
		.config(PipelineConfig::new().with_optimizer(OptimizerConfig::default().with_constant_let(false)))
		.build(add(&z, &y))
		.unwrap();

	assert!(pipeline.rewrites().contains(&Rewrite::LetHoisted {
		var: "z".to_string(),
		from: 3,
		to: 2,
	}));
	assert!(matches!(pipeline.clauses()[1], flwor_engine::Clause::OrderBy(_)));
	assert_eq!(run(&pipeline), ints_of(&[6, 7, 6, 7]));
}

#[test]
fn test_unused_carried_slots_are_pruned() {
	let mut scope = Scope::new();
	let x = scope.declare("x");
	let y = scope.declare("y");

	let pipeline = Flwor::builder()
		.for_each(&x, ints(&[3, 1, 2]))
		.let_(&y, impure("noise", &[&x], |args| Ok(args[0].clone())))
		.order_by(vec![OrderKey::ascending(var(&x))])
		.build(var(&x))
		.unwrap();

	assert_eq!(
		pipeline.rewrites(),
		&[Rewrite::SlotsPruned {
			clause: "order by $x".to_string(),
			vars: vec!["$y".to_string()],
		}]
	);
	assert_eq!(run(&pipeline), ints_of(&[1, 2, 3]));
}

#[test]
fn test_hook_sees_every_rewrite() {
	let mut scope = Scope::new();
	let x = scope.declare("x");
	let c = scope.declare("c");
	let seen: Rc<RefCell<Vec<Rewrite>>> = Rc::default();
	let sink = seen.clone();

	let pipeline = Flwor::builder()
		.for_each(&x, range(1, 3))
		.where_(literal(true))
		.count(&c)
		.on_rewrite(move |rewrite| sink.borrow_mut().push(rewrite.clone()))
		.build(var(&x))
		.unwrap();

	assert_eq!(seen.borrow().as_slice(), pipeline.rewrites());
	assert_eq!(pipeline.rewrites().len(), 2);
}

#[test]
fn test_disabled_optimizer_keeps_every_clause() {
	let mut scope = Scope::new();
	let x = scope.declare("x");
	let k = scope.declare("k");
	let c = scope.declare("c");

	let pipeline = Flwor::builder()
		.for_each(&x, range(1, 3))
		.let_(&k, int(1))
		.where_(literal(true))
		.count(&c)
		.config(unoptimized())
		.build(var(&x))
		.unwrap();

	assert!(pipeline.rewrites().is_empty());
	assert_eq!(pipeline.clauses().len(), 4);
	assert_eq!(run(&pipeline), ints_of(&[1, 2, 3]));
}

#[test]
fn test_single_pass_can_be_switched_off() {
	let mut scope = Scope::new();
	let x = scope.declare("x");

	let pipeline = Flwor::builder()
		.for_each(&x, range(1, 3))
		.where_(literal(true))
		.config(PipelineConfig::new().with_optimizer(OptimizerConfig::default().with_fold_where(false)))
		.build(var(&x))
		.unwrap();

	assert!(pipeline.rewrites().is_empty());
}

#[test]
fn test_rewrite_serialization_and_display() {
	let rewrite = Rewrite::LetHoisted {
		var: "z".to_string(),
		from: 2,
		to: 1,
	};

	assert_eq!(
		serde_json::to_value(&rewrite).unwrap(),
		serde_json::json!({"kind": "let_hoisted", "var": "z", "from": 2, "to": 1})
	);
	assert_eq!(rewrite.to_string(), "hoisted let $z from clause 2 to 1");

	let json = serde_json::to_string(&Rewrite::BindingRemoved {
		var: "c".to_string(),
	})
	.unwrap();
	let back: Rewrite = serde_json::from_str(&json).unwrap();
	assert_eq!(back.to_string(), "removed unused binding $c");
}

#[test]
fn test_typed_let_is_not_hoisted_out_of_empty_for() {
	let mut scope = Scope::new();
	let x = scope.declare("x");
	let y = scope.declare_typed("y", SequenceType::one(Type::Int8));

	let build = |config: PipelineConfig| {
		Flwor::builder()
			.for_each(&x, ints(&[]))
			.let_(&y, literal(Value::utf8("a")))
			.config(config)
			.build(var(&y))
			.unwrap()
	};

	let optimized = build(PipelineConfig::default());
	assert!(optimized.rewrites().is_empty());
	assert!(run(&optimized).is_empty());
	assert!(run(&build(unoptimized())).is_empty());
}

#[test]
fn test_unused_typed_let_still_fails() {
	let mut scope = Scope::new();
	let x = scope.declare("x");
	let y = scope.declare_typed("y", SequenceType::one(Type::Int8));

	let build = |config: PipelineConfig| {
		Flwor::builder()
			.for_each(&x, ints(&[1, 2]))
			.let_(&y, literal(Value::utf8("a")))
			.config(config)
			.build(var(&x))
			.unwrap()
	};

	let optimized = build(PipelineConfig::default());
	assert!(optimized.rewrites().is_empty());
	assert_eq!(run_err(&optimized).code, "RUNTIME_004");
	assert_eq!(run_err(&build(unoptimized())).code, "RUNTIME_004");
}

#[test]
fn test_unused_count_with_mismatching_type_still_fails() {
	let mut scope = Scope::new();
	let x = scope.declare("x");
	let c = scope.declare_typed("c", SequenceType::one(Type::Utf8));

	let pipeline = Flwor::builder().for_each(&x, ints(&[1, 2])).count(&c).build(var(&x)).unwrap();

	assert!(pipeline.rewrites().is_empty());
	assert_eq!(run_err(&pipeline).code, "RUNTIME_004");
}

#[test]
fn test_typed_let_with_matching_constant_is_optimized() {
	let mut scope = Scope::new();
	let x = scope.declare("x");
	let y = scope.declare_typed("y", SequenceType::one(Type::Int8));

	let pipeline = Flwor::builder().for_each(&x, ints(&[1, 2])).let_(&y, int(7)).build(var(&y)).unwrap();

	assert_eq!(
		pipeline.rewrites(),
		&[Rewrite::LetInlined {
			var: "y".to_string(),
			value: "7".to_string(),
		}]
	);
	assert_eq!(run(&pipeline), ints_of(&[7, 7]));
}
