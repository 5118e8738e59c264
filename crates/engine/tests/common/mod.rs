// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

#![allow(dead_code)]

use flwor_core::{Expr, Variable};
use flwor_engine::{Halt, Pipeline};
use flwor_testing::func;
use flwor_type::{Error, Sequence, Value};

/// Drains one execution of `pipeline`.
pub fn run(pipeline: &Pipeline) -> Vec<Value> {
	flwor_testing::init_tracing();
	pipeline.execute().collect_sequence().unwrap().into_vec()
}

/// Drains one execution, expecting it to fail.
pub fn run_err(pipeline: &Pipeline) -> Error {
	flwor_testing::init_tracing();
	match pipeline.execute().collect_sequence() {
		Err(Halt::Failed(err)) => err,
		Err(Halt::Stopped) => panic!("pipeline stopped instead of failing"),
		Ok(items) => panic!("expected an error, got {}", items),
	}
}

pub fn int_of(seq: &Sequence) -> i64 {
	match seq.as_item() {
		Some(Value::Int8(v)) => *v,
		_ => panic!("not a single integer: {}", seq),
	}
}

pub fn ints_of(values: &[i64]) -> Vec<Value> {
	values.iter().map(|v| Value::int8(*v)).collect()
}

/// Items joined by commas, strings unquoted, `_` for the empty sequence.
pub fn text(seq: &Sequence) -> String {
	if seq.is_empty() {
		return "_".to_string();
	}
	seq.iter().map(plain).collect::<Vec<_>>().join(",")
}

fn plain(item: &Value) -> String {
	match item {
		Value::Utf8(s) => s.clone(),
		other => other.to_string(),
	}
}

/// The values of `vars` rendered with [`text`] and joined by `:`.
pub fn render(vars: &[&Variable]) -> Expr {
	func("render", vars, |args| {
		let parts: Vec<String> = args.iter().map(text).collect();
		Ok(Sequence::singleton(Value::utf8(parts.join(":"))))
	})
}

pub fn strings(values: Vec<Value>) -> Vec<String> {
	values.iter().map(plain).collect()
}
