// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	fmt::{self, Debug, Formatter},
	sync::{
		Arc,
		atomic::{AtomicUsize, Ordering},
	},
};

use flwor_core::{BindingContext, Expr, Expression, LazySequence, ScoredSequence, VarId, Variable, VariableRef};
use flwor_type::{Result, Sequence, Value, error, error::diagnostic::runtime};

/// A fixed sequence. Reports itself as constant so the optimizer may fold it.
#[derive(Debug, Clone)]
pub struct Literal(pub Sequence);

impl Expression for Literal {
	fn evaluate(&self, _ctx: &BindingContext) -> Result<Sequence> {
		Ok(self.0.clone())
	}

	fn constant(&self) -> Option<Sequence> {
		Some(self.0.clone())
	}

	fn uses(&self, _var: VarId) -> bool {
		false
	}

	fn is_deterministic(&self) -> bool {
		true
	}

	fn explain(&self) -> String {
		self.0.to_string()
	}
}

pub fn literal(value: impl Into<Sequence>) -> Expr {
	Arc::new(Literal(value.into()))
}

pub fn int(v: i64) -> Expr {
	literal(Value::int8(v))
}

pub fn ints(values: &[i64]) -> Expr {
	literal(values.iter().map(|v| Value::int8(*v)).collect::<Sequence>())
}

pub fn strs(values: &[&str]) -> Expr {
	literal(values.iter().map(|v| Value::utf8(*v)).collect::<Sequence>())
}

pub fn var(var: &Variable) -> Expr {
	Arc::new(VariableRef(var.clone()))
}

type Body = Arc<dyn Fn(&[Sequence]) -> Result<Sequence>>;

/// Computes a sequence from the values of the declared input variables. Only
/// those variables count as used.
#[derive(Clone)]
pub struct Func {
	name: String,
	inputs: Vec<Variable>,
	body: Body,
	deterministic: bool,
}

impl Debug for Func {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("Func").field("name", &self.name).field("inputs", &self.inputs).finish()
	}
}

impl Expression for Func {
	fn evaluate(&self, ctx: &BindingContext) -> Result<Sequence> {
		let args = self.inputs.iter().map(|var| ctx.get(var).cloned()).collect::<Result<Vec<_>>>()?;
		(self.body)(&args)
	}

	fn uses(&self, var: VarId) -> bool {
		self.inputs.iter().any(|input| input.id == var)
	}

	fn is_deterministic(&self) -> bool {
		self.deterministic
	}

	fn explain(&self) -> String {
		let args: Vec<String> = self.inputs.iter().map(ToString::to_string).collect();
		format!("{}({})", self.name, args.join(", "))
	}
}

/// A deterministic function of `inputs`.
pub fn func<F>(name: &str, inputs: &[&Variable], body: F) -> Expr
where
	F: Fn(&[Sequence]) -> Result<Sequence> + 'static,
{
	new_func(name, inputs, body, true)
}

/// Like [`func`], but never hoisted or removed by the optimizer.
pub fn impure<F>(name: &str, inputs: &[&Variable], body: F) -> Expr
where
	F: Fn(&[Sequence]) -> Result<Sequence> + 'static,
{
	new_func(name, inputs, body, false)
}

fn new_func<F>(name: &str, inputs: &[&Variable], body: F, deterministic: bool) -> Expr
where
	F: Fn(&[Sequence]) -> Result<Sequence> + 'static,
{
	Arc::new(Func {
		name: name.to_string(),
		inputs: inputs.iter().map(|v| (*v).clone()).collect(),
		body: Arc::new(body),
		deterministic,
	})
}

/// Maps every item of `input` through `f`.
pub fn unary<F>(name: &str, input: &Variable, f: F) -> Expr
where
	F: Fn(&Value) -> Value + 'static,
{
	func(name, &[input], move |args| Ok(args[0].iter().map(&f).collect()))
}

/// Integers `from..=to`, produced lazily.
pub fn range(from: i64, to: i64) -> Expr {
	Arc::new(Range {
		from,
		to,
	})
}

#[derive(Debug)]
struct Range {
	from: i64,
	to: i64,
}

impl Expression for Range {
	fn evaluate(&self, _ctx: &BindingContext) -> Result<Sequence> {
		Ok((self.from..=self.to).map(Value::int8).collect())
	}

	fn iter(&self, _ctx: &BindingContext) -> Result<LazySequence> {
		Ok(Box::new((self.from..=self.to).map(|v| Ok(Value::int8(v)))))
	}

	fn uses(&self, _var: VarId) -> bool {
		false
	}

	fn is_deterministic(&self) -> bool {
		true
	}

	fn explain(&self) -> String {
		format!("{} to {}", self.from, self.to)
	}
}

/// Always fails with `RUNTIME_005`.
#[derive(Debug)]
pub struct Failing(pub String);

impl Expression for Failing {
	fn evaluate(&self, _ctx: &BindingContext) -> Result<Sequence> {
		Err(error!(runtime::expression_failed(self.0.clone())))
	}

	fn uses(&self, _var: VarId) -> bool {
		false
	}

	fn explain(&self) -> String {
		"fail()".to_string()
	}
}

pub fn failing(message: &str) -> Expr {
	Arc::new(Failing(message.to_string()))
}

/// Yields `items` lazily, then fails after the `n`th one.
#[derive(Debug)]
pub struct FailAfter {
	items: Vec<Value>,
	n: usize,
}

impl Expression for FailAfter {
	fn evaluate(&self, ctx: &BindingContext) -> Result<Sequence> {
		self.iter(ctx)?.collect()
	}

	fn iter(&self, _ctx: &BindingContext) -> Result<LazySequence> {
		let n = self.n;
		let items = self.items.clone().into_iter().take(n).map(Ok);
		let failure =
			std::iter::once_with(move || Err(error!(runtime::expression_failed(format!("failed after {} items", n)))));
		Ok(Box::new(items.chain(failure)))
	}

	fn uses(&self, _var: VarId) -> bool {
		false
	}

	fn explain(&self) -> String {
		"fail_after()".to_string()
	}
}

pub fn fail_after(items: &[i64], n: usize) -> Expr {
	Arc::new(FailAfter {
		items: items.iter().map(|v| Value::int8(*v)).collect(),
		n,
	})
}

/// Items with explicit relevance scores.
#[derive(Debug)]
pub struct Scored(pub Vec<(Value, f64)>);

impl Expression for Scored {
	fn evaluate(&self, _ctx: &BindingContext) -> Result<Sequence> {
		Ok(self.0.iter().map(|(item, _)| item.clone()).collect())
	}

	fn iter_scored(&self, _ctx: &BindingContext) -> Result<ScoredSequence> {
		Ok(Box::new(self.0.clone().into_iter().map(Ok)))
	}

	fn uses(&self, _var: VarId) -> bool {
		false
	}

	fn is_deterministic(&self) -> bool {
		true
	}

	fn explain(&self) -> String {
		"scored()".to_string()
	}
}

pub fn scored(items: &[(&str, f64)]) -> Expr {
	Arc::new(Scored(items.iter().map(|(item, score)| (Value::utf8(*item), *score)).collect()))
}

/// Forwards to `inner`, counting every evaluation.
#[derive(Debug)]
pub struct Counting {
	inner: Expr,
	count: Arc<AtomicUsize>,
}

impl Expression for Counting {
	fn evaluate(&self, ctx: &BindingContext) -> Result<Sequence> {
		self.count.fetch_add(1, Ordering::Relaxed);
		self.inner.evaluate(ctx)
	}

	fn iter(&self, ctx: &BindingContext) -> Result<LazySequence> {
		self.count.fetch_add(1, Ordering::Relaxed);
		self.inner.iter(ctx)
	}

	fn iter_scored(&self, ctx: &BindingContext) -> Result<ScoredSequence> {
		self.count.fetch_add(1, Ordering::Relaxed);
		self.inner.iter_scored(ctx)
	}

	fn constant(&self) -> Option<Sequence> {
		self.inner.constant()
	}

	fn uses(&self, var: VarId) -> bool {
		self.inner.uses(var)
	}

	fn is_deterministic(&self) -> bool {
		self.inner.is_deterministic()
	}

	fn explain(&self) -> String {
		self.inner.explain()
	}
}

/// Wraps `inner` and returns the shared evaluation counter.
pub fn counting(inner: Expr) -> (Expr, Arc<AtomicUsize>) {
	let count = Arc::new(AtomicUsize::new(0));
	let expr = Arc::new(Counting {
		inner,
		count: count.clone(),
	});
	(expr, count)
}
