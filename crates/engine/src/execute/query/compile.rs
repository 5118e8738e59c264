// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use tracing::instrument;

use crate::{
	clause::{Clause, window::WindowKind},
	execute::{
		Evaluator,
		query::{
			count::CountNode,
			r#for::ForNode,
			group::GroupByNode,
			r#let::LetNode,
			order::OrderByNode,
			start::StartNode,
			r#where::WhereNode,
			window::{sliding::SlidingWindowNode, tumbling::TumblingWindowNode},
		},
	},
};

/// Builds the evaluator chain: each clause wraps the evaluator of the clause
/// before it, the innermost being a single empty tuple.
#[instrument(name = "query::compile", level = "trace", skip_all)]
pub(crate) fn compile(clauses: &[Clause]) -> Evaluator {
	let mut chain = Evaluator::Start(StartNode::new());
	for clause in clauses {
		let input = Box::new(chain);
		chain = match clause {
			Clause::For(clause) => Evaluator::For(ForNode::new(input, clause.clone())),
			Clause::Let(clause) => Evaluator::Let(LetNode::new(input, clause.clone())),
			Clause::Where(clause) => Evaluator::Where(WhereNode::new(input, clause.clone())),
			Clause::Count(clause) => Evaluator::Count(CountNode::new(input, clause.clone())),
			Clause::OrderBy(clause) => Evaluator::OrderBy(OrderByNode::new(input, clause.clone())),
			Clause::GroupBy(clause) => Evaluator::GroupBy(GroupByNode::new(input, clause.clone())),
			Clause::Window(clause) => match clause.kind {
				WindowKind::Tumbling => {
					Evaluator::TumblingWindow(TumblingWindowNode::new(input, clause.clone()))
				}
				WindowKind::Sliding => Evaluator::SlidingWindow(SlidingWindowNode::new(input, clause.clone())),
			},
		};
	}
	chain
}
