// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::collections::HashSet;

use flwor_core::{VarId, Variable};
use flwor_type::Result;
use tracing::instrument;

use crate::{
	clause::{
		Clause,
		group::GroupByClause,
		window::{WindowClause, WindowKind},
	},
	error::PlanError,
};

/// Structural checks, plus the carried slots of every barrier clause.
#[instrument(name = "plan::validate", level = "trace", skip_all)]
pub(super) fn validate(clauses: &mut [Clause]) -> Result<()> {
	let mut declared: HashSet<VarId> = HashSet::new();
	let mut scope: Vec<Variable> = Vec::new();

	for clause in clauses.iter_mut() {
		match clause {
			Clause::Window(window) => validate_window(window)?,
			Clause::OrderBy(order) => {
				if order.keys.is_empty() {
					return Err(PlanError::OrderByWithoutKeys {
						clause: order.to_string(),
					}
					.into());
				}
				order.carried = scope.clone();
			}
			Clause::GroupBy(group) => validate_group(group, &scope)?,
			_ => {}
		}

		for var in clause.declares() {
			if !declared.insert(var.id) {
				return Err(PlanError::DuplicateDeclaration {
					name: var.name.clone(),
					clause: clause.to_string(),
				}
				.into());
			}
		}

		match clause {
			Clause::GroupBy(group) => {
				scope = group.carried.clone();
				scope.extend(group.specs.iter().filter(|spec| !spec.occluded).map(|spec| spec.var.clone()));
			}
			clause => scope.extend(clause.declares().into_iter().cloned()),
		}
	}

	Ok(())
}

fn validate_window(window: &WindowClause) -> Result<()> {
	if window.kind == WindowKind::Sliding && window.end.is_none() {
		return Err(PlanError::SlidingWindowWithoutEnd {
			clause: window.to_string(),
		}
		.into());
	}

	let mut names = HashSet::new();
	for var in window.declares() {
		if !names.insert(var.name.as_str()) {
			return Err(PlanError::WindowDuplicateVariable {
				name: var.name.clone(),
				clause: window.to_string(),
			}
			.into());
		}
	}
	Ok(())
}

fn validate_group(group: &mut GroupByClause, scope: &[Variable]) -> Result<()> {
	if group.specs.is_empty() {
		return Err(PlanError::GroupByWithoutSpecs {
			clause: group.to_string(),
		}
		.into());
	}

	for spec in &group.specs {
		if let Some(source) = spec.source {
			if !scope.iter().any(|var| var.id == source) {
				return Err(PlanError::UndeclaredGroupVariable {
					name: spec.var.name.clone(),
					clause: group.to_string(),
				}
				.into());
			}
		}
	}

	let names: Vec<String> = group.specs.iter().map(|spec| spec.var.name.clone()).collect();
	for (i, spec) in group.specs.iter_mut().enumerate() {
		spec.occluded = names[i + 1..].contains(&spec.var.name);
	}

	group.carried = scope.iter().filter(|var| !names.contains(&var.name)).cloned().collect();
	Ok(())
}
