// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{self, Display, Formatter};

use flwor_type::{Diagnostic, Error, IntoDiagnostic};

/// Why a pipeline stopped producing before exhaustion.
#[derive(Debug)]
pub enum Halt {
	/// The interrupt was observed. Not an error.
	Stopped,
	Failed(Error),
}

/// Outcome of one evaluator step: `Ok(true)` produced a tuple, `Ok(false)`
/// is exhaustion.
pub type Advance = std::result::Result<bool, Halt>;

impl Halt {
	pub fn is_stopped(&self) -> bool {
		matches!(self, Halt::Stopped)
	}

	pub fn error(&self) -> Option<&Error> {
		match self {
			Halt::Stopped => None,
			Halt::Failed(err) => Some(err),
		}
	}
}

impl From<Error> for Halt {
	fn from(err: Error) -> Self {
		Halt::Failed(err)
	}
}

impl Display for Halt {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			Halt::Stopped => f.write_str("pipeline stopped"),
			Halt::Failed(err) => Display::fmt(err, f),
		}
	}
}

impl std::error::Error for Halt {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			Halt::Stopped => None,
			Halt::Failed(err) => Some(err),
		}
	}
}

/// Structural problems found while building a pipeline, before any tuple is
/// produced.
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
	#[error("Variable '${name}' is declared more than once in window clause")]
	WindowDuplicateVariable {
		name: String,
		clause: String,
	},

	#[error("Sliding window requires an end condition")]
	SlidingWindowWithoutEnd {
		clause: String,
	},

	#[error("Group by requires at least one grouping specification")]
	GroupByWithoutSpecs {
		clause: String,
	},

	#[error("Grouping variable '${name}' is not declared by an earlier clause")]
	UndeclaredGroupVariable {
		name: String,
		clause: String,
	},

	#[error("Order by requires at least one key")]
	OrderByWithoutKeys {
		clause: String,
	},

	#[error("Variable '${name}' is declared by more than one clause")]
	DuplicateDeclaration {
		name: String,
		clause: String,
	},
}

impl IntoDiagnostic for PlanError {
	fn into_diagnostic(self) -> Diagnostic {
		let message = self.to_string();
		match self {
			PlanError::WindowDuplicateVariable {
				name,
				clause,
			} => Diagnostic {
				code: "WINDOW_001".to_string(),
				message,
				clause: Some(clause),
				label: Some(format!("'${}' is already bound by this window", name)),
				help: Some("window, start and end variables must all have distinct names".to_string()),
				notes: vec![],
				cause: None,
			},
			PlanError::SlidingWindowWithoutEnd {
				clause,
			} => Diagnostic {
				code: "WINDOW_002".to_string(),
				message,
				clause: Some(clause),
				label: None,
				help: Some("add an 'end ... when' condition".to_string()),
				notes: vec![],
				cause: None,
			},
			PlanError::GroupByWithoutSpecs {
				clause,
			} => Diagnostic {
				code: "GROUP_001".to_string(),
				message,
				clause: Some(clause),
				label: None,
				help: None,
				notes: vec![],
				cause: None,
			},
			PlanError::UndeclaredGroupVariable {
				name,
				clause,
			} => Diagnostic {
				code: "GROUP_003".to_string(),
				message,
				clause: Some(clause),
				label: None,
				help: Some(format!("bind '${}' with 'group by ${} := <expr>' instead", name, name)),
				notes: vec![],
				cause: None,
			},
			PlanError::OrderByWithoutKeys {
				clause,
			} => Diagnostic {
				code: "ORDER_003".to_string(),
				message,
				clause: Some(clause),
				label: None,
				help: None,
				notes: vec![],
				cause: None,
			},
			PlanError::DuplicateDeclaration {
				name,
				clause,
			} => Diagnostic {
				code: "PLAN_001".to_string(),
				message,
				clause: Some(clause),
				label: None,
				help: Some(format!("declare a fresh variable for each binding of '${}'", name)),
				notes: vec![],
				cause: None,
			},
		}
	}
}

impl From<PlanError> for Error {
	fn from(err: PlanError) -> Self {
		Error(err.into_diagnostic())
	}
}
