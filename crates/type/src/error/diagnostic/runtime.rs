// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use crate::{SequenceType, error::diagnostic::Diagnostic};

/// Variable was read before any clause bound it
pub fn variable_unbound(name: &str) -> Diagnostic {
	Diagnostic {
		code: "RUNTIME_001".to_string(),
		message: format!("Variable '${}' is not bound", name),
		clause: None,
		label: None,
		help: Some(format!("Declare '${}' in a clause before the expression that reads it", name)),
		notes: vec![],
		cause: None,
	}
}

/// Effective boolean value is undefined for sequences of more than one item
pub fn ebv_undefined(len: usize) -> Diagnostic {
	Diagnostic {
		code: "RUNTIME_002".to_string(),
		message: format!("Effective boolean value is undefined for a sequence of {} items", len),
		clause: None,
		label: Some("expected the empty sequence or a single item".to_string()),
		help: None,
		notes: vec![],
		cause: None,
	}
}

/// An expression expected to yield at most one item yielded more
pub fn not_single_item(len: usize) -> Diagnostic {
	Diagnostic {
		code: "RUNTIME_003".to_string(),
		message: format!("Expected at most one item, got {}", len),
		clause: None,
		label: None,
		help: None,
		notes: vec![],
		cause: None,
	}
}

/// A value does not match the declared type of the variable it is bound to
pub fn type_mismatch(name: &str, expected: SequenceType, actual: String) -> Diagnostic {
	Diagnostic {
		code: "RUNTIME_004".to_string(),
		message: format!("Cannot bind {} to '${}' declared as {}", actual, name, expected),
		clause: None,
		label: Some(format!("'${}' expects {}", name, expected)),
		help: None,
		notes: vec![],
		cause: None,
	}
}

/// An expression reported a failure of its own
pub fn expression_failed(message: impl Into<String>) -> Diagnostic {
	Diagnostic {
		code: "RUNTIME_005".to_string(),
		message: message.into(),
		clause: None,
		label: None,
		help: None,
		notes: vec![],
		cause: None,
	}
}
