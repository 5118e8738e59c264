// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use crate::error::diagnostic::Diagnostic;

/// A grouping key expression yielded more than one item
pub fn key_not_single(name: &str, len: usize) -> Diagnostic {
	Diagnostic {
		code: "GROUP_002".to_string(),
		message: format!("Grouping key '${}' yields {} items", name, len),
		clause: None,
		label: Some("expected the empty sequence or a single item".to_string()),
		help: None,
		notes: vec![],
		cause: None,
	}
}
