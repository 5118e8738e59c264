// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use crate::{Type, error::diagnostic::Diagnostic};

/// An order key expression yielded more than one item
pub fn key_not_single(len: usize) -> Diagnostic {
	Diagnostic {
		code: "ORDER_001".to_string(),
		message: format!("Order key yields {} items", len),
		clause: None,
		label: Some("expected the empty sequence or a single item".to_string()),
		help: None,
		notes: vec![],
		cause: None,
	}
}

/// Two order key values have no common ordering
pub fn incomparable_values(left: Type, right: Type) -> Diagnostic {
	Diagnostic {
		code: "ORDER_002".to_string(),
		message: format!("Cannot compare {} with {}", left, right),
		clause: None,
		label: None,
		help: Some("order keys must be numbers, text or booleans of the same family".to_string()),
		notes: vec![],
		cause: None,
	}
}
