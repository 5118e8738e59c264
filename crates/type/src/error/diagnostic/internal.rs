// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use crate::error::diagnostic::Diagnostic;

/// An invariant of the engine itself was violated
pub fn internal(reason: impl Into<String>) -> Diagnostic {
	let reason = reason.into();
	Diagnostic {
		code: "INTERNAL_001".to_string(),
		message: format!("Internal error: {}", reason),
		clause: None,
		label: None,
		help: Some("This is an internal error that should never occur in normal operation".to_string()),
		notes: vec![],
		cause: None,
	}
}

#[macro_export]
macro_rules! internal_error {
	($($arg:tt)*) => {
		$crate::error::Error($crate::error::diagnostic::internal::internal(format!($($arg)*)))
	};
}
