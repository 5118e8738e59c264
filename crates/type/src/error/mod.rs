// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::{
	fmt::{Display, Formatter},
	ops::{Deref, DerefMut},
};

pub mod diagnostic;

use diagnostic::{Diagnostic, render::DefaultRenderer};

/// Converts a typed error into the diagnostic shown to the user.
pub trait IntoDiagnostic {
	fn into_diagnostic(self) -> Diagnostic;
}

#[derive(Debug, Clone, PartialEq)]
pub struct Error(pub Diagnostic);

impl Deref for Error {
	type Target = Diagnostic;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl DerefMut for Error {
	fn deref_mut(&mut self) -> &mut Self::Target {
		&mut self.0
	}
}

impl Display for Error {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		let out = DefaultRenderer::render_string(&self.0);
		f.write_str(out.as_str())
	}
}

impl Error {
	pub fn diagnostic(self) -> Diagnostic {
		self.0
	}

	/// Attaches the clause the error surfaced in. The innermost clause wins:
	/// an error already carrying a clause is returned unchanged.
	pub fn with_clause(mut self, clause: impl Display) -> Self {
		if self.0.clause.is_none() {
			self.0.clause = Some(clause.to_string());
		}
		self
	}
}

impl std::error::Error for Error {}

#[macro_export]
macro_rules! error {
	($diagnostic:expr) => {
		$crate::error::Error($diagnostic)
	};
}

#[macro_export]
macro_rules! return_error {
	($diagnostic:expr) => {
		return Err($crate::error::Error($diagnostic))
	};
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::diagnostic::runtime;

	#[test]
	fn test_with_clause_keeps_innermost() {
		let err = error!(runtime::ebv_undefined(2)).with_clause("where $x").with_clause("order by $y");
		assert_eq!(err.clause.as_deref(), Some("where $x"));
	}

	#[test]
	fn test_display_renders_diagnostic() {
		let err = error!(runtime::ebv_undefined(3)).with_clause("where $x");
		let out = err.to_string();
		assert!(out.starts_with("error[RUNTIME_002]"));
		assert!(out.contains("--> where $x"));
	}
}
