// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

#![cfg_attr(not(debug_assertions), deny(warnings))]
#![cfg_attr(not(debug_assertions), deny(clippy::unwrap_used))]
#![cfg_attr(not(debug_assertions), deny(clippy::expect_used))]

pub use flwor_type::Result;

pub mod context;
pub mod expression;
pub mod interrupt;
pub mod variable;

pub use context::BindingContext;
pub use expression::{Expr, Expression, LazySequence, ScoredSequence, reference::VariableRef};
pub use interrupt::Interrupt;
pub use variable::{Scope, VarId, Variable};
