// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

#![cfg_attr(not(debug_assertions), deny(warnings))]
#![cfg_attr(not(debug_assertions), deny(clippy::unwrap_used))]
#![cfg_attr(not(debug_assertions), deny(clippy::expect_used))]

pub use flwor_type::Result;

pub mod clause;
pub mod config;
pub mod error;
mod execute;
pub mod plan;
pub mod pipeline;

pub use clause::{
	Clause, CountClause, ForClause, LetClause, WhereClause,
	group::{GroupByClause, GroupSpec},
	order::{OrderByClause, OrderKey},
	window::{Condition, WindowClause, WindowEnd, WindowKind},
};
pub use config::{OptimizerConfig, PipelineConfig};
pub use error::{Advance, Halt, PlanError};
pub use pipeline::{Flwor, FlworBuilder, Output, Pipeline};
pub use plan::optimize::Rewrite;
