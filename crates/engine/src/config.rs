// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use serde::{Deserialize, Serialize};

/// Which rewrite passes run when a pipeline is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimizerConfig {
	pub fold_where: bool,
	pub constant_let: bool,
	pub dead_binding: bool,
	pub hoist_let: bool,
	pub prune_slots: bool,
	/// Upper bound on fixed-point rounds over all passes.
	pub max_rounds: usize,
}

impl Default for OptimizerConfig {
	fn default() -> Self {
		Self {
			fold_where: true,
			constant_let: true,
			dead_binding: true,
			hoist_let: true,
			prune_slots: true,
			max_rounds: 16,
		}
	}
}

impl OptimizerConfig {
	pub fn disabled() -> Self {
		Self {
			fold_where: false,
			constant_let: false,
			dead_binding: false,
			hoist_let: false,
			prune_slots: false,
			max_rounds: 0,
		}
	}

	pub fn with_fold_where(mut self, enabled: bool) -> Self {
		self.fold_where = enabled;
		self
	}

	pub fn with_constant_let(mut self, enabled: bool) -> Self {
		self.constant_let = enabled;
		self
	}

	pub fn with_dead_binding(mut self, enabled: bool) -> Self {
		self.dead_binding = enabled;
		self
	}

	pub fn with_hoist_let(mut self, enabled: bool) -> Self {
		self.hoist_let = enabled;
		self
	}

	pub fn with_prune_slots(mut self, enabled: bool) -> Self {
		self.prune_slots = enabled;
		self
	}

	pub fn with_max_rounds(mut self, rounds: usize) -> Self {
		self.max_rounds = rounds;
		self
	}

	pub fn is_disabled(&self) -> bool {
		self.max_rounds == 0
			|| !(self.fold_where || self.constant_let || self.dead_binding || self.hoist_let || self.prune_slots)
	}
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
	pub optimizer: OptimizerConfig,
}

impl PipelineConfig {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_optimizer(mut self, optimizer: OptimizerConfig) -> Self {
		self.optimizer = optimizer;
		self
	}
}
