// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::{
	Arc,
	atomic::{AtomicBool, Ordering},
};

/// External stop signal for a running pipeline. Clones share the flag, so one
/// handle can be given to another thread while the pipeline keeps its own.
#[derive(Debug, Clone, Default)]
pub struct Interrupt(Arc<AtomicBool>);

impl Interrupt {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn stop(&self) {
		self.0.store(true, Ordering::Release);
	}

	pub fn is_stopped(&self) -> bool {
		self.0.load(Ordering::Acquire)
	}

	pub fn reset(&self) {
		self.0.store(false, Ordering::Release);
	}
}
