// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use flwor_core::LazySequence;
use flwor_type::{Result, Value};

use crate::execute::query::window::Probe;

/// Forward cursor over a window source keeping one item of look-behind and a
/// deferred one-item look-ahead.
pub(crate) struct Cursor {
	items: LazySequence,
	previous: Option<Value>,
	current: Option<Value>,
	/// `Some` once the item after `current` has been pulled.
	next: Option<Option<Value>>,
	position: i64,
	exhausted: bool,
}

impl Cursor {
	pub(crate) fn new(items: LazySequence) -> Self {
		Self {
			items,
			previous: None,
			current: None,
			next: None,
			position: 0,
			exhausted: false,
		}
	}

	fn pull(&mut self) -> Result<Option<Value>> {
		if self.exhausted {
			return Ok(None);
		}
		match self.items.next().transpose()? {
			Some(item) => Ok(Some(item)),
			None => {
				self.exhausted = true;
				Ok(None)
			}
		}
	}

	/// Moves to the next item. Returns `false` at the end of the source.
	pub(crate) fn advance(&mut self) -> Result<bool> {
		let next = match self.next.take() {
			Some(next) => next,
			None => self.pull()?,
		};
		if next.is_none() {
			self.exhausted = true;
			return Ok(false);
		}
		self.previous = self.current.take();
		self.current = next;
		self.position += 1;
		Ok(true)
	}

	/// Pulls the look-ahead item if it has not been pulled yet.
	pub(crate) fn peek(&mut self) -> Result<Option<&Value>> {
		if self.next.is_none() {
			let next = self.pull()?;
			self.next = Some(next);
		}
		Ok(self.next.as_ref().and_then(Option::as_ref))
	}

	/// Snapshot of the current item and its neighbours. The look-ahead item
	/// is only pulled when `with_next` is set.
	pub(crate) fn probe(&mut self, with_next: bool) -> Result<Option<Probe>> {
		let next = if with_next {
			self.peek()?.cloned()
		} else {
			None
		};
		Ok(self.current.clone().map(|item| Probe {
			item,
			position: self.position,
			previous: self.previous.clone(),
			next,
		}))
	}
}
