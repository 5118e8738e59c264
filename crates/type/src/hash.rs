// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! xxHash3 key hashing shared by grouping.

use core::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3;

use crate::Value;

#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hash64(pub u64);

impl From<u64> for Hash64 {
	fn from(value: u64) -> Self {
		Hash64(value)
	}
}

impl From<Hash64> for u64 {
	fn from(hash: Hash64) -> Self {
		hash.0
	}
}

impl Hash for Hash64 {
	fn hash<H: Hasher>(&self, state: &mut H) {
		state.write_u64(self.0)
	}
}

/// Compute xxHash3 64-bit hash of data.
#[inline]
pub fn xxh3_64(data: &[u8]) -> Hash64 {
	Hash64(xxh3::xxh3_64(data))
}

/// Combined hash of a key array. A missing value hashes as a class of its
/// own, distinct from every item.
pub fn key_hash<'a>(key: impl IntoIterator<Item = Option<&'a Value>>) -> Hash64 {
	let mut buf = Vec::with_capacity(32);
	for value in key {
		match value {
			Some(value) => value.hash_into(&mut buf),
			None => buf.push(0),
		}
	}
	xxh3_64(&buf)
}
