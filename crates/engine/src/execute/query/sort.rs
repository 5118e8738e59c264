// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Index-permutation quicksort with a fallible comparator.
//!
//! Three-way partitioning around a median-of-three pivot, insertion sort
//! below [`INSERTION_THRESHOLD`] elements. Recursion only descends into the
//! smaller partition, so stack depth stays logarithmic.

use std::cmp::Ordering;

use flwor_type::Result;

const INSERTION_THRESHOLD: usize = 7;

/// Returns the permutation of `0..len` that orders the elements by `cmp`.
pub(crate) fn sort_permutation<F>(len: usize, mut cmp: F) -> Result<Vec<usize>>
where
	F: FnMut(usize, usize) -> Result<Ordering>,
{
	let mut permutation: Vec<usize> = (0..len).collect();
	quicksort(&mut permutation, &mut cmp)?;
	Ok(permutation)
}

fn quicksort<F>(v: &mut [usize], cmp: &mut F) -> Result<()>
where
	F: FnMut(usize, usize) -> Result<Ordering>,
{
	let mut v = v;
	loop {
		let n = v.len();
		if n < INSERTION_THRESHOLD {
			return insertion_sort(v, cmp);
		}

		let pivot = v[median_of_three(v, cmp)?];

		// v[..lt] < pivot, v[lt..i] == pivot, v[gt..] > pivot
		let (mut lt, mut i, mut gt) = (0, 0, n);
		while i < gt {
			match cmp(v[i], pivot)? {
				Ordering::Less => {
					v.swap(lt, i);
					lt += 1;
					i += 1;
				}
				Ordering::Greater => {
					gt -= 1;
					v.swap(i, gt);
				}
				Ordering::Equal => i += 1,
			}
		}

		let (left, rest) = std::mem::take(&mut v).split_at_mut(lt);
		let right = &mut rest[gt - lt..];
		if left.len() < right.len() {
			quicksort(left, cmp)?;
			v = right;
		} else {
			quicksort(right, cmp)?;
			v = left;
		}
	}
}

fn median_of_three<F>(v: &[usize], cmp: &mut F) -> Result<usize>
where
	F: FnMut(usize, usize) -> Result<Ordering>,
{
	let (a, b, c) = (0, v.len() / 2, v.len() - 1);
	let ab = cmp(v[a], v[b])?;
	let bc = cmp(v[b], v[c])?;
	let ac = cmp(v[a], v[c])?;
	Ok(match (ab, bc, ac) {
		(Ordering::Less, Ordering::Less, _) | (Ordering::Greater, Ordering::Greater, _) => b,
		(Ordering::Less, _, Ordering::Less) | (Ordering::Greater, _, Ordering::Greater) => c,
		_ => a,
	})
}

fn insertion_sort<F>(v: &mut [usize], cmp: &mut F) -> Result<()>
where
	F: FnMut(usize, usize) -> Result<Ordering>,
{
	for i in 1..v.len() {
		let mut j = i;
		while j > 0 && cmp(v[j - 1], v[j])? == Ordering::Greater {
			v.swap(j - 1, j);
			j -= 1;
		}
	}
	Ok(())
}
