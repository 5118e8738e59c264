// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

pub(crate) mod compile;
pub(crate) mod count;
pub(crate) mod r#for;
pub(crate) mod group;
pub(crate) mod r#let;
pub(crate) mod order;
pub(crate) mod sort;
pub(crate) mod start;
pub(crate) mod r#where;
pub(crate) mod window;
