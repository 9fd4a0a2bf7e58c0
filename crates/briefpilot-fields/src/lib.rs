// SPDX-FileCopyrightText: 2026 Briefpilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Custom field catalogue and AI-assisted field resolution.
//!
//! [`FieldCatalog`] caches per-project field definitions fetched from the
//! tracker. [`FieldResolver`] turns the loosely-named attributes extracted
//! from a brief into validated field-id mappings the tracker accepts.

pub mod catalog;
pub mod resolver;

pub use catalog::FieldCatalog;
pub use resolver::{EXCLUDED_FIELD_IDS, FieldResolver};
