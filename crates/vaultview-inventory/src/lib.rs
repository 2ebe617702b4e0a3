// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Vaultview — Fixture data source, date utilities, and the generic list
// controller shared by all four asset views.

pub mod controller;
pub mod datetime;
pub mod record;
pub mod source;

pub use controller::{ListController, Paging};
pub use record::InventoryRecord;
pub use source::{DataSource, FixtureSource};
