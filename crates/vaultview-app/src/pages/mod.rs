// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>

pub mod audit_logs;
pub mod certificates;
pub mod code_signing;
pub mod settings;
pub mod ssh_keys;
