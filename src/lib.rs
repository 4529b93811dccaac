// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Biolinks and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Biolinks: semantic annotation viewer for linked article collections.
//!
//! Articles of a topic are compared by the semantic groups of their annotations
//! (distribution matrix), by shared terms (similarity network) and side by side
//! (annotation clouds), across a collection and its linked companion collection.

pub mod chart;
pub mod config;
pub mod demo;
pub mod dialog;
pub mod loader;
pub mod model;
pub mod panels;
pub mod state;
pub mod stats;
pub mod tui;
pub mod viewer;
