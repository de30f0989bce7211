// SPDX-FileCopyrightText: 2026 Pulso Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed query modules. All operations go through `&Database`.

pub mod interactions;
