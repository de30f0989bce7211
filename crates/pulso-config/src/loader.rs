// SPDX-FileCopyrightText: 2026 Pulso Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./pulso.toml` > `~/.config/pulso/pulso.toml` > `/etc/pulso/pulso.toml`
//! with environment variable overrides via `PULSO_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::PulsoConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/pulso/pulso.toml` (system-wide)
/// 3. `~/.config/pulso/pulso.toml` (user XDG config)
/// 4. `./pulso.toml` (local directory)
/// 5. `PULSO_*` environment variables
pub fn load_config() -> Result<PulsoConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PulsoConfig::default()))
        .merge(Toml::file("/etc/pulso/pulso.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("pulso/pulso.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("pulso.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<PulsoConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PulsoConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<PulsoConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PulsoConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `PULSO_STORAGE_DATABASE_PATH` must map to
/// `storage.database_path`, not `storage.database.path`.
fn env_provider() -> Env {
    Env::prefixed("PULSO_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: PULSO_WEBHOOK_PORT -> "webhook_port"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("service_", "service.", 1)
            .replacen("webhook_", "webhook.", 1)
            .replacen("storage_", "storage.", 1);
        mapped.into()
    })
}
