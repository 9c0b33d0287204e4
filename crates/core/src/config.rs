//! Configuration for the simulator core.
//!
//! This module defines the configuration structure used to parameterize the
//! engine and its bundled flat RAM. It provides:
//! 1. **Defaults:** Baseline constants (reset PC, RAM geometry).
//! 2. **Structure:** A `serde`-deserializable `Config` so hosts can supply
//!    settings as JSON.
//!
//! The vector geometry (VLEN = 128 bits) is architectural in this model and
//! is not configurable.

use serde::Deserialize;

/// Default configuration constants.
///
/// These values define the baseline setup when a host does not override
/// them.
mod defaults {
    /// Program counter value at reset.
    ///
    /// The loader normally overwrites this with the entry point of the
    /// guest image before the first `step`.
    pub const RESET_PC: u32 = 0;

    /// Base address of the bundled flat RAM.
    pub const RAM_BASE: u32 = 0;

    /// Size of the bundled flat RAM (4 MiB).
    ///
    /// Large enough for the bare-metal test programs this engine targets;
    /// hosts with bigger images supply their own `Memory` implementation.
    pub const RAM_SIZE: usize = 4 * 1024 * 1024;
}

/// Simulator configuration.
///
/// Deserializable from JSON; every field has a default so partial
/// documents work.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Program counter value installed by `Cpu::new`.
    pub reset_pc: u32,
    /// Base address of the flat RAM constructed by `Ram::with_config`.
    pub ram_base: u32,
    /// Size in bytes of the flat RAM constructed by `Ram::with_config`.
    pub ram_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            reset_pc: defaults::RESET_PC,
            ram_base: defaults::RAM_BASE,
            ram_size: defaults::RAM_SIZE,
        }
    }
}
