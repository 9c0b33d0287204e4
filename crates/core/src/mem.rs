//! Byte-addressable memory collaborator.
//!
//! This module defines the memory contract between the engine and its
//! host. It provides:
//! 1. **Contract:** The `Memory` trait the host environment implements.
//! 2. **Reference Implementation:** `Ram`, a flat little-endian byte array
//!    suitable for bare-metal tests and simple hosts.
//!
//! Half-word and word accesses may assume natural alignment; the engine
//! does not specify misaligned-access behavior.

use crate::config::Config;

/// Byte-addressable memory as seen by the instruction semantics.
///
/// All multi-byte accesses are little-endian.
pub trait Memory {
    /// Reads one byte at `addr`.
    fn read_byte(&mut self, addr: u32) -> u8;

    /// Reads a half-word (16 bits) at `addr`.
    fn read_half(&mut self, addr: u32) -> u16;

    /// Reads a word (32 bits) at `addr`.
    fn read(&mut self, addr: u32) -> u32;

    /// Writes one byte at `addr`.
    fn write_byte(&mut self, addr: u32, val: u8);

    /// Writes a half-word (16 bits) at `addr`.
    fn write_half(&mut self, addr: u32, val: u16);

    /// Writes a word (32 bits) at `addr`.
    fn write(&mut self, addr: u32, val: u32);
}

/// Flat RAM backing for tests and simple hosts.
///
/// Reads outside the backing region return zero; writes outside it are
/// dropped. Real hosts with device memory maps supply their own `Memory`
/// implementation instead.
pub struct Ram {
    data: Vec<u8>,
    base: u32,
}

impl Ram {
    /// Creates a RAM region.
    ///
    /// # Arguments
    ///
    /// * `size` - Region size in bytes.
    /// * `base` - First valid address.
    pub fn new(size: usize, base: u32) -> Self {
        Self {
            data: vec![0; size],
            base,
        }
    }

    /// Creates a RAM region from the configuration's geometry.
    pub fn with_config(config: &Config) -> Self {
        Self::new(config.ram_size, config.ram_base)
    }

    fn index(&self, addr: u32) -> Option<usize> {
        let off = addr.wrapping_sub(self.base) as usize;
        if off < self.data.len() { Some(off) } else { None }
    }
}

impl Memory for Ram {
    fn read_byte(&mut self, addr: u32) -> u8 {
        self.index(addr).map_or(0, |i| self.data[i])
    }

    fn read_half(&mut self, addr: u32) -> u16 {
        match self.index(addr) {
            Some(i) if i + 2 <= self.data.len() => {
                u16::from_le_bytes(self.data[i..i + 2].try_into().unwrap())
            }
            _ => 0,
        }
    }

    fn read(&mut self, addr: u32) -> u32 {
        match self.index(addr) {
            Some(i) if i + 4 <= self.data.len() => {
                u32::from_le_bytes(self.data[i..i + 4].try_into().unwrap())
            }
            _ => 0,
        }
    }

    fn write_byte(&mut self, addr: u32, val: u8) {
        if let Some(i) = self.index(addr) {
            self.data[i] = val;
        }
    }

    fn write_half(&mut self, addr: u32, val: u16) {
        if let Some(i) = self.index(addr) {
            if i + 2 <= self.data.len() {
                self.data[i..i + 2].copy_from_slice(&val.to_le_bytes());
            }
        }
    }

    fn write(&mut self, addr: u32, val: u32) {
        if let Some(i) = self.index(addr) {
            if i + 4 <= self.data.len() {
                self.data[i..i + 4].copy_from_slice(&val.to_le_bytes());
            }
        }
    }
}
