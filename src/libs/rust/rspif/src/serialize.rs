/*
 * Copyright (C) 2023 Nils Asmussen, Barkhausen Institut
 *
 * This file is part of M3 (Microkernel-based SysteM for Heterogeneous Manycores).
 *
 * M3 is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License version 2 as
 * published by the Free Software Foundation.
 *
 * M3 is distributed in the hope that it will be useful, but
 * WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU
 * General Public License version 2 for more details.
 */

//! Contains the fixed-offset (de)serialization of the records shared with the RSP
//!
//! The RSP is big endian and the records are accessed by the microcode at fixed byte offsets, so
//! we never rely on the compiler's layout, but read and write every field explicitly.

pub use serde::{Deserialize, Serialize};

/// Reads big-endian fields at fixed offsets of a record
///
/// The record has to be large enough for all offsets that are accessed; this is ensured by
/// constructing readers only for arrays of the record's size.
#[derive(Copy, Clone)]
pub struct RecordReader<'r> {
    buf: &'r [u8],
}

impl<'r> RecordReader<'r> {
    pub fn new(buf: &'r [u8]) -> Self {
        Self { buf }
    }

    pub fn u8(&self, off: usize) -> u8 {
        self.buf[off]
    }

    pub fn u16(&self, off: usize) -> u16 {
        u16::from_be_bytes([self.buf[off], self.buf[off + 1]])
    }

    pub fn i16(&self, off: usize) -> i16 {
        self.u16(off) as i16
    }

    pub fn u32(&self, off: usize) -> u32 {
        let mut bytes = [0u8; 4];
        bytes.copy_from_slice(&self.buf[off..off + 4]);
        u32::from_be_bytes(bytes)
    }
}

/// Writes big-endian fields at fixed offsets of a record
pub struct RecordWriter<'r> {
    buf: &'r mut [u8],
}

impl<'r> RecordWriter<'r> {
    pub fn new(buf: &'r mut [u8]) -> Self {
        Self { buf }
    }

    pub fn put_u8(&mut self, off: usize, val: u8) {
        self.buf[off] = val;
    }

    pub fn put_u16(&mut self, off: usize, val: u16) {
        self.buf[off..off + 2].copy_from_slice(&val.to_be_bytes());
    }

    pub fn put_i16(&mut self, off: usize, val: i16) {
        self.put_u16(off, val as u16);
    }

    pub fn put_u32(&mut self, off: usize, val: u32) {
        self.buf[off..off + 4].copy_from_slice(&val.to_be_bytes());
    }
}
