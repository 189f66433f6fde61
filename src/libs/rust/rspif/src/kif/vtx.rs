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

//! The vertex records of the geometry pipeline
//!
//! There are two records: the input vertex as supplied by the application (16 bytes), and the
//! vertex as stored in DMEM after the transformation (40 bytes). Both are accessed at fixed
//! offsets by the microcode.

use crate::const_assert;
use crate::errors::{Code, Error};
use crate::io::LogFlags;
use crate::kif::clip::{ClipCoords, ClipWord};
use crate::serialize::{Deserialize, RecordReader, RecordWriter, Serialize};

/// The size of an input vertex
pub const INPUT_VTX_SIZE: usize = 0x10;

pub const VTX_IN_OB: usize = 0x00;
pub const VTX_IN_X: usize = 0x00;
pub const VTX_IN_Y: usize = 0x02;
pub const VTX_IN_Z: usize = 0x04;
pub const VTX_IN_FLAG: usize = 0x06;
pub const VTX_IN_TC: usize = 0x08;
pub const VTX_IN_S: usize = 0x08;
pub const VTX_IN_T: usize = 0x0A;
/// Color or normal
pub const VTX_IN_CN: usize = 0x0C;

/// The size of a transformed vertex
pub const VTX_SIZE: usize = 0x28;

pub const VTX_INT_VEC: usize = 0x00;
pub const VTX_X_INT: usize = 0x00;
pub const VTX_Y_INT: usize = 0x02;
pub const VTX_Z_INT: usize = 0x04;
pub const VTX_W_INT: usize = 0x06;
pub const VTX_FRAC_VEC: usize = 0x08;
pub const VTX_X_FRAC: usize = 0x08;
pub const VTX_Y_FRAC: usize = 0x0A;
pub const VTX_Z_FRAC: usize = 0x0C;
pub const VTX_W_FRAC: usize = 0x0E;
pub const VTX_COLOR_VEC: usize = 0x10;
pub const VTX_COLOR_R: usize = 0x10;
pub const VTX_COLOR_G: usize = 0x11;
pub const VTX_COLOR_B: usize = 0x12;
pub const VTX_COLOR_A: usize = 0x13;
pub const VTX_TC_VEC: usize = 0x14;
pub const VTX_TC_S: usize = 0x14;
pub const VTX_TC_T: usize = 0x16;
pub const VTX_SCR_VEC: usize = 0x18;
pub const VTX_SCR_X: usize = 0x18;
pub const VTX_SCR_Y: usize = 0x1A;
pub const VTX_SCR_Z: usize = 0x1C;
pub const VTX_SCR_Z_FRAC: usize = 0x1E;
pub const VTX_INV_W_VEC: usize = 0x20;
pub const VTX_INV_W_INT: usize = 0x20;
pub const VTX_INV_W_FRAC: usize = 0x22;
pub const VTX_CLIP: usize = 0x24;
pub const VTX_CLIP_SCAL: usize = 0x24;
pub const VTX_CLIP_SCRN: usize = 0x26;

// the clip word is the last field
const_assert!(VTX_CLIP + 4 == VTX_SIZE);
const_assert!(VTX_IN_CN + 4 == INPUT_VTX_SIZE);

/// A vertex as supplied by the application
#[derive(Copy, Clone, Default, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct InputVtx {
    /// The position in object space
    pub ob: [i16; 3],
    pub flag: u16,
    /// The texture coordinate
    pub tc: [i16; 2],
    /// The color or normal
    pub cn: [u8; 4],
}

impl InputVtx {
    pub fn decode(bytes: &[u8; INPUT_VTX_SIZE]) -> Self {
        let rd = RecordReader::new(bytes);
        Self {
            ob: [rd.i16(VTX_IN_X), rd.i16(VTX_IN_Y), rd.i16(VTX_IN_Z)],
            flag: rd.u16(VTX_IN_FLAG),
            tc: [rd.i16(VTX_IN_S), rd.i16(VTX_IN_T)],
            cn: [
                rd.u8(VTX_IN_CN),
                rd.u8(VTX_IN_CN + 1),
                rd.u8(VTX_IN_CN + 2),
                rd.u8(VTX_IN_CN + 3),
            ],
        }
    }

    pub fn encode(&self) -> [u8; INPUT_VTX_SIZE] {
        let mut bytes = [0u8; INPUT_VTX_SIZE];
        let mut wr = RecordWriter::new(&mut bytes);
        wr.put_i16(VTX_IN_X, self.ob[0]);
        wr.put_i16(VTX_IN_Y, self.ob[1]);
        wr.put_i16(VTX_IN_Z, self.ob[2]);
        wr.put_u16(VTX_IN_FLAG, self.flag);
        wr.put_i16(VTX_IN_S, self.tc[0]);
        wr.put_i16(VTX_IN_T, self.tc[1]);
        for (i, c) in self.cn.iter().enumerate() {
            wr.put_u8(VTX_IN_CN + i, *c);
        }
        bytes
    }
}

/// A transformed vertex as stored in DMEM
#[derive(Copy, Clone, Default, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    /// The integer parts of the clip-space position (x, y, z, w)
    pub pos_int: [i16; 4],
    /// The fractional parts of the clip-space position (x, y, z, w)
    pub pos_frac: [u16; 4],
    /// The color or normal (r, g, b, a)
    pub color: [u8; 4],
    /// The texture coordinate (s, t)
    pub tc: [i16; 2],
    /// The screen-space position (x, y, z)
    pub scr: [i16; 3],
    pub scr_z_frac: u16,
    pub inv_w_int: i16,
    pub inv_w_frac: u16,
    clip: u32,
}

impl Vertex {
    /// Returns the clip-space position in 15.16 fixed point
    pub fn position(&self) -> ClipCoords {
        ClipCoords::from_parts(self.pos_int, self.pos_frac)
    }

    /// Sets the clip-space position from 15.16 fixed point
    pub fn set_position(&mut self, pos: &ClipCoords) {
        let (int, frac) = pos.to_parts();
        self.pos_int = int;
        self.pos_frac = frac;
    }

    /// Returns the clip word, including potential garbage bits
    pub fn clip(&self) -> ClipWord {
        ClipWord::from_raw(self.clip)
    }

    pub fn set_clip(&mut self, clip: ClipWord) {
        self.clip = clip.raw();
    }

    pub fn decode(bytes: &[u8; VTX_SIZE]) -> Self {
        let rd = RecordReader::new(bytes);
        Self {
            pos_int: [
                rd.i16(VTX_X_INT),
                rd.i16(VTX_Y_INT),
                rd.i16(VTX_Z_INT),
                rd.i16(VTX_W_INT),
            ],
            pos_frac: [
                rd.u16(VTX_X_FRAC),
                rd.u16(VTX_Y_FRAC),
                rd.u16(VTX_Z_FRAC),
                rd.u16(VTX_W_FRAC),
            ],
            color: [
                rd.u8(VTX_COLOR_R),
                rd.u8(VTX_COLOR_G),
                rd.u8(VTX_COLOR_B),
                rd.u8(VTX_COLOR_A),
            ],
            tc: [rd.i16(VTX_TC_S), rd.i16(VTX_TC_T)],
            scr: [rd.i16(VTX_SCR_X), rd.i16(VTX_SCR_Y), rd.i16(VTX_SCR_Z)],
            scr_z_frac: rd.u16(VTX_SCR_Z_FRAC),
            inv_w_int: rd.i16(VTX_INV_W_INT),
            inv_w_frac: rd.u16(VTX_INV_W_FRAC),
            // the scaled half is at the lower address and thereby in the upper 16 bits
            clip: rd.u32(VTX_CLIP),
        }
    }

    pub fn encode(&self) -> [u8; VTX_SIZE] {
        let mut bytes = [0u8; VTX_SIZE];
        let mut wr = RecordWriter::new(&mut bytes);
        for (i, v) in self.pos_int.iter().enumerate() {
            wr.put_i16(VTX_INT_VEC + i * 2, *v);
        }
        for (i, v) in self.pos_frac.iter().enumerate() {
            wr.put_u16(VTX_FRAC_VEC + i * 2, *v);
        }
        for (i, c) in self.color.iter().enumerate() {
            wr.put_u8(VTX_COLOR_VEC + i, *c);
        }
        wr.put_i16(VTX_TC_S, self.tc[0]);
        wr.put_i16(VTX_TC_T, self.tc[1]);
        wr.put_i16(VTX_SCR_X, self.scr[0]);
        wr.put_i16(VTX_SCR_Y, self.scr[1]);
        wr.put_i16(VTX_SCR_Z, self.scr[2]);
        wr.put_u16(VTX_SCR_Z_FRAC, self.scr_z_frac);
        wr.put_i16(VTX_INV_W_INT, self.inv_w_int);
        wr.put_u16(VTX_INV_W_FRAC, self.inv_w_frac);
        wr.put_u32(VTX_CLIP, self.clip);
        bytes
    }

    /// Reads the `idx`'th vertex from a vertex buffer
    ///
    /// Fails with [`Code::InvArgs`] if the buffer does not contain that vertex.
    pub fn read(buf: &[u8], idx: usize) -> Result<Self, Error> {
        let bytes = record(buf, idx)?;
        let mut rec = [0u8; VTX_SIZE];
        rec.copy_from_slice(bytes);
        let vtx = Self::decode(&rec);
        log!(LogFlags::RspVtx, "vtx: read #{}: {:?}", idx, vtx);
        Ok(vtx)
    }

    /// Writes this vertex as the `idx`'th vertex into a vertex buffer
    pub fn write(&self, buf: &mut [u8], idx: usize) -> Result<(), Error> {
        record(buf, idx)?;
        let off = idx * VTX_SIZE;
        buf[off..off + VTX_SIZE].copy_from_slice(&self.encode());
        log!(LogFlags::RspVtx, "vtx: wrote #{}: {:?}", idx, self);
        Ok(())
    }
}

fn record(buf: &[u8], idx: usize) -> Result<&[u8], Error> {
    let off = idx
        .checked_mul(VTX_SIZE)
        .ok_or_else(|| Error::new(Code::InvArgs))?;
    let end = off
        .checked_add(VTX_SIZE)
        .ok_or_else(|| Error::new(Code::InvArgs))?;
    match buf.get(off..end) {
        Some(bytes) => Ok(bytes),
        None => Err(Error::new(Code::InvArgs)),
    }
}
