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

//! The clip flags of RSP vertices
//!
//! Every transformed vertex is classified against six clip planes (±X, ±Y, near and far) in two
//! spaces: the clip-ratio scaled space and the screen space. Each classification yields a 16-bit
//! half; both halves are packed into one 32-bit word, with the scaled half in the upper and the
//! screen half in the lower 16 bits.
//!
//! Within a half, bits 4-7 hold the tests against the negative side (X, Y, Z, W) and bits 12-15
//! the tests against the positive side. Bits 0-3 and 8-11 contain garbage (values from another
//! vertex or zeros) and are masked before interpretation.

use bitflags::bitflags;
use core::fmt;

use crate::cfg::UcodeConfig;
use crate::io::LogFlags;
use crate::kif::vtx::Vertex;
use crate::serialize::{Deserialize, Serialize};

/// The shift of the clip-ratio scaled half within the clip word
pub const CLIP_SHIFT_SCAL: u32 = 16;
/// The shift of the screen-space half within the clip word
pub const CLIP_SHIFT_SCRN: u32 = 0;

bitflags! {
    /// The clip flags of one space (one half of the clip word)
    ///
    /// In clip-ratio scaled clipping, the bits for comparisons against W are in fact for Z, but
    /// only X and Y are used there.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct ClipFlags : u16 {
        const NX            = 1 << 4;
        const NY            = 1 << 5;
        const NZ            = 1 << 6;
        const NW            = 1 << 7;
        const PX            = 1 << 12;
        const PY            = 1 << 13;
        const PZ            = 1 << 14;
        /// Never produced
        const PW            = 1 << 15;
    }
}

impl ClipFlags {
    /// The flag for far clipping
    pub const FAR: ClipFlags = ClipFlags::PZ;

    /// Interprets the given raw half, dropping the garbage bits
    pub const fn from_half(raw: u16) -> Self {
        Self::from_bits_truncate(raw)
    }

    /// Returns the flag for near clipping
    ///
    /// Without near clipping, the near test is done against -w and reported in the W slot;
    /// otherwise it is done against -z.
    pub const fn near(cfg: &UcodeConfig) -> Self {
        match cfg.no_near_clipping {
            true => ClipFlags::NW,
            false => ClipFlags::NZ,
        }
    }

    /// Returns the flags of all planes a vertex can be clipped against
    pub const fn all_planes(cfg: &UcodeConfig) -> Self {
        Self::from_bits_truncate(
            ClipFlags::NX.bits()
                | ClipFlags::NY.bits()
                | ClipFlags::PX.bits()
                | ClipFlags::PY.bits()
                | ClipFlags::FAR.bits()
                | Self::near(cfg).bits(),
        )
    }
}

/// A vertex position in signed 15.16 fixed point, as assembled from the integer and fractional
/// vectors of an RSP vertex
#[derive(Copy, Clone, Default, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ClipCoords {
    pub x: i32,
    pub y: i32,
    pub z: i32,
    pub w: i32,
}

impl ClipCoords {
    pub const fn new(x: i32, y: i32, z: i32, w: i32) -> Self {
        Self { x, y, z, w }
    }

    /// Assembles the coordinates from integer and fractional parts
    pub const fn from_parts(int: [i16; 4], frac: [u16; 4]) -> Self {
        const fn fixed(int: i16, frac: u16) -> i32 {
            ((int as i32) << 16) | frac as i32
        }

        Self {
            x: fixed(int[0], frac[0]),
            y: fixed(int[1], frac[1]),
            z: fixed(int[2], frac[2]),
            w: fixed(int[3], frac[3]),
        }
    }

    /// Splits the coordinates into integer and fractional parts
    pub const fn to_parts(&self) -> ([i16; 4], [u16; 4]) {
        (
            [
                (self.x >> 16) as i16,
                (self.y >> 16) as i16,
                (self.z >> 16) as i16,
                (self.w >> 16) as i16,
            ],
            [
                self.x as u16,
                self.y as u16,
                self.z as u16,
                self.w as u16,
            ],
        )
    }
}

/// Classifies `coords` against the planes at ±`boundary` in one space
///
/// X and Y are tested against both sides. Far clipping tests +z; near clipping tests -z or, with
/// [`UcodeConfig::no_near_clipping`], -w. A coordinate exactly on the boundary is inside. The
/// planes are placed at the magnitude of `boundary`, so a negative boundary describes the same
/// planes as its positive counterpart. The comparisons are done in 64 bit, so that every input
/// yields a defined result.
pub fn classify(coords: &ClipCoords, boundary: i32, cfg: &UcodeConfig) -> ClipFlags {
    let pos = (boundary as i64).abs();
    let neg = -pos;

    let mut flags = ClipFlags::empty();
    flags.set(ClipFlags::NX, (coords.x as i64) < neg);
    flags.set(ClipFlags::PX, (coords.x as i64) > pos);
    flags.set(ClipFlags::NY, (coords.y as i64) < neg);
    flags.set(ClipFlags::PY, (coords.y as i64) > pos);
    flags.set(ClipFlags::FAR, (coords.z as i64) > pos);

    let near = match cfg.no_near_clipping {
        true => coords.w,
        false => coords.z,
    };
    flags.set(ClipFlags::near(cfg), (near as i64) < neg);
    flags
}

/// The packed clip word of a vertex
#[derive(Copy, Clone, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct ClipWord(u32);

impl ClipWord {
    /// Packs the clip-ratio scaled and the screen-space flags into one word
    pub const fn new(scal: ClipFlags, scrn: ClipFlags) -> Self {
        Self(((scal.bits() as u32) << CLIP_SHIFT_SCAL) | ((scrn.bits() as u32) << CLIP_SHIFT_SCRN))
    }

    /// Creates a clip word from its raw value, which might contain garbage bits
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn raw(&self) -> u32 {
        self.0
    }

    /// Returns the flags of the clip-ratio scaled space
    pub const fn scal(&self) -> ClipFlags {
        ClipFlags::from_half((self.0 >> CLIP_SHIFT_SCAL) as u16)
    }

    /// Returns the flags of the screen space
    pub const fn scrn(&self) -> ClipFlags {
        ClipFlags::from_half((self.0 >> CLIP_SHIFT_SCRN) as u16)
    }

    /// Returns the mask of all clip flags in both halves
    pub const fn all_mask(cfg: &UcodeConfig) -> u32 {
        let all = ClipFlags::all_planes(cfg).bits() as u32;
        (all << CLIP_SHIFT_SCAL) | (all << CLIP_SHIFT_SCRN)
    }

    /// Returns true if the vertex is outside of any plane in any space
    pub const fn is_clipped(&self, cfg: &UcodeConfig) -> bool {
        (self.0 & Self::all_mask(cfg)) != 0
    }
}

impl fmt::Debug for ClipWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ClipWord[{:#010x}, scal={:?}, scrn={:?}]",
            self.0,
            self.scal(),
            self.scrn()
        )
    }
}

/// Classifies vertices in both spaces with fixed boundaries
///
/// Classification is pure and vertices are independent of each other, so that a classifier can be
/// shared and used for any number of vertices in any order.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ClipClassifier {
    cfg: UcodeConfig,
    scal_boundary: i32,
    scrn_boundary: i32,
}

impl ClipClassifier {
    pub const fn new(cfg: UcodeConfig, scal_boundary: i32, scrn_boundary: i32) -> Self {
        Self {
            cfg,
            scal_boundary,
            scrn_boundary,
        }
    }

    pub fn config(&self) -> &UcodeConfig {
        &self.cfg
    }

    /// Classifies the given coordinates of both spaces and returns the packed clip word
    pub fn classify(&self, scal: &ClipCoords, scrn: &ClipCoords) -> ClipWord {
        let word = ClipWord::new(
            classify(scal, self.scal_boundary, &self.cfg),
            classify(scrn, self.scrn_boundary, &self.cfg),
        );
        log!(
            LogFlags::RspClip,
            "clip: scal={:?} scrn={:?} -> {:?}",
            scal,
            scrn,
            word
        );
        word
    }

    /// Classifies the given coordinates and stores the result in the clip field of `vtx`
    ///
    /// No other field of the vertex is touched.
    pub fn classify_vertex(
        &self,
        vtx: &mut Vertex,
        scal: &ClipCoords,
        scrn: &ClipCoords,
    ) -> ClipWord {
        let word = self.classify(scal, scrn);
        vtx.set_clip(word);
        word
    }
}
