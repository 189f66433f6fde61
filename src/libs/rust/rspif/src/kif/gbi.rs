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

//! Constants of the geometry command set that the microcode relies on

use bitflags::bitflags;

use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::cfg::UcodeConfig;

/// The size of a light in DMEM
pub const LIGHT_SIZE: usize = 0x18;

/// The geometry mode bit for positional lighting (point lighting extension)
pub const G_LIGHTING_POSITIONAL: u32 = 0x0040_0000;
/// [`G_LIGHTING_POSITIONAL`] within the upper half of the geometry mode
pub const G_LIGHTING_POSITIONAL_H: u32 = G_LIGHTING_POSITIONAL / 0x10000;

/// The indices for moving words/memory into the microcode's state
#[derive(Copy, Clone, Debug, Eq, PartialEq, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum MoveIndex {
    /// Modelview matrix
    Mmtx = 2,
    /// Projection matrix
    Pmtx = 6,
    Viewport = 8,
    Light = 10,
    Point = 12,
    /// Combined matrix
    Matrix = 14,
}

bitflags! {
    /// The parameters of the matrix command
    ///
    /// Modelview, multiply, and no-push are the absence of the respective flag.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct MtxParams : u8 {
        const PUSH          = 0x01;
        const LOAD          = 0x02;
        const PROJECTION    = 0x04;
    }
}

impl MtxParams {
    pub const MODELVIEW: MtxParams = MtxParams::empty();
    pub const MUL: MtxParams = MtxParams::empty();
    pub const NOPUSH: MtxParams = MtxParams::empty();

    /// Selects between modelview and projection
    pub const MV_P: MtxParams = MtxParams::MODELVIEW.union(MtxParams::PROJECTION);
    /// Selects between multiply and load
    pub const MUL_LOAD: MtxParams = MtxParams::MUL.union(MtxParams::LOAD);
    /// Selects between no-push and push
    pub const NOPUSH_PUSH: MtxParams = MtxParams::NOPUSH.union(MtxParams::PUSH);

    /// Returns true if the projection matrix is addressed
    pub fn is_projection(self) -> bool {
        self.contains(MtxParams::PROJECTION)
    }

    /// Returns true if the matrix is loaded instead of multiplied
    pub fn is_load(self) -> bool {
        self.contains(MtxParams::LOAD)
    }

    /// Returns true if the matrix stack is pushed before
    pub fn is_push(self) -> bool {
        self.contains(MtxParams::PUSH)
    }
}

impl UcodeConfig {
    /// Returns the positional lighting bit of the geometry mode, if the point lighting extension
    /// is enabled
    pub fn lighting_positional(&self) -> Option<u32> {
        self.point_lighting.then_some(G_LIGHTING_POSITIONAL)
    }

    /// Returns the positional lighting bit within the upper half of the geometry mode, if the
    /// point lighting extension is enabled
    pub fn lighting_positional_h(&self) -> Option<u32> {
        self.point_lighting.then_some(G_LIGHTING_POSITIONAL_H)
    }
}
