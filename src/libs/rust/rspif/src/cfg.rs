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

//! The target-dependent configuration

use cfg_if::cfg_if;

use crate::const_assert;
use crate::serialize::{Deserialize, Serialize};

/// The start of the data memory (DMEM)
pub const DMEM_START: usize = 0x0000;
/// The size of the data memory
pub const DMEM_SIZE: usize = 0x1000;
/// The end of the data memory (exclusive)
pub const DMEM_END: usize = DMEM_START + DMEM_SIZE;
/// The start of the instruction memory (IMEM), which directly follows DMEM
pub const IMEM_START: usize = DMEM_END;
/// The size of the instruction memory
pub const IMEM_SIZE: usize = 0x1000;
/// The end of the instruction memory (exclusive)
pub const IMEM_END: usize = IMEM_START + IMEM_SIZE;

/// The base that is OR'd into scratchpad addresses to obtain their virtual alias
pub const SP_VIRT_BASE: usize = 0x0400_0000;

pub const DMEM_START_VIRT: usize = SP_VIRT_BASE | DMEM_START;
pub const IMEM_START_VIRT: usize = SP_VIRT_BASE | IMEM_START;
pub const DMEM_END_VIRT: usize = SP_VIRT_BASE | DMEM_END;
pub const IMEM_END_VIRT: usize = SP_VIRT_BASE | IMEM_END;

/// The first bytes of IMEM are reserved so that the bootstrap loader has space for the code that
/// loads the IMEM contents of the target microcode.
pub const RSPBOOT_RESERVED_IMEM: usize = 0x80;

/// The entry point for microcodes loaded by the bootstrap loader
pub const RSPBOOT_ENTRYPOINT: usize = IMEM_START + RSPBOOT_RESERVED_IMEM;
pub const RSPBOOT_ENTRYPOINT_VIRT: usize = SP_VIRT_BASE | RSPBOOT_ENTRYPOINT;

/// The size of the task descriptor
pub const OS_TASK_SIZE: usize = 0x40;
/// The task descriptor occupies the last bytes of DMEM
pub const OSTASK_ADDR: usize = DMEM_END - OS_TASK_SIZE;

const_assert!(RSPBOOT_RESERVED_IMEM < IMEM_SIZE);
const_assert!(OS_TASK_SIZE <= DMEM_SIZE);

/// The microcode build options that influence the geometry pipeline
///
/// On the RSP these are compile-time switches of the microcode. Here, they are passed explicitly
/// to everything that depends on them; the default is determined by the cargo features `non` and
/// `point-lighting`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct UcodeConfig {
    /// Near clipping compares against -w instead of -z ("no near clipping")
    pub no_near_clipping: bool,
    /// The positional lighting extension of the geometry command set is available
    pub point_lighting: bool,
}

impl UcodeConfig {
    pub const fn new(no_near_clipping: bool, point_lighting: bool) -> Self {
        Self {
            no_near_clipping,
            point_lighting,
        }
    }
}

cfg_if! {
    if #[cfg(feature = "non")] {
        const DEF_NO_NEAR_CLIPPING: bool = true;
    }
    else {
        const DEF_NO_NEAR_CLIPPING: bool = false;
    }
}

cfg_if! {
    if #[cfg(feature = "point-lighting")] {
        const DEF_POINT_LIGHTING: bool = true;
    }
    else {
        const DEF_POINT_LIGHTING: bool = false;
    }
}

impl Default for UcodeConfig {
    fn default() -> Self {
        Self::new(DEF_NO_NEAR_CLIPPING, DEF_POINT_LIGHTING)
    }
}
