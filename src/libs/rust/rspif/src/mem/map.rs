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

use core::fmt;
use num_traits::CheckedAdd;

use crate::cfg;
use crate::errors::{Code, Error};
use crate::io::LogFlags;
use crate::kif::vtx;
use crate::mem::{SpAddr, SpAddrRaw};

/// The memory map of the RSP's scratchpad
///
/// The scratchpad consists of two banks: DMEM, starting at [`cfg::DMEM_START`], and IMEM, which
/// directly follows DMEM. The first bytes of IMEM are reserved for the bootstrap loader, which
/// copies the microcode's text behind the reserved zone and jumps to the entry point there. The
/// last [`cfg::OS_TASK_SIZE`] bytes of DMEM hold the task descriptor.
#[derive(Copy, Clone, Eq, PartialEq)]
pub struct MemMap {
    dmem_size: usize,
    imem_size: usize,
    reserved: usize,
}

impl MemMap {
    /// Creates a new memory map with given bank sizes and the given number of reserved bytes at
    /// the beginning of IMEM.
    ///
    /// Fails with [`Code::ReservedZoneTooLarge`] if the reserved zone does not leave space for any
    /// microcode and with [`Code::InvArgs`] if DMEM cannot hold the task descriptor or if the banks
    /// would reach into the virtual alias at [`cfg::SP_VIRT_BASE`].
    pub fn new(dmem_size: usize, imem_size: usize, reserved: usize) -> Result<Self, Error> {
        if reserved >= imem_size {
            log!(
                LogFlags::Error,
                "mem: reserved zone {:#x} does not fit into IMEM of {:#x} bytes",
                reserved,
                imem_size
            );
            return Err(Error::new(Code::ReservedZoneTooLarge));
        }
        if dmem_size < cfg::OS_TASK_SIZE {
            return Err(Error::new(Code::InvArgs));
        }

        let end = SpAddrRaw::try_from(dmem_size)
            .ok()
            .zip(SpAddrRaw::try_from(imem_size).ok())
            .and_then(|(d, i)| {
                SpAddr::from(cfg::DMEM_START)
                    .checked_add(&SpAddr::new(d))?
                    .checked_add(&SpAddr::new(i))
            });
        if !matches!(end, Some(e) if e.as_raw() as usize <= cfg::SP_VIRT_BASE) {
            log!(
                LogFlags::Error,
                "mem: banks of {:#x} and {:#x} bytes exceed the physical address space",
                dmem_size,
                imem_size
            );
            return Err(Error::new(Code::InvArgs));
        }

        let map = Self {
            dmem_size,
            imem_size,
            reserved,
        };
        log!(LogFlags::RspMem, "mem: created {:?}", map);
        Ok(map)
    }

    pub fn dmem_size(&self) -> usize {
        self.dmem_size
    }

    pub fn imem_size(&self) -> usize {
        self.imem_size
    }

    /// Returns the number of bytes at the start of IMEM that are reserved for the loader
    pub fn reserved_size(&self) -> usize {
        self.reserved
    }

    pub fn dmem_start(&self) -> SpAddr {
        SpAddr::from(cfg::DMEM_START)
    }

    pub fn dmem_end(&self) -> SpAddr {
        self.dmem_start() + self.dmem_size
    }

    pub fn imem_start(&self) -> SpAddr {
        self.dmem_end()
    }

    pub fn imem_end(&self) -> SpAddr {
        self.imem_start() + self.imem_size
    }

    /// Returns the entry point for microcode in an IMEM that starts at `imem_base`
    ///
    /// `imem_base` is typically either the physical or the virtual start of IMEM, so that the
    /// result is in the same address space. The loader has to place the runnable code exactly
    /// there.
    pub fn entry_point_for(&self, imem_base: SpAddr) -> SpAddr {
        imem_base + self.reserved
    }

    /// Returns the physical entry point for loaded microcode
    pub fn entry_point(&self) -> SpAddr {
        self.entry_point_for(self.imem_start())
    }

    /// Returns the virtual entry point for loaded microcode
    pub fn entry_point_virt(&self) -> SpAddr {
        self.entry_point_for(self.imem_start().virt())
    }

    /// Returns the address of the task descriptor, which occupies the end of DMEM
    pub fn task_addr(&self) -> SpAddr {
        self.dmem_end() - cfg::OS_TASK_SIZE
    }

    /// Returns true if the given (physical or virtual) address lies in the loader's reserved zone
    pub fn is_reserved(&self, addr: SpAddr) -> bool {
        let addr = addr.phys();
        addr >= self.imem_start() && addr < self.entry_point()
    }

    /// Returns the number of IMEM bytes available for the microcode's text
    pub fn ucode_capacity(&self) -> usize {
        self.imem_size - self.reserved
    }

    /// Checks whether microcode text of `len` bytes fits behind the reserved zone
    pub fn check_ucode(&self, len: usize) -> Result<(), Error> {
        if len > self.ucode_capacity() {
            log!(
                LogFlags::Error,
                "mem: microcode of {:#x} bytes exceeds available IMEM of {:#x} bytes",
                len,
                self.ucode_capacity()
            );
            return Err(Error::new(Code::OversizeRegion));
        }
        Ok(())
    }

    /// Returns the number of vertex records that fit into DMEM if `used` bytes are already
    /// occupied by other data (the task descriptor is always accounted for)
    pub fn vertex_capacity(&self, used: usize) -> usize {
        let avail = (self.dmem_size - cfg::OS_TASK_SIZE).saturating_sub(used);
        avail / vtx::VTX_SIZE
    }
}

impl Default for MemMap {
    fn default() -> Self {
        Self {
            dmem_size: cfg::DMEM_SIZE,
            imem_size: cfg::IMEM_SIZE,
            reserved: cfg::RSPBOOT_RESERVED_IMEM,
        }
    }
}

impl fmt::Debug for MemMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MemMap[dmem={:?}..{:?}, imem={:?}..{:?}, entry={:?}]",
            self.dmem_start(),
            self.dmem_end(),
            self.imem_start(),
            self.imem_end(),
            self.entry_point(),
        )
    }
}
