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

//! The task descriptor (`OSTask`) the host hands to the RSP
//!
//! The host writes the descriptor into the last [`OS_TASK_SIZE`] bytes of DMEM before it starts
//! the RSP. The descriptor is read-only for the RSP during the execution of the task and is
//! overwritten by the next task after completion or after the task yielded.

use bitflags::bitflags;
use core::fmt;

use num_enum::FromPrimitive;

use crate::cfg;
use crate::errors::{Code, Error};
use crate::io::LogFlags;
use crate::serialize::{Deserialize, RecordReader, RecordWriter, Serialize};

/// The size of the task descriptor
pub const OS_TASK_SIZE: usize = cfg::OS_TASK_SIZE;

pub const OS_TASK_OFF_TYPE: usize = 0x00;
pub const OS_TASK_OFF_FLAGS: usize = 0x04;
pub const OS_TASK_OFF_UBOOT: usize = 0x08;
pub const OS_TASK_OFF_UBOOT_SZ: usize = 0x0C;
pub const OS_TASK_OFF_UCODE: usize = 0x10;
pub const OS_TASK_OFF_UCODE_SZ: usize = 0x14;
pub const OS_TASK_OFF_UDATA: usize = 0x18;
pub const OS_TASK_OFF_UDATA_SZ: usize = 0x1C;
pub const OS_TASK_OFF_STACK: usize = 0x20;
pub const OS_TASK_OFF_STACK_SZ: usize = 0x24;
pub const OS_TASK_OFF_OUTBUFF: usize = 0x28;
pub const OS_TASK_OFF_OUTBUFF_SZ: usize = 0x2C;
pub const OS_TASK_OFF_DATA: usize = 0x30;
pub const OS_TASK_OFF_DATA_SZ: usize = 0x34;
pub const OS_TASK_OFF_YIELD: usize = 0x38;
pub const OS_TASK_OFF_YIELD_SZ: usize = 0x3C;

/// The kinds of tasks, interpreted by the loader/dispatcher
#[derive(Copy, Clone, Debug, Eq, PartialEq, FromPrimitive)]
#[repr(u32)]
pub enum TaskType {
    /// Graphics task
    Gfx = 1,
    /// Audio task
    Audio = 2,
    /// Video task
    Video = 3,
    /// JPEG decompression task
    NJpeg = 4,
    /// HVQ decompression task
    Hvq = 6,
    /// HVQM decompression task
    Hvqm = 7,
    /// Any other (application-defined) task type
    #[num_enum(catch_all)]
    Other(u32),
}

impl From<TaskType> for u32 {
    fn from(ty: TaskType) -> Self {
        match ty {
            TaskType::Gfx => 1,
            TaskType::Audio => 2,
            TaskType::Video => 3,
            TaskType::NJpeg => 4,
            TaskType::Hvq => 6,
            TaskType::Hvqm => 7,
            TaskType::Other(raw) => raw,
        }
    }
}

bitflags! {
    /// The execution flags of a task
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct TaskFlags : u32 {
        /// The task yielded and its state is stored in the yield region
        const YIELDED       = 0x0001;
        /// The task waits for the RDP to finish
        const DP_WAIT       = 0x0002;
        /// The microcode is loaded by the bootstrap loader
        const LOADABLE      = 0x0004;
        /// The task does not send output to the RDP
        const SP_ONLY       = 0x0008;
        const USR0          = 0x0010;
        const USR1          = 0x0020;
        const USR2          = 0x0040;
        const USR3          = 0x0080;
    }
}

/// The (pointer, size) pairs of the task descriptor
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum TaskRegion {
    /// The bootstrap code that is loaded before the main microcode
    UBoot,
    /// The main microcode
    UCode,
    /// The static data of the microcode
    UData,
    /// The scratch stack
    Stack,
    /// The output buffer the task writes results into
    OutBuf,
    /// Task-specific extra data
    Data,
    /// The area to save/restore the state of a yielding task
    Yield,
}

impl TaskRegion {
    pub const ALL: [TaskRegion; 7] = [
        TaskRegion::UBoot,
        TaskRegion::UCode,
        TaskRegion::UData,
        TaskRegion::Stack,
        TaskRegion::OutBuf,
        TaskRegion::Data,
        TaskRegion::Yield,
    ];

    /// The regions that occupy the scratchpad while the task runs
    pub const RESIDENT: [TaskRegion; 4] = [
        TaskRegion::UBoot,
        TaskRegion::UCode,
        TaskRegion::UData,
        TaskRegion::Stack,
    ];

    fn idx(self) -> usize {
        self as usize
    }

    /// Returns the offset of the pointer field within the descriptor
    pub fn ptr_offset(self) -> usize {
        OS_TASK_OFF_UBOOT + self.idx() * 8
    }

    /// Returns the offset of the size field within the descriptor
    pub fn size_offset(self) -> usize {
        self.ptr_offset() + 4
    }
}

/// A (pointer, size) pair of the task descriptor
#[derive(Copy, Clone, Default, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub ptr: u32,
    pub size: u32,
}

impl Region {
    pub const fn new(ptr: u32, size: u32) -> Self {
        Self { ptr, size }
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the end of the region (exclusive) or `None` on overflow
    pub fn end(&self) -> Option<u32> {
        self.ptr.checked_add(self.size)
    }
}

/// The task descriptor
///
/// The struct holds the decoded fields; the binary layout is produced and consumed only by
/// [`TaskDesc::encode`] and [`TaskDesc::decode`], which access every field at its fixed offset.
#[derive(Copy, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct TaskDesc {
    ty: u32,
    flags: u32,
    regions: [Region; 7],
}

impl TaskDesc {
    /// Creates a new descriptor of given type and flags with all regions empty
    pub fn new(ty: TaskType, flags: TaskFlags) -> Self {
        Self {
            ty: u32::from(ty),
            flags: flags.bits(),
            regions: [Region::default(); 7],
        }
    }

    /// Returns the raw type field
    pub fn raw_type(&self) -> u32 {
        self.ty
    }

    pub fn task_type(&self) -> TaskType {
        TaskType::from(self.ty)
    }

    pub fn set_task_type(&mut self, ty: TaskType) {
        self.ty = u32::from(ty);
    }

    /// Returns the flags, including bits without a known meaning
    pub fn flags(&self) -> TaskFlags {
        TaskFlags::from_bits_retain(self.flags)
    }

    pub fn set_flags(&mut self, flags: TaskFlags) {
        self.flags = flags.bits();
    }

    pub fn region(&self, region: TaskRegion) -> Region {
        self.regions[region.idx()]
    }

    pub fn set_region(&mut self, region: TaskRegion, ptr: u32, size: u32) {
        self.regions[region.idx()] = Region::new(ptr, size);
    }

    /// Returns true if the task yielded and needs to be resumed from its yield region
    pub fn is_yielded(&self) -> bool {
        self.flags().contains(TaskFlags::YIELDED)
    }

    /// Returns the region in which a yielding task stores its state
    pub fn yield_region(&self) -> Region {
        self.region(TaskRegion::Yield)
    }

    /// Returns the summed size of the regions that occupy the scratchpad while the task runs
    pub fn footprint(&self) -> u64 {
        TaskRegion::RESIDENT
            .iter()
            .map(|r| self.region(*r).size as u64)
            .sum()
    }

    /// Decodes the descriptor from its binary representation
    pub fn decode(bytes: &[u8; OS_TASK_SIZE]) -> Self {
        let rd = RecordReader::new(bytes);
        let mut desc = Self {
            ty: rd.u32(OS_TASK_OFF_TYPE),
            flags: rd.u32(OS_TASK_OFF_FLAGS),
            regions: [Region::default(); 7],
        };
        for r in TaskRegion::ALL {
            desc.regions[r.idx()] = Region::new(rd.u32(r.ptr_offset()), rd.u32(r.size_offset()));
        }
        desc
    }

    /// Encodes the descriptor into its binary representation
    pub fn encode(&self) -> [u8; OS_TASK_SIZE] {
        let mut bytes = [0u8; OS_TASK_SIZE];
        let mut wr = RecordWriter::new(&mut bytes);
        wr.put_u32(OS_TASK_OFF_TYPE, self.ty);
        wr.put_u32(OS_TASK_OFF_FLAGS, self.flags);
        for r in TaskRegion::ALL {
            let reg = self.region(r);
            wr.put_u32(r.ptr_offset(), reg.ptr);
            wr.put_u32(r.size_offset(), reg.size);
        }
        bytes
    }

    /// Reads the descriptor from the given data bank
    ///
    /// The descriptor occupies the last [`OS_TASK_SIZE`] bytes of the bank, so that a buffer of
    /// exactly [`OS_TASK_SIZE`] bytes is the descriptor itself. Fails with
    /// [`Code::MalformedDescriptor`] if the bank is smaller than that.
    pub fn read(bank: &[u8]) -> Result<Self, Error> {
        let bytes = Self::record(bank)?;
        let mut rec = [0u8; OS_TASK_SIZE];
        rec.copy_from_slice(bytes);

        let desc = Self::decode(&rec);
        log!(
            LogFlags::RspTask,
            "task: read {:?} at offset {:#x}",
            desc,
            bank.len() - OS_TASK_SIZE
        );
        Ok(desc)
    }

    /// Writes the descriptor into the last [`OS_TASK_SIZE`] bytes of the given data bank
    pub fn write(&self, bank: &mut [u8]) -> Result<(), Error> {
        if bank.len() < OS_TASK_SIZE {
            return Err(Error::new(Code::MalformedDescriptor));
        }

        let off = bank.len() - OS_TASK_SIZE;
        bank[off..].copy_from_slice(&self.encode());
        log!(LogFlags::RspTask, "task: wrote {:?} at offset {:#x}", self, off);
        Ok(())
    }

    /// Validates the descriptor against a bank of `capacity` bytes
    ///
    /// Fails with [`Code::OversizeRegion`] if any non-empty region does not lie within
    /// `[0, capacity)` or if the regions that occupy the scratchpad do not fit into it together.
    /// Empty regions are not accessed and therefore not checked.
    pub fn validate(&self, capacity: usize) -> Result<(), Error> {
        for r in TaskRegion::ALL {
            let reg = self.region(r);
            if reg.is_empty() {
                continue;
            }

            let fits = match reg.end() {
                Some(end) => (end as u64) <= capacity as u64,
                None => false,
            };
            if !fits {
                log!(
                    LogFlags::Error,
                    "task: region {:?} ({:#x}:{:#x}) exceeds capacity {:#x}",
                    r,
                    reg.ptr,
                    reg.size,
                    capacity
                );
                return Err(Error::new(Code::OversizeRegion));
            }
        }

        let footprint = self.footprint();
        if footprint > capacity as u64 {
            log!(
                LogFlags::Error,
                "task: footprint {:#x} exceeds capacity {:#x}",
                footprint,
                capacity
            );
            return Err(Error::new(Code::OversizeRegion));
        }

        log!(
            LogFlags::RspValidate,
            "task: {:?} fits into {:#x} bytes (footprint {:#x})",
            self.task_type(),
            capacity,
            footprint
        );
        Ok(())
    }

    fn record(bank: &[u8]) -> Result<&[u8], Error> {
        match bank.len().checked_sub(OS_TASK_SIZE) {
            Some(off) => Ok(&bank[off..]),
            None => {
                log!(
                    LogFlags::Error,
                    "task: bank of {} bytes cannot hold a descriptor",
                    bank.len()
                );
                Err(Error::new(Code::MalformedDescriptor))
            },
        }
    }
}

impl fmt::Debug for TaskDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TaskDesc[type={:?}, flags={:?}",
            self.task_type(),
            self.flags()
        )?;
        for r in TaskRegion::ALL {
            let reg = self.region(r);
            if !reg.is_empty() {
                write!(f, ", {:?}={:#x}:{:#x}", r, reg.ptr, reg.size)?;
            }
        }
        write!(f, "]")
    }
}
