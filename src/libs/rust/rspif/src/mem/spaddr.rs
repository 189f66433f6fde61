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
use core::ops;

use crate::cfg;
use crate::serialize::{Deserialize, Serialize};

pub type SpAddrRaw = u32;

/// An address in the RSP's scratchpad (DMEM or IMEM)
///
/// The address is either physical (relative to the start of DMEM) or the virtual alias of such an
/// address, which has [`cfg::SP_VIRT_BASE`] OR'd in.
#[derive(Default, Copy, Clone, Eq, PartialEq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SpAddr(SpAddrRaw);

impl SpAddr {
    pub const fn new(addr: SpAddrRaw) -> Self {
        Self(addr)
    }

    pub const fn as_raw(&self) -> SpAddrRaw {
        self.0
    }

    /// Returns true if this is the virtual alias of a scratchpad address
    pub const fn is_virt(&self) -> bool {
        (self.0 & cfg::SP_VIRT_BASE as SpAddrRaw) != 0
    }

    /// Returns the virtual alias of this address
    pub const fn virt(&self) -> Self {
        Self(self.0 | cfg::SP_VIRT_BASE as SpAddrRaw)
    }

    /// Returns the physical address, that is, this address without the virtual alias
    pub const fn phys(&self) -> Self {
        Self(self.0 & !(cfg::SP_VIRT_BASE as SpAddrRaw))
    }
}

impl From<usize> for SpAddr {
    fn from(addr: usize) -> Self {
        Self(addr as SpAddrRaw)
    }
}

impl From<SpAddrRaw> for SpAddr {
    fn from(addr: SpAddrRaw) -> Self {
        Self(addr)
    }
}

impl fmt::Display for SpAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "SP[{:#x}]", self.0)
    }
}

impl fmt::Debug for SpAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "SP[{:#x}]", self.0)
    }
}

impl ops::Add<usize> for SpAddr {
    type Output = Self;

    fn add(self, rhs: usize) -> Self::Output {
        Self(self.0 + (rhs as SpAddrRaw))
    }
}

// required by CheckedAdd
impl ops::Add<SpAddr> for SpAddr {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl num_traits::CheckedAdd for SpAddr {
    fn checked_add(&self, v: &Self) -> Option<Self> {
        self.0.checked_add(v.0).map(Self)
    }
}

impl ops::Sub<usize> for SpAddr {
    type Output = Self;

    fn sub(self, rhs: usize) -> Self::Output {
        Self(self.0 - (rhs as SpAddrRaw))
    }
}
