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

use bitflags::bitflags;

use core::str;

bitflags! {
    /// All log flags used by the RSP interface
    ///
    /// Logging is controlled at runtime via the environment variable `RSP_LOG`, which contains the
    /// flags in the textual bitflags format (e.g., `Info | RspTask`). Any component can then use
    /// the `log` macro to log something. The available flags are kept here.
    ///
    /// There are three general flags: `Info`, `Debug`, and `Error`. Info and Error are enabled by
    /// default. The remaining flags control the logging of specific parts of the interface.
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub struct LogFlags : u64 {
        /// General: informational output (enabled by default)
        const Info          = 1 << 0;
        /// General: debugging output (disable by default)
        const Debug         = 1 << 1;
        /// General: error output (enabled by default)
        const Error         = 1 << 2;

        #[doc(hidden)]
        const __rsp_start = 3;

        /// RSP: task descriptor reads/writes
        const RspTask       = 1 << (Self::__rsp_start.bits() + 0);
        /// RSP: task descriptor validation
        const RspValidate   = 1 << (Self::__rsp_start.bits() + 1);
        /// RSP: memory map configuration
        const RspMem        = 1 << (Self::__rsp_start.bits() + 2);
        /// RSP: clip classification of individual vertices
        const RspClip       = 1 << (Self::__rsp_start.bits() + 3);
        /// RSP: vertex record reads/writes
        const RspVtx        = 1 << (Self::__rsp_start.bits() + 4);
    }
}

impl Default for LogFlags {
    fn default() -> Self {
        Self::Info | Self::Error
    }
}

impl str::FromStr for LogFlags {
    type Err = bitflags::parser::ParseError;

    fn from_str(flags: &str) -> Result<Self, Self::Err> {
        Ok(Self(flags.parse()?))
    }
}
