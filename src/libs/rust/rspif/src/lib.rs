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

//! The interface between the host and the RSP
//!
//! This crate describes the memory-layout contract between a host processor and the RSP
//! coprocessor: the scratchpad memory map including the area reserved for the bootstrap loader
//! ([`cfg`] and [`mem`]), the task descriptor the host places at the end of DMEM
//! ([`kif::task`]), and the vertex records including their clip flags ([`kif::vtx`] and
//! [`kif::clip`]).

// Macros
pub use static_assertions::const_assert;

#[macro_use]
pub mod io;

pub mod cfg;
pub mod errors;
pub mod kif;
pub mod mem;
pub mod serialize;
pub mod test;
pub mod util;

pub use serde;
