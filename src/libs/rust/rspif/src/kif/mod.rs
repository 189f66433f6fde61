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

//! The data structures that are exchanged between the host and the RSP

pub mod clip;
pub mod gbi;
pub mod task;
pub mod vtx;

pub use self::clip::{classify, ClipClassifier, ClipCoords, ClipFlags, ClipWord};
pub use self::task::{Region, TaskDesc, TaskFlags, TaskRegion, TaskType};
pub use self::vtx::{InputVtx, Vertex};
