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

//! Contains the error handling types

use core::fmt;

use num_enum::{FromPrimitive, IntoPrimitive};
use serde_repr::{Deserialize_repr, Serialize_repr};

/// The error codes
///
/// All errors are fatal for the current dispatch attempt: nothing at this layer retries. A
/// dispatcher may re-issue a corrected descriptor, though.
#[derive(
    Debug,
    PartialEq,
    Eq,
    Clone,
    Copy,
    IntoPrimitive,
    FromPrimitive,
    Serialize_repr,
    Deserialize_repr,
)]
#[repr(u32)]
pub enum Code {
    // success
    Success = 0,
    // layout errors
    MalformedDescriptor,
    OversizeRegion,
    ReservedZoneTooLarge,
    // general errors
    InvArgs,
    #[num_enum(default)]
    Unspecified,
}

impl Default for Code {
    fn default() -> Self {
        Self::Success
    }
}

/// The error struct that is passed around
#[derive(Clone, Copy)]
pub struct Error {
    code: Code,
}

impl Error {
    /// Creates a new object for given error code
    pub fn new(code: Code) -> Self {
        Error { code }
    }

    /// Returns the error code
    pub fn code(&self) -> Code {
        self.code
    }

    fn debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.code())
    }
}

impl From<Error> for Code {
    fn from(err: Error) -> Self {
        err.code()
    }
}

impl From<u32> for Error {
    fn from(error: u32) -> Self {
        Self::new(Code::from(error))
    }
}

impl PartialEq for Error {
    fn eq(&self, other: &Error) -> bool {
        self.code() == other.code()
    }
}

impl Eq for Error {
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.debug(f)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.debug(f)
    }
}

impl std::error::Error for Error {
}

/// A verbose error type that contains an error message
pub struct VerboseError {
    code: Code,
    msg: String,
}

impl VerboseError {
    /// Creates a new error with given error code and error message
    pub fn new(code: Code, msg: String) -> Self {
        Self { code, msg }
    }

    /// Returns the error code
    pub fn code(&self) -> Code {
        self.code
    }

    fn debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:?})", self.msg, self.code)
    }
}

impl From<Error> for VerboseError {
    fn from(e: Error) -> Self {
        Self::new(e.code(), String::default())
    }
}

impl fmt::Debug for VerboseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.debug(f)
    }
}

impl fmt::Display for VerboseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.debug(f)
    }
}
