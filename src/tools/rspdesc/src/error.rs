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

use std::fmt;
use std::io;

use rspif::errors::VerboseError;

pub enum Error {
    IoError(io::Error),
    LogLevelError(log::ParseLevelError),
    SetLogError(log::SetLoggerError),
    RspError(VerboseError),
}

macro_rules! impl_err {
    ($src:ty, $dst:tt) => {
        impl From<$src> for Error {
            fn from(error: $src) -> Self {
                Error::$dst(error)
            }
        }
    };
}

impl_err!(io::Error, IoError);
impl_err!(log::ParseLevelError, LogLevelError);
impl_err!(log::SetLoggerError, SetLogError);
impl_err!(VerboseError, RspError);

impl From<rspif::errors::Error> for Error {
    fn from(error: rspif::errors::Error) -> Self {
        Error::RspError(VerboseError::from(error))
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        match self {
            Error::IoError(e) => write!(fmt, "I/O error occurred: {}", e),
            Error::SetLogError(e) => write!(fmt, "Setting logger failed: {}", e),
            Error::LogLevelError(e) => write!(fmt, "Parsing log level failed: {}", e),
            Error::RspError(e) => write!(fmt, "RSP interface error: {}", e),
        }
    }
}
