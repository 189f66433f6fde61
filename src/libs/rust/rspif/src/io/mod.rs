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

//! Contains the modules for logging

pub mod log;
mod logflags;

pub use self::logflags::LogFlags;

use std::env;

/// The environment variable that holds the log flags
pub const LOG_ENV: &str = "RSP_LOG";

/// Macro for logging (includes a trailing newline)
///
/// The arguments are printed if $flag is enabled (see [`LogFlags`]).
///
/// # Examples
///
/// ```
/// use rspif::io::LogFlags;
/// rspif::log!(LogFlags::RspTask, "my log entry: {}, {}", 1, "test");
/// ```
#[macro_export]
macro_rules! log {
    ($flag:expr, $fmt:expr)                   => (
        $crate::log!(@log_impl $flag, concat!($fmt, "\n"))
    );

    ($flag:expr, $fmt:expr, $($arg:tt)*)      => (
        $crate::log!(@log_impl $flag, concat!($fmt, "\n"), $($arg)*)
    );

    (@log_impl $flag:expr, $($args:tt)*)    => ({
        use std::io::Write;
        if let Some(mut l) = $crate::io::log::Log::get() {
            if l.flags().contains($flag) {
                let _ = l.write_fmt(format_args!($($args)*));
            }
        }
    });
}

/// Writes the given slice to the log if `flag` is enabled, showing `addr` as a prefix.
pub fn log_slice(flag: LogFlags, slice: &[u8], addr: usize) {
    if let Some(mut l) = log::Log::get() {
        if l.flags().contains(flag) {
            let _ = l.dump_slice(slice, addr);
        }
    }
}

/// Parses the log flags from [`LOG_ENV`], falling back to the default flags if the variable is
/// not set or cannot be parsed
pub fn env_flags() -> LogFlags {
    match env::var(LOG_ENV) {
        Ok(s) => s.parse().unwrap_or_default(),
        Err(_) => LogFlags::default(),
    }
}

/// Initializes the I/O module
pub fn init(id: u64, name: &str) {
    log::init(id, name, env_flags());
}
