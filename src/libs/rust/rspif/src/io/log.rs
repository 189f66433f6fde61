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

//! Contains the logger

use std::cmp;
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};
use std::time::Instant;

use crate::io::LogFlags;

const MAX_LINE_LEN: usize = 180;
const SUFFIX: &[u8] = b"\x1B[0m";

static LOG_READY: AtomicBool = AtomicBool::new(false);
static LOG: Mutex<Log> = Mutex::new(Log::new());

/// A buffered logger that writes complete lines to stderr
pub struct Log {
    buf: [u8; MAX_LINE_LEN],
    pos: usize,
    time_pos: usize,
    start_pos: usize,
    flags: LogFlags,
    start: Option<Instant>,
}

impl Log {
    /// Returns the logger
    pub fn get() -> Option<MutexGuard<'static, Log>> {
        match LOG_READY.load(Ordering::Acquire) {
            // a panic while logging must not silence all subsequent output
            true => Some(LOG.lock().unwrap_or_else(|e| e.into_inner())),
            false => None,
        }
    }

    pub(crate) const fn new() -> Self {
        Log {
            buf: [0; MAX_LINE_LEN],
            pos: 0,
            time_pos: 0,
            start_pos: 0,
            flags: LogFlags::empty(),
            start: None,
        }
    }

    /// Returns the currently enabled log flags
    pub fn flags(&self) -> LogFlags {
        self.flags
    }

    /// Sets the enabled log flags
    pub fn set_flags(&mut self, flags: LogFlags) {
        self.flags = flags;
    }

    /// Writes a hex dump of `slice` to the log, showing `addr + offset` as the line prefix
    pub fn dump_slice(&mut self, slice: &[u8], addr: usize) -> io::Result<()> {
        for (i, b) in slice.iter().enumerate() {
            if i % 16 == 0 {
                if i > 0 {
                    self.write_all(b"\n")?;
                }
                self.write_fmt(format_args!("{:#06x}: ", addr + i))?;
            }
            self.write_fmt(format_args!("{:02x} ", b))?;
        }
        if !slice.is_empty() {
            self.write_all(b"\n")?;
        }
        Ok(())
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()> {
        for b in bytes {
            self.put_char(*b)?;
        }
        Ok(())
    }

    fn put_char(&mut self, c: u8) -> io::Result<()> {
        self.buf[self.pos] = c;
        self.pos += 1;

        if c == b'\n' || self.pos + SUFFIX.len() + 1 >= MAX_LINE_LEN {
            for c in SUFFIX {
                self.buf[self.pos] = *c;
                self.pos += 1;
            }
            if c != b'\n' {
                self.buf[self.pos] = b'\n';
                self.pos += 1;
            }

            self.flush()?;
        }
        Ok(())
    }

    pub(crate) fn init(&mut self, id: u64, name: &str, flags: LogFlags) {
        let colors = ["31", "32", "33", "34", "35", "36"];
        let begin = match name.rfind('/') {
            Some(b) => b + 1,
            None => 0,
        };
        let len = cmp::min(name.len() - begin, 8);

        self.flags = flags;
        self.start = Some(Instant::now());
        self.pos = 0;
        // the buffer is large enough for the prefix
        let _ = self.write_fmt(format_args!(
            "\x1B[0;{}m[{:X}:{:<8}@",
            colors[(id as usize) % colors.len()],
            id,
            &name[begin..begin + len]
        ));
        self.time_pos = self.pos;
        self.start_pos = self.pos + 11 + 2;
        self.pos = self.start_pos;
    }
}

impl Write for Log {
    fn flush(&mut self) -> io::Result<()> {
        let length = self.pos;
        let micros = self.start.map(|s| s.elapsed().as_micros()).unwrap_or(0);
        self.pos = self.time_pos;
        let mut time = [0u8; 13];
        let mut cur = io::Cursor::new(&mut time[..]);
        write!(cur, "{:11}] ", micros % 100_000_000_000)?;
        self.buf[self.time_pos..self.time_pos + 13].copy_from_slice(&time);
        io::stderr().write_all(&self.buf[0..length])?;
        self.pos = self.start_pos;
        Ok(())
    }

    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_bytes(buf)?;
        Ok(buf.len())
    }
}

/// Initializes the logger with the given flags
pub fn init(id: u64, name: &str, flags: LogFlags) {
    LOG.lock()
        .unwrap_or_else(|e| e.into_inner())
        .init(id, name, flags);
    LOG_READY.store(true, Ordering::Release);
}
