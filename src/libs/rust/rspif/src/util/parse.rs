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

//! Contains utility functions for parsing data types from text

use crate::errors::{Code, Error};

/// Parses a scratchpad address or a descriptor field from the given string
///
/// If the string starts with "0x", the remainder is interpreted hexadecimal, otherwise decimal.
pub fn addr(s: &str) -> Result<u32, Error> {
    if let Some(hex) = s.strip_prefix("0x") {
        u32::from_str_radix(hex, 16)
    }
    else {
        s.parse::<u32>()
    }
    .map_err(|_| Error::new(Code::InvArgs))
}

/// Parses a size from the given string
///
/// The binary prefix k/K can be used to denote kibibytes.
pub fn size(s: &str) -> Result<usize, Error> {
    let mul = match s.chars().last() {
        Some(c) if c.is_ascii_hexdigit() => 1,
        Some('k') | Some('K') => 1024,
        _ => return Err(Error::new(Code::InvArgs)),
    };
    match mul {
        1 => Ok(addr(s)? as usize),
        m => (addr(&s[0..s.len() - 1])? as usize)
            .checked_mul(m)
            .ok_or_else(|| Error::new(Code::InvArgs)),
    }
}

/// Parses a signed 15.16 fixed-point value from the given string
///
/// The value is either given as a raw fixed-point number (decimal or, with "0x", hexadecimal,
/// optionally preceded by '-') or as an integer with the suffix 'i', which is shifted into the
/// integer part.
pub fn fixed(s: &str) -> Result<i32, Error> {
    let (neg, s) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s),
    };
    let val = match s.strip_suffix('i') {
        Some(int) => (addr(int)? as i64) << 16,
        None => addr(s)? as i64,
    };
    let val = if neg { -val } else { val };
    i32::try_from(val).map_err(|_| Error::new(Code::InvArgs))
}
