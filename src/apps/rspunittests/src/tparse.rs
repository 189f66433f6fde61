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

use rspif::errors::{Code, Error};
use rspif::io::LogFlags;
use rspif::test::WvTester;
use rspif::util::parse;
use rspif::{wv_assert_eq, wv_assert_err, wv_run_test};

pub fn run(t: &mut dyn WvTester) {
    wv_run_test!(t, addrs);
    wv_run_test!(t, sizes);
    wv_run_test!(t, fixed_point);
    wv_run_test!(t, log_flags);
    wv_run_test!(t, error_codes);
}

fn addrs(t: &mut dyn WvTester) {
    wv_assert_eq!(t, parse::addr("0"), Ok(0));
    wv_assert_eq!(t, parse::addr("4032"), Ok(0xFC0));
    wv_assert_eq!(t, parse::addr("0xFC0"), Ok(0xFC0));
    wv_assert_eq!(t, parse::addr("0xffffffff"), Ok(u32::MAX));
    wv_assert_err!(t, parse::addr("0x100000000"), Code::InvArgs);
    wv_assert_err!(t, parse::addr("foo"), Code::InvArgs);
    wv_assert_err!(t, parse::addr(""), Code::InvArgs);
}

fn sizes(t: &mut dyn WvTester) {
    wv_assert_eq!(t, parse::size("64"), Ok(64));
    wv_assert_eq!(t, parse::size("0x1000"), Ok(0x1000));
    wv_assert_eq!(t, parse::size("4k"), Ok(0x1000));
    wv_assert_eq!(t, parse::size("4K"), Ok(0x1000));
    wv_assert_err!(t, parse::size("4M"), Code::InvArgs);
    wv_assert_err!(t, parse::size(""), Code::InvArgs);
}

fn fixed_point(t: &mut dyn WvTester) {
    wv_assert_eq!(t, parse::fixed("1i"), Ok(0x1_0000));
    wv_assert_eq!(t, parse::fixed("-1i"), Ok(-0x1_0000));
    wv_assert_eq!(t, parse::fixed("0x8000"), Ok(0x8000));
    wv_assert_eq!(t, parse::fixed("-0x80000000"), Ok(i32::MIN));
    wv_assert_err!(t, parse::fixed("0x80000000"), Code::InvArgs);
    wv_assert_err!(t, parse::fixed("65536i"), Code::InvArgs);
    wv_assert_err!(t, parse::fixed("-"), Code::InvArgs);
}

fn log_flags(t: &mut dyn WvTester) {
    wv_assert_eq!(t, LogFlags::default(), LogFlags::Info | LogFlags::Error);
    wv_assert_eq!(
        t,
        "Info | RspTask".parse::<LogFlags>().ok(),
        Some(LogFlags::Info | LogFlags::RspTask)
    );
    wv_assert_eq!(
        t,
        "RspClip".parse::<LogFlags>().ok(),
        Some(LogFlags::RspClip)
    );
    wv_assert_eq!(t, "NoSuchFlag".parse::<LogFlags>().ok(), None);
}

fn error_codes(t: &mut dyn WvTester) {
    wv_assert_eq!(t, Code::from(0u32), Code::Success);
    wv_assert_eq!(t, Code::from(1u32), Code::MalformedDescriptor);
    wv_assert_eq!(t, Code::from(2u32), Code::OversizeRegion);
    wv_assert_eq!(t, Code::from(3u32), Code::ReservedZoneTooLarge);
    wv_assert_eq!(t, Code::from(1000u32), Code::Unspecified);
    wv_assert_eq!(t, u32::from(Code::OversizeRegion), 2);
    wv_assert_eq!(t, Code::default(), Code::Success);
    wv_assert_eq!(t, Error::from(4u32).code(), Code::InvArgs);
    wv_assert_eq!(t, Code::from(Error::new(Code::InvArgs)), Code::InvArgs);
}
