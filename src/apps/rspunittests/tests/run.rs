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

use std::process::exit;

use rspif::test::{DefaultWvTester, WvTester};
use rspif::wv_run_suite;

use rspunittests::{tclip, tgbi, tmemmap, tparse, ttask, tvtx};

fn main() {
    rspif::io::init(0, "rsptests");

    let mut tester = DefaultWvTester::default();
    wv_run_suite!(tester, tmemmap::run);
    wv_run_suite!(tester, ttask::run);
    wv_run_suite!(tester, tvtx::run);
    wv_run_suite!(tester, tclip::run);
    wv_run_suite!(tester, tgbi::run);
    wv_run_suite!(tester, tparse::run);
    println!("{}", tester);

    if tester.failures() > 0 {
        exit(1);
    }
}
