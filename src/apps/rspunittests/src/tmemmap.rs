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

use rspif::cfg;
use rspif::errors::Code;
use rspif::kif::vtx::VTX_SIZE;
use rspif::mem::{MemMap, SpAddr};
use rspif::test::WvTester;
use rspif::{wv_assert, wv_assert_eq, wv_assert_err, wv_assert_ok, wv_run_test};

pub fn run(t: &mut dyn WvTester) {
    wv_run_test!(t, constants);
    wv_run_test!(t, default_map);
    wv_run_test!(t, entry_point);
    wv_run_test!(t, reserved_zone);
    wv_run_test!(t, bank_limits);
    wv_run_test!(t, ucode_capacity);
    wv_run_test!(t, vertex_capacity);
    wv_run_test!(t, addresses);
}

fn constants(t: &mut dyn WvTester) {
    wv_assert_eq!(t, cfg::DMEM_END, 0x1000);
    wv_assert_eq!(t, cfg::IMEM_START, 0x1000);
    wv_assert_eq!(t, cfg::IMEM_END, 0x2000);
    wv_assert_eq!(t, cfg::DMEM_START_VIRT, 0x0400_0000);
    wv_assert_eq!(t, cfg::IMEM_START_VIRT, 0x0400_1000);
    wv_assert_eq!(t, cfg::DMEM_END_VIRT, 0x0400_1000);
    wv_assert_eq!(t, cfg::IMEM_END_VIRT, 0x0400_2000);
    wv_assert_eq!(t, cfg::RSPBOOT_ENTRYPOINT, 0x1080);
    wv_assert_eq!(t, cfg::RSPBOOT_ENTRYPOINT_VIRT, 0x0400_1080);
    wv_assert_eq!(t, cfg::OSTASK_ADDR, 0x0FC0);
}

fn default_map(t: &mut dyn WvTester) {
    let map = MemMap::default();
    wv_assert_eq!(t, map.dmem_start(), SpAddr::new(0x0000));
    wv_assert_eq!(t, map.dmem_end(), SpAddr::new(0x1000));
    wv_assert_eq!(t, map.imem_start(), SpAddr::new(0x1000));
    wv_assert_eq!(t, map.imem_end(), SpAddr::new(0x2000));
    wv_assert_eq!(t, map.reserved_size(), 0x80);
    wv_assert_eq!(t, map.task_addr(), SpAddr::from(cfg::OSTASK_ADDR));

    let same = wv_assert_ok!(t, MemMap::new(cfg::DMEM_SIZE, cfg::IMEM_SIZE, 0x80));
    wv_assert_eq!(t, same, map);
}

fn entry_point(t: &mut dyn WvTester) {
    let map = MemMap::default();
    wv_assert_eq!(t, map.entry_point(), SpAddr::new(0x1080));
    wv_assert_eq!(t, map.entry_point_virt(), SpAddr::new(0x0400_1080));
    wv_assert_eq!(t, map.entry_point_for(SpAddr::new(0x1000)), SpAddr::new(0x1080));
    wv_assert_eq!(
        t,
        map.entry_point_for(SpAddr::from(cfg::IMEM_START_VIRT)),
        SpAddr::from(cfg::RSPBOOT_ENTRYPOINT_VIRT)
    );

    let small = wv_assert_ok!(t, MemMap::new(0x800, 0x800, 0x40));
    wv_assert_eq!(t, small.imem_start(), SpAddr::new(0x800));
    wv_assert_eq!(t, small.entry_point(), SpAddr::new(0x840));
    wv_assert_eq!(t, small.task_addr(), SpAddr::new(0x7C0));
}

fn reserved_zone(t: &mut dyn WvTester) {
    wv_assert_err!(t, MemMap::new(0x1000, 0x1000, 0x1000), Code::ReservedZoneTooLarge);
    wv_assert_err!(t, MemMap::new(0x1000, 0x1000, 0x2000), Code::ReservedZoneTooLarge);
    wv_assert_err!(t, MemMap::new(0x20, 0x1000, 0x80), Code::InvArgs);
    wv_assert_ok!(t, MemMap::new(0x1000, 0x1000, 0xFFF));

    let map = MemMap::default();
    wv_assert!(t, !map.is_reserved(SpAddr::new(0x0FFF)));
    wv_assert!(t, map.is_reserved(SpAddr::new(0x1000)));
    wv_assert!(t, map.is_reserved(SpAddr::new(0x107F)));
    wv_assert!(t, map.is_reserved(SpAddr::new(0x0400_1040)));
    wv_assert!(t, !map.is_reserved(SpAddr::new(0x1080)));
    wv_assert!(t, !map.is_reserved(map.entry_point_virt()));
}

fn bank_limits(t: &mut dyn WvTester) {
    // the banks must stay below the virtual alias
    wv_assert_err!(t, MemMap::new(0xFFFF_FFFF, 0x1000, 0x80), Code::InvArgs);
    wv_assert_err!(t, MemMap::new(usize::MAX, usize::MAX, 0x80), Code::InvArgs);
    wv_assert_err!(t, MemMap::new(cfg::SP_VIRT_BASE, 0x1000, 0x80), Code::InvArgs);

    let big = wv_assert_ok!(t, MemMap::new(cfg::SP_VIRT_BASE - 0x1000, 0x1000, 0x80));
    wv_assert_eq!(t, big.imem_end(), SpAddr::from(cfg::SP_VIRT_BASE));
    wv_assert!(t, !big.imem_start().is_virt());
    wv_assert!(t, big.is_reserved(big.imem_start()));
    wv_assert_eq!(t, big.entry_point(), SpAddr::new(0x03FF_F080));
}

fn ucode_capacity(t: &mut dyn WvTester) {
    let map = MemMap::default();
    wv_assert_eq!(t, map.ucode_capacity(), 0xF80);
    wv_assert_ok!(t, map.check_ucode(0));
    wv_assert_ok!(t, map.check_ucode(0xF80));
    wv_assert_err!(t, map.check_ucode(0xF81), Code::OversizeRegion);
    wv_assert_err!(t, map.check_ucode(0x1000), Code::OversizeRegion);
}

fn vertex_capacity(t: &mut dyn WvTester) {
    let map = MemMap::default();
    wv_assert_eq!(t, map.vertex_capacity(0), (0x1000 - 0x40) / VTX_SIZE);
    wv_assert_eq!(t, map.vertex_capacity(0xF00), 4);
    wv_assert_eq!(t, map.vertex_capacity(0xFA0), 0);
    wv_assert_eq!(t, map.vertex_capacity(0x2000), 0);
}

fn addresses(t: &mut dyn WvTester) {
    let addr = SpAddr::new(0x1234);
    wv_assert!(t, !addr.is_virt());
    wv_assert_eq!(t, addr.virt(), SpAddr::new(0x0400_1234));
    wv_assert!(t, addr.virt().is_virt());
    wv_assert_eq!(t, addr.virt().phys(), addr);
    wv_assert_eq!(t, addr + 0x10usize, SpAddr::new(0x1244));
    wv_assert_eq!(t, addr - 0x34usize, SpAddr::new(0x1200));
    wv_assert_eq!(t, format!("{}", addr), "SP[0x1234]");
}
