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
use rspif::kif::task::*;
use rspif::test::WvTester;
use rspif::{wv_assert, wv_assert_eq, wv_assert_err, wv_assert_ok, wv_run_test};

pub fn run(t: &mut dyn WvTester) {
    wv_run_test!(t, layout);
    wv_run_test!(t, round_trip);
    wv_run_test!(t, read_bank);
    wv_run_test!(t, read_too_small);
    wv_run_test!(t, write_bank);
    wv_run_test!(t, types_and_flags);
    wv_run_test!(t, validate_ok);
    wv_run_test!(t, validate_oversize);
    wv_run_test!(t, validate_footprint);
    wv_run_test!(t, yield_region);
}

fn sample_record() -> [u8; OS_TASK_SIZE] {
    let mut bytes = [0u8; OS_TASK_SIZE];
    for (i, b) in bytes.iter_mut().enumerate() {
        *b = (i as u8).wrapping_mul(7).wrapping_add(3);
    }
    bytes
}

fn gfx_task() -> TaskDesc {
    let mut desc = TaskDesc::new(TaskType::Gfx, TaskFlags::LOADABLE | TaskFlags::DP_WAIT);
    desc.set_region(TaskRegion::UBoot, 0x000, 0x0D0);
    desc.set_region(TaskRegion::UCode, 0x100, 0x800);
    desc.set_region(TaskRegion::UData, 0x900, 0x200);
    desc.set_region(TaskRegion::Stack, 0xB00, 0x400);
    desc.set_region(TaskRegion::OutBuf, 0xC00, 0x100);
    desc.set_region(TaskRegion::Data, 0xD00, 0x200);
    desc
}

fn layout(t: &mut dyn WvTester) {
    wv_assert_eq!(t, OS_TASK_SIZE, 0x40);
    wv_assert_eq!(t, TaskRegion::UBoot.ptr_offset(), OS_TASK_OFF_UBOOT);
    wv_assert_eq!(t, TaskRegion::UBoot.size_offset(), OS_TASK_OFF_UBOOT_SZ);
    wv_assert_eq!(t, TaskRegion::UCode.ptr_offset(), OS_TASK_OFF_UCODE);
    wv_assert_eq!(t, TaskRegion::UData.size_offset(), OS_TASK_OFF_UDATA_SZ);
    wv_assert_eq!(t, TaskRegion::Stack.ptr_offset(), OS_TASK_OFF_STACK);
    wv_assert_eq!(t, TaskRegion::OutBuf.ptr_offset(), OS_TASK_OFF_OUTBUFF);
    wv_assert_eq!(t, TaskRegion::Data.size_offset(), OS_TASK_OFF_DATA_SZ);
    wv_assert_eq!(t, TaskRegion::Yield.ptr_offset(), OS_TASK_OFF_YIELD);
    wv_assert_eq!(t, TaskRegion::Yield.size_offset(), OS_TASK_OFF_YIELD_SZ);

    let bytes = gfx_task().encode();
    // big endian fields at their fixed offsets
    wv_assert_eq!(t, bytes[OS_TASK_OFF_TYPE..OS_TASK_OFF_TYPE + 4], [0u8, 0, 0, 1]);
    wv_assert_eq!(t, bytes[OS_TASK_OFF_FLAGS..OS_TASK_OFF_FLAGS + 4], [0u8, 0, 0, 6]);
    wv_assert_eq!(t, bytes[OS_TASK_OFF_UCODE..OS_TASK_OFF_UCODE + 4], [0u8, 0, 1, 0]);
    wv_assert_eq!(t, bytes[OS_TASK_OFF_UCODE_SZ..OS_TASK_OFF_UCODE_SZ + 4], [0u8, 0, 8, 0]);
    wv_assert_eq!(t, bytes[OS_TASK_OFF_YIELD..], [0u8; 8]);
}

fn round_trip(t: &mut dyn WvTester) {
    let bytes = sample_record();
    let desc = TaskDesc::decode(&bytes);
    wv_assert_eq!(t, desc.encode(), bytes);
    wv_assert_eq!(t, desc.raw_type(), 0x030A_1118);
    wv_assert_eq!(t, desc.region(TaskRegion::UBoot).ptr, 0x3B42_4950);

    let desc = gfx_task();
    wv_assert_eq!(t, TaskDesc::decode(&desc.encode()), desc);
}

fn read_bank(t: &mut dyn WvTester) {
    let mut dmem = vec![0xEEu8; cfg::DMEM_SIZE];
    dmem[cfg::OSTASK_ADDR..].copy_from_slice(&gfx_task().encode());

    let desc = wv_assert_ok!(t, TaskDesc::read(&dmem));
    wv_assert_eq!(t, desc, gfx_task());

    // a buffer of exactly the descriptor size is the descriptor itself
    let rec = sample_record();
    let desc = wv_assert_ok!(t, TaskDesc::read(&rec));
    wv_assert_eq!(t, desc.encode(), rec);
}

fn read_too_small(t: &mut dyn WvTester) {
    wv_assert_err!(t, TaskDesc::read(&[]), Code::MalformedDescriptor);
    wv_assert_err!(
        t,
        TaskDesc::read(&[0u8; OS_TASK_SIZE - 1]),
        Code::MalformedDescriptor
    );

    let mut small = [0u8; 16];
    wv_assert_err!(t, gfx_task().write(&mut small), Code::MalformedDescriptor);
    wv_assert_eq!(t, small, [0u8; 16]);
}

fn write_bank(t: &mut dyn WvTester) {
    let mut dmem = vec![0xEEu8; cfg::DMEM_SIZE];
    wv_assert_ok!(t, gfx_task().write(&mut dmem));

    wv_assert!(t, dmem[..cfg::OSTASK_ADDR].iter().all(|b| *b == 0xEE));
    wv_assert_eq!(t, dmem[cfg::OSTASK_ADDR..], gfx_task().encode());
    wv_assert_eq!(t, wv_assert_ok!(t, TaskDesc::read(&dmem)), gfx_task());
}

fn types_and_flags(t: &mut dyn WvTester) {
    wv_assert_eq!(t, TaskType::from(1u32), TaskType::Gfx);
    wv_assert_eq!(t, TaskType::from(2u32), TaskType::Audio);
    wv_assert_eq!(t, TaskType::from(7u32), TaskType::Hvqm);
    wv_assert_eq!(t, TaskType::from(5u32), TaskType::Other(5));
    wv_assert_eq!(t, u32::from(TaskType::Other(0x1234)), 0x1234);
    wv_assert_eq!(t, u32::from(TaskType::NJpeg), 4);

    let mut desc = TaskDesc::new(TaskType::Audio, TaskFlags::empty());
    wv_assert_eq!(t, desc.task_type(), TaskType::Audio);
    desc.set_task_type(TaskType::Other(42));
    wv_assert_eq!(t, desc.raw_type(), 42);

    // unknown flag bits survive
    let mut bytes = [0u8; OS_TASK_SIZE];
    bytes[OS_TASK_OFF_FLAGS..OS_TASK_OFF_FLAGS + 4].copy_from_slice(&0x8001u32.to_be_bytes());
    let desc = TaskDesc::decode(&bytes);
    wv_assert!(t, desc.flags().contains(TaskFlags::YIELDED));
    wv_assert_eq!(t, desc.flags().bits(), 0x8001);
    wv_assert_eq!(t, desc.encode(), bytes);
}

fn validate_ok(t: &mut dyn WvTester) {
    wv_assert_ok!(t, gfx_task().validate(cfg::DMEM_SIZE));
    wv_assert_ok!(t, TaskDesc::default().validate(cfg::DMEM_SIZE));
    wv_assert_ok!(t, TaskDesc::default().validate(0));

    // a region ending exactly at the capacity fits
    let mut desc = TaskDesc::new(TaskType::Gfx, TaskFlags::empty());
    desc.set_region(TaskRegion::Data, 0xF00, 0x100);
    wv_assert_ok!(t, desc.validate(0x1000));

    // empty regions are not accessed
    desc.set_region(TaskRegion::Yield, 0xFFFF_FFFF, 0);
    wv_assert_ok!(t, desc.validate(0x1000));
}

fn validate_oversize(t: &mut dyn WvTester) {
    let mut desc = TaskDesc::new(TaskType::Gfx, TaskFlags::empty());
    desc.set_region(TaskRegion::UCode, 0, 0x2000);
    wv_assert_err!(t, desc.validate(0x1000), Code::OversizeRegion);

    for r in TaskRegion::ALL {
        let mut desc = TaskDesc::new(TaskType::Gfx, TaskFlags::empty());
        desc.set_region(r, 0xF00, 0x101);
        wv_assert_err!(t, desc.validate(0x1000), Code::OversizeRegion);
    }

    // pointer past the end
    let mut desc = TaskDesc::new(TaskType::Gfx, TaskFlags::empty());
    desc.set_region(TaskRegion::OutBuf, 0x1000, 1);
    wv_assert_err!(t, desc.validate(0x1000), Code::OversizeRegion);

    // ptr + size overflows
    desc.set_region(TaskRegion::OutBuf, 0xFFFF_FFF0, 0x20);
    wv_assert_err!(t, desc.validate(0x1000), Code::OversizeRegion);
}

fn validate_footprint(t: &mut dyn WvTester) {
    let mut desc = TaskDesc::new(TaskType::Gfx, TaskFlags::empty());
    desc.set_region(TaskRegion::UCode, 0x000, 0x800);
    desc.set_region(TaskRegion::UData, 0x000, 0x800);
    wv_assert_eq!(t, desc.footprint(), 0x1000);
    wv_assert_ok!(t, desc.validate(0x1000));

    // each region fits on its own, but not all of them together
    desc.set_region(TaskRegion::Stack, 0x000, 0x10);
    wv_assert_eq!(t, desc.footprint(), 0x1010);
    wv_assert_err!(t, desc.validate(0x1000), Code::OversizeRegion);

    // non-resident regions do not count
    let mut desc = TaskDesc::new(TaskType::Gfx, TaskFlags::empty());
    desc.set_region(TaskRegion::UCode, 0x000, 0x1000);
    desc.set_region(TaskRegion::OutBuf, 0x000, 0x1000);
    desc.set_region(TaskRegion::Yield, 0x000, 0x1000);
    wv_assert_ok!(t, desc.validate(0x1000));
}

fn yield_region(t: &mut dyn WvTester) {
    let mut desc = gfx_task();
    wv_assert!(t, !desc.is_yielded());

    desc.set_region(TaskRegion::Yield, 0xE00, 0x100);
    desc.set_flags(desc.flags() | TaskFlags::YIELDED);
    wv_assert!(t, desc.is_yielded());
    wv_assert_eq!(t, desc.yield_region(), Region::new(0xE00, 0x100));
    wv_assert_eq!(t, desc.yield_region().end(), Some(0xF00));

    // resuming re-enters with the same descriptor
    let resumed = TaskDesc::decode(&desc.encode());
    wv_assert_eq!(t, resumed, desc);
    wv_assert!(t, resumed.is_yielded());
}
