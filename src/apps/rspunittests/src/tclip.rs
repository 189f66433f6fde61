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

use rspif::cfg::UcodeConfig;
use rspif::kif::clip::*;
use rspif::test::WvTester;
use rspif::{wv_assert, wv_assert_eq, wv_run_test};

pub fn run(t: &mut dyn WvTester) {
    wv_run_test!(t, bit_layout);
    wv_run_test!(t, boundary_is_inside);
    wv_run_test!(t, sides);
    wv_run_test!(t, near_clipping);
    wv_run_test!(t, far_in_scaled_half);
    wv_run_test!(t, shared_position);
    wv_run_test!(t, garbage_bits);
    wv_run_test!(t, clipped_mask);
    wv_run_test!(t, extreme_values);
    wv_run_test!(t, negative_boundary);
    wv_run_test!(t, fixed_point);
}

const ONE: i32 = 0x1_0000;

const NZ_CFG: UcodeConfig = UcodeConfig::new(false, false);
const NON_CFG: UcodeConfig = UcodeConfig::new(true, false);

fn bit_layout(t: &mut dyn WvTester) {
    wv_assert_eq!(t, ClipFlags::NX.bits(), 0x0010);
    wv_assert_eq!(t, ClipFlags::NY.bits(), 0x0020);
    wv_assert_eq!(t, ClipFlags::NZ.bits(), 0x0040);
    wv_assert_eq!(t, ClipFlags::NW.bits(), 0x0080);
    wv_assert_eq!(t, ClipFlags::PX.bits(), 0x1000);
    wv_assert_eq!(t, ClipFlags::PY.bits(), 0x2000);
    wv_assert_eq!(t, ClipFlags::PZ.bits(), 0x4000);
    wv_assert_eq!(t, ClipFlags::PW.bits(), 0x8000);
    wv_assert_eq!(t, ClipFlags::FAR, ClipFlags::PZ);
    wv_assert_eq!(t, ClipFlags::near(&NZ_CFG), ClipFlags::NZ);
    wv_assert_eq!(t, ClipFlags::near(&NON_CFG), ClipFlags::NW);
    wv_assert_eq!(t, ClipFlags::all_planes(&NZ_CFG).bits(), 0x7070);
    wv_assert_eq!(t, ClipFlags::all_planes(&NON_CFG).bits(), 0x70B0);
    wv_assert_eq!(t, CLIP_SHIFT_SCAL, 16);
    wv_assert_eq!(t, CLIP_SHIFT_SCRN, 0);
}

fn boundary_is_inside(t: &mut dyn WvTester) {
    for cfg in [NZ_CFG, NON_CFG] {
        for b in [0, 1, ONE, 0x7FFF_FFFF] {
            let on_pos = ClipCoords::new(b, b, b, b);
            wv_assert_eq!(t, classify(&on_pos, b, &cfg), ClipFlags::empty());
            let on_neg = ClipCoords::new(-b, -b, -b, -b);
            wv_assert_eq!(t, classify(&on_neg, b, &cfg), ClipFlags::empty());
        }
    }
}

fn sides(t: &mut dyn WvTester) {
    let b = 2 * ONE;

    let flags = classify(&ClipCoords::new(-b - 1, 0, 0, b), b, &NZ_CFG);
    wv_assert_eq!(t, flags, ClipFlags::NX);
    let flags = classify(&ClipCoords::new(b + 1, 0, 0, b), b, &NZ_CFG);
    wv_assert_eq!(t, flags, ClipFlags::PX);
    let flags = classify(&ClipCoords::new(0, -b - 1, 0, b), b, &NZ_CFG);
    wv_assert_eq!(t, flags, ClipFlags::NY);
    let flags = classify(&ClipCoords::new(0, b + 1, 0, b), b, &NZ_CFG);
    wv_assert_eq!(t, flags, ClipFlags::PY);
    let flags = classify(&ClipCoords::new(0, 0, b + 1, b), b, &NZ_CFG);
    wv_assert_eq!(t, flags, ClipFlags::FAR);
    let flags = classify(&ClipCoords::new(0, 0, -b - 1, b), b, &NZ_CFG);
    wv_assert_eq!(t, flags, ClipFlags::NZ);

    let flags = classify(&ClipCoords::new(-b - 1, b + 1, b + 1, b), b, &NZ_CFG);
    wv_assert_eq!(t, flags, ClipFlags::NX | ClipFlags::PY | ClipFlags::FAR);
    wv_assert!(t, !flags.contains(ClipFlags::PX));
    wv_assert!(t, !flags.contains(ClipFlags::NY));

    // W is never tested against the positive side
    let flags = classify(&ClipCoords::new(0, 0, 0, 100 * b), b, &NON_CFG);
    wv_assert_eq!(t, flags, ClipFlags::empty());
}

fn near_clipping(t: &mut dyn WvTester) {
    let b = ONE;
    let vtx = ClipCoords::new(0, 0, -b - 1, b);

    wv_assert_eq!(t, classify(&vtx, b, &NZ_CFG), ClipFlags::NZ);
    // without near clipping, -w decides and w is in range
    wv_assert_eq!(t, classify(&vtx, b, &NON_CFG), ClipFlags::empty());

    let behind = ClipCoords::new(0, 0, 0, -b - 1);
    wv_assert_eq!(t, classify(&behind, b, &NON_CFG), ClipFlags::NW);
    wv_assert_eq!(t, classify(&behind, b, &NZ_CFG), ClipFlags::empty());

    // far clipping always uses +z
    let far = ClipCoords::new(0, 0, b + 1, -b - 1);
    wv_assert_eq!(t, classify(&far, b, &NZ_CFG), ClipFlags::FAR);
    wv_assert_eq!(t, classify(&far, b, &NON_CFG), ClipFlags::FAR | ClipFlags::NW);
}

fn far_in_scaled_half(t: &mut dyn WvTester) {
    let b = ONE;
    let classifier = ClipClassifier::new(NZ_CFG, b, b);
    let scal = ClipCoords::new(0, 0, b + 1, b);
    let scrn = ClipCoords::new(0, 0, 0, b);

    let word = classifier.classify(&scal, &scrn);
    wv_assert_eq!(t, word.raw(), 0x4000_0000);
    wv_assert_eq!(t, word.scal(), ClipFlags::FAR);
    wv_assert_eq!(t, word.scrn(), ClipFlags::empty());
    wv_assert!(t, word.is_clipped(&NZ_CFG));

    let word = ClipWord::new(ClipFlags::NX, ClipFlags::PY);
    wv_assert_eq!(t, word.raw(), 0x0010_2000);
}

fn shared_position(t: &mut dyn WvTester) {
    // one position in both spaces: the halves only differ by their boundaries
    let classifier = ClipClassifier::new(NZ_CFG, 2 * ONE, ONE);
    let pos = ClipCoords::new(ONE + ONE / 2, 0, 0, ONE);

    let word = classifier.classify(&pos, &pos);
    wv_assert_eq!(t, word.scal(), ClipFlags::empty());
    wv_assert_eq!(t, word.scrn(), ClipFlags::PX);
    wv_assert_eq!(t, word.raw(), 0x0000_1000);

    let same = ClipClassifier::new(NZ_CFG, ONE, ONE).classify(&pos, &pos);
    wv_assert_eq!(t, same.scal(), same.scrn());
}

fn garbage_bits(t: &mut dyn WvTester) {
    let word = ClipWord::from_raw(0x0F0F_0F0F);
    wv_assert_eq!(t, word.scal(), ClipFlags::empty());
    wv_assert_eq!(t, word.scrn(), ClipFlags::empty());
    wv_assert!(t, !word.is_clipped(&NZ_CFG));
    wv_assert!(t, !word.is_clipped(&NON_CFG));

    let word = ClipWord::from_raw(0x4F0F_0F1F);
    wv_assert_eq!(t, word.scal(), ClipFlags::PZ);
    wv_assert_eq!(t, word.scrn(), ClipFlags::NX);
    wv_assert_eq!(t, ClipFlags::from_half(0xFFFF).bits(), 0xF0F0);
}

fn clipped_mask(t: &mut dyn WvTester) {
    wv_assert_eq!(t, ClipWord::all_mask(&NZ_CFG), 0x7070_7070);
    wv_assert_eq!(t, ClipWord::all_mask(&NON_CFG), 0x70B0_70B0);

    // the unused slot of the other near mode does not count
    let nw_only = ClipWord::new(ClipFlags::NW, ClipFlags::empty());
    wv_assert!(t, !nw_only.is_clipped(&NZ_CFG));
    wv_assert!(t, nw_only.is_clipped(&NON_CFG));

    let pw_only = ClipWord::new(ClipFlags::PW, ClipFlags::PW);
    wv_assert!(t, !pw_only.is_clipped(&NZ_CFG));
    wv_assert!(t, !pw_only.is_clipped(&NON_CFG));

    let inside = ClipWord::new(ClipFlags::empty(), ClipFlags::empty());
    wv_assert!(t, !inside.is_clipped(&NZ_CFG));
}

fn extreme_values(t: &mut dyn WvTester) {
    let min = ClipCoords::new(i32::MIN, i32::MIN, i32::MIN, i32::MIN);
    let max = ClipCoords::new(i32::MAX, i32::MAX, i32::MAX, i32::MAX);

    wv_assert_eq!(
        t,
        classify(&min, i32::MAX, &NZ_CFG),
        ClipFlags::NX | ClipFlags::NY | ClipFlags::NZ
    );
    wv_assert_eq!(t, classify(&max, i32::MAX, &NZ_CFG), ClipFlags::empty());
    wv_assert_eq!(
        t,
        classify(&max, 0, &NON_CFG),
        ClipFlags::PX | ClipFlags::PY | ClipFlags::FAR
    );
}

fn negative_boundary(t: &mut dyn WvTester) {
    let b = 5 * ONE;
    let origin = ClipCoords::new(0, 0, 0, 0);
    wv_assert_eq!(t, classify(&origin, -b, &NZ_CFG), ClipFlags::empty());

    let below = ClipCoords::new(-b - 1, -b - 1, -b - 1, b);
    wv_assert_eq!(
        t,
        classify(&below, -b, &NZ_CFG),
        classify(&below, b, &NZ_CFG)
    );
    wv_assert_eq!(
        t,
        classify(&below, -b, &NZ_CFG),
        ClipFlags::NX | ClipFlags::NY | ClipFlags::NZ
    );

    let above = ClipCoords::new(b + 1, b + 1, b + 1, b);
    wv_assert_eq!(
        t,
        classify(&above, -b, &NON_CFG),
        ClipFlags::PX | ClipFlags::PY | ClipFlags::FAR
    );

    let min = ClipCoords::new(i32::MIN, i32::MIN, i32::MIN, i32::MIN);
    let max = ClipCoords::new(i32::MAX, i32::MAX, i32::MAX, i32::MAX);
    wv_assert_eq!(t, classify(&min, i32::MIN, &NZ_CFG), ClipFlags::empty());
    wv_assert_eq!(t, classify(&max, i32::MIN, &NON_CFG), ClipFlags::empty());
}

fn fixed_point(t: &mut dyn WvTester) {
    let coords = ClipCoords::from_parts([1, -1, 0, 2], [0x8000, 0x8000, 0xFFFF, 0]);
    wv_assert_eq!(t, coords.x, 0x1_8000);
    wv_assert_eq!(t, coords.y, -0x8000);
    wv_assert_eq!(t, coords.z, 0xFFFF);
    wv_assert_eq!(t, coords.w, 0x2_0000);
    wv_assert_eq!(
        t,
        coords.to_parts(),
        ([1, -1, 0, 2], [0x8000, 0x8000, 0xFFFF, 0])
    );
}
