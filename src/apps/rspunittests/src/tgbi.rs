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
use rspif::kif::gbi::*;
use rspif::test::WvTester;
use rspif::{wv_assert, wv_assert_eq, wv_run_test};

pub fn run(t: &mut dyn WvTester) {
    wv_run_test!(t, move_indices);
    wv_run_test!(t, matrix_params);
    wv_run_test!(t, point_lighting);
}

fn move_indices(t: &mut dyn WvTester) {
    wv_assert_eq!(t, u8::from(MoveIndex::Mmtx), 2);
    wv_assert_eq!(t, u8::from(MoveIndex::Pmtx), 6);
    wv_assert_eq!(t, u8::from(MoveIndex::Viewport), 8);
    wv_assert_eq!(t, u8::from(MoveIndex::Light), 10);
    wv_assert_eq!(t, u8::from(MoveIndex::Point), 12);
    wv_assert_eq!(t, u8::from(MoveIndex::Matrix), 14);
    wv_assert_eq!(t, MoveIndex::try_from(10u8).ok(), Some(MoveIndex::Light));
    wv_assert!(t, MoveIndex::try_from(4u8).is_err());
    wv_assert_eq!(t, LIGHT_SIZE, 0x18);
}

fn matrix_params(t: &mut dyn WvTester) {
    wv_assert_eq!(t, MtxParams::MV_P.bits(), 0x04);
    wv_assert_eq!(t, MtxParams::MUL_LOAD.bits(), 0x02);
    wv_assert_eq!(t, MtxParams::NOPUSH_PUSH.bits(), 0x01);

    let params = MtxParams::PROJECTION | MtxParams::LOAD | MtxParams::NOPUSH;
    wv_assert!(t, params.is_projection());
    wv_assert!(t, params.is_load());
    wv_assert!(t, !params.is_push());
    wv_assert_eq!(t, params & MtxParams::MV_P, MtxParams::PROJECTION);

    let params = MtxParams::MODELVIEW | MtxParams::MUL | MtxParams::PUSH;
    wv_assert!(t, !params.is_projection());
    wv_assert!(t, !params.is_load());
    wv_assert!(t, params.is_push());
}

fn point_lighting(t: &mut dyn WvTester) {
    wv_assert_eq!(t, G_LIGHTING_POSITIONAL, 0x0040_0000);
    wv_assert_eq!(t, G_LIGHTING_POSITIONAL_H, 0x40);

    let plain = UcodeConfig::new(false, false);
    wv_assert_eq!(t, plain.lighting_positional(), None);
    wv_assert_eq!(t, plain.lighting_positional_h(), None);

    let pl = UcodeConfig::new(false, true);
    wv_assert_eq!(t, pl.lighting_positional(), Some(G_LIGHTING_POSITIONAL));
    wv_assert_eq!(t, pl.lighting_positional_h(), Some(0x40));
}
