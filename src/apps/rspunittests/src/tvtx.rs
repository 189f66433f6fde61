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
use rspif::errors::Code;
use rspif::kif::clip::{ClipClassifier, ClipCoords, ClipFlags, ClipWord};
use rspif::kif::vtx::*;
use rspif::test::WvTester;
use rspif::{wv_assert_eq, wv_assert_err, wv_assert_ok, wv_run_test};

pub fn run(t: &mut dyn WvTester) {
    wv_run_test!(t, sizes);
    wv_run_test!(t, vertex_layout);
    wv_run_test!(t, clip_halves);
    wv_run_test!(t, position);
    wv_run_test!(t, classify_writes_clip_only);
    wv_run_test!(t, vertex_buffer);
    wv_run_test!(t, input_vertex);
}

fn sample_vertex() -> Vertex {
    let mut vtx = Vertex::default();
    vtx.pos_int = [1, -2, 3, 4];
    vtx.pos_frac = [0x1111, 0x2222, 0x3333, 0x4444];
    vtx.color = [0x10, 0x20, 0x30, 0x40];
    vtx.tc = [0x100, -0x100];
    vtx.scr = [160, 120, 0x3FF];
    vtx.scr_z_frac = 0xABCD;
    vtx.inv_w_frac = 0x4000;
    // garbage from a previous vertex
    vtx.set_clip(ClipWord::from_raw(0x0F0F_0F0F));
    vtx
}

fn sizes(t: &mut dyn WvTester) {
    wv_assert_eq!(t, VTX_SIZE, 40);
    wv_assert_eq!(t, INPUT_VTX_SIZE, 16);
    wv_assert_eq!(t, VTX_CLIP_SCAL, 0x24);
    wv_assert_eq!(t, VTX_CLIP_SCRN, 0x26);
}

fn vertex_layout(t: &mut dyn WvTester) {
    let bytes = sample_vertex().encode();
    wv_assert_eq!(t, bytes[VTX_X_INT..VTX_X_INT + 2], [0x00u8, 0x01]);
    wv_assert_eq!(t, bytes[VTX_Y_INT..VTX_Y_INT + 2], [0xFFu8, 0xFE]);
    wv_assert_eq!(t, bytes[VTX_W_FRAC..VTX_W_FRAC + 2], [0x44u8, 0x44]);
    wv_assert_eq!(t, bytes[VTX_COLOR_VEC..VTX_COLOR_VEC + 4], [0x10u8, 0x20, 0x30, 0x40]);
    wv_assert_eq!(t, bytes[VTX_TC_T..VTX_TC_T + 2], [0xFFu8, 0x00]);
    wv_assert_eq!(t, bytes[VTX_SCR_Z..VTX_SCR_Z + 2], [0x03u8, 0xFF]);
    wv_assert_eq!(t, bytes[VTX_SCR_Z_FRAC..VTX_SCR_Z_FRAC + 2], [0xABu8, 0xCD]);
    wv_assert_eq!(t, bytes[VTX_INV_W_FRAC..VTX_INV_W_FRAC + 2], [0x40u8, 0x00]);
    wv_assert_eq!(t, Vertex::decode(&bytes), sample_vertex());
}

fn clip_halves(t: &mut dyn WvTester) {
    let mut vtx = Vertex::default();
    vtx.set_clip(ClipWord::new(ClipFlags::FAR, ClipFlags::NX));

    let bytes = vtx.encode();
    // the scaled half lives at the lower address
    wv_assert_eq!(t, bytes[VTX_CLIP_SCAL..VTX_CLIP_SCAL + 2], [0x40u8, 0x00]);
    wv_assert_eq!(t, bytes[VTX_CLIP_SCRN..VTX_CLIP_SCRN + 2], [0x00u8, 0x10]);

    let decoded = Vertex::decode(&bytes);
    wv_assert_eq!(t, decoded.clip().scal(), ClipFlags::FAR);
    wv_assert_eq!(t, decoded.clip().scrn(), ClipFlags::NX);
}

fn position(t: &mut dyn WvTester) {
    let vtx = sample_vertex();
    let pos = vtx.position();
    wv_assert_eq!(t, pos.x, 0x1_1111);
    wv_assert_eq!(t, pos.y, -0x2_0000 + 0x2222);

    let mut other = Vertex::default();
    other.set_position(&pos);
    wv_assert_eq!(t, other.pos_int, vtx.pos_int);
    wv_assert_eq!(t, other.pos_frac, vtx.pos_frac);
}

fn classify_writes_clip_only(t: &mut dyn WvTester) {
    let one = 0x1_0000;
    let classifier = ClipClassifier::new(UcodeConfig::new(false, false), one, one);
    let mut vtx = sample_vertex();
    let before = vtx.encode();

    let scal = ClipCoords::new(0, 0, one + 1, one);
    let scrn = ClipCoords::new(-one - 1, 0, 0, one);
    let word = classifier.classify_vertex(&mut vtx, &scal, &scrn);
    wv_assert_eq!(t, word.raw(), 0x4000_0010);
    wv_assert_eq!(t, vtx.clip(), word);

    let after = vtx.encode();
    wv_assert_eq!(t, after[..VTX_CLIP], before[..VTX_CLIP]);
    wv_assert_eq!(t, after[VTX_CLIP..], [0x40u8, 0x00, 0x00, 0x10]);
}

fn vertex_buffer(t: &mut dyn WvTester) {
    let mut buf = vec![0u8; 3 * VTX_SIZE];
    wv_assert_ok!(t, sample_vertex().write(&mut buf, 2));
    wv_assert_eq!(t, buf[2 * VTX_SIZE..], sample_vertex().encode());
    wv_assert_eq!(t, wv_assert_ok!(t, Vertex::read(&buf, 2)), sample_vertex());
    wv_assert_eq!(t, wv_assert_ok!(t, Vertex::read(&buf, 0)), Vertex::default());

    wv_assert_err!(t, Vertex::read(&buf, 3), Code::InvArgs);
    wv_assert_err!(t, Vertex::read(&buf, usize::MAX), Code::InvArgs);
    wv_assert_err!(t, sample_vertex().write(&mut buf, 3), Code::InvArgs);
    wv_assert_err!(t, Vertex::read(&buf[..VTX_SIZE - 1], 0), Code::InvArgs);
}

fn input_vertex(t: &mut dyn WvTester) {
    let bytes: [u8; INPUT_VTX_SIZE] = [
        0x00, 0x0A, 0xFF, 0xF6, 0x00, 0x64, 0x00, 0x00, 0x02, 0x00, 0x04, 0x00, 0xFF, 0x80, 0x40,
        0x01,
    ];
    let vtx = InputVtx::decode(&bytes);
    wv_assert_eq!(t, vtx.ob, [10, -10, 100]);
    wv_assert_eq!(t, vtx.flag, 0);
    wv_assert_eq!(t, vtx.tc, [0x200, 0x400]);
    wv_assert_eq!(t, vtx.cn, [0xFF, 0x80, 0x40, 0x01]);
    wv_assert_eq!(t, vtx.encode(), bytes);
}
