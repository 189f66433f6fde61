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

mod error;

use log::{Level, Log, Metadata, Record};
use std::env;
use std::fs;
use std::process::exit;
use std::str::FromStr;

use rspif::cfg::{self, UcodeConfig};
use rspif::errors::VerboseError;
use rspif::io::LogFlags;
use rspif::kif::vtx::VTX_SIZE;
use rspif::kif::{ClipClassifier, TaskDesc, TaskFlags, TaskRegion, Vertex};
use rspif::mem::MemMap;
use rspif::util::parse;

use crate::error::Error;

struct Logger {
    level: Level,
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            let level_string = record.level().to_string();
            let target = if !record.target().is_empty() {
                record.target()
            }
            else {
                record.module_path().unwrap_or_default()
            };

            eprintln!("{:<5} [{}] {}", level_string, target, record.args());
        }
    }

    fn flush(&self) {
    }
}

fn usage(prog: &str) -> ! {
    eprintln!("Usage: {} [--non] [--point-lighting] <command>", prog);
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  map                                   print the scratchpad memory map");
    eprintln!("  task <dmem-image> [<capacity>]        decode and validate the task descriptor");
    eprintln!("  clip <vtx-image> <scal> <scrn> [<out>] classify the vertices of a vertex buffer");
    eprintln!();
    eprintln!("Boundaries are 15.16 fixed-point values; append 'i' to give an integer (e.g., 2i).");
    eprintln!("'clip' tests the vertex position in both spaces, so the scaled and the screen half");
    eprintln!("only differ by their boundaries.");
    eprintln!("RSP_LOG selects the interface's log flags, RUST_LOG the level of the tool's log.");
    exit(1)
}

fn print_map(cfg: &UcodeConfig) -> Result<(), Error> {
    let map = MemMap::default();
    println!("DMEM:        {} .. {}", map.dmem_start(), map.dmem_end());
    println!("IMEM:        {} .. {}", map.imem_start(), map.imem_end());
    println!(
        "reserved:    {} .. {} ({:#x} bytes)",
        map.imem_start(),
        map.entry_point(),
        map.reserved_size()
    );
    println!(
        "entry point: {} (virtual {})",
        map.entry_point(),
        map.entry_point_virt()
    );
    println!("OSTask:      {}", map.task_addr());
    println!("ucode text:  {:#x} bytes", map.ucode_capacity());
    println!("vertices:    {} max", map.vertex_capacity(0));
    println!(
        "near clip:   {}",
        if cfg.no_near_clipping { "-w" } else { "-z" }
    );
    match cfg.lighting_positional() {
        Some(bit) => println!("positional lighting: {:#x}", bit),
        None => println!("positional lighting: unsupported"),
    }
    Ok(())
}

fn task(args: &[&String], prog: &str) -> Result<(), Error> {
    let path = match args.first() {
        Some(p) => p.as_str(),
        None => usage(prog),
    };
    let capacity = match args.get(1) {
        Some(c) => parse::size(c)?,
        None => cfg::DMEM_SIZE,
    };

    let image = fs::read(path)?;
    log::info!("read {} bytes from {}", image.len(), path);

    let desc = TaskDesc::read(&image).map_err(|e| {
        VerboseError::new(
            e.code(),
            format!("{} is too small to hold a task descriptor", path),
        )
    })?;
    let off = image.len() - rspif::kif::task::OS_TASK_SIZE;
    rspif::io::log_slice(LogFlags::RspTask, &image[off..], off);

    println!("type:  {:?} ({})", desc.task_type(), desc.raw_type());
    println!("flags: {:?}", desc.flags());
    for r in TaskRegion::ALL {
        let reg = desc.region(r);
        println!("{:<7} {:#010x} : {:#x}", format!("{:?}", r), reg.ptr, reg.size);
    }

    desc.validate(capacity).map_err(|e| {
        VerboseError::new(
            e.code(),
            format!("descriptor does not fit into {:#x} bytes", capacity),
        )
    })?;

    if desc.flags().contains(TaskFlags::LOADABLE) {
        let ucode = desc.region(TaskRegion::UCode);
        MemMap::default()
            .check_ucode(ucode.size as usize)
            .map_err(|e| {
                VerboseError::new(
                    e.code(),
                    format!("microcode of {:#x} bytes does not fit into IMEM", ucode.size),
                )
            })?;
    }
    if desc.is_yielded() {
        log::warn!("task yielded, state is in {:?}", desc.yield_region());
    }

    println!("valid for {:#x} bytes", capacity);
    Ok(())
}

fn clip(args: &[&String], cfg: UcodeConfig, prog: &str) -> Result<(), Error> {
    if args.len() < 3 {
        usage(prog);
    }
    let path = args[0].as_str();
    let scal = parse::fixed(args[1])?;
    let scrn = parse::fixed(args[2])?;

    let mut image = fs::read(path)?;
    if image.len() % VTX_SIZE != 0 {
        log::warn!(
            "{} contains {} trailing bytes",
            path,
            image.len() % VTX_SIZE
        );
    }

    let classifier = ClipClassifier::new(cfg, scal, scrn);
    let count = image.len() / VTX_SIZE;
    let mut clipped = 0;
    for i in 0..count {
        let mut vtx = Vertex::read(&image, i)?;
        // both spaces are derived from the stored position
        let pos = vtx.position();
        let word = classifier.classify_vertex(&mut vtx, &pos, &pos);
        vtx.write(&mut image, i)?;

        let outside = word.is_clipped(&cfg);
        if outside {
            clipped += 1;
        }
        println!(
            "#{:<4} {:?} -> {:?}{}",
            i,
            pos,
            word,
            if outside { " (clipped)" } else { "" }
        );
    }
    log::info!("{} of {} vertices are clipped", clipped, count);

    if let Some(out) = args.get(3) {
        fs::write(out.as_str(), &image)?;
        log::info!("wrote classified vertices to {}", out);
    }
    Ok(())
}

fn main() -> Result<(), Error> {
    let level = Level::from_str(&env::var("RUST_LOG").unwrap_or_else(|_| "error".to_string()))?;
    log::set_boxed_logger(Box::new(Logger { level }))?;
    log::set_max_level(level.to_level_filter());

    rspif::io::init(0, "rspdesc");

    let args: Vec<String> = env::args().collect();
    let prog = args.first().map(|s| s.as_str()).unwrap_or("rspdesc");

    let mut cfg = UcodeConfig::default();
    let mut pos = Vec::new();
    for arg in args.iter().skip(1) {
        match arg.as_str() {
            "--non" => cfg.no_near_clipping = true,
            "--point-lighting" => cfg.point_lighting = true,
            a if a.starts_with("--") => usage(prog),
            _ => pos.push(arg),
        }
    }

    match pos.first().map(|s| s.as_str()) {
        Some("map") => print_map(&cfg),
        Some("task") => task(&pos[1..], prog),
        Some("clip") => clip(&pos[1..], cfg, prog),
        _ => usage(prog),
    }
}
