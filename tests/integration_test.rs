/*
Copyright 2025 Connor Nolan

Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.
*/

use rvasm::errors::AssemblyError;
use rvasm::file_reader::{AsmFileReader, MockFileReader};
use rvasm::{BuildConfig, assemble, build};
use std::fs;
use std::path::Path;

fn assemble_source(source: &str) -> anyhow::Result<Vec<u32>> {
    let mut reader = MockFileReader::default();
    reader.add_file("test.asm", source);
    assemble(Path::new("test.asm"), &reader)
}

fn first_word(source: &str) -> u32 {
    assemble_source(source).unwrap()[0]
}

fn assemble_error(source: &str) -> AssemblyError {
    assemble_source(source)
        .unwrap_err()
        .downcast::<AssemblyError>()
        .unwrap()
}

#[test]
fn test_single_instruction_words() {
    assert_eq!(first_word("NOP\n"), 0x00000013);
    assert_eq!(first_word("ADDI x1, x0, 1\n"), 0x00100093);
    assert_eq!(first_word("ADD x3, x1, x2\n"), 0x002081b3);
    assert_eq!(first_word("LUI x5, 0x12345\n"), 0x123452b7);
    assert_eq!(first_word("LW x10, 8(x2)\n"), 0x00812503);
    assert_eq!(first_word("loop: BEQ x0, x0, loop\n"), 0x00000063);
    assert_eq!(first_word("ECALL\n"), 0x00000073);
}

#[test]
fn test_backward_jump() {
    let words = assemble_source("start:  ADDI x1, x0, 3\n        JAL  x0, start\n").unwrap();
    assert_eq!(words.len(), 2);
    assert_eq!(words[1], 0xffdff06f);
}

#[test]
fn test_include_and_equ_round_trip() {
    let mut reader = MockFileReader::default();
    reader.add_file("prog.asm", ".include \"defs.inc\"\nADDI x5, x0, THRESHOLD\n");
    reader.add_file("defs.inc", ".equ THRESHOLD, 0x20\n");
    let words = assemble(Path::new("prog.asm"), &reader).unwrap();
    assert_eq!(words[0], 0x02000293);
}

#[test]
fn test_include_resolves_relative_to_including_file() {
    let mut reader = MockFileReader::default();
    reader.add_file("src/prog.asm", ".include \"inc/defs.inc\"\nADDI x1, x0, ONE\n");
    reader.add_file("src/inc/defs.inc", ".include \"more.inc\"\n.equ ONE, 1\n");
    reader.add_file("src/inc/more.inc", "NOP\n");
    let words = assemble(Path::new("src/prog.asm"), &reader).unwrap();
    assert_eq!(words, vec![0x00000013, 0x00100093]);
}

#[test]
fn test_label_on_same_line_and_line_before() {
    let same = assemble_source("target: ADDI x1, x0, 0\nJAL x0, target\n").unwrap();
    let before = assemble_source("target:\nADDI x1, x0, 0\nJAL x0, target\n").unwrap();
    assert_eq!(same[1], before[1]);
}

#[test]
fn test_branch_to_one_past_end_label() {
    let words = assemble_source("BEQ x0, x0, done\nNOP\ndone:\n").unwrap();
    // offset +8 from pc 0
    assert_eq!(words[0], 0x00000463);
}

#[test]
fn test_hi_lo_reconstruct_label_address() {
    let words = assemble_source(
        "LUI x1, %hi(buf)\nADDI x1, x1, %lo(buf)\nNOP\nbuf: NOP\n",
    )
    .unwrap();
    assert_eq!(words[0], 0x000000b7);
    assert_eq!(words[1], 0x00c08093);
}

#[test]
fn test_equ_chain_and_case_insensitivity() {
    let words = assemble_source(
        ".equ BASE, 0x100\n.equ alias, base\nADDI x1, x0, ALIAS\n",
    )
    .unwrap();
    assert_eq!(words[0], 0x10000093);
}

#[test]
fn test_duplicate_label() {
    assert!(matches!(
        assemble_error("a: NOP\na: NOP\n"),
        AssemblyError::DuplicateLabel { .. }
    ));
}

#[test]
fn test_unknown_label() {
    assert!(matches!(
        assemble_error("JAL x0, nowhere\n"),
        AssemblyError::UnknownLabel { .. }
    ));
}

#[test]
fn test_unknown_opcode() {
    assert!(matches!(
        assemble_error("FENCE\n"),
        AssemblyError::UnknownOpcode { .. }
    ));
}

#[test]
fn test_error_carries_origin_of_included_file() {
    let mut reader = MockFileReader::default();
    reader.add_file("prog.asm", "NOP\n.include \"bad.inc\"\n");
    reader.add_file("bad.inc", "NOP\nADDI x1, x0, 999999999999\n");
    let err = assemble(Path::new("prog.asm"), &reader)
        .unwrap_err()
        .downcast::<AssemblyError>()
        .unwrap();
    match err {
        AssemblyError::OutOfRange { origin, .. } => {
            assert_eq!(origin.file, Path::new("bad.inc"));
            assert_eq!(origin.line, 2);
        }
        other => panic!("unexpected error {:?}", other),
    }
}

#[test]
fn test_build_writes_padded_images() {
    let dir = tempfile::tempdir().unwrap();
    let asm_path = dir.path().join("prog.asm");
    fs::write(&asm_path, "NOP\nADDI x1, x0, 1\n").unwrap();
    let data_path = dir.path().join("data.txt");
    fs::write(&data_path, "1 2 3 # comment\n0xFFFFFFFF\n").unwrap();

    let config = BuildConfig {
        asm_path,
        data_path: Some(data_path),
        program_out: dir.path().join("out/program.hex"),
        data_out: dir.path().join("out/data.hex"),
        imem_depth: 8,
        dmem_depth: 8,
    };
    build(&config, &AsmFileReader).unwrap();

    let program = fs::read_to_string(&config.program_out).unwrap();
    assert!(program.ends_with('\n'));
    let lines: Vec<&str> = program.lines().collect();
    assert_eq!(lines.len(), 8);
    assert_eq!(lines[0], "00000013");
    assert_eq!(lines[1], "00100093");
    assert_eq!(lines[2], "00000013"); // NOP fill
    assert!(lines.iter().all(|l| l.len() == 8));

    let data = fs::read_to_string(&config.data_out).unwrap();
    let lines: Vec<&str> = data.lines().collect();
    assert_eq!(lines.len(), 8);
    assert_eq!(lines[0], "00000001");
    assert_eq!(lines[3], "ffffffff");
    assert_eq!(lines[4], "00000000"); // zero fill
}

#[test]
fn test_build_without_data_file_zero_fills() {
    let dir = tempfile::tempdir().unwrap();
    let asm_path = dir.path().join("prog.asm");
    fs::write(&asm_path, "NOP\n").unwrap();

    let config = BuildConfig {
        asm_path,
        data_path: None,
        program_out: dir.path().join("program.hex"),
        data_out: dir.path().join("data.hex"),
        imem_depth: 4,
        dmem_depth: 4,
    };
    build(&config, &AsmFileReader).unwrap();

    let data = fs::read_to_string(&config.data_out).unwrap();
    assert_eq!(data, "00000000\n00000000\n00000000\n00000000\n");
}

#[test]
fn test_build_is_deterministic() {
    let dir = tempfile::tempdir().unwrap();
    let asm_path = dir.path().join("prog.asm");
    fs::write(&asm_path, "start: ADDI x1, x0, 3\nJAL x0, start\n").unwrap();

    let config = BuildConfig {
        asm_path,
        data_path: None,
        program_out: dir.path().join("program.hex"),
        data_out: dir.path().join("data.hex"),
        imem_depth: 16,
        dmem_depth: 16,
    };
    build(&config, &AsmFileReader).unwrap();
    let first = fs::read(&config.program_out).unwrap();
    build(&config, &AsmFileReader).unwrap();
    let second = fs::read(&config.program_out).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_program_capacity_exceeded() {
    let dir = tempfile::tempdir().unwrap();
    let asm_path = dir.path().join("prog.asm");
    fs::write(&asm_path, "NOP\nNOP\nNOP\n").unwrap();

    let config = BuildConfig {
        asm_path,
        data_path: None,
        program_out: dir.path().join("program.hex"),
        data_out: dir.path().join("data.hex"),
        imem_depth: 2,
        dmem_depth: 2,
    };
    let err = build(&config, &AsmFileReader)
        .unwrap_err()
        .downcast::<AssemblyError>()
        .unwrap();
    assert!(matches!(err, AssemblyError::CapacityExceeded { .. }));
}

#[test]
fn test_data_capacity_exceeded() {
    let dir = tempfile::tempdir().unwrap();
    let asm_path = dir.path().join("prog.asm");
    fs::write(&asm_path, "NOP\n").unwrap();
    let data_path = dir.path().join("data.txt");
    fs::write(&data_path, "1 2 3 4 5\n").unwrap();

    let config = BuildConfig {
        asm_path,
        data_path: Some(data_path),
        program_out: dir.path().join("program.hex"),
        data_out: dir.path().join("data.hex"),
        imem_depth: 4,
        dmem_depth: 4,
    };
    let err = build(&config, &AsmFileReader)
        .unwrap_err()
        .downcast::<AssemblyError>()
        .unwrap();
    assert!(matches!(err, AssemblyError::CapacityExceeded { .. }));
}

#[test]
fn test_zero_depth_is_rejected() {
    let config = BuildConfig {
        asm_path: "prog.asm".into(),
        data_path: None,
        program_out: "program.hex".into(),
        data_out: "data.hex".into(),
        imem_depth: 0,
        dmem_depth: 4,
    };
    assert!(build(&config, &AsmFileReader).is_err());
}
