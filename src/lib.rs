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

pub mod assembler;
pub mod ast;
pub mod emitter;
pub mod errors;
pub mod file_reader;
pub mod parser;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use assembler::macro_table::MacroTable;
use errors::AssemblyError;
use file_reader::FileReader;

/// Everything a build needs; mirrors the CLI flag set.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    pub asm_path: PathBuf,
    pub data_path: Option<PathBuf>,
    pub program_out: PathBuf,
    pub data_out: PathBuf,
    pub imem_depth: usize,
    pub dmem_depth: usize,
}

/// Assembles a source tree into instruction words, one per instruction.
/// All state lives in this call; nothing is shared between builds.
pub fn assemble<F: FileReader>(source_path: &Path, reader: &F) -> Result<Vec<u32>> {
    let mut macros = MacroTable::new();
    let lines = parser::parse_source_recursive(source_path, reader, &mut macros)
        .context("Failed during preprocessing")?;

    let (labels, instructions) =
        assembler::collect_labels(&lines).context("Failed during label collection")?;

    let words = assembler::encode_program(&instructions, &labels, &macros)
        .context("Failed during encoding")?;

    Ok(words)
}

/// Full build: assemble, check capacities, and emit both hex images. On
/// any failure the outputs are left in an undefined state.
pub fn build<F: FileReader>(config: &BuildConfig, reader: &F) -> Result<()> {
    if config.imem_depth == 0 {
        bail!("instruction memory depth must be positive");
    }
    if config.dmem_depth == 0 {
        bail!("data memory depth must be positive");
    }

    let words = assemble(&config.asm_path, reader)?;
    if words.len() > config.imem_depth {
        return Err(AssemblyError::CapacityExceeded {
            what: "program",
            memory: "imem",
            count: words.len(),
            depth: config.imem_depth,
        }
        .into());
    }
    let program = emitter::pad_image(words, config.imem_depth, assembler::NOP_WORD);
    emitter::write_hex_file(&config.program_out, &program)
        .context("Failed to write program image")?;

    let data = match &config.data_path {
        Some(path) => {
            emitter::parse_data_file(path, reader).context("Failed during data parsing")?
        }
        None => Vec::new(),
    };
    if data.len() > config.dmem_depth {
        return Err(AssemblyError::CapacityExceeded {
            what: "data",
            memory: "dmem",
            count: data.len(),
            depth: config.dmem_depth,
        }
        .into());
    }
    let data = emitter::pad_image(data, config.dmem_depth, 0);
    emitter::write_hex_file(&config.data_out, &data).context("Failed to write data image")?;

    Ok(())
}
