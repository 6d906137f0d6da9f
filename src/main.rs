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

use anyhow::Result;
use clap::Parser as clap_parser;
use rvasm::BuildConfig;
use rvasm::build;
use rvasm::file_reader::AsmFileReader;
use std::path::PathBuf;

#[derive(clap_parser)]
#[clap(version = "0.1.0", author = "Connor Nolan")]
struct Opts {
    /// Path to the assembly source file
    #[clap(short, long)]
    asm: PathBuf,
    /// Optional data initializer file
    #[clap(short, long)]
    data: Option<PathBuf>,
    /// Output path for the program hex image
    #[clap(long, default_value = "program.hex")]
    program_out: PathBuf,
    /// Output path for the data hex image
    #[clap(long, default_value = "data.hex")]
    data_out: PathBuf,
    /// Instruction memory depth in words
    #[clap(long, default_value_t = 64)]
    imem: usize,
    /// Data memory depth in words
    #[clap(long, default_value_t = 64)]
    dmem: usize,
}

fn main() -> Result<()> {
    let opts: Opts = Opts::parse();
    let config = BuildConfig {
        asm_path: opts.asm,
        data_path: opts.data,
        program_out: opts.program_out,
        data_out: opts.data_out,
        imem_depth: opts.imem,
        dmem_depth: opts.dmem,
    };

    let reader = AsmFileReader;
    build(&config, &reader)?;

    println!(
        "Generated {} ({} words) and {} ({} words)",
        config.program_out.display(),
        config.imem_depth,
        config.data_out.display(),
        config.dmem_depth
    );

    Ok(())
}
