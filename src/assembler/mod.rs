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

mod encoder;
pub mod label_table;
pub mod macro_table;

use crate::ast::{AssemblyLine, Instruction};
use crate::errors::AssemblyError;
use label_table::LabelTable;
use macro_table::MacroTable;

/// Canonical no-op (ADDI x0, x0, 0); also the program image filler.
pub const NOP_WORD: u32 = 0x0000_0013;

/// Pass 1: assign program counters and collect the label table. The PC
/// advances by four per instruction, so a label after the final instruction
/// lands one past the end of the program.
pub fn collect_labels(
    lines: &[AssemblyLine],
) -> Result<(LabelTable, Vec<Instruction>), AssemblyError> {
    let mut labels = LabelTable::new();
    let mut instructions = Vec::new();
    let mut pc: u32 = 0;

    for line in lines {
        for name in &line.labels {
            label_table::insert_label(&mut labels, name, pc, &line.origin)?;
        }
        if let Some(statement) = &line.statement {
            instructions.push(Instruction {
                statement: statement.clone(),
                origin: line.origin.clone(),
                pc,
            });
            pc += 4;
        }
    }

    Ok((labels, instructions))
}

/// Pass 2: encode every instruction against the read-only tables.
pub fn encode_program(
    instructions: &[Instruction],
    labels: &LabelTable,
    macros: &MacroTable,
) -> Result<Vec<u32>, AssemblyError> {
    instructions
        .iter()
        .map(|instruction| encoder::encode_instruction(instruction, labels, macros))
        .collect()
}

// ------------- unit tests -------------
