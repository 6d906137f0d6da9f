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

mod formats;
mod operands;

use crate::assembler::label_table::LabelTable;
use crate::assembler::macro_table::MacroTable;
use crate::ast::Instruction;
use crate::errors::AssemblyError;
use formats::*;
use operands::*;

const ECALL_WORD: u32 = 0x0000_0073;
const MRET_WORD: u32 = 0x3020_0073;

/// Translates a single instruction into its 32-bit word during pass 2.
pub(super) fn encode_instruction(
    instruction: &Instruction,
    labels: &LabelTable,
    macros: &MacroTable,
) -> Result<u32, AssemblyError> {
    let origin = &instruction.origin;
    let statement = &instruction.statement;

    match statement.mnemonic.as_str() {
        "NOP" => {
            expect_operands(instruction, 0)?;
            Ok(super::NOP_WORD)
        }

        // --------- integer register-immediate ---------
        "ADDI" => {
            expect_operands(instruction, 3)?;
            let rd = register(&statement.operands[0], origin)?;
            let rs1 = register(&statement.operands[1], origin)?;
            let imm = immediate(&statement.operands[2], macros, labels, origin)?;
            i_type(0x13, rd, 0b000, rs1, imm, origin)
        }

        // --------- integer register-register ---------
        "ADD" | "SUB" | "AND" | "OR" | "XOR" | "SLL" | "SRL" => {
            expect_operands(instruction, 3)?;
            let rd = register(&statement.operands[0], origin)?;
            let rs1 = register(&statement.operands[1], origin)?;
            let rs2 = register(&statement.operands[2], origin)?;
            let (funct3, funct7) = match statement.mnemonic.as_str() {
                "ADD" => (0b000, 0b0000000),
                "SUB" => (0b000, 0b0100000),
                "AND" => (0b111, 0b0000000),
                "OR" => (0b110, 0b0000000),
                "XOR" => (0b100, 0b0000000),
                "SLL" => (0b001, 0b0000000),
                _ => (0b101, 0b0000000), // SRL
            };
            Ok(r_type(0x33, rd, funct3, rs1, rs2, funct7))
        }

        // --------- upper-immediate ---------
        "LUI" | "AUIPC" => {
            expect_operands(instruction, 2)?;
            let rd = register(&statement.operands[0], origin)?;
            let imm = immediate(&statement.operands[1], macros, labels, origin)?;
            let opcode = if statement.mnemonic == "LUI" { 0x37 } else { 0x17 };
            u_type(opcode, rd, imm, origin)
        }

        // --------- loads and stores ---------
        "LW" => {
            expect_operands(instruction, 2)?;
            let rd = register(&statement.operands[0], origin)?;
            let (imm, base) = offset_operand(&statement.operands[1], macros, labels, origin)?;
            i_type(0x03, rd, 0b010, base, imm, origin)
        }
        "SW" => {
            expect_operands(instruction, 2)?;
            let rs2 = register(&statement.operands[0], origin)?;
            let (imm, base) = offset_operand(&statement.operands[1], macros, labels, origin)?;
            s_type(rs2, base, imm, 0b010, origin)
        }

        // --------- conditional branches ---------
        "BEQ" | "BNE" | "BLT" | "BGE" | "BLTU" | "BGEU" => {
            expect_operands(instruction, 3)?;
            let rs1 = register(&statement.operands[0], origin)?;
            let rs2 = register(&statement.operands[1], origin)?;
            let offset = branch_target(
                &statement.operands[2],
                instruction.pc,
                macros,
                labels,
                origin,
            )?;
            let funct3 = match statement.mnemonic.as_str() {
                "BEQ" => 0b000,
                "BNE" => 0b001,
                "BLT" => 0b100,
                "BGE" => 0b101,
                "BLTU" => 0b110,
                _ => 0b111, // BGEU
            };
            b_type(rs1, rs2, offset, funct3, origin)
        }

        // --------- jumps ---------
        "JAL" => {
            expect_operands(instruction, 2)?;
            let rd = register(&statement.operands[0], origin)?;
            let offset = branch_target(
                &statement.operands[1],
                instruction.pc,
                macros,
                labels,
                origin,
            )?;
            j_type(rd, offset, origin)
        }
        "JALR" => {
            expect_operands(instruction, 3)?;
            let rd = register(&statement.operands[0], origin)?;
            let rs1 = register(&statement.operands[1], origin)?;
            let imm = immediate(&statement.operands[2], macros, labels, origin)?;
            i_type(0x67, rd, 0b000, rs1, imm, origin)
        }

        // --------- CSR and system ---------
        "CSRRW" | "CSRRS" | "CSRRC" => {
            expect_operands(instruction, 3)?;
            let rd = register(&statement.operands[0], origin)?;
            let index = csr(&statement.operands[1], macros, origin)?;
            let rs1 = register(&statement.operands[2], origin)?;
            let funct3 = match statement.mnemonic.as_str() {
                "CSRRW" => 0b001,
                "CSRRS" => 0b010,
                _ => 0b011, // CSRRC
            };
            system(rd, rs1, index, funct3, origin)
        }
        "ECALL" => {
            expect_operands(instruction, 0)?;
            Ok(ECALL_WORD)
        }
        "MRET" => {
            expect_operands(instruction, 0)?;
            Ok(MRET_WORD)
        }

        _ => Err(AssemblyError::UnknownOpcode {
            origin: origin.clone(),
            mnemonic: statement.mnemonic.clone(),
        }),
    }
}

// ------------- unit tests -------------
