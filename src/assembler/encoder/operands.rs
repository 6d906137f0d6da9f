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

use crate::assembler::label_table::{self, LabelTable};
use crate::assembler::macro_table::{self, MacroTable};
use crate::ast::{Instruction, Operand, RelocFn};
use crate::errors::{AssemblyError, Origin};

pub(super) fn expect_operands(
    instruction: &Instruction,
    expected: usize,
) -> Result<(), AssemblyError> {
    let found = instruction.statement.operands.len();
    if found != expected {
        return Err(AssemblyError::Arity {
            origin: instruction.origin.clone(),
            mnemonic: instruction.statement.mnemonic.clone(),
            expected,
            found,
        });
    }
    Ok(())
}

pub(super) fn register(operand: &Operand, origin: &Origin) -> Result<u32, AssemblyError> {
    if let Operand::Symbol(name) = operand {
        if let Some(index) = register_index(name) {
            return Ok(index);
        }
    }
    Err(AssemblyError::UnknownRegister {
        origin: origin.clone(),
        token: operand.to_string(),
    })
}

/// Resolves an immediate operand: macro constants first, then `%hi`/`%lo`
/// of a label, then the literal value itself.
pub(super) fn immediate(
    operand: &Operand,
    macros: &MacroTable,
    labels: &LabelTable,
    origin: &Origin,
) -> Result<i32, AssemblyError> {
    match operand {
        Operand::Symbol(name) => {
            macro_table::lookup(macros, name).ok_or_else(|| AssemblyError::InvalidLiteral {
                origin: origin.clone(),
                token: name.clone(),
            })
        }
        Operand::Reloc(func, name) => {
            let address = label_table::get_label(labels, name, origin)?;
            Ok(match func {
                RelocFn::Hi => (address.wrapping_add(0x800) >> 12) as i32,
                RelocFn::Lo => {
                    let low = (address & 0xFFF) as i32;
                    if low >= 0x800 { low - 0x1000 } else { low }
                }
            })
        }
        Operand::Number(value) => Ok(*value),
        Operand::Mem { .. } => Err(AssemblyError::InvalidLiteral {
            origin: origin.clone(),
            token: operand.to_string(),
        }),
    }
}

/// Resolves a branch or jump target: anything that resolves as an immediate
/// is the literal byte offset, otherwise the token names a label and the
/// offset is PC-relative.
pub(super) fn branch_target(
    operand: &Operand,
    pc: u32,
    macros: &MacroTable,
    labels: &LabelTable,
    origin: &Origin,
) -> Result<i32, AssemblyError> {
    match operand {
        Operand::Symbol(name) => {
            if let Some(value) = macro_table::lookup(macros, name) {
                return Ok(value);
            }
            let address = label_table::get_label(labels, name, origin)?;
            Ok(address.wrapping_sub(pc) as i32)
        }
        _ => immediate(operand, macros, labels, origin),
    }
}

/// Splits an `imm(base)` load/store operand into the resolved offset and
/// the base register index. A missing offset means 0.
pub(super) fn offset_operand(
    operand: &Operand,
    macros: &MacroTable,
    labels: &LabelTable,
    origin: &Origin,
) -> Result<(i32, u32), AssemblyError> {
    match operand {
        Operand::Mem { offset, base } => {
            let imm = match offset {
                Some(offset) => immediate(offset, macros, labels, origin)?,
                None => 0,
            };
            match register_index(base) {
                Some(index) => Ok((imm, index)),
                None => Err(AssemblyError::UnknownRegister {
                    origin: origin.clone(),
                    token: base.clone(),
                }),
            }
        }
        _ => Err(AssemblyError::InvalidOffsetSyntax {
            origin: origin.clone(),
            token: operand.to_string(),
        }),
    }
}

/// Resolves a CSR operand: macro constants, then the named machine-mode
/// CSRs, then a numeric index. The range check happens at encode time.
pub(super) fn csr(
    operand: &Operand,
    macros: &MacroTable,
    origin: &Origin,
) -> Result<i32, AssemblyError> {
    match operand {
        Operand::Symbol(name) => {
            if let Some(value) = macro_table::lookup(macros, name) {
                return Ok(value);
            }
            csr_index(name).ok_or_else(|| AssemblyError::UnknownCsr {
                origin: origin.clone(),
                token: name.clone(),
            })
        }
        Operand::Number(value) => Ok(*value),
        _ => Err(AssemblyError::UnknownCsr {
            origin: origin.clone(),
            token: operand.to_string(),
        }),
    }
}

fn register_index(name: &str) -> Option<u32> {
    let index = match name.to_lowercase().as_str() {
        "x0" | "zero" => 0,
        "x1" | "ra" => 1,
        "x2" | "sp" => 2,
        "x3" | "gp" => 3,
        "x4" | "tp" => 4,
        "x5" | "t0" => 5,
        "x6" | "t1" => 6,
        "x7" | "t2" => 7,
        "x8" | "s0" | "fp" => 8,
        "x9" | "s1" => 9,
        "x10" | "a0" => 10,
        "x11" | "a1" => 11,
        "x12" | "a2" => 12,
        "x13" | "a3" => 13,
        "x14" | "a4" => 14,
        "x15" | "a5" => 15,
        "x16" | "a6" => 16,
        "x17" | "a7" => 17,
        "x18" | "s2" => 18,
        "x19" | "s3" => 19,
        "x20" | "s4" => 20,
        "x21" | "s5" => 21,
        "x22" | "s6" => 22,
        "x23" | "s7" => 23,
        "x24" | "s8" => 24,
        "x25" | "s9" => 25,
        "x26" | "s10" => 26,
        "x27" | "s11" => 27,
        "x28" | "t3" => 28,
        "x29" | "t4" => 29,
        "x30" | "t5" => 30,
        "x31" | "t6" => 31,
        _ => return None,
    };
    Some(index)
}

fn csr_index(name: &str) -> Option<i32> {
    let address = match name.to_uppercase().as_str() {
        "MSTATUS" => 0x300,
        "MIE" => 0x304,
        "MTVEC" => 0x305,
        "MSCRATCH" => 0x340,
        "MEPC" => 0x341,
        "MCAUSE" => 0x342,
        "MIP" => 0x344,
        "MTIME" => 0x701,
        "MTIMECMP" => 0x720,
        "IRQPRIO" => 0xBC0,
        "IRQACK" => 0xBC1,
        _ => return None,
    };
    Some(address)
}

// ------------- unit tests -------------
