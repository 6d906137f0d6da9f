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

use pest::iterators::Pair;

use crate::ast::{AssemblyLine, Operand, RelocFn, Statement};
use crate::errors::{AssemblyError, Origin};
use crate::parser::Rule;
use crate::parser::numbers::{LiteralError, parse_int_literal};

/// Lowers a matched `Rule::line` pair into an [`AssemblyLine`].
pub(super) fn build_line(pair: Pair<Rule>, origin: &Origin) -> Result<AssemblyLine, AssemblyError> {
    let mut line = AssemblyLine {
        origin: origin.clone(),
        labels: Vec::new(),
        statement: None,
    };

    for item in pair.into_inner() {
        match item.as_rule() {
            Rule::label_def => {
                let name = item.into_inner().find(|p| p.as_rule() == Rule::ident);
                match name {
                    Some(name) => line.labels.push(name.as_str().to_string()),
                    None => {
                        return Err(AssemblyError::EmptyLabel {
                            origin: origin.clone(),
                        });
                    }
                }
            }
            Rule::statement => line.statement = Some(build_statement(item, origin)?),
            _ => {}
        }
    }

    Ok(line)
}

fn build_statement(pair: Pair<Rule>, origin: &Origin) -> Result<Statement, AssemblyError> {
    let mut mnemonic = String::new();
    let mut operands = Vec::new();

    for item in pair.into_inner() {
        match item.as_rule() {
            Rule::mnemonic => mnemonic = item.as_str().to_uppercase(),
            Rule::operand => {
                let inner = item.into_inner().next().unwrap();
                operands.push(build_operand(inner, origin)?);
            }
            _ => {}
        }
    }

    Ok(Statement { mnemonic, operands })
}

fn build_operand(pair: Pair<Rule>, origin: &Origin) -> Result<Operand, AssemblyError> {
    match pair.as_rule() {
        Rule::symbol => Ok(Operand::Symbol(pair.as_str().to_string())),
        Rule::number => build_number(pair.as_str(), origin),
        Rule::reloc => {
            let mut inner = pair.into_inner();
            let func = match inner.next().unwrap().as_str().to_lowercase().as_str() {
                "hi" => RelocFn::Hi,
                _ => RelocFn::Lo,
            };
            let name = inner.next().unwrap().as_str().to_string();
            Ok(Operand::Reloc(func, name))
        }
        Rule::mem => {
            let mut offset = None;
            let mut base = String::new();
            for item in pair.into_inner() {
                if item.as_rule() == Rule::ident {
                    base = item.as_str().to_string();
                } else {
                    offset = Some(Box::new(build_operand(item, origin)?));
                }
            }
            Ok(Operand::Mem { offset, base })
        }
        _ => unreachable!("unexpected operand rule {:?}", pair.as_rule()),
    }
}

fn build_number(token: &str, origin: &Origin) -> Result<Operand, AssemblyError> {
    match parse_int_literal(token) {
        Ok(value) => Ok(Operand::Number(value)),
        Err(LiteralError::OutOfRange) => Err(AssemblyError::OutOfRange {
            origin: origin.clone(),
            token: token.to_string(),
        }),
        Err(LiteralError::Invalid) => Err(AssemblyError::InvalidLiteral {
            origin: origin.clone(),
            token: token.to_string(),
        }),
    }
}
