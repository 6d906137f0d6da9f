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

mod ast_builder;
pub(crate) mod numbers;

use std::path::{Path, PathBuf};

use pest::Parser;
use pest::error::LineColLocation;
use pest_derive::Parser;

use crate::assembler::macro_table::{self, MacroTable};
use crate::ast::AssemblyLine;
use crate::errors::{AssemblyError, Origin};
use crate::file_reader::FileReader;

// Derive the parser from our grammar file.
#[derive(Parser)]
#[grammar = "parser/grammar.pest"]
pub struct LineParser;

/// Include recursion bound. There is no cycle detection; a header that
/// includes itself runs into this limit instead.
const MAX_INCLUDE_DEPTH: usize = 64;

/// Loads a source tree: expands .include directives depth-first, records
/// .equ constants in definition order, and parses everything else into
/// assembly lines tagged with their origin.
pub fn parse_source_recursive<F: FileReader>(
    path: &Path,
    reader: &F,
    macros: &mut MacroTable,
) -> Result<Vec<AssemblyLine>, AssemblyError> {
    let mut lines = Vec::new();
    expand_file(path, reader, 0, macros, &mut lines)?;
    Ok(lines)
}

fn expand_file<F: FileReader>(
    path: &Path,
    reader: &F,
    depth: usize,
    macros: &mut MacroTable,
    out: &mut Vec<AssemblyLine>,
) -> Result<(), AssemblyError> {
    let text = reader
        .read_to_string(path)
        .map_err(|e| AssemblyError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    let dir = path.parent().unwrap_or_else(|| Path::new("."));

    for (index, raw) in text.lines().enumerate() {
        let origin = Origin::new(path, index + 1);
        let trimmed = strip_comment(raw).trim();
        if trimmed.is_empty() {
            continue;
        }

        // Directives are recognized by lowercased prefix, same as the rest
        // of the toolchain expects.
        let lower = trimmed.to_lowercase();
        if lower.starts_with(".include") {
            let target = include_target(trimmed, &origin)?;
            let target = if target.is_absolute() {
                target
            } else {
                dir.join(target)
            };
            if depth + 1 > MAX_INCLUDE_DEPTH {
                return Err(AssemblyError::IncludeDepthExceeded {
                    origin,
                    limit: MAX_INCLUDE_DEPTH,
                });
            }
            expand_file(&target, reader, depth + 1, macros, out)?;
        } else if lower.starts_with(".equ") {
            define_constant(trimmed, &origin, macros)?;
        } else {
            let line = parse_line(raw, &origin)?;
            if !line.is_empty() {
                out.push(line);
            }
        }
    }

    Ok(())
}

/// Parses a single non-directive source line. Comments are consumed by the
/// grammar, so the raw line goes in untouched.
pub fn parse_line(text: &str, origin: &Origin) -> Result<AssemblyLine, AssemblyError> {
    let mut pairs =
        LineParser::parse(Rule::line, text).map_err(|e| syntax_error(e, origin))?;
    ast_builder::build_line(pairs.next().unwrap(), origin)
}

fn syntax_error(error: pest::error::Error<Rule>, origin: &Origin) -> AssemblyError {
    let column = match error.line_col {
        LineColLocation::Pos((_, column)) => column,
        LineColLocation::Span((_, column), _) => column,
    };
    AssemblyError::Syntax {
        origin: origin.clone(),
        message: format!("column {}: {}", column, error.variant.message()),
    }
}

fn include_target(line: &str, origin: &Origin) -> Result<PathBuf, AssemblyError> {
    let start = line.find('"');
    let end = line.rfind('"');
    match (start, end) {
        (Some(start), Some(end)) if end > start => Ok(PathBuf::from(&line[start + 1..end])),
        _ => Err(AssemblyError::MalformedDirective {
            origin: origin.clone(),
            directive: ".include",
            reason: "expected a quoted path",
        }),
    }
}

fn define_constant(
    line: &str,
    origin: &Origin,
    macros: &mut MacroTable,
) -> Result<(), AssemblyError> {
    let payload = line[".equ".len()..].replace(',', " ");
    let fields: Vec<&str> = payload.split_whitespace().collect();
    if fields.len() < 2 {
        return Err(AssemblyError::MalformedDirective {
            origin: origin.clone(),
            directive: ".equ",
            reason: "expected a name and a value",
        });
    }

    // The value is either a previously defined constant or a literal.
    let value = match macro_table::lookup(macros, fields[1]) {
        Some(value) => value,
        None => match numbers::parse_int_literal(fields[1]) {
            Ok(value) => value,
            Err(numbers::LiteralError::OutOfRange) => {
                return Err(AssemblyError::OutOfRange {
                    origin: origin.clone(),
                    token: fields[1].to_string(),
                });
            }
            Err(numbers::LiteralError::Invalid) => {
                return Err(AssemblyError::InvalidLiteral {
                    origin: origin.clone(),
                    token: fields[1].to_string(),
                });
            }
        },
    };
    macro_table::define(macros, fields[0], value);
    Ok(())
}

/// Textual comment strip; the grammar has no string operands outside
/// .include, which never reaches this point with its quotes intact.
pub(crate) fn strip_comment(line: &str) -> &str {
    let mut end = line.len();
    for sep in ["#", "//"] {
        if let Some(index) = line.find(sep) {
            if index < end {
                end = index;
            }
        }
    }
    &line[..end]
}

// ------------- unit tests -------------
