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

use std::fs;
use std::path::Path;

use crate::errors::{AssemblyError, Origin};
use crate::file_reader::FileReader;
use crate::parser::{numbers, strip_comment};

/// Extends a word vector to the configured memory depth. Program images
/// fill with the canonical no-op, data images with zero.
pub fn pad_image(mut words: Vec<u32>, depth: usize, fill: u32) -> Vec<u32> {
    words.resize(depth, fill);
    words
}

/// Writes one lowercase, zero-padded, eight-digit hex word per line.
/// Missing parent directories of the output path are created.
pub fn write_hex_file(path: &Path, words: &[u32]) -> Result<(), AssemblyError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| AssemblyError::Io {
                path: parent.to_path_buf(),
                message: e.to_string(),
            })?;
        }
    }

    let mut contents = String::with_capacity(words.len() * 9);
    for word in words {
        contents.push_str(&format!("{:08x}\n", word));
    }
    fs::write(path, contents).map_err(|e| AssemblyError::Io {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Parses the optional data-initializer file: whitespace-separated integer
/// literals with the same comment rules as assembly source, reinterpreted
/// to their unsigned 32-bit representation.
pub fn parse_data_file<F: FileReader>(path: &Path, reader: &F) -> Result<Vec<u32>, AssemblyError> {
    let text = reader
        .read_to_string(path)
        .map_err(|e| AssemblyError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let mut values = Vec::new();
    for (index, raw) in text.lines().enumerate() {
        for token in strip_comment(raw).split_whitespace() {
            match numbers::parse_int_literal(token) {
                Ok(value) => values.push(value as u32),
                Err(numbers::LiteralError::OutOfRange) => {
                    return Err(AssemblyError::OutOfRange {
                        origin: Origin::new(path, index + 1),
                        token: token.to_string(),
                    });
                }
                Err(numbers::LiteralError::Invalid) => {
                    return Err(AssemblyError::InvalidLiteral {
                        origin: Origin::new(path, index + 1),
                        token: token.to_string(),
                    });
                }
            }
        }
    }
    Ok(values)
}

// ------------- unit tests -------------
