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

use std::collections::HashMap;

use crate::errors::{AssemblyError, Origin};

// The label table stores label names and their assigned program counters.
// Built by the first pass, read-only during the second. Names are
// case-sensitive.
pub type LabelTable = HashMap<String, u32>;

pub fn get_label(table: &LabelTable, name: &str, origin: &Origin) -> Result<u32, AssemblyError> {
    table
        .get(name)
        .copied()
        .ok_or_else(|| AssemblyError::UnknownLabel {
            origin: origin.clone(),
            name: name.to_string(),
        })
}

pub fn insert_label(
    table: &mut LabelTable,
    name: &str,
    pc: u32,
    origin: &Origin,
) -> Result<(), AssemblyError> {
    if table.contains_key(name) {
        return Err(AssemblyError::DuplicateLabel {
            origin: origin.clone(),
            name: name.to_string(),
        });
    }
    table.insert(name.to_string(), pc);
    Ok(())
}
