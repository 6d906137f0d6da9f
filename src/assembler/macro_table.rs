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

// Symbolic constants from .equ directives, keyed by uppercased name. Grows
// during preprocessing, read-only afterwards.
pub type MacroTable = HashMap<String, i32>;

/// Case-insensitive lookup.
pub fn lookup(table: &MacroTable, name: &str) -> Option<i32> {
    table.get(&name.to_uppercase()).copied()
}

/// Registers a constant; redefinition silently overwrites (last write wins).
pub fn define(table: &mut MacroTable, name: &str, value: i32) {
    table.insert(name.to_uppercase(), value);
}
