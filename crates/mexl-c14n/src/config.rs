// Dweve MEXL - Model Expression Language
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Rendering configuration.

/// Configuration for canonical infix output.
///
/// The canonical form puts a space around the loose operators (`+`, the
/// comparisons, `&&`, `||`) and after argument commas, and keeps the tight
/// operators (`*`, `/`, `%`, `^`, prefix signs) unspaced. [`compact`]
/// drops the optional spaces entirely; both forms parse back to the same
/// tree.
///
/// [`compact`]: CanonicalConfig::compact
///
/// # Examples
///
/// ```
/// use mexl_c14n::CanonicalConfig;
///
/// let config = CanonicalConfig::new().with_compact(true);
/// assert!(config.compact);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CanonicalConfig {
    /// Omit all optional whitespace.
    ///
    /// Default: `false`.
    pub compact: bool,
}

impl CanonicalConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle compact output.
    pub fn with_compact(mut self, compact: bool) -> Self {
        self.compact = compact;
        self
    }
}
