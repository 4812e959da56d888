// Copyright 2024 Saptak Santra
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Error types

use std::fmt;

/// Preloader error type
#[derive(Debug, Clone, PartialEq)]
pub enum PreloadError {
    /// Extension (or kind) not present in any resource table.
    /// Carries the raw extension string that failed classification.
    UnknownResourceType(String),

    /// A backend required for this kind was never installed
    MissingCollaborator(&'static str),

    /// A backend reported a failure for one item
    ItemLoad { path: String, reason: String },

    /// IO error (file operations, etc.)
    Io(String),

    /// Resource list or config could not be parsed
    Deserialization(String),

    /// Invalid configuration value
    Config(String),
}

impl fmt::Display for PreloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreloadError::UnknownResourceType(ext) => {
                write!(f, "Unknown filename extension: {ext:?}")
            }
            PreloadError::MissingCollaborator(name) => {
                write!(f, "Can not find {name}, install it before loading this resource")
            }
            PreloadError::ItemLoad { path, reason } => {
                write!(f, "Failed loading resource {path}: {reason}")
            }
            PreloadError::Io(msg) => write!(f, "IO error: {msg}"),
            PreloadError::Deserialization(msg) => write!(f, "Deserialization error: {msg}"),
            PreloadError::Config(msg) => write!(f, "Config error: {msg}"),
        }
    }
}

impl std::error::Error for PreloadError {}

impl From<std::io::Error> for PreloadError {
    fn from(err: std::io::Error) -> Self {
        PreloadError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for PreloadError {
    fn from(err: serde_json::Error) -> Self {
        PreloadError::Deserialization(err.to_string())
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, PreloadError>;
