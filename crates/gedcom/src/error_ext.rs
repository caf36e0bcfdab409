// Dweve GEDCOM - Genealogical Data Communication Reader
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

//! Context helpers for error propagation.
//!
//! [`GedResultExt`] attaches a description of what the caller was doing to
//! an error on its way up, and converts the errors of the lower layers
//! (I/O, codecs, dates) into [`GedError`].
//!
//! # Examples
//!
//! ```rust
//! use gedcom::{parse, GedResult, GedResultExt};
//!
//! fn load_family(bytes: &[u8]) -> GedResult<usize> {
//!     let doc = parse(bytes).context("while loading the family file")?;
//!     Ok(doc.record_count())
//! }
//!
//! let err = load_family(b"0 HEAD\n2 VERS 5.5.1\n").unwrap_err();
//! assert_eq!(err.line, 2);
//! assert!(err.context.unwrap().starts_with("while loading the family file"));
//! ```

use crate::codec::CodecError;
use crate::date::DateError;
use crate::GedError;
use std::fmt;

/// Extension trait for adding context to results.
pub trait GedResultExt<T> {
    /// The error type for this Result.
    type ErrorType;

    /// Add context to an error.
    ///
    /// Context already on the error is kept after the new context, so a
    /// chain reads from the outermost caller inwards.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use gedcom::{GedError, GedResultExt};
    ///
    /// let result: Result<(), GedError> = Err(GedError::syntax("missing tag", 3));
    /// let err = result.context("in the header").unwrap_err();
    /// assert_eq!(err.context.as_deref(), Some("in the header"));
    /// ```
    fn context<C>(self, context: C) -> Result<T, GedError>
    where
        C: fmt::Display;

    /// Add lazily evaluated context to an error.
    ///
    /// The closure only runs when the result is an error.
    fn with_context<C, F>(self, f: F) -> Result<T, GedError>
    where
        C: fmt::Display,
        F: FnOnce() -> C;

    /// Convert the error with a custom mapping.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use gedcom::{GedError, GedResultExt};
    /// use std::fs;
    ///
    /// fn read_tree(path: &str) -> Result<Vec<u8>, GedError> {
    ///     fs::read(path).map_err_to_ged(|e| GedError::io(format!("cannot read {}: {}", path, e)))
    /// }
    /// ```
    fn map_err_to_ged<F>(self, f: F) -> Result<T, GedError>
    where
        F: FnOnce(Self::ErrorType) -> GedError,
        Self: Sized;
}

impl<T> GedResultExt<T> for Result<T, GedError> {
    type ErrorType = GedError;

    fn context<C>(self, context: C) -> Result<T, GedError>
    where
        C: fmt::Display,
    {
        self.map_err(|e| add_context_to_error(e, context.to_string()))
    }

    fn with_context<C, F>(self, f: F) -> Result<T, GedError>
    where
        C: fmt::Display,
        F: FnOnce() -> C,
    {
        self.map_err(|e| add_context_to_error(e, f().to_string()))
    }

    fn map_err_to_ged<F>(self, _f: F) -> Result<T, GedError>
    where
        F: FnOnce(Self::ErrorType) -> GedError,
    {
        // Already a GedError
        self
    }
}

impl<T> GedResultExt<T> for Result<T, std::io::Error> {
    type ErrorType = std::io::Error;

    fn context<C>(self, context: C) -> Result<T, GedError>
    where
        C: fmt::Display,
    {
        self.map_err(|e| GedError::from(e).with_context(context.to_string()))
    }

    fn with_context<C, F>(self, f: F) -> Result<T, GedError>
    where
        C: fmt::Display,
        F: FnOnce() -> C,
    {
        self.map_err(|e| GedError::from(e).with_context(f().to_string()))
    }

    fn map_err_to_ged<F>(self, f: F) -> Result<T, GedError>
    where
        F: FnOnce(Self::ErrorType) -> GedError,
    {
        self.map_err(f)
    }
}

impl<T> GedResultExt<T> for Result<T, CodecError> {
    type ErrorType = CodecError;

    fn context<C>(self, context: C) -> Result<T, GedError>
    where
        C: fmt::Display,
    {
        self.map_err(|e| GedError::from(e).with_context(context.to_string()))
    }

    fn with_context<C, F>(self, f: F) -> Result<T, GedError>
    where
        C: fmt::Display,
        F: FnOnce() -> C,
    {
        self.map_err(|e| GedError::from(e).with_context(f().to_string()))
    }

    fn map_err_to_ged<F>(self, f: F) -> Result<T, GedError>
    where
        F: FnOnce(Self::ErrorType) -> GedError,
    {
        self.map_err(f)
    }
}

impl<T> GedResultExt<T> for Result<T, DateError> {
    type ErrorType = DateError;

    fn context<C>(self, context: C) -> Result<T, GedError>
    where
        C: fmt::Display,
    {
        self.map_err(|e| GedError::syntax(e.to_string(), 0).with_context(context.to_string()))
    }

    fn with_context<C, F>(self, f: F) -> Result<T, GedError>
    where
        C: fmt::Display,
        F: FnOnce() -> C,
    {
        self.map_err(|e| GedError::syntax(e.to_string(), 0).with_context(f().to_string()))
    }

    fn map_err_to_ged<F>(self, f: F) -> Result<T, GedError>
    where
        F: FnOnce(Self::ErrorType) -> GedError,
    {
        self.map_err(f)
    }
}

/// Prepend `new_context` to the context already on `error`.
fn add_context_to_error(mut error: GedError, new_context: String) -> GedError {
    if new_context.is_empty() {
        return error;
    }

    error.context = Some(match error.context {
        Some(existing) => format!("{}; {}", new_context, existing),
        None => new_context,
    });

    error
}
