/********************************************************************************
 * Copyright (c) 2026 Contributors to the Eclipse Foundation
 *
 * See the NOTICE file(s) distributed with this work for additional
 * information regarding copyright ownership.
 *
 * This program and the accompanying materials are made available under the
 * terms of the Apache License Version 2.0 which is available at
 * https://www.apache.org/licenses/LICENSE-2.0
 *
 * SPDX-License-Identifier: Apache-2.0
 ********************************************************************************/

//! Error surface for registration and dispatch.
//!
//! Registration failures (`InvalidSubjectError`, `InvalidPayloadError`) are
//! synchronous so registering code can fail fast at startup. Handler failures
//! (`HandlerExecutionError`) surface from `handle` carrying the original
//! error unmodified; matching a subject that satisfies nothing is never an
//! error.

use crate::context::InvocationContext;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Why a pattern failed registration-time validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum InvalidSubjectReason {
    EmptyPattern,
    EmptySegment,
    MisplacedMultiWildcard,
}

impl InvalidSubjectReason {
    fn as_str(self) -> &'static str {
        match self {
            InvalidSubjectReason::EmptyPattern => "pattern is empty",
            InvalidSubjectReason::EmptySegment => "pattern contains an empty segment",
            InvalidSubjectReason::MisplacedMultiWildcard => {
                "multi-level wildcard is only legal as the final token"
            }
        }
    }
}

/// Malformed pattern presented to `add`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InvalidSubjectError {
    pattern: String,
    reason: InvalidSubjectReason,
}

impl InvalidSubjectError {
    pub(crate) fn new(pattern: &str, reason: InvalidSubjectReason) -> Self {
        Self {
            pattern: pattern.to_string(),
            reason,
        }
    }

    /// The offending pattern as the caller supplied it.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn reason(&self) -> InvalidSubjectReason {
        self.reason
    }
}

impl Display for InvalidSubjectError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid pattern {:?}: {}",
            self.pattern,
            self.reason.as_str()
        )
    }
}

impl Error for InvalidSubjectError {}

/// Malformed registration shape presented to `add`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum InvalidPayloadError {
    /// The registration carried no handler groups at all.
    EmptyRegistration,
    /// A handler group carried no handlers.
    EmptyHandlerGroup,
}

impl Display for InvalidPayloadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidPayloadError::EmptyRegistration => {
                write!(f, "registration carries no handler groups")
            }
            InvalidPayloadError::EmptyHandlerGroup => {
                write!(f, "handler group carries no handlers")
            }
        }
    }
}

impl Error for InvalidPayloadError {}

/// Failures for handler-group registration.
#[derive(Debug)]
pub enum AddError {
    InvalidSubject(InvalidSubjectError),
    InvalidPayload(InvalidPayloadError),
}

impl Display for AddError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            AddError::InvalidSubject(err) => write!(f, "{err}"),
            AddError::InvalidPayload(err) => write!(f, "{err}"),
        }
    }
}

impl Error for AddError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            AddError::InvalidSubject(err) => Some(err),
            AddError::InvalidPayload(err) => Some(err),
        }
    }
}

impl From<InvalidSubjectError> for AddError {
    fn from(err: InvalidSubjectError) -> Self {
        AddError::InvalidSubject(err)
    }
}

impl From<InvalidPayloadError> for AddError {
    fn from(err: InvalidPayloadError) -> Self {
        AddError::InvalidPayload(err)
    }
}

/// A caller-supplied handler failed during dispatch.
///
/// The original error is carried unmodified as the source. The invocation
/// context as of just before the failing handler ran is retained for callers
/// that inspect partial state; mutations applied by earlier handlers in the
/// chain are neither rolled back nor suppressed.
#[derive(Debug)]
pub struct HandlerExecutionError {
    source: Box<dyn Error + Send + Sync>,
    partial_context: Option<InvocationContext>,
}

impl HandlerExecutionError {
    pub fn new(source: impl Into<Box<dyn Error + Send + Sync>>) -> Self {
        Self {
            source: source.into(),
            partial_context: None,
        }
    }

    /// Context accumulated by earlier handlers in the failed chain, when
    /// known.
    pub fn partial_context(&self) -> Option<&InvocationContext> {
        self.partial_context.as_ref()
    }

    /// Recovers the original handler error.
    pub fn into_source(self) -> Box<dyn Error + Send + Sync> {
        self.source
    }

    /// Attaches partial state once; the innermost chain frame wins.
    pub(crate) fn with_partial_context(mut self, context: InvocationContext) -> Self {
        self.partial_context.get_or_insert(context);
        self
    }
}

impl Display for HandlerExecutionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "handler execution failed: {}", self.source)
    }
}

impl Error for HandlerExecutionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(self.source.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::{
        AddError, HandlerExecutionError, InvalidPayloadError, InvalidSubjectError,
        InvalidSubjectReason,
    };
    use crate::context::InvocationContext;
    use std::error::Error;

    #[test]
    fn invalid_subject_display_names_pattern_and_reason() {
        let error = InvalidSubjectError::new("a.>.b", InvalidSubjectReason::MisplacedMultiWildcard);

        assert_eq!(
            error.to_string(),
            "invalid pattern \"a.>.b\": multi-level wildcard is only legal as the final token"
        );
        assert_eq!(error.pattern(), "a.>.b");
    }

    #[test]
    fn add_error_exposes_display_and_source_for_both_kinds() {
        let subject: AddError =
            InvalidSubjectError::new("", InvalidSubjectReason::EmptyPattern).into();
        let payload: AddError = InvalidPayloadError::EmptyHandlerGroup.into();

        assert!(subject.to_string().contains("pattern is empty"));
        assert!(subject.source().is_some());
        assert_eq!(payload.to_string(), "handler group carries no handlers");
        assert!(payload.source().is_some());
    }

    #[test]
    fn handler_execution_error_preserves_source_and_attaches_context_once() {
        let mut first = InvocationContext::new();
        first.insert("step", "one");
        let mut second = InvocationContext::new();
        second.insert("step", "two");

        let error = HandlerExecutionError::new("boom")
            .with_partial_context(first)
            .with_partial_context(second);

        assert_eq!(error.to_string(), "handler execution failed: boom");
        let partial = error.partial_context().expect("partial context retained");
        assert_eq!(partial.get("step").and_then(|v| v.as_str()), Some("one"));
        assert_eq!(error.into_source().to_string(), "boom");
    }
}
