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

//! Handler trait, handler groups, and the explicit continuation chain.

use crate::context::InvocationContext;
use crate::error::{HandlerExecutionError, InvalidPayloadError};
use crate::message::Message;
use async_trait::async_trait;
use futures::future::BoxFuture;
use serde_json::{Map, Value};
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

/// Caller metadata attached to a handler group at registration, visible to
/// custom sort comparators.
pub type Metadata = Map<String, Value>;

/// One handler in a dispatch chain.
///
/// A handler advances the chain by awaiting [`Next::run`] (or
/// [`Next::run_with`]) and returning its result. Returning without calling
/// `next` short-circuits the chain: the context value the handler returns is
/// the final result, so returning the handed-in context unchanged stops the
/// chain without touching state. Errors are never caught by the router.
#[async_trait]
pub trait Handler: Send + Sync {
    async fn call(
        &self,
        message: &Message,
        context: InvocationContext,
        next: Next<'_>,
    ) -> Result<InvocationContext, HandlerExecutionError>;
}

/// The bound continuation: an explicit index over the pre-sorted chain.
///
/// Consumed on use, so a handler advances at most once per invocation.
pub struct Next<'a> {
    chain: &'a [Arc<dyn Handler>],
    index: usize,
    message: &'a Message,
}

impl Next<'_> {
    /// Advances to the next handler with the context unchanged.
    pub async fn run(
        self,
        context: InvocationContext,
    ) -> Result<InvocationContext, HandlerExecutionError> {
        drive(self.chain, self.index, self.message, context).await
    }

    /// Merges `data` into the context, then advances.
    ///
    /// Merge rules are those of [`InvocationContext::merge`]: objects
    /// shallow-merge, `Null` is a no-op, anything else lands under the
    /// reserved last-value key.
    pub async fn run_with(
        self,
        mut context: InvocationContext,
        data: Value,
    ) -> Result<InvocationContext, HandlerExecutionError> {
        context.merge(data);
        drive(self.chain, self.index, self.message, context).await
    }
}

/// Drives handler `index`, binding the advance operation for `index + 1`.
///
/// Sequential by construction: handler N+1 starts only after handler N's
/// continuation resolves, including any awaited work inside it. An exhausted
/// chain returns the context up the call stack. On failure the context as of
/// just before the failing handler is attached to the error; the innermost
/// frame wins.
pub(crate) fn drive<'a>(
    chain: &'a [Arc<dyn Handler>],
    index: usize,
    message: &'a Message,
    context: InvocationContext,
) -> BoxFuture<'a, Result<InvocationContext, HandlerExecutionError>> {
    Box::pin(async move {
        let Some(handler) = chain.get(index) else {
            return Ok(context);
        };
        let entering = context.clone();
        let next = Next {
            chain,
            index: index + 1,
            message,
        };
        handler
            .call(message, context, next)
            .await
            .map_err(|err| err.with_partial_context(entering))
    })
}

/// Adapts an async closure into a shareable [`Handler`].
pub fn handler_fn<F>(f: F) -> Arc<dyn Handler>
where
    F: for<'a> Fn(
            &'a Message,
            InvocationContext,
            Next<'a>,
        ) -> BoxFuture<'a, Result<InvocationContext, HandlerExecutionError>>
        + Send
        + Sync
        + 'static,
{
    Arc::new(FnHandler { f })
}

struct FnHandler<F> {
    f: F,
}

#[async_trait]
impl<F> Handler for FnHandler<F>
where
    F: for<'a> Fn(
            &'a Message,
            InvocationContext,
            Next<'a>,
        ) -> BoxFuture<'a, Result<InvocationContext, HandlerExecutionError>>
        + Send
        + Sync
        + 'static,
{
    async fn call(
        &self,
        message: &Message,
        context: InvocationContext,
        next: Next<'_>,
    ) -> Result<InvocationContext, HandlerExecutionError> {
        (self.f)(message, context, next).await
    }
}

/// One or more handlers registered together under one pattern.
///
/// Carries the bookkeeping the sort strategies rank by: the router-global
/// insertion sequence number, the literal pattern string, its precomputed
/// specificity score, and the caller's metadata map.
#[derive(Clone)]
pub struct HandlerGroup {
    handlers: Vec<Arc<dyn Handler>>,
    pattern: Arc<str>,
    sequence: u64,
    specificity: u32,
    metadata: Metadata,
}

impl HandlerGroup {
    pub(crate) fn new(
        handlers: Vec<Arc<dyn Handler>>,
        pattern: &str,
        sequence: u64,
        specificity: u32,
        metadata: Metadata,
    ) -> Self {
        Self {
            handlers,
            pattern: Arc::from(pattern),
            sequence,
            specificity,
            metadata,
        }
    }

    /// Handlers in registration order; group-internal order is preserved
    /// through sorting and execution.
    pub fn handlers(&self) -> &[Arc<dyn Handler>] {
        &self.handlers
    }

    /// The literal pattern string this group was registered under.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Router-global insertion sequence number; monotonically increasing,
    /// never reset.
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Summed per-token specificity weight of the pattern.
    pub fn specificity(&self) -> u32 {
        self.specificity
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }
}

impl Debug for HandlerGroup {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerGroup")
            .field("pattern", &self.pattern)
            .field("sequence", &self.sequence)
            .field("specificity", &self.specificity)
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

/// Accepted registration shapes for [`crate::SubjectRouter::add`].
///
/// Normalized into one-or-more handler groups; each group is stamped with its
/// own insertion sequence number.
pub enum Registration {
    /// One group holding a single handler.
    Single(Arc<dyn Handler>),
    /// One group holding the handlers in order.
    Chain(Vec<Arc<dyn Handler>>),
    /// Multiple groups, registered in order.
    Groups(Vec<Vec<Arc<dyn Handler>>>),
}

impl Registration {
    /// Flattens into per-group handler lists, rejecting empty shapes.
    pub(crate) fn into_groups(self) -> Result<Vec<Vec<Arc<dyn Handler>>>, InvalidPayloadError> {
        let groups = match self {
            Registration::Single(handler) => vec![vec![handler]],
            Registration::Chain(handlers) => vec![handlers],
            Registration::Groups(groups) => groups,
        };
        if groups.is_empty() {
            return Err(InvalidPayloadError::EmptyRegistration);
        }
        if groups.iter().any(|group| group.is_empty()) {
            return Err(InvalidPayloadError::EmptyHandlerGroup);
        }
        Ok(groups)
    }
}

impl From<Arc<dyn Handler>> for Registration {
    fn from(handler: Arc<dyn Handler>) -> Self {
        Registration::Single(handler)
    }
}

impl From<Vec<Arc<dyn Handler>>> for Registration {
    fn from(handlers: Vec<Arc<dyn Handler>>) -> Self {
        Registration::Chain(handlers)
    }
}

impl From<Vec<Vec<Arc<dyn Handler>>>> for Registration {
    fn from(groups: Vec<Vec<Arc<dyn Handler>>>) -> Self {
        Registration::Groups(groups)
    }
}
