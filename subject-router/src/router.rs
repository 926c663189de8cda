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

//! The outward router facade: registration, match ranking, and dispatch.

use crate::builder::SubjectRouterBuilder;
use crate::context::InvocationContext;
use crate::error::{AddError, HandlerExecutionError};
use crate::handler::{drive, Handler, HandlerGroup, Metadata, Registration};
use crate::matching::trie::SubjectTrie;
use crate::message::{Message, Payload};
use crate::observability::{events, fields};
use crate::ranking::{self, SortStrategy};
use std::sync::Arc;
use tracing::{debug, warn};

const COMPONENT: &str = "subject_router";

/// Routes dot-delimited subjects to ordered handler chains.
///
/// Registration (`add`) takes `&mut self` and is the only writer; matching
/// and dispatch take `&self`, so the borrow checker enforces the
/// single-writer/many-reader discipline without internal locking.
///
/// # Examples
///
/// ```
/// use subject_router::{handler_fn, SubjectRouter};
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let mut router = SubjectRouter::new();
/// router
///     .add(
///         "order.created",
///         handler_fn(|_message, mut context, next| {
///             Box::pin(async move {
///                 context.insert("handled", true);
///                 next.run(context).await
///             })
///         }),
///     )
///     .unwrap();
///
/// let context = router.handle("order.created", "payload").await.unwrap();
/// assert_eq!(context.get("handled").and_then(|v| v.as_bool()), Some(true));
/// # });
/// ```
pub struct SubjectRouter {
    trie: SubjectTrie,
    strategy: SortStrategy,
    next_sequence: u64,
}

impl Default for SubjectRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl SubjectRouter {
    /// Creates a router with the specificity strategy and the default branch
    /// promotion threshold.
    pub fn new() -> Self {
        SubjectRouterBuilder::new().build()
    }

    pub fn builder() -> SubjectRouterBuilder {
        SubjectRouterBuilder::new()
    }

    pub(crate) fn from_parts(strategy: SortStrategy, promotion_threshold: usize) -> Self {
        Self {
            trie: SubjectTrie::with_promotion_threshold(promotion_threshold),
            strategy,
            next_sequence: 0,
        }
    }

    /// Registers handlers for `pattern` with empty metadata.
    pub fn add(
        &mut self,
        pattern: &str,
        registration: impl Into<Registration>,
    ) -> Result<(), AddError> {
        self.add_with_metadata(pattern, registration, Metadata::new())
    }

    /// Registers handlers for `pattern`.
    ///
    /// The registration is normalized into one-or-more handler groups; each
    /// group is stamped with the next insertion sequence number, the literal
    /// pattern string, its specificity score, and `metadata`. Failures are
    /// synchronous and leave the router unchanged.
    pub fn add_with_metadata(
        &mut self,
        pattern: &str,
        registration: impl Into<Registration>,
        metadata: Metadata,
    ) -> Result<(), AddError> {
        debug!(
            event = events::PATTERN_ADD_START,
            component = COMPONENT,
            pattern,
            "registering handler groups"
        );

        let groups = match registration.into().into_groups() {
            Ok(groups) => groups,
            Err(err) => {
                warn!(
                    event = events::PATTERN_ADD_FAILED,
                    component = COMPONENT,
                    pattern,
                    err = %err,
                    "rejected registration shape"
                );
                return Err(AddError::InvalidPayload(err));
            }
        };
        let tokens = match SubjectTrie::validate_pattern(pattern) {
            Ok(tokens) => tokens,
            Err(err) => {
                warn!(
                    event = events::PATTERN_ADD_FAILED,
                    component = COMPONENT,
                    pattern,
                    err = %err,
                    "rejected pattern"
                );
                return Err(AddError::InvalidSubject(err));
            }
        };
        let specificity = ranking::specificity_score(&tokens);

        for handlers in groups {
            let sequence = self.next_sequence;
            self.next_sequence += 1;
            let group = Arc::new(HandlerGroup::new(
                handlers,
                pattern,
                sequence,
                specificity,
                metadata.clone(),
            ));
            self.trie.insert(pattern, group)?;
            debug!(
                event = events::PATTERN_ADD_OK,
                component = COMPONENT,
                pattern,
                sequence,
                specificity,
                "handler group registered"
            );
        }
        Ok(())
    }

    /// Ordered handlers matched by `subject` under the configured strategy.
    ///
    /// Groups are flattened into one handler sequence; a group's internal
    /// handlers keep their relative order.
    pub fn matches(&self, subject: &str) -> Vec<Arc<dyn Handler>> {
        self.matched_groups(subject)
            .iter()
            .flat_map(|group| group.handlers().iter().cloned())
            .collect()
    }

    /// Matched handler groups in execution order.
    pub fn matched_groups(&self, subject: &str) -> Vec<Arc<HandlerGroup>> {
        let mut groups: Vec<Arc<HandlerGroup>> = self
            .trie
            .collect(subject)
            .into_iter()
            .flat_map(|node| self.trie.payloads(node).iter().cloned())
            .collect();
        ranking::rank(&mut groups, &self.strategy);
        groups
    }

    /// Returns whether any registered pattern matches `subject`, without
    /// enumerating the full match set.
    pub fn is_match(&self, subject: &str) -> bool {
        self.trie.search(subject).is_some()
    }

    /// Every registered pattern, in no particular order.
    pub fn patterns(&self) -> Vec<String> {
        self.trie.patterns()
    }

    /// Dispatches `payload` on `subject` with a fresh invocation context.
    pub async fn handle(
        &self,
        subject: &str,
        payload: impl Into<Payload>,
    ) -> Result<InvocationContext, HandlerExecutionError> {
        self.handle_with_context(subject, payload, InvocationContext::new())
            .await
    }

    /// Dispatches with a caller-seeded initial context.
    pub async fn handle_with_context(
        &self,
        subject: &str,
        payload: impl Into<Payload>,
        context: InvocationContext,
    ) -> Result<InvocationContext, HandlerExecutionError> {
        self.handle_message(Message::new(subject, payload), context)
            .await
    }

    /// Dispatches a prebuilt message; headers pass through to handlers
    /// untouched.
    ///
    /// Matched handlers run strictly sequentially through the continuation
    /// chain. A handler that never calls its continuation short-circuits the
    /// chain; a handler failure propagates unmodified, with no retry and no
    /// rollback of context mutations already applied. With no matches the
    /// seed context is returned unchanged.
    pub async fn handle_message(
        &self,
        message: Message,
        context: InvocationContext,
    ) -> Result<InvocationContext, HandlerExecutionError> {
        let chain = self.matches(message.subject());
        if chain.is_empty() {
            debug!(
                event = events::DISPATCH_NO_MATCH,
                component = COMPONENT,
                subject = %fields::format_subject(message.subject()),
                "no handlers matched"
            );
            return Ok(context);
        }

        debug!(
            event = events::DISPATCH_START,
            component = COMPONENT,
            subject = %fields::format_subject(message.subject()),
            handlers = chain.len(),
            "dispatching handler chain"
        );
        match drive(&chain, 0, &message, context).await {
            Ok(context) => {
                debug!(
                    event = events::DISPATCH_OK,
                    component = COMPONENT,
                    subject = %fields::format_subject(message.subject()),
                    "handler chain completed"
                );
                Ok(context)
            }
            Err(err) => {
                warn!(
                    event = events::DISPATCH_HANDLER_FAILED,
                    component = COMPONENT,
                    subject = %fields::format_subject(message.subject()),
                    err = %err,
                    "handler chain failed"
                );
                Err(err)
            }
        }
    }
}
