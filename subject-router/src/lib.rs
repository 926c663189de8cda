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

//! # subject-router
//!
//! `subject-router` routes hierarchical, dot-delimited subjects to ordered
//! handler chains, with NATS-style wildcard matching: `*` matches exactly one
//! token at its position, `>` matches one-or-more trailing tokens and is
//! legal only as the final token of a registered pattern.
//!
//! Typical usage is API-first and centers on [`SubjectRouter`]: register
//! handler groups per pattern with [`SubjectRouter::add`], then dispatch
//! concrete subjects with [`SubjectRouter::handle`]. Matched handlers run
//! strictly sequentially through an explicit continuation ([`Next`]); the
//! per-invocation [`InvocationContext`] flows forward through the chain and
//! is returned to the caller when the chain completes.
//!
//! ## Quick start
//!
//! ```
//! use subject_router::{handler_fn, SubjectRouter};
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let mut router = SubjectRouter::new();
//! router
//!     .add(
//!         "order.created",
//!         handler_fn(|message, mut context, next| {
//!             Box::pin(async move {
//!                 context.insert("seen", message.subject());
//!                 next.run(context).await
//!             })
//!         }),
//!     )
//!     .unwrap();
//!
//! let context = router.handle("order.created", "payload").await.unwrap();
//! assert_eq!(
//!     context.get("seen").and_then(|v| v.as_str()),
//!     Some("order.created")
//! );
//! # });
//! ```
//!
//! ## Match ordering
//!
//! The default `specificity` strategy ranks exact segments over `*` over `>`;
//! `insertion` replays registration order, and `custom` applies a caller
//! comparator over the matched handler groups.
//!
//! ```
//! use subject_router::{handler_fn, SubjectRouter};
//!
//! let noop = || handler_fn(|_message, context, next| {
//!     Box::pin(async move { next.run(context).await })
//! });
//!
//! let mut router = SubjectRouter::new();
//! router.add("order.*.updated", noop()).unwrap();
//! router.add("order.>", noop()).unwrap();
//!
//! let patterns: Vec<String> = router
//!     .matched_groups("order.42.updated")
//!     .iter()
//!     .map(|group| group.pattern().to_string())
//!     .collect();
//! assert_eq!(patterns, ["order.*.updated", "order.>"]);
//! ```
//!
//! ## Registration contract
//!
//! `add` fails fast and synchronously: malformed patterns and empty handler
//! shapes are rejected before any trie state changes, so a failed
//! registration is never observable through later matches.
//!
//! ```
//! use subject_router::{handler_fn, AddError, SubjectRouter};
//!
//! let mut router = SubjectRouter::new();
//! let result = router.add(
//!     "orders..created",
//!     handler_fn(|_message, context, next| {
//!         Box::pin(async move { next.run(context).await })
//!     }),
//! );
//!
//! assert!(matches!(result, Err(AddError::InvalidSubject(_))));
//! assert!(router.matches("orders.created").is_empty());
//! ```
//!
//! ## Concurrency model
//!
//! Registration takes `&mut self` and is the single writer; matching and
//! dispatch take `&self`. The borrow checker enforces the
//! single-writer/many-reader discipline — there is no internal locking, no
//! worker pool, and no concurrent fan-out across matched handlers.
//! Suspension points exist only inside caller-supplied handler bodies.
//!
//! ## Internal architecture map
//!
//! - API facade: outward [`SubjectRouter`]/[`SubjectRouterBuilder`] surface
//! - Matching: token interning, adaptive branch storage, and the wildcard trie
//! - Ranking: specificity/insertion/custom ordering over handler groups
//! - Dispatch: the continuation-driven handler chain and the inbound
//!   [`DispatchFeed`] loop
//!
//! ## Observability model
//!
//! The crate uses `tracing` for logs/events. Library code emits events/spans
//! and does not unconditionally initialize a global subscriber. Binaries and
//! tests are responsible for one-time `tracing_subscriber` initialization at
//! process boundaries.

mod builder;
mod context;
mod dispatch;
mod error;
mod handler;
mod matching;
mod message;
mod ranking;
mod router;

#[doc(hidden)]
pub mod observability;

pub use builder::SubjectRouterBuilder;
pub use context::{InvocationContext, LAST_VALUE_KEY};
pub use dispatch::feed::{DispatchFeed, InboundMessage};
pub use error::{
    AddError, HandlerExecutionError, InvalidPayloadError, InvalidSubjectError, InvalidSubjectReason,
};
pub use handler::{handler_fn, Handler, HandlerGroup, Metadata, Next, Registration};
pub use matching::token_pool::{MULTI_WILDCARD, SINGLE_WILDCARD};
pub use message::{Headers, Message, Payload};
pub use ranking::{GroupComparator, SortStrategy};
pub use router::SubjectRouter;
