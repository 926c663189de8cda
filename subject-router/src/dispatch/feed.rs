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

//! Sequential dispatch loop draining an inbound message channel.

use crate::context::InvocationContext;
use crate::message::{Headers, Message, Payload};
use crate::observability::{events, fields};
use crate::router::SubjectRouter;
use std::sync::Arc;
use tokio::sync::mpsc::Receiver;
use tracing::{debug, info, warn};
use uuid::Uuid;

const COMPONENT: &str = "dispatch_feed";

/// One (subject, payload, headers) triple received from a transport.
#[derive(Clone, Debug)]
pub struct InboundMessage {
    pub subject: String,
    pub payload: Payload,
    pub headers: Headers,
}

impl InboundMessage {
    pub fn new(subject: impl Into<String>, payload: impl Into<Payload>) -> Self {
        Self {
            subject: subject.into(),
            payload: payload.into(),
            headers: Headers::new(),
        }
    }

    pub fn with_headers(
        subject: impl Into<String>,
        payload: impl Into<Payload>,
        headers: Headers,
    ) -> Self {
        Self {
            subject: subject.into(),
            payload: payload.into(),
            headers,
        }
    }
}

/// Drains an inbound channel and dispatches each message through the router.
///
/// Dispatch is strictly sequential: the next message is received only after
/// the previous handler chain completes. Each dispatch gets a fresh
/// invocation context. Handler failures are logged and the loop continues;
/// the loop exits when the sending side closes. Retry and backpressure
/// policy stay with the transport feeding the channel.
pub struct DispatchFeed {
    feed_id: String,
    router: Arc<SubjectRouter>,
    receiver: Receiver<InboundMessage>,
}

impl DispatchFeed {
    pub fn new(router: Arc<SubjectRouter>, receiver: Receiver<InboundMessage>) -> Self {
        Self {
            feed_id: Uuid::new_v4().to_string(),
            router,
            receiver,
        }
    }

    /// Identifier stamped on this feed's dispatch events.
    pub fn feed_id(&self) -> &str {
        &self.feed_id
    }

    /// Runs the loop to completion.
    pub async fn run(mut self) {
        while let Some(inbound) = self.receiver.recv().await {
            let subject = fields::format_subject(&inbound.subject);
            debug!(
                event = events::FEED_RECEIVE,
                component = COMPONENT,
                feed_id = self.feed_id.as_str(),
                subject = subject.as_str(),
                "received inbound message"
            );

            let message =
                Message::with_headers(inbound.subject, inbound.payload, inbound.headers);
            match self
                .router
                .handle_message(message, InvocationContext::new())
                .await
            {
                Ok(context) => {
                    debug!(
                        event = events::FEED_DISPATCH_OK,
                        component = COMPONENT,
                        feed_id = self.feed_id.as_str(),
                        subject = subject.as_str(),
                        context_entries = context.len(),
                        "dispatch completed"
                    );
                }
                Err(err) => {
                    warn!(
                        event = events::FEED_DISPATCH_FAILED,
                        component = COMPONENT,
                        feed_id = self.feed_id.as_str(),
                        subject = subject.as_str(),
                        err = %err,
                        "dispatch failed; continuing with next message"
                    );
                }
            }
        }
        info!(
            event = events::FEED_CLOSED,
            component = COMPONENT,
            feed_id = self.feed_id.as_str(),
            reason = fields::REASON_CHANNEL_CLOSED,
            "inbound channel closed; stopping feed"
        );
    }
}
