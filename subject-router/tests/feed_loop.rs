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

mod support;

use std::sync::Arc;
use subject_router::{DispatchFeed, HandlerExecutionError, InboundMessage, SubjectRouter};
use subject_router::{handler_fn, Headers};
use support::{recording_handler, CallLog};
use tokio::sync::mpsc;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init();
}

#[tokio::test]
async fn feed_drains_the_channel_in_order_and_exits_on_close() {
    init_tracing();

    let log = CallLog::new();
    let mut router = SubjectRouter::new();
    router
        .add("telemetry.>", recording_handler(&log, "telemetry"))
        .expect("telemetry registration should succeed");
    router
        .add("telemetry.engine.rpm", recording_handler(&log, "rpm"))
        .expect("rpm registration should succeed");
    let router = Arc::new(router);

    let (sender, receiver) = mpsc::channel(16);
    sender
        .send(InboundMessage::new("telemetry.engine.rpm", "4200"))
        .await
        .expect("queue should accept rpm message");
    sender
        .send(InboundMessage::new("telemetry.cabin.temp", "21"))
        .await
        .expect("queue should accept temp message");
    drop(sender);

    DispatchFeed::new(router, receiver).run().await;

    // The exact pattern outranks the wildcard on the first message.
    assert_eq!(log.calls(), ["rpm", "telemetry", "telemetry"]);
}

#[tokio::test]
async fn feed_passes_transport_headers_through_to_handlers() {
    init_tracing();

    let log = CallLog::new();
    let mut router = SubjectRouter::new();
    let trace_log = log.clone();
    router
        .add(
            "order.>",
            handler_fn(move |message, context, next| {
                let trace_log = trace_log.clone();
                let trace = message
                    .headers()
                    .get("trace-id")
                    .and_then(|value| value.as_str())
                    .unwrap_or("missing")
                    .to_string();
                Box::pin(async move {
                    trace_log.record(trace);
                    next.run(context).await
                })
            }),
        )
        .expect("registration should succeed");
    let router = Arc::new(router);

    let mut headers = Headers::new();
    headers.insert("trace-id".to_string(), "feed-7".into());
    let (sender, receiver) = mpsc::channel(4);
    sender
        .send(InboundMessage::with_headers("order.created", "x", headers))
        .await
        .expect("queue should accept message");
    drop(sender);

    DispatchFeed::new(router, receiver).run().await;

    assert_eq!(log.calls(), ["feed-7"]);
}

#[tokio::test]
async fn feed_survives_a_failing_chain_between_successes() {
    init_tracing();

    let log = CallLog::new();
    let mut router = SubjectRouter::new();
    router
        .add("ok.>", recording_handler(&log, "ok"))
        .expect("ok registration should succeed");
    router
        .add(
            "fail.>",
            handler_fn(|_message, _context, _next| {
                Box::pin(async move { Err(HandlerExecutionError::new("deliberate failure")) })
            }),
        )
        .expect("fail registration should succeed");
    let router = Arc::new(router);

    let (sender, receiver) = mpsc::channel(8);
    for subject in ["ok.first", "fail.middle", "ok.last"] {
        sender
            .send(InboundMessage::new(subject, "x"))
            .await
            .expect("queue should accept message");
    }
    drop(sender);

    DispatchFeed::new(router, receiver).run().await;

    assert_eq!(log.calls(), ["ok", "ok"]);
}
