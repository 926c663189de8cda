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
use subject_router::{Metadata, SortStrategy, SubjectRouter};
use support::{recording_handler, CallLog};

fn priority_metadata(priority: i64) -> Metadata {
    let mut metadata = Metadata::new();
    metadata.insert("priority".to_string(), priority.into());
    metadata
}

fn ascending_priority() -> SortStrategy {
    SortStrategy::Custom(Arc::new(|left, right| {
        let priority = |group: &subject_router::HandlerGroup| {
            group
                .metadata()
                .get("priority")
                .and_then(|value| value.as_i64())
                .unwrap_or(i64::MAX)
        };
        priority(left).cmp(&priority(right))
    }))
}

#[tokio::test]
async fn specificity_ranks_mixed_literal_patterns_over_bare_wildcards() {
    let log = CallLog::new();
    let mut router = SubjectRouter::new();
    router
        .add("order.*.updated", recording_handler(&log, "h1"))
        .expect("star pattern registration should succeed");
    router
        .add("order.>", recording_handler(&log, "h2"))
        .expect("gt pattern registration should succeed");

    router
        .handle("order.42.updated", "x")
        .await
        .expect("dispatch should succeed");

    assert_eq!(log.calls(), ["h1", "h2"]);
}

#[tokio::test]
async fn specificity_orders_overlapping_patterns_and_skips_non_matches() {
    let log = CallLog::new();
    let mut router = SubjectRouter::new();
    router
        .add("order.create.new", recording_handler(&log, "a"))
        .expect("exact pattern registration should succeed");
    router
        .add("order.create", recording_handler(&log, "b"))
        .expect("prefix pattern registration should succeed");
    router
        .add("order.*.new", recording_handler(&log, "c"))
        .expect("star pattern registration should succeed");
    router
        .add("order.>", recording_handler(&log, "d"))
        .expect("gt pattern registration should succeed");

    router
        .handle("order.create.new", "t")
        .await
        .expect("dispatch should succeed");

    // "order.create" is two tokens and cannot match a three-token subject.
    assert_eq!(log.calls(), ["a", "c", "d"]);
}

#[tokio::test]
async fn specificity_is_position_independent_and_ties_keep_discovery_order() {
    let mut router = SubjectRouter::new();
    let log = CallLog::new();
    // Same composition (one literal, one `*`): equal score, so the match
    // collection's discovery order decides; the exact-token branch is
    // explored before the wildcard branch even though it registered later.
    router
        .add("*.created", recording_handler(&log, "star-first"))
        .expect("registration should succeed");
    router
        .add("order.*", recording_handler(&log, "literal-first"))
        .expect("registration should succeed");

    let patterns: Vec<String> = router
        .matched_groups("order.created")
        .iter()
        .map(|group| group.pattern().to_string())
        .collect();

    assert_eq!(patterns, ["order.*", "*.created"]);
}

#[tokio::test]
async fn more_literal_segments_never_sort_after_fewer() {
    let mut router = SubjectRouter::new();
    let log = CallLog::new();
    router
        .add("a.*.c", recording_handler(&log, "one-star"))
        .expect("registration should succeed");
    router
        .add("a.b.c", recording_handler(&log, "all-literal"))
        .expect("registration should succeed");
    router
        .add("a.>", recording_handler(&log, "gt"))
        .expect("registration should succeed");

    let patterns: Vec<String> = router
        .matched_groups("a.b.c")
        .iter()
        .map(|group| group.pattern().to_string())
        .collect();

    assert_eq!(patterns, ["a.b.c", "a.*.c", "a.>"]);
}

#[tokio::test]
async fn insertion_strategy_replays_registration_order_regardless_of_shape() {
    let log = CallLog::new();
    let mut router = SubjectRouter::builder()
        .sort_strategy(SortStrategy::Insertion)
        .build();
    router
        .add("order.>", recording_handler(&log, "first"))
        .expect("gt pattern registration should succeed");
    router
        .add("order.created", recording_handler(&log, "second"))
        .expect("exact pattern registration should succeed");
    router
        .add("order.*", recording_handler(&log, "third"))
        .expect("star pattern registration should succeed");

    router
        .handle("order.created", "x")
        .await
        .expect("dispatch should succeed");

    assert_eq!(log.calls(), ["first", "second", "third"]);
}

#[tokio::test]
async fn custom_strategy_sorts_by_caller_metadata() {
    let log = CallLog::new();
    let mut router = SubjectRouter::builder()
        .sort_strategy(ascending_priority())
        .build();
    router
        .add_with_metadata("a.>", recording_handler(&log, "h1"), priority_metadata(1))
        .expect("gt pattern registration should succeed");
    router
        .add_with_metadata("a.b", recording_handler(&log, "h2"), priority_metadata(2))
        .expect("exact pattern registration should succeed");

    router.handle("a.b", "x").await.expect("dispatch should succeed");

    // Ascending priority overrides specificity: the bare wildcard runs first.
    assert_eq!(log.calls(), ["h1", "h2"]);
}

#[tokio::test]
async fn custom_comparator_sees_sequence_numbers() {
    let log = CallLog::new();
    let newest_first = SortStrategy::Custom(Arc::new(|left, right| {
        right.sequence().cmp(&left.sequence())
    }));
    let mut router = SubjectRouter::builder().sort_strategy(newest_first).build();
    router
        .add("a.>", recording_handler(&log, "older"))
        .expect("registration should succeed");
    router
        .add("a.b", recording_handler(&log, "newer"))
        .expect("registration should succeed");

    router.handle("a.b", "x").await.expect("dispatch should succeed");

    assert_eq!(log.calls(), ["newer", "older"]);
}

#[tokio::test]
async fn group_internal_order_is_preserved_under_every_strategy() {
    for strategy in [SortStrategy::Specificity, SortStrategy::Insertion] {
        let log = CallLog::new();
        let mut router = SubjectRouter::builder().sort_strategy(strategy).build();
        router
            .add(
                "a.b",
                vec![
                    recording_handler(&log, "g1-first"),
                    recording_handler(&log, "g1-second"),
                ],
            )
            .expect("chain registration should succeed");
        router
            .add("a.>", recording_handler(&log, "g2"))
            .expect("gt registration should succeed");

        router.handle("a.b", "x").await.expect("dispatch should succeed");

        assert_eq!(log.calls(), ["g1-first", "g1-second", "g2"]);
    }
}
