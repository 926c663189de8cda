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

//! Builder for router configuration.

use crate::matching::branch::DEFAULT_PROMOTION_THRESHOLD;
use crate::ranking::SortStrategy;
use crate::router::SubjectRouter;

/// Configures a [`SubjectRouter`] before first registration.
///
/// # Examples
///
/// ```
/// use subject_router::{SortStrategy, SubjectRouter};
///
/// let router = SubjectRouter::builder()
///     .sort_strategy(SortStrategy::Insertion)
///     .promotion_threshold(8)
///     .build();
/// assert!(router.patterns().is_empty());
/// ```
#[derive(Clone, Debug)]
pub struct SubjectRouterBuilder {
    strategy: SortStrategy,
    promotion_threshold: usize,
}

impl Default for SubjectRouterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SubjectRouterBuilder {
    pub fn new() -> Self {
        Self {
            strategy: SortStrategy::default(),
            promotion_threshold: DEFAULT_PROMOTION_THRESHOLD,
        }
    }

    /// Match-ordering strategy; specificity when unset.
    pub fn sort_strategy(mut self, strategy: SortStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Child count past which a node's branch storage is promoted from the
    /// slots list to a hash table.
    pub fn promotion_threshold(mut self, threshold: usize) -> Self {
        self.promotion_threshold = threshold;
        self
    }

    pub fn build(self) -> SubjectRouter {
        SubjectRouter::from_parts(self.strategy, self.promotion_threshold)
    }
}
