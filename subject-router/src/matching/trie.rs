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

//! Wildcard-aware matching trie over interned subject tokens.

use crate::error::{InvalidSubjectError, InvalidSubjectReason};
use crate::handler::HandlerGroup;
use crate::matching::branch::Branch;
use crate::matching::token_pool::{TokenId, TokenPool, MULTI_WILDCARD};
use std::sync::Arc;

/// Index of a trie node in the flat arena.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) struct NodeIndex(pub(crate) u32);

const ROOT: NodeIndex = NodeIndex(0);

/// One matched token position: an optional branch of children plus the
/// handler groups whose pattern ends exactly here.
struct TrieNode {
    branch: Branch,
    groups: Vec<Arc<HandlerGroup>>,
}

impl TrieNode {
    fn new() -> Self {
        Self {
            branch: Branch::new(),
            groups: Vec::new(),
        }
    }

    fn is_terminal(&self) -> bool {
        !self.groups.is_empty()
    }
}

/// Trie over dot-delimited patterns with `*`/`>` wildcard children.
///
/// Nodes live in a flat arena and are linked by [`NodeIndex`]; they are
/// created lazily on insert and never deleted (registration is append-only).
pub(crate) struct SubjectTrie {
    nodes: Vec<TrieNode>,
    pool: TokenPool,
    promotion_threshold: usize,
}

impl SubjectTrie {
    pub(crate) fn with_promotion_threshold(promotion_threshold: usize) -> Self {
        Self {
            nodes: vec![TrieNode::new()],
            pool: TokenPool::new(),
            promotion_threshold,
        }
    }

    /// Splits and validates a pattern against the registration grammar.
    ///
    /// A pattern must be non-empty, contain no empty segments, and may carry
    /// the multi-level wildcard only as its final token.
    pub(crate) fn validate_pattern(pattern: &str) -> Result<Vec<&str>, InvalidSubjectError> {
        if pattern.is_empty() {
            return Err(InvalidSubjectError::new(
                pattern,
                InvalidSubjectReason::EmptyPattern,
            ));
        }
        let tokens: Vec<&str> = pattern.split('.').collect();
        for (position, token) in tokens.iter().enumerate() {
            if token.is_empty() {
                return Err(InvalidSubjectError::new(
                    pattern,
                    InvalidSubjectReason::EmptySegment,
                ));
            }
            if *token == MULTI_WILDCARD && position + 1 != tokens.len() {
                return Err(InvalidSubjectError::new(
                    pattern,
                    InvalidSubjectReason::MisplacedMultiWildcard,
                ));
            }
        }
        Ok(tokens)
    }

    /// Inserts a pattern, appending `group` at the terminal node so that
    /// registering the same pattern twice accumulates.
    ///
    /// Validation fully precedes mutation: a rejected pattern leaves the trie
    /// and its token pool untouched.
    pub(crate) fn insert(
        &mut self,
        pattern: &str,
        group: Arc<HandlerGroup>,
    ) -> Result<(), InvalidSubjectError> {
        let tokens = Self::validate_pattern(pattern)?;

        let mut node = ROOT;
        for token in tokens {
            // Validation rules out empty tokens, the only intern failure.
            let id = self.pool.intern(token).map_err(|_| {
                InvalidSubjectError::new(pattern, InvalidSubjectReason::EmptySegment)
            })?;
            node = self.child_or_create(node, id);
        }
        self.nodes[node.0 as usize].groups.push(group);
        Ok(())
    }

    fn child_or_create(&mut self, parent: NodeIndex, token: TokenId) -> NodeIndex {
        if let Some(child) = self.nodes[parent.0 as usize].branch.get(token) {
            return child;
        }
        let child = NodeIndex(self.nodes.len() as u32);
        self.nodes.push(TrieNode::new());
        let threshold = self.promotion_threshold;
        self.nodes[parent.0 as usize].branch.set(token, child, threshold);
        child
    }

    /// Collects every terminal node the subject satisfies, depth-first.
    ///
    /// Order is not significant; the router imposes execution order.
    pub(crate) fn collect(&self, subject: &str) -> Vec<NodeIndex> {
        let mut found = Vec::new();
        self.walk(subject, &mut |node| {
            found.push(node);
            false
        });
        found
    }

    /// Returns the first terminal node the subject satisfies, if any.
    pub(crate) fn search(&self, subject: &str) -> Option<NodeIndex> {
        let mut first = None;
        self.walk(subject, &mut |node| {
            first = Some(node);
            true
        });
        first
    }

    /// Handler groups accumulated at a node returned by [`collect`].
    ///
    /// [`collect`]: SubjectTrie::collect
    pub(crate) fn payloads(&self, node: NodeIndex) -> &[Arc<HandlerGroup>] {
        &self.node(node).groups
    }

    /// Lists every registered pattern, rebuilt from interned path tokens.
    pub(crate) fn patterns(&self) -> Vec<String> {
        let mut patterns = Vec::new();
        let mut path = Vec::new();
        self.push_patterns(ROOT, &mut path, &mut patterns);
        patterns
    }

    fn push_patterns(&self, node: NodeIndex, path: &mut Vec<String>, out: &mut Vec<String>) {
        let current = self.node(node);
        if current.is_terminal() {
            out.push(path.join("."));
        }
        for (token, child) in current.branch.iter() {
            // Branch keys are always pool-issued ids.
            let Ok(segment) = self.pool.resolve(token) else {
                continue;
            };
            path.push(segment.to_string());
            self.push_patterns(child, path, out);
            path.pop();
        }
    }

    /// Visits terminal nodes for `subject`; the visitor returns `true` to
    /// stop the traversal.
    fn walk(&self, subject: &str, visit: &mut dyn FnMut(NodeIndex) -> bool) {
        if subject.is_empty() {
            // Zero tokens satisfy only a root-level `>` pattern.
            if let Some(child) = self.node(ROOT).branch.get(TokenId::Multi) {
                if self.node(child).is_terminal() {
                    visit(child);
                }
            }
            return;
        }
        let tokens: Vec<&str> = subject.split('.').collect();
        if tokens.iter().any(|token| token.is_empty()) {
            // Malformed subjects match nothing; matching never errors.
            return;
        }
        self.descend(ROOT, &tokens, visit);
    }

    fn descend(
        &self,
        node: NodeIndex,
        tokens: &[&str],
        visit: &mut dyn FnMut(NodeIndex) -> bool,
    ) -> bool {
        let Some((head, rest)) = tokens.split_first() else {
            return false;
        };
        let branch = &self.node(node).branch;

        // Exact token first, restricted to literal ids so a `*` or `>`
        // appearing in a concrete subject cannot shadow the wildcard probes.
        if let Some(id) = self.pool.lookup(head).filter(|id| id.is_literal()) {
            if let Some(child) = branch.get(id) {
                if self.step(child, rest, visit) {
                    return true;
                }
            }
        }
        if let Some(child) = branch.get(TokenId::Single) {
            if self.step(child, rest, visit) {
                return true;
            }
        }
        // `>` consumes the head and every remaining token atomically.
        if let Some(child) = branch.get(TokenId::Multi) {
            if self.node(child).is_terminal() && visit(child) {
                return true;
            }
        }
        false
    }

    fn step(
        &self,
        child: NodeIndex,
        rest: &[&str],
        visit: &mut dyn FnMut(NodeIndex) -> bool,
    ) -> bool {
        if rest.is_empty() {
            self.node(child).is_terminal() && visit(child)
        } else {
            self.descend(child, rest, visit)
        }
    }

    fn node(&self, index: NodeIndex) -> &TrieNode {
        &self.nodes[index.0 as usize]
    }
}
