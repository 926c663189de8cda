//! Adaptive child storage for trie nodes: a slots list while fan-out stays
//! narrow, a hash table once it grows past the promotion threshold.

use crate::matching::token_pool::TokenId;
use crate::matching::trie::NodeIndex;
use crate::observability::events;
use std::collections::HashMap;
use tracing::debug;

const COMPONENT: &str = "branch";

/// Child count past which a node's branch storage is promoted slots->table.
pub(crate) const DEFAULT_PROMOTION_THRESHOLD: usize = 32;

/// A node's child storage, polymorphic over two representations.
///
/// Promotion is a one-time, explicit transformation performed in place;
/// demotion never occurs. Both forms support the same operation set so
/// callers stay representation-agnostic.
#[derive(Debug)]
pub(crate) enum Branch {
    /// Linear (token, child) pairs; iteration follows insertion order.
    Slots(Vec<(TokenId, NodeIndex)>),
    /// Hash-indexed children; iteration order is arbitrary.
    Table(HashMap<TokenId, NodeIndex>),
}

impl Branch {
    pub(crate) fn new() -> Self {
        Branch::Slots(Vec::new())
    }

    pub(crate) fn get(&self, token: TokenId) -> Option<NodeIndex> {
        match self {
            Branch::Slots(slots) => slots
                .iter()
                .find(|(existing, _)| *existing == token)
                .map(|(_, child)| *child),
            Branch::Table(table) => table.get(&token).copied(),
        }
    }

    pub(crate) fn contains(&self, token: TokenId) -> bool {
        self.get(token).is_some()
    }

    pub(crate) fn len(&self) -> usize {
        match self {
            Branch::Slots(slots) => slots.len(),
            Branch::Table(table) => table.len(),
        }
    }

    /// Inserts or replaces the child for `token`, promoting slots->table when
    /// a new key would push the child count past `threshold`.
    pub(crate) fn set(&mut self, token: TokenId, child: NodeIndex, threshold: usize) {
        let grows = !self.contains(token);
        if grows && matches!(self, Branch::Slots(_)) && self.len() >= threshold {
            self.promote();
        }
        match self {
            Branch::Slots(slots) => {
                if let Some((_, existing)) = slots.iter_mut().find(|(t, _)| *t == token) {
                    *existing = child;
                } else {
                    slots.push((token, child));
                }
            }
            Branch::Table(table) => {
                table.insert(token, child);
            }
        }
    }

    /// One-time slots->table rebuild preserving every entry.
    fn promote(&mut self) {
        let Branch::Slots(slots) = self else {
            return;
        };
        let promoted: HashMap<TokenId, NodeIndex> = slots.drain(..).collect();
        debug!(
            event = events::BRANCH_PROMOTE,
            component = COMPONENT,
            children = promoted.len(),
            "promoted branch storage from slots to table"
        );
        *self = Branch::Table(promoted);
    }

    pub(crate) fn iter(&self) -> Box<dyn Iterator<Item = (TokenId, NodeIndex)> + '_> {
        match self {
            Branch::Slots(slots) => Box::new(slots.iter().map(|(token, child)| (*token, *child))),
            Branch::Table(table) => Box::new(table.iter().map(|(token, child)| (*token, *child))),
        }
    }
}
