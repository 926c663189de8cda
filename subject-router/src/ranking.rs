//! Match-ordering strategies over handler groups.

use crate::handler::HandlerGroup;
use crate::matching::token_pool::{MULTI_WILDCARD, SINGLE_WILDCARD};
use std::cmp::Ordering;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

/// Comparator signature for [`SortStrategy::Custom`]; sees each group's
/// pattern, metadata, and sequence number.
pub type GroupComparator = Arc<dyn Fn(&HandlerGroup, &HandlerGroup) -> Ordering + Send + Sync>;

/// How matched handler groups are ordered before execution.
#[derive(Clone, Default)]
pub enum SortStrategy {
    /// Descending pattern specificity; equal scores keep discovery order.
    #[default]
    Specificity,
    /// Ascending insertion sequence: first registered, first executed,
    /// independent of pattern shape.
    Insertion,
    /// Caller comparator applied verbatim through a stable sort.
    Custom(GroupComparator),
}

impl Debug for SortStrategy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SortStrategy::Specificity => write!(f, "Specificity"),
            SortStrategy::Insertion => write!(f, "Insertion"),
            SortStrategy::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

const MULTI_WILDCARD_WEIGHT: u32 = 1;
const SINGLE_WILDCARD_WEIGHT: u32 = 2;
const LITERAL_WEIGHT: u32 = 3;

/// Sums per-token weights: literal tokens outrank `*`, which outranks `>`.
/// Token position does not contribute; only the pattern's composition does.
pub(crate) fn specificity_score(tokens: &[&str]) -> u32 {
    tokens
        .iter()
        .map(|token| match *token {
            MULTI_WILDCARD => MULTI_WILDCARD_WEIGHT,
            SINGLE_WILDCARD => SINGLE_WILDCARD_WEIGHT,
            _ => LITERAL_WEIGHT,
        })
        .sum()
}

/// Stable-sorts `groups` under `strategy`; ties keep discovery order.
pub(crate) fn rank(groups: &mut [Arc<HandlerGroup>], strategy: &SortStrategy) {
    match strategy {
        SortStrategy::Specificity => {
            groups.sort_by(|a, b| b.specificity().cmp(&a.specificity()));
        }
        SortStrategy::Insertion => {
            groups.sort_by(|a, b| a.sequence().cmp(&b.sequence()));
        }
        SortStrategy::Custom(comparator) => {
            groups.sort_by(|a, b| comparator(a, b));
        }
    }
}
