//! Token interning for subject segments and the two reserved wildcard tokens.

use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Single-level wildcard token: matches exactly one subject token.
pub const SINGLE_WILDCARD: &str = "*";

/// Multi-level wildcard token: matches one-or-more trailing subject tokens;
/// legal only as the final token of a pattern.
pub const MULTI_WILDCARD: &str = ">";

/// Interned identity of one subject token.
///
/// The two wildcard tokens carry fixed reserved identities that never collide
/// with literal tokens and consume no literal id space.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum TokenId {
    Single,
    Multi,
    Literal(u32),
}

impl TokenId {
    pub(crate) fn is_literal(self) -> bool {
        matches!(self, TokenId::Literal(_))
    }
}

/// Token pool failures.
#[derive(Debug, Eq, PartialEq)]
pub(crate) enum TokenPoolError {
    /// The empty string is not a token.
    InvalidToken,
    /// The pool never issued this literal id.
    OutOfRange(u32),
}

impl Display for TokenPoolError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenPoolError::InvalidToken => write!(f, "empty string is not a valid token"),
            TokenPoolError::OutOfRange(id) => {
                write!(f, "literal token id {id} was never issued by this pool")
            }
        }
    }
}

impl Error for TokenPoolError {}

/// Instance-scoped intern table mapping tokens to small integer identities.
///
/// Each trie owns its own pool; there is no process-wide table, so
/// independent routers never share literal id space or keep each other's
/// tokens alive.
#[derive(Debug, Default)]
pub(crate) struct TokenPool {
    ids: HashMap<Box<str>, u32>,
    tokens: Vec<Box<str>>,
}

impl TokenPool {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Interns `token`, returning a stable id. Idempotent per token.
    pub(crate) fn intern(&mut self, token: &str) -> Result<TokenId, TokenPoolError> {
        match token {
            "" => Err(TokenPoolError::InvalidToken),
            SINGLE_WILDCARD => Ok(TokenId::Single),
            MULTI_WILDCARD => Ok(TokenId::Multi),
            literal => {
                if let Some(&id) = self.ids.get(literal) {
                    return Ok(TokenId::Literal(id));
                }
                let id = self.tokens.len() as u32;
                self.tokens.push(literal.into());
                self.ids.insert(literal.into(), id);
                Ok(TokenId::Literal(id))
            }
        }
    }

    /// Non-mutating probe used on the match path; matching never grows the
    /// pool.
    pub(crate) fn lookup(&self, token: &str) -> Option<TokenId> {
        match token {
            "" => None,
            SINGLE_WILDCARD => Some(TokenId::Single),
            MULTI_WILDCARD => Some(TokenId::Multi),
            literal => self.ids.get(literal).map(|&id| TokenId::Literal(id)),
        }
    }

    /// Inverse lookup for a previously issued id.
    pub(crate) fn resolve(&self, id: TokenId) -> Result<&str, TokenPoolError> {
        match id {
            TokenId::Single => Ok(SINGLE_WILDCARD),
            TokenId::Multi => Ok(MULTI_WILDCARD),
            TokenId::Literal(index) => self
                .tokens
                .get(index as usize)
                .map(|token| token.as_ref())
                .ok_or(TokenPoolError::OutOfRange(index)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{TokenId, TokenPool, TokenPoolError, MULTI_WILDCARD, SINGLE_WILDCARD};

    #[test]
    fn intern_is_idempotent_and_issues_dense_literal_ids() {
        let mut pool = TokenPool::new();

        let order = pool.intern("order").expect("intern order");
        let created = pool.intern("created").expect("intern created");
        let order_again = pool.intern("order").expect("re-intern order");

        assert_eq!(order, TokenId::Literal(0));
        assert_eq!(created, TokenId::Literal(1));
        assert_eq!(order, order_again);
    }

    #[test]
    fn wildcards_map_to_reserved_ids_outside_literal_space() {
        let mut pool = TokenPool::new();

        assert_eq!(pool.intern(SINGLE_WILDCARD), Ok(TokenId::Single));
        assert_eq!(pool.intern(MULTI_WILDCARD), Ok(TokenId::Multi));
        // The first literal still gets id 0; the wildcards consumed nothing.
        assert_eq!(pool.intern("order"), Ok(TokenId::Literal(0)));
    }

    #[test]
    fn empty_token_is_rejected() {
        let mut pool = TokenPool::new();

        assert_eq!(pool.intern(""), Err(TokenPoolError::InvalidToken));
        assert_eq!(pool.lookup(""), None);
    }

    #[test]
    fn resolve_round_trips_and_rejects_unknown_ids() {
        let mut pool = TokenPool::new();
        let id = pool.intern("order").expect("intern order");

        assert_eq!(pool.resolve(id), Ok("order"));
        assert_eq!(pool.resolve(TokenId::Single), Ok(SINGLE_WILDCARD));
        assert_eq!(pool.resolve(TokenId::Multi), Ok(MULTI_WILDCARD));
        assert_eq!(
            pool.resolve(TokenId::Literal(7)),
            Err(TokenPoolError::OutOfRange(7))
        );
    }

    #[test]
    fn lookup_does_not_grow_the_pool() {
        let mut pool = TokenPool::new();
        pool.intern("order").expect("intern order");

        assert_eq!(pool.lookup("never-interned"), None);
        assert_eq!(pool.lookup("order"), Some(TokenId::Literal(0)));
        // A literal registered after the failed probe still gets the next id.
        assert_eq!(pool.intern("never-interned"), Ok(TokenId::Literal(1)));
    }
}
