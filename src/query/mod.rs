//! Match predicates and remote query expressions
//!
//! - `MatchPredicate`: title / mime type / owner clause groups built from the
//!   meta option map
//! - `ListQuery`: one directory-children request, renderable as a query
//!   expression for the remote

mod expression;
mod meta;
mod predicate;

pub use expression::{ListQuery, MaskConstraint, build_expression, sep_join_non_empty};
pub use meta::{
    EXACT_OWNER_KEY, EXACT_TITLE_KEY, MATCH_MIME_KEY, MATCH_OWNER_KEY, Meta, NOT_OWNER_KEY,
    SKIP_MIME_KEY, SORT_KEY, sort_keys,
};
pub use predicate::{Clause, Field, Joiner, MatchMode, MatchPredicate};
