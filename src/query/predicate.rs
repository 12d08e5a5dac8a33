//! Compound match predicates
//!
//! A predicate is three clause groups (titles, mime types, owners). Groups are
//! ANDed together. Within a clause the values are combined with the clause's
//! own joiner. An empty group, or an empty predicate, places no constraint.

use crate::entry::Entry;

use super::meta::{
    EXACT_OWNER_KEY, EXACT_TITLE_KEY, MATCH_MIME_KEY, MATCH_OWNER_KEY, Meta, NOT_OWNER_KEY,
    SKIP_MIME_KEY,
};

/// How a clause compares its values against an entry attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    Equals,
    Like,
    Not,
    NotIn,
}

/// How the values inside one clause combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Joiner {
    And,
    Or,
}

impl Joiner {
    fn as_str(self) -> &'static str {
        match self {
            Joiner::And => " and ",
            Joiner::Or => " or ",
        }
    }
}

/// The entry attribute a clause group constrains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    MimeType,
    Owners,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    pub mode: MatchMode,
    pub values: Vec<String>,
    pub in_trash: bool,
    pub joiner: Joiner,
}

impl Clause {
    pub fn new(mode: MatchMode, values: Vec<String>, joiner: Joiner) -> Self {
        Self {
            mode,
            values,
            in_trash: false,
            joiner,
        }
    }

    pub fn in_trash(mut self, in_trash: bool) -> Self {
        self.in_trash = in_trash;
        self
    }

    /// Render this clause for `field`, or `None` if it has no values.
    pub fn expression(&self, field: Field) -> Option<String> {
        if self.values.is_empty() {
            return None;
        }

        let terms: Vec<String> = self
            .values
            .iter()
            .map(|value| render_term(field, self.mode, value))
            .collect();

        let mut expr = format!("({})", terms.join(self.joiner.as_str()));
        if self.in_trash {
            expr = format!("({} and trashed=true)", expr);
        }
        Some(expr)
    }

    pub fn matches(&self, field: Field, entry: &Entry) -> bool {
        if self.in_trash && !entry.trashed {
            return false;
        }
        if self.values.is_empty() {
            return true;
        }

        let mut hits = self
            .values
            .iter()
            .map(|value| term_matches(field, self.mode, value, entry));

        match self.joiner {
            Joiner::Or => hits.any(|hit| hit),
            Joiner::And => hits.all(|hit| hit),
        }
    }
}

/// The compound filter applied to listed children and to match searches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchPredicate {
    /// Scope for match searches; unused when filtering a directory's children.
    pub dir_path: String,
    pub in_trash: bool,
    pub titles: Vec<Clause>,
    pub mime_types: Vec<Clause>,
    pub owners: Vec<Clause>,
}

impl MatchPredicate {
    /// Build a predicate from the recognised meta keys.
    ///
    /// `exact_match` decides whether `exact-title` values compare with
    /// `Equals` or with the fuzzy `Like`. Keys that are absent add nothing.
    pub fn from_meta(meta: Option<&Meta>, exact_match: bool, in_trash: bool) -> Self {
        let mut predicate = MatchPredicate {
            in_trash,
            ..Default::default()
        };

        let Some(meta) = meta else {
            return predicate;
        };

        if let Some(skip) = meta.get(SKIP_MIME_KEY) {
            predicate
                .mime_types
                .push(Clause::new(MatchMode::Not, skip.clone(), Joiner::And).in_trash(in_trash));
        }

        if let Some(mimes) = meta.get(MATCH_MIME_KEY) {
            predicate
                .mime_types
                .push(Clause::new(MatchMode::Equals, mimes.clone(), Joiner::Or).in_trash(in_trash));
        }

        if let Some(titles) = meta.get(EXACT_TITLE_KEY) {
            let mode = if exact_match {
                MatchMode::Equals
            } else {
                MatchMode::Like
            };
            predicate
                .titles
                .push(Clause::new(mode, titles.clone(), Joiner::Or).in_trash(in_trash));
        }

        if let Some(owners) = meta.get(EXACT_OWNER_KEY) {
            predicate
                .owners
                .push(Clause::new(MatchMode::Equals, owners.clone(), Joiner::Or));
        }

        if let Some(owners) = meta.get(MATCH_OWNER_KEY) {
            predicate
                .owners
                .push(Clause::new(MatchMode::Like, owners.clone(), Joiner::Or));
        }

        if let Some(owners) = meta.get(NOT_OWNER_KEY) {
            predicate
                .owners
                .push(Clause::new(MatchMode::NotIn, owners.clone(), Joiner::And));
        }

        predicate
    }

    pub fn with_dir_path(mut self, dir_path: impl Into<String>) -> Self {
        self.dir_path = dir_path.into();
        self
    }

    pub fn is_empty(&self) -> bool {
        self.groups().all(|(_, clauses)| clauses.is_empty())
    }

    fn groups(&self) -> impl Iterator<Item = (Field, &Vec<Clause>)> {
        [
            (Field::Title, &self.titles),
            (Field::MimeType, &self.mime_types),
            (Field::Owners, &self.owners),
        ]
        .into_iter()
    }

    /// Render the predicate as a query-language fragment.
    ///
    /// Returns an empty string for a predicate with no clauses.
    pub fn expression(&self) -> String {
        let groups: Vec<String> = self
            .groups()
            .filter_map(|(field, clauses)| {
                let parts: Vec<String> = clauses
                    .iter()
                    .filter_map(|clause| clause.expression(field))
                    .collect();
                (!parts.is_empty()).then(|| parts.join(" and "))
            })
            .collect();

        groups.join(" and ")
    }

    pub fn matches(&self, entry: &Entry) -> bool {
        self.groups().all(|(field, clauses)| {
            clauses.iter().all(|clause| clause.matches(field, entry))
        })
    }
}

fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'"))
}

fn render_term(field: Field, mode: MatchMode, value: &str) -> String {
    let quoted = quote(value);
    match field {
        // The remote grammar has no substring operator on owners.
        Field::Owners => match mode {
            MatchMode::Equals | MatchMode::Like => format!("{} in owners", quoted),
            MatchMode::Not | MatchMode::NotIn => format!("not {} in owners", quoted),
        },
        Field::Title | Field::MimeType => {
            let key = if field == Field::Title { "title" } else { "mimeType" };
            match mode {
                MatchMode::Equals => format!("{} = {}", key, quoted),
                MatchMode::Like => format!("{} contains {}", key, quoted),
                MatchMode::Not => format!("{} != {}", key, quoted),
                MatchMode::NotIn => format!("not {} contains {}", key, quoted),
            }
        }
    }
}

fn contains_fold(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn term_matches(field: Field, mode: MatchMode, value: &str, entry: &Entry) -> bool {
    match field {
        Field::Owners => {
            let owners = &entry.owner_names;
            match mode {
                MatchMode::Equals => owners.iter().any(|o| o == value),
                MatchMode::Like => owners.iter().any(|o| contains_fold(o, value)),
                MatchMode::Not => owners.iter().all(|o| o != value),
                MatchMode::NotIn => !owners.iter().any(|o| o == value),
            }
        }
        Field::Title | Field::MimeType => {
            let attr = if field == Field::Title {
                entry.name.as_str()
            } else {
                entry.mime_type.as_str()
            };
            match mode {
                MatchMode::Equals => attr == value,
                MatchMode::Like => contains_fold(attr, value),
                MatchMode::Not => attr != value,
                MatchMode::NotIn => !contains_fold(attr, value),
            }
        }
    }
}
