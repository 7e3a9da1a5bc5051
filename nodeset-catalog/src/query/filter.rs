// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Filter expressions over attribute rows
//!
//! An expression is an ordered list of `(field, comparator, value)` clauses
//! combined with OR: a nodeset matches when any clause matches one of its
//! attribute rows. Two serialized forms are accepted:
//!
//! ```text
//! [{"field": "license", "comparator": "equals", "value": "MIT"},
//!  {"title": {"like": "robot"}}]
//!
//! license equals MIT or title like "machine tool"
//! ```
//!
//! Anything that does not parse, including an unknown comparator, makes the
//! whole expression malformed and the evaluator returns no candidates.

use crate::catalog::mapping::names;
use crate::error::{CatalogError, CatalogResult};
use crate::query::pattern::LikePattern;
use crate::storage::{AttributeStore, CatalogTable, NodesetId};
use log::{debug, warn};
use nom::{
    branch::alt,
    bytes::complete::{tag_no_case, take_while, take_while1},
    character::complete::{alpha1, char, multispace0, multispace1},
    combinator::{all_consuming, map},
    multi::separated_list1,
    sequence::{delimited, tuple},
    IResult,
};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::HashSet;

/// How a clause value is compared with an attribute value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Comparator {
    /// Exact match
    Equals,
    /// Case-sensitive substring
    Contains,
    /// Case-insensitive LIKE pattern
    Like,
}

/// Comparator keywords are case-insensitive, like the `or` separator
impl std::str::FromStr for Comparator {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "equals" => Ok(Comparator::Equals),
            "contains" => Ok(Comparator::Contains),
            "like" => Ok(Comparator::Like),
            _ => Err(CatalogError::UnknownComparator(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clause {
    pub field: String,
    pub comparator: Comparator,
    pub value: String,
}

impl Clause {
    pub fn new(field: impl Into<String>, comparator: Comparator, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            comparator,
            value: value.into(),
        }
    }

    /// Stored attribute name this clause tests
    pub fn attribute_name(&self) -> &str {
        match self.field.as_str() {
            "publicationDate" => names::PUBLICATION_DATE,
            "lastModified" => names::LAST_MODIFIED,
            other => other,
        }
    }
}

/// A parsed filter expression
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterExpression {
    clauses: Vec<Clause>,
}

impl FilterExpression {
    pub fn new(clauses: Vec<Clause>) -> Self {
        Self { clauses }
    }

    /// Parse either serialized form; blank input is the empty expression
    pub fn parse(raw: &str) -> CatalogResult<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(Self::default());
        }
        if raw.starts_with('[') || raw.starts_with('{') {
            Self::parse_json(raw)
        } else {
            Self::parse_text(raw)
        }
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    fn parse_json(raw: &str) -> CatalogResult<Self> {
        let value: JsonValue = serde_json::from_str(raw)
            .map_err(|e| CatalogError::MalformedFilter(e.to_string()))?;
        let clauses = match value {
            JsonValue::Array(items) => items
                .iter()
                .map(clause_from_json)
                .collect::<CatalogResult<Vec<_>>>()?,
            JsonValue::Object(_) => vec![clause_from_json(&value)?],
            other => {
                return Err(CatalogError::MalformedFilter(format!(
                    "expected an array or object, got {}",
                    other
                )))
            }
        };
        Ok(Self { clauses })
    }

    fn parse_text(raw: &str) -> CatalogResult<Self> {
        let (_, parts) = text_expression(raw)
            .map_err(|e| CatalogError::MalformedFilter(format!("{}: {}", raw, e)))?;
        let clauses = parts
            .into_iter()
            .map(|(field, comparator, value)| {
                Ok(Clause::new(field, comparator.parse()?, value))
            })
            .collect::<CatalogResult<Vec<_>>>()?;
        Ok(Self { clauses })
    }
}

fn json_scalar(value: &JsonValue) -> CatalogResult<String> {
    match value {
        JsonValue::String(s) => Ok(s.clone()),
        JsonValue::Number(n) => Ok(n.to_string()),
        JsonValue::Bool(b) => Ok(b.to_string()),
        other => Err(CatalogError::MalformedFilter(format!(
            "clause value must be a scalar, got {}",
            other
        ))),
    }
}

fn json_str<'v>(value: Option<&'v JsonValue>, what: &str) -> CatalogResult<&'v str> {
    value
        .and_then(JsonValue::as_str)
        .ok_or_else(|| CatalogError::MalformedFilter(format!("clause is missing '{}'", what)))
}

/// `{"field", "comparator", "value"}` or `{"<field>": {"<comparator>": value}}`
fn clause_from_json(value: &JsonValue) -> CatalogResult<Clause> {
    let object = value
        .as_object()
        .ok_or_else(|| CatalogError::MalformedFilter(format!("clause must be an object: {}", value)))?;

    // An attribute literally named "field" still uses the nested form
    if object.contains_key("field") && object.contains_key("comparator") {
        let field = json_str(object.get("field"), "field")?;
        let comparator: Comparator = json_str(object.get("comparator"), "comparator")?.parse()?;
        let value = object
            .get("value")
            .ok_or_else(|| CatalogError::MalformedFilter("clause is missing 'value'".to_string()))
            .and_then(json_scalar)?;
        return Ok(Clause::new(field, comparator, value));
    }

    match object.iter().next() {
        Some((field, JsonValue::Object(inner))) if object.len() == 1 && inner.len() == 1 => {
            let (comparator, value) = inner
                .iter()
                .next()
                .ok_or_else(|| CatalogError::MalformedFilter("empty comparator".to_string()))?;
            Ok(Clause::new(
                field.clone(),
                comparator.parse()?,
                json_scalar(value)?,
            ))
        }
        _ => Err(CatalogError::MalformedFilter(format!(
            "unrecognized clause: {}",
            value
        ))),
    }
}

fn field_name(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric() || c == '_' || c == '.')(input)
}

fn quoted(input: &str) -> IResult<&str, &str> {
    alt((
        delimited(char('"'), take_while(|c: char| c != '"'), char('"')),
        delimited(char('\''), take_while(|c: char| c != '\''), char('\'')),
    ))(input)
}

fn clause_value(input: &str) -> IResult<&str, &str> {
    alt((quoted, take_while1(|c: char| !c.is_whitespace())))(input)
}

fn text_clause(input: &str) -> IResult<&str, (String, String, String)> {
    map(
        tuple((field_name, multispace1, alpha1, multispace1, clause_value)),
        |(field, _, comparator, _, value)| {
            (field.to_string(), comparator.to_string(), value.to_string())
        },
    )(input)
}

fn text_expression(input: &str) -> IResult<&str, Vec<(String, String, String)>> {
    all_consuming(delimited(
        multispace0,
        separated_list1(
            tuple((multispace1, tag_no_case("or"), multispace1)),
            text_clause,
        ),
        multispace0,
    ))(input)
}

/// Reduces filter expressions to candidate nodeset identifiers
pub struct FilterEvaluator<'a> {
    store: &'a AttributeStore,
}

impl<'a> FilterEvaluator<'a> {
    pub fn new(store: &'a AttributeStore) -> Self {
        Self { store }
    }

    /// Candidates for a raw `where` argument
    ///
    /// Absent or blank → every identifier in the attribute table. Malformed
    /// → no identifiers.
    pub fn candidates(&self, raw: Option<&str>) -> Vec<NodesetId> {
        let raw = match raw.map(str::trim) {
            Some(text) if !text.is_empty() => text,
            _ => return self.store.distinct_ids(CatalogTable::Attributes),
        };

        match FilterExpression::parse(raw) {
            Ok(expression) => self.evaluate(&expression),
            Err(e) => {
                warn!("Rejecting filter expression: {}", e);
                Vec::new()
            }
        }
    }

    /// Union of the identifiers matched by each clause, first-seen order
    pub fn evaluate(&self, expression: &FilterExpression) -> Vec<NodesetId> {
        if expression.is_empty() {
            return self.store.distinct_ids(CatalogTable::Attributes);
        }

        let mut matchers = Vec::with_capacity(expression.clauses().len());
        for clause in expression.clauses() {
            match ClauseMatcher::new(clause) {
                Ok(matcher) => matchers.push(matcher),
                Err(e) => {
                    warn!("Rejecting filter clause {:?}: {}", clause, e);
                    return Vec::new();
                }
            }
        }

        let rows = self.store.rows(CatalogTable::Attributes);
        let mut seen = HashSet::new();
        let mut ids = Vec::new();

        for matcher in &matchers {
            for row in rows.iter().filter(|row| row.name == matcher.attribute) {
                if matcher.matches(&row.value) && seen.insert(row.nodeset_id) {
                    ids.push(row.nodeset_id);
                }
            }
        }

        debug!(
            "Filter with {} clause(s) matched {} nodeset(s)",
            matchers.len(),
            ids.len()
        );
        ids
    }
}

struct ClauseMatcher<'c> {
    attribute: &'c str,
    test: ValueTest<'c>,
}

enum ValueTest<'c> {
    Equals(&'c str),
    Contains(&'c str),
    Like(LikePattern),
}

impl<'c> ClauseMatcher<'c> {
    fn new(clause: &'c Clause) -> CatalogResult<Self> {
        let test = match clause.comparator {
            Comparator::Equals => ValueTest::Equals(&clause.value),
            Comparator::Contains => ValueTest::Contains(&clause.value),
            Comparator::Like => ValueTest::Like(
                LikePattern::new(&clause.value)
                    .map_err(|e| CatalogError::MalformedFilter(e.to_string()))?,
            ),
        };
        Ok(Self {
            attribute: clause.attribute_name(),
            test,
        })
    }

    fn matches(&self, value: &str) -> bool {
        match &self.test {
            ValueTest::Equals(expected) => value == *expected,
            ValueTest::Contains(needle) => value.contains(needle),
            ValueTest::Like(pattern) => pattern.is_match(value),
        }
    }
}
