//! Search expression grammar.
//!
//! A clause is either a single `field op value` comparison or two
//! parenthesized sub-expressions joined by `and`/`or`. Parentheses are
//! mandatory for composition; composition without them is rejected rather
//! than guessed at.

use std::sync::LazyLock;

use regex::Regex;

/// Parenthesized composites nest through recursion; anything deeper than this
/// is adversarial input.
pub const MAX_EXPR_DEPTH: usize = 64;

static COMPOSITE: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^\s*\(\s*(.+)\)\s+([A-Za-z]+)\s+\(\s*(.+)\)\s*$")
		.expect("Composite pattern must compile.")
});
static COMPARISON: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^\s*(\S+)\s+([A-Za-z]+)\s+(.+?)\s*$").expect("Comparison pattern must compile.")
});
static VALUE_KEYWORD: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"(?i)(^|\s)(and|or)(\s|$)").expect("Keyword pattern must compile.")
});

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CompareOp {
	Eq,
	Ne,
	Lt,
	Gt,
}
impl CompareOp {
	fn parse(token: &str) -> Option<Self> {
		match token.to_ascii_lowercase().as_str() {
			"eq" => Some(Self::Eq),
			"ne" => Some(Self::Ne),
			"lt" => Some(Self::Lt),
			"gt" => Some(Self::Gt),
			_ => None,
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub enum Predicate {
	Compare { field: String, op: CompareOp, value: String },
	And(Box<Predicate>, Box<Predicate>),
	Or(Box<Predicate>, Box<Predicate>),
}

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum ParseError {
	#[error("Malformed search expression.")]
	Malformed,
}

pub fn parse(text: &str) -> Result<Predicate, ParseError> {
	parse_expr(text, 0)
}

fn parse_expr(text: &str, depth: usize) -> Result<Predicate, ParseError> {
	if depth > MAX_EXPR_DEPTH {
		return Err(ParseError::Malformed);
	}

	if let Some(captures) = COMPOSITE.captures(text) {
		let left = parse_expr(&captures[1], depth + 1)?;
		let right = parse_expr(&captures[3], depth + 1)?;

		// The joining keyword is captured loosely so a typo fails here
		// instead of falling through to the comparison branch.
		return match captures[2].to_ascii_lowercase().as_str() {
			"and" => Ok(Predicate::And(Box::new(left), Box::new(right))),
			"or" => Ok(Predicate::Or(Box::new(left), Box::new(right))),
			_ => Err(ParseError::Malformed),
		};
	}

	let captures = COMPARISON.captures(text).ok_or(ParseError::Malformed)?;
	let field = &captures[1];
	let op = CompareOp::parse(&captures[2]).ok_or(ParseError::Malformed)?;
	let value = &captures[3];

	if field.contains(['(', ')']) || value.contains(['(', ')']) {
		return Err(ParseError::Malformed);
	}
	// A bare `and`/`or` inside the value means composition without
	// parentheses; reject it instead of comparing against the raw text.
	if VALUE_KEYWORD.is_match(value) {
		return Err(ParseError::Malformed);
	}

	Ok(Predicate::Compare { field: field.to_string(), op, value: value.to_string() })
}
