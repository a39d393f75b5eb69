/*!
# HTMLUglify: CSS.

This is a very loose stylesheet parser, only concerned with separating
style rule selectors from everything else. Declarations and most at-rules
are left as opaque source slices, while `@media` and `@supports` groups are
descended into so their rules get the same treatment as top-level ones.

Malformed CSS is never an error. Unterminated blocks are closed on output
and anything else that doesn't fit is passed through untouched.
*/

pub(super) mod selector;

use crate::Kind;
use cssparser::{
	CowRcStr,
	ParseError,
	Parser,
	ParserInput,
	SourcePosition,
	Token,
};
pub use selector::{
	Attribute,
	Name,
	Selector,
	SelectorToken,
};
use std::fmt;



#[derive(Debug, Clone, Default, Eq, PartialEq)]
/// # Stylesheet.
///
/// ## Examples
///
/// ```
/// use htmluglify::Stylesheet;
///
/// let mut sheet = Stylesheet::parse("@media screen { .foo { color: red; } }");
/// sheet.rewrite(&mut |_kind, value| Some(value.to_uppercase()));
/// assert_eq!(sheet.to_string(), "@media screen { .FOO { color: red; } }");
/// ```
pub struct Stylesheet<'a>(Vec<Rule<'a>>);

impl fmt::Display for Stylesheet<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for r in &self.0 { fmt::Display::fmt(r, f)?; }
		Ok(())
	}
}

impl<'a> Stylesheet<'a> {
	#[must_use]
	/// # Parse.
	pub fn parse(src: &'a str) -> Self {
		let mut input = ParserInput::new(src);
		let mut parser = Parser::new(&mut input);
		Self(rule_list(&mut parser))
	}

	/// # Rewrite.
	///
	/// Run the selector of every style rule, including those nested in
	/// `@media`/`@supports` groups, through [`Selector::rewrite`], in source
	/// order.
	pub fn rewrite<F>(&mut self, cb: &mut F)
	where F: FnMut(Kind, &str) -> Option<String> {
		rewrite_rules(&mut self.0, cb);
	}

	#[must_use]
	/// # Rules.
	pub fn rules(&self) -> &[Rule<'a>] { &self.0 }
}



#[derive(Debug, Clone, Eq, PartialEq)]
/// # Rule.
pub enum Rule<'a> {
	/// # Style Rule.
	Style {
		/// # Selector.
		selector: Selector<'a>,

		/// # Declarations.
		body: &'a str,
	},

	/// # Conditional Group (`@media`/`@supports`).
	Group {
		/// # At-Keyword and Condition.
		prelude: &'a str,

		/// # Nested Rules.
		rules: Vec<Rule<'a>>,
	},

	/// # Other Block At-Rule.
	///
	/// Things like `@font-face` and `@keyframes`.
	Block {
		/// # At-Keyword and Prelude.
		prelude: &'a str,

		/// # Contents.
		body: &'a str,
	},

	/// # Anything Else.
	///
	/// Whitespace, comments, statement at-rules like `@import`, and any
	/// trailing junk.
	Raw(&'a str),
}

impl fmt::Display for Rule<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Style { selector, body } => write!(f, "{selector}{{{body}}}"),
			Self::Group { prelude, rules } => {
				f.write_str(prelude)?;
				f.write_str("{")?;
				for r in rules { fmt::Display::fmt(r, f)?; }
				f.write_str("}")
			},
			Self::Block { prelude, body } => write!(f, "{prelude}{{{body}}}"),
			Self::Raw(s) => f.write_str(s),
		}
	}
}



/// # Rule List.
///
/// Parse rules until the parser (or nested block) runs dry.
fn rule_list<'i>(parser: &mut Parser<'i, '_>) -> Vec<Rule<'i>> {
	let mut out = Vec::new();

	loop {
		let start = parser.position();
		let Ok(token) = parser.next_including_whitespace_and_comments().cloned() else {
			break;
		};

		let rule = match token {
			Token::WhiteSpace(_) |
			Token::Comment(_) |
			Token::CDO |
			Token::CDC |
			Token::Semicolon => Rule::Raw(parser.slice_from(start)),
			Token::AtKeyword(name) => at_rule(parser, start, &name),
			Token::CurlyBracketBlock => Rule::Style {
				selector: Selector::parse(""),
				body: block_body(parser),
			},
			ref t => style_rule(parser, start, is_block(t)),
		};

		out.push(rule);
	}

	out
}

/// # At-Rule.
///
/// The at-keyword has already been consumed; this picks up from there.
fn at_rule<'i>(parser: &mut Parser<'i, '_>, start: SourcePosition, name: &CowRcStr<'_>)
-> Rule<'i> {
	let mut end = parser.position();
	loop {
		let Ok(token) = parser.next_including_whitespace_and_comments() else {
			return Rule::Raw(parser.slice_from(start));
		};

		match token {
			Token::Semicolon => return Rule::Raw(parser.slice_from(start)),
			Token::CurlyBracketBlock => {
				let prelude = parser.slice(start..end);
				return
					if is_group(name) {
						let rules = parser.parse_nested_block(|nested|
							Ok::<_, ParseError<'i, ()>>(rule_list(nested))
						).unwrap_or_default();
						Rule::Group { prelude, rules }
					}
					else {
						Rule::Block { prelude, body: block_body(parser) }
					};
			},
			_ => {
				let opened = is_block(token);
				end = prelude_end(parser, opened);
			},
		}
	}
}

/// # Style Rule.
///
/// The first token of the selector has already been consumed; everything
/// up to the opening brace belongs to it.
fn style_rule<'i>(parser: &mut Parser<'i, '_>, start: SourcePosition, opened: bool)
-> Rule<'i> {
	let mut end = prelude_end(parser, opened);
	loop {
		let Ok(token) = parser.next_including_whitespace_and_comments() else {
			return Rule::Raw(parser.slice_from(start));
		};

		if matches!(token, Token::CurlyBracketBlock) {
			let selector = Selector::parse(parser.slice(start..end));
			return Rule::Style { selector, body: block_body(parser) };
		}

		let block = is_block(token);
		end = prelude_end(parser, block);
	}
}

/// # Prelude End.
///
/// Return the position following the token just read. If that token opened
/// a block, the block is consumed first, otherwise the position would point
/// just past the opening bracket.
fn prelude_end(parser: &mut Parser<'_, '_>, opened: bool) -> SourcePosition {
	if opened { skip_block(parser); }
	parser.position()
}

/// # Skip Block.
fn skip_block(parser: &mut Parser<'_, '_>) {
	let _res = parser.parse_nested_block(|nested| {
		while nested.next_including_whitespace_and_comments().is_ok() {}
		Ok::<_, ParseError<'_, ()>>(())
	});
}

/// # Opens a Block?
///
/// Curly blocks are handled separately by the callers.
const fn is_block(token: &Token<'_>) -> bool {
	matches!(token, Token::Function(_) | Token::ParenthesisBlock | Token::SquareBracketBlock)
}

/// # Block Body.
///
/// Return the contents of the block just opened, verbatim.
fn block_body<'i>(parser: &mut Parser<'i, '_>) -> &'i str {
	parser.parse_nested_block(|nested| {
		let start = nested.position();
		while nested.next_including_whitespace_and_comments().is_ok() {}
		Ok::<_, ParseError<'i, ()>>(nested.slice_from(start))
	}).unwrap_or_default()
}

/// # Is Conditional Group?
fn is_group(name: &str) -> bool {
	name.eq_ignore_ascii_case("media") || name.eq_ignore_ascii_case("supports")
}

/// # Rewrite Rules.
fn rewrite_rules<F>(rules: &mut [Rule<'_>], cb: &mut F)
where F: FnMut(Kind, &str) -> Option<String> {
	for rule in rules {
		match rule {
			Rule::Style { selector, .. } => { selector.rewrite(cb); },
			Rule::Group { rules, .. } => { rewrite_rules(rules, cb); },
			Rule::Block { .. } | Rule::Raw(_) => {},
		}
	}
}
