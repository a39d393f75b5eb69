/*!
# HTMLUglify: CSS Selectors.

Selectors are tokenized just far enough to find the class, ID, and
attribute parts. Everything else is carried along as the source text it
came from, so untouched selectors serialize exactly as they were written.
*/

use crate::Kind;
use cssparser::{
	CowRcStr,
	ParseError,
	Parser,
	ParserInput,
	serialize_identifier,
	serialize_string,
	Token,
};
use std::fmt;



#[derive(Debug, Clone, Eq, PartialEq)]
/// # Selector (List).
///
/// This holds the prelude of a style rule, which may contain any number of
/// comma-separated selectors.
pub struct Selector<'a>(Vec<SelectorToken<'a>>);

impl fmt::Display for Selector<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for t in &self.0 { fmt::Display::fmt(t, f)?; }
		Ok(())
	}
}

impl<'a> Selector<'a> {
	#[must_use]
	/// # Parse.
	///
	/// Tokenize the selector text. This never fails; anything that isn't
	/// understood is kept as-is.
	pub fn parse(src: &'a str) -> Self {
		let mut input = ParserInput::new(src);
		let mut parser = Parser::new(&mut input);
		Self(tokenize(&mut parser))
	}

	/// # Rewrite.
	///
	/// Pass each rewritable identifier (classes, IDs, and the values of
	/// `class`/`id`/`for` attribute selectors) through `cb`, left to right,
	/// replacing any for which it returns a new value.
	pub fn rewrite<F>(&mut self, cb: &mut F)
	where F: FnMut(Kind, &str) -> Option<String> {
		rewrite_tokens(&mut self.0, cb);
	}

	#[must_use]
	/// # Tokens.
	pub fn tokens(&self) -> &[SelectorToken<'a>] { &self.0 }
}



#[derive(Debug, Clone, Eq, PartialEq)]
/// # Selector Token.
pub enum SelectorToken<'a> {
	/// # Type (Tag) Selector.
	Tag(&'a str),

	/// # Class Selector.
	Class(Name<'a>),

	/// # ID Selector.
	Id(Name<'a>),

	/// # Attribute Selector.
	Attribute(Attribute<'a>),

	/// # Function or Parenthetical.
	///
	/// Pseudo-classes like `:not()` can hold selectors of their own, so the
	/// contents are tokenized too.
	Function {
		/// # Opening Text (e.g. `not(`).
		open: &'a str,

		/// # Inner Tokens.
		tokens: Vec<SelectorToken<'a>>,
	},

	/// # Anything Else.
	///
	/// Combinators, whitespace, commas, comments, pseudo-class names, etc.
	Other(&'a str),
}

impl fmt::Display for SelectorToken<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Tag(s) | Self::Other(s) => f.write_str(s),
			Self::Class(v) => v.write('.', f),
			Self::Id(v) => v.write('#', f),
			Self::Attribute(v) => fmt::Display::fmt(v, f),
			Self::Function { open, tokens } => {
				f.write_str(open)?;
				for t in tokens { fmt::Display::fmt(t, f)?; }
				f.write_str(")")
			},
		}
	}
}



#[derive(Debug, Clone, Eq, PartialEq)]
/// # Class/ID Name.
pub struct Name<'a> {
	/// # Source Text (Prefix Included).
	raw: &'a str,

	/// # Value (Unescaped).
	value: CowRcStr<'a>,

	/// # Replacement.
	code: Option<String>,
}

impl Name<'_> {
	#[must_use]
	/// # Value.
	pub fn value(&self) -> &str { &self.value }

	#[must_use]
	/// # Replacement.
	pub fn code(&self) -> Option<&str> { self.code.as_deref() }

	/// # Write.
	fn write(&self, prefix: char, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if let Some(code) = self.code.as_deref() {
			fmt::Write::write_char(f, prefix)?;
			serialize_identifier(code, f)
		}
		else { f.write_str(self.raw) }
	}
}



#[derive(Debug, Clone, Eq, PartialEq)]
/// # Attribute Selector.
///
/// The selector is split around its value, if any, so the value can be
/// swapped out without disturbing the name, operator, or flags.
pub struct Attribute<'a> {
	/// # Attribute Name.
	name: Option<CowRcStr<'a>>,

	/// # Everything Before the Value.
	head: &'a str,

	/// # Value.
	value: Option<AttributeValue<'a>>,

	/// # Everything After the Value.
	tail: &'a str,
}

impl fmt::Display for Attribute<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("[")?;
		f.write_str(self.head)?;
		if let Some(v) = &self.value {
			match v.code.as_deref() {
				Some(code) if v.quoted => serialize_string(code, f)?,
				Some(code) => serialize_identifier(code, f)?,
				None => f.write_str(v.raw)?,
			}
		}
		f.write_str(self.tail)?;
		f.write_str("]")
	}
}

impl Attribute<'_> {
	#[must_use]
	/// # Name.
	pub fn name(&self) -> Option<&str> { self.name.as_deref() }

	#[must_use]
	/// # Value (Unescaped).
	pub fn value(&self) -> Option<&str> { self.value.as_ref().map(|v| &*v.value) }

	#[must_use]
	/// # Replacement.
	pub fn code(&self) -> Option<&str> {
		self.value.as_ref().and_then(|v| v.code.as_deref())
	}

	#[must_use]
	/// # Kind.
	///
	/// Return the lookup kind, if this is a `class`, `id`, or `for`
	/// selector with a value to match.
	pub fn kind(&self) -> Option<Kind> {
		if self.value.is_some() { self.name().and_then(Kind::from_attribute) }
		else { None }
	}
}



#[derive(Debug, Clone, Eq, PartialEq)]
/// # Attribute Selector Value.
struct AttributeValue<'a> {
	/// # Source Text.
	raw: &'a str,

	/// # Value (Unescaped).
	value: CowRcStr<'a>,

	/// # Quoted?
	quoted: bool,

	/// # Replacement.
	code: Option<String>,
}



/// # Tokenize.
fn tokenize<'i>(parser: &mut Parser<'i, '_>) -> Vec<SelectorToken<'i>> {
	let mut out = Vec::new();
	let mut pseudo = false;

	loop {
		let start = parser.position();
		let Ok(token) = parser.next_including_whitespace_and_comments().cloned() else {
			break;
		};
		let colon = matches!(token, Token::Colon);

		let next = match token {
			// Pseudo-class and pseudo-element names look like tags.
			Token::Ident(_) =>
				if pseudo { SelectorToken::Other(parser.slice_from(start)) }
				else { SelectorToken::Tag(parser.slice_from(start)) },

			Token::IDHash(value) => SelectorToken::Id(Name {
				raw: parser.slice_from(start),
				value,
				code: None,
			}),

			Token::Delim('.') => class(parser, start),

			Token::SquareBracketBlock => SelectorToken::Attribute(attribute(parser)),

			Token::Function(_) | Token::ParenthesisBlock => {
				let open = parser.slice_from(start);
				let tokens = parser.parse_nested_block(|nested|
					Ok::<_, ParseError<'i, ()>>(tokenize(nested))
				).unwrap_or_default();
				SelectorToken::Function { open, tokens }
			},

			_ => SelectorToken::Other(parser.slice_from(start)),
		};

		pseudo = colon;
		out.push(next);
	}

	out
}

/// # Class.
///
/// A class is a `.` immediately followed by an identifier. If that's not
/// what follows, the dot is kept as-is.
fn class<'i>(parser: &mut Parser<'i, '_>, start: cssparser::SourcePosition)
-> SelectorToken<'i> {
	let state = parser.state();
	if let Ok(Token::Ident(value)) = parser.next_including_whitespace_and_comments() {
		let value = value.clone();
		return SelectorToken::Class(Name {
			raw: parser.slice_from(start),
			value,
			code: None,
		});
	}

	parser.reset(&state);
	SelectorToken::Other(parser.slice_from(start))
}

/// # Attribute.
///
/// Parse the contents of a `[...]` block.
fn attribute<'i>(parser: &mut Parser<'i, '_>) -> Attribute<'i> {
	parser.parse_nested_block(|nested| {
		let start = nested.position();
		let mut name = None;
		let mut operator = false;
		let mut split = None;

		loop {
			let before = nested.position();
			let Ok(token) = nested.next_including_whitespace_and_comments() else { break; };
			match token {
				Token::Ident(v) | Token::QuotedString(v) if operator && split.is_none() => {
					let quoted = matches!(token, Token::QuotedString(_));
					let value = v.clone();
					let after = nested.position();
					split.replace((before, after, value, quoted));
				},
				Token::Ident(v) if ! operator => { name.replace(v.clone()); },
				Token::Delim('=') |
				Token::IncludeMatch |
				Token::DashMatch |
				Token::PrefixMatch |
				Token::SuffixMatch |
				Token::SubstringMatch => { operator = true; },
				_ => {},
			}
		}

		let out = match split {
			Some((before, after, value, quoted)) => Attribute {
				name,
				head: nested.slice(start..before),
				value: Some(AttributeValue {
					raw: nested.slice(before..after),
					value,
					quoted,
					code: None,
				}),
				tail: nested.slice_from(after),
			},
			None => Attribute {
				name,
				head: nested.slice_from(start),
				value: None,
				tail: "",
			},
		};

		Ok::<_, ParseError<'i, ()>>(out)
	})
	.unwrap_or(Attribute { name: None, head: "", value: None, tail: "" })
}

/// # Rewrite Tokens.
fn rewrite_tokens<F>(tokens: &mut [SelectorToken<'_>], cb: &mut F)
where F: FnMut(Kind, &str) -> Option<String> {
	for token in tokens {
		match token {
			SelectorToken::Class(v) => { v.code = cb(Kind::Class, &v.value); },
			SelectorToken::Id(v) => { v.code = cb(Kind::Id, &v.value); },
			SelectorToken::Attribute(v) =>
				if
					let Some(kind) = v.kind() &&
					let Some(value) = v.value.as_mut()
				{
					value.code = cb(kind, &value.value);
				},
			SelectorToken::Function { tokens, .. } => { rewrite_tokens(tokens, cb); },
			SelectorToken::Tag(_) | SelectorToken::Other(_) => {},
		}
	}
}



#[cfg(test)]
mod tests {
	use super::*;

	/// # Uppercase Everything.
	fn shout(_kind: Kind, value: &str) -> Option<String> {
		Some(value.to_ascii_uppercase())
	}

	#[test]
	fn t_parse() {
		let sel = Selector::parse(".test#other > p:not(.x)[for='y' i], a::before");
		let tokens = sel.tokens();

		assert!(matches!(tokens[0], SelectorToken::Class(ref v) if v.value() == "test"));
		assert!(matches!(tokens[1], SelectorToken::Id(ref v) if v.value() == "other"));
		assert!(matches!(tokens[5], SelectorToken::Tag("p")));
		assert!(matches!(tokens[6], SelectorToken::Other(":")));
		assert!(matches!(
			tokens[7],
			SelectorToken::Function { open: "not(", ref tokens } if tokens.len() == 1
		));
		assert!(matches!(
			tokens[8],
			SelectorToken::Attribute(ref v) if v.kind() == Some(Kind::Id) && v.value() == Some("y")
		));

		// Pseudo-elements aren't tags.
		assert!(matches!(tokens.last(), Some(SelectorToken::Other("before"))));

		// Nothing changed, so it should print the same.
		assert_eq!(sel.to_string(), ".test#other > p:not(.x)[for='y' i], a::before");
	}

	#[test]
	fn t_passthrough() {
		for raw in [
			"",
			"*",
			"div  >  p ~ span + a",
			"a:hover, a:focus-visible",
			"li:nth-child(2n + 1)",
			"/* hi */ .a",
			"[data-foo]",
			"[class]",
			"svg|rect",
			". broken",
			"[unclosed",
		] {
			let mut sel = Selector::parse(raw);
			assert_eq!(sel.to_string(), raw.replace("[unclosed", "[unclosed]"), "{raw}");

			// Rewriting doesn't hurt anything that isn't a candidate.
			if ! raw.contains(".a") {
				sel.rewrite(&mut shout);
				assert_eq!(sel.to_string(), raw.replace("[unclosed", "[unclosed]"), "{raw}");
			}
		}
	}

	#[test]
	fn t_rewrite() {
		for (raw, expected) in [
			(".test#other", ".TEST#OTHER"),
			(".one, .two", ".ONE, .TWO"),
			("div.one > #two::before", "div.ONE > #TWO::before"),
			(":not(.one):is(#two, p)", ":not(.ONE):is(#TWO, p)"),
			("*[class*=test]", "*[class*=TEST]"),
			("[class~='test' i]", "[class~=\"TEST\" i]"),
			("[ID ^= \"x\"]", "[ID ^= \"X\"]"),
			("label[for=abe]", "label[for=ABE]"),
			("[href=abe]", "[href=abe]"),
			(".a\\:b", ".A\\:B"),
		] {
			let mut sel = Selector::parse(raw);
			sel.rewrite(&mut shout);
			assert_eq!(sel.to_string(), expected, "{raw}");
		}
	}

	#[test]
	fn t_rewrite_order() {
		let mut sel = Selector::parse("#a .b:not([for=c]), .d");
		let mut seen = Vec::new();
		sel.rewrite(&mut |kind, value| {
			seen.push((kind, value.to_owned()));
			None
		});

		assert_eq!(seen, vec![
			(Kind::Id, "a".to_owned()),
			(Kind::Class, "b".to_owned()),
			(Kind::Id, "c".to_owned()),
			(Kind::Class, "d".to_owned()),
		]);

		// Declined rewrites leave the text alone.
		assert_eq!(sel.to_string(), "#a .b:not([for=c]), .d");
	}

	#[test]
	fn t_escape() {
		// Replacements are escaped as needed.
		let mut sel = Selector::parse(".a[class='b']");
		sel.rewrite(&mut |_, v| Some(format!("{v} 1")));
		assert_eq!(sel.to_string(), ".a\\ 1[class=\"b 1\"]");
	}
}
