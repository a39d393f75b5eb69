/*!
# HTMLUglify

This library shortens the `class`, `id`, and `for` attribute values of an
HTML document, along with the matching selectors in its embedded `<style>`
elements, producing visually identical but smaller markup. It's mostly
useful for email templates and other size-sensitive snippets.

Names are assigned in the order they're first encountered, styles before
elements, so the same document and salt always produce the same result.

```
use htmluglify::Config;

let html = htmluglify::process(
	"<style>.test#other{}</style><p class='test' id='other'></p>",
	&Config::default().with_salt(""),
).unwrap();
assert_eq!(html, "<style>.a#b{}</style><p class=\"a\" id=\"b\"></p>");
```

## Whitelisting

Identifiers that must survive, say because a script looks them up, can be
whitelisted using CSS selector syntax, i.e. `#id` or `.class`. Whitelisted
values are left as-is everywhere they appear.

## Caveats

Only `<style>` elements are considered; inline `style` attributes, external
stylesheets, and scripts are not. Anything referring to an identifier by
name from somewhere this library can't see will need to be whitelisted.
Documents are parsed and re-serialized, so named character references
come back out as the characters they stand for, e.g. `&copy;` becomes `©`.
Only `&amp;`, `&lt;`, `&gt;`, `&nbsp;`, and (in attributes) the quote
character are re-encoded. The markup is equivalent, but not necessarily
byte-for-byte, so templates that must stay pure ASCII will need their
non-ASCII characters re-encoded afterward.
*/

#![deny(unsafe_code)]

#![warn(clippy::filetype_is_file)]
#![warn(clippy::integer_division)]
#![warn(clippy::needless_borrow)]
#![warn(clippy::nursery)]
#![warn(clippy::pedantic)]
#![warn(clippy::perf)]
#![warn(clippy::suboptimal_flops)]
#![warn(clippy::unneeded_field_pattern)]
#![warn(macro_use_extern_crate)]
#![warn(missing_copy_implementations)]
#![warn(missing_debug_implementations)]
#![warn(missing_docs)]
#![warn(non_ascii_idents)]
#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unreachable_pub)]
#![warn(unused_extern_crates)]
#![warn(unused_import_braces)]

#![allow(clippy::module_name_repetitions)]
#![allow(clippy::redundant_pub_crate)]



mod codec;
mod css;
mod dom;
mod element;
mod error;
mod lookup;
mod ser;
mod spec;
mod whitelist;

pub use codec::Codec;
pub use css::{
	Attribute,
	Name,
	Rule,
	Selector,
	SelectorToken,
	Stylesheet,
};
pub use dom::Tree;
pub use error::UglifyError;
pub use lookup::{
	Kind,
	LookupTable,
};
pub use whitelist::Whitelist;



/// # Default Salt.
pub const DEFAULT_SALT: &str = "use the force harry";



#[derive(Debug, Clone, Eq, PartialEq)]
/// # Configuration.
///
/// ## Examples
///
/// ```
/// use htmluglify::Config;
///
/// let config = Config::default()
///     .with_salt("pepper")
///     .with_whitelist(["#app", ".js-toggle"]);
/// assert_eq!(config.salt(), "pepper");
/// assert_eq!(config.whitelist().len(), 2);
/// ```
pub struct Config {
	/// # Salt.
	salt: String,

	/// # Whitelist.
	whitelist: Whitelist,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			salt: DEFAULT_SALT.to_owned(),
			whitelist: Whitelist::default(),
		}
	}
}

impl Config {
	#[must_use]
	/// # With Salt.
	///
	/// Change the salt used to shuffle the short-code alphabet. An empty
	/// salt leaves it in `a`–`z` order.
	pub fn with_salt<S: Into<String>>(mut self, salt: S) -> Self {
		self.salt = salt.into();
		self
	}

	#[must_use]
	/// # With Whitelist.
	///
	/// Replace the whitelist. Entries take the form `#id` or `.class`.
	pub fn with_whitelist<I, S>(mut self, list: I) -> Self
	where I: IntoIterator<Item = S>, S: AsRef<str> {
		self.whitelist = list.into_iter().collect();
		self
	}

	#[must_use]
	/// # Salt.
	pub fn salt(&self) -> &str { &self.salt }

	#[must_use]
	/// # Whitelist.
	pub const fn whitelist(&self) -> &Whitelist { &self.whitelist }
}



#[derive(Debug, Clone, Default, Eq, PartialEq)]
/// # Uglifier.
///
/// This holds the (immutable) settings for a run. A fresh [`LookupTable`]
/// is used for each document, so a single instance can be reused, even
/// across threads.
pub struct Uglifier {
	/// # Codec.
	codec: Codec,

	/// # Whitelist.
	whitelist: Whitelist,
}

impl From<&Config> for Uglifier {
	#[inline]
	fn from(src: &Config) -> Self { Self::new(src) }
}

impl Uglifier {
	#[must_use]
	/// # New.
	pub fn new(config: &Config) -> Self {
		Self {
			codec: Codec::new(&config.salt),
			whitelist: config.whitelist.clone(),
		}
	}

	/// # Process.
	///
	/// Parse the document (or fragment), rewrite its styles and elements,
	/// and return the result.
	///
	/// ## Errors
	///
	/// An error is returned only if the document can't be parsed or
	/// serialized at all. Malformed CSS is simply left as-is.
	pub fn process(&self, html: &str) -> Result<String, UglifyError> {
		self.process_with_lookups(html).map(|(out, _)| out)
	}

	/// # Process (With Lookups).
	///
	/// Same as [`Uglifier::process`], but also returns the lookup table
	/// that was built along the way.
	///
	/// ## Errors
	///
	/// See [`Uglifier::process`].
	pub fn process_with_lookups(&self, html: &str)
	-> Result<(String, LookupTable), UglifyError> {
		let tree = Tree::parse(html)?;
		let mut table = LookupTable::new();
		self.process_tree(&tree, &mut table);
		let out = tree.serialize()?;
		Ok((out, table))
	}

	/// # Process Tree.
	///
	/// Rewrite styles, then elements, sharing `table`.
	pub fn process_tree(&self, tree: &Tree, table: &mut LookupTable) {
		self.rewrite_styles(tree, table);
		self.rewrite_elements(tree, table);
	}

	/// # Rewrite Styles.
	///
	/// Rewrite the selectors of every `<style>` element in the tree, in
	/// document order.
	///
	/// This should run before [`Uglifier::rewrite_elements`] so that
	/// identifiers only matched by attribute selectors are registered before
	/// the elements using them come up.
	pub fn rewrite_styles(&self, tree: &Tree, table: &mut LookupTable) {
		tree.each_element(|node| if node.is_style() {
			let old = node.text();
			let new = self.rewrite_css(&old, table);
			if new != old { node.set_text(&new); }
		});
	}

	/// # Rewrite Elements.
	///
	/// Rewrite the `class`, `id`, and `for` attributes of every element in
	/// the tree.
	pub fn rewrite_elements(&self, tree: &Tree, table: &mut LookupTable) {
		element::rewrite(tree, &mut |kind, value| self.create_lookup(kind, value, table));
	}

	#[must_use]
	/// # Rewrite CSS.
	///
	/// Rewrite the selectors of a stylesheet, returning the result.
	///
	/// ## Examples
	///
	/// ```
	/// use htmluglify::{Config, LookupTable, Uglifier};
	///
	/// let ugly = Uglifier::new(&Config::default().with_salt(""));
	/// let mut table = LookupTable::new();
	/// assert_eq!(
	///     ugly.rewrite_css("@media print { .foo, #bar { color: red; } }", &mut table),
	///     "@media print { .a, #b { color: red; } }",
	/// );
	/// ```
	pub fn rewrite_css(&self, css: &str, table: &mut LookupTable) -> String {
		let mut sheet = Stylesheet::parse(css);
		sheet.rewrite(&mut |kind, value| self.create_lookup(kind, value, table));
		sheet.to_string()
	}

	/// # Create Lookup.
	///
	/// Return the code for `value`, recording it in the table if new.
	///
	/// Empty and whitelisted values return `None`.
	pub fn create_lookup(&self, kind: Kind, value: &str, table: &mut LookupTable)
	-> Option<String> {
		if value.is_empty() || self.whitelist.contains(kind, value) { return None; }

		let code = table.resolve(kind, value, &self.codec, &self.whitelist);
		table.insert(kind, value, code.as_str());
		Some(code)
	}

	#[must_use]
	/// # Is Whitelisted?
	///
	/// Same as [`Whitelist::contains`], but with the kind given by name.
	/// Kinds other than `class` and `id` are never whitelisted.
	pub fn is_whitelisted(&self, kind: &str, value: &str) -> bool {
		kind.parse::<Kind>().is_ok_and(|kind| self.whitelist.contains(kind, value))
	}
}



/// # Process.
///
/// This is a convenience wrapper around [`Uglifier::process`] for one-off
/// use.
///
/// ## Errors
///
/// See [`Uglifier::process`].
pub fn process(html: &str, config: &Config) -> Result<String, UglifyError> {
	Uglifier::new(config).process(html)
}
