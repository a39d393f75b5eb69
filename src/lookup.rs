/*!
# HTMLUglify: Lookup Table.

This module holds the run-scoped mapping of original identifiers to their
short codes. A fresh table is created for each document; the style and
element passes of that document share it.
*/

use crate::{
	Codec,
	Whitelist,
};
use indexmap::IndexMap;
use std::{
	fmt,
	str::FromStr,
};



#[derive(Debug, Clone, Copy, Eq, Hash, PartialEq)]
/// # Identifier Kind.
///
/// Classes and IDs live in separate namespaces. The `for` attribute and
/// `for`-targeting attribute selectors resolve to `Id` since they point at
/// an element's `id`.
pub enum Kind {
	/// # Class.
	Class,

	/// # ID.
	Id,
}

impl fmt::Display for Kind {
	#[inline]
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for Kind {
	type Err = ();

	/// # From Kind Name.
	///
	/// Only the literal names `class` and `id` are recognized.
	fn from_str(src: &str) -> Result<Self, Self::Err> {
		match src {
			"class" => Ok(Self::Class),
			"id" => Ok(Self::Id),
			_ => Err(()),
		}
	}
}

impl Kind {
	#[must_use]
	/// # As Str.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Class => "class",
			Self::Id => "id",
		}
	}

	#[must_use]
	/// # Selector Prefix.
	pub const fn prefix(self) -> char {
		match self {
			Self::Class => '.',
			Self::Id => '#',
		}
	}

	#[must_use]
	/// # From Attribute Name.
	///
	/// Return the kind an HTML attribute (or attribute selector) of this
	/// name resolves to, if any. The match is case-insensitive.
	pub fn from_attribute(name: &str) -> Option<Self> {
		if name.eq_ignore_ascii_case("class") { Some(Self::Class) }
		else if name.eq_ignore_ascii_case("id") || name.eq_ignore_ascii_case("for") {
			Some(Self::Id)
		}
		else { None }
	}
}



#[derive(Debug, Clone, Default, Eq, PartialEq)]
/// # Lookup Table.
///
/// Entries are kept in insertion order, which matters for substring
/// matching: the first key found wins.
pub struct LookupTable {
	/// # Classes.
	class: IndexMap<String, String>,

	/// # IDs.
	id: IndexMap<String, String>,

	/// # Skipped Counters.
	///
	/// Codes colliding with whitelisted values are passed over; this keeps
	/// track of how many, so the counter never repeats.
	skipped: usize,
}

impl LookupTable {
	#[must_use]
	/// # New (Empty) Table.
	pub fn new() -> Self { Self::default() }

	#[must_use]
	/// # Length.
	///
	/// Return the total number of entries, both kinds combined.
	pub fn len(&self) -> usize { self.class.len() + self.id.len() }

	#[must_use]
	/// # Is Empty?
	pub fn is_empty(&self) -> bool { self.class.is_empty() && self.id.is_empty() }

	/// # Iterate Entries.
	///
	/// Return an iterator over the `(original, code)` pairs for `kind`, in
	/// insertion order.
	pub fn iter(&self, kind: Kind) -> impl Iterator<Item = (&str, &str)> {
		self.entries(kind).iter().map(|(k, v)| (k.as_str(), v.as_str()))
	}

	#[must_use]
	/// # Find (Exact).
	pub fn find(&self, kind: Kind, value: &str) -> Option<&str> {
		self.entries(kind).get(value).map(String::as_str)
	}

	#[must_use]
	/// # Find (Substring).
	///
	/// Look for an existing key contained within `value`. If there is one,
	/// the first occurrence of that key is swapped for its code and the
	/// result returned.
	///
	/// Keys are checked in insertion order; the first hit wins, regardless
	/// of whether a later key would have been a longer or earlier match.
	pub fn find_by_substring(&self, kind: Kind, value: &str) -> Option<String> {
		self.entries(kind).iter().find_map(|(k, v)|
			if k.is_empty() || ! value.contains(k.as_str()) { None }
			else { Some(value.replacen(k.as_str(), v, 1)) }
		)
	}

	/// # Mint.
	///
	/// Generate the code for the next counter. The counter is the combined
	/// number of entries (plus any skips), so the Nth code minted during a
	/// run is always the codec's Nth output.
	///
	/// Codes matching a whitelisted value of the same kind are skipped. This
	/// does not insert anything.
	pub fn mint(&mut self, kind: Kind, codec: &Codec, whitelist: &Whitelist) -> String {
		loop {
			let code = codec.encode(self.len() + self.skipped);
			if whitelist.contains(kind, &code) { self.skipped += 1; }
			else { return code; }
		}
	}

	/// # Insert.
	pub fn insert<K, V>(&mut self, kind: Kind, value: K, code: V)
	where K: Into<String>, V: Into<String> {
		self.entries_mut(kind).insert(value.into(), code.into());
	}

	/// # Resolve.
	///
	/// Return the code for `value`, trying an exact match, then a substring
	/// match, then minting a new one. The result is not inserted; that's up
	/// to the caller.
	pub fn resolve(&mut self, kind: Kind, value: &str, codec: &Codec, whitelist: &Whitelist)
	-> String {
		if let Some(code) = self.find(kind, value) { code.to_owned() }
		else if let Some(code) = self.find_by_substring(kind, value) { code }
		else { self.mint(kind, codec, whitelist) }
	}

	#[must_use]
	/// # Entries by Kind.
	const fn entries(&self, kind: Kind) -> &IndexMap<String, String> {
		match kind {
			Kind::Class => &self.class,
			Kind::Id => &self.id,
		}
	}

	#[must_use]
	/// # Entries by Kind (Mutable).
	const fn entries_mut(&mut self, kind: Kind) -> &mut IndexMap<String, String> {
		match kind {
			Kind::Class => &mut self.class,
			Kind::Id => &mut self.id,
		}
	}
}



#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn t_kind() {
		assert_eq!("class".parse::<Kind>(), Ok(Kind::Class));
		assert_eq!("id".parse::<Kind>(), Ok(Kind::Id));
		assert!("for".parse::<Kind>().is_err());
		assert!("foo".parse::<Kind>().is_err());

		assert_eq!(Kind::from_attribute("class"), Some(Kind::Class));
		assert_eq!(Kind::from_attribute("CLASS"), Some(Kind::Class));
		assert_eq!(Kind::from_attribute("id"), Some(Kind::Id));
		assert_eq!(Kind::from_attribute("for"), Some(Kind::Id));
		assert_eq!(Kind::from_attribute("href"), None);

		assert_eq!(Kind::Class.to_string(), "class");
		assert_eq!(Kind::Id.prefix(), '#');
	}

	#[test]
	fn t_find() {
		let mut table = LookupTable::new();
		table.insert(Kind::Class, "something", "zzz");

		assert_eq!(table.find(Kind::Class, "something"), Some("zzz"));
		assert_eq!(table.find(Kind::Class, "other"), None);
		assert_eq!(table.find(Kind::Id, "something"), None);
	}

	#[test]
	fn t_find_by_substring() {
		let mut table = LookupTable::new();
		table.insert(Kind::Class, "something", "zzz");

		assert_eq!(table.find_by_substring(Kind::Class, "other"), None);
		assert_eq!(
			table.find_by_substring(Kind::Class, "somethingElse").as_deref(),
			Some("zzzElse"),
		);
		assert_eq!(
			table.find_by_substring(Kind::Class, "ZZsomethingZZ").as_deref(),
			Some("ZZzzzZZ"),
		);

		// Only the first occurrence is replaced.
		assert_eq!(
			table.find_by_substring(Kind::Class, "somethingsomething").as_deref(),
			Some("zzzsomething"),
		);

		// Insertion order decides between competing keys.
		table.insert(Kind::Class, "thing", "q");
		assert_eq!(
			table.find_by_substring(Kind::Class, "anything-something").as_deref(),
			Some("anything-zzz"),
		);
	}

	#[test]
	fn t_mint() {
		let codec = Codec::new("");
		let none = Whitelist::default();
		let mut table = LookupTable::new();

		// Minting doesn't insert.
		assert_eq!(table.mint(Kind::Id, &codec, &none), "a");
		assert_eq!(table.mint(Kind::Class, &codec, &none), "a");
		assert!(table.is_empty());

		// The counter spans both kinds.
		table.insert(Kind::Id, "one", "a");
		assert_eq!(table.mint(Kind::Class, &codec, &none), "b");
		table.insert(Kind::Class, "two", "b");
		assert_eq!(table.mint(Kind::Id, &codec, &none), "c");
		assert_eq!(table.len(), 2);
	}

	#[test]
	fn t_mint_reserved() {
		let codec = Codec::new("");
		let list: Whitelist = [".a"].into_iter().collect();
		let mut table = LookupTable::new();

		// The first class code would be "a", which is taken.
		let code = table.mint(Kind::Class, &codec, &list);
		assert_eq!(code, "b");
		table.insert(Kind::Class, "newClass", code);

		// Subsequent codes keep moving forward.
		assert_eq!(table.mint(Kind::Class, &codec, &list), "c");

		// IDs aren't affected by class reservations.
		let mut table = LookupTable::new();
		assert_eq!(table.mint(Kind::Id, &codec, &list), "a");
	}

	#[test]
	fn t_resolve() {
		let codec = Codec::new("");
		let none = Whitelist::default();
		let mut table = LookupTable::new();
		table.insert(Kind::Class, "test", "A");
		table.insert(Kind::Class, "testOther", "B");
		table.insert(Kind::Class, "otratest", "en");

		// Exact.
		assert_eq!(table.resolve(Kind::Class, "test", &codec, &none), "A");
		assert_eq!(table.resolve(Kind::Class, "otratest", &codec, &none), "en");

		// Substring.
		assert_eq!(table.resolve(Kind::Class, "alphatest", &codec, &none), "alphaA");

		// New.
		assert_eq!(table.resolve(Kind::Class, "fresh", &codec, &none), "d");
		assert_eq!(table.resolve(Kind::Id, "test", &codec, &none), "d");
		assert_eq!(table.len(), 3);

		let iter: Vec<_> = table.iter(Kind::Class).collect();
		assert_eq!(iter, vec![("test", "A"), ("testOther", "B"), ("otratest", "en")]);
	}
}
