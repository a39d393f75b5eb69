/*!
# HTMLUglify: Whitelist.
*/

use crate::Kind;
use indexmap::IndexSet;



#[derive(Debug, Clone, Default, Eq, PartialEq)]
/// # Whitelist.
///
/// Identifiers listed here are never rewritten. Entries take the same form
/// they would in a CSS selector: `#id` or `.class`.
///
/// Entries without a recognized prefix are kept (they're harmless), but
/// will never match anything.
pub struct Whitelist(IndexSet<String>);

impl<S: AsRef<str>> FromIterator<S> for Whitelist {
	fn from_iter<I: IntoIterator<Item = S>>(src: I) -> Self {
		Self(
			src.into_iter()
				.filter_map(|v| {
					let v = v.as_ref().trim();
					if v.is_empty() { None }
					else { Some(v.to_owned()) }
				})
				.collect()
		)
	}
}

impl Whitelist {
	#[must_use]
	/// # Contains?
	///
	/// Returns `true` if `value` is whitelisted under `kind`.
	pub fn contains(&self, kind: Kind, value: &str) -> bool {
		let prefix = kind.prefix();
		self.0.iter().any(|v|
			v.len() == value.len() + 1 &&
			v.starts_with(prefix) &&
			v.ends_with(value)
		)
	}

	#[must_use]
	/// # Is Empty?
	pub fn is_empty(&self) -> bool { self.0.is_empty() }

	#[must_use]
	/// # Length.
	pub fn len(&self) -> usize { self.0.len() }

	/// # Iterate Entries.
	pub fn iter(&self) -> impl Iterator<Item = &str> {
		self.0.iter().map(String::as_str)
	}
}



#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn t_contains() {
		let list: Whitelist = ["#theid", ".theclass", "#★", ".★"].into_iter().collect();
		assert_eq!(list.len(), 4);

		assert!(list.contains(Kind::Id, "theid"));
		assert!(! list.contains(Kind::Class, "theid"));
		assert!(list.contains(Kind::Class, "theclass"));
		assert!(! list.contains(Kind::Id, "theclass"));
		assert!(list.contains(Kind::Id, "★"));
		assert!(list.contains(Kind::Class, "★"));

		// Partial matches don't count.
		assert!(! list.contains(Kind::Id, "the"));
		assert!(! list.contains(Kind::Id, "id"));
		assert!(! list.contains(Kind::Class, "theclasses"));
	}

	#[test]
	fn t_from_iter() {
		let list: Whitelist = [" #a ", "", "  ", ".b", ".b"].into_iter().collect();
		assert_eq!(list.len(), 2);
		assert_eq!(list.iter().collect::<Vec<_>>(), vec!["#a", ".b"]);
		assert!(list.contains(Kind::Id, "a"));

		assert!(Whitelist::default().is_empty());
	}
}
