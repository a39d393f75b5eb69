/*!
# HTMLUglify: Elements.
*/

use crate::{
	dom::Handle,
	Kind,
	Tree,
};



/// # Rewrite Elements.
///
/// Walk the tree in document order, passing each element's `class`, `id`,
/// and `for` values (in that order) through `cb`.
///
/// Classes are handled one at a time, while `id` and `for` are taken whole.
/// Both of the latter resolve to [`Kind::Id`] so a `<label>` keeps pointing
/// at its target.
pub(crate) fn rewrite<F>(tree: &Tree, cb: &mut F)
where F: FnMut(Kind, &str) -> Option<String> {
	tree.each_element(|node| rewrite_element(node, cb));
}

/// # Rewrite Element.
fn rewrite_element<F>(node: &Handle, cb: &mut F)
where F: FnMut(Kind, &str) -> Option<String> {
	if
		let Some(old) = node.attr("class") &&
		let Some(new) = rewrite_class(&old, cb)
	{
		node.set_attr("class", &new);
	}

	for key in ["id", "for"] {
		if
			let Some(old) = node.attr(key) &&
			! old.is_empty() &&
			let Some(new) = cb(Kind::Id, &old)
		{
			node.set_attr(key, &new);
		}
	}
}

/// # Rewrite Class List.
///
/// Split on whitespace, rewrite each class, and glue them back together
/// with single spaces. Classes `cb` declines to rewrite are kept as-is.
///
/// Returns `None` if there are no classes.
fn rewrite_class<F>(src: &str, cb: &mut F) -> Option<String>
where F: FnMut(Kind, &str) -> Option<String> {
	let mut out = String::with_capacity(src.len());
	for class in src.split_ascii_whitespace() {
		if ! out.is_empty() { out.push(' '); }
		match cb(Kind::Class, class) {
			Some(new) => out.push_str(&new),
			None => out.push_str(class),
		}
	}

	if out.is_empty() { None }
	else { Some(out) }
}



#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn t_rewrite_class() {
		let mut cb = |_: Kind, v: &str| if v.starts_with("keep") { None } else { Some(v.len().to_string()) };

		assert_eq!(rewrite_class("", &mut cb), None);
		assert_eq!(rewrite_class("  \t ", &mut cb), None);
		assert_eq!(rewrite_class("foo", &mut cb).as_deref(), Some("3"));
		assert_eq!(rewrite_class("  foo   keepme\nab  ", &mut cb).as_deref(), Some("3 keepme 2"));
	}

	#[test]
	fn t_rewrite() {
		let tree = Tree::parse(
			"<form id='f'><label for='name' class='a b'>Name</label><input id='name' class=''></form>"
		).expect("Tree parse failed.");

		let mut seen = Vec::new();
		rewrite(&tree, &mut |kind, value| {
			seen.push((kind, value.to_owned()));
			Some(value.to_ascii_uppercase())
		});

		// Order: document order, then class, id, for.
		assert_eq!(seen, vec![
			(Kind::Id, "f".to_owned()),
			(Kind::Class, "a".to_owned()),
			(Kind::Class, "b".to_owned()),
			(Kind::Id, "name".to_owned()),
			(Kind::Id, "name".to_owned()),
		]);

		assert_eq!(
			tree.serialize().expect("Serialization failed."),
			"<form id=\"F\"><label for=\"NAME\" class=\"A B\">Name</label><input id=\"NAME\" class></form>",
		);
	}
}
