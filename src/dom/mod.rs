/*!
# HTMLUglify: DOM.
*/

pub(super) mod node;

use crate::{
	spec,
	UglifyError,
};
use html5ever::{
	Attribute,
	expanded_name,
	ns,
	local_name,
	ExpandedName,
	interface::{
		ElementFlags,
		NodeOrText,
		QuirksMode,
		TreeSink,
	},
	ParseOpts,
	QualName,
	tendril::{
		StrTendril,
		TendrilSink,
	},
};
use indexmap::IndexMap;
pub(crate) use node::{
	Handle,
	Node,
	NodeInner,
};
use std::{
	borrow::Cow,
	cell::RefCell,
	rc::Rc,
};



/// # Invalid Expanded Name.
///
/// This is used to avoid unfriendly panics in inapplicable `TreeSink` member
/// methods.
static NOOP_NAME: ExpandedName = expanded_name!("", "abbr");

/// # Fragment Wrapper (Open).
///
/// Template contents can hold anything, table rows and cells included, so
/// fragments are parsed as if they were one.
const FRAGMENT_OPEN: &str = "<template>";

/// # Fragment Wrapper (Close).
const FRAGMENT_CLOSE: &str = "</template>";



#[derive(Debug, Clone)]
/// # HTML DOM Tree.
///
/// This is a lightweight DOM built by `html5ever`. Documents and fragments
/// alike can be parsed; fragments are unwrapped afterward so they serialize
/// back into fragments.
///
/// See [`Uglifier::rewrite_styles`](crate::Uglifier::rewrite_styles) and
/// [`Uglifier::rewrite_elements`](crate::Uglifier::rewrite_elements) for
/// usage.
pub struct Tree {
	/// # Document Root.
	root: Handle,

	/// # Source Length.
	///
	/// This is used as a capacity hint during serialization.
	size_hint: usize,
}



#[derive(Debug)]
/// # Tree Builder Sink.
///
/// This is what `html5ever` actually builds into. Once parsing wraps up, the
/// root is handed off to a [`Tree`].
struct Sink {
	/// # Document Root.
	root: Handle,

	/// # Error.
	error: RefCell<Option<UglifyError>>,
}

impl Default for Sink {
	#[inline]
	fn default() -> Self {
		Self {
			root: Node::new(NodeInner::Document),
			error: RefCell::new(None),
		}
	}
}

impl TreeSink for Sink {
	type Handle = Handle;
	type Output = Self;
	type ElemName<'a> = ExpandedName<'a>
	where Self: 'a;

	/// # Merge Attributes.
	///
	/// Attributes already present on `target` win.
	fn add_attrs_if_missing(&self, target: &Handle, new: Vec<Attribute>) {
		let NodeInner::Element { ref attrs, .. } = target.inner else { return; };
		let mut attrs = attrs.borrow_mut();
		for Attribute { name, value } in new {
			attrs.entry(name).or_insert(value);
		}
	}

	/// # Append Child.
	fn append(&self, parent: &Handle, child: NodeOrText<Handle>) {
		let mut children = parent.children.borrow_mut();
		let end = children.len();
		insert_child(&mut children, end, child);
	}

	/// # Append Based on Parent Node.
	fn append_based_on_parent_node(
		&self,
		sibling: &Handle,
		last_parent: &Handle,
		child: NodeOrText<Self::Handle>,
	) {
		if self.find_node_parent_and_index(sibling).is_some() {
			self.append_before_sibling(sibling, child);
		}
		else { self.append(last_parent, child); }
	}

	/// # Append Before Sibling.
	fn append_before_sibling(&self, sibling: &Handle, child: NodeOrText<Handle>) {
		match self.find_node_parent_and_index(sibling) {
			Some((parent, pos)) if pos < parent.children.borrow().len() => {
				insert_child(&mut parent.children.borrow_mut(), pos, child);
			},
			_ => { self.error.borrow_mut().replace(UglifyError::Parse); },
		}
	}

	/// # Create Comment.
	fn create_comment(&self, text: StrTendril) -> Handle {
		Node::new(NodeInner::Comment { contents: text })
	}

	/// # Create Element.
	fn create_element(&self, name: QualName, attrs: Vec<Attribute>, flags: ElementFlags)
	-> Handle {
		let attrs = attrs.into_iter()
			.map(|Attribute { name, value }| (name, value))
			.collect::<IndexMap<_, _>>();
		let node = Node::new(NodeInner::Element { name, attrs: RefCell::new(attrs) });

		// The parser fills <template> contents into a stand-in document; it
		// gets folded back into the element by `post_process`.
		if flags.template {
			node.children.borrow_mut().push(Node::new(NodeInner::Document));
		}

		node
	}

	/// # Create Processing Instruction.
	///
	/// These aren't a thing in HTML; the placeholder is never appended.
	fn create_pi(&self, _target: StrTendril, _data: StrTendril) -> Handle {
		Node::new(NodeInner::Ignored)
	}

	/// # Element Name.
	fn elem_name<'a>(&self, target: &'a Handle) -> ExpandedName<'a> {
		match target.inner {
			NodeInner::Element { ref name, .. } => name.expanded(),
			_ => {
				debug_assert!(false, "BUG: elem_name called on non-element node.");
				self.error.borrow_mut().replace(UglifyError::Parse);
				NOOP_NAME
			},
		}
	}

	#[inline]
	/// # Finish Parsing.
	fn finish(self) -> Self { self }

	/// # Document Root.
	fn get_document(&self) -> Handle { Rc::clone(&self.root) }

	/// # Template Contents.
	///
	/// Return the stand-in document created for a `<template>` element.
	fn get_template_contents(&self, target: &Handle) -> Handle {
		if
			target.is_element("template") &&
			let Some(out) = target.children.borrow().first()
		{
			return Rc::clone(out);
		}

		debug_assert!(false, "BUG: get_template_contents called on non-template node.");
		self.error.borrow_mut().replace(UglifyError::Parse);
		Node::new(NodeInner::Ignored)
	}

	/// # Detach Node.
	fn remove_from_parent(&self, target: &Handle) {
		if let Some((parent, pos)) = self.find_node_parent_and_index(target) {
			let mut children = parent.children.borrow_mut();
			if pos < children.len() { children.remove(pos); }
		}
	}

	/// # Move Children.
	fn reparent_children(&self, old_parent: &Handle, new_parent: &Handle) {
		let mut moved = std::mem::take(&mut *old_parent.children.borrow_mut());
		new_parent.children.borrow_mut().append(&mut moved);
	}

	/// # Same Node?
	fn same_node(&self, x: &Handle, y: &Handle) -> bool { Rc::ptr_eq(x, y) }

	/// # Append Doctype.
	fn append_doctype_to_document(
		&self,
		name: StrTendril,
		public_id: StrTendril,
		system_id: StrTendril,
	) {
		self.root.children.borrow_mut().push(Node::new(NodeInner::Doctype {
			name,
			public_id,
			system_id,
		}));
	}

	/// # MathML Integration Point?
	///
	/// Never.
	fn is_mathml_annotation_xml_integration_point(&self, _node: &Handle) -> bool {
		false
	}

	/// # Parse Error.
	///
	/// The tree builder recovers from these on its own.
	fn parse_error(&self, _msg: Cow<'static, str>) {}

	/// # Quirks Mode.
	fn set_quirks_mode(&self, _mode: QuirksMode) {}
}

impl Sink {
	/// # Find Node.
	///
	/// Return the parent of `target` and its index among the parent's
	/// children. This is a full tree search, but the tree builder only
	/// needs it for misnested markup.
	fn find_node_parent_and_index(&self, target: &Handle) -> Option<(Handle, usize)> {
		/// # Search.
		fn search(parent: &Handle, target: &Handle) -> Option<(Handle, usize)> {
			let children = parent.children.borrow();
			children.iter()
				.position(|v| Rc::ptr_eq(v, target))
				.map(|pos| (Rc::clone(parent), pos))
				.or_else(|| children.iter().find_map(|v| search(v, target)))
		}

		search(&self.root, target)
	}
}

impl Tree {
	/// # Parse.
	///
	/// Parse raw HTML into a tree.
	///
	/// If the source looks like a fragment (i.e. it has no `<html>`, `<head>`,
	/// `<body>`, or doctype), it is temporarily wrapped in a `<template>`
	/// so the scaffolding added by the tree builder can be stripped back off
	/// afterward.
	///
	/// ## Errors
	///
	/// This will return an error if the tree builder chokes.
	pub fn parse(raw: &str) -> Result<Self, UglifyError> {
		let fragment = is_fragment(raw.as_bytes());
		let parser = html5ever::parse_document(Sink::default(), ParseOpts::default());
		let sink =
			if fragment {
				let mut wrapped = String::with_capacity(raw.len() + FRAGMENT_OPEN.len() + FRAGMENT_CLOSE.len());
				wrapped.push_str(FRAGMENT_OPEN);
				wrapped.push_str(raw);
				wrapped.push_str(FRAGMENT_CLOSE);
				parser.one(wrapped)
			}
			else { parser.one(raw) };

		if let Some(e) = sink.error.borrow_mut().take() {
			return Err(e);
		}

		let mut dom = Self { root: sink.root, size_hint: raw.len() };
		dom.post_process();
		if fragment { dom.unwrap_fragment()?; }
		Ok(dom)
	}

	/// # Serialize.
	///
	/// Convert the tree back into an HTML string.
	///
	/// ## Errors
	///
	/// This will return an error if the tree contains something that can't
	/// be written, like an attribute from an unsupported namespace.
	pub fn serialize(&self) -> Result<String, UglifyError> {
		crate::ser::serialize(&self.root, self.size_hint)
			.and_then(|out| String::from_utf8(out).ok())
			.ok_or(UglifyError::Serialize)
	}

	/// # Each Element.
	///
	/// Visit every element in the tree, depth-first, parents before children
	/// and siblings left to right.
	pub(crate) fn each_element<F>(&self, mut cb: F)
	where F: FnMut(&Handle) {
		/// # Walk.
		fn walk<F>(handle: &Handle, cb: &mut F)
		where F: FnMut(&Handle) {
			if matches!(handle.inner, NodeInner::Element { .. }) { cb(handle); }
			for child in handle.children.borrow().iter() { walk(child, cb); }
		}

		walk(&self.root, &mut cb);
	}

	/// # Tidy.
	///
	/// Strip children from void elements and fold each `<template>`'s
	/// stand-in document back into the element.
	fn post_process(&self) {
		/// # Tidy Node.
		fn tidy(node: &Handle) {
			if let NodeInner::Element { ref name, .. } = node.inner {
				if spec::is_void_html_tag(name) {
					node.children.borrow_mut().clear();
					return;
				}

				if node.is_element("template") {
					let mut children = node.children.borrow_mut();
					let contents = children.pop()
						.filter(|v| matches!(v.inner, NodeInner::Document))
						.map(|v| std::mem::take(&mut *v.children.borrow_mut()))
						.unwrap_or_default();
					*children = contents;
				}
			}

			for child in node.children.borrow().iter() { tidy(child); }
		}

		tidy(&self.root);
	}

	/// # Unwrap Fragment.
	///
	/// Swap the root for a new one holding just the wrapper's children. The
	/// wrapper is the first `<template>` in the document, since nothing comes
	/// before it.
	///
	/// ## Errors
	///
	/// If the wrapper went missing, an error is returned.
	fn unwrap_fragment(&mut self) -> Result<(), UglifyError> {
		/// # Find Wrapper.
		fn find(node: &Handle) -> Option<Handle> {
			node.children.borrow().iter().find_map(|v|
				if v.is_element("template") { Some(Rc::clone(v)) }
				else { find(v) }
			)
		}

		let wrapper = find(&self.root).ok_or(UglifyError::Parse)?;
		let root = Node::new(NodeInner::Document);
		*root.children.borrow_mut() = std::mem::take(&mut *wrapper.children.borrow_mut());
		self.root = root;
		Ok(())
	}
}



/// # Insert Child.
///
/// Insert `child` at `pos`. Text directly following a text node is merged
/// into it. Of the other node types, only elements and comments are kept.
fn insert_child(children: &mut Vec<Handle>, pos: usize, child: NodeOrText<Handle>) {
	match child {
		NodeOrText::AppendText(v) => {
			if
				let Some(prev) = pos.checked_sub(1).and_then(|p| children.get(p)) &&
				let NodeInner::Text { ref contents } = prev.inner
			{
				contents.borrow_mut().push_tendril(&v);
			}
			else {
				children.insert(pos, Node::new(NodeInner::Text { contents: RefCell::new(v) }));
			}
		},
		NodeOrText::AppendNode(v) =>
			if matches!(v.inner, NodeInner::Element { .. } | NodeInner::Comment { .. }) {
				children.insert(pos, v);
			},
	}
}

/// # Is Fragment?
///
/// This returns `false` if the document contains (case-insensitively)
/// `<html`, `<head`, `<body`, `</body>`, `</html>`, or `<!doctype`.
fn is_fragment(src: &[u8]) -> bool {
	/// # Document-Level Markers.
	const MARKERS: [&[u8]; 6] = [
		b"<html",
		b"<head",
		b"<body",
		b"</body>",
		b"</html>",
		b"<!doctype",
	];

	for (idx, _) in src.iter().enumerate().filter(|(_, b)| **b == b'<') {
		let rest = &src[idx..];
		for m in MARKERS {
			if rest.len() >= m.len() && rest[..m.len()].eq_ignore_ascii_case(m) {
				if m.ends_with(b">") { return false; }

				// Make sure we aren't looking at something like <header>.
				match rest.get(m.len()) {
					Some(b'-' | b'_' | b':' | b'.') => {},
					Some(b) if b.is_ascii_alphanumeric() => {},
					_ => return false,
				}
			}
		}
	}

	true
}



#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn t_is_fragment() {
		assert!(! is_fragment(include_bytes!("../../skel/test-assets/newsletter.html")));
		assert!(is_fragment(include_bytes!("../../skel/test-assets/fragment.html")));

		for (raw, expected) in [
			("<p>Hello</p>", true),
			("<header>Hello</header>", true),
			("<style>.a{}</style><p class='a'></p>", true),
			("<html><p>Hello</p></html>", false),
			("<HTML>", false),
			("<!DOCTYPE html><p>Hello</p>", false),
			("<head><title>Hi</title></head>", false),
			("<body class='x'>", false),
			("<p>Hello</p></body>", false),
		] {
			assert_eq!(is_fragment(raw.as_bytes()), expected, "{raw}");
		}
	}

	#[test]
	fn t_parse_fragment() {
		let tree = Tree::parse("<p>Hello <b>World</b></p><!-- hi -->").expect("Tree parse failed.");
		let children = tree.root.children.borrow();
		assert_eq!(children.len(), 2);
		assert!(children[0].is_element("p"));
		assert!(matches!(children[1].inner, NodeInner::Comment { .. }));

		assert_eq!(
			tree.serialize().expect("Serialization failed."),
			"<p>Hello <b>World</b></p><!-- hi -->",
		);
	}

	#[test]
	fn t_parse_table_fragment() {
		// Table parts need a table (or template) context to survive.
		for raw in [
			"<tr><td class=\"x\">hi</td></tr>",
			"<td>one</td><td>two</td>",
			"<tbody><tr><th id=\"y\">a</th></tr></tbody>",
			"<caption>Cap</caption>",
			"<thead></thead>\n<tfoot></tfoot>",
		] {
			let tree = Tree::parse(raw).expect("Tree parse failed.");
			assert_eq!(tree.serialize().expect("Serialization failed."), raw);
		}
	}

	#[test]
	fn t_parse_document() {
		let tree = Tree::parse(include_str!("../../skel/test-assets/newsletter.html"))
			.expect("Tree parse failed.");
		let children = tree.root.children.borrow();
		assert!(matches!(children[0].inner, NodeInner::Doctype { .. }));
		assert!(children[1].is_element("html"));
	}

	#[test]
	fn t_each_element() {
		let tree = Tree::parse(
			"<h1 id='a'>Header <strong id='b'><span id='c'>1</span></strong></h1><label id='d'>x</label>"
		).expect("Tree parse failed.");

		let mut ids = Vec::new();
		tree.each_element(|node| if let Some(id) = node.attr("id") {
			ids.push(id.to_string());
		});
		assert_eq!(ids, vec!["a", "b", "c", "d"]);
	}

	#[test]
	fn t_template() {
		let tree = Tree::parse("<template><p class='x'>Hi</p></template>")
			.expect("Tree parse failed.");

		// The paragraph should be a direct child of the template now.
		let mut classes = Vec::new();
		tree.each_element(|node| if let Some(v) = node.attr("class") {
			classes.push(v.to_string());
		});
		assert_eq!(classes, vec!["x"]);
		assert_eq!(
			tree.serialize().expect("Serialization failed."),
			"<template><p class=\"x\">Hi</p></template>",
		);
	}

	#[test]
	fn t_sink_edits() {
		let tree = Tree::parse("<div><span></span><i></i></div>").expect("Tree parse failed.");
		let sink = Sink { root: Rc::clone(&tree.root), error: RefCell::new(None) };
		let div = Rc::clone(&tree.root.children.borrow()[0]);
		let span = Rc::clone(&div.children.borrow()[0]);
		assert!(span.is_element("span"));

		// Text goes in front of the span.
		sink.append_before_sibling(&span, NodeOrText::AppendText(StrTendril::from("Hello")));
		assert_eq!(tree.serialize().expect("Serialization failed."), "<div>Hello<span></span><i></i></div>");

		// And merges with the text already there.
		sink.append_before_sibling(&span, NodeOrText::AppendText(StrTendril::from(" World")));
		assert_eq!(div.children.borrow().len(), 3);

		// Now drop the span.
		sink.remove_from_parent(&span);
		assert_eq!(tree.serialize().expect("Serialization failed."), "<div>Hello World<i></i></div>");

		// Detached nodes can't have siblings.
		sink.append_before_sibling(&span, NodeOrText::AppendText(StrTendril::from("!")));
		assert_eq!(sink.error.borrow_mut().take(), Some(UglifyError::Parse));
	}
}
