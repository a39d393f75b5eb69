/*!
# HTMLUglify: DOM Node.
*/

use html5ever::{
	local_name,
	ns,
	QualName,
	tendril::StrTendril,
};
use indexmap::IndexMap;
use std::{
	cell::RefCell,
	rc::Rc,
};



/// # Reference-Counted Node.
///
/// Nodes are self-referential, so generally need to be wrapped in `Rc`.
pub(crate) type Handle = Rc<Node>;



#[derive(Debug)]
/// # DOM Node.
///
/// This struct holds tag/attribute/content details for a node and its
/// children. At the root level, it's the whole damn tree.
pub(crate) struct Node {
	/// # Node Kind/Data.
	pub(crate) inner: NodeInner,

	/// # Child Node(s).
	pub(crate) children: RefCell<Vec<Handle>>,
}

impl Node {
	#[must_use]
	/// # New Node.
	pub(crate) fn new(inner: NodeInner) -> Handle {
		Rc::new(Self {
			inner,
			children: RefCell::new(Vec::new()),
		})
	}

	#[must_use]
	/// # Is Element?
	///
	/// Returns `true` if this is an element with the given local name,
	/// regardless of namespace.
	pub(crate) fn is_element(&self, local: &str) -> bool {
		matches!(self.inner, NodeInner::Element { ref name, .. } if name.local.as_ref() == local)
	}

	#[must_use]
	/// # Is Style Element?
	pub(crate) fn is_style(&self) -> bool {
		matches!(self.inner, NodeInner::Element { ref name, .. } if crate::spec::is_style(name))
	}

	#[must_use]
	/// # Attribute Value.
	///
	/// Return a copy of the value of the named (un-namespaced) attribute, if
	/// this is an element and it has one.
	pub(crate) fn attr(&self, key: &str) -> Option<StrTendril> {
		let NodeInner::Element { ref attrs, .. } = self.inner else { return None; };
		attrs.borrow().get(&attr_name(key)).cloned()
	}

	/// # Set Attribute Value.
	///
	/// Replace the value of an existing (un-namespaced) attribute. Missing
	/// attributes are not added.
	pub(crate) fn set_attr(&self, key: &str, value: &str) {
		if let NodeInner::Element { ref attrs, .. } = self.inner {
			let mut attrs = attrs.borrow_mut();
			if let Some(v) = attrs.get_mut(&attr_name(key)) {
				*v = StrTendril::from(value);
			}
		}
	}

	#[must_use]
	/// # Text Content.
	///
	/// Return the combined text of this node's direct text children.
	pub(crate) fn text(&self) -> String {
		let mut out = String::new();
		for child in self.children.borrow().iter() {
			if let NodeInner::Text { ref contents } = child.inner {
				out.push_str(contents.borrow().as_ref());
			}
		}
		out
	}

	/// # Replace Text Content.
	///
	/// Drop all children, leaving a single text node with `text`.
	pub(crate) fn set_text(&self, text: &str) {
		let mut children = self.children.borrow_mut();
		children.truncate(0);
		if ! text.is_empty() {
			children.push(Self::new(NodeInner::Text {
				contents: RefCell::new(StrTendril::from(text)),
			}));
		}
	}
}



#[derive(Debug, Clone)]
/// # Node Kind/Data.
///
/// This enum holds the details for a given node, differentiated by kind.
pub(crate) enum NodeInner {
	/// # The Root Node.
	Document,

	/// # Doctype.
	Doctype {
		/// # Name.
		name: StrTendril,

		/// # Public ID.
		public_id: StrTendril,

		/// # System ID.
		system_id: StrTendril,
	},

	/// # HTML Element.
	Element {
		/// # Tag Name.
		name: QualName,

		/// # Tag Attributes.
		attrs: RefCell<IndexMap<QualName, StrTendril>>,
	},

	/// # Text.
	Text {
		/// # Content.
		contents: RefCell<StrTendril>
	},

	/// # Comment.
	Comment {
		/// # Content.
		contents: StrTendril,
	},

	/// # Processing Instructions.
	///
	/// These aren't supported in HTML, but the `TreeSink` API requires we
	/// "create" them anyway.
	Ignored,
}



#[must_use]
/// # Attribute Name.
///
/// Build the qualified name for a plain HTML attribute. The common ones
/// come from the atom table; anything else is interned on the fly.
fn attr_name(key: &str) -> QualName {
	let local = match key {
		"class" => local_name!("class"),
		"for" => local_name!("for"),
		"id" => local_name!("id"),
		_ => key.into(),
	};
	QualName::new(None, ns!(), local)
}
