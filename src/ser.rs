/*!
# HTMLUglify: Serialization
*/

use crate::{
	dom::{
		Handle,
		NodeInner,
	},
	spec,
};
use html5ever::{
	ns,
	local_name,
	QualName,
	serialize::AttrRef,
};
use std::{
	collections::VecDeque,
	rc::Rc,
};



/// Back to HTML!
///
/// Serialize the tree from `root` down into an HTML document, returning the
/// result if successful.
///
/// Aside from whatever the parser normalized on the way in, the output
/// should match the input, markup-wise.
pub(crate) fn serialize(root: &Handle, size_hint: usize) -> Option<Vec<u8>> {
	#[derive(Debug)]
	enum Stage {
		/// # Open Tag.
		Open(Handle),

		/// # Close Tag.
		Close(QualName),
	}

	// Output.
	let mut serializer = Serializer::new(size_hint);

	// Pending work.
	let mut stack = VecDeque::new();
	stack.extend(
		root.children.borrow()
			.iter()
			.map(|h| Stage::Open(Rc::clone(h)))
	);

	while let Some(op) = stack.pop_front() {
		match op {
			// New tag!
			Stage::Open(handle) => match handle.inner {
				NodeInner::Element { ref name, ref attrs } => {
					serializer.start_elem(
						name,
						attrs.borrow().iter().map(|(k, v)| (k, v.as_ref())),
						! handle.children.borrow().is_empty(),
					)?;

					stack.reserve(1 + handle.children.borrow().len());
					stack.push_front(Stage::Close(name.clone()));

					for child in handle.children.borrow().iter().rev() {
						stack.push_front(Stage::Open(Rc::clone(child)));
					}
				},
				NodeInner::Text { ref contents } => serializer.write_text(&contents.borrow())?,
				NodeInner::Comment { ref contents } => serializer.write_comment(contents),
				NodeInner::Doctype { ref name, ref public_id, ref system_id } =>
					serializer.write_doctype(name, public_id, system_id),

				// Unused.
				NodeInner::Document |
				NodeInner::Ignored => {},
			},

			// Close it.
			Stage::Close(name) => { serializer.end_elem(&name)?; },
		}
	}

	Some(serializer.writer)
}



#[derive(Debug, Clone, Copy)]
/// # Element Details.
///
/// The serializer keeps a stack of these so text and children know what
/// they're nested in.
struct ParentTag {
	/// # Unescaped Text?
	///
	/// Raw text elements like `<script>` and `<style>` have their text
	/// written verbatim.
	raw_text: bool,

	/// # Self-Closing?
	///
	/// This is `true` for "void" HTML tags, but also for any childless
	/// foreign elements written XML-style.
	void: bool,
}

impl ParentTag {
	/// # Root.
	const ROOT: Self = Self { raw_text: false, void: false };

	#[must_use]
	/// # New.
	const fn new(tag: &QualName, void: bool) -> Self {
		Self { raw_text: spec::is_raw_text(tag), void }
	}
}



#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
/// # Quote Type
///
/// Whichever quote appears less often in a value wraps it, since every
/// occurrence of the wrapping quote costs an entity.
///
/// Rewritten `class`/`id`/`for` values never contain quotes, so this only
/// comes into play for everything else.
enum QuoteKind {
	#[default]
	/// # Double (") Quotes.
	Double,

	/// # Single (') Quotes.
	Single,
}

impl QuoteKind {
	#[must_use]
	/// # For Attribute Value.
	const fn for_value(mut src: &[u8]) -> Self {
		let mut double = 0;
		let mut single = 0;

		while let [n, rest @ ..] = src {
			match *n {
				b'"' => { double += 1; },
				b'\'' => { single += 1; },
				_ => {},
			}
			src = rest;
		}

		if single < double { Self::Single }
		else { Self::Double }
	}

	#[must_use]
	/// # Quote Character.
	const fn as_byte(self) -> u8 {
		match self {
			Self::Double => b'"',
			Self::Single => b'\'',
		}
	}
}



/// # Serializer.
///
/// A pared-down take on `html5ever::serialize::Serializer` that writes
/// straight to a byte buffer.
struct Serializer {
	/// # Writer.
	writer: Vec<u8>,

	/// # Stack.
	stack: Vec<ParentTag>,
}

impl Serializer {
	#[must_use]
	/// # New Instance.
	fn new(size_hint: usize) -> Self {
		Self {
			writer: Vec::with_capacity(size_hint),
			stack: vec![ParentTag::ROOT],
		}
	}

	#[must_use]
	/// # Parent Element.
	const fn parent(&self) -> Option<ParentTag> {
		debug_assert!(! self.stack.is_empty(), "BUG: No parent element?!");
		self.stack.as_slice().last().copied()
	}

	/// # Escape Text.
	///
	/// XML/HTML text requires escaping `&`, `<`, and `>`. Literal no-break
	/// spaces are written as `&nbsp;` too, matching what most serializers
	/// do.
	fn write_esc_text(&mut self, txt: &[u8]) {
		let mut idx: usize = 0;
		let len: usize = txt.len();

		while idx < len {
			match txt[idx] {
				194_u8 if idx + 1 < len && txt[idx + 1] == 160_u8 => {
					idx += 1;
					self.writer.extend_from_slice(b"&nbsp;");
				},
				b'&' => { self.writer.extend_from_slice(b"&amp;"); },
				b'<' => { self.writer.extend_from_slice(b"&lt;"); },
				b'>' => { self.writer.extend_from_slice(b"&gt;"); },
				c =>    { self.writer.push(c); },
			}

			idx += 1;
		}
	}

	/// # Escape Attribute Value.
	///
	/// HTML attributes require escaping of `&` and the wrapping character.
	fn write_esc_attr(&mut self, txt: &[u8]) {
		let quote = QuoteKind::for_value(txt);
		self.writer.push(b'=');
		self.writer.push(quote.as_byte());

		let mut idx: usize = 0;
		let len: usize = txt.len();
		while idx < len {
			match txt[idx] {
				194_u8 if idx + 1 < len && txt[idx + 1] == 160_u8 => {
					idx += 1;
					self.writer.extend_from_slice(b"&nbsp;");
				},
				b'&' => { self.writer.extend_from_slice(b"&amp;"); },
				b'\'' if matches!(quote, QuoteKind::Single) => {
					self.writer.extend_from_slice(b"&#39;");
				},
				b'"' if matches!(quote, QuoteKind::Double) => {
					self.writer.extend_from_slice(b"&#34;");
				},
				c => { self.writer.push(c); },
			}

			idx += 1;
		}

		self.writer.push(quote.as_byte());
	}
}

impl Serializer {
	#[must_use]
	/// # Write Opening Tag.
	fn start_elem<'a, AttrIter>(
		&mut self,
		tag: &QualName,
		attrs: AttrIter,
		has_children: bool,
	) -> Option<()>
	where AttrIter: Iterator<Item = AttrRef<'a>> {
		// Children of void elements shouldn't exist, but if they do, they
		// get swallowed.
		let parent = self.parent()?;
		if parent.void {
			self.stack.push(ParentTag::new(tag, true));
			return Some(());
		}

		// Opening tag.
		self.writer.push(b'<');
		self.writer.extend_from_slice(tag.local.as_bytes());

		// Attribute(s).
		for (key, value) in attrs {
			self.write_attr(tag, key, value.as_bytes())?;
		}

		// Close the opening tag, XML-style if childless foreign.
		let void =
			if spec::is_self_closing(tag, has_children) {
				self.writer.extend_from_slice(b"/>");
				true
			}
			else {
				self.writer.push(b'>');
				spec::is_void_html_tag(tag)
			};

		self.stack.push(ParentTag::new(tag, void));
		Some(())
	}

	#[must_use]
	/// # Write Closing Tag.
	///
	/// Self-closing tags were finished by the opener, so there's nothing
	/// left to do for them.
	fn end_elem(&mut self, name: &QualName) -> Option<()> {
		if ! self.stack.pop()?.void {
			self.writer.extend_from_slice(b"</");
			self.writer.extend_from_slice(name.local.as_bytes());
			self.writer.push(b'>');
		}

		Some(())
	}

	#[must_use]
	/// # Write Attribute.
	fn write_attr(&mut self, tag: &QualName, key: &QualName, value: &[u8]) -> Option<()> {
		// Separator, plus the namespace prefix, if any.
		match key.ns {
			ns!() => self.writer.push(b' '),
			ns!(xml) => self.writer.extend_from_slice(b" xml:"),
			ns!(xmlns) =>
				if matches!(key.local, local_name!("xmlns")) { self.writer.push(b' '); }
				else { self.writer.extend_from_slice(b" xmlns:"); },
			ns!(xlink) => self.writer.extend_from_slice(b" xlink:"),
			// Unsupported?
			_ => return None,
		}

		self.writer.extend_from_slice(key.local.as_bytes());

		// HTML doesn't need a value if it's empty; foreign content does.
		if ! value.is_empty() || ! matches!(tag.ns, ns!(html)) {
			self.write_esc_attr(value);
		}

		Some(())
	}

	/// # Write Comment.
	fn write_comment(&mut self, txt: &str) {
		if ! self.parent().is_some_and(|p| p.void) {
			self.writer.extend_from_slice(b"<!--");
			self.writer.extend_from_slice(txt.as_bytes());
			self.writer.extend_from_slice(b"-->");
		}
	}

	/// # Write Doctype.
	fn write_doctype(&mut self, name: &str, public_id: &str, system_id: &str) {
		self.writer.extend_from_slice(b"<!DOCTYPE ");
		self.writer.extend_from_slice(name.as_bytes());

		if ! public_id.is_empty() {
			self.writer.extend_from_slice(b" PUBLIC \"");
			self.writer.extend_from_slice(public_id.as_bytes());
			self.writer.push(b'"');

			if ! system_id.is_empty() {
				self.writer.extend_from_slice(b" \"");
				self.writer.extend_from_slice(system_id.as_bytes());
				self.writer.push(b'"');
			}
		}
		else if ! system_id.is_empty() {
			self.writer.extend_from_slice(b" SYSTEM \"");
			self.writer.extend_from_slice(system_id.as_bytes());
			self.writer.push(b'"');
		}

		self.writer.push(b'>');
	}

	#[must_use]
	/// # Write Text.
	fn write_text(&mut self, txt: &str) -> Option<()> {
		let parent = self.parent()?;
		if parent.void {}
		// Pass it through.
		else if parent.raw_text { self.writer.extend_from_slice(txt.as_bytes()); }
		// Everything else gets escaped.
		else { self.write_esc_text(txt.as_bytes()); }

		Some(())
	}
}
