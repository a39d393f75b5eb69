/*!
# HTMLUglify: Questions of Spec.
*/

use html5ever::{
	interface::QualName,
	local_name,
	ns,
};



#[must_use]
/// # Is Void HTML Element?
pub(crate) const fn is_void_html_tag(tag: &QualName) -> bool {
	matches!(tag.ns, ns!(html)) &&
	matches!(
		tag.local,
		local_name!("area") |
		local_name!("base") |
		local_name!("basefont") |
		local_name!("bgsound") |
		local_name!("br") |
		local_name!("col") |
		local_name!("embed") |
		local_name!("frame") |
		local_name!("hr") |
		local_name!("img") |
		local_name!("input") |
		local_name!("keygen") |
		local_name!("link") |
		local_name!("meta") |
		local_name!("param") |
		local_name!("source") |
		local_name!("track") |
		local_name!("wbr")
	)
}

#[must_use]
/// # Is Raw Text Element?
///
/// The contents of these elements are never entity-decoded by the parser,
/// so must not be entity-encoded on the way back out either.
pub(crate) const fn is_raw_text(tag: &QualName) -> bool {
	matches!(tag.ns, ns!(html)) &&
	matches!(
		tag.local,
		local_name!("iframe") |
		local_name!("noembed") |
		local_name!("noframes") |
		local_name!("noscript") |
		local_name!("plaintext") |
		local_name!("script") |
		local_name!("style") |
		local_name!("xmp")
	)
}

#[must_use]
/// # Is Style Element?
///
/// Both HTML and SVG have one.
pub(crate) const fn is_style(tag: &QualName) -> bool {
	matches!(tag.ns, ns!(html) | ns!(svg)) &&
	matches!(tag.local, local_name!("style"))
}

#[must_use]
/// # Is Self-Closing?
///
/// Childless foreign (SVG/MathML) elements are written XML-style, except
/// the outermost `<svg>` itself.
pub(crate) const fn is_self_closing(tag: &QualName, has_children: bool) -> bool {
	! has_children &&
	match tag.ns {
		ns!(svg) => ! matches!(tag.local, local_name!("svg")),
		ns!(mathml) => ! matches!(tag.local, local_name!("math")),
		_ => false,
	}
}



#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn t_is_void_html_tag() {
		for i in [
			local_name!("br"),
			local_name!("img"),
			local_name!("input"),
			local_name!("link"),
			local_name!("meta"),
		] {
			let name = QualName::new(None, ns!(html), i);
			assert!(is_void_html_tag(&name));
		}

		for i in [
			local_name!("div"),
			local_name!("iframe"),
			local_name!("style"),
		] {
			let name = QualName::new(None, ns!(html), i);
			assert!(! is_void_html_tag(&name));
		}

		// Namespaces matter.
		let name = QualName::new(None, ns!(svg), local_name!("link"));
		assert!(! is_void_html_tag(&name));
	}

	#[test]
	fn t_is_style() {
		assert!(is_style(&QualName::new(None, ns!(html), local_name!("style"))));
		assert!(is_style(&QualName::new(None, ns!(svg), local_name!("style"))));
		assert!(! is_style(&QualName::new(None, ns!(html), local_name!("script"))));
		assert!(! is_raw_text(&QualName::new(None, ns!(svg), local_name!("style"))));
	}

	#[test]
	fn t_is_self_closing() {
		let path = QualName::new(None, ns!(svg), local_name!("path"));
		let svg = QualName::new(None, ns!(svg), local_name!("svg"));
		let div = QualName::new(None, ns!(html), local_name!("div"));

		assert!(is_self_closing(&path, false));
		assert!(! is_self_closing(&path, true));
		assert!(! is_self_closing(&svg, false));
		assert!(! is_self_closing(&div, false));
	}
}
