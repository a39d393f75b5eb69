/*!
# HTMLUglify: Errors
*/

use std::{
	error::Error,
	fmt,
};



#[derive(Debug, Copy, Clone, Eq, PartialEq)]
/// # Generic Error.
///
/// Rewriting itself never fails; malformed CSS is passed through as-is.
/// These only crop up when a document can't be read into a tree or written
/// back out of one.
pub enum UglifyError {
	/// # Parse Failure.
	Parse,

	/// # Serialization Failure.
	Serialize,
}

impl AsRef<str> for UglifyError {
	#[inline]
	fn as_ref(&self) -> &str { self.as_str() }
}

impl fmt::Display for UglifyError {
	#[inline]
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl Error for UglifyError {}

impl UglifyError {
	#[must_use]
	/// # As Str.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Parse => "Unable to parse the document.",
			Self::Serialize => "Unable to serialize the document.",
		}
	}
}
