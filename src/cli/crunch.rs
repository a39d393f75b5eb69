/*!
# HTMLUglify: File Processing
*/

use super::CliError;
use htmluglify::Uglifier;
use std::path::Path;



#[derive(Debug)]
/// # Document.
///
/// This holds the contents of an HTML file waiting to be uglified.
pub(crate) struct Document<'a> {
	/// # Source Path.
	src: &'a Path,

	/// # Raw Data.
	raw: String,
}

impl<'a> TryFrom<&'a Path> for Document<'a> {
	type Error = CliError;

	fn try_from(src: &'a Path) -> Result<Self, Self::Error> {
		let raw = std::fs::read_to_string(src).map_err(|_| CliError::Read)?;
		if raw.trim().is_empty() { Err(CliError::EmptyFile) }
		else { Ok(Self { src, raw }) }
	}
}

impl Document<'_> {
	/// # Uglify!
	///
	/// Process the document and, if anything changed, save it back to the
	/// source path.
	///
	/// Returns the number of identifiers shortened along with the before
	/// and after sizes.
	pub(crate) fn uglify(self, ugly: &Uglifier) -> Result<Crunched, CliError> {
		let (out, table) = ugly.process_with_lookups(&self.raw)?;

		let before = self.raw.len() as u64;
		let after =
			if out == self.raw { before }
			else {
				write_atomic::write_file(self.src, out.as_bytes())
					.map_err(|_| CliError::Save)?;
				out.len() as u64
			};

		Ok(Crunched { identifiers: table.len() as u64, before, after })
	}
}



#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
/// # Result Sizes.
pub(crate) struct Crunched {
	/// # Identifiers Shortened.
	pub(crate) identifiers: u64,

	/// # Original Size.
	pub(crate) before: u64,

	/// # New Size.
	pub(crate) after: u64,
}



#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn t_empty() {
		let dir = std::env::temp_dir().join(format!("htmluglify-{}", std::process::id()));
		std::fs::create_dir_all(&dir).expect("Unable to create temporary directory.");

		let path = dir.join("empty.html");
		std::fs::write(&path, "  \n").expect("Unable to write file.");
		assert!(matches!(Document::try_from(path.as_path()), Err(CliError::EmptyFile)));

		// Missing files can't be read.
		let path = dir.join("missing.html");
		assert!(matches!(Document::try_from(path.as_path()), Err(CliError::Read)));

		let _res = std::fs::remove_dir_all(&dir);
	}

	#[test]
	fn t_uglify() {
		let dir = std::env::temp_dir().join(format!("htmluglify-u-{}", std::process::id()));
		std::fs::create_dir_all(&dir).expect("Unable to create temporary directory.");
		let path = dir.join("doc.html");

		let ugly = Uglifier::new(&htmluglify::Config::default().with_salt(""));

		// This should change.
		std::fs::write(&path, "<p class='hello'>Hi</p>").expect("Unable to write file.");
		let res = Document::try_from(path.as_path())
			.and_then(|d| d.uglify(&ugly))
			.expect("Uglification failed.");
		assert_eq!(res, Crunched { identifiers: 1, before: 23, after: 19 });
		assert_eq!(
			std::fs::read_to_string(&path).expect("Unable to read file."),
			"<p class=\"a\">Hi</p>",
		);

		// This shouldn't.
		std::fs::write(&path, "<p>Hi</p>").expect("Unable to write file.");
		let res = Document::try_from(path.as_path())
			.and_then(|d| d.uglify(&ugly))
			.expect("Uglification failed.");
		assert_eq!(res, Crunched { identifiers: 0, before: 9, after: 9 });

		let _res = std::fs::remove_dir_all(&dir);
	}
}
