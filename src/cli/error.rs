/*!
# HTMLUglify: CLI Errors
*/

use fyi_msg::ProglessError;
use htmluglify::UglifyError;
use std::{
	error::Error,
	fmt,
};



/// # Help Text.
const HELP: &str = concat!(r"
", "\x1b[38;5;199mHTMLUglify\x1b[0;38;5;69m v", env!("CARGO_PKG_VERSION"), "\x1b[0m", r"

Shorten the class, id, and for attributes of HTML
documents (and their embedded styles) in place.

USAGE:
    htmluglify [FLAGS] [OPTIONS] <PATH(S)>...

FLAGS:
    -h, --help        Print help information and exit.
    -p, --progress    Show progress bar while working.
    -V, --version     Print version information and exit.

OPTIONS:
    -l, --list <FILE>       Read (absolute) file and/or directory paths from
                            this text file, or STDIN if '-', one entry per
                            line, instead of or in addition to the trailing
                            <PATH(S)>.
    -s, --salt <SALT>       Salt used to shuffle the short-code alphabet.
                            [default: use the force harry]
    -w, --whitelist <LIST>  Comma-separated list of IDs (#foo) and/or
                            classes (.bar) to leave alone. This option may be
                            used more than once.

ARGS:
    <PATH(S)>...    Any number of files and directories to crawl and
                    uglify.
");



#[derive(Debug, Copy, Clone)]
/// # CLI Error.
pub(crate) enum CliError {
	/// # Empty File.
	EmptyFile,

	/// # No Documents.
	NoDocuments,

	/// # Progress.
	Progress(ProglessError),

	/// # Read Failure.
	Read,

	/// # Save Failure.
	Save,

	/// # Processing Failure.
	Uglify(UglifyError),

	/// # Print Help (Not an Error).
	PrintHelp,

	/// # Print Version (Not an Error).
	PrintVersion,
}

impl Error for CliError {}

impl fmt::Display for CliError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Progress(e) => fmt::Display::fmt(e, f),
			Self::Uglify(e) => f.write_str(e.as_str()),
			_ => f.write_str(self.as_str()),
		}
	}
}

impl From<ProglessError> for CliError {
	#[inline]
	fn from(err: ProglessError) -> Self { Self::Progress(err) }
}

impl From<UglifyError> for CliError {
	#[inline]
	fn from(err: UglifyError) -> Self { Self::Uglify(err) }
}

impl CliError {
	#[must_use]
	/// # As Str.
	///
	/// Wrapped errors are described by their `Display` impls instead.
	pub(crate) const fn as_str(self) -> &'static str {
		match self {
			Self::EmptyFile => "The file is empty.",
			Self::NoDocuments => "No documents were found.",
			Self::Progress(_) => "Unable to display progress.",
			Self::Read => "Unable to read the file.",
			Self::Save => "Unable to save the changes.",
			Self::Uglify(e) => e.as_str(),
			Self::PrintHelp => HELP,
			Self::PrintVersion => concat!("HTMLUglify v", env!("CARGO_PKG_VERSION")),
		}
	}
}
