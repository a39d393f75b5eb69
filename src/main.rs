/*!
# HTMLUglify

`HTMLUglify` shortens the `class`, `id`, and `for` attribute values of
HTML documents, along with the matching selectors in their `<style>`
elements, in place.



## Use

For basic use, just toss one or more file or directory paths after the
command, like:
```bash
# Uglify one file.
htmluglify /path/to/one.html

# Recursively uglify every .htm(l) file in a directory.
htmluglify /path/to

# Do the same thing but with a progress bar.
htmluglify -p /path/to

# Keep an ID and a class as-is.
htmluglify -w '#app,.js-toggle' /path/to

# For a full list of options, run help:
htmluglify -h
```

Each document is processed independently; names are not shared between
files. Documents that can't be read, or wind up unchanged, are left alone.
*/

#![deny(unsafe_code)]

#![warn(clippy::filetype_is_file)]
#![warn(clippy::integer_division)]
#![warn(clippy::needless_borrow)]
#![warn(clippy::nursery)]
#![warn(clippy::pedantic)]
#![warn(clippy::perf)]
#![warn(clippy::suboptimal_flops)]
#![warn(clippy::unneeded_field_pattern)]
#![warn(macro_use_extern_crate)]
#![warn(missing_copy_implementations)]
#![warn(missing_debug_implementations)]
#![warn(missing_docs)]
#![warn(non_ascii_idents)]
#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unreachable_pub)]
#![warn(unused_extern_crates)]
#![warn(unused_import_braces)]

#![allow(clippy::module_name_repetitions)]
#![allow(clippy::redundant_pub_crate)]



mod cli;

use argyle::Argument;
use cli::{
	CliError,
	Crunched,
	Document,
};
use dactyl::NiceU64;
use dowser::{
	Dowser,
	Extension,
};
use fyi_msg::{
	Msg,
	MsgKind,
	Progless,
};
use htmluglify::{
	Config,
	Uglifier,
};
use rayon::iter::{
	IntoParallelRefIterator,
	ParallelIterator,
};
use std::{
	path::Path,
	sync::atomic::{
		AtomicU64,
		Ordering::SeqCst,
	},
};



// The E_HTM and E_HTML extension constants.
include!(concat!(env!("OUT_DIR"), "/htmluglify-extensions.rs"));



/// # Main.
fn main() {
	match main__() {
		Ok(()) => {},
		Err(e @ (CliError::PrintHelp | CliError::PrintVersion)) => {
			println!("{}", e.as_str());
		},
		Err(e) => {
			Msg::error(e.to_string()).eprint();
			std::process::exit(1);
		},
	}
}

#[inline]
/// # Actual Main.
fn main__() -> Result<(), CliError> {
	// Parse CLI arguments.
	let args = argyle::args()
		.with_keywords(include!(concat!(env!("OUT_DIR"), "/argyle.rs")));

	let mut config = Config::default();
	let mut whitelist = Vec::new();
	let mut progress = false;
	let mut paths = Dowser::default();
	for arg in args {
		match arg {
			Argument::Key("-h" | "--help") => return Err(CliError::PrintHelp),
			Argument::Key("-p" | "--progress") => { progress = true; },
			Argument::Key("-V" | "--version") => return Err(CliError::PrintVersion),

			Argument::KeyWithValue("-l" | "--list", s) => {
				paths.read_paths_from_file(&s).map_err(|_| CliError::Read)?;
			},
			Argument::KeyWithValue("-s" | "--salt", s) => {
				config = config.with_salt(s);
			},
			Argument::KeyWithValue("-w" | "--whitelist", s) => {
				whitelist.extend(s.split(',').map(|v| v.trim().to_owned()));
			},

			Argument::Path(s) => { paths = paths.with_path(s); },

			// Mystery keys are ignored.
			_ => {},
		}
	}

	// Put it all together!
	let ugly = Uglifier::new(&config.with_whitelist(whitelist));
	let paths = paths.filter(|p| is_html(p)).collect::<Vec<_>>();
	if paths.is_empty() { return Err(CliError::NoDocuments); }

	// Totals.
	let identifiers = AtomicU64::new(0);
	let before = AtomicU64::new(0);
	let after = AtomicU64::new(0);
	let cb = |p: &Path| {
		if let Ok(res) = Document::try_from(p).and_then(|d| d.uglify(&ugly)) {
			let Crunched { identifiers: i, before: b, after: a } = res;
			identifiers.fetch_add(i, SeqCst);
			before.fetch_add(b, SeqCst);
			after.fetch_add(a, SeqCst);
		}
	};

	// Sexy run-through.
	if progress {
		// Boot up a progress bar.
		let progress = Progless::try_from(paths.len())?
			.with_title(Some(Msg::new(("HTMLUglify", 199), "Reticulating &splines;")));

		paths.par_iter().for_each(|p| {
			let tmp = p.to_string_lossy();
			let task = progress.task(&tmp);
			cb(p.as_path());
			drop(task);
		});

		progress.finish();
	}
	else {
		paths.par_iter().for_each(|p| cb(p.as_path()));
	}

	// Summarize.
	let before = before.into_inner();
	let after = after.into_inner();
	Msg::new(MsgKind::Crunched, format!(
		"{} {}, {} identifiers shortened, {} bytes saved.",
		NiceU64::from(paths.len() as u64),
		if paths.len() == 1 { "document" } else { "documents" },
		NiceU64::from(identifiers.into_inner()),
		NiceU64::from(before.saturating_sub(after)),
	))
		.with_newline(true)
		.print();

	Ok(())
}

/// # Is HTML?
///
/// Match `.html` and `.htm` files, case-insensitively.
fn is_html(path: &Path) -> bool {
	Some(E_HTML) == Extension::try_from4(path) ||
	Some(E_HTM) == Extension::try_from3(path)
}
