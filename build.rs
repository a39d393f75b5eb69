/*!
# HTMLUglify: Build
*/

use argyle::KeyWordsBuilder;
use dowser::Extension;
use std::{
	fs::File,
	io::Write,
	path::{
		Path,
		PathBuf,
	},
};



/// # Build.
pub fn main() {
	println!("cargo:rerun-if-env-changed=CARGO_PKG_VERSION");

	build_cli();
	build_extensions();
}

/// # Build CLI Arguments.
fn build_cli() {
	let mut builder = KeyWordsBuilder::default();
	builder.push_keys([
		"-h", "--help",
		"-p", "--progress",
		"-V", "--version",
	]);
	builder.push_keys_with_values([
		"-l", "--list",
		"-s", "--salt",
		"-w", "--whitelist",
	]);
	builder.save(out_path("argyle.rs"));
}

/// # Build Extensions.
///
/// We might as well pre-compile the extensions we're looking for.
fn build_extensions() {
	let out = format!(
		r"
/// # Extension: `htm`.
const E_HTM: Extension = {};

/// # Extension: `html`.
const E_HTML: Extension = {};
",
		Extension::codegen(b"htm"),
		Extension::codegen(b"html"),
	);

	write(&out_path("htmluglify-extensions.rs"), out.as_bytes());
}

/// # Output Path.
///
/// Append the sub-path to OUT_DIR.
fn out_path(name: &str) -> PathBuf {
	let dir = std::env::var("OUT_DIR").expect("Missing OUT_DIR.");
	let mut out = std::fs::canonicalize(dir).expect("Missing OUT_DIR.");
	out.push(name);
	out
}

/// # Write File.
fn write(path: &Path, data: &[u8]) {
	File::create(path).and_then(|mut f| f.write_all(data).and_then(|()| f.flush()))
		.expect("Unable to write file.");
}
