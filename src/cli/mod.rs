/*!
# HTMLUglify: CLI
*/

mod crunch;
mod error;

pub(super) use crunch::{
	Crunched,
	Document,
};
pub(super) use error::CliError;
