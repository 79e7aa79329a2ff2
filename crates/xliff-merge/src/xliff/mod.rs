//! Reading and writing XLIFF 2.0 catalog files.

mod read;
mod write;

pub use read::read_catalog;
pub use write::write_catalog;

use crate::error::XliffError;
use crate::model::Catalog;
use std::path::Path;

/// Read and parse a catalog file.
pub fn load_catalog(path: impl AsRef<Path>) -> Result<Catalog, XliffError> {
    let path = path.as_ref();
    let content = fs_err::read_to_string(path)?;
    read_catalog(&content).map_err(|err| err.in_file(path))
}

/// Serialize and write a catalog file, replacing any existing content.
pub fn save_catalog(path: impl AsRef<Path>, catalog: &Catalog) -> Result<(), XliffError> {
    let content = write_catalog(catalog)?;
    fs_err::write(path.as_ref(), content)?;
    Ok(())
}
