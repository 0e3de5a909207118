mod expression;
mod test_description;

use std::{fs::read_to_string, path::Path};

use log::debug;

pub use expression::parse_description;
pub use test_description::{DescriptionError, TestDescription, TestDescriptionSerde};

use crate::{Error, Result};

/// Loads a JSON (`.json`) or expression (anything else) test description.
/// Failures are tagged with `test_case`.
pub fn load_test_description<P: AsRef<Path>>(test_case: &str, path: P) -> Result<TestDescription> {
    let path = path.as_ref();
    debug!("loading test description {:?} for {}", path, test_case);

    let load = || -> std::result::Result<TestDescription, DescriptionError> {
        let text = read_to_string(path)?;
        if path.extension().is_some_and(|extension| extension == "json") {
            TestDescription::from_json(&text)
        } else {
            parse_description(&text)
        }
    };

    load().map_err(|source| Error::DescriptionLoad {
        test_case: test_case.into(),
        source,
    })
}
