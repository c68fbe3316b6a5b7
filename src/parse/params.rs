//! Parameter extractor: `TestParameter,<name>,<value>[,<value>...]` rows.

use crate::domain::{ParamValue, Parameters, RawRow, TEST_PARAMETER_TAG};
use crate::parse::is_tagged;

/// Collect the parameters of a row range.
///
/// Rows with fewer than three fields carry no value and are skipped. A name
/// seen twice keeps the later row's value.
pub fn extract_parameters(rows: &[RawRow]) -> Parameters {
    let mut params = Parameters::new();
    for row in rows {
        if !is_tagged(row, TEST_PARAMETER_TAG) || row.len() < 3 {
            continue;
        }
        params.insert(row[1].clone(), ParamValue::from_fields(&row[2..]));
    }
    params
}
