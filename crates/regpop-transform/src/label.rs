//! Composite region label parsing.

use regpop_model::{DEFAULT_CODE_PADDING, ParseError};

/// A region label split into its display name and administrative code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionLabel {
    pub name: String,
    pub code: String,
}

/// Parses `"<name>(<code>)"`, stripping the default eight-zero code padding.
///
/// ```
/// use regpop_transform::parse_region_label;
///
/// let label = parse_region_label("서울특별시(1100000000)").unwrap();
/// assert_eq!(label.name, "서울특별시");
/// assert_eq!(label.code, "11");
/// ```
pub fn parse_region_label(label: &str) -> Result<RegionLabel, ParseError> {
    parse_region_label_with_padding(label, DEFAULT_CODE_PADDING)
}

pub fn parse_region_label_with_padding(
    label: &str,
    padding: &str,
) -> Result<RegionLabel, ParseError> {
    let missing_code = || ParseError::MissingCode {
        label: label.to_string(),
    };
    let (name, rest) = label.split_once('(').ok_or_else(missing_code)?;
    let code = rest.trim_end().strip_suffix(')').ok_or_else(missing_code)?;
    let code = code.trim();

    let name = name.trim();
    if name.is_empty() {
        return Err(ParseError::EmptyRegionName {
            label: label.to_string(),
        });
    }
    if code.is_empty() || !code.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::InvalidRegionCode {
            label: label.to_string(),
            code: code.to_string(),
        });
    }
    let code = if padding.is_empty() {
        code
    } else {
        code.strip_suffix(padding).unwrap_or(code)
    };

    Ok(RegionLabel {
        name: name.to_string(),
        code: code.to_string(),
    })
}
