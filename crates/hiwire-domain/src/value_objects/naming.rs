//! Name derivation helpers
//!
//! Artifact and unit names are derived once, when a producer or unit is
//! declared, and stored verbatim afterwards.

use crate::constants::{CONFIGURATION_POSTFIX, QUALIFIER_SEPARATOR};

/// Convert an identifier to lower camel case.
///
/// `DataSource` → `dataSource`, `data_source` → `dataSource`,
/// `JWTToken` → `jwtToken`, `URL` → `url`.
pub fn to_lower_camel(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let segments = input
        .split(['_', '-', ' '])
        .filter(|segment| !segment.is_empty());

    for (index, segment) in segments.enumerate() {
        if index == 0 {
            out.push_str(&lower_leading_run(segment));
        } else {
            out.push_str(&upper_first(segment));
        }
    }
    out
}

/// Uppercase the first character only
pub fn upper_first(input: &str) -> String {
    let mut chars = input.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Lowercase a leading acronym, keeping the capital that starts the next word.
fn lower_leading_run(segment: &str) -> String {
    let chars: Vec<char> = segment.chars().collect();
    let run = chars.iter().take_while(|c| c.is_uppercase()).count();

    let lower_until = match run {
        0 => return segment.to_string(),
        // whole segment is upper case, or a single leading capital
        n if n == chars.len() || n == 1 => n,
        // `JWTToken`: keep the `T` of `Token`
        n if chars[n].is_lowercase() => n - 1,
        n => n,
    };

    chars
        .iter()
        .enumerate()
        .map(|(i, c)| {
            if i < lower_until {
                c.to_lowercase().next().unwrap_or(*c)
            } else {
                *c
            }
        })
        .collect()
}

/// Derive a unit name from its type name and package.
///
/// The `Configuration` postfix is removed and the rest is lower-camel cased;
/// when nothing meaningful remains the package name is used instead.
pub fn unit_name(type_name: &str, package: &str) -> String {
    let stripped = type_name.replace(CONFIGURATION_POSTFIX, "");
    let name = to_lower_camel(&stripped);
    if name.is_empty() || name == CONFIGURATION_POSTFIX.to_lowercase() {
        package.to_string()
    } else {
        name
    }
}

/// Qualify a name with a package: `package.name`.
pub fn qualify(package: &str, name: &str) -> String {
    if package.is_empty() {
        name.to_string()
    } else {
        format!("{package}{QUALIFIER_SEPARATOR}{name}")
    }
}

/// Prefix a name with its lower-camel package: `storage` + `dataSource` →
/// `storageDataSource`.
pub fn package_prefixed(package: &str, name: &str) -> String {
    let package = to_lower_camel(package);
    if package.is_empty() {
        name.to_string()
    } else {
        format!("{package}{}", upper_first(name))
    }
}
