//! Naming conventions for generated identifiers
//!
//! Schema names are written in `snake_case` or `kebab-case`; these helpers
//! turn them into the identifier styles target languages expect.

use convert_case::{Boundary, Case, Casing};

/// Initialisms kept fully upper-case by [`pascal`] and [`camel`]
const INITIALISMS: &[&str] = &[
    "ACL", "API", "ASCII", "AWS", "CPU", "CSS", "DNS", "EOF", "GB", "GUID", "HTML", "HTTP",
    "HTTPS", "ID", "IP", "JSON", "KB", "LHS", "MAC", "MB", "QPS", "RAM", "RHS", "RPC", "SLA",
    "SMTP", "SQL", "SSH", "SSO", "TCP", "TLS", "TTL", "UDP", "UI", "UID", "URI", "URL", "UTF8",
    "UUID", "VM", "XML", "XMPP", "XSRF", "XSS",
];

fn words(name: &str) -> impl Iterator<Item = &str> {
    name.split(['_', '-']).filter(|word| !word.is_empty())
}

/// Upper-case the first character, keep the rest
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn pascal_word(word: &str) -> String {
    let upper = word.to_uppercase();
    if INITIALISMS.contains(&upper.as_str()) {
        upper
    } else {
        capitalize(word)
    }
}

/// `FullName` => `full_name`, `HTTPCode` => `http_code`
///
/// Digits stay attached to their word: `address1` => `address1`.
pub fn snake(name: &str) -> String {
    name.remove_boundaries(&Boundary::digits()).to_case(Case::Snake)
}

/// `user_info` => `userInfo`, `user_id` => `userID`
pub fn camel(name: &str) -> String {
    let mut parts = words(name);
    let Some(first) = parts.next() else {
        return String::new();
    };
    let mut out = first.to_lowercase();
    out.extend(parts.map(pascal_word));
    out
}

/// `user_info` => `UserInfo`, `user_id` => `UserID`
pub fn pascal(name: &str) -> String {
    words(name).map(pascal_word).collect()
}

/// `user_id` => `UserId`; initialisms are not special-cased
pub fn proto_pascal(name: &str) -> String {
    words(name).map(capitalize).collect()
}

/// Package identifier for a schema or folder name
pub fn package_name(name: &str) -> String {
    camel(name)
}
