//! Rust source generation for tag constants.

use std::fmt::Write;

use crate::toml_parser::TagsConfig;

/// First line of every generated file. Everything after the header is the
/// deterministic body used for change detection.
const HEADER_MARKER: &str = "// @generated by bevy-tagging-build";

/// Constant name for a tag: characters outside `[A-Za-z0-9_]` become `_`
/// and the result is prefixed. Case is kept, so `Player` and `player` stay
/// distinct constants.
///
/// ```
/// use bevy_tagging_build::const_name;
///
/// assert_eq!(const_name("TAG_", "Main Camera"), "TAG_Main_Camera");
/// assert_eq!(const_name("TAG_", "ui/button.ok"), "TAG_ui_button_ok");
/// assert_ne!(const_name("TAG_", "Player"), const_name("TAG_", "player"));
/// ```
pub fn const_name(prefix: &str, tag: &str) -> String {
    let mut name = String::with_capacity(prefix.len() + tag.len() + 1);
    name.push_str(prefix);
    if name.is_empty() && tag.starts_with(|c: char| c.is_ascii_digit()) {
        name.push('_');
    }
    name.extend(tag.chars().map(|c| {
        if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' }
    }));
    name
}

/// Generate the full file: timestamped header followed by the body.
pub fn generate_constants_code(config: &TagsConfig) -> String {
    let mut code = String::new();
    code.push_str(HEADER_MARKER);
    code.push('\n');
    let _ = writeln!(
        code,
        "// Generated at {}. Do not edit; change tags.toml instead.",
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    );
    code.push_str(&generate_body(config));
    code
}

/// Generate the deterministic part of the file.
pub fn generate_body(config: &TagsConfig) -> String {
    let mut code = String::new();
    code.push('\n');
    let _ = writeln!(code, "#[allow(dead_code, non_upper_case_globals)]");
    let _ = writeln!(code, "pub mod {} {{", config.module_name);

    for name in config.names() {
        let _ = writeln!(
            code,
            "    pub const {}: &str = {:?};",
            const_name(&config.prefix, name),
            name
        );
    }

    if !config.is_empty() {
        code.push('\n');
    }
    let _ = writeln!(code, "    /// Every registered tag, in registry order.");
    let _ = write!(code, "    pub const ALL: &[&str] = &[");
    for (i, name) in config.names().iter().enumerate() {
        if i > 0 {
            code.push_str(", ");
        }
        code.push_str(&const_name(&config.prefix, name));
    }
    code.push_str("];\n}\n");
    code
}

/// Strip the header from a previously generated file.
///
/// Returns `None` if the file was not produced by this generator.
pub fn body_of(code: &str) -> Option<&str> {
    let rest = code.strip_prefix(HEADER_MARKER)?.strip_prefix('\n')?;
    let (_stamp, body) = rest.split_once('\n')?;
    Some(body)
}
