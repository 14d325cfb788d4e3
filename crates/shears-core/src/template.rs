use crate::ast::Node;
use crate::emitter;
use crate::error::{Error, Result};

/// Delimiter the reducer wraps around an override variable name in
/// placeholder mode.
pub const PLACEHOLDER_DELIMITER: &str = "____";

/// Renders the reduced tree, hands it to the injected stylesheet compiler,
/// and restores the placeholder tokens in the compiled output as template
/// references. A compiler failure aborts the pass; no partial output is
/// produced.
pub fn templatize<F, E>(root: &Node, compile: F) -> Result<String>
where
    F: FnOnce(&str) -> std::result::Result<String, E>,
    E: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let source = emitter::render(root);
    let compiled = compile(&source).map_err(|err| Error::Compile(err.into()))?;
    Ok(restore_placeholders(&compiled))
}

/// Rewrites every well-formed `____name____` token to the template
/// reference `{{name}}`. A `____` with no variable name and closing
/// delimiter after it is left untouched.
pub fn restore_placeholders(compiled: &str) -> String {
    let mut out = String::with_capacity(compiled.len());
    let mut rest = compiled;
    while let Some(start) = rest.find(PLACEHOLDER_DELIMITER) {
        let after = &rest[start + PLACEHOLDER_DELIMITER.len()..];
        match placeholder_name(after) {
            Some(name) => {
                out.push_str(&rest[..start]);
                out.push_str("{{");
                out.push_str(name);
                out.push_str("}}");
                rest = &after[name.len() + PLACEHOLDER_DELIMITER.len()..];
            }
            None => {
                out.push_str(&rest[..start + PLACEHOLDER_DELIMITER.len()]);
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// The shortest run up to the next delimiter, accepted only when it is a
/// non-empty variable name.
fn placeholder_name(after: &str) -> Option<&str> {
    let end = after.find(PLACEHOLDER_DELIMITER)?;
    let name = &after[..end];
    let well_formed = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if well_formed {
        Some(name)
    } else {
        None
    }
}
