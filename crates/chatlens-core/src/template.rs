//! Placeholder substitution for `{name}` templates.
//!
//! Two substitution modes with different missing-key policies:
//! - [`render_strict`]: every placeholder must resolve, otherwise [`FormatError`].
//! - [`render_tolerant`]: unresolved placeholders become the empty string and
//!   the call never fails.
//!
//! Grammar: `{name}` is a placeholder, `{{` and `}}` are literal braces. The
//! name is everything between the braces, taken verbatim.

use std::collections::HashMap;

use serde_json::{Map, Value};

use chatlens_types::error::FormatError;

/// Separator used between rendered list elements when none is given.
pub const DEFAULT_SEPARATOR: &str = "\n";

/// Substitute placeholders from a JSON mapping, failing on any unknown name.
pub fn render_strict(template: &str, fields: &Map<String, Value>) -> Result<String, FormatError> {
    substitute(template, |name| fields.get(name).map(value_to_text), true)
}

/// Substitute placeholders from a string mapping. Unknown names, positional
/// `{}` fields and stray braces never fail; unknown names render as `""`.
pub fn render_tolerant(template: &str, fields: &HashMap<String, String>) -> String {
    // Tolerant mode has no error paths.
    substitute(template, |name| fields.get(name).cloned(), false).unwrap_or_default()
}

/// Render arbitrary JSON data into text through `template`.
///
/// - Object: strict substitution against its keys.
/// - Array: each object element is rendered strictly, every other element is
///   stringified; the pieces are joined with `separator` in order.
/// - Anything else: stringified, template unused.
pub fn render_data(template: &str, data: &Value, separator: &str) -> Result<String, FormatError> {
    match data {
        Value::Object(fields) => render_strict(template, fields),
        Value::Array(items) => {
            let pieces = items
                .iter()
                .map(|item| match item {
                    Value::Object(fields) => render_strict(template, fields),
                    other => Ok(value_to_text(other)),
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok(pieces.join(separator))
        }
        other => Ok(value_to_text(other)),
    }
}

/// Text form of a JSON value: strings verbatim, everything else (`null`
/// included) as compact JSON.
pub fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn substitute<F>(template: &str, mut lookup: F, strict: bool) -> Result<String, FormatError>
where
    F: FnMut(&str) -> Option<String>,
{
    let bytes = template.as_bytes();
    let mut out = String::with_capacity(template.len());
    let mut literal_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'{' => {
                out.push_str(&template[literal_start..i]);

                if bytes.get(i + 1) == Some(&b'{') {
                    out.push('{');
                    i += 2;
                } else {
                    match template[i + 1..].find(['{', '}']) {
                        Some(offset) if bytes[i + 1 + offset] == b'}' => {
                            let name = &template[i + 1..i + 1 + offset];
                            if name.is_empty() {
                                if strict {
                                    return Err(FormatError::PositionalField { position: i });
                                }
                            } else if let Some(value) = lookup(name) {
                                out.push_str(&value);
                            } else if strict {
                                return Err(FormatError::MissingKey(name.to_string()));
                            }
                            i += offset + 2;
                        }
                        _ => {
                            if strict {
                                return Err(FormatError::UnbalancedBrace { position: i });
                            }
                            out.push('{');
                            i += 1;
                        }
                    }
                }

                literal_start = i;
            }
            b'}' => {
                out.push_str(&template[literal_start..i]);

                if bytes.get(i + 1) == Some(&b'}') {
                    out.push('}');
                    i += 2;
                } else {
                    if strict {
                        return Err(FormatError::UnbalancedBrace { position: i });
                    }
                    out.push('}');
                    i += 1;
                }

                literal_start = i;
            }
            _ => i += 1,
        }
    }

    out.push_str(&template[literal_start..]);
    Ok(out)
}
