//! Build-setting variable expansion.
//!
//! Values such as `PRODUCT_BUNDLE_IDENTIFIER` may reference other settings
//! in any of Xcode's spellings:
//!
//! - `$(NAME)` and `$(NAME:qualifier)`
//! - `${NAME}` and `${NAME:qualifier}`
//! - `$NAME`, where the name is the longest setting key the remaining text
//!   starts with
//!
//! Expansion substitutes one reference at a time and rescans, since a
//! substituted value may contain references of its own. Nested references
//! resolve inside-out. Every intermediate string is remembered; producing
//! one a second time is a [`ReferenceCycle`](SettingsError::ReferenceCycle).
//! Expansions that grow without repeating are cut off by
//! [`ExpansionConfig::max_steps`] and reported the same way.
//!
//! Qualifiers are parsed and ignored: `$(PRODUCT_NAME:rfc1034identifier)`
//! substitutes the plain value of `PRODUCT_NAME`.

use std::collections::HashSet;
use std::ops::Range;

use tracing::trace;

use pbx_types::BuildSettings;

use crate::config::ExpansionConfig;
use crate::error::{SettingsError, SettingsResult};

/// Expand every reference in `raw` against `settings` with default limits.
pub fn resolve_variables(raw: &str, settings: &BuildSettings) -> SettingsResult<String> {
    Expander::new(settings).expand(raw)
}

/// Expands references against one settings table.
#[derive(Clone, Copy, Debug)]
pub struct Expander<'s> {
    settings: &'s BuildSettings,
    max_steps: usize,
}

impl<'s> Expander<'s> {
    pub fn new(settings: &'s BuildSettings) -> Self {
        Self::with_config(settings, &ExpansionConfig::default())
    }

    pub fn with_config(settings: &'s BuildSettings, config: &ExpansionConfig) -> Self {
        Self {
            settings,
            max_steps: config.max_steps,
        }
    }

    /// Substitute references until none remain.
    pub fn expand(&self, raw: &str) -> SettingsResult<String> {
        let mut current = raw.to_string();
        let mut seen = HashSet::from([current.clone()]);
        let mut steps = 0usize;

        while let Some(reference) = next_reference(&current, self.settings)? {
            if steps == self.max_steps {
                return Err(SettingsError::ReferenceCycle {
                    value: raw.to_string(),
                });
            }
            steps += 1;

            let value = self
                .settings
                .get(reference.name)
                .ok_or_else(|| SettingsError::UndefinedVariable(reference.name.to_string()))?
                .joined();
            trace!(
                step = steps,
                variable = reference.name,
                qualifier = reference.qualifier.unwrap_or(""),
                "substituting reference"
            );
            current.replace_range(reference.span, &value);

            if !seen.insert(current.clone()) {
                return Err(SettingsError::ReferenceCycle {
                    value: raw.to_string(),
                });
            }
        }

        Ok(current)
    }
}

/// One variable reference found in a string.
#[derive(Debug, PartialEq, Eq)]
struct Reference<'t> {
    /// Byte range of the whole reference, `$` through the closing delimiter.
    span: Range<usize>,
    name: &'t str,
    qualifier: Option<&'t str>,
}

/// The next reference to substitute, or `None` when `text` has no `$`.
///
/// A delimited reference whose body contains another `$` is skipped so the
/// inner reference goes first.
fn next_reference<'t>(
    text: &'t str,
    settings: &BuildSettings,
) -> SettingsResult<Option<Reference<'t>>> {
    let bytes = text.as_bytes();
    let mut search = 0;

    while let Some(offset) = text[search..].find('$') {
        let start = search + offset;
        match bytes.get(start + 1) {
            Some(&open @ (b'(' | b'{')) => {
                let close = if open == b'(' { ')' } else { '}' };
                let body_start = start + 2;
                let Some(rel) = text[body_start..].find(|c: char| c == '$' || c == close) else {
                    return Err(malformed(text, start));
                };
                let body_end = body_start + rel;
                if bytes[body_end] == b'$' {
                    search = body_end;
                    continue;
                }

                let body = &text[body_start..body_end];
                let (name, qualifier) = match body.split_once(':') {
                    Some((name, qualifier)) => (name, Some(qualifier)),
                    None => (body, None),
                };
                if name.is_empty() {
                    return Err(malformed(text, start));
                }
                return Ok(Some(Reference {
                    span: start..body_end + 1,
                    name,
                    qualifier,
                }));
            }
            _ => {
                let rest = &text[start + 1..];
                if let Some(key) = settings.longest_key_prefix(rest) {
                    return Ok(Some(Reference {
                        span: start..start + 1 + key.len(),
                        name: &rest[..key.len()],
                        qualifier: None,
                    }));
                }

                let name_len = rest
                    .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                    .unwrap_or(rest.len());
                if name_len == 0 {
                    return Err(malformed(text, start));
                }
                return Err(SettingsError::UndefinedVariable(rest[..name_len].to_string()));
            }
        }
    }

    Ok(None)
}

fn malformed(text: &str, position: usize) -> SettingsError {
    SettingsError::MalformedReference {
        value: text.to_string(),
        position,
    }
}
