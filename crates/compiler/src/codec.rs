//! Conversion between dotted keys and bracketed grammar tokens.
//!
//! ```text
//! g.domain.a.b  <->  [DOMAIN::A::B]
//! ```
//!
//! Both directions canonicalize case: tokens are upper-case, keys lower-case.

use crate::error::{CompilerError, Result};

/// Namespace prefix of every managed key.
pub const KEY_PREFIX: &str = "g.";

const SEPARATOR: &str = "::";

/// Whether `key` lives in the managed `g.` namespace.
pub fn is_managed(key: &str) -> bool {
    key.starts_with(KEY_PREFIX)
}

/// `g.<domain>.<a>.<b>` -> `[DOMAIN::A::B]`
pub fn key_to_grammar(key: &str) -> Result<String> {
    if !is_managed(key) {
        return Err(CompilerError::invalid_key(key));
    }
    let parts: Vec<&str> = key.split('.').collect();
    if parts.len() < 3 {
        return Err(CompilerError::invalid_key(key));
    }

    let domain = parts[1];
    if domain.trim().is_empty() {
        return Err(CompilerError::invalid_key(key));
    }
    let rest: Vec<String> = parts[2..]
        .iter()
        .filter(|part| !part.trim().is_empty())
        .map(|part| part.to_uppercase())
        .collect();
    // `g.sys.` would otherwise yield `[SYS]`, which `grammar_to_key` rejects
    if rest.is_empty() {
        return Err(CompilerError::invalid_key(key));
    }

    let mut segments = Vec::with_capacity(rest.len() + 1);
    segments.push(domain.to_uppercase());
    segments.extend(rest);
    Ok(format!("[{}]", segments.join(SEPARATOR)))
}

/// `[DOMAIN::A::B]` -> `g.domain.a.b`
pub fn grammar_to_key(grammar: &str) -> Result<String> {
    let trimmed = grammar.trim();
    let Some(core) = trimmed
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
    else {
        return Err(CompilerError::invalid_grammar(grammar));
    };

    let parts: Vec<String> = core
        .split(SEPARATOR)
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect();
    if parts.len() < 2 {
        return Err(CompilerError::invalid_grammar(grammar));
    }

    Ok(format!("{KEY_PREFIX}{}", parts.join(".")))
}
