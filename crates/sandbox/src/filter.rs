//! Static security filter for submitted scripts.

use regex::Regex;

use codecrew_core::{Error, Result};

/// Forbidden constructs, checked case-insensitively against the raw script
/// text before anything is parsed or run. The categories: module access to
/// OS/process/network facilities, dynamic evaluation/compilation,
/// unrestricted file handles, and reflective introspection of the running
/// environment.
const FORBIDDEN_PATTERNS: &[(&str, &str)] = &[
    (r"\bimport\b", "import statement"),
    (r"\b__import__\b", "__import__"),
    (r"\bexec\s*\(", "exec()"),
    (r"\beval\s*\(", "eval()"),
    (r"\bcompile\s*\(", "compile()"),
    (r"\bopen\s*\(", "open()"),
    (r"\bfile\s*\(", "file()"),
    (r"__builtins__", "__builtins__"),
    (r"__class__", "__class__"),
    (r"__bases__", "__bases__"),
    (r"__subclasses__", "__subclasses__"),
    (r"\bglobals\s*\(", "globals()"),
    (r"\blocals\s*\(", "locals()"),
    (r"\bgetattr\s*\(", "getattr()"),
    (r"\bsetattr\s*\(", "setattr()"),
    (r"\bdelattr\s*\(", "delattr()"),
];

/// Pattern-based rejection stage of the sandboxed executor.
///
/// This is a best-effort defense-in-depth layer, not a proof of safety:
/// substring/regex screening is bypassable by construction (string
/// concatenation, alternate spellings). The restricted interpreter behind
/// it is the layer that actually withholds capabilities.
pub struct SecurityFilter {
    patterns: Vec<(Regex, &'static str)>,
}

impl SecurityFilter {
    /// Compile the fixed pattern list.
    pub fn new() -> Self {
        let patterns = FORBIDDEN_PATTERNS
            .iter()
            .map(|(pattern, label)| {
                // Hard-coded patterns; compilation cannot fail at runtime.
                let regex = Regex::new(&format!("(?i){pattern}"))
                    .expect("forbidden pattern must compile");
                (regex, *label)
            })
            .collect();
        Self { patterns }
    }

    /// Check a script, refusing with `SecurityViolation` on the first
    /// forbidden construct found. A refused script is never executed.
    pub fn check(&self, code: &str) -> Result<()> {
        for (regex, label) in &self.patterns {
            if regex.is_match(code) {
                tracing::warn!(construct = *label, "Rejected submitted script");
                return Err(Error::security_violation(format!(
                    "code contains forbidden construct: {label}"
                )));
            }
        }
        Ok(())
    }
}

impl Default for SecurityFilter {
    fn default() -> Self {
        Self::new()
    }
}
