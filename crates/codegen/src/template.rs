//! # Migration Templates
//!
//! Two fixed stubs, one per [`TemplateKind`], carry named placeholder
//! tokens. Rendering substitutes every token in a single pass, so text
//! substituted in never gets re-scanned for tokens, and then tidies
//! blank lines.
//!
//! Stubs are compiled in ([`EmbeddedTemplates`]) and can be overridden
//! from a directory ([`DirectoryTemplates`]).

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::LazyLock;

use migrant_core::{MigrantError, MigrantResult, TemplateKind, TemplateStore};
use regex::Regex;

// ============================================================================
// Placeholders
// ============================================================================

pub const VERSION: &str = ":VERSION:";
pub const CLASS_NAME: &str = "DummyClass";
pub const TABLE_NAME: &str = "DummyTable";
pub const STRUCTURE: &str = "// structure\n";
pub const KEYS: &str = "// keys\n";
pub const CONSTRAINTS: &str = "// constraints\n";
pub const TABLE_OPTIONS: &str = "// tableCollationAndCharset\n";
pub const EXTRAS: &str = "// extras\n";
pub const FOREIGN: &str = "// foreign\n";
pub const FOREIGN_DROP: &str = "// foreignDrop\n";

/// Tokens a stub must contain for its kind
pub fn required_placeholders(kind: TemplateKind) -> &'static [&'static str] {
    match kind {
        TemplateKind::Create => &[
            CLASS_NAME,
            STRUCTURE,
            KEYS,
            CONSTRAINTS,
            TABLE_OPTIONS,
            EXTRAS,
        ],
        TemplateKind::ForeignKey => &[CLASS_NAME, FOREIGN, FOREIGN_DROP],
    }
}

// ============================================================================
// Template stores
// ============================================================================

const CREATE_STUB: &str = include_str!("../stubs/create.stub");
const FOREIGN_KEY_STUB: &str = include_str!("../stubs/foreign_key.stub");

/// The stubs shipped with the binary
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedTemplates;

impl EmbeddedTemplates {
    pub fn stub(kind: TemplateKind) -> &'static str {
        match kind {
            TemplateKind::Create => CREATE_STUB,
            TemplateKind::ForeignKey => FOREIGN_KEY_STUB,
        }
    }
}

impl TemplateStore for EmbeddedTemplates {
    fn template(&self, kind: TemplateKind) -> MigrantResult<String> {
        Ok(Self::stub(kind).to_string())
    }
}

/// Stubs read from a directory, by [`TemplateKind::file_name`]
///
/// A stub missing from the directory falls back to the embedded one.
#[derive(Debug, Clone)]
pub struct DirectoryTemplates {
    dir: PathBuf,
}

impl DirectoryTemplates {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl TemplateStore for DirectoryTemplates {
    fn template(&self, kind: TemplateKind) -> MigrantResult<String> {
        let path = self.dir.join(kind.file_name());
        if !path.is_file() {
            tracing::debug!(path = %path.display(), "stub not overridden, using embedded");
            return EmbeddedTemplates.template(kind);
        }

        tracing::debug!(path = %path.display(), "loading stub");
        std::fs::read_to_string(&path)
            .map_err(|e| MigrantError::template_load(path.display().to_string(), e.to_string()))
    }
}

// ============================================================================
// Rendering
// ============================================================================

/// Lines holding nothing but spaces or tabs
static WHITESPACE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]+$").expect("valid whitespace-line pattern"));

/// Two or more consecutive blank lines
static BLANK_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^(?:[ \t]*\r?\n){2,}").expect("valid blank-run pattern"));

/// Join rendered statements into a section body
///
/// The first statement takes the indentation already in front of the
/// placeholder; the rest get `indent`. The body always ends in a newline
/// so the line the placeholder sat on is preserved.
pub fn join_section<S: AsRef<str>>(lines: &[S], indent: &str) -> String {
    let separator = format!("\n{}", indent);
    let joined = lines
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<&str>>()
        .join(&separator);
    format!("{}\n", joined.trim())
}

/// Substitute placeholders and tidy blank lines
///
/// Every placeholder required for `kind` must appear in `template`;
/// tokens without a substitution are left untouched.
pub fn render(
    kind: TemplateKind,
    template: &str,
    substitutions: &[(&str, String)],
) -> MigrantResult<String> {
    if let Some(missing) = required_placeholders(kind)
        .iter()
        .find(|token| !template.contains(**token))
    {
        return Err(MigrantError::MissingPlaceholder {
            template: kind.file_name().to_string(),
            placeholder: missing.trim_end().to_string(),
        });
    }

    let values: HashMap<&str, &str> = substitutions
        .iter()
        .map(|(token, value)| (*token, value.as_str()))
        .collect();

    let mut tokens: Vec<&str> = values.keys().copied().collect();
    // Longest first, so no token shadows a longer one sharing its prefix
    tokens.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
    let pattern = tokens
        .iter()
        .map(|token| regex::escape(token))
        .collect::<Vec<_>>()
        .join("|");

    let substituted = if pattern.is_empty() {
        template.to_string()
    } else {
        let matcher = Regex::new(&pattern)
            .map_err(|e| MigrantError::internal(format!("placeholder pattern: {}", e)))?;
        matcher
            .replace_all(template, |caps: &regex::Captures<'_>| {
                values.get(&caps[0]).copied().unwrap_or_default().to_string()
            })
            .into_owned()
    };

    Ok(collapse_blank_lines(&substituted))
}

/// Blank out whitespace-only lines, then squeeze blank runs to one
pub fn collapse_blank_lines(text: &str) -> String {
    let cleared = WHITESPACE_LINE.replace_all(text, "");
    BLANK_RUN.replace_all(&cleared, "\n").into_owned()
}

// ============================================================================
// Tests
// ============================================================================
