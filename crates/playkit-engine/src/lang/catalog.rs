use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;

/// Error selecting or loading language data.
#[derive(Debug, Clone, PartialEq)]
pub enum LangError {
    /// [`LangCatalog::set_lang`] was given a language the catalog has no
    /// table for.
    UnknownLang(String),
    /// The TOML source did not parse into language tables.
    Parse(String),
}

impl fmt::Display for LangError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LangError::UnknownLang(lang) => write!(f, "unknown language: {lang}"),
            LangError::Parse(msg) => write!(f, "language table parse error: {msg}"),
        }
    }
}

impl std::error::Error for LangError {}

#[derive(Debug, Clone, Default, Deserialize)]
struct LangTable {
    #[serde(default)]
    translate: BTreeMap<String, String>,
}

/// Per-language string tables with `$var` substitution.
///
/// Until a language is selected every lookup resolves to `None`; selection
/// never falls back silently to another language.
#[derive(Debug, Clone, Default)]
pub struct LangCatalog {
    tables: BTreeMap<String, LangTable>,
    current: Option<String>,
    debug: bool,
}

impl LangCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses language tables from TOML:
    ///
    /// ```toml
    /// [en.translate]
    /// greet = "Hello, $name!"
    ///
    /// [ja.translate]
    /// greet = "こんにちは、$name!"
    /// ```
    pub fn from_toml_str(src: &str) -> Result<Self, LangError> {
        let tables: BTreeMap<String, LangTable> =
            toml::from_str(src).map_err(|e| LangError::Parse(e.to_string()))?;
        Ok(Self {
            tables,
            current: None,
            debug: false,
        })
    }

    /// When set, `resolve` returns the key itself instead of the
    /// translation.
    pub fn set_debug(&mut self, debug: bool) {
        self.debug = debug;
    }

    /// Selects the active language. On an unknown language the current
    /// selection is left unchanged.
    pub fn set_lang(&mut self, lang: &str) -> Result<(), LangError> {
        if !self.tables.contains_key(lang) {
            return Err(LangError::UnknownLang(lang.to_string()));
        }
        self.current = Some(lang.to_string());
        Ok(())
    }

    pub fn lang(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Languages the catalog has tables for, in sorted order.
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    /// Looks up `key` in the active language. `None` if no language is
    /// selected or the key is missing.
    pub fn resolve(&self, key: &str) -> Option<Cow<'_, str>> {
        if self.debug {
            return Some(Cow::Owned(key.to_string()));
        }
        let lang = self.current.as_ref()?;
        let template = self.tables.get(lang)?.translate.get(key)?;
        Some(Cow::Borrowed(template.as_str()))
    }

    /// Like [`resolve`](Self::resolve), substituting `$var` references from
    /// `vars`. Unknown variables are left as written.
    pub fn resolve_with(
        &self,
        key: &str,
        vars: &BTreeMap<String, String>,
    ) -> Option<Cow<'_, str>> {
        Some(substitute_vars(self.resolve(key)?, vars))
    }
}

/// Replaces `$name` references with values from `vars`.
///
/// Names are ASCII alphanumerics plus `_` and `.`; anything else ends the
/// reference. Unknown names are reproduced verbatim, `$` included.
fn substitute_vars<'a>(src: Cow<'a, str>, vars: &BTreeMap<String, String>) -> Cow<'a, str> {
    if !src.contains('$') {
        return src;
    }

    let mut out = String::with_capacity(src.len());
    let mut rest: &str = &src;
    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos + 1..];
        let end = rest.find(|c: char| !is_var_char(c)).unwrap_or(rest.len());
        let name = &rest[..end];
        match vars.get(name) {
            Some(value) => out.push_str(value),
            None => {
                out.push('$');
                out.push_str(name);
            }
        }
        rest = &rest[end..];
    }
    out.push_str(rest);
    Cow::Owned(out)
}

fn is_var_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '.'
}
