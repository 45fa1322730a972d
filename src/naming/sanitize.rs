//! Pure filename sanitization.
//!
//! Maps a raw remote filename to a safe, normalized local filename:
//! extension extraction and normalization, character substitution, and
//! whitespace collapsing. No I/O; deterministic; idempotent.

use std::sync::LazyLock;

use regex::Regex;

/// Extensions (without dot) accepted as known image types.
pub const RECOGNIZED_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp"];

#[allow(clippy::expect_used)]
static PLUS_OR_AMP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*[+&]\s*").expect("plus/ampersand regex is valid"));

#[allow(clippy::expect_used)]
static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace regex is valid"));

#[allow(clippy::expect_used)]
static TRAILING_PARENTHETICAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\([^()]*\)\s*$").expect("parenthetical regex is valid"));

/// Toggles for extension normalization.
///
/// An explicit struct rather than process-wide flags, so [`sanitize`] stays
/// pure and testable. Both policies default to on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SanitizeOptions {
    /// Rewrite a `.jpeg` extension to `.jpg`.
    pub replace_jpeg_with_jpg: bool,
    /// Uppercase the extension after any rewrite.
    pub uppercase_extensions: bool,
}

impl Default for SanitizeOptions {
    fn default() -> Self {
        Self {
            replace_jpeg_with_jpg: true,
            uppercase_extensions: true,
        }
    }
}

/// A sanitized filename: safe base name plus normalized (possibly empty)
/// extension, with the dot included in the extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizedName {
    /// The cleaned base name (no path separators, no illegal characters).
    pub base: String,
    /// The normalized extension including its leading dot, or empty.
    pub extension: String,
    /// False when the extension is non-empty but outside the known image
    /// set — a signal for manual inspection, not a fatal condition.
    pub recognized: bool,
}

impl SanitizedName {
    /// Returns the complete filename (base plus extension).
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{}{}", self.base, self.extension)
    }

    /// Whether a usable extension was preserved.
    #[must_use]
    pub fn has_extension(&self) -> bool {
        !self.extension.is_empty()
    }

    /// Whether sanitization reduced the name to nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.base.is_empty() && self.extension.is_empty()
    }
}

/// Sanitizes a raw remote filename into a safe local filename.
///
/// Steps, in order: extension extraction (discarding garbage
/// pseudo-extensions containing whitespace or parentheses), extension
/// normalization per `options`, character substitution on the base name,
/// whitespace collapsing, trailing-parenthetical stripping (only when a
/// real extension exists), and recombination. The result is a fixpoint:
/// sanitizing it again changes nothing.
#[must_use]
pub fn sanitize(raw: &str, options: &SanitizeOptions) -> SanitizedName {
    let (base, extension) = split_extension(raw);

    let extension = normalize_extension(extension, options);
    let mut base = clean_base(base);

    // A remote "(edited)"-style decoration before a real extension is
    // upload noise, not part of the name. Stripped after cleaning and to a
    // fixpoint, so character deletions cannot expose a parenthetical that
    // survives into a second pass.
    if !extension.is_empty() {
        loop {
            let stripped = TRAILING_PARENTHETICAL.replace(&base, "");
            if stripped == base {
                break;
            }
            base = stripped.into_owned();
        }
    }

    let recognized = extension.is_empty()
        || RECOGNIZED_IMAGE_EXTENSIONS
            .iter()
            .any(|known| extension[1..].eq_ignore_ascii_case(known));

    SanitizedName {
        base,
        extension,
        recognized,
    }
}

/// Splits a raw name at the last dot.
///
/// The apparent extension is discarded when it contains whitespace or
/// parentheses (it really isn't an extension, is it?), and a bare trailing
/// dot does not count as one. A name that is only an extension (".jpg")
/// yields an empty base.
fn split_extension(raw: &str) -> (&str, &str) {
    let Some(dot) = raw.rfind('.') else {
        return (raw, "");
    };
    let extension = &raw[dot..];
    if extension.len() <= 1
        || extension
            .chars()
            .any(|c| c.is_whitespace() || c == '(' || c == ')')
    {
        return (raw, "");
    }
    (&raw[..dot], extension)
}

/// Applies the extension normalization policies.
pub(crate) fn normalize_extension(extension: &str, options: &SanitizeOptions) -> String {
    let mut extension = extension.to_string();
    if options.replace_jpeg_with_jpg && extension.eq_ignore_ascii_case(".jpeg") {
        extension = ".jpg".to_string();
    }
    if options.uppercase_extensions {
        extension = extension.to_uppercase();
    }
    extension
}

/// Sanitizes a single directory component (group or album name).
///
/// Applies the base-name substitution rules only; directory names carry no
/// extension. Guarantees the result contains no path separators, so a `/`
/// in a remote album title cannot silently nest directories.
#[must_use]
pub fn sanitize_component(raw: &str) -> String {
    clean_base(raw)
}

fn clean_base(base: &str) -> String {
    // replace + or & (with surrounding whitespace) with "and"
    let cleaned = PLUS_OR_AMP.replace_all(base, " and ").into_owned();
    let cleaned = cleaned.replace('%', "percent");

    // Remove exclamation points, normalize typographic apostrophes
    let mut cleaned = cleaned.replace('!', "");
    cleaned = cleaned.replace('’', "'");

    // Slashes can't be allowed in a file name
    let cleaned = cleaned.replace(['/', '\\'], "-");

    // Replace the remaining illegal characters with whitespace
    let cleaned: String = cleaned
        .chars()
        .map(|c| match c {
            '?' | '\\' | '/' | ':' | ';' | '|' | '[' | ']' | '{' | '}' | '<' | '>' | ',' | '"'
            | '’' => ' ',
            c => c,
        })
        .collect();

    // Collapse blocks of whitespace and trim
    WHITESPACE_RUN.replace_all(&cleaned, " ").trim().to_string()
}
