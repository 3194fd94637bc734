//! Double-brace prop masking.
//!
//! JSX object-literal props (`style={{ flex: 1 }}`) use the same delimiters
//! as the template engine. Before compilation every `identifier={{ ... }}`
//! value is swapped for an opaque positional placeholder; after rendering
//! the placeholders are swapped back verbatim.
//!
//! Masked spans are never evaluated, so template directives written inside a
//! prop object are emitted literally.

use crate::domain::error::DomainError;

/// Prefix of every placeholder token. Templates may not contain it.
pub const MASK_PREFIX: &str = "__NEXORA_MASK_";
const MASK_SUFFIX: &str = "__";

/// Template text with its prop literals replaced by placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskedTemplate {
    text: String,
    masks: Vec<String>,
}

impl MaskedTemplate {
    /// Mask every `identifier={{ ... }}` prop value in `source`.
    ///
    /// The span runs from the first `{` to its balancing `}`; braces inside
    /// string literals are ignored.
    ///
    /// # Errors
    ///
    /// [`DomainError::TemplateSyntax`] when a prop value never closes or when
    /// `source` already contains [`MASK_PREFIX`].
    pub fn mask(source: &str) -> Result<Self, DomainError> {
        if let Some(pos) = source.find(MASK_PREFIX) {
            return Err(DomainError::TemplateSyntax {
                line: line_of(source, pos),
                reason: format!("reserved token '{MASK_PREFIX}' in template"),
            });
        }

        let bytes = source.as_bytes();
        let mut text = String::with_capacity(source.len());
        let mut masks = Vec::new();
        let mut copied = 0;
        let mut i = 1;

        while i + 2 < bytes.len() {
            let is_prop = bytes[i] == b'='
                && bytes[i + 1] == b'{'
                && bytes[i + 2] == b'{'
                && is_ident_byte(bytes[i - 1]);

            if !is_prop {
                i += 1;
                continue;
            }

            let start = i + 1;
            let end = balanced_end(bytes, start).ok_or_else(|| DomainError::TemplateSyntax {
                line: line_of(source, start),
                reason: "unbalanced '{{' in prop value".into(),
            })?;

            text.push_str(&source[copied..start]);
            text.push_str(&placeholder(masks.len()));
            masks.push(source[start..end].to_string());
            copied = end;
            i = end;
        }

        text.push_str(&source[copied..]);
        Ok(Self { text, masks })
    }

    /// Masked text, safe to hand to the template engine.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn mask_count(&self) -> usize {
        self.masks.len()
    }

    /// Swap placeholders in `rendered` back to their original text.
    ///
    /// Single pass; a placeholder repeated by a loop is restored each time.
    /// Tokens with an unknown index are left untouched.
    pub fn restore(&self, rendered: &str) -> String {
        let mut out = String::with_capacity(rendered.len());
        let mut rest = rendered;

        while let Some(pos) = rest.find(MASK_PREFIX) {
            out.push_str(&rest[..pos]);
            let after = &rest[pos + MASK_PREFIX.len()..];
            let digits = after.bytes().take_while(u8::is_ascii_digit).count();
            let index = after[..digits].parse::<usize>().ok();

            match index {
                Some(n) if n < self.masks.len() && after[digits..].starts_with(MASK_SUFFIX) => {
                    out.push_str(&self.masks[n]);
                    rest = &after[digits + MASK_SUFFIX.len()..];
                }
                _ => {
                    out.push_str(MASK_PREFIX);
                    rest = after;
                }
            }
        }

        out.push_str(rest);
        out
    }
}

fn placeholder(index: usize) -> String {
    format!("{MASK_PREFIX}{index}{MASK_SUFFIX}")
}

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'_' | b'$' | b'-')
}

/// Exclusive end of the brace group opening at `start`.
fn balanced_end(bytes: &[u8], start: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut quote: Option<u8> = None;
    let mut i = start;

    while i < bytes.len() {
        let b = bytes[i];
        match quote {
            Some(_) if b == b'\\' => {
                i += 2;
                continue;
            }
            Some(q) if b == q => quote = None,
            Some(_) => {}
            None => match b {
                b'"' | b'\'' | b'`' => quote = Some(b),
                b'{' => depth += 1,
                b'}' => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(i + 1);
                    }
                }
                _ => {}
            },
        }
        i += 1;
    }

    None
}

fn line_of(source: &str, byte: usize) -> usize {
    source[..byte].matches('\n').count() + 1
}
