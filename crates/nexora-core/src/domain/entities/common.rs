use super::super::DomainError;
use std::fmt;
use std::path::{Component, Path, PathBuf};

/// A project-relative filesystem path.
///
/// Invariant: never absolute and never escapes the project root through a
/// `..` component. Enforced at construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RelativePath(PathBuf);

impl RelativePath {
    /// Fallible constructor.
    pub fn try_new(path: impl Into<PathBuf>) -> Result<Self, DomainError> {
        let path = path.into();
        if path.is_absolute() || path.has_root() {
            return Err(DomainError::AbsolutePathNotAllowed {
                path: path.display().to_string(),
            });
        }
        if path.components().any(|c| matches!(c, Component::ParentDir)) {
            return Err(DomainError::AbsolutePathNotAllowed {
                path: path.display().to_string(),
            });
        }
        Ok(Self(path))
    }

    /// Join a segment, maintaining the relative invariant.
    pub fn join(&self, segment: impl AsRef<Path>) -> Result<Self, DomainError> {
        Self::try_new(self.0.join(segment))
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Forward-slash form, stable across platforms.
    pub fn to_slash_string(&self) -> String {
        self.0
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join("/")
    }

    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }
}

impl AsRef<Path> for RelativePath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_slash_string())
    }
}

// ── Naming helpers ───────────────────────────────────────────────────────────

/// Convert a display name to kebab-case (`"My Shop App"` → `"my-shop-app"`).
///
/// Used for the npm package name.
pub fn to_kebab_case(s: &str) -> String {
    split_words(s).join("-")
}

/// Convert a display name to PascalCase (`"my-shop app"` → `"MyShopApp"`).
pub fn to_pascal_case(s: &str) -> String {
    split_words(s)
        .into_iter()
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

/// Split on separators (`_`, `-`, whitespace, `.`), camelCase transitions
/// and acronym boundaries (`HTTPServer` → `http`, `server`).
fn split_words(input: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let chars: Vec<char> = input.chars().collect();

    for (i, &c) in chars.iter().enumerate() {
        if c == '_' || c == '-' || c == '.' || c.is_whitespace() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current).to_lowercase());
            }
            continue;
        }

        let next = chars.get(i + 1).copied();
        let after = chars.get(i + 2).copied();
        current.push(c);

        let camel = c.is_lowercase() && next.is_some_and(char::is_uppercase);
        let acronym = c.is_uppercase()
            && next.is_some_and(char::is_uppercase)
            && after.is_some_and(char::is_lowercase);
        let digit_edge = c.is_ascii_digit() && next.is_some_and(char::is_alphabetic);

        if camel || acronym || digit_edge {
            words.push(std::mem::take(&mut current).to_lowercase());
        }
    }

    if !current.is_empty() {
        words.push(current.to_lowercase());
    }

    words
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_absolute_and_parent_paths() {
        assert!(RelativePath::try_new("/etc/passwd").is_err());
        assert!(RelativePath::try_new("src/../../outside").is_err());
        assert!(RelativePath::try_new("src/navigation/index.tsx").is_ok());
    }

    #[test]
    fn slash_form_is_stable() {
        let p = RelativePath::try_new("src")
            .unwrap()
            .join("store")
            .unwrap()
            .join("index.ts")
            .unwrap();
        assert_eq!(p.to_string(), "src/store/index.ts");
    }

    #[test]
    fn kebab_case_package_names() {
        assert_eq!(to_kebab_case("Foo"), "foo");
        assert_eq!(to_kebab_case("MyShopApp"), "my-shop-app");
        assert_eq!(to_kebab_case("my_shop app"), "my-shop-app");
        assert_eq!(to_kebab_case("HTTPClient"), "http-client");
    }

    #[test]
    fn pascal_case_component_names() {
        assert_eq!(to_pascal_case("my-shop app"), "MyShopApp");
        assert_eq!(to_pascal_case("Foo"), "Foo");
    }
}
