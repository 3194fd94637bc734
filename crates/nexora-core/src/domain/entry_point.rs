//! Application entry-point (`App.tsx` / `App.js`) composition and surgery.
//!
//! The generated file is an ordered list of tagged regions:
//!
//! - import lines end with `// nexora:<tag>`
//! - provider opening tags carry `/* nexora:<tag> */` inside the tag
//! - the innermost root element carries `/* nexora:root */`
//! - multi-line blocks sit between `// nexora:begin <tag>` and
//!   `// nexora:end <tag>`
//!
//! Removing a provider deletes its tagged lines and unwraps its element.
//! Files without markers (hand-written or generated by older tools) fall
//! back to matching import sources and tag names, which is best effort.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::domain::{
    entities::project_config::ProjectConfig, state_machine::FeatureStateMachine,
    value_objects::Language,
};

const INDENT: &str = "  ";
const ROOT_MARKER: &str = "/* nexora:root */";
const WELCOME_TAG: &str = "welcome";
const WELCOME_IMPORT: &str = "import { SafeAreaView, StyleSheet, Text } from 'react-native';";
const NAVIGATOR_ROOT: &str = "<AppNavigator /* nexora:root */ />";

static IMPORT_SOURCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\s*import\s+(?:[^;'"]*?\s+from\s+)?['"]([^'"]+)['"]"#)
        .expect("Invalid import regex")
});

static OPENING_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*<([A-Za-z][A-Za-z0-9_.]*)(?:\s[^>]*)?>\s*$").expect("Invalid tag regex")
});

static BLOCK_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/\*.*?\*/").expect("Invalid comment regex"));

// ── Providers ────────────────────────────────────────────────────────────────

/// A wrapper element around the application root.
///
/// Variant order is nesting order: theme outermost, navigation innermost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Provider {
    Theme,
    Localization,
    /// Redux store provider. Zustand needs none.
    Store,
    Navigation,
}

impl Provider {
    /// Region tag used in markers.
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::Theme => "theme",
            Self::Localization => "localization",
            Self::Store => "redux",
            Self::Navigation => "navigation",
        }
    }

    pub const fn component(&self) -> &'static str {
        match self {
            Self::Theme => "ThemeProvider",
            Self::Localization => "LocalizationProvider",
            Self::Store => "Provider",
            Self::Navigation => "NavigationContainer",
        }
    }

    const fn attributes(&self) -> &'static str {
        match self {
            Self::Store => " store={store}",
            _ => "",
        }
    }

    const fn imports(&self) -> &'static [&'static str] {
        match self {
            Self::Theme => &["import { ThemeProvider } from './src/config/theme';"],
            Self::Localization => &["import { LocalizationProvider } from './src/localization';"],
            Self::Store => &[
                "import { Provider } from 'react-redux';",
                "import { store } from './src/store';",
            ],
            Self::Navigation => &[
                "import { NavigationContainer } from '@react-navigation/native';",
                "import AppNavigator from './src/navigation';",
            ],
        }
    }

    /// Import sources recognised when the file carries no markers.
    const fn import_sources(&self) -> &'static [&'static str] {
        match self {
            Self::Theme => &["./src/config/theme", "./src/theme"],
            Self::Localization => &["./src/localization"],
            Self::Store => &["react-redux", "./src/store"],
            Self::Navigation => &["@react-navigation/native", "./src/navigation"],
        }
    }

    fn opening_tag(&self) -> String {
        format!(
            "<{}{} {}>",
            self.component(),
            self.attributes(),
            block_marker(self.tag())
        )
    }

    fn closing_tag(&self) -> String {
        format!("</{}>", self.component())
    }
}

fn line_marker(tag: &str) -> String {
    format!("// nexora:{tag}")
}

fn block_marker(tag: &str) -> String {
    format!("/* nexora:{tag} */")
}

// ── Composition ──────────────────────────────────────────────────────────────

pub struct EntryPoint;

impl EntryPoint {
    /// Project-relative path of the entry point.
    pub fn path(language: Language) -> &'static str {
        language.entry_file()
    }

    /// Providers required by `config`, outermost first.
    pub fn providers(config: &ProjectConfig) -> Vec<Provider> {
        FeatureStateMachine::active_features(config)
            .into_iter()
            .filter_map(|f| f.def().provider)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Providers present in `before` but not in `after`.
    pub fn released_providers(before: &ProjectConfig, after: &ProjectConfig) -> Vec<Provider> {
        let kept = Self::providers(after);
        Self::providers(before)
            .into_iter()
            .filter(|p| !kept.contains(p))
            .collect()
    }

    /// Full entry-point source for `config`.
    pub fn render(config: &ProjectConfig) -> String {
        let providers = Self::providers(config);
        let mut lines = vec!["import React from 'react';".to_string()];

        if !config.has_navigation() {
            lines.push(welcome_import());
        }
        for provider in &providers {
            for import in provider.imports() {
                lines.push(format!("{import} {}", line_marker(provider.tag())));
            }
        }

        lines.push(String::new());
        lines.push(match config.language {
            Language::TypeScript => "const App: React.FC = () => {".to_string(),
            Language::JavaScript => "const App = () => {".to_string(),
        });
        lines.push(format!("{INDENT}return ("));

        let mut depth = 2;
        for provider in &providers {
            lines.push(indented(depth, &provider.opening_tag()));
            depth += 1;
        }
        if config.has_navigation() {
            lines.push(indented(depth, NAVIGATOR_ROOT));
        } else {
            lines.extend(welcome_view(config).iter().map(|l| indented(depth, l)));
        }
        for provider in providers.iter().rev() {
            depth -= 1;
            lines.push(indented(depth, &provider.closing_tag()));
        }

        lines.push(format!("{INDENT});"));
        lines.push("};".to_string());
        lines.push(String::new());
        if !config.has_navigation() {
            lines.extend(welcome_styles());
            lines.push(String::new());
        }
        lines.push("export default App;".to_string());

        let mut source = lines.join("\n");
        source.push('\n');
        source
    }

    /// Remove what `before` had and `after` no longer needs from `source`.
    ///
    /// Unwraps released providers and, when the last navigator goes, swaps
    /// the navigator root for the welcome view.
    pub fn remove(source: &str, before: &ProjectConfig, after: &ProjectConfig) -> String {
        let mut lines: Vec<String> = source.lines().map(str::to_string).collect();

        for provider in Self::released_providers(before, after) {
            strip_provider(&mut lines, provider);
        }
        if before.has_navigation() && !after.has_navigation() {
            show_welcome(&mut lines, after);
        }

        let mut out = lines.join("\n");
        if source.ends_with('\n') {
            out.push('\n');
        }
        out
    }
}

// ── Welcome view ─────────────────────────────────────────────────────────────

fn welcome_import() -> String {
    format!("{WELCOME_IMPORT} {}", line_marker(WELCOME_TAG))
}

fn welcome_view(config: &ProjectConfig) -> Vec<String> {
    vec![
        format!("<SafeAreaView style={{styles.container}} {ROOT_MARKER}>"),
        format!(
            "{INDENT}<Text style={{styles.title}}>Welcome to {}!</Text>",
            config.name
        ),
        format!(
            "{INDENT}<Text style={{styles.subtitle}}>Edit {} to get started</Text>",
            config.language.entry_file()
        ),
        "</SafeAreaView>".to_string(),
    ]
}

fn welcome_styles() -> Vec<String> {
    [
        "// nexora:begin welcome",
        "const styles = StyleSheet.create({",
        "  container: {",
        "    flex: 1,",
        "    justifyContent: 'center',",
        "    alignItems: 'center',",
        "    padding: 20,",
        "    backgroundColor: '#F3F4F6',",
        "  },",
        "  title: {",
        "    fontSize: 24,",
        "    fontWeight: 'bold',",
        "    marginBottom: 16,",
        "    color: '#1F2937',",
        "  },",
        "  subtitle: {",
        "    fontSize: 16,",
        "    color: '#4B5563',",
        "  },",
        "});",
        "// nexora:end welcome",
    ]
    .iter()
    .map(|l| l.to_string())
    .collect()
}

fn show_welcome(lines: &mut Vec<String>, config: &ProjectConfig) {
    let root = lines.iter().position(|l| l.contains(ROOT_MARKER)).or_else(|| {
        lines.iter().position(|l| {
            l.trim_start().starts_with("<AppNavigator") && l.trim_end().ends_with("/>")
        })
    });
    let Some(root) = root else {
        return;
    };
    if !lines[root].trim_end().ends_with("/>") {
        // Root is already a multi-line view.
        return;
    }

    let indent: String = lines[root]
        .chars()
        .take_while(|c| c.is_whitespace())
        .collect();
    let view: Vec<String> = welcome_view(config)
        .into_iter()
        .map(|l| format!("{indent}{l}"))
        .collect();
    lines.splice(root..=root, view);

    let import_tag = line_marker(WELCOME_TAG);
    if !lines.iter().any(|l| l.trim_end().ends_with(&import_tag)) {
        let at = lines
            .iter()
            .position(|l| l.starts_with("import React"))
            .map_or(0, |i| i + 1);
        lines.insert(at, welcome_import());
    }

    let begin = format!("// nexora:begin {WELCOME_TAG}");
    if !lines.iter().any(|l| l.trim() == begin) {
        let mut block = welcome_styles();
        match lines.iter().position(|l| l.trim() == "export default App;") {
            Some(at) => {
                block.push(String::new());
                lines.splice(at..at, block);
            }
            None => {
                lines.push(String::new());
                lines.extend(block);
            }
        }
    }
}

// ── Surgery ──────────────────────────────────────────────────────────────────

fn strip_provider(lines: &mut Vec<String>, provider: Provider) {
    let import_tag = line_marker(provider.tag());
    let element_tag = block_marker(provider.tag());
    let marked = lines
        .iter()
        .any(|l| l.contains(&element_tag) || l.trim_end().ends_with(&import_tag));

    if marked {
        lines.retain(|l| !l.trim_end().ends_with(&import_tag));
        delete_blocks(lines, provider.tag());
        if let Some(open) = lines.iter().position(|l| l.contains(&element_tag)) {
            unwrap_element(lines, open, provider.component());
        }
        return;
    }

    lines.retain(|l| {
        IMPORT_SOURCE
            .captures(l)
            .and_then(|c| c.get(1))
            .is_none_or(|m| !provider.import_sources().contains(&m.as_str()))
    });
    let open = lines.iter().position(|l| {
        !l.trim_end().ends_with("/>")
            && OPENING_TAG
                .captures(l)
                .and_then(|c| c.get(1))
                .is_some_and(|m| m.as_str() == provider.component())
    });
    if let Some(open) = open {
        unwrap_element(lines, open, provider.component());
    }
}

/// Delete every `// nexora:begin <tag>` .. `// nexora:end <tag>` block.
fn delete_blocks(lines: &mut Vec<String>, tag: &str) {
    let begin = format!("// nexora:begin {tag}");
    let end = format!("// nexora:end {tag}");
    while let Some(start) = lines.iter().position(|l| l.trim() == begin) {
        let stop = lines[start..]
            .iter()
            .position(|l| l.trim() == end)
            .map_or(start, |offset| start + offset);
        lines.drain(start..=stop);
    }
}

/// Drop the element opening at `open` and its matching close, keeping the
/// children one level shallower.
fn unwrap_element(lines: &mut Vec<String>, open: usize, name: &str) {
    match matching_close(lines, open, name) {
        Some(close) => {
            for line in &mut lines[open + 1..close] {
                if let Some(rest) = line.strip_prefix(INDENT) {
                    *line = rest.to_string();
                }
            }
            lines.remove(close);
            lines.remove(open);
        }
        None => {
            lines.remove(open);
        }
    }
}

fn matching_close(lines: &[String], open: usize, name: &str) -> Option<usize> {
    let closer = format!("</{name}>");
    let mut depth = 1usize;
    for (i, line) in lines.iter().enumerate().skip(open + 1) {
        depth += count_opens(line, name);
        for _ in line.matches(&closer) {
            depth -= 1;
            if depth == 0 {
                return Some(i);
            }
        }
    }
    None
}

fn count_opens(line: &str, name: &str) -> usize {
    let opener = format!("<{name}");
    line.match_indices(&opener)
        .filter(|(i, _)| {
            let rest = &line[i + opener.len()..];
            let boundary = rest
                .chars()
                .next()
                .is_none_or(|c| !(c.is_alphanumeric() || c == '_' || c == '.'));
            let self_closing = rest.find('>').is_some_and(|end| {
                BLOCK_COMMENT.replace_all(&rest[..end], "").trim_end().ends_with('/')
            });
            boundary && !self_closing
        })
        .count()
}

fn indented(depth: usize, line: &str) -> String {
    format!("{}{line}", INDENT.repeat(depth))
}
