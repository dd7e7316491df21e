// SPDX-License-Identifier: PMPL-1.0-or-later
//! Just enough CSS cascade to compute text and background colors.
//!
//! Sources are `<style>` elements and inline `style=""` attributes. Matching
//! declarations are ordered by `!important`, origin (inline beats sheets),
//! selector specificity and source order; the last one wins. Rules nested in
//! `@media` blocks apply unconditionally, and selectors scraper cannot parse
//! are dropped.

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;
use tracing::debug;

use crate::color::parse::named_color;

static COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)/\*.*?\*/").expect("valid regex"));

static RULE_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([^{}]+)\{([^{}]*)\}").expect("valid regex"));

static COLOR_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(#[0-9a-f]{3,8}\b|(?:rgb|hsl)a?\([^)]*\)|\btransparent\b)").expect("valid regex")
});

static URL_FN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)url\([^)]*\)").expect("valid regex"));

static FUNCTION_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Za-z-]+)\(").expect("valid regex"));

const CSS_WIDE_KEYWORDS: &[&str] = &["inherit", "initial", "unset", "revert"];

const COLOR_FUNCTIONS: &[&str] = &["rgb", "rgba", "hsl", "hsla"];

/// Non-color keywords of the `background` shorthand
const BACKGROUND_KEYWORDS: &[&str] = &[
    "none", "repeat", "repeat-x", "repeat-y", "no-repeat", "space", "round", "top", "bottom",
    "left", "right", "center", "fixed", "scroll", "local", "auto", "cover", "contain",
    "border-box", "padding-box", "content-box", "text",
];

/// One `property: value` pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub property: String,
    pub value: String,
    pub important: bool,
}

/// Parse the body of a rule block or a `style` attribute
pub fn parse_declarations(block: &str) -> Vec<Declaration> {
    block
        .split(';')
        .filter_map(|decl| {
            let (property, value) = decl.split_once(':')?;
            let property = property.trim().to_ascii_lowercase();
            let value = value.trim();

            let (value, important) = match value.rfind('!') {
                Some(pos) if value[pos + 1..].trim().eq_ignore_ascii_case("important") => {
                    (value[..pos].trim(), true)
                }
                _ => (value, false),
            };

            if property.is_empty() || value.is_empty() {
                return None;
            }

            Some(Declaration {
                property,
                value: value.to_string(),
                important,
            })
        })
        .collect()
}

fn is_color_property(property: &str) -> bool {
    matches!(property, "color" | "background-color" | "background")
}

/// Selector specificity as (ids, classes/attributes/pseudo-classes, types)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Specificity(pub u32, pub u32, pub u32);

/// Approximate specificity of a single complex selector.
///
/// `:not()`, `:is()` and `:has()` add up all of their arguments where CSS
/// takes only the most specific one; for single-argument use the two agree.
pub fn specificity(selector: &str) -> Specificity {
    let chars: Vec<char> = selector.chars().collect();
    let mut spec = Specificity::default();
    let mut compound_start = true;
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '#' => {
                spec.0 += 1;
                i = skip_ident(&chars, i + 1);
                compound_start = false;
            }
            '.' => {
                spec.1 += 1;
                i = skip_ident(&chars, i + 1);
                compound_start = false;
            }
            '[' => {
                spec.1 += 1;
                while i < chars.len() && chars[i] != ']' {
                    i += 1;
                }
                i += 1;
                compound_start = false;
            }
            ':' if chars.get(i + 1) == Some(&':') => {
                spec.2 += 1;
                i = skip_ident(&chars, i + 2);
                compound_start = false;
            }
            ':' => {
                let end = skip_ident(&chars, i + 1);
                let name: String = chars[i + 1..end].iter().collect::<String>().to_ascii_lowercase();
                i = end;
                compound_start = false;

                if chars.get(i) == Some(&'(') {
                    match name.as_str() {
                        // the arguments are counted as the scan continues
                        "not" | "is" | "has" | "matches" => {}
                        "where" => i = skip_parens(&chars, i),
                        _ => {
                            spec.1 += 1;
                            i = skip_parens(&chars, i);
                        }
                    }
                } else {
                    spec.1 += 1;
                }
            }
            ' ' | '>' | '+' | '~' | '(' | ')' | ',' => {
                compound_start = true;
                i += 1;
            }
            '*' => {
                compound_start = false;
                i += 1;
            }
            c if compound_start && c.is_alphabetic() => {
                spec.2 += 1;
                i = skip_ident(&chars, i);
                compound_start = false;
            }
            _ => i += 1,
        }
    }

    spec
}

fn skip_ident(chars: &[char], mut i: usize) -> usize {
    while i < chars.len() && (chars[i].is_alphanumeric() || chars[i] == '-' || chars[i] == '_') {
        i += 1;
    }
    i
}

/// Index just past the `)` matching the `(` at `i`
fn skip_parens(chars: &[char], mut i: usize) -> usize {
    let mut depth = 0usize;
    while i < chars.len() {
        match chars[i] {
            '(' => depth += 1,
            ')' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return i + 1;
                }
            }
            _ => {}
        }
        i += 1;
    }
    i
}

/// Color declarations that won the cascade for one element
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeclaredColors {
    pub color: Option<String>,
    pub background: Option<String>,
}

impl DeclaredColors {
    fn apply(&mut self, declaration: &Declaration) {
        match declaration.property.as_str() {
            "color" => self.color = Some(declaration.value.clone()),
            "background-color" => self.background = Some(declaration.value.clone()),
            "background" => self.background = Some(background_shorthand_color(&declaration.value)),
            _ => {}
        }
    }
}

/// The color component of a `background` shorthand.
///
/// A shorthand made only of images, positions, sizes and keywords resets the
/// color to `transparent`. Anything that may paint a color but cannot be read
/// here (`var()`, gradients, unknown names) is returned as written, which
/// leaves the element's background unresolvable.
fn background_shorthand_color(value: &str) -> String {
    let trimmed = value.trim();
    if CSS_WIDE_KEYWORDS.iter().any(|k| trimmed.eq_ignore_ascii_case(k)) {
        return trimmed.to_string();
    }

    let without_urls = URL_FN.replace_all(trimmed, " ");
    let opaque_function = FUNCTION_NAME
        .captures_iter(&without_urls)
        .any(|caps| !COLOR_FUNCTIONS.contains(&caps[1].to_ascii_lowercase().as_str()));
    if opaque_function {
        return trimmed.to_string();
    }

    if let Some(m) = COLOR_TOKEN.find(&without_urls) {
        return m.as_str().to_string();
    }

    let tokens: Vec<&str> = without_urls
        .split(|c: char| c.is_whitespace() || c == ',' || c == '/')
        .filter(|t| !t.is_empty())
        .collect();
    if let Some(named) = tokens.iter().find(|t| named_color(t).is_some()) {
        return named.to_string();
    }
    if tokens.iter().all(|t| is_layer_keyword(t)) {
        return "transparent".to_string();
    }
    trimmed.to_string()
}

/// Shorthand tokens that never carry a color
fn is_layer_keyword(token: &str) -> bool {
    let starts_numeric = token
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+'));
    starts_numeric || BACKGROUND_KEYWORDS.contains(&token.to_ascii_lowercase().as_str())
}

#[derive(Debug)]
struct StyleRule {
    selector: Selector,
    specificity: Specificity,
    order: usize,
    declarations: Vec<Declaration>,
}

/// Color-relevant rules collected from a document's stylesheets
#[derive(Debug, Default)]
pub struct StyleSheet {
    rules: Vec<StyleRule>,
}

impl StyleSheet {
    /// Parse CSS text, keeping only rules that set a color property
    pub fn parse(css: &str) -> Self {
        let css = COMMENT.replace_all(css, "");
        let mut rules = Vec::new();

        for caps in RULE_BLOCK.captures_iter(&css) {
            let prelude = caps[1].rsplit(';').next().unwrap_or_default().trim();
            if prelude.is_empty() || prelude.starts_with('@') {
                continue;
            }

            let declarations: Vec<Declaration> = parse_declarations(&caps[2])
                .into_iter()
                .filter(|d| is_color_property(&d.property))
                .collect();
            if declarations.is_empty() {
                continue;
            }

            for part in prelude.split(',').map(str::trim).filter(|p| !p.is_empty()) {
                match Selector::parse(part) {
                    Ok(selector) => rules.push(StyleRule {
                        selector,
                        specificity: specificity(part),
                        order: rules.len(),
                        declarations: declarations.clone(),
                    }),
                    Err(_) => debug!("Skipping unsupported selector: {}", part),
                }
            }
        }

        Self { rules }
    }

    /// Collect every `<style>` element of a parsed document
    pub fn from_document(document: &Html) -> Self {
        let style_sel = Selector::parse("style").expect("valid selector");
        let css: Vec<String> = document
            .select(&style_sel)
            .map(|style| style.text().collect::<String>())
            .collect();
        Self::parse(&css.join("\n"))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Winning color declarations for `element`, inline style included
    pub fn cascade(&self, element: &ElementRef<'_>, inline_style: Option<&str>) -> DeclaredColors {
        let inline: Vec<Declaration> = inline_style
            .map(parse_declarations)
            .unwrap_or_default()
            .into_iter()
            .filter(|d| is_color_property(&d.property))
            .collect();

        // (important, inline origin, specificity, source order)
        let mut matched: Vec<((bool, bool, Specificity, usize), &Declaration)> = Vec::new();

        for rule in self.rules.iter().filter(|r| r.selector.matches(element)) {
            for declaration in &rule.declarations {
                matched.push(((declaration.important, false, rule.specificity, rule.order), declaration));
            }
        }
        for (order, declaration) in inline.iter().enumerate() {
            matched.push(((declaration.important, true, Specificity::default(), order), declaration));
        }

        matched.sort_by_key(|(key, _)| *key);

        let mut declared = DeclaredColors::default();
        for (_, declaration) in matched {
            declared.apply(declaration);
        }
        declared
    }
}
