//! The three identifier substitutions applied to every icon file.
//!
//! Each rule only matches inside the C syntax that declares or references an
//! icon symbol, so digit-leading text elsewhere in the file is left alone.

use std::borrow::Cow;

use regex::Regex;
use serde::Serialize;

const ARRAY_DECLARATION: &str = r"(const\s+LV_ATTRIBUTE_MEM_ALIGN\s+LV_ATTRIBUTE_LARGE_CONST\s+LV_ATTRIBUTE_IMG_\w+\s+uint8_t\s+)(\d+[dn]_map)\[\]";
const DESCRIPTOR_DECLARATION: &str = r"(const\s+lv_img_dsc_t\s+)(\d+[dn])\s*=";
const DATA_REFERENCE: &str = r"(\.data\s*=\s*)(\d+[dn]_map)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    /// `uint8_t 01d_map[]` pixel array declaration.
    ArrayDeclaration,
    /// `const lv_img_dsc_t 01d =` descriptor declaration.
    DescriptorDeclaration,
    /// `.data = 01d_map` field inside the descriptor.
    DataReference,
}

#[derive(Debug, Clone)]
pub struct SubstitutionRule {
    pub kind: RuleKind,
    pattern: Regex,
    replacement: String,
}

impl SubstitutionRule {
    fn new(kind: RuleKind, pattern: &str, replacement: String) -> Self {
        Self {
            kind,
            pattern: Regex::new(pattern).expect("Invalid regex pattern"),
            replacement,
        }
    }

    /// Replace every match in `content`. Returns the new text and the number
    /// of replacements made.
    pub fn apply<'a>(&self, content: &'a str) -> (Cow<'a, str>, usize) {
        let count = self.pattern.find_iter(content).count();
        if count == 0 {
            return (Cow::Borrowed(content), 0);
        }
        (
            self.pattern.replace_all(content, self.replacement.as_str()),
            count,
        )
    }
}

/// Ordered set of substitutions. Rules run in declaration order, each on the
/// output of the previous one.
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<SubstitutionRule>,
}

/// Outcome of running a [`RuleSet`] over one file's text.
#[derive(Debug, Clone, Default)]
pub struct Rewrite {
    pub content: String,
    pub replacements: Vec<(RuleKind, usize)>,
}

impl Rewrite {
    pub fn total(&self) -> usize {
        self.replacements.iter().map(|(_, n)| n).sum()
    }
}

impl RuleSet {
    /// Build the rules for a given identifier prefix (`icon_` in practice).
    pub fn new(prefix: &str) -> Self {
        // `${1}` rather than `$1`: the prefix starts with a word character and
        // would otherwise be read as part of the group name.
        let rules = vec![
            SubstitutionRule::new(
                RuleKind::ArrayDeclaration,
                ARRAY_DECLARATION,
                format!("${{1}}{}${{2}}[]", prefix),
            ),
            SubstitutionRule::new(
                RuleKind::DescriptorDeclaration,
                DESCRIPTOR_DECLARATION,
                format!("${{1}}{}${{2}} =", prefix),
            ),
            SubstitutionRule::new(
                RuleKind::DataReference,
                DATA_REFERENCE,
                format!("${{1}}{}${{2}}", prefix),
            ),
        ];

        Self { rules }
    }

    #[cfg(test)]
    pub(crate) fn rules(&self) -> &[SubstitutionRule] {
        &self.rules
    }

    pub fn apply(&self, content: &str) -> Rewrite {
        let mut current = content.to_string();
        let mut replacements = Vec::with_capacity(self.rules.len());

        for rule in &self.rules {
            let (next, count) = rule.apply(&current);
            if let Cow::Owned(next) = next {
                current = next;
            }
            replacements.push((rule.kind, count));
        }

        Rewrite {
            content: current,
            replacements,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> RuleSet {
        RuleSet::new("icon_")
    }

    #[test]
    fn array_declaration_gets_prefix_and_rest_of_line_is_kept() {
        let line = "const LV_ATTRIBUTE_MEM_ALIGN LV_ATTRIBUTE_LARGE_CONST LV_ATTRIBUTE_IMG_X uint8_t 01d_map[] = {";
        let out = rules().apply(line);
        assert_eq!(
            out.content,
            "const LV_ATTRIBUTE_MEM_ALIGN LV_ATTRIBUTE_LARGE_CONST LV_ATTRIBUTE_IMG_X uint8_t icon_01d_map[] = {"
        );
        assert_eq!(out.replacements[0], (RuleKind::ArrayDeclaration, 1));
    }

    #[test]
    fn array_declaration_requires_attribute_qualifiers() {
        let line = "static uint8_t 01d_map[] = {";
        let out = rules().apply(line);
        assert_eq!(out.content, line);
        assert_eq!(out.total(), 0);
    }

    #[test]
    fn descriptor_declaration_gets_prefix() {
        let out = rules().apply("const lv_img_dsc_t 02n = {");
        assert_eq!(out.content, "const lv_img_dsc_t icon_02n = {");
        assert_eq!(out.replacements[1], (RuleKind::DescriptorDeclaration, 1));
    }

    #[test]
    fn descriptor_declaration_normalises_space_before_equals() {
        let out = rules().apply("const lv_img_dsc_t 13d={");
        assert_eq!(out.content, "const lv_img_dsc_t icon_13d ={");
    }

    #[test]
    fn data_reference_gets_prefix() {
        let out = rules().apply("  .data = 03d_map,");
        assert_eq!(out.content, "  .data = icon_03d_map,");
        assert_eq!(out.replacements[2], (RuleKind::DataReference, 1));
    }

    #[test]
    fn every_occurrence_is_replaced() {
        let out = rules().apply(".data = 01d_map, .data = 01n_map");
        assert_eq!(out.content, ".data = icon_01d_map, .data = icon_01n_map");
        assert_eq!(out.total(), 2);
    }

    #[test]
    fn unrelated_digit_identifiers_are_untouched() {
        let text = "#define 01d_WIDTH 64\nuint32_t x = 0x01d;\n.header.w = 64,\n";
        let out = rules().apply(text);
        assert_eq!(out.content, text);
        assert_eq!(out.total(), 0);
    }

    #[test]
    fn applying_twice_changes_nothing() {
        let text = "const LV_ATTRIBUTE_MEM_ALIGN LV_ATTRIBUTE_LARGE_CONST LV_ATTRIBUTE_IMG_01D uint8_t 01d_map[] = {0x00};\n\
                    const lv_img_dsc_t 01d = {\n  .data = 01d_map,\n};\n";
        let first = rules().apply(text);
        assert_eq!(first.total(), 3);

        let second = rules().apply(&first.content);
        assert_eq!(second.content, first.content);
        assert_eq!(second.total(), 0);
    }

    #[test]
    fn rule_order_is_fixed() {
        let kinds: Vec<RuleKind> = rules().rules().iter().map(|r| r.kind).collect();
        assert_eq!(
            kinds,
            vec![
                RuleKind::ArrayDeclaration,
                RuleKind::DescriptorDeclaration,
                RuleKind::DataReference
            ]
        );
    }
}
