use crate::siteconfig::directives::SiteConfig;

/// Text replacer for find_string/replace_string and replace_string(...) rules
#[derive(Debug, Clone)]
pub struct TextReplacer {
    replacements: Vec<(String, String)>,
}

impl TextReplacer {
    /// Create a new text replacer from a site config
    pub fn from_config(config: &SiteConfig) -> Self {
        let replacements = config
            .string_replacer
            .iter()
            .map(|(find, replace)| (find.to_string(), replace.to_string()))
            .collect();
        Self { replacements }
    }

    /// Apply all text replacements to HTML content, in declaration order
    pub fn apply(&self, html: &str) -> String {
        let mut result = html.to_string();

        for (find, replace) in &self.replacements {
            if !find.is_empty() {
                result = result.replace(find, replace);
            }
        }

        result
    }

    pub fn is_empty(&self) -> bool {
        self.replacements.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::siteconfig::parser::ConfigParser;

    #[test]
    fn test_text_replacer() {
        let mut config = SiteConfig::new();
        config
            .string_replacer
            .insert("<p />".to_string(), "<br /><br />".to_string());

        let replacer = TextReplacer::from_config(&config);
        let html = "<div>Hello<p />World</div>";
        let result = replacer.apply(html);

        assert_eq!(result, "<div>Hello<br /><br />World</div>");
    }

    #[test]
    fn test_text_replacer_applies_in_order() {
        let mut config = SiteConfig::new();
        config.string_replacer.insert("a".to_string(), "b".to_string());
        config.string_replacer.insert("b".to_string(), "c".to_string());

        let replacer = TextReplacer::from_config(&config);

        assert_eq!(replacer.apply("a"), "c");
    }

    #[test]
    fn test_text_replacer_from_parsed_config() {
        let config = ConfigParser::parse_string("find_string: <b>\nreplace_string: <strong>\nreplace_string(]]>): _\n");
        let replacer = TextReplacer::from_config(&config);

        assert_eq!(replacer.apply("x]]>y"), "x _y");
        assert_eq!(replacer.apply("a <b>"), "a <strong>");
    }

    #[test]
    fn test_text_replacer_empty() {
        let replacer = TextReplacer::from_config(&SiteConfig::new());

        assert!(replacer.is_empty());
        assert_eq!(replacer.apply("<p>unchanged</p>"), "<p>unchanged</p>");
    }
}
