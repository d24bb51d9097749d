//! Template family selection
//!
//! A run renders every markup file with one syntax and every stylesheet with
//! its matching style syntax. The pair is only reachable through
//! [`TemplateFamily`], so the two can never be mixed.

use serde::Serialize;

/// Paired markup/style syntax used for a whole run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateFamily {
    /// Haml views with Sass stylesheets (default)
    Haml,
    /// ERB views with plain CSS stylesheets (`--erb`)
    Erb,
}

impl TemplateFamily {
    /// Select the family from the alternate-syntax flag
    #[must_use]
    pub const fn select(use_alternate: bool) -> Self {
        if use_alternate {
            Self::Erb
        } else {
            Self::Haml
        }
    }

    /// Markup file extension (`haml` or `erb`)
    #[must_use]
    pub const fn markup(self) -> &'static str {
        match self {
            Self::Haml => "haml",
            Self::Erb => "erb",
        }
    }

    /// Stylesheet file extension (`sass` or `css`)
    #[must_use]
    pub const fn style(self) -> &'static str {
        match self {
            Self::Haml => "sass",
            Self::Erb => "css",
        }
    }

    /// Whether this is the `--erb` family
    #[must_use]
    pub const fn is_alternate(self) -> bool {
        matches!(self, Self::Erb)
    }

    /// Stylesheet reference statement for a layout file
    ///
    /// ```
    /// use haml_scaffold::scaffold::family::TemplateFamily;
    ///
    /// assert_eq!(
    ///     TemplateFamily::Haml.stylesheet_link("posts"),
    ///     "= stylesheet_link_tag 'posts'"
    /// );
    /// assert_eq!(
    ///     TemplateFamily::Erb.stylesheet_link("posts"),
    ///     "<%= stylesheet_link_tag 'posts' %>"
    /// );
    /// ```
    #[must_use]
    pub fn stylesheet_link(self, link: &str) -> String {
        match self {
            Self::Haml => format!("= stylesheet_link_tag '{link}'"),
            Self::Erb => format!("<%= stylesheet_link_tag '{link}' %>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select() {
        assert_eq!(TemplateFamily::select(false), TemplateFamily::Haml);
        assert_eq!(TemplateFamily::select(true), TemplateFamily::Erb);
    }

    #[test]
    fn test_families_share_no_extension() {
        let haml = TemplateFamily::select(false);
        let erb = TemplateFamily::select(true);
        let haml_exts = [haml.markup(), haml.style()];
        let erb_exts = [erb.markup(), erb.style()];

        assert_eq!(haml_exts, ["haml", "sass"]);
        assert_eq!(erb_exts, ["erb", "css"]);
        assert!(haml_exts.iter().all(|ext| !erb_exts.contains(ext)));
    }

    #[test]
    fn test_is_alternate() {
        assert!(TemplateFamily::Erb.is_alternate());
        assert!(!TemplateFamily::Haml.is_alternate());
    }
}
