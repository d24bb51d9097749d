//! Resource name resolution
//!
//! Turns a raw identifier such as `admin/post` into every name the planner
//! needs: namespace segments, class names, file stems and table names.

use serde::Serialize;

use super::inflect::Inflections;
use crate::error::{Result, ScaffoldError};

/// Scope separator used when joining namespace segments into a class name
pub const SCOPE_SEPARATOR: &str = "::";

/// All names derived from one raw resource identifier
///
/// Every field is a pure function of `raw`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceName {
    /// Identifier as typed on the command line
    pub raw: String,
    /// Camelized namespace modules, outermost first (`["Admin"]`)
    pub namespace_segments: Vec<String>,
    /// Underscored namespace modules used for directory nesting (`["admin"]`)
    pub class_path: Vec<String>,
    /// Singular underscored base name (`post`)
    pub base_singular: String,
    /// Base name underscored, in whatever number it arrived (`posts` or `post`)
    pub base_underscore: String,
    /// Plural underscored base name (`posts`)
    pub base_plural: String,
    /// Model class name (`Admin::Post`)
    pub class_name: String,
    /// Controller class name without suffix (`Admin::Posts`)
    pub controller_class_name: String,
    /// Plural name used for the view directory and controller stem
    pub controller_plural_name: String,
    /// Underscored form of the controller plural name
    pub controller_underscore_name: String,
    /// Singular of the controller name, used for the record partial
    pub controller_singular_name: String,
    /// Model file stem (`post`)
    pub file_name: String,
    /// Table name (`posts`)
    pub table_name: String,
}

impl ResourceName {
    /// Resolve a raw identifier
    ///
    /// Accepts identifiers matching `[A-Za-z_][A-Za-z0-9_/]*` whose `/`
    /// separated segments each start with a letter once leading underscores
    /// are dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use haml_scaffold::scaffold::names::ResourceName;
    ///
    /// let name = ResourceName::resolve("admin/post").unwrap();
    /// assert_eq!(name.class_name, "Admin::Post");
    /// assert_eq!(name.controller_plural_name, "posts");
    /// assert_eq!(name.nesting_depth(), 1);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::InvalidName`] for empty or malformed input.
    pub fn resolve(raw: &str) -> Result<Self> {
        Self::validate(raw)?;

        let tokens: Vec<&str> = raw.split('/').collect();
        let Some((base, namespace)) = tokens.split_last() else {
            return Err(ScaffoldError::InvalidName(raw.to_string()));
        };

        let class_path: Vec<String> = namespace.iter().map(|s| Inflections::underscore(s)).collect();
        let namespace_segments: Vec<String> =
            class_path.iter().map(|s| Inflections::camelize(s)).collect();

        let base_underscore = Inflections::underscore(base);
        let base_singular = Inflections::singularize(&base_underscore);
        if Inflections::camelize(&base_singular).is_empty() {
            return Err(ScaffoldError::InvalidName(raw.to_string()));
        }
        let base_plural = Inflections::pluralize(&base_singular);

        let controller_plural_name = base_plural.clone();
        let controller_underscore_name = Inflections::underscore(&controller_plural_name);
        let controller_singular_name = Inflections::singularize(&controller_underscore_name);

        let class_name = Self::scoped(&namespace_segments, &Inflections::camelize(&base_singular));
        let controller_class_name =
            Self::scoped(&namespace_segments, &Inflections::camelize(&controller_plural_name));

        Ok(Self {
            raw: raw.to_string(),
            namespace_segments,
            class_path,
            file_name: base_singular.clone(),
            table_name: base_plural.clone(),
            base_singular,
            base_underscore,
            base_plural,
            class_name,
            controller_class_name,
            controller_plural_name,
            controller_underscore_name,
            controller_singular_name,
        })
    }

    /// Number of namespace segments
    #[must_use]
    pub fn nesting_depth(&self) -> usize {
        self.namespace_segments.len()
    }

    /// Joined namespace without the base class (`Admin::Reports`)
    #[must_use]
    pub fn class_nesting(&self) -> String {
        self.namespace_segments.join(SCOPE_SEPARATOR)
    }

    fn scoped(namespace: &[String], class: &str) -> String {
        if namespace.is_empty() {
            return class.to_string();
        }
        format!("{}{SCOPE_SEPARATOR}{class}", namespace.join(SCOPE_SEPARATOR))
    }

    fn validate(raw: &str) -> Result<()> {
        let mut chars = raw.chars();
        let starts_well = chars
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
        let rest_ok = chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '/');
        let segments_ok = raw.split('/').all(|segment| {
            segment
                .trim_start_matches('_')
                .starts_with(|c: char| c.is_ascii_alphabetic())
        });

        if starts_well && rest_ok && segments_ok {
            Ok(())
        } else {
            Err(ScaffoldError::InvalidName(raw.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_simple_resource() {
        let name = ResourceName::resolve("post").unwrap();
        assert_eq!(name.controller_plural_name, "posts");
        assert_eq!(name.controller_underscore_name, "posts");
        assert_eq!(name.controller_singular_name, "post");
        assert_eq!(name.base_singular, "post");
        assert_eq!(name.base_plural, "posts");
        assert_eq!(name.class_name, "Post");
        assert_eq!(name.controller_class_name, "Posts");
        assert_eq!(name.table_name, "posts");
        assert_eq!(name.nesting_depth(), 0);
        assert!(name.class_path.is_empty());
        assert_eq!(name.class_nesting(), "");
    }

    #[test]
    fn test_namespaced_resource() {
        let name = ResourceName::resolve("admin/post").unwrap();
        assert_eq!(name.class_name, "Admin::Post");
        assert_eq!(name.controller_class_name, "Admin::Posts");
        assert_eq!(name.class_path, vec!["admin"]);
        assert_eq!(name.namespace_segments, vec!["Admin"]);
        assert_eq!(name.nesting_depth(), 1);
    }

    #[test]
    fn test_multi_level_namespace() {
        let name = ResourceName::resolve("admin/reports/line_item").unwrap();
        assert_eq!(name.class_name, "Admin::Reports::LineItem");
        assert_eq!(name.class_nesting(), "Admin::Reports");
        assert_eq!(name.class_path, vec!["admin", "reports"]);
        assert_eq!(name.controller_plural_name, "line_items");
        assert_eq!(name.nesting_depth(), 2);
    }

    #[test]
    fn test_plural_input_singularizes_model() {
        let name = ResourceName::resolve("posts").unwrap();
        assert_eq!(name.base_underscore, "posts");
        assert_eq!(name.base_singular, "post");
        assert_eq!(name.class_name, "Post");
        assert_eq!(name.controller_plural_name, "posts");
        assert_eq!(name.file_name, "post");
    }

    #[test]
    fn test_irregular_resource() {
        let name = ResourceName::resolve("person").unwrap();
        assert_eq!(name.controller_plural_name, "people");
        assert_eq!(name.class_name, "Person");

        let name = ResourceName::resolve("people").unwrap();
        assert_eq!(name.class_name, "Person");
        assert_eq!(name.controller_singular_name, "person");
    }

    #[test]
    fn test_camel_case_input() {
        let name = ResourceName::resolve("Admin/BlogPost").unwrap();
        assert_eq!(name.class_name, "Admin::BlogPost");
        assert_eq!(name.class_path, vec!["admin"]);
        assert_eq!(name.controller_underscore_name, "blog_posts");
    }

    #[test]
    fn test_invalid_names() {
        for raw in [
            "",
            "1post",
            "admin//post",
            "admin/",
            "/post",
            "post-it",
            "admin::post",
            "_",
            "__",
            "admin/_",
            "_/post",
            "_1post",
            "s",
            "admin/_s",
        ] {
            assert!(
                matches!(ResourceName::resolve(raw), Err(ScaffoldError::InvalidName(_))),
                "should reject {raw:?}"
            );
        }
    }

    #[test]
    fn test_leading_underscore_is_accepted() {
        let name = ResourceName::resolve("_post").unwrap();
        assert_eq!(name.class_name, "Post");
        assert_eq!(name.controller_class_name, "Posts");
    }

    #[test]
    fn test_suffix_rule_resources() {
        for (raw, class_name, plural) in [
            ("heroes", "Hero", "heroes"),
            ("wolves", "Wolf", "wolves"),
            ("media", "Medium", "media"),
            ("data", "Datum", "data"),
            ("criteria", "Criterion", "criteria"),
            ("salesperson", "Salesperson", "salespeople"),
        ] {
            let name = ResourceName::resolve(raw).unwrap();
            assert_eq!(name.class_name, class_name, "class of {raw}");
            assert_eq!(name.controller_plural_name, plural, "plural of {raw}");
            assert_eq!(name.table_name, plural);
        }
    }

    #[test]
    fn test_digits_in_names() {
        let name = ResourceName::resolve("v1/post").unwrap();
        assert_eq!(name.class_path, vec!["v1"]);
        assert_eq!(name.namespace_segments, vec!["V1"]);
        assert_eq!(name.class_name, "V1::Post");
        assert_eq!(name.controller_class_name, "V1::Posts");

        let name = ResourceName::resolve("page3").unwrap();
        assert_eq!(name.file_name, "page3");
        assert_eq!(name.controller_plural_name, "page3s");
        assert_eq!(name.class_name, "Page3");
        assert_eq!(name.controller_class_name, "Page3s");
    }

    proptest! {
        #[test]
        fn resolve_is_deterministic(raw in "[a-z][a-z_]{0,8}(/[a-z][a-z_]{0,8}){0,2}") {
            prop_assume!(ResourceName::resolve(&raw).is_ok());
            let first = ResourceName::resolve(&raw).unwrap();
            let second = ResourceName::resolve(&raw).unwrap();
            prop_assert_eq!(&first, &second);
            prop_assert_eq!(first.nesting_depth(), raw.matches('/').count());
            prop_assert!(!first.class_name.starts_with(SCOPE_SEPARATOR));
        }
    }
}
