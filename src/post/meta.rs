//! Typed view of a post's head block.
//!
//! ```yaml
//! meta:
//!   - title: Hello
//!   - name: description
//!     content: A first post
//! date: 2024-06-15
//! image: /images/hello.webp
//! tags: [intro]
//! ```
//!
//! Only the fields the pipeline reads are typed. The head mapping itself is
//! kept alongside (see [`super::head::ParsedHead`]) so unknown keys and key
//! order survive a rewrite.

use serde::{Deserialize, Deserializer, Serialize, de};
use serde_yaml::{Mapping, Value};
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct MetadataBlock {
    /// Ordered `meta` entries. A missing or null `meta` is empty.
    ///
    /// Elements that are not entry mappings are left out here but stay in
    /// the head mapping, so a rewrite keeps them.
    #[serde(deserialize_with = "deserialize_meta")]
    pub meta: Vec<MetaEntry>,
    #[serde(deserialize_with = "deserialize_scalar")]
    pub date: Option<String>,
    #[serde(deserialize_with = "deserialize_scalar")]
    pub image: Option<String>,
    /// Scalar tags as strings; a lone scalar is a one-tag list.
    #[serde(deserialize_with = "deserialize_tags")]
    pub tags: Option<Vec<String>>,
}

/// One element of `meta`: `{title}`, `{name, content}` or `{property, content}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetaEntry {
    #[serde(
        default,
        deserialize_with = "deserialize_scalar",
        skip_serializing_if = "Option::is_none"
    )]
    pub title: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_scalar",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_scalar",
        skip_serializing_if = "Option::is_none"
    )]
    pub property: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_scalar",
        skip_serializing_if = "Option::is_none"
    )]
    pub content: Option<String>,
    /// Keys other than the four above, written back untouched.
    #[serde(flatten)]
    pub extra: Mapping,
}

/// Shape of a [`MetaEntry`], checked in `title`, `name`, `property` order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaEntryKind<'a> {
    Title(&'a str),
    Name { name: &'a str, content: &'a str },
    Property { property: &'a str, content: &'a str },
    Other,
}

impl MetaEntry {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    pub fn name(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            content: Some(content.into()),
            ..Default::default()
        }
    }

    pub fn property(property: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            property: Some(property.into()),
            content: Some(content.into()),
            ..Default::default()
        }
    }

    pub fn kind(&self) -> MetaEntryKind<'_> {
        let content = self.content.as_deref().unwrap_or_default();
        match (&self.title, &self.name, &self.property) {
            (Some(title), _, _) => MetaEntryKind::Title(title),
            (None, Some(name), _) => MetaEntryKind::Name { name, content },
            (None, None, Some(property)) => MetaEntryKind::Property { property, content },
            (None, None, None) => MetaEntryKind::Other,
        }
    }

    #[inline]
    pub fn has_name(&self, name: &str) -> bool {
        self.name.as_deref() == Some(name)
    }
}

impl MetadataBlock {
    /// First non-empty `title` entry.
    pub fn title(&self) -> Option<&str> {
        self.meta
            .iter()
            .filter_map(|entry| match entry.kind() {
                MetaEntryKind::Title(title) => Some(title),
                _ => None,
            })
            .find(|title| !title.is_empty())
    }

    /// `content` of the first entry named `description`, even when empty.
    pub fn description(&self) -> Option<&str> {
        self.meta.iter().find_map(|entry| match entry.kind() {
            MetaEntryKind::Name {
                name: "description",
                content,
            } => Some(content),
            _ => None,
        })
    }
}

// ============================================================================
// lenient deserializers
// ============================================================================

fn deserialize_meta<'de, D>(deserializer: D) -> Result<Vec<MetaEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    let items: Option<Vec<Value>> = Option::deserialize(deserializer)?;
    Ok(items
        .unwrap_or_default()
        .into_iter()
        .filter(Value::is_mapping)
        .filter_map(|item| serde_yaml::from_value(item).ok())
        .collect())
}

fn deserialize_tags<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let tags = match Value::deserialize(deserializer)? {
        Value::Null => return Ok(None),
        Value::Sequence(items) => items.iter().filter_map(scalar_string).collect(),
        other => scalar_string(&other).into_iter().collect(),
    };
    Ok(Some(tags))
}

fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Accept any YAML scalar as a string (`date: 2024` is `"2024"`).
/// Null becomes `None`.
fn deserialize_scalar<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    struct ScalarVisitor;

    impl<'de> de::Visitor<'de> for ScalarVisitor {
        type Value = Option<String>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a string, number or boolean")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
            Ok(Some(v))
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<Self::Value, D::Error> {
            d.deserialize_any(self)
        }
    }

    deserializer.deserialize_any(ScalarVisitor)
}
