//! Block schema types: the closed block-type enumeration, categories, and the
//! field/style specs a block type declares.
//!
//! ## Design: BlockType + FieldSpec + StyleSpec
//!
//! `BlockType` is closed: adding a block type means adding a variant here and
//! a definition in the registry catalog. What a block *contains* is data, not
//! code: each definition lists its [`FieldSpec`]s (content) and
//! [`StyleSpec`]s (presentation), and values are checked against those specs
//! when written.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{EnumIter, EnumString};

use crate::value::{Record, Value};

/// Every block type the page builder knows about.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, EnumString, EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum BlockType {
    Navbar,
    Hero,
    FeaturesGrid,
    Text,
    Image,
    Gallery,
    Video,
    PricingTable,
    Testimonials,
    Stats,
    LogoCloud,
    Team,
    Faq,
    CallToAction,
    ContactForm,
    Divider,
    Footer,
}

impl BlockType {
    /// Parse a type tag (e.g. `"features-grid"`), case-insensitive.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        <Self as FromStr>::from_str(s).ok()
    }

    /// The type tag used on the wire and in the palette.
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockType::Navbar => "navbar",
            BlockType::Hero => "hero",
            BlockType::FeaturesGrid => "features-grid",
            BlockType::Text => "text",
            BlockType::Image => "image",
            BlockType::Gallery => "gallery",
            BlockType::Video => "video",
            BlockType::PricingTable => "pricing-table",
            BlockType::Testimonials => "testimonials",
            BlockType::Stats => "stats",
            BlockType::LogoCloud => "logo-cloud",
            BlockType::Team => "team",
            BlockType::Faq => "faq",
            BlockType::CallToAction => "call-to-action",
            BlockType::ContactForm => "contact-form",
            BlockType::Divider => "divider",
            BlockType::Footer => "footer",
        }
    }
}

impl std::fmt::Display for BlockType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Palette grouping for block types.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum Category {
    Navigation,
    Hero,
    Content,
    Media,
    Commerce,
    SocialProof,
    Forms,
    Layout,
}

impl Category {
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        <Self as FromStr>::from_str(s).ok()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Navigation => "navigation",
            Category::Hero => "hero",
            Category::Content => "content",
            Category::Media => "media",
            Category::Commerce => "commerce",
            Category::SocialProof => "social-proof",
            Category::Forms => "forms",
            Category::Layout => "layout",
        }
    }

    /// Human label for palette section headers.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Navigation => "Navigation",
            Category::Hero => "Hero",
            Category::Content => "Content",
            Category::Media => "Media",
            Category::Commerce => "Commerce",
            Category::SocialProof => "Social Proof",
            Category::Forms => "Forms",
            Category::Layout => "Layout",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Data kind of a content field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    ShortText,
    LongText,
    RichText,
    Image,
    Url,
    Number,
    Boolean,
    /// One of `FieldSpec::options`.
    Select,
    Icon,
    /// List of records shaped by `FieldSpec::sub_fields`.
    Repeater,
}

impl FieldKind {
    /// The [`Value`] tag this kind accepts.
    pub fn expected_value(&self) -> &'static str {
        match self {
            FieldKind::ShortText | FieldKind::LongText | FieldKind::RichText | FieldKind::Select => {
                "text"
            }
            FieldKind::Image | FieldKind::Url | FieldKind::Icon => "reference",
            FieldKind::Number => "number",
            FieldKind::Boolean => "bool",
            FieldKind::Repeater => "list",
        }
    }
}

/// Presentation option kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleKind {
    Color,
    Alignment,
    Spacing,
    Border,
    Shadow,
    Select,
}

impl StyleKind {
    pub fn expected_value(&self) -> &'static str {
        match self {
            StyleKind::Spacing => "number",
            _ => "text",
        }
    }
}

/// Why a value does not fit its spec.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum Violation {
    #[error("expected {expected} value, got {found}")]
    KindMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("'{0}' is not one of the allowed options")]
    InvalidOption(String),

    /// NaN or an infinity; these have no JSON form.
    #[error("number must be finite")]
    NonFinite,

    #[error("unknown sub-field '{0}'")]
    UnknownSubField(String),

    #[error("row {row}, field '{key}': {source}")]
    InRow {
        row: usize,
        key: String,
        source: Box<Violation>,
    },
}

fn kind_check(expected: &'static str, value: &Value) -> Result<(), Violation> {
    if value.kind_name() != expected {
        return Err(Violation::KindMismatch {
            expected,
            found: value.kind_name(),
        });
    }
    match value {
        Value::Number(n) if !n.is_finite() => Err(Violation::NonFinite),
        _ => Ok(()),
    }
}

fn option_check(options: &[String], value: &Value) -> Result<(), Violation> {
    match value.as_text() {
        Some(choice) if !options.is_empty() && !options.iter().any(|o| o == choice) => {
            Err(Violation::InvalidOption(choice.to_string()))
        }
        _ => Ok(()),
    }
}

/// One editable content attribute of a block type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub key: String,
    pub label: String,
    pub kind: FieldKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// Allowed choices for `Select`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    /// Row shape for `Repeater`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sub_fields: Vec<FieldSpec>,
}

impl FieldSpec {
    pub fn new(key: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            kind,
            default: None,
            options: Vec::new(),
            sub_fields: Vec::new(),
        }
    }

    pub fn short_text(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(key, label, FieldKind::ShortText)
    }

    pub fn long_text(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(key, label, FieldKind::LongText)
    }

    pub fn rich_text(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(key, label, FieldKind::RichText)
    }

    pub fn image(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(key, label, FieldKind::Image)
    }

    pub fn url(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(key, label, FieldKind::Url)
    }

    pub fn number(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(key, label, FieldKind::Number)
    }

    pub fn boolean(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(key, label, FieldKind::Boolean)
    }

    pub fn icon(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(key, label, FieldKind::Icon)
    }

    pub fn select<I, S>(key: impl Into<String>, label: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut spec = Self::new(key, label, FieldKind::Select);
        spec.options = options.into_iter().map(Into::into).collect();
        spec
    }

    pub fn repeater(
        key: impl Into<String>,
        label: impl Into<String>,
        sub_fields: Vec<FieldSpec>,
    ) -> Self {
        let mut spec = Self::new(key, label, FieldKind::Repeater);
        spec.sub_fields = sub_fields;
        spec
    }

    /// Set the default value.
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Check a value against this field's kind, options, and row shape.
    pub fn check(&self, value: &Value) -> Result<(), Violation> {
        kind_check(self.kind.expected_value(), value)?;
        match self.kind {
            FieldKind::Select => option_check(&self.options, value),
            FieldKind::Repeater => {
                let rows = value.as_list().unwrap_or_default();
                for (row, rec) in rows.iter().enumerate() {
                    self.check_row(rec).map_err(|(key, source)| Violation::InRow {
                        row,
                        key,
                        source: Box::new(source),
                    })?;
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn check_row(&self, rec: &Record) -> Result<(), (String, Violation)> {
        for (key, value) in rec {
            let sub = self
                .sub_fields
                .iter()
                .find(|f| &f.key == key)
                .ok_or_else(|| (key.clone(), Violation::UnknownSubField(key.clone())))?;
            sub.check(value).map_err(|v| (key.clone(), v))?;
        }
        Ok(())
    }
}

/// One editable presentation attribute of a block type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StyleSpec {
    pub key: String,
    pub label: String,
    pub kind: StyleKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// Allowed choices; empty means free-form.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

impl StyleSpec {
    pub fn new(key: impl Into<String>, label: impl Into<String>, kind: StyleKind) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            kind,
            default: None,
            options: Vec::new(),
        }
    }

    pub fn color(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(key, label, StyleKind::Color)
    }

    /// Alignment with the usual left/center/right choices.
    pub fn alignment(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(key, label, StyleKind::Alignment).with_options(["left", "center", "right"])
    }

    pub fn spacing(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(key, label, StyleKind::Spacing)
    }

    pub fn border(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(key, label, StyleKind::Border).with_options(["none", "thin", "thick"])
    }

    pub fn shadow(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(key, label, StyleKind::Shadow).with_options(["none", "sm", "md", "lg"])
    }

    pub fn select<I, S>(key: impl Into<String>, label: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(key, label, StyleKind::Select).with_options(options)
    }

    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn check(&self, value: &Value) -> Result<(), Violation> {
        kind_check(self.kind.expected_value(), value)?;
        option_check(&self.options, value)
    }
}

/// Schema for one block type: what it is called, where it sits in the
/// palette, what can be edited, and what a fresh instance contains.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BlockTypeDefinition {
    #[serde(rename = "type")]
    pub block_type: BlockType,
    pub label: String,
    #[serde(default)]
    pub description: String,
    pub category: Category,
    pub fields: Vec<FieldSpec>,
    #[serde(default)]
    pub styles: Vec<StyleSpec>,
    /// Seed for new instances. Keys must be declared in `fields`.
    #[serde(default)]
    pub default_content: Record,
}

impl BlockTypeDefinition {
    pub fn new(
        block_type: BlockType,
        label: impl Into<String>,
        category: Category,
    ) -> Self {
        Self {
            block_type,
            label: label.into(),
            description: String::new(),
            category,
            fields: Vec::new(),
            styles: Vec::new(),
            default_content: Record::new(),
        }
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Add a field. If it carries a default, that default also seeds new instances.
    pub fn field(mut self, spec: FieldSpec) -> Self {
        if let Some(default) = &spec.default {
            self.default_content.insert(spec.key.clone(), default.clone());
        }
        self.fields.push(spec);
        self
    }

    pub fn style(mut self, spec: StyleSpec) -> Self {
        self.styles.push(spec);
        self
    }

    /// Look up a field spec by key.
    pub fn field_spec(&self, key: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.key == key)
    }

    /// Look up a style spec by key.
    pub fn style_spec(&self, key: &str) -> Option<&StyleSpec> {
        self.styles.iter().find(|s| s.key == key)
    }

    /// Case-insensitive substring match on label, description, or category.
    pub fn matches(&self, query: &str) -> bool {
        let q = query.trim().to_lowercase();
        if q.is_empty() {
            return true;
        }
        self.label.to_lowercase().contains(&q)
            || self.description.to_lowercase().contains(&q)
            || self.category.as_str().contains(&q)
            || self.category.label().to_lowercase().contains(&q)
    }
}
