//! Block schema registry.
//!
//! A read-only catalog of [`BlockTypeDefinition`]s, one per [`BlockType`].
//! Built once at startup (usually from [`crate::catalog`]), validated, and then
//! shared by reference (`Arc<BlockRegistry>`) with every editor and palette. There is
//! no mutation API after construction.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use kumitate_types::{BlockType, BlockTypeDefinition, Category, Record, Value, Violation};

use crate::{DocError, Result};

/// What to do with content/style keys a block type does not declare.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownKeyPolicy {
    /// Reject with `UnknownFieldKey` / `UnknownStyleKey`.
    #[default]
    Reject,
    /// Store undeclared keys untouched (forward compatibility with newer schemas).
    Accept,
}

/// Process-wide catalog of block type definitions.
#[derive(Debug)]
pub struct BlockRegistry {
    /// Declaration order; palettes and search follow it.
    definitions: Vec<BlockTypeDefinition>,
    index: HashMap<BlockType, usize>,
}

impl BlockRegistry {
    /// Build the registry from the built-in marketing-site catalog.
    pub fn builtin() -> Result<Self> {
        Self::from_definitions(crate::catalog::definitions())
    }

    /// Build a registry from explicit definitions.
    ///
    /// Fails with `InvalidSchema` unless every `BlockType` has exactly one
    /// definition and every default (field, style, and `default_content`)
    /// fits its spec.
    pub fn from_definitions(definitions: Vec<BlockTypeDefinition>) -> Result<Self> {
        let mut index = HashMap::with_capacity(definitions.len());
        for (i, def) in definitions.iter().enumerate() {
            if index.insert(def.block_type, i).is_some() {
                return Err(DocError::InvalidSchema(format!(
                    "{} is defined more than once",
                    def.block_type
                )));
            }
            validate_definition(def)?;
        }

        if let Some(missing) = BlockType::iter().find(|ty| !index.contains_key(ty)) {
            return Err(DocError::InvalidSchema(format!("{missing} has no definition")));
        }

        Ok(Self { definitions, index })
    }

    /// Definition for a known type.
    pub fn get(&self, block_type: BlockType) -> &BlockTypeDefinition {
        // Construction guarantees every variant is indexed.
        &self.definitions[self.index[&block_type]]
    }

    /// Definition for a raw type tag.
    pub fn lookup(&self, tag: &str) -> Result<&BlockTypeDefinition> {
        BlockType::from_str(tag)
            .map(|ty| self.get(ty))
            .ok_or_else(|| DocError::unknown_type(tag))
    }

    /// All definitions in declaration order.
    pub fn definitions(&self) -> &[BlockTypeDefinition] {
        &self.definitions
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Definitions in one palette category, declaration order.
    pub fn list_by_category(&self, category: Category) -> Vec<&BlockTypeDefinition> {
        self.definitions
            .iter()
            .filter(|d| d.category == category)
            .collect()
    }

    /// Categories in order of first appearance.
    pub fn categories(&self) -> Vec<Category> {
        let mut seen = Vec::new();
        for def in &self.definitions {
            if !seen.contains(&def.category) {
                seen.push(def.category);
            }
        }
        seen
    }

    /// Case-insensitive substring search on label, description, and category.
    pub fn search(&self, query: &str) -> Vec<&BlockTypeDefinition> {
        self.definitions.iter().filter(|d| d.matches(query)).collect()
    }

    /// Check one content key/value against a block type.
    pub fn check_content(
        &self,
        block_type: BlockType,
        key: &str,
        value: &Value,
        policy: UnknownKeyPolicy,
    ) -> Result<()> {
        match self.get(block_type).field_spec(key) {
            Some(spec) => spec.check(value).map_err(|violation| DocError::InvalidValue {
                key: key.to_string(),
                violation,
            }),
            None if policy == UnknownKeyPolicy::Accept => finite(key, value),
            None => Err(DocError::UnknownFieldKey {
                block_type,
                key: key.to_string(),
            }),
        }
    }

    /// Check one style key/value against a block type.
    pub fn check_style(
        &self,
        block_type: BlockType,
        key: &str,
        value: &Value,
        policy: UnknownKeyPolicy,
    ) -> Result<()> {
        match self.get(block_type).style_spec(key) {
            Some(spec) => spec.check(value).map_err(|violation| DocError::InvalidValue {
                key: key.to_string(),
                violation,
            }),
            None if policy == UnknownKeyPolicy::Accept => finite(key, value),
            None => Err(DocError::UnknownStyleKey {
                block_type,
                key: key.to_string(),
            }),
        }
    }

    /// Check a whole content map and style map.
    pub fn check_maps(
        &self,
        block_type: BlockType,
        content: &Record,
        styles: &Record,
        policy: UnknownKeyPolicy,
    ) -> Result<()> {
        for (key, value) in content {
            self.check_content(block_type, key, value, policy)?;
        }
        for (key, value) in styles {
            self.check_style(block_type, key, value, policy)?;
        }
        Ok(())
    }
}

/// Unknown keys carry no spec, but their values still have to serialize.
fn finite(key: &str, value: &Value) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(DocError::InvalidValue {
            key: key.to_string(),
            violation: Violation::NonFinite,
        })
    }
}

fn validate_definition(def: &BlockTypeDefinition) -> Result<()> {
    let invalid = |what: String| DocError::InvalidSchema(format!("{}: {what}", def.block_type));

    for (key, value) in &def.default_content {
        let spec = def
            .field_spec(key)
            .ok_or_else(|| invalid(format!("default content key '{key}' is not a field")))?;
        spec.check(value)
            .map_err(|v| invalid(format!("default content '{key}': {v}")))?;
    }
    for field in &def.fields {
        if let Some(default) = &field.default {
            field
                .check(default)
                .map_err(|v| invalid(format!("field '{}' default: {v}", field.key)))?;
        }
    }
    for style in &def.styles {
        if let Some(default) = &style.default {
            style
                .check(default)
                .map_err(|v| invalid(format!("style '{}' default: {v}", style.key)))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use kumitate_types::{FieldSpec, StyleSpec};

    use super::*;

    fn registry() -> BlockRegistry {
        BlockRegistry::builtin().unwrap()
    }

    #[test]
    fn test_builtin_defines_every_type_once() {
        let reg = registry();
        assert_eq!(reg.len(), BlockType::iter().count());
        for ty in BlockType::iter() {
            assert_eq!(reg.get(ty).block_type, ty);
        }
    }

    #[test]
    fn test_lookup_known_and_unknown() {
        let reg = registry();
        assert_eq!(reg.lookup("hero").unwrap().block_type, BlockType::Hero);
        assert_eq!(reg.lookup("features-grid").unwrap().block_type, BlockType::FeaturesGrid);

        let err = reg.lookup("carousel").unwrap_err();
        match err {
            DocError::UnknownBlockType { offenders } => {
                assert_eq!(offenders[0].block_type, "carousel");
            }
            other => panic!("expected UnknownBlockType, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_definition_rejected() {
        let mut defs = crate::catalog::definitions();
        defs.retain(|d| d.block_type != BlockType::Faq);
        let err = BlockRegistry::from_definitions(defs).unwrap_err();
        assert!(matches!(err, DocError::InvalidSchema(msg) if msg.contains("faq")));
    }

    #[test]
    fn test_duplicate_definition_rejected() {
        let mut defs = crate::catalog::definitions();
        let dup = defs[0].clone();
        defs.push(dup);
        assert!(matches!(
            BlockRegistry::from_definitions(defs),
            Err(DocError::InvalidSchema(_))
        ));
    }

    #[test]
    fn test_default_content_key_must_be_a_field() {
        let mut defs = crate::catalog::definitions();
        defs[0].default_content.insert("ghost".into(), Value::text("boo"));
        let err = BlockRegistry::from_definitions(defs).unwrap_err();
        assert!(matches!(err, DocError::InvalidSchema(msg) if msg.contains("ghost")));
    }

    #[test]
    fn test_bad_style_default_rejected() {
        let mut defs = crate::catalog::definitions();
        defs[0].styles.push(StyleSpec::spacing("gap", "Gap").with_default("wide"));
        assert!(BlockRegistry::from_definitions(defs).is_err());
    }

    #[test]
    fn test_bad_field_default_rejected() {
        let mut defs = crate::catalog::definitions();
        let mut field = FieldSpec::number("count", "Count");
        field.default = Some(Value::text("three"));
        defs[0].fields.push(field);
        assert!(BlockRegistry::from_definitions(defs).is_err());
    }

    #[test]
    fn test_list_by_category_keeps_declaration_order() {
        let reg = registry();
        let social = reg.list_by_category(Category::SocialProof);
        assert!(!social.is_empty());
        assert!(social.iter().all(|d| d.category == Category::SocialProof));

        let positions: Vec<usize> = social
            .iter()
            .map(|d| {
                reg.definitions()
                    .iter()
                    .position(|x| x.block_type == d.block_type)
                    .unwrap()
            })
            .collect();
        let mut sorted = positions.clone();
        sorted.sort();
        assert_eq!(positions, sorted);
    }

    #[test]
    fn test_categories_cover_all_definitions() {
        let reg = registry();
        let cats = reg.categories();
        let total: usize = cats.iter().map(|c| reg.list_by_category(*c).len()).sum();
        assert_eq!(total, reg.len());
    }

    #[test]
    fn test_search_is_case_insensitive_and_ordered() {
        let reg = registry();
        let hits = reg.search("PRICING");
        assert!(hits.iter().any(|d| d.block_type == BlockType::PricingTable));

        let all = reg.search("");
        assert_eq!(all.len(), reg.len());

        let by_category = reg.search("social");
        assert!(by_category.iter().any(|d| d.block_type == BlockType::Testimonials));

        assert!(reg.search("zzz-no-match").is_empty());
    }

    #[test]
    fn test_check_content_policies() {
        let reg = registry();
        assert!(
            reg.check_content(BlockType::Hero, "title", &Value::text("Hi"), UnknownKeyPolicy::Reject)
                .is_ok()
        );
        assert!(matches!(
            reg.check_content(BlockType::Hero, "nope", &Value::text("x"), UnknownKeyPolicy::Reject),
            Err(DocError::UnknownFieldKey { .. })
        ));
        assert!(
            reg.check_content(BlockType::Hero, "nope", &Value::text("x"), UnknownKeyPolicy::Accept)
                .is_ok()
        );
        assert!(matches!(
            reg.check_content(BlockType::Hero, "title", &Value::Number(1.0), UnknownKeyPolicy::Accept),
            Err(DocError::InvalidValue {
                violation: Violation::KindMismatch { .. },
                ..
            })
        ));
    }

    #[test]
    fn test_check_style_policies() {
        let reg = registry();
        assert!(matches!(
            reg.check_style(BlockType::Hero, "nope", &Value::text("x"), UnknownKeyPolicy::Reject),
            Err(DocError::UnknownStyleKey { .. })
        ));
        assert!(
            reg.check_style(BlockType::Hero, "align", &Value::text("center"), UnknownKeyPolicy::Reject)
                .is_ok()
        );
        assert!(matches!(
            reg.check_style(BlockType::Hero, "blur", &Value::Number(f64::NAN), UnknownKeyPolicy::Accept),
            Err(DocError::InvalidValue {
                violation: Violation::NonFinite,
                ..
            })
        ));
    }
}
