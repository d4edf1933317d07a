//! End-to-end editing flow against the JSON-file store.

use std::sync::Arc;

use kumitate_doc::{ApplyMode, BlockRegistry, Direction, DragSource, DropTarget, Placement};
use kumitate_session::{CatalogGenerator, EditorSession, SessionConfig};
use kumitate_types::{BlockRecord, BlockType, PageId, Value};

fn registry() -> Arc<BlockRegistry> {
    Arc::new(BlockRegistry::builtin().unwrap())
}

#[tokio::test]
async fn test_load_edit_generate_save() {
    let dir = tempfile::tempdir().unwrap();
    let config = SessionConfig::from_ron_str(&format!(
        "(history_limit: Some(20), store_dir: Some({:?}))",
        dir.path().join("pages")
    ))
    .unwrap();
    let store = config.open_store().await.unwrap();
    assert_eq!(store.name(), "json-file");

    // Seed a stored page.
    let page = PageId::new();
    store
        .save(
            page,
            &[
                BlockRecord::new("navbar").with_order(0.0),
                BlockRecord::new("hero").with_content("title", "Acme").with_order(1.0),
            ],
        )
        .await
        .unwrap();

    let reg = registry();
    let session = EditorSession::new(page, reg.clone(), &config, store.clone())
        .with_generator(Arc::new(CatalogGenerator::new(reg)));
    assert_eq!(session.load().await.unwrap(), 2);
    assert!(!session.is_dirty());

    // Drag a footer from the palette to the end, then a text block above it.
    let mut placement = Placement::new();
    session.with_editor(|e| {
        placement.begin(DragSource::Palette(BlockType::Footer));
        placement.drop(Some(DropTarget { index: e.len() }), e).unwrap();
        placement.begin(DragSource::Palette(BlockType::Text));
        placement.drop(Some(DropTarget { index: 2 }), e).unwrap();
    });

    let hero = session.with_editor(|e| e.blocks()[1].id);
    session.with_editor(|e| {
        e.update_content(&hero, "subtitle", "Websites that sell").unwrap();
        e.move_block(&hero, Direction::Down).unwrap();
    });

    let added = session.generate("pricing", ApplyMode::Append).await.unwrap();
    assert_eq!(added.len(), 1);

    session.save().await.unwrap();
    assert!(!session.is_dirty());

    // A fresh session over the same directory sees the same page.
    let reopened = EditorSession::new(page, registry(), &config, config.open_store().await.unwrap());
    reopened.load().await.unwrap();
    assert_eq!(reopened.records(), session.records());

    let types: Vec<BlockType> = reopened.with_editor(|e| e.blocks().iter().map(|b| b.block_type).collect());
    assert_eq!(
        types,
        vec![
            BlockType::Navbar,
            BlockType::Text,
            BlockType::Hero,
            BlockType::Footer,
            BlockType::PricingTable,
        ]
    );
    let subtitle = reopened.with_editor(|e| e.get(&hero).and_then(|b| b.content_value("subtitle")).cloned());
    assert_eq!(subtitle, Some(Value::text("Websites that sell")));

    assert_eq!(store.list().await.unwrap(), vec![page]);
}
