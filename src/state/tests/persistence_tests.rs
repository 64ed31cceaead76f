//! Tests for saving and restoring sessions through a store.

use crate::model::{CategoryCatalog, LabelDepth, Labels};
use crate::state::{LabelSession, SessionState};
use crate::store::{MemorySessionStore, SessionStore, StoreError};
use crate::test_support::{game_catalog, png_file};

/// Store whose writes always fail.
#[derive(Debug, Default)]
struct ReadOnlyStore;

impl SessionStore for ReadOnlyStore {
    fn load(&self) -> Result<Option<String>, StoreError> {
        Ok(None)
    }

    fn save(&mut self, _contents: &str) -> Result<(), StoreError> {
        Err(StoreError::Storage("read-only".to_string()))
    }
}

fn labelled_session() -> LabelSession<MemorySessionStore> {
    let mut session =
        LabelSession::new(MemorySessionStore::new(), game_catalog(), LabelDepth::Three);
    session
        .upload(vec![png_file("a.png"), png_file("b.png"), png_file("c.png")])
        .unwrap();
    session.next();
    session.select_category("Action");
    session.select_subcategory("Shooter");
    session.select_subsubcategory("TPS");
    session.save_current_labels();
    session
}

#[test]
fn test_reload_restores_position_and_selection() {
    let session = labelled_session();
    let store = session.into_store();

    let restored = LabelSession::restore(store, CategoryCatalog::seed(), LabelDepth::Three);
    assert_eq!(restored.collection().len(), 3);
    assert_eq!(restored.state(), SessionState::Viewing(1));
    assert_eq!(
        restored.selection().labels(),
        &Labels::new("Action", "Shooter", "TPS")
    );
    assert_eq!(restored.current().unwrap().name, "b.png");
    assert!(restored.current().unwrap().handle.is_none());
    assert!(restored.current().unwrap().url.starts_with("data:image/png;base64,"));
}

#[test]
fn test_reload_restores_custom_catalog() {
    let mut session = labelled_session();
    session.add_category("RPG");
    let store = session.into_store();

    let restored = LabelSession::restore(store, CategoryCatalog::new(), LabelDepth::Three);
    assert!(restored.catalog().contains_category("RPG"));
    assert_eq!(restored.catalog(), &{
        let mut expected = game_catalog();
        expected.add_category("RPG");
        expected
    });
}

#[test]
fn test_reload_keeps_category_named_categories() {
    let mut session = labelled_session();
    assert!(session.add_category("CATEGORIES"));
    let expected = session.catalog().clone();

    let restored =
        LabelSession::restore(session.into_store(), CategoryCatalog::new(), LabelDepth::Three);
    assert_eq!(restored.catalog(), &expected);
    assert_eq!(restored.catalog().len(), 3);
    assert_eq!(restored.state(), SessionState::Viewing(1));
}

#[test]
fn test_reload_keeps_subcategories_under_categories() {
    let mut session = labelled_session();
    session.add_category("CATEGORIES");
    session.select_category("CATEGORIES");
    assert!(session.add_subcategory("X"));
    session.select_subcategory("X");
    assert!(session.add_leaf("y"));
    let expected = session.catalog().clone();

    let restored =
        LabelSession::restore(session.into_store(), CategoryCatalog::new(), LabelDepth::Three);
    assert_eq!(restored.collection().len(), 3);
    assert_eq!(restored.state(), SessionState::Viewing(1));
    assert_eq!(
        restored.current().unwrap().labels,
        Labels::new("Action", "Shooter", "TPS")
    );
    assert_eq!(restored.catalog(), &expected);
    assert_eq!(
        restored.catalog().list_leaves("CATEGORIES", "X").len(),
        1
    );
}

#[test]
fn test_snapshot_without_catalog_uses_seed() {
    let store = MemorySessionStore::with_contents(
        r#"{"images":[{"name":"x.png","url":"","category":"Action","subcategory":"Shooter"}],"currentIndex":0}"#,
    );
    let restored = LabelSession::restore(store, game_catalog(), LabelDepth::Three);
    assert_eq!(restored.catalog(), &game_catalog());
    assert_eq!(
        restored.selection().labels(),
        &Labels::new("Action", "Shooter", "")
    );
}

#[test]
fn test_missing_session_starts_empty() {
    let restored = LabelSession::restore(
        MemorySessionStore::new(),
        game_catalog(),
        LabelDepth::Three,
    );
    assert_eq!(restored.state(), SessionState::Empty);
    assert!(restored.selection().labels().is_empty());
    assert_eq!(restored.catalog(), &game_catalog());
}

#[test]
fn test_malformed_session_starts_empty() {
    let restored = LabelSession::restore(
        MemorySessionStore::with_contents("{\"images\": 12"),
        game_catalog(),
        LabelDepth::Three,
    );
    assert_eq!(restored.state(), SessionState::Empty);
}

#[test]
fn test_every_mutation_persists() {
    let mut session =
        LabelSession::new(MemorySessionStore::new(), game_catalog(), LabelDepth::Three);
    session.upload(vec![png_file("a.png"), png_file("b.png")]).unwrap();
    let after_upload = session.store().save_count();
    assert_eq!(after_upload, 1);

    session.next();
    assert_eq!(session.store().save_count(), 2);

    session.add_category("RPG");
    assert_eq!(session.store().save_count(), 3);

    // Selection changes are not persisted until saved
    session.select_category("Action");
    assert_eq!(session.store().save_count(), 3);
}

#[test]
fn test_empty_upload_does_not_overwrite_saved_session() {
    let mut session = labelled_session();
    let before = session.store().contents().unwrap().to_string();
    session
        .upload(vec![crate::upload::UploadFile::new(
            "notes.txt",
            "text/plain",
            b"x".to_vec(),
        )])
        .unwrap();
    assert_eq!(session.state(), SessionState::Empty);
    assert_eq!(session.store().contents().unwrap(), before);
}

#[test]
fn test_failed_writes_keep_session_usable() {
    let mut session = LabelSession::new(ReadOnlyStore, game_catalog(), LabelDepth::Three);
    session.upload(vec![png_file("a.png"), png_file("b.png")]).unwrap();
    session.select_category("Action");
    assert!(session.next());
    assert_eq!(session.collection().get(0).unwrap().labels.category, "Action");
}
