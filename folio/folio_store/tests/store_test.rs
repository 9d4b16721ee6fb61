use std::sync::Arc;
use std::thread;

use folio_core::{DocumentDraft, Role, User, Viewer};
use folio_policy::{can_view, visible_private_scope};
use folio_store::{DocumentStore, InMemoryStore};

#[test]
fn test_downgrade_scenario() {
    let store = InMemoryStore::new();
    let owner = store
        .insert_user(User::new("u", "u@example.com").with_role(Role::Premium))
        .unwrap();
    let reader = store
        .insert_user(User::new("r", "r@example.com"))
        .unwrap();

    let d1 = store
        .insert_document(&owner.id, DocumentDraft::new("d1", "first").private(true))
        .unwrap();
    let d2 = store
        .insert_document(&owner.id, DocumentDraft::new("d2", "second").private(true))
        .unwrap();
    let d3 = store
        .insert_document(&owner.id, DocumentDraft::new("d3", "third"))
        .unwrap();

    let snapshot = store.snapshot(&d1.id).unwrap();
    assert!(!can_view(Viewer::User(&reader), &snapshot.document, &snapshot));

    let change = store.set_role(&owner.id, Role::Standard).unwrap();
    assert_eq!(change.publicized.len(), 2);
    assert!(change.publicized.contains(&d1.id));
    assert!(change.publicized.contains(&d2.id));

    for id in [d1.id, d2.id, d3.id] {
        let snapshot = store.snapshot(&id).unwrap();
        assert!(!snapshot.document.private);
        assert!(can_view(Viewer::User(&reader), &snapshot.document, &snapshot));
        assert!(can_view(Viewer::Anonymous, &snapshot.document, &snapshot));
    }

    // A second downgrade leaves everything as it was.
    let before = store.catalog().unwrap();
    let again = store.set_role(&owner.id, Role::Standard).unwrap();
    assert!(again.publicized.is_empty());
    let mut after = store.catalog().unwrap();
    let mut before_docs = before.documents;
    before_docs.sort_by_key(|d| d.id);
    after.documents.sort_by_key(|d| d.id);
    assert_eq!(before_docs, after.documents);
}

#[test]
fn test_upgrade_then_private_document() {
    let store = InMemoryStore::new();
    let user = store
        .insert_user(User::new("u", "u@example.com"))
        .unwrap();

    store.upgrade(&user.id).unwrap();
    let user = store.get_user(&user.id).unwrap();
    assert_eq!(user.role, Role::Premium);

    let document = store
        .insert_document(&user.id, DocumentDraft::new("mine", "secret").private(true))
        .unwrap();
    assert!(document.private);

    let catalog = store.catalog().unwrap();
    let scope = visible_private_scope(Viewer::User(&user), &catalog.documents, &catalog);
    assert_eq!(scope.len(), 1);
    assert_eq!(scope[0].id, document.id);
}

#[test]
fn test_concurrent_role_changes_end_consistent() {
    let store = Arc::new(InMemoryStore::new());
    let owner = store
        .insert_user(User::new("u", "u@example.com").with_role(Role::Premium))
        .unwrap();

    let writers: Vec<_> = (0..4)
        .map(|n| {
            let store = Arc::clone(&store);
            let owner = owner.id;
            thread::spawn(move || {
                for i in 0..25 {
                    store.set_role(&owner, Role::Premium).unwrap();
                    store
                        .insert_document(
                            &owner,
                            DocumentDraft::new(format!("d{n}-{i}"), "body").private(true),
                        )
                        .unwrap();
                    store.set_role(&owner, Role::Standard).unwrap();
                }
            })
        })
        .collect();

    for writer in writers {
        writer.join().unwrap();
    }

    assert_eq!(store.get_user(&owner.id).unwrap().role, Role::Standard);
    let documents = store.list_all().unwrap();
    assert_eq!(documents.len(), 100);
    assert!(documents.iter().all(|d| !d.private));
}

#[test]
fn test_remove_document_cascades_grants() {
    let store = InMemoryStore::new();
    let owner = store
        .insert_user(User::new("o", "o@example.com").with_role(Role::Premium))
        .unwrap();
    let guest = store
        .insert_user(User::new("g", "g@example.com"))
        .unwrap();
    let kept = store
        .insert_document(&owner.id, DocumentDraft::new("kept", "B").private(true))
        .unwrap();
    let gone = store
        .insert_document(&owner.id, DocumentDraft::new("gone", "B").private(true))
        .unwrap();

    store.add_collaborator(&kept.id, &guest.id).unwrap();
    store.add_collaborator(&gone.id, &guest.id).unwrap();
    store.remove_document(&gone.id).unwrap();

    let catalog = store.catalog().unwrap();
    assert_eq!(catalog.grants.len(), 1);
    assert!(catalog.grants.contains_key(&kept.id));
    assert!(store.get(&gone.id).unwrap_err().is_not_found());
}
