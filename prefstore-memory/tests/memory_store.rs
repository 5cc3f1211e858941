use bson::{Bson, doc};

use prefstore_core::{
    backend::{IndexSpec, StoreBackend, StoreBackendBuilder},
    error::StoreError,
};
use prefstore_memory::InMemoryStore;

fn protocol_record(id: i64, numbers: &[&str]) -> Bson {
    let protocols = numbers
        .iter()
        .map(|n| {
            Bson::Document(doc! {
                "number": *n,
                "subject": "subject",
                "summary": "summary",
                "status": "open",
            })
        })
        .collect::<Vec<_>>();

    Bson::Document(doc! { "id": id, "protocols": protocols })
}

#[tokio::test]
async fn insert_and_find_roundtrip() {
    let store = InMemoryStore::new();
    let record = Bson::Document(doc! { "id": 7_i64, "plates": ["ABC-1234"] });

    store
        .insert_record(7, record.clone(), "vehicles")
        .await
        .unwrap();

    let found = store.find_record(7, "vehicles").await.unwrap();
    assert_eq!(found, Some(record));

    let absent = store.find_record(8, "vehicles").await.unwrap();
    assert_eq!(absent, None);
}

#[tokio::test]
async fn insert_duplicate_id_is_rejected() {
    let store = InMemoryStore::new();
    let record = Bson::Document(doc! { "id": 7_i64 });

    store
        .insert_record(7, record.clone(), "vehicles")
        .await
        .unwrap();

    let err = store
        .insert_record(7, record, "vehicles")
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::RecordAlreadyExists(7, _)));
}

#[tokio::test]
async fn replace_overwrites_whole_record() {
    let store = InMemoryStore::new();

    store
        .insert_record(
            7,
            Bson::Document(doc! { "id": 7_i64, "plates": ["ABC-1234"], "color": "red" }),
            "vehicles",
        )
        .await
        .unwrap();

    let replacement = Bson::Document(doc! { "id": 7_i64, "plates": ["XYZ-9876"] });
    store
        .replace_record(7, replacement.clone(), "vehicles")
        .await
        .unwrap();

    // No field merge: the old "color" field is gone.
    let found = store.find_record(7, "vehicles").await.unwrap();
    assert_eq!(found, Some(replacement));
}

#[tokio::test]
async fn replace_missing_record_is_rejected() {
    let store = InMemoryStore::new();
    store.create_collection("vehicles").await.unwrap();

    let err = store
        .replace_record(7, Bson::Document(doc! { "id": 7_i64 }), "vehicles")
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::RecordNotFound(7, _)));
}

#[tokio::test]
async fn multi_index_fans_out_over_array_elements() {
    let store = InMemoryStore::new();
    store
        .ensure_index("protocols", "byNumber", IndexSpec::multi("protocols.number"))
        .await
        .unwrap();

    store
        .insert_record(3, protocol_record(3, &["123", "456"]), "protocols")
        .await
        .unwrap();
    store
        .insert_record(4, protocol_record(4, &["789"]), "protocols")
        .await
        .unwrap();

    let matched = store
        .find_by_index("byNumber", Bson::from("456"), "protocols")
        .await
        .unwrap();
    assert_eq!(matched.len(), 1);
    assert_eq!(
        matched[0].as_document().unwrap().get("id"),
        Some(&Bson::Int64(3))
    );

    let none = store
        .find_by_index("byNumber", Bson::from("000"), "protocols")
        .await
        .unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn multi_index_matches_flat_array_field() {
    let store = InMemoryStore::new();
    store
        .ensure_index("protocols", "byNumberOld", IndexSpec::multi("favoriteProcess"))
        .await
        .unwrap();

    // Legacy layout: the indexed values live in a flat array on the record.
    store
        .insert_record(
            9,
            Bson::Document(doc! { "id": 9_i64, "favoriteProcess": ["123", "456"] }),
            "protocols",
        )
        .await
        .unwrap();

    let matched = store
        .find_by_index("byNumberOld", Bson::from("123"), "protocols")
        .await
        .unwrap();
    assert_eq!(matched.len(), 1);
    assert_eq!(
        matched[0].as_document().unwrap().get("id"),
        Some(&Bson::Int64(9))
    );
}

#[tokio::test]
async fn index_probe_compares_numbers_by_value() {
    let store = InMemoryStore::new();
    store
        .ensure_index(
            "settings",
            "byRevision",
            IndexSpec { field: "revision".to_string(), multi: false },
        )
        .await
        .unwrap();

    store
        .insert_record(
            1,
            Bson::Document(doc! { "id": 1_i64, "revision": 5_i32 }),
            "settings",
        )
        .await
        .unwrap();

    let matched = store
        .find_by_index("byRevision", Bson::Int64(5), "settings")
        .await
        .unwrap();
    assert_eq!(matched.len(), 1);
}

#[tokio::test]
async fn undeclared_index_is_an_error() {
    let store = InMemoryStore::new();
    store.create_collection("protocols").await.unwrap();

    let err = store
        .find_by_index("nope", Bson::from("123"), "protocols")
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::IndexNotFound(_, _)));
}

#[tokio::test]
async fn missing_collection_yields_empty_index_lookup() {
    let store = InMemoryStore::new();

    let matched = store
        .find_by_index("byNumber", Bson::from("123"), "protocols")
        .await
        .unwrap();
    assert!(matched.is_empty());
}

#[tokio::test]
async fn builder_produces_empty_store() {
    let store = InMemoryStore::builder().build().await.unwrap();
    assert!(store.list_collections().await.unwrap().is_empty());
}
