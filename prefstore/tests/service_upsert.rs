use bson::DateTime;

use prefstore::{memory::InMemoryStore, prelude::*};

fn bus_lines(user_id: UserId, millis: i64, lines: &[&str]) -> FavoriteBusLines {
    FavoriteBusLines {
        user_id,
        date: DateTime::from_millis(millis),
        bus_lines: lines.iter().map(|l| l.to_string()).collect(),
    }
}

async fn service() -> DataService<InMemoryStore> {
    DataService::open(InMemoryStore::new())
        .await
        .unwrap()
}

#[tokio::test]
async fn open_installs_all_collections() {
    let service = service().await;

    let mut collections = service
        .store()
        .list_collections()
        .await
        .unwrap();
    collections.sort();

    assert_eq!(
        collections,
        vec![
            "favoriteBusLines",
            "favoriteBuscaBus",
            "favoriteSepProtocol",
            "settings",
            "vehicles",
        ],
    );
}

#[tokio::test]
async fn first_save_creates_record() {
    let service = service().await;
    let record = bus_lines(7, 1_000, &["A", "B"]);

    let saved = service
        .save_favorite_bus_lines(record.clone())
        .await
        .unwrap();
    assert_eq!(saved, record);

    let loaded = service.get_favorite_bus_lines(7).await.unwrap();
    assert_eq!(loaded, record);
}

#[tokio::test]
async fn newer_date_replaces_whole_record() {
    let service = service().await;

    service
        .save_favorite_bus_lines(bus_lines(7, 1_000, &["A", "B"]))
        .await
        .unwrap();

    let newer = bus_lines(7, 2_000, &["C"]);
    let saved = service
        .save_favorite_bus_lines(newer.clone())
        .await
        .unwrap();
    assert_eq!(saved, newer);

    // Full overwrite, not a merge: the old lines are gone.
    let loaded = service.get_favorite_bus_lines(7).await.unwrap();
    assert_eq!(loaded.bus_lines, vec!["C"]);
    assert_eq!(loaded.date, DateTime::from_millis(2_000));
}

#[tokio::test]
async fn stale_date_is_a_noop_returning_the_stored_record() {
    let service = service().await;

    let original = bus_lines(7, 2_000, &["A", "B"]);
    service
        .save_favorite_bus_lines(original.clone())
        .await
        .unwrap();

    let result = service
        .save_favorite_bus_lines(bus_lines(7, 1_000, &[]))
        .await
        .unwrap();
    assert_eq!(result, original);

    let loaded = service.get_favorite_bus_lines(7).await.unwrap();
    assert_eq!(loaded.bus_lines, vec!["A", "B"]);
    assert_eq!(loaded.date, DateTime::from_millis(2_000));
}

#[tokio::test]
async fn equal_date_save_is_a_noop() {
    let service = service().await;

    let original = bus_lines(7, 1_000, &["A"]);
    service
        .save_favorite_bus_lines(original.clone())
        .await
        .unwrap();

    let repeated = service
        .save_favorite_bus_lines(bus_lines(7, 1_000, &["B"]))
        .await
        .unwrap();
    assert_eq!(repeated, original);

    let loaded = service.get_favorite_bus_lines(7).await.unwrap();
    assert_eq!(loaded.bus_lines, vec!["A"]);
}

#[tokio::test]
async fn get_on_absent_key_is_not_found() {
    let service = service().await;

    let err = service
        .get_favorite_bus_lines(42)
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::RecordNotFound(42, _)));
}

#[tokio::test]
async fn saves_for_different_users_do_not_interfere() {
    let service = service().await;

    service
        .save_favorite_bus_lines(bus_lines(1, 1_000, &["A"]))
        .await
        .unwrap();
    service
        .save_favorite_bus_lines(bus_lines(2, 1_000, &["B"]))
        .await
        .unwrap();

    assert_eq!(
        service
            .get_favorite_bus_lines(1)
            .await
            .unwrap()
            .bus_lines,
        vec!["A"],
    );
    assert_eq!(
        service
            .get_favorite_bus_lines(2)
            .await
            .unwrap()
            .bus_lines,
        vec!["B"],
    );
}

#[tokio::test]
async fn every_collection_round_trips() {
    let service = service().await;
    let date = DateTime::from_millis(1_000);

    let busca = FavoriteBuscaBus {
        user_id: 7,
        date,
        searches: vec!["terminal bandeira".to_string()],
    };
    service
        .save_favorite_busca_bus(busca.clone())
        .await
        .unwrap();
    assert_eq!(service.get_favorite_busca_bus(7).await.unwrap(), busca);

    let settings = Settings {
        user_id: 7,
        date,
        notifications_enabled: true,
        language: Some("pt-BR".to_string()),
    };
    service.save_settings(settings.clone()).await.unwrap();
    assert_eq!(service.get_settings(7).await.unwrap(), settings);

    let vehicles = Vehicles {
        user_id: 7,
        date,
        plates: vec!["ABC-1234".to_string()],
    };
    service.save_vehicles(vehicles.clone()).await.unwrap();
    assert_eq!(service.get_vehicles(7).await.unwrap(), vehicles);

    let protocol = FavoriteSepProtocol {
        user_id: 7,
        date,
        protocols: vec![ProtocolEntry {
            number: "123".to_string(),
            subject: "pothole".to_string(),
            summary: "report".to_string(),
            status: "open".to_string(),
        }],
    };
    service
        .save_favorite_sep_protocol(protocol.clone())
        .await
        .unwrap();
    assert_eq!(service.get_favorite_sep_protocol(7).await.unwrap(), protocol);
}

#[tokio::test]
async fn upsert_keys_by_user_id_never_duplicates() {
    let service = service().await;

    for millis in [1_000, 2_000, 3_000] {
        service
            .save_favorite_bus_lines(bus_lines(7, millis, &["A"]))
            .await
            .unwrap();
    }

    // Still exactly one record, carrying the latest date.
    let loaded = service.get_favorite_bus_lines(7).await.unwrap();
    assert_eq!(loaded.date, DateTime::from_millis(3_000));
}
