use rack_catalog::{CatalogError, KNOWN_BRANCHES, PrecedenceCatalog};
use rack_core::{GridConfig, Item, Rank, Side};

fn sample() -> PrecedenceCatalog {
    let mut catalog = PrecedenceCatalog::new();
    for (rank, name) in [
        "Medal of Honor",
        "Air Force Cross",
        "Defense Distinguished Service Medal",
        "Distinguished Service Medal",
        "Silver Star",
        "Defense Superior Service Medal",
        "Legion of Merit",
        "Distinguished Flying Cross",
        "Airman's Medal",
        "Soldier's Medal",
        "Navy and Marine Corps Medal",
    ]
    .into_iter()
    .enumerate()
    {
        catalog.insert("USAF", rank as u32, name);
    }
    catalog.insert("AFROTC", 0, "Gold Valor");
    catalog.insert("AFROTC", 1, "Silver Valor");
    catalog
}

#[test]
fn store_then_load_preserves_every_branch() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data").join("precedence.json");

    let catalog = sample();
    catalog.store_file(&path).unwrap();
    let loaded = PrecedenceCatalog::load_file(&path).unwrap();

    assert_eq!(loaded, catalog);
    assert_eq!(loaded.branches().collect::<Vec<_>>(), KNOWN_BRANCHES);
    // Rank 10 must sort after rank 2 even though "10" < "2" as text.
    let items = loaded.load("USAF").unwrap();
    assert_eq!(items.last(), Some(&Item::new(10, "Navy and Marine Corps Medal")));
}

#[test]
fn missing_file_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");
    let err = PrecedenceCatalog::load_file(&path).unwrap_err();
    assert!(err.is_missing());
    assert!(matches!(err, CatalogError::NotFound { path: p } if p == path));
}

#[test]
fn truncated_file_is_corrupt() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("precedence.json");
    std::fs::write(&path, "{\"USAF\": {\"0\": \"Medal of").unwrap();
    let err = PrecedenceCatalog::load_file(&path).unwrap_err();
    assert!(matches!(err, CatalogError::Corrupt { .. }));
    assert!(!err.is_missing());
}

#[test]
fn empty_catalog_is_not_written() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("precedence.json");
    let err = PrecedenceCatalog::new().store_file(&path).unwrap_err();
    assert!(matches!(err, CatalogError::Empty));
    assert!(!path.exists());
}

#[test]
fn loaded_branch_drives_an_engine() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("precedence.json");
    sample().store_file(&path).unwrap();

    let catalog = PrecedenceCatalog::load_file(&path).unwrap();
    let mut engine = catalog.engine("USAF", GridConfig::default()).unwrap();
    engine.transfer("Silver Star", Side::Catalog).unwrap();
    engine.transfer("Medal of Honor", Side::Catalog).unwrap();
    engine.transfer("Airman's Medal", Side::Catalog).unwrap();
    engine.transfer("Legion of Merit", Side::Catalog).unwrap();

    let ranks: Vec<Rank> = engine.selected().iter().map(|item| item.rank).collect();
    assert_eq!(ranks, [0, 4, 6, 8].map(Rank::new));
    assert_eq!(
        catalog.rank_of("USAF", "Legion of Merit"),
        engine.rank_of("Legion of Merit")
    );
}
