use std::fs;

use inventory_content::{ContentFactory, LayoutLoader};
use inventory_core::{
    GridDimensions, GridKind, GridPosition, InventoryController, InventoryEngine, ItemCatalog,
    ItemHandle,
};
use tempfile::TempDir;

const ITEMS: &str = r#"(
    items: [
        (handle: (1), footprint: (width: 2, height: 1), max_stack: 1),
        (handle: (2), footprint: (width: 1, height: 1), max_stack: 20),
    ],
)"#;

const CONFIG: &str = r#"
tile_size = 48

[primary]
width = 4
height = 2

[overflow]
width = 2
height = 1
"#;

const SCRIPT: &str = r#"(
    ticks: [
        [AddItem(handle: (1), quantity: 1), AddItem(handle: (2), quantity: 50, allow_overflow: true)],
        [PickUp(grid: Primary, position: (x: 1, y: 0)), RotateHeld],
    ],
)"#;

fn content_dir() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("items.ron"), ITEMS).unwrap();
    fs::write(dir.path().join("inventory.toml"), CONFIG).unwrap();
    fs::create_dir(dir.path().join("scripts")).unwrap();
    fs::write(dir.path().join("scripts").join("demo.ron"), SCRIPT).unwrap();
    dir
}

#[test]
fn factory_loads_a_content_directory() {
    let dir = content_dir();
    let factory = ContentFactory::new(dir.path());

    let config = factory.load_config().unwrap();
    assert_eq!(config.primary, GridDimensions::new(4, 2));
    assert_eq!(config.overflow, Some(GridDimensions::new(2, 1)));
    assert_eq!(config.tile_size, 48);

    let catalog = factory.load_catalog().unwrap();
    assert_eq!(catalog.all_descriptors().len(), 2);

    let script = factory.load_script("demo").unwrap();
    assert_eq!(script.ticks.len(), 2);
    assert_eq!(script.command_count(), 4);
}

#[test]
fn missing_config_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = ContentFactory::new(dir.path()).load_config().unwrap();
    assert_eq!(config, Default::default());
}

#[test]
fn missing_catalog_names_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let error = ContentFactory::new(dir.path()).load_catalog().unwrap_err();
    assert!(error.to_string().contains("items.ron"));
}

#[test]
fn scripted_layout_survives_save_and_restore() {
    let dir = content_dir();
    let factory = ContentFactory::new(dir.path());
    let config = factory.load_config().unwrap();
    let catalog = factory.load_catalog().unwrap();
    let script = factory.load_script("demo").unwrap();

    let mut inventory = InventoryController::new(config.clone());
    {
        let mut engine = InventoryEngine::new(&mut inventory);
        for tick in &script.ticks {
            let report = engine.tick(&catalog, tick);
            assert_eq!(report.failures().count(), 0);
        }
    }
    assert!(inventory.held().unwrap().instance().is_rotated());
    assert_eq!(inventory.count_item(ItemHandle(2)), 50);

    let path = dir.path().join("layout.ron");
    let snapshot = inventory.snapshot();
    LayoutLoader::save(&path, &snapshot).unwrap();
    assert_eq!(LayoutLoader::load(&path).unwrap(), snapshot);

    let mut restored = LayoutLoader::restore(&path, config, &catalog).unwrap();
    assert_eq!(restored.snapshot(), snapshot);
    assert_eq!(
        restored.snapshot().digest().unwrap(),
        snapshot.digest().unwrap()
    );

    let location = restored.cancel_drag().unwrap();
    assert_eq!(location.grid, GridKind::Primary);
    assert_eq!(
        restored.primary().get_item(GridPosition::ORIGIN).map(|item| item.handle()),
        Some(ItemHandle(1))
    );
}
