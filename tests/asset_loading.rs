//! Tileset loading from disk.

use delve::config::LEGACY_TILE_SIZE;
use delve::{find_asset_dir, DelveError, TileAtlas, TileRef, TileSelection};
use macroquad::prelude::{Image, WHITE};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_png(dir: &Path, name: &str, width: u16, height: u16) {
    let path = dir.join(name);
    Image::gen_image_color(width, height, WHITE).export_png(path.to_str().unwrap());
}

#[test]
fn test_missing_directory_reports_missing_asset() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("nowhere");

    match TileAtlas::load(&missing, 16) {
        Err(DelveError::AssetMissing { path }) => assert!(path.ends_with("tileset1.png")),
        other => panic!("expected AssetMissing, got {:?}", other),
    }
}

#[test]
fn test_undecodable_tileset_reports_decode_error() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("tileset1.png"), b"definitely not a png").unwrap();

    assert!(matches!(
        TileAtlas::load(temp.path(), 16),
        Err(DelveError::AssetDecode { .. })
    ));
}

#[test]
fn test_corrupt_optional_tileset_is_still_an_error() {
    let temp = TempDir::new().unwrap();
    write_png(temp.path(), "tileset1.png", 32, 32);
    fs::write(temp.path().join("tileset2.png"), [0_u8; 8]).unwrap();

    assert!(matches!(
        TileAtlas::load(temp.path(), 16),
        Err(DelveError::AssetDecode { .. })
    ));
}

#[test]
fn test_single_tileset_loads_without_the_optional_one() {
    let temp = TempDir::new().unwrap();
    write_png(temp.path(), "tileset1.png", 64, 32);

    let atlas = TileAtlas::load(temp.path(), LEGACY_TILE_SIZE).unwrap();
    assert_eq!(atlas.tileset_count(), 1);
    assert_eq!(atlas.tile_count(0), Some(8));
    assert_eq!(atlas.tile_count(1), None);
    assert_eq!(atlas.tileset_name(0), Some("tileset1.png"));

    let selection = TileSelection::for_tileset_count(atlas.tileset_count());
    assert_eq!(selection.wall, TileRef::new(0, 1));
    assert!(atlas.tile_rect(selection.wall).is_some());
}

#[test]
fn test_both_tilesets_load() {
    let temp = TempDir::new().unwrap();
    write_png(temp.path(), "tileset1.png", 48, 48);
    write_png(temp.path(), "tileset2.png", 96, 48);

    let atlas = TileAtlas::load(temp.path(), 48).unwrap();
    assert_eq!(atlas.tileset_count(), 2);
    assert_eq!(atlas.tile_count(0), Some(1));
    assert_eq!(atlas.tile_count(1), Some(2));

    let selection = TileSelection::for_tileset_count(2);
    assert_eq!(selection.floor, TileRef::new(0, 0));
    assert_eq!(selection.wall, TileRef::new(1, 1));
    assert!(atlas.tile_rect(selection.floor).is_some());
    assert!(atlas.tile_rect(selection.wall).is_some());
}

#[test]
fn test_find_asset_dir_picks_first_with_tileset() {
    let temp = TempDir::new().unwrap();
    let empty = temp.path().join("Assets");
    let filled = temp.path().join("assets");
    fs::create_dir_all(&empty).unwrap();
    fs::create_dir_all(&filled).unwrap();
    write_png(&filled, "tileset1.png", 16, 16);

    assert_eq!(find_asset_dir(&[&empty, &filled]), Some(filled.clone()));
    assert_eq!(find_asset_dir(&[&empty]), None);
}
