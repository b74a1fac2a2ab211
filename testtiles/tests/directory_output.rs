//! Integration tests for writing tilesets to disk.

use std::fs;
use std::path::Path;

use tempfile::TempDir;
use testtiles::generator::{TilesetConfig, TilesetGenerator};
use testtiles::output::{DirectoryWriter, TileFormat, TilesetHeader};
use testtiles::synth::PropertyProfile;

fn tile_files(root: &Path) -> Vec<String> {
    let mut files = Vec::new();
    collect(root, root, &mut files);
    files.sort();
    files
}

fn collect(root: &Path, dir: &Path, files: &mut Vec<String>) {
    for entry in fs::read_dir(dir).unwrap() {
        let path = entry.unwrap().path();
        if path.is_dir() {
            collect(root, &path, files);
        } else {
            let relative = path.strip_prefix(root).unwrap();
            files.push(relative.to_string_lossy().replace('\\', "/"));
        }
    }
}

#[test]
fn test_writes_zoom_col_row_layout() {
    let temp = TempDir::new().unwrap();
    let generator = TilesetGenerator::new(&TilesetConfig::new(1, 3).with_seed(10)).unwrap();
    let writer = DirectoryWriter::new(temp.path(), TileFormat::Pbf).unwrap();
    let summary = generator.run(&writer, None).unwrap();

    assert_eq!(summary.tiles, 5);
    assert_eq!(
        tile_files(temp.path()),
        vec!["0/0/0.pbf", "1/0/0.pbf", "1/0/1.pbf", "1/1/0.pbf", "1/1/1.pbf"]
    );

    let total: u64 = tile_files(temp.path())
        .iter()
        .map(|f| fs::metadata(temp.path().join(f)).unwrap().len())
        .sum();
    assert_eq!(total, summary.bytes);
}

#[test]
fn test_written_tiles_decode() {
    let temp = TempDir::new().unwrap();
    let generator = TilesetGenerator::new(&TilesetConfig::new(2, 4).with_seed(6)).unwrap();
    let writer = DirectoryWriter::new(temp.path(), TileFormat::Mvt).unwrap();
    generator.run(&writer, None).unwrap();

    let data = fs::read(temp.path().join("2/3/1.mvt")).unwrap();
    let reader = mvt_reader::Reader::new(data).unwrap();
    assert_eq!(reader.get_layer_names().unwrap(), vec!["points".to_string()]);
    assert_eq!(reader.get_features(0).unwrap().len(), 4);
}

#[test]
fn test_parallel_run_writes_same_files() {
    let sequential = TempDir::new().unwrap();
    let parallel = TempDir::new().unwrap();
    let config = TilesetConfig::new(3, 5).with_seed(77);

    TilesetGenerator::new(&config)
        .unwrap()
        .run(&DirectoryWriter::new(sequential.path(), TileFormat::Pbf).unwrap(), None)
        .unwrap();
    TilesetGenerator::new(&config.clone().with_threads(3))
        .unwrap()
        .run(&DirectoryWriter::new(parallel.path(), TileFormat::Pbf).unwrap(), None)
        .unwrap();

    let files = tile_files(sequential.path());
    assert_eq!(files.len(), 85);
    assert_eq!(files, tile_files(parallel.path()));
    for file in files {
        assert_eq!(
            fs::read(sequential.path().join(&file)).unwrap(),
            fs::read(parallel.path().join(&file)).unwrap(),
            "{} differs",
            file
        );
    }
}

#[test]
fn test_header_written_and_parsed() {
    let temp = TempDir::new().unwrap();
    let config = TilesetConfig::new(2, 10)
        .with_seed(21)
        .with_profile(PropertyProfile::Vessel);
    let generator = TilesetGenerator::new(&config).unwrap();
    let writer = DirectoryWriter::new(temp.path(), TileFormat::Pbf).unwrap();

    let header = TilesetHeader::for_generator("sample", &generator);
    let path = writer.write_header(&header).unwrap();
    assert_eq!(path, temp.path().join("header"));

    let parsed: TilesetHeader = serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();
    assert_eq!(parsed.tileset_name, "sample");
    assert_eq!(parsed.seed, 21);
    assert_eq!(parsed.max_zoom, 2);
    assert_eq!(parsed.time_min, header.time_min);
    assert!(parsed.cols_by_name.contains_key("seriesgroup"));
    assert!(parsed.cols_by_name.contains_key("datetime"));
}
