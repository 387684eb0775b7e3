//! Whole-pipeline tests: catalog and script fixtures through to rendered output.

use std::fs;
use std::path::PathBuf;

use discmos::mosaic::nearest_tiles_reference;
use discmos::render::fits_in_message;
use discmos::{
    build_mosaic, load_catalog, render_composite, render_text, select, select_with,
    validate_catalog, write_png, ChannelWeights, MosaicParams, RegexScope, SelectOptions,
    TileSize, Workspace,
};
use image::{DynamicImage, Rgb, RgbImage};
use pretty_assertions::assert_eq;
use tempfile::tempdir;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn names(selected: &std::collections::BTreeSet<discmos::EmojiRecord>) -> Vec<String> {
    selected
        .iter()
        .map(|e| format!("{}@{}", e.name, e.server))
        .collect()
}

#[test]
fn fixture_catalog_is_clean() {
    let catalog = load_catalog(&fixture("emoji-data.json")).unwrap();

    assert_eq!(catalog.servers.len(), 3);
    assert_eq!(catalog.len(), 11);
    assert!(validate_catalog(&catalog).is_ok());
}

#[test]
fn fixture_script_selection() {
    let catalog = load_catalog(&fixture("emoji-data.json")).unwrap();
    let script = fs::read_to_string(fixture("include.txt")).unwrap();

    let selected = select(&catalog, &script).unwrap();

    assert_eq!(
        names(&selected),
        [
            "cat_happy@Cat Cafe",
            "cat_sad@Cat Cafe",
            "heart_red@Pixel Art Club",
            "heart_blue@Pixel Art Club",
            "pixel_sun@Pixel Art Club",
            "gg@Gaming (EU)",
            "cat_happy@Gaming (EU)",
        ]
    );
}

#[test]
fn fixture_script_with_scoped_regex() {
    let catalog = load_catalog(&fixture("emoji-data.json")).unwrap();
    let script = fs::read_to_string(fixture("include.txt")).unwrap();
    let options = SelectOptions {
        regex_scope: RegexScope::CurrentServers,
    };

    let selected = select_with(&catalog, &script, options).unwrap();

    assert_eq!(selected.len(), 6);
    assert!(!names(&selected).contains(&"cat_happy@Gaming (EU)".to_string()));
}

/// A workspace holding the fixtures, with one solid-colour image per emoji.
fn fixture_workspace(root: &std::path::Path) -> Workspace {
    let workspace = Workspace::new(root);
    workspace.init(false).unwrap();
    fs::copy(fixture("emoji-data.json"), workspace.catalog_path()).unwrap();
    fs::copy(fixture("include.txt"), workspace.script_path()).unwrap();

    let catalog = workspace.load_catalog().unwrap();
    for (i, emoji) in catalog.emojis.iter().enumerate() {
        let level = (i * 23) as u8;
        RgbImage::from_pixel(32, 32, Rgb([level, 255 - level, (i * 70 % 256) as u8]))
            .save(workspace.images().path_for(emoji))
            .unwrap();
    }

    workspace
}

#[test]
fn workspace_pipeline_writes_text_and_composite() {
    let dir = tempdir().unwrap();
    let workspace = fixture_workspace(dir.path());

    let catalog = workspace.load_catalog().unwrap();
    let script = workspace.read_script().unwrap();
    let emojis: Vec<_> = select(&catalog, &script).unwrap().into_iter().collect();

    let source = DynamicImage::ImageRgb8(RgbImage::from_fn(60, 30, |x, y| {
        Rgb([(x * 4) as u8, (y * 8) as u8, 128])
    }));
    let manifest = workspace.manifest().unwrap();
    let params = MosaicParams::new(12, TileSize::square(manifest.resize))
        .with_weights(ChannelWeights::new(1.0, 0.5, 2.0));

    let grid = build_mosaic(&emojis, &workspace.images(), &source, &params).unwrap();
    assert_eq!((grid.columns(), grid.rows()), (12, 6));
    assert!(grid.cells().iter().all(|cell| emojis.contains(cell)));

    let text = render_text(&grid);
    assert_eq!(text.lines().count(), 6);
    assert!(fits_in_message(&text));

    let composite = render_composite(&grid, &workspace.images(), 16, manifest.background).unwrap();
    assert_eq!(composite.dimensions(), (192, 96));

    let out = workspace.image_output(&workspace.source_dir().join("gradient.png"), "_test");
    write_png(&composite, &out).unwrap();
    assert_eq!(image::open(&out).unwrap().width(), 192);
}

#[test]
fn bulk_matching_agrees_with_reference() {
    let dir = tempdir().unwrap();
    let workspace = fixture_workspace(dir.path());
    let catalog = workspace.load_catalog().unwrap();
    let emojis: Vec<_> = catalog.emojis.iter().cloned().collect();

    let source = DynamicImage::ImageRgb8(RgbImage::from_fn(40, 40, |x, y| {
        Rgb([(x * 6) as u8, 200 - (y * 5) as u8, ((x + y) * 3) as u8])
    }));
    let params = MosaicParams::new(10, TileSize::square(4))
        .with_weights(ChannelWeights::new(3.0, 1.0, 0.25));
    let grid = build_mosaic(&emojis, &workspace.images(), &source, &params).unwrap();

    // Recompute with the nested-loop matcher from the same tiles.
    let tiles: Vec<RgbImage> = emojis
        .iter()
        .map(|e| {
            let img = image::open(workspace.images().path_for(e)).unwrap();
            discmos::mosaic::tile::resample_onto(&img, 4, 4, params.filter, params.background)
        })
        .collect();
    let candidates = discmos::mosaic::TileBatch::from_images(&tiles, TileSize::square(4));
    let scaled = discmos::mosaic::tile::resample_onto(&source, 40, 40, params.filter, params.background);
    let sources = discmos::mosaic::TileBatch::from_grid(&scaled, TileSize::square(4), 10, 10);
    let expected = nearest_tiles_reference(&candidates, &sources, params.weights);

    let actual: Vec<usize> = grid
        .cells()
        .iter()
        .map(|cell| emojis.iter().position(|e| e == cell).unwrap())
        .collect();
    assert_eq!(actual, expected);
}
