//! Subcommand handlers

use anyhow::{Context, Result};
use clap::ArgMatches;
use std::path::{Path, PathBuf};

use retro_art::assets::FileResolver;
use retro_art::catalog::{Catalog, GameRecord};
use retro_art::config::{Config, EditorSettings, LayoutConfig};
use retro_art::editor::{save_scene, Editor, SaveTarget};
use retro_art::input::ScriptedInput;
use retro_art::playlist::{load_core_infos, write_system_configs, PlaylistBuilder, PlaylistConfig};
use retro_art::render::{RasterCanvas, SceneRenderer};
use retro_art::scene::{Scene, SceneBuilder};
use retro_art::text::Font;

use crate::path_arg;

/// Game record from `--game` or from `--catalog` + `--rom`
fn load_record(matches: &ArgMatches) -> Result<GameRecord> {
    if let Some(game) = matches.get_one::<PathBuf>("game") {
        return GameRecord::from_json_file(game).with_context(|| format!("Failed to read game record {:?}", game));
    }

    match (matches.get_one::<PathBuf>("catalog"), matches.get_one::<String>("rom")) {
        (Some(catalog_path), Some(rom)) => {
            let catalog = Catalog::load(catalog_path)
                .with_context(|| format!("Failed to load catalog {:?}", catalog_path))?;
            catalog
                .lookup(rom)
                .cloned()
                .with_context(|| format!("No catalog entry matches '{}'", rom))
        }
        _ => {
            log::warn!("No game record given, every record field renders empty");
            Ok(GameRecord::new())
        }
    }
}

/// Resolver rooted at the layout's directory, then every `--assets` directory
fn resolver_for(layout_path: &Path, matches: &ArgMatches) -> FileResolver {
    let mut resolver = FileResolver::new();
    if let Some(parent) = layout_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        resolver = resolver.with_search_path(parent);
    }
    if let Some(dirs) = matches.get_many::<PathBuf>("assets") {
        for dir in dirs {
            resolver = resolver.with_search_path(dir);
        }
    }
    resolver
}

fn build_scene(matches: &ArgMatches) -> Result<(PathBuf, Scene)> {
    let layout_path = path_arg(matches, "layout")?;
    let layout = LayoutConfig::load_lenient(&layout_path)
        .with_context(|| format!("Failed to load layout {:?}", layout_path))?;
    let record = load_record(matches)?;
    let resolver = resolver_for(&layout_path, matches);

    let mut builder = SceneBuilder::new(&layout, &record, &resolver);
    if let Some(font_path) = layout.font.path.as_deref().and_then(|p| resolver.locate(p)) {
        match Font::from_file(&font_path) {
            Ok(font) => builder = builder.with_font(font),
            Err(e) => log::warn!("Failed to load font {:?}: {}", font_path, e),
        }
    }

    let scene = builder.build().with_context(|| format!("Layout {:?} has nothing to draw", layout_path))?;
    Ok((layout_path, scene))
}

pub fn render(matches: &ArgMatches) -> Result<()> {
    let (_, scene) = build_scene(matches)?;
    let out = path_arg(matches, "out")?;

    match matches.get_one::<PathBuf>("save-layout") {
        Some(layout_out) => save_scene(&scene, layout_out, &out)?,
        None => SceneRenderer::export(&scene, &out).with_context(|| format!("Failed to write {:?}", out))?,
    }

    println!("Rendered {} elements to {}", scene.len(), out.display());
    Ok(())
}

pub fn edit(matches: &ArgMatches) -> Result<()> {
    let (layout_path, scene) = build_scene(matches)?;
    let out = path_arg(matches, "out")?;

    let script_path = path_arg(matches, "script")?;
    let script = std::fs::read_to_string(&script_path)
        .with_context(|| format!("Failed to read input script {:?}", script_path))?;
    let mut input = ScriptedInput::from_ron(&script)
        .with_context(|| format!("Failed to parse input script {:?}", script_path))?;

    let settings = match matches.get_one::<PathBuf>("settings") {
        Some(path) => EditorSettings::load_or_default(path)
            .with_context(|| format!("Failed to load editor settings {:?}", path))?,
        None => EditorSettings::default(),
    };

    let mut canvas = RasterCanvas::new(scene.canvas());
    let mut editor = Editor::with_settings(scene, settings).with_save_target(SaveTarget::new(&layout_path, &out));
    let summary = editor.run(&mut input, &mut canvas);

    println!(
        "Session ended after {} events ({} frames, {} saves, {} failed)",
        summary.events, summary.frames, summary.saves, summary.failed_saves
    );
    Ok(())
}

pub fn lookup(matches: &ArgMatches) -> Result<()> {
    let catalog_path = path_arg(matches, "catalog")?;
    let catalog = Catalog::load(&catalog_path).with_context(|| format!("Failed to load catalog {:?}", catalog_path))?;

    for rom in matches.get_many::<String>("roms").into_iter().flatten() {
        match catalog.lookup(rom) {
            Some(record) => println!(
                "{}\t{}\t{}\t{}",
                rom,
                record.title(),
                record.text("genre"),
                record.rating()
            ),
            None => println!("{}\t-", rom),
        }
    }
    Ok(())
}

pub fn playlist(matches: &ArgMatches) -> Result<()> {
    let config_path = path_arg(matches, "config")?;
    let config = PlaylistConfig::load_from_file(&config_path)
        .with_context(|| format!("Failed to load playlist config {:?}", config_path))?;
    let catalog_path = path_arg(matches, "catalog")?;
    let catalog = Catalog::load(&catalog_path).with_context(|| format!("Failed to load catalog {:?}", catalog_path))?;
    let out_dir = path_arg(matches, "out-dir")?;

    let playlist = PlaylistBuilder::new(&config)
        .build(&catalog)
        .with_context(|| format!("Failed to scan {:?}", config.roms_path))?;
    let path = playlist.write_to(&out_dir, &config.output_name)?;

    println!("Wrote {} entries to {}", playlist.items.len(), path.display());
    Ok(())
}

pub fn cores(matches: &ArgMatches) -> Result<()> {
    let info_dir = path_arg(matches, "info-dir")?;
    let config_dir = path_arg(matches, "config-dir")?;

    let infos = load_core_infos(&info_dir).with_context(|| format!("Failed to read core infos from {:?}", info_dir))?;
    let written = write_system_configs(&infos, &config_dir)?;

    println!("Wrote {} playlist configs to {}", written.len(), config_dir.display());
    Ok(())
}
