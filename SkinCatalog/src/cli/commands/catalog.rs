//! CLI commands that build a catalog

use std::path::Path;
use std::time::Instant;

use crate::catalog::{Catalog, CatalogBuilder, CatalogOptions, Skin};
use crate::cli::progress::{DISK, GEAR, LINK, LOOKING_GLASS, print_done, print_step, simple_spinner};
use crate::formats::{LanguageTable, read_keyvalues};

const BUILD_STEPS: usize = 4;

/// Run the full pipeline and write the catalog as pretty JSON
pub fn build(
    items: &Path,
    language: &Path,
    output: Option<&Path>,
    options: &CatalogOptions,
    quiet: bool,
) -> anyhow::Result<()> {
    let started = Instant::now();

    if !quiet {
        print_step(1, BUILD_STEPS, &LOOKING_GLASS, &format!("Parsing {}...", items.display()));
    }
    let pb = simple_spinner("Reading KeyValues", quiet);
    let tree = read_keyvalues(items)?;
    pb.finish_and_clear();

    if !quiet {
        print_step(2, BUILD_STEPS, &LINK, &format!("Loading {}...", language.display()));
    }
    let table = LanguageTable::from_file(language)?;

    if !quiet {
        print_step(3, BUILD_STEPS, &GEAR, "Resolving items and synthesizing skins...");
    }
    let pb = simple_spinner("Building catalog", quiet);
    let catalog = CatalogBuilder::new(options.clone()).build_with_table(&tree, &table)?;
    pb.finish_and_clear();

    if !quiet {
        print_step(4, BUILD_STEPS, &DISK, "Writing catalog...");
    }
    match output {
        Some(path) => catalog.save_to_json(path)?,
        None => println!("{}", serde_json::to_string_pretty(&catalog)?),
    }

    if !quiet {
        print_summary(&catalog);
        print_done(started.elapsed());
    }
    Ok(())
}

fn print_summary(catalog: &Catalog) {
    let stats = catalog.stats();
    eprintln!("  Items:      {}", stats.item_count);
    eprintln!("  Crates:     {}", stats.crate_count);
    eprintln!("  Paintkits:  {}", stats.paintkit_count);
    eprintln!("  Sets:       {}", stats.weapon_set_count);
    eprintln!("  Kits:       {}", stats.sticker_kit_count);
    eprintln!("  Skins:      {}", stats.skin_count);
}

/// List skins whose market hash name contains `filter`
pub fn skins(
    items: &Path,
    language: &Path,
    filter: Option<&str>,
    limit: usize,
) -> anyhow::Result<()> {
    let catalog = CatalogBuilder::default().build_from_files(items, language)?;

    let matches: Vec<&Skin> = match filter {
        Some(needle) => catalog.find_skins(needle).collect(),
        None => catalog.skins.values().collect(),
    };

    if matches.is_empty() {
        println!("No skins found");
        return Ok(());
    }

    for skin in matches.iter().take(limit) {
        if skin.containers.is_empty() {
            println!("{}", skin.market_hash_name);
        } else {
            let containers: Vec<&str> = skin.containers.iter().map(String::as_str).collect();
            println!("{}  [{}]", skin.market_hash_name, containers.join(", "));
        }
    }

    if matches.len() > limit {
        println!("... and {} more", matches.len() - limit);
    }
    Ok(())
}
