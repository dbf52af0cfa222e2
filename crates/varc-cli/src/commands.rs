use std::fs;
use std::path::Path;
use std::time::SystemTime;

use anyhow::{bail, Context};
use colored::Colorize;
use filetime::FileTime;
use varc_map::PathMap;
use varc_store::{Entry, OpenMode, Store};
use varc_types::AssetKey;
use walkdir::WalkDir;

use crate::cli::{Cli, Command, ListArgs, OutputFormat, PackArgs, UnpackArgs};

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Pack(args) => cmd_pack(args),
        Command::Unpack(args) => cmd_unpack(args),
        Command::List(args) => cmd_list(args, &cli.format),
    }
}

/// Read modes require both container files up front.
fn require_files(index: &Path, data: &Path) -> anyhow::Result<()> {
    if !index.is_file() {
        bail!("index file does not exist: {}", index.display());
    }
    if !data.is_file() {
        bail!("data file does not exist: {}", data.display());
    }
    Ok(())
}

fn cmd_list(args: ListArgs, format: &OutputFormat) -> anyhow::Result<()> {
    require_files(&args.index, &args.data)?;
    let store = Store::open(&args.index, &args.data, OpenMode::Read)?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(store.entries())?);
        }
        OutputFormat::Text => {
            for entry in store.entries() {
                let ty = varc_types::describe(i32::from(entry.file_type));
                println!(
                    "{}.{}  {}  {} bytes",
                    entry.key.to_string().yellow(),
                    ty.extension,
                    ty.name.cyan(),
                    entry.size,
                );
            }
            println!("{} entries", store.len().to_string().bold());
        }
    }
    Ok(())
}

fn cmd_unpack(args: UnpackArgs) -> anyhow::Result<()> {
    require_files(&args.index, &args.data)?;
    let mut store = Store::open(&args.index, &args.data, OpenMode::Read)?;
    fs::create_dir_all(&args.dir)
        .with_context(|| format!("creating {}", args.dir.display()))?;

    let entries: Vec<Entry> = store.entries().to_vec();
    for entry in &entries {
        let ty = varc_types::describe(i32::from(entry.file_type));
        let name = format!("{}.{}", entry.key, ty.extension);
        let path = args.dir.join(&name);

        let payload = store.read_entry(entry)?;
        fs::write(&path, payload).with_context(|| format!("writing {}", path.display()))?;
        filetime::set_file_mtime(&path, FileTime::from_system_time(entry.atime))
            .with_context(|| format!("setting mtime on {}", path.display()))?;
        println!("  {} {}", "extracted:".green(), name);
    }

    println!("{} {} assets", "✓".green().bold(), entries.len());
    Ok(())
}

fn cmd_pack(args: PackArgs) -> anyhow::Result<()> {
    let mut store = Store::open(&args.index, &args.data, OpenMode::Write)?;

    let count = match &args.map {
        Some(map_path) => {
            let text = fs::read_to_string(map_path)
                .with_context(|| format!("reading path map {}", map_path.display()))?;
            pack_mapped(&mut store, &args.dir, &PathMap::parse(&text))?
        }
        None => pack_tree(&mut store, &args.dir)?,
    };

    println!("{} packed {} assets", "✓".green().bold(), count);
    Ok(())
}

/// Import exactly the mapped files, keeping each one's mapped key.
fn pack_mapped(store: &mut Store, dir: &Path, map: &PathMap) -> anyhow::Result<usize> {
    let mut count = 0;
    for (key, rel) in map.iter() {
        let path = dir.join(rel);
        let data = fs::read(&path).with_context(|| format!("reading {}", path.display()))?;
        store.add(*key, type_for(&path), &data, file_mtime(&path)?)?;
        println!("  {} {}", "packed:".green(), rel);
        count += 1;
    }
    Ok(count)
}

/// Import every file under `dir`, keys derived from content.
fn pack_tree(store: &mut Store, dir: &Path) -> anyhow::Result<usize> {
    let mut count = 0;
    for walked in WalkDir::new(dir) {
        let walked = walked?;
        if !walked.file_type().is_file() {
            continue;
        }
        let path = walked.path();
        let data = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        store.add(
            AssetKey::from_content(&data),
            type_for(path),
            &data,
            file_mtime(path)?,
        )?;
        println!("  {} {}", "packed:".green(), path.display());
        count += 1;
    }
    Ok(count)
}

/// Infer the asset type code from a file extension.
///
/// Unknown extensions degrade to the UNKNOWN code, matching the registry's
/// total-lookup design.
fn type_for(path: &Path) -> u16 {
    let code = path
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(varc_types::code_for_extension)
        .unwrap_or(varc_types::UNKNOWN_CODE);
    u16::try_from(code).unwrap_or(varc_types::UNKNOWN_CODE as u16)
}

fn file_mtime(path: &Path) -> anyhow::Result<SystemTime> {
    let meta = fs::metadata(path).with_context(|| format!("stat {}", path.display()))?;
    Ok(meta.modified()?)
}
