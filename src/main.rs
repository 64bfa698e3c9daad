use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use svgr::{Path, parse_path, tag::Element};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    /// One line per command, indented under its subpath
    Tree,
    /// Re-serialized path data
    Data,
}

/// Print the parsed structure of SVG path data
#[derive(Debug, Parser)]
#[command(name = "pathdump", version)]
struct Args {
    /// SVG file to read path elements from
    file: Option<PathBuf>,

    /// Parse this path data instead of reading a file
    #[arg(short, long, conflicts_with = "file")]
    data: Option<String>,

    /// Only the element with this id
    #[arg(long)]
    id: Option<String>,

    /// Name of the elements carrying path data
    #[arg(long, default_value = "path")]
    element: String,

    #[arg(long, value_enum, default_value_t = Format::Tree)]
    format: Format,
}

fn print_path(label: &str, path: &Path, format: Format) {
    match format {
	Format::Data => println!("{}: {}", label, path),
	Format::Tree => {
	    println!("{}:", label);
	    for (i, subpath) in path.subpaths().enumerate() {
		println!("  subpath {}", i);
		for command in subpath.commands() {
		    println!("    {} {:?}", command.symbol, command.params);
		}
	    }
	},
    }
}

fn dump_document(args: &Args, file: &std::path::Path) -> Result<()> {
    let root = Element::open(file)
	.with_context(|| format!("reading {}", file.display()))?;

    let elements = match &args.id {
	Some(id) => match root.find_id(id) {
	    Some(element) => vec![element],
	    None => bail!("no element with id {:?} in {}", id, file.display()),
	},
	None => root.find_all(&args.element),
    };
    debug!(count = elements.len(), "selected elements");

    for (i, element) in elements.iter().enumerate() {
	let label = match element.id() {
	    Some(id) => format!("#{}", id),
	    None => format!("{}[{}]", element.name, i),
	};

	match element.parse_path()? {
	    Some(path) => print_path(&label, &path, args.format),
	    None => warn!("{} has no path data", label),
	}
    }

    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
	.with_env_filter(EnvFilter::from_default_env())
	.with_writer(std::io::stderr)
	.init();

    let args = Args::parse();

    match (&args.data, &args.file) {
	(Some(data), _) => {
	    let path = parse_path(data).context("parsing path data")?;
	    print_path("d", &path, args.format);
	    Ok(())
	},
	(None, Some(file)) => dump_document(&args, file),
	(None, None) => bail!("either a file or --data is required"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_dump_document() {
	let file = std::env::temp_dir().join(format!("pathdump-{}.svg", std::process::id()));
	fs::write(&file, r#"<svg><path id="a" d="M0 0 L1 1"/><path id="b" d="M 1"/></svg>"#).unwrap();

	let args = Args::parse_from(["pathdump", "--id", "a"]);
	assert!(dump_document(&args, file.as_path()).is_ok());

	let args = Args::parse_from(["pathdump", "--id", "b"]);
	assert!(dump_document(&args, &file).is_err());

	let args = Args::parse_from(["pathdump", "--id", "missing"]);
	assert!(dump_document(&args, &file).is_err());

	fs::remove_file(&file).unwrap();
    }
}
