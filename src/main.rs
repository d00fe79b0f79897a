use clap::{ArgAction, CommandFactory, Parser};
use chrome_pak::fsio::{read_all_bytes, write_all_bytes};
use chrome_pak::{pack, unpack, validate, PakHeader};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pak", about = "Pack/unpack Chromium resource .pak files")]
struct Cli {
    /// Unpack PAK_FILE into OUTPUT_DIR (also -e, -x)
    #[arg(
        short = 'u',
        visible_short_aliases = ['e', 'x'],
        num_args = 2,
        value_names = ["PAK_FILE", "OUTPUT_DIR"],
        conflicts_with = "pack"
    )]
    unpack: Option<Vec<PathBuf>>,

    /// Pack INDEX_FILE into OUTPUT_PAK (also -a); files resolve next to the index
    #[arg(
        short = 'p',
        visible_short_alias = 'a',
        num_args = 2,
        value_names = ["INDEX_FILE", "OUTPUT_PAK"]
    )]
    pack: Option<Vec<PathBuf>>,

    /// More logging on stderr (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

// ── Exit codes ───────────────────────────────────────────────────────────────

mod exit {
    pub const READ_PAK:      u8 = 1;
    pub const PARSE_HEADER:  u8 = 2;
    pub const VALIDATE:      u8 = 3;
    pub const UNPACK:        u8 = 4;
    pub const INDEX_PATH:    u8 = 5;
    pub const READ_INDEX:    u8 = 6;
    pub const OUTPUT_PATH:   u8 = 7;
    pub const PACK:          u8 = 8;
    pub const WRITE_PAK:     u8 = 9;
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            use clap::error::ErrorKind;
            if !matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
                eprintln!("{e}");
            }
            return usage();
        }
    };

    init_tracing(cli.verbose);

    let code = match (cli.unpack, cli.pack) {
        (Some(paths), _) => unpack_path(&paths[0], &paths[1]),
        (None, Some(paths)) => pack_index_file(&paths[0], &paths[1]),
        (None, None) => return usage(),
    };
    ExitCode::from(code)
}

fn usage() -> ExitCode {
    // Usage goes to stdout and is never a failure.
    let _ = Cli::command().print_help();
    println!();
    ExitCode::SUCCESS
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

// ── Unpack ───────────────────────────────────────────────────────────────────

fn unpack_path(pak_path: &Path, output_dir: &Path) -> u8 {
    let buf = match read_all_bytes(pak_path) {
        Ok(b) => b,
        Err(e) => return fail(exit::READ_PAK, &e),
    };
    let header = match PakHeader::parse(&buf) {
        Ok(h) => h,
        Err(e) => return fail(exit::PARSE_HEADER, &e),
    };
    if let Err(e) = validate::validate(&buf, buf.len()) {
        return fail(exit::VALIDATE, &e);
    }
    match unpack(&buf, output_dir) {
        Ok(doc) => {
            println!(
                "Unpacked {} resource(s), {} alias(es) (version {}, encoding {}) to {}",
                doc.resources.len(),
                doc.aliases.len(),
                header.version(),
                header.encoding(),
                output_dir.display()
            );
            0
        }
        Err(e) => fail(exit::UNPACK, &e),
    }
}

// ── Pack ─────────────────────────────────────────────────────────────────────

fn pack_index_file(index_path: &Path, output_path: &Path) -> u8 {
    if index_path.file_name().is_none() {
        eprintln!("Error: `{}` does not name an index file", index_path.display());
        return exit::INDEX_PATH;
    }
    let base_dir = match index_path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let index = match read_all_bytes(index_path) {
        Ok(b) => b,
        Err(e) => return fail(exit::READ_INDEX, &e),
    };

    if output_path.is_dir() {
        eprintln!("Error: output `{}` is a directory", output_path.display());
        return exit::OUTPUT_PATH;
    }

    let packed = match pack(&index, &base_dir) {
        Ok(p) => p,
        Err(e) => return fail(exit::PACK, &e),
    };
    if let Err(e) = write_all_bytes(output_path, &packed) {
        return fail(exit::WRITE_PAK, &e);
    }

    println!("Created: {} ({} bytes)", output_path.display(), packed.len());
    0
}

fn fail(code: u8, err: &dyn std::error::Error) -> u8 {
    eprint!("Error: {err}");
    let mut source = err.source();
    while let Some(s) = source {
        eprint!(": {s}");
        source = s.source();
    }
    eprintln!();
    code
}
