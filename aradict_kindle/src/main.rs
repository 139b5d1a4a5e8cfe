// CLI entry point for the Kindle dictionary generator.
//
// Reads the analyzer tables from the data directory, generates every
// inflected form of every lemma, merges lemmas with identical form sets, and
// writes a Kindle dictionary (OPF + HTML pages) ready for kindlegen.
// See `tables.rs` for the input formats and `opf.rs` for the output layout.
//
// Usage:
//   kindlearadict [OPTIONS]
//     --dest-file <FILE>          OPF file to write (default: out/aradict.opf)
//     --data-dir <DIR>            Directory holding the tables (default: .)
//     --config <FILE>             JSON DictConfig (default: built-in)
//     --mini                      Only lemmas whose root starts with ain
//     --vowelled-forms            Also index partially vowelled spellings
//     --frequency-list <F>...     Only index words found in these lists
//     --batch-size <N>            Consolidate lemmas in chunks of N
//     --romanize                  Add ALA-LC romanizations to glosses
//
// Log verbosity follows RUST_LOG (default: info).

use aradict_kindle::config::DictConfig;
use aradict_kindle::error::KindleError;
use aradict_kindle::freq_list::load_filter;
use aradict_kindle::opf::write_dictionary;
use aradict_kindle::tables::load_context;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "\
Usage: kindlearadict [OPTIONS]
  --dest-file <FILE>        OPF file to write (default: out/aradict.opf)
  --data-dir <DIR>          Directory holding the tables (default: .)
  --config <FILE>           JSON configuration
  --mini                    Small test dictionary (roots starting with ain)
  --vowelled-forms          Also index partially vowelled spellings
  --frequency-list <F>...   Only index words found in these lists
  --batch-size <N>          Consolidate lemmas in chunks of N
  --romanize                Add ALA-LC romanizations to glosses";

struct CliArgs {
    dest_file: PathBuf,
    data_dir: PathBuf,
    config: Option<PathBuf>,
    mini: bool,
    vowelled_forms: bool,
    frequency_lists: Vec<PathBuf>,
    batch_size: Option<usize>,
    romanize: bool,
}

impl Default for CliArgs {
    fn default() -> Self {
        Self {
            dest_file: PathBuf::from("out/aradict.opf"),
            data_dir: PathBuf::from("."),
            config: None,
            mini: false,
            vowelled_forms: false,
            frequency_lists: Vec::new(),
            batch_size: None,
            romanize: false,
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = parse_args();
    if let Err(e) = generate(&args) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn generate(args: &CliArgs) -> Result<(), KindleError> {
    let config = match &args.config {
        Some(path) => DictConfig::load(path)?,
        None => DictConfig::default(),
    };

    let mut options = config.generation.clone();
    options.vowelled_forms |= args.vowelled_forms;
    options.romanize |= args.romanize;
    if args.batch_size.is_some() {
        options.batch_size = args.batch_size;
    }
    if args.mini {
        options.root_initial = Some(config.mini_root_initial.clone());
    }

    tracing::info!(data_dir = %args.data_dir.display(), "reading tables");
    let ctx = load_context(&args.data_dir, &config.inputs)?;

    let filter = if args.frequency_lists.is_empty() {
        None
    } else {
        Some(load_filter(&args.frequency_lists)?)
    };
    if options.vowelled_forms && filter.is_none() {
        tracing::warn!("vowelled forms without a frequency list produce a very large index");
    }

    let output = aradict_morph::run(&ctx, filter.as_ref(), &options)?;

    let title = config.book.title_for(filter.is_some(), args.mini);
    tracing::info!(title, dest = %args.dest_file.display(), "generating dictionary");
    let stats = write_dictionary(
        &args.dest_file,
        title,
        &config.book,
        config.writer,
        &output.entries,
    )?;

    println!("{}", output.report);
    println!(
        "Wrote {} entries ({} after splitting) on {} pages to {}",
        stats.original_entries,
        stats.expanded_entries,
        stats.pages,
        args.dest_file.display()
    );
    Ok(())
}

/// Parse command-line arguments. Uses simple `std::env::args()` matching.
fn parse_args() -> CliArgs {
    let mut cli = CliArgs::default();
    let args: Vec<String> = std::env::args().collect();
    let mut i = 1;

    while i < args.len() {
        match args[i].as_str() {
            "--dest-file" => {
                i += 1;
                cli.dest_file = required(&args, i, "--dest-file").into();
            }
            "--data-dir" => {
                i += 1;
                cli.data_dir = required(&args, i, "--data-dir").into();
            }
            "--config" => {
                i += 1;
                cli.config = Some(required(&args, i, "--config").into());
            }
            "--mini" => cli.mini = true,
            "--vowelled-forms" => cli.vowelled_forms = true,
            "--romanize" => cli.romanize = true,
            "--frequency-list" => {
                // Takes every following argument up to the next flag.
                while args.get(i + 1).is_some_and(|a| !a.starts_with("--")) {
                    i += 1;
                    cli.frequency_lists.push(PathBuf::from(&args[i]));
                }
            }
            "--batch-size" => {
                i += 1;
                cli.batch_size = match args.get(i).and_then(|s| s.parse().ok()) {
                    Some(n) if n > 0 => Some(n),
                    _ => {
                        eprintln!("--batch-size requires a positive number");
                        std::process::exit(1);
                    }
                };
            }
            "--help" | "-h" => {
                println!("{USAGE}");
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {other}");
                eprintln!("{USAGE}");
                std::process::exit(1);
            }
        }
        i += 1;
    }

    cli
}

fn required<'a>(args: &'a [String], i: usize, flag: &str) -> &'a str {
    match args.get(i) {
        Some(value) => value,
        None => {
            eprintln!("{flag} requires a value");
            std::process::exit(1);
        }
    }
}
