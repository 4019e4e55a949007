// src/cli.rs
use std::{env, path::PathBuf, time::Duration};

use color_eyre::eyre::{bail, eyre, Result};
use ::log::{info, LevelFilter};

use crate::catalog::load_catalog;
use crate::config::consts::{DIRECTORY_URL, FAVICON_SERVICE};
use crate::config::options::{Collision, ImagePolicy, ListingEntry, RunOptions, SlugStyle};
use crate::core::net::HttpFetch;
use crate::file::{category_from_catalog, default_out_dir};
use crate::progress::Progress;
use crate::runner::{self, RunReport};
use crate::scrape::{Disposition, CASCADE};

const HELP: &str = include_str!("cli_help.txt");

#[derive(Debug, Default, PartialEq, Eq)]
pub struct CliArgs {
    pub catalog: Option<PathBuf>,
    pub listing: Option<String>,
    pub category: Option<String>,
    pub auto_category: bool,
    pub directory_url: Option<String>,
    pub out: Option<PathBuf>,
    pub compact: bool,
    pub with_category: bool,
    pub overwrite: bool,
    pub strict: bool,
    pub workers: Option<usize>,
    pub max_pages: Option<usize>,
    pub url_column: Option<String>,
    pub services: Vec<String>,
    pub report: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
    pub verbosity: u8,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Help,
    Run(CliArgs),
}

pub fn run() -> Result<()> {
    let args = match parse_args(env::args().skip(1))? {
        Command::Help => {
            print!("{HELP}");
            return Ok(());
        }
        Command::Run(args) => args,
    };
    crate::log::init(args.level());

    let catalog_path = args
        .catalog
        .clone()
        .ok_or_else(|| eyre!("No catalog given (try --help)"))?;
    let opts = args.run_options(&catalog_path);

    let catalog = load_catalog(&catalog_path, opts.homepage_column.as_deref())?;
    info!("Loaded {} records from {}", catalog.len(), catalog_path.display());

    let fetch = HttpFetch::new(opts.timeout);
    let mut progress = ConsoleProgress::default();
    let report = runner::run(&opts, &catalog, &fetch, None, Some(&mut progress))?;
    print_summary(&report);
    Ok(())
}

pub fn parse_args<I: IntoIterator<Item = String>>(argv: I) -> Result<Command> {
    let mut args = argv.into_iter();
    let mut cli = CliArgs::default();

    while let Some(a) = args.next() {
        let mut value = || args.next().ok_or_else(|| eyre!("Missing value for {a}"));
        match a.as_str() {
            "-c" | "--catalog" => cli.catalog = Some(PathBuf::from(value()?)),
            "--listing" => cli.listing = Some(value()?),
            "--category" => cli.category = Some(value()?),
            "--auto-category" => cli.auto_category = true,
            "--directory-url" => cli.directory_url = Some(value()?),
            "-o" | "--out" => cli.out = Some(PathBuf::from(value()?)),
            "--naming" => {
                cli.compact = match value()?.to_ascii_lowercase().as_str() {
                    "hyphen" | "hyphenated" => false,
                    "compact" => true,
                    other => bail!("Unknown naming style: {other}"),
                };
            }
            "--with-category" => cli.with_category = true,
            "--overwrite" => cli.overwrite = true,
            "--strict" => cli.strict = true,
            "--workers" => cli.workers = Some(value()?.parse()?),
            "--max-pages" => cli.max_pages = Some(value()?.parse()?),
            "--url-column" => cli.url_column = Some(value()?),
            "--service" => {
                let template = value()?;
                if !template.contains("{domain}") {
                    bail!("--service template needs a {{domain}} placeholder: {template}");
                }
                cli.services.push(template);
            }
            "--report" => cli.report = Some(PathBuf::from(value()?)),
            "--timeout" => cli.timeout_secs = Some(value()?.parse()?),
            "-v" | "--verbose" => cli.verbosity += 1,
            "-vv" => cli.verbosity += 2,
            "-h" | "--help" => return Ok(Command::Help),
            other if other.starts_with('-') => bail!("Unknown arg: {other}"),
            path => {
                if cli.catalog.is_some() {
                    bail!("More than one catalog given: {path}");
                }
                cli.catalog = Some(PathBuf::from(path));
            }
        }
    }
    Ok(Command::Run(cli))
}

impl CliArgs {
    pub fn level(&self) -> LevelFilter {
        match self.verbosity {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    pub fn listing_entry(&self, catalog: &std::path::Path) -> ListingEntry {
        if let Some(url) = &self.listing {
            return ListingEntry::Url(url.clone());
        }
        let category = match &self.category {
            Some(c) => c.clone(),
            None if self.auto_category || self.directory_url.is_some() => category_from_catalog(catalog),
            None => return ListingEntry::None,
        };
        let url = self.directory_url.clone().unwrap_or_else(|| s!(DIRECTORY_URL));
        ListingEntry::Directory { url, category }
    }

    pub fn run_options(&self, catalog: &std::path::Path) -> RunOptions {
        let mut opts = RunOptions {
            out_dir: self.out.clone().unwrap_or_else(|| default_out_dir(catalog)),
            listing: self.listing_entry(catalog),
            max_pages: self.max_pages,
            report: self.report.clone(),
            homepage_column: self.url_column.clone(),
            ..RunOptions::default()
        };
        opts.naming.style = if self.compact { SlugStyle::Compact } else { SlugStyle::Hyphenated };
        opts.naming.with_category = self.with_category;
        opts.naming.collision = if self.overwrite { Collision::Overwrite } else { Collision::AutoUnique };
        if self.strict {
            opts.image = ImagePolicy::strict();
        }
        opts.services = vec![s!(FAVICON_SERVICE)];
        opts.services.extend(self.services.iter().cloned());
        if let Some(w) = self.workers {
            opts.workers = w;
        }
        if let Some(secs) = self.timeout_secs {
            opts.timeout = Duration::from_secs(secs.max(1));
        }
        opts
    }
}

/// Prints one line per finished record.
#[derive(Default)]
struct ConsoleProgress {
    total: usize,
    done: usize,
}

impl Progress for ConsoleProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
    }

    fn log(&mut self, msg: &str) {
        info!("{msg}");
    }

    fn item_done(&mut self, disposition: &Disposition) {
        self.done += 1;
        let title = disposition.record().label();
        match disposition.path() {
            Some(path) => println!(
                "[{}/{}] {title} → {} ({})",
                self.done,
                self.total,
                disposition.label(),
                path.display()
            ),
            None => println!("[{}/{}] {title} → not found", self.done, self.total),
        }
    }
}

fn print_summary(report: &RunReport) {
    let t = &report.tally;
    println!();
    println!("Records:   {}", t.total);
    if report.pages_scanned > 0 {
        println!("Pages:     {}", report.pages_scanned);
    }
    println!("Listing:   {}", t.listing);
    for kind in CASCADE {
        println!("{:<19} {}", join!(kind.label(), ":"), t.count(kind));
    }
    println!("Not found: {}", t.not_found);
    if t.superseded > 0 {
        println!("Duplicate: {}", t.superseded);
    }
    println!("Elapsed:   {}", crate::log::elapsed());
    println!("Output:    {}", report.out_dir.display());
}
