//! CLI entry point for remtree

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand, ValueEnum};
use termcolor::{ColorChoice, StandardStream};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use remtree::query::{
    EXACT_OWNER_KEY, EXACT_TITLE_KEY, MATCH_MIME_KEY, MATCH_OWNER_KEY, NOT_OWNER_KEY,
    SKIP_MIME_KEY, SORT_KEY,
};
use remtree::{
    BusyIndicator, ListError, ListOptions, ListReport, Lister, MemoryStore, Meta, NoopIndicator,
    Spinner, TerminalPrompter, TypeMask,
};

/// Color output mode
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ColorMode {
    /// Auto-detect based on terminal and environment
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Determine whether to use color output based on mode and environment.
fn should_use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            // https://no-color.org/
            if std::env::var_os("NO_COLOR").is_some() {
                return false;
            }
            if std::env::var_os("FORCE_COLOR").is_some() {
                return true;
            }
            if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
                return false;
            }
            std::io::stdout().is_terminal()
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "remtree")]
#[command(about = "List and search a remote file tree, depth by depth")]
#[command(version)]
struct Cli {
    /// Snapshot of the remote tree (JSON)
    #[arg(long, global = true, value_name = "FILE", default_value = "remtree.json")]
    store: PathBuf,

    #[command(flatten)]
    listing: ListingArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List remote paths down to the requested depth
    List {
        /// Treat the roots as remote ids instead of paths
        #[arg(long)]
        id: bool,

        /// Remote paths or ids to list (default: the root)
        roots: Vec<String>,
    },

    /// List entries whose names contain any of the terms
    Matches {
        /// Only search below this remote directory
        #[arg(long, default_value = "")]
        path: String,

        #[arg(required = true)]
        terms: Vec<String>,
    },

    /// List entries shared with you
    Shared {
        /// Remote paths to look under (default: the root)
        roots: Vec<String>,
    },
}

#[derive(Args, Debug)]
struct ListingArgs {
    /// Descend N levels; negative means no limit
    #[arg(short = 'L', long, global = true, default_value_t = 1, allow_negative_numbers = true)]
    depth: i64,

    /// Print paths only
    #[arg(short, long, global = true)]
    minimal: bool,

    /// Print sizes in bytes next to paths and nothing else
    #[arg(long = "du", global = true)]
    disk_usage: bool,

    /// Show owner names
    #[arg(long, global = true)]
    owners: bool,

    /// Show the current version number
    #[arg(long, global = true)]
    show_version: bool,

    /// Only entries shared with you
    #[arg(long, global = true)]
    shared: bool,

    /// List the trash instead
    #[arg(long, global = true)]
    trashed: bool,

    /// Only starred entries
    #[arg(long, global = true)]
    starred: bool,

    /// List team drives
    #[arg(long, global = true)]
    team_drives: bool,

    /// List directories only
    #[arg(short = 'd', long, global = true)]
    dirs_only: bool,

    /// List files only
    #[arg(long, global = true)]
    files_only: bool,

    /// Include dot-files
    #[arg(long, global = true)]
    hidden: bool,

    /// Entries requested per page
    #[arg(long, global = true, default_value_t = remtree::remote::DEFAULT_PAGE_SIZE)]
    page_size: u32,

    /// Never ask before descending another level
    #[arg(long, global = true)]
    no_prompt: bool,

    /// Sort keys, comma separated: name, size, modtime, version, type, id
    /// (append _r to reverse)
    #[arg(long, global = true, value_name = "KEYS")]
    sort: Vec<String>,

    /// Skip entries with this mime type (repeatable)
    #[arg(long, global = true)]
    skip_mime: Vec<String>,

    /// Only entries with this mime type (repeatable)
    #[arg(long, global = true)]
    match_mime: Vec<String>,

    /// Only entries with this exact title (repeatable)
    #[arg(long, global = true)]
    exact_title: Vec<String>,

    /// Only entries owned by exactly this owner (repeatable)
    #[arg(long, global = true)]
    exact_owner: Vec<String>,

    /// Only entries whose owner contains this text (repeatable)
    #[arg(long, global = true)]
    match_owner: Vec<String>,

    /// Skip entries owned by this owner (repeatable)
    #[arg(long, global = true)]
    exclude_owner: Vec<String>,

    /// Ignore entries matching pattern (can be used multiple times)
    #[arg(short = 'I', long, global = true)]
    ignore: Vec<String>,

    /// Control color output: auto, always, never
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: ColorMode,

    /// Log lookups and queries to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

impl ListingArgs {
    fn type_mask(&self) -> TypeMask {
        let mut mask = TypeMask::NONE;
        for (flag, on) in [
            (TypeMask::FOLDER, self.dirs_only),
            (TypeMask::NON_FOLDER, self.files_only),
            (TypeMask::MINIMAL, self.minimal),
            (TypeMask::SHARED, self.shared),
            (TypeMask::OWNERS, self.owners),
            (TypeMask::CURRENT_VERSION, self.show_version),
            (TypeMask::IN_TRASH, self.trashed),
            (TypeMask::STARRED, self.starred),
            (TypeMask::DISK_USAGE_ONLY, self.disk_usage),
            (TypeMask::TEAM_DRIVES, self.team_drives),
        ] {
            mask.set(flag, on);
        }
        mask
    }

    fn meta(&self) -> Option<Meta> {
        let mut meta = Meta::new();
        for (key, values) in [
            (SKIP_MIME_KEY, &self.skip_mime),
            (MATCH_MIME_KEY, &self.match_mime),
            (EXACT_TITLE_KEY, &self.exact_title),
            (EXACT_OWNER_KEY, &self.exact_owner),
            (MATCH_OWNER_KEY, &self.match_owner),
            (NOT_OWNER_KEY, &self.exclude_owner),
            (SORT_KEY, &self.sort),
        ] {
            if !values.is_empty() {
                meta.insert(key.to_string(), values.clone());
            }
        }
        (!meta.is_empty()).then_some(meta)
    }

    fn options(&self, sources: Vec<String>, path: String) -> ListOptions {
        ListOptions {
            sources,
            depth: self.depth,
            type_mask: self.type_mask(),
            in_trash: self.trashed,
            hidden: self.hidden,
            page_size: self.page_size,
            no_prompt: self.no_prompt,
            path,
            meta: self.meta(),
            ignore_patterns: self.ignore.clone(),
        }
    }
}

fn setup_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("remtree=debug,warn")
        } else {
            EnvFilter::new("remtree=warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .init();
}

fn or_root(roots: &[String]) -> Vec<String> {
    if roots.is_empty() {
        vec!["/".to_string()]
    } else {
        roots.to_vec()
    }
}

fn run(cli: &Cli) -> Result<ListReport, ListError> {
    let store = MemoryStore::load(&cli.store).map_err(|source| ListError::Lookup {
        locator: cli.store.display().to_string(),
        source,
    })?;

    let (sources, path) = match &cli.command {
        Command::List { roots, .. } | Command::Shared { roots } => (or_root(roots), String::new()),
        Command::Matches { path, terms } => (terms.clone(), path.clone()),
    };
    let options = cli.listing.options(sources, path);

    let color = if should_use_color(cli.listing.color) {
        ColorChoice::Always
    } else {
        ColorChoice::Never
    };
    let stdout = StandardStream::stdout(color);

    let busy: Box<dyn BusyIndicator> = if std::io::stderr().is_terminal() {
        let spinner = Spinner::new();
        spinner.set_message("listing");
        Box::new(spinner)
    } else {
        Box::new(NoopIndicator)
    };
    let prompter = if options.no_prompt {
        TerminalPrompter::disabled()
    } else {
        TerminalPrompter::new()
    };

    let mut lister = Lister::new(&store, &options, stdout)
        .with_indicator(busy.as_ref())
        .with_prompter(&prompter);

    match &cli.command {
        Command::List { id, .. } => lister.list(*id),
        Command::Matches { .. } => lister.list_matches(),
        Command::Shared { .. } => lister.list_shared(),
    }
}

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.listing.verbose);

    match run(&cli) {
        Ok(report) => debug!(
            roots = report.roots,
            rendered = report.rendered,
            missing = report.missing.len(),
            declined = report.declined,
            "done"
        ),
        Err(e) => {
            eprintln!("remtree: {}", e);
            process::exit(1);
        }
    }
}
