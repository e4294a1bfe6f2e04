use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tutorial_page::template::Viewport;
use tutorial_page::types::Manifest;
use tutorial_page::{config, generate, output, scan};

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "tutorial-page")]
#[command(about = "Static renderer for tutorial pages")]
#[command(long_about = "\
Static renderer for tutorial pages

Each markdown file under tutorials/ becomes a page with its contributors,
share links, view count, categories and a scrollspy table of contents.

Content structure:

  content/
  ├── config.toml                  # Site config (optional)
  ├── authors.toml                 # [[author]] entries: id, name, image
  ├── pageviews.json               # {\"/tutorials/<slug>\": count} (optional)
  ├── images/
  │   └── kubernetes.svg           # Featured images
  └── tutorials/
      ├── 010-feature-flags.md     # NNN- prefix orders files, dropped from the slug
      └── drafts/
          └── funnels-101.md       # Subdirectories are scanned too

Front matter (TOML between +++ lines):
  title           required
  description     optional, falls back to the first 150 characters of the body
  contributors    ids from authors.toml
  categories      alias: topics
  featured_image  path relative to the content directory

Run 'tutorial-page gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Directory for intermediate files (manifest)
    #[arg(long, default_value = ".tutorial-page-temp", global = true)]
    temp_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan content directory into a manifest
    Scan,
    /// Produce the HTML site from the manifest
    Generate,
    /// Run the full pipeline: scan → generate
    Build,
    /// Validate content directory without building
    Check,
    /// Print one tutorial page to stdout
    Render {
        /// Tutorial slug
        slug: String,
        /// Which sidebar layout to emit
        #[arg(long, value_enum, default_value_t = ViewportArg::Responsive)]
        viewport: ViewportArg,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

#[derive(Clone, Copy, ValueEnum)]
enum ViewportArg {
    /// Both layouts, switched by the breakpoint CSS
    Responsive,
    /// Collapsible table of contents only
    Mobile,
    /// Sidebar table of contents only
    Desktop,
}

impl From<ViewportArg> for Viewport {
    fn from(arg: ViewportArg) -> Self {
        match arg {
            ViewportArg::Responsive => Viewport::Responsive,
            ViewportArg::Mobile => Viewport::Mobile,
            ViewportArg::Desktop => Viewport::Desktop,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Scan => {
            let manifest = scan::scan(&cli.source)?;
            write_manifest(&manifest, &cli.temp_dir)?;
            output::print_scan_output(&manifest, &cli.source);
        }
        Command::Generate => {
            let manifest_path = cli.temp_dir.join("manifest.json");
            let manifest: Manifest =
                serde_json::from_str(&std::fs::read_to_string(&manifest_path)?)?;
            init_thread_pool(&manifest.config.processing);
            let report = generate::generate_site(&manifest, &cli.source, &cli.output)?;
            output::print_generate_output(&report);
        }
        Command::Build => {
            println!("==> Stage 1: Scanning {}", cli.source.display());
            let manifest = scan::scan(&cli.source)?;
            write_manifest(&manifest, &cli.temp_dir)?;
            output::print_scan_output(&manifest, &cli.source);

            println!("==> Stage 2: Generating HTML → {}", cli.output.display());
            init_thread_pool(&manifest.config.processing);
            let manifest_path = cli.temp_dir.join("manifest.json");
            let report = generate::generate(&manifest_path, &cli.source, &cli.output)?;
            output::print_generate_output(&report);

            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let manifest = scan::scan(&cli.source)?;
            output::print_scan_output(&manifest, &cli.source);
            println!("==> Content is valid");
        }
        Command::Render { slug, viewport } => {
            let manifest = scan::scan(&cli.source)?;
            print!("{}", generate::render_tutorial(&manifest, &slug, viewport.into())?);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

fn write_manifest(manifest: &Manifest, temp_dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    std::fs::create_dir_all(temp_dir)?;
    let json = serde_json::to_string_pretty(manifest)?;
    std::fs::write(temp_dir.join("manifest.json"), json)?;
    Ok(())
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores; the user can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
