use clap::{Parser, Subcommand};
use kiln_ui::content::{self, SiteContent};
use kiln_ui::session::Session;
use kiln_ui::validate::FormKind;
use kiln_ui::{config, output, render, script};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "kiln-ui")]
#[command(about = "Behavior core for a ceramics showcase page")]
#[command(long_about = "\
Behavior core for a ceramics showcase page

Renders the page markup, checks form input against the page's validation
rules, and replays scripted interactions against an in-memory page.

Behavior settings come from config.toml in the config directory (stock
defaults apply for anything not set). Page content comes from a TOML file;
without one a sample site is used.

Script steps (JSON array):
  {\"action\": \"click\",   \"target\": \".slider-arrow:1\"}
  {\"action\": \"input\",   \"target\": \"#name\", \"value\": \"Li Wei\"}
  {\"action\": \"submit\",  \"target\": \"#contactForm\"}
  {\"action\": \"scroll\",  \"y\": 640}
  {\"action\": \"enter\",   \"target\": \".banner-slider\"}
  {\"action\": \"leave\",   \"target\": \".banner-slider\"}
  {\"action\": \"advance\", \"ms\": 5000}

Run 'kiln-ui gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Directory holding config.toml
    #[arg(long, default_value = ".", global = true)]
    config: PathBuf,

    /// Site content file (TOML). Defaults to the built-in sample site
    #[arg(long, global = true)]
    content: Option<PathBuf>,

    /// Log debug detail to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render the page to <output>/index.html
    Render {
        #[arg(long, default_value = "dist")]
        output: PathBuf,
    },
    /// Check field values against a form's rules
    Validate {
        /// contact, login or register
        form: FormKind,
        /// Field value as id=value (repeatable)
        #[arg(long = "field", value_parser = parse_field)]
        fields: Vec<(String, String)>,
    },
    /// Replay a JSON interaction script against the page
    Simulate {
        script: PathBuf,
        /// Print the step reports as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn parse_field(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(id, value)| (id.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected id=value, got '{raw}'"))
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "kiln_ui=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_content(path: Option<&Path>) -> Result<SiteContent, content::ContentError> {
    match path {
        Some(path) => content::load_content(path),
        None => Ok(SiteContent::default()),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Render { output: out_dir } => {
            let site_config = config::load_config(&cli.config)?;
            let site = load_content(cli.content.as_deref())?;
            let path = render::render_site(&site, &site_config, &out_dir)?;
            output::print_render(&site, &path);
        }
        Command::Validate { form, fields } => {
            let verdict = form.rules().evaluate(|id| {
                fields
                    .iter()
                    .rev()
                    .find(|(field, _)| field == id)
                    .map(|(_, value)| value.clone())
                    .unwrap_or_default()
            });
            output::print_verdict(form, &verdict);
            if !verdict.is_valid() {
                std::process::exit(1);
            }
        }
        Command::Simulate {
            script: script_path,
            json,
        } => {
            let site_config = config::load_config(&cli.config)?;
            let site = load_content(cli.content.as_deref())?;
            let steps = script::load_script(&script_path)?;
            let mut session = Session::new(content::build_document(&site, &site_config), &site_config);
            let reports = script::run(&mut session, &steps)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&reports)?);
            } else {
                output::print_simulation(&reports, site.slides.len());
            }
            session.teardown();
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
