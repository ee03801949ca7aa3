use std::{fs, path::PathBuf, process::ExitCode};

use anyhow::{Context, anyhow};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use alchemist::{
    catalog,
    config::CellarConfig,
    persist::{RecipeStore, sqlite::SqliteRecipeStore},
    service::{Cellar, RecipeView},
    session::Session,
    types::RecipeName,
};

#[derive(Parser)]
#[command(name = "alchemist", version, about = "Brew recipes of reversible text transforms")]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Recipe directory (overrides the configuration)
    #[arg(long, global = true, value_name = "DIR", conflicts_with = "sqlite")]
    dir: Option<PathBuf>,

    /// Keep recipes in a SQLite database instead of a directory
    #[arg(long, global = true, value_name = "DB")]
    sqlite: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the available transforms
    Catalog,
    /// Validate a recipe name, or generate one
    Create {
        name: Option<String>,
        /// Seed for the name generator
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Evaluate and print a recipe
    Show { name: String },
    /// Set (or clear) the base value
    Base { name: String, value: Option<String> },
    /// Append a step, e.g. `add potion base64 encode`
    Add {
        name: String,
        transform: String,
        method: String,
    },
    /// Remove the step at a 1-based position
    Rm { name: String, position: usize },
    /// Move a step between 1-based positions
    Mv { name: String, from: usize, to: usize },
    /// Write the recipe to a portable file
    Export {
        name: String,
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Import a recipe file named `<name>.<extension>`
    Import { file: PathBuf },
    /// Delete a stored recipe
    Delete { name: String },
    /// List stored recipes
    List,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match dispatch(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn dispatch(cli: Cli) -> anyhow::Result<()> {
    let mut config = CellarConfig::load(cli.config.as_deref())?;
    if let Some(dir) = cli.dir {
        config.recipe_dir = dir;
    }

    match cli.sqlite {
        Some(db) => {
            let store = SqliteRecipeStore::open(&db)
                .with_context(|| format!("opening {}", db.display()))?;
            run(&mut Cellar::new(store, config), cli.command)
        }
        None => run(&mut Cellar::open_dir(config)?, cli.command),
    }
}

fn run<S: RecipeStore>(cellar: &mut Cellar<S>, command: Command) -> anyhow::Result<()> {
    let mut session = Session::new();

    match command {
        Command::Catalog => {
            for entry in catalog::entries() {
                println!(
                    "{:<8} {:<9} {} / {}",
                    entry.id.slug(),
                    entry.label,
                    entry.forward.name,
                    entry.inverse.name
                );
            }
        }
        Command::Create { name, seed } => {
            let mut names = cellar.name_generator(seed);
            let name = cellar.create(name.as_deref(), &mut names)?;
            println!("{name}");
        }
        Command::Show { name } => {
            let view = cellar.show(&mut session, &RecipeName::new(name)?)?;
            print_view(&view);
        }
        Command::Base { name, value } => {
            let name = RecipeName::new(name)?;
            let mut recipe = cellar.get_or_create(&name)?;
            cellar.set_base_value(&mut recipe, value)?;
            print_view(&cellar.show(&mut session, &name)?);
        }
        Command::Add {
            name,
            transform,
            method,
        } => {
            let name = RecipeName::new(name)?;
            let step = catalog::resolve(&transform, &method)?;
            let mut recipe = cellar.get_or_create(&name)?;
            cellar.append_step(&mut recipe, step)?;
            print_view(&cellar.show(&mut session, &name)?);
        }
        Command::Rm { name, position } => {
            let name = RecipeName::new(name)?;
            let mut recipe = cellar.get_or_create(&name)?;
            cellar.delete_step(&mut recipe, position)?;
            print_view(&cellar.show(&mut session, &name)?);
        }
        Command::Mv { name, from, to } => {
            let name = RecipeName::new(name)?;
            let mut recipe = cellar.get_or_create(&name)?;
            cellar.move_step(&mut recipe, from, to)?;
            print_view(&cellar.show(&mut session, &name)?);
        }
        Command::Export { name, output } => {
            let name = RecipeName::new(name)?;
            let recipe = cellar.get_or_create(&name)?;
            let bytes = cellar.export_bytes(&recipe)?;
            let path = output.unwrap_or_else(|| PathBuf::from(cellar.export_file_name(&name)));
            fs::write(&path, bytes).with_context(|| format!("writing {}", path.display()))?;
            println!("{}", path.display());
        }
        Command::Import { file } => {
            let bytes = fs::read(&file).with_context(|| format!("reading {}", file.display()))?;
            let filename = file
                .file_name()
                .and_then(|n| n.to_str())
                .ok_or_else(|| anyhow!("{} has no usable file name", file.display()))?;
            let recipe = cellar.import_file(&mut session, filename, &bytes)?;
            println!("imported {}", recipe.name);
        }
        Command::Delete { name } => {
            let name = RecipeName::new(name)?;
            if !cellar.delete(&name)? {
                println!("no stored recipe named {name}");
            }
        }
        Command::List => {
            for name in cellar.names()? {
                println!("{name}");
            }
        }
    }

    Ok(())
}

fn print_view(view: &RecipeView) {
    let recipe = &view.recipe;
    let failed = view.evaluation.failed_step();

    println!("recipe: {}", recipe.name);
    println!("base:   {}", recipe.base_value.as_deref().unwrap_or("(none)"));
    for (idx, label) in view.step_labels().iter().enumerate() {
        let marker = if failed == Some(idx + 1) { "  <- failed" } else { "" };
        println!("{:>4}. {label}{marker}", idx + 1);
    }
    if let Some(failure) = &view.evaluation.failure {
        println!("step {} failed: {}", failure.position, failure.source);
    }
    println!("potion: {}", view.evaluation.output.as_deref().unwrap_or("(none)"));
}
