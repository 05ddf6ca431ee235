use anyhow::bail;
use anyhow::Context as _;
use anyhow::Result;
use clap::Parser;
use console::style;

use kubeswitch_cli::picker;
use kubeswitch_cli::setup_tracing;
use kubeswitch_config::ContextManager;

/// Switch between Kubernetes contexts.
#[derive(Debug, Parser)]
#[command(
    name = "kubectl-ctx",
    version,
    about = "Switch between Kubernetes contexts",
    long_about = "With no arguments, shows the current context and offers an interactive \
menu to select a new one. With a context name argument, switches directly to that context.\n\n\
Multiple KUBECONFIG files (e.g. KUBECONFIG=file1:file2) are merged automatically; \
the first file owns the current-context field."
)]
struct Cli {
    /// Context to switch to; prompts interactively when omitted
    context: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

fn main() {
    let cli = Cli::parse();
    setup_tracing(cli.verbose);
    if cli.no_color {
        console::set_colors_enabled(false);
    }

    if let Err(err) = run(cli) {
        eprintln!("{} {err:#}", style("error:").red().bold());
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut manager = ContextManager::load().context("failed to load kubeconfig")?;

    let contexts: Vec<String> = manager
        .context_names()
        .into_iter()
        .map(str::to_owned)
        .collect();
    if contexts.is_empty() {
        bail!("no contexts found in kubeconfig");
    }

    let current = manager.current_context().to_owned();

    let target = match cli.context {
        Some(name) => {
            manager.validate(&name)?;
            name
        }
        None => {
            if current.is_empty() {
                eprintln!("{}", style("No current context set").yellow());
            } else {
                println!("Current context: {}", style(&current).cyan());
            }
            match picker::pick("Select context", &contexts, &current)? {
                Some(choice) => choice,
                None => bail!("selection cancelled"),
            }
        }
    };

    if target == current {
        println!("Already on context {}", style(&target).green());
        return Ok(());
    }

    manager
        .switch_to(&target)
        .context("failed to switch context")?;
    println!("Switched to context {}", style(&target).green().bold());
    Ok(())
}
