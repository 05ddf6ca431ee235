use anyhow::bail;
use anyhow::Context as _;
use anyhow::Result;
use clap::Parser;
use console::style;

use kubeswitch_cli::cluster::ClusterNamespaces;
use kubeswitch_cli::picker;
use kubeswitch_cli::setup_tracing;
use kubeswitch_config::NamespaceManager;

/// Switch the namespace of the current Kubernetes context.
#[derive(Debug, Parser)]
#[command(
    name = "kubectl-ns",
    version,
    about = "Switch between Kubernetes namespaces",
    long_about = "With no arguments, shows the current namespace and offers an interactive \
menu over the namespaces fetched from the cluster. With a namespace argument, switches \
directly to that namespace.\n\n\
Multiple KUBECONFIG files (e.g. KUBECONFIG=file1:file2) are merged automatically; \
the first file owns the mutated context entry."
)]
struct Cli {
    /// Namespace to switch to; prompts interactively when omitted
    namespace: Option<String>,

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
    let mut manager = NamespaceManager::load().context("failed to load kubeconfig")?;
    let current = manager.current_namespace().to_owned();

    let target = match cli.namespace {
        Some(name) => name,
        None => {
            println!("Current namespace: {}", style(&current).cyan());
            // a cluster we cannot reach aborts the command; there is no
            // fallback to manual entry
            let namespaces = manager
                .list_from_cluster(&ClusterNamespaces)
                .context("failed to fetch namespaces from cluster")?;
            if namespaces.is_empty() {
                bail!("no namespaces visible in cluster");
            }
            match picker::pick("Select namespace", &namespaces, &current)? {
                Some(choice) => choice,
                None => bail!("selection cancelled"),
            }
        }
    };

    if target == current {
        println!("Already on namespace {}", style(&target).green());
        return Ok(());
    }

    manager
        .switch_to(&target)
        .context("failed to switch namespace")?;
    println!(
        "Switched to namespace {} in context {}",
        style(&target).green().bold(),
        style(manager.current_context()).cyan()
    );
    Ok(())
}
