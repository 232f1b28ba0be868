use clap::Parser;
use colored::Colorize;
use stratus::{Request, default_registry, dispatch};
use stratus_cloud::{CloudError, Target, Template};

#[derive(Parser)]
#[command(name = "stratus")]
#[command(about = "Describe cloud resources across providers", long_about = None)]
#[command(version)]
struct Cli {
    /// Provider name (gcp, aws)
    #[arg(short, long, env = "STRATUS_PROVIDER", default_value = stratus::DEFAULT_PROVIDER)]
    provider: String,

    /// Credential profile (empty = resolve from the environment)
    #[arg(long, env = "STRATUS_PROFILE", default_value = "")]
    profile: String,

    /// Region (empty = resolve from the environment)
    #[arg(short, long, env = "STRATUS_REGION", default_value = "")]
    region: String,

    /// Template to describe, e.g. `cloud`, `network:prod`, `subnet:web-a` or JSON
    #[arg(short, long)]
    describe: Option<Template>,

    /// Template to plan
    #[arg(long)]
    plan: Option<Template>,

    /// Template to apply
    #[arg(long)]
    apply: Option<Template>,

    /// Resource name or template to destroy
    #[arg(long)]
    destroy: Option<Target>,

    /// List the registered providers and exit
    #[arg(long)]
    providers: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // stdout carries the JSON result, logs go to stderr
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let registry = default_registry();

    if cli.providers {
        for name in registry.names() {
            println!("{}", name);
        }
        return Ok(());
    }

    let request = Request {
        provider: cli.provider,
        profile: cli.profile,
        region: cli.region,
        describe: cli.describe,
        plan: cli.plan,
        apply: cli.apply,
        destroy: cli.destroy,
    };

    match dispatch(&registry, request).await {
        Ok(outcome) => {
            let template = outcome.into_template();
            println!("{}", serde_json::to_string_pretty(&template)?);
            Ok(())
        }
        Err(e) => {
            report(&e, &registry);
            std::process::exit(1);
        }
    }
}

fn report(err: &CloudError, registry: &stratus::Registry) {
    eprintln!("{} {}", "Error:".red().bold(), err);

    match err {
        CloudError::UnrecognizedProvider(_) => {
            let names: Vec<_> = registry.names().collect();
            eprintln!();
            eprintln!("{} {}", "Known providers:".yellow(), names.join(", "));
        }
        CloudError::MissingRegion { .. } => {
            eprintln!();
            eprintln!(
                "{}",
                "Hint: pass --region <region> or set STRATUS_REGION".yellow()
            );
        }
        _ => {}
    }
}
