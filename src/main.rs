use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use krater::adapters::console_notifier::ConsoleNotifier;
use krater::adapters::container_client::ContainerClient;
use krater::adapters::provisioner::RestCacheWriter;
use krater::application::create_cache::{CreateCacheWorkflow, SubmitOutcome};
use krater::cli::{Cli, Command};
use krater::config::Settings;
use krater::domain::validation::FieldValidity;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let settings = Settings::new_with_cli(&cli)?;
    let client = ContainerClient::new(settings.connection.endpoint.as_str(), settings.timeout())?;

    match cli.command {
        Command::Managers => list_managers(&client).await?,
        Command::Manager { name } => show_manager(&client, &name).await?,
        Command::Templates => {
            let container = resolve_container(&settings, &client).await?;
            list_templates(&client, &container).await?;
        }
        Command::Create {
            cache_name,
            template,
            file,
        } => {
            let container = resolve_container(&settings, &client).await?;
            let created =
                create_cache(&settings, client, &container, &cache_name, template, file).await?;
            if !created {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

/// The container to operate on: configured explicitly, or the first one the
/// cluster reports.
async fn resolve_container(
    settings: &Settings,
    client: &ContainerClient,
) -> anyhow::Result<String> {
    if let Some(container) = &settings.console.container {
        return Ok(container.clone());
    }
    let names = client.cache_manager_names().await?;
    names
        .into_iter()
        .next()
        .ok_or_else(|| anyhow::anyhow!("the cluster reports no cache managers"))
}

async fn list_managers(client: &ContainerClient) -> anyhow::Result<()> {
    for manager in client.list_cache_managers().await? {
        println!(
            "{}  cluster={}  size={}  status={}{}",
            manager.name,
            manager.cluster_name,
            manager.cluster_size,
            manager.cache_manager_status,
            if manager.coordinator {
                "  (coordinator)"
            } else {
                ""
            }
        );
    }
    Ok(())
}

async fn show_manager(client: &ContainerClient, name: &str) -> anyhow::Result<()> {
    let manager = client.cache_manager(name).await?;
    println!("name:      {}", manager.name);
    println!("cluster:   {}", manager.cluster_name);
    println!("size:      {}", manager.cluster_size);
    println!("status:    {}", manager.cache_manager_status);
    println!("addresses: {}", manager.physical_addresses.join(", "));
    println!("caches:    {}", manager.defined_caches.join(", "));
    println!("templates: {}", manager.cache_configuration_names.join(", "));
    Ok(())
}

async fn list_templates(client: &ContainerClient, container: &str) -> anyhow::Result<()> {
    let templates = client.configuration_templates(container).await?;
    if templates.is_empty() {
        println!("no configuration templates in {}", container);
    } else {
        for template in templates {
            println!("{}", template.name);
        }
    }
    Ok(())
}

/// Run one creation workflow. Returns whether the cache was created; the
/// notifier has already surfaced the server's message either way.
async fn create_cache(
    settings: &Settings,
    client: ContainerClient,
    container: &str,
    cache_name: &str,
    template: Option<String>,
    file: Option<PathBuf>,
) -> anyhow::Result<bool> {
    let writer = Arc::new(RestCacheWriter::new(
        settings.connection.endpoint.as_str(),
        settings.timeout(),
    )?);
    let notifier = Arc::new(ConsoleNotifier);
    let mut workflow = CreateCacheWorkflow::new(
        container,
        Arc::new(client),
        writer,
        notifier.clone(),
        notifier,
    );

    workflow.load_templates().await;

    match (template, file) {
        (Some(template), None) => workflow.select_template(&template)?,
        (None, Some(path)) => {
            let document = std::fs::read_to_string(&path)?;
            workflow.open_document_panel();
            workflow.set_document_text(&document);
        }
        // Neither flag: submission fails validation below, with the same
        // per-field message an empty form gets.
        (None, None) => {}
        // clap already rejects this combination.
        (Some(_), Some(_)) => anyhow::bail!("--template and --file are mutually exclusive"),
    }

    match workflow.submit(cache_name).await? {
        SubmitOutcome::Created { .. } => Ok(true),
        SubmitOutcome::Rejected { .. } => Ok(false),
        SubmitOutcome::ValidationFailed {
            name,
            configuration,
        } => {
            if name == FieldValidity::Invalid {
                eprintln!("Cache name is mandatory");
            }
            if configuration == FieldValidity::Invalid {
                eprintln!("Either choose a template or provide a configuration");
            }
            Ok(false)
        }
    }
}
