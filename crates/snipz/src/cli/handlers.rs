use super::render::{
    render_folder, render_hits, render_persist_warning, render_snippet, render_tree,
};
use super::setup::{parse_folder_path, Cli, Commands};
use crate::logging::init_logging;
use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use snipzapp::api::{Response, SnipzApi};
use snipzapp::commands::{
    CreateRequest, DeleteRequest, EditRequest, FolderRequest, SearchRequest,
};
use snipzapp::config::{self, SnipzConfig};
use snipzapp::store::{FsBackend, StorageBackend, StoreOptions};
use std::io::Read;
use std::path::PathBuf;
use tracing::debug;

struct AppContext {
    api: SnipzApi<FsBackend>,
    config: SnipzConfig,
    data_dir: PathBuf,
    json: bool,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let data_dir = match cli.data_dir {
        Some(dir) => dir,
        None => config::data_dir()?,
    };
    let config = SnipzConfig::load(&data_dir)?;
    debug!(data_dir = %data_dir.display(), ?config, "configuration loaded");

    let backend = FsBackend::new(data_dir.clone()).with_file_name(&config.file_name);
    let api = SnipzApi::open(backend, StoreOptions::from(&config))
        .with_context(|| format!("Failed to open snippets in {}", data_dir.display()))?;

    let ctx = AppContext {
        api,
        config,
        data_dir,
        json: cli.json,
    };

    let outcome = match cli.command.unwrap_or(Commands::List) {
        Commands::List => handle_list(&ctx),
        Commands::Create { name, body, folder } => handle_create(&ctx, name, body, folder),
        Commands::Edit {
            snippet,
            name,
            body,
            folder,
        } => handle_edit(&ctx, snippet, name, body, folder),
        Commands::Delete { snippet } => handle_delete(&ctx, snippet),
        Commands::Mkdir { name, folder } => handle_mkdir(&ctx, name, folder),
        Commands::Search { term } => handle_search(&ctx, term),
        Commands::Export { output, compact } => handle_export(&ctx, output, compact),
        Commands::Config { template } => handle_config(&ctx, template),
        Commands::Message { json } => handle_message(&ctx, json),
    };

    ctx.api.close()?;
    outcome
}

fn read_stdin() -> Result<String> {
    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .context("Failed to read stdin")?;
    Ok(buf)
}

/// Prints the response and turns a failed one into an error.
fn finish(
    ctx: &AppContext,
    response: Response,
    render: impl FnOnce(&Response) -> String,
) -> Result<()> {
    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else if response.success {
        print!("{}", render(&response));
    }
    if let Some(message) = &response.persist_error {
        eprint!("{}", render_persist_warning(message));
    }
    if !response.success {
        bail!(response.error.unwrap_or_else(|| "request failed".to_string()));
    }
    Ok(())
}

fn handle_list(ctx: &AppContext) -> Result<()> {
    let response = ctx.api.list();
    finish(ctx, response, |r| render_tree(r.entries.as_deref().unwrap_or_default()))
}

fn handle_create(
    ctx: &AppContext,
    name: String,
    body: Option<String>,
    folder: Option<String>,
) -> Result<()> {
    let body = match body {
        Some(body) => body,
        None => read_stdin()?,
    };
    let request = CreateRequest::new(name, body)
        .in_folder(folder.as_deref().map(parse_folder_path).unwrap_or_default());
    let response = ctx.api.create_snippet(&request);
    finish(ctx, response, |r| {
        r.snippet
            .as_ref()
            .map(|s| render_snippet("Created", s))
            .unwrap_or_default()
    })
}

fn handle_edit(
    ctx: &AppContext,
    snippet: String,
    name: Option<String>,
    body: Option<String>,
    folder: Option<String>,
) -> Result<()> {
    let request = EditRequest {
        snippet_id: Some(snippet),
        name,
        body,
        folder_path: folder.as_deref().map(parse_folder_path),
    };
    let response = ctx.api.edit_snippet(&request);
    finish(ctx, response, |r| {
        r.snippet
            .as_ref()
            .map(|s| render_snippet("Updated", s))
            .unwrap_or_default()
    })
}

fn handle_delete(ctx: &AppContext, snippet: String) -> Result<()> {
    let response = ctx.api.delete_snippet(&DeleteRequest::new(snippet.clone()));
    finish(ctx, response, |_| format!("Deleted {}\n", snippet))
}

fn handle_mkdir(ctx: &AppContext, name: String, folder: Option<String>) -> Result<()> {
    let request = FolderRequest::new(name)
        .in_folder(folder.as_deref().map(parse_folder_path).unwrap_or_default());
    let response = ctx.api.create_folder(&request);
    finish(ctx, response, |r| {
        r.folder.as_ref().map(render_folder).unwrap_or_default()
    })
}

fn handle_search(ctx: &AppContext, term: String) -> Result<()> {
    let response = ctx.api.search(&SearchRequest { term });
    finish(ctx, response, |r| render_hits(r.hits.as_deref().unwrap_or_default()))
}

fn handle_export(ctx: &AppContext, output: Option<PathBuf>, compact: bool) -> Result<()> {
    let document = ctx.api.store().export(!compact)?;
    match output {
        Some(path) => {
            std::fs::write(&path, document)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Exported to {}", path.display());
        }
        None => println!("{}", document),
    }
    Ok(())
}

fn handle_config(ctx: &AppContext, template: bool) -> Result<()> {
    if template {
        print!("{}", SnipzConfig::template());
        return Ok(());
    }
    println!("data_dir = {}", ctx.data_dir.display());
    println!("store = {}", ctx.api.store().backend().location().display());
    let values = serde_json::to_value(&ctx.config)?;
    let table = values
        .as_object()
        .ok_or_else(|| anyhow!("configuration is not a table"))?;
    for (key, value) in table {
        println!("{} = {}", key, value);
    }
    Ok(())
}

fn handle_message(ctx: &AppContext, json: Option<String>) -> Result<()> {
    let raw = match json {
        Some(raw) => raw,
        None => read_stdin()?,
    };
    let message: serde_json::Value =
        serde_json::from_str(&raw).context("Message is not valid JSON")?;
    let response = ctx.api.handle_message(message);
    println!("{}", serde_json::to_string_pretty(&response)?);
    if !response.success {
        bail!(response.error.unwrap_or_else(|| "request failed".to_string()));
    }
    Ok(())
}
