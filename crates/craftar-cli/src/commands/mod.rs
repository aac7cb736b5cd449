//! Subcommand implementations.

mod collection;
mod delete;
mod get;
mod image;
mod item;
mod list;
mod search;
mod sync;
mod token;

use anyhow::{Context as _, Result};
use clap::Subcommand;

use craftar::resource::validate;
use craftar::{Identifier, ResourceKind};

use crate::settings::Context;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List resources of a kind
    List(list::ListArgs),

    /// Fetch a single resource
    Get(get::GetArgs),

    /// Delete a resource
    Delete(delete::DeleteArgs),

    /// Collection operations
    Collection(collection::CollectionCommand),

    /// Item operations
    Item(item::ItemCommand),

    /// Reference image operations
    Image(image::ImageCommand),

    /// Collection token operations
    Token(token::TokenCommand),

    /// Run a visual search with a query image
    Search(search::SearchArgs),

    /// Request the bundle for an app version
    Sync(sync::SyncArgs),
}

pub async fn handle(cmd: Command, ctx: &Context) -> Result<()> {
    match cmd {
        Command::List(args) => list::run(args, ctx).await,
        Command::Get(args) => get::run(args, ctx).await,
        Command::Delete(args) => delete::run(args, ctx).await,
        Command::Collection(cmd) => collection::handle(cmd, ctx).await,
        Command::Item(cmd) => item::handle(cmd, ctx).await,
        Command::Image(cmd) => image::handle(cmd, ctx).await,
        Command::Token(cmd) => token::handle(cmd, ctx).await,
        Command::Search(args) => search::run(args, ctx).await,
        Command::Sync(args) => sync::run(args, ctx).await,
    }
}

/// Resolve a kind name against the configured API surface.
fn kind(ctx: &Context, name: &str) -> Result<ResourceKind> {
    validate::kind_name(ctx.config.surface, name).context("Invalid resource kind")
}

fn identifier(kind: ResourceKind, value: &str) -> Result<Identifier> {
    Identifier::new(kind, value).with_context(|| format!("Invalid {kind} identifier"))
}
