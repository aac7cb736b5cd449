//! Item subcommands.

use anyhow::{Context as _, Result, bail};
use clap::{Args, Subcommand};
use serde_json::Value;

use craftar::{ItemChanges, NewItem, ResourceKind};

use crate::output;
use crate::settings::Context;

#[derive(Args, Debug)]
pub struct ItemCommand {
    #[command(subcommand)]
    pub command: ItemSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ItemSubcommand {
    /// Create an item in a collection
    Create(CreateItemArgs),

    /// Change fields of an item
    Update(UpdateItemArgs),
}

#[derive(Args, Debug)]
pub struct CreateItemArgs {
    /// Parent collection identifier
    #[arg(long)]
    pub collection: String,

    /// Item name
    #[arg(long)]
    pub name: String,

    #[command(flatten)]
    pub fields: ItemFields,
}

#[derive(Args, Debug)]
pub struct UpdateItemArgs {
    /// Item identifier
    pub id: String,

    /// New item name
    #[arg(long)]
    pub name: Option<String>,

    #[command(flatten)]
    pub fields: ItemFields,
}

/// Optional item fields shared by create and update.
#[derive(Args, Debug)]
pub struct ItemFields {
    /// URL returned when the item is recognized
    #[arg(long)]
    pub url: Option<String>,

    /// Free-form custom data
    #[arg(long)]
    pub custom: Option<String>,

    /// Whether the item can be tracked
    #[arg(long)]
    pub trackable: Option<bool>,

    /// AR content as a JSON document
    #[arg(long, value_name = "JSON")]
    pub content: Option<String>,
}

impl ItemFields {
    fn content(&self) -> Result<Option<Value>> {
        self.content
            .as_deref()
            .map(|raw| serde_json::from_str(raw).context("Invalid JSON in --content"))
            .transpose()
    }
}

pub async fn handle(cmd: ItemCommand, ctx: &Context) -> Result<()> {
    match cmd.command {
        ItemSubcommand::Create(args) => create(args, ctx).await,
        ItemSubcommand::Update(args) => update(args, ctx).await,
    }
}

async fn create(args: CreateItemArgs, ctx: &Context) -> Result<()> {
    let collection = super::identifier(ResourceKind::Collection, &args.collection)?;
    let item = NewItem {
        name: args.name,
        content: args.fields.content()?,
        url: args.fields.url,
        custom: args.fields.custom,
        trackable: args.fields.trackable,
    };

    let created = ctx
        .resources()?
        .create_item(&collection, &item)
        .await
        .context("Failed to create item")?;

    super::collection::report_created(ResourceKind::Item, created)
}

async fn update(args: UpdateItemArgs, ctx: &Context) -> Result<()> {
    let id = super::identifier(ResourceKind::Item, &args.id)?;
    let changes = ItemChanges {
        name: args.name,
        content: args.fields.content()?,
        url: args.fields.url,
        custom: args.fields.custom,
        trackable: args.fields.trackable,
    };

    let accepted = ctx
        .resources()?
        .update_item(&id, &changes)
        .await
        .context("Failed to update item")?;

    if !accepted {
        bail!("Service did not accept the update of item {id}");
    }
    output::success(&format!("Updated item {id}"));
    Ok(())
}
