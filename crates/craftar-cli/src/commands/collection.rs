//! Collection subcommands.

use anyhow::{Context as _, Result, bail};
use clap::{Args, Subcommand};

use craftar::{ResourceKind, ResourceRecord};

use crate::output;
use crate::settings::Context;

#[derive(Args, Debug)]
pub struct CollectionCommand {
    #[command(subcommand)]
    pub command: CollectionSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum CollectionSubcommand {
    /// Create a collection
    Create {
        /// Collection name, unique per account
        #[arg(long)]
        name: String,
    },

    /// Rename a collection
    Rename {
        /// Collection identifier
        id: String,

        /// New name
        #[arg(long)]
        name: String,
    },
}

pub async fn handle(cmd: CollectionCommand, ctx: &Context) -> Result<()> {
    let client = ctx.resources()?;

    match cmd.command {
        CollectionSubcommand::Create { name } => {
            let created = client
                .create_collection(&name)
                .await
                .context("Failed to create collection")?;
            report_created(ResourceKind::Collection, created)
        }
        CollectionSubcommand::Rename { id, name } => {
            let id = super::identifier(ResourceKind::Collection, &id)?;
            let accepted = client
                .rename_collection(&id, &name)
                .await
                .context("Failed to rename collection")?;

            if !accepted {
                bail!("Service did not accept the update of collection {id}");
            }
            output::success(&format!("Renamed collection {id} to {name}"));
            Ok(())
        }
    }
}

/// Print a created record, or fail if creation was not acknowledged.
pub(super) fn report_created(kind: ResourceKind, created: Option<ResourceRecord>) -> Result<()> {
    let Some(record) = created else {
        bail!("Service did not acknowledge creation of the {kind}");
    };

    output::json(&record)?;
    output::success(&format!("Created {kind} {}", record.uuid().unwrap_or("(no uuid)")));
    Ok(())
}
