//! Delete command implementation.

use anyhow::{Context as _, Result, bail};
use clap::Args;

use crate::output;
use crate::settings::Context;

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Resource kind
    pub kind: String,

    /// Resource identifier
    pub id: String,
}

pub async fn run(args: DeleteArgs, ctx: &Context) -> Result<()> {
    let kind = super::kind(ctx, &args.kind)?;
    let id = super::identifier(kind, &args.id)?;

    let deleted = ctx
        .resources()?
        .delete(kind, &id)
        .await
        .with_context(|| format!("Failed to delete {kind} {id}"))?;

    if !deleted {
        bail!("Service did not confirm deletion of {kind} {id}");
    }

    output::success(&format!("Deleted {kind} {id}"));
    Ok(())
}
