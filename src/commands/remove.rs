//! `fieldlog delete` and `fieldlog clear`.

use anyhow::Result;

use super::Context;

/// Delete one record. A missing id is reported, not treated as an error.
pub async fn delete(ctx: &Context, id: &str) -> Result<()> {
    if ctx.store.delete_by_id(id).await? {
        println!("Deleted {id}");
    } else {
        println!("No record with id {id}");
    }
    Ok(())
}

/// Delete every record. Requires `--yes`.
pub async fn clear(ctx: &Context, confirmed: bool) -> Result<()> {
    if !confirmed {
        anyhow::bail!("Refusing to delete all records without --yes");
    }
    let removed = ctx.store.clear().await?;
    println!("Deleted {removed} record(s)");
    Ok(())
}
