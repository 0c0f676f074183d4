use eyre::Result;
use shared::network::{confirmations_for, is_development};

use super::common::Context;

pub(crate) fn handle_command(ctx: &Context) -> Result<()> {
    let table = ctx.config.network_table()?;
    for profile in table.iter() {
        print!("{profile}");
        println!(
            "  development:     {}, confirmations: {}",
            is_development(&profile.name),
            confirmations_for(&profile.name)
        );
        println!();
    }
    Ok(())
}
