//! Initialize a storefront config.

use anyhow::{bail, Result};

use super::InitArgs;
use crate::config::{generate_default_config, ComandaConfig};
use crate::context::Context;

/// Run the init command.
pub async fn run(args: InitArgs, ctx: &Context) -> Result<()> {
    let file_name = if args.json_config {
        "comanda.json"
    } else {
        "comanda.toml"
    };
    let path = ctx.cwd.join(file_name);

    ctx.output.header(&format!("Initializing store: {}", args.name));

    if path.exists() && !args.force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }

    if args.json_config {
        let config: ComandaConfig = toml::from_str(&generate_default_config(&args.name))?;
        config.save(&path)?;
    } else {
        std::fs::write(&path, generate_default_config(&args.name))?;
    }

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "config": path }));
        return Ok(());
    }

    ctx.output.success(&format!("Wrote {}", path.display()));
    ctx.output.info("");
    ctx.output.info("Next steps:");
    ctx.output.list_item("put your menu in menu.json");
    ctx.output.list_item("comanda menu");
    ctx.output.list_item("comanda add <ID>");
    ctx.output.list_item("comanda checkout --name <NAME>");

    Ok(())
}
