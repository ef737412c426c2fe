//! Menu and business-hours commands.

use anyhow::{bail, Result};
use comanda_core::catalog::ALL_CATEGORIES;
use comanda_core::schedule::Clock;

use super::MenuArgs;
use crate::context::Context;
use crate::output::open_badge;

/// Run the menu command.
pub async fn run(args: MenuArgs, ctx: &Context) -> Result<()> {
    let session = ctx.session(true).await?;
    let Some(catalog) = session.catalog() else {
        bail!("No menu loaded");
    };

    if args.category != ALL_CATEGORIES && !catalog.categories().contains(&args.category.as_str()) {
        bail!(
            "Unknown category '{}'. Available: {}",
            args.category,
            catalog.categories().join(", ")
        );
    }

    let items: Vec<_> = catalog.by_category(&args.category).collect();

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "open": session.is_open(),
            "hours": session.hours().label(),
            "items": items,
        }));
        return Ok(());
    }

    ctx.output.header(&format!("Menú {}", ctx.config.store.name));
    ctx.output.kv("Horario", &session.hours().label());
    ctx.output.kv("Estado", &open_badge(session.is_open()));
    ctx.output.info("");

    for item in &items {
        let id = format!("#{}", item.id);
        let price = item.price.display();
        ctx.output
            .table_row(&[id.as_str(), item.name.as_str(), price.as_str()], &[5, 32, 10]);
        if !item.desc.is_empty() {
            ctx.output.kv("desc", &item.desc);
        }
        for option in &item.options {
            let extra = if option.extra.is_zero() {
                String::new()
            } else {
                format!(" (+{})", option.extra.display())
            };
            ctx.output.list_item(&format!("{}{}", option.name, extra));
        }
    }

    if items.is_empty() {
        ctx.output.warn("No items in this category");
    }

    Ok(())
}

/// Run the hours command.
pub async fn hours(ctx: &Context) -> Result<()> {
    let hours = ctx.config.hours;
    let now = ctx.clock().now();
    let open = hours.is_open(now);

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "open": open,
            "now": now,
            "hours": hours,
        }));
        return Ok(());
    }

    ctx.output.kv("Horario", &hours.label());
    ctx.output.kv("Ahora", &now.format("%Y-%m-%d %H:%M").to_string());
    ctx.output.kv("Estado", &open_badge(open));
    if !open {
        ctx.output.warn(&format!("Cerrado. Horario: {}", hours.label()));
    }

    Ok(())
}
