//! Cart commands: add, remove, show and clear.

use anyhow::{bail, Result};
use comanda_core::cart::Cart;
use serde::Serialize;

use super::{AddArgs, RemoveArgs};
use crate::context::Context;

#[derive(Serialize)]
struct CartView<'a> {
    lines: &'a Cart,
    total: String,
}

/// Run the add command.
pub async fn add(args: AddArgs, ctx: &Context) -> Result<()> {
    let mut session = ctx.session(true).await?;
    let line = session.add_item(args.id, args.option.as_deref(), &args.note)?;

    if ctx.output.is_json() {
        ctx.output.json(&line);
        return Ok(());
    }

    ctx.output.success(&format!(
        "Agregado: {} ({})",
        line.name(),
        line.final_price.display()
    ));
    ctx.output.kv("Total", &session.total().display());
    Ok(())
}

/// Run the remove command.
pub async fn remove(args: RemoveArgs, ctx: &Context) -> Result<()> {
    if args.position == 0 {
        bail!("Positions start at 1");
    }
    let mut session = ctx.session(false).await?;
    let line = session.remove_item(args.position - 1)?;

    if ctx.output.is_json() {
        ctx.output.json(&line);
        return Ok(());
    }

    ctx.output.success(&format!("Eliminado: {}", line.name()));
    ctx.output.kv("Total", &session.total().display());
    Ok(())
}

/// Run the cart command.
pub async fn show(ctx: &Context) -> Result<()> {
    let session = ctx.session(false).await?;
    let cart = session.cart();

    if ctx.output.is_json() {
        ctx.output.json(&CartView {
            lines: cart,
            total: cart.total().display_amount(),
        });
        return Ok(());
    }

    ctx.output.header("Tu pedido");
    if cart.is_empty() {
        ctx.output.info("El carrito está vacío");
        return Ok(());
    }
    for (index, line) in cart.lines().iter().enumerate() {
        ctx.output.cart_line(index + 1, line);
    }
    ctx.output.info("");
    ctx.output.kv("Total", &cart.total().display());
    Ok(())
}

/// Run the clear command.
pub async fn clear(ctx: &Context) -> Result<()> {
    let mut session = ctx.session(false).await?;
    let removed = session.cart().len();
    session.clear_cart();

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "removed": removed }));
        return Ok(());
    }

    ctx.output.success(&format!("Carrito vaciado ({} líneas)", removed));
    Ok(())
}
