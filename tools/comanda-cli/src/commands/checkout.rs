//! Checkout: prepare the order, confirm and hand it off.

use anyhow::{bail, Context as _, Result};
use dialoguer::Confirm;

use super::CheckoutArgs;
use crate::context::Context;

/// Run the checkout command.
pub async fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    let prompt = needs_prompt(args.yes, ctx.output.is_json())?;
    let mut session = ctx.session(false).await?;

    // Step 1: Validate and show the payment summary
    let order = session.prepare_checkout(&args.name, args.order_type.as_deref())?;
    let reference = order.reference.clone();

    if !ctx.output.is_json() {
        ctx.output.header("Pago");
        ctx.output.kv("Referencia", &order.reference);
        ctx.output.kv("Cliente", &order.client_name);
        ctx.output.kv("Tipo", &order.order_type);
        ctx.output.kv("Total", &order.total.display());
        ctx.output.info("");
        ctx.output.info("Usa la referencia como concepto de tu transferencia");
    }

    // Step 2: Confirmation
    if prompt {
        let confirmed = Confirm::new()
            .with_prompt("¿Enviar pedido?")
            .default(true)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Pedido cancelado");
            return Ok(());
        }
    }

    // Step 3: Handoff
    let spinner = ctx.output.spinner("Preparando enlace...");
    let receipt = session.confirm_checkout();
    spinner.finish_and_clear();
    let receipt = receipt.with_context(|| format!("Failed to send order {}", reference))?;

    if ctx.output.is_json() {
        ctx.output.json(&receipt);
        return Ok(());
    }

    ctx.output.success(&format!("Pedido {} listo", receipt.reference));
    ctx.output.info("Abre este enlace para enviarlo:");
    println!("{}", receipt.link);
    Ok(())
}

/// Whether to ask before sending. JSON mode cannot prompt, so it must be
/// confirmed up front with `--yes`.
fn needs_prompt(yes: bool, json: bool) -> Result<bool> {
    match (yes, json) {
        (true, _) => Ok(false),
        (false, true) => bail!("--json cannot ask for confirmation, pass --yes to send the order"),
        (false, false) => Ok(true),
    }
}
