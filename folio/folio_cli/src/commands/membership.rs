//! Membership commands: downgrade, pay, offer

use anyhow::Result;
use clap::Args;
use folio_core::{Role, Viewer};
use folio_runtime::PaymentSucceeded;
use folio_store::DocumentStore;
use serde_json::json;

use super::{Outcome, Session};

/// Arguments for the downgrade command
#[derive(Args)]
pub struct DowngradeArgs {
    /// Name of the user downgrading themselves
    pub user: String,
}

/// Arguments for the pay command
#[derive(Args)]
pub struct PayArgs {
    /// Name of the paying user
    pub user: String,

    /// Amount charged in cents; defaults to the configured price
    #[clap(long)]
    pub amount: Option<u64>,
}

/// Implementation of the downgrade command
pub fn execute_downgrade(session: &Session<'_>, args: &DowngradeArgs) -> Result<Outcome> {
    let user = session.world.user(&args.user)?;
    let runtime = &session.world.runtime;

    let change = match runtime.change_role(Viewer::User(&user), &user.id, Role::Standard) {
        Ok(change) => change,
        Err(err) => return session.reject(err),
    };

    let titles = change
        .publicized
        .iter()
        .map(|id| runtime.store().get(id).map(|d| d.title))
        .collect::<folio_core::Result<Vec<_>>>()?;

    session.emit(
        &json!({ "user": args.user, "role": change.to, "publicized": titles }),
        || {
            let mut lines = vec![format!("{} is now {}", args.user, change.to)];
            lines.extend(titles.iter().map(|title| format!("made public: {title}")));
            lines.join("\n")
        },
    )?;
    Ok(Outcome::Done)
}

/// Implementation of the pay command
pub fn execute_pay(session: &Session<'_>, args: &PayArgs) -> Result<Outcome> {
    let user = session.world.user(&args.user)?;
    let runtime = &session.world.runtime;

    let event = PaymentSucceeded {
        user_id: user.id,
        amount_cents: args
            .amount
            .unwrap_or(runtime.config().membership.price_cents),
    };

    let change = match runtime.handle_payment(&event) {
        Ok(change) => change,
        Err(err) => return session.reject(err),
    };

    session.emit(
        &json!({ "user": args.user, "role": change.to, "upgraded": change.changed() }),
        || {
            if change.changed() {
                format!("{} is now {}", args.user, change.to)
            } else {
                format!("{} remains {}", args.user, change.to)
            }
        },
    )?;
    Ok(Outcome::Done)
}

/// Implementation of the offer command
pub fn execute_offer(session: &Session<'_>) -> Result<Outcome> {
    let offer = session.world.runtime.upgrade_offer(session.viewer());

    session.emit(&offer, || match &offer {
        Some(offer) => format!(
            "Upgrade to premium for {}.{:02} {}",
            offer.price_cents / 100,
            offer.price_cents % 100,
            offer.currency.to_uppercase()
        ),
        None => "No upgrade offer".to_string(),
    })?;
    Ok(Outcome::Done)
}
