//! Membership: role changes, payment events and the upgrade offer.

use folio_core::error::Result;
use folio_core::{Role, UserId, Viewer};
use folio_policy::DenyReason;
use folio_store::{DocumentStore, RoleChange};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{denied, Runtime};

/// A confirmed payment from the payment provider.
///
/// The amount is informational; any confirmed payment by a standard user
/// upgrades them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentSucceeded {
    /// The paying user.
    pub user_id: UserId,

    /// Amount charged, in the smallest currency unit.
    pub amount_cents: u64,
}

/// What a standard user is offered to become premium.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipOffer {
    /// Price in the smallest currency unit.
    pub price_cents: u64,

    /// Lowercase ISO currency code.
    pub currency: String,
}

impl<S> Runtime<S>
where
    S: DocumentStore,
{
    /// Change a user's role.
    ///
    /// Admins may set any role on anyone. Any user may downgrade
    /// themselves to standard. A transition to standard publicizes every
    /// private document the user owns, atomically with the role update.
    pub fn change_role(
        &self,
        viewer: Viewer<'_>,
        target: &UserId,
        role: Role,
    ) -> Result<RoleChange> {
        const ACTION: &str = "change role";

        let Some(user) = viewer.user() else {
            return Err(denied(viewer, ACTION, DenyReason::Anonymous));
        };
        let self_downgrade = viewer.is(target) && role.is_standard();
        if !user.role.is_admin() && !self_downgrade {
            return Err(denied(viewer, ACTION, DenyReason::NotPermitted));
        }

        let change = self.store.set_role(target, role)?;
        if !change.publicized.is_empty() {
            info!(
                user = %target,
                count = change.publicized.len(),
                "Downgrade made private documents public"
            );
        }
        Ok(change)
    }

    /// Consume a payment-succeeded event.
    ///
    /// Only standard users are promoted; for premium and admin users the
    /// returned change is a no-op.
    pub fn handle_payment(&self, event: &PaymentSucceeded) -> Result<RoleChange> {
        if event.amount_cents != self.config.membership.price_cents {
            warn!(
                user = %event.user_id,
                amount = event.amount_cents,
                expected = self.config.membership.price_cents,
                "Payment amount differs from the configured price"
            );
        }

        let change = self.store.upgrade(&event.user_id)?;
        if change.changed() {
            info!(user = %event.user_id, "Upgraded to premium after payment");
        } else {
            info!(user = %event.user_id, role = %change.to, "Payment received, role unchanged");
        }
        Ok(change)
    }

    /// The upgrade offer for an authenticated standard viewer.
    pub fn upgrade_offer(&self, viewer: Viewer<'_>) -> Option<MembershipOffer> {
        let user = viewer.user()?;
        if !user.role.is_standard() {
            return None;
        }

        Some(MembershipOffer {
            price_cents: self.config.membership.price_cents,
            currency: self.config.membership.currency.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RuntimeConfig;
    use folio_core::{DocumentDraft, User};

    fn user(runtime: &Runtime, name: &str, role: Role) -> User {
        runtime
            .store()
            .insert_user(User::new(name, format!("{name}@example.com")).with_role(role))
            .unwrap()
    }

    #[test]
    fn test_self_downgrade_publicizes() {
        let runtime = Runtime::new(RuntimeConfig::default());
        let owner = user(&runtime, "owner", Role::Premium);
        let document = runtime
            .create(Viewer::User(&owner), DocumentDraft::new("T", "B").private(true))
            .unwrap();

        let change = runtime
            .change_role(Viewer::User(&owner), &owner.id, Role::Standard)
            .unwrap();
        assert_eq!(change.publicized, vec![document.id]);
        assert!(runtime.show(Viewer::Anonymous, &document.id).is_ok());
    }

    #[test]
    fn test_role_change_permissions() {
        let runtime = Runtime::new(RuntimeConfig::default());
        let admin = user(&runtime, "admin", Role::Admin);
        let standard = user(&runtime, "standard", Role::Standard);
        let premium = user(&runtime, "premium", Role::Premium);

        // Nobody promotes themselves.
        assert!(runtime
            .change_role(Viewer::User(&standard), &standard.id, Role::Premium)
            .unwrap_err()
            .is_denied());
        // Nor touches someone else.
        assert!(runtime
            .change_role(Viewer::User(&premium), &standard.id, Role::Standard)
            .unwrap_err()
            .is_denied());
        assert!(runtime
            .change_role(Viewer::Anonymous, &standard.id, Role::Standard)
            .unwrap_err()
            .is_denied());

        let change = runtime
            .change_role(Viewer::User(&admin), &standard.id, Role::Admin)
            .unwrap();
        assert_eq!(change.to, Role::Admin);

        assert!(runtime
            .change_role(Viewer::User(&admin), &UserId::new(), Role::Premium)
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_payment_promotes_standard_only() {
        let runtime = Runtime::new(RuntimeConfig::default());
        let standard = user(&runtime, "standard", Role::Standard);
        let admin = user(&runtime, "admin", Role::Admin);

        let change = runtime
            .handle_payment(&PaymentSucceeded {
                user_id: standard.id,
                amount_cents: 1500,
            })
            .unwrap();
        assert_eq!(change.to, Role::Premium);

        let change = runtime
            .handle_payment(&PaymentSucceeded {
                user_id: admin.id,
                amount_cents: 1500,
            })
            .unwrap();
        assert!(!change.changed());
        assert_eq!(change.to, Role::Admin);

        assert!(runtime
            .handle_payment(&PaymentSucceeded {
                user_id: UserId::new(),
                amount_cents: 1500,
            })
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_upgrade_offer() {
        let mut config = RuntimeConfig::default();
        config.membership.price_cents = 999;
        let runtime = Runtime::new(config);
        let standard = user(&runtime, "standard", Role::Standard);
        let premium = user(&runtime, "premium", Role::Premium);

        let offer = runtime.upgrade_offer(Viewer::User(&standard)).unwrap();
        assert_eq!(offer.price_cents, 999);
        assert_eq!(offer.currency, "usd");

        assert!(runtime.upgrade_offer(Viewer::User(&premium)).is_none());
        assert!(runtime.upgrade_offer(Viewer::Anonymous).is_none());
    }
}
