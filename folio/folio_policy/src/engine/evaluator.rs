//! Policy evaluation engine.
//!
//! Dispatches an [`Action`] to the matching predicate in
//! [`rules`](super::rules) and explains a negative answer with a
//! [`DenyReason`].

use folio_core::{CollaboratorLookup, Document, Viewer};
use tracing::trace;

use super::rules;
use crate::model::{Action, Decision, DenyReason, Evaluation};

/// Policy evaluation engine.
///
/// Holds only the injected collaborator lookup; evaluating never mutates
/// anything, so one evaluator can be shared freely between threads when
/// the lookup can.
#[derive(Debug, Clone)]
pub struct PolicyEvaluator<C> {
    /// Collaborator membership source.
    collaborators: C,
}

impl<C> PolicyEvaluator<C>
where
    C: CollaboratorLookup,
{
    /// Create a new policy evaluator over a collaborator lookup.
    pub fn new(collaborators: C) -> Self {
        Self { collaborators }
    }

    /// Decide whether `viewer` may perform `action` on `target`.
    ///
    /// `target` is ignored by actions that do not address a document and
    /// required by those that do.
    pub fn decide(&self, viewer: Viewer<'_>, action: Action, target: Option<&Document>) -> Decision {
        let allowed = match (action, target) {
            (Action::Create { private }, _) => rules::can_create(viewer, private),
            (Action::ListIndex, _) => rules::can_list_index(viewer),
            (Action::ListPrivateIndex, _) => rules::can_list_private_index(viewer),
            (_, None) => return Decision::Deny(DenyReason::MissingTarget),
            (Action::View, Some(document)) => {
                rules::can_view(viewer, document, &self.collaborators)
            }
            (Action::Edit, Some(document)) => {
                rules::can_edit(viewer, document, &self.collaborators)
            }
            (Action::Destroy, Some(document)) => rules::can_destroy(viewer, document),
            (Action::ManageCollaborators, Some(document)) => {
                rules::can_manage_collaborators(viewer, document)
            }
        };

        let decision = if allowed {
            Decision::Allow
        } else {
            Decision::Deny(deny_reason(viewer, action, target))
        };

        trace!(
            viewer = %viewer,
            action = %action,
            document = ?target.map(|d| d.id),
            %decision,
            "policy decision"
        );

        decision
    }

    /// Like [`decide`](Self::decide), returning an auditable record.
    pub fn evaluate(&self, viewer: Viewer<'_>, action: Action, target: Option<&Document>) -> Evaluation {
        let decision = self.decide(viewer, action, target);
        Evaluation::new(viewer.id(), action, target.map(|d| d.id), decision)
    }

    /// Check if an action is allowed.
    pub fn is_allowed(&self, viewer: Viewer<'_>, action: Action, target: Option<&Document>) -> bool {
        self.decide(viewer, action, target).is_allowed()
    }
}

/// Explain a negative answer. Only called once the predicate said no.
fn deny_reason(viewer: Viewer<'_>, action: Action, target: Option<&Document>) -> DenyReason {
    let Some(user) = viewer.user() else {
        return DenyReason::Anonymous;
    };

    let lacks_tier = !user.role.is_admin_or_premium();
    match action {
        Action::Create { private: true } | Action::ListPrivateIndex if lacks_tier => {
            DenyReason::InsufficientRole
        }
        Action::ManageCollaborators
            if lacks_tier && target.is_some_and(|d| d.is_owned_by(&user.id)) =>
        {
            DenyReason::InsufficientRole
        }
        Action::View | Action::Edit
            if lacks_tier && target.is_some_and(|d| d.is_owned_by(&user.id)) =>
        {
            DenyReason::InsufficientRole
        }
        _ => DenyReason::NotPermitted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::{DocumentDraft, DocumentId, NoCollaborators, Role, User, UserId};
    use std::collections::{HashMap, HashSet};

    fn user(role: Role) -> User {
        User::new("u", "u@example.com").with_role(role)
    }

    fn private_doc(owner: &User) -> Document {
        Document::from_draft(owner.id, DocumentDraft::new("T", "B").private(true)).unwrap()
    }

    #[test]
    fn test_decide_dispatch() {
        let evaluator = PolicyEvaluator::new(NoCollaborators);
        let owner = user(Role::Premium);
        let doc = private_doc(&owner);

        for action in [Action::View, Action::Edit, Action::Destroy, Action::ManageCollaborators] {
            assert_eq!(
                evaluator.decide(Viewer::from(&owner), action, Some(&doc)),
                Decision::Allow,
                "owner should be allowed to {}",
                action
            );
        }
    }

    #[test]
    fn test_deny_reasons() {
        let evaluator = PolicyEvaluator::new(NoCollaborators);
        let owner = user(Role::Premium);
        let doc = private_doc(&owner);
        let standard = user(Role::Standard);

        assert_eq!(
            evaluator.decide(Viewer::Anonymous, Action::View, Some(&doc)),
            Decision::Deny(DenyReason::Anonymous)
        );
        assert_eq!(
            evaluator.decide(Viewer::from(&standard), Action::View, Some(&doc)),
            Decision::Deny(DenyReason::NotPermitted)
        );
        assert_eq!(
            evaluator.decide(Viewer::from(&standard), Action::Create { private: true }, None),
            Decision::Deny(DenyReason::InsufficientRole)
        );
        assert_eq!(
            evaluator.decide(Viewer::from(&standard), Action::ListPrivateIndex, None),
            Decision::Deny(DenyReason::InsufficientRole)
        );
        assert_eq!(
            evaluator.decide(Viewer::from(&owner), Action::Edit, None),
            Decision::Deny(DenyReason::MissingTarget)
        );
    }

    #[test]
    fn test_downgraded_owner_reason() {
        let evaluator = PolicyEvaluator::new(NoCollaborators);
        let mut owner = user(Role::Premium);
        let doc = private_doc(&owner);
        owner.role = Role::Standard;

        assert_eq!(
            evaluator.decide(Viewer::from(&owner), Action::View, Some(&doc)),
            Decision::Deny(DenyReason::InsufficientRole)
        );
    }

    #[test]
    fn test_evaluate_records_context() {
        let mut grants: HashMap<DocumentId, HashSet<UserId>> = HashMap::new();
        let owner = user(Role::Premium);
        let doc = private_doc(&owner);
        let collaborator = user(Role::Standard);
        grants.entry(doc.id).or_default().insert(collaborator.id);

        let evaluator = PolicyEvaluator::new(grants);
        let evaluation = evaluator.evaluate(Viewer::from(&collaborator), Action::Edit, Some(&doc));

        assert!(evaluation.is_allowed());
        assert_eq!(evaluation.viewer, Some(collaborator.id));
        assert_eq!(evaluation.document, Some(doc.id));
        assert_eq!(evaluation.action, Action::Edit);

        assert!(!evaluator.is_allowed(Viewer::from(&collaborator), Action::Destroy, Some(&doc)));
    }

    #[test]
    fn test_index_ignores_target() {
        let evaluator = PolicyEvaluator::new(NoCollaborators);
        assert!(evaluator.is_allowed(Viewer::Anonymous, Action::ListIndex, None));
        assert!(!evaluator.is_allowed(Viewer::Anonymous, Action::ListPrivateIndex, None));
    }
}
