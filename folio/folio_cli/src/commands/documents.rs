//! Document commands: show, index, can

use anyhow::Result;
use clap::{Args, ValueEnum};
use folio_core::Document;
use folio_policy::Action;
use serde_json::json;

use super::{Outcome, Session};

/// Arguments for the show command
#[derive(Args)]
pub struct ShowArgs {
    /// Title of the document
    pub title: String,
}

/// Arguments for the index command
#[derive(Args)]
pub struct IndexArgs {
    /// List the private index instead of the public one
    #[clap(long)]
    pub private: bool,
}

/// Actions that can be asked about
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ActionArg {
    View,
    Create,
    Edit,
    Destroy,
    ManageCollaborators,
}

/// Arguments for the can command
#[derive(Args)]
pub struct CanArgs {
    /// The action to check
    #[clap(value_enum)]
    pub action: ActionArg,

    /// Title of the target document; not used by create
    pub title: Option<String>,

    /// With create: ask about creating a private document
    #[clap(long)]
    pub private: bool,
}

impl CanArgs {
    fn to_action(&self) -> Action {
        match self.action {
            ActionArg::View => Action::View,
            ActionArg::Create => Action::Create {
                private: self.private,
            },
            ActionArg::Edit => Action::Edit,
            ActionArg::Destroy => Action::Destroy,
            ActionArg::ManageCollaborators => Action::ManageCollaborators,
        }
    }
}

/// Implementation of the show command
pub fn execute_show(session: &Session<'_>, args: &ShowArgs) -> Result<Outcome> {
    let Some(id) = session.world.document_id(&args.title) else {
        return session.unknown_title(&args.title);
    };

    match session.world.runtime.show(session.viewer(), &id) {
        Ok(document) => {
            session.emit(&document, || render(session, &document))?;
            Ok(Outcome::Done)
        }
        Err(err) => session.reject(err),
    }
}

/// Implementation of the index command
pub fn execute_index(session: &Session<'_>, args: &IndexArgs) -> Result<Outcome> {
    let runtime = &session.world.runtime;
    let listing = if args.private {
        runtime.private_index(session.viewer())
    } else {
        runtime.index(session.viewer())
    };

    match listing {
        Ok(documents) => {
            session.emit(&documents, || {
                documents
                    .iter()
                    .map(|d| d.title.as_str())
                    .collect::<Vec<_>>()
                    .join("\n")
            })?;
            Ok(Outcome::Done)
        }
        Err(err) => session.reject(err),
    }
}

/// Implementation of the can command
pub fn execute_can(session: &Session<'_>, args: &CanArgs) -> Result<Outcome> {
    let action = args.to_action();

    // A document action without a title is denied for lack of a target.
    let target = match (action.targets_document(), args.title.as_deref()) {
        (true, Some(title)) => match session.world.document_id(title) {
            Some(id) => Some(id),
            None => return session.unknown_title(title),
        },
        _ => None,
    };

    let decision = match session
        .world
        .runtime
        .decide(session.viewer(), action, target.as_ref())
    {
        Ok(decision) => decision,
        Err(err) => return session.reject(err),
    };

    session.emit(
        &json!({ "action": action.as_str(), "decision": decision }),
        || decision.to_string(),
    )?;

    Ok(if decision.is_allowed() {
        Outcome::Done
    } else {
        Outcome::Rejected
    })
}

fn render(session: &Session<'_>, document: &Document) -> String {
    let visibility = if document.private { "private" } else { "public" };
    format!(
        "{}\nowner: {} ({})\n\n{}",
        document.title,
        session.world.user_name(&document.owner_id),
        visibility,
        document.body
    )
}
