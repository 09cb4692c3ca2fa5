use axum::{Router, extract::Path, http::StatusCode, routing::delete};

use role_admin::{DenialReason, RoleDeletionOutcome, delete_role_admin};

use crate::config::{ROLE_ADMIN_REDIRECT_DENIED, ROLE_ADMIN_REDIRECT_INDEX};
use crate::error::IntoResponseError;
use crate::flash::{FlashMessage, FlashRedirect};
use crate::session::AuthActor;

pub(crate) const ROLE_DELETED_MESSAGE: &str = "The role was successfully deleted.";

pub(super) fn router() -> Router<()> {
    Router::new().route("/{role_id}", delete(delete_role))
}

pub(super) async fn delete_role(
    AuthActor(actor): AuthActor,
    Path(role_id): Path<String>,
) -> Result<FlashRedirect, (StatusCode, String)> {
    let outcome = delete_role_admin(&actor, &role_id)
        .await
        .into_response_error()?;

    Ok(flash_for_outcome(outcome))
}

fn flash_for_outcome(outcome: RoleDeletionOutcome) -> FlashRedirect {
    match outcome {
        RoleDeletionOutcome::Approved => FlashRedirect::new(
            ROLE_ADMIN_REDIRECT_INDEX.as_str(),
            FlashMessage::success(ROLE_DELETED_MESSAGE),
        ),
        RoleDeletionOutcome::Denied(reason @ DenialReason::NotAdministrator) => FlashRedirect::new(
            ROLE_ADMIN_REDIRECT_DENIED.as_str(),
            FlashMessage::danger(reason.message()),
        ),
        RoleDeletionOutcome::Denied(reason) => FlashRedirect::new(
            ROLE_ADMIN_REDIRECT_INDEX.as_str(),
            FlashMessage::danger(reason.message()),
        ),
    }
}
