use actix_web::{HttpMessage, HttpRequest};

use crate::api_error::ApiError;
use crate::api_models::UserView;
use crate::auth_information::AuthInformation;
use crate::AppState;
use common::database_provider::{DbError, DbProvider};
use common::entities::UserEntity;
use common::roles::Role;

/// Loads the account behind the identity the auth middleware resolved.
pub async fn current_user(req: &HttpRequest, state: &AppState) -> Result<UserEntity, ApiError> {
    let identity = req
        .extensions()
        .get::<AuthInformation>()
        .copied()
        .ok_or(ApiError::InvalidCredentials)?;
    state
        .db
        .find_user_by_id(identity.user_id)
        .await?
        .ok_or(ApiError::NotFound("User not found"))
}

/// Attaches the profile sub-object matching the user's role. A staff-family
/// role attaches `staff_info`; the others attach their own variant only.
pub async fn merged_user_view(
    db: &dyn DbProvider,
    user: UserEntity,
) -> Result<UserView, DbError> {
    let mut view = UserView::base(user);
    match view.user.role {
        Role::Patient => view.patient_info = db.get_patient_by_user(view.user.id).await?,
        Role::Doctor => view.doctor_info = db.get_doctor_by_user(view.user.id).await?,
        role if role.is_staff_family() => {
            view.staff_info = db.get_staff_by_user(view.user.id).await?
        }
        _ => {}
    }
    Ok(view)
}
