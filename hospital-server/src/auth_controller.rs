use actix_web::{get, post, put, web, HttpRequest, HttpResponse};
use serde_json::json;
use slog::info;

use crate::api_error::ApiError;
use crate::api_models::{LoginRequest, RegisterRequest, UpdateProfileRequest};
use crate::common_utils::{current_user, merged_user_view};
use crate::constants::AUTH_TAG;
use crate::AppState;
use common::auth_helper;
use common::database_provider::{
    DbError, DoctorUpdate, NewProfile, NewUser, PatientUpdate, ProfileUpdate, UserUpdate,
};
use common::roles::Role;

fn role_profile(role: Role, data: &RegisterRequest) -> NewProfile {
    match role {
        Role::Patient => NewProfile::Patient {
            blood_group: data.blood_group.clone(),
            emergency_contact: data.emergency_contact.clone(),
            insurance_info: data.insurance_info.clone(),
        },
        Role::Doctor => NewProfile::Doctor {
            license_number: data.license_number.clone(),
            specialization: data.specialization.clone(),
            years_of_experience: data.years_of_experience,
            qualification: data.qualification.clone(),
            consultation_fee: data.consultation_fee.unwrap_or(0.0),
        },
        // every remaining role is staff-family; staff_type mirrors it
        staff_role => NewProfile::Staff {
            staff_type: staff_role,
            department: data.department.clone(),
        },
    }
}

#[utoipa::path(
    post,
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User and role profile created; returns token and merged user view"),
        (status = 400, description = "Missing required field, unknown role or duplicate email"),
        (status = 500, description = "Internal server error")
    ),
    tag = AUTH_TAG,
    description = "Register an account with exactly one role-specific profile",
)]
#[post("/register")]
pub async fn register(
    body: web::Json<RegisterRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let log = app_state.log.clone();
    let data = body.into_inner();

    let email = data.email.clone().ok_or(ApiError::MissingField("email"))?;
    let password = data
        .password
        .clone()
        .ok_or(ApiError::MissingField("password"))?;
    let first_name = data
        .first_name
        .clone()
        .ok_or(ApiError::MissingField("first_name"))?;
    let last_name = data
        .last_name
        .clone()
        .ok_or(ApiError::MissingField("last_name"))?;
    let role_value = data.role.clone().ok_or(ApiError::MissingField("role"))?;
    let role = Role::parse(&role_value)
        .ok_or_else(|| ApiError::Validation(format!("Invalid role: {}", role_value)))?;

    if app_state.db.find_user_by_email(&email).await?.is_some() {
        return Err(ApiError::Validation("User already exists".to_string()));
    }

    let password_hash = auth_helper::hash_password(&password).map_err(|_| ApiError::Internal)?;
    let new_user = NewUser {
        email,
        password_hash,
        first_name,
        last_name,
        phone: data.phone.clone(),
        address: data.address.clone(),
        date_of_birth: data.date_of_birth,
        gender: data.gender.clone(),
        role,
    };
    let profile = role_profile(role, &data);

    let user = app_state
        .db
        .create_user_with_profile(new_user, profile)
        .await
        .map_err(|e| match e {
            DbError::AlreadyExists => ApiError::Validation("User already exists".to_string()),
            other => ApiError::from(other),
        })?;

    info!(log, "user registered"; "user_id" => user.id, "role" => role.as_str());

    let token = auth_helper::create_token(
        &app_state.auth.jwt_secret,
        user.id,
        app_state.auth.token_ttl_hours,
    )
    .map_err(|_| ApiError::Internal)?;
    let view = merged_user_view(&*app_state.db, user).await?;

    Ok(HttpResponse::Created().json(json!({
        "message": "User registered successfully",
        "token": token,
        "user": view,
    })))
}

#[utoipa::path(
    post,
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Authenticated; returns token and merged user view"),
        (status = 400, description = "Email or password missing"),
        (status = 401, description = "Invalid credentials"),
        (status = 403, description = "Account is deactivated")
    ),
    tag = AUTH_TAG,
    description = "Authenticate by email and password",
)]
#[post("/login")]
pub async fn login(
    body: web::Json<LoginRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let log = app_state.log.clone();
    let data = body.into_inner();

    let email = data
        .email
        .filter(|e| !e.is_empty())
        .ok_or_else(|| ApiError::Validation("Email and password required".to_string()))?;
    let password = data
        .password
        .filter(|p| !p.is_empty())
        .ok_or_else(|| ApiError::Validation("Email and password required".to_string()))?;

    let Some(user) = app_state.db.find_user_by_email(&email).await? else {
        // burn comparable work so unknown emails are not distinguishable
        auth_helper::verify_password(auth_helper::DUMMY_HASH, &password);
        return Err(ApiError::InvalidCredentials);
    };

    if !auth_helper::verify_password(&user.password_hash, &password) {
        return Err(ApiError::InvalidCredentials);
    }
    if !user.is_active {
        return Err(ApiError::Deactivated);
    }

    info!(log, "user logged in"; "user_id" => user.id);

    let token = auth_helper::create_token(
        &app_state.auth.jwt_secret,
        user.id,
        app_state.auth.token_ttl_hours,
    )
    .map_err(|_| ApiError::Internal)?;
    let view = merged_user_view(&*app_state.db, user).await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Login successful",
        "token": token,
        "user": view,
    })))
}

#[utoipa::path(
    get,
    params(
        ("Authorization" = String, Header, description = "Bearer access token")
    ),
    responses(
        (status = 200, description = "Merged user view with role-specific profile"),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "User not found")
    ),
    tag = AUTH_TAG,
    description = "Fetch the authenticated user's profile",
)]
#[get("/profile")]
pub async fn get_profile(
    req: HttpRequest,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let user = current_user(&req, &app_state).await?;
    let view = merged_user_view(&*app_state.db, user).await?;
    Ok(HttpResponse::Ok().json(view))
}

#[utoipa::path(
    put,
    request_body = UpdateProfileRequest,
    params(
        ("Authorization" = String, Header, description = "Bearer access token")
    ),
    responses(
        (status = 200, description = "Profile updated; returns merged user view"),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "User not found")
    ),
    tag = AUTH_TAG,
    description = "Partially update whitelisted base and role-specific fields",
)]
#[put("/profile")]
pub async fn update_profile(
    req: HttpRequest,
    body: web::Json<UpdateProfileRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let user = current_user(&req, &app_state).await?;
    let data = body.into_inner();

    let base = UserUpdate {
        first_name: data.first_name,
        last_name: data.last_name,
        phone: data.phone,
        address: data.address,
        date_of_birth: data.date_of_birth,
        gender: data.gender,
    };
    let profile = match user.role {
        Role::Patient => ProfileUpdate::Patient(PatientUpdate {
            blood_group: data.blood_group,
            emergency_contact: data.emergency_contact,
            insurance_info: data.insurance_info,
        }),
        Role::Doctor => ProfileUpdate::Doctor(DoctorUpdate {
            specialization: data.specialization,
            years_of_experience: data.years_of_experience,
            qualification: data.qualification,
            consultation_fee: data.consultation_fee,
        }),
        _ => ProfileUpdate::None,
    };

    let updated = app_state
        .db
        .update_user_profile(user.id, base, profile)
        .await?;
    let view = merged_user_view(&*app_state.db, updated).await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Profile updated successfully",
        "user": view,
    })))
}
