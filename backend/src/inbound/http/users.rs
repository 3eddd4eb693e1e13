//! Account API handlers.
//!
//! ```text
//! POST   /user/sign            {"username":"kim@editfolio.dev","password":"..."}
//! POST   /user/customer        {"email":"...","mobile":"01012345678","name":"Lee"}
//! POST   /user/admin           {"name":"Kim","email":"...","password":"...","nickname":"K"}
//! PATCH  /user/admin/pw        {"oldPassword":"...","newPassword":"..."}
//! GET    /user/admin/me
//! PUT    /user/admin/me        {"username":"...","name":"...","nickname":"..."}
//! PUT    /user/admin/{id}      {"username":"...","name":"...","nickname":"...","password":"..."}
//! DELETE /user/customer/{id}
//! DELETE /user/admin/{id}
//! ```
//!
//! Every route except sign-in requires a bearer token. Customer management
//! and self-service admin routes need the admin console capability; managing
//! other admins needs a super admin.

use actix_web::{HttpResponse, delete, get, patch, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::ports::{
    AdminProfile, CreateAdminRequest, CreateCustomerRequest, ForceUpdateAdminRequest,
    UpdateAdminInfoRequest, UpdateAdminPasswordRequest, UserAccountError,
};
use crate::domain::{
    Capability, DomainError, LoginCredentials, Mobile, Nickname, Password, PersonName, Role, UserId,
    Username,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::Authenticated;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, account_validation_error, parse_user_id, validate_field,
};

const EMAIL: FieldName = FieldName::new("email");
const USERNAME: FieldName = FieldName::new("username");
const PASSWORD: FieldName = FieldName::new("password");
const OLD_PASSWORD: FieldName = FieldName::new("oldPassword");
const NEW_PASSWORD: FieldName = FieldName::new("newPassword");
const MOBILE: FieldName = FieldName::new("mobile");
const NAME: FieldName = FieldName::new("name");
const NICKNAME: FieldName = FieldName::new("nickname");
const ID: FieldName = FieldName::new("id");

/// Sign-in request body for `POST /user/sign`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignInRequest {
    /// Login name.
    #[schema(example = "kim@editfolio.dev")]
    pub username: String,
    /// Plain-text password.
    pub password: String,
}

/// Session token returned by a successful sign-in.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignInResponse {
    /// Bearer token for the `Authorization` header.
    pub token: String,
}

/// Body for `POST /user/customer`. The mobile number becomes the initial
/// password.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomerBody {
    /// Login name.
    #[schema(example = "lee@editfolio.dev")]
    pub email: String,
    /// Mobile number, digits only.
    #[schema(example = "01012345678")]
    pub mobile: String,
    /// Real name; validated but not stored.
    pub name: String,
}

impl TryFrom<CreateCustomerBody> for CreateCustomerRequest {
    type Error = DomainError;

    fn try_from(value: CreateCustomerBody) -> Result<Self, Self::Error> {
        Ok(Self {
            email: validate_field(Username::new(&value.email), EMAIL)?,
            mobile: validate_field(Mobile::new(&value.mobile), MOBILE)?,
            name: validate_field(PersonName::new(&value.name), NAME)?,
        })
    }
}

/// Body for `POST /user/admin`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAdminBody {
    /// Real name.
    #[schema(example = "Kim")]
    pub name: String,
    /// Login name.
    #[schema(example = "kim@editfolio.dev")]
    pub email: String,
    /// Initial password.
    pub password: String,
    /// Display nickname.
    #[schema(example = "K")]
    pub nickname: String,
}

impl TryFrom<CreateAdminBody> for CreateAdminRequest {
    type Error = DomainError;

    fn try_from(value: CreateAdminBody) -> Result<Self, Self::Error> {
        Ok(Self {
            name: validate_field(PersonName::new(&value.name), NAME)?,
            email: validate_field(Username::new(&value.email), EMAIL)?,
            password: validate_field(Password::new(value.password), PASSWORD)?,
            nickname: validate_field(Nickname::new(&value.nickname), NICKNAME)?,
        })
    }
}

/// Id of a newly created account.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatedAccountResponse {
    /// Id of the new account.
    pub id: Uuid,
}

impl From<UserId> for CreatedAccountResponse {
    fn from(value: UserId) -> Self {
        Self {
            id: *value.as_uuid(),
        }
    }
}

/// Body for `PATCH /user/admin/pw`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePasswordBody {
    /// Current password.
    pub old_password: String,
    /// Replacement password.
    pub new_password: String,
}

/// Body for `PUT /user/admin/me`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAdminInfoBody {
    /// New login name.
    pub username: String,
    /// New real name.
    pub name: String,
    /// New nickname.
    pub nickname: String,
}

/// Body for `PUT /user/admin/{id}`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ForceUpdateAdminBody {
    /// New login name.
    pub username: String,
    /// New real name.
    pub name: String,
    /// New nickname.
    pub nickname: String,
    /// New password.
    pub password: String,
}

/// Profile of the signed-in admin.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminProfileResponse {
    /// Account id.
    pub id: Uuid,
    /// Login name.
    pub username: String,
    /// Account role.
    pub role: Role,
    /// Real name.
    pub name: String,
    /// Display nickname.
    pub nickname: String,
}

impl From<AdminProfile> for AdminProfileResponse {
    fn from(value: AdminProfile) -> Self {
        Self {
            id: *value.id.as_uuid(),
            username: value.username.into(),
            role: value.role,
            name: value.name.as_ref().to_owned(),
            nickname: value.nickname.as_ref().to_owned(),
        }
    }
}

/// Sign-in and password checks answer unknown accounts and wrong passwords
/// identically.
fn map_credential_error(err: UserAccountError) -> DomainError {
    match err {
        UserAccountError::NotFound | UserAccountError::WrongPassword => {
            DomainError::unauthorized("invalid credentials")
        }
        other => other.into(),
    }
}

/// Authenticate with username and password and receive a session token.
#[utoipa::path(
    post,
    path = "/user/sign",
    request_body = SignInRequest,
    responses(
        (status = 200, description = "Signed in", body = SignInResponse),
        (status = 400, description = "Invalid request", body = DomainError),
        (status = 401, description = "Invalid credentials", body = DomainError),
        (status = 500, description = "Internal server error", body = DomainError)
    ),
    tags = ["users"],
    operation_id = "signIn",
    security([])
)]
#[post("/user/sign")]
pub async fn sign_in(
    state: web::Data<HttpState>,
    payload: web::Json<SignInRequest>,
) -> ApiResult<web::Json<SignInResponse>> {
    let SignInRequest { username, password } = payload.into_inner();
    let credentials =
        LoginCredentials::try_from_parts(&username, &password).map_err(account_validation_error)?;
    let token = state
        .accounts
        .sign_in(credentials)
        .await
        .map_err(map_credential_error)?;
    Ok(web::Json(SignInResponse {
        token: token.as_str().to_owned(),
    }))
}

/// Register a customer. The mobile number is the initial password.
#[utoipa::path(
    post,
    path = "/user/customer",
    request_body = CreateCustomerBody,
    responses(
        (status = 201, description = "Customer created", body = CreatedAccountResponse),
        (status = 400, description = "Invalid request", body = DomainError),
        (status = 401, description = "Unauthorised", body = DomainError),
        (status = 403, description = "Forbidden", body = DomainError),
        (status = 409, description = "Username already taken", body = DomainError),
        (status = 500, description = "Internal server error", body = DomainError)
    ),
    tags = ["users"],
    operation_id = "createCustomer"
)]
#[post("/user/customer")]
pub async fn create_customer(
    state: web::Data<HttpState>,
    caller: Authenticated,
    payload: web::Json<CreateCustomerBody>,
) -> ApiResult<HttpResponse> {
    caller.require(Capability::AdminConsole)?;
    let request = CreateCustomerRequest::try_from(payload.into_inner())?;
    let id = state.accounts.create_customer(request).await?;
    Ok(HttpResponse::Created().json(CreatedAccountResponse::from(id)))
}

/// Register an admin together with its manager profile.
#[utoipa::path(
    post,
    path = "/user/admin",
    request_body = CreateAdminBody,
    responses(
        (status = 201, description = "Admin created", body = CreatedAccountResponse),
        (status = 400, description = "Invalid request", body = DomainError),
        (status = 401, description = "Unauthorised", body = DomainError),
        (status = 403, description = "Forbidden", body = DomainError),
        (status = 409, description = "Username already taken", body = DomainError),
        (status = 500, description = "Internal server error", body = DomainError)
    ),
    tags = ["users"],
    operation_id = "createAdmin"
)]
#[post("/user/admin")]
pub async fn create_admin(
    state: web::Data<HttpState>,
    caller: Authenticated,
    payload: web::Json<CreateAdminBody>,
) -> ApiResult<HttpResponse> {
    caller.require(Capability::ManageAdmins)?;
    let request = CreateAdminRequest::try_from(payload.into_inner())?;
    let id = state.accounts.create_admin(request).await?;
    Ok(HttpResponse::Created().json(CreatedAccountResponse::from(id)))
}

/// Change the caller's own password.
#[utoipa::path(
    patch,
    path = "/user/admin/pw",
    request_body = UpdatePasswordBody,
    responses(
        (status = 204, description = "Password changed"),
        (status = 400, description = "Invalid request", body = DomainError),
        (status = 401, description = "Unauthorised or wrong password", body = DomainError),
        (status = 403, description = "Forbidden", body = DomainError),
        (status = 500, description = "Internal server error", body = DomainError)
    ),
    tags = ["users"],
    operation_id = "updateAdminPassword"
)]
#[patch("/user/admin/pw")]
pub async fn update_admin_password(
    state: web::Data<HttpState>,
    caller: Authenticated,
    payload: web::Json<UpdatePasswordBody>,
) -> ApiResult<HttpResponse> {
    caller.require(Capability::AdminConsole)?;
    let UpdatePasswordBody {
        old_password,
        new_password,
    } = payload.into_inner();
    let request = UpdateAdminPasswordRequest {
        user_id: caller.user_id(),
        old_password: validate_field(Password::new(old_password), OLD_PASSWORD)?,
        new_password: validate_field(Password::new(new_password), NEW_PASSWORD)?,
    };
    state
        .accounts
        .update_admin_password(request)
        .await
        .map_err(map_credential_error)?;
    Ok(HttpResponse::NoContent().finish())
}

/// Read the caller's admin profile.
#[utoipa::path(
    get,
    path = "/user/admin/me",
    responses(
        (status = 200, description = "Admin profile", body = AdminProfileResponse),
        (status = 401, description = "Unauthorised", body = DomainError),
        (status = 403, description = "Forbidden", body = DomainError),
        (status = 404, description = "Not found", body = DomainError),
        (status = 500, description = "Internal server error", body = DomainError)
    ),
    tags = ["users"],
    operation_id = "currentAdmin"
)]
#[get("/user/admin/me")]
pub async fn current_admin(
    state: web::Data<HttpState>,
    caller: Authenticated,
) -> ApiResult<web::Json<AdminProfileResponse>> {
    caller.require(Capability::AdminConsole)?;
    let profile = state.accounts.admin_profile(caller.user_id()).await?;
    Ok(web::Json(profile.into()))
}

/// Change the caller's username, name and nickname.
#[utoipa::path(
    put,
    path = "/user/admin/me",
    request_body = UpdateAdminInfoBody,
    responses(
        (status = 204, description = "Profile updated"),
        (status = 400, description = "Invalid request", body = DomainError),
        (status = 401, description = "Unauthorised", body = DomainError),
        (status = 403, description = "Forbidden", body = DomainError),
        (status = 404, description = "Not found", body = DomainError),
        (status = 409, description = "Username already taken", body = DomainError),
        (status = 500, description = "Internal server error", body = DomainError)
    ),
    tags = ["users"],
    operation_id = "updateAdminInfo"
)]
#[put("/user/admin/me")]
pub async fn update_admin_info(
    state: web::Data<HttpState>,
    caller: Authenticated,
    payload: web::Json<UpdateAdminInfoBody>,
) -> ApiResult<HttpResponse> {
    caller.require(Capability::AdminConsole)?;
    let UpdateAdminInfoBody {
        username,
        name,
        nickname,
    } = payload.into_inner();
    let request = UpdateAdminInfoRequest {
        user_id: caller.user_id(),
        username: validate_field(Username::new(&username), USERNAME)?,
        name: validate_field(PersonName::new(&name), NAME)?,
        nickname: validate_field(Nickname::new(&nickname), NICKNAME)?,
    };
    state.accounts.update_admin_info(request).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Overwrite another admin's profile and password without the old password.
#[utoipa::path(
    put,
    path = "/user/admin/{id}",
    params(("id" = Uuid, Path, description = "Admin user id")),
    request_body = ForceUpdateAdminBody,
    responses(
        (status = 204, description = "Admin updated"),
        (status = 400, description = "Invalid request", body = DomainError),
        (status = 401, description = "Unauthorised", body = DomainError),
        (status = 403, description = "Forbidden", body = DomainError),
        (status = 404, description = "Not found", body = DomainError),
        (status = 409, description = "Username already taken", body = DomainError),
        (status = 500, description = "Internal server error", body = DomainError)
    ),
    tags = ["users"],
    operation_id = "forceUpdateAdmin"
)]
#[put("/user/admin/{id}")]
pub async fn force_update_admin(
    state: web::Data<HttpState>,
    caller: Authenticated,
    path: web::Path<String>,
    payload: web::Json<ForceUpdateAdminBody>,
) -> ApiResult<HttpResponse> {
    caller.require(Capability::ManageAdmins)?;
    let user_id = parse_user_id(&path, ID)?;
    let ForceUpdateAdminBody {
        username,
        name,
        nickname,
        password,
    } = payload.into_inner();
    let request = ForceUpdateAdminRequest {
        user_id,
        username: validate_field(Username::new(&username), USERNAME)?,
        name: validate_field(PersonName::new(&name), NAME)?,
        nickname: validate_field(Nickname::new(&nickname), NICKNAME)?,
        password: validate_field(Password::new(password), PASSWORD)?,
    };
    state.accounts.force_update_admin(request).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Soft-delete a customer.
#[utoipa::path(
    delete,
    path = "/user/customer/{id}",
    params(("id" = Uuid, Path, description = "Customer user id")),
    responses(
        (status = 204, description = "Customer deleted"),
        (status = 400, description = "Invalid id", body = DomainError),
        (status = 401, description = "Unauthorised", body = DomainError),
        (status = 403, description = "Forbidden", body = DomainError),
        (status = 404, description = "Not found", body = DomainError),
        (status = 500, description = "Internal server error", body = DomainError)
    ),
    tags = ["users"],
    operation_id = "deleteCustomer"
)]
#[delete("/user/customer/{id}")]
pub async fn delete_customer(
    state: web::Data<HttpState>,
    caller: Authenticated,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    caller.require(Capability::AdminConsole)?;
    let user_id = parse_user_id(&path, ID)?;
    state.accounts.delete_customer(user_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Soft-delete an admin.
#[utoipa::path(
    delete,
    path = "/user/admin/{id}",
    params(("id" = Uuid, Path, description = "Admin user id")),
    responses(
        (status = 204, description = "Admin deleted"),
        (status = 400, description = "Invalid id", body = DomainError),
        (status = 401, description = "Unauthorised", body = DomainError),
        (status = 403, description = "Forbidden", body = DomainError),
        (status = 404, description = "Not found", body = DomainError),
        (status = 500, description = "Internal server error", body = DomainError)
    ),
    tags = ["users"],
    operation_id = "deleteAdmin"
)]
#[delete("/user/admin/{id}")]
pub async fn delete_admin(
    state: web::Data<HttpState>,
    caller: Authenticated,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    caller.require(Capability::ManageAdmins)?;
    let user_id = parse_user_id(&path, ID)?;
    state.accounts.delete_admin(user_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Register every account route. `/user/admin/me` precedes
/// `/user/admin/{id}` so the literal segment wins.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(sign_in)
        .service(create_customer)
        .service(create_admin)
        .service(update_admin_password)
        .service(current_admin)
        .service(update_admin_info)
        .service(force_update_admin)
        .service(delete_customer)
        .service(delete_admin);
}
