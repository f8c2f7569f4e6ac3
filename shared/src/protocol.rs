use crate::{OfferDetails, OfferSummary, SessionProfile, SystemAttributes, ValidatedGroupUrl};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
pub trait ApiRequest: Serialize + DeserializeOwned {
    /// The response type returned by this request.
    type Response: Serialize + DeserializeOwned;
    /// The URL path (or suffix).
    const PATH: &'static str;
    /// The HTTP method.
    const METHOD: HttpMethod;
}

// =========================================================
// Request Definitions
// =========================================================

/// Fetch the platform-wide configuration blob.
#[derive(Debug, Serialize, Deserialize)]
pub struct FetchSystemAttributesRequest;

impl ApiRequest for FetchSystemAttributesRequest {
    type Response = SystemAttributes;
    const PATH: &'static str = "/api/system-attributes";
    const METHOD: HttpMethod = HttpMethod::Get;
}

/// Resolve the `:groupUserName` / `:courseUserName` path segments of a
/// navigation into a real, accessible group chain.
///
/// Fails with NotFound when either segment names no reachable group.
#[derive(Debug, Serialize, Deserialize)]
pub struct ValidateGroupUrlRequest {
    pub group_user_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_user_name: Option<String>,
}

impl ApiRequest for ValidateGroupUrlRequest {
    type Response = ValidatedGroupUrl;
    const PATH: &'static str = "/api/groups/validate";
    const METHOD: HttpMethod = HttpMethod::Post;
}

/// Restore the session behind a previously issued auth token.
/// The token travels in the auth header, not the body.
#[derive(Debug, Serialize, Deserialize)]
pub struct FetchSessionRequest;

impl ApiRequest for FetchSessionRequest {
    type Response = SessionProfile;
    const PATH: &'static str = "/api/session";
    const METHOD: HttpMethod = HttpMethod::Get;
}

/// Credential sign-in.
#[derive(Debug, Serialize, Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SignInResponse {
    pub token: String,
    pub profile: SessionProfile,
}

impl ApiRequest for SignInRequest {
    type Response = SignInResponse;
    const PATH: &'static str = "/api/auth/signin";
    const METHOD: HttpMethod = HttpMethod::Post;
}

/// Account registration.
///
/// Successful registration signs the new user in, so the response is
/// the same token + profile pair as [`SignInRequest`].
#[derive(Debug, Serialize, Deserialize)]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    pub display_name: String,
    pub role: crate::UserRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_user_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invited_id: Option<String>,
}

impl ApiRequest for SignUpRequest {
    type Response = SignInResponse;
    const PATH: &'static str = "/api/auth/signup";
    const METHOD: HttpMethod = HttpMethod::Post;
}

/// Invalidate the current token server-side.
#[derive(Debug, Serialize, Deserialize)]
pub struct SignOutRequest;

impl ApiRequest for SignOutRequest {
    type Response = ();
    const PATH: &'static str = "/api/auth/signout";
    const METHOD: HttpMethod = HttpMethod::Post;
}

/// List the offers visible in a group (or platform-wide when no filter).
#[derive(Debug, Serialize, Deserialize)]
pub struct ListOffersRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_user_name: Option<String>,
}

impl ApiRequest for ListOffersRequest {
    type Response = Vec<OfferSummary>;
    const PATH: &'static str = "/api/offers/list";
    const METHOD: HttpMethod = HttpMethod::Post;
}

/// Fetch one offer for the public project page.
#[derive(Debug, Serialize, Deserialize)]
pub struct FetchOfferRequest {
    pub project_id: String,
}

impl ApiRequest for FetchOfferRequest {
    type Response = OfferDetails;
    const PATH: &'static str = "/api/offers/fetch";
    const METHOD: HttpMethod = HttpMethod::Post;
}

/// Create (or, with `edit_project_id`, update) an offer inside a group.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateOfferRequest {
    pub group_user_name: String,
    pub project_name: String,
    pub description: String,
    pub target_amount_pence: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edit_project_id: Option<String>,
}

impl ApiRequest for CreateOfferRequest {
    type Response = OfferSummary;
    const PATH: &'static str = "/api/offers/create";
    const METHOD: HttpMethod = HttpMethod::Post;
}
