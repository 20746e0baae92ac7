//! `authentication.k8s.io/v1` token reviews.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::k8sapitypes::ObjectMeta;
use crate::record::impl_record;

/// Information about an authenticated user.
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    /// Any additional information provided by the authenticator.  Keys are
    /// authenticator-defined and kept verbatim.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra: Option<BTreeMap<String, Vec<String>>>,
    /// The names of groups this user is a part of
    #[serde(skip_serializing_if = "Option::is_none")]
    pub groups: Option<Vec<String>>,
    /// A unique value that identifies this user across time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    /// The name that uniquely identifies this user among all active users
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

/// The token to authenticate.
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokenReviewSpec {
    /// Audiences the resource server presenting the token identifies as
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audiences: Option<Vec<String>>,
    /// The opaque bearer token
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

/// The result of the token authentication request.
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokenReviewStatus {
    /// Audience identifiers chosen by the authenticator
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audiences: Option<Vec<String>>,
    /// Whether the token was associated with a known user
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authenticated: Option<bool>,
    /// Why the token could not be checked
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// The user associated with the token
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserInfo>,
}

/// Attempts to authenticate a token to a known user.
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokenReview {
    /// Versioned schema of this representation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
    /// REST resource this object represents
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Standard object metadata
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ObjectMeta>,
    /// The request being evaluated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spec: Option<TokenReviewSpec>,
    /// Filled in by the server
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TokenReviewStatus>,
}

impl_record!("authentication.k8s.io/v1" =>
    UserInfo,
    TokenReviewSpec,
    TokenReviewStatus,
    TokenReview,
);
