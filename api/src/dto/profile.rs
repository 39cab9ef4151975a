//! DTOs for profile endpoints

use serde::{Deserialize, Serialize};

use cv_core::services::profile::{ProfileChanges, ProfileOverview};

use super::resume::ResumeInfo;

/// Body of PUT/PATCH /api/profile/update; absent fields are untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub country: Option<String>,
    pub governorate: Option<String>,
}

impl From<UpdateProfileRequest> for ProfileChanges {
    fn from(request: UpdateProfileRequest) -> Self {
        Self {
            username: request.username,
            email: request.email,
            bio: request.bio,
            location: request.location,
            country: request.country,
            governorate: request.governorate,
        }
    }
}

/// The authenticated account's own profile page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub username: String,
    pub email: String,
    pub bio: String,
    pub location: String,
    pub country: String,
    pub governorate: String,
    pub resume: Option<ResumeInfo>,
}

impl From<&ProfileOverview> for ProfileResponse {
    fn from(overview: &ProfileOverview) -> Self {
        Self {
            username: overview.account.username.clone(),
            email: overview.account.email.clone(),
            bio: overview.profile.bio.clone(),
            location: overview.profile.location.clone(),
            country: overview.profile.country.clone(),
            governorate: overview.profile.governorate.clone(),
            resume: overview.resume.as_ref().map(ResumeInfo::from),
        }
    }
}

/// Public profile view; email stays private
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicProfileResponse {
    pub username: String,
    pub bio: String,
    pub location: String,
    pub country: String,
    pub governorate: String,
    pub has_resume: bool,
}

impl From<&ProfileOverview> for PublicProfileResponse {
    fn from(overview: &ProfileOverview) -> Self {
        Self {
            username: overview.account.username.clone(),
            bio: overview.profile.bio.clone(),
            location: overview.profile.location.clone(),
            country: overview.profile.country.clone(),
            governorate: overview.profile.governorate.clone(),
            has_resume: overview.resume.is_some(),
        }
    }
}
