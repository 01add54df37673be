//! Founder and startup profile entities

use super::log::{FounderLogEntry, ProblemSolverSession};
use serde::{Deserialize, Serialize};

/// Usage numbers a founder reports for their startup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartupMetrics {
    pub weekly_active_users: u64,
    pub monthly_active_users: u64,
    pub total_users: u64,
    /// In INR
    pub monthly_revenue: f64,
    /// Percentage
    pub engagement_rate: f64,
    /// New users per week
    pub user_acquisition: u64,
    /// Percentage
    pub churn_rate: f64,
}

/// A founder's startup, as used by most generation features.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartupProfile {
    pub name: String,
    pub one_liner: String,
    /// Industry, e.g. "EdTech", "FinTech", "B2B SaaS"
    pub domain: String,
    /// e.g. "Software", "Marketplace", "AI tool"
    pub product_type: String,
    pub target_audience: String,
    /// e.g. "Idea", "MVP", "Early Traction", "Series A"
    pub stage: String,
    pub team_members: String,
    pub has_tech_team: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_acquisition_channels: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<StartupMetrics>,
}

/// A LEAP community member.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    pub full_name: String,
    /// "High School", "Under-Graduate", "Post-Graduate" or "Other"
    pub education_level: String,
    pub institution: String,
    pub degree: String,
    pub graduation_year: String,
    /// Comma-separated
    pub skills: String,
    /// Comma-separated, doubles as preferred domains
    pub interests: String,
    pub is_admin: bool,
    pub bio: String,
    pub profile_picture_url: String,
    /// User ids
    #[serde(default)]
    pub followers: Vec<String>,
    /// User ids
    #[serde(default)]
    pub following: Vec<String>,
    /// e.g. "Builder", "Designer", "Student Founder"
    pub role: String,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub startup: Option<StartupProfile>,
    #[serde(default)]
    pub founder_logs: Vec<FounderLogEntry>,
    #[serde(default)]
    pub problem_solver_history: Vec<ProblemSolverSession>,
}

impl User {
    pub fn follows(&self, user_id: &str) -> bool {
        self.following.iter().any(|id| id == user_id)
    }

    pub fn is_followed_by(&self, user_id: &str) -> bool {
        self.followers.iter().any(|id| id == user_id)
    }
}

/// Fields supplied at signup; everything else is derived.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub education_level: String,
    pub institution: String,
    pub degree: String,
    pub graduation_year: String,
    pub skills: String,
    pub interests: String,
    pub role: String,
    pub location: String,
    #[serde(default)]
    pub startup: Option<StartupProfile>,
}

/// A partial profile edit. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileUpdate {
    pub full_name: Option<String>,
    pub bio: Option<String>,
    pub profile_picture_url: Option<String>,
    pub institution: Option<String>,
    pub degree: Option<String>,
    pub graduation_year: Option<String>,
    pub skills: Option<String>,
    pub interests: Option<String>,
    pub role: Option<String>,
    pub location: Option<String>,
    pub startup: Option<StartupProfile>,
}

impl ProfileUpdate {
    /// Apply every set field onto `user`.
    pub fn apply_to(self, user: &mut User) {
        let ProfileUpdate {
            full_name,
            bio,
            profile_picture_url,
            institution,
            degree,
            graduation_year,
            skills,
            interests,
            role,
            location,
            startup,
        } = self;

        if let Some(v) = full_name {
            user.full_name = v;
        }
        if let Some(v) = bio {
            user.bio = v;
        }
        if let Some(v) = profile_picture_url {
            user.profile_picture_url = v;
        }
        if let Some(v) = institution {
            user.institution = v;
        }
        if let Some(v) = degree {
            user.degree = v;
        }
        if let Some(v) = graduation_year {
            user.graduation_year = v;
        }
        if let Some(v) = skills {
            user.skills = v;
        }
        if let Some(v) = interests {
            user.interests = v;
        }
        if let Some(v) = role {
            user.role = v;
        }
        if let Some(v) = location {
            user.location = v;
        }
        if let Some(v) = startup {
            user.startup = Some(v);
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == ProfileUpdate::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_deserializes_camel_case_with_missing_history() {
        let json = r#"{
            "id": "user-1", "username": "shreya", "email": "shreya@iitb.ac.in",
            "fullName": "Shreya Kolhatkar", "educationLevel": "Under-Graduate",
            "institution": "IIT Bombay", "degree": "B.Tech in CS", "graduationYear": "2025",
            "skills": "React, Python", "interests": "EdTech, AI", "isAdmin": false,
            "bio": "", "profilePictureUrl": "", "role": "Founder", "location": "Mumbai, India",
            "startup": {
                "name": "Attend.ly", "oneLiner": "AI attendance", "domain": "EdTech",
                "productType": "Software", "targetAudience": "College students",
                "stage": "MVP", "teamMembers": "1 founder", "hasTechTeam": true
            }
        }"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.full_name, "Shreya Kolhatkar");
        assert!(user.followers.is_empty());
        assert!(user.founder_logs.is_empty());
        assert_eq!(user.startup.as_ref().unwrap().name, "Attend.ly");
        assert!(user.startup.unwrap().metrics.is_none());
    }

    #[test]
    fn test_profile_update_only_touches_set_fields() {
        let mut user = User {
            full_name: "Old".to_string(),
            location: "Pune, India".to_string(),
            ..User::default()
        };
        ProfileUpdate {
            full_name: Some("New".to_string()),
            ..ProfileUpdate::default()
        }
        .apply_to(&mut user);

        assert_eq!(user.full_name, "New");
        assert_eq!(user.location, "Pune, India");
    }

    #[test]
    fn test_empty_update() {
        assert!(ProfileUpdate::default().is_empty());
        assert!(
            !ProfileUpdate {
                bio: Some(String::new()),
                ..ProfileUpdate::default()
            }
            .is_empty()
        );
    }
}
