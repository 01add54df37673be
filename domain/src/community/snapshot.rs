//! Persisted state of the community store

use super::profile::{StartupMetrics, StartupProfile, User};
use super::social::{Comment, ChatMessage, Post};
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

/// Current on-disk layout version
pub const SNAPSHOT_VERSION: u32 = 1;

/// Everything the community store holds, as one serializable value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunitySnapshot {
    pub version: u32,
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub posts: Vec<Post>,
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
    #[serde(default)]
    pub current_user_id: Option<String>,
}

impl Default for CommunitySnapshot {
    fn default() -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            users: Vec::new(),
            posts: Vec::new(),
            messages: Vec::new(),
            current_user_id: None,
        }
    }
}

impl CommunitySnapshot {
    /// Starter community used when nothing has been persisted yet.
    pub fn seed() -> Self {
        let now = Utc::now();

        let shreya = User {
            id: "user-1".to_string(),
            username: "shreya".to_string(),
            email: "shreya@iitb.ac.in".to_string(),
            full_name: "Shreya Kolhatkar".to_string(),
            education_level: "Under-Graduate".to_string(),
            institution: "IIT Bombay".to_string(),
            degree: "B.Tech in CS".to_string(),
            graduation_year: "2025".to_string(),
            skills: "React, Python, UI/UX".to_string(),
            interests: "EdTech, AI".to_string(),
            bio: "Building the future of education, one line of code at a time.".to_string(),
            profile_picture_url: avatar_url("Shreya"),
            followers: vec!["admin-1".to_string()],
            following: vec!["admin-1".to_string(), "user-2".to_string()],
            role: "Founder".to_string(),
            location: "Mumbai, India".to_string(),
            startup: Some(StartupProfile {
                name: "Attend.ly".to_string(),
                one_liner: "An AI-powered attendance tracker for college students.".to_string(),
                domain: "EdTech".to_string(),
                product_type: "Software".to_string(),
                target_audience: "College students in India".to_string(),
                stage: "MVP".to_string(),
                team_members: "1 founder".to_string(),
                has_tech_team: true,
                website: Some("https://attendly.leap.io".to_string()),
                customer_acquisition_channels: None,
                metrics: Some(StartupMetrics {
                    weekly_active_users: 50,
                    monthly_active_users: 200,
                    total_users: 500,
                    monthly_revenue: 0.0,
                    engagement_rate: 15.0,
                    user_acquisition: 10,
                    churn_rate: 8.0,
                }),
            }),
            ..User::default()
        };

        let neha = User {
            id: "user-2".to_string(),
            username: "neha".to_string(),
            email: "neha@srishti.ac.in".to_string(),
            full_name: "Neha Sharma".to_string(),
            education_level: "Under-Graduate".to_string(),
            institution: "Srishti Institute of Art, Design and Technology".to_string(),
            degree: "B.Des in UI/UX".to_string(),
            graduation_year: "2025".to_string(),
            skills: "Figma, Prototyping, User Research".to_string(),
            interests: "HealthTech, UI/UX".to_string(),
            bio: "Designing user-centric products that make a difference.".to_string(),
            profile_picture_url: avatar_url("Neha"),
            followers: vec!["user-1".to_string()],
            following: vec!["admin-1".to_string()],
            role: "Designer".to_string(),
            location: "Bengaluru, India".to_string(),
            ..User::default()
        };

        let mentor = User {
            id: "admin-1".to_string(),
            username: "leap-mentor".to_string(),
            email: "mentor@leap.io".to_string(),
            full_name: "LEAP Mentor".to_string(),
            education_level: "Other".to_string(),
            institution: "LEAP".to_string(),
            degree: "Mentor".to_string(),
            graduation_year: "N/A".to_string(),
            skills: "Entrepreneurship, Scaling, Product Vision".to_string(),
            interests: "AI, EdTech, FinTech, Funding".to_string(),
            is_admin: true,
            bio: "Helping the next generation of Indian founders build world-class products."
                .to_string(),
            profile_picture_url: avatar_url("LeapMentor"),
            followers: vec!["user-1".to_string(), "user-2".to_string()],
            following: vec!["user-1".to_string()],
            role: "Mentor".to_string(),
            location: "Bengaluru, India".to_string(),
            ..User::default()
        };

        let posts = vec![
            Post {
                id: "post-1".to_string(),
                author_id: "user-1".to_string(),
                content: "Just shipped the first version of my attendance tracker! Looking for feedback. #MadeWithLEAP #EdTech".to_string(),
                timestamp: now - Duration::hours(2),
                likes: vec!["admin-1".to_string(), "user-2".to_string()],
                comments: vec![Comment {
                    id: "comment-1".to_string(),
                    author_id: "admin-1".to_string(),
                    content: "Great initiative, Shreya! Happy to see this come to life.".to_string(),
                    timestamp: now - Duration::hours(1),
                }],
            },
            Post {
                id: "post-2".to_string(),
                author_id: "admin-1".to_string(),
                content: "To all student builders: don't wait for the perfect idea. Start building, get feedback, and iterate. #StartupIndia".to_string(),
                timestamp: now - Duration::days(1),
                likes: vec!["user-1".to_string()],
                comments: Vec::new(),
            },
        ];

        Self {
            version: SNAPSHOT_VERSION,
            users: vec![shreya, neha, mentor],
            posts,
            messages: Vec::new(),
            current_user_id: None,
        }
    }
}

/// Deterministic avatar for a seed string
pub fn avatar_url(seed: &str) -> String {
    let encoded: String = seed
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || "-_.~".contains(c) {
                c.to_string()
            } else {
                let mut buf = [0u8; 4];
                c.encode_utf8(&mut buf)
                    .bytes()
                    .map(|b| format!("%{:02X}", b))
                    .collect()
            }
        })
        .collect();
    format!("https://api.dicebear.com/8.x/adventurer/svg?seed={encoded}&backgroundColor=b6e3f4,c0aede")
}
