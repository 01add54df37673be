//! Turning command-line arguments and files into domain values

use anyhow::{Context, Result, bail};
use leap_domain::feature::examiner::TranscriptLine;
use leap_domain::{Attachment, NewUser, ProfileUpdate, StartupMetrics, StartupProfile};
use leap_presentation::cli::commands::{SignupArgs, StartupArgs, UpdateArgs};
use std::io::Read;
use std::path::Path;

const DEFAULT_SPEAKER: &str = "Candidate";

/// Read a file, or stdin when the path is `-` or absent
pub fn read_text(path: Option<&Path>) -> Result<String> {
    match path {
        Some(p) if p != Path::new("-") => {
            std::fs::read_to_string(p).with_context(|| format!("Could not read {}", p.display()))
        }
        _ => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Could not read stdin")?;
            Ok(text)
        }
    }
}

/// One `Speaker: text` line per turn; lines without a speaker continue the previous turn.
pub fn parse_transcript(text: &str) -> Vec<TranscriptLine> {
    let mut lines: Vec<TranscriptLine> = Vec::new();
    for raw in text.lines() {
        let raw = raw.trim();
        if raw.is_empty() {
            continue;
        }
        match raw.split_once(':') {
            Some((speaker, said)) if is_speaker(speaker, said) => {
                lines.push(TranscriptLine::new(speaker.trim(), said.trim()));
            }
            _ => match lines.last_mut() {
                Some(last) => {
                    last.text.push(' ');
                    last.text.push_str(raw);
                }
                None => lines.push(TranscriptLine::new(DEFAULT_SPEAKER, raw)),
            },
        }
    }
    lines
}

/// `Name: text`, but not the scheme of a bare URL
fn is_speaker(label: &str, rest: &str) -> bool {
    let label = label.trim();
    !label.is_empty() && label.len() <= 32 && !rest.starts_with("//")
}

/// Load an interview snapshot as an inline image
pub fn load_snapshot(path: &Path) -> Result<Attachment> {
    let Some(mime) = image_mime(path) else {
        bail!(
            "Unsupported snapshot type: {} (use png, jpeg, webp or gif)",
            path.display()
        );
    };
    let data = std::fs::read(path).with_context(|| format!("Could not read {}", path.display()))?;
    Ok(Attachment::new(mime, data))
}

fn image_mime(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        _ => None,
    }
}

/// Expand short platform names to the labels shown in prompts
pub fn platform_name(raw: &str) -> String {
    match raw.trim().to_ascii_lowercase().as_str() {
        "instagram" | "reels" | "instagram-reels" => "Instagram Reels".to_string(),
        "youtube" | "shorts" | "youtube-shorts" => "YouTube Shorts".to_string(),
        "linkedin" => "LinkedIn".to_string(),
        "tiktok" => "TikTok".to_string(),
        "x" | "twitter" => "X (Twitter)".to_string(),
        _ => raw.trim().to_string(),
    }
}

fn has_metrics(args: &StartupArgs) -> bool {
    args.weekly_active_users.is_some()
        || args.monthly_active_users.is_some()
        || args.total_users.is_some()
        || args.monthly_revenue.is_some()
        || args.engagement_rate.is_some()
        || args.user_acquisition.is_some()
        || args.churn_rate.is_some()
}

/// Overlay the given startup fields on `existing`.
///
/// Returns `None` when no `--startup-name` was given.
pub fn startup_profile(args: &StartupArgs, existing: Option<&StartupProfile>) -> Option<StartupProfile> {
    let name = args.startup_name.as_ref()?;
    let mut profile = existing.cloned().unwrap_or_default();
    profile.name = name.clone();

    let overlay = [
        (&args.one_liner, &mut profile.one_liner),
        (&args.startup_domain, &mut profile.domain),
        (&args.product_type, &mut profile.product_type),
        (&args.target_audience, &mut profile.target_audience),
        (&args.startup_stage, &mut profile.stage),
        (&args.team, &mut profile.team_members),
    ];
    for (value, field) in overlay {
        if let Some(v) = value {
            *field = v.clone();
        }
    }
    if args.has_tech_team {
        profile.has_tech_team = true;
    }
    if let Some(site) = &args.website {
        profile.website = Some(site.clone());
    }

    if has_metrics(args) {
        let mut m: StartupMetrics = profile.metrics.take().unwrap_or_default();
        m.weekly_active_users = args.weekly_active_users.unwrap_or(m.weekly_active_users);
        m.monthly_active_users = args.monthly_active_users.unwrap_or(m.monthly_active_users);
        m.total_users = args.total_users.unwrap_or(m.total_users);
        m.monthly_revenue = args.monthly_revenue.unwrap_or(m.monthly_revenue);
        m.engagement_rate = args.engagement_rate.unwrap_or(m.engagement_rate);
        m.user_acquisition = args.user_acquisition.unwrap_or(m.user_acquisition);
        m.churn_rate = args.churn_rate.unwrap_or(m.churn_rate);
        profile.metrics = Some(m);
    }
    Some(profile)
}

pub fn new_user(args: &SignupArgs) -> NewUser {
    NewUser {
        username: args.username.clone(),
        email: args.email.clone(),
        full_name: args.full_name.clone(),
        education_level: args.education_level.clone(),
        institution: args.institution.clone(),
        degree: args.degree.clone(),
        graduation_year: args.graduation_year.clone(),
        skills: args.skills.clone(),
        interests: args.interests.clone(),
        role: args.role.clone(),
        location: args.location.clone(),
        startup: startup_profile(&args.startup, None),
    }
}

pub fn profile_update(args: &UpdateArgs, existing: Option<&StartupProfile>) -> ProfileUpdate {
    ProfileUpdate {
        full_name: args.full_name.clone(),
        bio: args.bio.clone(),
        profile_picture_url: args.avatar_url.clone(),
        institution: args.institution.clone(),
        degree: args.degree.clone(),
        graduation_year: args.graduation_year.clone(),
        skills: args.skills.clone(),
        interests: args.interests.clone(),
        role: args.role.clone(),
        location: args.location.clone(),
        startup: startup_profile(&args.startup, existing),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_transcript_speakers_and_continuations() {
        let text = "Interviewer: Tell me about a project.\n\
                    Candidate: I built a tutoring app.\n\
                    It has 300 users.\n\
                    \n\
                    Interviewer: Why?";
        let lines = parse_transcript(text);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1].speaker, "Candidate");
        assert_eq!(lines[1].text, "I built a tutoring app. It has 300 users.");
        assert_eq!(lines[2].text, "Why?");
    }

    #[test]
    fn test_parse_transcript_without_labels() {
        let lines = parse_transcript("see https://example.com for details");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].speaker, DEFAULT_SPEAKER);
        assert!(parse_transcript("  \n ").is_empty());
    }

    #[test]
    fn test_platform_name() {
        assert_eq!(platform_name("instagram"), "Instagram Reels");
        assert_eq!(platform_name(" YouTube "), "YouTube Shorts");
        assert_eq!(platform_name("Threads"), "Threads");
    }

    #[test]
    fn test_image_mime() {
        assert_eq!(image_mime(Path::new("shot.PNG")), Some("image/png"));
        assert_eq!(image_mime(Path::new("a.jpeg")), Some("image/jpeg"));
        assert_eq!(image_mime(Path::new("notes.txt")), None);
        assert_eq!(image_mime(Path::new("noext")), None);
    }

    #[test]
    fn test_startup_profile_requires_name() {
        assert!(startup_profile(&StartupArgs::default(), None).is_none());
    }

    #[test]
    fn test_startup_profile_overlays_existing() {
        let existing = StartupProfile {
            name: "Old".to_string(),
            one_liner: "Kept".to_string(),
            stage: "Idea".to_string(),
            metrics: Some(StartupMetrics {
                total_users: 50,
                churn_rate: 9.0,
                ..StartupMetrics::default()
            }),
            ..StartupProfile::default()
        };
        let args = StartupArgs {
            startup_name: Some("Sproutly".to_string()),
            startup_stage: Some("MVP".to_string()),
            churn_rate: Some(4.0),
            ..StartupArgs::default()
        };

        let profile = startup_profile(&args, Some(&existing)).unwrap();
        assert_eq!(profile.name, "Sproutly");
        assert_eq!(profile.one_liner, "Kept");
        assert_eq!(profile.stage, "MVP");
        let metrics = profile.metrics.unwrap();
        assert_eq!(metrics.total_users, 50);
        assert_eq!(metrics.churn_rate, 4.0);
    }

    #[test]
    fn test_load_snapshot_rejects_unknown_type() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "x").unwrap();
        assert!(load_snapshot(&path).is_err());

        let png = dir.path().join("shot.png");
        std::fs::write(&png, [0x89, b'P', b'N', b'G']).unwrap();
        let attachment = load_snapshot(&png).unwrap();
        assert_eq!(attachment.mime_type, "image/png");
        assert_eq!(attachment.data.len(), 4);
    }
}
