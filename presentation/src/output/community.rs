//! Console rendering for community store views

use crate::output::console::ConsoleFormatter;
use colored::Colorize;
use leap_domain::core::string::truncate;
use leap_domain::{ChatMessage, FounderLogEntry, Post, ProblemSolverSession, User};

const PREVIEW_LEN: usize = 80;

/// Formats users, posts and messages for the terminal
pub struct CommunityFormatter<'a> {
    users: &'a [User],
}

impl<'a> CommunityFormatter<'a> {
    pub fn new(users: &'a [User]) -> Self {
        Self { users }
    }

    fn handle(&self, user_id: &str) -> String {
        self.users
            .iter()
            .find(|u| u.id == user_id)
            .map(|u| format!("@{}", u.username))
            .unwrap_or_else(|| "(deleted user)".to_string())
    }

    pub fn user_card(&self, user: &User) -> String {
        let mut out = format!(
            "{} {}\n",
            user.full_name.bold(),
            format!("@{}", user.username).dimmed()
        );
        out.push_str(&ConsoleFormatter::field("Role", &user.role));
        out.push_str(&ConsoleFormatter::field("Location", &user.location));
        out.push_str(&ConsoleFormatter::field("Bio", &user.bio));
        out.push_str(&ConsoleFormatter::field(
            "Education",
            &[user.degree.as_str(), user.institution.as_str(), user.graduation_year.as_str()]
                .iter()
                .filter(|s| !s.is_empty())
                .copied()
                .collect::<Vec<_>>()
                .join(", "),
        ));
        out.push_str(&ConsoleFormatter::field("Skills", &user.skills));
        out.push_str(&ConsoleFormatter::field("Interests", &user.interests));
        out.push_str(&format!(
            "{} followers, {} following\n",
            user.followers.len(),
            user.following.len()
        ));

        if let Some(startup) = &user.startup {
            out.push_str(&ConsoleFormatter::section_header(&format!("Startup: {}", startup.name)));
            out.push_str(&format!("{}\n", startup.one_liner));
            out.push_str(&ConsoleFormatter::field("Domain", &startup.domain));
            out.push_str(&ConsoleFormatter::field("Stage", &startup.stage));
            out.push_str(&ConsoleFormatter::field("Audience", &startup.target_audience));
            if let Some(m) = &startup.metrics {
                out.push_str(&format!(
                    "  WAU {}  MAU {}  users {}  revenue {:.0}  churn {:.1}%\n",
                    m.weekly_active_users,
                    m.monthly_active_users,
                    m.total_users,
                    m.monthly_revenue,
                    m.churn_rate
                ));
            }
        }
        out
    }

    /// One line per user; `viewer` marks who they follow
    pub fn user_list(&self, viewer: Option<&User>) -> String {
        self.users
            .iter()
            .map(|user| {
                let marker = match viewer {
                    Some(v) if v.id == user.id => " (you)".green().to_string(),
                    Some(v) if v.follows(&user.id) => " (following)".dimmed().to_string(),
                    _ => String::new(),
                };
                format!(
                    "  {:<16} {}{}\n",
                    format!("@{}", user.username),
                    user.full_name,
                    marker
                )
            })
            .collect()
    }

    pub fn post(&self, post: &Post) -> String {
        let mut out = format!(
            "{} {} {}\n{}\n",
            self.handle(&post.author_id).bold(),
            post.timestamp.format("%Y-%m-%d %H:%M").to_string().dimmed(),
            format!("[{}]", post.id).dimmed(),
            post.content
        );
        out.push_str(&format!(
            "  {} likes, {} comments\n",
            post.likes.len(),
            post.comments.len()
        ));
        for comment in &post.comments {
            out.push_str(&format!(
                "    {} {}\n",
                format!("{}:", self.handle(&comment.author_id)).cyan(),
                comment.content
            ));
        }
        out
    }

    pub fn feed(&self, posts: &[&Post]) -> String {
        if posts.is_empty() {
            return "No posts yet.\n".dimmed().to_string();
        }
        posts
            .iter()
            .map(|post| self.post(post))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn conversation(&self, messages: &[&ChatMessage], viewer_id: &str) -> String {
        if messages.is_empty() {
            return "No messages yet.\n".dimmed().to_string();
        }
        messages
            .iter()
            .map(|m| {
                let who = if m.sender_id == viewer_id {
                    "you".green().bold()
                } else {
                    self.handle(&m.sender_id).cyan().bold()
                };
                format!(
                    "{} {} {}\n",
                    m.timestamp.format("%H:%M").to_string().dimmed(),
                    who,
                    m.text
                )
            })
            .collect()
    }

    pub fn founder_logs(logs: &[FounderLogEntry]) -> String {
        if logs.is_empty() {
            return "No check-ins recorded.\n".dimmed().to_string();
        }
        logs.iter()
            .map(|log| {
                format!(
                    "{} burnout {:.0}/100  {}\n  {}\n",
                    log.date.format("%Y-%m-%d").to_string().bold(),
                    log.analysis.burnout_score,
                    log.lesson.title.yellow(),
                    truncate(&log.checkin.biggest_blocker, PREVIEW_LEN)
                )
            })
            .collect()
    }

    pub fn problem_history(sessions: &[ProblemSolverSession]) -> String {
        if sessions.is_empty() {
            return "No problem-solver sessions recorded.\n".dimmed().to_string();
        }
        sessions
            .iter()
            .map(|s| {
                format!(
                    "{} {}\n  {}\n",
                    s.date.format("%Y-%m-%d").to_string().bold(),
                    truncate(&s.problem, PREVIEW_LEN),
                    truncate(&s.solution.root_cause.diagnosis, PREVIEW_LEN).dimmed()
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use leap_domain::CommunitySnapshot;

    #[test]
    fn test_feed_names_authors() {
        colored::control::set_override(false);
        let snapshot = CommunitySnapshot::seed();
        let formatter = CommunityFormatter::new(&snapshot.users);
        let posts: Vec<&Post> = snapshot.posts.iter().collect();

        let out = formatter.feed(&posts);
        let author = snapshot
            .users
            .iter()
            .find(|u| u.id == snapshot.posts[0].author_id)
            .unwrap();
        assert!(out.contains(&format!("@{}", author.username)));
    }

    #[test]
    fn test_empty_views() {
        colored::control::set_override(false);
        let formatter = CommunityFormatter::new(&[]);
        assert_eq!(formatter.feed(&[]), "No posts yet.\n");
        assert_eq!(formatter.conversation(&[], "me"), "No messages yet.\n");
        assert_eq!(formatter.handle("ghost"), "(deleted user)");
    }

    #[test]
    fn test_user_list_marks_viewer() {
        colored::control::set_override(false);
        let snapshot = CommunitySnapshot::seed();
        let formatter = CommunityFormatter::new(&snapshot.users);
        let viewer = &snapshot.users[0];

        let out = formatter.user_list(Some(viewer));
        assert!(out.contains("(you)"));
        assert_eq!(out.lines().count(), snapshot.users.len());
    }
}
