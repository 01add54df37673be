//! `leap community ...` commands

use crate::input;
use anyhow::{Context, Result, anyhow};
use leap_application::CommunityService;
use leap_domain::{OutputFormat, User};
use leap_infrastructure::JsonFileSnapshotRepository;
use leap_presentation::{CommunityCommand, CommunityFormatter, OutputConfig};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

type Community = CommunityService<JsonFileSnapshotRepository>;

pub fn run(command: CommunityCommand, store_path: PathBuf, output: &OutputConfig) -> Result<()> {
    let mut community: Community =
        CommunityService::open(Arc::new(JsonFileSnapshotRepository::new(store_path)))
            .context("Could not open the community store")?;
    let json = output.format == OutputFormat::Json;

    match command {
        CommunityCommand::Signup(args) => {
            let user = community.signup(input::new_user(&args))?;
            println!("Welcome, {}! You are signed in as @{}.", user.full_name, user.username);
        }
        CommunityCommand::Login { username } => {
            let user = community.sign_in(&username)?;
            println!("Signed in as @{}.", user.username);
        }
        CommunityCommand::Logout => {
            community.sign_out()?;
            println!("Signed out.");
        }
        CommunityCommand::Whoami => {
            let user = signed_in(&community)?;
            show(json, user, || CommunityFormatter::new(community.users()).user_card(user))?;
        }
        CommunityCommand::Users => {
            let formatter = CommunityFormatter::new(community.users());
            show(json, community.users(), || formatter.user_list(community.current_user()))?;
        }
        CommunityCommand::Profile { username } => {
            let user = match username {
                Some(name) => community
                    .user_by_username(&name)
                    .ok_or_else(|| anyhow!("No member with username '{name}'"))?,
                None => signed_in(&community)?,
            };
            show(json, user, || CommunityFormatter::new(community.users()).user_card(user))?;
        }
        CommunityCommand::Update(args) => {
            let existing = signed_in(&community)?.startup.clone();
            let update = input::profile_update(&args, existing.as_ref());
            if update.is_empty() {
                println!("Nothing to update.");
            } else {
                let user = community.update_profile(update)?;
                println!("Profile updated for @{}.", user.username);
            }
        }
        CommunityCommand::Follow { username } => {
            let id = user_id(&community, &username)?;
            community.follow(&id)?;
            println!("Following @{username}.");
        }
        CommunityCommand::Unfollow { username } => {
            let id = user_id(&community, &username)?;
            community.unfollow(&id)?;
            println!("Unfollowed @{username}.");
        }
        CommunityCommand::Post { content } => {
            let post = community.create_post(&content)?;
            println!("Posted [{}].", post.id);
        }
        CommunityCommand::Like { post_id } => {
            let liked = community.toggle_like(&post_id)?;
            println!("{} [{post_id}].", if liked { "Liked" } else { "Unliked" });
        }
        CommunityCommand::Comment { post_id, content } => {
            let comment = community.add_comment(&post_id, &content)?;
            println!("Commented [{}].", comment.id);
        }
        CommunityCommand::Feed { limit } => {
            let mut posts = community.feed();
            if let Some(limit) = limit {
                posts.truncate(limit);
            }
            show(json, &posts, || CommunityFormatter::new(community.users()).feed(&posts))?;
        }
        CommunityCommand::Message { username, text } => {
            let id = user_id(&community, &username)?;
            community.send_message(&id, &text)?;
            println!("Message sent to @{username}.");
        }
        CommunityCommand::Chat { username } => {
            let id = user_id(&community, &username)?;
            let viewer = signed_in(&community)?.id.clone();
            let messages = community.conversation(&id)?;
            show(json, &messages, || {
                CommunityFormatter::new(community.users()).conversation(&messages, &viewer)
            })?;
        }
        CommunityCommand::Logs => {
            let user = signed_in(&community)?;
            show(json, &user.founder_logs, || CommunityFormatter::founder_logs(&user.founder_logs))?;
        }
        CommunityCommand::History => {
            let user = signed_in(&community)?;
            show(json, &user.problem_solver_history, || {
                CommunityFormatter::problem_history(&user.problem_solver_history)
            })?;
        }
    }

    community.close()?;
    Ok(())
}

fn signed_in(community: &Community) -> Result<&User> {
    community
        .current_user()
        .ok_or_else(|| anyhow!("You need to sign in first: `leap community login <username>`"))
}

fn user_id(community: &Community, username: &str) -> Result<String> {
    community
        .user_by_username(username)
        .map(|u| u.id.clone())
        .ok_or_else(|| anyhow!("No member with username '{username}'"))
}

/// Print `value` as JSON, or the pretty rendering.
fn show<T: Serialize + ?Sized>(json: bool, value: &T, pretty: impl FnOnce() -> String) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        print!("{}", pretty());
    }
    Ok(())
}
