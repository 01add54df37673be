//! Community use case
//!
//! Owns the in-memory community state (members, posts, messages, founder
//! history) and writes it back through a [`SnapshotRepository`] after every
//! mutation.

use crate::ports::snapshot_repository::{SnapshotRepository, StoreError};
use chrono::Utc;
use leap_domain::community::avatar_url;
use leap_domain::community::snapshot::SNAPSHOT_VERSION;
use leap_domain::feature::mirror::{FounderCheckin, FounderReflection};
use leap_domain::feature::solver::ProblemSolverResponse;
use leap_domain::{
    ChatMessage, Comment, CommunitySnapshot, FounderLogEntry, NewUser, Post, ProblemSolverSession,
    ProfileUpdate, User,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

/// Errors that can occur during community operations
#[derive(Error, Debug)]
pub enum CommunityError {
    #[error("Username already taken")]
    UsernameTaken,

    #[error("Email already registered")]
    EmailTaken,

    #[error("No member with username '{0}'")]
    UnknownUsername(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Post not found: {0}")]
    PostNotFound(String),

    #[error("You need to sign in first")]
    NotSignedIn,

    #[error("You cannot follow yourself")]
    SelfFollow,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}

fn new_id(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::new_v4().simple())
}

fn require(field: &str, value: &str) -> Result<(), CommunityError> {
    if value.trim().is_empty() {
        Err(CommunityError::InvalidInput(format!("{field} cannot be empty")))
    } else {
        Ok(())
    }
}

/// Service for the LEAP community: accounts, follows, posts and chat
pub struct CommunityService<R: SnapshotRepository + 'static> {
    repository: Arc<R>,
    state: CommunitySnapshot,
}

impl<R: SnapshotRepository + 'static> CommunityService<R> {
    /// Load the persisted community, or seed and persist a starter one.
    pub fn open(repository: Arc<R>) -> Result<Self, CommunityError> {
        let state = match repository.load()? {
            Some(snapshot) => {
                if snapshot.version != SNAPSHOT_VERSION {
                    return Err(StoreError::UnsupportedVersion {
                        found: snapshot.version,
                        expected: SNAPSHOT_VERSION,
                    }
                    .into());
                }
                debug!(users = snapshot.users.len(), posts = snapshot.posts.len(), "Loaded community snapshot");
                snapshot
            }
            None => {
                info!("No community snapshot found, seeding starter community");
                let seed = CommunitySnapshot::seed();
                repository.save(&seed)?;
                seed
            }
        };
        Ok(Self { repository, state })
    }

    /// Final save; consumes the service.
    pub fn close(self) -> Result<(), CommunityError> {
        self.repository.save(&self.state)?;
        Ok(())
    }

    /// Apply `change` to a copy of the state and keep it only once it is saved.
    fn commit<T>(
        &mut self,
        change: impl FnOnce(&mut CommunitySnapshot) -> Result<T, CommunityError>,
    ) -> Result<T, CommunityError> {
        let mut draft = self.state.clone();
        let value = change(&mut draft)?;
        self.repository.save(&draft)?;
        self.state = draft;
        Ok(value)
    }

    fn user_index(&self, user_id: &str) -> Result<usize, CommunityError> {
        self.state
            .users
            .iter()
            .position(|u| u.id == user_id)
            .ok_or_else(|| CommunityError::UserNotFound(user_id.to_string()))
    }

    fn current_index(&self) -> Result<usize, CommunityError> {
        let id = self
            .state
            .current_user_id
            .as_deref()
            .ok_or(CommunityError::NotSignedIn)?;
        self.user_index(id)
    }

    fn current_id(&self) -> Result<String, CommunityError> {
        let index = self.current_index()?;
        Ok(self.state.users[index].id.clone())
    }

    fn post_index(&self, post_id: &str) -> Result<usize, CommunityError> {
        self.state
            .posts
            .iter()
            .position(|p| p.id == post_id)
            .ok_or_else(|| CommunityError::PostNotFound(post_id.to_string()))
    }

    fn username_index(&self, username: &str) -> Option<usize> {
        self.state
            .users
            .iter()
            .position(|u| u.username.eq_ignore_ascii_case(username))
    }

    // ==================== Accounts ====================

    /// Register a new member and sign them in.
    pub fn signup(&mut self, new_user: NewUser) -> Result<User, CommunityError> {
        require("username", &new_user.username)?;
        require("email", &new_user.email)?;
        let username = new_user.username.trim().to_string();
        let email = new_user.email.trim().to_string();

        if self.username_index(&username).is_some() {
            return Err(CommunityError::UsernameTaken);
        }
        if self.state.users.iter().any(|u| u.email.eq_ignore_ascii_case(&email)) {
            return Err(CommunityError::EmailTaken);
        }

        let user = User {
            id: new_id("user"),
            bio: format!(
                "Aspiring founder and a proud member of the LEAP community. Currently exploring {}.",
                new_user.interests
            ),
            profile_picture_url: avatar_url(&username),
            username,
            email,
            full_name: new_user.full_name,
            education_level: new_user.education_level,
            institution: new_user.institution,
            degree: new_user.degree,
            graduation_year: new_user.graduation_year,
            skills: new_user.skills,
            interests: new_user.interests,
            role: new_user.role,
            location: new_user.location,
            startup: new_user.startup,
            ..User::default()
        };

        self.commit(|state| {
            state.current_user_id = Some(user.id.clone());
            state.users.push(user.clone());
            Ok(())
        })?;
        info!(user_id = %user.id, username = %user.username, "New member signed up");
        Ok(user)
    }

    pub fn sign_in(&mut self, username: &str) -> Result<&User, CommunityError> {
        let username = username.trim();
        let index = self
            .username_index(username)
            .ok_or_else(|| CommunityError::UnknownUsername(username.to_string()))?;

        let id = self.state.users[index].id.clone();
        self.commit(|state| {
            state.current_user_id = Some(id);
            Ok(())
        })?;
        Ok(&self.state.users[index])
    }

    pub fn sign_out(&mut self) -> Result<(), CommunityError> {
        self.commit(|state| {
            state.current_user_id = None;
            Ok(())
        })
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current_index().ok().map(|i| &self.state.users[i])
    }

    pub fn users(&self) -> &[User] {
        &self.state.users
    }

    pub fn user(&self, user_id: &str) -> Option<&User> {
        self.state.users.iter().find(|u| u.id == user_id)
    }

    pub fn user_by_username(&self, username: &str) -> Option<&User> {
        self.username_index(username).map(|i| &self.state.users[i])
    }

    /// Apply a partial edit to the signed-in member.
    pub fn update_profile(&mut self, update: ProfileUpdate) -> Result<&User, CommunityError> {
        let index = self.current_index()?;
        if !update.is_empty() {
            self.commit(|state| {
                update.apply_to(&mut state.users[index]);
                Ok(())
            })?;
        }
        Ok(&self.state.users[index])
    }

    // ==================== Follows ====================

    /// Follow `target_id`. Both sides of the relation are updated.
    pub fn follow(&mut self, target_id: &str) -> Result<(), CommunityError> {
        let me = self.current_index()?;
        let target = self.user_index(target_id)?;
        if me == target {
            return Err(CommunityError::SelfFollow);
        }

        self.commit(|state| {
            let my_id = state.users[me].id.clone();
            let target_id = state.users[target].id.clone();
            if !state.users[me].follows(&target_id) {
                state.users[me].following.push(target_id);
            }
            if !state.users[target].is_followed_by(&my_id) {
                state.users[target].followers.push(my_id);
            }
            Ok(())
        })
    }

    pub fn unfollow(&mut self, target_id: &str) -> Result<(), CommunityError> {
        let me = self.current_index()?;
        let target = self.user_index(target_id)?;

        self.commit(|state| {
            let my_id = state.users[me].id.clone();
            state.users[me].following.retain(|id| id != target_id);
            state.users[target].followers.retain(|id| *id != my_id);
            Ok(())
        })
    }

    // ==================== Posts ====================

    pub fn create_post(&mut self, content: &str) -> Result<Post, CommunityError> {
        require("post", content)?;
        let post = Post {
            id: new_id("post"),
            author_id: self.current_id()?,
            content: content.trim().to_string(),
            timestamp: Utc::now(),
            likes: Vec::new(),
            comments: Vec::new(),
        };
        self.commit(|state| {
            state.posts.insert(0, post.clone());
            Ok(())
        })?;
        Ok(post)
    }

    /// Like or unlike a post. Returns whether the post is now liked.
    pub fn toggle_like(&mut self, post_id: &str) -> Result<bool, CommunityError> {
        let me = self.current_id()?;
        let index = self.post_index(post_id)?;
        self.commit(|state| {
            let post = &mut state.posts[index];
            if post.is_liked_by(&me) {
                post.likes.retain(|id| *id != me);
                Ok(false)
            } else {
                post.likes.push(me);
                Ok(true)
            }
        })
    }

    pub fn add_comment(&mut self, post_id: &str, content: &str) -> Result<Comment, CommunityError> {
        require("comment", content)?;
        let comment = Comment {
            id: new_id("comment"),
            author_id: self.current_id()?,
            content: content.trim().to_string(),
            timestamp: Utc::now(),
        };
        let index = self.post_index(post_id)?;
        self.commit(|state| {
            state.posts[index].comments.push(comment.clone());
            Ok(())
        })?;
        Ok(comment)
    }

    /// All posts, newest first
    pub fn feed(&self) -> Vec<&Post> {
        let mut posts: Vec<&Post> = self.state.posts.iter().collect();
        posts.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        posts
    }

    // ==================== Chat ====================

    pub fn send_message(&mut self, recipient_id: &str, text: &str) -> Result<ChatMessage, CommunityError> {
        require("message", text)?;
        let sender_id = self.current_id()?;
        let recipient_id = self.state.users[self.user_index(recipient_id)?].id.clone();

        let message = ChatMessage {
            id: new_id("msg"),
            sender_id,
            recipient_id,
            text: text.trim().to_string(),
            timestamp: Utc::now(),
        };
        self.commit(|state| {
            state.messages.push(message.clone());
            Ok(())
        })?;
        Ok(message)
    }

    /// Messages between the signed-in member and `other_id`, oldest first.
    pub fn conversation(&self, other_id: &str) -> Result<Vec<&ChatMessage>, CommunityError> {
        let me = &self.state.users[self.current_index()?].id;
        let mut messages: Vec<&ChatMessage> = self
            .state
            .messages
            .iter()
            .filter(|m| m.is_between(me, other_id))
            .collect();
        messages.sort_by_key(|m| m.timestamp);
        Ok(messages)
    }

    // ==================== Founder history ====================

    /// Store a Startup Mirror reflection on the signed-in member.
    pub fn record_founder_log(
        &mut self,
        checkin: FounderCheckin,
        reflection: FounderReflection,
    ) -> Result<FounderLogEntry, CommunityError> {
        let index = self.current_index()?;
        let entry = FounderLogEntry {
            id: new_id("log"),
            date: Utc::now(),
            checkin,
            analysis: reflection.analysis,
            lesson: reflection.lesson,
        };
        self.commit(|state| {
            state.users[index].founder_logs.insert(0, entry.clone());
            Ok(())
        })?;
        Ok(entry)
    }

    /// Store a Problem Solver answer on the signed-in member.
    pub fn record_problem_session(
        &mut self,
        problem: &str,
        solution: ProblemSolverResponse,
    ) -> Result<ProblemSolverSession, CommunityError> {
        let index = self.current_index()?;
        let session = ProblemSolverSession {
            id: new_id("session"),
            date: Utc::now(),
            problem: problem.trim().to_string(),
            solution,
        };
        self.commit(|state| {
            state.users[index]
                .problem_solver_history
                .insert(0, session.clone());
            Ok(())
        })?;
        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use leap_domain::feature::mirror::{FounderLesson, FounderReflectionAnalysis};
    use leap_domain::feature::solver::RootCause;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    #[derive(Default)]
    struct MemoryRepository {
        snapshot: Mutex<Option<CommunitySnapshot>>,
        saves: AtomicUsize,
        fail_next_save: AtomicBool,
    }

    impl SnapshotRepository for MemoryRepository {
        fn load(&self) -> Result<Option<CommunitySnapshot>, StoreError> {
            Ok(self.snapshot.lock().unwrap().clone())
        }

        fn save(&self, snapshot: &CommunitySnapshot) -> Result<(), StoreError> {
            if self.fail_next_save.swap(false, Ordering::SeqCst) {
                return Err(StoreError::Io {
                    path: "memory".to_string(),
                    message: "disk full".to_string(),
                });
            }
            self.saves.fetch_add(1, Ordering::SeqCst);
            *self.snapshot.lock().unwrap() = Some(snapshot.clone());
            Ok(())
        }
    }

    fn open() -> (Arc<MemoryRepository>, CommunityService<MemoryRepository>) {
        let repo = Arc::new(MemoryRepository::default());
        let service = CommunityService::open(repo.clone()).unwrap();
        (repo, service)
    }

    fn arjun() -> NewUser {
        NewUser {
            username: "arjun".to_string(),
            email: "arjun@bits.ac.in".to_string(),
            full_name: "Arjun Verma".to_string(),
            interests: "AgriTech".to_string(),
            ..NewUser::default()
        }
    }

    #[test]
    fn test_open_seeds_and_persists() {
        let (repo, service) = open();
        assert_eq!(service.users().len(), 3);
        assert_eq!(repo.saves.load(Ordering::SeqCst), 1);
        assert!(service.current_user().is_none());
    }

    #[test]
    fn test_open_rejects_unknown_version() {
        let repo = Arc::new(MemoryRepository::default());
        *repo.snapshot.lock().unwrap() = Some(CommunitySnapshot {
            version: 99,
            ..CommunitySnapshot::default()
        });
        let err = CommunityService::open(repo).err().unwrap();
        assert!(matches!(
            err,
            CommunityError::Store(StoreError::UnsupportedVersion { found: 99, .. })
        ));
    }

    #[test]
    fn test_signup_derives_fields_and_signs_in() {
        let (_, mut service) = open();
        let user = service.signup(arjun()).unwrap();

        assert!(user.id.starts_with("user-"));
        assert!(user.bio.ends_with("Currently exploring AgriTech."));
        assert!(user.profile_picture_url.contains("seed=arjun&"));
        assert!(user.followers.is_empty());
        assert_eq!(service.current_user().unwrap().id, user.id);
    }

    #[test]
    fn test_signup_uniqueness_username_before_email() {
        let (_, mut service) = open();
        let taken_both = NewUser {
            username: "shreya".to_string(),
            email: "shreya@iitb.ac.in".to_string(),
            ..NewUser::default()
        };
        assert!(matches!(service.signup(taken_both), Err(CommunityError::UsernameTaken)));

        let taken_email = NewUser {
            username: "shreya2".to_string(),
            email: "SHREYA@iitb.ac.in".to_string(),
            ..NewUser::default()
        };
        assert!(matches!(service.signup(taken_email), Err(CommunityError::EmailTaken)));
    }

    #[test]
    fn test_usernames_ignore_case() {
        let (_, mut service) = open();
        let shouting = NewUser {
            username: "Shreya".to_string(),
            email: "someone.else@leap.in".to_string(),
            ..NewUser::default()
        };
        assert!(matches!(service.signup(shouting), Err(CommunityError::UsernameTaken)));

        assert_eq!(service.sign_in("NEHA").unwrap().id, "user-2");
        assert_eq!(service.user_by_username("Neha").unwrap().id, "user-2");
    }

    #[test]
    fn test_failed_save_leaves_state_untouched() {
        let (repo, mut service) = open();

        repo.fail_next_save.store(true, Ordering::SeqCst);
        assert!(matches!(service.signup(arjun()), Err(CommunityError::Store(_))));
        assert!(service.current_user().is_none());

        service.sign_in("neha").unwrap();
        let stored = repo.snapshot.lock().unwrap().clone().unwrap();
        assert!(stored.users.iter().all(|u| u.username != "arjun"));
        assert_eq!(service.users().len(), 3);

        repo.fail_next_save.store(true, Ordering::SeqCst);
        assert!(service.toggle_like("post-1").is_err());
        assert!(service.feed().iter().any(|p| p.id == "post-1" && p.is_liked_by("user-2")));

        repo.fail_next_save.store(true, Ordering::SeqCst);
        assert!(service.follow("user-1").is_err());
        assert!(!service.user("user-2").unwrap().follows("user-1"));
    }

    #[test]
    fn test_sign_in_and_out() {
        let (repo, mut service) = open();
        assert!(matches!(
            service.sign_in("nobody"),
            Err(CommunityError::UnknownUsername(_))
        ));
        assert_eq!(service.sign_in("neha").unwrap().id, "user-2");
        assert_eq!(
            repo.snapshot.lock().unwrap().as_ref().unwrap().current_user_id.as_deref(),
            Some("user-2")
        );
        service.sign_out().unwrap();
        assert!(service.current_user().is_none());
    }

    #[test]
    fn test_follow_unfollow_symmetry() {
        let (_, mut service) = open();
        service.sign_in("neha").unwrap();

        service.follow("user-1").unwrap();
        service.follow("user-1").unwrap();
        assert_eq!(
            service.user("user-2").unwrap().following.iter().filter(|id| *id == "user-1").count(),
            1
        );
        assert!(service.user("user-1").unwrap().is_followed_by("user-2"));

        service.unfollow("user-1").unwrap();
        assert!(!service.user("user-2").unwrap().follows("user-1"));
        assert!(!service.user("user-1").unwrap().is_followed_by("user-2"));

        assert!(matches!(service.follow("user-2"), Err(CommunityError::SelfFollow)));
        assert!(matches!(service.follow("ghost"), Err(CommunityError::UserNotFound(_))));
    }

    #[test]
    fn test_mutations_require_sign_in() {
        let (_, mut service) = open();
        assert!(matches!(service.create_post("Hello"), Err(CommunityError::NotSignedIn)));
        assert!(matches!(service.toggle_like("post-1"), Err(CommunityError::NotSignedIn)));
        assert!(matches!(
            service.update_profile(ProfileUpdate::default()),
            Err(CommunityError::NotSignedIn)
        ));
    }

    #[test]
    fn test_posts_likes_and_comments() {
        let (_, mut service) = open();
        service.sign_in("neha").unwrap();

        let post = service.create_post("  Looking for a co-founder #MadeWithLEAP ").unwrap();
        assert_eq!(post.content, "Looking for a co-founder #MadeWithLEAP");
        assert_eq!(service.feed()[0].id, post.id);

        assert!(service.toggle_like(&post.id).unwrap());
        assert!(!service.toggle_like(&post.id).unwrap());
        assert!(service.feed()[0].likes.is_empty());

        // user-2 already likes post-1 in the seed
        assert!(!service.toggle_like("post-1").unwrap());

        service.add_comment(&post.id, "DM me!").unwrap();
        service.add_comment(&post.id, "Me too").unwrap();
        let feed = service.feed();
        assert_eq!(feed[0].comments.len(), 2);
        assert_eq!(feed[0].comments[1].content, "Me too");

        assert!(matches!(service.add_comment("post-x", "hi"), Err(CommunityError::PostNotFound(_))));
        assert!(matches!(service.create_post("   "), Err(CommunityError::InvalidInput(_))));
    }

    #[test]
    fn test_conversation_order() {
        let (_, mut service) = open();
        service.sign_in("shreya").unwrap();
        service.send_message("user-2", "Hi Neha!").unwrap();
        service.send_message("admin-1", "Hello mentor").unwrap();

        service.sign_in("neha").unwrap();
        service.send_message("user-1", "Hey Shreya").unwrap();

        let thread: Vec<&str> = service
            .conversation("user-1")
            .unwrap()
            .iter()
            .map(|m| m.text.as_str())
            .collect();
        assert_eq!(thread, vec!["Hi Neha!", "Hey Shreya"]);
    }

    #[test]
    fn test_profile_update_propagates() {
        let (_, mut service) = open();
        service.sign_in("neha").unwrap();
        service
            .update_profile(ProfileUpdate {
                bio: Some("Designing for Bharat".to_string()),
                ..ProfileUpdate::default()
            })
            .unwrap();
        assert_eq!(service.user("user-2").unwrap().bio, "Designing for Bharat");
        assert_eq!(service.current_user().unwrap().bio, "Designing for Bharat");
    }

    #[test]
    fn test_history_is_newest_first_and_reloads() {
        let (repo, mut service) = open();
        service.sign_in("shreya").unwrap();

        let reflection = FounderReflection {
            analysis: FounderReflectionAnalysis {
                burnout_score: 40.0,
                ..FounderReflectionAnalysis::default()
            },
            lesson: FounderLesson::default(),
        };
        service
            .record_founder_log(FounderCheckin::default(), reflection.clone())
            .unwrap();
        let second = service
            .record_founder_log(FounderCheckin::default(), reflection)
            .unwrap();

        let solution = ProblemSolverResponse {
            root_cause: RootCause {
                diagnosis: "Weak onboarding".to_string(),
                based_on: String::new(),
            },
            strategic_breakdown: Default::default(),
            decision_tree: Vec::new(),
            benchmarks: Vec::new(),
            case_studies: Vec::new(),
        };
        service.record_problem_session("Users churn", solution).unwrap();
        service.close().unwrap();

        let reopened = CommunityService::open(repo).unwrap();
        let shreya = reopened.current_user().unwrap();
        assert_eq!(shreya.founder_logs.len(), 2);
        assert_eq!(shreya.founder_logs[0].id, second.id);
        assert_eq!(
            shreya.problem_solver_history[0].solution.root_cause.diagnosis,
            "Weak onboarding"
        );
    }

    #[test]
    fn test_every_mutation_saves() {
        let (repo, mut service) = open();
        let before = repo.saves.load(Ordering::SeqCst);
        service.sign_in("neha").unwrap();
        service.create_post("Hello").unwrap();
        service.follow("user-1").unwrap();
        assert_eq!(repo.saves.load(Ordering::SeqCst), before + 3);
    }
}
