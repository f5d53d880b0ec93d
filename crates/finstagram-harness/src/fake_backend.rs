//! In-memory backend implementing [`Api`].
//!
//! Behaves like the real REST backend for the operations the client uses,
//! records every call, and lets tests inject latency, outages and per-route
//! failures. Clones share state, so a test keeps one handle while the runtime
//! owns another.

use std::{
    collections::{HashMap, VecDeque},
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use finstagram_client::{Api, ApiError};
use finstagram_proto::{
    ChatPeer, Credentials, LoginReply, MediaEntry, NotificationEntry, OutgoingMessage,
    ProfileDraft, ProfileView, ServerMessage, WireMessage,
};
use tokio::time::Instant;

/// Backend operation, used to target failure injection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// `POST /api/login`
    Login,
    /// `POST /api/signup`
    Signup,
    /// `POST /api/create-profile`
    CreateProfile,
    /// `GET /api/chat-list/{user}`
    ChatList,
    /// `GET /api/messages/{user}/{peer}`
    Messages,
    /// `POST /api/send-message`
    SendMessage,
    /// `GET /api/posts`
    Posts,
    /// `GET /api/reels`
    Reels,
    /// `GET /notifications/{user}`
    Notifications,
    /// `GET /profile/{user}`
    Profile,
}

/// A request as seen by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    /// Login attempt for a username.
    Login(String),
    /// Signup attempt for a username.
    Signup(String),
    /// Profile save for a username.
    CreateProfile(String),
    /// Chat list fetch for a username.
    ChatList(String),
    /// History fetch.
    Messages {
        /// Requesting user.
        user: String,
        /// Other participant.
        peer: String,
    },
    /// Message delivery.
    SendMessage(OutgoingMessage),
    /// Image posts fetch.
    Posts,
    /// Video posts fetch.
    Reels,
    /// Notifications fetch for a username.
    Notifications(String),
    /// Profile fetch for a username.
    Profile(String),
}

impl Call {
    /// Route this call targets.
    pub fn route(&self) -> Route {
        match self {
            Self::Login(_) => Route::Login,
            Self::Signup(_) => Route::Signup,
            Self::CreateProfile(_) => Route::CreateProfile,
            Self::ChatList(_) => Route::ChatList,
            Self::Messages { .. } => Route::Messages,
            Self::SendMessage(_) => Route::SendMessage,
            Self::Posts => Route::Posts,
            Self::Reels => Route::Reels,
            Self::Notifications(_) => Route::Notifications,
            Self::Profile(_) => Route::Profile,
        }
    }
}

/// A call with the (tokio) time it arrived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallRecord {
    /// Arrival time.
    pub at: Instant,
    /// The call.
    pub call: Call,
}

#[derive(Debug, Clone)]
struct Account {
    password: String,
    has_profile: bool,
}

#[derive(Debug, Default)]
struct BackendState {
    accounts: HashMap<String, Account>,
    profiles: HashMap<String, ProfileView>,
    messages: Vec<WireMessage>,
    held_messages: Vec<WireMessage>,
    hold_writes: bool,
    posts: Vec<MediaEntry>,
    reels: Vec<MediaEntry>,
    notifications: HashMap<String, Vec<NotificationEntry>>,
    calls: Vec<CallRecord>,
    failures: HashMap<Route, VecDeque<ApiError>>,
    latency: HashMap<Route, Duration>,
    offline: bool,
}

/// Scriptable in-memory backend.
#[derive(Debug, Clone, Default)]
pub struct FakeBackend {
    state: Arc<Mutex<BackendState>>,
}

impl FakeBackend {
    /// Backend with no accounts and no data.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an account.
    #[must_use]
    pub fn with_account(self, username: &str, password: &str, has_profile: bool) -> Self {
        self.lock().accounts.insert(
            username.to_string(),
            Account { password: password.to_string(), has_profile },
        );
        self
    }

    /// Add a stored message.
    #[must_use]
    pub fn with_message(self, sender: &str, receiver: &str, text: &str) -> Self {
        let mut state = self.lock();
        let timestamp = format!("2024-01-01 10:{:02}", state.messages.len() % 60);
        state.messages.push(WireMessage {
            sender: sender.to_string(),
            receiver: receiver.to_string(),
            text: text.to_string(),
            timestamp: Some(timestamp),
        });
        drop(state);
        self
    }

    /// Add an image post.
    #[must_use]
    pub fn with_post(self, post: MediaEntry) -> Self {
        self.lock().posts.push(post);
        self
    }

    /// Add a video post.
    #[must_use]
    pub fn with_reel(self, reel: MediaEntry) -> Self {
        self.lock().reels.push(reel);
        self
    }

    /// Add a notification for `username`.
    #[must_use]
    pub fn with_notification(self, username: &str, message: &str) -> Self {
        self.lock()
            .notifications
            .entry(username.to_string())
            .or_default()
            .push(NotificationEntry { message: message.to_string(), time: None });
        self
    }

    /// Refuse every call with a transport error while `offline`.
    pub fn set_offline(&self, offline: bool) {
        self.lock().offline = offline;
    }

    /// Fail the next call to `route` with `error`. Queued failures are used
    /// in order.
    pub fn fail_next(&self, route: Route, error: ApiError) {
        self.lock().failures.entry(route).or_default().push_back(error);
    }

    /// Delay every call to `route` by `latency` (virtual time under a paused
    /// tokio clock).
    pub fn set_latency(&self, route: Route, latency: Duration) {
        self.lock().latency.insert(route, latency);
    }

    /// While holding, sent messages are accepted but not yet visible in
    /// history fetches.
    pub fn hold_writes(&self, hold: bool) {
        self.lock().hold_writes = hold;
    }

    /// Make held messages visible.
    pub fn release_writes(&self) {
        let mut state = self.lock();
        let held = std::mem::take(&mut state.held_messages);
        state.messages.extend(held);
    }

    /// Every call so far, in arrival order.
    pub fn calls(&self) -> Vec<Call> {
        self.lock().calls.iter().map(|record| record.call.clone()).collect()
    }

    /// Every call with its arrival time.
    pub fn call_log(&self) -> Vec<CallRecord> {
        self.lock().calls.clone()
    }

    /// Number of calls to `route`.
    pub fn count(&self, route: Route) -> usize {
        self.lock().calls.iter().filter(|record| record.call.route() == route).count()
    }

    /// Visible history between two users, oldest first.
    pub fn history(&self, a: &str, b: &str) -> Vec<WireMessage> {
        self.lock().messages.iter().filter(|m| between(m, a, b)).cloned().collect()
    }

    fn lock(&self) -> MutexGuard<'_, BackendState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record the call, apply latency, then check injected failures.
    async fn enter(&self, call: Call) -> Result<(), ApiError> {
        let route = call.route();
        let latency = {
            let mut state = self.lock();
            state.calls.push(CallRecord { at: Instant::now(), call });
            state.latency.get(&route).copied().unwrap_or_default()
        };
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }

        let mut state = self.lock();
        if state.offline {
            return Err(ApiError::Transport("connection refused".to_string()));
        }
        match state.failures.get_mut(&route).and_then(VecDeque::pop_front) {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

fn between(message: &WireMessage, a: &str, b: &str) -> bool {
    (message.sender == a && message.receiver == b) || (message.sender == b && message.receiver == a)
}

fn rejected(status: u16, message: &str) -> ApiError {
    ApiError::Rejected { status, message: Some(message.to_string()) }
}

impl Api for FakeBackend {
    async fn login(&self, credentials: &Credentials) -> Result<LoginReply, ApiError> {
        self.enter(Call::Login(credentials.username.clone())).await?;

        let state = self.lock();
        match state.accounts.get(&credentials.username) {
            Some(account) if account.password == credentials.password => Ok(LoginReply {
                username: credentials.username.clone(),
                has_profile: account.has_profile,
                message: Some("Login successful".to_string()),
            }),
            _ => Err(rejected(401, "Invalid Credentials")),
        }
    }

    async fn signup(&self, credentials: &Credentials) -> Result<ServerMessage, ApiError> {
        self.enter(Call::Signup(credentials.username.clone())).await?;

        let mut state = self.lock();
        if state.accounts.contains_key(&credentials.username) {
            return Err(rejected(400, "User already exists"));
        }
        state.accounts.insert(
            credentials.username.clone(),
            Account { password: credentials.password.clone(), has_profile: false },
        );
        Ok(ServerMessage { message: "User created successfully".to_string() })
    }

    async fn create_profile(&self, profile: &ProfileDraft) -> Result<ServerMessage, ApiError> {
        self.enter(Call::CreateProfile(profile.username.clone())).await?;

        let mut state = self.lock();
        let Some(account) = state.accounts.get_mut(&profile.username) else {
            return Err(rejected(404, "User not found"));
        };
        account.has_profile = true;
        state.profiles.insert(
            profile.username.clone(),
            ProfileView {
                full_name: Some(profile.full_name.clone()),
                bio: Some(profile.bio.clone()),
                location: Some(profile.location.clone()),
                profile_pic: None,
                posts: Vec::new(),
            },
        );
        Ok(ServerMessage { message: "Profile saved".to_string() })
    }

    async fn chat_list(&self, username: &str) -> Result<Vec<ChatPeer>, ApiError> {
        self.enter(Call::ChatList(username.to_string())).await?;

        let state = self.lock();
        let mut peers: Vec<ChatPeer> = Vec::new();
        for message in &state.messages {
            let peer = if message.sender == username {
                &message.receiver
            } else if message.receiver == username {
                &message.sender
            } else {
                continue;
            };
            if !peers.iter().any(|known| &known.username == peer) {
                peers.push(ChatPeer { username: peer.clone(), avatar: None });
            }
        }
        Ok(peers)
    }

    async fn messages(&self, user: &str, peer: &str) -> Result<Vec<WireMessage>, ApiError> {
        self.enter(Call::Messages { user: user.to_string(), peer: peer.to_string() }).await?;
        Ok(self.history(user, peer))
    }

    async fn send_message(&self, message: &OutgoingMessage) -> Result<(), ApiError> {
        self.enter(Call::SendMessage(message.clone())).await?;

        let mut state = self.lock();
        let stored = WireMessage {
            sender: message.sender.clone(),
            receiver: message.receiver.clone(),
            text: message.text.clone(),
            timestamp: Some("2024-01-01 12:00".to_string()),
        };
        if state.hold_writes {
            state.held_messages.push(stored);
        } else {
            state.messages.push(stored);
        }
        Ok(())
    }

    async fn posts(&self) -> Result<Vec<MediaEntry>, ApiError> {
        self.enter(Call::Posts).await?;
        Ok(self.lock().posts.clone())
    }

    async fn reels(&self) -> Result<Vec<MediaEntry>, ApiError> {
        self.enter(Call::Reels).await?;
        Ok(self.lock().reels.clone())
    }

    async fn notifications(&self, username: &str) -> Result<Vec<NotificationEntry>, ApiError> {
        self.enter(Call::Notifications(username.to_string())).await?;
        Ok(self.lock().notifications.get(username).cloned().unwrap_or_default())
    }

    async fn profile(&self, username: &str) -> Result<ProfileView, ApiError> {
        self.enter(Call::Profile(username.to_string())).await?;
        self.lock().profiles.get(username).cloned().ok_or_else(|| rejected(404, "User not found"))
    }
}
