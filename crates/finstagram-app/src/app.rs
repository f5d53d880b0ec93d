//! Application controller.
//!
//! This module defines the [`App`] state machine, which owns every client-side
//! component and wires them together completely decoupled from I/O.
//!
//! This is a pure state machine: it consumes [`crate::AppEvent`] inputs and
//! produces [`crate::AppAction`] instructions for the runtime to execute. Time
//! is read only through the [`Environment`].
//!
//! # Responsibilities
//!
//! - Restores the session and initial view at construction.
//! - Validates auth forms, submits them once, and reports outcomes as toasts.
//! - Loads view content on entry; starts and stops conversation polling.
//! - Applies optimistic sends and their completions to the open thread.

use std::time::Duration;

use finstagram_client::ApiError;
use finstagram_proto::{Credentials, LoginReply, ProfileDraft, ServerMessage, WireMessage};
use finstagram_store::KeyValueStore;

use crate::{
    AppAction, AppEvent, ChatList, Content, ContentCache, ContentKind, Conversation,
    ConversationPoller, DEFAULT_POLL_INTERVAL, DEFAULT_TOAST_TTL, Environment, MessageComposer,
    PollToken, SessionStore, Thread, Toast, ToastKind, ToastNotifier, Transition, UserInput, View,
    ViewEvent, ViewRouter,
};

/// Toast for transport failures on login and signup.
const SERVER_OFFLINE: &str = "Server offline";

/// Timing configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppConfig {
    /// Toast lifetime.
    pub toast_ttl: Duration,
    /// Delay between conversation history fetches.
    pub poll_interval: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self { toast_ttl: DEFAULT_TOAST_TTL, poll_interval: DEFAULT_POLL_INTERVAL }
    }
}

/// Forms with a request outstanding. Further submits are ignored.
#[derive(Debug, Clone, Copy, Default)]
struct InFlight {
    login: bool,
    signup: bool,
    profile: bool,
}

/// Client controller.
///
/// Pure state machine that processes events and produces actions.
/// No I/O dependencies - fully testable in simulation.
pub struct App<E: Environment, S> {
    env: E,
    session: SessionStore<S>,
    router: ViewRouter,
    toast: ToastNotifier<E::Instant>,
    chats: ChatList,
    poller: ConversationPoller<E::Instant>,
    /// Open conversation. `Some` exactly while `poll` is.
    thread: Option<Thread>,
    /// Poll session of the open conversation.
    poll: Option<PollToken>,
    composer: MessageComposer,
    content: ContentCache,
    in_flight: InFlight,
}

impl<E: Environment, S: KeyValueStore> App<E, S> {
    /// Restore the session from `store` and pick the initial view.
    ///
    /// Call [`start`](Self::start) afterwards to get the initial view's
    /// fetches.
    pub fn new(env: E, store: S, config: AppConfig) -> Self {
        let session = SessionStore::load(store);
        let persisted = if session.is_authenticated() { session.last_view() } else { None };
        let start = ViewRouter::initial(session.username(), persisted);
        tracing::info!(user = session.username().unwrap_or("-"), view = %start, "session restored");

        Self {
            env,
            session,
            router: ViewRouter::new(start),
            toast: ToastNotifier::new(config.toast_ttl),
            chats: ChatList::new(),
            poller: ConversationPoller::new(config.poll_interval),
            thread: None,
            poll: None,
            composer: MessageComposer::new(),
            content: ContentCache::new(),
            in_flight: InFlight::default(),
        }
    }

    /// Actions for entering the initial view.
    pub fn start(&mut self) -> Vec<AppAction> {
        let mut actions = self.enter_view(self.router.current());
        actions.push(AppAction::Render);
        actions
    }

    /// Process an event and return actions.
    pub fn handle(&mut self, event: AppEvent) -> Vec<AppAction> {
        match event {
            AppEvent::Tick => self.handle_tick(),
            AppEvent::Input(input) => self.handle_input(input),
            AppEvent::LoginCompleted { result } => self.on_login(result),
            AppEvent::SignupCompleted { result } => self.on_signup(result),
            AppEvent::ProfileSaved { result } => self.on_profile_saved(result),
            AppEvent::ChatListLoaded { user, request, result } => {
                render_if(self.chats.complete(&user, request, result))
            },
            AppEvent::MessagesLoaded { peer, token, result } => {
                self.on_messages(&peer, token, result)
            },
            AppEvent::MessageSent { send_id, result } => {
                render_if(self.composer.complete(send_id, result, self.thread.as_mut()))
            },
            AppEvent::ContentLoaded { kind, user, result } => self.on_content(kind, &user, result),
        }
    }

    fn handle_input(&mut self, input: UserInput) -> Vec<AppAction> {
        match input {
            UserInput::SubmitLogin { username, password } => {
                self.login(Credentials::new(username, password))
            },
            UserInput::SubmitSignup { username, password } => {
                self.signup(Credentials::new(username, password))
            },
            UserInput::SubmitProfile { full_name, bio, location } => {
                self.save_profile(full_name, bio, location)
            },
            UserInput::ShowSignup => self.route(ViewEvent::SignupLinkClicked),
            UserInput::ShowLogin => self.route(ViewEvent::LoginLinkClicked),
            UserInput::Navigate(view) => self.navigate(view),
            UserInput::Logout => self.logout(),
            UserInput::SelectPeer(peer) => self.select_peer(&peer),
            UserInput::Back => self.close_thread(),
            UserInput::EditDraft(text) => self.edit_draft(text),
            UserInput::SendDraft => self.send_draft(),
            UserInput::DismissToast => self.dismiss_toast(),
            UserInput::Quit => self.quit(),
        }
    }

    fn handle_tick(&mut self) -> Vec<AppAction> {
        let now = self.env.now();
        let mut actions = Vec::new();

        if let Some(request) = self.poller.tick(now) {
            if let Some(user) = self.session.username() {
                actions.push(AppAction::FetchMessages {
                    user: user.to_string(),
                    peer: request.peer,
                    token: request.token,
                });
            }
        }
        if self.toast.tick(now) {
            actions.push(AppAction::Render);
        }
        actions
    }

    /// Submit the login form.
    pub fn login(&mut self, credentials: Credentials) -> Vec<AppAction> {
        if self.router.current() != View::Login || self.in_flight.login {
            return Vec::new();
        }
        if !credentials.is_complete() {
            self.show(ToastKind::Error, "Please fill all fields");
            return vec![AppAction::Render];
        }

        tracing::info!(username = %credentials.username, "logging in");
        self.toast.clear();
        self.in_flight.login = true;
        vec![AppAction::Login(credentials), AppAction::Render]
    }

    /// Submit the signup form.
    pub fn signup(&mut self, credentials: Credentials) -> Vec<AppAction> {
        if self.router.current() != View::Signup || self.in_flight.signup {
            return Vec::new();
        }
        if !credentials.is_complete() {
            self.show(ToastKind::Error, "Please fill all fields");
            return vec![AppAction::Render];
        }

        tracing::info!(username = %credentials.username, "signing up");
        self.toast.clear();
        self.in_flight.signup = true;
        vec![AppAction::Signup(credentials), AppAction::Render]
    }

    /// Submit the profile setup form.
    pub fn save_profile(
        &mut self,
        full_name: String,
        bio: String,
        location: String,
    ) -> Vec<AppAction> {
        if self.router.current() != View::ProfileSetup || self.in_flight.profile {
            return Vec::new();
        }
        let Some(username) = self.session.username() else {
            return Vec::new();
        };
        if full_name.trim().is_empty() {
            self.show(ToastKind::Error, "Full Name is required");
            return vec![AppAction::Render];
        }

        let draft = ProfileDraft { username: username.to_string(), full_name, bio, location };
        tracing::info!(username = %draft.username, "saving profile");
        self.in_flight.profile = true;
        vec![AppAction::CreateProfile(draft), AppAction::Render]
    }

    /// Switch to the signup form.
    pub fn show_signup(&mut self) -> Vec<AppAction> {
        self.route(ViewEvent::SignupLinkClicked)
    }

    /// Switch to the login form.
    pub fn show_login(&mut self) -> Vec<AppAction> {
        self.route(ViewEvent::LoginLinkClicked)
    }

    /// Navigation bar tap.
    pub fn navigate(&mut self, view: View) -> Vec<AppAction> {
        self.route(ViewEvent::Navigate(view))
    }

    /// Log out and return to the login form.
    ///
    /// Persisted session keys are cleared even if the view cannot change.
    pub fn logout(&mut self) -> Vec<AppAction> {
        let transition =
            self.router.transition(ViewEvent::LogoutRequested, self.session.is_authenticated());

        if let Err(e) = self.session.logout() {
            tracing::debug!(error = %e, "persisted session only partially cleared");
        }

        let transition = match transition {
            Ok(transition) => transition,
            Err(e) => {
                tracing::debug!(error = %e, "logout ignored");
                return Vec::new();
            },
        };

        self.leave_view(transition.from);
        self.chats.reset();
        self.content.clear();
        self.in_flight = InFlight::default();
        tracing::info!("logged out");
        self.show(ToastKind::Success, "Logged out successfully");
        vec![AppAction::Render]
    }

    /// Open the conversation with `peer` and start polling it.
    ///
    /// Switching peers closes the previous conversation first, draft
    /// included, so text typed for one peer is never sent to another.
    pub fn select_peer(&mut self, peer: &str) -> Vec<AppAction> {
        if self.router.current() != View::Messages || peer.is_empty() {
            return Vec::new();
        }
        let Some(user) = self.session.username().map(str::to_owned) else {
            return Vec::new();
        };
        if self.thread.as_ref().is_some_and(|thread| thread.peer() == peer) {
            return Vec::new();
        }

        self.close_conversation();
        let Some(request) = self.poller.select(peer, self.env.now()) else {
            return Vec::new();
        };
        self.thread = Some(Thread::new(peer));
        self.poll = Some(request.token);
        vec![
            AppAction::FetchMessages { user, peer: request.peer, token: request.token },
            AppAction::Render,
        ]
    }

    /// Close the open conversation and stop polling it.
    pub fn close_thread(&mut self) -> Vec<AppAction> {
        render_if(self.close_conversation())
    }

    /// Replace the message draft.
    pub fn edit_draft(&mut self, text: String) -> Vec<AppAction> {
        if self.router.current() != View::Messages {
            return Vec::new();
        }
        self.composer.set_draft(text);
        vec![AppAction::Render]
    }

    /// Send the draft to the open conversation.
    pub fn send_draft(&mut self) -> Vec<AppAction> {
        let sent_at = self.env.wall_clock_millis();
        let Some(user) = self.session.username() else {
            return Vec::new();
        };
        let Some(thread) = self.thread.as_mut() else {
            return Vec::new();
        };

        match self.composer.send(user, thread, sent_at) {
            Some(pending) => vec![
                AppAction::SendMessage { send_id: pending.id, message: pending.message },
                AppAction::Render,
            ],
            None => Vec::new(),
        }
    }

    /// Dismiss the toast.
    pub fn dismiss_toast(&mut self) -> Vec<AppAction> {
        let had_toast = self.toast.current().is_some();
        self.toast.clear();
        render_if(had_toast)
    }

    /// Quit the application.
    pub fn quit(&self) -> Vec<AppAction> {
        vec![AppAction::Quit]
    }

    fn on_login(&mut self, result: Result<LoginReply, ApiError>) -> Vec<AppAction> {
        if !std::mem::take(&mut self.in_flight.login) {
            tracing::debug!("ignoring login completion without a pending request");
            return Vec::new();
        }

        match result {
            Ok(reply) => {
                tracing::info!(
                    username = %reply.username,
                    has_profile = reply.has_profile,
                    "logged in"
                );
                if let Err(e) = self.session.login(&reply.username) {
                    tracing::warn!(error = %e, "failed to persist session");
                }
                self.chats.reset();
                self.content.clear();

                let event = ViewEvent::LoginSucceeded { has_profile: reply.has_profile };
                let mut actions = self.route(event);
                if !reply.has_profile {
                    let welcome = format!("Welcome, {}! Setup your profile.", reply.username);
                    self.show(ToastKind::Success, welcome);
                }
                ensure_render(&mut actions);
                actions
            },
            Err(e) => {
                tracing::warn!(error = %e, "login failed");
                let text = failure_text(&e, "Invalid credentials", SERVER_OFFLINE);
                self.show(ToastKind::Error, text);
                vec![AppAction::Render]
            },
        }
    }

    fn on_signup(&mut self, result: Result<ServerMessage, ApiError>) -> Vec<AppAction> {
        if !std::mem::take(&mut self.in_flight.signup) {
            tracing::debug!("ignoring signup completion without a pending request");
            return Vec::new();
        }

        match result {
            Ok(reply) => {
                tracing::info!("account created");
                let text = reply.text().unwrap_or("Signup successful!").to_string();
                self.show(ToastKind::Success, text);
                let mut actions = self.route(ViewEvent::LoginLinkClicked);
                ensure_render(&mut actions);
                actions
            },
            Err(e) => {
                tracing::warn!(error = %e, "signup failed");
                self.show(ToastKind::Error, failure_text(&e, "Signup failed", SERVER_OFFLINE));
                vec![AppAction::Render]
            },
        }
    }

    fn on_profile_saved(&mut self, result: Result<ServerMessage, ApiError>) -> Vec<AppAction> {
        if !std::mem::take(&mut self.in_flight.profile) {
            tracing::debug!("ignoring profile completion without a pending request");
            return Vec::new();
        }

        match result {
            Ok(reply) => {
                tracing::info!("profile saved");
                self.show(ToastKind::Success, reply.text().unwrap_or("Profile saved!").to_string());
                let mut actions = self.route(ViewEvent::ProfileSetupCompleted);
                self.show(ToastKind::Success, "Profile ready!");
                ensure_render(&mut actions);
                actions
            },
            Err(e) => {
                tracing::warn!(error = %e, "failed to save profile");
                let text = failure_text(&e, "Error saving profile", "Error saving profile");
                self.show(ToastKind::Error, text);
                vec![AppAction::Render]
            },
        }
    }

    fn on_messages(
        &mut self,
        peer: &str,
        token: PollToken,
        result: Result<Vec<WireMessage>, ApiError>,
    ) -> Vec<AppAction> {
        if !self.poller.accepts(peer, token) {
            tracing::debug!(%peer, %token, "discarding history for cancelled poll");
            return Vec::new();
        }

        match result {
            Ok(history) => match self.thread.as_mut() {
                Some(thread) if thread.peer() == peer => {
                    thread.replace_confirmed(history);
                    vec![AppAction::Render]
                },
                _ => Vec::new(),
            },
            Err(e) => {
                tracing::warn!(%peer, error = %e, "failed to fetch messages");
                Vec::new()
            },
        }
    }

    fn on_content(
        &mut self,
        kind: ContentKind,
        user: &str,
        result: Result<Content, ApiError>,
    ) -> Vec<AppAction> {
        if self.session.username() != Some(user) {
            tracing::debug!(%kind, %user, "discarding content for previous session");
            return Vec::new();
        }

        match result {
            Ok(content) => {
                self.content.apply(content);
                vec![AppAction::Render]
            },
            Err(e) => {
                tracing::warn!(%kind, error = %e, "failed to load content");
                Vec::new()
            },
        }
    }

    fn route(&mut self, event: ViewEvent) -> Vec<AppAction> {
        match self.router.transition(event, self.session.is_authenticated()) {
            Ok(transition) => self.apply_transition(transition),
            Err(e) => {
                tracing::debug!(error = %e, "navigation ignored");
                Vec::new()
            },
        }
    }

    fn apply_transition(&mut self, transition: Transition) -> Vec<AppAction> {
        if transition.is_noop() {
            return Vec::new();
        }
        let Transition { from, to } = transition;
        tracing::info!(%from, %to, "view changed");

        self.leave_view(from);
        if let Err(e) = self.session.remember_view(to) {
            tracing::warn!(view = %to, error = %e, "failed to persist view");
        }

        let mut actions = self.enter_view(to);
        actions.push(AppAction::Render);
        actions
    }

    fn leave_view(&mut self, view: View) {
        if view == View::Messages {
            self.close_conversation();
        }
    }

    /// Stop polling, drop the thread and the draft. Returns false if no
    /// conversation was open.
    fn close_conversation(&mut self) -> bool {
        self.composer.reset();
        if let Some(token) = self.poll.take() {
            self.poller.cancel(token);
        }
        self.thread.take().is_some()
    }

    fn enter_view(&mut self, view: View) -> Vec<AppAction> {
        let Some(user) = self.session.username().map(str::to_owned) else {
            return Vec::new();
        };

        if view == View::Messages {
            let request = self.chats.load(&user);
            return vec![AppAction::FetchChatList { user, request }];
        }
        ContentKind::for_view(view)
            .map(|kind| AppAction::FetchContent { kind, user })
            .into_iter()
            .collect()
    }

    fn show(&mut self, kind: ToastKind, text: impl Into<String>) {
        let now = self.env.now();
        self.toast.show(text, kind, now);
    }

    /// Active view.
    pub fn current_view(&self) -> View {
        self.router.current()
    }

    /// Logged-in username.
    pub fn username(&self) -> Option<&str> {
        self.session.username()
    }

    /// Toast to display now.
    pub fn toast(&self) -> Option<&Toast<E::Instant>> {
        self.toast.visible(self.env.now())
    }

    /// Loaded conversations.
    pub fn conversations(&self) -> &[Conversation] {
        self.chats.conversations()
    }

    /// Conversation list state.
    pub fn chats(&self) -> &ChatList {
        &self.chats
    }

    /// Open conversation.
    pub fn thread(&self) -> Option<&Thread> {
        self.thread.as_ref()
    }

    /// Message draft.
    pub fn draft(&self) -> &str {
        self.composer.draft()
    }

    /// Message composer state.
    pub fn composer(&self) -> &MessageComposer {
        &self.composer
    }

    /// Feed, reels, notifications and profile data.
    pub fn content(&self) -> &ContentCache {
        &self.content
    }

    /// Conversation poller state.
    pub fn poller(&self) -> &ConversationPoller<E::Instant> {
        &self.poller
    }

    /// Session state and its backing store.
    pub fn session(&self) -> &SessionStore<S> {
        &self.session
    }

    /// True while an auth or profile form awaits the backend.
    pub fn is_submitting(&self) -> bool {
        self.in_flight.login || self.in_flight.signup || self.in_flight.profile
    }
}

fn render_if(changed: bool) -> Vec<AppAction> {
    if changed { vec![AppAction::Render] } else { Vec::new() }
}

fn ensure_render(actions: &mut Vec<AppAction>) {
    if !actions.contains(&AppAction::Render) {
        actions.push(AppAction::Render);
    }
}

/// Toast text for a failed user-initiated request.
fn failure_text(error: &ApiError, rejected: &str, unreachable: &str) -> String {
    if error.is_rejection() {
        error.user_message(rejected).to_string()
    } else {
        unreachable.to_string()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    };

    use finstagram_proto::{ChatPeer, OutgoingMessage};
    use finstagram_store::MemoryStore;

    use super::*;
    use crate::{CURRENT_USER_KEY, LAST_VIEW_KEY, MessageOrigin, SendId};

    #[derive(Clone, Default)]
    struct TestEnv {
        millis: Arc<AtomicU64>,
    }

    impl TestEnv {
        fn advance(&self, ms: u64) {
            self.millis.fetch_add(ms, Ordering::SeqCst);
        }
    }

    impl Environment for TestEnv {
        type Instant = Duration;

        fn now(&self) -> Duration {
            Duration::from_millis(self.millis.load(Ordering::SeqCst))
        }

        fn wall_clock_millis(&self) -> u64 {
            1_700_000_000_000 + self.millis.load(Ordering::SeqCst)
        }
    }

    fn logged_in(view: &str) -> (App<TestEnv, MemoryStore>, TestEnv, MemoryStore) {
        let env = TestEnv::default();
        let store = MemoryStore::with_entries([(CURRENT_USER_KEY, "abc"), (LAST_VIEW_KEY, view)]);
        let app = App::new(env.clone(), store.clone(), AppConfig::default());
        (app, env, store)
    }

    fn logged_out() -> App<TestEnv, MemoryStore> {
        App::new(TestEnv::default(), MemoryStore::new(), AppConfig::default())
    }

    fn submit_login(app: &mut App<TestEnv, MemoryStore>, user: &str, pass: &str) -> Vec<AppAction> {
        app.handle(AppEvent::Input(UserInput::SubmitLogin {
            username: user.to_string(),
            password: pass.to_string(),
        }))
    }

    fn toast_text(app: &App<TestEnv, MemoryStore>) -> Option<(&str, ToastKind)> {
        app.toast().map(|toast| (toast.text.as_str(), toast.kind))
    }

    fn fetch_token(actions: &[AppAction]) -> PollToken {
        actions
            .iter()
            .find_map(|action| match action {
                AppAction::FetchMessages { token, .. } => Some(*token),
                _ => None,
            })
            .unwrap()
    }

    #[test]
    fn restores_persisted_view() {
        let (mut app, _, _) = logged_in("reels");

        assert_eq!(app.current_view(), View::Reels);
        assert_eq!(
            app.start(),
            vec![
                AppAction::FetchContent { kind: ContentKind::Reels, user: "abc".to_string() },
                AppAction::Render
            ]
        );
    }

    #[test]
    fn starts_at_login_without_session() {
        let mut app = logged_out();

        assert_eq!(app.current_view(), View::Login);
        assert_eq!(app.start(), vec![AppAction::Render]);
    }

    #[test]
    fn empty_fields_never_reach_backend() {
        let mut app = logged_out();
        let actions = submit_login(&mut app, "abc", "");

        assert_eq!(actions, vec![AppAction::Render]);
        assert_eq!(toast_text(&app), Some(("Please fill all fields", ToastKind::Error)));
    }

    #[test]
    fn login_without_profile_goes_to_setup() {
        let mut app = logged_out();
        let actions = submit_login(&mut app, "abc", "x");
        assert_eq!(actions[0], AppAction::Login(Credentials::new("abc", "x")));

        let reply = LoginReply { username: "abc".to_string(), has_profile: false, message: None };
        app.handle(AppEvent::LoginCompleted { result: Ok(reply) });

        assert_eq!(app.current_view(), View::ProfileSetup);
        assert_eq!(app.username(), Some("abc"));
        let (text, kind) = toast_text(&app).unwrap();
        assert_eq!(kind, ToastKind::Success);
        assert!(text.starts_with("Welcome, abc"));
    }

    #[test]
    fn duplicate_submit_is_ignored() {
        let mut app = logged_out();
        assert!(!submit_login(&mut app, "abc", "x").is_empty());
        assert!(submit_login(&mut app, "abc", "x").is_empty());
        assert!(app.is_submitting());
    }

    #[test]
    fn login_failures_use_server_message_or_offline() {
        let mut app = logged_out();
        submit_login(&mut app, "abc", "bad");
        let rejected =
            ApiError::Rejected { status: 401, message: Some("Invalid Credentials".into()) };
        app.handle(AppEvent::LoginCompleted { result: Err(rejected) });

        assert_eq!(app.current_view(), View::Login);
        assert_eq!(toast_text(&app), Some(("Invalid Credentials", ToastKind::Error)));

        submit_login(&mut app, "abc", "x");
        let offline = ApiError::Transport("refused".into());
        app.handle(AppEvent::LoginCompleted { result: Err(offline) });
        assert_eq!(toast_text(&app), Some(("Server offline", ToastKind::Error)));
        assert!(!app.is_submitting());
    }

    #[test]
    fn signup_success_returns_to_login() {
        let mut app = logged_out();
        app.show_signup();
        app.handle(AppEvent::Input(UserInput::SubmitSignup {
            username: "new".to_string(),
            password: "pw".to_string(),
        }));

        let reply = ServerMessage { message: "User created".to_string() };
        app.handle(AppEvent::SignupCompleted { result: Ok(reply) });

        assert_eq!(app.current_view(), View::Login);
        assert_eq!(toast_text(&app), Some(("User created", ToastKind::Success)));
        assert!(!app.session().is_authenticated());
    }

    #[test]
    fn profile_requires_full_name() {
        let mut app = logged_out();
        submit_login(&mut app, "abc", "x");
        let reply = LoginReply { username: "abc".to_string(), has_profile: false, message: None };
        app.handle(AppEvent::LoginCompleted { result: Ok(reply) });

        let actions = app.save_profile(" ".to_string(), String::new(), String::new());
        assert_eq!(actions, vec![AppAction::Render]);
        assert_eq!(toast_text(&app), Some(("Full Name is required", ToastKind::Error)));

        let actions = app.save_profile("Abc Def".to_string(), String::new(), String::new());
        assert!(matches!(&actions[0], AppAction::CreateProfile(draft) if draft.username == "abc"));

        let reply = ServerMessage { message: "Profile saved".to_string() };
        let actions = app.handle(AppEvent::ProfileSaved { result: Ok(reply) });

        assert_eq!(app.current_view(), View::Feed);
        assert_eq!(toast_text(&app), Some(("Profile ready!", ToastKind::Success)));
        assert!(actions.contains(&AppAction::FetchContent {
            kind: ContentKind::Posts,
            user: "abc".to_string()
        }));
    }

    #[test]
    fn navigation_persists_view() {
        let (mut app, _, store) = logged_in("feed");
        app.navigate(View::Notifications);

        assert_eq!(store.get(LAST_VIEW_KEY).unwrap().as_deref(), Some("notifications"));
    }

    #[test]
    fn entering_messages_loads_chat_list() {
        let (mut app, _, _) = logged_in("feed");
        let actions = app.navigate(View::Messages);

        let request = match &actions[0] {
            AppAction::FetchChatList { user, request } if user == "abc" => *request,
            other => panic!("unexpected action {other:?}"),
        };

        let peers = vec![ChatPeer { username: "bob".to_string(), avatar: None }];
        let user = "abc".to_string();
        app.handle(AppEvent::ChatListLoaded { user, request, result: Ok(peers) });
        assert_eq!(app.conversations()[0].peer_username, "bob");
    }

    #[test]
    fn selected_peer_is_polled_until_switched() {
        let (mut app, env, _) = logged_in("messages");
        app.start();

        let bob = fetch_token(&app.select_peer("bob"));
        env.advance(3000);
        let actions = app.handle(AppEvent::Tick);
        assert_eq!(fetch_token(&actions), bob);

        let carol = fetch_token(&app.select_peer("carol"));
        assert_ne!(bob, carol);

        // Late answer for bob must not replace carol's thread
        let stale = vec![WireMessage {
            sender: "bob".to_string(),
            receiver: "abc".to_string(),
            text: "hi".to_string(),
            timestamp: None,
        }];
        let actions = app.handle(AppEvent::MessagesLoaded {
            peer: "bob".to_string(),
            token: bob,
            result: Ok(stale),
        });
        assert!(actions.is_empty());
        assert_eq!(app.thread().map(Thread::peer), Some("carol"));
        assert!(app.thread().unwrap().messages().is_empty());
    }

    #[test]
    fn leaving_messages_stops_polling() {
        let (mut app, env, _) = logged_in("messages");
        app.select_peer("bob");
        app.edit_draft("half typed".to_string());

        app.navigate(View::Feed);
        env.advance(10_000);

        assert!(!app.poller().is_polling());
        assert!(app.thread().is_none());
        assert_eq!(app.draft(), "");
        let actions = app.handle(AppEvent::Tick);
        assert!(actions.iter().all(|a| !matches!(a, AppAction::FetchMessages { .. })));
    }

    #[test]
    fn back_cancels_the_poll_session() {
        let (mut app, env, _) = logged_in("messages");
        let bob = fetch_token(&app.select_peer("bob"));

        assert_eq!(app.close_thread(), vec![AppAction::Render]);
        assert!(!app.poller().is_polling());
        assert!(app.close_thread().is_empty());

        env.advance(3000);
        assert!(app.handle(AppEvent::Tick).is_empty());
        let again = fetch_token(&app.select_peer("bob"));
        assert_ne!(again, bob);
    }

    #[test]
    fn switching_peer_discards_draft_and_pending_send() {
        let (mut app, _, _) = logged_in("messages");
        app.select_peer("bob");
        app.edit_draft("for bob".to_string());
        app.send_draft();

        app.select_peer("carol");
        assert_eq!(app.draft(), "");
        app.edit_draft("for carol".to_string());

        // Bob's delivery no longer touches the composer
        let actions =
            app.handle(AppEvent::MessageSent { send_id: SendId::new(1), result: Ok(()) });
        assert!(actions.is_empty());
        assert_eq!(app.draft(), "for carol");
        assert_eq!(app.thread().map(Thread::peer), Some("carol"));
    }

    #[test]
    fn reselecting_open_peer_keeps_draft() {
        let (mut app, _, _) = logged_in("messages");
        app.select_peer("bob");
        app.edit_draft("half typed".to_string());

        assert!(app.select_peer("bob").is_empty());
        assert_eq!(app.draft(), "half typed");
    }

    #[test]
    fn send_is_optimistic_and_rolls_back_on_failure() {
        let (mut app, _, _) = logged_in("messages");
        app.select_peer("bob");
        app.edit_draft("yo".to_string());

        let actions = app.send_draft();
        let expected = OutgoingMessage {
            sender: "abc".to_string(),
            receiver: "bob".to_string(),
            text: "yo".to_string(),
        };
        let send = AppAction::SendMessage { send_id: SendId::new(1), message: expected };
        assert_eq!(actions[0], send);
        let thread = app.thread().unwrap();
        assert_eq!(thread.messages()[0].origin, MessageOrigin::Optimistic);

        app.handle(AppEvent::MessageSent {
            send_id: SendId::new(1),
            result: Err(ApiError::Transport("reset".into())),
        });

        assert!(app.thread().unwrap().messages().is_empty());
        assert_eq!(app.draft(), "yo");
        assert!(app.toast().is_none());
    }

    #[test]
    fn blank_draft_sends_nothing() {
        let (mut app, _, _) = logged_in("messages");
        app.select_peer("bob");
        app.edit_draft("  ".to_string());

        assert!(app.send_draft().is_empty());
        assert!(app.thread().unwrap().messages().is_empty());
    }

    #[test]
    fn logout_clears_session_and_keys() {
        let (mut app, _, store) = logged_in("messages");
        app.select_peer("bob");

        app.logout();

        assert_eq!(app.current_view(), View::Login);
        assert!(store.is_empty());
        assert!(!app.poller().is_polling());
        assert_eq!(toast_text(&app), Some(("Logged out successfully", ToastKind::Success)));
    }

    #[test]
    fn toast_expires_on_tick() {
        let (mut app, env, _) = logged_in("feed");
        app.logout();

        env.advance(2999);
        assert!(app.handle(AppEvent::Tick).is_empty());
        env.advance(1);
        assert_eq!(app.handle(AppEvent::Tick), vec![AppAction::Render]);
        assert!(app.toast().is_none());
    }

    #[test]
    fn content_for_previous_user_is_discarded() {
        let (mut app, _, _) = logged_in("feed");
        app.logout();

        let actions = app.handle(AppEvent::ContentLoaded {
            kind: ContentKind::Posts,
            user: "abc".to_string(),
            result: Ok(Content::Posts(Vec::new())),
        });
        assert!(actions.is_empty());
    }
}
