//! Event loop executing [`App`] actions.
//!
//! One loop serves three sources: user input from the [`Driver`], completed
//! [`Api`] requests (each performed on its own task) and a fixed tick that
//! drives toast expiry and conversation polling.

use std::time::Duration;

use finstagram_client::Api;
use finstagram_store::KeyValueStore;
use tokio::sync::mpsc;

use crate::{App, AppAction, AppEvent, Content, ContentKind, Driver, Environment};

/// Default period of [`AppEvent::Tick`].
pub const DEFAULT_TICK: Duration = Duration::from_millis(100);

/// Generic runtime that orchestrates App, Api, and Driver.
///
/// # Type Parameters
///
/// - `D`: frontend supplying input and rendering
/// - `E`: Environment providing time
/// - `S`: Persistent key-value store backing the session
/// - `A`: Backend client
pub struct Runtime<D, E, S, A>
where
    D: Driver,
    E: Environment,
    S: KeyValueStore,
    A: Api,
{
    driver: D,
    app: App<E, S>,
    api: A,
    tick: Duration,
    completions_tx: mpsc::UnboundedSender<AppEvent>,
    completions_rx: mpsc::UnboundedReceiver<AppEvent>,
}

impl<D, E, S, A> Runtime<D, E, S, A>
where
    D: Driver,
    E: Environment,
    S: KeyValueStore,
    A: Api,
{
    /// Create a new runtime ticking every [`DEFAULT_TICK`].
    pub fn new(driver: D, app: App<E, S>, api: A) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        Self { driver, app, api, tick: DEFAULT_TICK, completions_tx, completions_rx }
    }

    /// Override the tick period (at least one millisecond).
    #[must_use]
    pub fn with_tick(mut self, tick: Duration) -> Self {
        self.tick = tick.max(Duration::from_millis(1));
        self
    }

    /// Run the main event loop until the driver's input ends or the app quits.
    ///
    /// Each iteration waits for whichever comes first:
    /// 1. User input from the driver
    /// 2. A completed backend request
    /// 3. The next tick
    ///
    /// Backend requests are spawned and never awaited here, so a slow
    /// backend cannot stall input or timers. Returns the final app state.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver fails to read input or render.
    pub async fn run(mut self) -> Result<App<E, S>, D::Error> {
        let actions = self.app.start();
        if self.execute(actions)? {
            self.driver.stop();
            return Ok(self.app);
        }

        let mut ticker = tokio::time::interval(self.tick);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            let event = tokio::select! {
                input = self.driver.poll_input() => match input? {
                    Some(input) => AppEvent::Input(input),
                    None => break,
                },
                Some(event) = self.completions_rx.recv() => event,
                _ = ticker.tick() => AppEvent::Tick,
            };

            let actions = self.app.handle(event);
            if self.execute(actions)? {
                break;
            }
        }

        self.driver.stop();
        Ok(self.app)
    }

    /// Execute actions returned by the App.
    ///
    /// Renders at most once per batch. Returns `true` if should quit.
    fn execute(&mut self, actions: Vec<AppAction>) -> Result<bool, D::Error> {
        let mut render = false;
        for action in actions {
            match action {
                AppAction::Render => render = true,
                AppAction::Quit => return Ok(true),
                request => self.spawn_request(request),
            }
        }
        if render {
            self.driver.render(&self.app)?;
        }
        Ok(false)
    }

    /// Run one backend request in the background, delivering its completion
    /// back to the loop.
    fn spawn_request(&self, action: AppAction) {
        let api = self.api.clone();
        let completions = self.completions_tx.clone();
        tokio::spawn(async move {
            let Some(event) = perform(&api, action).await else {
                return;
            };
            if completions.send(event).is_err() {
                tracing::debug!("runtime stopped before request completed");
            }
        });
    }
}

/// Execute a request action against `api`, producing its completion event.
///
/// Returns `None` for actions that are not requests.
pub async fn perform<A: Api>(api: &A, action: AppAction) -> Option<AppEvent> {
    let event = match action {
        AppAction::Render | AppAction::Quit => return None,
        AppAction::Login(credentials) => {
            AppEvent::LoginCompleted { result: api.login(&credentials).await }
        },
        AppAction::Signup(credentials) => {
            AppEvent::SignupCompleted { result: api.signup(&credentials).await }
        },
        AppAction::CreateProfile(draft) => {
            AppEvent::ProfileSaved { result: api.create_profile(&draft).await }
        },
        AppAction::FetchChatList { user, request } => {
            let result = api.chat_list(&user).await;
            AppEvent::ChatListLoaded { user, request, result }
        },
        AppAction::FetchMessages { user, peer, token } => {
            let result = api.messages(&user, &peer).await;
            AppEvent::MessagesLoaded { peer, token, result }
        },
        AppAction::SendMessage { send_id, message } => {
            AppEvent::MessageSent { send_id, result: api.send_message(&message).await }
        },
        AppAction::FetchContent { kind, user } => {
            let result = match kind {
                ContentKind::Posts => api.posts().await.map(Content::Posts),
                ContentKind::Reels => api.reels().await.map(Content::Reels),
                ContentKind::Notifications => {
                    api.notifications(&user).await.map(Content::Notifications)
                },
                ContentKind::Profile => api.profile(&user).await.map(Content::Profile),
            };
            AppEvent::ContentLoaded { kind, user, result }
        },
    };
    Some(event)
}
