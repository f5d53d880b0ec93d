//! Plain-text rendering.
//!
//! Each render writes a header with the active view and user, the visible
//! toast, and a body for the view.

use std::io::{self, Write};

use finstagram_app::{App, ChatMessage, Environment, MessageTime, ToastKind, View};
use finstagram_proto::MediaEntry;
use finstagram_store::KeyValueStore;

/// Write the full screen for `app`.
pub fn render<E, S, W>(out: &mut W, app: &App<E, S>) -> io::Result<()>
where
    E: Environment,
    S: KeyValueStore,
    W: Write,
{
    let view = app.current_view();
    match app.username() {
        Some(user) => writeln!(out, "== {view} == @{user}")?,
        None => writeln!(out, "== {view} ==")?,
    }
    if let Some(toast) = app.toast() {
        let tag = match toast.kind {
            ToastKind::Success => "ok",
            ToastKind::Error => "error",
        };
        writeln!(out, "[{tag}] {}", toast.text)?;
    }

    match view {
        View::Login => {
            writeln!(out, "login <username> <password>   (no account? show signup)")?;
            waiting(out, app)?;
        },
        View::Signup => {
            writeln!(out, "signup <username> <password>  (have an account? show login)")?;
            waiting(out, app)?;
        },
        View::ProfileSetup => {
            writeln!(out, "profile <full name> | <bio> | <location>")?;
            waiting(out, app)?;
        },
        View::Feed => media(out, app.content().posts(), "No posts yet.")?,
        View::Reels => media(out, app.content().reels(), "No reels yet.")?,
        View::Messages => messages(out, app)?,
        View::Notifications => {
            let notifications = app.content().notifications();
            if notifications.is_empty() {
                writeln!(out, "No notifications.")?;
            }
            for notification in notifications {
                match &notification.time {
                    Some(time) => writeln!(out, "  {} ({time})", notification.message)?,
                    None => writeln!(out, "  {}", notification.message)?,
                }
            }
        },
        View::Profile => match app.content().profile() {
            Some(profile) => {
                writeln!(out, "{}", profile.full_name.as_deref().unwrap_or("(no name)"))?;
                if let Some(bio) = profile.bio.as_deref().filter(|bio| !bio.is_empty()) {
                    writeln!(out, "{bio}")?;
                }
                if let Some(location) = profile.location.as_deref().filter(|l| !l.is_empty()) {
                    writeln!(out, "@ {location}")?;
                }
                writeln!(out, "{} posts", profile.posts.len())?;
            },
            None => writeln!(out, "Loading profile...")?,
        },
    }
    Ok(())
}

fn waiting<E, S, W>(out: &mut W, app: &App<E, S>) -> io::Result<()>
where
    E: Environment,
    S: KeyValueStore,
    W: Write,
{
    if app.is_submitting() {
        writeln!(out, "...waiting for server")?;
    }
    Ok(())
}

fn media<W: Write>(out: &mut W, entries: &[MediaEntry], empty: &str) -> io::Result<()> {
    if entries.is_empty() {
        writeln!(out, "{empty}")?;
    }
    for entry in entries {
        let caption = entry.caption.as_deref().filter(|c| !c.is_empty()).unwrap_or(&entry.url);
        writeln!(out, "  @{}: {caption}", entry.username)?;
    }
    Ok(())
}

fn messages<E, S, W>(out: &mut W, app: &App<E, S>) -> io::Result<()>
where
    E: Environment,
    S: KeyValueStore,
    W: Write,
{
    let Some(thread) = app.thread() else {
        let conversations = app.conversations();
        if conversations.is_empty() {
            writeln!(out, "No conversations yet.")?;
        }
        for conversation in conversations {
            writeln!(out, "  @{}", conversation.peer_username)?;
        }
        return writeln!(out, "open <peer> to chat");
    };

    writeln!(out, "Chat with @{}", thread.peer())?;
    for message in thread.messages() {
        writeln!(out, "  {}", message_line(message))?;
    }
    writeln!(out, "> {}", app.draft())
}

fn message_line(message: &ChatMessage) -> String {
    let time = match &message.timestamp {
        MessageTime::Server(Some(time)) => time.as_str(),
        MessageTime::Server(None) => "",
        MessageTime::Local(_) => "now",
    };
    let pending = if message.is_optimistic() { " (sending)" } else { "" };
    format!("[{time}] {}: {}{pending}", message.sender, message.text)
}
