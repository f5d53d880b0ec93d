//! Read-only content shown by the feed, reels, notifications and profile
//! views.

use std::fmt;

use finstagram_proto::{MediaEntry, NotificationEntry, ProfileView};

use crate::View;

/// Which collection a fetch targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentKind {
    /// Image posts.
    Posts,
    /// Video posts.
    Reels,
    /// Notifications for the current user.
    Notifications,
    /// Profile of the current user.
    Profile,
}

impl ContentKind {
    /// Content backing `view`, if it shows any.
    pub fn for_view(view: View) -> Option<Self> {
        match view {
            View::Feed => Some(Self::Posts),
            View::Reels => Some(Self::Reels),
            View::Notifications => Some(Self::Notifications),
            View::Profile => Some(Self::Profile),
            View::Login | View::Signup | View::ProfileSetup | View::Messages => None,
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Posts => "posts",
            Self::Reels => "reels",
            Self::Notifications => "notifications",
            Self::Profile => "profile",
        })
    }
}

/// A fetched collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    /// Image posts, as returned by the backend.
    Posts(Vec<MediaEntry>),
    /// Video posts, as returned by the backend.
    Reels(Vec<MediaEntry>),
    /// Notifications.
    Notifications(Vec<NotificationEntry>),
    /// Profile.
    Profile(ProfileView),
}

/// Last successfully fetched copy of each collection.
///
/// Posts and reels are kept newest first; the backend returns them oldest
/// first.
#[derive(Debug, Clone, Default)]
pub struct ContentCache {
    posts: Vec<MediaEntry>,
    reels: Vec<MediaEntry>,
    notifications: Vec<NotificationEntry>,
    profile: Option<ProfileView>,
}

impl ContentCache {
    /// Empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a fetched collection, replacing the previous copy.
    pub fn apply(&mut self, content: Content) {
        match content {
            Content::Posts(mut posts) => {
                posts.reverse();
                self.posts = posts;
            },
            Content::Reels(mut reels) => {
                reels.reverse();
                self.reels = reels;
            },
            Content::Notifications(notifications) => self.notifications = notifications,
            Content::Profile(profile) => self.profile = Some(profile),
        }
    }

    /// Image posts, newest first.
    pub fn posts(&self) -> &[MediaEntry] {
        &self.posts
    }

    /// Video posts, newest first.
    pub fn reels(&self) -> &[MediaEntry] {
        &self.reels
    }

    /// Notifications in backend order.
    pub fn notifications(&self) -> &[NotificationEntry] {
        &self.notifications
    }

    /// Profile, once loaded.
    pub fn profile(&self) -> Option<&ProfileView> {
        self.profile.as_ref()
    }

    /// Drop everything.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
