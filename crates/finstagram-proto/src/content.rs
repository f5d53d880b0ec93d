//! Feed, reels, notifications and profile payloads.
//!
//! These views are display-only; the client fetches them once per visit and
//! never mutates them locally.

use serde::{Deserialize, Serialize};

/// A post or reel as returned by `GET /api/posts` and `GET /api/reels`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaEntry {
    /// Author.
    pub username: String,
    /// Media URL.
    pub url: String,
    /// Caption, possibly `null`.
    #[serde(default)]
    pub caption: Option<String>,
    /// Author's profile picture URL.
    #[serde(default)]
    pub avatar: Option<String>,
    /// Upload time as an opaque display string.
    #[serde(default, deserialize_with = "crate::time::lenient")]
    pub time: Option<String>,
}

/// One entry of `GET /notifications/{username}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationEntry {
    /// Notification text.
    pub message: String,
    /// Creation time as an opaque display string.
    #[serde(default, deserialize_with = "crate::time::lenient")]
    pub time: Option<String>,
}

/// Response of `GET /profile/{username}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileView {
    /// Display name.
    #[serde(default)]
    pub full_name: Option<String>,
    /// Biography.
    #[serde(default)]
    pub bio: Option<String>,
    /// Location.
    #[serde(default)]
    pub location: Option<String>,
    /// Profile picture URL.
    #[serde(default)]
    pub profile_pic: Option<String>,
    /// The user's own posts, newest first.
    #[serde(default)]
    pub posts: Vec<ProfilePost>,
}

/// A post in the profile grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfilePost {
    /// Media URL.
    pub url: String,
    /// Caption, possibly `null`.
    #[serde(default)]
    pub caption: Option<String>,
    /// Upload time as an opaque display string.
    #[serde(default, deserialize_with = "crate::time::lenient")]
    pub time: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_without_posts() {
        let profile: ProfileView =
            serde_json::from_str(r#"{"full_name":"Abc","bio":null,"location":"Earth"}"#).unwrap();

        assert_eq!(profile.full_name.as_deref(), Some("Abc"));
        assert_eq!(profile.bio, None);
        assert!(profile.posts.is_empty());
    }

    #[test]
    fn media_entry_null_caption() {
        let entry: MediaEntry = serde_json::from_str(
            r#"{"username":"bob","url":"http://x/a.jpg","caption":null,"avatar":null,"time":null}"#,
        )
        .unwrap();

        assert_eq!(entry.caption, None);
        assert_eq!(entry.time, None);
    }
}
