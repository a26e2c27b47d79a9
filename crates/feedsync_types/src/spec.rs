//! Feed-spec classification.
//!
//! A feed spec is an opaque string identifying a feed's scope, ordering and
//! filter. The classifier understands the following grammar:
//!
//! ```text
//! home                          the follow-based timeline
//! public:local                  posts from the local instance
//! public:federated              posts from the whole network
//! tag:<name>                    a hashtag timeline
//! list:<id>                     a user-curated list
//! profile:<account>:posts       posts authored by one account
//! profile:<account>:replies     replies authored by one account
//! bookmarks                     the owner's bookmarked posts
//! ```
//!
//! Any other string classifies as [`FeedKind::Custom`]. Classification is
//! total and deterministic: it never fails, and the same spec string always
//! yields the same kind.

/// Enumerated classification of a feed-spec string.
///
/// Computed once per feed instance and consulted wherever policy branches
/// on the kind of feed (boundary queries, cache staleness, pagination).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedKind {
    /// The follow-based home timeline.
    Home,
    /// The local-instance public timeline.
    PublicLocal,
    /// The federated public timeline.
    PublicFederated,
    /// A hashtag timeline.
    Hashtag,
    /// A user-curated list timeline.
    List,
    /// Posts authored by a single profile.
    ProfilePosts,
    /// Replies authored by a single profile.
    ProfileReplies,
    /// The owner's bookmarks.
    Bookmarks,
    /// Any spec the classifier does not recognize.
    Custom,
}

impl FeedKind {
    /// Classifies a feed-spec string.
    ///
    /// Total: unrecognized or malformed specs classify as `Custom` rather
    /// than failing.
    pub fn classify(spec: &str) -> Self {
        match spec {
            "home" => return FeedKind::Home,
            "public:local" => return FeedKind::PublicLocal,
            "public:federated" => return FeedKind::PublicFederated,
            "bookmarks" => return FeedKind::Bookmarks,
            _ => {}
        }

        if let Some(name) = spec.strip_prefix("tag:") {
            if !name.is_empty() {
                return FeedKind::Hashtag;
            }
        }

        if let Some(id) = spec.strip_prefix("list:") {
            if !id.is_empty() {
                return FeedKind::List;
            }
        }

        if let Some(rest) = spec.strip_prefix("profile:") {
            if let Some((account, tail)) = rest.rsplit_once(':') {
                if !account.is_empty() {
                    match tail {
                        "posts" => return FeedKind::ProfilePosts,
                        "replies" => return FeedKind::ProfileReplies,
                        _ => {}
                    }
                }
            }
        }

        FeedKind::Custom
    }

    /// Returns true if repost entries appear in this feed.
    ///
    /// Reposts change how the oldest/newest cached item is computed: a
    /// repost and its original may carry different timestamps but occupy
    /// one list position.
    pub fn supports_reposts(&self) -> bool {
        matches!(
            self,
            FeedKind::Home
                | FeedKind::PublicLocal
                | FeedKind::PublicFederated
                | FeedKind::List
                | FeedKind::ProfilePosts
                | FeedKind::Custom
        )
    }

    /// Returns true if this feed keeps a reading position and can be paged
    /// toward newer items.
    pub fn supports_upward_pagination(&self) -> bool {
        matches!(self, FeedKind::Home | FeedKind::List)
    }

    /// Returns true for the owner's bookmark feed.
    pub fn is_bookmark_feed(&self) -> bool {
        matches!(self, FeedKind::Bookmarks)
    }

    /// Returns true for a single profile's authored-posts feed.
    pub fn is_profile_authored_feed(&self) -> bool {
        matches!(self, FeedKind::ProfilePosts)
    }

    /// Returns true for a single profile's authored-replies feed.
    pub fn is_profile_authored_replies_feed(&self) -> bool {
        matches!(self, FeedKind::ProfileReplies)
    }
}

/// One feed instance: a spec string, the owning account, and the
/// classification computed once at construction.
///
/// A sync engine is created per scope; all cached state (items, remote
/// keys) is keyed by (spec, owner) so distinct scopes never collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FeedScope {
    /// The opaque feed-spec string.
    pub spec: String,
    /// The account this feed instance belongs to.
    pub owner: String,
    /// Classification of `spec`.
    pub kind: FeedKind,
}

impl FeedScope {
    /// Creates a scope, classifying the spec string.
    pub fn new(spec: impl Into<String>, owner: impl Into<String>) -> Self {
        let spec = spec.into();
        let kind = FeedKind::classify(&spec);
        Self {
            spec,
            owner: owner.into(),
            kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn classify_known_specs() {
        assert_eq!(FeedKind::classify("home"), FeedKind::Home);
        assert_eq!(FeedKind::classify("public:local"), FeedKind::PublicLocal);
        assert_eq!(
            FeedKind::classify("public:federated"),
            FeedKind::PublicFederated
        );
        assert_eq!(FeedKind::classify("bookmarks"), FeedKind::Bookmarks);
        assert_eq!(FeedKind::classify("tag:rust"), FeedKind::Hashtag);
        assert_eq!(FeedKind::classify("list:42"), FeedKind::List);
        assert_eq!(
            FeedKind::classify("profile:alice@example.org:posts"),
            FeedKind::ProfilePosts
        );
        assert_eq!(
            FeedKind::classify("profile:alice@example.org:replies"),
            FeedKind::ProfileReplies
        );
    }

    #[test]
    fn classify_malformed_specs_as_custom() {
        assert_eq!(FeedKind::classify(""), FeedKind::Custom);
        assert_eq!(FeedKind::classify("tag:"), FeedKind::Custom);
        assert_eq!(FeedKind::classify("list:"), FeedKind::Custom);
        assert_eq!(FeedKind::classify("profile:"), FeedKind::Custom);
        assert_eq!(FeedKind::classify("profile::posts"), FeedKind::Custom);
        assert_eq!(FeedKind::classify("profile:alice:likes"), FeedKind::Custom);
        assert_eq!(FeedKind::classify("HOME"), FeedKind::Custom);
        assert_eq!(FeedKind::classify("something else"), FeedKind::Custom);
    }

    #[test]
    fn repost_support_per_kind() {
        assert!(FeedKind::Home.supports_reposts());
        assert!(FeedKind::PublicFederated.supports_reposts());
        assert!(FeedKind::List.supports_reposts());
        assert!(FeedKind::ProfilePosts.supports_reposts());
        assert!(!FeedKind::Hashtag.supports_reposts());
        assert!(!FeedKind::ProfileReplies.supports_reposts());
        assert!(!FeedKind::Bookmarks.supports_reposts());
    }

    #[test]
    fn upward_pagination_per_kind() {
        assert!(FeedKind::Home.supports_upward_pagination());
        assert!(FeedKind::List.supports_upward_pagination());
        assert!(!FeedKind::PublicFederated.supports_upward_pagination());
        assert!(!FeedKind::Bookmarks.supports_upward_pagination());
        assert!(!FeedKind::Custom.supports_upward_pagination());
    }

    #[test]
    fn special_feed_predicates() {
        assert!(FeedKind::Bookmarks.is_bookmark_feed());
        assert!(FeedKind::ProfilePosts.is_profile_authored_feed());
        assert!(FeedKind::ProfileReplies.is_profile_authored_replies_feed());
        assert!(!FeedKind::Home.is_bookmark_feed());
        assert!(!FeedKind::Home.is_profile_authored_feed());
        assert!(!FeedKind::ProfilePosts.is_profile_authored_replies_feed());
    }

    #[test]
    fn scope_classifies_on_construction() {
        let scope = FeedScope::new("tag:rust", "owner-1");
        assert_eq!(scope.kind, FeedKind::Hashtag);
        assert_eq!(scope.spec, "tag:rust");
        assert_eq!(scope.owner, "owner-1");
    }

    proptest! {
        // Classification must be total and stable for arbitrary input.
        #[test]
        fn classification_is_total_and_stable(spec in ".{0,64}") {
            let first = FeedKind::classify(&spec);
            let second = FeedKind::classify(&spec);
            prop_assert_eq!(first, second);
        }

        #[test]
        fn predicates_never_panic(spec in ".{0,64}") {
            let kind = FeedKind::classify(&spec);
            let _ = kind.supports_reposts();
            let _ = kind.supports_upward_pagination();
            let _ = kind.is_bookmark_feed();
            let _ = kind.is_profile_authored_feed();
            let _ = kind.is_profile_authored_replies_feed();
        }
    }
}
