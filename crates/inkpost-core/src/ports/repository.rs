use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{
    Category, DashboardAnalytics, NewPost, Post, PostPatch, PostWithAuthor, PostWithDetails,
    Profile, ProfilePatch, Tag,
};
use crate::error::{Outcome, RepoError};

use super::SessionUser;

/// Public read side of the Query Layer.
///
/// Every method degrades on store failure: collections come back empty and
/// single-row lookups come back `None`, never an error. A visitor cannot
/// tell "doesn't exist" apart from "the store hiccuped".
#[async_trait]
pub trait BlogRepository: Send + Sync {
    /// Published posts, newest first, each joined with its author profile.
    async fn list_published(&self, limit: Option<u64>) -> Vec<PostWithAuthor>;

    /// Published posts flagged as featured.
    async fn list_featured(&self, limit: u64) -> Vec<PostWithAuthor>;

    /// Published posts not flagged as featured.
    async fn list_recent(&self, limit: u64) -> Vec<PostWithAuthor>;

    /// One post with author, tags and categories merged on. Restricted to
    /// published posts unless `include_unpublished` is set.
    async fn post_by_id(&self, id: Uuid, include_unpublished: bool) -> Option<PostWithDetails>;

    /// Published posts carrying the tag; empty when the slug does not resolve.
    async fn posts_by_tag(&self, slug: &str, limit: Option<u64>) -> Vec<PostWithAuthor>;

    /// Published posts in the category; empty when the slug does not resolve.
    async fn posts_by_category(&self, slug: &str, limit: Option<u64>) -> Vec<PostWithAuthor>;

    /// Published posts by one author, newest first.
    async fn posts_by_author(&self, author_id: Uuid, limit: Option<u64>) -> Vec<PostWithAuthor>;

    async fn author_by_display_name(&self, name: &str) -> Option<Profile>;

    async fn tag_by_slug(&self, slug: &str) -> Option<Tag>;

    async fn category_by_slug(&self, slug: &str) -> Option<Category>;

    /// All tags ordered by name.
    async fn all_tags(&self) -> Vec<Tag>;

    /// All categories ordered by name.
    async fn all_categories(&self) -> Vec<Category>;

    /// Read-then-write view counter bump. Errors are logged and swallowed;
    /// concurrent bumps on the same row may undercount. Callers only invoke
    /// this for published posts.
    async fn increment_view_count(&self, post_id: Uuid);
}

/// Owner-scoped side of the Query Layer. The session user is always an
/// explicit argument; unauthenticated requests are rejected before any of
/// these methods run.
#[async_trait]
pub trait DashboardRepository: Send + Sync {
    /// Fetch the session user's profile, creating it on first access.
    async fn profile_for(&self, session: &SessionUser) -> Outcome<Profile>;

    /// All of the user's posts, drafts included, newest first.
    async fn posts_for(&self, user: Uuid) -> Vec<PostWithAuthor>;

    /// One post filtered by id AND author. Not-found and not-owned are
    /// indistinguishable to the caller.
    async fn post_for_editing(&self, id: Uuid, user: Uuid) -> Option<Post>;

    async fn create_post(&self, user: Uuid, post: NewPost) -> Result<Post, RepoError>;

    /// Update filtered by id AND author; zero affected rows is `NotFound`,
    /// never silent success. `published_at` is stamped only on the first
    /// transition into published and never reset afterwards.
    async fn update_post(&self, id: Uuid, user: Uuid, patch: PostPatch) -> Result<Post, RepoError>;

    /// Delete filtered by id AND author; zero affected rows is a silent no-op.
    async fn delete_post(&self, id: Uuid, user: Uuid) -> Result<(), RepoError>;

    /// Update filtered by id = user; zero affected rows is `NotFound`,
    /// distinct from a store-level error.
    async fn update_profile(&self, user: Uuid, patch: ProfilePatch) -> Result<Profile, RepoError>;

    /// Narrow select of the user's posts, tallied in memory. `None` when
    /// the fetch fails.
    async fn analytics_for(&self, user: Uuid) -> Option<DashboardAnalytics>;
}
