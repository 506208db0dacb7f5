//! Owner-scoped write-side repository backed by Postgres.
//!
//! Every mutation filters on the row id AND the author id in the same
//! predicate, so a user editing someone else's post sees the same result
//! as editing a post that does not exist.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ColumnTrait, DbConn, DbErr, EntityTrait, FromQueryResult, QueryFilter, QueryOrder,
    QuerySelect,
};
use tracing::{debug, warn};
use uuid::Uuid;

use inkpost_core::domain::{
    DashboardAnalytics, NewPost, Post, PostPatch, PostStatus, PostWithAuthor, Profile,
    ProfilePatch,
};
use inkpost_core::ports::{DashboardRepository, SessionUser};
use inkpost_core::{Outcome, RepoError};

use super::entity::{post, profile};
use super::postgres_blog::into_post_with_author;

const POST_ACCESS_DENIED: &str = "Post not found or access denied";
const PROFILE_NOT_FOUND: &str = "Profile not found";

/// Narrow projection used by the analytics tally.
#[derive(Debug, FromQueryResult)]
struct AnalyticsRow {
    status: String,
    view_count: Option<i64>,
}

#[derive(Clone)]
pub struct PostgresDashboardRepository {
    db: DbConn,
}

impl PostgresDashboardRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    async fn create_profile(&self, session: &SessionUser) -> Result<Profile, DbErr> {
        let row = profile::ActiveModel {
            id: Set(session.id),
            display_name: Set(Some(session.default_display_name())),
            bio: Set(None),
            avatar_url: Set(None),
            created_at: Set(Utc::now().into()),
        };
        profile::Entity::insert(row)
            .exec_with_returning(&self.db)
            .await
            .map(Profile::from)
    }
}

fn map_db_err(err: DbErr) -> RepoError {
    match err {
        DbErr::Conn(inner) => RepoError::Connection(inner.to_string()),
        DbErr::RecordNotFound(message) => RepoError::NotFound(message),
        other => RepoError::Query(other.to_string()),
    }
}

#[async_trait]
impl DashboardRepository for PostgresDashboardRepository {
    async fn profile_for(&self, session: &SessionUser) -> Outcome<Profile> {
        match profile::Entity::find_by_id(session.id).one(&self.db).await {
            Ok(Some(model)) => Outcome::Success(Profile::from(model)),
            Ok(None) => {
                // First dashboard visit; the provider knows the user but we
                // have no profile row yet.
                debug!(user_id = %session.id, "creating profile on first access");
                match self.create_profile(session).await {
                    Ok(profile) => Outcome::Success(profile),
                    Err(err) => {
                        warn!(error = %err, user_id = %session.id, "profile creation failed");
                        Outcome::NotFound("Failed to create user profile".to_owned())
                    }
                }
            }
            Err(err) => {
                warn!(error = %err, user_id = %session.id, "profile lookup failed");
                Outcome::Error("Failed to fetch user profile".to_owned())
            }
        }
    }

    async fn posts_for(&self, user: Uuid) -> Vec<PostWithAuthor> {
        let result = post::Entity::find()
            .find_also_related(profile::Entity)
            .filter(post::Column::AuthorId.eq(user))
            .order_by_desc(post::Column::CreatedAt)
            .all(&self.db)
            .await;
        match result {
            Ok(rows) => rows.into_iter().map(into_post_with_author).collect(),
            Err(err) => {
                warn!(error = %err, user_id = %user, "dashboard post listing failed");
                Vec::new()
            }
        }
    }

    async fn post_for_editing(&self, id: Uuid, user: Uuid) -> Option<Post> {
        let result = post::Entity::find()
            .filter(post::Column::Id.eq(id))
            .filter(post::Column::AuthorId.eq(user))
            .one(&self.db)
            .await;
        match result {
            Ok(found) => found.map(Post::from),
            Err(err) => {
                warn!(error = %err, post_id = %id, "editable post lookup failed");
                None
            }
        }
    }

    async fn create_post(&self, user: Uuid, new_post: NewPost) -> Result<Post, RepoError> {
        let now = Utc::now();
        let published_at = matches!(new_post.status, PostStatus::Published).then(|| now.into());
        let row = post::ActiveModel {
            id: Set(Uuid::new_v4()),
            author_id: Set(Some(user)),
            title: Set(new_post.title),
            content: Set(new_post.content),
            image_url: Set(new_post.image_url),
            status: Set(new_post.status.as_str().to_owned()),
            featured: Set(new_post.featured),
            view_count: Set(Some(0)),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
            published_at: Set(published_at),
        };
        post::Entity::insert(row)
            .exec_with_returning(&self.db)
            .await
            .map(Post::from)
            .map_err(map_db_err)
    }

    async fn update_post(&self, id: Uuid, user: Uuid, patch: PostPatch) -> Result<Post, RepoError> {
        // Pre-read decides first publication. published_at is stamped only
        // when the post has never been published before, and nothing in a
        // later patch resets it.
        let existing = post::Entity::find()
            .filter(post::Column::Id.eq(id))
            .filter(post::Column::AuthorId.eq(user))
            .one(&self.db)
            .await
            .map_err(map_db_err)?
            .ok_or_else(|| RepoError::NotFound(POST_ACCESS_DENIED.to_owned()))?;

        let mut changes = post::ActiveModel {
            updated_at: Set(Utc::now().into()),
            ..Default::default()
        };
        if let Some(title) = patch.title {
            changes.title = Set(title);
        }
        if let Some(content) = patch.content {
            changes.content = Set(content);
        }
        if let Some(image_url) = patch.image_url {
            changes.image_url = Set(Some(image_url));
        }
        if let Some(featured) = patch.featured {
            changes.featured = Set(featured);
        }
        if let Some(status) = patch.status {
            changes.status = Set(status.as_str().to_owned());
            if status == PostStatus::Published && existing.published_at.is_none() {
                changes.published_at = Set(Some(Utc::now().into()));
            }
        }

        post::Entity::update_many()
            .set(changes)
            .filter(post::Column::Id.eq(id))
            .filter(post::Column::AuthorId.eq(user))
            .exec_with_returning(&self.db)
            .await
            .map_err(map_db_err)?
            .into_iter()
            .next()
            .map(Post::from)
            .ok_or_else(|| RepoError::NotFound(POST_ACCESS_DENIED.to_owned()))
    }

    async fn delete_post(&self, id: Uuid, user: Uuid) -> Result<(), RepoError> {
        let result = post::Entity::delete_many()
            .filter(post::Column::Id.eq(id))
            .filter(post::Column::AuthorId.eq(user))
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;
        if result.rows_affected == 0 {
            // Unowned or missing rows delete to nothing, by the same predicate
            // as updates, but deletion of nothing is not an error.
            debug!(post_id = %id, user_id = %user, "delete matched no rows");
        }
        Ok(())
    }

    async fn update_profile(&self, user: Uuid, patch: ProfilePatch) -> Result<Profile, RepoError> {
        // An empty patch would build an UPDATE with no SET clause, which
        // affects zero rows and misreads as a missing profile. Read instead.
        if patch.is_empty() {
            return profile::Entity::find_by_id(user)
                .one(&self.db)
                .await
                .map_err(map_db_err)?
                .map(Profile::from)
                .ok_or_else(|| RepoError::NotFound(PROFILE_NOT_FOUND.to_owned()));
        }

        let mut changes = profile::ActiveModel::default();
        if let Some(display_name) = patch.display_name {
            changes.display_name = Set(Some(display_name));
        }
        if let Some(bio) = patch.bio {
            changes.bio = Set(Some(bio));
        }
        if let Some(avatar_url) = patch.avatar_url {
            changes.avatar_url = Set(Some(avatar_url));
        }

        profile::Entity::update_many()
            .set(changes)
            .filter(profile::Column::Id.eq(user))
            .exec_with_returning(&self.db)
            .await
            .map_err(map_db_err)?
            .into_iter()
            .next()
            .map(Profile::from)
            .ok_or_else(|| RepoError::NotFound(PROFILE_NOT_FOUND.to_owned()))
    }

    async fn analytics_for(&self, user: Uuid) -> Option<DashboardAnalytics> {
        let rows = post::Entity::find()
            .select_only()
            .columns([
                post::Column::Id,
                post::Column::Status,
                post::Column::ViewCount,
                post::Column::CreatedAt,
            ])
            .filter(post::Column::AuthorId.eq(user))
            .into_model::<AnalyticsRow>()
            .all(&self.db)
            .await;
        let rows = match rows {
            Ok(rows) => rows,
            Err(err) => {
                warn!(error = %err, user_id = %user, "analytics fetch failed");
                return None;
            }
        };

        Some(DashboardAnalytics::tally(rows.into_iter().map(|row| {
            (
                PostStatus::parse(&row.status).unwrap_or(PostStatus::Draft),
                row.view_count,
            )
        })))
    }
}
