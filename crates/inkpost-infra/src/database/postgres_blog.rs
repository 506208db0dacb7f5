//! Public read-side repository backed by Postgres.
//!
//! Every method here degrades on storage failure instead of surfacing it:
//! list operations return an empty vec, lookups return `None`. Callers
//! render whatever comes back; the failure is logged here.

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, DbConn, EntityTrait, ModelTrait, QueryFilter, QueryOrder, QuerySelect,
};
use tracing::{debug, warn};
use uuid::Uuid;

use inkpost_core::domain::{
    Category, Post, PostStatus, PostWithAuthor, PostWithDetails, Profile, Tag,
};
use inkpost_core::ports::BlogRepository;

use super::entity::{category, post, profile, tag};

pub(crate) fn into_post_with_author(
    (post_model, author): (post::Model, Option<profile::Model>),
) -> PostWithAuthor {
    PostWithAuthor {
        post: Post::from(post_model),
        author: author.map(Profile::from),
    }
}

#[derive(Clone)]
pub struct PostgresBlogRepository {
    db: DbConn,
}

impl PostgresBlogRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    /// Base query for published posts joined with their author profile,
    /// newest first.
    fn published_with_authors(
        limit: Option<u64>,
    ) -> sea_orm::SelectTwo<post::Entity, profile::Entity> {
        post::Entity::find()
            .find_also_related(profile::Entity)
            .filter(post::Column::Status.eq(PostStatus::Published.as_str()))
            .filter(post::Column::PublishedAt.is_not_null())
            .order_by_desc(post::Column::PublishedAt)
            .limit(limit)
    }

    async fn collect_published(
        &self,
        query: sea_orm::SelectTwo<post::Entity, profile::Entity>,
        context: &str,
    ) -> Vec<PostWithAuthor> {
        match query.all(&self.db).await {
            Ok(rows) => rows.into_iter().map(into_post_with_author).collect(),
            Err(err) => {
                warn!(error = %err, context, "post listing failed, returning empty");
                Vec::new()
            }
        }
    }

    async fn tag_model_by_slug(&self, slug: &str) -> Option<tag::Model> {
        match tag::Entity::find()
            .filter(tag::Column::Slug.eq(slug))
            .one(&self.db)
            .await
        {
            Ok(found) => found,
            Err(err) => {
                warn!(error = %err, slug, "tag lookup failed");
                None
            }
        }
    }

    async fn category_model_by_slug(&self, slug: &str) -> Option<category::Model> {
        match category::Entity::find()
            .filter(category::Column::Slug.eq(slug))
            .one(&self.db)
            .await
        {
            Ok(found) => found,
            Err(err) => {
                warn!(error = %err, slug, "category lookup failed");
                None
            }
        }
    }
}

#[async_trait]
impl BlogRepository for PostgresBlogRepository {
    async fn list_published(&self, limit: Option<u64>) -> Vec<PostWithAuthor> {
        self.collect_published(Self::published_with_authors(limit), "list_published")
            .await
    }

    async fn list_featured(&self, limit: u64) -> Vec<PostWithAuthor> {
        let query =
            Self::published_with_authors(Some(limit)).filter(post::Column::Featured.eq(true));
        self.collect_published(query, "list_featured").await
    }

    async fn list_recent(&self, limit: u64) -> Vec<PostWithAuthor> {
        let query =
            Self::published_with_authors(Some(limit)).filter(post::Column::Featured.eq(false));
        self.collect_published(query, "list_recent").await
    }

    async fn post_by_id(&self, id: Uuid, include_unpublished: bool) -> Option<PostWithDetails> {
        let mut query = post::Entity::find_by_id(id).find_also_related(profile::Entity);
        if !include_unpublished {
            query = query.filter(post::Column::Status.eq(PostStatus::Published.as_str()));
        }

        let (post_model, author) = match query.one(&self.db).await {
            Ok(Some(pair)) => pair,
            Ok(None) => return None,
            Err(err) => {
                warn!(error = %err, post_id = %id, "post lookup failed");
                return None;
            }
        };

        // Taxonomy fetches are best-effort; a failed join still yields the post.
        let tags = match post_model.find_related(tag::Entity).all(&self.db).await {
            Ok(models) => models.into_iter().map(Tag::from).collect(),
            Err(err) => {
                warn!(error = %err, post_id = %id, "tag join failed");
                Vec::new()
            }
        };
        let categories = match post_model
            .find_related(category::Entity)
            .all(&self.db)
            .await
        {
            Ok(models) => models.into_iter().map(Category::from).collect(),
            Err(err) => {
                warn!(error = %err, post_id = %id, "category join failed");
                Vec::new()
            }
        };

        Some(PostWithDetails {
            post: Post::from(post_model),
            author: author.map(Profile::from),
            tags,
            categories,
        })
    }

    async fn posts_by_tag(&self, slug: &str, limit: Option<u64>) -> Vec<PostWithAuthor> {
        let Some(tag_model) = self.tag_model_by_slug(slug).await else {
            return Vec::new();
        };
        let post_ids: Vec<Uuid> = match tag_model
            .find_related(post::Entity)
            .all(&self.db)
            .await
        {
            Ok(posts) => posts.into_iter().map(|p| p.id).collect(),
            Err(err) => {
                warn!(error = %err, slug, "tagged post lookup failed");
                return Vec::new();
            }
        };
        if post_ids.is_empty() {
            return Vec::new();
        }

        let query = Self::published_with_authors(limit).filter(post::Column::Id.is_in(post_ids));
        self.collect_published(query, "posts_by_tag").await
    }

    async fn posts_by_category(&self, slug: &str, limit: Option<u64>) -> Vec<PostWithAuthor> {
        let Some(category_model) = self.category_model_by_slug(slug).await else {
            return Vec::new();
        };
        let post_ids: Vec<Uuid> = match category_model
            .find_related(post::Entity)
            .all(&self.db)
            .await
        {
            Ok(posts) => posts.into_iter().map(|p| p.id).collect(),
            Err(err) => {
                warn!(error = %err, slug, "categorized post lookup failed");
                return Vec::new();
            }
        };
        if post_ids.is_empty() {
            return Vec::new();
        }

        let query = Self::published_with_authors(limit).filter(post::Column::Id.is_in(post_ids));
        self.collect_published(query, "posts_by_category").await
    }

    async fn posts_by_author(&self, author_id: Uuid, limit: Option<u64>) -> Vec<PostWithAuthor> {
        let query =
            Self::published_with_authors(limit).filter(post::Column::AuthorId.eq(author_id));
        self.collect_published(query, "posts_by_author").await
    }

    async fn author_by_display_name(&self, display_name: &str) -> Option<Profile> {
        match profile::Entity::find()
            .filter(profile::Column::DisplayName.eq(display_name))
            .one(&self.db)
            .await
        {
            Ok(found) => found.map(Profile::from),
            Err(err) => {
                warn!(error = %err, display_name, "author lookup failed");
                None
            }
        }
    }

    async fn tag_by_slug(&self, slug: &str) -> Option<Tag> {
        self.tag_model_by_slug(slug).await.map(Tag::from)
    }

    async fn category_by_slug(&self, slug: &str) -> Option<Category> {
        self.category_model_by_slug(slug).await.map(Category::from)
    }

    async fn all_tags(&self) -> Vec<Tag> {
        match tag::Entity::find()
            .order_by_asc(tag::Column::Name)
            .all(&self.db)
            .await
        {
            Ok(models) => models.into_iter().map(Tag::from).collect(),
            Err(err) => {
                warn!(error = %err, "tag listing failed, returning empty");
                Vec::new()
            }
        }
    }

    async fn all_categories(&self) -> Vec<Category> {
        match category::Entity::find()
            .order_by_asc(category::Column::Name)
            .all(&self.db)
            .await
        {
            Ok(models) => models.into_iter().map(Category::from).collect(),
            Err(err) => {
                warn!(error = %err, "category listing failed, returning empty");
                Vec::new()
            }
        }
    }

    async fn increment_view_count(&self, id: Uuid) {
        // Read-modify-write without a row lock. Concurrent readers can lose
        // increments; view counts are indicative, not billing data.
        let current = match post::Entity::find_by_id(id).one(&self.db).await {
            Ok(Some(model)) => model.view_count.unwrap_or(0),
            Ok(None) => {
                debug!(post_id = %id, "view count skipped, post missing");
                return;
            }
            Err(err) => {
                warn!(error = %err, post_id = %id, "view count read failed");
                return;
            }
        };

        let result = post::Entity::update_many()
            .col_expr(post::Column::ViewCount, Expr::value(current + 1))
            .filter(post::Column::Id.eq(id))
            .exec(&self.db)
            .await;
        if let Err(err) = result {
            warn!(error = %err, post_id = %id, "view count write failed");
        }
    }
}
