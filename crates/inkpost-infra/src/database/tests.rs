#[cfg(test)]
mod tests {
    use crate::database::entity::{post, profile, tag};
    use crate::database::postgres_blog::PostgresBlogRepository;
    use crate::database::postgres_dashboard::PostgresDashboardRepository;
    use inkpost_core::domain::{NewPost, PostPatch, PostStatus, ProfilePatch};
    use inkpost_core::ports::{BlogRepository, DashboardRepository, SessionUser};
    use inkpost_core::{Outcome, RepoError};
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase, MockExecResult};
    use uuid::Uuid;

    fn sample_profile(id: Uuid, display_name: &str) -> profile::Model {
        profile::Model {
            id,
            display_name: Some(display_name.to_owned()),
            bio: None,
            avatar_url: None,
            created_at: chrono::Utc::now().into(),
        }
    }

    fn sample_post(id: Uuid, author_id: Uuid, status: PostStatus) -> post::Model {
        let now = chrono::Utc::now();
        post::Model {
            id,
            author_id: Some(author_id),
            title: "Hello".to_owned(),
            content: "Body".to_owned(),
            image_url: None,
            status: status.as_str().to_owned(),
            featured: false,
            view_count: Some(0),
            created_at: now.into(),
            updated_at: now.into(),
            published_at: (status == PostStatus::Published).then(|| now.into()),
        }
    }

    #[tokio::test]
    async fn test_list_published_joins_authors() {
        let author_id = Uuid::new_v4();
        let post_model = sample_post(Uuid::new_v4(), author_id, PostStatus::Published);
        let author = sample_profile(author_id, "Ada");

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![(post_model.clone(), author)]])
            .into_connection();

        let repo = PostgresBlogRepository::new(db);
        let posts = repo.list_published(Some(10)).await;

        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].post.id, post_model.id);
        assert_eq!(
            posts[0].author.as_ref().unwrap().display_name.as_deref(),
            Some("Ada")
        );
    }

    #[tokio::test]
    async fn test_list_published_swallows_store_errors() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("connection reset".to_owned())])
            .into_connection();

        let repo = PostgresBlogRepository::new(db);
        let posts = repo.list_published(None).await;

        assert!(posts.is_empty());
    }

    #[tokio::test]
    async fn test_post_by_id_merges_tags_and_categories() {
        let author_id = Uuid::new_v4();
        let post_model = sample_post(Uuid::new_v4(), author_id, PostStatus::Published);
        let tag_model = tag::Model {
            id: Uuid::new_v4(),
            name: "Rust".to_owned(),
            slug: "rust".to_owned(),
            created_at: chrono::Utc::now().into(),
        };

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![(post_model.clone(), sample_profile(author_id, "Ada"))]])
            .append_query_results([vec![tag_model]])
            .append_query_results([Vec::<crate::database::entity::category::Model>::new()])
            .into_connection();

        let repo = PostgresBlogRepository::new(db);
        let details = repo.post_by_id(post_model.id, false).await.unwrap();

        assert_eq!(details.post.id, post_model.id);
        assert_eq!(details.tags.len(), 1);
        assert_eq!(details.tags[0].slug, "rust");
        assert!(details.categories.is_empty());
    }

    #[tokio::test]
    async fn test_post_by_id_degrades_to_none_on_error() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("timeout".to_owned())])
            .into_connection();

        let repo = PostgresBlogRepository::new(db);
        assert!(repo.post_by_id(Uuid::new_v4(), true).await.is_none());
    }

    #[tokio::test]
    async fn test_posts_by_tag_resolves_slug_first() {
        let author_id = Uuid::new_v4();
        let post_model = sample_post(Uuid::new_v4(), author_id, PostStatus::Published);
        let tag_model = tag::Model {
            id: Uuid::new_v4(),
            name: "Rust".to_owned(),
            slug: "rust".to_owned(),
            created_at: chrono::Utc::now().into(),
        };

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![tag_model]])
            .append_query_results([vec![post_model.clone()]])
            .append_query_results([vec![(post_model.clone(), sample_profile(author_id, "Ada"))]])
            .into_connection();

        let repo = PostgresBlogRepository::new(db);
        let posts = repo.posts_by_tag("rust", None).await;

        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].post.id, post_model.id);
    }

    #[tokio::test]
    async fn test_posts_by_tag_unknown_slug_is_empty() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<tag::Model>::new()])
            .into_connection();

        let repo = PostgresBlogRepository::new(db);
        assert!(repo.posts_by_tag("missing", None).await.is_empty());
    }

    #[tokio::test]
    async fn test_increment_view_count_reads_then_writes() {
        let post_model = sample_post(Uuid::new_v4(), Uuid::new_v4(), PostStatus::Published);
        let post_id = post_model.id;

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![post_model]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();

        let repo = PostgresBlogRepository::new(db.clone());
        repo.increment_view_count(post_id).await;

        // One select followed by one update; the two statements are not
        // atomic and concurrent bumps may undercount.
        let log = db.into_transaction_log();
        assert_eq!(log.len(), 2);
    }

    #[tokio::test]
    async fn test_increment_view_count_missing_post_skips_write() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<post::Model>::new()])
            .into_connection();

        let repo = PostgresBlogRepository::new(db.clone());
        repo.increment_view_count(Uuid::new_v4()).await;

        assert_eq!(db.into_transaction_log().len(), 1);
    }

    #[tokio::test]
    async fn test_profile_for_returns_existing_row() {
        let user_id = Uuid::new_v4();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![sample_profile(user_id, "Ada")]])
            .into_connection();

        let repo = PostgresDashboardRepository::new(db);
        let session = SessionUser {
            id: user_id,
            email: Some("ada@example.com".to_owned()),
            display_name: Some("Ada".to_owned()),
        };

        match repo.profile_for(&session).await {
            Outcome::Success(profile) => assert_eq!(profile.id, user_id),
            other => panic!("expected success, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_profile_for_creates_on_first_access() {
        let user_id = Uuid::new_v4();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<profile::Model>::new()])
            .append_query_results([vec![sample_profile(user_id, "ada@example.com")]])
            .into_connection();

        let repo = PostgresDashboardRepository::new(db);
        let session = SessionUser {
            id: user_id,
            email: Some("ada@example.com".to_owned()),
            display_name: None,
        };

        match repo.profile_for(&session).await {
            Outcome::Success(profile) => {
                assert_eq!(profile.id, user_id);
                assert_eq!(profile.display_name.as_deref(), Some("ada@example.com"));
            }
            other => panic!("expected success, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_profile_for_maps_store_error() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("connection reset".to_owned())])
            .into_connection();

        let repo = PostgresDashboardRepository::new(db);
        let session = SessionUser {
            id: Uuid::new_v4(),
            email: None,
            display_name: None,
        };

        assert!(matches!(
            repo.profile_for(&session).await,
            Outcome::Error(_)
        ));
    }

    #[tokio::test]
    async fn test_post_for_editing_missing_or_unowned_is_none() {
        // Both a nonexistent id and someone else's post match zero rows;
        // the caller sees the same None either way.
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<post::Model>::new()])
            .append_query_results([Vec::<post::Model>::new()])
            .into_connection();

        let repo = PostgresDashboardRepository::new(db);
        assert!(
            repo.post_for_editing(Uuid::new_v4(), Uuid::new_v4())
                .await
                .is_none()
        );
        assert!(
            repo.post_for_editing(Uuid::new_v4(), Uuid::new_v4())
                .await
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_post_for_editing_returns_owned_post() {
        let user_id = Uuid::new_v4();
        let owned = sample_post(Uuid::new_v4(), user_id, PostStatus::Draft);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![owned.clone()]])
            .into_connection();

        let repo = PostgresDashboardRepository::new(db);
        let post = repo.post_for_editing(owned.id, user_id).await.unwrap();
        assert_eq!(post.id, owned.id);
    }

    #[tokio::test]
    async fn test_create_post_stamps_published_at() {
        let user_id = Uuid::new_v4();
        let returned = sample_post(Uuid::new_v4(), user_id, PostStatus::Published);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![returned.clone()]])
            .into_connection();

        let repo = PostgresDashboardRepository::new(db);
        let created = repo
            .create_post(
                user_id,
                NewPost {
                    title: "Hello".to_owned(),
                    content: "Body".to_owned(),
                    image_url: None,
                    status: PostStatus::Published,
                    featured: false,
                },
            )
            .await
            .unwrap();

        assert_eq!(created.status, PostStatus::Published);
        assert!(created.published_at.is_some());
        assert_eq!(created.view_count, Some(0));
    }

    #[tokio::test]
    async fn test_update_post_not_owned_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<post::Model>::new()])
            .into_connection();

        let repo = PostgresDashboardRepository::new(db);
        let err = repo
            .update_post(Uuid::new_v4(), Uuid::new_v4(), PostPatch::default())
            .await
            .unwrap_err();

        match err {
            RepoError::NotFound(message) => {
                assert_eq!(message, "Post not found or access denied");
            }
            other => panic!("expected not found, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_update_post_first_publish_reads_before_writing() {
        let user_id = Uuid::new_v4();
        let draft = sample_post(Uuid::new_v4(), user_id, PostStatus::Draft);
        let mut published = draft.clone();
        published.status = "published".to_owned();
        published.published_at = Some(chrono::Utc::now().into());

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![draft.clone()]])
            .append_query_results([vec![published]])
            .into_connection();

        let repo = PostgresDashboardRepository::new(db.clone());
        let patch = PostPatch {
            status: Some(PostStatus::Published),
            ..Default::default()
        };
        let updated = repo.update_post(draft.id, user_id, patch).await.unwrap();

        assert_eq!(updated.status, PostStatus::Published);
        assert!(updated.published_at.is_some());
        // Pre-read plus the returning update.
        assert_eq!(db.into_transaction_log().len(), 2);
    }

    #[tokio::test]
    async fn test_update_post_republish_leaves_published_at_alone() {
        let user_id = Uuid::new_v4();
        let already_published = sample_post(Uuid::new_v4(), user_id, PostStatus::Published);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![already_published.clone()]])
            .append_query_results([vec![already_published.clone()]])
            .into_connection();

        let repo = PostgresDashboardRepository::new(db.clone());
        let patch = PostPatch {
            status: Some(PostStatus::Published),
            ..Default::default()
        };
        repo.update_post(already_published.id, user_id, patch)
            .await
            .unwrap();

        // The update statement must not assign published_at; the column only
        // shows up in the RETURNING list.
        let log = db.into_transaction_log();
        let update_stmt = format!("{:?}", log[1]);
        assert!(!update_stmt.contains("\"published_at\" ="));
    }

    #[tokio::test]
    async fn test_delete_post_missing_row_is_silent() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let repo = PostgresDashboardRepository::new(db);
        assert!(repo.delete_post(Uuid::new_v4(), Uuid::new_v4()).await.is_ok());
    }

    #[tokio::test]
    async fn test_update_profile_missing_row_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<profile::Model>::new()])
            .into_connection();

        let repo = PostgresDashboardRepository::new(db);
        let err = repo
            .update_profile(
                Uuid::new_v4(),
                ProfilePatch {
                    display_name: Some("Ada".to_owned()),
                    bio: None,
                    avatar_url: None,
                },
            )
            .await
            .unwrap_err();

        match err {
            RepoError::NotFound(message) => assert_eq!(message, "Profile not found"),
            other => panic!("expected not found, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_update_profile_empty_patch_returns_current_row() {
        let user_id = Uuid::new_v4();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![sample_profile(user_id, "Ada")]])
            .into_connection();

        let repo = PostgresDashboardRepository::new(db.clone());
        let profile = repo
            .update_profile(user_id, ProfilePatch::default())
            .await
            .unwrap();

        assert_eq!(profile.id, user_id);
        // A single select, no update issued.
        let log = db.into_transaction_log();
        assert_eq!(log.len(), 1);
        assert!(!format!("{:?}", log[0]).contains("UPDATE"));
    }

    #[tokio::test]
    async fn test_analytics_for_tallies_in_memory() {
        let user_id = Uuid::new_v4();
        let mut published = sample_post(Uuid::new_v4(), user_id, PostStatus::Published);
        published.view_count = Some(7);
        let mut draft = sample_post(Uuid::new_v4(), user_id, PostStatus::Draft);
        draft.view_count = None;

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![published, draft]])
            .into_connection();

        let repo = PostgresDashboardRepository::new(db);
        let analytics = repo.analytics_for(user_id).await.unwrap();

        assert_eq!(analytics.total_posts, 2);
        assert_eq!(analytics.published_posts, 1);
        assert_eq!(analytics.draft_posts, 1);
        assert_eq!(analytics.total_views, 7);
    }

    #[tokio::test]
    async fn test_analytics_for_is_none_on_error() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("timeout".to_owned())])
            .into_connection();

        let repo = PostgresDashboardRepository::new(db);
        assert!(repo.analytics_for(Uuid::new_v4()).await.is_none());
    }
}
