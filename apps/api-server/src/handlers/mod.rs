//! HTTP handlers and route configuration.

mod blog;
mod dashboard;
mod health;
mod posts;
mod profile;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            .service(
                web::scope("/blog")
                    .route("/posts", web::get().to(blog::list_posts))
                    .route("/posts/featured", web::get().to(blog::featured_posts))
                    .route("/posts/recent", web::get().to(blog::recent_posts))
                    .route("/posts/{id}", web::get().to(blog::get_post))
                    .route("/tags", web::get().to(blog::list_tags))
                    .route("/tags/{slug}", web::get().to(blog::get_tag))
                    .route("/tags/{slug}/posts", web::get().to(blog::posts_by_tag))
                    .route("/categories", web::get().to(blog::list_categories))
                    .route("/categories/{slug}", web::get().to(blog::get_category))
                    .route(
                        "/categories/{slug}/posts",
                        web::get().to(blog::posts_by_category),
                    )
                    .route("/authors/{display_name}", web::get().to(blog::get_author))
                    .route(
                        "/authors/{display_name}/posts",
                        web::get().to(blog::posts_by_author),
                    ),
            )
            // Session-scoped routes
            .service(
                web::scope("/posts")
                    .route("", web::get().to(posts::list_my_posts))
                    .route("", web::post().to(posts::create_post))
                    .route("/{id}", web::get().to(posts::get_post))
                    .route("/{id}", web::put().to(posts::update_post))
                    .route("/{id}", web::delete().to(posts::delete_post)),
            )
            .service(
                web::scope("/profile")
                    .route("", web::get().to(profile::get_profile))
                    .route("", web::put().to(profile::update_profile)),
            )
            .route(
                "/dashboard/analytics",
                web::get().to(dashboard::analytics),
            ),
    );
}
