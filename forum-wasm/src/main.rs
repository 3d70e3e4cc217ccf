use chrono::{DateTime, Utc};
use derive_more::Display;
use dioxus::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::client::{ForumClientHttp, ForumClientTrait};
use crate::draft::PostType;
use crate::post_form::NewPost;

mod client;
mod draft;
mod error;
mod post_form;
mod publish;

const BASE_URL: &str = "http://127.0.0.1:8080";

#[derive(Debug, Clone, Serialize, Deserialize, Display)]
#[display("Post {{ id: {}, title: {} }}", id, title)]
pub struct Post {
    pub id: Uuid,
    pub post_type: PostType,
    pub title: String,
    pub content: String,
    pub tags: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub img_url: String,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Routable, Debug, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(Navbar)]
        #[route("/")]
        Home {},
        #[route("/posts")]
        Posts {},
        #[route("/posts/:id")]
        PostDetail { id: Uuid },
        #[route("/new")]
        NewPost {},
}

const MAIN_CSS: Asset = asset!("/assets/main.css");
const TAILWIND_CSS: Asset = asset!("/assets/tailwind.css");

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        document::Link { rel: "stylesheet", href: TAILWIND_CSS }
        Router::<Route> {}
    }
}

#[component]
fn Home() -> Element {
    rsx! {
        div { class: "max-w-3xl mx-auto px-6 py-20 text-center",
            h1 { class: "text-5xl font-bold text-white-900 mb-6", "DevForum" }
            p { class: "text-xl text-gray-500 mb-10",
                "Ask a question or share an article with the community."
            }
            div { class: "flex justify-center gap-4",
                Link {
                    to: Route::NewPost {},
                    class: "px-8 py-3.5 bg-indigo-600 text-white rounded-xl hover:bg-indigo-700 transition shadow-md font-medium",
                    "New Post"
                }
                Link {
                    to: Route::Posts {},
                    class: "px-8 py-3.5 border border-indigo-600 text-indigo-600 rounded-xl hover:bg-indigo-50 transition font-medium",
                    "Browse Posts"
                }
            }
        }
    }
}

#[component]
fn Posts() -> Element {
    let posts = use_resource(move || async move {
        let client = ForumClientHttp::new(BASE_URL);
        client.list_posts(None, None).await
    });

    rsx! {
        div { class: "max-w-6xl mx-auto px-6 py-12",
            h1 { class: "text-4xl font-bold text-white-900 mb-10 text-center", "All Posts" }

            match posts.read().as_ref() {
                Some(Ok(posts)) if !posts.is_empty() => rsx! {
                    div { class: "grid gap-8 md:grid-cols-2 lg:grid-cols-3",
                        for post in posts {
                            article { class: "bg-white rounded-2xl shadow-lg hover:shadow-2xl transition overflow-hidden",
                                Link { to: Route::PostDetail { id: post.id },
                                    div { class: "p-8",
                                        span { class: "text-xs uppercase tracking-wide text-indigo-600 font-semibold",
                                            "{post.post_type.label()}"
                                        }
                                        h2 { class: "text-2xl font-bold text-gray-900 mb-3 line-clamp-2", "{post.title}" }
                                        p { class: "text-gray-600 line-clamp-3", "{post.content.chars().take(150).collect::<String>()}..." }
                                        div { class: "mt-6 text-sm text-indigo-600 font-medium", "Read more →" }
                                    }
                                }
                            }
                        }
                    }
                },
                Some(Ok(_)) => rsx! { p { class: "text-center text-gray-500 text-xl", "No posts yet." } },
                Some(Err(e)) => rsx! { div { class: "text-center text-red-600", "Error: {e}" } },
                None => rsx! { div { class: "text-center text-gray-500", "Loading posts..." } },
            }
        }
    }
}

#[component]
fn PostDetail(id: Uuid) -> Element {
    let post = use_resource(move || async move {
        let client = ForumClientHttp::new(BASE_URL);
        client.get_post_by_id(id).await
    });

    rsx! {
        article { class: "max-w-4xl mx-auto px-6 py-12",
            match post.read().as_ref() {
                Some(Ok(post)) => rsx! {
                    div { class: "bg-white rounded-2xl shadow-xl p-10 md:p-14",
                        h1 { class: "text-4xl md:text-5xl font-bold text-gray-900 mb-4", "{post.title}" }

                        if !post.img_url.is_empty() {
                            img {
                                src: "{post.img_url}",
                                alt: "{post.title}",
                                class: "rounded-xl mb-8 max-h-96 object-cover w-full"
                            }
                        }

                        if !post.abstract_text.is_empty() {
                            p { class: "text-gray-500 text-lg italic mb-8", "{post.abstract_text}" }
                        }

                        p { class: "text-gray-700 text-lg leading-relaxed whitespace-pre-wrap", "{post.content}" }

                        if !post.tags.is_empty() {
                            div { class: "mt-8 flex flex-wrap gap-2",
                                for tag in post.tags.split(',').map(str::trim).filter(|t| !t.is_empty()) {
                                    span { class: "px-3 py-1 bg-indigo-50 text-indigo-700 rounded-full text-sm", "{tag}" }
                                }
                            }
                        }
                    }
                },
                Some(Err(e)) => rsx! { p { class: "text-center text-red-600 text-xl", "Error: {e}" } },
                None => rsx! { p { class: "text-center text-gray-500 text-xl", "Loading..." } },
            }
        }
    }
}

#[component]
fn Navbar() -> Element {
    rsx! {
        nav { class: "bg-white/80 backdrop-blur-md border-b border-gray-200 sticky top-0 z-50 shadow-sm",
            div { class: "max-w-7xl mx-auto px-6 py-4 flex justify-between items-center",
                div { class: "flex items-center space-x-8",
                    Link { to: Route::Home {}, class: "text-2xl font-bold text-indigo-600 hover:text-indigo-700 transition", "DevForum" }
                    div { class: "hidden md:flex space-x-6",
                        Link { to: Route::Posts {}, class: "text-gray-700 hover:text-indigo-600 font-medium transition", "Posts" }
                        Link { to: Route::NewPost {}, class: "text-gray-700 hover:text-indigo-600 font-medium transition", "New Post" }
                    }
                }
            }
        }
        Outlet::<Route> {}
    }
}
