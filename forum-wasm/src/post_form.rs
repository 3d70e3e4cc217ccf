use chrono::Utc;
use dioxus::html::FileData;
use dioxus::logger::tracing::info;
use dioxus::prelude::*;

use crate::client::{ForumClientHttp, ForumClientTrait};
use crate::draft::{self, Draft, PostType};
use crate::error::ForumClientError;
use crate::publish::{PendingUpload, publish};
use crate::{BASE_URL, Route};

async fn pending_upload(file: &FileData) -> Result<PendingUpload, ForumClientError> {
    let bytes = file
        .read_bytes()
        .await
        .map_err(|e| ForumClientError::FileRead(e.to_string()))?;
    let filename = file.name();
    let content_type = mime_guess::from_path(&filename).first_or_octet_stream();

    Ok(PendingUpload {
        key: draft::storage_key(Utc::now().timestamp_millis(), &filename),
        bytes: bytes.to_vec(),
        content_type: content_type.to_string(),
    })
}

#[component]
pub fn NewPost() -> Element {
    let navigator = use_navigator();

    let mut post_type = use_signal(|| PostType::Question);
    let mut title = use_signal(String::new);
    let mut content = use_signal(String::new);
    let mut tags = use_signal(String::new);
    let mut abstract_text = use_signal(String::new);
    let mut code = use_signal(String::new);
    let mut code_error = use_signal(String::new);
    let mut error_message = use_signal(String::new);
    let mut image = use_signal(|| None::<FileData>);
    let mut img_url = use_signal(String::new);
    let mut uploading = use_signal(|| false);
    let mut submitting = use_signal(|| false);

    let on_code_change = move |evt: FormEvent| {
        let value = evt.value();
        match draft::code_advisory(&value) {
            Some(advisory) => code_error.set(advisory.to_string()),
            None => code_error.set(String::new()),
        }
        code.set(value);
    };

    let on_image_change = move |evt: FormEvent| {
        let mut files = evt.files();
        image.set(files.pop());
        // a newly selected file invalidates any previously resolved URL
        img_url.set(String::new());
    };

    // Attachment-ready path: resolve the upload eagerly, independent of the
    // submit button. Submitting later reuses the resolved URL.
    let on_upload = move |_| {
        let Some(file) = image() else {
            info!("no image selected for upload");
            return;
        };
        if uploading() {
            return;
        }
        uploading.set(true);
        spawn(async move {
            let client = ForumClientHttp::new(BASE_URL);
            let uploaded = match pending_upload(&file).await {
                Ok(pending) => {
                    client
                        .upload_image(&pending.key, pending.bytes, &pending.content_type)
                        .await
                }
                Err(e) => Err(e),
            };
            match uploaded {
                Ok(url) => {
                    img_url.set(url);
                    error_message.set(String::new());
                }
                Err(e) => error_message.set(format!("Image upload failed: {e}")),
            }
            uploading.set(false);
        });
    };

    // Fields-ready path: validate, resolve a still-pending attachment if
    // one is selected, then insert exactly once.
    let on_submit = move |_| {
        // in-flight guard, and never race a still-resolving eager upload
        if submitting() || uploading() {
            return;
        }

        let draft = Draft {
            post_type: post_type(),
            title: title(),
            content: content(),
            tags: tags(),
            abstract_text: abstract_text(),
            img_url: img_url(),
            code: code(),
        };
        if let Err(msg) = draft.validate() {
            error_message.set(msg);
            return;
        }

        submitting.set(true);
        let selected = image();
        spawn(async move {
            let client = ForumClientHttp::new(BASE_URL);

            let pending = match selected {
                Some(file) if img_url().is_empty() => match pending_upload(&file).await {
                    Ok(pending) => Some(pending),
                    Err(e) => {
                        error_message.set(format!("Image upload failed: {e}"));
                        submitting.set(false);
                        return;
                    }
                },
                _ => None,
            };

            match publish(&client, draft, pending).await {
                Ok(post) => {
                    // nothing leaks into the next post
                    post_type.set(PostType::Question);
                    title.set(String::new());
                    content.set(String::new());
                    tags.set(String::new());
                    abstract_text.set(String::new());
                    code.set(String::new());
                    code_error.set(String::new());
                    error_message.set(String::new());
                    image.set(None);
                    img_url.set(String::new());

                    navigator.push(Route::PostDetail { id: post.id });
                }
                Err(ForumClientError::Validation(msg)) => error_message.set(msg),
                Err(e) => error_message.set(format!("Could not publish the post: {e}")),
            }
            submitting.set(false);
        });
    };

    rsx! {
        div { class: "max-w-4xl mx-auto px-6 py-12",
            div { class: "bg-white rounded-2xl shadow-xl p-8 md:p-12",
                h1 { class: "text-4xl font-bold text-gray-900 mb-8 text-center", "New Post" }

                div { class: "space-y-6",
                    div {
                        label { class: "block text-sm font-medium text-gray-700 mb-2", "Select Post Type:" }
                        div { class: "flex gap-6",
                            label { class: "flex items-center gap-2 text-gray-700",
                                input {
                                    r#type: "radio",
                                    name: "post_type",
                                    value: "question",
                                    checked: post_type() == PostType::Question,
                                    onchange: move |_| post_type.set(PostType::Question),
                                }
                                "Question"
                            }
                            label { class: "flex items-center gap-2 text-gray-700",
                                input {
                                    r#type: "radio",
                                    name: "post_type",
                                    value: "article",
                                    checked: post_type() == PostType::Article,
                                    onchange: move |_| post_type.set(PostType::Article),
                                }
                                "Article"
                            }
                        }
                    }

                    div {
                        label { class: "block text-sm font-medium text-gray-700 mb-2", "Title" }
                        input {
                            r#type: "text",
                            placeholder: if post_type() == PostType::Question {
                                "Start your question with how, what, why, etc."
                            } else {
                                "Enter a descriptive title"
                            },
                            value: "{title}",
                            oninput: move |evt| title.set(evt.value()),
                            class: "w-full px-5 py-4 border border-gray-300 rounded-xl shadow-sm focus:outline-none focus:ring-2 focus:ring-indigo-500 transition text-lg text-black"
                        }

                        if post_type() == PostType::Article {
                            div { class: "mt-4",
                                label { class: "block text-sm font-medium text-gray-700 mb-2", "Image" }
                                input {
                                    r#type: "file",
                                    accept: "image/*",
                                    onchange: on_image_change,
                                    class: "block text-sm text-gray-700"
                                }
                                button {
                                    onclick: on_upload,
                                    disabled: uploading(),
                                    class: "mt-2 px-6 py-2 bg-indigo-600 text-white rounded-xl hover:bg-indigo-700 transition disabled:opacity-50 disabled:cursor-not-allowed",
                                    if uploading() { "Uploading..." } else { "Upload Image" }
                                }
                                if !img_url().is_empty() {
                                    p { class: "mt-2 text-sm text-green-600", "Image ready: {img_url}" }
                                }
                            }
                        }
                    }

                    if post_type() == PostType::Question {
                        div {
                            label { class: "block text-sm font-medium text-gray-700 mb-2", "Describe Your Problem" }
                            textarea {
                                value: "{content}",
                                oninput: move |evt| content.set(evt.value()),
                                class: "w-full px-5 py-4 h-48 border border-gray-300 rounded-xl shadow-sm resize-none focus:outline-none focus:ring-2 focus:ring-indigo-500 transition text-base text-black"
                            }
                        }
                        div {
                            label { class: "block text-sm font-medium text-gray-700 mb-2", "Code" }
                            textarea {
                                value: "{code}",
                                oninput: on_code_change,
                                spellcheck: "false",
                                class: "w-full px-5 py-4 h-48 border border-gray-300 rounded-xl shadow-sm resize-none focus:outline-none focus:ring-2 focus:ring-indigo-500 transition font-mono text-sm text-black"
                            }
                            if !code_error().is_empty() {
                                p { class: "mt-2 text-sm text-red-600", "{code_error}" }
                            }
                        }
                        div {
                            label { class: "block text-sm font-medium text-gray-700 mb-2", "Tags" }
                            input {
                                r#type: "text",
                                placeholder: "Please add up to 3 tags to describe what your question is about e.g., Java",
                                value: "{tags}",
                                oninput: move |evt| tags.set(evt.value()),
                                class: "w-full px-5 py-4 border border-gray-300 rounded-xl shadow-sm focus:outline-none focus:ring-2 focus:ring-indigo-500 transition text-base text-black"
                            }
                        }
                    }

                    if post_type() == PostType::Article {
                        div {
                            label { class: "block text-sm font-medium text-gray-700 mb-2", "Abstract" }
                            textarea {
                                placeholder: "Enter a 1-paragraph abstract",
                                value: "{abstract_text}",
                                oninput: move |evt| abstract_text.set(evt.value()),
                                class: "w-full px-5 py-4 h-32 border border-gray-300 rounded-xl shadow-sm resize-none focus:outline-none focus:ring-2 focus:ring-indigo-500 transition text-base text-black"
                            }
                        }
                        div {
                            label { class: "block text-sm font-medium text-gray-700 mb-2", "Article Text" }
                            textarea {
                                placeholder: "Enter the article text",
                                value: "{content}",
                                oninput: move |evt| content.set(evt.value()),
                                class: "w-full px-5 py-4 h-64 border border-gray-300 rounded-xl shadow-sm resize-none focus:outline-none focus:ring-2 focus:ring-indigo-500 transition text-base text-black"
                            }
                        }
                    }

                    if !error_message().is_empty() {
                        p { class: "text-red-600", "{error_message}" }
                    }

                    div { class: "flex justify-end pt-6",
                        button {
                            onclick: on_submit,
                            disabled: submitting() || uploading(),
                            class: "px-10 py-3.5 bg-indigo-600 text-white rounded-xl hover:bg-indigo-700 transition shadow-md font-medium text-lg disabled:opacity-50 disabled:cursor-not-allowed",
                            if submitting() { "Posting..." } else { "Post" }
                        }
                    }
                }
            }
        }
    }
}
