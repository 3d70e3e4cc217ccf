use std::path::{Path, PathBuf};

use clap::Parser;
use forum_client::{ForumClient, ForumClientHttp, NewPost, PostType, storage_key};
use uuid::Uuid;

#[derive(Parser, Debug)]
struct Cli {
    #[clap(short, long)]
    server: Option<String>,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Parser, Debug)]
enum Command {
    /// Submit a question post.
    Ask {
        #[clap(long)]
        title: String,
        #[clap(long)]
        content: String,
        #[clap(long)]
        tags: String,
    },
    /// Submit an article post, optionally attaching an image.
    Publish {
        #[clap(long)]
        title: String,
        #[clap(long = "abstract")]
        abstract_text: String,
        #[clap(long)]
        content: String,
        #[clap(long)]
        image: Option<PathBuf>,
    },
    ListPosts {
        #[clap(long)]
        limit: Option<u32>,
        #[clap(long)]
        offset: Option<u32>,
    },
    GetPost {
        id: Uuid,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Cli::parse();

    let endpoint = args.server.as_deref().unwrap_or("http://127.0.0.1:8080");
    let client = ForumClientHttp::connect(endpoint)?;

    match args.command {
        Command::Ask {
            title,
            content,
            tags,
        } => {
            let post = client
                .create_post(NewPost {
                    post_type: PostType::Question,
                    title,
                    content,
                    tags,
                    ..NewPost::default()
                })
                .await?;
            println!("Question posted! ID: {}", post.id);
        }
        Command::Publish {
            title,
            abstract_text,
            content,
            image,
        } => {
            // The attachment must resolve before the document insert.
            let img_url = match image {
                Some(path) => upload_attachment(&client, &path).await?,
                None => String::new(),
            };

            let post = client
                .create_post(NewPost {
                    post_type: PostType::Article,
                    title,
                    content,
                    abstract_text,
                    img_url,
                    ..NewPost::default()
                })
                .await?;
            println!("Article posted! ID: {}", post.id);
        }
        Command::ListPosts { limit, offset } => {
            let posts = client.list_posts(limit, offset).await?;
            println!("Posts ({})", posts.len());
            for post in posts {
                println!("- [{}] {} ({})", post.id, post.title, post.post_type);
            }
        }
        Command::GetPost { id } => {
            let post = client.get_post_by_id(id).await?;
            println!("{}", post);
            println!("{}", post.content);
        }
    }

    Ok(())
}

async fn upload_attachment(
    client: &ForumClientHttp,
    path: &Path,
) -> Result<String, Box<dyn std::error::Error>> {
    let filename = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or("image path has no filename")?;
    let bytes = std::fs::read(path)?;
    let content_type = mime_guess::from_path(path).first_or_octet_stream();

    let key = storage_key(filename);
    let url = client
        .upload_image(&key, bytes, content_type.as_ref())
        .await?;
    println!("Image uploaded: {}", url);
    Ok(url)
}
