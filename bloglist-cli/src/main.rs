use std::fs;
use std::io;
use std::path::Path;
use std::process;

use anyhow::{Context, Result};
use bloglist_client::{
    Blog, BlogClient, BlogClientError, BlogStats, BlogUpdate, NewBlog, User,
};
use clap::{Parser, Subcommand};
use serde::Serialize;

const TOKEN_FILE: &str = ".bloglist_token";
const DEFAULT_SERVER: &str = "http://127.0.0.1:3003";

#[derive(Debug, Parser)]
#[command(name = "bloglist-cli", version, about = "CLI клиент для bloglist-server")]
struct Cli {
    /// Адрес сервера.
    #[arg(long, global = true, env = "BLOGLIST_SERVER", default_value = DEFAULT_SERVER)]
    server: String,

    /// Печатать ответы сервера как JSON.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Регистрация пользователя.
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        password: String,
    },
    /// Вход пользователя, токен сохраняется в .bloglist_token.
    Login {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
    /// Список блогов.
    List,
    /// Получение блога по id.
    Get {
        #[arg(long)]
        id: i64,
    },
    /// Добавление блога (требует токен).
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        author: String,
        #[arg(long)]
        url: Option<String>,
        #[arg(long)]
        likes: Option<i64>,
    },
    /// Частичное обновление блога: меняются только переданные поля.
    Update {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        author: Option<String>,
        #[arg(long)]
        url: Option<String>,
        #[arg(long)]
        likes: Option<i64>,
    },
    /// Лайк блогу.
    Like {
        #[arg(long)]
        id: i64,
    },
    /// Удаление блога (только владелец).
    Delete {
        #[arg(long)]
        id: i64,
    },
    /// Пользователи с их блогами; с --id только один.
    Users {
        #[arg(long)]
        id: Option<i64>,
    },
    /// Сводная статистика по блогам.
    Stats,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    if let Err(err) = run(Cli::parse()).await {
        eprintln!("Ошибка: {err}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut client = BlogClient::new(normalize_server(cli.server)).map_err(map_client_error)?;

    if let Some(token) = load_token().context("не удалось прочитать .bloglist_token")? {
        client.set_token(token);
    }

    let json = cli.json;
    match cli.command {
        Command::Register {
            username,
            name,
            password,
        } => {
            let user = client
                .register(&username, name.as_deref(), &password)
                .await
                .map_err(map_client_error)?;
            output(json, &user, || print_user("Пользователь создан", &user))?;
        }
        Command::Login { username, password } => {
            let login = client
                .login(&username, &password)
                .await
                .map_err(map_client_error)?;
            persist_token(&client).context("не удалось сохранить токен")?;
            output(json, &login, || {
                println!("Вход выполнен: {} ({})", login.username, login.name);
                println!("token: {}", login.token);
            })?;
        }
        Command::List => {
            let blogs = client.list_blogs().await.map_err(map_client_error)?;
            output(json, &blogs, || print_blogs(&blogs))?;
        }
        Command::Get { id } => {
            let blog = client.get_blog(id).await.map_err(map_client_error)?;
            output(json, &blog, || print_blog("Блог", &blog))?;
        }
        Command::Create {
            title,
            author,
            url,
            likes,
        } => {
            let blog = client
                .create_blog(&NewBlog {
                    title,
                    author,
                    url,
                    likes,
                })
                .await
                .map_err(map_client_error)?;
            output(json, &blog, || print_blog("Блог создан", &blog))?;
        }
        Command::Update {
            id,
            title,
            author,
            url,
            likes,
        } => {
            let update = BlogUpdate {
                title,
                author,
                url,
                likes,
            };
            let blog = client
                .update_blog(id, &update)
                .await
                .map_err(map_client_error)?;
            output(json, &blog, || print_blog("Блог обновлён", &blog))?;
        }
        Command::Like { id } => {
            let blog = client.like_blog(id).await.map_err(map_client_error)?;
            output(json, &blog, || {
                println!("Лайк засчитан: {} (likes={})", blog.title, blog.likes)
            })?;
        }
        Command::Delete { id } => {
            client.delete_blog(id).await.map_err(map_client_error)?;
            println!("Блог удалён: id={id}");
        }
        Command::Users { id: Some(id) } => {
            let user = client.get_user(id).await.map_err(map_client_error)?;
            output(json, &user, || print_user("Пользователь", &user))?;
        }
        Command::Users { id: None } => {
            let users = client.list_users().await.map_err(map_client_error)?;
            output(json, &users, || {
                println!("Пользователей: {}", users.len());
                for user in &users {
                    print_user("-", user);
                }
            })?;
        }
        Command::Stats => {
            let stats = client.blog_stats().await.map_err(map_client_error)?;
            output(json, &stats, || print_stats(&stats))?;
        }
    }

    Ok(())
}

fn output<T: Serialize>(json: bool, value: &T, human: impl FnOnce()) -> Result<()> {
    if json {
        let rendered =
            serde_json::to_string_pretty(value).context("не удалось сериализовать ответ")?;
        println!("{rendered}");
    } else {
        human();
    }
    Ok(())
}

fn normalize_server(server: String) -> String {
    if server.starts_with("http://") || server.starts_with("https://") {
        return server;
    }

    format!("http://{server}")
}

fn parse_token_content(raw: &str) -> Option<String> {
    let token = raw.trim().to_string();
    if token.is_empty() {
        return None;
    }
    Some(token)
}

fn load_token() -> io::Result<Option<String>> {
    if !Path::new(TOKEN_FILE).exists() {
        return Ok(None);
    }

    let raw = fs::read_to_string(TOKEN_FILE)?;
    Ok(parse_token_content(&raw))
}

fn persist_token(client: &BlogClient) -> io::Result<()> {
    if let Some(token) = client.get_token() {
        fs::write(TOKEN_FILE, token)?;
    }
    Ok(())
}

fn map_client_error(err: BlogClientError) -> anyhow::Error {
    let message = match err {
        BlogClientError::Unauthorized(_) => {
            "требуется авторизация: выполните `bloglist-cli login ...`".to_string()
        }
        BlogClientError::Forbidden(_) => "нет прав: ресурс принадлежит другому пользователю".to_string(),
        BlogClientError::NotFound => "ресурс не найден".to_string(),
        BlogClientError::Conflict(message) => format!("конфликт: {message}"),
        BlogClientError::InvalidRequest(message) => format!("некорректный запрос: {message}"),
        BlogClientError::Http(err) => format!("ошибка HTTP: {err}"),
    };
    anyhow::anyhow!(message)
}

fn print_blog(title: &str, blog: &Blog) {
    println!("{title}");
    println!("id: {}", blog.id);
    println!("title: {}", blog.title);
    println!("author: {}", blog.author);
    println!("url: {}", blog.url.as_deref().unwrap_or("-"));
    println!("likes: {}", blog.likes);
    println!("added by: {} (id={})", blog.user.username, blog.user.id);
}

fn print_blogs(blogs: &[Blog]) {
    println!("Блогов: {}", blogs.len());

    for blog in blogs {
        println!(
            "- [{}] {} by {} (likes={}, user={})",
            blog.id, blog.title, blog.author, blog.likes, blog.user.username
        );
    }
}

fn print_user(title: &str, user: &User) {
    println!("{title} [{}] {} ({})", user.id, user.username, user.name);
    for blog in &user.blogs {
        println!("    - [{}] {} by {}", blog.id, blog.title, blog.author);
    }
}

fn print_stats(stats: &BlogStats) {
    println!("Блогов: {}, лайков: {}", stats.total_blogs, stats.total_likes);
    match &stats.favorite_blog {
        Some(blog) => println!(
            "Любимый блог: {} by {} (likes={})",
            blog.title, blog.author, blog.likes
        ),
        None => println!("Любимый блог: -"),
    }
    match &stats.most_blogs {
        Some(top) => println!("Больше всего блогов: {} ({})", top.author, top.blogs),
        None => println!("Больше всего блогов: -"),
    }
    match &stats.most_likes {
        Some(top) => println!("Больше всего лайков: {} ({})", top.author, top.likes),
        None => println!("Больше всего лайков: -"),
    }
}
