use chrono::{SecondsFormat, Utc};
use tracing::info;
use uuid::Uuid;

use crate::commands::{Command, Commands, HandlerFuture};
use crate::config::Config;
use crate::db::Database;
use crate::error::CommandError;
use crate::fetcher::Fetcher;

/// Feed printed by `agg` unless the config names another.
pub const AGG_FEED_URL: &str = "https://www.wagslane.dev/index.xml";

pub struct State {
    pub db: Database,
    pub config: Config,
    pub fetcher: Fetcher,
}

/// Every command the CLI understands.
pub fn default_commands() -> Commands<State> {
    let mut commands = Commands::new();
    commands.register("login", login);
    commands.register("register", register);
    commands.register("reset", reset);
    commands.register("users", users);
    commands.register("addfeed", add_feed);
    commands.register("feeds", feeds);
    commands.register("agg", agg);
    commands
}

fn single_arg(cmd: &Command, usage: &'static str) -> Result<String, CommandError> {
    match cmd.args() {
        [arg] => Ok(arg.clone()),
        _ => Err(CommandError::Usage(usage)),
    }
}

pub fn login(state: &mut State, cmd: Command) -> HandlerFuture<'_> {
    Box::pin(async move {
        let username = single_arg(&cmd, "login <username>")?;

        state
            .db
            .get_user(&username)
            .await
            .map_err(|e| CommandError::store("couldn't look up user", e))?
            .ok_or_else(|| CommandError::NotFound(username.clone()))?;

        state
            .config
            .set_current_user(&username)
            .map_err(|e| CommandError::store("couldn't set current user", e))?;

        info!(user = %username, "logged in");
        println!("User has been set to: {}", username);
        Ok(())
    })
}

pub fn register(state: &mut State, cmd: Command) -> HandlerFuture<'_> {
    Box::pin(async move {
        let username = single_arg(&cmd, "register <username>")?;

        let existing = state
            .db
            .get_user(&username)
            .await
            .map_err(|e| CommandError::store("couldn't look up user", e))?;
        if existing.is_some() {
            return Err(CommandError::Conflict(username));
        }

        let now = Utc::now();
        let user = state
            .db
            .create_user(Uuid::new_v4(), now, now, &username)
            .await
            .map_err(|e| CommandError::store("couldn't create user", e))?;

        state
            .config
            .set_current_user(&username)
            .map_err(|e| CommandError::store("couldn't set current user", e))?;

        info!(user = %user.name, "registered");
        println!("User '{}' created successfully!", user.name);
        println!(
            "User data: ID={}, Name={}, CreatedAt={}",
            user.id,
            user.name,
            user.created_at.to_rfc3339_opts(SecondsFormat::Secs, true)
        );
        Ok(())
    })
}

pub fn reset(state: &mut State, _cmd: Command) -> HandlerFuture<'_> {
    Box::pin(async move {
        let deleted = state
            .db
            .delete_all_users()
            .await
            .map_err(|e| CommandError::store("couldn't reset database", e))?;

        info!("Deleted {} users", deleted);
        println!("Database has been reset successfully!");
        Ok(())
    })
}

pub fn users(state: &mut State, _cmd: Command) -> HandlerFuture<'_> {
    Box::pin(async move {
        let users = state
            .db
            .get_users()
            .await
            .map_err(|e| CommandError::store("couldn't get users", e))?;

        let current = state.config.current_user_name.as_deref();
        for user in users {
            if Some(user.name.as_str()) == current {
                println!("* {} (current)", user.name);
            } else {
                println!("* {}", user.name);
            }
        }
        Ok(())
    })
}

pub fn add_feed(state: &mut State, cmd: Command) -> HandlerFuture<'_> {
    Box::pin(async move {
        let (name, url) = match cmd.args() {
            [name, url] => (name.as_str(), url.as_str()),
            _ => return Err(CommandError::Usage("addfeed <name> <url>")),
        };

        let current = state
            .config
            .current_user_name
            .as_deref()
            .filter(|n| !n.is_empty())
            .ok_or(CommandError::NoCurrentUser)?;

        let user = state
            .db
            .get_user(current)
            .await
            .and_then(|u| u.ok_or(sqlx::Error::RowNotFound))
            .map_err(|e| CommandError::store("couldn't get current user", e))?;

        let now = Utc::now();
        let feed = state
            .db
            .create_feed(Uuid::new_v4(), now, now, name, url, user.id)
            .await
            .map_err(|e| CommandError::store("couldn't create feed", e))?;

        info!(feed = %feed.name, user = %user.name, "added feed");
        println!("Feed created successfully!");
        println!("ID: {}", feed.id);
        println!("Name: {}", feed.name);
        println!("URL: {}", feed.url);
        println!("User ID: {}", feed.user_id);
        println!(
            "Created At: {}",
            feed.created_at.to_rfc3339_opts(SecondsFormat::Secs, true)
        );
        Ok(())
    })
}

pub fn feeds(state: &mut State, _cmd: Command) -> HandlerFuture<'_> {
    Box::pin(async move {
        let feeds = state
            .db
            .get_feeds()
            .await
            .map_err(|e| CommandError::store("couldn't get feeds", e))?;

        if feeds.is_empty() {
            println!("No feeds found.");
            return Ok(());
        }

        println!("Found {} feed(s):\n", feeds.len());
        for (i, feed) in feeds.iter().enumerate() {
            println!("Feed {}:", i + 1);
            println!("  Name: {}", feed.name);
            println!("  URL: {}", feed.url);
            println!("  User: {}", feed.user_name);
            println!();
        }
        Ok(())
    })
}

pub fn agg(state: &mut State, _cmd: Command) -> HandlerFuture<'_> {
    Box::pin(async move {
        let url = state.config.agg_feed_url.as_deref().unwrap_or(AGG_FEED_URL);
        let feed = state.fetcher.fetch(url).await?;

        println!("Feed Title: {}", feed.channel_title);
        println!("Feed Link: {}", feed.channel_link);
        println!("Feed Description: {}", feed.channel_description);
        println!("\nItems:");

        for (i, item) in feed.items.iter().enumerate() {
            println!("\nItem {}:", i + 1);
            println!("  Title: {}", item.title);
            println!("  Link: {}", item.link);
            println!("  Description: {}", item.description);
            println!("  PubDate: {}", item.pub_date);
        }
        Ok(())
    })
}
