use crate::app::{AppContext, QuireError, Result};
use crate::browser::descend;
use crate::domain::{AdminConfig, FeedDocument};
use crate::repl::render::render_entries;

pub async fn show_feed(ctx: &AppContext, url: Option<&str>) -> Result<()> {
    let uid = ctx.uid();
    let loaded = descend::load_and_resolve(ctx.fetcher.as_ref(), url, 0, uid.as_deref()).await;

    match loaded {
        Ok((doc, depth)) => {
            if depth > 0 {
                tracing::debug!("Auto-descended {} level(s)", depth);
            }
            print!("{}", format_document(&doc));
        }
        Err(QuireError::EmptyResult) => println!("Catalog is empty"),
        Err(QuireError::AccessDenied) => {
            println!("This catalog is restricted for your account");
        }
        Err(e) => return Err(e),
    }
    Ok(())
}

pub async fn search(ctx: &AppContext, query: &str) -> Result<()> {
    match ctx.fetcher.search(query.trim()).await {
        Ok(doc) => print!("{}", format_document(&doc)),
        Err(QuireError::EmptyResult) => println!("No results for \"{}\"", query.trim()),
        Err(e) => return Err(e),
    }
    Ok(())
}

pub async fn show_admin(ctx: &AppContext) -> Result<()> {
    let uid = ctx.uid();
    let config = ctx.fetcher.fetch_admin_config(uid.as_deref()).await?;
    print!("{}", format_admin(&config));
    Ok(())
}

fn format_document(doc: &FeedDocument) -> String {
    let mut out = format!("{}\n", doc.title.as_deref().unwrap_or("(untitled catalog)"));
    out.push_str(&render_entries(&doc.entries));
    out.push_str(&format!("{} entries\n", doc.entries.len()));
    if let Some(prev) = doc.prev_page_url() {
        out.push_str(&format!("Previous page: {}\n", prev));
    }
    if let Some(next) = doc.next_page_url() {
        out.push_str(&format!("Next page: {}\n", next));
    }
    out
}

fn format_admin(config: &AdminConfig) -> String {
    if !config.is_admin {
        return "Not an admin\n".to_string();
    }
    let mut out = String::from("Admin: yes\n");
    if let Some(root) = &config.admin_root_url {
        out.push_str(&format!("Admin root: {}\n", root));
    }
    out.push_str("Destinations:\n");
    for destination in &config.destinations {
        out.push_str(&format!("  {} ({})\n", destination.name, destination.id));
    }
    out
}
