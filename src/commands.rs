//! CLI Command Handlers
//!
//! Implements all CLI commands on top of the catalog core.
//! Each handler takes CLI args and Output, returns ExitCode.

use std::sync::Arc;

use crate::api::CatalogClient;
use crate::auth::{LoginError, LoginService};
use crate::catalog::{search, CatalogFeed, DetailResolver, FavoritesStore};
use crate::cli::{ExitCode, InfoCmd, LoginCmd, Output, PopularCmd, ProfileCmd};
use crate::config::Config;
use crate::models::{image_url, CatalogType, DetailRecord};

// =============================================================================
// Popular Command
// =============================================================================

pub async fn popular_cmd(
    cmd: PopularCmd,
    client: Arc<dyn CatalogClient>,
    output: &Output,
) -> ExitCode {
    let kind = CatalogType::from(cmd.catalog);
    let mut feed = CatalogFeed::catalog(client, kind);

    output.info(format!("Loading {} page(s) of popular {}...", cmd.pages, kind.plural()));

    for _ in 0..cmd.pages {
        if let Err(e) = feed.load_next().await {
            return output.error(
                format!("Failed to load page {}: {}", feed.page(), e),
                ExitCode::from(&e),
            );
        }
    }

    let query = cmd.search.as_deref().unwrap_or_default();
    let mut results = search::apply(feed.items(), query).into_owned();
    if let Some(limit) = cmd.limit {
        results.truncate(limit);
    }

    let lines: Vec<String> = results
        .iter()
        .map(|item| format!("{:>8}  {}  ★ {:.1}", item.id, item, item.vote_average))
        .collect();

    match output.print_lines(&results, &lines) {
        Ok(()) => ExitCode::Success,
        Err(e) => output.error(format!("Failed to serialize: {}", e), ExitCode::Error),
    }
}

// =============================================================================
// Info Command
// =============================================================================

pub async fn info_cmd(
    cmd: InfoCmd,
    client: Arc<dyn CatalogClient>,
    config: &Config,
    output: &Output,
) -> ExitCode {
    let kind = CatalogType::from(cmd.kind);
    let resolver = DetailResolver::new(client, FavoritesStore::new());

    output.info(format!("Getting info for {} {}", kind, cmd.id));

    match resolver.resolve(kind, cmd.parsed_id()).await {
        Ok(record) => {
            let lines = detail_lines(&record, config.image_base_url());
            match output.print_lines(&record, &lines) {
                Ok(()) => ExitCode::Success,
                Err(e) => output.error(format!("Failed to serialize: {}", e), ExitCode::Error),
            }
        }
        Err(e) => output.error(format!("{} info failed: {}", kind, e), ExitCode::from(&e)),
    }
}

/// Text rendering of a detail record
fn detail_lines(record: &DetailRecord, image_base: &str) -> Vec<String> {
    let mut lines = vec![
        record.to_string(),
        format!("Genre: {}", record.genre_line()),
    ];

    if record.overview.is_empty() {
        lines.push("No overview available.".to_string());
    } else {
        lines.push(record.overview.clone());
    }

    if let Some(path) = record.item.poster_path.as_deref() {
        lines.push(format!("Poster: {}", image_url(image_base, path)));
    }

    if record.cast.is_empty() {
        lines.push("No actors information available.".to_string());
    } else {
        lines.push("Actors:".to_string());
        for actor in &record.cast {
            match actor.profile_path.as_deref() {
                Some(path) => lines.push(format!("  {} ({})", actor.name, image_url(image_base, path))),
                None => lines.push(format!("  {}", actor.name)),
            }
        }
    }

    lines
}

// =============================================================================
// Login Command
// =============================================================================

pub async fn login_cmd(cmd: LoginCmd, service: &LoginService, output: &Output) -> ExitCode {
    match service.login(&cmd.email, &cmd.password).await {
        Ok(success) => {
            let lines = vec![format!("Welcome, {}!", success.first_name)];
            match output.print_lines(&success, &lines) {
                Ok(()) => ExitCode::Success,
                Err(e) => output.error(format!("Failed to serialize: {}", e), ExitCode::Error),
            }
        }
        Err(LoginError::InvalidCredentials) => {
            output.error("Wrong email or password", ExitCode::LoginFailed)
        }
        Err(e) => output.error(format!("Login failed: {}", e), ExitCode::NetworkError),
    }
}

// =============================================================================
// Profile Command
// =============================================================================

pub fn profile_cmd(_cmd: ProfileCmd, config: &Config, output: &Output) -> ExitCode {
    let profile = &config.profile;
    let mut lines = vec![profile.name.clone(), profile.email.clone()];
    if let Some(photo) = &profile.photo_url {
        lines.push(photo.clone());
    }

    match output.print_lines(profile, &lines) {
        Ok(()) => ExitCode::Success,
        Err(e) => output.error(format!("Failed to serialize: {}", e), ExitCode::Error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CastMember, CatalogItem};

    #[test]
    fn test_detail_lines_placeholders() {
        let record = DetailRecord::from(CatalogItem {
            id: 1,
            kind: CatalogType::Tv,
            title: "Quiet Show".to_string(),
            year: None,
            poster_path: None,
            backdrop_path: None,
            vote_average: 0.0,
        });
        let lines = detail_lines(&record, "http://img");
        assert!(lines.contains(&"No overview available.".to_string()));
        assert!(lines.contains(&"No actors information available.".to_string()));
        assert!(lines.contains(&"Genre: N/A".to_string()));
    }

    #[test]
    fn test_detail_lines_cast_images() {
        let mut record = DetailRecord::from(CatalogItem {
            id: 2,
            kind: CatalogType::Movie,
            title: "Cast Movie".to_string(),
            year: Some(2020),
            poster_path: Some("/p.jpg".to_string()),
            backdrop_path: None,
            vote_average: 7.0,
        });
        record.cast = vec![
            CastMember {
                name: "Lead".to_string(),
                profile_path: Some("/lead.jpg".to_string()),
            },
            CastMember {
                name: "Extra".to_string(),
                profile_path: None,
            },
        ];
        let lines = detail_lines(&record, "http://img");
        assert!(lines.contains(&"Poster: http://img/p.jpg".to_string()));
        assert!(lines.contains(&"  Lead (http://img/lead.jpg)".to_string()));
        assert!(lines.contains(&"  Extra".to_string()));
    }
}
