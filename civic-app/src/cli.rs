//! Command-line surface

use crate::admin::{AdminPanel, bulk_status_notice};
use crate::core::{AppConfig, AppError, AppResult};
use crate::dashboard::{Dashboard, Navigation};
use crate::detail::IssueDetail;
use crate::location::{DEFAULT_ADDRESS, detect_location};
use crate::map::{CategoryFilter, MapView, Position, maps_url};
use crate::report::{ReportDraft, ReportService};
use crate::store::LocalStore;
use clap::{Parser, Subcommand, ValueEnum};
use civic_client::{AnalyticsApi, AnalyticsScope, IssueApi, IssueClient};
use shared::models::{IssueCategory, IssueRecord, IssueStatus, Metric};
use shared::DisplayIssue;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "civic")]
#[command(about = "Report and track civic issues", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Issue service base URL (overrides API_BASE_URL)
    #[arg(long, global = true)]
    pub api_base_url: Option<String>,

    /// Directory holding the local cache (overrides WORK_DIR)
    #[arg(long, global = true)]
    pub work_dir: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the merged issue list (server issues, then issues saved on this device)
    Issues {
        /// Print the list as JSON
        #[arg(long)]
        json: bool,
    },
    /// List server issues matching one filter
    List {
        #[arg(long)]
        status: Option<IssueStatus>,
        #[arg(long)]
        category: Option<IssueCategory>,
        #[arg(long)]
        city: Option<i64>,
        #[arg(long)]
        locality: Option<i64>,
    },
    /// Show one server issue
    Show {
        id: i64,
        /// Print the share text instead
        #[arg(long)]
        share: bool,
    },
    /// Change the status of an issue
    Status { id: i64, status: IssueStatus },
    /// Reassign an issue to another city/locality
    Move {
        id: i64,
        #[arg(long)]
        city: i64,
        #[arg(long)]
        locality: i64,
    },
    /// Delete an issue
    Delete { id: i64 },
    /// Report a new issue
    Report {
        #[arg(long)]
        category: IssueCategory,
        #[arg(long)]
        description: String,
        /// Photo reference (file path or URI)
        #[arg(long)]
        photo: Option<String>,
        /// Address; detected from the coordinates when omitted
        #[arg(long)]
        location: Option<String>,
        #[arg(long, allow_hyphen_values = true)]
        lat: String,
        #[arg(long, allow_hyphen_values = true)]
        lon: String,
        /// Keep the issue on this device only
        #[arg(long)]
        offline: bool,
    },
    /// Resolve typed coordinates to an address
    Locate {
        #[arg(allow_hyphen_values = true)]
        lat: String,
        #[arg(allow_hyphen_values = true)]
        lon: String,
    },
    /// Issues around a position
    Map {
        #[arg(long, allow_hyphen_values = true, requires = "lon")]
        lat: Option<f64>,
        #[arg(long, allow_hyphen_values = true, requires = "lat")]
        lon: Option<f64>,
        #[arg(long)]
        category: Option<IssueCategory>,
    },
    /// Statistics, derived rates and the city leaderboard
    Admin {
        #[arg(long, default_value = "TOTAL")]
        metric: Metric,
    },
    /// Describe a bulk status change (not supported by the service)
    Bulk { from: IssueStatus, to: IssueStatus },
    /// Leaderboard for cities, localities or departments
    Leaderboard {
        #[arg(value_enum)]
        scope: Scope,
        #[arg(long, default_value = "TOTAL")]
        metric: Metric,
        #[arg(long, default_value_t = 10)]
        limit: u32,
    },
    /// Analytics summary of one city, locality or department
    Summary {
        #[arg(value_enum)]
        scope: Scope,
        id: i64,
    },
    /// Daily new-issue counts of a city
    Trend { city: i64 },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Scope {
    Cities,
    Localities,
    Departments,
}

impl From<Scope> for AnalyticsScope {
    fn from(scope: Scope) -> Self {
        match scope {
            Scope::Cities => AnalyticsScope::Cities,
            Scope::Localities => AnalyticsScope::Localities,
            Scope::Departments => AnalyticsScope::Departments,
        }
    }
}

/// Resources shared by every command
pub struct Context {
    pub config: AppConfig,
    pub api: Arc<IssueClient>,
    pub store: LocalStore,
}

impl Context {
    pub fn new(config: AppConfig) -> AppResult<Self> {
        let api = Arc::new(config.client_config().build_client()?);
        let store = LocalStore::open(config.cache_path())?;
        Ok(Self { config, api, store })
    }
}

pub async fn run(ctx: &Context, command: Commands) -> AppResult<()> {
    match command {
        Commands::Issues { json } => issues(ctx, json).await,
        Commands::List {
            status,
            category,
            city,
            locality,
        } => {
            let api = &ctx.api;
            let issues = match (status, category, city, locality) {
                (Some(status), None, None, None) => api.list_by_status(status).await?,
                (None, Some(category), None, None) => api.list_by_category(category).await?,
                (None, None, Some(city), None) => api.list_by_city(city).await?,
                (None, None, None, Some(locality)) => api.list_by_locality(locality).await?,
                (None, None, None, None) => api.list_issues().await?,
                _ => {
                    return Err(AppError::InvalidArgument(
                        "use at most one of --status, --category, --city, --locality".into(),
                    ));
                }
            };
            print_records(&issues);
            Ok(())
        }
        Commands::Show { id, share } => {
            let detail = IssueDetail::load(ctx.api.clone(), id).await?;
            if share {
                println!("{}", detail.share_message());
            } else {
                print_record_detail(detail.issue());
            }
            Ok(())
        }
        Commands::Status { id, status } => {
            let mut detail = IssueDetail::load(ctx.api.clone(), id).await?;
            let issue = detail.update_status(status).await?;
            println!("Issue status updated successfully: #{} is now {}", issue.id, issue.status.label());
            Ok(())
        }
        Commands::Move { id, city, locality } => {
            let issue = ctx.api.update_location(id, city, locality).await?;
            print_record_detail(&issue);
            Ok(())
        }
        Commands::Delete { id } => {
            ctx.api.delete_issue(id).await?;
            println!("Issue #{} deleted", id);
            Ok(())
        }
        Commands::Report {
            category,
            description,
            photo,
            location,
            lat,
            lon,
            offline,
        } => {
            let service = ReportService::new(
                ctx.api.clone(),
                ctx.store.clone(),
                ctx.config.default_city_id,
                ctx.config.default_locality_id,
            );
            if let Some(photo) = &photo {
                service.attach_photo(photo);
            }
            let location = match location {
                Some(location) => location,
                None => detect_location(&lat, &lon)
                    .map(|detected| detected.address)
                    .unwrap_or_else(|_| DEFAULT_ADDRESS.to_string()),
            };
            let draft = ReportDraft {
                category,
                description,
                photo,
                location,
                latitude: lat,
                longitude: lon,
            };

            if offline {
                let record = service.save_offline(&draft)?;
                println!("Saved on this device as local-{}: {}", record.id, record.title);
            } else {
                let outcome = service.submit(&draft).await?;
                println!("Your civic issue has been reported successfully (#{}).", outcome.issue.id);
                if outcome.local.is_none() {
                    println!("Note: the local copy could not be saved.");
                }
            }
            Ok(())
        }
        Commands::Locate { lat, lon } => {
            let detected = detect_location(&lat, &lon)?;
            println!("Location Detected! Found: {}", detected.address);
            println!("{}", detected.coordinates);
            println!("{}", maps_url(detected.latitude, detected.longitude));
            Ok(())
        }
        Commands::Map { lat, lon, category } => {
            let position = lat.zip(lon).map(|(latitude, longitude)| Position { latitude, longitude });
            let mut view = MapView::new(ctx.api.clone(), position);
            view.load().await?;
            let filter = category.map(CategoryFilter::Only).unwrap_or_default();

            let center = view.center();
            println!("Center: {:.4}, {:.4}", center.latitude, center.longitude);
            for entry in view.filtered(filter) {
                let distance = entry
                    .distance_km
                    .map(|d| format!("{:.1} km", d))
                    .unwrap_or_else(|| "-".into());
                println!(
                    "#{:<6} {:<12} {:<12} {:>10}  {}",
                    entry.issue.id,
                    entry.issue.category.label(),
                    entry.issue.status.label(),
                    distance,
                    maps_url(entry.issue.latitude, entry.issue.longitude),
                );
            }
            Ok(())
        }
        Commands::Admin { metric } => {
            let mut panel = AdminPanel::new(ctx.api.clone());
            let stats = *panel.refresh().await?;
            println!(
                "Total: {}  Pending: {}  In Progress: {}  Resolved: {}  Rejected: {}",
                stats.total, stats.submitted, stats.in_progress, stats.resolved, stats.rejected
            );
            if let Some(rates) = panel.rates() {
                println!(
                    "Resolution rate: {}%  Active: {}  Rejection rate: {}%",
                    rates.resolution_rate, rates.active, rates.rejection_rate
                );
            }
            match panel.city_leaderboard(metric).await {
                Ok(rows) => {
                    println!("City leaderboard ({}):", metric);
                    for (rank, row) in rows.iter().enumerate() {
                        println!("{:>3}. {:<24} active {:>4}  resolved {:>4}", rank + 1, row.name, row.active, row.resolved);
                    }
                }
                Err(e) => tracing::warn!(error = %e, "City leaderboard unavailable"),
            }
            Ok(())
        }
        Commands::Bulk { from, to } => {
            println!("{}", bulk_status_notice(from, to));
            Ok(())
        }
        Commands::Leaderboard {
            scope,
            metric,
            limit,
        } => {
            let rows = ctx.api.leaderboard(scope.into(), metric, limit).await?;
            for (rank, row) in rows.iter().enumerate() {
                println!(
                    "{:>3}. {:<24} active {:>4}  resolved {:>4}  total {:>4}",
                    rank + 1,
                    row.name,
                    row.active,
                    row.resolved,
                    row.total()
                );
            }
            Ok(())
        }
        Commands::Summary { scope, id } => {
            let (name, counts, hours, rate) = match scope {
                Scope::Cities => {
                    let s = ctx.api.city_summary(id).await?;
                    (s.city_name, s.counts, s.average_resolution_hours, s.resolution_rate)
                }
                Scope::Localities => {
                    let s = ctx.api.locality_summary(id).await?;
                    (s.locality_name, s.counts, s.average_resolution_hours, s.resolution_rate)
                }
                Scope::Departments => {
                    let s = ctx.api.department_summary(id).await?;
                    (s.department_name, s.counts, s.average_resolution_hours, s.resolution_rate)
                }
            };
            println!("{}: active {}, resolved {}", name, counts.active, counts.resolved);
            if let Some(hours) = hours {
                println!("Average resolution time: {:.1} h", hours);
            }
            if let Some(rate) = rate {
                println!("Resolution rate: {:.0}%", rate * 100.0);
            }
            Ok(())
        }
        Commands::Trend { city } => {
            for point in ctx.api.city_new_issues(city).await? {
                println!("{}  {}", point.date, point.count);
            }
            Ok(())
        }
    }
}

async fn issues(ctx: &Context, json: bool) -> AppResult<()> {
    let dashboard = Dashboard::new(ctx.api.clone(), ctx.store.clone());
    dashboard.load_issues().await;
    let state = dashboard.state().await;

    if json {
        let body = serde_json::json!({
            "issues": state.issues,
            "statistics": state.statistics,
            "error": state.error,
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    if let Some(banner) = &state.error {
        println!("! {}", banner);
    }
    if let Some(stats) = &state.statistics {
        println!(
            "Total {} | Pending {} | In Progress {} | Resolved {}",
            stats.total, stats.submitted, stats.in_progress, stats.resolved
        );
    }
    for issue in &state.issues {
        print_card(issue, dashboard.open_issue(issue));
    }

    let unsynced = state.local_issues.iter().filter(|r| !r.is_synced()).count();
    if unsynced > 0 {
        println!("{} issue(s) saved only on this device", unsynced);
    }
    Ok(())
}

fn print_card(issue: &DisplayIssue, navigation: Navigation) {
    // '*' marks cards that have no detail view
    let marker = match navigation {
        Navigation::Detail(_) => ' ',
        Navigation::Notice(_) => '*',
    };
    println!(
        "{}{:<16} {:<12} {:<9} {:<53} {}",
        marker,
        issue.id.to_string(),
        issue.status,
        issue.time,
        issue.title,
        issue.location
    );
}

fn print_records(issues: &[IssueRecord]) {
    let now = chrono::Utc::now();
    for issue in issues {
        let card = DisplayIssue::from_remote(issue, now);
        println!(
            "{:<8} {:<12} {:<12} {:<9} {}",
            card.id.to_string(),
            issue.category.label(),
            card.status,
            card.time,
            card.title
        );
    }
}

fn print_record_detail(issue: &IssueRecord) {
    println!("Issue #{}", issue.id);
    println!("  Status:      {}", issue.status.label());
    println!("  Category:    {}", issue.category.label());
    println!(
        "  Description: {}",
        issue.description.as_deref().unwrap_or(shared::display::NO_DESCRIPTION)
    );
    println!(
        "  Location:    {}",
        shared::display::location_label(issue.locality.as_ref(), issue.city.as_ref())
    );
    println!("  Coordinates: {}, {}", issue.latitude, issue.longitude);
    if let Some(created) = issue.created_at {
        println!("  Reported:    {}", created.format("%Y-%m-%d %H:%M"));
    }
    if let Some(resolved) = issue.resolved_at {
        println!("  Resolved:    {}", resolved.format("%Y-%m-%d %H:%M"));
    }
    if let Some(department) = &issue.department {
        println!("  Department:  {}", department.name);
    }
}
