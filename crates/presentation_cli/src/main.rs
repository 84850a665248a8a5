//! Wayfinder CLI
//!
//! Operator tooling around the wayfinding core: query the backend, manage the
//! feedback token, inspect itineraries and check client-side decisions.

#![allow(clippy::print_stdout)]

mod context;
mod render;
mod route;

use std::path::PathBuf;

use anyhow::{Context as _, bail};
use application::{
    FeedbackForm, FloorControl, Language, OutdatedBrowserNotice, RoutingPreferences, Theme,
    TokenState, detect_capabilities,
};
use chrono::{Duration, Utc};
use clap::{Parser, Subcommand};
use domain::SearchQuery;
use infrastructure::{AppConfig, init_tracing};
use integration_navigation::CalendarRequest;
use integration_transit::{GEOMETRY_PRECISION, try_decode};

use crate::context::Context;

/// Wayfinder CLI
#[derive(Parser)]
#[command(name = "wayfinder-cli")]
#[command(author, version, about = "Campus wayfinding client tools", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Configuration file (defaults to ./wayfinder.toml if present)
    #[arg(short, long, global = true, env = "WAYFINDER_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search rooms, buildings and sites
    Search {
        query: String,

        /// Use the larger limits of the results page
        #[arg(long)]
        full: bool,

        /// Print facets as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show details and floor overlays of a location
    Location {
        id: String,

        /// Map height in pixels used to lay out the floor control
        #[arg(long, default_value = "800")]
        height: f64,

        #[arg(long)]
        json: bool,
    },

    /// Public transport near a location
    Nearby { id: String },

    /// Obtain (or reuse) a feedback token
    Token {
        /// Discard the stored token first
        #[arg(long)]
        refresh: bool,
    },

    /// Send feedback
    ///
    /// Waits until the token is old enough to be accepted.
    Feedback {
        #[arg(long, default_value = "general")]
        category: String,

        #[arg(long)]
        subject: String,

        #[arg(long)]
        body: String,

        /// Confirm the privacy policy
        #[arg(long)]
        accept_privacy: bool,

        /// Ask for the issue to be deleted once processed
        #[arg(long)]
        delete_after: bool,
    },

    /// Calendar entries of up to 10 rooms
    Calendar {
        #[arg(required = true)]
        ids: Vec<String>,

        /// Days from now to include
        #[arg(long, default_value = "7")]
        days: i64,
    },

    /// Decode an encoded polyline
    Decode {
        polyline: String,

        #[arg(long, default_value_t = GEOMETRY_PRECISION)]
        precision: u32,
    },

    /// Inspect an itinerary file: bounds, stops and line styles
    Route {
        file: PathBuf,

        #[arg(long)]
        json: bool,
    },

    /// Show or change stored preferences
    Prefs {
        #[arg(long)]
        theme: Option<String>,

        #[arg(long)]
        lang: Option<String>,

        /// Parse a routing preferences cookie value and print it back
        #[arg(long)]
        routing_cookie: Option<String>,
    },

    /// Evaluate a browser user agent
    Browser {
        user_agent: String,

        /// Report WebGL as unavailable
        #[arg(long)]
        no_webgl: bool,
    },

    /// Check backend health
    Health,
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

#[tokio::main]
#[allow(clippy::too_many_lines)]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load_from(cli.config.as_deref())?;
    init_tracing(config.log_format, log_filter_from_verbosity(cli.verbose))?;

    let ctx = Context::new(config)?;

    match cli.command {
        Commands::Search { query, full, json } => {
            let query = if full {
                SearchQuery::full_page(query)
            } else {
                SearchQuery::new(query)
            };
            let facets = ctx.search()?.search(&query).await;
            if ctx.errors.is_set() {
                bail!(ctx.last_error());
            }
            if json {
                println!("{}", serde_json::to_string_pretty(&facets)?);
            } else {
                print!("{}", render::facets_text(&facets));
            }
        },

        Commands::Location { id, height, json } => {
            let details = ctx.client.location(&id).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&details)?);
                return Ok(());
            }

            println!("{} ({})", details.name, details.type_common_name);
            if !details.parent_names.is_empty() {
                println!("  in {}", details.parent_names.join(" › "));
            }
            println!("  at {:.6}, {:.6}", details.coords.lat, details.coords.lon);

            let mut floors = FloorControl::new(height);
            floors.set_overlays(details.floor_overlays());
            print!("{}", render::floors_text(&floors));
        },

        Commands::Nearby { id } => {
            let nearby = ctx.client.nearby(&id).await?;
            if nearby.public_transport.is_empty() {
                println!("No stations nearby.");
            }
            for station in nearby.public_transport {
                println!("{:>6.0} m  {}", station.distance_meters, station.name);
            }
        },

        Commands::Token { refresh } => {
            let feedback = ctx.feedback();
            if refresh {
                feedback.invalidate()?;
            }
            let token = feedback.ensure_token().await?;
            let now = Utc::now();
            println!("Token issued at {}", token.created_at().to_rfc3339());
            match feedback.state_at(now)? {
                TokenState::Valid => {
                    let wait = feedback.submission_delay(&token, now);
                    if wait.is_zero() {
                        println!("Ready to submit.");
                    } else {
                        println!("Submittable in {}s.", wait.as_secs());
                    }
                },
                state => println!("Token state: {state:?}"),
            }
        },

        Commands::Feedback {
            category,
            subject,
            body,
            accept_privacy,
            delete_after,
        } => {
            let mut form = FeedbackForm {
                subject,
                body,
                privacy_checked: accept_privacy,
                deletion_requested: delete_after,
                ..FeedbackForm::default()
            };
            form.set_category(&category)?;

            let feedback = ctx.feedback();
            let token = feedback.ensure_token().await?;
            let wait = feedback.submission_delay(&token, Utc::now());
            if !wait.is_zero() {
                println!("Waiting {}s for the token to mature...", wait.as_secs());
            }
            let issue = feedback.submit(&form).await?;
            println!("Thanks! Your feedback is tracked at {issue}");
        },

        Commands::Calendar { ids, days } => {
            let now = Utc::now();
            let request = CalendarRequest {
                ids,
                start_after: now,
                end_before: now + Duration::days(days),
            };
            let calendar = ctx.client.calendar(&request).await?;
            for (id, entry) in calendar {
                println!("{id}: {} ({} events)", entry.location.name, entry.events.len());
                for event in entry.events {
                    println!(
                        "  {} – {}  {}",
                        event.start_at.format("%a %d.%m. %H:%M"),
                        event.end_at.format("%H:%M"),
                        event.title
                    );
                }
            }
        },

        Commands::Decode {
            polyline,
            precision,
        } => {
            let path = try_decode(&polyline, precision)?;
            for point in path {
                println!("{:.6},{:.6}", point.latitude(), point.longitude());
            }
        },

        Commands::Route { file, json } => {
            let raw = std::fs::read_to_string(&file)
                .with_context(|| format!("reading {}", file.display()))?;
            let reports: Vec<route::RouteReport> = route::parse_itineraries(&raw)?
                .iter()
                .map(route::report)
                .collect();

            if json {
                println!("{}", serde_json::to_string_pretty(&reports)?);
                return Ok(());
            }
            for (i, report) in reports.iter().enumerate() {
                println!("#{} {}", i + 1, report.summary);
                if let Some(bbox) = report.bounds {
                    println!(
                        "  bounds: {:.5},{:.5} .. {:.5},{:.5}",
                        bbox.min_lat, bbox.min_lon, bbox.max_lat, bbox.max_lon
                    );
                }
                for leg in &report.legs {
                    println!(
                        "  {:<12} {} → {} ({} pts, {})",
                        leg.mode, leg.from, leg.to, leg.points, leg.style.color
                    );
                }
                for stop in report.stops.iter().filter(|s| s.important) {
                    let change = stop
                        .platform_change
                        .as_deref()
                        .map(|c| format!("  [{c}]"))
                        .unwrap_or_default();
                    println!("  • {} ({}){change}", stop.name, stop.modes.join(", "));
                }
            }
        },

        Commands::Prefs {
            theme,
            lang,
            routing_cookie,
        } => {
            let preferences = ctx.preferences();
            if let Some(theme) = theme {
                preferences.set_theme(theme.parse::<Theme>()?)?;
            }
            if let Some(lang) = lang {
                preferences.set_language(lang.parse::<Language>()?)?;
            }
            println!("theme: {}", preferences.theme()?);
            println!("lang:  {}", preferences.language()?);

            if let Some(raw) = routing_cookie {
                let routing = RoutingPreferences::from_cookie_value(&raw);
                println!("routing: {routing:?}");
                println!("cookie:  {}", routing.to_cookie());
            }
        },

        Commands::Browser {
            user_agent,
            no_webgl,
        } => {
            let capabilities = detect_capabilities(&user_agent, !no_webgl);
            println!("{}", serde_json::to_string_pretty(&capabilities)?);
            let notice = OutdatedBrowserNotice::new(ctx.store.clone());
            if notice.check(&capabilities, Utc::now())? {
                println!("This browser is outdated; the warning would be shown now.");
            }
            if !capabilities.webgl {
                println!("No WebGL: the interactive map falls back to the static room map.");
            }
        },

        Commands::Health => {
            if ctx.client.is_healthy().await {
                println!("✅ Healthy");
            } else {
                println!("❌ Unhealthy: {}", ctx.config.api.endpoint("status"));
                std::process::exit(1);
            }
        },
    }

    Ok(())
}
