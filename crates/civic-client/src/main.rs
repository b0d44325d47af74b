// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! civic - command-line client for the civic portal.
//!
//! Signs in against the portal, remembers the issued session and language
//! preference on this device, and sends each role to its dashboard.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use civic_client_auth::Identifier;
use civic_client_config::{load_config_with_cli, runtime::LoggingConfig, CliOverrides, LogFormat};
use civic_client_store::{FileStore, PreferenceStore};

mod auth;
mod locale;
mod terminal;

use terminal::TerminalNavigator;

/// Crates whose logs follow the configured level. Everything else stays at
/// `warn`.
const LOG_TARGETS: &[&str] = &[
	"civic",
	"civic_client_auth",
	"civic_client_config",
	"civic_client_locale",
	"civic_client_store",
	"civic_common_http",
	"civic_common_i18n",
];

/// Civic portal client
#[derive(Parser, Debug)]
#[command(name = "civic", version, about, long_about = None)]
struct Args {
	/// Path to custom configuration file
	#[arg(short, long, global = true)]
	config: Option<PathBuf>,

	/// Portal base URL (overrides config)
	#[arg(long, global = true)]
	portal_url: Option<String>,

	/// Session and preference store location (overrides config)
	#[arg(long, global = true)]
	state_file: Option<PathBuf>,

	/// Log level (overrides config)
	#[arg(short, long, global = true)]
	log_level: Option<String>,

	/// Output logs as JSON (overrides config)
	#[arg(long, global = true)]
	json_logs: bool,

	/// Open dashboards in the default browser
	#[arg(long, global = true)]
	open: bool,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Sign in and go to your dashboard
	Login {
		/// Sign in with an email address
		#[arg(long, conflicts_with = "phone", required_unless_present = "phone")]
		email: Option<String>,

		/// Sign in with a phone number
		#[arg(long)]
		phone: Option<String>,

		/// Read the password from stdin without prompting
		#[arg(long)]
		password_stdin: bool,
	},

	/// Forget the session on this device
	Logout,

	/// Go to the dashboard for the saved session
	Redirect,

	/// Show the role of the saved session
	Whoami,

	/// Show or change the display language
	Locale {
		#[command(subcommand)]
		command: LocaleCommand,
	},
}

#[derive(Subcommand, Debug)]
enum LocaleCommand {
	/// Show the current language
	Show,
	/// List supported languages
	List,
	/// Change the language
	Set {
		/// Language code, e.g. `ta`
		code: String,
	},
}

impl From<&Args> for CliOverrides {
	fn from(args: &Args) -> Self {
		Self {
			portal_url: args.portal_url.clone(),
			log_level: args.log_level.clone(),
			log_format: args.json_logs.then(|| "json".to_string()),
			state_file: args.state_file.clone(),
			config_file: args.config.clone(),
		}
	}
}

fn init_tracing(logging: &LoggingConfig) {
	let level = logging.level.as_filter();
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
		let directives: Vec<String> = std::iter::once("warn".to_string())
			.chain(LOG_TARGETS.iter().map(|target| format!("{target}={level}")))
			.collect();
		EnvFilter::new(directives.join(","))
	});

	match logging.format {
		LogFormat::Json => {
			tracing_subscriber::registry()
				.with(filter)
				.with(fmt::layer().json().with_writer(std::io::stderr))
				.init();
		}
		LogFormat::Compact => {
			tracing_subscriber::registry()
				.with(filter)
				.with(fmt::layer().compact().with_writer(std::io::stderr))
				.init();
		}
		LogFormat::Pretty => {
			tracing_subscriber::registry()
				.with(filter)
				.with(fmt::layer().with_writer(std::io::stderr))
				.init();
		}
	}
}

fn identifier(email: Option<String>, phone: Option<String>) -> Result<Identifier> {
	match (email, phone) {
		(Some(email), _) => Ok(Identifier::Email(email)),
		(None, Some(phone)) => Ok(Identifier::Phone(phone)),
		(None, None) => anyhow::bail!("either --email or --phone is required"),
	}
}

#[tokio::main]
async fn main() -> Result<()> {
	let args = Args::parse();

	let config =
		load_config_with_cli(CliOverrides::from(&args)).context("failed to load configuration")?;

	init_tracing(&config.logging);

	debug!(
		base_url = %config.portal.base_url,
		state_file = %config.storage.state_file.display(),
		"starting civic"
	);

	let store: Arc<dyn PreferenceStore> = Arc::new(FileStore::new(&config.storage.state_file));
	let mut locale = locale::init_session(store.clone(), &config).await;
	let navigator = TerminalNavigator::new(
		&config.portal.base_url,
		args.open,
		locale.current().translations().clone(),
	);

	match args.command {
		Command::Login {
			email,
			phone,
			password_stdin,
		} => {
			auth::login(
				&config,
				store,
				navigator,
				&locale,
				identifier(email, phone)?,
				password_stdin,
			)
			.await
		}
		Command::Logout => auth::logout(&*store, &locale).await,
		Command::Redirect => auth::redirect(store, navigator, &locale).await,
		Command::Whoami => auth::whoami(&*store, &locale).await,
		Command::Locale { command } => match command {
			LocaleCommand::Show => {
				locale::show(&locale);
				Ok(())
			}
			LocaleCommand::List => {
				locale::list(&locale);
				Ok(())
			}
			LocaleCommand::Set { code } => locale::set(&mut locale, &code).await,
		},
	}
}
