//! Subcommands and their execution.

use clap::{Args, Subcommand};
use color_eyre::{eyre::eyre, Result};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::auth::AdminCredentials;
use crate::cache::{LocalCache, NoopCache, SqliteCache};
use crate::config::Config;
use crate::display;
use crate::event::EventHandler;
use crate::gist::GistClient;
use crate::property::{Property, PropertyDraft, PropertyPatch, PropertyStatus};
use crate::store::{Outcome, PropertyStore, Saved, StoreError};
use crate::sync::SyncDriver;

type Store = PropertyStore<GistClient, Box<dyn LocalCache>>;

#[derive(Subcommand, Debug)]
pub enum Command {
  /// List all listings, newest first
  List {
    /// Only featured listings
    #[arg(long)]
    featured: bool,
    /// Only listings with this status (available, reserved, sold)
    #[arg(long)]
    status: Option<PropertyStatus>,
  },
  /// Search title, location, description and price
  Search { term: String },
  /// Show one listing in detail
  Show { id: String },
  /// Add a listing
  Add {
    #[command(flatten)]
    admin: AdminArgs,
    #[command(flatten)]
    fields: FieldArgs,
  },
  /// Change fields of a listing
  Update {
    id: String,
    #[command(flatten)]
    admin: AdminArgs,
    #[command(flatten)]
    fields: FieldArgs,
  },
  /// Remove a listing
  Delete {
    id: String,
    #[command(flatten)]
    admin: AdminArgs,
  },
  /// Reconcile the local list with the gist once
  Sync,
  /// Reconcile periodically until Ctrl-C
  Watch,
  /// Show remote and cache state
  Status,
}

#[derive(Args, Debug)]
pub struct AdminArgs {
  /// Admin username
  #[arg(long = "user", env = "TERRENOS_ADMIN_USER")]
  pub user: String,
  /// Admin password
  #[arg(long, env = "TERRENOS_ADMIN_PASSWORD", hide_env_values = true)]
  pub password: String,
}

/// Listing fields. For `add` the title and location are required; for `update`
/// only the given flags change.
#[derive(Args, Debug, Default)]
pub struct FieldArgs {
  #[arg(long)]
  pub title: Option<String>,
  #[arg(long)]
  pub location: Option<String>,
  /// Price in guaraníes; 0 means price on request
  #[arg(long)]
  pub price: Option<u64>,
  /// Size in square meters
  #[arg(long)]
  pub size: Option<u64>,
  #[arg(long)]
  pub description: Option<String>,
  /// Image URL or data URI, repeatable; replaces the current images
  #[arg(long = "image")]
  pub images: Vec<String>,
  /// Google Maps link; an empty value removes it
  #[arg(long = "map-url")]
  pub map_url: Option<String>,
  #[arg(long)]
  pub email: Option<String>,
  #[arg(long)]
  pub phone: Option<String>,
  #[arg(long)]
  pub featured: Option<bool>,
  #[arg(long)]
  pub status: Option<PropertyStatus>,
}

impl FieldArgs {
  pub fn into_patch(self) -> PropertyPatch {
    PropertyPatch {
      title: self.title,
      location: self.location,
      price: self.price,
      size: self.size,
      description: self.description,
      images: (!self.images.is_empty()).then_some(self.images),
      map_url: self.map_url,
      email: self.email,
      phone: self.phone,
      featured: self.featured,
      status: self.status,
    }
  }

  pub fn into_draft(self) -> PropertyDraft {
    let mut draft = PropertyDraft::default();
    self.into_patch().apply(&mut draft);
    draft
  }
}

/// Run one subcommand against a freshly loaded store.
pub async fn execute(config: Config, command: Command) -> Result<()> {
  if let Some(admin) = command.admin() {
    let creds = AdminCredentials::from_config(&config.admin);
    if !creds.verify(&admin.user, &admin.password) {
      return Err(eyre!("Invalid admin username or password"));
    }
  }

  let store = Arc::new(build_store(&config)?);
  // Merges with the cache first so writes saved offline earlier reach the gist
  let loaded = store.open().await;
  debug!(source = display::source_label(loaded.source), "Store ready");

  match command {
    Command::List { featured, status } => {
      let listings: Vec<_> = loaded
        .properties
        .iter()
        .filter(|p| !featured || p.featured)
        .filter(|p| status.map_or(true, |s| p.status == s))
        .collect();
      for p in &listings {
        println!("{}", display::listing_line(p));
      }
      eprintln!(
        "{} listing(s) from {}",
        listings.len(),
        display::source_label(loaded.source)
      );
    }
    Command::Search { term } => {
      let found = store.search(&term);
      for p in &found {
        println!("{}", display::listing_line(p));
      }
      eprintln!("{} match(es)", found.len());
    }
    Command::Show { id } => {
      let p = store.get(&id)?;
      println!("{}", display::listing_detail(&p, &config.contact.whatsapp));
      if p.email.is_empty() {
        if let Some(email) = &config.contact.email {
          println!("  contact:     {}", email);
        }
      }
      if p.phone.is_empty() {
        if let Some(phone) = &config.contact.phone {
          println!("  call:        {}", phone);
        }
      }
    }
    Command::Add { fields, .. } => {
      let result = store.create(fields.into_draft()).await;
      report(result, "Listing created")?;
    }
    Command::Update { id, fields, .. } => {
      let patch = fields.into_patch();
      if patch.is_empty() {
        return Err(eyre!("Nothing to update; pass at least one field flag"));
      }
      let result = store.update(&id, patch).await;
      report(result, "Listing updated")?;
    }
    Command::Delete { id, .. } => {
      let result = store.delete(&id).await;
      report(result, "Listing deleted")?;
    }
    Command::Sync => {
      let summary = store.reconcile().await?;
      match summary.pushed {
        Some(outcome) => println!("{} listing(s), {}", summary.total, outcome.describe()),
        None => println!("{} listing(s), already in sync", summary.total),
      }
    }
    Command::Watch => {
      let events = EventHandler::new(config.sync.interval());
      eprintln!(
        "Syncing every {}s, press Ctrl-C to stop",
        config.sync.interval().as_secs()
      );
      let attempts = SyncDriver::new(store.clone()).run(events).await;
      debug!(attempts, "Watch finished");
    }
    Command::Status => {
      println!("source:        {}", display::source_label(loaded.source));
      println!("{}", display::status_report(&store.status()));
    }
  }

  Ok(())
}

impl Command {
  fn admin(&self) -> Option<&AdminArgs> {
    match self {
      Command::Add { admin, .. } | Command::Update { admin, .. } | Command::Delete { admin, .. } => {
        Some(admin)
      }
      _ => None,
    }
  }
}

fn build_store(config: &Config) -> Result<Store> {
  let remote = GistClient::new(config)?;

  let cache: Box<dyn LocalCache> = match SqliteCache::open(config.cache.path.as_deref()) {
    Ok(cache) => Box::new(cache),
    Err(e) => {
      warn!(error = %e, "Local cache unavailable, changes will not survive a restart");
      Box::new(NoopCache)
    }
  };

  Ok(PropertyStore::new(config, remote, cache))
}

/// Print a write result; validation and lookup failures become the exit error.
fn report(result: Result<Saved<Property>, StoreError>, action: &str) -> Result<()> {
  let outcome = Outcome::from_result(&result, action);
  if let Some(err) = outcome.error {
    return Err(err.into());
  }
  if let Ok(saved) = &result {
    println!("{}", display::listing_line(&saved.value));
  }
  if let Some(message) = outcome.message {
    eprintln!("{}", message);
  }
  Ok(())
}
