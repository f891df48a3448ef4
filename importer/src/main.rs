use anyhow::Context;
use clap::{Parser, Subcommand};
use extractors::{BulkProfileExtractor, CompiledSelectors, ProfileExtractor, SelectorConfig};
use importer::export::export_csv;
use importer::storage::default_db_path;
use importer::{
    AuthClient, ContactStore, DomWatcher, FormEdits, ImportForm, ImporterConfig, LocalStorage,
    Notification, Session, SubmissionGateway,
};
use shared_types::ContactRecord;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tracing_subscriber::prelude::*;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(long)]
    log_file_path: Option<String>,

    /// Config file to use instead of the default location
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    db_path: Option<PathBuf>,

    #[arg(long)]
    api_base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the contacts found on a saved page
    Extract {
        #[arg(long)]
        file: PathBuf,
        #[arg(long, default_value = "")]
        url: String,
        /// CSS selector replacing the default trigger
        #[arg(long)]
        trigger: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Review one profile and save it locally or submit it to the API
    Import {
        #[arg(long)]
        file: PathBuf,
        #[arg(long, default_value = "")]
        url: String,
        /// Which trigger on the page to import, in document order
        #[arg(long, default_value_t = 0)]
        index: usize,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        company: Option<String>,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        linkedin: Option<String>,
        #[arg(long)]
        industry: Option<String>,
        #[arg(long)]
        notes: Option<String>,
        /// Send the contact to the API instead of only storing it
        #[arg(long)]
        submit: bool,
    },
    /// Store every profile card on a page
    Bulk {
        #[arg(long)]
        file: PathBuf,
        #[arg(long, default_value = "")]
        url: String,
    },
    List,
    Export {
        #[arg(long)]
        dir: Option<PathBuf>,
    },
    Clear,
    Login {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
    Logout,
    /// Re-scan a page file whenever it changes
    Watch {
        #[arg(long)]
        file: PathBuf,
        #[arg(long, default_value_t = 1000)]
        interval_ms: u64,
    },
    /// Persist settings into the config file
    Config {
        #[arg(long)]
        api_base_url: String,
    },
}

struct App {
    config: ImporterConfig,
    config_path: PathBuf,
    storage: Arc<LocalStorage>,
}

impl App {
    fn selectors(&self) -> SelectorConfig {
        self.config.selectors()
    }

    fn store(&self) -> ContactStore {
        ContactStore::new(self.storage.clone())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    init_tracing(args.log_file_path.as_deref());

    let (mut config, config_path) = match &args.config {
        Some(path) => (ImporterConfig::load_from(path)?, path.clone()),
        None => ImporterConfig::load()?,
    };
    tracing::debug!("Using config at {}", config_path.display());

    if let Some(base_url) = &args.api_base_url {
        config.api.base_url = base_url.clone();
    }

    let db_path = match args.db_path.clone().or_else(|| config.storage.db_path.clone()) {
        Some(path) => path,
        None => default_db_path()?,
    };
    let storage = Arc::new(
        LocalStorage::open(&db_path)
            .with_context(|| format!("Failed to open storage at {}", db_path.display()))?,
    );

    let app = App {
        config,
        config_path,
        storage,
    };

    run(&app, args.command).await
}

fn init_tracing(log_file_path: Option<&str>) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    if let Some(log_path) = log_file_path {
        let log_path = Path::new(log_path);
        let file_appender = tracing_appender::rolling::never(
            log_path.parent().unwrap_or(Path::new(".")),
            log_path
                .file_name()
                .unwrap_or(std::ffi::OsStr::new("contact-import.log")),
        );
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        std::mem::forget(guard);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(true)
                    .with_writer(std::io::stderr),
            )
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(non_blocking),
            )
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

async fn run(app: &App, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Extract {
            file,
            url,
            trigger,
            json,
        } => {
            let html = read_page(&file)?;
            let extractor = ProfileExtractor::new(&app.selectors())?;
            let records = extractor.extract_document(&html, &url, trigger.as_deref())?;

            if json {
                println!("{}", serde_json::to_string_pretty(&records)?);
            } else {
                for record in &records {
                    print_record(record);
                }
            }
        }
        Command::Import {
            file,
            url,
            index,
            name,
            email,
            company,
            title,
            phone,
            location,
            linkedin,
            industry,
            notes,
            submit,
        } => {
            let html = read_page(&file)?;
            let extractor = ProfileExtractor::new(&app.selectors())?;
            let records = extractor.extract_document(&html, &url, None)?;
            let Some(record) = records.into_iter().nth(index) else {
                anyhow::bail!("No profile at index {} in {}", index, file.display());
            };

            let mut form = ImportForm::from_record(&record);
            form.apply(FormEdits {
                name,
                email,
                company,
                title,
                phone,
                location,
                linkedin,
                industry,
                notes,
            });
            let contact = form.confirm();

            let notification = if submit {
                let session = Session::restore(app.storage.clone())?;
                let gateway = SubmissionGateway::new(&app.config.api.base_url, app.store());
                match gateway.submit(&record, &contact, &session).await {
                    Ok(id) => {
                        tracing::info!("Server assigned id {}", id);
                        Notification::contact_saved()
                    }
                    Err(e) => Notification::from(&e),
                }
            } else {
                match app.store().append(contact) {
                    Ok(()) => Notification::contact_imported(),
                    Err(e) => Notification::from(&importer::ImportError::from(e)),
                }
            };
            notification.show();
        }
        Command::Bulk { file, url } => {
            let html = read_page(&file)?;
            let extractor = BulkProfileExtractor::new(&app.selectors())?;
            let contacts: Vec<_> = extractor
                .extract_document(&html, &url)
                .iter()
                .map(|record| ImportForm::from_record(record).confirm())
                .collect();

            let found = contacts.len();
            if found > 0 {
                let total = app.store().append_many(contacts)?;
                tracing::info!("{} contacts stored in total", total);
            }
            Notification::bulk_imported(found).show();
        }
        Command::List => {
            let contacts = app.store().list()?;
            for contact in &contacts {
                println!(
                    "{}\t{}\t{}\t{}\t{}",
                    contact.imported_at, contact.name, contact.email, contact.company, contact.title
                );
            }
            println!("{} contacts", contacts.len());
        }
        Command::Export { dir } => {
            let contacts = app.store().list()?;
            let dir = dir
                .or_else(|| app.config.export.directory.clone())
                .unwrap_or_else(|| PathBuf::from("."));

            match export_csv(&contacts, &dir) {
                Ok(path) => {
                    Notification::exported(contacts.len()).show();
                    println!("{}", path.display());
                }
                Err(e) => Notification::from(&e).show(),
            }
        }
        Command::Clear => {
            app.store().clear()?;
            Notification::success("Imported contacts cleared").show();
        }
        Command::Login { username, password } => {
            let session = Session::restore(app.storage.clone())?;
            let auth = AuthClient::new(&app.config.api.base_url);
            match session.login(&auth, &username, &password).await {
                Ok(()) => Notification::logged_in().show(),
                Err(e) => Notification::from(&e).show(),
            }
        }
        Command::Logout => {
            let session = Session::restore(app.storage.clone())?;
            session.logout()?;
            Notification::logged_out().show();
        }
        Command::Watch { file, interval_ms } => {
            watch(app, &file, Duration::from_millis(interval_ms)).await?;
        }
        Command::Config { api_base_url } => {
            let mut config = app.config.clone();
            config.api.base_url = api_base_url;
            config.save(&app.config_path)?;
            Notification::success(format!("Saved {}", app.config_path.display())).show();
        }
    }

    Ok(())
}

/// Polls `file` for changes and feeds its markup to a `DomWatcher`; every
/// debounced change re-counts the triggers still waiting for a button.
async fn watch(app: &App, file: &Path, interval: Duration) -> anyhow::Result<()> {
    let selector_config = app.selectors();
    let watcher = DomWatcher::new(
        CompiledSelectors::compile(&selector_config)?,
        Duration::from_millis(app.config.watcher.debounce_ms),
    );

    let extractor = Arc::new(ProfileExtractor::new(&selector_config)?);
    let watched = file.to_path_buf();
    watcher.on_dom_changed(move || match std::fs::read_to_string(&watched) {
        Ok(html) => {
            let pending = extractor.count_pending(&html);
            tracing::info!("{} profiles ready to import", pending);
        }
        Err(e) => tracing::warn!("Failed to read {}: {}", watched.display(), e),
    });

    tracing::info!("Watching {} (ctrl-c to stop)", file.display());

    let mut last_modified: Option<SystemTime> = None;
    let mut ticker = tokio::time::interval(interval);
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            _ = ticker.tick() => {
                let modified = std::fs::metadata(file).and_then(|m| m.modified()).ok();
                if modified.is_none() || modified == last_modified {
                    continue;
                }
                last_modified = modified;

                match std::fs::read_to_string(file) {
                    Ok(html) => {
                        watcher.notify(&[html]);
                    }
                    Err(e) => tracing::warn!("Failed to read {}: {}", file.display(), e),
                }
            }
        }
    }

    tracing::info!("Stopped watching");
    Ok(())
}

fn read_page(file: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(file).with_context(|| format!("Failed to read {}", file.display()))
}

fn print_record(record: &ContactRecord) {
    println!("{}", record.full_name());
    for (label, value) in [
        ("email", &record.work_email),
        ("company", &record.company_name),
        ("title", &record.main_role_title),
        ("phone", &record.work_phone),
        ("location", &record.full_address),
        ("linkedin", &record.linkedin_url),
    ] {
        if !value.is_empty() {
            println!("  {:<9}{}", label, value);
        }
    }
    println!(
        "  {:<9}{} experience, {} education",
        "history",
        record.professional_experiences.len(),
        record.education_experiences.len()
    );
}
