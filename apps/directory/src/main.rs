mod config;
mod cv_client;
mod detail;
mod directory;
mod editor;
mod errors;
mod links;
mod local_storage;
mod models;
mod render;
mod store;
#[cfg(test)]
mod testing;
mod theme;

use std::io::{BufRead, IsTerminal, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use base64::engine::general_purpose::STANDARD as B64;
use base64::Engine;
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use url::Url;

use crate::config::Config;
use crate::cv_client::{CvParser, HttpCvParser};
use crate::detail::ProfileDetail;
use crate::directory::{Clipboard, ClipboardError, DirectoryView, FilterInput, ShareOutcome};
use crate::editor::attachment::Attachment;
use crate::editor::workflow::{DISCARD_PROMPT, PARSE_SUCCESS_MESSAGE};
use crate::editor::{EditorMode, EmailPolicy, ParseSource, ProfileEditor, ProfileForm};
use crate::errors::ValidationError;
use crate::local_storage::LocalStorage;
use crate::models::ParsedCv;
use crate::render::{parsed_json, render_detail, render_listing, render_parsed};
use crate::store::HttpProfileStore;
use crate::theme::ThemePreference;

#[derive(Parser, Debug)]
#[command(name = "directory", version, about = "Browse and edit the profile directory")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List profiles, optionally filtered
    List(ListArgs),
    /// Show one profile by email or by its share link
    Show { target: String },
    /// Copy a profile's share link to the clipboard
    Share { email: String },
    /// Create or update the profile for an email
    Edit(EditArgs),
    /// Extract profile fields from a CV without saving anything
    Parse(ParseArgs),
    /// Show or toggle the theme preference
    Theme {
        #[command(subcommand)]
        action: Option<ThemeAction>,
    },
}

#[derive(Args, Debug, Default)]
struct ListArgs {
    /// Matches name or email
    #[arg(long)]
    text: Option<String>,
    #[arg(long)]
    skill: Option<String>,
    #[arg(long)]
    education: Option<String>,
    #[arg(long)]
    language: Option<String>,
    #[arg(long)]
    min_experience: Option<String>,
}

#[derive(Args, Debug)]
struct EditArgs {
    email: String,
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    linkedin: Option<String>,
    #[arg(long)]
    github: Option<String>,
    #[arg(long)]
    facebook: Option<String>,
    #[arg(long)]
    portfolio: Option<String>,
    #[arg(long)]
    phone: Option<String>,
    #[arg(long)]
    experience: Option<String>,
    #[arg(long)]
    education: Option<String>,
    /// Comma-separated
    #[arg(long)]
    skills: Option<String>,
    /// Comma-separated
    #[arg(long)]
    certifications: Option<String>,
    /// Comma-separated
    #[arg(long)]
    languages: Option<String>,
    /// CV to attach (pdf, docx, doc, txt; max 10MB)
    #[arg(long)]
    cv_file: Option<PathBuf>,
    /// Pre-fill fields by parsing this pasted CV text
    #[arg(long, conflicts_with = "parse_file")]
    parse_text: Option<String>,
    /// Pre-fill fields by parsing the attached CV file
    #[arg(long, requires = "cv_file")]
    parse_file: bool,
    /// Abandon the form after confirming, without saving
    #[arg(long)]
    discard: bool,
}

#[derive(Args, Debug)]
struct ParseArgs {
    /// Pasted CV text
    #[arg(long, conflicts_with = "file", required_unless_present = "file")]
    text: Option<String>,
    /// CV file (pdf, docx, doc, txt; max 10MB)
    #[arg(long)]
    file: Option<PathBuf>,
    /// Also copy the JSON result to the clipboard
    #[arg(long)]
    copy_json: bool,
}

#[derive(Subcommand, Debug)]
enum ThemeAction {
    Show,
    Toggle,
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    info!("Using API at {}", config.api_url);

    match cli.command {
        Command::List(args) => list(&config, args).await,
        Command::Show { target } => show(&config, &target).await,
        Command::Share { email } => share(&config, &email),
        Command::Edit(args) => edit(&config, args).await,
        Command::Parse(args) => parse(&config, args).await,
        Command::Theme { action } => theme(&config, action.unwrap_or(ThemeAction::Show)),
    }
}

async fn list(config: &Config, args: ListArgs) -> Result<()> {
    let store = HttpProfileStore::new(config.api_url.clone())?;
    let mut view = DirectoryView::new(config.site_url.clone());
    let mut listing = view.load(&store).await;

    let inputs = [
        args.text.map(FilterInput::Text),
        args.skill.map(FilterInput::Skill),
        args.education.map(FilterInput::Education),
        args.language.map(FilterInput::Language),
        args.min_experience.map(FilterInput::MinExperience),
    ];
    for input in inputs.into_iter().flatten() {
        listing = view.input(input);
    }

    print!("{}", render_listing(&listing));
    Ok(())
}

async fn show(config: &Config, target: &str) -> Result<()> {
    let store = HttpProfileStore::new(config.api_url.clone())?;
    let detail = match Url::parse(target) {
        Ok(link) => ProfileDetail::from_link(&store, &link).await,
        Err(_) => ProfileDetail::for_email(&store, target.trim()).await,
    };
    print!("{}", render_detail(&detail));
    Ok(())
}

/// Writes to the terminal's clipboard with an OSC 52 escape sequence.
struct TerminalClipboard;

impl Clipboard for TerminalClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let mut stdout = std::io::stdout();
        if !stdout.is_terminal() {
            return Err(ClipboardError("stdout is not a terminal".into()));
        }
        write!(stdout, "\x1b]52;c;{}\x07", B64.encode(text))
            .and_then(|_| stdout.flush())
            .map_err(|e| ClipboardError(e.to_string()))
    }
}

fn share(config: &Config, email: &str) -> Result<()> {
    let mut view = DirectoryView::new(config.site_url.clone());
    match view.share(email.trim(), &mut TerminalClipboard)? {
        ShareOutcome::Copied(url) => {
            if let Some(toast) = view.toast() {
                println!("{} {url}", toast.message);
            }
        }
        ShareOutcome::Fallback(url) => println!("Copy this link: {url}"),
    }
    Ok(())
}

async fn edit(config: &Config, args: EditArgs) -> Result<()> {
    let store = Arc::new(HttpProfileStore::new(config.api_url.clone())?);
    let parser = Arc::new(HttpCvParser::new(config.api_url.clone())?);
    let mut editor = ProfileEditor::new(store, parser, EmailPolicy::new(config.email_domains.clone()));

    let mode = editor.locate(&args.email).await?;
    let email = editor.session()?.form.email().to_string();
    println!("{}: {}", mode.title(), mode.subtitle(&email));
    if mode == EditorMode::Edit {
        if let Some(label) = &editor.session()?.attachment_label {
            println!("{label}");
        }
    }

    if args.discard && confirm(DISCARD_PROMPT)? {
        if let Some(navigation) = editor.discard(true) {
            let index = navigation
                .to_url(&config.site_url)
                .context("Failed to build the index link")?;
            println!("Discarded. Back to {index}");
            return Ok(());
        }
    }

    if let Some(path) = &args.cv_file {
        editor.attach_file(path).await?;
        if let Some(label) = &editor.session()?.attachment_label {
            println!("{label}");
        }
    }

    let source = match (&args.parse_text, args.parse_file) {
        (Some(text), _) => Some(ParseSource::Text(text.clone())),
        (None, true) => Some(ParseSource::AttachedFile),
        (None, false) => None,
    };
    if let Some(source) = source {
        // a failed parse still leaves the form open for manual values
        match editor.parse_assist(source).await {
            Ok(_) => println!("{PARSE_SUCCESS_MESSAGE}"),
            Err(e) => eprintln!("{e}"),
        }
    }

    apply_field_args(editor.form_mut()?, &args);

    let navigation = editor.submit().await?;
    let link = navigation
        .to_url(&config.site_url)
        .context("Failed to build the profile link")?;
    println!("Profile saved: {link}");
    Ok(())
}

/// Values given on the command line win over parse-assist results.
fn apply_field_args(form: &mut ProfileForm, args: &EditArgs) {
    let fields = [
        (&args.name, &mut form.name),
        (&args.linkedin, &mut form.linkedin),
        (&args.github, &mut form.github),
        (&args.facebook, &mut form.facebook),
        (&args.portfolio, &mut form.portfolio),
        (&args.phone, &mut form.phone),
        (&args.experience, &mut form.experience),
        (&args.education, &mut form.education),
        (&args.skills, &mut form.skills),
        (&args.certifications, &mut form.certifications),
        (&args.languages, &mut form.languages),
    ];
    for (value, field) in fields {
        if let Some(value) = value {
            *field = value.clone();
        }
    }
}

/// Asks on stderr and reads one line from stdin. Anything but yes declines.
fn confirm(prompt: &str) -> Result<bool> {
    eprint!("{prompt} [y/N] ");
    let mut answer = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut answer)
        .context("Failed to read the confirmation")?;
    Ok(is_yes(&answer))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

async fn parse(config: &Config, args: ParseArgs) -> Result<()> {
    let parser = HttpCvParser::new(config.api_url.clone())?;
    let parsed = extract(&parser, &args).await?;
    print!("{}", render_parsed(&parsed));

    if args.copy_json {
        match TerminalClipboard.write_text(&parsed_json(&parsed)) {
            Ok(()) => println!("JSON copied!"),
            Err(e) => eprintln!("Failed to copy to clipboard ({e})"),
        }
    }
    Ok(())
}

/// Sends pasted text, or a file that passed the attachment checks, to the
/// parser. Nothing is sent when the input is rejected.
async fn extract(parser: &dyn CvParser, args: &ParseArgs) -> Result<ParsedCv> {
    let parsed = match (&args.text, &args.file) {
        (Some(text), _) => {
            let text = text.trim();
            if text.is_empty() {
                return Err(ValidationError::MissingCvText.into());
            }
            parser.parse_text(text).await
        }
        (None, Some(path)) => {
            let attachment = Attachment::read(path).await?;
            info!("Parsing {} ({} bytes)", attachment.file_name, attachment.bytes.len());
            parser
                .parse_file(&attachment.file_name, attachment.kind.mime(), attachment.bytes)
                .await
        }
        (None, None) => return Err(ValidationError::MissingCvFile.into()),
    };
    parsed.context("Error parsing CV")
}

fn theme(config: &Config, action: ThemeAction) -> Result<()> {
    let mut preference = ThemePreference::load(LocalStorage::new(&config.storage_path))?;
    let current = match action {
        ThemeAction::Show => preference.current(),
        ThemeAction::Toggle => preference.toggle()?,
    };
    println!("{current}");
    Ok(())
}
