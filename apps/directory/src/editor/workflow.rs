//! Profile editor — the two-step create/update flow.
//!
//! LocateByEmail ──locate──▶ EditForm ──submit──▶ Finished(ProfileDetail)
//!        └──────────── discard (confirmed) ────────────▶ Finished(Index)
//!
//! Every failure leaves the current state and its form values untouched.

use std::path::Path;
use std::sync::Arc;

use tracing::{info, warn};

use crate::cv_client::CvParser;
use crate::editor::attachment::Attachment;
use crate::editor::form::{FormField, ProfileForm};
use crate::editor::trigger::Trigger;
use crate::errors::{EditorError, ValidationError};
use crate::links::Navigation;
use crate::store::ProfileStore;

pub const PARSE_SUCCESS_MESSAGE: &str =
    "CV details extracted successfully! Please review the auto-filled fields below.";
pub const EXISTING_CV_LABEL: &str = "CV Attached (Upload new to replace)";
pub const DISCARD_PROMPT: &str = "Are you sure you want to cancel? Unsaved changes will be lost.";

/// Accepted email domains for the locate step.
#[derive(Debug, Clone)]
pub struct EmailPolicy {
    domains: Vec<String>,
}

impl EmailPolicy {
    pub fn new(domains: Vec<String>) -> Self {
        Self { domains }
    }

    /// Trims and lower-cases `raw`, then checks it against the allow-list.
    pub fn normalize(&self, raw: &str) -> Result<String, ValidationError> {
        let email = raw.trim().to_lowercase();
        let accepted = email.split_once('@').map_or(false, |(local, domain)| {
            !local.is_empty() && self.domains.iter().any(|d| d == domain)
        });
        if accepted {
            Ok(email)
        } else {
            Err(ValidationError::EmailDomain {
                allowed: self
                    .domains
                    .iter()
                    .map(|d| format!("@{d}"))
                    .collect::<Vec<_>>()
                    .join(" or "),
            })
        }
    }
}

impl Default for EmailPolicy {
    fn default() -> Self {
        Self::new(vec!["gmail.com".to_string()])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    Create,
    Edit,
}

impl EditorMode {
    pub fn title(self) -> &'static str {
        match self {
            EditorMode::Create => "Create Profile",
            EditorMode::Edit => "Edit Profile",
        }
    }

    pub fn subtitle(self, email: &str) -> String {
        match self {
            EditorMode::Create => format!("Setting up new profile for {email}"),
            EditorMode::Edit => format!("Updating information for {email}"),
        }
    }
}

/// State held while the form is open.
#[derive(Debug, Clone)]
pub struct EditSession {
    pub mode: EditorMode,
    pub form: ProfileForm,
    /// File selected in this session, if any.
    pub attachment: Option<Attachment>,
    pub attachment_label: Option<String>,
}

#[derive(Debug, Clone)]
pub enum EditorState {
    LocateByEmail,
    EditForm(EditSession),
    Finished(Navigation),
}

/// What parse-assist reads from.
#[derive(Debug, Clone)]
pub enum ParseSource {
    Text(String),
    AttachedFile,
}

enum ParseRequest {
    Text(String),
    File {
        file_name: String,
        mime: &'static str,
        bytes: Vec<u8>,
    },
}

pub struct ProfileEditor {
    store: Arc<dyn ProfileStore>,
    parser: Arc<dyn CvParser>,
    policy: EmailPolicy,
    state: EditorState,
    lookup: Trigger,
    parse: Trigger,
    submit: Trigger,
}

impl ProfileEditor {
    pub fn new(store: Arc<dyn ProfileStore>, parser: Arc<dyn CvParser>, policy: EmailPolicy) -> Self {
        Self {
            store,
            parser,
            policy,
            state: EditorState::LocateByEmail,
            lookup: Trigger::new("Checking"),
            parse: Trigger::new("Parsing"),
            submit: Trigger::new("Saving"),
        }
    }

    #[allow(dead_code)]
    pub fn state(&self) -> &EditorState {
        &self.state
    }

    // Busy-state observers for a front end that greys out its buttons
    #[allow(dead_code)]
    pub fn lookup_trigger(&self) -> Trigger {
        self.lookup.clone()
    }

    #[allow(dead_code)]
    pub fn parse_trigger(&self) -> Trigger {
        self.parse.clone()
    }

    #[allow(dead_code)]
    pub fn submit_trigger(&self) -> Trigger {
        self.submit.clone()
    }

    pub fn session(&self) -> Result<&EditSession, EditorError> {
        match &self.state {
            EditorState::EditForm(session) => Ok(session),
            _ => Err(EditorError::WrongState("the profile form is not open")),
        }
    }

    /// The open form, for user edits.
    pub fn form_mut(&mut self) -> Result<&mut ProfileForm, EditorError> {
        Ok(&mut self.session_mut()?.form)
    }

    fn session_mut(&mut self) -> Result<&mut EditSession, EditorError> {
        match &mut self.state {
            EditorState::EditForm(session) => Ok(session),
            _ => Err(EditorError::WrongState("the profile form is not open")),
        }
    }

    /// Step one: validate the email, look it up, open the form.
    /// Found opens Edit mode pre-populated; not found opens Create mode.
    pub async fn locate(&mut self, raw_email: &str) -> Result<EditorMode, EditorError> {
        if !matches!(self.state, EditorState::LocateByEmail) {
            return Err(EditorError::WrongState("the profile form is already open"));
        }
        let email = self.policy.normalize(raw_email)?;
        let _guard = self.lookup.engage()?;

        let found = self
            .store
            .get_by_email(&email)
            .await
            .map_err(EditorError::Lookup)?;

        let session = match found {
            Some(profile) => {
                let form = ProfileForm::from_profile(&email, &profile);
                let attachment_label = form.cv_data.as_ref().map(|_| EXISTING_CV_LABEL.to_string());
                EditSession {
                    mode: EditorMode::Edit,
                    form,
                    attachment: None,
                    attachment_label,
                }
            }
            None => EditSession {
                mode: EditorMode::Create,
                form: ProfileForm::blank(&email),
                attachment: None,
                attachment_label: None,
            },
        };

        let mode = session.mode;
        info!("Editing {email} in {mode:?} mode");
        self.state = EditorState::EditForm(session);
        Ok(mode)
    }

    /// Selects a CV file from disk.
    pub async fn attach_file(&mut self, path: &Path) -> Result<(), EditorError> {
        self.session()?;
        match Attachment::read(path).await {
            Ok(attachment) => self.set_attachment(attachment),
            Err(e) => {
                self.clear_selection()?;
                Err(e)
            }
        }
    }

    /// Selects a CV already in memory (e.g. a dropped file).
    #[allow(dead_code)]
    pub fn attach_bytes(&mut self, file_name: &str, bytes: Vec<u8>) -> Result<(), EditorError> {
        self.session()?;
        match Attachment::from_bytes(file_name, bytes) {
            Ok(attachment) => self.set_attachment(attachment),
            Err(e) => {
                self.clear_selection()?;
                Err(e.into())
            }
        }
    }

    fn set_attachment(&mut self, attachment: Attachment) -> Result<(), EditorError> {
        let session = self.session_mut()?;
        session.form.cv_data = Some(attachment.data_url());
        session.attachment_label = Some(format!("Selected: {}", attachment.file_name));
        session.attachment = Some(attachment);
        Ok(())
    }

    /// Drops the rejected selection. A CV already stored on the profile stays.
    fn clear_selection(&mut self) -> Result<(), EditorError> {
        let session = self.session_mut()?;
        session.attachment = None;
        session.attachment_label = session
            .form
            .cv_data
            .as_ref()
            .map(|_| EXISTING_CV_LABEL.to_string());
        Ok(())
    }

    /// Sends pasted text or the attached file to the parser and fills in the
    /// fields it returned. The parse trigger stays disabled until this returns.
    pub async fn parse_assist(&mut self, source: ParseSource) -> Result<Vec<FormField>, EditorError> {
        let request = {
            let session = self.session()?;
            match source {
                ParseSource::Text(text) => {
                    let text = text.trim();
                    if text.is_empty() {
                        return Err(ValidationError::MissingCvText.into());
                    }
                    ParseRequest::Text(text.to_string())
                }
                ParseSource::AttachedFile => {
                    let attachment = session
                        .attachment
                        .as_ref()
                        .ok_or(ValidationError::MissingCvFile)?;
                    ParseRequest::File {
                        file_name: attachment.file_name.clone(),
                        mime: attachment.kind.mime(),
                        bytes: attachment.bytes.clone(),
                    }
                }
            }
        };

        let _guard = self.parse.engage()?;
        let parser = Arc::clone(&self.parser);
        let parsed = match request {
            ParseRequest::Text(text) => parser.parse_text(&text).await,
            ParseRequest::File {
                file_name,
                mime,
                bytes,
            } => parser.parse_file(&file_name, mime, bytes).await,
        }
        .map_err(|e| {
            warn!("Error parsing CV: {e}");
            EditorError::Parse(e)
        })?;

        let changed = self.session_mut()?.form.apply_parsed(&parsed);
        info!("Parse-assist filled {} fields", changed.len());
        Ok(changed)
    }

    /// Saves the form. Success finishes the workflow on the profile's detail
    /// page; failure keeps the form open as it was.
    pub async fn submit(&mut self) -> Result<Navigation, EditorError> {
        let profile = self.session()?.form.to_profile()?;
        let _guard = self.submit.engage()?;

        self.store
            .upsert(&profile)
            .await
            .map_err(EditorError::Save)?;

        info!("Saved profile {}", profile.email);
        let navigation = Navigation::ProfileDetail {
            email: profile.email,
        };
        self.state = EditorState::Finished(navigation.clone());
        Ok(navigation)
    }

    /// Abandons the workflow when `confirmed`; otherwise nothing changes.
    pub fn discard(&mut self, confirmed: bool) -> Option<Navigation> {
        if !confirmed || matches!(self.state, EditorState::Finished(_)) {
            return None;
        }
        self.state = EditorState::Finished(Navigation::Index);
        Some(Navigation::Index)
    }
}
