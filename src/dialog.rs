// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

use std::{fmt, mem};

use {
    log::{info, warn},
    serde::Deserialize,
};

use crate::{
    backend::BackendError,
    error::{ConsoleError, Result},
    resource::ResourceKind,
};

/// Shown to the operator when a submission never got a usable answer.
pub const TRANSPORT_FAILURE_MESSAGE: &str = "Request failed. Check the connection and submit again.";

/// Shown when the backend rejects a request without saying why.
pub(crate) const REJECTED_WITHOUT_MESSAGE: &str = "The request was rejected.";

/// The administrative actions that go through a dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    /// Prepare unassigned capacity on a store. Context: `host`, `storeId`.
    InitFreeVolume,
    /// Add volumes to a replication group. Context: `groupId`.
    AddVolume,
}

impl ActionKind {
    pub fn path(&self) -> &'static str {
        match self {
            Self::InitFreeVolume => "/addFreeVolume",
            Self::AddVolume => "/addVolume",
        }
    }

    /// The fields the operator fills in, beyond the context the dialog was opened with.
    pub fn operator_fields(&self) -> &'static [&'static str] {
        match self {
            Self::InitFreeVolume => &["bdir", "idir", "n"],
            Self::AddVolume => &["n"],
        }
    }

    /// The collection that a successful submission changes, if any.
    pub fn invalidates(&self) -> Option<ResourceKind> {
        match self {
            Self::InitFreeVolume => None,
            Self::AddVolume => Some(ResourceKind::Group),
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::InitFreeVolume => "init free volume",
                Self::AddVolume => "add volume",
            }
        )
    }
}

/// The key/value form behind an open dialog.
///
/// The first `pinned` entries are the context the dialog was opened with. They go out with the
/// submission verbatim and cannot be changed through `set()`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ActionForm {
    fields: Vec<(String, String)>,
    pinned: usize,
}

impl ActionForm {
    pub fn with_context(context: &[(&str, &str)]) -> Self {
        let mut form = Self::default();
        for (key, value) in context {
            match form.position(key) {
                Some(i) => form.fields[i].1 = value.to_string(),
                None => form.fields.push((key.to_string(), value.to_string())),
            }
        }
        form.pinned = form.fields.len();
        form
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.fields.iter().position(|(k, _)| k == key)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.position(key).map(|i| self.fields[i].1.as_str())
    }

    pub fn is_pinned(&self, key: &str) -> bool {
        matches!(self.position(key), Some(i) if i < self.pinned)
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match self.position(key) {
            Some(i) if i < self.pinned => return Err(ConsoleError::PinnedField(key.to_string())),
            Some(i) => self.fields[i].1 = value.to_string(),
            None => self.fields.push((key.to_string(), value.to_string())),
        }
        Ok(())
    }

    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }
}

/// What the action endpoints answer with.
#[derive(Deserialize, Debug, PartialEq)]
pub struct ActionReply {
    pub success: bool,
    #[serde(default)]
    pub msg: Option<String>,
}

pub fn decode_reply(body: &str) -> Result<ActionReply> {
    serde_json::from_str(body).map_err(|e| ConsoleError::DecodeFailed(format!("action reply: {e}")))
}

/// A request handed out by `ActionDialog::submit()`, to be sent by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub kind: ActionKind,
    pub form: Vec<(String, String)>,
}

impl Submission {
    pub fn path(&self) -> &'static str {
        self.kind.path()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogState {
    Closed,
    Staged,
    Submitting,
}

#[derive(Debug)]
enum Phase {
    Closed,
    Staged {
        form: ActionForm,
        error: Option<String>,
    },
    Submitting {
        form: ActionForm,
    },
}

/// Stages one kind of administrative action and sees it through submission.
///
/// ```text
/// Closed --open--> Staged --submit--> Submitting --success--> Closed
///                    ^                     |
///                    +------failure--------+
/// ```
///
/// A failed submission goes back to `Staged` with the same form and a message for the operator,
/// so they can correct fields and submit again. Nothing is retried automatically, and a submit
/// while another is in flight is refused rather than queued.
#[derive(Debug)]
pub struct ActionDialog {
    kind: ActionKind,
    phase: Phase,
}

impl ActionDialog {
    pub fn new(kind: ActionKind) -> Self {
        ActionDialog {
            kind,
            phase: Phase::Closed,
        }
    }

    pub fn kind(&self) -> ActionKind {
        self.kind
    }

    pub fn state(&self) -> DialogState {
        match self.phase {
            Phase::Closed => DialogState::Closed,
            Phase::Staged { .. } => DialogState::Staged,
            Phase::Submitting { .. } => DialogState::Submitting,
        }
    }

    pub fn form(&self) -> Option<&ActionForm> {
        match &self.phase {
            Phase::Closed => None,
            Phase::Staged { form, .. } | Phase::Submitting { form } => Some(form),
        }
    }

    /// The message left by the last failed submission, if the dialog is showing one.
    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            Phase::Staged { error, .. } => error.as_deref(),
            _ => None,
        }
    }

    /// Open the dialog with a fresh form holding `context`. Opening an already staged dialog
    /// starts over with the new context.
    pub fn open(&mut self, context: &[(&str, &str)]) -> Result<()> {
        if let Phase::Submitting { .. } = self.phase {
            return Err(ConsoleError::DialogBusy);
        }

        self.phase = Phase::Staged {
            form: ActionForm::with_context(context),
            error: None,
        };
        Ok(())
    }

    pub fn set_field(&mut self, key: &str, value: &str) -> Result<()> {
        match &mut self.phase {
            Phase::Closed => Err(ConsoleError::DialogClosed),
            Phase::Submitting { .. } => Err(ConsoleError::DialogBusy),
            Phase::Staged { form, .. } => form.set(key, value),
        }
    }

    /// Move to `Submitting` and hand out the request to send.
    pub fn submit(&mut self) -> Result<Submission> {
        match mem::replace(&mut self.phase, Phase::Closed) {
            Phase::Staged { form, .. } => {
                let submission = Submission {
                    kind: self.kind,
                    form: form.fields().to_vec(),
                };
                info!("submitting {}: {:?}", self.kind, submission.form);
                self.phase = Phase::Submitting { form };
                Ok(submission)
            }
            other => {
                let err = match other {
                    Phase::Submitting { .. } => ConsoleError::DialogBusy,
                    _ => ConsoleError::DialogClosed,
                };
                self.phase = other;
                Err(err)
            }
        }
    }

    /// Apply the backend's answer to the submission in flight.
    ///
    /// On success the dialog closes and the collection to invalidate (if any) is returned. On
    /// any failure the dialog is staged again with its form intact and the error is returned.
    pub fn complete(
        &mut self,
        response: std::result::Result<String, BackendError>,
    ) -> Result<Option<ResourceKind>> {
        let form = match mem::replace(&mut self.phase, Phase::Closed) {
            Phase::Submitting { form } => form,
            other => {
                let err = match other {
                    Phase::Closed => ConsoleError::DialogClosed,
                    _ => ConsoleError::NoSubmission,
                };
                self.phase = other;
                return Err(err);
            }
        };

        let reply = response
            .map_err(|e| ConsoleError::ActionTransportError(e.to_string()))
            .and_then(|body| decode_reply(&body));

        let (err, message) = match reply {
            Ok(ActionReply { success: true, .. }) => {
                info!("{} succeeded", self.kind);
                return Ok(self.kind.invalidates());
            }
            Ok(ActionReply {
                success: false,
                msg,
            }) => {
                let msg = msg.unwrap_or_else(|| REJECTED_WITHOUT_MESSAGE.to_string());
                (ConsoleError::ActionRejected(msg.clone()), msg)
            }
            Err(e) => (e, TRANSPORT_FAILURE_MESSAGE.to_string()),
        };

        warn!("{} failed: {err}", self.kind);
        self.phase = Phase::Staged {
            form,
            error: Some(message),
        };
        Err(err)
    }

    /// Close a staged dialog, dropping its form. An in-flight submission cannot be cancelled.
    pub fn cancel(&mut self) -> Result<()> {
        if let Phase::Submitting { .. } = self.phase {
            return Err(ConsoleError::DialogBusy);
        }
        self.phase = Phase::Closed;
        Ok(())
    }
}
