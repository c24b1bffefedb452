// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

use thiserror::Error;

use crate::resource::ResourceKind;

/// Result type for console operations.
pub type Result<T> = std::result::Result<T, ConsoleError>;

/// Every error a console operation can report. None of them is fatal: each is scoped to the
/// operation that produced it and leaves the rest of the console usable.
#[derive(Debug, Error, PartialEq)]
pub enum ConsoleError {
    /// Transport or HTTP error while loading a collection.
    #[error("could not fetch {kind}: {reason}")]
    FetchFailed { kind: ResourceKind, reason: String },

    /// A response body was not the structured data we expected.
    #[error("could not decode response: {0}")]
    DecodeFailed(String),

    /// The backend answered `success: false`. The message is shown verbatim.
    #[error("{0}")]
    ActionRejected(String),

    /// Network or HTTP failure while submitting an action.
    #[error("request failed, please try again ({0})")]
    ActionTransportError(String),

    /// A submit was attempted while the previous one is still in flight.
    #[error("a submission is already in progress")]
    DialogBusy,

    /// The dialog is not open.
    #[error("the dialog is not open")]
    DialogClosed,

    /// A reply arrived for a dialog that has nothing in flight.
    #[error("no submission is in flight")]
    NoSubmission,

    /// Context fields are fixed when the dialog opens.
    #[error("field '{0}' is fixed by the dialog context")]
    PinnedField(String),

    #[error("no free stores selected")]
    EmptySelection,
}
