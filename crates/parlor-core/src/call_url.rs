//! Call-URL retrieval and sharing flow.
//!
//! A small request state machine (`Idle → Pending → {Resolved, Failed}`)
//! over an opaque external client, plus the sharing paths. Sharing performs
//! its primary host effect every time (clipboard copy, mail compose), while
//! the "expiry noted" and telemetry effects are latched through a
//! [`OneShotGuard`] keyed by the URL's expiry, so repeated shares of the
//! same URL are counted once. A fresh URL carries a fresh expiry and is
//! eligible again.
//!
//! Retry is a caller responsibility; the flow stays `Failed` until a new
//! request is issued.

use std::rc::Rc;

use crate::guard::OneShotGuard;
use crate::host::{HostApi, HostError, TELEMETRY_CALL_URL_SHARED};
use crate::notify::Notifications;

/// Message key raised when call-URL retrieval fails.
const NOTICE_UNABLE_RETRIEVE_URL: &str = "unable-retrieve-url";

/// Message key used as the subject when sharing a call URL by email.
const SHARE_EMAIL_SUBJECT: &str = "share-call-email-subject";

/// A retrieved call URL and its expiry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallUrlInfo {
    /// Shareable call URL.
    pub call_url: String,
    /// Expiry timestamp, seconds since the epoch.
    pub expires_at: u64,
}

/// Phase of the call-URL request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallUrlState {
    /// No request issued yet.
    Idle,
    /// Request in flight.
    Pending,
    /// URL retrieved. Terminal until a new request is issued.
    Resolved(CallUrlInfo),
    /// Retrieval failed. Terminal until a new request is issued.
    Failed,
}

/// Opaque external client performing the call-URL fetch.
///
/// The call only initiates the request; the caller feeds the outcome back
/// through [`CallUrlFlow::resolve`] or [`CallUrlFlow::fail`] on its own
/// turn.
pub trait CallUrlClient {
    /// Start fetching a call URL issued under the given nickname.
    fn request_call_url(&self, nickname: &str);
}

/// Call-URL retrieval and sharing state machine.
pub struct CallUrlFlow {
    host: Rc<dyn HostApi>,
    state: CallUrlState,
    shared: OneShotGuard<u64>,
    notifications: Notifications,
}

impl CallUrlFlow {
    /// Create an idle flow over the injected host.
    pub fn new(host: Rc<dyn HostApi>) -> Self {
        Self {
            host,
            state: CallUrlState::Idle,
            shared: OneShotGuard::new(),
            notifications: Notifications::new(),
        }
    }

    /// Current request phase.
    pub fn state(&self) -> &CallUrlState {
        &self.state
    }

    /// Notifications raised by this flow, oldest first.
    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    /// Drain previously raised notifications.
    pub fn clear_notifications(&mut self) {
        self.notifications.clear();
    }

    /// Issue a new request through the external client and enter `Pending`.
    pub fn request(&mut self, client: &dyn CallUrlClient, nickname: &str) {
        client.request_call_url(nickname);
        self.state = CallUrlState::Pending;
    }

    /// Apply a successful retrieval.
    ///
    /// Ignored with a warning unless a request is pending; a stale
    /// completion must not clobber a newer phase.
    pub fn resolve(&mut self, info: CallUrlInfo) {
        if self.state != CallUrlState::Pending {
            tracing::warn!(state = ?self.state, "dropping call URL resolution without request");
            return;
        }
        self.state = CallUrlState::Resolved(info);
    }

    /// Apply a failed retrieval and raise a user-facing notification.
    pub fn fail(&mut self, error: &HostError) {
        if self.state != CallUrlState::Pending {
            tracing::warn!(state = ?self.state, %error, "dropping call URL failure without request");
            return;
        }
        tracing::warn!(%error, "call URL retrieval failed");
        self.state = CallUrlState::Failed;
        self.notifications.error(NOTICE_UNABLE_RETRIEVE_URL);
    }

    /// Copy the resolved URL to the clipboard.
    ///
    /// The copy happens on every call; the expiry note and telemetry record
    /// fire once per expiry key.
    pub fn copy_url(&mut self) {
        let Some((url, expires_at)) = self.resolved() else {
            return;
        };
        self.host.copy_string(&url);
        self.note_shared(expires_at);
    }

    /// Share the resolved URL through the mail composer.
    ///
    /// The compose happens on every call; the one-shot effects fire once per
    /// expiry key.
    pub fn email_url(&mut self) {
        let Some((url, expires_at)) = self.resolved() else {
            return;
        };
        self.host.compose_email(SHARE_EMAIL_SUBJECT, &url);
        self.note_shared(expires_at);
    }

    /// Record a manual copy of the URL field.
    ///
    /// The clipboard write already happened outside the panel; only the
    /// one-shot effects apply.
    pub fn note_manual_copy(&mut self) {
        let Some((_, expires_at)) = self.resolved() else {
            return;
        };
        self.note_shared(expires_at);
    }

    fn resolved(&self) -> Option<(String, u64)> {
        match &self.state {
            CallUrlState::Resolved(info) => Some((info.call_url.clone(), info.expires_at)),
            state => {
                tracing::warn!(state = ?state, "share requested without a resolved call URL");
                None
            },
        }
    }

    fn note_shared(&mut self, expires_at: u64) {
        if !self.shared.attempt(expires_at) {
            return;
        }
        self.host.note_call_url_expiry(expires_at);
        self.host.telemetry_add(TELEMETRY_CALL_URL_SHARED, true);
    }
}
