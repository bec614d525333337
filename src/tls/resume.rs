//! Session resume classification
//!
//! The numeric codes of [`SslResumeState`] are consumed by logging pipelines
//! and must never be renumbered. They are deliberately not sequential.

use std::fmt;

/// How a TLS session was established
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SslResumeState {
    /// Full handshake
    Handshake = 0,
    /// Resumed with a session id
    ResumeSessionId = 1,
    /// Not applicable, never produced by [`classify`]
    NotApplicable = 2,
    /// Resumed with a session ticket
    ResumeTicket = 3,
}

impl SslResumeState {
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(SslResumeState::Handshake),
            1 => Some(SslResumeState::ResumeSessionId),
            2 => Some(SslResumeState::NotApplicable),
            3 => Some(SslResumeState::ResumeTicket),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SslResumeState::Handshake => "HANDSHAKE",
            SslResumeState::ResumeSessionId => "RESUME_SESSION_ID",
            SslResumeState::NotApplicable => "NA",
            SslResumeState::ResumeTicket => "RESUME_TICKET",
        }
    }
}

impl TryFrom<u8> for SslResumeState {
    type Error = u8;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        SslResumeState::from_code(code).ok_or(code)
    }
}

impl fmt::Display for SslResumeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a completed handshake from the two session reuse flags
///
/// `session_id_resumed` is only consulted when the session was reused.
pub fn classify(session_reused: bool, session_id_resumed: bool) -> SslResumeState {
    match (session_reused, session_id_resumed) {
        (false, _) => SslResumeState::Handshake,
        (true, true) => SslResumeState::ResumeSessionId,
        (true, false) => SslResumeState::ResumeTicket,
    }
}

/// A TLS connection that can report whether its session was reused
pub trait SessionResumeSource {
    fn session_reused(&self) -> bool;

    /// Whether the reused session was found by session id (as opposed to a ticket)
    fn session_id_resumed(&self) -> bool;

    fn resume_state(&self) -> SslResumeState {
        classify(self.session_reused(), self.session_id_resumed())
    }
}
