//! Mock relay for unit testing.
//!
//! Records every delivered message instead of talking to a server, and can
//! be told to fail like an unreachable relay.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::{MailRelay, OutgoingMail};
use crate::error::RelayError;

/// Mock relay for testing.
#[derive(Debug, Clone, Default)]
pub struct MockRelay {
    sent: Arc<Mutex<Vec<OutgoingMail>>>,
    fail: bool,
}

impl MockRelay {
    /// Create a relay that accepts everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a relay that rejects every message.
    pub fn failing() -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            fail: true,
        }
    }

    /// Messages accepted so far.
    pub fn sent(&self) -> Vec<OutgoingMail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl MailRelay for MockRelay {
    async fn send(&self, mail: OutgoingMail) -> Result<(), RelayError> {
        if self.fail {
            return Err(RelayError::Rejected("mock relay failure".to_string()));
        }
        self.sent.lock().unwrap().push(mail);
        Ok(())
    }
}
