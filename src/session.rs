// Copyright 2025 Au-Zone Technologies Inc.
// SPDX-License-Identifier: Apache-2.0

use crate::{Error, Result};

/// Lifecycle shared by every session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum SessionState {
    #[default]
    Closed,
    Open,
}

impl SessionState {
    pub(crate) fn is_open(self) -> bool {
        self == SessionState::Open
    }

    /// Fail with `SessionNotOpen` naming `session` unless open
    pub(crate) fn require_open(self, session: &'static str) -> Result<()> {
        match self {
            SessionState::Open => Ok(()),
            SessionState::Closed => Err(Error::SessionNotOpen(session)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_open() {
        assert!(SessionState::Open.require_open("display").is_ok());
        assert!(matches!(
            SessionState::default().require_open("display"),
            Err(Error::SessionNotOpen("display"))
        ));
    }
}
