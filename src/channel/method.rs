//! Supported method names.

use super::ChannelError;
use std::fmt;
use std::str::FromStr;

/// Channel name the application shell registers the handler under.
pub const CHANNEL_NAME: &str = "unifydesk/network";

/// A method the network channel understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// `isActiveNetworkMetered`: answers with a bare boolean.
    IsActiveNetworkMetered,
    /// `getNetworkStatus`: answers with the full classification.
    GetNetworkStatus,
}

impl Method {
    /// All supported methods.
    pub const ALL: [Self; 2] = [Self::IsActiveNetworkMetered, Self::GetNetworkStatus];

    /// Returns the wire name of this method.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::IsActiveNetworkMetered => "isActiveNetworkMetered",
            Self::GetNetworkStatus => "getNetworkStatus",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Method {
    type Err = ChannelError;

    /// Matches the exact, case-sensitive wire name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.name() == s)
            .ok_or_else(|| ChannelError::NotImplemented {
                method: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_wire_names() {
        assert_eq!(
            "isActiveNetworkMetered".parse::<Method>().unwrap(),
            Method::IsActiveNetworkMetered
        );
        assert_eq!(
            "getNetworkStatus".parse::<Method>().unwrap(),
            Method::GetNetworkStatus
        );
    }

    #[test]
    fn names_are_case_sensitive() {
        assert!(matches!(
            "IsActiveNetworkMetered".parse::<Method>(),
            Err(ChannelError::NotImplemented { .. })
        ));
    }

    #[test]
    fn display_matches_wire_name() {
        for method in Method::ALL {
            assert_eq!(method.to_string().parse::<Method>().unwrap(), method);
        }
    }
}
