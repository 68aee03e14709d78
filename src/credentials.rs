//! Device credential sets.
//!
//! A credential set is polymorphic over the two access styles: a CLI account
//! for Telnet/SSH drivers and a community for SNMP drivers. The dispatcher
//! picks the variant matching the driver's declared protocol and refuses to
//! guess when they disagree. Secret material stays behind [`SecretString`],
//! so `Debug` output is always redacted.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Account for command-line access (Telnet or SSH).
#[derive(Debug, Clone)]
pub struct CliAccount {
    username: String,
    password: SecretString,
    super_password: Option<SecretString>,
}

impl CliAccount {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: SecretString::from(password.into()),
            super_password: None,
        }
    }

    /// Attach an enable/super secret for privilege escalation.
    pub fn with_super_password(mut self, super_password: impl Into<String>) -> Self {
        self.super_password = Some(SecretString::from(super_password.into()));
        self
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        self.password.expose_secret()
    }

    pub fn super_password(&self) -> Option<&str> {
        self.super_password.as_ref().map(|s| s.expose_secret())
    }
}

/// SNMP protocol version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SnmpVersion {
    V1,
    V2c,
    V3,
}

/// SNMP community credentials.
#[derive(Debug, Clone)]
pub struct SnmpCommunity {
    community: SecretString,
    version: SnmpVersion,
}

impl SnmpCommunity {
    pub fn new(community: impl Into<String>, version: SnmpVersion) -> Self {
        Self {
            community: SecretString::from(community.into()),
            version,
        }
    }

    pub fn community(&self) -> &str {
        self.community.expose_secret()
    }

    pub fn version(&self) -> SnmpVersion {
        self.version
    }
}

/// The credential set lent to a diagnostic run.
#[derive(Debug, Clone)]
pub enum CredentialSet {
    Cli(CliAccount),
    Snmp(SnmpCommunity),
}

impl CredentialSet {
    pub fn is_cli(&self) -> bool {
        matches!(self, CredentialSet::Cli(_))
    }

    pub fn is_snmp(&self) -> bool {
        matches!(self, CredentialSet::Snmp(_))
    }

    /// Short label for log and error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            CredentialSet::Cli(_) => "CLI",
            CredentialSet::Snmp(_) => "SNMP",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_account_accessors() {
        let account = CliAccount::new("admin", "secret").with_super_password("enable");
        assert_eq!(account.username(), "admin");
        assert_eq!(account.password(), "secret");
        assert_eq!(account.super_password(), Some("enable"));
    }

    #[test]
    fn test_debug_output_is_redacted() {
        let account = CliAccount::new("admin", "hunter2");
        let debug = format!("{account:?}");
        assert!(!debug.contains("hunter2"));

        let community = SnmpCommunity::new("private", SnmpVersion::V2c);
        let debug = format!("{community:?}");
        assert!(!debug.contains("private"));
    }

    #[test]
    fn test_credential_kind() {
        let cli = CredentialSet::Cli(CliAccount::new("admin", "secret"));
        let snmp = CredentialSet::Snmp(SnmpCommunity::new("public", SnmpVersion::V2c));
        assert!(cli.is_cli());
        assert!(!cli.is_snmp());
        assert_eq!(cli.kind(), "CLI");
        assert_eq!(snmp.kind(), "SNMP");
    }
}
