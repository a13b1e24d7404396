use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::errors::ScandeckError;

/// Closed set of tools the API knows about. `Nmap` is the only tool that may
/// run a real process; everything else resolves through the simulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolIdentifier {
    Nmap,
    Sqlmap,
    Burp,
    Metasploit,
    Wireshark,
    Nikto,
    Dirb,
}

impl ToolIdentifier {
    pub const ALL: &'static [ToolIdentifier] = &[
        ToolIdentifier::Nmap,
        ToolIdentifier::Sqlmap,
        ToolIdentifier::Burp,
        ToolIdentifier::Metasploit,
        ToolIdentifier::Wireshark,
        ToolIdentifier::Nikto,
        ToolIdentifier::Dirb,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            ToolIdentifier::Nmap => "nmap",
            ToolIdentifier::Sqlmap => "sqlmap",
            ToolIdentifier::Burp => "burp",
            ToolIdentifier::Metasploit => "metasploit",
            ToolIdentifier::Wireshark => "wireshark",
            ToolIdentifier::Nikto => "nikto",
            ToolIdentifier::Dirb => "dirb",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ToolIdentifier::Nmap => "Nmap",
            ToolIdentifier::Sqlmap => "SQLMap",
            ToolIdentifier::Burp => "Burp Suite",
            ToolIdentifier::Metasploit => "Metasploit Framework",
            ToolIdentifier::Wireshark => "Wireshark",
            ToolIdentifier::Nikto => "Nikto",
            ToolIdentifier::Dirb => "DIRB",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ToolIdentifier::Nmap => "Network exploration and service/version detection",
            ToolIdentifier::Sqlmap => "Automatic SQL injection detection and exploitation",
            ToolIdentifier::Burp => "Web application security testing proxy",
            ToolIdentifier::Metasploit => "Exploitation framework and payload generator",
            ToolIdentifier::Wireshark => "Network protocol analyzer",
            ToolIdentifier::Nikto => "Web server vulnerability scanner",
            ToolIdentifier::Dirb => "Web content and directory brute-forcer",
        }
    }

    /// Tools that only ever resolve through the simulator. Nmap and sqlmap
    /// have dedicated routes and their own execution policy.
    pub fn is_simulation_only(&self) -> bool {
        !matches!(self, ToolIdentifier::Nmap | ToolIdentifier::Sqlmap)
    }

    /// Comma-separated list of supported ids, used in error messages.
    pub fn supported_ids() -> String {
        Self::ALL
            .iter()
            .map(|t| t.id())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for ToolIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ToolIdentifier {
    type Err = ScandeckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "nmap" => Ok(ToolIdentifier::Nmap),
            "sqlmap" => Ok(ToolIdentifier::Sqlmap),
            "burp" => Ok(ToolIdentifier::Burp),
            "metasploit" => Ok(ToolIdentifier::Metasploit),
            "wireshark" => Ok(ToolIdentifier::Wireshark),
            "nikto" => Ok(ToolIdentifier::Nikto),
            "dirb" => Ok(ToolIdentifier::Dirb),
            other => Err(ScandeckError::UnsupportedTool(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ToolInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

/// Catalog served by `GET /scan/tools`.
pub fn catalog() -> Vec<ToolInfo> {
    ToolIdentifier::ALL
        .iter()
        .map(|t| ToolInfo {
            id: t.id(),
            name: t.display_name(),
            description: t.description(),
        })
        .collect()
}
