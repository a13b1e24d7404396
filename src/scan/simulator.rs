use chrono::Utc;

use super::tool::ToolIdentifier;

/// Canned textual reports standing in for real tool output. The target is
/// interpolated into display text only, never into a command.
pub fn simulate(tool: ToolIdentifier, target: &str) -> String {
    let timestamp = Utc::now().to_rfc3339();
    match tool {
        ToolIdentifier::Nmap => nmap_report(target, &timestamp),
        ToolIdentifier::Sqlmap => sqlmap_report(target, &timestamp),
        ToolIdentifier::Burp => format!(
            "Burp Suite scan of {target}\n\
             Started: {timestamp}\n\
             [+] Spidering application... 42 endpoints discovered\n\
             [+] Passive audit: 3 informational issues\n\
             [+] Active audit: no high-severity issues identified\n\
             Scan complete."
        ),
        ToolIdentifier::Metasploit => format!(
            "msf6 > db_nmap {target}\n\
             [*] {timestamp} - Scan initiated\n\
             [*] Auxiliary module scan against {target} completed\n\
             [*] No sessions created (safe-mode enumeration only)\n\
             msf6 > exit"
        ),
        ToolIdentifier::Wireshark => format!(
            "Capture summary for {target}\n\
             Started: {timestamp}\n\
             Packets captured: 1287\n\
             Protocols observed: TCP, TLSv1.3, DNS, HTTP\n\
             No anomalous traffic patterns detected."
        ),
        // Tools without a dedicated template get a generic one-liner.
        other => format!(
            "Simulated {} scan of {} completed at {} with no findings.",
            other.display_name(),
            target,
            timestamp
        ),
    }
}

/// Fixed nmap report. Served in production mode and as the fallback when a
/// development-mode process invocation fails.
fn nmap_report(target: &str, timestamp: &str) -> String {
    format!(
        "Starting Nmap 7.94 ( https://nmap.org ) at {timestamp}\n\
         Nmap scan report for {target}\n\
         Host is up (0.0042s latency).\n\
         Not shown: 997 closed tcp ports (reset)\n\
         PORT    STATE SERVICE VERSION\n\
         22/tcp  open  ssh     OpenSSH 8.9p1 Ubuntu 3ubuntu0.6\n\
         80/tcp  open  http    Apache httpd 2.4.52 ((Ubuntu))\n\
         443/tcp open  https   Apache httpd 2.4.52 ((Ubuntu))\n\
         Service detection performed.\n\
         Nmap done: 1 IP address (1 host up) scanned in 8.31 seconds"
    )
}

fn sqlmap_report(target: &str, timestamp: &str) -> String {
    format!(
        "sqlmap/1.7 - automatic SQL injection tool\n\
         [*] starting @ {timestamp}\n\
         [*] testing connection to the target URL '{target}'\n\
         [*] testing if the target URL content is stable\n\
         [*] testing if GET parameters are dynamic\n\
         [*] heuristic (basic) test shows that GET parameters might not be injectable\n\
         [*] all tested parameters do not appear to be injectable\n\
         [*] ending @ {timestamp}"
    )
}
