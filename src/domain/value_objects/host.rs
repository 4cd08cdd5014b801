//! Host name parsing
//!
//! A host header (or a candidate domain string) is parsed once into a
//! structured `{label, suffix}` pair against the platform suffix
//! allow-list, and the result is reused by both the resolver and the
//! router.

/// A host that matched a platform-owned suffix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformHost {
    /// First label in front of the suffix (`myblog` in
    /// `myblog.ntando.store`). Empty when the host is the bare suffix.
    pub label: String,
    /// The matched platform suffix (`ntando.store`).
    pub suffix: String,
}

impl PlatformHost {
    /// Parse `host` against `allowed_suffixes`. Returns `None` when the host
    /// does not belong to the platform at all. A trailing `:port` and a
    /// trailing dot are ignored.
    pub fn parse(host: &str, allowed_suffixes: &[String]) -> Option<PlatformHost> {
        let host = host.trim().trim_end_matches('.');
        let host = host.rsplit_once(':').map_or(host, |(name, port)| {
            // Only strip a real port; IPv6 literals keep their colons.
            if port.chars().all(|c| c.is_ascii_digit()) {
                name
            } else {
                host
            }
        });

        if host.is_empty() {
            return None;
        }

        for suffix in allowed_suffixes {
            if host.eq_ignore_ascii_case(suffix) {
                return Some(PlatformHost {
                    label: String::new(),
                    suffix: suffix.clone(),
                });
            }

            let dotted = format!(".{}", suffix);
            if host.len() > dotted.len()
                && host[host.len() - dotted.len()..].eq_ignore_ascii_case(&dotted)
            {
                let prefix = &host[..host.len() - dotted.len()];
                let label = prefix.split('.').next().unwrap_or_default();
                return Some(PlatformHost {
                    label: label.to_string(),
                    suffix: suffix.clone(),
                });
            }
        }

        None
    }

    /// True when there is an actual label in front of the suffix.
    pub fn has_label(&self) -> bool {
        !self.label.is_empty()
    }
}

/// Minimal sanity check for an external custom domain: non-empty, dotted,
/// and restricted to hostname characters so it can be embedded in a URL.
pub fn is_plausible_domain(domain: &str) -> bool {
    let domain = domain.trim();
    !domain.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && domain
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '.'))
}
