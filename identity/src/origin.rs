//! Origin allow-listing for the cross-domain postMessage handshake.
//!
//! Both `/check` and `/auth/callback` target their message at an origin the
//! caller names in a query parameter or earlier stored in the session. An
//! unrecognized domain is never rejected; it is clamped to the root domain so
//! the identity payload cannot be posted to an arbitrary origin.

use crate::config::Domains;

/// True when `domain` may receive identity payloads: either the root domain
/// exactly, or a subdomain carrying the configured project suffix. The suffix
/// check is a real suffix match, so `{suffix}.evil.com` does not pass.
pub fn is_allowed_origin(domain: &str, domains: &Domains) -> bool {
    domain == domains.root || domain.ends_with(&domains.project_suffix)
}

/// Clamp a caller-supplied domain to the allow-listed set, falling back to
/// the root domain for anything unrecognized (empty and malformed included).
pub fn clamp_domain<'a>(domain: &'a str, domains: &'a Domains) -> &'a str {
    if is_allowed_origin(domain, domains) {
        domain
    } else {
        &domains.root
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn domains() -> Domains {
        Domains {
            root: "example.com".to_string(),
            identity: "id.example.com".to_string(),
            admin: "admin.example.com".to_string(),
            project_suffix: ".bots.example.com".to_string(),
        }
    }

    #[test]
    fn root_domain_is_allowed() {
        assert!(is_allowed_origin("example.com", &domains()));
    }

    #[test]
    fn project_subdomains_are_allowed() {
        assert!(is_allowed_origin("mybot.bots.example.com", &domains()));
        assert!(is_allowed_origin("a.b.bots.example.com", &domains()));
    }

    #[test]
    fn arbitrary_domains_are_clamped() {
        let d = domains();
        assert_eq!(clamp_domain("evil.com", &d), "example.com");
        assert_eq!(clamp_domain("id.example.com", &d), "example.com");
    }

    #[test]
    fn empty_and_malformed_are_clamped() {
        let d = domains();
        assert_eq!(clamp_domain("", &d), "example.com");
        assert_eq!(clamp_domain("not a domain at all", &d), "example.com");
    }

    #[test]
    fn suffix_as_substring_does_not_pass() {
        let d = domains();
        // contains the suffix but does not end with it
        assert_eq!(
            clamp_domain("x.bots.example.com.evil.com", &d),
            "example.com"
        );
        // shares the textual tail without the dot boundary
        assert!(!is_allowed_origin("evilbots.example.com", &d));
    }

    #[test]
    fn allowed_domains_pass_through_unchanged() {
        let d = domains();
        assert_eq!(clamp_domain("example.com", &d), "example.com");
        assert_eq!(
            clamp_domain("mybot.bots.example.com", &d),
            "mybot.bots.example.com"
        );
    }
}
