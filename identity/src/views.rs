//! Minimal HTML documents that carry the identity payload across origins.
//!
//! The check frame is loaded in a hidden iframe by any participating
//! subdomain and posts the public user to `window.parent`; the login frame is
//! served at the end of the OAuth callback and posts to `window.opener`
//! before closing itself. Both target a single explicit origin; callers must
//! clamp the domain first (see [`crate::origin`]).

/// Frame served by `/auth/callback` on success
pub fn login_frame_html(user_json: &str, target_origin: &str) -> String {
    format!(
        "<!DOCTYPE html><html><head><script>window.opener.postMessage({{user:{}}},\"{}\");window.close();</script></head></html>",
        user_json, target_origin
    )
}

/// Frame served by `/check` for a logged-in session
pub fn check_frame_html(user_json: &str, target_origin: &str, project_suffix: &str) -> String {
    format!(
        "<!DOCTYPE html><html><head><script>window.onload=function(){{window.parent.postMessage({{user:{}}},\"{}\");window.addEventListener(\"message\",function(evt){{if (evt.origin.endsWith(\"{}\")) {{if(evt.data.logout==\"bye\"){{console.log(\"logging out\");}}}}}});}}</script></head></html>",
        user_json, target_origin, project_suffix
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_frame_targets_opener_at_the_given_origin() {
        let html = login_frame_html("{\"id\":\"x\"}", "https://example.com");
        assert!(html.contains("window.opener.postMessage({user:{\"id\":\"x\"}},\"https://example.com\")"));
        assert!(html.contains("window.close()"));
    }

    #[test]
    fn check_frame_targets_parent_at_the_given_origin() {
        let html = check_frame_html("{\"id\":\"x\"}", "https://mybot.bots.example.com", ".bots.example.com");
        assert!(html
            .contains("window.parent.postMessage({user:{\"id\":\"x\"}},\"https://mybot.bots.example.com\")"));
        assert!(html.contains("evt.origin.endsWith(\".bots.example.com\")"));
    }
}
