//! Server-rendered pages.
//!
//! Pages are assembled from format! fragments: a shared head, the nav bar
//! (project links plus login state) and a per-page body. Project fields come
//! from operator-supplied CSV/database rows, so text lands in the markup
//! through [`escape_html`].

use std::sync::Arc;

use showcase_identity::PublicUser;

use crate::config::Config;
use crate::projects::ProjectItem;

/// Minimal HTML text escaping for interpolated content
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn project_url(config: &Config, project: &ProjectItem) -> String {
    format!(
        "{}://{}{}",
        config.identity.protocol, project.code, config.identity.domains.project_suffix
    )
}

fn head_html(config: &Config, title: &str) -> String {
    format!(
        "<meta charset=\"utf-8\"><meta name=\"viewport\" content=\"width=device-width, initial-scale=1\"><title>{}</title><link rel=\"stylesheet\" href=\"{}://{}/assets/style.css\">",
        escape_html(title),
        config.identity.protocol,
        config.identity.domains.root
    )
}

fn nav_html(config: &Config, user: Option<&PublicUser>, projects: &[Arc<ProjectItem>]) -> String {
    let root_origin = config.identity.origin(&config.identity.domains.root);
    let id_origin = config.identity.origin(&config.identity.domains.identity);

    let mut project_links = String::new();
    for project in projects {
        project_links.push_str(&format!(
            "<a class=\"nav-project\" href=\"{}\">{}</a>",
            project_url(config, project),
            escape_html(&project.name)
        ));
    }

    let user_html = match user {
        Some(user) => format!(
            "<span id=\"nav-user\"><img class=\"nav-avatar\" src=\"{}\" alt=\"\">{}{}</span> <a href=\"/logout\">Logout</a>",
            escape_html(&user.avatar),
            escape_html(&user.username),
            if user.admin { " (admin)" } else { "" }
        ),
        None => {
            // the callback frame posts back to window.opener, so login runs
            // in a popup rather than a plain navigation
            "<span id=\"nav-user\"></span> <a href=\"/login\" onclick=\"window.open(this.href,'login','width=500,height=700');return false\">Login</a>".to_string()
        }
    };

    format!(
        r#"<nav class="navbar">
<a class="nav-brand" href="{root_origin}">{title}</a>
{project_links}
<span class="nav-spacer"></span>
{user_html}
</nav>
<iframe id="id-check" src="" style="display:none"></iframe>
<script>
(function() {{
  var frame = document.getElementById("id-check");
  frame.src = "{id_origin}/check?parent=" + window.location.hostname;
  window.addEventListener("message", function(evt) {{
    if (!evt.origin.endsWith("{id_domain}")) return;
    if (evt.data && evt.data.user) {{
      var el = document.getElementById("nav-user");
      if (el && !el.textContent) el.textContent = evt.data.user.username;
    }}
  }});
}})();
</script>"#,
        root_origin = root_origin,
        title = escape_html(&config.site.title),
        project_links = project_links,
        user_html = user_html,
        id_origin = id_origin,
        id_domain = config.identity.domains.identity,
    )
}

/// Full page shell: head + nav + body
pub fn page_html(
    config: &Config,
    title: &str,
    user: Option<&PublicUser>,
    projects: &[Arc<ProjectItem>],
    body: &str,
) -> String {
    format!(
        "<!DOCTYPE html><html><head>{}</head><body class=\"bg-dark\">{}{}</body></html>",
        head_html(config, title),
        nav_html(config, user, projects),
        body
    )
}

pub fn index_body(config: &Config, projects: &[Arc<ProjectItem>]) -> String {
    let mut cards = String::new();
    for project in projects {
        cards.push_str(&format!(
            r#"<div class="project-card">
<a href="{url}"><img src="{url}/assets/logo.png" alt="{alt}"></a>
<h2><a href="/bots/{code}">{name}</a></h2>
<p class="sub-text">{sub}</p>
</div>"#,
            url = project_url(config, project),
            alt = escape_html(&project.image_alt),
            code = escape_html(&project.code),
            name = escape_html(&project.name),
            sub = escape_html(&project.sub_text),
        ));
    }
    format!("<main class=\"project-grid\">{}</main>", cards)
}

pub fn project_body(config: &Config, project: &ProjectItem) -> String {
    let url = project_url(config, project);
    let mut links = String::new();
    if !project.invite.is_empty() {
        links.push_str(&format!("<a class=\"btn\" href=\"{}/invite\">Invite</a>", url));
    }
    if !project.notion.is_empty() {
        links.push_str(&format!("<a class=\"btn\" href=\"{}/notion\">Notion</a>", url));
    }
    if !project.github.is_empty() {
        links.push_str(&format!("<a class=\"btn\" href=\"{}/github\">GitHub</a>", url));
    }
    format!(
        r#"<main class="project-page">
<img class="banner" src="{url}/assets/banner.png" alt="{alt}">
<h1>{name}</h1>
<p class="sub-text">{sub}</p>
<p>{description}</p>
{links}
</main>"#,
        url = url,
        alt = escape_html(&project.image_alt),
        name = escape_html(&project.name),
        sub = escape_html(&project.sub_text),
        description = escape_html(&project.description),
        links = links,
    )
}

pub fn about_body() -> String {
    r#"<main class="about-page">
<h1>About</h1>
<p>A small showcase of community-built Discord bots. Each project has its own
subdomain with invite, documentation and source links.</p>
</main>"#
        .to_string()
}

pub fn admin_body(user: Option<&PublicUser>) -> String {
    let status = match user {
        Some(user) if user.admin => format!("Signed in as {}.", escape_html(&user.username)),
        Some(user) => format!(
            "Signed in as {}, but not an admin.",
            escape_html(&user.username)
        ),
        None => "Not signed in.".to_string(),
    };
    format!(
        "<main class=\"admin-page\"><h1>Admin</h1><p>{}</p></main>",
        status
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_html_covers_markup_characters() {
        assert_eq!(
            escape_html("<script>alert(\"x&y's\")</script>"),
            "&lt;script&gt;alert(&quot;x&amp;y&#39;s&quot;)&lt;/script&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn project_names_are_escaped_in_pages() {
        let config = Config::default();
        let project = ProjectItem {
            code: "evil".to_string(),
            name: "<b>bold</b>".to_string(),
            ..ProjectItem::default()
        };
        let body = project_body(&config, &project);
        assert!(body.contains("&lt;b&gt;bold&lt;/b&gt;"));
        assert!(!body.contains("<b>bold</b>"));
    }

    #[test]
    fn nav_links_projects_to_their_subdomains() {
        let config = Config::default();
        let projects = vec![Arc::new(ProjectItem {
            code: "mybot".to_string(),
            name: "My Bot".to_string(),
            ..ProjectItem::default()
        })];
        let html = nav_html(&config, None, &projects);
        assert!(html.contains("https://mybot.bots.example.com"));
        assert!(html.contains(">My Bot</a>"));
        assert!(html.contains("/check?parent="));
    }
}
