//! HTML rendering for the index page

use crate::models::User;

/// Render the users page. Rows appear in the order given.
pub fn render_index(users: &[User]) -> String {
    let mut rows = String::new();
    for user in users {
        rows.push_str(&format!(
            "      <li data-id=\"{}\">{}</li>\n",
            user.id,
            escape_html(&user.name)
        ));
    }

    let body = if users.is_empty() {
        "    <p>No users yet.</p>\n".to_string()
    } else {
        format!("    <ul>\n{}    </ul>\n", rows)
    };

    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         \x20   <meta charset=\"utf-8\">\n\
         \x20   <title>Users</title>\n\
         </head>\n\
         <body>\n\
         \x20   <h1>Users</h1>\n\
         {}\
         </body>\n\
         </html>\n",
        body
    )
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
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

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: i64, name: &str) -> User {
        User {
            id,
            name: name.to_string(),
        }
    }

    #[test]
    fn lists_users_in_order() {
        let html = render_index(&[user(1, "Ada"), user(2, "Grace")]);
        let ada = html.find("Ada").unwrap();
        let grace = html.find("Grace").unwrap();
        assert!(ada < grace);
        assert!(html.contains("<li data-id=\"1\">Ada</li>"));
    }

    #[test]
    fn empty_page() {
        let html = render_index(&[]);
        assert!(html.contains("No users yet."));
        assert!(!html.contains("<li"));
    }

    #[test]
    fn escapes_names() {
        let html = render_index(&[user(1, "<script>alert('x')</script> & co")]);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt; &amp; co"));
    }
}
