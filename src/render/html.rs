// HTML renderer
// One page layout; the main block varies per outcome. Every interpolated value is escaped.

use std::fmt::Write;

use super::context::{BasicsContext, ContactMethodContext, PageContext};
use super::DomainResult;

const STYLE: &str = "body{font-family:sans-serif;max-width:48rem;margin:0 auto;padding:1rem}\
footer{border-top:1px solid #ccc;margin-top:2rem;color:#555}";

pub fn render(result: &DomainResult<'_>, context: &PageContext<'_>) -> String {
    let enterprise_name = context.basics.as_ref().map(|basics| basics.enterprise.name);

    let (title, main_content) = match result {
        DomainResult::Cover { .. } | DomainResult::Basics { .. } => (
            enterprise_name.unwrap_or_default().to_string(),
            section_content(context),
        ),
        DomainResult::NotFound { path, .. } => (
            format!("{} | 404", enterprise_name.unwrap_or_default()),
            format!(
                "<h2>404 Not Found</h2>\n<p>Resource {} not found.</p>",
                escape_html(&format!("\"{path}\""))
            ),
        ),
        DomainResult::UnexpectedException { .. } => (
            format!("{} | 500", enterprise_name.unwrap_or("Error")),
            format!(
                "<h2>500 Internal Server Error</h2>\n<p>{}</p>",
                escape_html(context.error.as_deref().unwrap_or_default())
            ),
        ),
    };

    page(&title, context.basics.as_ref(), &main_content)
}

fn section_content(context: &PageContext<'_>) -> String {
    context.section.as_ref().map_or_else(String::new, |section| {
        format!(
            "<section>\n<h2>{}</h2>\n<p>{}</p>\n</section>",
            escape_html(section.title),
            escape_html(section.body)
        )
    })
}

fn page(title: &str, basics: Option<&BasicsContext<'_>>, content: &str) -> String {
    let mut html = format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{}</title>
    <style>{STYLE}</style>
</head>
<body>
"#,
        escape_html(title)
    );

    // Writing into a String cannot fail
    if let Some(basics) = basics {
        let _ = writeln!(html, "<header><h1>{}</h1></header>", escape_html(basics.enterprise.name));
    }
    let _ = writeln!(html, "<main>\n{content}\n</main>");
    if let Some(basics) = basics {
        if let ContactMethodContext::Recognized {
            display_name,
            value,
            ..
        } = basics.contact_method
        {
            let _ = writeln!(
                html,
                "<footer><p>{}: {}</p></footer>",
                escape_html(display_name),
                escape_html(value)
            );
        }
    }
    html.push_str("</body>\n</html>\n");
    html
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
