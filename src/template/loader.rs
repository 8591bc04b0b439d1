//! Built-in HTML templates.
//!
//! Templates are compiled into the binary from the `templates/` directory so
//! the server does not depend on its working directory at runtime.

use super::{Result, TemplateEngine};

/// Name and source of every built-in template.
pub const BUILTIN_TEMPLATES: &[(&str, &str)] = &[
    ("header", include_str!("../../templates/header.html")),
    ("footer", include_str!("../../templates/footer.html")),
    ("article_list", include_str!("../../templates/article_list.html")),
    ("article", include_str!("../../templates/article.html")),
    ("new_article", include_str!("../../templates/new_article.html")),
    ("login", include_str!("../../templates/login.html")),
    ("signup", include_str!("../../templates/signup.html")),
    ("error", include_str!("../../templates/error.html")),
];

/// Build an engine with every built-in template parsed.
pub fn builtin_engine() -> Result<TemplateEngine> {
    let mut engine = TemplateEngine::new();
    for (name, source) in BUILTIN_TEMPLATES {
        engine.load(*name, source)?;
    }
    Ok(engine)
}
