use std::fmt::Write;

use super::escape;

/// 卡片容器，body 为已渲染好的 HTML
#[derive(Debug, Clone, Default)]
pub struct Card {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub body_html: String,
    pub footer_html: Option<String>,
}

impl Card {
    pub fn new(body_html: impl Into<String>) -> Self {
        Card {
            body_html: body_html.into(),
            ..Card::default()
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn footer(mut self, footer_html: impl Into<String>) -> Self {
        self.footer_html = Some(footer_html.into());
        self
    }

    pub fn render(&self) -> String {
        let mut html = String::from(r#"<div class="card">"#);

        if self.title.is_some() || self.subtitle.is_some() {
            html.push_str(r#"<div class="card__header">"#);
            if let Some(title) = &self.title {
                let _ = write!(html, r#"<h3 class="card__title">{}</h3>"#, escape(title));
            }
            if let Some(subtitle) = &self.subtitle {
                let _ = write!(html, r#"<p class="card__subtitle">{}</p>"#, escape(subtitle));
            }
            html.push_str("</div>");
        }

        let _ = write!(html, r#"<div class="card__body">{}</div>"#, self.body_html);

        if let Some(footer) = &self.footer_html {
            let _ = write!(html, r#"<div class="card__footer">{}</div>"#, footer);
        }

        html.push_str("</div>");
        html
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_card() {
        let html = Card::new("<p>hello</p>").title("Mama's <Kitchen>").render();
        assert!(html.contains(r#"<h3 class="card__title">Mama&#39;s &lt;Kitchen&gt;</h3>"#));
        assert!(html.contains(r#"<div class="card__body"><p>hello</p></div>"#));
        assert!(!html.contains("card__footer"));
    }

    #[test]
    fn test_card_without_header() {
        let html = Card::new("x").footer("<small>f</small>").render();
        assert!(!html.contains("card__header"));
        assert!(html.contains(r#"<div class="card__footer"><small>f</small></div>"#));
    }
}
