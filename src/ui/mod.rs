//! 无状态的 HTML 片段渲染
//!
//! 组件只依赖传入的属性，没有网络调用，也不持有状态。

pub mod card;
pub mod form;
pub mod pages;
pub mod trust_badge;

pub use card::Card;
pub use form::{InputField, SelectField, SelectOption, TextAreaField};
pub use trust_badge::{BadgeSize, TrustBadge, TrustLevel};

/// 转义 HTML 文本和属性值
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::escape;

    #[test]
    fn test_escape() {
        assert_eq!(escape("plain"), "plain");
        assert_eq!(
            escape(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
        );
    }
}
