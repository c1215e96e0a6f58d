//! 由基础组件拼装的页面片段

use super::{Card, InputField, SelectField, SelectOption, TextAreaField};
use crate::ids::BusinessId;
use crate::schema::message::MAX_BODY_LEN;
use crate::schema::rating::{MAX_RATING, MIN_RATING};

fn form(action: &str, fields: &[String], submit: &str) -> String {
    format!(
        r#"<form method="post" action="{}">{}<button type="submit">{}</button></form>"#,
        action,
        fields.concat(),
        submit
    )
}

/// 联系商家表单，提交到留言接口
pub fn contact_form(business_id: BusinessId) -> String {
    let fields = [
        InputField::new("senderName", "Your name").required().render(),
        InputField::new("senderEmail", "Email").input_type("email").required().render(),
        InputField::new("senderPhone", "Phone").input_type("tel").render(),
        InputField::new("subject", "Subject").render(),
        TextAreaField::new("body", "Message")
            .rows(6)
            .max_length(MAX_BODY_LEN)
            .required()
            .render(),
    ];
    let action = format!("/api/businesses/{}/messages", business_id);

    Card::new(form(&action, &fields, "Send message"))
        .title("Contact this business")
        .render()
}

/// 评分表单
pub fn rating_form(business_id: BusinessId) -> String {
    let options = (MIN_RATING..=MAX_RATING)
        .rev()
        .map(|n| {
            let label = if n == 1 { "1 star".to_string() } else { format!("{} stars", n) };
            SelectOption::new(n.to_string(), label)
        })
        .collect();

    let fields = [
        SelectField::new("rating", "Rating", options)
            .placeholder("Choose a rating")
            .required()
            .render(),
        TextAreaField::new("comment", "Comment").max_length(1000).render(),
    ];
    let action = format!("/api/businesses/{}/ratings", business_id);

    Card::new(form(&action, &fields, "Submit rating"))
        .title("Rate this business")
        .render()
}
