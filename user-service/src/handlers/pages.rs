use askama::Template;
use axum::{
    extract::{rejection::FormRejection, Query},
    response::{IntoResponse, Redirect},
    Form, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

const DEFAULT_VISITOR: &str = "Guest";

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate {}

#[derive(Template)]
#[template(path = "about.html")]
pub struct AboutTemplate {}

#[derive(Template)]
#[template(path = "contact.html")]
pub struct ContactTemplate {}

#[derive(Debug, Default, Deserialize)]
pub struct NameQuery {
    pub name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ContactForm {
    pub name: Option<String>,
}

pub async fn home() -> impl IntoResponse {
    HomeTemplate {}
}

pub async fn about() -> impl IntoResponse {
    AboutTemplate {}
}

pub async fn contact_page() -> impl IntoResponse {
    ContactTemplate {}
}

/// POST /contact: hand the visitor's name on to the thank-you page.
pub async fn contact_submit(form: Result<Form<ContactForm>, FormRejection>) -> Redirect {
    let name = form.ok().and_then(|Form(f)| f.name);
    Redirect::to(&thanks_location(name.as_deref()))
}

fn thanks_location(name: Option<&str>) -> String {
    match name.and_then(|n| serde_urlencoded::to_string([("name", n)]).ok()) {
        Some(query) => format!("/thanks?{}", query),
        None => "/thanks".to_string(),
    }
}

pub async fn thanks(Query(query): Query<NameQuery>) -> String {
    let name = query.name.as_deref().unwrap_or(DEFAULT_VISITOR);
    format!("Thank you for your message, {}!", name)
}

pub async fn greet(Query(query): Query<NameQuery>) -> String {
    let name = query.name.as_deref().unwrap_or(DEFAULT_VISITOR);
    format!("Hello, {}!", name)
}

/// GET /api/status
pub async fn status() -> Json<Value> {
    Json(json!({ "status": "active" }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thanks_location_encodes_name() {
        assert_eq!(thanks_location(Some("Ann Lee")), "/thanks?name=Ann+Lee");
        assert_eq!(thanks_location(Some("a&b")), "/thanks?name=a%26b");
        assert_eq!(thanks_location(None), "/thanks");
    }

    #[test]
    fn test_templates_render() {
        assert!(HomeTemplate {}.render().unwrap().contains("<html"));
        assert!(ContactTemplate {}.render().unwrap().contains("name=\"name\""));
    }
}
