use crate::helpers::spawn_app;

fn assert_security_headers(response: &reqwest::Response) {
    let expected = [
        ("strict-transport-security", "max-age=31556926; includeSubDomains"),
        ("x-frame-options", "SAMEORIGIN"),
        ("x-content-type-options", "nosniff"),
        ("content-security-policy", "default-src 'self'; object-src 'none'"),
        ("referrer-policy", "strict-origin-when-cross-origin"),
        ("x-xss-protection", "1; mode=block"),
    ];
    for (name, value) in expected {
        assert_eq!(
            response.headers().get(name).map(|v| v.to_str().unwrap()),
            Some(value),
            "header {} is missing or wrong",
            name
        );
    }
}

#[actix_web::test]
async fn security_headers_are_set_on_successful_responses() {
    let app = spawn_app().await;

    let response = app.get("/health").await;

    assert_eq!(response.status().as_u16(), 200);
    assert_security_headers(&response);
}

#[actix_web::test]
async fn security_headers_are_set_on_error_responses() {
    let app = spawn_app().await;

    let response = app.get("/does-not-exist").await;

    assert_eq!(response.status().as_u16(), 404);
    assert_security_headers(&response);
}
