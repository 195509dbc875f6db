//! Validates a signup form with a chain, a gate and a parallel group
//!
//! Run with: cargo run --example signup --features tracing

use tributary::prelude::*;

#[derive(Debug)]
struct Signup {
    username: String,
    email: String,
    age: u32,
    company: Option<String>,
}

fn username_length(s: &Signup) -> ValidationResult {
    let len = s.username.chars().count();
    if (3..=20).contains(&len) {
        ValidationResult::success()
    } else {
        ValidationResult::failure(
            ValidationError::length("username must have 3 to 20 characters")
                .with_field("username")
                .with_value(len)
                .with_expected("3..=20"),
        )
    }
}

fn email_shape(s: &Signup) -> ValidationResult {
    match s.email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => {
            ValidationResult::success()
        }
        _ => ValidationResult::failure(
            ValidationError::new(codes::EMAIL, "email is malformed")
                .with_field("email")
                .with_value(s.email.as_str()),
        ),
    }
}

fn adult(s: &Signup) -> ValidationResult {
    if s.age >= 18 {
        ValidationResult::success()
    } else {
        ValidationResult::failure(
            ValidationError::range("must be 18 or older")
                .with_field("age")
                .with_value(s.age)
                .with_expected(">= 18"),
        )
    }
}

fn company_name(s: &Signup) -> ValidationResult {
    match s.company.as_deref() {
        Some(name) if !name.trim().is_empty() => ValidationResult::success(),
        _ => ValidationResult::failure(
            ValidationError::required("company accounts need a company name")
                .with_field("company"),
        ),
    }
}

fn rules() -> Chain<Signup> {
    let fields = ParallelGroup::<Signup>::builder()
        .name("fields")
        .add(username_length)
        .add(email_shape)
        .add(adult)
        .build();

    Chain::<Signup>::builder()
        .name("signup")
        .context("form", "signup-v2")
        .add(fields)
        .add(
            Conditional::builder(|s: &Signup| s.email.ends_with(".corp"), company_name)
                .name("corporate-email")
                .build(),
        )
        .build()
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .init();

    let rules = rules();
    let forms = [
        Signup {
            username: "ada".into(),
            email: "ada@example.org".into(),
            age: 36,
            company: None,
        },
        Signup {
            username: "x".into(),
            email: "boss@acme.corp".into(),
            age: 17,
            company: Some("  ".into()),
        },
    ];

    for (i, form) in forms.iter().enumerate() {
        let ctx = Context::new().with_request_id(format!("req-{}", i));
        match rules.validate_with(form, &ctx).into_result() {
            Ok(meta) => tracing::info!(request = i, ?meta, "signup accepted"),
            Err(failure) => tracing::warn!(request = i, "signup rejected: {}", failure),
        }
    }
}
