//! Run with: cargo run --bin agent_smoke
//!
//! Sends a few known questions to a running server under one session and
//! checks each reply for an expected keyword.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::{env, time::Duration, time::Instant};
use uuid::Uuid;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    message: &'a str,
    session_id: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    response: String,
}

struct Case {
    desc: &'static str,
    input: &'static str,
    expected_keyword: Option<&'static str>,
}

const CASES: &[Case] = &[
    Case {
        desc: "Greeting check",
        input: "Hello",
        expected_keyword: None,
    },
    Case {
        desc: "Knowledge check",
        input: "What is the snow plow priority?",
        expected_keyword: Some("priority"),
    },
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let base_url = env::var("SMOKE_BASE_URL").unwrap_or_else(|_| "http://127.0.0.1:8080".to_string());
    let session_id = Uuid::new_v4().to_string();
    let client = Client::new();

    println!("\n🧪 Agent smoke checks against {} (session {})\n", base_url, session_id);

    let mut failures = 0;

    for case in CASES {
        println!("Testing: {}...", case.desc);

        let start = Instant::now();
        let response = client
            .post(format!("{}/chat", base_url))
            .json(&ChatRequest {
                message: case.input,
                session_id: &session_id,
            })
            .send()
            .await?
            .error_for_status()?
            .json::<ChatResponse>()
            .await?;
        let elapsed = start.elapsed().as_millis();

        println!("   Response ({}ms): {}", elapsed, response.response);

        let passed = match case.expected_keyword {
            Some(keyword) => response.response.to_lowercase().contains(&keyword.to_lowercase()),
            None => true,
        };

        if passed {
            println!("   ✓ passed");
        } else {
            failures += 1;
            println!("   ❌ failed: expected '{}'", case.expected_keyword.unwrap_or_default());
        }

        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    println!("\n{} of {} checks passed", CASES.len() - failures, CASES.len());

    if failures > 0 {
        anyhow::bail!("{} smoke check(s) failed", failures);
    }

    Ok(())
}
