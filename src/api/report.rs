use anyhow::{Context, Result, anyhow, bail};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::ReportConfig;
use crate::units::ThaiArea;

const USER_AGENT: &str = concat!("landcal/", env!("CARGO_PKG_VERSION"));

/// Shown to the user whenever the text-generation service cannot be reached
pub const CONNECTION_FAILED_MESSAGE: &str = "เกิดข้อผิดพลาดในการเชื่อมต่อกับ AI";

/// Returned when the service answers but produces no text
pub const EMPTY_REPORT_FALLBACK: &str = "ไม่สามารถสร้างรายงานได้ในขณะนี้";

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

/// Subset of the `generateContent` response the report needs
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateResponse {
    /// Text of the first candidate, all parts concatenated
    fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let text: String = parts.iter().filter_map(|p| p.text.as_deref()).collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

/// Prompt asking for a short Thai-language assessment of the parcel size
pub fn build_prompt(area: &ThaiArea) -> String {
    format!(
        "ฉันมีที่ดินขนาด {} ตารางเมตร\n\
         หรือคิดเป็น {} ไร่ {} งาน {:.2} ตารางวา\n\
         \n\
         ช่วยวิเคราะห์สั้นๆ เกี่ยวกับขนาดของที่ดินนี้ว่า:\n\
         1. เหมาะสำหรับทำอะไรได้บ้างในเชิงเกษตรกรรมหรือที่อยู่อาศัย (สั้นๆ)\n\
         2. เปรียบเทียบขนาดให้เห็นภาพง่ายๆ (เช่น เทียบกับสนามฟุตบอล หรืออื่นๆ)\n\
         \n\
         ตอบเป็นภาษาไทย ให้ดูเป็นมืออาชีพแต่เข้าใจง่าย",
        crate::export::format_number(area.total_sq_meters),
        area.rai,
        area.ngan,
        area.sq_wah
    )
}

fn generate_url(config: &ReportConfig) -> String {
    format!(
        "{}/models/{}:generateContent",
        config.endpoint.trim_end_matches('/'),
        config.model
    )
}

/// Ask the text-generation service for a narrative description of the parcel.
///
/// The area itself is never affected by this call; every failure is returned
/// as an error carrying [`CONNECTION_FAILED_MESSAGE`] for display.
pub fn generate_land_report(area: &ThaiArea, config: &ReportConfig) -> Result<String> {
    request_report(area, config).context(CONNECTION_FAILED_MESSAGE)
}

fn request_report(area: &ThaiArea, config: &ReportConfig) -> Result<String> {
    let api_key = config
        .resolve_api_key()
        .ok_or_else(|| anyhow!("No API key configured (set GEMINI_API_KEY or report.api_key)"))?;

    let prompt = build_prompt(area);
    let body = GenerateRequest {
        contents: vec![Content {
            parts: vec![RequestPart { text: &prompt }],
        }],
    };

    let client = reqwest::blocking::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()
        .context("Failed to create HTTP client")?;

    let url = generate_url(config);
    let attempts = config.max_retries + 1;
    let mut last_error = None;

    for attempt in 0..attempts {
        if attempt > 0 {
            let wait_secs = 2 * attempt as u64;
            log::warn!(
                "Report service busy, retrying in {} seconds (attempt {}/{})",
                wait_secs,
                attempt + 1,
                attempts
            );
            std::thread::sleep(Duration::from_secs(wait_secs));
        }

        log::debug!("POST {} (model {})", url, config.model);
        let response = client
            .post(&url)
            .header("x-goog-api-key", &api_key)
            .json(&body)
            .send()
            .context("Failed to send request to report service")?;

        match response.status().as_u16() {
            200 => {
                let parsed: GenerateResponse = response
                    .json()
                    .context("Failed to parse report service response")?;
                return Ok(parsed
                    .text()
                    .unwrap_or_else(|| EMPTY_REPORT_FALLBACK.to_string()));
            }
            429 | 503 => {
                // 429 = Too Many Requests, 503 = model overloaded
                last_error = Some(format!(
                    "Report service returned status {} (attempt {})",
                    response.status(),
                    attempt + 1
                ));
                continue;
            }
            status => {
                bail!("Report service returned error status: {}", status);
            }
        }
    }

    bail!(
        "Report service failed after {} attempts: {}",
        attempts,
        last_error.unwrap_or_else(|| "Unknown error".to_string())
    )
}
