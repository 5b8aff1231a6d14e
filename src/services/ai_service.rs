use reqwest::Client;

use crate::dto::parse_dto::CandidateDraft;
use crate::error::{Error, Result};

const GEMINI_ENDPOINT: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent";

/// Best-effort email parsing. The output is an untrusted draft: it pre-fills
/// the candidate form and nothing else, and still has to pass the regular
/// save validation gate. Any failure leaves manual entry available.
#[derive(Clone)]
pub struct AiService {
    client: Client,
    api_key: Option<String>,
}

impl AiService {
    pub fn new(api_key: Option<String>, client: Client) -> Self {
        Self { client, api_key }
    }

    pub async fn parse_candidate_email(&self, email_text: &str) -> Result<CandidateDraft> {
        let api_key = self
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| Error::Config("GEMINI_API_KEY is not set".to_string()))?;

        let prompt = build_prompt(email_text);
        let payload = serde_json::json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": { "responseMimeType": "application/json" }
        });

        let response: serde_json::Value = self
            .client
            .post(GEMINI_ENDPOINT)
            .query(&[("key", api_key)])
            .json(&payload)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let text = response["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .ok_or_else(|| Error::Internal("No text returned from model".to_string()))?;
        let draft: CandidateDraft = serde_json::from_str(text)?;
        Ok(draft)
    }
}

fn build_prompt(email_text: &str) -> String {
    format!(
        r#"You are an expert recruitment assistant for Simply Driven Logistics (MVM/SDL), a vehicle logistics company.
Extract candidate information from the unstructured email text provided below.

Context:
- Drivers are self-employed subcontractors.
- Key requirements: Off-road parking, No license points, Financial stability (funding for first 2-4 weeks).
- Email format often ends with "Name's contact details:".

Tasks:
1. Extract basic details (Name, Email, Mobile, Location, Age).
2. Extract specific logistics requirements: Parking Status (Off-road is preferred), License Points.
3. Analyze Financial Status: Can they fund themselves until the first pay run (1st or 16th)?
4. Look for any compliance data if present: NI Number, Driving License Number.

Respond with a single JSON object using these keys, omitting any you cannot
determine: name, email, mobile, age, location, parkingStatus, licensePoints,
experienceSummary, availability, financialStatus, notes, rating (1-5),
niNumber, drivingLicenseNumber.

Email Text:
"""
{email_text}
"""
"#
    )
}
