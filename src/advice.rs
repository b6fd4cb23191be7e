// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Boundary client for the external generative-text provider. Two request
//! shapes: a narrative spending insight over recent ledger entries, and
//! strict-JSON field extraction from a receipt image. Callers pattern-match
//! the returned `Result` and apply fallbacks; no error from here ever reaches
//! persisted state.

use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

use crate::models::{Category, Transaction};
use crate::utils::http_client;

/// Substituted for the insight text whenever the provider call fails.
pub const INSIGHT_FALLBACK: &str =
    "Review your fixed expenses to find redundancies and optimize cash flow.";

const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

/// Most recent entries serialized into the insight prompt.
const INSIGHT_WINDOW: usize = 15;

#[derive(Debug, Error)]
pub enum AdviceError {
    #[error("advice request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("malformed advice response: {0}")]
    Json(#[from] serde_json::Error),
    #[error("advice response carried no text")]
    EmptyResponse,
    #[error("receipt extraction returned no usable amount")]
    MissingAmount,
}

/// Fields pulled out of a receipt image. `description` stays `None` when the
/// provider omitted it; the category is constrained to the closed enumeration
/// with `Other` as the fallback.
#[derive(Debug, Clone, PartialEq)]
pub struct ReceiptFields {
    pub amount: Decimal,
    pub description: Option<String>,
    pub category: Category,
}

pub struct AdviceClient {
    endpoint: String,
    model: String,
    api_key: String,
    http: reqwest::blocking::Client,
}

impl AdviceClient {
    /// Client against the default provider endpoint, keyed from the
    /// `GEMINI_API_KEY` environment variable (empty when unset; the provider
    /// rejects the call and the caller falls back).
    pub fn from_env() -> Result<AdviceClient, AdviceError> {
        let api_key = std::env::var("GEMINI_API_KEY").unwrap_or_default();
        Self::new(DEFAULT_ENDPOINT, DEFAULT_MODEL, api_key)
    }

    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<AdviceClient, AdviceError> {
        Ok(AdviceClient {
            endpoint: endpoint.into(),
            model: model.into(),
            api_key: api_key.into(),
            http: http_client()?,
        })
    }

    /// One completion round-trip: POST the parts, pull the first candidate's
    /// text out of the response.
    fn generate(&self, parts: serde_json::Value) -> Result<String, AdviceError> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        );
        let body = json!({ "contents": [{ "parts": parts }] });
        let resp = self
            .http
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()?
            .error_for_status()?;
        let parsed: GenerateResponse = resp.json()?;
        parsed
            .candidates
            .into_iter()
            .flat_map(|c| c.content.parts)
            .find_map(|p| p.text)
            .ok_or(AdviceError::EmptyResponse)
    }

    /// Narrative insight over the most recent ledger entries. The caller owns
    /// the fallback; see [`INSIGHT_FALLBACK`].
    pub fn generate_insight(&self, txs: &[Transaction]) -> Result<String, AdviceError> {
        let prompt = insight_prompt(txs)?;
        self.generate(json!([{ "text": prompt }]))
    }

    /// Receipt-image field extraction. The image is a base64 payload without
    /// any data-URL prefix.
    pub fn extract_receipt(&self, image_base64: &str) -> Result<ReceiptFields, AdviceError> {
        let text = self.generate(json!([
            { "inlineData": { "mimeType": "image/jpeg", "data": image_base64 } },
            { "text": RECEIPT_INSTRUCTION }
        ]))?;
        parse_receipt_response(&text)
    }
}

const RECEIPT_INSTRUCTION: &str = "Extract from the receipt: amount (number only), description, \
     category (Food, Shopping, Transport, Utilities, Housing, Entertainment, Other). \
     Return strictly as JSON.";

/// Instruction template for the narrative insight; serializes the most recent
/// entries (the ledger is most-recent-first) as structured data.
pub fn insight_prompt(txs: &[Transaction]) -> Result<String, AdviceError> {
    let window = &txs[..txs.len().min(INSIGHT_WINDOW)];
    let serialized = serde_json::to_string(window)?;
    Ok(format!(
        "Objectively analyze these expenses: {serialized}. Provide a practical strategy to save \
         10% next cycle. Answer in a professional, direct tone, 20 words maximum."
    ))
}

/// Strict parse of the provider's receipt JSON. A missing or non-positive
/// amount is an error; the record is dropped, never defaulted. Unknown or
/// missing categories fall back to `Other`.
pub fn parse_receipt_response(text: &str) -> Result<ReceiptFields, AdviceError> {
    let raw: RawReceipt = serde_json::from_str(text.trim())?;
    let amount = match raw.amount {
        Some(a) if a > Decimal::ZERO => a,
        _ => return Err(AdviceError::MissingAmount),
    };
    let category = raw
        .category
        .as_deref()
        .and_then(|s| s.parse::<Category>().ok())
        .unwrap_or(Category::Other);
    let description = raw.description.filter(|d| !d.trim().is_empty());
    Ok(ReceiptFields {
        amount,
        description,
        category,
    })
}

#[derive(Debug, Deserialize)]
struct RawReceipt {
    amount: Option<Decimal>,
    description: Option<String>,
    category: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}
