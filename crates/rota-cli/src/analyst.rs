//! HTTP analysis collaborator.
//!
//! Talks to a Gemini-style generateContent endpoint over ureq. The
//! [`Analyst`] contract is total: every failure mode — missing API key,
//! transport error, malformed or empty response — collapses into the
//! localized fallback sentence, so the callers never see an error.

use anyhow::{Context, Result, anyhow};
use rota_core::analysis::Analyst;
use rota_core::config::AnalysisConfig;
use rota_core::datekey::DateKey;
use rota_core::locale::Locale;
use serde_json::json;

/// Analyst backed by a Gemini generateContent endpoint.
#[derive(Debug, Clone)]
pub struct GeminiAnalyst {
    config: AnalysisConfig,
    locale: Locale,
}

impl GeminiAnalyst {
    #[must_use]
    pub const fn new(config: AnalysisConfig, locale: Locale) -> Self {
        Self { config, locale }
    }

    fn request(&self, month_label: &str, dates: &[DateKey]) -> Result<String> {
        let key = std::env::var(&self.config.api_key_env)
            .map_err(|_| anyhow!("API key env var {} is not set", self.config.api_key_env))?;

        let url = format!(
            "{}/{}:generateContent",
            self.config.endpoint.trim_end_matches('/'),
            self.config.model
        );
        let prompt = self.locale.analysis_prompt(month_label, dates);

        let response = ureq::post(&url)
            .set("x-goog-api-key", &key)
            .send_json(json!({
                "contents": [{ "parts": [{ "text": prompt }] }]
            }))
            .map_err(|err| anyhow!("analysis request to {url} failed: {err}"))?;

        let body: serde_json::Value = response
            .into_json()
            .context("decode analysis response JSON")?;

        body["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(ToString::to_string)
            .ok_or_else(|| anyhow!("analysis response contained no text"))
    }
}

impl Analyst for GeminiAnalyst {
    fn analyze(&self, month_label: &str, dates: &[DateKey]) -> String {
        match self.request(month_label, dates) {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!("schedule analysis failed, using fallback: {err:#}");
                self.locale.analysis_fallback().to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyst_with_key_env(env: &str) -> GeminiAnalyst {
        let config = AnalysisConfig {
            api_key_env: env.to_string(),
            ..AnalysisConfig::default()
        };
        GeminiAnalyst::new(config, Locale::En)
    }

    #[test]
    fn missing_key_yields_fallback_not_error() {
        let analyst = analyst_with_key_env("ROTA_TEST_KEY_THAT_IS_NEVER_SET");
        let dates = vec!["2024-05-01".parse().expect("key")];
        let text = analyst.analyze("May 2024", &dates);
        assert_eq!(text, Locale::En.analysis_fallback());
    }

    #[test]
    fn localized_fallback_follows_locale() {
        let config = AnalysisConfig {
            api_key_env: "ROTA_TEST_KEY_THAT_IS_NEVER_SET".to_string(),
            ..AnalysisConfig::default()
        };
        let analyst = GeminiAnalyst::new(config, Locale::Tr);
        let dates = vec!["2024-05-01".parse().expect("key")];
        assert_eq!(
            analyst.analyze("Mayıs 2024", &dates),
            Locale::Tr.analysis_fallback()
        );
    }
}
