//! Wire-level types for the analysis pipeline.
//!
//! `AnalysisResult` and friends mirror the JSON contract the model is asked
//! to return; field names here are the exact wire names, so the structs
//! deserialize a raw model reply directly. Every field defaults so a partial
//! document still parses and the merge layer decides what to keep.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Upload ceiling: 1 GiB, enforced before any encoding work begins.
pub const MAX_UPLOAD_BYTES: u64 = 1024 * 1024 * 1024;

/// Hard cap on sampled frames (1 frame/second for up to an hour of video).
pub const MAX_SAMPLED_FRAMES: usize = 3600;

/// Above this frame count the sampler switches to the low-bandwidth policy.
pub const LONG_VIDEO_FRAME_THRESHOLD: usize = 300;

/// Which remote LLM service a call is routed to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    #[default]
    Gemini,
    OpenAiCompatible,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gemini => "gemini",
            Self::OpenAiCompatible => "openai_compatible",
        }
    }
}

/// A video normalized into a transportable payload.
#[derive(Debug, Clone)]
pub struct VideoPayload {
    /// Base64-encoded video bytes (no data-URI prefix).
    pub base64: String,
    pub mime_type: String,
}

/// One still frame sampled from a video, for the frame-sampling call path.
#[derive(Debug, Clone)]
pub struct SampledFrame {
    pub timestamp_seconds: f64,
    /// `data:image/jpeg;base64,...` URI, ready to embed as an image part.
    pub image_data_uri: String,
}

/// One stage of the four-part narrative structure (hook / turn / hunt / meta).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stage {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub action: String,
}

impl Stage {
    pub fn is_empty(&self) -> bool {
        self.title.trim().is_empty() && self.desc.trim().is_empty() && self.action.trim().is_empty()
    }
}

/// The fixed 4-stage breakdown of a video's persuasive arc.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogicStructure {
    #[serde(default)]
    pub hook: Stage,
    #[serde(default)]
    pub turn: Stage,
    #[serde(default)]
    pub hunt: Stage,
    #[serde(default)]
    pub meta: Stage,
}

/// One point of the pacing line chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PacingPoint {
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub value: f64,
}

/// One axis of the persona radar chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonaPoint {
    #[serde(default)]
    pub subject: String,
    #[serde(rename = "A", default)]
    pub a: f64,
    #[serde(rename = "fullMark", default = "default_full_mark")]
    pub full_mark: f64,
}

fn default_full_mark() -> f64 {
    100.0
}

/// Chart datasets the model returns alongside the narrative structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChartBundle {
    #[serde(default)]
    pub pacing: Vec<PacingPoint>,
    #[serde(default)]
    pub pacing_insight: String,
    #[serde(default)]
    pub persona: Vec<PersonaPoint>,
    #[serde(default)]
    pub persona_traits: Vec<String>,
}

/// One row of the shot-by-shot script table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScriptRow {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub shot: String,
    #[serde(default)]
    pub visual: String,
    #[serde(default)]
    pub ai_prompt: String,
    /// Punctuation-free plain text per the extraction prompt's instruction.
    #[serde(default)]
    pub dialogue: String,
    #[serde(default)]
    pub logic: String,
}

/// Header statistics block inside `meta`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisStats {
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub shots: String,
    #[serde(default)]
    pub emotions: String,
    #[serde(default)]
    pub model: String,
}

/// Video metadata block of the analysis document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisMeta {
    #[serde(default)]
    pub niche: String,
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub deep_analysis: String,
    #[serde(default)]
    pub stats: AnalysisStats,
}

/// The parsed JSON contract an analysis call must satisfy.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(default)]
    pub meta: AnalysisMeta,
    #[serde(default)]
    pub sop_context: String,
    #[serde(default)]
    pub logic_structure: Option<LogicStructure>,
    #[serde(default)]
    pub charts: Option<ChartBundle>,
    #[serde(default)]
    pub script_table: Vec<ScriptRow>,
}

/// One generated SOP step patch: keys `"1"` through `"8"` on the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SopPatch {
    #[serde(default)]
    pub formula: String,
    #[serde(default)]
    pub desc: String,
}

/// The parsed SOP-generation reply, keyed by step number as the model sends it.
pub type SopResult = BTreeMap<String, SopPatch>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_document_parses_with_defaults() {
        let json = r#"{ "script_table": [ { "id": "01", "dialogue": "你好" } ] }"#;
        let result: AnalysisResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.script_table.len(), 1);
        assert_eq!(result.script_table[0].dialogue, "你好");
        assert!(result.logic_structure.is_none());
        assert!(result.charts.is_none());
        assert!(result.meta.niche.is_empty());
    }

    #[test]
    fn persona_point_uses_wire_names() {
        let json = r#"{ "subject": "专业度", "A": 90, "fullMark": 100 }"#;
        let point: PersonaPoint = serde_json::from_str(json).unwrap();
        assert_eq!(point.a, 90.0);
        assert_eq!(point.full_mark, 100.0);

        let back = serde_json::to_value(&point).unwrap();
        assert!(back.get("A").is_some());
        assert!(back.get("fullMark").is_some());
    }

    #[test]
    fn sop_result_keys_are_step_numbers() {
        let json = r#"{ "1": { "formula": "开头", "desc": "钩子" }, "8": { "formula": "结尾", "desc": "呼吁" } }"#;
        let sop: SopResult = serde_json::from_str(json).unwrap();
        assert_eq!(sop.len(), 2);
        assert_eq!(sop["1"].formula, "开头");
        assert_eq!(sop["8"].desc, "呼吁");
    }
}
