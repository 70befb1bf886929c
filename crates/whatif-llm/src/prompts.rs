//! Prompt construction for counterfactual analyses.
//!
//! [`AnalysisMode::Standard`] hands the model the ontology facts for the
//! disabled control and asks for a structured answer. [`AnalysisMode::Challenge`]
//! withholds those facts and invites speculation across every threat, so its
//! answers tend to name unrelated threats and exercise the validator.

use std::fmt;

use serde::{Deserialize, Serialize};
use whatif_core::errors::CoreError;
use whatif_core::reports::ExpectedImpact;
use whatif_engine::KnowledgeBase;

use crate::types::ChatMessage;

const STANDARD_SYSTEM_PROMPT: &str = "You are a cybersecurity risk analyst. Given information about a control being disabled, \
analyze the cascading impacts on the organization's security posture. Be specific and actionable.
Structure your response with clear sections but keep it concise (under 300 words).";

const CHALLENGE_SYSTEM_PROMPT: &str = "You are a cybersecurity risk analyst. Analyze the impact of disabling a security control.
Be comprehensive and consider ALL possible ways this could affect the organization's security.
Think broadly about interconnected risks, since security is a holistic system where everything connects.";

const REQUESTED_SECTIONS: &str = "Provide:
1. IMMEDIATE RISK INCREASE - What specific attack scenarios become more likely?
2. CASCADING EFFECTS - How could a successful attack spread through the organization?
3. COMPENSATING MEASURES - What should be done immediately to reduce exposure?
4. RISK RATING CHANGE - Qualitative assessment (Low→Medium→High→Critical)";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisMode {
    #[default]
    Standard,
    Challenge,
}

impl AnalysisMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Challenge => "challenge",
        }
    }
}

impl fmt::Display for AnalysisMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Serialize)]
struct ThreatContext<'a> {
    remaining_controls: &'a [String],
    target_assets: &'a [String],
}

/// System and user messages for one analysis request.
///
/// # Errors
///
/// Returns [`CoreError::NotFound`] if `expected` names a control or threat
/// that is not in `kb`.
pub fn build_messages(
    kb: &KnowledgeBase,
    expected: &ExpectedImpact,
    mode: AnalysisMode,
) -> Result<Vec<ChatMessage>, CoreError> {
    let messages = match mode {
        AnalysisMode::Standard => vec![
            ChatMessage::system(STANDARD_SYSTEM_PROMPT),
            ChatMessage::user(standard_user_prompt(kb, expected)?),
        ],
        AnalysisMode::Challenge => vec![
            ChatMessage::system(CHALLENGE_SYSTEM_PROMPT),
            ChatMessage::user(challenge_user_prompt(kb, expected)?),
        ],
    };
    Ok(messages)
}

fn standard_user_prompt(kb: &KnowledgeBase, expected: &ExpectedImpact) -> Result<String, CoreError> {
    let control = kb.get_control(&expected.disabled_control)?;

    // `serde_json::Map` keeps insertion order, so threats appear as `mitigates` lists them.
    let mut threats = serde_json::Map::new();
    for name in &expected.threats_should_mention {
        let threat = kb.get_threat(name)?;
        let context = ThreatContext {
            remaining_controls: expected.remaining_for(name),
            target_assets: &threat.targets,
        };
        // Borrowed string slices always serialize.
        threats.insert(
            name.clone(),
            serde_json::to_value(context).unwrap_or_default(),
        );
    }
    let threats_json = serde_json::to_string_pretty(&threats).unwrap_or_default();

    Ok(format!(
        "A security control has been disabled. Analyze the impact.

DISABLED CONTROL: {name}
- Description: {description}
- Effectiveness: {effectiveness}
- Threats it mitigates: {mitigates}

THREATS NOW LESS PROTECTED:
{threats_json}

ASSETS POTENTIALLY AT RISK: {assets}

{REQUESTED_SECTIONS}",
        name = control.name,
        description = control.description,
        effectiveness = control.effectiveness,
        mitigates = expected.threats_should_mention.join(", "),
        assets = expected.assets_should_mention.join(", "),
    ))
}

fn challenge_user_prompt(kb: &KnowledgeBase, expected: &ExpectedImpact) -> Result<String, CoreError> {
    let control = kb.get_control(&expected.disabled_control)?;
    let all_threats = kb.threat_names().collect::<Vec<_>>().join(", ");

    Ok(format!(
        "Analyze what happens when we disable: {name}

This control is described as: {description}

Consider:
- How might this affect ALL types of cyber threats ({all_threats})?
- What assets could be impacted directly or indirectly?
- Are there any hidden dependencies or unexpected consequences?
- How might attackers exploit this gap in creative ways?

Be thorough and consider second and third-order effects. Don't limit yourself to obvious impacts.",
        name = control.name,
        description = control.description,
    ))
}
