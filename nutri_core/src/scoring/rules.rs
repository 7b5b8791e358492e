//! Declarative score rules.
//!
//! A rule is a predicate over a metrics struct, a signed delta, and an
//! optional recommendation or warning rendered from the same metrics. Rule
//! tables are plain `const` slices, so a scorer is just data plus a call to
//! [`evaluate`].

use super::clamp_score;

/// Where a rule's message goes when it fires
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoteKind {
    Recommendation,
    Warning,
}

/// Message attached to a rule
pub struct Note<M> {
    pub kind: NoteKind,
    pub render: fn(&M) -> String,
}

impl<M> Note<M> {
    pub const fn recommend(render: fn(&M) -> String) -> Self {
        Self {
            kind: NoteKind::Recommendation,
            render,
        }
    }

    pub const fn warn(render: fn(&M) -> String) -> Self {
        Self {
            kind: NoteKind::Warning,
            render,
        }
    }
}

/// A single threshold rule
pub struct Rule<M> {
    pub name: &'static str,
    pub applies: fn(&M) -> bool,
    pub delta: f64,
    pub note: Option<Note<M>>,
}

/// Result of folding a rule table over a set of metrics
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RuleOutcome {
    /// Clamped to 0–100
    pub score: f64,
    /// Names of the rules that fired, in table order
    pub fired: Vec<&'static str>,
    pub recommendations: Vec<String>,
    pub warnings: Vec<String>,
}

/// Apply every matching rule to `base` and clamp the result.
pub fn evaluate<M>(base: f64, rules: &[Rule<M>], metrics: &M) -> RuleOutcome {
    let mut outcome = rules
        .iter()
        .filter(|rule| (rule.applies)(metrics))
        .fold(
            RuleOutcome {
                score: base,
                ..RuleOutcome::default()
            },
            |mut outcome, rule| {
                outcome.score += rule.delta;
                outcome.fired.push(rule.name);
                if let Some(note) = &rule.note {
                    let message = (note.render)(metrics);
                    match note.kind {
                        NoteKind::Recommendation => outcome.recommendations.push(message),
                        NoteKind::Warning => outcome.warnings.push(message),
                    }
                }
                outcome
            },
        );

    tracing::trace!("Rules fired: {:?} -> {}", outcome.fired, outcome.score);
    outcome.score = clamp_score(outcome.score);
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Sample {
        value: f64,
    }

    const SAMPLE_RULES: &[Rule<Sample>] = &[
        Rule {
            name: "high",
            applies: |m: &Sample| m.value > 10.0,
            delta: -30.0,
            note: Some(Note::warn(|m: &Sample| format!("value {} is high", m.value))),
        },
        Rule {
            name: "positive",
            applies: |m: &Sample| m.value > 0.0,
            delta: 5.0,
            note: None,
        },
        Rule {
            name: "small",
            applies: |m: &Sample| m.value < 5.0,
            delta: 0.0,
            note: Some(Note::recommend(|_: &Sample| "eat more".to_string())),
        },
    ];

    #[test]
    fn test_fires_matching_rules_in_order() {
        let outcome = evaluate(50.0, SAMPLE_RULES, &Sample { value: 20.0 });
        assert_eq!(outcome.score, 25.0);
        assert_eq!(outcome.fired, vec!["high", "positive"]);
        assert_eq!(outcome.warnings, vec!["value 20 is high".to_string()]);
        assert!(outcome.recommendations.is_empty());
    }

    #[test]
    fn test_message_only_rule() {
        let outcome = evaluate(50.0, SAMPLE_RULES, &Sample { value: -1.0 });
        assert_eq!(outcome.score, 50.0);
        assert_eq!(outcome.recommendations, vec!["eat more".to_string()]);
    }

    #[test]
    fn test_result_is_clamped() {
        let outcome = evaluate(10.0, SAMPLE_RULES, &Sample { value: 11.0 });
        assert_eq!(outcome.score, 0.0);
    }

    #[test]
    fn test_no_rules() {
        let outcome = evaluate::<Sample>(50.0, &[], &Sample { value: 0.0 });
        assert_eq!(outcome.score, 50.0);
        assert!(outcome.fired.is_empty());
    }
}
