//! Ordered trimming cascade applied to every motion body.

use std::fmt;

use super::trim;

/// One named rule of the cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrimStep {
    Linebreaks,
    Whitespace,
    Subtitle,
    LeadingTitle,
    ProposedDecision,
    LeadingMotivation,
    LeadingSignature,
    Footer,
}

impl TrimStep {
    /// Every step in the order the cascade requires. Reordering changes the output.
    pub const ALL: [TrimStep; 8] = [
        TrimStep::Linebreaks,
        TrimStep::Whitespace,
        TrimStep::Subtitle,
        TrimStep::LeadingTitle,
        TrimStep::ProposedDecision,
        TrimStep::LeadingMotivation,
        TrimStep::LeadingSignature,
        TrimStep::Footer,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TrimStep::Linebreaks => "linebreaks",
            TrimStep::Whitespace => "whitespace",
            TrimStep::Subtitle => "subtitle",
            TrimStep::LeadingTitle => "leading_title",
            TrimStep::ProposedDecision => "proposed_decision",
            TrimStep::LeadingMotivation => "leading_motivation",
            TrimStep::LeadingSignature => "leading_signature",
            TrimStep::Footer => "footer",
        }
    }

    /// Steps that read the title or subtitle of the same row.
    pub fn needs_title_cols(self) -> bool {
        matches!(self, TrimStep::Subtitle | TrimStep::LeadingTitle)
    }

    /// Apply this step alone.
    pub fn apply(self, row: &TrimInput<'_>) -> String {
        let text = row.text;
        match self {
            TrimStep::Linebreaks => trim::trim_linebreaks(text),
            TrimStep::Whitespace => trim::trim_whitespace(text),
            TrimStep::Subtitle => trim::trim_by_subtitle(text, row.subtitle),
            TrimStep::LeadingTitle => trim::trim_by_leading_title(text, row.title),
            TrimStep::ProposedDecision => trim::trim_by_proposed_decision(text),
            TrimStep::LeadingMotivation => trim::trim_leading_motivation(text),
            TrimStep::LeadingSignature => trim::blank_leading_signature(text),
            TrimStep::Footer => trim::delete_footer(text),
        }
    }
}

impl fmt::Display for TrimStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The columns of one row that the cascade looks at.
#[derive(Debug, Clone, Copy)]
pub struct TrimInput<'a> {
    pub text: &'a str,
    pub title: Option<&'a str>,
    pub subtitle: Option<&'a str>,
}

impl<'a> TrimInput<'a> {
    pub fn new(text: &'a str, title: Option<&'a str>, subtitle: Option<&'a str>) -> Self {
        Self {
            text,
            title,
            subtitle,
        }
    }

    /// Free text with no title columns.
    pub fn text_only(text: &'a str) -> Self {
        Self::new(text, None, None)
    }
}

/// An ordered selection of [`TrimStep`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrimPipeline {
    steps: Vec<TrimStep>,
}

impl Default for TrimPipeline {
    fn default() -> Self {
        Self::for_motions()
    }
}

impl TrimPipeline {
    /// The full cascade, for rows that carry title and subtitle.
    pub fn for_motions() -> Self {
        Self {
            steps: TrimStep::ALL.to_vec(),
        }
    }

    /// The cascade without the title and subtitle steps, for user-supplied text.
    pub fn for_free_text() -> Self {
        Self::for_motions().retain(|step| !step.needs_title_cols())
    }

    pub fn with_title_cols(has_title_cols: bool) -> Self {
        if has_title_cols {
            Self::for_motions()
        } else {
            Self::for_free_text()
        }
    }

    /// Disable one step, keeping the order of the rest.
    pub fn without(self, step: TrimStep) -> Self {
        self.retain(|s| s != step)
    }

    fn retain(mut self, keep: impl Fn(TrimStep) -> bool) -> Self {
        self.steps.retain(|s| keep(*s));
        self
    }

    pub fn steps(&self) -> &[TrimStep] {
        &self.steps
    }

    /// Run every enabled step, each on the output of the previous one.
    pub fn run(&self, row: TrimInput<'_>) -> String {
        let mut text = row.text.to_string();
        for step in &self.steps {
            text = step.apply(&TrimInput::new(&text, row.title, row.subtitle));
        }
        text
    }

    /// Shorthand for [`run`](Self::run) on text without title columns.
    pub fn run_text(&self, text: &str) -> String {
        self.run(TrimInput::text_only(text))
    }
}
