//! Per-code pipeline: decode, glue every page, encode the results.

use glue_core::Field;
use glue_fumen::{FumenError, Page};
use log::{debug, warn};
#[cfg(feature = "rayon")]
use rayon::prelude::*;
use serde::Serialize;
use thiserror::Error;

use crate::assemble::assemble;
use crate::config::SearchConfig;
use crate::dedup::SolutionSet;
use crate::scan::{is_glueable, Frame, Scanner};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GlueError {
    #[error("could not decode {code}: {source}")]
    Decode {
        code: String,
        #[source]
        source: FumenError,
    },
    #[error("could not encode a glued sequence: {0}")]
    Encode(#[from] FumenError),
    #[error("unknown piece {0:?} in order")]
    UnknownPiece(char),
}

/// Search result for one board.
#[derive(Debug, Default)]
pub struct SearchOutcome {
    pub solutions: SolutionSet,
    /// One board per attempted rotation, when visualizing.
    pub attempts: Vec<Field>,
}

/// Glue one board: feasibility precheck, then the full search.
pub fn glue_field(field: &Field, config: &SearchConfig) -> SearchOutcome {
    if !is_glueable(field) {
        debug!("piece counts {:?} are not multiples of 4", field.piece_counts());
        return SearchOutcome::default();
    }
    let mut scanner = Scanner::new(config);
    let root = Frame::root(field.clone(), config.order.as_deref());
    debug!("searching board of height {}", root.height);
    let _ = scanner.search(&root);
    let (solutions, attempts) = scanner.finish();
    debug!("{} solutions", solutions.len());
    SearchOutcome {
        solutions,
        attempts,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageReport {
    pub page: usize,
    /// Glued codes; empty when the page could not be glued.
    pub outputs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeReport {
    pub code: String,
    pub pages: Vec<PageReport>,
    /// Set when the code itself could not be processed.
    pub error: Option<String>,
    #[serde(skip)]
    trace: Vec<Page>,
}

impl CodeReport {
    fn new(code: &str) -> Self {
        Self {
            code: code.to_string(),
            pages: Vec::new(),
            error: None,
            trace: Vec::new(),
        }
    }

    fn failed(code: &str, error: &GlueError) -> Self {
        Self {
            error: Some(error.to_string()),
            ..Self::new(code)
        }
    }

    /// Pages without any reconstruction.
    pub fn unglued_pages(&self) -> usize {
        self.pages.iter().filter(|page| page.outputs.is_empty()).count()
    }

    pub fn outputs(&self) -> impl Iterator<Item = &String> {
        self.pages.iter().flat_map(|page| page.outputs.iter())
    }
}

/// Glue every page of one code.
pub fn glue_code(code: &str, config: &SearchConfig) -> Result<CodeReport, GlueError> {
    let pages = glue_fumen::decode(code).map_err(|source| GlueError::Decode {
        code: code.to_string(),
        source,
    })?;

    let mut report = CodeReport::new(code);
    for (index, page) in pages.iter().enumerate() {
        let field = page.field.clone().unwrap_or_default();
        let blank = field.blanked();
        let outcome = glue_field(&field, config);
        if config.visualize {
            report
                .trace
                .extend(outcome.attempts.into_iter().map(|attempt| Page::new().with_field(attempt)));
        }

        let mut outputs = Vec::with_capacity(outcome.solutions.len());
        for sequence in outcome.solutions.iter() {
            let pages = assemble(&blank, sequence);
            outputs.push(glue_fumen::encode(&pages)?);
            if config.visualize {
                report.trace.extend(pages);
            }
        }
        if outputs.is_empty() {
            warn!("{code} page {} couldn't be glued", index + 1);
        }
        report.pages.push(PageReport {
            page: index,
            outputs,
        });
    }
    Ok(report)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GlueReport {
    pub codes: Vec<CodeReport>,
    /// Debug trace of every attempt and result, when visualizing.
    pub trace: Option<String>,
}

impl GlueReport {
    /// Pages that could not be glued plus codes that could not be decoded.
    pub fn unglued(&self) -> usize {
        self.codes
            .iter()
            .map(|code| if code.error.is_some() { 1 } else { code.unglued_pages() })
            .sum()
    }

    /// Output lines: per code the failures, then the ambiguity warnings,
    /// then the glued codes; finally a summary warning when anything failed.
    /// Decode errors are left to the caller.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        for code in self.codes.iter().filter(|code| code.error.is_none()) {
            for _ in 0..code.unglued_pages() {
                lines.push(format!("{} couldn't be glued", code.code));
            }
            for page in code.pages.iter().filter(|page| page.outputs.len() > 1) {
                lines.push(format!(
                    "Warning: {} led to {} outputs",
                    code.code,
                    page.outputs.len()
                ));
            }
            lines.extend(code.outputs().cloned());
        }
        let unglued = self.unglued();
        if unglued > 0 {
            lines.push(format!("Warning: {unglued} fumens couldn't be glued"));
        }
        lines
    }

    pub fn errors(&self) -> impl Iterator<Item = (&str, &str)> {
        self.codes
            .iter()
            .filter_map(|code| code.error.as_deref().map(|error| (code.code.as_str(), error)))
    }
}

fn glue_one(code: &str, config: &SearchConfig) -> CodeReport {
    glue_code(code, config).unwrap_or_else(|error| {
        warn!("{error}");
        CodeReport::failed(code, &error)
    })
}

/// Glue many codes. Codes are independent, so with the `rayon` feature they
/// run in parallel; the report keeps input order.
pub fn glue_codes<S: AsRef<str> + Sync>(codes: &[S], config: &SearchConfig) -> GlueReport {
    #[cfg(feature = "rayon")]
    let codes: Vec<CodeReport> = codes
        .par_iter()
        .map(|code| glue_one(code.as_ref(), config))
        .collect();
    #[cfg(not(feature = "rayon"))]
    let codes: Vec<CodeReport> = codes
        .iter()
        .map(|code| glue_one(code.as_ref(), config))
        .collect();

    let trace = config.visualize.then(|| {
        let pages: Vec<Page> = codes.iter().flat_map(|code| code.trace.iter().cloned()).collect();
        glue_fumen::encode(&pages)
    });
    let trace = match trace {
        Some(Ok(encoded)) => Some(encoded),
        Some(Err(error)) => {
            warn!("could not encode the trace: {error}");
            None
        }
        None => None,
    };

    GlueReport { codes, trace }
}

/// Split raw inputs on whitespace, dropping empty pieces.
pub fn split_codes<S: AsRef<str>>(inputs: &[S]) -> Vec<String> {
    inputs
        .iter()
        .flat_map(|input| input.as_ref().split_whitespace())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_codes() {
        let inputs = ["v115@a v115@b\n", "  v115@c\t\n\n"];
        assert_eq!(split_codes(&inputs), vec!["v115@a", "v115@b", "v115@c"]);
        assert!(split_codes::<&str>(&[]).is_empty());
    }

    #[test]
    fn test_empty_board_gives_empty_sequence() {
        let outcome = glue_field(&Field::new(), &SearchConfig::default());
        assert_eq!(outcome.solutions.len(), 1);
        assert!(outcome.solutions.as_slice()[0].is_empty());
    }

    #[test]
    fn test_infeasible_board_skips_search() {
        let field: Field = "TTT_______\nTTT_______".parse().expect("valid field");
        let config = SearchConfig::default().with_visualize(true);
        let outcome = glue_field(&field, &config);
        assert!(outcome.solutions.is_empty());
        assert!(outcome.attempts.is_empty(), "no rotation was tried");
    }

    #[test]
    fn test_decode_failure_is_reported() {
        let report = glue_codes(&["nonsense"], &SearchConfig::default());
        assert_eq!(report.codes.len(), 1);
        assert!(report.codes[0].error.is_some());
        assert_eq!(report.unglued(), 1);
        assert_eq!(report.errors().count(), 1);
        assert_eq!(report.lines(), vec!["Warning: 1 fumens couldn't be glued"]);
    }

    #[test]
    fn test_empty_code_round_trip() {
        let report = glue_codes(&["v115@vhAAgH"], &SearchConfig::default());
        assert_eq!(report.lines(), vec!["v115@vhAAgH"]);
        assert_eq!(report.trace, None);
    }
}
