use super::annotate::SecondaryStructureRange;
use super::error::LineError;

/// Events a caller can observe while a file is parsed.
///
/// Parsing behaves identically whether or not anyone listens.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// A structure was pushed into the store.
    StructurePushed { index: usize, id: String },
    /// A record was dropped; parsing continued with the next line.
    LineSkipped(LineError),
    /// A secondary-structure range whose start residue is not in the structure.
    UnmatchedRange {
        structure_index: usize,
        range: SecondaryStructureRange,
    },
}

pub type DiagnosticCallback<'a> = Box<dyn Fn(&Diagnostic) + Send + Sync + 'a>;

#[derive(Default)]
pub struct DiagnosticReporter<'a> {
    callback: Option<DiagnosticCallback<'a>>,
}

impl<'a> DiagnosticReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: DiagnosticCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Diagnostic) {
        if let Some(cb) = &self.callback {
            cb(&event);
        }
    }
}
