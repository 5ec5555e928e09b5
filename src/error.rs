//! Pipeline error kinds.
//!
//! One variant per spec error kind: input decode failure, a cross-input
//! mismatch, a bad CLI invocation, too few surviving control points to
//! render, and output I/O failure. All are fatal — there is no recovery
//! path once one of these is raised, only a diagnostic and a nonzero exit.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum AlignError {
    #[error("usage: vocalign <original> <instrumental> <output.wav>")]
    Argument,

    #[error("failed to read {path}: {source}")]
    Input {
        path: PathBuf,
        #[source]
        source: symphonia::core::errors::Error,
    },

    #[error("{field} mismatch: original has {a}, instrumental has {b}")]
    Mismatch {
        field: &'static str,
        a: usize,
        b: usize,
    },

    #[error("alignment failed: only {found} control point(s) survived filtering, need at least {required}")]
    Alignment { found: usize, required: usize },

    #[error("failed to write {path}: {source}")]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argument_error_prints_usage() {
        let message = AlignError::Argument.to_string();
        assert!(message.contains("vocalign"));
        assert!(message.contains("original"));
    }

    #[test]
    fn mismatch_error_names_the_differing_field() {
        let message = AlignError::Mismatch {
            field: "sample rate",
            a: 44_100,
            b: 48_000,
        }
        .to_string();
        assert!(message.contains("sample rate"));
        assert!(message.contains("44100"));
        assert!(message.contains("48000"));
    }

    #[test]
    fn alignment_error_reports_counts() {
        let message = AlignError::Alignment { found: 1, required: 2 }.to_string();
        assert!(message.contains('1'));
        assert!(message.contains('2'));
    }
}
