use crate::error::EditError;
use crate::{CorrectionCandidate, Edit};

/// Apply edits to the snapshot they were computed from, in one pass.
///
/// Every edit is checked against the original text before anything is
/// built: it must lie inside the document on character boundaries, must not
/// overlap another edit, and the snapshot must still hold the text the edit
/// expects. Bytes outside the edited spans are copied unchanged.
pub fn apply_edits(content: &str, edits: &[Edit]) -> Result<(String, usize), EditError> {
    let mut ordered: Vec<&Edit> = edits.iter().collect();
    ordered.sort_by_key(|e| (e.span.start, e.span.end));

    let mut previous_end = 0;
    for (idx, edit) in ordered.iter().enumerate() {
        let (start, end) = (edit.span.start, edit.span.end);

        if start > end || end > content.len() {
            return Err(EditError::OutOfBounds {
                start,
                end,
                len: content.len(),
            });
        }
        if !content.is_char_boundary(start) || !content.is_char_boundary(end) {
            return Err(EditError::NotCharBoundary { start, end });
        }
        if idx > 0 && start < previous_end {
            return Err(EditError::Overlap {
                start,
                previous_end,
            });
        }

        let found = &content[start..end];
        if found != edit.expected {
            return Err(EditError::Stale {
                start,
                end,
                expected: edit.expected.clone(),
                found: found.to_string(),
            });
        }
        previous_end = end;
    }

    let mut output = String::with_capacity(content.len());
    let mut cursor = 0;
    for edit in &ordered {
        output.push_str(&content[cursor..edit.span.start]);
        output.push_str(&edit.replacement);
        cursor = edit.span.end;
    }
    output.push_str(&content[cursor..]);

    Ok((output, ordered.len()))
}

/// Replace every candidate's span with its generated text.
pub fn apply(content: &str, candidates: &[CorrectionCandidate]) -> Result<(String, usize), EditError> {
    let edits: Vec<Edit> = candidates.iter().map(CorrectionCandidate::edit).collect();
    apply_edits(content, &edits)
}
