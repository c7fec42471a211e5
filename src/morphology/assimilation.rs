// Root-initial assimilation in the derived forms.
//
// Lane's preface lists the consonants that swallow the tā' of Forms V/VI
// and the nūn of Form VII. Form VIII has its own table, which is kept here
// for reporting only: the generator always writes the unassimilated
// اِفْتَعَلَ template.

use serde::Serialize;

pub const NUN: char = '\u{0646}';
pub const MIM: char = '\u{0645}';
pub const TA: char = '\u{062A}';

/// ت ث ج د ذ ز س ش ص ض ط ظ
pub const ASSIMILATING: [char; 12] = [
    '\u{062A}', '\u{062B}', '\u{062C}', '\u{062F}', '\u{0630}', '\u{0632}',
    '\u{0633}', '\u{0634}', '\u{0635}', '\u{0636}', '\u{0637}', '\u{0638}',
];

/// Form VIII letters Lane records as altering the infixed tā'.
/// Same letters as the Form V/VI set.
pub const FORM_VIII_TABLE: [char; 12] = ASSIMILATING;

/// Which template a paradigm uses for a given first radical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Branch {
    /// The paradigm's ordinary template.
    Generic,
    /// Forms V/VI: alif-kasra plus doubled r1 replaces the tā' prefix.
    Assimilated,
    /// Form VII: the augment nūn merges with an r1 of nūn or mīm.
    Doubled,
}

pub fn is_assimilating(r1: char) -> bool {
    ASSIMILATING.contains(&r1)
}

/// Pick the template branch for `form` given the first radical.
pub fn branch(form: u8, r1: char) -> Branch {
    match form {
        5 | 6 if is_assimilating(r1) => Branch::Assimilated,
        7 if r1 == NUN || r1 == MIM => Branch::Doubled,
        _ => Branch::Generic,
    }
}

/// True when Lane's Form VIII table lists `r1`. The generator does not act
/// on this; it only drives the anomaly flag on reported corrections.
pub fn in_form_viii_table(r1: char) -> bool {
    FORM_VIII_TABLE.contains(&r1)
}
