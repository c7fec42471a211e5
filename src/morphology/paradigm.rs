// Templates for Form I (aorist) and Forms II–XIII (perfect), after the
// table of conjugations in Lane's preface. A template is a fixed sequence of
// slots: radical, Form I pattern vowel, or literal letter/mark.

use crate::morphology::assimilation::{self, Branch};
use crate::morphology::diacritics::{DAMMA, FATHA, KASRA, SHADDA, SUKUN};
use crate::morphology::pattern::AoristPattern;
use crate::morphology::root::RootLetters;
use serde::Serialize;
use std::fmt;

const ALIF: char = '\u{0627}';
const ALIF_HAMZA: char = '\u{0623}';
const WAW: char = '\u{0648}';
const YA: char = '\u{064A}';
const SIN: char = '\u{0633}';
const TA: char = '\u{062A}';
const NUN: char = '\u{0646}';

/// ف ع ل, the radicals Arabic grammar names patterns with.
pub const FA_AIN_LAM: (char, char, char) = ('\u{0641}', '\u{0639}', '\u{0644}');

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    R1,
    R2,
    R3,
    Vowel,
    Lit(char),
}

use Slot::{Vowel, R1, R2, R3};

const F: Slot = Slot::Lit(FATHA);
const K: Slot = Slot::Lit(KASRA);
const U: Slot = Slot::Lit(DAMMA);
const O: Slot = Slot::Lit(SUKUN);
const SH: Slot = Slot::Lit(SHADDA);
const A: Slot = Slot::Lit(ALIF);

const FORM_I: &[Slot] = &[Slot::Lit(YA), F, R1, O, R2, Vowel, R3, U];
const FORM_II: &[Slot] = &[R1, F, R2, SH, F, R3, F];
const FORM_III: &[Slot] = &[R1, F, A, R2, F, R3, F];
const FORM_IV: &[Slot] = &[Slot::Lit(ALIF_HAMZA), F, R1, O, R2, F, R3, F];
const FORM_V: &[Slot] = &[Slot::Lit(TA), F, R1, F, R2, SH, F, R3, F];
const FORM_V_ASSIMILATED: &[Slot] = &[A, K, R1, SH, F, R2, SH, F, R3, F];
const FORM_VI: &[Slot] = &[Slot::Lit(TA), F, R1, F, A, R2, F, R3, F];
const FORM_VI_ASSIMILATED: &[Slot] = &[A, K, R1, SH, F, A, R2, F, R3, F];
const FORM_VII: &[Slot] = &[A, K, Slot::Lit(NUN), O, R1, F, R2, F, R3, F];
const FORM_VII_DOUBLED: &[Slot] = &[A, K, R1, SH, F, R2, F, R3, F];
const FORM_VIII: &[Slot] = &[A, K, R1, O, Slot::Lit(TA), F, R2, F, R3, F];
const FORM_IX: &[Slot] = &[A, K, R1, O, R2, F, R3, SH, F];
const FORM_X: &[Slot] = &[A, K, Slot::Lit(SIN), O, Slot::Lit(TA), F, R1, O, R2, F, R3, F];
const FORM_XI: &[Slot] = &[A, K, R1, O, R2, F, A, R3, SH, F];
// Lane's اِفْعَوْعَلَ repeats the middle radical after the wāw.
const FORM_XII: &[Slot] = &[A, K, R1, O, R2, F, Slot::Lit(WAW), O, R2, F, R3, F];
const FORM_XIII: &[Slot] = &[A, K, R1, O, R2, F, Slot::Lit(WAW), SH, F, R3, F];

/// One row of the conjugation table.
#[derive(Debug)]
pub struct Paradigm {
    pub number: u8,
    pub roman: &'static str,
    pub description: &'static str,
    template: &'static [Slot],
    /// Template used for [`Branch::Assimilated`] or [`Branch::Doubled`].
    variant: Option<&'static [Slot]>,
}

pub static PARADIGMS: [Paradigm; 13] = [
    Paradigm { number: 1, roman: "I", description: "Aorist of the simple verb", template: FORM_I, variant: None },
    Paradigm { number: 2, roman: "II", description: "Intensification/Causative", template: FORM_II, variant: None },
    Paradigm { number: 3, roman: "III", description: "Reciprocal/Associative", template: FORM_III, variant: None },
    Paradigm { number: 4, roman: "IV", description: "Causative", template: FORM_IV, variant: None },
    Paradigm { number: 5, roman: "V", description: "Reflexive of Form II", template: FORM_V, variant: Some(FORM_V_ASSIMILATED) },
    Paradigm { number: 6, roman: "VI", description: "Reflexive of Form III", template: FORM_VI, variant: Some(FORM_VI_ASSIMILATED) },
    Paradigm { number: 7, roman: "VII", description: "Passive", template: FORM_VII, variant: Some(FORM_VII_DOUBLED) },
    Paradigm { number: 8, roman: "VIII", description: "Middle voice", template: FORM_VIII, variant: None },
    Paradigm { number: 9, roman: "IX", description: "Colors/Physical defects", template: FORM_IX, variant: None },
    Paradigm { number: 10, roman: "X", description: "Seeking/Requesting", template: FORM_X, variant: None },
    Paradigm { number: 11, roman: "XI", description: "Rare pattern", template: FORM_XI, variant: None },
    Paradigm { number: 12, roman: "XII", description: "Rare pattern", template: FORM_XII, variant: None },
    Paradigm { number: 13, roman: "XIII", description: "Rare pattern", template: FORM_XIII, variant: None },
];

impl Paradigm {
    pub fn get(number: u8) -> Option<&'static Paradigm> {
        PARADIGMS.iter().find(|p| p.number == number)
    }

    /// Forms II–XIII.
    pub fn derived() -> impl Iterator<Item = &'static Paradigm> {
        PARADIGMS.iter().filter(|p| p.number != 1)
    }

    pub fn has_variant(&self) -> bool {
        self.variant.is_some()
    }

    fn template(&self, branch: Branch) -> &'static [Slot] {
        match (branch, self.variant) {
            (Branch::Generic, _) | (_, None) => self.template,
            (_, Some(variant)) => variant,
        }
    }

    /// Render this paradigm for the given radicals, choosing the branch
    /// from r1.
    pub fn render(&self, radicals: (char, char, char), pattern: AoristPattern) -> String {
        let branch = assimilation::branch(self.number, radicals.0);
        self.render_branch(branch, radicals, pattern)
    }

    pub fn render_branch(
        &self,
        branch: Branch,
        (r1, r2, r3): (char, char, char),
        pattern: AoristPattern,
    ) -> String {
        self.template(branch)
            .iter()
            .map(|slot| match slot {
                R1 => r1,
                R2 => r2,
                R3 => r3,
                Vowel => pattern.mark(),
                Slot::Lit(c) => *c,
            })
            .collect()
    }

    /// The traditional name of the pattern, written over ف ع ل.
    pub fn pattern_name(&self) -> String {
        self.render_branch(Branch::Generic, FA_AIN_LAM, AoristPattern::Damma)
    }
}

impl fmt::Display for Paradigm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Form {} ({})", self.roman, self.pattern_name())
    }
}

/// Generate the canonical text of `form` for `root`.
///
/// Returns `None` when the root has fewer than three radicals or the form
/// number is outside 1–13. `pattern` is only read for Form I and defaults to
/// damma there.
pub fn generate(form: u8, root: &RootLetters, pattern: Option<AoristPattern>) -> Option<String> {
    let paradigm = Paradigm::get(form)?;
    let radicals = root.radicals()?;
    Some(paradigm.render(radicals, pattern.unwrap_or_default()))
}

/// Known irregularities of the table that are reproduced rather than fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Anomaly {
    /// Form VIII written with the plain infixed tā' although Lane's table
    /// lists r1 as altering it.
    FormEightUnassimilated,
    /// Form XII writes the middle radical twice.
    FormTwelveRepeatedMiddle,
}

impl Anomaly {
    pub fn describe(self) -> &'static str {
        match self {
            Anomaly::FormEightUnassimilated => {
                "Form VIII r1 is in Lane's assimilation table; generic template used"
            }
            Anomaly::FormTwelveRepeatedMiddle => "Form XII template repeats r2 after the waw",
        }
    }
}

pub fn anomalies(form: u8, root: &RootLetters) -> Vec<Anomaly> {
    let mut found = Vec::new();
    match (form, root.first()) {
        (8, Some(r1)) if assimilation::in_form_viii_table(r1) => {
            found.push(Anomaly::FormEightUnassimilated)
        }
        (12, Some(_)) => found.push(Anomaly::FormTwelveRepeatedMiddle),
        _ => {}
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    const BA: char = '\u{0628}';
    const RA: char = '\u{0631}';
    const SAD: char = '\u{0635}';
    const KAF: char = '\u{0643}';
    const MIM: char = '\u{0645}';
    const LAM: char = '\u{0644}';

    fn root(letters: &[char]) -> RootLetters {
        RootLetters::extract(&letters.iter().collect::<String>())
    }

    #[test]
    fn test_form_i_damma() {
        let generated = generate(1, &root(&[BA, TA, RA]), Some(AoristPattern::Damma));
        let expected: String = [YA, FATHA, BA, SUKUN, TA, DAMMA, RA, DAMMA].iter().collect();
        assert_eq!(generated, Some(expected));
    }

    #[test]
    fn test_form_i_pattern_vowel() {
        let kasra = generate(1, &root(&[BA, TA, RA]), Some(AoristPattern::Kasra)).unwrap();
        assert_eq!(kasra.chars().nth(5), Some(KASRA));
        let default = generate(1, &root(&[BA, TA, RA]), None).unwrap();
        assert_eq!(default.chars().nth(5), Some(DAMMA));
    }

    #[test]
    fn test_form_vii_nun_doubles() {
        let generated = generate(7, &root(&[NUN, SAD, RA]), None).unwrap();
        let expected: String = [ALIF, KASRA, NUN, SHADDA, FATHA, SAD, FATHA, RA, FATHA].iter().collect();
        assert_eq!(generated, expected);
        assert!(!generated.contains(&format!("{NUN}{SUKUN}")));
    }

    #[test]
    fn test_form_vii_mim_and_generic() {
        let mim = generate(7, &root(&[MIM, LAM, SIN]), None).unwrap();
        assert!(mim.starts_with(&[ALIF, KASRA, MIM, SHADDA].iter().collect::<String>()));

        let generic = generate(7, &root(&[KAF, SIN, RA]), None).unwrap();
        assert!(generic.starts_with(&[ALIF, KASRA, NUN, SUKUN, KAF].iter().collect::<String>()));
    }

    #[test]
    fn test_form_v_branches() {
        let plain = generate(5, &root(&[KAF, TA, BA]), None).unwrap();
        let expected: String = [TA, FATHA, KAF, FATHA, TA, SHADDA, FATHA, BA, FATHA].iter().collect();
        assert_eq!(plain, expected);

        let assimilated = generate(5, &root(&[SAD, BA, RA]), None).unwrap();
        let expected: String = [ALIF, KASRA, SAD, SHADDA, FATHA, BA, SHADDA, FATHA, RA, FATHA].iter().collect();
        assert_eq!(assimilated, expected);
    }

    #[test]
    fn test_form_vi_branches() {
        let plain = generate(6, &root(&[KAF, TA, BA]), None).unwrap();
        assert!(plain.starts_with(&[TA, FATHA, KAF, FATHA, ALIF].iter().collect::<String>()));

        let assimilated = generate(6, &root(&[SAD, BA, RA]), None).unwrap();
        assert!(assimilated.starts_with(&[ALIF, KASRA, SAD, SHADDA, FATHA, ALIF].iter().collect::<String>()));
    }

    #[test]
    fn test_derived_templates_for_ktb() {
        let r = root(&[KAF, TA, BA]);
        let cases: [(u8, &[char]); 12] = [
            (2, &[KAF, FATHA, TA, SHADDA, FATHA, BA, FATHA]),
            (3, &[KAF, FATHA, ALIF, TA, FATHA, BA, FATHA]),
            (4, &[ALIF_HAMZA, FATHA, KAF, SUKUN, TA, FATHA, BA, FATHA]),
            (5, &[TA, FATHA, KAF, FATHA, TA, SHADDA, FATHA, BA, FATHA]),
            (6, &[TA, FATHA, KAF, FATHA, ALIF, TA, FATHA, BA, FATHA]),
            (7, &[ALIF, KASRA, NUN, SUKUN, KAF, FATHA, TA, FATHA, BA, FATHA]),
            (8, &[ALIF, KASRA, KAF, SUKUN, TA, FATHA, TA, FATHA, BA, FATHA]),
            (9, &[ALIF, KASRA, KAF, SUKUN, TA, FATHA, BA, SHADDA, FATHA]),
            (10, &[ALIF, KASRA, SIN, SUKUN, TA, FATHA, KAF, SUKUN, TA, FATHA, BA, FATHA]),
            (11, &[ALIF, KASRA, KAF, SUKUN, TA, FATHA, ALIF, BA, SHADDA, FATHA]),
            (12, &[ALIF, KASRA, KAF, SUKUN, TA, FATHA, WAW, SUKUN, TA, FATHA, BA, FATHA]),
            (13, &[ALIF, KASRA, KAF, SUKUN, TA, FATHA, WAW, SHADDA, FATHA, BA, FATHA]),
        ];

        for (form, chars) in cases {
            let expected: String = chars.iter().collect();
            assert_eq!(generate(form, &r, None), Some(expected), "Form {}", form);
        }
    }

    #[test]
    fn test_variant_templates() {
        let form_vi = generate(6, &root(&[SAD, BA, RA]), None).unwrap();
        let expected: String = [ALIF, KASRA, SAD, SHADDA, FATHA, ALIF, BA, FATHA, RA, FATHA].iter().collect();
        assert_eq!(form_vi, expected);

        let form_vii = generate(7, &root(&[MIM, LAM, SIN]), None).unwrap();
        let expected: String = [ALIF, KASRA, MIM, SHADDA, FATHA, LAM, FATHA, SIN, FATHA].iter().collect();
        assert_eq!(form_vii, expected);
    }

    #[test]
    fn test_form_viii_ignores_assimilation() {
        let generated = generate(8, &root(&[SAD, BA, RA]), None).unwrap();
        let expected: String = [ALIF, KASRA, SAD, SUKUN, TA, FATHA, BA, FATHA, RA, FATHA].iter().collect();
        assert_eq!(generated, expected);
        assert_eq!(anomalies(8, &root(&[SAD, BA, RA])), vec![Anomaly::FormEightUnassimilated]);
        assert!(anomalies(8, &root(&[KAF, TA, BA])).is_empty());
    }

    #[test]
    fn test_form_xii_repeats_middle_radical() {
        let generated = generate(12, &root(&[KAF, TA, BA]), None).unwrap();
        assert_eq!(generated.chars().filter(|c| *c == TA).count(), 2);
        assert_eq!(anomalies(12, &root(&[KAF, TA, BA])), vec![Anomaly::FormTwelveRepeatedMiddle]);
    }

    #[test]
    fn test_pattern_names_over_fa_ain_lam() {
        let (fa, ain, lam) = FA_AIN_LAM;
        let form_ii: String = [fa, FATHA, ain, SHADDA, FATHA, lam, FATHA].iter().collect();
        assert_eq!(Paradigm::get(2).unwrap().pattern_name(), form_ii);
        assert_eq!(Paradigm::get(10).unwrap().pattern_name(), "اِسْتَفْعَلَ");
    }

    #[test]
    fn test_form_i_matches_lane_varieties() {
        let (fa, ain, lam) = FA_AIN_LAM;
        let root = root(&[fa, ain, lam]);
        for variety in crate::morphology::pattern::LANE_VARIETIES.iter() {
            assert_eq!(generate(1, &root, Some(variety.pattern)).unwrap(), variety.aorist);
        }
    }

    #[test]
    fn test_invalid_input_yields_none() {
        let short = RootLetters::extract("\u{0628}\u{062A}");
        for form in 1..=13 {
            assert_eq!(generate(form, &short, None), None);
        }
        assert_eq!(generate(0, &root(&[BA, TA, RA]), None), None);
        assert_eq!(generate(14, &root(&[BA, TA, RA]), None), None);
    }

    #[test]
    fn test_every_form_is_fully_vocalized() {
        let r = root(&[KAF, TA, BA]);
        for paradigm in PARADIGMS.iter() {
            let text = generate(paradigm.number, &r, None).unwrap();
            let last = text.chars().last().unwrap();
            assert!(last == FATHA || last == DAMMA, "Form {}", paradigm.roman);
        }
    }
}
