pub mod assimilation;
pub mod diacritics;
pub mod paradigm;
pub mod pattern;
pub mod root;

pub use diacritics::DiacriticMark;
pub use paradigm::{generate, Anomaly, Paradigm};
pub use pattern::{infer, AoristPattern};
pub use root::RootLetters;
