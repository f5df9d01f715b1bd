//! Repertoire offered by the parameter form

/// Pieces from the music21 corpus
pub const MUSIC21_CORPUS: [&str; 8] = [
    "mozart/k155/movement1.mxl",
    "mozart/k156/movement1.mxl",
    "mozart/k458/movement1.mxl",
    "bach/bwv244.10.mxl",
    "bach/bwv244.15.mxl",
    "bach/bwv244.17.mxl",
    "beethoven/opus18no1/movement1.mxl",
    "beethoven/opus18no1/movement2.mxl",
];

/// Bundled sample files
pub const LOCAL_CORPUS: [&str; 2] = [
    "sample_corpus/MessiaenTheme.xml",
    "sample_corpus/MozartK157_expo.xml",
];

/// Everything the form lists, corpus pieces first
pub const BUILTIN_CORPUS: [&str; 10] = [
    MUSIC21_CORPUS[0],
    MUSIC21_CORPUS[1],
    MUSIC21_CORPUS[2],
    MUSIC21_CORPUS[3],
    MUSIC21_CORPUS[4],
    MUSIC21_CORPUS[5],
    MUSIC21_CORPUS[6],
    MUSIC21_CORPUS[7],
    LOCAL_CORPUS[0],
    LOCAL_CORPUS[1],
];

/// Whether `repertoire` is one of the built-in pieces
pub fn is_builtin(repertoire: &str) -> bool {
    BUILTIN_CORPUS.contains(&repertoire)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lookup() {
        assert!(is_builtin("bach/bwv244.10.mxl"));
        assert!(is_builtin("sample_corpus/MozartK157_expo.xml"));
        assert!(!is_builtin("bach/bwv1.mxl"));
    }
}
