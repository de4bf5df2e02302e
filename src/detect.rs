/// Reserved source names that ask for the encoding to be guessed.
///
/// Each token stands for an ordered list of concrete candidates. The
/// first candidate that does not reject the input as an invalid byte
/// sequence decides the outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Autodetect {
    /// `autodetect_utf8`
    Utf8,
    /// `autodetect_jp`
    Japanese,
    /// `autodetect_kr`
    Korean,
}

impl Autodetect {
    pub const ALL: [Autodetect; 3] = [Autodetect::Utf8, Autodetect::Japanese, Autodetect::Korean];

    /// Exact, case-sensitive match against the reserved tokens.
    pub fn from_token(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|a| a.token() == name)
    }

    pub fn token(self) -> &'static str {
        match self {
            Autodetect::Utf8 => "autodetect_utf8",
            Autodetect::Japanese => "autodetect_jp",
            Autodetect::Korean => "autodetect_kr",
        }
    }

    pub fn candidates(self) -> &'static [&'static str] {
        match self {
            // Very little ISO-8859-1 text is valid UTF-8, while every byte
            // string is valid ISO-8859-1, so the stricter one goes first.
            Autodetect::Utf8 => &["UTF-8", "ISO-8859-1"],
            // The 7-bit encoding rejects any byte >= 0x80 at once. Short
            // SHIFT_JIS input may come out as EUC-JP; that is accepted.
            Autodetect::Japanese => &["ISO-2022-JP-2", "EUC-JP", "SHIFT_JIS"],
            Autodetect::Korean => &["ISO-2022-KR", "EUC-KR"],
        }
    }
}
